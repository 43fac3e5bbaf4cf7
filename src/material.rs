//! Base Material
//!
//! A material is a named, typed bag of shading parameters. Concrete
//! material kinds ([`SingleBxdf`](crate::SingleBxdf),
//! [`MultiBxdf`](crate::MultiBxdf)) register their fixed input set during
//! construction; callers then assign values by name, each assignment
//! type-checked against the registered type-set. A downstream compiler
//! reads values back through typed getters, walks the structure through
//! the snapshot iterators, and clears the dirty flag once its cached
//! compiled representation is up to date.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use smallvec::SmallVec;
use uuid::Uuid;

use crate::errors::{MaterialError, Result};
use crate::input::{Input, InputInfo, InputTypes, InputValue};
use crate::store::{MaterialHandle, TextureHandle};

/// Base material: input registry, dirty flag, sidedness flag.
///
/// The dirty flag is cache-validity bookkeeping, not material content, so
/// it is settable through `&self`; everything else mutates through
/// `&mut self`.
#[derive(Debug)]
pub struct Material {
    pub uuid: Uuid,
    pub name: Option<Cow<'static, str>>,

    // BTreeMap keeps iteration order deterministic (name order).
    inputs: BTreeMap<Cow<'static, str>, Input>,
    two_sided: bool,
    dirty: AtomicBool,
}

impl Material {
    /// Creates an empty material with no registered inputs.
    ///
    /// A fresh material is dirty: nothing downstream has compiled it yet.
    #[must_use]
    pub fn new() -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: None,
            inputs: BTreeMap::new(),
            two_sided: false,
            dirty: AtomicBool::new(true),
        }
    }

    // ========================================================================
    // Input registry
    // ========================================================================

    /// Registers a named input with its accepted type-set.
    ///
    /// Intended for material constructors (and retagging paths) only; the
    /// input set of an instance is fixed once it is exposed to callers.
    /// The new input starts unset.
    ///
    /// # Panics
    ///
    /// Panics if `supported` is empty or if `name` is already registered.
    /// Both are programming errors in the constructing code path.
    pub fn register_input(
        &mut self,
        name: impl Into<Cow<'static, str>>,
        description: impl Into<Cow<'static, str>>,
        supported: InputTypes,
    ) {
        let name = name.into();
        assert!(
            !supported.is_empty(),
            "material input `{name}` must accept at least one value kind"
        );
        assert!(
            !self.inputs.contains_key(name.as_ref()),
            "material input `{name}` is already registered"
        );

        let info = InputInfo {
            name: name.clone(),
            description: description.into(),
            supported,
        };
        self.inputs.insert(name, Input { info, value: None });
    }

    /// Removes every registered input.
    ///
    /// Used by retagging paths that redefine which inputs are meaningful;
    /// the compiled state is stale afterwards, so the material is marked
    /// dirty.
    pub fn clear_inputs(&mut self) {
        self.inputs.clear();
        self.dirty.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn has_input(&self, name: &str) -> bool {
        self.inputs.contains_key(name)
    }

    /// Description of a registered input, if present.
    #[must_use]
    pub fn input_info(&self, name: &str) -> Option<&InputInfo> {
        self.inputs.get(name).map(|input| &input.info)
    }

    #[must_use]
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    // ========================================================================
    // Typed get / set
    // ========================================================================

    /// Assigns a value to a registered input.
    ///
    /// Accepts anything convertible to [`InputValue`]: a `Vec4`, a
    /// `TextureHandle` or a `MaterialHandle`. The value's kind must be a
    /// member of the input's registered type-set. On success the previous
    /// value is replaced and the material is marked dirty; on failure
    /// nothing changes.
    ///
    /// Reference liveness is not validated here: a handle to an asset that
    /// no longer exists is stored as-is and resolves to nothing later.
    pub fn set_input(&mut self, name: &str, value: impl Into<InputValue>) -> Result<()> {
        let value = value.into();
        let slot = self
            .inputs
            .get_mut(name)
            .ok_or_else(|| MaterialError::UnknownInput(name.to_owned()))?;

        if !slot.info.supported.contains(value.kind()) {
            return Err(MaterialError::UnsupportedType {
                name: name.to_owned(),
                actual: value.kind(),
                supported: slot.info.supported,
            });
        }

        slot.value = Some(value);
        self.dirty.store(true, Ordering::Relaxed);
        Ok(())
    }

    /// Reads the current value of a registered input.
    ///
    /// Fails with [`MaterialError::UnknownInput`] for an unregistered name
    /// and [`MaterialError::UnsetValue`] for an input that was never
    /// assigned.
    pub fn input_value(&self, name: &str) -> Result<InputValue> {
        let slot = self
            .inputs
            .get(name)
            .ok_or_else(|| MaterialError::UnknownInput(name.to_owned()))?;
        slot.value
            .ok_or_else(|| MaterialError::UnsetValue(name.to_owned()))
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Snapshot iterator over every registered input, in name order.
    ///
    /// The sequence is captured at call time; mutating the material
    /// afterwards does not affect an iterator already created. Creating an
    /// iterator never touches the dirty flag.
    #[must_use]
    pub fn inputs(&self) -> Inputs {
        let entries: SmallVec<[Input; 8]> = self.inputs.values().cloned().collect();
        Inputs {
            inner: entries.into_iter(),
        }
    }

    /// Snapshot iterator over the texture handles currently plugged in.
    #[must_use]
    pub fn textures(&self) -> Textures {
        let handles: SmallVec<[TextureHandle; 8]> = self
            .inputs
            .values()
            .filter_map(|input| input.value.as_ref().and_then(InputValue::as_texture))
            .collect();
        Textures {
            inner: handles.into_iter(),
        }
    }

    /// Snapshot iterator over the material handles currently plugged in.
    ///
    /// This is the edge set of the material dependency graph.
    #[must_use]
    pub fn materials(&self) -> Materials {
        let handles: SmallVec<[MaterialHandle; 4]> = self
            .inputs
            .values()
            .filter_map(|input| input.value.as_ref().and_then(InputValue::as_material))
            .collect();
        Materials {
            inner: handles.into_iter(),
        }
    }

    // ========================================================================
    // Dirty state and sidedness
    // ========================================================================

    /// Whether the material changed since the compiler last synchronized.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }

    /// Sets the dirty flag, normally to clear it after recompilation.
    ///
    /// Takes `&self`: the flag is external cache bookkeeping and may be
    /// cleared through a read-only view of the material. A later
    /// `set_input` marks the material dirty again regardless.
    pub fn set_dirty(&self, dirty: bool) {
        self.dirty.store(dirty, Ordering::Relaxed);
    }

    /// Whether normal orientation is irrelevant for this material.
    #[must_use]
    pub fn is_two_sided(&self) -> bool {
        self.two_sided
    }

    /// Sets two-sidedness. Does not mark the material dirty: sidedness is
    /// pipeline state, not compiled parameter state.
    pub fn set_two_sided(&mut self, two_sided: bool) {
        self.two_sided = two_sided;
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::new()
    }
}

// Snapshot iterators
// ----------------------------------------------------------------------------
// Each owns its captured sequence, so a live iterator never borrows the
// material and later mutation cannot retroactively change what it yields.

/// Owning iterator over all registered inputs of a material.
#[derive(Debug)]
pub struct Inputs {
    inner: smallvec::IntoIter<[Input; 8]>,
}

impl Iterator for Inputs {
    type Item = Input;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Inputs {}

/// Owning iterator over the texture handles plugged into a material.
#[derive(Debug)]
pub struct Textures {
    inner: smallvec::IntoIter<[TextureHandle; 8]>,
}

impl Iterator for Textures {
    type Item = TextureHandle;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Textures {}

/// Owning iterator over the material handles plugged into a material.
#[derive(Debug)]
pub struct Materials {
    inner: smallvec::IntoIter<[MaterialHandle; 4]>,
}

impl Iterator for Materials {
    type Item = MaterialHandle;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Materials {}
