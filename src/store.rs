//! Handles and Stores
//!
//! Materials reference each other and textures through strongly-typed
//! slotmap handles into caller-owned stores. A handle is a versioned key,
//! not an owner: removing an asset never cascades into the graph that
//! referenced it, and resolving a stale handle yields `None`.
//!
//! Mutation goes through `&mut self`. The model assumes one logical owner
//! mutating materials while a separately synchronized compilation pass
//! reads, so the stores carry no interior locking.

use slotmap::{SlotMap, new_key_type};

use crate::bxdf::AnyMaterial;

// Strongly-typed handles
new_key_type! {
    pub struct MaterialHandle;
    pub struct TextureHandle;
}

/// Owning registry for materials; everything else holds [`MaterialHandle`]s.
#[derive(Debug, Default)]
pub struct MaterialStore {
    slots: SlotMap<MaterialHandle, AnyMaterial>,
}

impl MaterialStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SlotMap::default(),
        }
    }

    /// Adds a material and returns its handle.
    pub fn add(&mut self, material: impl Into<AnyMaterial>) -> MaterialHandle {
        self.slots.insert(material.into())
    }

    #[must_use]
    pub fn get(&self, handle: MaterialHandle) -> Option<&AnyMaterial> {
        self.slots.get(handle)
    }

    #[must_use]
    pub fn get_mut(&mut self, handle: MaterialHandle) -> Option<&mut AnyMaterial> {
        self.slots.get_mut(handle)
    }

    /// Removes a material, invalidating its handle.
    ///
    /// Inputs elsewhere that still reference the handle keep it; they
    /// simply resolve to `None` from now on.
    pub fn remove(&mut self, handle: MaterialHandle) -> Option<AnyMaterial> {
        self.slots.remove(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: MaterialHandle) -> bool {
        self.slots.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (MaterialHandle, &AnyMaterial)> {
        self.slots.iter()
    }
}

/// Owning registry for texture assets.
///
/// The asset type is opaque to this crate: textures are referenced, never
/// inspected, loaded or mutated here.
#[derive(Debug)]
pub struct TextureStore<T> {
    slots: SlotMap<TextureHandle, T>,
}

impl<T> TextureStore<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: SlotMap::default(),
        }
    }

    /// Adds a texture asset and returns its handle.
    pub fn add(&mut self, texture: T) -> TextureHandle {
        self.slots.insert(texture)
    }

    #[must_use]
    pub fn get(&self, handle: TextureHandle) -> Option<&T> {
        self.slots.get(handle)
    }

    #[must_use]
    pub fn get_mut(&mut self, handle: TextureHandle) -> Option<&mut T> {
        self.slots.get_mut(handle)
    }

    pub fn remove(&mut self, handle: TextureHandle) -> Option<T> {
        self.slots.remove(handle)
    }

    #[must_use]
    pub fn contains(&self, handle: TextureHandle) -> bool {
        self.slots.contains_key(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl<T> Default for TextureStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
