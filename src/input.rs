use std::borrow::Cow;

use bitflags::bitflags;
use glam::Vec4;

use crate::store::{MaterialHandle, TextureHandle};

bitflags! {
    /// Set of value kinds an input accepts.
    ///
    /// A single-bit set doubles as the kind tag of a concrete value; the
    /// type-set an input is registered with is any non-empty union.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct InputTypes: u32 {
        const VECTOR4  = 1 << 0;
        const TEXTURE  = 1 << 1;
        const MATERIAL = 1 << 2;
    }
}

/// A value currently assigned to a material input.
///
/// References are non-owning: a material storing a texture or another
/// material holds a versioned handle, never the asset itself. Resolving a
/// handle whose target was removed simply yields nothing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputValue {
    Vector4(Vec4),
    Texture(TextureHandle),
    Material(MaterialHandle),
}

impl InputValue {
    /// The single-bit kind tag of this value.
    #[must_use]
    pub fn kind(&self) -> InputTypes {
        match self {
            Self::Vector4(_) => InputTypes::VECTOR4,
            Self::Texture(_) => InputTypes::TEXTURE,
            Self::Material(_) => InputTypes::MATERIAL,
        }
    }

    #[must_use]
    pub fn as_vector4(&self) -> Option<Vec4> {
        match self {
            Self::Vector4(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_texture(&self) -> Option<TextureHandle> {
        match self {
            Self::Texture(handle) => Some(*handle),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_material(&self) -> Option<MaterialHandle> {
        match self {
            Self::Material(handle) => Some(*handle),
            _ => None,
        }
    }
}

impl From<Vec4> for InputValue {
    fn from(value: Vec4) -> Self {
        Self::Vector4(value)
    }
}

impl From<TextureHandle> for InputValue {
    fn from(handle: TextureHandle) -> Self {
        Self::Texture(handle)
    }
}

impl From<MaterialHandle> for InputValue {
    fn from(handle: MaterialHandle) -> Self {
        Self::Material(handle)
    }
}

/// Immutable description of one registered input.
#[derive(Clone, Debug)]
pub struct InputInfo {
    /// Short name, unique within one material instance.
    pub name: Cow<'static, str>,
    /// Human-readable description.
    pub description: Cow<'static, str>,
    /// Set of value kinds this input accepts. Never empty.
    pub supported: InputTypes,
}

/// Full state of one input slot: its description plus the current value.
///
/// `None` is the distinguished "never assigned" state; reading it through
/// [`Material::input_value`](crate::Material::input_value) is an error, not
/// a default.
#[derive(Clone, Debug)]
pub struct Input {
    pub info: InputInfo,
    pub value: Option<InputValue>,
}
