//! Variant Taxonomy
//!
//! Two thin specializations over the base [`Material`]:
//!
//! - [`SingleBxdf`] tags one of twelve elementary scattering models and
//!   registers the parameter set that model needs;
//! - [`MultiBxdf`] tags one of three combinators whose children are plain
//!   material-typed inputs ("base", "top"), so the graph structure lives
//!   entirely in the base input map.
//!
//! Both are a kind tag plus a registration routine keyed by that tag, not
//! an inheritance chain; [`AnyMaterial`] is the closed enum stores and
//! traversal dispatch over.

use std::ops::{Deref, DerefMut};

use crate::input::InputTypes;
use crate::material::Material;

// Shared input descriptions, registered per bxdf tag below.
const ALBEDO: (&str, &str) = ("albedo", "Albedo color or texture");
const NORMAL: (&str, &str) = ("normal", "Normal map");
const ROUGHNESS: (&str, &str) = ("roughness", "Surface roughness");
const FRESNEL: (&str, &str) = ("fresnel", "Fresnel reflectance term");
const IOR: (&str, &str) = ("ior", "Index of refraction");

// SingleBxdf
// ----------------------------------------------------------------------------

/// Elementary scattering models.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BxdfType {
    Zero,
    Lambert,
    IdealReflect,
    IdealRefract,
    MicrofacetBlinn,
    MicrofacetBeckmann,
    MicrofacetGGX,
    Emissive,
    Passthrough,
    Translucent,
    MicrofacetRefractionGGX,
    MicrofacetRefractionBeckmann,
}

impl BxdfType {
    /// Registers the parameter set this scattering model expects.
    fn register_inputs(self, material: &mut Material) {
        let vec_or_tex = InputTypes::VECTOR4 | InputTypes::TEXTURE;
        match self {
            Self::Zero | Self::Passthrough => {}
            Self::Emissive => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
            }
            Self::Lambert | Self::Translucent => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
                material.register_input(NORMAL.0, NORMAL.1, InputTypes::TEXTURE);
            }
            Self::IdealReflect => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
                material.register_input(NORMAL.0, NORMAL.1, InputTypes::TEXTURE);
                material.register_input(FRESNEL.0, FRESNEL.1, InputTypes::VECTOR4);
            }
            Self::IdealRefract => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
                material.register_input(NORMAL.0, NORMAL.1, InputTypes::TEXTURE);
                material.register_input(IOR.0, IOR.1, InputTypes::VECTOR4);
            }
            Self::MicrofacetBlinn | Self::MicrofacetBeckmann | Self::MicrofacetGGX => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
                material.register_input(NORMAL.0, NORMAL.1, InputTypes::TEXTURE);
                material.register_input(ROUGHNESS.0, ROUGHNESS.1, vec_or_tex);
                material.register_input(FRESNEL.0, FRESNEL.1, InputTypes::VECTOR4);
            }
            Self::MicrofacetRefractionGGX | Self::MicrofacetRefractionBeckmann => {
                material.register_input(ALBEDO.0, ALBEDO.1, vec_or_tex);
                material.register_input(NORMAL.0, NORMAL.1, InputTypes::TEXTURE);
                material.register_input(ROUGHNESS.0, ROUGHNESS.1, vec_or_tex);
                material.register_input(IOR.0, IOR.1, InputTypes::VECTOR4);
            }
        }
    }
}

/// A material driven by one elementary scattering model.
#[derive(Debug)]
pub struct SingleBxdf {
    material: Material,
    bxdf: BxdfType,
}

impl SingleBxdf {
    /// Creates a material tagged with `bxdf` and registers the matching
    /// parameter set.
    #[must_use]
    pub fn new(bxdf: BxdfType) -> Self {
        let mut material = Material::new();
        bxdf.register_inputs(&mut material);
        Self { material, bxdf }
    }

    #[must_use]
    pub fn bxdf_type(&self) -> BxdfType {
        self.bxdf
    }

    /// Retags this instance with a different scattering model.
    ///
    /// Different models take different parameters, so the input set is
    /// wiped and re-registered; previously assigned values are discarded
    /// and the material is dirty afterwards.
    pub fn set_bxdf_type(&mut self, bxdf: BxdfType) {
        if bxdf == self.bxdf {
            return;
        }
        log::debug!(
            "material {}: retagging {:?} -> {:?}",
            self.material.uuid,
            self.bxdf,
            bxdf
        );
        self.material.clear_inputs();
        bxdf.register_inputs(&mut self.material);
        self.bxdf = bxdf;
    }
}

impl Deref for SingleBxdf {
    type Target = Material;

    fn deref(&self) -> &Self::Target {
        &self.material
    }
}

impl DerefMut for SingleBxdf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.material
    }
}

// MultiBxdf
// ----------------------------------------------------------------------------

/// Combinators blending or layering two child materials.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombineMode {
    Layered,
    FresnelBlend,
    Mix,
}

impl CombineMode {
    /// Registers the combinator's children and its blend control input.
    ///
    /// Children are ordinary material-typed inputs; the base class does not
    /// special-case them.
    fn register_inputs(self, material: &mut Material) {
        material.register_input("base", "Base material", InputTypes::MATERIAL);
        material.register_input("top", "Top material", InputTypes::MATERIAL);
        match self {
            Self::Mix => {
                material.register_input(
                    "weight",
                    "Blend weight",
                    InputTypes::VECTOR4 | InputTypes::TEXTURE,
                );
            }
            Self::FresnelBlend | Self::Layered => {
                material.register_input(IOR.0, IOR.1, InputTypes::VECTOR4);
            }
        }
    }
}

/// A material defined by combining two other materials.
#[derive(Debug)]
pub struct MultiBxdf {
    material: Material,
    mode: CombineMode,
}

impl MultiBxdf {
    #[must_use]
    pub fn new(mode: CombineMode) -> Self {
        let mut material = Material::new();
        mode.register_inputs(&mut material);
        Self { material, mode }
    }

    #[must_use]
    pub fn combine_mode(&self) -> CombineMode {
        self.mode
    }

    /// Retags this instance with a different combinator; same contract as
    /// [`SingleBxdf::set_bxdf_type`].
    pub fn set_combine_mode(&mut self, mode: CombineMode) {
        if mode == self.mode {
            return;
        }
        log::debug!(
            "material {}: retagging {:?} -> {:?}",
            self.material.uuid,
            self.mode,
            mode
        );
        self.material.clear_inputs();
        mode.register_inputs(&mut self.material);
        self.mode = mode;
    }
}

impl Deref for MultiBxdf {
    type Target = Material;

    fn deref(&self) -> &Self::Target {
        &self.material
    }
}

impl DerefMut for MultiBxdf {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.material
    }
}

// AnyMaterial
// ----------------------------------------------------------------------------

/// Closed enum over the material taxonomy, the element type of
/// [`MaterialStore`](crate::MaterialStore).
#[derive(Debug)]
pub enum AnyMaterial {
    Single(SingleBxdf),
    Multi(MultiBxdf),
}

impl AnyMaterial {
    #[must_use]
    pub fn as_single(&self) -> Option<&SingleBxdf> {
        match self {
            Self::Single(m) => Some(m),
            Self::Multi(_) => None,
        }
    }

    #[must_use]
    pub fn as_single_mut(&mut self) -> Option<&mut SingleBxdf> {
        match self {
            Self::Single(m) => Some(m),
            Self::Multi(_) => None,
        }
    }

    #[must_use]
    pub fn as_multi(&self) -> Option<&MultiBxdf> {
        match self {
            Self::Multi(m) => Some(m),
            Self::Single(_) => None,
        }
    }

    #[must_use]
    pub fn as_multi_mut(&mut self) -> Option<&mut MultiBxdf> {
        match self {
            Self::Multi(m) => Some(m),
            Self::Single(_) => None,
        }
    }
}

impl Deref for AnyMaterial {
    type Target = Material;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Single(m) => &m.material,
            Self::Multi(m) => &m.material,
        }
    }
}

impl DerefMut for AnyMaterial {
    fn deref_mut(&mut self) -> &mut Self::Target {
        match self {
            Self::Single(m) => &mut m.material,
            Self::Multi(m) => &mut m.material,
        }
    }
}

impl From<SingleBxdf> for AnyMaterial {
    fn from(material: SingleBxdf) -> Self {
        Self::Single(material)
    }
}

impl From<MultiBxdf> for AnyMaterial {
    fn from(material: MultiBxdf) -> Self {
        Self::Multi(material)
    }
}
