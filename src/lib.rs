//! Runtime material parameter graph for a rendering engine.
//!
//! Materials are named, typed bags of shading parameters. Each input slot
//! accepts a declared set of value kinds (color vector, texture reference,
//! material reference); material-typed inputs make materials into nodes of
//! a dependency graph that a downstream shader compiler traverses. The
//! crate manages parameters and structure only; evaluating or sampling the
//! scattering models is the renderer's job.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod bxdf;
pub mod errors;
pub mod graph;
pub mod input;
pub mod material;
pub mod store;

pub use bxdf::{AnyMaterial, BxdfType, CombineMode, MultiBxdf, SingleBxdf};
pub use errors::{MaterialError, Result};
pub use input::{Input, InputInfo, InputTypes, InputValue};
pub use material::{Inputs, Material, Materials, Textures};
pub use store::{MaterialHandle, MaterialStore, TextureHandle, TextureStore};
