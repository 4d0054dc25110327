//! Splits indexed triangle meshes into bounded, spatially coherent
//! clusters (meshlets) for GPU mesh shading pipelines, computes per-cluster
//! culling bounds (sphere + normal cone), and deduplicates vertex streams
//! through canonical-index remap tables.
//!
//! All entry points are pure functions over caller-owned buffers and
//! validate their parameters before touching any data.

mod clusterize;
mod error;
mod remap;
mod utilities;
mod validate;

pub use crate::clusterize::*;
pub use crate::error::*;
pub use crate::remap::*;
pub use crate::utilities::*;
