//! Render pipelines and their uniform resources.
//!
//! - `voxel` builds the instanced cube pipeline and ships `voxel.wgsl`
//! - `shadow` holds the sun's shadow map and the depth-only pass filling it
//! - `light` holds the light uniform layout and its bind groups

pub mod light;
pub mod shadow;
pub mod voxel;
