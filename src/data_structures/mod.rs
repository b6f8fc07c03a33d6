//! Engine data structures: voxels, groups, instances and the cube mesh.
//!
//! - `voxel` holds the immutable voxel record and the `GroupId` tagged union
//! - `group` derives the group index (members, baselines, phases) from a voxel sequence
//! - `instance` holds per-voxel transformation and colour data
//! - `model` contains the shared cube mesh and the instanced draw call

pub mod group;
pub mod instance;
pub mod model;
pub mod voxel;
