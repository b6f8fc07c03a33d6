//! Procedural voxel room generation.
//!
//! [`generate_room`] is the entry point used by the engine: a stateless call
//! that returns the full, ordered voxel sequence of the room. Randomness comes
//! from the thread-local generator, so repeated calls differ in the textured
//! and noisy regions. Tests and hosts that need reproducible rooms call
//! [`generate_room_with`] and bring their own seeded source.

pub mod palette;
pub mod room;
pub mod shapes;

use rand::Rng;

use crate::data_structures::voxel::Voxel;

pub use room::{BED_ID, CHARACTER_SPAWN, DESK_ID, EASEL_ID, ROOM_HEIGHT, ROOM_SIZE};
pub use shapes::{SaggingString, VoxelBuilder};

pub fn generate_room() -> Vec<Voxel> {
    generate_room_with(&mut rand::thread_rng())
}

pub fn generate_room_with<R: Rng + ?Sized>(rng: &mut R) -> Vec<Voxel> {
    let mut builder = VoxelBuilder::new();
    room::build_room(&mut builder, rng);
    let voxels = builder.finish();
    log::debug!("Generated room with {} voxels", voxels.len());
    voxels
}
