//! voxel-diorama
//!
//! An isometric voxel diorama engine for native and WASM targets. A
//! procedural generator emits a room as a flat sequence of coloured voxels;
//! the engine draws every voxel as one instance of a shared cube, animates
//! tagged groups of voxels each frame and reports clicks on them by group id.
//!
//! High-level modules
//! - `generator`: procedural room generation and the shape primitives it uses
//! - `data_structures`: voxels, group ids, the group index, instances and the cube mesh
//! - `animation`: the per-frame animation step (bobbing, walking character, fire)
//! - `input`: routing of window events into key state and camera/pick actions
//! - `camera`: orthographic isometric camera, orbit controls and pick rays
//! - `pick`: ray casting against voxel instances
//! - `scene`: GPU-agnostic scene state behind an instance buffer seam
//! - `context`: window, surface, device and shared GPU resources
//! - `pipelines`: the instanced voxel pipeline, the shadow pass and light uniforms
//! - `engine`: the render surface with its load / frame / resize / cleanup phases
//! - `flow`: the winit event loop and the `run` entry point
//! - `content`: data shape of the content attached to clickable objects
//! - `config`: tunable engine constants
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod content;
pub mod context;
pub mod data_structures;
pub mod engine;
pub mod flow;
pub mod generator;
pub mod input;
pub mod pick;
pub mod pipelines;
pub mod scene;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath;
pub use config::EngineConfig;
pub use data_structures::voxel::{GroupId, Voxel};
pub use engine::Engine;
pub use flow::{run, run_with};
pub use generator::generate_room;
pub use winit::event::WindowEvent;
