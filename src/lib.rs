//! Scene loading and draw preparation for a small Phong renderer.
//!
//! OBJ/MTL geometry is turned into a 20-float interleaved vertex buffer per object node,
//! nodes are arranged in a parent-relative transform hierarchy described by a JSON scene
//! file, and [`system::scene_draw_system::SceneDrawSystem`] feeds the result to any
//! [`system::draw_system::GraphicsDevice`] / [`system::draw_system::Shader`] pair.

pub mod config;
pub mod error;
pub mod math;
pub mod object_3d_loader;
pub mod scene_pkg;
pub mod system;

pub use config::LoaderConfig;
pub use error::{SceneError, SceneResult, TextureError};
pub use scene_pkg::scene::{Scene, SceneStatistics};
