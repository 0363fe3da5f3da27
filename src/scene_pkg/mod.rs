pub mod camera;
pub mod directional_light;
pub mod material;
pub mod mesh;
pub mod node;
pub mod object3d;
pub mod point_light;
pub mod scene;
pub mod scene_graph;
pub mod scene_loader;
pub mod transform;
