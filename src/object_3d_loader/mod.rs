//! OBJ/MTL loading and the geometry pipeline that turns a parsed mesh into an interleaved
//! vertex buffer, plus the text and image collaborators the loaders call into.

pub mod mesh_converters;
pub mod mtl_parser;
pub mod normal_averager;
pub mod obj_parser;
pub mod resource;
pub mod tangent_space;
pub mod texture_loader;
pub mod vertex_buffer;
