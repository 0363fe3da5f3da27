pub mod draw_system;
pub mod headless;
pub mod scene_draw_system;
