use std::path::PathBuf;

use anyhow::{anyhow, Context};
use clap::Parser;

use phong3d::{
    math::parse_hex_color,
    object_3d_loader::{resource::FsTextFetcher, texture_loader::ThreadedImageLoader},
    system::{
        draw_system::DrawOptions,
        headless::{HeadlessDevice, RecordingShader},
        scene_draw_system::SceneDrawSystem,
    },
    LoaderConfig, Scene,
};

/// Loads a scene description and dry-runs one frame against a recording device.
#[derive(Parser, Debug)]
#[command(name = "phong3d", version, about)]
struct Args {
    /// Scene JSON file.
    scene: PathBuf,

    /// Shade with averaged vertex normals instead of face normals.
    #[arg(long)]
    smooth: bool,

    /// Vertex color for OBJ files without per-vertex colors, as #rrggbb.
    #[arg(long, value_name = "#RRGGBB")]
    fallback_color: Option<String>,

    /// Skip diffuse and normal map loading.
    #[arg(long)]
    no_textures: bool,

    /// Viewport width over height used for the projection matrix.
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f32,
}

fn loader_config(args: &Args) -> anyhow::Result<LoaderConfig> {
    let mut config = LoaderConfig::default().with_textures(!args.no_textures);
    if let Some(color) = &args.fallback_color {
        let color = parse_hex_color(color)
            .ok_or_else(|| anyhow!("`{color}` is not a #rrggbb color"))?;
        config = config.with_fallback_color(color);
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = loader_config(&args)?;

    let mut scene = Scene::load(&args.scene, &FsTextFetcher, &ThreadedImageLoader, &config)
        .with_context(|| format!("failed to load scene {}", args.scene.display()))?;
    scene.wait_for_textures();
    scene.update();

    let system = SceneDrawSystem::new(DrawOptions {
        smooth_shading: args.smooth,
        aspect_ratio: args.aspect,
    });
    let mut device = HeadlessDevice::new();
    let mut shader = RecordingShader::new();
    let draws = system.draw(&mut scene, &mut device, &mut shader);

    let stats = scene.statistics();
    log::info!(
        "{} nodes, {} objects ({} textured), {} triangles, {} point lights, {} directional lights",
        stats.node_count,
        stats.object_count,
        stats.textured_objects,
        stats.triangle_count,
        stats.point_lights,
        stats.directional_lights
    );
    log::info!(
        "dry run: {draws} draw calls, {} vertex buffers, {} textures, {} shader calls",
        device.buffers.len(),
        device.textures.len(),
        shader.calls.len()
    );
    Ok(())
}
