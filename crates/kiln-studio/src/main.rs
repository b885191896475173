//! Headless frame driver for the kiln draw pipeline.
//!
//! Runs a few frames of a synthetic scene (parallel world producers plus a GUI
//! pass), batches each frame and logs what a backend would submit.
//!
//! Usage: `kiln-studio [--frames N] [--producers N] [--sprites N] [--size WxH]`

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use kiln_engine::coords::Vec2;
use kiln_engine::logging::{init_logging, LoggingConfig};
use kiln_engine::paint::Color;
use kiln_engine::render::{BatchState, RenderList, StaticTextures};
use kiln_engine::scene::{DrawList, MeshVertex, UvRect, ZIndex};

/// Headless frame driver for the kiln draw pipeline.
#[derive(Debug, Clone, Parser)]
#[command(name = "kiln-studio", version)]
struct StudioConfig {
    /// Frames to produce and batch.
    #[arg(long, default_value_t = 3)]
    frames: u32,
    /// Parallel world producer threads.
    #[arg(long, default_value_t = 4)]
    producers: u32,
    /// Sprites requested by each producer per frame.
    #[arg(long = "sprites", default_value_t = 500)]
    sprites_per_producer: u32,
    /// Viewport size in pixels, as WxH.
    #[arg(long = "size", value_parser = parse_size, default_value = "1280x720")]
    viewport: (u32, u32),
}

fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s.split_once('x').context("expected WxH")?;
    Ok((w.parse().context("width")?, h.parse().context("height")?))
}

const ATLASES: [&str; 3] = ["terrain", "units", "fx"];

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let config = StudioConfig::parse();
    log::info!("kiln studio: {config:?}");

    let mut textures = StaticTextures::new();
    for id in ATLASES {
        textures.insert(id, 1024, 1024);
    }

    let mut draw = DrawList::new();
    let mut render = RenderList::new();

    for frame in 0..config.frames {
        let started = Instant::now();

        std::thread::scope(|s| {
            for p in 0..config.producers {
                let draw = &draw;
                let config = &config;
                s.spawn(move || world_pass(draw, config, frame, p));
            }
            let draw = &draw;
            s.spawn(move || gui_pass(draw, frame));
        });

        render.set_size(config.viewport.0, config.viewport.1);
        render.fill_with(&draw, &textures);

        let stats = render.stats();
        log::info!(
            "frame {frame}: {} objects -> {} batches, {} vertices ({} dropped) in {:?}",
            stats.objects,
            stats.batches,
            stats.vertices,
            stats.dropped,
            started.elapsed()
        );
        for (i, batch) in render.batches().iter().enumerate() {
            let state = match batch.state() {
                BatchState::Texture { texture_id } => format!("texture {texture_id}"),
                BatchState::Rect { color, filled } => {
                    format!("rect {:?} {}", color.to_array(), if *filled { "filled" } else { "outline" })
                }
                BatchState::Polyline => "polyline".to_owned(),
                BatchState::Mesh { texture_id } => format!("mesh {texture_id:?}"),
            };
            log::debug!(
                "  batch {i}: {state}, {} objects, {} bytes, scissor {:?}",
                batch.object_count(),
                batch.vertex_bytes().len(),
                batch.scissor()
            );
        }

        render.clear();
        draw.clear();
    }

    log::info!("pool capacity after {} frames: {}", config.frames, draw.capacity());
    Ok(())
}

/// One world producer: a strip of sprites on its own depth layer.
fn world_pass(draw: &DrawList, config: &StudioConfig, frame: u32, producer: u32) {
    let w = config.viewport.0.max(1);
    let atlas = ATLASES[producer as usize % ATLASES.len()];
    let spin = frame as f32 * 0.1;

    for i in 0..config.sprites_per_producer {
        let h = draw.request_object();
        let cell = (i % 16) as f32;
        draw.set_texture(h, atlas, UvRect::from_pixels(cell * 64.0, 0.0, 64.0, 64.0, 1024.0, 1024.0));
        draw.set_bounds(h, (i * 24 % w) as f32, (producer * 40 + i * 24 / w * 24) as f32, 24.0, 24.0);
        draw.set_rotation(h, spin + i as f32 * 0.01);
        draw.set_z_index(h, u64::from(producer));
    }

    let h = draw.request_object();
    let ring: Vec<Vec2> = (0..=12)
        .map(|k| {
            let a = k as f32 / 12.0 * std::f32::consts::TAU;
            Vec2::new(a.cos() * 30.0, a.sin() * 30.0)
        })
        .collect();
    draw.set_polyline(h, &ring, Color::TRANSPARENT, Color::from_rgba8(255, 200, 0, 255), 2.0);
    draw.set_bounds(h, 100.0 + producer as f32 * 80.0, 600.0, 0.0, 0.0);
    draw.set_z_index(h, u64::from(producer) + 1);
}

/// The GUI pass: a panel with nested, clipped widgets above the world.
fn gui_pass(draw: &DrawList, frame: u32) {
    let panel = draw.request_object();
    draw.set_rect_color(panel, Color::from_rgba8(24, 26, 32, 235), true);
    draw.set_bounds(panel, 20.0, 20.0, 320.0, 200.0);
    draw.set_z_index(panel, ZIndex::gui(frame + 1, 0));

    for row in 0..6u32 {
        let button = draw.request_object();
        draw.set_rect_color(button, Color::from_rgba8(90, 140, 255, 255), row % 2 == 0);
        draw.set_bounds(button, 32.0, 32.0 + row as f32 * 30.0, 296.0, 24.0);
        draw.set_scissor(button, 20.0, 20.0, 320.0, 200.0);
        draw.set_z_index(button, ZIndex::gui(frame + 1, 1));
    }

    let icon = draw.request_object();
    let quad = [
        MeshVertex::new(Vec2::new(0.0, 0.0), [0.0, 0.0], Color::WHITE),
        MeshVertex::new(Vec2::new(16.0, 0.0), [1.0, 0.0], Color::WHITE),
        MeshVertex::new(Vec2::new(16.0, 16.0), [1.0, 1.0], Color::WHITE),
        MeshVertex::new(Vec2::new(0.0, 16.0), [0.0, 1.0], Color::WHITE),
    ];
    draw.set_mesh(icon, &quad, &[0, 1, 2, 0, 2, 3], Some("fx"));
    draw.set_bounds(icon, 300.0, 28.0, 0.0, 0.0);
    draw.set_z_index(icon, ZIndex::gui(frame + 1, 2));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<StudioConfig, clap::Error> {
        StudioConfig::try_parse_from(std::iter::once("kiln-studio").chain(args.iter().copied()))
    }

    #[test]
    fn defaults_without_flags() {
        let c = parse(&[]).unwrap();
        assert_eq!(c.frames, 3);
        assert_eq!(c.producers, 4);
        assert_eq!(c.sprites_per_producer, 500);
        assert_eq!(c.viewport, (1280, 720));
    }

    #[test]
    fn parses_flags() {
        let c = parse(&["--frames", "7", "--size", "640x480", "--sprites", "12"]).unwrap();
        assert_eq!(c.frames, 7);
        assert_eq!(c.viewport, (640, 480));
        assert_eq!(c.sprites_per_producer, 12);
        assert_eq!(c.producers, 4);
    }

    #[test]
    fn rejects_unknown_flag() {
        assert!(parse(&["--bogus", "1"]).is_err());
        assert!(parse(&["--frames"]).is_err());
    }

    #[test]
    fn rejects_malformed_size() {
        assert!(parse(&["--size", "640"]).is_err());
        assert!(parse(&["--size", "640xtall"]).is_err());
        assert!(parse_size("800x600").is_ok());
    }
}
