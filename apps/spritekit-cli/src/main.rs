use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::{IVec2, Vec2};
use spritekit_common::Rgb;
use spritekit_render::{DamageAccumulator, DisplayListSurface, ImageResource, PixelBuffer};
use spritekit_sprites::{LabelAttributes, Margins, SpriteDefaults, SpriteRegistry, VerticalAlign};
use tracing_subscriber::EnvFilter;

type Registry = SpriteRegistry<DisplayListSurface, DamageAccumulator>;

#[derive(Parser)]
#[command(name = "spritekit-cli", about = "CLI tool for spritekit scenes")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML file overriding sprite defaults (layer, font, label settings)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and crate info
    Info,
    /// Build the demo scene, mutate it, and dump both frames
    Demo {
        /// Text for the card label
        #[arg(short, long, default_value = "/home/user/projects/spritekit/README.md")]
        label: String,
        /// Head-truncate long labels instead of shrinking the font
        #[arg(short, long)]
        truncate: bool,
        /// Print display lists as JSON
        #[arg(long)]
        json: bool,
    },
    /// Report the top-most demo sprite under a point
    Hit {
        #[arg(short)]
        x: i32,
        #[arg(short)]
        y: i32,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let defaults = match &cli.config {
        Some(path) => load_defaults(path)?,
        None => SpriteDefaults::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("spritekit-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", spritekit_common::crate_info());
            println!("render: {}", spritekit_render::crate_info());
            println!("sprites: {}", spritekit_sprites::crate_info());
            println!(
                "defaults: layer={} font={} label={}pt",
                defaults.layer, defaults.font.family, defaults.label.scale
            );
        }
        Commands::Demo {
            label,
            truncate,
            json,
        } => {
            let mut reg = build_scene(defaults, &label, truncate)?;

            let stats = reg.redraw(None, Some(DisplayListSurface::new()));
            tracing::info!(drawn = stats.drawn, "full frame");
            let full = reg.surface_mut().map(|s| s.take_ops()).unwrap_or_default();

            // Damage frame: move the card and relabel the badge.
            let card = reg.get(1).map(|s| s.id()).context("demo card missing")?;
            let badge = reg.get(2).map(|s| s.id()).context("demo badge missing")?;
            reg.host_mut().take();
            reg.move_relative(card, Vec2::new(30.0, 20.0))?;
            reg.set_label(badge, "8", 0)?;
            let damage = reg.host_mut().take();
            let stats = reg.redraw(damage, None);
            tracing::info!(
                drawn = stats.drawn,
                culled = stats.culled,
                "damage frame"
            );
            let partial = reg.surface_mut().map(|s| s.take_ops()).unwrap_or_default();

            if json {
                let out = serde_json::json!({ "full": full, "damage": damage, "partial": partial });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("Full frame: {} ops", full.len());
                for op in &full {
                    println!("  {op:?}");
                }
                match damage {
                    Some(rect) => println!("Damage: {rect}"),
                    None => println!("Damage: none"),
                }
                println!(
                    "Damage frame: drawn={} culled={} ops={}",
                    stats.drawn,
                    stats.culled,
                    partial.len()
                );
                for op in &partial {
                    println!("  {op:?}");
                }
            }
        }
        Commands::Hit { x, y } => {
            let reg = build_scene(defaults, "card", false)?;
            match reg.find_topmost_at(IVec2::new(x, y)) {
                Some(sprite) => println!(
                    "({x}, {y}) -> sprite {} layer={} rect={} label={:?}",
                    sprite.id(),
                    sprite.layer(),
                    sprite.rect(),
                    sprite.label(0).unwrap_or("")
                ),
                None => println!("({x}, {y}) -> nothing"),
            }
        }
    }

    Ok(())
}

fn load_defaults(path: &Path) -> anyhow::Result<SpriteDefaults> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let defaults: SpriteDefaults = serde_yaml::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(?defaults, "loaded sprite defaults");
    Ok(defaults)
}

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> Rc<dyn ImageResource> {
    Rc::new(PixelBuffer::solid(w, h, rgba))
}

/// Background, a labelled card and a badge, stacked in that order.
fn build_scene(defaults: SpriteDefaults, label: &str, truncate: bool) -> anyhow::Result<Registry> {
    let mut reg = SpriteRegistry::with_defaults(DamageAccumulator::new(), defaults);

    let background = reg.create(Vec2::ZERO, solid(320, 240, [32, 32, 48, 255]));
    reg.set_layer(background, Some(0))?;

    let card = reg.create(Vec2::new(40.0, 40.0), solid(120, 60, [240, 240, 240, 255]));
    let base = reg.defaults().label.clone();
    if let Some(sprite) = reg.sprite_mut(card) {
        sprite.set_margins(Margins::new(6, 4, 6, 4));
        sprite.set_label_attributes(
            LabelAttributes {
                rescale: !truncate,
                ..base.clone()
            },
            0,
        );
        sprite.set_label_attributes(
            LabelAttributes {
                scale: 9.0,
                vertical: VerticalAlign::Bottom,
                ..base
            },
            1,
        );
        sprite.set_label_color(Rgb::new(0x80, 0x80, 0x80), 1);
    }
    reg.set_label(card, label, 0)?;
    reg.set_label(card, "card", 1)?;
    reg.set_layer(card, Some(100))?;

    let badge = reg.create(Vec2::new(140.0, 30.0), solid(24, 24, [200, 40, 40, 255]));
    if let Some(sprite) = reg.sprite_mut(badge) {
        sprite.set_label_color(Rgb::new(255, 255, 255), 0);
    }
    reg.set_label(badge, "7", 0)?;
    reg.set_layer(badge, Some(200))?;

    reg.host_mut().take();
    Ok(reg)
}
