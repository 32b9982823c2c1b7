use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use robj::codec::task;
use robj::config::Config;
use robj::test_scenes::{self, RandomSceneParams};
use robj::{DecodeMode, DecodedScene, Scene, Section};

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to config toml file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Encode a TOML scene description into a .robj file
    Pack {
        /// Scene description (.toml)
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a .robj file and print what it contains
    Inspect {
        input: PathBuf,
        /// Fail on short or missing sections instead of tolerating them
        #[arg(long)]
        strict: bool,
        /// Print the decoded scene as a TOML description
        #[arg(long)]
        toml: bool,
    },
    /// Encode one of the built-in scenes
    Demo {
        #[arg(value_parser = clap::builder::PossibleValuesParser::new(test_scenes::SCENE_NAMES))]
        name: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Encode a seeded random scene
    Random {
        #[arg(long, default_value_t = 16)]
        spheres: usize,
        #[arg(long, default_value_t = 1)]
        planes: usize,
        #[arg(long, default_value_t = 2)]
        lights: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

async fn write_scene(scene: Scene, output: PathBuf) -> anyhow::Result<()> {
    info!(
        "Writing {} spheres, {} planes, {} lights to '{}'",
        scene.spheres.len(),
        scene.planes.len(),
        scene.lights.len(),
        output.display()
    );
    task::save_scene(&output, Arc::new(scene))
        .await
        .with_context(|| format!("Failed to write '{}'", output.display()))
}

fn print_section<T>(name: &str, section: &Section<T>) {
    let declared = match section.declared {
        Some(count) => count.to_string(),
        None => "missing".to_string(),
    };
    let short = if section.is_short() { " (short)" } else { "" };
    println!(
        "{name:<8} declared: {declared:>7}  decoded: {:>3}{short}",
        section.len()
    );
}

fn print_summary(decoded: &DecodedScene) {
    print_section("spheres", &decoded.spheres);
    print_section("planes", &decoded.planes);
    print_section("lights", &decoded.lights);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load command line arguments.
    let args = Args::try_parse()?;

    // Load config file if specified, otherwise use default.
    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .await
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => Default::default(),
    };

    // Initialize logger.
    tracing_subscriber::fmt()
        .with_env_filter(config.log_filter.as_str())
        .init();

    match &args.config {
        Some(path) => info!("Loaded config from '{}'", path.display()),
        None => info!("Using default config"),
    }

    match args.command {
        Command::Pack { input, output } => {
            let scene = Scene::from_toml_file(&input)
                .await
                .with_context(|| format!("Failed to load scene '{}'", input.display()))?;
            write_scene(scene, output.unwrap_or(config.output)).await?;
        }
        Command::Inspect {
            input,
            strict,
            toml,
        } => {
            let mode = if strict {
                DecodeMode::Strict
            } else {
                config.decode_mode
            };
            let decoded = task::load_scene(&input, mode)
                .await
                .with_context(|| format!("Failed to read '{}'", input.display()))?;

            if decoded.is_truncated() {
                warn!("'{}' is truncated", input.display());
            }
            if toml {
                print!("{}", decoded.into_scene().to_toml_string()?);
            } else {
                print_summary(&decoded);
            }
        }
        Command::Demo { name, output } => {
            let Some(scene) = test_scenes::by_name(&name) else {
                bail!("Unknown scene '{name}'");
            };
            write_scene(scene, output.unwrap_or(config.output)).await?;
        }
        Command::Random {
            spheres,
            planes,
            lights,
            seed,
            output,
        } => {
            let scene = test_scenes::random_scene(RandomSceneParams {
                spheres,
                planes,
                lights,
                seed,
            });
            write_scene(scene, output.unwrap_or(config.output)).await?;
        }
    }

    Ok(())
}
