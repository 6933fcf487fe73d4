#![deny(unsafe_code)]
//! CLI binary for the aurawall wallpaper generator.
//!
//! Subcommands:
//! - `list` — print available engines
//! - `generate <engine>` — randomize a composition, print config JSON
//! - `variations <engine>` — apply every variation to a config
//! - `encode` — compress a config into a share fragment
//! - `decode <token>` — expand a share fragment back into config JSON
//! - `blob <seed>` — print deterministic blob geometry as SVG path data

mod error;

use aurawall_core::{blob, ConfigError, RandomSource, WallpaperConfig, Xorshift64};
use aurawall_engines::{GenerationEngine, RandomizeOptions};
use clap::{Parser, Subcommand};
use error::CliError;
use std::io::Read;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "aurawall", about = "Procedural layered wallpaper generator")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available engines.
    List,
    /// Randomize a fresh composition with an engine.
    Generate {
        /// Engine name (e.g. "boreal").
        engine: String,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 1920)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 1080)]
        height: u32,

        /// PRNG seed for deterministic output; random when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Keep the stock grain settings instead of rolling new ones.
        #[arg(long)]
        grain_locked: bool,

        /// Print a share fragment instead of config JSON.
        #[arg(long)]
        url: bool,
    },
    /// Apply every variation of an engine to a config.
    Variations {
        /// Engine name (e.g. "boreal").
        engine: String,

        /// Config JSON file; "-" or omitted reads stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// PRNG seed for deterministic output; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Compress a config into a share fragment.
    Encode {
        /// Config JSON file; "-" or omitted reads stdin.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Expand a share fragment or bare token back into config JSON.
    Decode {
        /// Fragment ("#c=...", "c=...", "#cfg=...") or bare compact token.
        token: String,
    },
    /// Print deterministic blob geometry as SVG path data.
    Blob {
        /// Geometry seed string (usually a shape id).
        seed: String,

        /// Bounding box width.
        #[arg(short = 'W', long, default_value_t = 100.0)]
        width: f64,

        /// Bounding box height.
        #[arg(short = 'H', long, default_value_t = 100.0)]
        height: f64,

        /// Vertex count (minimum 3).
        #[arg(short, long, default_value_t = 8)]
        complexity: u32,

        /// Radius variance in [0, 1].
        #[arg(long, default_value_t = 0.3)]
        contrast: f64,
    },
}

fn read_input(path: Option<&PathBuf>) -> Result<String, CliError> {
    match path {
        Some(p) if p.as_os_str() != "-" => std::fs::read_to_string(p)
            .map_err(|e| CliError::Io(format!("{}: {e}", p.display()))),
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn lookup_engine(name: &str) -> Result<&'static dyn GenerationEngine, CliError> {
    aurawall_engines::by_name(name)
        .ok_or_else(|| CliError::Engine(ConfigError::UnknownEngine(name.to_owned())))
}

fn seeded_rng(seed: Option<u64>) -> Xorshift64 {
    match seed {
        Some(s) => Xorshift64::new(s),
        None => Xorshift64::from_entropy(),
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => {
            if cli.json {
                let info: Vec<_> = aurawall_engines::all()
                    .map(|e| {
                        serde_json::json!({
                            "id": e.id().name(),
                            "name": e.meta().name,
                            "tagline": e.meta().tagline,
                            "variations": e.variations().iter().map(|v| v.name).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                println!("Engines:");
                for e in aurawall_engines::all() {
                    println!("  {:<12} {}", e.id().name(), e.meta().tagline);
                }
            }
        }
        Command::Generate {
            engine,
            width,
            height,
            seed,
            grain_locked,
            url,
        } => {
            let engine = lookup_engine(&engine)?;
            let mut base = WallpaperConfig::default();
            base.width = width;
            base.height = height;
            base.validate()?;

            let mut rng = seeded_rng(seed);
            let config = engine.randomize(&base, RandomizeOptions { grain_locked }, &mut rng);

            if url {
                println!("{}", aurawall_codec::encode_fragment(&config));
            } else {
                println!("{}", serde_json::to_string_pretty(&config)?);
            }
            if !cli.json {
                eprintln!(
                    "generated {} ({width}x{height}, {} shapes)",
                    engine.id().name(),
                    config.shapes.len()
                );
            }
        }
        Command::Variations {
            engine,
            input,
            seed,
        } => {
            let engine = lookup_engine(&engine)?;
            let json = read_input(input.as_ref())?;
            let config: WallpaperConfig = serde_json::from_str(&json)
                .map_err(|e| CliError::Input(format!("invalid config JSON: {e}")))?;
            config.validate()?;

            let mut rng = seeded_rng(seed);
            let out: Vec<_> = engine
                .variations()
                .iter()
                .map(|v| {
                    serde_json::json!({
                        "name": v.name,
                        "config": (v.apply)(&config, &mut rng as &mut dyn RandomSource),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
            if !cli.json {
                eprintln!("applied {} variations of {}", out.len(), engine.id().name());
            }
        }
        Command::Encode { input } => {
            let json = read_input(input.as_ref())?;
            let config: WallpaperConfig = serde_json::from_str(&json)
                .map_err(|e| CliError::Input(format!("invalid config JSON: {e}")))?;
            config.validate()?;
            println!("{}", aurawall_codec::encode_fragment(&config));
        }
        Command::Decode { token } => {
            let config = if token.contains('=') {
                aurawall_codec::decode_fragment(&token)
            } else {
                aurawall_codec::decode(&token)
            }
            .ok_or_else(|| CliError::Input("unrecognized or corrupt share token".into()))?;
            println!("{}", serde_json::to_string_pretty(&config)?);
        }
        Command::Blob {
            seed,
            width,
            height,
            complexity,
            contrast,
        } => {
            let curve = blob::build(width, height, &seed, complexity, contrast);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&curve)?);
            } else {
                println!("{}", curve.to_svg_path());
            }
        }
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
