//! 3D dungeon generator
//!
//! Builds a configuration from a JSON file and command-line flags, generates
//! a dungeon and prints it as ASCII levels, stats or JSON.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{ArgAction, Parser, ValueEnum};
use log::{LevelFilter, info};
use simplelog::SimpleLogger;

use d3_core::{
    CellType3D, Dungeon, DungeonStats, GeneratorConfig, Vector3Int, generate_dungeon, render_levels,
};

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    /// Top-down map of every level plus a summary
    Ascii,
    /// Generation statistics as JSON
    Stats,
    /// The whole dungeon as JSON
    Json,
}

/// 3D dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeon3d")]
#[command(author, version, about = "Generate a 3D dungeon of rooms, hallways and stairs", long_about = None)]
struct Args {
    /// JSON config file; flags override its values
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Grid size as X,Y,Z
    #[arg(long = "size", value_parser = parse_vector)]
    size: Option<Vector3Int>,

    /// Number of rooms to place
    #[arg(short = 'r', long = "rooms")]
    rooms: Option<usize>,

    /// Smallest room size as X,Y,Z
    #[arg(long = "min-room", value_parser = parse_vector)]
    min_room: Option<Vector3Int>,

    /// Largest room size as X,Y,Z
    #[arg(long = "max-room", value_parser = parse_vector)]
    max_room: Option<Vector3Int>,

    /// Seed string (random if omitted)
    #[arg(short = 's', long = "seed")]
    seed: Option<String>,

    /// Chance of keeping each extra connection (0 to 1)
    #[arg(long = "extra-chance")]
    extra_chance: Option<f64>,

    /// Output format
    #[arg(short = 'f', long = "format", value_enum, default_value_t = Format::Ascii)]
    format: Format,

    /// Check the dungeon's invariants and fail if any is violated
    #[arg(long = "validate")]
    validate: bool,

    /// More logging (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

/// Parse `X,Y,Z` into a vector
fn parse_vector(s: &str) -> Result<Vector3Int, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected X,Y,Z, got '{s}'"));
    };
    let axis = |v: &str| v.parse::<i32>().map_err(|e| format!("bad component '{v}': {e}"));
    Ok(Vector3Int::new(axis(*x)?, axis(*y)?, axis(*z)?))
}

fn log_level(verbose: u8) -> LevelFilter {
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn load_config(path: &Path) -> Result<GeneratorConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config: GeneratorConfig = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// File config (or defaults) with flag overrides applied
fn build_config(args: &Args) -> Result<GeneratorConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(rooms) = args.rooms {
        config.room_count = rooms;
    }
    if let Some(min) = args.min_room {
        config.room_min_size = min;
    }
    if let Some(max) = args.max_room {
        config.room_max_size = max;
    }
    if let Some(seed) = &args.seed {
        config.seed = Some(seed.clone());
    }
    if let Some(chance) = args.extra_chance {
        config.extra_connection_chance = chance;
    }
    Ok(config)
}

fn summary(stats: &DungeonStats) -> String {
    let mut lines = vec![
        format!("Seed: {}", stats.seed),
        format!("Size: {}", stats.size),
        format!("Rooms: {}/{}", stats.rooms_placed, stats.requested_rooms),
        format!(
            "Hallways: {} routed, {} failed, {} staircases",
            stats.hallways_routed, stats.hallways_failed, stats.stair_cases
        ),
    ];
    for (cell, count) in &stats.cell_counts {
        if *cell != CellType3D::None {
            lines.push(format!("  {} '{}': {count}", cell, cell.symbol()));
        }
    }
    lines.join("\n")
}

fn print_dungeon(dungeon: &Dungeon, format: Format) -> Result<()> {
    match format {
        Format::Ascii => {
            print!("{}", render_levels(&dungeon.grid));
            println!("{}", summary(&dungeon.stats));
        }
        Format::Stats => println!("{}", serde_json::to_string_pretty(&dungeon.stats)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(dungeon)?),
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    SimpleLogger::init(log_level(args.verbose), simplelog::Config::default())
        .context("failed to initialize logging")?;

    let config = build_config(&args)?;
    let dungeon = generate_dungeon(config).context("invalid dungeon configuration")?;

    print_dungeon(&dungeon, args.format)?;

    if args.validate {
        if let Err(e) = dungeon.validate() {
            bail!("validation failed: {e}");
        }
        eprintln!("Dungeon is valid");
    }

    Ok(())
}
