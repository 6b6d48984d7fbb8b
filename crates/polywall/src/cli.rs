use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lattice::DiagonalRule;
use palettes::PaletteKind;

#[derive(Parser, Debug)]
#[command(
    name = "polywall",
    author,
    version,
    about = "Low-poly gradient wallpaper generator"
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Width and height in pixels, written `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

#[derive(Parser, Debug, Default)]
pub struct RunArgs {
    /// Screen resolution, written as 1920x1080.
    #[arg(short, long, value_name = "WIDTHxHEIGHT")]
    #[arg(value_parser = parse_dimensions)]
    pub resolution: Option<Dimensions>,

    /// Where the endpoint colors come from: `wal`, `terminalsexy`, or `pastel`.
    #[arg(short, long, value_name = "SOURCE")]
    #[arg(value_parser = parse_palette_kind)]
    pub palette: Option<PaletteKind>,

    /// Pastel set to sample when `--palette pastel` (see `polywall palettes`).
    #[arg(long, value_name = "NAME")]
    pub pastel: Option<String>,

    /// Color scheme file for `wal` (defaults to the pywal cache) or `terminalsexy`.
    #[arg(long, value_name = "FILE")]
    pub palette_file: Option<PathBuf>,

    /// Output PNG path.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file if it exists.
    #[arg(short, long)]
    pub force: bool,

    /// Mutation intensity: largest per-axis shift of an interior vertex, in pixels.
    #[arg(short, long = "mutation", value_name = "PIXELS")]
    #[arg(value_parser = parse_mutation)]
    pub mutation: Option<f64>,

    /// Nominal size of a lattice cell before it is split into two triangles.
    #[arg(long, value_name = "WIDTHxHEIGHT")]
    #[arg(value_parser = parse_dimensions)]
    pub cell_size: Option<Dimensions>,

    /// Diagonal used to split each cell: `fixed` or `alternating`.
    #[arg(long, value_name = "RULE", value_parser = parse_diagonal)]
    pub diagonal: Option<DiagonalRule>,

    /// Palette slots `1..N` that `wal` and `terminalsexy` may pick from.
    #[arg(long, value_name = "N", value_parser = parse_throttle)]
    pub throttle: Option<usize>,

    /// Always end the gradient on the scheme's foreground color.
    #[arg(long)]
    pub force_foreground: bool,

    /// Let the scheme's background compete with the other slots instead of
    /// always starting the gradient.
    #[arg(long)]
    pub sample_background: bool,

    /// Seed for the random generator; the same seed reproduces the same image.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Configuration file to read instead of the default location.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the built-in pastel palettes.
    Palettes,
    /// Print resolved configuration and cache paths.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

pub fn parse_dimensions(value: &str) -> Result<Dimensions, String> {
    let (w, h) = value
        .trim()
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("'{value}' must be written like 1920x1080"))?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid width in '{value}'"))?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("invalid height in '{value}'"))?;
    if width == 0 || height == 0 {
        return Err("dimensions must be greater than zero".into());
    }
    Ok(Dimensions { width, height })
}

pub fn parse_mutation(value: &str) -> Result<f64, String> {
    let intensity = value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("invalid mutation intensity '{value}'"))?;
    if !intensity.is_finite() || intensity < 0.0 {
        return Err("mutation intensity must be a non-negative number".into());
    }
    Ok(intensity)
}

pub fn parse_throttle(value: &str) -> Result<usize, String> {
    let throttle = value
        .trim()
        .parse::<usize>()
        .map_err(|_| format!("invalid throttle '{value}'"))?;
    check_throttle(throttle)
}

/// Slot 0 is the background, so anything below 2 leaves no palette slot.
pub fn check_throttle(throttle: usize) -> Result<usize, String> {
    if throttle < 2 {
        return Err(format!("throttle must be at least 2 (got {throttle})"));
    }
    Ok(throttle)
}

pub fn parse_palette_kind(value: &str) -> Result<PaletteKind, String> {
    value.parse::<PaletteKind>().map_err(|err| err.to_string())
}

pub fn parse_diagonal(value: &str) -> Result<DiagonalRule, String> {
    value.parse::<DiagonalRule>()
}
