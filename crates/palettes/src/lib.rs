//! Sources of the two endpoint colors a wallpaper is shaded with.
//!
//! The set of sources is closed: `PaletteSource` is an enum picked by name at
//! the CLI boundary, and the lattice engine only ever sees the resulting
//! `(Color, Color)` pair.
//!
//! - `wal` reads pywal's cached `colors.json`.
//! - `terminalsexy` reads a terminal.sexy JSON export.
//! - `pastel` samples a built-in curated table.
mod pastel;
mod scheme;
mod terminalsexy;
mod wal;

pub use pastel::{names as pastel_names, PastelPalette, PastelSet, DEFAULT_PASTEL, PASTEL_SETS};
pub use scheme::{ColorScheme, PairOptions};
pub use terminalsexy::TerminalSexyPalette;
pub use wal::WalPalette;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use lattice::{Color, LatticeError};
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PaletteError {
    #[error("failed to read color scheme {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse color scheme: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("color scheme contains an invalid color: {0}")]
    Color(#[from] LatticeError),

    #[error("unknown pastel palette '{name}'; available: {available}")]
    UnknownPastel { name: String, available: String },

    #[error("need at least {needed} colors to choose from, found {available}")]
    NotEnoughColors { available: usize, needed: usize },

    #[error("wal color slots have a gap: expected color{expected}, found color{found}")]
    SlotGap { expected: usize, found: usize },

    #[error("unknown palette source '{0}'; expected wal, terminalsexy, or pastel")]
    UnknownSource(String),

    #[error("the {0} palette needs a color scheme file (--palette-file)")]
    MissingFile(PaletteKind),

    #[error("could not determine the user cache directory")]
    CacheDirUnavailable,
}

/// Names accepted by `--palette`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaletteKind {
    Wal,
    TerminalSexy,
    #[default]
    Pastel,
}

impl PaletteKind {
    pub const ALL: [PaletteKind; 3] = [
        PaletteKind::Wal,
        PaletteKind::TerminalSexy,
        PaletteKind::Pastel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PaletteKind::Wal => "wal",
            PaletteKind::TerminalSexy => "terminalsexy",
            PaletteKind::Pastel => "pastel",
        }
    }
}

impl FromStr for PaletteKind {
    type Err = PaletteError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "wal" | "pywal" => Ok(PaletteKind::Wal),
            "terminalsexy" | "terminal.sexy" | "terminal-sexy" => Ok(PaletteKind::TerminalSexy),
            "pastel" => Ok(PaletteKind::Pastel),
            _ => Err(PaletteError::UnknownSource(value.to_string())),
        }
    }
}

impl fmt::Display for PaletteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything needed to open a palette source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaletteRequest {
    pub kind: PaletteKind,
    /// Scheme file for `wal` (defaults to the pywal cache) or `terminalsexy`.
    pub file: Option<PathBuf>,
    /// Pastel set name; defaults to `forest`.
    pub pastel: Option<String>,
    /// Pair rule for the file-backed sources; the pastel sets ignore it.
    pub options: PairOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteSource {
    Wal(WalPalette),
    TerminalSexy(TerminalSexyPalette),
    Pastel(PastelPalette),
}

impl PaletteSource {
    pub fn open(request: &PaletteRequest) -> Result<Self, PaletteError> {
        match request.kind {
            PaletteKind::Wal => {
                let palette = match &request.file {
                    Some(path) => WalPalette::load(path)?,
                    None => WalPalette::from_cache()?,
                };
                Ok(PaletteSource::Wal(palette.with_options(request.options)))
            }
            PaletteKind::TerminalSexy => {
                let path = request
                    .file
                    .as_ref()
                    .ok_or(PaletteError::MissingFile(PaletteKind::TerminalSexy))?;
                let palette = TerminalSexyPalette::load(path)?;
                Ok(PaletteSource::TerminalSexy(palette.with_options(request.options)))
            }
            PaletteKind::Pastel => {
                let palette = match request.pastel.as_deref() {
                    Some(name) => PastelPalette::named(name)?,
                    None => PastelPalette::default(),
                };
                Ok(PaletteSource::Pastel(palette))
            }
        }
    }

    pub fn kind(&self) -> PaletteKind {
        match self {
            PaletteSource::Wal(_) => PaletteKind::Wal,
            PaletteSource::TerminalSexy(_) => PaletteKind::TerminalSexy,
            PaletteSource::Pastel(_) => PaletteKind::Pastel,
        }
    }

    pub fn get_color_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Color, Color), PaletteError> {
        match self {
            PaletteSource::Wal(palette) => palette.get_color_pair(rng),
            PaletteSource::TerminalSexy(palette) => palette.get_color_pair(rng),
            PaletteSource::Pastel(palette) => palette.get_color_pair(rng),
        }
    }

    pub fn get_color_palette(&self) -> Vec<Color> {
        match self {
            PaletteSource::Wal(palette) => palette.get_color_palette(),
            PaletteSource::TerminalSexy(palette) => palette.get_color_palette(),
            PaletteSource::Pastel(palette) => palette.get_color_palette(),
        }
    }
}
