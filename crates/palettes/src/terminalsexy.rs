use std::fs;
use std::path::Path;

use lattice::Color;
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::scheme::{ColorScheme, PairOptions, DEFAULT_PREVIEW};
use crate::PaletteError;

/// JSON export produced by terminal.sexy.
#[derive(Debug, Deserialize)]
struct Export {
    #[serde(default)]
    name: String,
    color: Vec<String>,
    foreground: String,
    background: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalSexyPalette {
    name: String,
    scheme: ColorScheme,
    options: PairOptions,
}

impl TerminalSexyPalette {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            name = %palette.name,
            "loaded terminal.sexy scheme"
        );
        Ok(palette)
    }

    pub fn from_json_str(input: &str) -> Result<Self, PaletteError> {
        let export: Export = serde_json::from_str(input)?;
        let palette = export
            .color
            .iter()
            .map(|raw| Color::from_hex(raw))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name: export.name,
            scheme: ColorScheme {
                background: Color::from_hex(&export.background)?,
                foreground: Color::from_hex(&export.foreground)?,
                palette,
            },
            options: PairOptions::default(),
        })
    }

    pub fn with_options(mut self, options: PairOptions) -> Self {
        self.options = options;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scheme(&self) -> &ColorScheme {
        &self.scheme
    }

    pub fn get_color_palette(&self) -> Vec<Color> {
        self.scheme.leading(DEFAULT_PREVIEW)
    }

    pub fn get_color_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Color, Color), PaletteError> {
        self.scheme.pick_pair(self.options, rng)
    }
}
