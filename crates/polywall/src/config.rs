//! Settings file and the merge of CLI flags over it.
//!
//! Types:
//!
//! - `FileConfig` mirrors `config.toml`; every key is optional.
//! - `Settings` is the fully resolved run: CLI flag, then file value, then
//!   built-in default.
//!
//! Functions:
//!
//! - `FileConfig::from_toml_str` parses and validates a document.
//! - `FileConfig::load_or_default` reads a file, treating a missing file as empty.
//! - `Settings::resolve` layers `RunArgs` over a `FileConfig`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lattice::{CellSize, DiagonalRule, LatticeConfig};
use palettes::{PairOptions, PaletteKind, PaletteRequest};
use serde::{Deserialize, Serialize};

use crate::cli::{check_throttle, parse_diagonal, parse_dimensions, parse_palette_kind, RunArgs};

pub const CONFIG_VERSION: u32 = 1;
pub const DEFAULT_OUTPUT: &str = "wallpaper.png";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub version: Option<u32>,
    pub resolution: Option<String>,
    pub cell_size: Option<String>,
    pub mutation: Option<f64>,
    pub palette: Option<String>,
    pub pastel: Option<String>,
    pub palette_file: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub diagonal: Option<String>,
    pub throttle: Option<usize>,
    pub force_background: Option<bool>,
    pub force_foreground: Option<bool>,
}

impl FileConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: FileConfig = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(version) = self.version {
            if version != CONFIG_VERSION {
                return Err(ConfigError::Invalid(format!(
                    "unsupported config version {version}; expected {CONFIG_VERSION}"
                )));
            }
        }
        let invalid = |key: &str, err: String| ConfigError::Invalid(format!("{key}: {err}"));
        if let Some(value) = &self.resolution {
            parse_dimensions(value).map_err(|err| invalid("resolution", err))?;
        }
        if let Some(value) = &self.cell_size {
            parse_dimensions(value).map_err(|err| invalid("cell_size", err))?;
        }
        if let Some(value) = self.mutation {
            if !value.is_finite() || value < 0.0 {
                let reason = format!("{value} is not a non-negative number");
                return Err(invalid("mutation", reason));
            }
        }
        if let Some(value) = &self.palette {
            parse_palette_kind(value).map_err(|err| invalid("palette", err))?;
        }
        if let Some(value) = &self.diagonal {
            parse_diagonal(value).map_err(|err| invalid("diagonal", err))?;
        }
        if let Some(value) = self.throttle {
            check_throttle(value).map_err(|err| invalid("throttle", err))?;
        }
        Ok(())
    }

    /// Reads `path`; a file that does not exist yields the empty config.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        Self::from_toml_str(&contents)
            .with_context(|| format!("failed to load config file at {}", path.display()))
    }

    /// Reads `path`, which must exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.is_file() {
            anyhow::bail!("config file {} does not exist", path.display());
        }
        Self::load_or_default(path)
    }
}

/// Flags win; `--sample-background` and `--force-foreground` can only move
/// the file's choice away from the default.
fn pair_options(args: &RunArgs, file: &FileConfig) -> PairOptions {
    let defaults = PairOptions::default();
    PairOptions {
        throttle: args.throttle.or(file.throttle).unwrap_or(defaults.throttle),
        force_background: !args.sample_background
            && file.force_background.unwrap_or(defaults.force_background),
        force_foreground: args.force_foreground
            || file.force_foreground.unwrap_or(defaults.force_foreground),
    }
}

/// Everything a single run needs, after layering.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub lattice: LatticeConfig,
    pub palette: PaletteRequest,
    pub output: PathBuf,
    pub force: bool,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn resolve(args: &RunArgs, file: &FileConfig) -> Result<Self, ConfigError> {
        file.validate()?;
        let defaults = LatticeConfig::default();

        let canvas = match args.resolution {
            Some(dims) => (dims.width, dims.height),
            None => match file.resolution.as_deref() {
                Some(value) => {
                    let dims = parse_dimensions(value).map_err(ConfigError::Invalid)?;
                    (dims.width, dims.height)
                }
                None => defaults.canvas,
            },
        };

        let cell_size = match args.cell_size {
            Some(dims) => CellSize::new(f64::from(dims.width), f64::from(dims.height)),
            None => match file.cell_size.as_deref() {
                Some(value) => {
                    let dims = parse_dimensions(value).map_err(ConfigError::Invalid)?;
                    CellSize::new(f64::from(dims.width), f64::from(dims.height))
                }
                None => defaults.cell_size,
            },
        };

        let diagonal = match (args.diagonal, file.diagonal.as_deref()) {
            (Some(rule), _) => rule,
            (None, Some(value)) => parse_diagonal(value).map_err(ConfigError::Invalid)?,
            (None, None) => DiagonalRule::default(),
        };

        let kind = match (args.palette, file.palette.as_deref()) {
            (Some(kind), _) => kind,
            (None, Some(value)) => parse_palette_kind(value).map_err(ConfigError::Invalid)?,
            (None, None) => PaletteKind::default(),
        };

        let palette_file = args.palette_file.as_ref().or(file.palette_file.as_ref());
        let pastel = args.pastel.as_ref().or(file.pastel.as_ref());

        Ok(Self {
            lattice: LatticeConfig {
                canvas,
                cell_size,
                mutation: args.mutation.or(file.mutation).unwrap_or(defaults.mutation),
                diagonal,
            },
            palette: PaletteRequest {
                kind,
                file: palette_file.cloned(),
                pastel: pastel.cloned(),
                options: pair_options(args, file),
            },
            output: args
                .output
                .clone()
                .or_else(|| file.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            force: args.force,
            seed: args.seed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Dimensions;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn parses_full_document() {
        let config = FileConfig::from_toml_str(
            r#"
version = 1
resolution = "2560x1440"
cell_size = "160x120"
mutation = 18
palette = "wal"
palette_file = "/tmp/colors.json"
output = "~/pictures/wall.png"
diagonal = "fixed"
"#,
        )
        .unwrap();
        assert_eq!(config.resolution.as_deref(), Some("2560x1440"));
        assert_eq!(config.mutation, Some(18.0));
        assert_eq!(config.palette.as_deref(), Some("wal"));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            FileConfig::from_toml_str("version = 2"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FileConfig::from_toml_str("resolution = \"wide\""),
            Err(ConfigError::Invalid(msg)) if msg.starts_with("resolution")
        ));
        assert!(matches!(
            FileConfig::from_toml_str("mutation = -1.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FileConfig::from_toml_str("palette = \"xresources\""),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            FileConfig::from_toml_str("colour = \"red\""),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn defaults_apply_without_flags_or_file() {
        let settings = Settings::resolve(&RunArgs::default(), &FileConfig::default()).unwrap();
        assert_eq!(settings.lattice, LatticeConfig::default());
        assert_eq!(settings.palette.kind, PaletteKind::Pastel);
        assert_eq!(settings.output, PathBuf::from(DEFAULT_OUTPUT));
        assert!(!settings.force);
        assert!(settings.seed.is_none());
    }

    #[test]
    fn flags_override_file_values() {
        let file = FileConfig::from_toml_str(
            "resolution = \"800x600\"\nmutation = 5\npalette = \"wal\"\npastel = \"ocean\"",
        )
        .unwrap();
        let args = RunArgs {
            resolution: Some(Dimensions {
                width: 320,
                height: 200,
            }),
            palette: Some(PaletteKind::Pastel),
            ..RunArgs::default()
        };
        let settings = Settings::resolve(&args, &file).unwrap();
        assert_eq!(settings.lattice.canvas, (320, 200));
        assert_eq!(settings.lattice.mutation, 5.0);
        assert_eq!(settings.palette.kind, PaletteKind::Pastel);
        assert_eq!(settings.palette.pastel.as_deref(), Some("ocean"));
    }

    #[test]
    fn missing_file_is_empty_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let loaded = FileConfig::load_or_default(&path).unwrap();
        assert_eq!(loaded, FileConfig::default());
        assert!(FileConfig::load(&path).is_err());

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cell_size = \"60x50\"").unwrap();
        let loaded = FileConfig::load(file.path()).unwrap();
        assert_eq!(loaded.cell_size.as_deref(), Some("60x50"));
    }

    #[test]
    fn pair_options_layer_flags_over_file() {
        let defaults = Settings::resolve(&RunArgs::default(), &FileConfig::default()).unwrap();
        assert_eq!(defaults.palette.options, PairOptions::default());

        let file = FileConfig::from_toml_str(
            "throttle = 8\nforce_background = false\nforce_foreground = true",
        )
        .unwrap();
        let from_file = Settings::resolve(&RunArgs::default(), &file).unwrap();
        assert_eq!(
            from_file.palette.options,
            PairOptions {
                throttle: 8,
                force_background: false,
                force_foreground: true,
            }
        );

        let args = RunArgs {
            throttle: Some(3),
            force_foreground: true,
            sample_background: true,
            ..RunArgs::default()
        };
        let options = Settings::resolve(&args, &FileConfig::default())
            .unwrap()
            .palette
            .options;
        assert_eq!(options.throttle, 3);
        assert!(!options.force_background);
        assert!(options.force_foreground);
    }

    #[test]
    fn rejects_throttle_without_eligible_slots() {
        for document in ["throttle = 0", "throttle = 1"] {
            assert!(matches!(
                FileConfig::from_toml_str(document),
                Err(ConfigError::Invalid(msg)) if msg.starts_with("throttle")
            ));
        }
        assert!(FileConfig::from_toml_str("throttle = 2").is_ok());
    }
}
