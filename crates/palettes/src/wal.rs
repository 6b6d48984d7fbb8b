use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use directories_next::BaseDirs;
use lattice::Color;
use rand::Rng;
use serde::Deserialize;
use tracing::debug;

use crate::scheme::{ColorScheme, PairOptions, DEFAULT_PREVIEW};
use crate::PaletteError;

/// Layout of pywal's `colors.json` cache file.
#[derive(Debug, Deserialize)]
struct WalCache {
    special: WalSpecial,
    colors: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct WalSpecial {
    background: String,
    foreground: String,
}

/// Colors extracted from the pywal cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalPalette {
    scheme: ColorScheme,
    options: PairOptions,
}

impl WalPalette {
    /// `<cache dir>/wal/colors.json`, where pywal writes its current scheme.
    pub fn default_cache_file() -> Result<PathBuf, PaletteError> {
        let dirs = BaseDirs::new().ok_or(PaletteError::CacheDirUnavailable)?;
        Ok(dirs.cache_dir().join("wal").join("colors.json"))
    }

    pub fn from_cache() -> Result<Self, PaletteError> {
        Self::load(Self::default_cache_file()?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| PaletteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_json_str(&raw)?;
        debug!(
            path = %path.display(),
            colors = palette.scheme.palette.len(),
            "loaded wal scheme"
        );
        Ok(palette)
    }

    pub fn from_json_str(input: &str) -> Result<Self, PaletteError> {
        let cache: WalCache = serde_json::from_str(input)?;

        // colorN keys sort lexically in the map; order them by slot number.
        let mut slots = Vec::with_capacity(cache.colors.len());
        for (key, value) in &cache.colors {
            let Some(slot) = key
                .strip_prefix("color")
                .and_then(|digits| digits.parse::<usize>().ok())
            else {
                continue;
            };
            slots.push((slot, Color::from_hex(value)?));
        }
        slots.sort_by_key(|(slot, _)| *slot);
        for (expected, &(found, _)) in slots.iter().enumerate() {
            if found != expected {
                return Err(PaletteError::SlotGap { expected, found });
            }
        }

        Ok(Self {
            scheme: ColorScheme {
                background: Color::from_hex(&cache.special.background)?,
                foreground: Color::from_hex(&cache.special.foreground)?,
                palette: slots.into_iter().map(|(_, color)| color).collect(),
            },
            options: PairOptions::default(),
        })
    }

    pub fn with_options(mut self, options: PairOptions) -> Self {
        self.options = options;
        self
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

#[cfg(test)]
mod tests {
    use std::fs;

    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use tempfile::TempDir;

    use super::*;

    const SAMPLE: &str = r##"{
        "wallpaper": "/home/user/pictures/forest.jpg",
        "alpha": "100",
        "special": {
            "background": "#1d1f21",
            "foreground": "#c5c8c6",
            "cursor": "#c5c8c6"
        },
        "colors": {
            "color0": "#1d1f21", "color1": "#cc6666", "color2": "#b5bd68",
            "color3": "#f0c674", "color4": "#81a2be", "color5": "#b294bb",
            "color6": "#8abeb7", "color7": "#c5c8c6", "color8": "#969896",
            "color9": "#cc6666", "color10": "#b5bd68", "color11": "#f0c674",
            "color12": "#81a2be", "color13": "#b294bb", "color14": "#8abeb7",
            "color15": "#ffffff"
        }
    }"##;

    #[test]
    fn orders_slots_numerically() {
        let wal = WalPalette::from_json_str(SAMPLE).unwrap();
        let palette = &wal.scheme().palette;
        assert_eq!(palette.len(), 16);
        assert_eq!(palette[2], Color::new(0xb5, 0xbd, 0x68));
        assert_eq!(palette[10], Color::new(0xb5, 0xbd, 0x68));
        assert_eq!(palette[15], Color::new(255, 255, 255));
    }

    #[test]
    fn pair_starts_with_background() {
        let wal = WalPalette::from_json_str(SAMPLE).unwrap();
        let (first, second) = wal.get_color_pair(&mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(first, Color::new(0x1d, 0x1f, 0x21));
        let eligible = &wal.scheme().palette[1..4];
        assert!(eligible.contains(&second) || second == wal.scheme().foreground);
    }

    #[test]
    fn preview_is_first_five_slots() {
        let wal = WalPalette::from_json_str(SAMPLE).unwrap();
        assert_eq!(wal.get_color_palette(), wal.scheme().palette[..5].to_vec());
    }

    #[test]
    fn loads_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("colors.json");
        fs::write(&path, SAMPLE).unwrap();
        let wal = WalPalette::load(&path).unwrap();
        assert_eq!(wal.scheme().foreground, Color::new(0xc5, 0xc8, 0xc6));
    }

    #[test]
    fn reports_missing_file_and_bad_colors() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            WalPalette::load(dir.path().join("absent.json")),
            Err(PaletteError::Io { .. })
        ));
        let broken = SAMPLE.replace("#cc6666", "#cc66");
        assert!(matches!(
            WalPalette::from_json_str(&broken),
            Err(PaletteError::Color(_))
        ));
        assert!(matches!(WalPalette::from_json_str("{"), Err(PaletteError::Parse(_))));
    }

    #[test]
    fn rejects_gaps_between_slots() {
        let gapped = SAMPLE.replace(r##""color1": "#cc6666", "##, "");
        assert!(matches!(
            WalPalette::from_json_str(&gapped),
            Err(PaletteError::SlotGap {
                expected: 1,
                found: 2
            })
        ));

        let shifted = SAMPLE.replace("\"color0\"", "\"color16\"");
        assert!(matches!(
            WalPalette::from_json_str(&shifted),
            Err(PaletteError::SlotGap {
                expected: 0,
                found: 1
            })
        ));
    }

    #[test]
    fn ignores_keys_that_are_not_slots() {
        let extra = SAMPLE.replace("\"color15\"", "\"cursor\": \"#000000\", \"color15\"");
        let wal = WalPalette::from_json_str(&extra).unwrap();
        assert_eq!(wal.scheme().palette.len(), 16);
    }
}
