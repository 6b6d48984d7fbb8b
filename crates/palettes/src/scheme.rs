//! Shared model for file-backed terminal color schemes (`wal`, `terminalsexy`)
//! and the pair-picking rule both of them use.
//!
//! Types:
//!
//! - `ColorScheme` holds the special background/foreground slots and the
//!   ordered 16-entry terminal palette.
//! - `PairOptions` controls which palette slots are eligible and whether the
//!   background/foreground are forced into the pair.
//!
//! Functions:
//!
//! - `ColorScheme::pick_pair` samples two distinct eligible colors and then
//!   overrides the forced slots.
//! - `ColorScheme::leading` returns the first few palette entries for preview.
use lattice::Color;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::PaletteError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScheme {
    pub background: Color,
    pub foreground: Color,
    /// Terminal colors in slot order; slot 0 usually matches the background.
    pub palette: Vec<Color>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairOptions {
    /// Palette slots `1..throttle` are eligible.
    pub throttle: usize,
    /// Always use the background as the first color.
    pub force_background: bool,
    /// Always use the foreground as the second color.
    pub force_foreground: bool,
}

impl Default for PairOptions {
    fn default() -> Self {
        Self {
            throttle: 4,
            force_background: true,
            force_foreground: false,
        }
    }
}

/// Palette entries shown by `get_color_palette` when no count is given.
pub const DEFAULT_PREVIEW: usize = 5;

impl ColorScheme {
    pub fn pick_pair<R: Rng + ?Sized>(
        &self,
        options: PairOptions,
        rng: &mut R,
    ) -> Result<(Color, Color), PaletteError> {
        let end = options.throttle.min(self.palette.len());
        let mut candidates: Vec<Color> = self.palette.get(1..end).unwrap_or_default().to_vec();
        if !options.force_background {
            candidates.push(self.background);
        }
        if !options.force_foreground {
            candidates.push(self.foreground);
        }
        if candidates.len() < 2 {
            return Err(PaletteError::NotEnoughColors {
                available: candidates.len(),
                needed: 2,
            });
        }

        let (chosen, _) = candidates.partial_shuffle(rng, 2);
        let mut pair = (chosen[0], chosen[1]);
        if options.force_background {
            pair.0 = self.background;
        }
        if options.force_foreground {
            pair.1 = self.foreground;
        }
        Ok(pair)
    }

    pub fn leading(&self, count: usize) -> Vec<Color> {
        self.palette.iter().take(count).copied().collect()
    }
}
