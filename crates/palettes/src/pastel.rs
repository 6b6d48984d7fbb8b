use lattice::Color;
use rand::seq::SliceRandom;
use rand::Rng;

use crate::PaletteError;

/// A named set of soft colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastelSet {
    pub name: &'static str,
    pub colors: &'static [Color],
}

pub const DEFAULT_PASTEL: &str = "forest";

const fn c(r: u8, g: u8, b: u8) -> Color {
    Color::new(r, g, b)
}

pub const PASTEL_SETS: &[PastelSet] = &[
    PastelSet {
        name: "forest",
        colors: &[
            c(0x84, 0xa5, 0x9d),
            c(0xf2, 0x84, 0x82),
            c(0xf5, 0xca, 0xc3),
            c(0xa3, 0xc4, 0xbc),
            c(0x6b, 0x8f, 0x71),
            c(0xd4, 0xe0, 0x9b),
        ],
    },
    PastelSet {
        name: "ocean",
        colors: &[
            c(0xa8, 0xda, 0xdc),
            c(0x45, 0x7b, 0x9d),
            c(0xbd, 0xe0, 0xfe),
            c(0xa2, 0xd2, 0xff),
            c(0x8e, 0xc5, 0xc0),
        ],
    },
    PastelSet {
        name: "sunset",
        colors: &[
            c(0xff, 0xb4, 0xa2),
            c(0xe5, 0x98, 0x9b),
            c(0xb5, 0x83, 0x8d),
            c(0xff, 0xcd, 0xb2),
            c(0x6d, 0x68, 0x75),
        ],
    },
    PastelSet {
        name: "candy",
        colors: &[
            c(0xcd, 0xb4, 0xdb),
            c(0xff, 0xc8, 0xdd),
            c(0xff, 0xaf, 0xcc),
            c(0xbd, 0xe0, 0xfe),
            c(0xa2, 0xd2, 0xff),
        ],
    },
    PastelSet {
        name: "autumn",
        colors: &[
            c(0xe9, 0xc4, 0x6a),
            c(0xf4, 0xa2, 0x61),
            c(0xe7, 0x6f, 0x51),
            c(0xd4, 0xa3, 0x73),
            c(0xcc, 0xd5, 0xae),
        ],
    },
];

/// Samples from one of the built-in pastel sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PastelPalette {
    set: &'static PastelSet,
}

impl PastelPalette {
    pub fn named(name: &str) -> Result<Self, PaletteError> {
        let wanted = name.trim().to_ascii_lowercase();
        let wanted = wanted.strip_prefix("pastel_").unwrap_or(&wanted);
        PASTEL_SETS
            .iter()
            .find(|set| set.name == wanted)
            .map(|set| Self { set })
            .ok_or_else(|| PaletteError::UnknownPastel {
                name: name.to_string(),
                available: names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn name(&self) -> &'static str {
        self.set.name
    }

    pub fn get_color_palette(&self) -> Vec<Color> {
        self.set.colors.to_vec()
    }

    /// Two distinct entries of the set, in random order.
    pub fn get_color_pair<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<(Color, Color), PaletteError> {
        let mut colors = self.set.colors.to_vec();
        if colors.len() < 2 {
            return Err(PaletteError::NotEnoughColors {
                available: colors.len(),
                needed: 2,
            });
        }
        let (chosen, _) = colors.partial_shuffle(rng, 2);
        Ok((chosen[0], chosen[1]))
    }
}

impl Default for PastelPalette {
    fn default() -> Self {
        Self {
            set: &PASTEL_SETS[0],
        }
    }
}

pub fn names() -> impl Iterator<Item = &'static str> {
    PASTEL_SETS.iter().map(|set| set.name)
}
