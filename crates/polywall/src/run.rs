use anyhow::{Context, Result};
use lattice::RgbImage;
use palettes::PaletteSource;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use crate::cli::RunArgs;
use crate::config::{FileConfig, Settings};
use crate::output;
use crate::paths::AppPaths;

pub fn run(args: RunArgs) -> Result<()> {
    let settings = resolve_settings(&args)?;

    let dims = settings
        .lattice
        .validate()
        .context("invalid wallpaper geometry")?;
    let source = PaletteSource::open(&settings.palette)
        .with_context(|| format!("failed to open {} palette", settings.palette.kind))?;
    output::prepare_output(&settings.output, settings.force)?;

    let seed = settings.seed.unwrap_or_else(rand::random);
    tracing::info!(
        seed,
        palette = %source.kind(),
        cols = dims.cols,
        rows = dims.rows,
        output = %settings.output.display(),
        "generating wallpaper"
    );

    let image = generate(&settings, &source, seed)?;
    output::save_png(&image, &settings.output)
}

fn resolve_settings(args: &RunArgs) -> Result<Settings> {
    let file = match &args.config {
        Some(path) => FileConfig::load(path)?,
        None => {
            let paths = AppPaths::discover()?;
            let path = paths.config_file();
            tracing::debug!(config = %path.display(), "looking for config file");
            FileConfig::load_or_default(&path)?
        }
    };
    Settings::resolve(args, &file).context("failed to combine flags with config file")
}

/// Renders one wallpaper from a fixed seed.
///
/// The color pair is drawn before the lattice consumes the generator, so the
/// whole image is a function of `seed` and the settings.
pub fn generate(settings: &Settings, source: &PaletteSource, seed: u64) -> Result<RgbImage> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (from, to) = source
        .get_color_pair(&mut rng)
        .context("failed to pick gradient colors")?;
    tracing::debug!(%from, %to, "gradient endpoints");
    let image = lattice::render(&settings.lattice, (from, to), &mut rng)?;
    Ok(image)
}

pub fn initialise_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use palettes::PaletteRequest;

    fn small_settings() -> Settings {
        let args = RunArgs {
            resolution: Some(crate::cli::Dimensions {
                width: 96,
                height: 64,
            }),
            cell_size: Some(crate::cli::Dimensions {
                width: 24,
                height: 20,
            }),
            mutation: Some(6.0),
            ..RunArgs::default()
        };
        Settings::resolve(&args, &FileConfig::default()).unwrap()
    }

    #[test]
    fn same_seed_same_image() {
        let settings = small_settings();
        let source = PaletteSource::open(&PaletteRequest::default()).unwrap();
        let first = generate(&settings, &source, 99).unwrap();
        let second = generate(&settings, &source, 99).unwrap();
        assert_eq!(first.dimensions(), (96, 64));
        assert_eq!(first.as_raw(), second.as_raw());
    }

    #[test]
    fn colors_come_from_the_palette() {
        let settings = small_settings();
        let source = PaletteSource::open(&PaletteRequest {
            pastel: Some("ocean".into()),
            ..PaletteRequest::default()
        })
        .unwrap();
        let image = generate(&settings, &source, 5).unwrap();
        let palette = source.get_color_palette();
        // Every channel is a blend of the two endpoints.
        let (lo, hi) = palette.iter().fold((255u8, 0u8), |(lo, hi), c| {
            (lo.min(c.r.min(c.g).min(c.b)), hi.max(c.r.max(c.g).max(c.b)))
        });
        let within = |p: &image::Rgb<u8>| p.0.iter().all(|&v| v >= lo && v <= hi);
        assert!(image.pixels().all(within));
    }
}
