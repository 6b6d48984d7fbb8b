use std::fs;
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use image::ImageFormat;
use lattice::RgbImage;
use tracing::{info, warn};

/// Checks that `path` can be written before any rendering starts.
///
/// The parent directory must already exist. An existing file is replaced only
/// with `force`, or after the user confirms on an interactive terminal.
pub fn prepare_output(path: &Path, force: bool) -> Result<()> {
    ensure_png_path(path)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        bail!(
            "directory {} for the output file does not exist",
            parent.display()
        );
    }
    if path.is_dir() {
        bail!("output path {} is a directory", path.display());
    }
    if !path.exists() {
        return Ok(());
    }

    if force {
        warn!(path = %path.display(), "overwriting existing output file");
        return Ok(());
    }
    if !io::stdin().is_terminal() {
        bail!(
            "output file {} already exists; pass --force to overwrite it",
            path.display()
        );
    }
    let stdin = io::stdin();
    if confirm_overwrite(path, stdin.lock(), io::stderr())? {
        Ok(())
    } else {
        bail!("left {} untouched", path.display())
    }
}

/// Asks whether `path` may be replaced; only `y` or `yes` counts as consent.
pub fn confirm_overwrite<R: BufRead, W: Write>(
    path: &Path,
    mut input: R,
    mut prompt: W,
) -> Result<bool> {
    let name = path.display();
    write!(prompt, "{name} already exists. Overwrite? [y/N] ")?;
    prompt.flush()?;
    let mut answer = String::new();
    input
        .read_line(&mut answer)
        .context("failed to read overwrite confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

pub fn ensure_png_path(path: &Path) -> Result<()> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(()),
        Some(ext) => bail!("unsupported output format '.{ext}'; only .png is written"),
        None => bail!("output path {} needs a .png extension", path.display()),
    }
}

pub fn save_png(image: &RgbImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, ImageFormat::Png)
        .with_context(|| format!("failed to write wallpaper to {}", path.display()))?;
    let bytes = fs::metadata(path).map_or(0, |meta| meta.len());
    info!(path = %path.display(), bytes, "wallpaper written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn accepts_new_file_in_existing_directory() {
        let dir = TempDir::new().unwrap();
        prepare_output(&dir.path().join("wall.png"), false).unwrap();
    }

    #[test]
    fn rejects_missing_parent_and_wrong_extension() {
        let dir = TempDir::new().unwrap();
        let err = prepare_output(&dir.path().join("nope/wall.png"), false).unwrap_err();
        assert!(err.to_string().contains("does not exist"));
        assert!(prepare_output(&dir.path().join("wall.jpg"), true).is_err());
        assert!(prepare_output(&dir.path().join("wall"), true).is_err());
        assert!(ensure_png_path(Path::new("WALL.PNG")).is_ok());
    }

    #[test]
    fn force_allows_existing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wall.png");
        fs::write(&path, b"old").unwrap();
        prepare_output(&path, true).unwrap();
    }

    #[test]
    fn confirmation_requires_yes() {
        let path = Path::new("wall.png");
        let mut prompt = Vec::new();
        assert!(confirm_overwrite(path, &b"y\n"[..], &mut prompt).unwrap());
        assert!(String::from_utf8(prompt).unwrap().contains("Overwrite?"));
        assert!(confirm_overwrite(path, &b" YES \n"[..], io::sink()).unwrap());
        assert!(!confirm_overwrite(path, &b"\n"[..], io::sink()).unwrap());
        assert!(!confirm_overwrite(path, &b"nope\n"[..], io::sink()).unwrap());
        assert!(!confirm_overwrite(path, &b""[..], io::sink()).unwrap());
    }

    #[test]
    fn writes_png() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("wall.png");
        let image = RgbImage::new(4, 3);
        save_png(&image, &path).unwrap();
        let decoded = image::open(&path).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (4, 3));
    }
}
