mod cli;
mod config;
mod output;
mod paths;
mod run;

use anyhow::Result;
use cli::Command;
use palettes::{PaletteKind, WalPalette, PASTEL_SETS};
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Palettes) => list_palettes(),
        Some(Command::Where) => print_paths(),
        None => run::run(cli.run),
    }
}

fn list_palettes() -> Result<()> {
    let sources: Vec<&str> = PaletteKind::ALL.iter().map(PaletteKind::as_str).collect();
    println!("Sources: {}", sources.join(", "));
    println!("Pastel sets:");
    for set in PASTEL_SETS {
        let colors: Vec<String> = set.colors.iter().map(ToString::to_string).collect();
        println!("  {:<8} {}", set.name, colors.join(" "));
    }
    Ok(())
}

fn print_paths() -> Result<()> {
    let paths = AppPaths::discover()?;
    println!("Config directory: {}", paths.config_dir().display());
    println!("Config file:      {}", paths.config_file().display());
    match WalPalette::default_cache_file() {
        Ok(path) => println!("Wal cache:        {}", path.display()),
        Err(err) => println!("Wal cache:        unavailable ({err})"),
    }
    Ok(())
}
