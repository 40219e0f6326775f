//! Point d'entrée CLI pour cap2geojson

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

// Charger .env au démarrage
fn load_env() {
    // Chercher .env dans le répertoire courant ou parent
    if dotenvy::dotenv().is_err() {
        // Essayer depuis le répertoire du binaire
        if let Ok(exe) = std::env::current_exe() {
            if let Some(dir) = exe.parent() {
                let _ = dotenvy::from_path(dir.join(".env"));
            }
        }
    }
}

mod cli;

use cli::Commands;

/// Convertir des alertes CAP en GeoJSON
#[derive(Parser)]
#[command(name = "cap2geojson")]
#[command(author, version)]
#[command(about = "Convertir des alertes CAP (Common Alerting Protocol) en GeoJSON")]
#[command(long_about = "Convertit des alertes CAP XML en FeatureCollection GeoJSON.\n\nLes polygones et les cercles des zones deviennent un MultiPolygon; les cercles sont approximés par des polygones.")]
struct Cli {
    /// Augmenter la verbosité (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Mode silencieux
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    // Charger .env avant tout
    load_env();

    let cli = Cli::parse();

    // Configurer le logging
    init_logging(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Convert {
            path,
            output,
            settings,
            report,
            jobs,
        } => {
            info!(path = %path.display(), output = %output.display(), "Conversion vers GeoJSON");
            cli::cmd_convert(&path, &output, &settings, report.as_deref(), jobs)?;
        }
        Commands::Print { path, settings } => {
            cli::cmd_print(&path, &settings)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::WARN,
        (_, 0) => Level::INFO,
        (_, 1) => Level::DEBUG,
        (_, _) => Level::TRACE,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    // Les logs vont sur stderr pour laisser stdout au GeoJSON (`print`)
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .init();
}
