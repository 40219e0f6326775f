//! Définition et implémentation des commandes CLI
//!
//! - `convert`: CAP XML (fichier ou répertoire) → fichiers GeoJSON
//! - `print`: CAP XML → GeoJSON sur la sortie standard

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use cap2geojson::export::geojson::{export_to_geojson, polygon_count, to_string};
use cap2geojson::report::ErrorKind;
use cap2geojson::{to_geojson, Config, ConvertReport};
use clap::{Args, Subcommand};
use rayon::prelude::*;
use tracing::{info, warn};

#[derive(Subcommand)]
pub enum Commands {
    /// Convert CAP alerts to GeoJSON files
    Convert {
        /// Path to a CAP XML file or a directory of alerts
        #[arg(short, long)]
        path: PathBuf,

        /// Output directory for GeoJSON files
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,

        /// Save the conversion report as JSON
        #[arg(long)]
        report: Option<PathBuf>,

        /// Maximum number of alerts converted concurrently
        #[arg(long, alias = "threads")]
        jobs: Option<usize>,
    },

    /// Print the GeoJSON of a single alert on stdout
    Print {
        /// Path to a CAP XML file
        #[arg(short, long)]
        path: PathBuf,

        #[command(flatten)]
        settings: SettingsArgs,
    },
}

/// Réglages communs aux commandes
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Number of points used to approximate circles (default: env CAP2GEOJSON_POINTS, then 32)
    #[arg(long)]
    pub points: Option<usize>,

    /// JSON config file (replaces the environment variables)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Emit null for missing alert fields instead of failing
    #[arg(long)]
    pub lenient: bool,

    /// Indent the GeoJSON output
    #[arg(long)]
    pub pretty: bool,
}

impl SettingsArgs {
    /// Résout la configuration: flags CLI > fichier de config > environnement > défauts
    pub fn resolve(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::from_env(),
        };

        if let Some(points) = self.points {
            config.n_points = points;
        }
        config.lenient |= self.lenient;
        config.pretty |= self.pretty;

        config.validate()?;
        Ok(config)
    }
}

/// Exécute la commande convert
pub fn cmd_convert(
    path: &Path,
    output: &Path,
    settings: &SettingsArgs,
    report_path: Option<&Path>,
    jobs: Option<usize>,
) -> Result<()> {
    let config = settings.resolve()?;
    let started = Instant::now();

    let alerts = collect_alerts(path)?;
    if alerts.is_empty() {
        anyhow::bail!("No CAP alerts (.xml) found in {}", path.display());
    }

    std::fs::create_dir_all(output)
        .with_context(|| format!("Cannot create output directory {}", output.display()))?;

    let jobs = jobs.unwrap_or_else(|| {
        std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(4)
    });

    info!(
        alerts = alerts.len(),
        jobs = jobs,
        n_points = config.n_points,
        lenient = config.lenient,
        "Starting conversion"
    );

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to build thread pool")?;

    let outcomes: Vec<(&PathBuf, Result<usize>)> = pool.install(|| {
        alerts
            .par_iter()
            .map(|alert_path| {
                let output_file = output_file_for(path, alert_path, output);
                (alert_path, convert_file(alert_path, &output_file, &config))
            })
            .collect()
    });

    let mut report = ConvertReport::new();
    for (alert_path, outcome) in outcomes {
        match outcome {
            Ok(polygons) => report.record_success(polygons),
            Err(e) => {
                warn!("Failed to convert {}: {:#}", alert_path.display(), e);
                report.record_failure(
                    &alert_path.display().to_string(),
                    ErrorKind::classify(&e),
                    &format!("{:#}", e),
                );
            }
        }
    }

    report.set_duration(started.elapsed());
    report.finalize();
    report.display();

    if let Some(report_path) = report_path {
        report
            .save_to_file(report_path)
            .with_context(|| format!("Cannot write report {}", report_path.display()))?;
        info!(path = %report_path.display(), "Report saved");
    }

    println!("Conversion complete: {}", report.summary());

    Ok(())
}

/// Exécute la commande print
pub fn cmd_print(path: &Path, settings: &SettingsArgs) -> Result<()> {
    let config = settings.resolve()?;

    let xml = std::fs::read(path).with_context(|| format!("Cannot read {}", path.display()))?;
    let collection = to_geojson(&xml, &config.options())
        .with_context(|| format!("Failed to convert {}", path.display()))?;

    println!("{}", to_string(&collection, config.pretty)?);
    Ok(())
}

/// Convertit une alerte vers `output_file`, retourne le nombre de polygones
fn convert_file(alert_path: &Path, output_file: &Path, config: &Config) -> Result<usize> {
    let xml = std::fs::read(alert_path)
        .with_context(|| format!("Cannot read {}", alert_path.display()))?;

    let collection = to_geojson(&xml, &config.options())
        .with_context(|| format!("Failed to convert {}", alert_path.display()))?;

    if let Some(parent) = output_file.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create output directory {}", parent.display()))?;
    }
    export_to_geojson(&collection, output_file, config.pretty)?;

    let polygons = polygon_count(&collection);
    info!(
        "Exported {} polygons from {} to {}",
        polygons,
        alert_path.display(),
        output_file.display()
    );

    Ok(polygons)
}

/// Collecte récursivement les fichiers .xml
fn collect_alerts(path: &Path) -> Result<Vec<PathBuf>> {
    let mut alerts = Vec::new();

    if path.is_file() {
        alerts.push(path.to_path_buf());
        return Ok(alerts);
    }

    for entry in std::fs::read_dir(path)
        .with_context(|| format!("Cannot read directory {}", path.display()))?
    {
        let entry = entry?;
        let entry_path = entry.path();

        if entry_path.is_dir() {
            alerts.extend(collect_alerts(&entry_path)?);
        } else if is_xml(&entry_path) {
            alerts.push(entry_path);
        }
    }

    alerts.sort();
    Ok(alerts)
}

fn is_xml(path: &Path) -> bool {
    path.extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("xml"))
}

/// Fichier GeoJSON d'une alerte: l'arborescence sous `root` est reproduite dans `output`
fn output_file_for(root: &Path, alert_path: &Path, output: &Path) -> PathBuf {
    let relative = alert_path
        .strip_prefix(root)
        .ok()
        .filter(|relative| !relative.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .or_else(|| alert_path.file_name().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("alert"));

    output.join(relative).with_extension("geojson")
}
