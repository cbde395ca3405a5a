use clap::Parser;
use ctslab_core::cli::{setup_logging, OutputFormat};
use ctslab_core::{
    load_series_with_skips, CenterSliceSidecar, CtSeries, SpacingSidecar, VolumeSpacing,
};
use log::{error, info, warn};
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use std::process;

/// CLI tool for surveying a DICOM series and persisting its sidecar metadata
#[derive(Parser, Debug)]
#[command(name = "ctscout")]
#[command(about = "Survey a DICOM series and persist spacing/center-slice sidecars")]
#[command(version)]
struct Cli {
    /// Directory containing the DICOM series
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Center slice index to record for later slab extraction
    #[arg(short, long)]
    center: Option<usize>,

    /// Directory receiving the JSON sidecar files
    #[arg(short, long, default_value = "metadata")]
    metadata_dir: PathBuf,

    /// Recurse into subdirectories when scanning
    #[arg(short, long)]
    recursive: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Summary of one series scan
#[derive(Debug, Serialize)]
struct ScoutReport {
    source: PathBuf,
    slice_count: usize,
    skipped_count: usize,
    z_first: Option<f64>,
    z_last: Option<f64>,
    spacing: Option<VolumeSpacing>,
    center_index: Option<usize>,
    center_z_mm: Option<f64>,
}

impl fmt::Display for ScoutReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Series Survey")?;
        writeln!(f, "=============")?;
        writeln!(f)?;
        writeln!(f, "Source:       {}", self.source.display())?;
        writeln!(f, "Slices:       {}", self.slice_count)?;
        writeln!(f, "Skipped:      {}", self.skipped_count)?;
        match (self.z_first, self.z_last) {
            (Some(first), Some(last)) => writeln!(f, "Z range:      {} .. {} mm", first, last)?,
            _ => writeln!(f, "Z range:      unavailable")?,
        }
        match &self.spacing {
            Some(spacing) => writeln!(f, "Spacing:      {}", spacing)?,
            None => writeln!(f, "Spacing:      unavailable")?,
        }
        if let Some(index) = self.center_index {
            match self.center_z_mm {
                Some(z) => writeln!(f, "Center:       index {} (z = {} mm)", index, z)?,
                None => writeln!(f, "Center:       index {} (no geometry)", index)?,
            }
        }
        Ok(())
    }
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    info!("Scanning {}", cli.directory.display());

    let (series, skipped) = match load_series_with_skips(&cli.directory, cli.recursive) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("Failed to scan directory: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    for skip in &skipped {
        warn!("Skipped {}: {}", skip.path.display(), skip.reason);
    }

    if series.is_empty() {
        eprintln!(
            "Error: no valid DICOM slices found in {}",
            cli.directory.display()
        );
        process::exit(1);
    }

    if let Some(index) = cli.center {
        if index >= series.len() {
            eprintln!(
                "Error: center index {} out of range for series of length {}",
                index,
                series.len()
            );
            process::exit(1);
        }
    }

    let report = build_report(&cli, &series, skipped.len());

    let spacing_metadata = series.spacing_metadata().unwrap_or_default();
    let spacing_sidecar = SpacingSidecar::from_metadata(&spacing_metadata);
    let spacing_path = cli.metadata_dir.join("spacing.json");
    if let Err(e) = spacing_sidecar.save(&spacing_path) {
        error!("Failed to save {}: {}", spacing_path.display(), e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
    info!("Spacing sidecar written to {}", spacing_path.display());

    if let Some(index) = cli.center {
        let center_sidecar = CenterSliceSidecar {
            dicom_dir: cli.directory.clone(),
            slice_index: index,
            z_mm: report.center_z_mm,
        };
        let center_path = cli.metadata_dir.join("center_slice.json");
        if let Err(e) = center_sidecar.save(&center_path) {
            error!("Failed to save {}: {}", center_path.display(), e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        info!("Center-slice sidecar written to {}", center_path.display());
    }

    match cli.format {
        OutputFormat::Text => print!("{}", report),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: Failed to serialize report: {}", e);
                process::exit(1);
            }
        },
    }
}

fn build_report(cli: &Cli, series: &CtSeries, skipped_count: usize) -> ScoutReport {
    let center_z_mm = cli
        .center
        .and_then(|index| series.get(index))
        .and_then(|slice| slice.z_position());

    ScoutReport {
        source: cli.directory.clone(),
        slice_count: series.len(),
        skipped_count,
        z_first: series.representative().and_then(|s| s.z_position()),
        z_last: series.slices().last().and_then(|s| s.z_position()),
        spacing: series
            .spacing_metadata()
            .and_then(|m| m.volume_spacing().ok()),
        center_index: cli.center,
        center_z_mm,
    }
}
