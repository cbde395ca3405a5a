use clap::Parser;
use ctslab_core::cli::{setup_logging, OutputFormat};
use ctslab_core::{
    export_volume, CenterSliceSidecar, CommandSegmenter, CtStudy, SegmentationModel, SlabReport,
    SpacingSidecar, TextReport,
};
use log::{error, info, warn};
use std::path::PathBuf;
use std::process;

/// CLI tool for extracting a Hounsfield-Unit slab from a DICOM series
#[derive(Parser, Debug)]
#[command(name = "ctslab")]
#[command(about = "Assemble a CT series and extract an HU slab around a center slice")]
#[command(version)]
struct Cli {
    /// Directory containing the DICOM series
    #[arg(value_name = "DIRECTORY")]
    directory: PathBuf,

    /// Center slice index; read from the center-slice sidecar when omitted
    #[arg(short, long)]
    center: Option<usize>,

    /// Number of slices included on each side of the center
    #[arg(short = 'w', long, default_value_t = 20)]
    half_window: usize,

    /// Destination path for the exported NIfTI volume
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Directory holding the JSON sidecar files
    #[arg(short, long, default_value = "metadata")]
    metadata_dir: PathBuf,

    /// Recurse into subdirectories when scanning
    #[arg(short, long)]
    recursive: bool,

    /// Segmentation command to run on the exported volume
    #[arg(long, value_name = "PROGRAM", requires = "output", requires = "labels_output")]
    segment_with: Option<PathBuf>,

    /// Extra argument passed to the segmentation command before the
    /// volume and label paths; repeatable
    #[arg(long = "segment-arg", value_name = "ARG", requires = "segment_with")]
    segment_args: Vec<String>,

    /// Destination path for the segmentation label volume
    #[arg(long, value_name = "FILE")]
    labels_output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    if !cli.directory.is_dir() {
        eprintln!("Error: {} is not a directory", cli.directory.display());
        process::exit(1);
    }

    info!("Assembling series from {}", cli.directory.display());

    let study = match CtStudy::load(&cli.directory, cli.recursive) {
        Ok(study) => study,
        Err(e) => {
            error!("Failed to load series: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!("Assembled {} slices", study.len());

    let center_path = cli.metadata_dir.join("center_slice.json");
    let center_index = match cli.center {
        Some(index) => index,
        None => match CenterSliceSidecar::load(&center_path) {
            Ok(sidecar) => {
                info!(
                    "Using center index {} from {}",
                    sidecar.slice_index,
                    center_path.display()
                );
                sidecar.slice_index
            }
            Err(e) => {
                eprintln!(
                    "Error: no --center given and {} could not be read: {}",
                    center_path.display(),
                    e
                );
                process::exit(1);
            }
        },
    };

    let slab = match study.extract_slab(center_index, cli.half_window) {
        Ok(slab) => slab,
        Err(e) => {
            error!("Slab extraction failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let mut report = SlabReport::new(
        cli.directory.clone(),
        study.len(),
        center_index,
        cli.half_window,
        &slab,
    );
    if report.window_clamped() {
        warn!(
            "Window clamped to {}..{} at series boundary",
            slab.start, slab.end
        );
    }

    // Persist sidecars so later runs skip re-derivation
    let spacing_metadata = study.spacing_metadata().unwrap_or_default();
    let spacing_sidecar = SpacingSidecar::from_metadata(&spacing_metadata);
    if let Err(e) = spacing_sidecar.save(&cli.metadata_dir.join("spacing.json")) {
        warn!("Failed to save spacing sidecar: {}", e);
    }
    if cli.center.is_some() {
        let center_sidecar = CenterSliceSidecar {
            dicom_dir: cli.directory.clone(),
            slice_index: center_index,
            z_mm: study.z_position(center_index).ok().flatten(),
        };
        if let Err(e) = center_sidecar.save(&center_path) {
            warn!("Failed to save center-slice sidecar: {}", e);
        }
    }

    match spacing_metadata.volume_spacing() {
        Ok(spacing) => report.spacing = Some(spacing),
        Err(e) => warn!("{}", e),
    }

    if let Some(output) = &cli.output {
        let spacing = match report.spacing {
            Some(spacing) => spacing,
            None => {
                eprintln!(
                    "Error: cannot export {}: spacing unavailable on representative slice",
                    output.display()
                );
                process::exit(1);
            }
        };

        if let Err(e) = export_volume(&slab, &spacing, output) {
            error!("Volume export failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
        report.volume_path = Some(output.clone());

        if let Some(program) = &cli.segment_with {
            // clap enforces labels_output alongside segment_with
            let labels = cli.labels_output.as_ref().expect("labels_output required");
            let segmenter = cli
                .segment_args
                .iter()
                .fold(CommandSegmenter::new(program.clone()), |s, arg| {
                    s.arg(arg.as_str())
                });
            if let Err(e) = segmenter.segment(output, labels) {
                error!("Segmentation failed: {}", e);
                eprintln!("Error: {}", e);
                process::exit(1);
            }
            info!("Labels written to {}", labels.display());
        }
    }

    match cli.format {
        OutputFormat::Text => print!("{}", TextReport::new(&report)),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                eprintln!("Error: Failed to serialize report: {}", e);
                process::exit(1);
            }
        },
    }
}
