use clap::Parser;
use log::{error, info};
use mammoviz_core::cli::{setup_logging, CompositeCli};
use mammoviz_core::{
    collect_dicom_files, convert_output_results, CompositeOptions, CompositeTextReport,
    ExamManifest, HeatmapFolder, ViewLocator,
};
use std::io::IsTerminal;
use std::process;

fn main() {
    let cli = CompositeCli::parse();

    setup_logging(cli.verbose);

    if !cli.input_data_folder.is_dir() {
        eprintln!(
            "Error: {} is not a directory",
            cli.input_data_folder.display()
        );
        process::exit(1);
    }

    let manifest = match ExamManifest::load(&cli.data_path) {
        Ok(manifest) => manifest,
        Err(e) => {
            error!("Failed to load exam list: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    info!(
        "Loaded {} exam(s) from {}",
        manifest.exams.len(),
        cli.data_path.display()
    );

    let dicom_files = match collect_dicom_files(&cli.input_data_folder) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to read directory: {}", e);
            eprintln!("Error: Failed to read directory: {}", e);
            process::exit(1);
        }
    };

    info!("Found {} DICOM files", dicom_files.len());

    let locator = ViewLocator::scan(dicom_files);
    let options = CompositeOptions {
        alpha: cli.blend_alpha,
        show_progress: !cli.verbose && std::io::stderr().is_terminal(),
    };

    match convert_output_results(
        &manifest,
        &locator,
        &HeatmapFolder::new(&cli.heatmaps_path),
        &cli.output_data_folder,
        &options,
    ) {
        Ok(report) => println!("{}", CompositeTextReport::new(&report)),
        Err(e) => {
            error!("Compositing failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
