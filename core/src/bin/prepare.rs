use clap::Parser;
use log::{error, info};
use mammoviz_core::cli::{setup_logging, PrepareCli};
use mammoviz_core::{collect_dicom_files, prepare_dicom_images, ExportTextReport, ViewLocator};
use std::process;

fn main() {
    let cli = PrepareCli::parse();

    setup_logging(cli.verbose);

    if !cli.input_data_folder.is_dir() {
        eprintln!(
            "Error: {} is not a directory",
            cli.input_data_folder.display()
        );
        process::exit(1);
    }

    info!("Processing directory: {}", cli.input_data_folder.display());

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

    match prepare_dicom_images(
        &locator,
        &cli.output_data_folder,
        &cli.exam_list_path,
        cli.bit_depth.into(),
    ) {
        Ok(report) => println!("{}", ExportTextReport::new(&report)),
        Err(e) => {
            error!("Export failed: {}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}
