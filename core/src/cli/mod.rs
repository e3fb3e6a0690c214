pub mod report;

use crate::export::BitDepth;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for mammoviz-prepare
#[derive(Parser, Debug)]
#[command(name = "mammoviz-prepare")]
#[command(about = "Prepare DICOM images by identifying the standard views and saving them as PNG")]
#[command(version)]
pub struct PrepareCli {
    /// Root directory scanned recursively for *.dcm files
    #[arg(long, value_name = "DIR")]
    pub input_data_folder: PathBuf,

    /// Destination for the exported PNGs
    #[arg(long, value_name = "DIR")]
    pub output_data_folder: PathBuf,

    /// Destination for the exam list (JSON)
    #[arg(long, value_name = "FILE")]
    pub exam_list_path: PathBuf,

    /// PNG bit depth
    #[arg(long, default_value = "8")]
    pub bit_depth: BitDepthArg,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Command-line arguments for mammoviz-composite
#[derive(Parser, Debug)]
#[command(name = "mammoviz-composite")]
#[command(about = "Overlay heatmaps on the original mammograms and save them as DICOM")]
#[command(version)]
pub struct CompositeCli {
    /// Root directory scanned recursively for *.dcm files
    #[arg(long, value_name = "DIR")]
    pub input_data_folder: PathBuf,

    /// Folder containing heatmap_benign/ and heatmap_malignant/
    #[arg(long, value_name = "DIR")]
    pub heatmaps_path: PathBuf,

    /// Exam list (JSON) with window locations
    #[arg(long, value_name = "FILE")]
    pub data_path: PathBuf,

    /// Destination for the Secondary Capture files
    #[arg(long, value_name = "DIR")]
    pub output_data_folder: PathBuf,

    /// Overlay weight in [0, 1]
    #[arg(long, default_value_t = crate::imaging::BLEND_ALPHA, value_parser = parse_alpha)]
    pub blend_alpha: f32,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// PNG bit depth options
#[derive(Debug, Clone, ValueEnum)]
pub enum BitDepthArg {
    /// Min-max normalized 8-bit grayscale
    #[value(name = "8")]
    Eight,
    /// Raw stored values, 16-bit grayscale
    #[value(name = "16")]
    Sixteen,
}

impl From<BitDepthArg> for BitDepth {
    fn from(arg: BitDepthArg) -> Self {
        match arg {
            BitDepthArg::Eight => BitDepth::Eight,
            BitDepthArg::Sixteen => BitDepth::Sixteen,
        }
    }
}

fn parse_alpha(s: &str) -> Result<f32, String> {
    let alpha: f32 = s.parse().map_err(|e| format!("{}", e))?;
    if (0.0..=1.0).contains(&alpha) {
        Ok(alpha)
    } else {
        Err(format!("{} is not in [0, 1]", alpha))
    }
}

/// Initializes env_logger; `RUST_LOG` still overrides per module
pub fn setup_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prepare_cli_flags() {
        let cli = PrepareCli::try_parse_from([
            "mammoviz-prepare",
            "--input-data-folder",
            "in",
            "--output-data-folder",
            "out",
            "--exam-list-path",
            "exams.json",
        ])
        .unwrap();
        assert_eq!(cli.input_data_folder, PathBuf::from("in"));
        assert_eq!(cli.exam_list_path, PathBuf::from("exams.json"));
        assert_eq!(BitDepth::from(cli.bit_depth), BitDepth::Eight);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_prepare_cli_requires_all_paths() {
        let result = PrepareCli::try_parse_from(["mammoviz-prepare", "--input-data-folder", "in"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_composite_cli_flags() {
        let cli = CompositeCli::try_parse_from([
            "mammoviz-composite",
            "--input-data-folder",
            "in",
            "--heatmaps-path",
            "heatmaps",
            "--data-path",
            "exams.json",
            "--output-data-folder",
            "out",
            "--blend-alpha",
            "0.5",
        ])
        .unwrap();
        assert_eq!(cli.heatmaps_path, PathBuf::from("heatmaps"));
        assert_eq!(cli.blend_alpha, 0.5);
    }

    #[test]
    fn test_parse_alpha_range() {
        assert_eq!(parse_alpha("0.25"), Ok(0.25));
        assert!(parse_alpha("1.5").is_err());
        assert!(parse_alpha("abc").is_err());
    }
}
