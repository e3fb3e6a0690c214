pub mod cli;
pub mod composite;
pub mod error;
pub mod export;
pub mod extraction;
pub mod imaging;
pub mod manifest;
pub mod secondary_capture;
pub mod selection;
pub mod types;

pub use cli::report::{CompositeTextReport, ExportTextReport};
pub use composite::{convert_output_results, CompositeOptions, CompositeReport, HeatmapFolder};
pub use error::{MammovizError, Result};
pub use export::{prepare_dicom_images, BitDepth, ExportReport};
pub use manifest::{ExamEntry, ExamManifest};
pub use secondary_capture::SecondaryCapture;
pub use selection::{collect_dicom_files, ViewCandidate, ViewLocator};
pub use types::*;
