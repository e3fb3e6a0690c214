//! View location
//!
//! Finds the DICOM file holding each standard view among an explicit list
//! of candidate files.

mod files;
mod locator;

pub use files::collect_dicom_files;
pub use locator::{ViewCandidate, ViewLocator};
