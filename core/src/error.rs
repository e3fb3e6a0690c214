use std::path::PathBuf;
use thiserror::Error;

use crate::types::MammogramView;

/// Result type for mammoviz operations
pub type Result<T> = std::result::Result<T, MammovizError>;

/// Error types for mammoviz operations
///
/// Every error is fatal for a run: nothing is retried and nothing is skipped.
#[derive(Error, Debug)]
pub enum MammovizError {
    /// DICOM reading error
    #[error("DICOM error: {0}")]
    DicomError(String),

    /// DICOM writing error
    #[error("DICOM write error: {0}")]
    DicomWriteError(String),

    /// Pixel data could not be decoded
    #[error("Pixel data error: {0}")]
    PixelDataError(String),

    /// PNG decoding or encoding error
    #[error("Image error: {0}")]
    ImageError(String),

    /// No candidate DICOM file matches the requested view
    #[error("No DICOM file found for view {0}")]
    MissingView(MammogramView),

    /// A heatmap PNG is absent
    #[error("Heatmap file not found: {}", .0.display())]
    MissingHeatmapFile(PathBuf),

    /// Manifest entry is missing a key or has an unexpected shape
    #[error("Malformed manifest: {0}")]
    MalformedManifest(String),

    /// Crop window does not fit the image
    #[error("Invalid window location: {0}")]
    InvalidWindow(String),

    /// Two images that must share dimensions do not
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Invalid tag value
    #[error("Invalid tag value: {0}")]
    InvalidValue(String),

    /// I/O error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// Convert dicom-object errors
impl From<dicom_object::ReadError> for MammovizError {
    fn from(e: dicom_object::ReadError) -> Self {
        MammovizError::DicomError(format!("{}", e))
    }
}

impl From<dicom_object::WriteError> for MammovizError {
    fn from(e: dicom_object::WriteError) -> Self {
        MammovizError::DicomWriteError(format!("{}", e))
    }
}

impl From<dicom_object::WithMetaError> for MammovizError {
    fn from(e: dicom_object::WithMetaError) -> Self {
        MammovizError::DicomWriteError(format!("{}", e))
    }
}

impl From<dicom_pixeldata::Error> for MammovizError {
    fn from(e: dicom_pixeldata::Error) -> Self {
        MammovizError::PixelDataError(format!("{}", e))
    }
}

impl From<image::ImageError> for MammovizError {
    fn from(e: image::ImageError) -> Self {
        MammovizError::ImageError(format!("{}", e))
    }
}

impl From<serde_json::Error> for MammovizError {
    fn from(e: serde_json::Error) -> Self {
        MammovizError::MalformedManifest(format!("{}", e))
    }
}
