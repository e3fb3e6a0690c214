use crate::error::{MammovizError, Result};
use crate::extraction::{extract_view, PIXEL_DATA};
use crate::types::MammogramView;
use dicom_object::{InMemDicomObject, OpenFileOptions};
use log::{debug, warn};
use std::path::{Path, PathBuf};

/// A candidate DICOM file and the standard view its tags describe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewCandidate {
    /// Path to the DICOM file
    pub path: PathBuf,

    /// Standard view from ImageLaterality/ViewPosition, if both matched
    pub view: Option<MammogramView>,
}

impl ViewCandidate {
    pub fn new(path: PathBuf, view: Option<MammogramView>) -> Self {
        Self { path, view }
    }

    /// Classifies an already-opened DICOM object
    pub fn from_dicom(path: PathBuf, dcm: &InMemDicomObject) -> Self {
        let view = extract_view(dcm);
        Self { path, view }
    }

    /// Reads the header of a DICOM file (up to pixel data) and classifies it
    pub fn from_file(path: PathBuf) -> Result<Self> {
        let dcm = OpenFileOptions::new()
            .read_until(PIXEL_DATA)
            .open_file(&path)?;
        Ok(Self::from_dicom(path, &dcm))
    }
}

/// Finds the DICOM file holding a requested standard view
///
/// Candidates are injected by the caller; the locator itself never walks
/// the filesystem. Lookups return the first candidate, in the order given,
/// whose laterality and view position match exactly. Duplicates are not
/// reported.
#[derive(Debug, Clone, Default)]
pub struct ViewLocator {
    candidates: Vec<ViewCandidate>,
}

impl ViewLocator {
    /// Creates a locator over pre-classified candidates
    pub fn new(candidates: Vec<ViewCandidate>) -> Self {
        Self { candidates }
    }

    /// Reads and classifies each file once
    ///
    /// Files that cannot be parsed as DICOM are logged and kept as
    /// candidates that never match.
    pub fn scan<I>(paths: I) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let candidates = paths
            .into_iter()
            .map(|path| match ViewCandidate::from_file(path.clone()) {
                Ok(candidate) => {
                    match candidate.view {
                        Some(view) => debug!("{}: {}", path.display(), view),
                        None => debug!("{}: not a standard view", path.display()),
                    }
                    candidate
                }
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    ViewCandidate::new(path, None)
                }
            })
            .collect();
        Self { candidates }
    }

    /// Returns the candidates in lookup order
    pub fn candidates(&self) -> &[ViewCandidate] {
        &self.candidates
    }

    /// Returns the first file matching `view`
    ///
    /// # Errors
    ///
    /// [`MammovizError::MissingView`] when no candidate matches.
    pub fn find(&self, view: MammogramView) -> Result<&Path> {
        self.candidates
            .iter()
            .find(|candidate| candidate.view == Some(view))
            .map(|candidate| candidate.path.as_path())
            .ok_or(MammovizError::MissingView(view))
    }
}
