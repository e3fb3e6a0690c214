//! Exam manifest
//!
//! The manifest lists, per exam, the file identifiers of each standard view
//! and the crop windows their heatmaps cover. It is persisted as JSON:
//!
//! ```json
//! [
//!   {
//!     "horizontal_flip": "NO",
//!     "L-CC": ["L_CC"],
//!     "R-CC": ["R_CC"],
//!     "L-MLO": ["L_MLO"],
//!     "R-MLO": ["R_MLO"],
//!     "window_location": { "L-CC": [[0, 2440, 0, 3328]] }
//!   }
//! ]
//! ```
//!
//! Keys not listed here are ignored, so manifests enriched by the heatmap
//! generation step load unchanged.

use crate::error::{MammovizError, Result};
use crate::types::{
    HorizontalFlip, Laterality, MammogramView, ViewPosition, WindowLocation, STANDARD_MAMMO_VIEWS,
};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One exam: file identifiers per view plus overlay geometry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamEntry {
    /// Exam-level mirroring applied by the heatmap generation step
    pub horizontal_flip: HorizontalFlip,

    #[serde(rename = "L-CC")]
    pub l_cc: Vec<String>,

    #[serde(rename = "R-CC")]
    pub r_cc: Vec<String>,

    #[serde(rename = "L-MLO")]
    pub l_mlo: Vec<String>,

    #[serde(rename = "R-MLO")]
    pub r_mlo: Vec<String>,

    /// Crop windows per view; filled in by the heatmap generation step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_location: Option<BTreeMap<MammogramView, Vec<WindowLocation>>>,
}

impl ExamEntry {
    /// Builds the entry for a single exported exam
    ///
    /// Each standard view maps to the one-element list `[file_stem]`, the
    /// flip flag is `NO` and no windows are known yet.
    pub fn single_exam() -> Self {
        let stem = |laterality, view| vec![MammogramView::new(laterality, view).file_stem()];
        Self {
            horizontal_flip: HorizontalFlip::No,
            l_cc: stem(Laterality::Left, ViewPosition::Cc),
            r_cc: stem(Laterality::Right, ViewPosition::Cc),
            l_mlo: stem(Laterality::Left, ViewPosition::Mlo),
            r_mlo: stem(Laterality::Right, ViewPosition::Mlo),
            window_location: None,
        }
    }

    /// Returns the file identifiers recorded under `view`
    pub fn files(&self, view: MammogramView) -> &[String] {
        match (view.laterality, view.view) {
            (Laterality::Left, ViewPosition::Cc) => &self.l_cc,
            (Laterality::Right, ViewPosition::Cc) => &self.r_cc,
            (Laterality::Left, ViewPosition::Mlo) => &self.l_mlo,
            (Laterality::Right, ViewPosition::Mlo) => &self.r_mlo,
        }
    }

    /// Returns the crop window for `view`
    ///
    /// The first window listed for the view is used for every file of that
    /// view.
    ///
    /// # Errors
    ///
    /// [`MammovizError::MalformedManifest`] if the entry has no window table
    /// or the table has no window for `view`.
    pub fn window(&self, view: MammogramView) -> Result<WindowLocation> {
        let table = self.window_location.as_ref().ok_or_else(|| {
            MammovizError::MalformedManifest("missing key `window_location`".to_string())
        })?;
        table
            .get(&view)
            .and_then(|windows| windows.first())
            .copied()
            .ok_or_else(|| {
                MammovizError::MalformedManifest(format!("no window location for view {view}"))
            })
    }

    /// Iterates over `(view, file ids)` in standard view order
    pub fn views(&self) -> impl Iterator<Item = (MammogramView, &[String])> + '_ {
        STANDARD_MAMMO_VIEWS
            .iter()
            .map(move |view| (*view, self.files(*view)))
    }
}

/// Ordered list of exams
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExamManifest {
    pub exams: Vec<ExamEntry>,
}

impl ExamManifest {
    pub fn new(exams: Vec<ExamEntry>) -> Self {
        Self { exams }
    }

    /// Reads a manifest from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content).map_err(|e| {
            MammovizError::MalformedManifest(format!("{}: {}", path.display(), e))
        })?;
        debug!(
            "Loaded manifest {} with {} exam(s)",
            path.display(),
            manifest.exams.len()
        );
        Ok(manifest)
    }

    /// Writes the manifest as pretty-printed JSON, creating parent folders
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
