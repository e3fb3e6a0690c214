//! Heatmap compositing onto the original mammograms
//!
//! For every exam, view and file identifier in a manifest the benign and
//! malignant heatmaps are stacked into an RGB overlay, blended into the
//! view's crop window of the 8-bit normalized source image, and written as
//! a Secondary Capture named `SC_{view}.dcm`.

use crate::error::Result;
use crate::extraction::StudyIdentifiers;
use crate::imaging::{
    blend_window, decode_frame, load_heatmaps, to_rgb, HeatmapPair, BLEND_ALPHA,
};
use crate::manifest::{ExamEntry, ExamManifest};
use crate::secondary_capture::SecondaryCapture;
use crate::selection::ViewLocator;
use crate::types::MammogramView;
use dicom_object::open_file;
use image::{imageops, RgbImage};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

const BENIGN_FOLDER: &str = "heatmap_benign";
const MALIGNANT_FOLDER: &str = "heatmap_malignant";
const HEATMAP_EXTENSION: &str = "png";
const PROGRESS_TEMPLATE: &str = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} exams ({eta}) {msg}";

/// Options for the compositing step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompositeOptions {
    /// Overlay weight; the source keeps `1 - alpha`
    pub alpha: f32,
    /// Draw a progress bar over the exams on stderr
    pub show_progress: bool,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            alpha: BLEND_ALPHA,
            show_progress: false,
        }
    }
}

/// Layout of a heatmap folder
///
/// Heatmaps of file id `x` live at `heatmap_benign/x.png` and
/// `heatmap_malignant/x.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeatmapFolder {
    root: PathBuf,
}

impl HeatmapFolder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn benign(&self, file_id: &str) -> PathBuf {
        self.path(BENIGN_FOLDER, file_id)
    }

    pub fn malignant(&self, file_id: &str) -> PathBuf {
        self.path(MALIGNANT_FOLDER, file_id)
    }

    fn path(&self, folder: &str, file_id: &str) -> PathBuf {
        self.root
            .join(folder)
            .join(format!("{}.{}", file_id, HEATMAP_EXTENSION))
    }
}

/// One written Secondary Capture
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositedView {
    pub exam_index: usize,
    pub view: MammogramView,
    pub file_id: String,
    pub source: PathBuf,
    pub output: PathBuf,
}

/// Result of a composite run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompositeReport {
    pub outputs: Vec<CompositedView>,
}

/// Series description of the composited image of `view`
pub fn series_description(view: MammogramView) -> String {
    format!("Original {} + heatmap", view)
}

/// Output file name of the composited image of `view`
pub fn output_file_name(view: MammogramView) -> String {
    format!("SC_{}.dcm", view)
}

/// Builds the RGB overlay of a heatmap pair in the orientation of `view`
///
/// Right views get one more left-right flip on top of the alignment flip
/// applied while loading, matching the orientation of the stored film.
pub fn overlay_for_view(heatmaps: &HeatmapPair, view: MammogramView) -> RgbImage {
    let overlay = heatmaps.overlay();
    if view.is_right() {
        imageops::flip_horizontal(&overlay)
    } else {
        overlay
    }
}

/// Progress bar over `exams` exams, hidden unless `show` is set
pub fn exam_progress(exams: usize, show: bool) -> ProgressBar {
    if !show {
        return ProgressBar::hidden();
    }
    let progress = ProgressBar::new(exams as u64);
    match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
        Ok(style) => progress.set_style(style.progress_chars("#>-")),
        Err(e) => warn!("Invalid progress template: {}", e),
    }
    progress
}

/// Composites the heatmaps of one file id onto its source mammogram
pub fn composite_view(
    entry: &ExamEntry,
    view: MammogramView,
    file_id: &str,
    locator: &ViewLocator,
    heatmaps: &HeatmapFolder,
    output_folder: &Path,
    options: &CompositeOptions,
) -> Result<(PathBuf, PathBuf)> {
    let window = entry.window(view)?;

    let heatmap_pair = load_heatmaps(
        &heatmaps.benign(file_id),
        &heatmaps.malignant(file_id),
        view,
        entry.horizontal_flip,
    )?;
    let overlay = overlay_for_view(&heatmap_pair, view);

    let source = locator.find(view)?.to_path_buf();
    let dcm = open_file(&source)?;
    let identifiers = StudyIdentifiers::from_dicom(&dcm);
    let normalized = to_rgb(&decode_frame(&dcm)?.normalize_to_u8());

    debug!("{} [{}]: blending into {}", view, file_id, window);
    let composite = blend_window(&normalized, &overlay, window, options.alpha)?;

    let output = output_folder.join(output_file_name(view));
    SecondaryCapture::new(identifiers, series_description(view), composite)
        .write_to_file(&output)?;

    Ok((source, output))
}

/// Runs the compositing step over every exam of a manifest
///
/// Processing is sequential and stops at the first error.
pub fn convert_output_results(
    manifest: &ExamManifest,
    locator: &ViewLocator,
    heatmaps: &HeatmapFolder,
    output_folder: &Path,
    options: &CompositeOptions,
) -> Result<CompositeReport> {
    std::fs::create_dir_all(output_folder)?;

    let progress = exam_progress(manifest.exams.len(), options.show_progress);
    let mut report = CompositeReport::default();
    for (exam_index, entry) in manifest.exams.iter().enumerate() {
        progress.set_message(format!("exam {}", exam_index));
        for (view, file_ids) in entry.views() {
            for file_id in file_ids {
                let (source, output) = composite_view(
                    entry,
                    view,
                    file_id,
                    locator,
                    heatmaps,
                    output_folder,
                    options,
                )?;
                progress.suspend(|| info!("{} [{}] -> {}", view, file_id, output.display()));
                report.outputs.push(CompositedView {
                    exam_index,
                    view,
                    file_id: file_id.clone(),
                    source,
                    output,
                });
            }
        }
        progress.inc(1);
    }
    progress.finish_with_message(format!("{} overlay(s) written", report.outputs.len()));
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MammovizError;
    use crate::selection::ViewCandidate;
    use crate::types::{Laterality, ViewPosition, WindowLocation};
    use std::collections::BTreeMap;
    use tempfile::TempDir;

    const LEFT_MLO: MammogramView = MammogramView::new(Laterality::Left, ViewPosition::Mlo);

    #[test]
    fn test_heatmap_folder_layout() {
        let folder = HeatmapFolder::new("/data/heatmaps");
        assert_eq!(
            folder.benign("L_CC"),
            PathBuf::from("/data/heatmaps/heatmap_benign/L_CC.png")
        );
        assert_eq!(
            folder.malignant("0_R_MLO"),
            PathBuf::from("/data/heatmaps/heatmap_malignant/0_R_MLO.png")
        );
    }

    #[test]
    fn test_names() {
        assert_eq!(series_description(LEFT_MLO), "Original L-MLO + heatmap");
        assert_eq!(output_file_name(LEFT_MLO), "SC_L-MLO.dcm");
    }

    #[test]
    fn test_overlay_for_view_flips_right_only() {
        let benign = image::GrayImage::from_raw(2, 1, vec![1, 2]).unwrap();
        let malignant = image::GrayImage::from_raw(2, 1, vec![3, 4]).unwrap();
        let pair = HeatmapPair::new(malignant, benign).unwrap();

        let left = overlay_for_view(&pair, LEFT_MLO);
        assert_eq!(left.get_pixel(0, 0), &image::Rgb([1, 3, 0]));

        let right_view = MammogramView::new(Laterality::Right, ViewPosition::Mlo);
        let right = overlay_for_view(&pair, right_view);
        assert_eq!(right.get_pixel(0, 0), &image::Rgb([2, 4, 0]));
    }

    #[test]
    fn test_default_options() {
        let options = CompositeOptions::default();
        assert_eq!(options.alpha, 0.25);
        assert!(!options.show_progress);
    }

    #[test]
    fn test_exam_progress() {
        assert!(exam_progress(3, false).is_hidden());

        let progress = exam_progress(3, true);
        assert_eq!(progress.length(), Some(3));
        assert_eq!(progress.position(), 0);
    }

    #[test]
    fn test_missing_window_table_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let manifest = ExamManifest::new(vec![ExamEntry::single_exam()]);

        let err = convert_output_results(
            &manifest,
            &ViewLocator::default(),
            &HeatmapFolder::new(temp_dir.path()),
            temp_dir.path(),
            &CompositeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MammovizError::MalformedManifest(_)));
    }

    #[test]
    fn test_missing_heatmap_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut entry = ExamEntry::single_exam();
        entry.window_location = Some(
            crate::types::STANDARD_MAMMO_VIEWS
                .iter()
                .map(|v| (*v, vec![WindowLocation::new(0, 1, 0, 1)]))
                .collect::<BTreeMap<_, _>>(),
        );
        let locator = ViewLocator::new(vec![ViewCandidate::new("x.dcm".into(), Some(LEFT_MLO))]);

        let err = convert_output_results(
            &ExamManifest::new(vec![entry]),
            &locator,
            &HeatmapFolder::new(temp_dir.path()),
            temp_dir.path(),
            &CompositeOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, MammovizError::MissingHeatmapFile(_)));
    }
}
