//! DICOM to PNG export of the four standard views

use crate::error::Result;
use crate::imaging::decode_frame;
use crate::manifest::{ExamEntry, ExamManifest};
use crate::selection::ViewLocator;
use crate::types::{MammogramView, STANDARD_MAMMO_VIEWS};
use dicom_object::open_file;
use log::info;
use std::path::{Path, PathBuf};

/// Bit depth of exported PNGs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BitDepth {
    /// Min-max normalized 8-bit grayscale
    #[default]
    Eight,
    /// Raw stored values as 16-bit grayscale
    Sixteen,
}

/// One exported view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedView {
    pub view: MammogramView,
    pub source: PathBuf,
    pub png: PathBuf,
}

/// Result of a prepare run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReport {
    pub views: Vec<ExportedView>,
    pub manifest_path: PathBuf,
}

/// Rasterizes one DICOM file to a grayscale PNG
pub fn export_png(source: &Path, png: &Path, bit_depth: BitDepth) -> Result<()> {
    let dcm = open_file(source)?;
    let frame = decode_frame(&dcm)?;
    match bit_depth {
        BitDepth::Eight => frame.normalize_to_u8().save(png)?,
        BitDepth::Sixteen => frame.to_u16().save(png)?,
    }
    Ok(())
}

/// Exports the four standard views as `{L}_{V}.png` into `output_folder`
///
/// Every view is located before anything is written, so a missing view
/// aborts the run without partial output.
///
/// # Errors
///
/// [`MissingView`](crate::MammovizError::MissingView) if any standard view
/// has no matching file.
pub fn export_views(
    locator: &ViewLocator,
    output_folder: &Path,
    bit_depth: BitDepth,
) -> Result<Vec<ExportedView>> {
    let sources = STANDARD_MAMMO_VIEWS
        .iter()
        .map(|view| Ok((*view, locator.find(*view)?.to_path_buf())))
        .collect::<Result<Vec<_>>>()?;

    std::fs::create_dir_all(output_folder)?;

    let mut exported = Vec::with_capacity(sources.len());
    for (view, source) in sources {
        let png = output_folder.join(format!("{}.png", view.file_stem()));
        export_png(&source, &png, bit_depth)?;
        info!("{}: {} -> {}", view, source.display(), png.display());
        exported.push(ExportedView { view, source, png });
    }
    Ok(exported)
}

/// Exports the standard views and writes a single-exam manifest
///
/// The manifest is written only after all four PNGs were saved.
pub fn prepare_dicom_images(
    locator: &ViewLocator,
    output_folder: &Path,
    exam_list_path: &Path,
    bit_depth: BitDepth,
) -> Result<ExportReport> {
    let views = export_views(locator, output_folder, bit_depth)?;

    let manifest = ExamManifest::new(vec![ExamEntry::single_exam()]);
    manifest.save(exam_list_path)?;
    info!("Wrote exam list to {}", exam_list_path.display());

    Ok(ExportReport {
        views,
        manifest_path: exam_list_path.to_path_buf(),
    })
}
