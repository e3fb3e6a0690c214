use crate::error::{MammovizError, Result};
use crate::types::{HorizontalFlip, MammogramView};
use image::imageops;
use image::{GrayImage, Rgb, RgbImage};
use log::debug;
use std::path::Path;

/// Malignant and benign probability maps of one image
///
/// Both maps share the same dimensions.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapPair {
    pub malignant: GrayImage,
    pub benign: GrayImage,
}

impl HeatmapPair {
    pub fn new(malignant: GrayImage, benign: GrayImage) -> Result<Self> {
        if malignant.dimensions() != benign.dimensions() {
            return Err(MammovizError::DimensionMismatch {
                expected: malignant.dimensions(),
                actual: benign.dimensions(),
            });
        }
        Ok(Self { malignant, benign })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.malignant.dimensions()
    }

    /// Mirrors both maps left-right
    pub fn flipped(&self) -> Self {
        Self {
            malignant: imageops::flip_horizontal(&self.malignant),
            benign: imageops::flip_horizontal(&self.benign),
        }
    }

    /// Stacks the maps into an RGB overlay: red = benign, green = malignant,
    /// blue = 0
    pub fn overlay(&self) -> RgbImage {
        let (width, height) = self.dimensions();
        RgbImage::from_fn(width, height, |x, y| {
            Rgb([
                self.benign.get_pixel(x, y)[0],
                self.malignant.get_pixel(x, y)[0],
                0,
            ])
        })
    }
}

/// Loads the benign and malignant heatmaps of one image
///
/// Both maps are mirrored when the exam flag and the view's laterality
/// call for it (see [`HorizontalFlip::requires_flip`]), undoing the
/// mirroring done before heatmap generation.
///
/// # Errors
///
/// [`MammovizError::MissingHeatmapFile`] if either PNG is absent.
pub fn load_heatmaps(
    benign_path: &Path,
    malignant_path: &Path,
    view: MammogramView,
    horizontal_flip: HorizontalFlip,
) -> Result<HeatmapPair> {
    let benign = load_heatmap(benign_path)?;
    let malignant = load_heatmap(malignant_path)?;
    let pair = HeatmapPair::new(malignant, benign)?;

    if horizontal_flip.requires_flip(view.laterality) {
        debug!("Flipping heatmaps of {} (horizontal_flip={})", view, horizontal_flip);
        Ok(pair.flipped())
    } else {
        Ok(pair)
    }
}

fn load_heatmap(path: &Path) -> Result<GrayImage> {
    if !path.is_file() {
        return Err(MammovizError::MissingHeatmapFile(path.to_path_buf()));
    }
    Ok(image::open(path)?.to_luma8())
}
