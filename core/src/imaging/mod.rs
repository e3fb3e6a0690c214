//! Pixel manipulation for export and heatmap compositing
//!
//! - [`PixelFrame`]: decoded monochrome frame with min-max normalization
//! - [`HeatmapPair`]: malignant/benign maps and their RGB overlay
//! - [`blend_window`]: copy-on-write alpha blend of an overlay into a crop

mod blend;
mod heatmap;
mod pixels;

pub use blend::{blend, blend_window, BLEND_ALPHA};
pub use heatmap::{load_heatmaps, HeatmapPair};
pub use pixels::{decode_frame, to_rgb, PixelFrame};
