//! Core type definitions for mammogram views and overlay geometry
//!
//! - [`Laterality`]: Breast laterality (Left, Right)
//! - [`ViewPosition`]: Standard view positions (CC, MLO)
//! - [`MammogramView`]: Combined laterality and view position, keyed like `"L-CC"`
//! - [`HorizontalFlip`]: Exam-level mirroring flag of the heatmap step
//! - [`WindowLocation`]: Crop rectangle a heatmap overlay applies to

mod enums;
mod view;
mod window;

pub use enums::{HorizontalFlip, Laterality, ViewPosition};
pub use view::{MammogramView, STANDARD_MAMMO_VIEWS};
pub use window::WindowLocation;
