use crate::error::{MammovizError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Crop region of the original pixel array that a heatmap covers
///
/// Serialized as `[row_start, row_end, col_start, col_end]` with exclusive
/// end bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct WindowLocation {
    pub row_start: u32,
    pub row_end: u32,
    pub col_start: u32,
    pub col_end: u32,
}

impl WindowLocation {
    pub fn new(row_start: u32, row_end: u32, col_start: u32, col_end: u32) -> Self {
        Self {
            row_start,
            row_end,
            col_start,
            col_end,
        }
    }

    /// Window height in rows
    pub fn height(&self) -> u32 {
        self.row_end.saturating_sub(self.row_start)
    }

    /// Window width in columns
    pub fn width(&self) -> u32 {
        self.col_end.saturating_sub(self.col_start)
    }

    /// Checks that the window is well-ordered and fits an image of the
    /// given size
    pub fn validate(&self, width: u32, height: u32) -> Result<()> {
        if self.row_start > self.row_end || self.col_start > self.col_end {
            return Err(MammovizError::InvalidWindow(format!(
                "{self} has start after end"
            )));
        }
        if self.row_end > height || self.col_end > width {
            return Err(MammovizError::InvalidWindow(format!(
                "{self} exceeds image of {width}x{height}"
            )));
        }
        Ok(())
    }
}

impl From<[u32; 4]> for WindowLocation {
    fn from(c: [u32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<WindowLocation> for [u32; 4] {
    fn from(w: WindowLocation) -> Self {
        [w.row_start, w.row_end, w.col_start, w.col_end]
    }
}

impl fmt::Display for WindowLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..{}, cols {}..{}",
            self.row_start, self.row_end, self.col_start, self.col_end
        )
    }
}
