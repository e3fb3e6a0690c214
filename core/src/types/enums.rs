use serde::{Deserialize, Serialize};
use std::fmt;

/// Breast laterality of a standard mammogram view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Laterality {
    Left,
    Right,
}

impl Laterality {
    /// Returns the DICOM ImageLaterality code ("L" or "R")
    pub fn code(&self) -> &'static str {
        match self {
            Laterality::Left => "L",
            Laterality::Right => "R",
        }
    }

    /// Returns simple name for display
    pub fn simple_name(&self) -> &'static str {
        match self {
            Laterality::Left => "left",
            Laterality::Right => "right",
        }
    }

    /// Parses a DICOM laterality code
    ///
    /// Only the exact codes "L" and "R" are accepted (surrounding
    /// whitespace is ignored). Anything else yields `None`.
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "L" => Some(Laterality::Left),
            "R" => Some(Laterality::Right),
            _ => None,
        }
    }

    /// Returns whether this is the right breast
    pub fn is_right(&self) -> bool {
        matches!(self, Laterality::Right)
    }

    /// Returns whether this is the left breast
    pub fn is_left(&self) -> bool {
        matches!(self, Laterality::Left)
    }
}

impl fmt::Display for Laterality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Standard mammography view position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ViewPosition {
    Cc,  // Cranio-caudal
    Mlo, // Medio-lateral oblique
}

impl ViewPosition {
    /// Returns the DICOM ViewPosition code ("CC" or "MLO")
    pub fn code(&self) -> &'static str {
        match self {
            ViewPosition::Cc => "CC",
            ViewPosition::Mlo => "MLO",
        }
    }

    /// Parses a DICOM view position code
    ///
    /// Exact match only: "CC" or "MLO".
    pub fn from_code(s: &str) -> Option<Self> {
        match s.trim() {
            "CC" => Some(ViewPosition::Cc),
            "MLO" => Some(ViewPosition::Mlo),
            _ => None,
        }
    }
}

impl fmt::Display for ViewPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Whether the heatmap-generation step mirrored the exam horizontally
///
/// Stored in the manifest as `"YES"` / `"NO"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HorizontalFlip {
    Yes,
    #[default]
    No,
}

impl HorizontalFlip {
    /// Returns whether images of `laterality` must be mirrored to line up
    /// with heatmaps produced under this flag
    ///
    /// With no exam-level flip the right side is mirrored, with an
    /// exam-level flip the left side is.
    pub fn requires_flip(&self, laterality: Laterality) -> bool {
        match self {
            HorizontalFlip::No => laterality.is_right(),
            HorizontalFlip::Yes => laterality.is_left(),
        }
    }
}

impl fmt::Display for HorizontalFlip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HorizontalFlip::Yes => write!(f, "YES"),
            HorizontalFlip::No => write!(f, "NO"),
        }
    }
}
