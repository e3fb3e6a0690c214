use super::{Laterality, ViewPosition};
use crate::error::{MammovizError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Mammogram view combining laterality and view position
///
/// Displayed and serialized as the manifest key, e.g. `"L-CC"` or `"R-MLO"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MammogramView {
    pub laterality: Laterality,
    pub view: ViewPosition,
}

impl MammogramView {
    /// Creates a new MammogramView
    pub const fn new(laterality: Laterality, view: ViewPosition) -> Self {
        Self { laterality, view }
    }

    /// Returns the manifest key, e.g. `"L-MLO"`
    pub fn key(&self) -> String {
        format!("{}-{}", self.laterality.code(), self.view.code())
    }

    /// Returns the exported file stem, e.g. `"L_MLO"`
    pub fn file_stem(&self) -> String {
        format!("{}_{}", self.laterality.code(), self.view.code())
    }

    /// Checks if this is a right-side view
    pub fn is_right(&self) -> bool {
        self.laterality.is_right()
    }
}

impl fmt::Display for MammogramView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.laterality.code(), self.view.code())
    }
}

impl FromStr for MammogramView {
    type Err = MammovizError;

    /// Parses a manifest key by splitting on `-`
    fn from_str(s: &str) -> Result<Self> {
        let (lat, view) = s
            .split_once('-')
            .ok_or_else(|| MammovizError::InvalidValue(format!("not a view key: {s:?}")))?;
        let laterality = Laterality::from_code(lat)
            .ok_or_else(|| MammovizError::InvalidValue(format!("unknown laterality in {s:?}")))?;
        let view = ViewPosition::from_code(view)
            .ok_or_else(|| MammovizError::InvalidValue(format!("unknown view in {s:?}")))?;
        Ok(Self::new(laterality, view))
    }
}

impl TryFrom<String> for MammogramView {
    type Error = MammovizError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<MammogramView> for String {
    fn from(view: MammogramView) -> Self {
        view.key()
    }
}

/// Standard mammogram views (4 views for complete bilateral study)
pub const STANDARD_MAMMO_VIEWS: [MammogramView; 4] = [
    MammogramView::new(Laterality::Left, ViewPosition::Cc),
    MammogramView::new(Laterality::Right, ViewPosition::Cc),
    MammogramView::new(Laterality::Left, ViewPosition::Mlo),
    MammogramView::new(Laterality::Right, ViewPosition::Mlo),
];
