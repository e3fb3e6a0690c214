use crate::types::{MammogramView, ViewPosition};
use dicom_object::InMemDicomObject;

use super::laterality::extract_laterality;
use super::tags::{get_string_value, VIEW_POSITION as VIEW_POSITION_TAG};

/// Extracts the view position from the ViewPosition tag
///
/// Exact match on "CC" or "MLO"; other projections (ML, XCCL, ...) and
/// missing tags yield `None`.
pub fn extract_view_position(dcm: &InMemDicomObject) -> Option<ViewPosition> {
    get_string_value(dcm, VIEW_POSITION_TAG).and_then(|vp| ViewPosition::from_code(&vp))
}

/// Classifies a DICOM object as one of the four standard views
///
/// Returns `None` unless both ImageLaterality and ViewPosition hold a
/// standard code.
pub fn extract_view(dcm: &InMemDicomObject) -> Option<MammogramView> {
    Some(MammogramView::new(
        extract_laterality(dcm)?,
        extract_view_position(dcm)?,
    ))
}
