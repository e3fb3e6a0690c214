use crate::types::Laterality;
use dicom_object::InMemDicomObject;

use super::tags::{get_string_value, IMAGE_LATERALITY};

/// Extracts laterality from the ImageLaterality tag
///
/// Only the exact codes "L" and "R" are recognized. Files without the tag,
/// or with any other value (including "B" or "U"), yield `None`; there is
/// no fallback to the series-level Laterality tag or to frame sequences.
pub fn extract_laterality(dcm: &InMemDicomObject) -> Option<Laterality> {
    get_string_value(dcm, IMAGE_LATERALITY).and_then(|lat| Laterality::from_code(&lat))
}
