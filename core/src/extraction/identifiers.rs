use dicom_object::InMemDicomObject;

use super::tags::{
    get_string_value, ACCESSION_NUMBER, PATIENT_ID, PATIENT_NAME, STUDY_DATE, STUDY_DESCRIPTION,
    STUDY_ID, STUDY_INSTANCE_UID, STUDY_TIME,
};

/// Patient and study attributes carried over to derived objects
///
/// Absent attributes are kept as empty strings so they are written as
/// present-but-empty elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudyIdentifiers {
    pub patient_name: String,
    pub patient_id: String,
    pub accession_number: String,
    pub study_id: String,
    pub study_instance_uid: String,
    pub study_date: String,
    pub study_time: String,
    pub study_description: String,
}

impl StudyIdentifiers {
    /// Copies the identifying attributes of a source DICOM object
    pub fn from_dicom(dcm: &InMemDicomObject) -> Self {
        let get = |tag| get_string_value(dcm, tag).unwrap_or_default();
        Self {
            patient_name: get(PATIENT_NAME),
            patient_id: get(PATIENT_ID),
            accession_number: get(ACCESSION_NUMBER),
            study_id: get(STUDY_ID),
            study_instance_uid: get(STUDY_INSTANCE_UID),
            study_date: get(STUDY_DATE),
            study_time: get(STUDY_TIME),
            study_description: get(STUDY_DESCRIPTION),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dicom_core::value::PrimitiveValue;
    use dicom_core::{DataElement, VR};

    #[test]
    fn test_from_dicom_copies_attributes() {
        let dcm = InMemDicomObject::from_element_iter([
            DataElement::new(PATIENT_NAME, VR::PN, PrimitiveValue::from("DOE^JANE")),
            DataElement::new(PATIENT_ID, VR::LO, PrimitiveValue::from("12345")),
            DataElement::new(STUDY_TIME, VR::TM, PrimitiveValue::from("101500")),
            DataElement::new(
                STUDY_DESCRIPTION,
                VR::LO,
                PrimitiveValue::from("Screening"),
            ),
        ]);

        let ids = StudyIdentifiers::from_dicom(&dcm);
        assert_eq!(ids.patient_name, "DOE^JANE");
        assert_eq!(ids.patient_id, "12345");
        assert_eq!(ids.study_time, "101500");
        assert_eq!(ids.study_description, "Screening");
    }

    #[test]
    fn test_missing_attributes_are_empty() {
        let ids = StudyIdentifiers::from_dicom(&InMemDicomObject::new_empty());
        assert_eq!(ids, StudyIdentifiers::default());
    }
}
