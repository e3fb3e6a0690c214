//! Secondary Capture output objects
//!
//! A Secondary Capture (SC) image carries derived pixel data, here the
//! mammogram with its heatmap overlay, together with the patient and study
//! attributes of the image it was derived from.

use crate::error::{MammovizError, Result};
use crate::extraction::tags::*;
use crate::extraction::StudyIdentifiers;
use dicom_core::value::PrimitiveValue;
use dicom_core::{DataElement, Tag, VR};
use dicom_dictionary_std::uids;
use dicom_object::{FileDicomObject, FileMetaTableBuilder, InMemDicomObject};
use image::RgbImage;
use log::debug;
use std::path::Path;
use uuid::Uuid;

/// Modality of derived images with no acquisition modality
const MODALITY_OTHER: &str = "OT";

/// ConversionType for images produced by a workstation
const CONVERSION_WORKSTATION: &str = "WSD";

/// Generates a DICOM UID under the `2.25` UUID-derived root
pub fn generate_uid() -> String {
    format!("2.25.{}", Uuid::new_v4().as_u128())
}

/// An RGB Secondary Capture image ready to be written as a DICOM file
#[derive(Debug, Clone)]
pub struct SecondaryCapture {
    pub identifiers: StudyIdentifiers,
    pub series_description: String,
    pub image: RgbImage,
    pub sop_instance_uid: String,
    pub series_instance_uid: String,
}

impl SecondaryCapture {
    /// Creates a Secondary Capture with fresh SOP and series instance UIDs
    pub fn new(
        identifiers: StudyIdentifiers,
        series_description: impl Into<String>,
        image: RgbImage,
    ) -> Self {
        Self {
            identifiers,
            series_description: series_description.into(),
            image,
            sop_instance_uid: generate_uid(),
            series_instance_uid: generate_uid(),
        }
    }

    /// Builds the data set (without file meta information)
    ///
    /// If the source had no StudyInstanceUID a new one is generated so the
    /// object stays referenceable.
    pub fn to_dicom(&self) -> Result<InMemDicomObject> {
        let rows = dimension_to_u16(self.image.height(), "rows")?;
        let columns = dimension_to_u16(self.image.width(), "columns")?;
        let ids = &self.identifiers;
        let study_instance_uid = if ids.study_instance_uid.is_empty() {
            generate_uid()
        } else {
            ids.study_instance_uid.clone()
        };

        let mut dcm = InMemDicomObject::new_empty();

        // SOP Common
        put_str(&mut dcm, SPECIFIC_CHARACTER_SET, VR::CS, "ISO_IR 192");
        dcm.put(DataElement::new(
            IMAGE_TYPE,
            VR::CS,
            PrimitiveValue::Strs(vec!["DERIVED".to_string(), "SECONDARY".to_string()].into()),
        ));
        put_str(
            &mut dcm,
            SOP_CLASS_UID,
            VR::UI,
            uids::SECONDARY_CAPTURE_IMAGE_STORAGE,
        );
        put_str(&mut dcm, SOP_INSTANCE_UID, VR::UI, &self.sop_instance_uid);

        // Patient and study, copied from the source
        put_str(&mut dcm, PATIENT_NAME, VR::PN, &ids.patient_name);
        put_str(&mut dcm, PATIENT_ID, VR::LO, &ids.patient_id);
        put_str(&mut dcm, ACCESSION_NUMBER, VR::SH, &ids.accession_number);
        put_str(&mut dcm, STUDY_ID, VR::SH, &ids.study_id);
        put_str(&mut dcm, STUDY_INSTANCE_UID, VR::UI, &study_instance_uid);
        put_str(&mut dcm, STUDY_DATE, VR::DA, &ids.study_date);
        put_str(&mut dcm, STUDY_TIME, VR::TM, &ids.study_time);
        put_str(&mut dcm, STUDY_DESCRIPTION, VR::LO, &ids.study_description);

        // Series and equipment
        put_str(&mut dcm, MODALITY, VR::CS, MODALITY_OTHER);
        put_str(&mut dcm, SERIES_INSTANCE_UID, VR::UI, &self.series_instance_uid);
        put_str(&mut dcm, SERIES_NUMBER, VR::IS, "1");
        put_str(&mut dcm, SERIES_DESCRIPTION, VR::LO, &self.series_description);
        put_str(&mut dcm, CONVERSION_TYPE, VR::CS, CONVERSION_WORKSTATION);
        put_str(&mut dcm, INSTANCE_NUMBER, VR::IS, "1");

        // Image pixel module: 8-bit interleaved RGB
        put_u16(&mut dcm, SAMPLES_PER_PIXEL, 3);
        put_str(&mut dcm, PHOTOMETRIC_INTERPRETATION, VR::CS, "RGB");
        put_u16(&mut dcm, PLANAR_CONFIGURATION, 0);
        put_u16(&mut dcm, ROWS, rows);
        put_u16(&mut dcm, COLUMNS, columns);
        put_u16(&mut dcm, BITS_ALLOCATED, 8);
        put_u16(&mut dcm, BITS_STORED, 8);
        put_u16(&mut dcm, HIGH_BIT, 7);
        put_u16(&mut dcm, PIXEL_REPRESENTATION, 0);
        dcm.put(DataElement::new(
            PIXEL_DATA,
            VR::OB,
            PrimitiveValue::from(self.image.as_raw().clone()),
        ));

        Ok(dcm)
    }

    /// Wraps the data set with explicit VR little endian file meta information
    pub fn to_file_object(&self) -> Result<FileDicomObject<InMemDicomObject>> {
        let meta = FileMetaTableBuilder::new()
            .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
            .media_storage_sop_class_uid(uids::SECONDARY_CAPTURE_IMAGE_STORAGE)
            .media_storage_sop_instance_uid(self.sop_instance_uid.as_str());
        Ok(self.to_dicom()?.with_meta(meta)?)
    }

    /// Writes the object as a DICOM Part 10 file
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let file = self.to_file_object()?;
        file.write_to_file(path)?;
        debug!(
            "Wrote secondary capture {} ({}x{}) to {}",
            self.sop_instance_uid,
            self.image.width(),
            self.image.height(),
            path.display()
        );
        Ok(())
    }
}

fn put_str(dcm: &mut InMemDicomObject, tag: Tag, vr: VR, value: &str) {
    let value = if value.is_empty() {
        PrimitiveValue::Empty
    } else {
        PrimitiveValue::from(value)
    };
    dcm.put(DataElement::new(tag, vr, value));
}

fn put_u16(dcm: &mut InMemDicomObject, tag: Tag, value: u16) {
    dcm.put(DataElement::new(tag, VR::US, PrimitiveValue::from(value)));
}

fn dimension_to_u16(value: u32, name: &str) -> Result<u16> {
    u16::try_from(value).map_err(|_| {
        MammovizError::InvalidValue(format!("{} {} exceeds the DICOM limit", value, name))
    })
}
