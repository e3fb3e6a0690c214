use crate::error::{MammovizError, Result};
use crate::extraction::{get_u16_value, COLUMNS, ROWS};
use dicom_object::DefaultDicomObject;
use dicom_pixeldata::{ConvertOptions, ModalityLutOption, PixelDecoder};
use image::{GrayImage, ImageBuffer, Luma, Rgb, RgbImage};

/// Single-channel pixel values of one decoded frame, row-major
#[derive(Debug, Clone, PartialEq)]
pub struct PixelFrame {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl PixelFrame {
    /// Wraps row-major values of a `width` x `height` frame
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> Result<Self> {
        if values.len() != width as usize * height as usize {
            return Err(MammovizError::PixelDataError(format!(
                "{} values do not fill a {}x{} frame",
                values.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Returns `(min, max)` over the whole frame
    pub fn value_range(&self) -> Option<(f32, f32)> {
        self.values.iter().fold(None, |acc, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    }

    /// Min-max scales the whole frame to `[0, 255]`
    ///
    /// Scaled values are truncated, not rounded. A frame with a single
    /// distinct value maps to all zeros.
    pub fn normalize_to_u8(&self) -> GrayImage {
        let (min, max) = self.value_range().unwrap_or((0.0, 0.0));
        let range = f64::from(max) - f64::from(min);
        let bytes = self
            .values
            .iter()
            .map(|&v| {
                if range > 0.0 {
                    ((f64::from(v) - f64::from(min)) / range * 255.0) as u8
                } else {
                    0
                }
            })
            .collect();
        // Length was checked on construction
        GrayImage::from_raw(self.width, self.height, bytes).unwrap_or_default()
    }

    /// Clamps the stored values into 16-bit luminance without rescaling
    pub fn to_u16(&self) -> ImageBuffer<Luma<u16>, Vec<u16>> {
        let words = self
            .values
            .iter()
            .map(|&v| v.round().clamp(0.0, f32::from(u16::MAX)) as u16)
            .collect();
        ImageBuffer::from_raw(self.width, self.height, words).unwrap_or_default()
    }
}

/// Decodes the first frame of a DICOM object's pixel data
///
/// Only the first sample of each pixel is kept; mammograms are
/// monochrome. Values are the stored values: no modality LUT
/// (rescale slope and intercept) is applied.
pub fn decode_frame(dcm: &DefaultDicomObject) -> Result<PixelFrame> {
    let decoded = dcm.decode_pixel_data()?;
    let (rows, columns) = (decoded.rows(), decoded.columns());

    let header = (get_u16_value(dcm, ROWS), get_u16_value(dcm, COLUMNS));
    if let (Some(header_rows), Some(header_columns)) = header {
        if (u32::from(header_columns), u32::from(header_rows)) != (columns, rows) {
            return Err(MammovizError::DimensionMismatch {
                expected: (u32::from(header_columns), u32::from(header_rows)),
                actual: (columns, rows),
            });
        }
    }

    let options = ConvertOptions::new().with_modality_lut(ModalityLutOption::None);
    let samples = usize::from(decoded.samples_per_pixel().max(1));
    let values = decoded
        .to_vec_frame_with_options::<f32>(0, &options)?
        .into_iter()
        .step_by(samples)
        .collect();

    PixelFrame::new(columns, rows, values)
}

/// Replicates a grayscale image into three identical channels
pub fn to_rgb(gray: &GrayImage) -> RgbImage {
    RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
        let v = gray.get_pixel(x, y)[0];
        Rgb([v, v, v])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::tags::*;
    use dicom_core::{DataElement, PrimitiveValue, VR};
    use dicom_dictionary_std::uids;
    use dicom_object::{FileMetaTableBuilder, InMemDicomObject};

    /// 3x2 MONOCHROME2 16-bit object with a CT-style rescale
    fn rescaled_dicom() -> DefaultDicomObject {
        let mut dcm = InMemDicomObject::new_empty();
        dcm.put(DataElement::new(
            PHOTOMETRIC_INTERPRETATION,
            VR::CS,
            PrimitiveValue::from("MONOCHROME2"),
        ));
        for (tag, value) in [
            (SAMPLES_PER_PIXEL, 1_u16),
            (ROWS, 2),
            (COLUMNS, 3),
            (BITS_ALLOCATED, 16),
            (BITS_STORED, 16),
            (HIGH_BIT, 15),
            (PIXEL_REPRESENTATION, 0),
        ] {
            dcm.put(DataElement::new(tag, VR::US, PrimitiveValue::from(value)));
        }
        dcm.put(DataElement::new(RESCALE_INTERCEPT, VR::DS, PrimitiveValue::from("-1024")));
        dcm.put(DataElement::new(RESCALE_SLOPE, VR::DS, PrimitiveValue::from("1")));
        dcm.put(DataElement::new(
            PIXEL_DATA,
            VR::OW,
            PrimitiveValue::U16(vec![0_u16, 500, 1000, 1500, 2000, 4095].into()),
        ));
        dcm.with_meta(
            FileMetaTableBuilder::new()
                .transfer_syntax(uids::EXPLICIT_VR_LITTLE_ENDIAN)
                .media_storage_sop_class_uid(uids::DIGITAL_MAMMOGRAPHY_X_RAY_IMAGE_STORAGE_FOR_PRESENTATION)
                .media_storage_sop_instance_uid("2.25.1"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_frame_keeps_stored_values() {
        let frame = decode_frame(&rescaled_dicom()).unwrap();

        assert_eq!(frame.dimensions(), (3, 2));
        // RescaleIntercept of -1024 is not applied
        assert_eq!(frame.values(), &[0.0, 500.0, 1000.0, 1500.0, 2000.0, 4095.0]);
        assert_eq!(frame.to_u16().get_pixel(1, 0)[0], 500);
    }

    #[test]
    fn test_normalize_midpoint() {
        let frame = PixelFrame::new(3, 1, vec![10.0, 60.0, 110.0]).unwrap();
        let gray = frame.normalize_to_u8();

        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert!((i32::from(gray.get_pixel(1, 0)[0]) - 127).abs() <= 1);
        assert_eq!(gray.get_pixel(2, 0)[0], 255);
    }

    #[test]
    fn test_normalize_uses_whole_frame() {
        // The range comes from every pixel, not a sub-region
        let frame = PixelFrame::new(2, 2, vec![0.0, 1000.0, 500.0, 500.0]).unwrap();
        let gray = frame.normalize_to_u8();
        assert_eq!(gray.get_pixel(0, 1)[0], 127);
        assert_eq!(gray.get_pixel(1, 1)[0], 127);
    }

    #[test]
    fn test_normalize_constant_frame() {
        let frame = PixelFrame::new(2, 1, vec![42.0, 42.0]).unwrap();
        let gray = frame.normalize_to_u8();
        assert_eq!(gray.as_raw(), &vec![0, 0]);
    }

    #[test]
    fn test_frame_length_checked() {
        assert!(PixelFrame::new(2, 2, vec![0.0; 3]).is_err());
    }

    #[test]
    fn test_to_u16_clamps() {
        let frame = PixelFrame::new(3, 1, vec![-5.0, 4095.0, 70000.0]).unwrap();
        assert_eq!(frame.to_u16().as_raw(), &vec![0, 4095, u16::MAX]);
    }

    #[test]
    fn test_to_rgb_replicates_channel() {
        let gray = GrayImage::from_raw(2, 1, vec![7, 200]).unwrap();
        let rgb = to_rgb(&gray);
        assert_eq!(rgb.get_pixel(0, 0), &Rgb([7, 7, 7]));
        assert_eq!(rgb.get_pixel(1, 0), &Rgb([200, 200, 200]));
    }
}
