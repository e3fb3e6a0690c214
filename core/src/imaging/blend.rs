use crate::error::{MammovizError, Result};
use crate::types::WindowLocation;
use image::imageops;
use image::{GenericImage, Rgb, RgbImage};

/// Overlay weight used when compositing heatmaps onto mammograms
pub const BLEND_ALPHA: f32 = 0.25;

/// Alpha-blends `fg` over `bg`: `bg + alpha * (fg - bg)`
///
/// Results are truncated toward zero and clamped to `[0, 255]`.
pub fn blend(bg: &RgbImage, fg: &RgbImage, alpha: f32) -> Result<RgbImage> {
    if bg.dimensions() != fg.dimensions() {
        return Err(MammovizError::DimensionMismatch {
            expected: bg.dimensions(),
            actual: fg.dimensions(),
        });
    }

    let mix = |b: u8, f: u8| -> u8 {
        let v = f32::from(b) + alpha * (f32::from(f) - f32::from(b));
        v.clamp(0.0, 255.0) as u8
    };

    Ok(RgbImage::from_fn(bg.width(), bg.height(), |x, y| {
        let Rgb(b) = *bg.get_pixel(x, y);
        let Rgb(f) = *fg.get_pixel(x, y);
        Rgb([mix(b[0], f[0]), mix(b[1], f[1]), mix(b[2], f[2])])
    }))
}

/// Blends `overlay` into the `window` region of `image`
///
/// Returns a new image; `image` itself is not modified. Pixels outside the
/// window are copied unchanged.
///
/// # Errors
///
/// - [`MammovizError::InvalidWindow`] if the window does not fit `image`
/// - [`MammovizError::DimensionMismatch`] if `overlay` is not window-sized
pub fn blend_window(
    image: &RgbImage,
    overlay: &RgbImage,
    window: WindowLocation,
    alpha: f32,
) -> Result<RgbImage> {
    window.validate(image.width(), image.height())?;
    let window_size = (window.width(), window.height());
    if overlay.dimensions() != window_size {
        return Err(MammovizError::DimensionMismatch {
            expected: window_size,
            actual: overlay.dimensions(),
        });
    }

    let crop = imageops::crop_imm(
        image,
        window.col_start,
        window.row_start,
        window.width(),
        window.height(),
    )
    .to_image();
    let blended = blend(&crop, overlay, alpha)?;

    let mut composite = image.clone();
    composite.copy_from(&blended, window.col_start, window.row_start)?;
    Ok(composite)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform(width: u32, height: u32, value: u8) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb([value, value, value]))
    }

    #[test]
    fn test_blend_quarter_weight() {
        let blended = blend(&uniform(4, 4, 100), &uniform(4, 4, 200), BLEND_ALPHA).unwrap();
        assert!(blended.pixels().all(|p| *p == Rgb([125, 125, 125])));
    }

    #[test]
    fn test_blend_extremes() {
        let bg = uniform(1, 1, 40);
        let fg = uniform(1, 1, 240);
        assert_eq!(blend(&bg, &fg, 0.0).unwrap().get_pixel(0, 0), &Rgb([40, 40, 40]));
        assert_eq!(blend(&bg, &fg, 1.0).unwrap().get_pixel(0, 0), &Rgb([240, 240, 240]));
    }

    #[test]
    fn test_blend_truncates() {
        // 0.5 and 126.75 both drop their fraction
        let blended = blend(&uniform(1, 1, 0), &uniform(1, 1, 2), BLEND_ALPHA).unwrap();
        assert_eq!(blended.get_pixel(0, 0), &Rgb([0, 0, 0]));

        let blended = blend(&uniform(1, 1, 127), &uniform(1, 1, 126), BLEND_ALPHA).unwrap();
        assert_eq!(blended.get_pixel(0, 0), &Rgb([126, 126, 126]));
    }

    #[test]
    fn test_blend_dimension_mismatch() {
        assert!(blend(&uniform(2, 2, 0), &uniform(2, 3, 0), BLEND_ALPHA).is_err());
    }

    #[test]
    fn test_blend_window_only_touches_window() {
        let image = uniform(6, 4, 100);
        let overlay = uniform(3, 2, 200);
        let window = WindowLocation::new(1, 3, 2, 5);

        let composite = blend_window(&image, &overlay, window, BLEND_ALPHA).unwrap();

        for (x, y, pixel) in composite.enumerate_pixels() {
            let inside = (1..3).contains(&y) && (2..5).contains(&x);
            let expected = if inside { 125 } else { 100 };
            assert_eq!(pixel, &Rgb([expected; 3]), "pixel ({x}, {y})");
        }
        // Source left untouched
        assert!(image.pixels().all(|p| *p == Rgb([100, 100, 100])));
    }

    #[test]
    fn test_blend_window_out_of_bounds() {
        let image = uniform(4, 4, 0);
        let overlay = uniform(2, 2, 0);
        let result = blend_window(&image, &overlay, WindowLocation::new(3, 5, 0, 2), BLEND_ALPHA);
        assert!(matches!(result, Err(MammovizError::InvalidWindow(_))));
    }

    #[test]
    fn test_blend_window_overlay_size_mismatch() {
        let image = uniform(4, 4, 0);
        let overlay = uniform(3, 2, 0);
        let result = blend_window(&image, &overlay, WindowLocation::new(0, 2, 0, 2), BLEND_ALPHA);
        assert!(matches!(
            result,
            Err(MammovizError::DimensionMismatch { .. })
        ));
    }
}
