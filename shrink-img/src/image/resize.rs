//! Downscaling to fit a bounding box.

use fast_image_resize as fr;
use fr::images::Image as FrImage;
use image::{DynamicImage, RgbImage, RgbaImage};

/// Aspect-preserving shrink dimensions for a bounding box.
///
/// Returns `None` when the image already fits — the pipeline never
/// upscales. Otherwise the limiting dimension lands exactly on its bound
/// and the other is floored, clamped to 1 pixel so extreme aspect ratios
/// cannot collapse a dimension to zero. The arithmetic is exact in `u64`,
/// so identical inputs always produce identical dimensions.
pub(super) fn shrink_dimensions(
    width: u32,
    height: u32,
    max_width: u32,
    max_height: u32,
) -> Option<(u32, u32)> {
    if width <= max_width && height <= max_height {
        return None;
    }

    // Pick the tighter axis by cross-multiplying the two scale ratios.
    let width_limited =
        u64::from(max_width) * u64::from(height) <= u64::from(max_height) * u64::from(width);

    let (new_width, new_height) = if width_limited {
        let scaled = u64::from(height) * u64::from(max_width) / u64::from(width);
        (max_width, scaled as u32)
    } else {
        let scaled = u64::from(width) * u64::from(max_height) / u64::from(height);
        (scaled as u32, max_height)
    };

    Some((new_width.max(1), new_height.max(1)))
}

/// Downscale an image to fit within the bounding box, preserving aspect
/// ratio and channel count.
///
/// Returns the matrix untouched when it already fits. Resampling uses a box
/// (area-averaging) filter: alias-resistant on downscales and byte-for-byte
/// deterministic, which callers rely on for content addressing. Alpha, when
/// present, is averaged like any other channel with no premultiplication.
pub(super) fn fit_within(img: DynamicImage, max_width: u32, max_height: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());

    let Some((new_width, new_height)) = shrink_dimensions(width, height, max_width, max_height)
    else {
        log::trace!("{width}x{height} already fits within {max_width}x{max_height}");
        return img;
    };

    log::debug!("resampling {width}x{height} -> {new_width}x{new_height}");

    match img {
        DynamicImage::ImageRgb8(rgb) => {
            let buf = resample(
                rgb.into_raw(),
                width,
                height,
                new_width,
                new_height,
                3,
                fr::PixelType::U8x3,
            );
            DynamicImage::ImageRgb8(RgbImage::from_raw(new_width, new_height, buf).unwrap())
        }
        DynamicImage::ImageRgba8(rgba) => {
            let buf = resample(
                rgba.into_raw(),
                width,
                height,
                new_width,
                new_height,
                4,
                fr::PixelType::U8x4,
            );
            DynamicImage::ImageRgba8(RgbaImage::from_raw(new_width, new_height, buf).unwrap())
        }
        _ => unreachable!("decoder normalizes to 8-bit RGB or RGBA"),
    }
}

fn resample(
    src: Vec<u8>,
    width: u32,
    height: u32,
    new_width: u32,
    new_height: u32,
    channels: usize,
    pixel_type: fr::PixelType,
) -> Vec<u8> {
    let src_image = FrImage::from_vec_u8(width, height, src, pixel_type).unwrap();

    let mut dst_buffer = vec![0u8; new_width as usize * new_height as usize * channels];
    let mut dst_image =
        FrImage::from_slice_u8(new_width, new_height, &mut dst_buffer, pixel_type).unwrap();

    // use_alpha(false): alpha is resampled independently of the color
    // channels, no multiply/divide round trip.
    let mut resizer = fr::Resizer::new();
    resizer
        .resize(
            &src_image,
            &mut dst_image,
            Some(
                &fr::ResizeOptions::new()
                    .resize_alg(fr::ResizeAlg::Convolution(fr::FilterType::Box))
                    .use_alpha(false),
            ),
        )
        .unwrap();

    dst_buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn already_fits() {
        assert_eq!(shrink_dimensions(100, 100, 400, 400), None);
        assert_eq!(shrink_dimensions(400, 400, 400, 400), None);
        assert_eq!(shrink_dimensions(1, 1, 1, 1), None);
    }

    #[test]
    fn landscape_within_square_bound() {
        assert_eq!(shrink_dimensions(800, 600, 400, 400), Some((400, 300)));
    }

    #[test]
    fn portrait_within_square_bound() {
        assert_eq!(shrink_dimensions(600, 800, 400, 400), Some((300, 400)));
    }

    #[test]
    fn extreme_aspect_clamps_to_one_pixel() {
        assert_eq!(shrink_dimensions(1000, 10, 100, 100), Some((100, 1)));
        assert_eq!(shrink_dimensions(10, 1000, 100, 100), Some((1, 100)));
    }

    #[test]
    fn one_axis_already_small() {
        // Height fits, width does not: width drives the scale.
        assert_eq!(shrink_dimensions(800, 100, 400, 400), Some((400, 50)));
    }

    #[test]
    fn limiting_dimension_is_exact() {
        let (w, h) = shrink_dimensions(1280, 720, 300, 300).unwrap();
        assert_eq!(w, 300);
        // 720 * 300 / 1280 = 168.75, floored
        assert_eq!(h, 168);
    }

    #[test]
    fn aspect_ratio_within_rounding() {
        let (w, h) = shrink_dimensions(1280, 720, 300, 300).unwrap();
        let src_ratio = 1280.0 / 720.0;
        let dst_ratio = w as f64 / h as f64;
        // at most one pixel of rounding on the non-limiting dimension
        let tolerance = src_ratio / h as f64;
        assert!((dst_ratio - src_ratio).abs() <= tolerance);
    }

    #[test]
    fn solid_color_survives_resampling() {
        let img = RgbImage::from_pixel(50, 50, Rgb([7, 130, 201]));
        let out = fit_within(DynamicImage::ImageRgb8(img), 10, 10);
        assert_eq!((out.width(), out.height()), (10, 10));
        for (_, _, pixel) in out.to_rgb8().enumerate_pixels() {
            assert_eq!(*pixel, Rgb([7, 130, 201]));
        }
    }

    #[test]
    fn resampling_is_deterministic() {
        let img = RgbImage::from_fn(64, 48, |x, y| {
            Rgb([(x * 4) as u8, (y * 5) as u8, (x + y) as u8])
        });

        let a = fit_within(DynamicImage::ImageRgb8(img.clone()), 20, 20);
        let b = fit_within(DynamicImage::ImageRgb8(img), 20, 20);
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn alpha_channel_is_preserved() {
        let img = image::RgbaImage::from_pixel(40, 40, image::Rgba([255, 0, 0, 128]));
        let out = fit_within(DynamicImage::ImageRgba8(img), 8, 8);
        assert_eq!(out.color().channel_count(), 4);
        for (_, _, pixel) in out.to_rgba8().enumerate_pixels() {
            assert_eq!(*pixel, image::Rgba([255, 0, 0, 128]));
        }
    }

    #[test]
    fn fit_within_no_op_keeps_pixels() {
        let img = RgbImage::from_fn(30, 20, |x, y| Rgb([x as u8, y as u8, 0]));
        let out = fit_within(DynamicImage::ImageRgb8(img.clone()), 100, 100);
        assert_eq!((out.width(), out.height()), (30, 20));
        assert_eq!(out.as_bytes(), img.as_raw().as_slice());
    }
}
