//! Image decoding

use image::DynamicImage;

use crate::error::ShrinkError;
use crate::format::ImageFormat;

/// Decode an encoded buffer into 8-bit direct color.
///
/// Dispatches to the codec matching the already-sniffed format; the buffer
/// is never re-probed. Grayscale, indexed, and deep-color sources are
/// expanded so downstream stages only ever see 3-channel RGB or 4-channel
/// RGBA. Animated GIFs decode to their first frame.
///
/// Decoding is all-or-nothing: a truncated or corrupt buffer yields a
/// decode error, never a partial matrix.
pub(super) fn decode(data: &[u8], format: ImageFormat) -> Result<DynamicImage, ShrinkError> {
    let img = image::load_from_memory_with_format(data, format.into())
        .map_err(|e| ShrinkError::decode(format, e))?;

    let img = if img.color().has_alpha() {
        DynamicImage::ImageRgba8(img.into_rgba8())
    } else {
        DynamicImage::ImageRgb8(img.into_rgb8())
    };

    log::trace!(
        "decoded {:?}: {}x{}, {} channels",
        format,
        img.width(),
        img.height(),
        img.color().channel_count()
    );

    Ok(img)
}
