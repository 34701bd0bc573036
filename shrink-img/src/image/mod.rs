//! Image shrinking pipeline: sniff, decode, downscale, re-encode.

mod decode;
mod encode;
mod resize;

use crate::error::ShrinkError;
use crate::format::ImageFormat;

/// Report the mime type of an encoded image buffer.
///
/// Classifies from magic bytes alone; the rest of the buffer is not
/// inspected.
pub fn guess_image_format(data: &[u8]) -> Result<&'static str, ShrinkError> {
    ImageFormat::detect(data)
        .map(ImageFormat::mime_type)
        .ok_or(ShrinkError::UnknownFormat)
}

/// Shrink an encoded image to fit within `max_width` x `max_height`.
///
/// The result is re-encoded in the input's own format, so the output bytes
/// may differ from the input even when the image already fits and keeps its
/// pixel dimensions. Never upscales, never converts between formats, and
/// holds no state across calls: identical input and bounds always produce
/// identical output bytes.
pub fn shrink_image_buffer(
    data: &[u8],
    max_width: u32,
    max_height: u32,
) -> Result<Vec<u8>, ShrinkError> {
    if max_width == 0 || max_height == 0 {
        return Err(ShrinkError::InvalidDimension {
            max_width,
            max_height,
        });
    }

    let format = ImageFormat::detect(data).ok_or(ShrinkError::UnknownFormat)?;
    log::debug!("detected {} ({} bytes)", format.mime_type(), data.len());

    let img = decode::decode(data, format)?;
    let img = resize::fit_within(img, max_width, max_height);
    encode::encode(&img, format)
}
