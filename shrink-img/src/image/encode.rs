//! Image encoding: PNG, JPEG, GIF, BMP, WebP

use std::io::Cursor;

use image::codecs::bmp::BmpEncoder;
use image::codecs::gif::GifEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageEncoder};

use crate::error::ShrinkError;
use crate::format::ImageFormat;

/// Fixed JPEG quality. No quality knob is exposed by the pipeline.
const JPEG_QUALITY: u8 = 85;

/// Fixed lossy WebP quality.
const WEBP_QUALITY: f32 = 85.0;

/// Serialize a decoded image back into the given format.
///
/// The format tag is the one the sniffer produced, so the output buffer is
/// always the same format as the input buffer. A matrix the target codec
/// cannot represent (e.g. RGBA handed to the JPEG encoder) is an encode
/// error, not a silent conversion.
pub(super) fn encode(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>, ShrinkError> {
    let mut buffer = Vec::with_capacity(img.width() as usize * img.height() as usize);

    match format {
        ImageFormat::Png => encode_png(img, &mut buffer)?,
        ImageFormat::Jpeg => encode_jpeg(img, &mut buffer)?,
        ImageFormat::Gif => encode_gif(img, &mut buffer)?,
        ImageFormat::Bmp => encode_bmp(img, &mut buffer)?,
        ImageFormat::WebP => encode_webp(img, &mut buffer),
    }

    log::trace!("encoded {:?}: {} bytes", format, buffer.len());
    Ok(buffer)
}

fn encode_png(img: &DynamicImage, buffer: &mut Vec<u8>) -> Result<(), ShrinkError> {
    let encoder =
        PngEncoder::new_with_quality(&mut *buffer, CompressionType::Default, FilterType::Adaptive);

    encoder
        .write_image(img.as_bytes(), img.width(), img.height(), img.color().into())
        .map_err(|e| ShrinkError::encode(ImageFormat::Png, e))
}

fn encode_jpeg(img: &DynamicImage, buffer: &mut Vec<u8>) -> Result<(), ShrinkError> {
    let mut encoder = JpegEncoder::new_with_quality(&mut *buffer, JPEG_QUALITY);

    encoder
        .encode(img.as_bytes(), img.width(), img.height(), img.color().into())
        .map_err(|e| ShrinkError::encode(ImageFormat::Jpeg, e))
}

fn encode_gif(img: &DynamicImage, buffer: &mut Vec<u8>) -> Result<(), ShrinkError> {
    // GIF has no direct color: the encoder palettizes, mapping alpha to a
    // transparent index.
    let mut encoder = GifEncoder::new(&mut *buffer);

    encoder
        .encode(img.as_bytes(), img.width(), img.height(), img.color().into())
        .map_err(|e| ShrinkError::encode(ImageFormat::Gif, e))
}

fn encode_bmp(img: &DynamicImage, buffer: &mut Vec<u8>) -> Result<(), ShrinkError> {
    let mut cursor = Cursor::new(buffer);
    let mut encoder = BmpEncoder::new(&mut cursor);

    encoder
        .encode(img.as_bytes(), img.width(), img.height(), img.color().into())
        .map_err(|e| ShrinkError::encode(ImageFormat::Bmp, e))
}

fn encode_webp(img: &DynamicImage, buffer: &mut Vec<u8>) {
    let (width, height) = (img.width(), img.height());

    let webp_data = match img {
        DynamicImage::ImageRgba8(rgba) => {
            webp::Encoder::from_rgba(rgba.as_raw(), width, height).encode(WEBP_QUALITY)
        }
        _ => {
            let rgb = img.to_rgb8();
            webp::Encoder::from_rgb(rgb.as_raw(), width, height).encode(WEBP_QUALITY)
        }
    };

    buffer.extend_from_slice(&webp_data);
}
