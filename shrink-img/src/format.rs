//! Image format detection from magic bytes.

/// Supported image formats.
///
/// The set is closed: a value of this enum is always a recognized format,
/// and an unrecognized buffer is reported as [`None`] by [`detect`] rather
/// than as a catch-all variant.
///
/// [`detect`]: ImageFormat::detect
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
    WebP,
}

/// PNG file signature.
const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

impl ImageFormat {
    /// Detect format from magic bytes. Returns `None` if unrecognized.
    ///
    /// Signatures are checked in a fixed priority order. A buffer shorter
    /// than the signature under test simply fails that match; empty input
    /// is fine.
    pub fn detect(data: &[u8]) -> Option<Self> {
        if data.starts_with(&PNG_MAGIC) {
            return Some(ImageFormat::Png);
        }

        // JPEG: SOI marker
        if data.starts_with(&[0xFF, 0xD8]) {
            return Some(ImageFormat::Jpeg);
        }

        if data.starts_with(b"GIF87a") || data.starts_with(b"GIF89a") {
            return Some(ImageFormat::Gif);
        }

        if data.starts_with(b"BM") {
            return Some(ImageFormat::Bmp);
        }

        // WebP: RIFF container with a WEBP fourcc after the chunk size
        if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
            return Some(ImageFormat::WebP);
        }

        None
    }

    /// MIME type string.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::WebP => "image/webp",
        }
    }
}

impl From<ImageFormat> for image::ImageFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
            ImageFormat::WebP => image::ImageFormat::WebP,
        }
    }
}
