//! Unified error type for the shrink pipeline.

use crate::format::ImageFormat;

/// Failures surfaced by the shrink pipeline.
///
/// Every failure is a deterministic function of the input, so none of these
/// are retriable. The pipeline performs no recovery and no format
/// substitution; the first failing stage short-circuits.
#[derive(Debug, thiserror::Error)]
pub enum ShrinkError {
    /// No known magic signature matched the buffer's leading bytes.
    #[error("unrecognized image format")]
    UnknownFormat,

    /// A requested size bound is zero. Rejected before any decode work.
    #[error("invalid size bound {max_width}x{max_height}: both dimensions must be positive")]
    InvalidDimension { max_width: u32, max_height: u32 },

    /// The encoded data was malformed, truncated, or otherwise undecodable.
    #[error("failed to decode {format:?} data: {source}")]
    Decode {
        format: ImageFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The pixel data could not be serialized in the target format.
    ///
    /// On matrices produced by the pipeline's own decoder this indicates an
    /// internal invariant violation, not bad user input.
    #[error("failed to encode {format:?} data: {source}")]
    Encode {
        format: ImageFormat,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl ShrinkError {
    /// Wrap a codec decode error.
    pub(crate) fn decode<E>(format: ImageFormat, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ShrinkError::Decode {
            format,
            source: Box::new(source),
        }
    }

    /// Wrap a codec encode error.
    pub(crate) fn encode<E>(format: ImageFormat, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        ShrinkError::Encode {
            format,
            source: Box::new(source),
        }
    }
}
