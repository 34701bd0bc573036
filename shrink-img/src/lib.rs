pub mod error;
pub mod format;
pub mod image;

// Re-export commonly used types
pub use error::ShrinkError;
pub use format::ImageFormat;
pub use self::image::{guess_image_format, shrink_image_buffer};
