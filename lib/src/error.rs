//! Error types shared across the library

use std::io;

use thiserror::Error;

/// Everything that can go wrong during a session
///
/// None of these are fatal: the shell reports the message and returns to
/// the prompt with prior state intact.
#[derive(Debug, Error)]
pub enum MosaicError {
    /// Resolution change would leave the valid range for the current image
    #[error("Did not change resolution due to exceeding boundaries.")]
    ResolutionOutOfBounds,

    /// Conversion requested while the character set is empty
    #[error("Did not execute. Charset is empty.")]
    EmptyCharset,

    /// Image could not be opened or decoded
    #[error("Did not execute due to problem with image file.")]
    Image(#[from] image::ImageError),

    /// Output could not be written
    #[error("Did not execute due to problem writing output.")]
    Io(#[from] io::Error),
}
