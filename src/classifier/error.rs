//! Error types for probability-table loading and classification.
//!
//! All failures here are deterministic data-shape problems; none are
//! transient, so nothing in this crate retries.

use std::io;

use thiserror::Error;

/// Errors produced while loading probability tables or classifying pixels.
#[derive(Debug, Error)]
pub enum Error {
    /// A data line in the probability density file did not split into the
    /// 258 expected tab-separated fields (class, channel, 256 bins).
    #[error(
        "probability density file is not formatted correctly \
         (expected 258 fields, found {found}) on line:\n{line}"
    )]
    Format { found: usize, line: String },

    /// A probability field could not be parsed as a finite float.
    #[error("invalid probability value {value:?} on line:\n{line}")]
    BadValue { value: String, line: String },

    /// A class in the table has no distribution for a channel the HSV
    /// representation requires.
    #[error("class {class:?} has no distribution for required channel {channel:?}")]
    ChannelMismatch { class: String, channel: String },

    /// The probability density file could not be read.
    #[error("failed to read probability density file")]
    Io(#[from] io::Error),
}

/// Convenience alias used throughout the classifier.
pub type Result<T> = std::result::Result<T, Error>;
