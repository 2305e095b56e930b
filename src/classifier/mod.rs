//! Naive Bayes pixel classification against trained probability tables.
//!
//! The offline trainer estimates, for each class (e.g. "plant" and
//! "background"), one discrete probability distribution per HSV channel
//! from labeled images, and writes them to a tab-separated file. This
//! module loads that file and segments new images with it:
//!
//! 1. [`pdf`] parses the file into a [`ProbabilityTable`]
//! 2. [`hsv`] projects a BGR image into its hue/saturation/value planes
//! 3. [`naive_bayes`] computes per-class joint likelihoods and reduces
//!    them to one exclusive binary mask per class
//!
//! The table is immutable once loaded and can be shared across concurrent
//! classification calls. Classification itself is stateless: one call
//! consumes one image and one table and returns a complete [`MaskSet`] or
//! a fatal [`Error`], never a partial result.

pub mod error;
pub mod hsv;
pub mod naive_bayes;
pub mod pdf;

pub use error::{Error, Result};
pub use hsv::{bgr_to_hsv, extract_hsv, ChannelImage, REQUIRED_CHANNELS};
pub use naive_bayes::{
    classify, classify_channels, classify_with_observer, MaskSet, BACKGROUND, FOREGROUND,
};
pub use pdf::{ClassDistribution, Pdf, ProbabilityTable, BINS};
