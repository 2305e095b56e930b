//! Naive Bayes pixel classification.
//!
//! Every pixel gets one joint likelihood per class: the product of the
//! class's hue, saturation, and value table lookups at that pixel's
//! intensities (conditional independence across channels, no priors). A
//! pixel lands in a class's mask only when its likelihood strictly exceeds
//! every other class's likelihood there; ties, including the all-zero tie,
//! leave the pixel in no mask.
//!
//! Likelihood fields and mask reductions are computed per class in
//! parallel. Each class reads only the immutable table and channel planes
//! and writes only its own output, so the result is identical to the
//! sequential computation.

use log::debug;
use ndarray::{Array2, ArrayView3};
use rayon::prelude::*;

use super::error::{Error, Result};
use super::hsv::{extract_hsv, ChannelImage, REQUIRED_CHANNELS};
use super::pdf::{Pdf, ProbabilityTable};

/// Mask value for pixels assigned to a class.
pub const FOREGROUND: u8 = 255;
/// Mask value for pixels not assigned to a class.
pub const BACKGROUND: u8 = 0;

/// One binary mask per class, in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct MaskSet {
    masks: Vec<(String, Array2<u8>)>,
}

impl MaskSet {
    /// Mask for one class by name.
    pub fn get(&self, class: &str) -> Option<&Array2<u8>> {
        self.masks
            .iter()
            .find(|(name, _)| name == class)
            .map(|(_, mask)| mask)
    }

    /// Class name / mask pairs in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Array2<u8>)> {
        self.masks.iter().map(|(name, mask)| (name.as_str(), mask))
    }

    /// Number of masks (one per class).
    pub fn len(&self) -> usize {
        self.masks.len()
    }

    /// True when the source table held no classes.
    pub fn is_empty(&self) -> bool {
        self.masks.is_empty()
    }
}

impl IntoIterator for MaskSet {
    type Item = (String, Array2<u8>);
    type IntoIter = std::vec::IntoIter<(String, Array2<u8>)>;

    fn into_iter(self) -> Self::IntoIter {
        self.masks.into_iter()
    }
}

/// Classify every pixel of a BGR image against a probability table.
///
/// # Arguments
/// * `image` - 3D array view of shape (height, width, 3) with BGR u8 values
/// * `table` - per-class hue/saturation/value distributions
///
/// # Returns
/// One binary mask per class (255 = assigned to that class), in table order
pub fn classify(image: ArrayView3<u8>, table: &ProbabilityTable) -> Result<MaskSet> {
    classify_channels(&extract_hsv(image), table)
}

/// Classify and hand every finished mask to an observer.
///
/// The observer runs once per class in table order after all masks are
/// computed, for debug output such as writing masks to disk. It has no
/// effect on the returned result.
pub fn classify_with_observer(
    image: ArrayView3<u8>,
    table: &ProbabilityTable,
    mut observe: impl FnMut(&str, &Array2<u8>),
) -> Result<MaskSet> {
    let masks = classify(image, table)?;
    for (name, mask) in masks.iter() {
        observe(name, mask);
    }
    Ok(masks)
}

/// Classify pre-extracted HSV channel planes against a probability table.
pub fn classify_channels(channels: &ChannelImage, table: &ProbabilityTable) -> Result<MaskSet> {
    let (height, width) = channels.dim();
    debug!(
        "classifying {width}x{height} pixels into {} classes",
        table.len()
    );

    // Resolve every class's channel triple up front so a table missing a
    // required channel fails before any per-pixel work.
    let mut lookups: Vec<(&str, [&Pdf; 3])> = Vec::with_capacity(table.len());
    for class in table.classes() {
        let mut triple = Vec::with_capacity(REQUIRED_CHANNELS.len());
        for channel in REQUIRED_CHANNELS {
            let pdf = class.channel(channel).ok_or_else(|| Error::ChannelMismatch {
                class: class.name().to_string(),
                channel: channel.to_string(),
            })?;
            triple.push(pdf);
        }
        lookups.push((class.name(), [triple[0], triple[1], triple[2]]));
    }

    // Joint likelihood field per class.
    let fields: Vec<Array2<f32>> = lookups
        .par_iter()
        .map(|(_, [hue, sat, val])| {
            let mut field = Array2::<f32>::zeros((height, width));
            for y in 0..height {
                for x in 0..width {
                    field[[y, x]] = hue.p(channels.hue[[y, x]])
                        * sat.p(channels.saturation[[y, x]])
                        * val.p(channels.value[[y, x]]);
                }
            }
            field
        })
        .collect();

    // A pixel joins class c's mask only when c's likelihood strictly beats
    // the best of the other classes, compared by class position. The empty
    // "others" set of a one-class table reduces to -inf, so a lone class
    // claims every pixel.
    let masks: Vec<(String, Array2<u8>)> = lookups
        .par_iter()
        .enumerate()
        .map(|(c, (name, _))| {
            let mut mask = Array2::<u8>::from_elem((height, width), BACKGROUND);
            for y in 0..height {
                for x in 0..width {
                    let own = fields[c][[y, x]];
                    let best_other = fields
                        .iter()
                        .enumerate()
                        .filter(|(d, _)| *d != c)
                        .map(|(_, field)| field[[y, x]])
                        .fold(f32::NEG_INFINITY, f32::max);
                    if own > best_other {
                        mask[[y, x]] = FOREGROUND;
                    }
                }
            }
            ((*name).to_string(), mask)
        })
        .collect();

    Ok(MaskSet { masks })
}
