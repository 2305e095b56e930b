//! Probability density file parsing.
//!
//! The offline trainer writes per-class, per-channel discrete probability
//! distributions as tab-separated text: one header line, then one line per
//! (class, channel) pair carrying 256 probabilities for intensity levels
//! 0-255. This module loads that format into an immutable
//! [`ProbabilityTable`] and can write a table back out in the same shape.
//!
//! The loader is a pure data transformation. It does not check that every
//! class defines every channel; that is validated at classification time,
//! where the required channel set is known.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use log::debug;

use super::error::{Error, Result};

/// Number of discrete intensity levels per channel.
pub const BINS: usize = 256;

/// Fields per data line: class name, channel name, then one value per bin.
const FIELDS_PER_LINE: usize = BINS + 2;

/// One class-conditional discrete distribution over intensities 0-255.
///
/// Values are typically normalized probabilities, but the classifier only
/// compares products of lookups, so any non-negative finite weighting works.
#[derive(Debug, Clone, PartialEq)]
pub struct Pdf {
    values: Box<[f32; BINS]>,
}

impl Pdf {
    /// Build a distribution from exactly 256 values.
    pub fn new(values: [f32; BINS]) -> Self {
        Self {
            values: Box::new(values),
        }
    }

    /// Probability mass at one intensity level.
    #[inline]
    pub fn p(&self, intensity: u8) -> f32 {
        self.values[intensity as usize]
    }

    /// All 256 values in intensity order.
    pub fn values(&self) -> &[f32; BINS] {
        &self.values
    }
}

/// A named class together with its per-channel distributions.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDistribution {
    name: String,
    channels: BTreeMap<String, Pdf>,
}

impl ClassDistribution {
    /// Assemble a class from (channel name, distribution) pairs.
    pub fn new(name: impl Into<String>, channels: impl IntoIterator<Item = (String, Pdf)>) -> Self {
        Self {
            name: name.into(),
            channels: channels.into_iter().collect(),
        }
    }

    /// Class name as it appeared in the source file.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Distribution for one channel, if present.
    pub fn channel(&self, name: &str) -> Option<&Pdf> {
        self.channels.get(name)
    }

    /// Channel name / distribution pairs in channel-name order.
    pub fn channels(&self) -> impl Iterator<Item = (&str, &Pdf)> {
        self.channels.iter().map(|(name, pdf)| (name.as_str(), pdf))
    }
}

/// The full collection of class distributions loaded from one file.
///
/// Immutable after construction and `Sync`, so one table can back any
/// number of concurrent classification calls. Classes keep their
/// first-seen file order; the classifier compares classes by position in
/// that order, never by name equality.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbabilityTable {
    classes: Vec<ClassDistribution>,
}

impl ProbabilityTable {
    /// Load a table from a probability density file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!("loaded {} classes from {}", table.len(), path.display());
        Ok(table)
    }

    /// Parse a table from tab-separated text.
    ///
    /// The first line is a header and is discarded without validation.
    /// Every further line must split into exactly 258 tab-separated
    /// fields; any other count, or a probability that fails to parse as a
    /// finite float, aborts the load with the offending line in the error.
    /// A repeated (class, channel) pair silently replaces the earlier
    /// entry, matching the trainer's append-style output.
    pub fn from_reader(reader: impl BufRead) -> Result<Self> {
        let mut lines = reader.lines();
        if let Some(header) = lines.next() {
            header?;
        }

        let mut classes: Vec<ClassDistribution> = Vec::new();
        for line in lines {
            let line = line?;
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() != FIELDS_PER_LINE {
                return Err(Error::Format {
                    found: fields.len(),
                    line,
                });
            }

            let mut values = Box::new([0.0f32; BINS]);
            for (slot, field) in values.iter_mut().zip(&fields[2..]) {
                let value: f32 = field.parse().map_err(|_| Error::BadValue {
                    value: (*field).to_string(),
                    line: line.clone(),
                })?;
                if !value.is_finite() {
                    return Err(Error::BadValue {
                        value: (*field).to_string(),
                        line: line.clone(),
                    });
                }
                *slot = value;
            }

            let class_name = fields[0];
            let channel = fields[1].to_string();
            let pdf = Pdf { values };
            match classes.iter_mut().find(|class| class.name == class_name) {
                Some(class) => {
                    class.channels.insert(channel, pdf);
                }
                None => {
                    classes.push(ClassDistribution::new(class_name, [(channel, pdf)]));
                }
            }
        }

        Ok(Self { classes })
    }

    /// Assemble a table directly, bypassing the file format.
    pub fn from_classes(classes: Vec<ClassDistribution>) -> Self {
        Self { classes }
    }

    /// Write the table back out in the tab-separated trainer format.
    pub fn to_writer(&self, mut writer: impl Write) -> io::Result<()> {
        write!(writer, "class\tchannel")?;
        for bin in 0..BINS {
            write!(writer, "\t{bin}")?;
        }
        writeln!(writer)?;

        for class in &self.classes {
            for (channel, pdf) in class.channels() {
                write!(writer, "{}\t{}", class.name, channel)?;
                for value in pdf.values() {
                    write!(writer, "\t{value}")?;
                }
                writeln!(writer)?;
            }
        }
        Ok(())
    }

    /// All classes in first-seen file order.
    pub fn classes(&self) -> &[ClassDistribution] {
        &self.classes
    }

    /// Number of classes in the table.
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// True when the table holds no classes.
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Look up one class by name.
    pub fn get(&self, name: &str) -> Option<&ClassDistribution> {
        self.classes.iter().find(|class| class.name == name)
    }
}
