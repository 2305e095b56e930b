//! Phenoseg Rust Extensions
//!
//! High-performance pixel classification for plant-phenotyping image
//! pipelines, with optional Python bindings via PyO3.
//!
//! ## Image Format
//! Images are BGR u8 arrays of shape (height, width, 3), matching the
//! decoded output of the surrounding pipeline. Masks come back as
//! (height, width) u8 arrays with 255 = foreground and 0 = background.
//!
//! ## Workflow
//! Load a trained probability density file once, then classify any number
//! of images against it:
//!
//! ```
//! use phenoseg_rust::classifier::{classify, ProbabilityTable};
//! # use phenoseg_rust::classifier::{ClassDistribution, Pdf, BINS};
//! # use ndarray::Array3;
//! # let uniform = || Pdf::new([1.0 / BINS as f32; BINS]);
//! # let class = |name: &str| ClassDistribution::new(name, [
//! #     ("hue".to_string(), uniform()),
//! #     ("saturation".to_string(), uniform()),
//! #     ("value".to_string(), uniform()),
//! # ]);
//! # let table = ProbabilityTable::from_classes(vec![class("plant"), class("background")]);
//! # let image = Array3::<u8>::zeros((4, 4, 3));
//! let masks = classify(image.view(), &table)?;
//! for (class_name, mask) in masks.iter() {
//!     // one exclusive binary mask per class
//! }
//! # Ok::<(), phenoseg_rust::classifier::Error>(())
//! ```

pub mod classifier;

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;
    use pyo3::types::PyDict;

    use crate::classifier::{classify, ProbabilityTable};

    /// Classify every pixel of a BGR image against a trained PDF file.
    ///
    /// Returns a dict mapping class name to a uint8 binary mask
    /// (255 = assigned to that class, 0 = not assigned).
    ///
    /// # Arguments
    /// * `image` - BGR uint8 ndarray of shape (height, width, 3)
    /// * `pdf_file` - path to the tab-separated probability density file
    #[pyfunction]
    pub fn naive_bayes_classifier<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        pdf_file: &str,
    ) -> PyResult<Bound<'py, PyDict>> {
        let table = ProbabilityTable::from_path(pdf_file)
            .map_err(|e| PyValueError::new_err(e.to_string()))?;
        let masks =
            classify(image.as_array(), &table).map_err(|e| PyValueError::new_err(e.to_string()))?;

        let out = PyDict::new(py);
        for (class_name, mask) in masks {
            out.set_item(class_name, mask.into_pyarray(py))?;
        }
        Ok(out)
    }

    /// Phenoseg Rust extension module
    #[pymodule]
    pub fn phenoseg_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        m.add_function(wrap_pyfunction!(naive_bayes_classifier, m)?)?;
        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::phenoseg_rust;
