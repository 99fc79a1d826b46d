//! Validation and repair of the raw hourly series.

pub mod cleaner;
/// IQR outlier detection and quantile helpers.
pub mod outliers;

pub use cleaner::{Cleaned, CleaningReport, ColumnCleaning, clean};
pub use outliers::{Column, IqrBounds, detect_outliers};
