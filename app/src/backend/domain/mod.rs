//! # Domain Module
//!
//! Business logic for the car collection manager: the car service (the
//! shell's single entry point into persistence), the two-car comparison,
//! and the text report export.

pub mod car_service;
pub mod comparison;
pub mod export_service;
pub mod format;

pub use car_service::{AddToCollectionOutcome, CarService};
pub use export_service::{ExportOutcome, ExportService};
