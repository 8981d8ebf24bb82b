//! Export of the personal collection to a plain-text report.
//!
//! Rendering and file writing are separated so the report content is
//! testable without touching the filesystem.

use anyhow::Result;
use chrono::Local;
use shared::Car;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::backend::domain::car_service::CarService;
use crate::backend::domain::format;

/// Result of an export run.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome {
    /// The report was written to disk.
    Written {
        file_path: PathBuf,
        car_count: usize,
        total_value: f64,
    },
    /// Nothing to export: the collection has no cars.
    EmptyCollection,
}

/// Export service that turns the collection into a text report file.
#[derive(Clone)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    /// Render the report body for the given collection cars.
    pub fn render_report(&self, cars: &[Car], exported_at: &str) -> String {
        let total_value: f64 = cars.iter().map(|car| car.price).sum();

        let mut report = String::new();
        report.push_str("🚗 MY VIRTUAL CAR COLLECTION 🚗\n");
        report.push_str(&"=".repeat(50));
        report.push('\n');
        report.push_str(&format!("Exported on: {}\n", exported_at));
        report.push_str(&format!("Total Cars: {}\n", cars.len()));
        report.push_str(&format!("Total Value: {}\n\n", format::price(total_value)));

        for (i, car) in cars.iter().enumerate() {
            report.push_str(&format!("{}. {}\n", i + 1, car));
            report.push_str(&format!("   Engine: {}\n", car.engine));
            report.push_str(&format!("   Power: {} HP\n", format::count(car.horsepower as i64)));
            report.push_str(&format!("   Price: {}\n", format::price(car.price)));
            report.push_str(&format!("   Fuel Type: {}\n", car.fuel_type));
            report.push_str(&format!("   Date Added: {}\n\n", car.date_added));
        }

        report.push_str(&"-".repeat(50));
        report.push('\n');
        report.push_str("Generated by Virtual Car Collection Manager\n");
        report
    }

    /// Export the personal collection into `dir` as
    /// `my_car_collection_<YYYYMMDD_HHMMSS>.txt`.
    pub async fn export_collection(
        &self,
        car_service: &CarService,
        dir: &Path,
    ) -> Result<ExportOutcome> {
        let cars = car_service.my_collection().await?;
        if cars.is_empty() {
            info!("Export skipped: collection is empty");
            return Ok(ExportOutcome::EmptyCollection);
        }

        let now = Local::now();
        let filename = format!("my_car_collection_{}.txt", now.format("%Y%m%d_%H%M%S"));
        let file_path = dir.join(filename);

        let report = self.render_report(&cars, &now.format("%Y-%m-%d %H:%M:%S").to_string());

        if let Err(e) = fs::write(&file_path, &report) {
            error!("Failed to write export file {:?}: {}", file_path, e);
            return Err(e.into());
        }

        let total_value: f64 = cars.iter().map(|car| car.price).sum();
        info!("Exported {} cars to {:?}", cars.len(), file_path);

        Ok(ExportOutcome::Written {
            file_path,
            car_count: cars.len(),
            total_value,
        })
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::storage::{CarRepository, DbConnection};
    use shared::CarDraft;

    async fn setup_test() -> CarService {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        CarService::new(CarRepository::new(db))
    }

    fn draft(model: &str, price: f64) -> CarDraft {
        CarDraft {
            make: "Ferrari".to_string(),
            model: model.to_string(),
            year: 2022,
            engine: "3.9L Twin-Turbo V8".to_string(),
            horsepower: 661,
            price,
            fuel_type: "Gasoline".to_string(),
        }
    }

    #[test]
    fn report_contains_header_totals_and_car_blocks() {
        let service = ExportService::new();
        let mut car = draft("488 GTB", 262_000.0).into_car(true);
        car.id = Some(1);
        car.date_added = "2024-05-01 10:00:00".to_string();

        let report = service.render_report(&[car], "2024-05-02 09:30:00");

        assert!(report.starts_with("🚗 MY VIRTUAL CAR COLLECTION 🚗\n"));
        assert!(report.contains("Exported on: 2024-05-02 09:30:00"));
        assert!(report.contains("Total Cars: 1"));
        assert!(report.contains("Total Value: $262,000.00"));
        assert!(report.contains("1. 2022 Ferrari 488 GTB"));
        assert!(report.contains("   Engine: 3.9L Twin-Turbo V8"));
        assert!(report.contains("   Power: 661 HP"));
        assert!(report.contains("   Price: $262,000.00"));
        assert!(report.contains("   Fuel Type: Gasoline"));
        assert!(report.contains("   Date Added: 2024-05-01 10:00:00"));
        assert!(report.ends_with("Generated by Virtual Car Collection Manager\n"));
    }

    #[test]
    fn report_numbers_cars_in_order() {
        let service = ExportService::new();
        let cars: Vec<_> = [("488 GTB", 262_000.0), ("F40", 1_500_000.0)]
            .into_iter()
            .map(|(model, price)| draft(model, price).into_car(true))
            .collect();

        let report = service.render_report(&cars, "2024-05-02 09:30:00");
        assert!(report.contains("1. 2022 Ferrari 488 GTB"));
        assert!(report.contains("2. 2022 Ferrari F40"));
        assert!(report.contains("Total Value: $1,762,000.00"));
    }

    #[tokio::test]
    async fn test_export_skips_empty_collection() {
        let car_service = setup_test().await;
        let export = ExportService::new();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let outcome = export
            .export_collection(&car_service, dir.path())
            .await
            .expect("Export should not error");
        assert_eq!(outcome, ExportOutcome::EmptyCollection);
    }

    #[tokio::test]
    async fn test_export_writes_report_file() {
        let car_service = setup_test().await;
        car_service
            .create_custom_car(draft("488 GTB", 262_000.0))
            .await
            .expect("Failed to create car");

        let export = ExportService::new();
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let outcome = export
            .export_collection(&car_service, dir.path())
            .await
            .expect("Export should succeed");

        let ExportOutcome::Written { file_path, car_count, total_value } = outcome else {
            panic!("Expected a written report");
        };
        assert_eq!(car_count, 1);
        assert!((total_value - 262_000.0).abs() < 1e-6);

        let name = file_path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("my_car_collection_"));
        assert!(name.ends_with(".txt"));

        let content = fs::read_to_string(&file_path).expect("Report file must exist");
        assert!(content.contains("2022 Ferrari 488 GTB"));
        assert!(content.contains("Total Cars: 1"));
    }
}
