//! # Backend Module
//!
//! Contains all non-UI logic for the car collection manager.
//!
//! The backend follows a layered architecture:
//! ```text
//! Shell (terminal menu)
//!     ↓
//! Domain Layer (services, validation, comparison, export)
//!     ↓
//! Storage Layer (SQLite repository)
//! ```
//!
//! The shell never touches the database directly; everything flows through
//! the services owned by [`AppState`].

pub mod domain;
pub mod storage;

use anyhow::Result;
use tracing::info;

use crate::backend::domain::{CarService, ExportService};
use crate::backend::storage::{CarRepository, DbConnection};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub car_service: CarService,
    pub export_service: ExportService,
}

/// Initialize the backend with all required services
pub async fn initialize_backend() -> Result<AppState> {
    info!("Setting up database");
    let db_conn = DbConnection::init().await?;

    info!("Setting up domain model");
    let car_service = CarService::new(CarRepository::new(db_conn));
    let export_service = ExportService::new();

    Ok(AppState {
        car_service,
        export_service,
    })
}
