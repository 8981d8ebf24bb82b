//! # Storage Module
//!
//! Handles all data persistence for the car collection manager.
//!
//! The store is a single SQLite database with one `cars` table, created and
//! seeded on first open. Only the repository in this module is allowed to
//! touch it; domain services go through [`CarRepository`] and never issue
//! SQL themselves.

pub mod car_repository;
pub mod db;

pub use car_repository::CarRepository;
pub use db::DbConnection;
