use serde::{Deserialize, Serialize};
use std::fmt;

/// A single car record.
///
/// Records come in two flavours, distinguished by `is_custom`: catalog cars
/// (`false`) are reference entries the user can browse and copy, collection
/// cars (`true`) are owned by the user. Copying a catalog car into the
/// collection always produces a brand new row; the catalog row is never
/// touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    /// Database id; `None` until the record is first persisted.
    pub id: Option<i64>,
    /// Manufacturer, e.g. "Ferrari".
    pub make: String,
    /// Model name, e.g. "488 GTB".
    pub model: String,
    /// Year of manufacture.
    pub year: i32,
    /// Engine specification, e.g. "3.9L Twin-Turbo V8".
    pub engine: String,
    /// Engine output in HP.
    pub horsepower: i32,
    /// Price in USD.
    pub price: f64,
    /// Fuel type (Gasoline, Electric, Hybrid, Diesel).
    pub fuel_type: String,
    /// Timestamp ("%Y-%m-%d %H:%M:%S") set at construction, immutable after.
    pub date_added: String,
    /// Whether this row belongs to the user's personal collection.
    pub is_custom: bool,
}

impl Car {
    /// Current local time in the `date_added` format.
    pub fn timestamp_now() -> String {
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
    }

    /// Build an unsaved collection copy of this car: same descriptive
    /// fields, no id, fresh `date_added`, `is_custom` set.
    pub fn collection_copy(&self) -> Car {
        Car {
            id: None,
            make: self.make.clone(),
            model: self.model.clone(),
            year: self.year,
            engine: self.engine.clone(),
            horsepower: self.horsepower,
            price: self.price,
            fuel_type: self.fuel_type.clone(),
            date_added: Self::timestamp_now(),
            is_custom: true,
        }
    }
}

impl fmt::Display for Car {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.year, self.make, self.model)
    }
}

/// The fields a caller supplies to create a new car.
///
/// Validation lives here, in one place, so the repository stays free of
/// business rules and the shell only has to render the error message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarDraft {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub engine: String,
    pub horsepower: i32,
    pub price: f64,
    /// Defaults to "Gasoline" when empty.
    pub fuel_type: String,
}

impl CarDraft {
    /// Check every field constraint, returning the first violation.
    pub fn validate(&self) -> Result<(), CarValidationError> {
        if self.make.trim().is_empty() {
            return Err(CarValidationError::EmptyMake);
        }
        if self.model.trim().is_empty() {
            return Err(CarValidationError::EmptyModel);
        }
        // First car was built in 1886.
        if !(1886..=2030).contains(&self.year) {
            return Err(CarValidationError::YearOutOfRange(self.year));
        }
        if self.engine.trim().is_empty() {
            return Err(CarValidationError::EmptyEngine);
        }
        if !(1..=5000).contains(&self.horsepower) {
            return Err(CarValidationError::HorsepowerOutOfRange(self.horsepower));
        }
        if self.price < 0.0 {
            return Err(CarValidationError::NegativePrice);
        }
        Ok(())
    }

    /// Turn a validated draft into an unsaved `Car`.
    pub fn into_car(self, is_custom: bool) -> Car {
        let fuel_type = {
            let trimmed = self.fuel_type.trim();
            if trimmed.is_empty() {
                "Gasoline".to_string()
            } else {
                trimmed.to_string()
            }
        };
        Car {
            id: None,
            make: self.make.trim().to_string(),
            model: self.model.trim().to_string(),
            year: self.year,
            engine: self.engine.trim().to_string(),
            horsepower: self.horsepower,
            price: self.price,
            fuel_type,
            date_added: Car::timestamp_now(),
            is_custom,
        }
    }
}

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CarValidationError {
    #[error("Make is required")]
    EmptyMake,
    #[error("Model is required")]
    EmptyModel,
    #[error("Engine specification is required")]
    EmptyEngine,
    #[error("Please enter a reasonable year (1886-2030), got {0}")]
    YearOutOfRange(i32),
    #[error("Please enter a reasonable horsepower (1-5000), got {0}")]
    HorsepowerOutOfRange(i32),
    #[error("Price cannot be negative")]
    NegativePrice,
}

/// Aggregate statistics over the whole cars table (catalog + collection).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_cars: i64,
    /// Sum of all prices; 0 when the table is empty.
    pub total_value: f64,
    /// Average price; 0 when the table is empty.
    pub avg_price: f64,
    /// Single most expensive row, first match after a DESC sort on price.
    pub most_expensive: Option<MostExpensiveCar>,
    /// Count per distinct fuel type, unordered.
    pub fuel_breakdown: Vec<FuelTypeCount>,
    /// Top 5 makes by row count, descending.
    pub top_makes: Vec<MakeCount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostExpensiveCar {
    pub make: String,
    pub model: String,
    pub price: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelTypeCount {
    pub fuel_type: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MakeCount {
    pub make: String,
    pub count: i64,
}

/// Which side of a two-car comparison wins a given attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Verdict {
    First,
    Second,
    Tie,
}

/// Result of comparing two cars attribute by attribute.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CarComparison {
    pub first: Car,
    pub second: Car,
    /// Newer year wins.
    pub year: Verdict,
    /// More horsepower wins.
    pub horsepower: Verdict,
    /// Lower price wins.
    pub price: Verdict,
    /// HP per $1000 for each side; `None` when the price is zero.
    pub power_per_thousand: (Option<f64>, Option<f64>),
    /// Higher HP per $1000 wins; `Tie` when either side is undefined.
    pub value_for_money: Verdict,
}
