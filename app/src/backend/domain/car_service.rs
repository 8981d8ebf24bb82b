use anyhow::Result;
use shared::{Car, CarDraft, CollectionStats};
use tracing::{info, warn};

use crate::backend::storage::CarRepository;

/// Result of trying to copy a catalog car into the personal collection.
#[derive(Debug, Clone, PartialEq)]
pub enum AddToCollectionOutcome {
    /// A fresh collection row was created; the catalog row is untouched.
    Added(Car),
    /// The id pointed at a car that is already part of the collection.
    AlreadyOwned(Car),
    /// No car with that id exists.
    NotFound,
}

/// Service for managing cars in the collection manager.
///
/// All shell traffic goes through here; the service stamps timestamps,
/// runs the validation boundary, and delegates persistence to the
/// repository.
#[derive(Clone)]
pub struct CarService {
    repository: CarRepository,
}

impl CarService {
    pub fn new(repository: CarRepository) -> Self {
        Self { repository }
    }

    /// Validate a draft and persist it as a collection car.
    pub async fn create_custom_car(&self, draft: CarDraft) -> Result<Car> {
        info!("Creating custom car: {} {}", draft.make, draft.model);

        draft.validate()?;

        let mut car = draft.into_car(true);
        let id = self.repository.create(&car).await?;
        car.id = Some(id);

        info!("Created custom car {} with id {}", car, id);
        Ok(car)
    }

    /// Copy a catalog car into the personal collection.
    ///
    /// The original row keeps its id, date_added, and catalog status; the
    /// collection gains a brand new row.
    pub async fn add_to_collection(&self, car_id: i64) -> Result<AddToCollectionOutcome> {
        let Some(original) = self.repository.get(car_id).await? else {
            warn!("No car found with id {}", car_id);
            return Ok(AddToCollectionOutcome::NotFound);
        };

        if original.is_custom {
            info!("Car {} is already in the collection", car_id);
            return Ok(AddToCollectionOutcome::AlreadyOwned(original));
        }

        let mut copy = original.collection_copy();
        let id = self.repository.create(&copy).await?;
        copy.id = Some(id);

        info!("Added {} to the collection as id {}", copy, id);
        Ok(AddToCollectionOutcome::Added(copy))
    }

    /// Single car lookup; `None` when the id matches nothing.
    pub async fn get_car(&self, car_id: i64) -> Result<Option<Car>> {
        self.repository.get(car_id).await
    }

    /// Every car, catalog and collection, sorted by make then model.
    pub async fn list_cars(&self) -> Result<Vec<Car>> {
        self.repository.list_all().await
    }

    /// Only the user's own cars, in catalog order.
    pub async fn my_collection(&self) -> Result<Vec<Car>> {
        let cars = self.repository.list_all().await?;
        Ok(cars.into_iter().filter(|car| car.is_custom).collect())
    }

    /// Substring search over make, model, and fuel type.
    pub async fn search_cars(&self, query: &str) -> Result<Vec<Car>> {
        info!("Searching cars for '{}'", query);
        self.repository.search(query).await
    }

    /// Re-persist an existing car; unsaved cars are ignored.
    pub async fn update_car(&self, car: &Car) -> Result<()> {
        self.repository.update(car).await
    }

    /// Remove a car by id; false when no such row existed.
    pub async fn remove_car(&self, car_id: i64) -> Result<bool> {
        let removed = self.repository.delete(car_id).await?;
        if removed {
            info!("Removed car {}", car_id);
        } else {
            warn!("Asked to remove nonexistent car {}", car_id);
        }
        Ok(removed)
    }

    /// Aggregate statistics over the whole table.
    pub async fn collection_stats(&self) -> Result<CollectionStats> {
        self.repository.stats().await
    }
}
