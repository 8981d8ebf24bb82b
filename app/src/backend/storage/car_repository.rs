use anyhow::Result;
use shared::{Car, CollectionStats, FuelTypeCount, MakeCount, MostExpensiveCar};
use sqlx::{sqlite::SqliteRow, Row};
use tracing::warn;

use crate::backend::storage::db::DbConnection;

/// Repository for car record operations.
///
/// The only component that touches the cars table. Holds no business
/// rules; validation happens in the domain layer before rows get here.
#[derive(Clone)]
pub struct CarRepository {
    db: DbConnection,
}

fn car_from_row(row: &SqliteRow) -> Car {
    Car {
        id: Some(row.get("id")),
        make: row.get("make"),
        model: row.get("model"),
        year: row.get("year"),
        engine: row.get("engine"),
        horsepower: row.get("horsepower"),
        price: row.get("price"),
        fuel_type: row.get("fuel_type"),
        date_added: row.get("date_added"),
        is_custom: row.get("is_custom"),
    }
}

impl CarRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// Insert a new car row and return the assigned id.
    pub async fn create(&self, car: &Car) -> Result<i64> {
        let result = sqlx::query(
            r#"
            INSERT INTO cars (make, model, year, engine, horsepower, price, fuel_type, date_added, is_custom)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.engine)
        .bind(car.horsepower)
        .bind(car.price)
        .bind(&car.fuel_type)
        .bind(&car.date_added)
        .bind(car.is_custom)
        .execute(self.db.pool())
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Overwrite all mutable fields of an existing row. `date_added` and
    /// the id itself are never updated. A car without an id is a no-op.
    pub async fn update(&self, car: &Car) -> Result<()> {
        let Some(id) = car.id else {
            warn!("Ignoring update for unsaved car {}", car);
            return Ok(());
        };

        sqlx::query(
            r#"
            UPDATE cars
            SET make = ?, model = ?, year = ?, engine = ?, horsepower = ?,
                price = ?, fuel_type = ?, is_custom = ?
            WHERE id = ?
            "#,
        )
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year)
        .bind(&car.engine)
        .bind(car.horsepower)
        .bind(car.price)
        .bind(&car.fuel_type)
        .bind(car.is_custom)
        .bind(id)
        .execute(self.db.pool())
        .await?;

        Ok(())
    }

    /// Delete a row by id. Returns whether a row was actually removed;
    /// a nonexistent id is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM cars WHERE id = ?")
            .bind(id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// All rows ordered by make then model.
    pub async fn list_all(&self) -> Result<Vec<Car>> {
        let rows = sqlx::query(
            r#"
            SELECT id, make, model, year, engine, horsepower, price, fuel_type, date_added, is_custom
            FROM cars
            ORDER BY make, model
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(car_from_row).collect())
    }

    /// Single-row lookup; absent rows are `None`, not an error.
    pub async fn get(&self, id: i64) -> Result<Option<Car>> {
        let row = sqlx::query(
            r#"
            SELECT id, make, model, year, engine, horsepower, price, fuel_type, date_added, is_custom
            FROM cars
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(car_from_row))
    }

    /// Case-insensitive substring match against make, model, or fuel type.
    pub async fn search(&self, query: &str) -> Result<Vec<Car>> {
        let term = format!("%{}%", query);
        let rows = sqlx::query(
            r#"
            SELECT id, make, model, year, engine, horsepower, price, fuel_type, date_added, is_custom
            FROM cars
            WHERE LOWER(make) LIKE LOWER(?) OR LOWER(model) LIKE LOWER(?) OR LOWER(fuel_type) LIKE LOWER(?)
            ORDER BY make, model
            "#,
        )
        .bind(&term)
        .bind(&term)
        .bind(&term)
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(car_from_row).collect())
    }

    /// Aggregate statistics over every row, catalog and collection alike.
    pub async fn stats(&self) -> Result<CollectionStats> {
        let totals = sqlx::query(
            r#"
            SELECT COUNT(*) AS total_cars,
                   COALESCE(SUM(price), 0.0) AS total_value,
                   COALESCE(AVG(price), 0.0) AS avg_price
            FROM cars
            "#,
        )
        .fetch_one(self.db.pool())
        .await?;

        let most_expensive = sqlx::query(
            r#"
            SELECT make, model, price
            FROM cars
            ORDER BY price DESC
            LIMIT 1
            "#,
        )
        .fetch_optional(self.db.pool())
        .await?
        .map(|row| MostExpensiveCar {
            make: row.get("make"),
            model: row.get("model"),
            price: row.get("price"),
        });

        let fuel_breakdown = sqlx::query(
            r#"
            SELECT fuel_type, COUNT(*) AS count
            FROM cars
            GROUP BY fuel_type
            "#,
        )
        .fetch_all(self.db.pool())
        .await?
        .iter()
        .map(|row| FuelTypeCount {
            fuel_type: row.get("fuel_type"),
            count: row.get("count"),
        })
        .collect();

        let top_makes = sqlx::query(
            r#"
            SELECT make, COUNT(*) AS count
            FROM cars
            GROUP BY make
            ORDER BY COUNT(*) DESC
            LIMIT 5
            "#,
        )
        .fetch_all(self.db.pool())
        .await?
        .iter()
        .map(|row| MakeCount {
            make: row.get("make"),
            count: row.get("count"),
        })
        .collect();

        Ok(CollectionStats {
            total_cars: totals.get("total_cars"),
            total_value: totals.get("total_value"),
            avg_price: totals.get("avg_price"),
            most_expensive,
            fuel_breakdown,
            top_makes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CarDraft;

    // Setup a repository over a fresh seeded test database
    async fn setup_test() -> CarRepository {
        let db = DbConnection::init_test().await.expect("Failed to create test database");
        CarRepository::new(db)
    }

    fn ferrari_draft() -> CarDraft {
        CarDraft {
            make: "Ferrari".to_string(),
            model: "F40".to_string(),
            year: 1992,
            engine: "2.9L Twin-Turbo V8".to_string(),
            horsepower: 471,
            price: 1_500_000.0,
            fuel_type: "Gasoline".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let repo = setup_test().await;

        let mut car = ferrari_draft().into_car(true);
        let id = repo.create(&car).await.expect("Failed to create car");
        assert!(id > 0);
        car.id = Some(id);

        let stored = repo
            .get(id)
            .await
            .expect("Failed to get car")
            .expect("Car should exist after create");
        assert_eq!(stored, car);
        assert!(!stored.date_added.is_empty());
    }

    #[tokio::test]
    async fn test_get_absent_id_returns_none() {
        let repo = setup_test().await;

        let missing = repo.get(99_999).await.expect("Failed to query");
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_delete_then_get_yields_absent() {
        let repo = setup_test().await;

        let car = ferrari_draft().into_car(true);
        let id = repo.create(&car).await.expect("Failed to create car");

        let removed = repo.delete(id).await.expect("Failed to delete");
        assert!(removed);
        assert!(repo.get(id).await.expect("Failed to query").is_none());
    }

    #[tokio::test]
    async fn test_delete_nonexistent_id_returns_false() {
        let repo = setup_test().await;

        let removed = repo.delete(99_999).await.expect("Delete should not error");
        assert!(!removed);
    }

    #[tokio::test]
    async fn test_update_overwrites_mutable_fields_only() {
        let repo = setup_test().await;

        let mut car = ferrari_draft().into_car(true);
        let id = repo.create(&car).await.expect("Failed to create car");
        car.id = Some(id);
        let original_date = repo.get(id).await.unwrap().unwrap().date_added;

        car.price = 1_750_000.0;
        car.horsepower = 478;
        car.date_added = "1900-01-01 00:00:00".to_string();
        repo.update(&car).await.expect("Failed to update");

        let stored = repo.get(id).await.unwrap().unwrap();
        assert_eq!(stored.price, 1_750_000.0);
        assert_eq!(stored.horsepower, 478);
        assert_eq!(stored.date_added, original_date, "date_added must survive updates");
    }

    #[tokio::test]
    async fn test_update_without_id_is_a_noop() {
        let repo = setup_test().await;
        let before = repo.list_all().await.expect("Failed to list");

        let car = ferrari_draft().into_car(true);
        repo.update(&car).await.expect("Unsaved update should not error");

        let after = repo.list_all().await.expect("Failed to list");
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_list_all_returns_seeds_sorted_by_make_model() {
        let repo = setup_test().await;

        let cars = repo.list_all().await.expect("Failed to list");
        assert_eq!(cars.len(), 18);
        assert_eq!(cars[0].make, "Acura");

        let mut sorted = cars.clone();
        sorted.sort_by(|a, b| a.make.cmp(&b.make).then(a.model.cmp(&b.model)));
        assert_eq!(cars, sorted);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_subset_of_list_all() {
        let repo = setup_test().await;

        let all = repo.list_all().await.expect("Failed to list");
        let hits = repo.search("TURBO").await.expect("Failed to search");
        assert!(!hits.is_empty());
        for car in &hits {
            assert!(all.contains(car), "search result must come from list_all");
        }
    }

    #[tokio::test]
    async fn test_search_tesla_finds_exactly_the_model_s_plaid() {
        let repo = setup_test().await;

        let hits = repo.search("tesla").await.expect("Failed to search");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].make, "Tesla");
        assert_eq!(hits[0].model, "Model S Plaid");
    }

    #[tokio::test]
    async fn test_search_matches_fuel_type() {
        let repo = setup_test().await;

        let hits = repo.search("electric").await.expect("Failed to search");
        // Tesla (fuel type Electric) plus the hybrids with electric motors
        // in the engine column do not match; only make/model/fuel_type do.
        for car in &hits {
            let q = "electric";
            let matched = car.make.to_lowercase().contains(q)
                || car.model.to_lowercase().contains(q)
                || car.fuel_type.to_lowercase().contains(q);
            assert!(matched, "{} should not match '{}'", car, q);
        }
        assert!(hits.iter().any(|c| c.model == "Model S Plaid"));
    }

    #[tokio::test]
    async fn test_stats_over_seeded_database() {
        let repo = setup_test().await;

        let all = repo.list_all().await.expect("Failed to list");
        let stats = repo.stats().await.expect("Failed to compute stats");

        assert_eq!(stats.total_cars, all.len() as i64);
        assert_eq!(stats.total_cars, 18);

        let expected_value: f64 = all.iter().map(|c| c.price).sum();
        assert!((stats.total_value - expected_value).abs() < 1e-6);
        assert!((stats.avg_price - expected_value / 18.0).abs() < 1e-6);

        let top = stats.most_expensive.expect("Seeded db has a most expensive car");
        assert_eq!(top.make, "Bugatti");
        assert_eq!(top.model, "Chiron");

        let fuel_total: i64 = stats.fuel_breakdown.iter().map(|f| f.count).sum();
        assert_eq!(fuel_total, 18);

        assert!(stats.top_makes.len() <= 5);
        // Every seed make appears exactly once, so each top make counts 1.
        assert!(stats.top_makes.iter().all(|m| m.count == 1));
    }

    #[tokio::test]
    async fn test_stats_on_empty_table() {
        let repo = setup_test().await;

        // Clear the seeds to exercise the empty aggregates
        for car in repo.list_all().await.expect("Failed to list") {
            repo.delete(car.id.unwrap()).await.expect("Failed to delete");
        }

        let stats = repo.stats().await.expect("Failed to compute stats");
        assert_eq!(stats.total_cars, 0);
        assert_eq!(stats.total_value, 0.0);
        assert_eq!(stats.avg_price, 0.0);
        assert!(stats.most_expensive.is_none());
        assert!(stats.fuel_breakdown.is_empty());
        assert!(stats.top_makes.is_empty());
    }

    #[tokio::test]
    async fn test_top_makes_ranked_by_count() {
        let repo = setup_test().await;

        // Three extra Ferraris make Ferrari the clear top make (4 rows)
        for model in ["F40", "Enzo", "Roma"] {
            let mut draft = ferrari_draft();
            draft.model = model.to_string();
            repo.create(&draft.into_car(true)).await.expect("Failed to create");
        }

        let stats = repo.stats().await.expect("Failed to compute stats");
        assert_eq!(stats.top_makes[0].make, "Ferrari");
        assert_eq!(stats.top_makes[0].count, 4);
        assert_eq!(stats.top_makes.len(), 5);
    }
}
