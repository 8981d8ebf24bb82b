use anyhow::Result;
use sqlx::{migrate::MigrateDatabase, Row, Sqlite, SqlitePool};
use std::sync::Arc;
use tracing::info;

// The database URL for the production database
const DATABASE_URL: &str = "sqlite:car_collection.db";

/// Fixed reference vehicles inserted when the cars table is first created
/// empty. All seeds are catalog rows (`is_custom = 0`) with a constant
/// `date_added`.
const SEED_CARS: [(&str, &str, i32, &str, i32, f64, &str); 18] = [
    ("Ferrari", "488 GTB", 2022, "3.9L Twin-Turbo V8", 661, 262000.0, "Gasoline"),
    ("Lamborghini", "Huracán", 2023, "5.2L V10", 630, 248295.0, "Gasoline"),
    ("McLaren", "720S", 2022, "4.0L Twin-Turbo V8", 710, 299000.0, "Gasoline"),
    ("Porsche", "911 Turbo S", 2023, "3.8L Twin-Turbo Flat-6", 640, 207000.0, "Gasoline"),
    ("Bugatti", "Chiron", 2023, "8.0L Quad-Turbo W16", 1479, 3300000.0, "Gasoline"),
    ("Tesla", "Model S Plaid", 2023, "Electric Motors", 1020, 129990.0, "Electric"),
    ("Aston Martin", "DB11", 2022, "5.2L Twin-Turbo V12", 630, 205600.0, "Gasoline"),
    ("Mercedes-AMG", "GT 63 S", 2023, "4.0L Twin-Turbo V8", 630, 159500.0, "Gasoline"),
    ("BMW", "M8 Competition", 2023, "4.4L Twin-Turbo V8", 617, 146895.0, "Gasoline"),
    ("Audi", "R8 V10", 2022, "5.2L V10", 562, 148700.0, "Gasoline"),
    ("Nissan", "GT-R NISMO", 2023, "3.8L Twin-Turbo V6", 600, 215740.0, "Gasoline"),
    ("Chevrolet", "Corvette Z06", 2023, "5.5L V8", 670, 106395.0, "Gasoline"),
    ("Ford", "Mustang Shelby GT500", 2023, "5.2L Supercharged V8", 760, 80795.0, "Gasoline"),
    ("Dodge", "Challenger SRT Hellcat", 2023, "6.2L Supercharged V8", 717, 71490.0, "Gasoline"),
    ("Acura", "NSX Type S", 2022, "Hybrid V6 + Electric Motors", 600, 169500.0, "Hybrid"),
    ("Lexus", "LC 500", 2023, "5.0L V8", 471, 97350.0, "Gasoline"),
    ("Maserati", "MC20", 2023, "3.0L Twin-Turbo V6", 621, 216995.0, "Gasoline"),
    ("Koenigsegg", "Regera", 2022, "5.0L Twin-Turbo V8 + Electric", 1500, 1900000.0, "Hybrid"),
];

const SEED_DATE_ADDED: &str = "2024-01-01";

/// DbConnection manages database operations
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            Sqlite::create_database(url).await?
        }

        // Connect to the database
        let pool = SqlitePool::connect(url).await?;

        // Setup database schema and seed data
        Self::setup_schema(&pool).await?;
        Self::seed_reference_cars(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize the standard database
    pub async fn init() -> Result<Self> {
        Self::new(DATABASE_URL).await
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        // Generate a unique database name for tests
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS cars (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                year INTEGER NOT NULL,
                engine TEXT NOT NULL,
                horsepower INTEGER NOT NULL,
                price REAL NOT NULL,
                fuel_type TEXT DEFAULT 'Gasoline',
                date_added TEXT DEFAULT CURRENT_TIMESTAMP,
                is_custom BOOLEAN DEFAULT 0
            );
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Pre-populate the cars table with the reference catalog when empty
    async fn seed_reference_cars(pool: &SqlitePool) -> Result<()> {
        let row = sqlx::query("SELECT COUNT(*) AS count FROM cars")
            .fetch_one(pool)
            .await?;
        let count: i64 = row.get("count");
        if count > 0 {
            return Ok(());
        }

        for (make, model, year, engine, horsepower, price, fuel_type) in SEED_CARS {
            sqlx::query(
                r#"
                INSERT INTO cars (make, model, year, engine, horsepower, price, fuel_type, date_added, is_custom)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, 0)
                "#,
            )
            .bind(make)
            .bind(model)
            .bind(year)
            .bind(engine)
            .bind(horsepower)
            .bind(price)
            .bind(fuel_type)
            .bind(SEED_DATE_ADDED)
            .execute(pool)
            .await?;
        }

        info!("Seeded {} reference cars", SEED_CARS.len());
        Ok(())
    }
}
