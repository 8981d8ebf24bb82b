//! # Shell Module
//!
//! The interactive terminal surface: a numbered menu, input collection,
//! and output formatting. All persistence goes through the backend
//! services; invalid input and not-found lookups become messages here,
//! never crashes.

pub mod prompts;
pub mod render;

use anyhow::Result;
use shared::CarDraft;
use std::path::Path;
use tracing::error;

use crate::backend::domain::{comparison, AddToCollectionOutcome, ExportOutcome};
use crate::backend::AppState;

/// Main application loop. Returns when the user picks exit.
pub async fn run(state: &AppState) -> Result<()> {
    println!("🚗 Welcome to Virtual Car Collection Manager! 🏁");
    println!("Build and manage your dream car collection!");

    loop {
        print_menu();
        let choice = prompts::prompt("> ")?;

        if choice == "0" {
            println!("\n🚗 Thanks for using Virtual Car Collection Manager!");
            println!("Your garage is always waiting for you. Goodbye! 🏁");
            return Ok(());
        }

        let result = match choice.as_str() {
            "1" => browse_available_cars(state).await,
            "2" => add_existing_car(state).await,
            "3" => create_custom_car(state).await,
            "4" => view_my_collection(state).await,
            "5" => search_cars(state).await,
            "6" => compare_cars(state).await,
            "7" => view_collection_stats(state).await,
            "8" => display_car_details(state).await,
            "9" => remove_from_collection(state).await,
            "10" => export_collection(state).await,
            _ => {
                println!("❌ Invalid choice. Please select a valid option (0-10).");
                Ok(())
            }
        };

        if let Err(e) = result {
            error!("Operation failed: {:#}", e);
            println!("❌ Something went wrong: {}", e);
        }

        prompts::pause();
    }
}

fn print_menu() {
    println!("\n{}", "=".repeat(60));
    println!("🚗 VIRTUAL CAR COLLECTION MANAGER 🚗");
    println!("{}", "=".repeat(60));
    println!("📋 What would you like to do?");
    println!();
    println!("🔍 BROWSE & SEARCH:");
    println!("   1. Browse all available cars");
    println!("   2. Add existing car to my collection");
    println!("   5. Search cars");
    println!("   8. View detailed car information");
    println!();
    println!("🏠 MY COLLECTION:");
    println!("   3. Create custom car");
    println!("   4. View my collection");
    println!("   9. Remove car from collection");
    println!();
    println!("📊 ANALYSIS & TOOLS:");
    println!("   6. Compare two cars");
    println!("   7. View collection statistics");
    println!("   10. Export my collection");
    println!();
    println!("   0. Exit program");
    println!("{}", "=".repeat(60));
}

async fn browse_available_cars(state: &AppState) -> Result<()> {
    println!("\n🚗 Available Cars in Database:");
    println!("{}", "=".repeat(90));

    let cars = state.car_service.list_cars().await?;
    print!("{}", render::browse_listing(&cars));
    Ok(())
}

async fn add_existing_car(state: &AppState) -> Result<()> {
    browse_available_cars(state).await?;

    let Some(car_id) =
        prompts::prompt_parsed::<i64>("\nEnter the ID of the car you want to add to your collection: ")?
    else {
        println!("❌ Please enter a valid car ID number.");
        return Ok(());
    };

    match state.car_service.add_to_collection(car_id).await? {
        AddToCollectionOutcome::Added(car) => {
            println!("\n✅ Successfully added {} to your collection!", car);
            print!("{}", render::details(&car));
        }
        AddToCollectionOutcome::AlreadyOwned(_) => {
            println!("\n✅ This custom car is already in your collection!");
        }
        AddToCollectionOutcome::NotFound => {
            println!("❌ No car found with ID {}", car_id);
        }
    }
    Ok(())
}

async fn create_custom_car(state: &AppState) -> Result<()> {
    println!("\n🔧 Create Your Custom Car");
    println!("{}", "=".repeat(40));

    let make = prompts::prompt("Enter car make (e.g., Ferrari, Tesla): ")?;
    let model = prompts::prompt("Enter car model (e.g., 488 GTB, Model S): ")?;

    let Some(year) = prompts::prompt_parsed::<i32>("Enter year (e.g., 2023): ")? else {
        println!("❌ Please enter valid numeric values for year, horsepower, and price.");
        return Ok(());
    };

    let engine = prompts::prompt("Enter engine specification (e.g., 3.9L Twin-Turbo V8): ")?;

    let Some(horsepower) = prompts::prompt_parsed::<i32>("Enter horsepower (e.g., 661): ")? else {
        println!("❌ Please enter valid numeric values for year, horsepower, and price.");
        return Ok(());
    };

    let Some(price) = prompts::prompt_parsed::<f64>("Enter price in USD (e.g., 262000): ")? else {
        println!("❌ Please enter valid numeric values for year, horsepower, and price.");
        return Ok(());
    };

    println!("\nFuel type options: Gasoline, Electric, Hybrid, Diesel");
    let fuel_type = prompts::prompt("Enter fuel type (default: Gasoline): ")?;

    let draft = CarDraft {
        make,
        model,
        year,
        engine,
        horsepower,
        price,
        fuel_type,
    };

    if let Err(e) = draft.validate() {
        println!("❌ {}", e);
        return Ok(());
    }

    let car = state.car_service.create_custom_car(draft).await?;
    println!("\n✅ Successfully created your custom {}!", car);
    print!("{}", render::details(&car));
    Ok(())
}

async fn view_my_collection(state: &AppState) -> Result<()> {
    println!("\n🏠 Your Personal Car Collection:");
    println!("{}", "=".repeat(90));

    let cars = state.car_service.my_collection().await?;
    if cars.is_empty() {
        println!("Your collection is empty. Add some cars to get started!");
        return Ok(());
    }

    print!("{}", render::collection_listing(&cars));
    Ok(())
}

async fn search_cars(state: &AppState) -> Result<()> {
    let query = prompts::prompt("\nEnter search term (make, model, or fuel type): ")?;
    if query.is_empty() {
        println!("❌ Please enter a search term.");
        return Ok(());
    }

    let cars = state.car_service.search_cars(&query).await?;
    if cars.is_empty() {
        println!("No cars found matching '{}'", query);
        return Ok(());
    }

    println!("\n🔍 Search Results for '{}' ({} found):", query, cars.len());
    println!("{}", "=".repeat(90));
    print!("{}", render::search_listing(&cars));
    Ok(())
}

async fn compare_cars(state: &AppState) -> Result<()> {
    println!("\n⚖️  Car Comparison Tool");
    println!("{}", "=".repeat(40));

    let Some(first_id) = prompts::prompt_parsed::<i64>("Enter first car ID: ")? else {
        println!("❌ Please enter valid car ID numbers.");
        return Ok(());
    };
    let Some(second_id) = prompts::prompt_parsed::<i64>("Enter second car ID: ")? else {
        println!("❌ Please enter valid car ID numbers.");
        return Ok(());
    };

    let Some(first) = state.car_service.get_car(first_id).await? else {
        println!("❌ No car found with ID {}", first_id);
        return Ok(());
    };
    let Some(second) = state.car_service.get_car(second_id).await? else {
        println!("❌ No car found with ID {}", second_id);
        return Ok(());
    };

    println!("\n⚖️  Comparing {} vs {}", first, second);
    println!("{}", "=".repeat(100));
    print!("{}", render::comparison_table(&comparison::compare(&first, &second)));
    Ok(())
}

async fn view_collection_stats(state: &AppState) -> Result<()> {
    println!("\n📊 Collection Statistics");
    println!("{}", "=".repeat(50));

    let stats = state.car_service.collection_stats().await?;
    print!("{}", render::stats_view(&stats));
    Ok(())
}

async fn display_car_details(state: &AppState) -> Result<()> {
    let Some(car_id) = prompts::prompt_parsed::<i64>("\nEnter car ID to view details: ")? else {
        println!("❌ Please enter a valid car ID number.");
        return Ok(());
    };

    match state.car_service.get_car(car_id).await? {
        Some(car) => print!("{}", render::details(&car)),
        None => println!("❌ No car found with ID {}", car_id),
    }
    Ok(())
}

async fn remove_from_collection(state: &AppState) -> Result<()> {
    let cars = state.car_service.my_collection().await?;
    if cars.is_empty() {
        println!("❌ Your collection is empty. Nothing to remove!");
        return Ok(());
    }

    println!("\n🗑️  Your Cars:");
    for (i, car) in cars.iter().enumerate() {
        println!(
            "{}. ID: {} | {} | {}",
            i + 1,
            car.id.map_or("?".to_string(), |id| id.to_string()),
            car,
            crate::backend::domain::format::price(car.price),
        );
    }

    let Some(choice) = prompts::prompt_parsed::<usize>("\nEnter the number of the car to remove: ")?
    else {
        println!("❌ Please enter a valid number.");
        return Ok(());
    };
    if choice < 1 || choice > cars.len() {
        println!("❌ Invalid choice. Please enter a valid number.");
        return Ok(());
    }

    let car = &cars[choice - 1];
    let confirmed = prompts::confirm(&format!(
        "Are you sure you want to remove {} from your collection? (y/N): ",
        car
    ))?;
    if !confirmed {
        println!("❌ Removal cancelled.");
        return Ok(());
    }

    // Collection cars always carry an id once listed
    let Some(id) = car.id else {
        println!("❌ Removal cancelled.");
        return Ok(());
    };
    if state.car_service.remove_car(id).await? {
        println!("✅ Removed {} from your collection.", car);
    } else {
        println!("❌ No car found with ID {}", id);
    }
    Ok(())
}

async fn export_collection(state: &AppState) -> Result<()> {
    match state
        .export_service
        .export_collection(&state.car_service, Path::new("."))
        .await?
    {
        ExportOutcome::Written {
            file_path,
            car_count,
            ..
        } => {
            println!("✅ Collection exported to: {}", file_path.display());
            println!("📄 File contains {} cars with complete details.", car_count);
        }
        ExportOutcome::EmptyCollection => {
            println!("❌ Your collection is empty. Add some cars first!");
        }
    }
    Ok(())
}
