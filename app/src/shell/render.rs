//! Text rendering for the menu shell.

use shared::{Car, CarComparison, CollectionStats, Verdict};
use std::collections::BTreeMap;

use crate::backend::domain::format;

/// Catalog listing grouped by make.
pub fn browse_listing(cars: &[Car]) -> String {
    if cars.is_empty() {
        return "No cars found in the database.\n".to_string();
    }

    let mut by_make: BTreeMap<&str, Vec<&Car>> = BTreeMap::new();
    for car in cars {
        by_make.entry(car.make.as_str()).or_default().push(car);
    }

    let mut out = String::new();
    for (make, group) in by_make {
        out.push_str(&format!("\n📍 {}:\n", make));
        for car in group {
            let custom_tag = if car.is_custom { " (Custom)" } else { "" };
            out.push_str(&format!(
                "   ID: {:>3} | {} {}{} | {} HP | {}\n",
                car.id.map_or("?".to_string(), |id| id.to_string()),
                car.year,
                car.model,
                custom_tag,
                format::count(car.horsepower as i64),
                format::price(car.price),
            ));
        }
    }
    out
}

/// Personal collection listing, one block per car.
pub fn collection_listing(cars: &[Car]) -> String {
    let mut out = String::new();
    for (i, car) in cars.iter().enumerate() {
        out.push_str(&format!("\n{}. {}\n", i + 1, car));
        out.push_str(&format!("   🔧 Engine: {}\n", car.engine));
        out.push_str(&format!("   ⚡ Power: {} HP\n", format::count(car.horsepower as i64)));
        out.push_str(&format!("   💰 Value: {}\n", format::price(car.price)));
        out.push_str(&format!("   ⛽ Fuel: {}\n", car.fuel_type));
        out.push_str(&format!("   📅 Added: {}\n", car.date_added));
    }
    out
}

/// One line per search hit.
pub fn search_listing(cars: &[Car]) -> String {
    let mut out = String::new();
    for car in cars {
        let tag = if car.is_custom { " (In Collection)" } else { " (Available)" };
        out.push_str(&format!(
            "ID: {:>3} | {} | {} HP | {}{}\n",
            car.id.map_or("?".to_string(), |id| id.to_string()),
            car,
            format::count(car.horsepower as i64),
            format::price(car.price),
            tag,
        ));
    }
    out
}

/// Detail box for a single car.
pub fn details(car: &Car) -> String {
    let custom_tag = if car.is_custom { " (Custom)" } else { "" };
    let id = car.id.map_or("N/A".to_string(), |id| id.to_string());

    let title = format!("{}{}   ID: {}", car, custom_tag, id);
    let lines = [
        format!("Engine:      {}", car.engine),
        format!("Power:       {} HP", format::count(car.horsepower as i64)),
        format!("Price:       {}", format::price(car.price)),
        format!("Fuel Type:   {}", car.fuel_type),
        format!("Added:       {}", car.date_added),
    ];

    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .chain(std::iter::once(title.chars().count()))
        .max()
        .unwrap_or(0);

    let pad = |s: &str| format!("║ {:<width$} ║\n", s, width = width);
    let mut out = String::new();
    out.push_str(&format!("╔{}╗\n", "═".repeat(width + 2)));
    out.push_str(&pad(&title));
    out.push_str(&format!("╠{}╣\n", "═".repeat(width + 2)));
    for line in &lines {
        out.push_str(&pad(line));
    }
    out.push_str(&format!("╚{}╝\n", "═".repeat(width + 2)));
    out
}

fn verdict_label(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::First => "Car 1",
        Verdict::Second => "Car 2",
        Verdict::Tie => "Tie",
    }
}

/// Side-by-side comparison table with a winner column.
pub fn comparison_table(cmp: &CarComparison) -> String {
    let (a, b) = (&cmp.first, &cmp.second);

    let ppt = |value: Option<f64>| match value {
        Some(v) => format!("{:.2}", v),
        None => "-".to_string(),
    };

    let mut out = String::new();
    out.push_str(&format!(
        "{:<15} | {:<35} | {:<35} | {:<10}\n",
        "Attribute", "Car 1", "Car 2", "Winner"
    ));
    out.push_str(&format!("{}\n", "-".repeat(100)));

    let rows = [
        (
            "Make/Model".to_string(),
            format!("{} {}", a.make, a.model),
            format!("{} {}", b.make, b.model),
            "-".to_string(),
        ),
        (
            "Year".to_string(),
            a.year.to_string(),
            b.year.to_string(),
            verdict_label(cmp.year).to_string(),
        ),
        (
            "Horsepower".to_string(),
            format!("{} HP", format::count(a.horsepower as i64)),
            format!("{} HP", format::count(b.horsepower as i64)),
            verdict_label(cmp.horsepower).to_string(),
        ),
        (
            "Price".to_string(),
            format::price(a.price),
            format::price(b.price),
            verdict_label(cmp.price).to_string(),
        ),
        (
            "Fuel Type".to_string(),
            a.fuel_type.clone(),
            b.fuel_type.clone(),
            "-".to_string(),
        ),
        (
            "Engine".to_string(),
            a.engine.clone(),
            b.engine.clone(),
            "-".to_string(),
        ),
        (
            "HP per $1000".to_string(),
            ppt(cmp.power_per_thousand.0),
            ppt(cmp.power_per_thousand.1),
            verdict_label(cmp.value_for_money).to_string(),
        ),
    ];

    for (attr, first, second, winner) in rows {
        out.push_str(&format!(
            "{:<15} | {:<35} | {:<35} | {:<10}\n",
            attr, first, second, winner
        ));
    }
    out
}

/// Statistics view with percentage breakdowns.
pub fn stats_view(stats: &CollectionStats) -> String {
    let mut out = String::new();
    out.push_str(&format!("Total Cars in Database: {}\n", stats.total_cars));
    out.push_str(&format!("Total Collection Value: {}\n", format::price(stats.total_value)));
    out.push_str(&format!("Average Car Price: {}\n", format::price(stats.avg_price)));

    if let Some(top) = &stats.most_expensive {
        out.push_str(&format!(
            "Most Expensive Car: {} {} ({})\n",
            top.make,
            top.model,
            format::price(top.price)
        ));
    }

    if stats.total_cars > 0 {
        out.push_str("\n🔋 Fuel Type Breakdown:\n");
        for fuel in &stats.fuel_breakdown {
            let pct = fuel.count as f64 / stats.total_cars as f64 * 100.0;
            out.push_str(&format!("  {}: {} cars ({:.1}%)\n", fuel.fuel_type, fuel.count, pct));
        }

        out.push_str("\n🏭 Top 5 Manufacturers:\n");
        for make in &stats.top_makes {
            let pct = make.count as f64 / stats.total_cars as f64 * 100.0;
            out.push_str(&format!("  {}: {} cars ({:.1}%)\n", make.make, make.count, pct));
        }
    }
    out
}
