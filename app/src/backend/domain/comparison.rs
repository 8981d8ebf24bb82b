//! Side-by-side comparison of two cars.
//!
//! The domain decides the winners; the shell only renders the table.

use shared::{Car, CarComparison, Verdict};

fn verdict<T: PartialOrd>(a: T, b: T) -> Verdict {
    if a > b {
        Verdict::First
    } else if b > a {
        Verdict::Second
    } else {
        Verdict::Tie
    }
}

/// HP per $1000; undefined for a free car.
fn power_per_thousand(car: &Car) -> Option<f64> {
    if car.price > 0.0 {
        Some(car.horsepower as f64 / car.price * 1000.0)
    } else {
        None
    }
}

/// Compare two cars attribute by attribute.
pub fn compare(first: &Car, second: &Car) -> CarComparison {
    let ppt = (power_per_thousand(first), power_per_thousand(second));
    let value_for_money = match ppt {
        (Some(a), Some(b)) => verdict(a, b),
        _ => Verdict::Tie,
    };

    CarComparison {
        year: verdict(first.year, second.year),
        horsepower: verdict(first.horsepower, second.horsepower),
        // Cheaper wins
        price: verdict(second.price, first.price),
        power_per_thousand: ppt,
        value_for_money,
        first: first.clone(),
        second: second.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::CarDraft;

    fn car(make: &str, year: i32, horsepower: i32, price: f64) -> Car {
        CarDraft {
            make: make.to_string(),
            model: "Test".to_string(),
            year,
            engine: "V8".to_string(),
            horsepower,
            price,
            fuel_type: "Gasoline".to_string(),
        }
        .into_car(false)
    }

    #[test]
    fn newer_year_and_more_power_win() {
        let a = car("A", 2023, 700, 100_000.0);
        let b = car("B", 2020, 500, 100_000.0);

        let cmp = compare(&a, &b);
        assert_eq!(cmp.year, Verdict::First);
        assert_eq!(cmp.horsepower, Verdict::First);
        assert_eq!(cmp.price, Verdict::Tie);
    }

    #[test]
    fn cheaper_car_wins_on_price() {
        let a = car("A", 2022, 600, 250_000.0);
        let b = car("B", 2022, 600, 100_000.0);

        let cmp = compare(&a, &b);
        assert_eq!(cmp.price, Verdict::Second);
        assert_eq!(cmp.year, Verdict::Tie);
    }

    #[test]
    fn power_per_thousand_ratio() {
        let a = car("A", 2022, 500, 100_000.0);
        let b = car("B", 2022, 400, 50_000.0);

        let cmp = compare(&a, &b);
        let (ppa, ppb) = cmp.power_per_thousand;
        assert!((ppa.unwrap() - 5.0).abs() < 1e-9);
        assert!((ppb.unwrap() - 8.0).abs() < 1e-9);
        assert_eq!(cmp.value_for_money, Verdict::Second);
    }

    #[test]
    fn zero_price_leaves_value_for_money_undefined() {
        let a = car("A", 2022, 500, 0.0);
        let b = car("B", 2022, 400, 50_000.0);

        let cmp = compare(&a, &b);
        assert_eq!(cmp.power_per_thousand.0, None);
        assert_eq!(cmp.value_for_money, Verdict::Tie);
    }
}
