//! Plain-text rendering of session snapshots and service responses.

use std::fmt::Write as _;

use client_core::{SessionSnapshot, SessionState};
use shared::{
    protocol::{BatchPredictionResponse, HealthReport},
    CATALOG,
};

pub fn snapshot(snapshot: &SessionSnapshot) -> String {
    let query = &snapshot.query;
    let mut out = String::new();
    let brand = if query.brand.is_empty() {
        "-".to_string()
    } else {
        CATALOG.label_of(&query.brand)
    };
    let model = if query.model.is_empty() { "-" } else { query.model.as_str() };
    let _ = writeln!(
        out,
        "{brand} {model} ({}), {} km, {} HP, {} cc, {}, {}, {}, {}",
        query.year,
        group_thousands(query.mileage_km),
        query.power_hp,
        query.engine_cc,
        query.fuel_type,
        query.body_type,
        query.color,
        query.transmission,
    );

    match &snapshot.state {
        SessionState::Idle => {
            let _ = writeln!(out, "No prediction requested.");
        }
        SessionState::Submitting => {
            let _ = writeln!(out, "Predicting…");
        }
        SessionState::Failed(message) => {
            let _ = writeln!(out, "Error: {message}");
        }
        SessionState::Succeeded(result) => {
            let _ = writeln!(out, "Minimum        {}", price(result.min_price));
            let _ = writeln!(out, "Best estimate  {}", price(result.predicted));
            let _ = writeln!(out, "Maximum        {}", price(result.max_price));
            let _ = writeln!(out, "Price spread (±) {}", price(result.margin));
            let _ = writeln!(out, "Model confidence {:.1}%", result.confidence_percent);
            let _ = writeln!(
                out,
                "Residual standard deviation {}",
                price(result.residual_std_dev)
            );
        }
    }
    out
}

pub fn health(report: &HealthReport) -> String {
    format!(
        "{} ({}), version {}, model {:?}",
        report.status, report.message, report.version, report.model_status
    )
}

pub fn batch(response: &BatchPredictionResponse) -> String {
    let mut out = String::new();
    for entry in &response.predictions {
        let car = &entry.car;
        let prediction = &entry.prediction;
        let confidence = prediction
            .confidence_percent
            .map(|c| format!("{c:.1}%"))
            .unwrap_or_else(|| "n/a".into());
        let _ = writeln!(
            out,
            "{} {} {} {} km: {} ({} – {}), confidence {confidence}",
            CATALOG.label_of(&car.brand),
            car.model,
            car.year,
            group_thousands(car.mileage_km),
            price(prediction.predicted),
            price(prediction.min_price),
            price(prediction.max_price),
        );
    }
    let _ = writeln!(out, "{} predictions", response.count);
    out
}

fn price(value: f64) -> String {
    format!("€{}", group_thousands(value.round() as i64))
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use client_core::SessionState;
    use shared::{protocol::PredictionResult, VehicleQuery};

    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(120_000), "120,000");
        assert_eq!(group_thousands(-1_234_567), "-1,234,567");
    }

    #[test]
    fn prices_round_for_display() {
        assert_eq!(price(12_345.6), "€12,346");
        assert_eq!(price(999.4), "€999");
    }

    #[test]
    fn renders_success_snapshot() {
        let rendered = snapshot(&SessionSnapshot {
            query: VehicleQuery::default(),
            state: SessionState::Succeeded(PredictionResult {
                predicted: 12000.0,
                min_price: 11000.0,
                max_price: 13000.0,
                margin: 1000.0,
                confidence_percent: 87.5,
                residual_std_dev: 950.0,
            }),
            in_flight: 0,
        });

        assert!(rendered.starts_with("Volkswagen Golf (2018), 120,000 km"));
        assert!(rendered.contains("Best estimate  €12,000"));
        assert!(rendered.contains("Model confidence 87.5%"));
    }

    #[test]
    fn renders_failure_message() {
        let rendered = snapshot(&SessionSnapshot {
            query: VehicleQuery::default(),
            state: SessionState::Failed("Please fill in brand, model and year".into()),
            in_flight: 0,
        });
        assert!(rendered.ends_with("Error: Please fill in brand, model and year\n"));
    }
}
