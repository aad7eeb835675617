use shared::VehicleQuery;

use super::*;

#[test]
fn batch_accepts_catalog_queries() {
    let mut tesla = VehicleQuery::default();
    tesla.select_brand("tesla");
    tesla.model = "Model 3".into();

    check_batch(&[VehicleQuery::default(), tesla]).expect("valid batch");
}

#[test]
fn batch_rejects_model_of_another_brand() {
    let mismatched = VehicleQuery {
        brand: "dacia".into(),
        model: "Golf".into(),
        ..VehicleQuery::default()
    };

    let err = check_batch(&[VehicleQuery::default(), mismatched]).expect_err("mismatch");
    assert!(err.to_string().contains("batch entry 1"));
}

#[test]
fn batch_rejects_missing_required_fields() {
    let no_year = VehicleQuery {
        year: 0,
        ..VehicleQuery::default()
    };

    let err = check_batch(&[no_year]).expect_err("missing year");
    assert_eq!(
        err.to_string(),
        "batch entry 0: Please fill in brand, model and year"
    );
}

#[test]
fn parses_models_subcommand() {
    let cli = Cli::try_parse_from(["predictor", "--api-url", "http://x:1", "models", "dacia"])
        .expect("parse");
    assert!(matches!(cli.command, Command::Models { ref brand } if brand == "dacia"));
    assert_eq!(cli.api_url.as_deref(), Some("http://x:1"));
}
