use std::{path::PathBuf, process::ExitCode, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::{load_settings, load_settings_from},
    PredictionClient, PredictionService, SessionController, SessionState, Submission,
};
use shared::{QueryField, VehicleQuery, CATALOG};
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

mod render;

#[cfg(test)]
mod tests;

#[derive(Parser, Debug)]
#[command(name = "predictor", version, about = "Car price predictor client")]
struct Cli {
    /// Prediction API root, overrides settings and environment.
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Settings file (flat TOML); defaults to ./predictor.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List brand keys with their display labels.
    Brands,
    /// List the models offered for a brand.
    Models { brand: String },
    /// Query the service health endpoint.
    Health,
    /// Fill the form and request one price estimate.
    Predict(PredictArgs),
    /// Price every query in a JSON array file.
    Batch { file: PathBuf },
}

#[derive(clap::Args, Debug)]
struct PredictArgs {
    #[arg(long)]
    brand: Option<String>,
    #[arg(long)]
    model: Option<String>,
    #[arg(long)]
    year: Option<String>,
    #[arg(long)]
    mileage: Option<String>,
    #[arg(long)]
    power: Option<String>,
    #[arg(long)]
    engine: Option<String>,
    #[arg(long)]
    fuel: Option<String>,
    #[arg(long)]
    body: Option<String>,
    #[arg(long)]
    color: Option<String>,
    #[arg(long)]
    transmission: Option<String>,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Brands => {
            for brand in CATALOG.list_brands() {
                println!("{brand:<16}{}", CATALOG.label_of(brand));
            }
        }
        Command::Models { ref brand } => {
            if !CATALOG.is_known_brand(brand) {
                bail!("unknown brand '{brand}'; run `predictor brands` for the list");
            }
            for model in CATALOG.models_of(brand) {
                println!("{model}");
            }
        }
        Command::Health => {
            let client = build_client(&cli)?;
            let report = client.health().await?;
            println!("{}", render::health(&report));
            if !report.is_ready() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Predict(ref args) => {
            let client = build_client(&cli)?;
            return predict(client, args).await;
        }
        Command::Batch { ref file } => {
            let client = build_client(&cli)?;
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read batch file '{}'", file.display()))?;
            let queries: Vec<VehicleQuery> = serde_json::from_str(&raw)
                .with_context(|| format!("batch file '{}' is not a JSON array of queries", file.display()))?;
            check_batch(&queries)?;
            let response = client.predict_batch(&queries).await?;
            print!("{}", render::batch(&response));
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn build_client(cli: &Cli) -> Result<PredictionClient> {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings(),
    };
    if let Some(url) = &cli.api_url {
        settings.api_base_url = url.clone();
    }
    tracing::debug!(api_base_url = %settings.api_base_url, "using prediction service");
    PredictionClient::from_settings(&settings)
}

/// Every entry must name a catalog brand/model pair and carry the required
/// fields before the batch is sent.
fn check_batch(queries: &[VehicleQuery]) -> Result<()> {
    for (index, query) in queries.iter().enumerate() {
        query
            .check_selection()
            .with_context(|| format!("batch entry {index} is not in the catalog"))?;
        if !query.has_required_fields() {
            bail!("batch entry {index}: {}", client_core::error::VALIDATION_MESSAGE);
        }
    }
    Ok(())
}

async fn predict(client: PredictionClient, args: &PredictArgs) -> Result<ExitCode> {
    let service: Arc<dyn PredictionService> = Arc::new(client);
    let mut session = SessionController::new(service, Handle::current());

    if let Some(brand) = &args.brand {
        session.set_brand(brand);
    }
    let fields = [
        (QueryField::Model, &args.model),
        (QueryField::Year, &args.year),
        (QueryField::MileageKm, &args.mileage),
        (QueryField::PowerHp, &args.power),
        (QueryField::EngineCc, &args.engine),
        (QueryField::FuelType, &args.fuel),
        (QueryField::BodyType, &args.body),
        (QueryField::Color, &args.color),
        (QueryField::Transmission, &args.transmission),
    ];
    for (field, value) in fields {
        if let Some(raw) = value {
            session.set_field(field, raw)?;
        }
    }

    if let Submission::InFlight(_) = session.submit() {
        println!("Predicting…");
        session.wait_for_resolution().await;
    }

    let snapshot = session.snapshot();
    print!("{}", render::snapshot(&snapshot));
    Ok(match snapshot.state {
        SessionState::Succeeded(_) => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}
