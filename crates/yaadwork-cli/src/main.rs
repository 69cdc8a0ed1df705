use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};

use yaadwork_core::{load_app_config, load_parishes, parish_of_town, Coordinate, GeoPoint};
use yaadwork_geo::{distance_km, format_distance, ApproximateSource, IpLocateClient};
use yaadwork_search::{badge_for, format_amount, rank, validate_range};

#[derive(Debug, Parser)]
#[command(name = "yaadwork")]
#[command(about = "Location-aware job discovery toolkit")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Resolve an approximate position from the configured IP locate endpoint
    Locate,
    /// Great-circle distance between two points
    Distance {
        #[arg(long)]
        from_lat: f64,
        #[arg(long)]
        from_lng: f64,
        #[arg(long)]
        to_lat: f64,
        #[arg(long)]
        to_lng: f64,
    },
    /// Validate and format a salary range
    Salary {
        #[arg(long)]
        min: i64,
        #[arg(long)]
        max: i64,
    },
    /// Print the capped recommendation view for a JSON file of candidates
    Rank {
        /// JSON array of job candidates
        jobs: PathBuf,
        #[arg(long, requires = "lng")]
        lat: Option<f64>,
        #[arg(long, requires = "lat")]
        lng: Option<f64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Locate => locate().await,
        Commands::Distance {
            from_lat,
            from_lng,
            to_lat,
            to_lng,
        } => {
            let d = distance_km(
                GeoPoint {
                    lat: from_lat,
                    lng: from_lng,
                },
                GeoPoint {
                    lat: to_lat,
                    lng: to_lng,
                },
            );
            println!("{d} km ({})", format_distance(d));
            Ok(())
        }
        Commands::Salary { min, max } => {
            match validate_range(min, max) {
                Ok(()) => println!(
                    "{} to {}",
                    format_amount(min, true),
                    format_amount(max, true)
                ),
                Err(err) => println!("invalid range: {err}"),
            }
            Ok(())
        }
        Commands::Rank { jobs, lat, lng } => rank_file(&jobs, lat, lng),
    }
}

async fn locate() -> anyhow::Result<()> {
    let config = load_app_config()?;
    let client = IpLocateClient::new(
        config.ip_locate_endpoint.clone(),
        config.ip_locate_timeout_secs,
        &config.ip_locate_user_agent,
    )?;
    let fix = client
        .locate()
        .await
        .context("could not approximate a position")?;

    println!("approximate position: {:.4}, {:.4}", fix.latitude, fix.longitude);
    if let Some(city) = &fix.city {
        println!("near: {city}");
        let parishes = load_parishes(&config.parishes_path)?;
        if let Some(parish) = parish_of_town(&parishes, city) {
            println!("parish: {}", parish.name);
        }
    }
    Ok(())
}

fn rank_file(jobs_path: &PathBuf, lat: Option<f64>, lng: Option<f64>) -> anyhow::Result<()> {
    let config = load_app_config()?;
    let raw = std::fs::read_to_string(jobs_path)
        .with_context(|| format!("reading {}", jobs_path.display()))?;
    let candidates: Vec<yaadwork_core::JobCandidate> =
        serde_json::from_str(&raw).context("candidates file must be a JSON array of jobs")?;

    let user = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(
            Coordinate::new(lat, lng, 0.0, Utc::now(), false, None)
                .context("invalid user coordinate")?,
        ),
        _ => None,
    };

    let ranked = rank(&candidates, user.as_ref(), config.recommendation_display_cap);
    tracing::debug!(
        total = candidates.len(),
        shown = ranked.len(),
        "ranked candidate view"
    );

    for entry in &ranked {
        let badge = badge_for(&entry.job);
        let distance = entry
            .distance_km
            .map_or_else(String::new, |d| format!("  ({})", format_distance(d)));
        println!(
            "{} at {} [{}]{}",
            entry.job.title, entry.job.company_name, badge, distance
        );
    }
    Ok(())
}
