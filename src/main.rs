//! Territory Run - demo runner
//!
//! Drives the full engine pipeline against the in-memory stores with a
//! simulated GPS walk: start a session, stream validated samples, end
//! the run, and print the resulting score and claimed territories as
//! JSON.

use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tokio::runtime::Runtime;

use territory_run::core::error::Result;
use territory_run::core::types::UserId;
use territory_run::game::{
    EndSessionRequest, GameService, PushLocationRequest, TerritoryView, ViewBounds,
};
use territory_run::spatial::sphere::destination;
use territory_run::storage::{InMemorySessionStore, InMemoryTerritoryStore};

/// Simulate a run through the capture engine
#[derive(Parser, Debug)]
#[command(name = "territory-run")]
#[command(about = "Simulate a GPS run and print the capture outcome")]
struct Args {
    /// Starting latitude (degrees)
    #[arg(long, default_value_t = 48.8566)]
    lat: f64,

    /// Starting longitude (degrees)
    #[arg(long, default_value_t = 2.3522)]
    lng: f64,

    /// Number of GPS samples to stream
    #[arg(long, default_value_t = 60)]
    samples: u32,

    /// Seconds between samples
    #[arg(long, default_value_t = 10)]
    step_seconds: i64,

    /// Walking speed in meters per second
    #[arg(long, default_value_t = 1.4)]
    speed_ms: f64,

    /// Random seed for a deterministic walk
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug, Serialize)]
struct RunReport {
    total_distance_m: f64,
    points_earned: i64,
    territories_in_view: Vec<TerritoryView>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("territory_run=info")
        .init();

    let args = Args::parse();
    let rt = Runtime::new()?;
    let report = rt.block_on(simulate_run(&args))?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn simulate_run(args: &Args) -> Result<RunReport> {
    let service = GameService::new(InMemorySessionStore::new(), InMemoryTerritoryStore::new());
    let runner = UserId::new();

    let started = service.start_session(runner).await?;
    tracing::info!(session = ?started.session_id, "simulated run starting");

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let base = chrono::Utc::now();
    let (mut lat, mut lng) = (args.lat, args.lng);
    let mut heading: f64 = rng.gen_range(0.0..std::f64::consts::TAU);

    for i in 0..args.samples {
        let request = PushLocationRequest {
            session_id: started.session_id,
            lat,
            lng,
            accuracy_m: Some(rng.gen_range(3.0..12.0)),
            timestamp_ms: Some(
                base.timestamp_millis() + i64::from(i) * args.step_seconds * 1000,
            ),
        };
        let response = service.push_location(runner, request).await?;
        tracing::debug!(
            sample = i,
            total_distance_m = response.total_distance_m,
            "sample accepted"
        );

        // Meander: drift the heading a little and step forward
        heading += rng.gen_range(-0.4..0.4);
        let step_m = args.speed_ms * args.step_seconds as f64;
        (lat, lng) = destination(lat, lng, heading, step_m);
    }

    let ended = service
        .end_session(runner, EndSessionRequest { session_id: started.session_id })
        .await?;

    let view = service
        .territories_in_view(ViewBounds {
            min_lng: args.lng - 0.05,
            min_lat: args.lat - 0.05,
            max_lng: args.lng + 0.05,
            max_lat: args.lat + 0.05,
        })
        .await?;

    Ok(RunReport {
        total_distance_m: ended.total_distance_m,
        points_earned: ended.points_earned,
        territories_in_view: view,
    })
}
