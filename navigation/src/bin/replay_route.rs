use std::{fs, path::PathBuf};

use clap::Parser;
use navigation::directions;
use navigation::format::{format_distance_km, format_duration};
use navigation::tracker::{PositionFix, ProgressFactor, TrackerState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "Replay a saved directions document and print turn-by-turn progress"
)]
struct Args {
    /// Path to a directions JSON document saved from the routing provider
    #[arg(long)]
    directions: PathBuf,

    /// Feed every Nth path point to the tracker as a position fix
    #[arg(long, default_value_t = 5)]
    stride: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let payload = fs::read_to_string(&args.directions)?;
    let route = directions::parse_route(&payload)?;
    tracing::info!(
        points = route.path.len(),
        steps = route.steps.len(),
        distance = %format_distance_km(route.total_distance_m),
        duration = %format_duration(route.total_duration_secs),
        "resolved route"
    );

    let mut state = TrackerState::new(route)?;
    let mut progress = ProgressFactor::default();
    let stride = args.stride.max(1);
    let fixes: Vec<PositionFix> = state
        .route()
        .path
        .iter()
        .step_by(stride)
        .copied()
        .map(PositionFix::new)
        .collect();

    let mut last_instruction = String::new();
    for fix in &fixes {
        state = state.on_position_fix(fix);
        progress.advance();

        let instruction = state.current_instruction();
        if instruction != last_instruction {
            tracing::info!(step = state.current_step_index(), %instruction, "now");
            last_instruction = instruction;
        }
        tracing::info!(
            traversed = state.traversed_prefix().len(),
            remaining_distance = %format_distance_km(state.remaining_distance_m(progress.value())),
            remaining_time = %format_duration(state.remaining_duration_secs(progress.value())),
            "position update"
        );
    }

    tracing::info!(
        reached_last_step = state.is_last_step(),
        step_progress = state.step_progress_factor(),
        "replay finished"
    );
    Ok(())
}
