use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::{Coordinate, Route, Step};

use crate::format::strip_instruction_markup;

/// Radius around a step endpoint within which the step counts as done,
/// in meters. The comparison is strict, a fix sitting exactly on the
/// threshold does not advance.
pub const ARRIVAL_THRESHOLD_M: f64 = 30.0;

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum InvalidRoute {
    #[error("route path has {0} points, a drawable route needs at least 2")]
    PathTooShort(usize),
    #[error("route has no turn-by-turn steps")]
    NoSteps,
}

/// A single observed position. Only the coordinate feeds the tracker;
/// the timestamp exists for hosts that log or display fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionFix {
    pub coord: Coordinate,
    pub recorded_at: DateTime<Utc>,
}

impl PositionFix {
    pub fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            recorded_at: Utc::now(),
        }
    }
}

/// Progress snapshot over an immutable route: which step is current and
/// how much of the path prefix has been covered.
///
/// The state is a value. `on_position_fix` never mutates in place, it
/// returns the successor state, so a host holds exactly one current copy
/// and replaces it on every fix. Nothing here is synchronized; a
/// multi-threaded host must serialize calls itself.
#[derive(Debug, Clone)]
pub struct TrackerState {
    route: Arc<Route>,
    current_step_index: usize,
    traversed_len: usize,
}

impl TrackerState {
    /// Start tracking a freshly resolved route at its first step with
    /// nothing traversed. A route too sparse to draw or without steps is
    /// a resolution failure upstream and is rejected rather than
    /// defaulted.
    pub fn new(route: Route) -> Result<Self, InvalidRoute> {
        if route.path.len() < 2 {
            return Err(InvalidRoute::PathTooShort(route.path.len()));
        }
        if route.steps.is_empty() {
            return Err(InvalidRoute::NoSteps);
        }
        Ok(Self {
            route: Arc::new(route),
            current_step_index: 0,
            traversed_len: 0,
        })
    }

    /// Fold one position fix into the state.
    ///
    /// Step advancement moves forward by at most one step per fix, and
    /// only while the fix is strictly inside the arrival radius of the
    /// current step's endpoint. A fix near some later step therefore
    /// needs successive fixes to catch up. The last step is terminal.
    ///
    /// The traversed prefix snaps to the nearest path point by planar
    /// distance, earliest index on ties. It can move backwards when a
    /// fix is genuinely closer to an earlier point.
    #[must_use]
    pub fn on_position_fix(&self, fix: &PositionFix) -> Self {
        let step_end = self.route.steps[self.current_step_index].end_location;
        let to_step_end = haversine_m(fix.coord, step_end);
        let advance = should_advance(to_step_end, self.is_last_step());
        let current_step_index = self.current_step_index + usize::from(advance);
        if advance {
            tracing::debug!(
                step = current_step_index,
                distance_m = to_step_end,
                "reached step endpoint, advancing"
            );
        }

        let nearest = nearest_path_index(&self.route.path, fix.coord);

        Self {
            route: Arc::clone(&self.route),
            current_step_index,
            traversed_len: nearest + 1,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn current_step_index(&self) -> usize {
        self.current_step_index
    }

    pub fn current_step(&self) -> &Step {
        &self.route.steps[self.current_step_index]
    }

    pub fn is_last_step(&self) -> bool {
        self.current_step_index + 1 == self.route.steps.len()
    }

    /// Path points covered so far, as an inclusive prefix of the route
    /// path. Empty until the first fix arrives.
    pub fn traversed_prefix(&self) -> &[Coordinate] {
        &self.route.path[..self.traversed_len]
    }

    /// Current instruction with markup stripped for display.
    pub fn current_instruction(&self) -> String {
        strip_instruction_markup(&self.current_step().instruction)
    }

    /// Upcoming instruction, if any, with markup stripped.
    pub fn next_instruction(&self) -> Option<String> {
        self.route
            .steps
            .get(self.current_step_index + 1)
            .map(|step| strip_instruction_markup(&step.instruction))
    }

    /// Completion derived from step progression. This is the
    /// position-driven alternative to an externally simulated
    /// [`ProgressFactor`]; renderers pick whichever matches their trip
    /// model.
    pub fn step_progress_factor(&self) -> f64 {
        self.current_step_index as f64 / self.route.steps.len() as f64
    }

    pub fn remaining_distance_m(&self, progress_factor: f64) -> f64 {
        self.route.total_distance_m * (1.0 - progress_factor.clamp(0.0, 1.0))
    }

    pub fn remaining_duration_secs(&self, progress_factor: f64) -> f64 {
        self.route.total_duration_secs * (1.0 - progress_factor.clamp(0.0, 1.0))
    }
}

/// Externally driven trip-completion scalar in `[0, 1]`.
///
/// Hosts advance it from their own signal, historically a manual
/// "simulate update" action adding a tenth per press. It deliberately
/// does not read the tracker; `TrackerState::step_progress_factor` is
/// the position-derived counterpart.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProgressFactor(f64);

impl ProgressFactor {
    const SIMULATION_STEP: f64 = 0.1;

    pub fn new(value: f64) -> Self {
        Self(value.clamp(0.0, 1.0))
    }

    /// One simulated tick of progress, saturating at completion.
    pub fn advance(&mut self) {
        self.0 = (self.0 + Self::SIMULATION_STEP).min(1.0);
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_complete(self) -> bool {
        self.0 >= 1.0
    }
}

fn should_advance(distance_to_step_end_m: f64, at_last_step: bool) -> bool {
    distance_to_step_end_m < ARRIVAL_THRESHOLD_M && !at_last_step
}

/// Great-circle distance in meters on a spherical Earth. Used only for
/// the arrival check; everything else runs on the cheaper planar
/// approximation.
pub fn haversine_m(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = (b.lat - a.lat).to_radians();
    let dlon = (b.lon - a.lon).to_radians();

    let sin_dlat = (dlat / 2.0).sin();
    let sin_dlon = (dlon / 2.0).sin();

    let h = sin_dlat * sin_dlat + lat1.cos() * lat2.cos() * sin_dlon * sin_dlon;
    2.0 * EARTH_RADIUS_M * h.sqrt().atan2((1.0 - h).sqrt())
}

/// Index of the path point closest to `target` in planar degree space.
/// Linear scan, earliest index wins ties. Good enough at city-map zoom
/// where the flat-Earth error is far below the fix jitter.
pub fn nearest_path_index(path: &[Coordinate], target: Coordinate) -> usize {
    let mut best = 0;
    let mut best_dist = f64::INFINITY;
    for (i, point) in path.iter().enumerate() {
        let dlat = point.lat - target.lat;
        let dlon = point.lon - target.lon;
        let dist = dlat * dlat + dlon * dlon;
        if dist < best_dist {
            best = i;
            best_dist = dist;
        }
    }
    best
}
