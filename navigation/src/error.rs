use thiserror::Error;

use crate::polyline::PolylineError;
use crate::tracker::InvalidRoute;

#[derive(Debug, Error)]
pub enum RouteError {
    #[error("no route found")]
    NoRoute,
    #[error("invalid directions payload: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to decode route polyline: {0}")]
    Polyline(#[from] PolylineError),
    #[error(transparent)]
    InvalidRoute(#[from] InvalidRoute),
}
