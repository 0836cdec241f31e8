// Parsing of routing-provider direction documents into the shared route
// model. Fetching the document is the host's job; this module only turns
// an already-delivered payload into something the tracker can consume.

use serde::Deserialize;
use shared::{Coordinate, Route, Step};

use crate::error::RouteError;
use crate::polyline;

/// Source of resolved routes.
///
/// Abstracts where a route comes from so hosts can plug in an HTTP
/// client while tests and replay tooling use pre-parsed documents.
/// Implementations signal `RouteError::NoRoute` when nothing connects
/// the two points; the tracker is never constructed in that case.
pub trait RouteProvider {
    fn resolve_route(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<Route, RouteError>;
}

/// Provider that always hands out one pre-resolved route. Used by the
/// replay bin and in tests as the stand-in for a live routing service.
pub struct StaticRouteProvider {
    route: Route,
}

impl StaticRouteProvider {
    pub fn new(route: Route) -> Self {
        Self { route }
    }
}

impl RouteProvider for StaticRouteProvider {
    fn resolve_route(
        &self,
        _origin: Coordinate,
        _destination: Coordinate,
    ) -> Result<Route, RouteError> {
        Ok(self.route.clone())
    }
}

/// Top-level shape of the provider response. Only the fields the app
/// reads are modeled; everything else in the payload is ignored.
#[derive(Debug, Deserialize)]
pub struct DirectionsDocument {
    #[serde(default)]
    routes: Vec<ProviderRoute>,
}

#[derive(Debug, Deserialize)]
struct ProviderRoute {
    overview_polyline: Option<String>,
    #[serde(default)]
    legs: Vec<ProviderLeg>,
}

#[derive(Debug, Deserialize)]
struct ProviderLeg {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    #[serde(default)]
    steps: Vec<ProviderStep>,
}

#[derive(Debug, Deserialize)]
struct ProviderStep {
    instruction: Option<String>,
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    duration: f64,
    end_location: Option<ProviderLocation>,
}

// The provider says `lng` where the rest of the app says `lon`.
#[derive(Debug, Clone, Copy, Deserialize)]
struct ProviderLocation {
    lat: f64,
    lng: f64,
}

impl From<ProviderLocation> for Coordinate {
    fn from(loc: ProviderLocation) -> Self {
        Coordinate {
            lat: loc.lat,
            lon: loc.lng,
        }
    }
}

impl DirectionsDocument {
    pub fn from_json(payload: &str) -> Result<Self, RouteError> {
        Ok(serde_json::from_str(payload)?)
    }

    /// Reduce the document to the first returned route: decode its
    /// polyline, sum leg totals, and flatten steps across legs in
    /// traversal order. Steps the provider ships without an instruction
    /// or endpoint carry nothing displayable and are dropped.
    pub fn into_route(self) -> Result<Route, RouteError> {
        let route = self.routes.into_iter().next().ok_or(RouteError::NoRoute)?;
        let encoded = route.overview_polyline.ok_or(RouteError::NoRoute)?;
        let path = polyline::decode(&encoded)?;

        let mut total_distance_m = 0.0;
        let mut total_duration_secs = 0.0;
        let mut steps = Vec::new();
        for leg in route.legs {
            total_distance_m += leg.distance;
            total_duration_secs += leg.duration;
            for step in leg.steps {
                let (Some(instruction), Some(end)) = (step.instruction, step.end_location) else {
                    continue;
                };
                steps.push(Step {
                    instruction,
                    distance_m: step.distance,
                    duration_secs: step.duration,
                    end_location: end.into(),
                });
            }
        }

        tracing::debug!(
            points = path.len(),
            steps = steps.len(),
            total_distance_m,
            "parsed directions document"
        );

        Ok(Route {
            path,
            steps,
            total_distance_m,
            total_duration_secs,
        })
    }
}

/// Convenience for the common "payload string in, route out" case.
pub fn parse_route(payload: &str) -> Result<Route, RouteError> {
    DirectionsDocument::from_json(payload)?.into_route()
}
