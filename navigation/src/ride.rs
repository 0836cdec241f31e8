// Ride sessions: the small JSON blob a host persists between app starts,
// plus the code-sharing rules for group rides. Storage itself stays with
// the host; this module only owns the shapes and the rules.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::Coordinate;

const RIDE_CODE_LEN: usize = 6;
const RIDE_CODE_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Destinations the app can resolve without a places lookup.
const KNOWN_DESTINATIONS: &[(&str, Coordinate)] = &[
    (
        "Nandi Hills",
        Coordinate {
            lat: 13.3702,
            lon: 77.6835,
        },
    ),
    (
        "MG Road",
        Coordinate {
            lat: 12.9756,
            lon: 77.6056,
        },
    ),
    (
        "Lalbagh",
        Coordinate {
            lat: 12.9507,
            lon: 77.5848,
        },
    ),
];

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum RideError {
    #[error("a destination is required to create a ride")]
    MissingDestination,
    #[error("ride code must be {RIDE_CODE_LEN} characters, got {0}")]
    CodeLength(usize),
    #[error("ride code may only contain letters and digits")]
    CodeCharacter,
}

/// Persisted ride membership. Serialized field names match the session
/// blobs older app builds already stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RideSession {
    pub ride_code: String,
    pub destination: Option<String>,
    pub is_organizer: bool,
    pub created_at: DateTime<Utc>,
}

impl RideSession {
    /// Start a new ride as organizer with a freshly generated share code.
    pub fn create(destination: &str) -> Result<Self, RideError> {
        let destination = destination.trim();
        if destination.is_empty() {
            return Err(RideError::MissingDestination);
        }
        let session = Self {
            ride_code: new_ride_code(),
            destination: Some(destination.to_string()),
            is_organizer: true,
            created_at: Utc::now(),
        };
        tracing::info!(code = %session.ride_code, destination, "created ride");
        Ok(session)
    }

    /// Join an existing ride by code. The organizer's destination is
    /// learned later through the shared session, so it starts unset.
    pub fn join(code: &str) -> Result<Self, RideError> {
        let ride_code = normalize_ride_code(code)?;
        Ok(Self {
            ride_code,
            destination: None,
            is_organizer: false,
            created_at: Utc::now(),
        })
    }

    /// Invitation text for the platform share sheet.
    pub fn share_message(&self) -> String {
        match &self.destination {
            Some(destination) => format!(
                "Join my ride to {destination} using this code: {}",
                self.ride_code
            ),
            None => format!("Join my ride using this code: {}", self.ride_code),
        }
    }
}

pub fn new_ride_code() -> String {
    use rand::Rng;
    let charset = RIDE_CODE_CHARSET.as_bytes();
    let mut rng = rand::thread_rng();
    (0..RIDE_CODE_LEN)
        .map(|_| charset[rng.gen_range(0..charset.len())] as char)
        .collect()
}

/// Trim and upcase user input, then check the code shape.
pub fn normalize_ride_code(input: &str) -> Result<String, RideError> {
    let code = input.trim().to_uppercase();
    let len = code.chars().count();
    if len != RIDE_CODE_LEN {
        return Err(RideError::CodeLength(len));
    }
    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(RideError::CodeCharacter);
    }
    Ok(code)
}

/// Coordinates for a destination the catalog knows, if any.
pub fn destination_coordinates(name: &str) -> Option<Coordinate> {
    KNOWN_DESTINATIONS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name.trim()))
        .map(|(_, coord)| *coord)
}

/// Average trip speed in km/h, or `None` for a zero-length duration.
pub fn average_speed_kmh(distance_m: f64, duration_secs: f64) -> Option<f64> {
    if duration_secs <= 0.0 {
        return None;
    }
    Some(distance_m / 1_000.0 * 3_600.0 / duration_secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_codes_have_the_share_shape() {
        for _ in 0..50 {
            let code = new_ride_code();
            assert_eq!(code.len(), RIDE_CODE_LEN);
            assert!(code
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn create_requires_a_destination() {
        assert_eq!(
            RideSession::create("  ").unwrap_err(),
            RideError::MissingDestination
        );
        let session = RideSession::create("Nandi Hills").expect("session");
        assert!(session.is_organizer);
        assert_eq!(session.destination.as_deref(), Some("Nandi Hills"));
    }

    #[test]
    fn join_normalizes_the_entered_code() {
        let session = RideSession::join("  ab12cd ").expect("session");
        assert_eq!(session.ride_code, "AB12CD");
        assert!(!session.is_organizer);
        assert_eq!(session.destination, None);
    }

    #[test]
    fn join_rejects_malformed_codes() {
        assert_eq!(
            RideSession::join("AB12").unwrap_err(),
            RideError::CodeLength(4)
        );
        assert_eq!(
            RideSession::join("AB 12CD").unwrap_err(),
            RideError::CodeLength(7)
        );
        assert_eq!(
            RideSession::join("AB12C!").unwrap_err(),
            RideError::CodeCharacter
        );
    }

    #[test]
    fn share_message_names_the_destination_when_known() {
        let mut session = RideSession::create("Lalbagh").expect("session");
        session.ride_code = "RIDE12".to_string();
        assert_eq!(
            session.share_message(),
            "Join my ride to Lalbagh using this code: RIDE12"
        );
        let joined = RideSession::join("RIDE12").expect("session");
        assert_eq!(
            joined.share_message(),
            "Join my ride using this code: RIDE12"
        );
    }

    #[test]
    fn session_blob_round_trips_with_camel_case_fields() {
        let session = RideSession::create("MG Road").expect("session");
        let blob = serde_json::to_string(&session).expect("serialize");
        assert!(blob.contains("\"rideCode\""));
        assert!(blob.contains("\"isOrganizer\""));
        let restored: RideSession = serde_json::from_str(&blob).expect("deserialize");
        assert_eq!(restored, session);
    }

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        let coord = destination_coordinates("mg road").expect("known destination");
        assert_eq!(coord, Coordinate { lat: 12.9756, lon: 77.6056 });
        assert_eq!(destination_coordinates("Atlantis"), None);
    }

    #[test]
    fn average_speed_handles_zero_duration() {
        assert_eq!(average_speed_kmh(10_000.0, 0.0), None);
        let speed = average_speed_kmh(10_000.0, 1_800.0).expect("speed");
        assert!((speed - 20.0).abs() < 1e-9);
    }
}
