//! IP lookup response models

use serde::{Deserialize, Serialize};

/// `GET /json/`
///
/// On failure the service answers 200 with `{"error": true, "reason": ...}`,
/// so every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IpLookupResponse {
    /// Latitude of the estimated position
    #[serde(default)]
    pub latitude: Option<f64>,
    /// Longitude of the estimated position
    #[serde(default)]
    pub longitude: Option<f64>,
    /// City of the estimated position
    #[serde(default)]
    pub city: Option<String>,
    /// Set when the lookup failed
    #[serde(default)]
    pub error: bool,
    /// Failure reason ("RateLimited", "Reserved IP Address")
    #[serde(default)]
    pub reason: Option<String>,
}

/// Position estimated from the public IP address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IpLocation {
    /// Latitude
    pub latitude: f64,
    /// Longitude
    pub longitude: f64,
    /// City, when the service knows it
    pub city: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_success_body() {
        let body = r#"{"ip":"203.0.113.7","city":"Lisbon","latitude":38.7167,"longitude":-9.1333}"#;
        let parsed: IpLookupResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Lisbon"));
        assert!(!parsed.error);
    }

    #[test]
    fn parses_error_body() {
        let body = r#"{"error":true,"reason":"RateLimited","message":"Visit https://ipapi.co/ratelimited/"}"#;
        let parsed: IpLookupResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.error);
        assert_eq!(parsed.reason.as_deref(), Some("RateLimited"));
        assert!(parsed.latitude.is_none());
    }
}
