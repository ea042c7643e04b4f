// Copyright 2025 Chris Custine
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Identify (point sample) queries against the MapServer.
//!
//! An identify call returns the raw raster value under a point. The service
//! reports it as a string attribute under one of two keys, and uses the
//! literal `NoData` when the point falls outside the grid.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::IdentifyError;
use crate::layers::LayerId;

/// Attribute keys the service uses for the sampled value.
pub const PIXEL_VALUE_KEYS: [&str; 2] = ["Pixel Value", "Pixel value"];

/// Sentinel returned for cells without data.
pub const NO_DATA: &str = "NoData";

/// Regional extent sent with every query (west, south, east, north).
pub const CONUS_EXTENT: [f64; 4] = [-130.0, 20.0, -60.0, 55.0];

/// A WGS-84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

impl GeoPoint {
    #[must_use]
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Parameters of one identify request.
#[derive(Debug, Clone)]
pub struct IdentifyQuery {
    pub layer: LayerId,
    pub point: GeoPoint,
    pub extent: [f64; 4],
    pub tolerance: u32,
    /// Width, height and DPI of the notional display.
    pub image_display: (u32, u32, u32),
}

impl IdentifyQuery {
    #[must_use]
    pub fn new(layer: LayerId, point: GeoPoint) -> Self {
        Self {
            layer,
            point,
            extent: CONUS_EXTENT,
            tolerance: 2,
            image_display: (800, 600, 96),
        }
    }

    /// Query string pairs in the order the service documents them.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let [west, south, east, north] = self.extent;
        let (width, height, dpi) = self.image_display;
        vec![
            ("f", "json".to_string()),
            ("geometry", format!("{},{}", self.point.lon, self.point.lat)),
            ("geometryType", "esriGeometryPoint".to_string()),
            ("sr", "4326".to_string()),
            ("layers", format!("all:{}", self.layer)),
            ("tolerance", self.tolerance.to_string()),
            ("mapExtent", format!("{west},{south},{east},{north}")),
            ("imageDisplay", format!("{width},{height},{dpi}")),
            ("returnGeometry", "false".to_string()),
        ]
    }
}

#[derive(Debug, Deserialize)]
struct IdentifyResponse {
    #[serde(default)]
    results: Vec<IdentifyResult>,
}

#[derive(Debug, Deserialize)]
struct IdentifyResult {
    #[serde(default)]
    attributes: Map<String, Value>,
}

/// Extract the pixel value from a raw identify response body.
///
/// Returns `Ok(None)` for an empty result set, a missing field, `NoData`,
/// or text that is not a number.
pub fn parse_pixel_value(body: &str) -> Result<Option<f64>, IdentifyError> {
    let response: IdentifyResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .iter()
        .find_map(|result| pixel_value(&result.attributes)))
}

fn pixel_value(attributes: &Map<String, Value>) -> Option<f64> {
    let raw = PIXEL_VALUE_KEYS.iter().find_map(|key| attributes.get(*key))?;
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) if s.trim() == NO_DATA => None,
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// Something that can sample a layer at a point.
///
/// The HTTP client is the production implementation; tests substitute
/// canned readings.
#[async_trait]
pub trait PointSampler: Send + Sync {
    async fn sample(&self, layer: LayerId, point: GeoPoint) -> Result<Option<f64>, IdentifyError>;
}

/// HTTP client for `{service}/identify`.
#[derive(Debug, Clone)]
pub struct IdentifyClient {
    http: reqwest::Client,
    service_url: String,
}

impl IdentifyClient {
    /// Build a client for `service_url` with a per-request timeout.
    pub fn new(service_url: impl Into<String>, timeout: Duration) -> Result<Self, IdentifyError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self::with_http(http, service_url))
    }

    /// Reuse an existing `reqwest::Client`.
    pub fn with_http(http: reqwest::Client, service_url: impl Into<String>) -> Self {
        Self {
            http,
            service_url: service_url.into().trim_end_matches('/').to_string(),
        }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        format!("{}/identify", self.service_url)
    }

    pub async fn identify(&self, query: &IdentifyQuery) -> Result<Option<f64>, IdentifyError> {
        let request = self.http.get(self.endpoint()).query(&query.params());
        debug!("identify layer {} at {:?}", query.layer, query.point);

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(IdentifyError::Status(response.status()));
        }
        let body = response.text().await?;
        parse_pixel_value(&body)
    }
}

#[async_trait]
impl PointSampler for IdentifyClient {
    async fn sample(&self, layer: LayerId, point: GeoPoint) -> Result<Option<f64>, IdentifyError> {
        self.identify(&IdentifyQuery::new(layer, point)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params() {
        let query = IdentifyQuery::new(LayerId(124), GeoPoint::new(39.7392, -104.9903));
        let params = query.params();
        let get = |key: &str| params.iter().find(|(k, _)| *k == key).map(|(_, v)| v.as_str());

        assert_eq!(get("f"), Some("json"));
        assert_eq!(get("geometry"), Some("-104.9903,39.7392"));
        assert_eq!(get("geometryType"), Some("esriGeometryPoint"));
        assert_eq!(get("sr"), Some("4326"));
        assert_eq!(get("layers"), Some("all:124"));
        assert_eq!(get("tolerance"), Some("2"));
        assert_eq!(get("mapExtent"), Some("-130,20,-60,55"));
        assert_eq!(get("imageDisplay"), Some("800,600,96"));
        assert_eq!(get("returnGeometry"), Some("false"));
    }

    #[test]
    fn test_parse_string_value() {
        let body = r#"{"results":[{"layerId":124,"attributes":{"Pixel Value":"55.4"}}]}"#;
        assert_eq!(parse_pixel_value(body).unwrap(), Some(55.4));
    }

    #[test]
    fn test_parse_alternate_key_and_number() {
        let body = r#"{"results":[{"attributes":{"Pixel value":-3.5}}]}"#;
        assert_eq!(parse_pixel_value(body).unwrap(), Some(-3.5));
    }

    #[test]
    fn test_parse_no_data() {
        let body = r#"{"results":[{"attributes":{"Pixel Value":"NoData"}}]}"#;
        assert_eq!(parse_pixel_value(body).unwrap(), None);
    }

    #[test]
    fn test_parse_missing_field_and_empty_results() {
        assert_eq!(parse_pixel_value(r#"{"results":[{"attributes":{"Name":"x"}}]}"#).unwrap(), None);
        assert_eq!(parse_pixel_value(r#"{"results":[]}"#).unwrap(), None);
        assert_eq!(parse_pixel_value("{}").unwrap(), None);
    }

    #[test]
    fn test_parse_first_result_with_value_wins() {
        let body = r#"{"results":[
            {"attributes":{"Pixel Value":"NoData"}},
            {"attributes":{"Pixel Value":"71"}}
        ]}"#;
        assert_eq!(parse_pixel_value(body).unwrap(), Some(71.0));
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(parse_pixel_value("<html>"), Err(IdentifyError::Json(_))));
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = IdentifyClient::with_http(reqwest::Client::new(), "https://example.com/MapServer/");
        assert_eq!(client.endpoint(), "https://example.com/MapServer/identify");
    }
}
