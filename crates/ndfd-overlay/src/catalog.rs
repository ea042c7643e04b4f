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

//! MapServer layer catalog.
//!
//! Used to find the ids of the daily max/min rasters and to check that the
//! configured [`LayerTable`] still matches what the service publishes.

use log::debug;
use serde::Deserialize;

use crate::error::CatalogError;
use crate::layers::{LayerId, LayerTable};

/// One layer as listed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayerInfo {
    pub id: u32,
    pub name: String,
}

/// Layer kind, inferred from its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    MaxTemp,
    MinTemp,
    Other,
}

impl LayerInfo {
    #[must_use]
    pub fn kind(&self) -> LayerKind {
        if self.name.contains("MaxTemp") {
            LayerKind::MaxTemp
        } else if self.name.contains("MinTemp") {
            LayerKind::MinTemp
        } else {
            LayerKind::Other
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    code: i64,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
struct CatalogResponse {
    #[serde(default)]
    layers: Vec<LayerInfo>,
    error: Option<ServiceError>,
}

/// All layers of a MapServer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerCatalog {
    pub layers: Vec<LayerInfo>,
}

impl LayerCatalog {
    /// Parse a `?f=pjson` service description.
    pub fn parse(body: &str) -> Result<Self, CatalogError> {
        let response: CatalogResponse = serde_json::from_str(body)?;
        if let Some(error) = response.error {
            return Err(CatalogError::Service {
                code: error.code,
                message: error.message,
            });
        }
        Ok(Self { layers: response.layers })
    }

    /// Fetch the catalog for `service_url`.
    pub async fn fetch(http: &reqwest::Client, service_url: &str) -> Result<Self, CatalogError> {
        let url = format!("{}?f=pjson", service_url.trim_end_matches('/'));
        debug!("Fetching layer catalog from {}", url);

        let response = http.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(CatalogError::Status(response.status()));
        }
        Self::parse(&response.text().await?)
    }

    /// Layers of `kind`, sorted by name.
    #[must_use]
    pub fn by_kind(&self, kind: LayerKind) -> Vec<&LayerInfo> {
        let mut layers: Vec<_> = self.layers.iter().filter(|l| l.kind() == kind).collect();
        layers.sort_by(|a, b| a.name.cmp(&b.name));
        layers
    }

    #[must_use]
    pub fn contains(&self, id: LayerId) -> bool {
        self.layers.iter().any(|l| l.id == id.0)
    }

    /// Ids in `table` that the service does not list.
    #[must_use]
    pub fn missing_from(&self, table: &LayerTable) -> Vec<LayerId> {
        table.layer_ids().filter(|id| !self.contains(*id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::Metric;

    const SAMPLE: &str = r#"{
        "currentVersion": 10.91,
        "layers": [
            {"id": 132, "name": "Day 3 MaxTemp", "parentLayerId": -1},
            {"id": 124, "name": "Day 1 MaxTemp", "parentLayerId": -1},
            {"id": 137, "name": "Day 1 MinTemp", "parentLayerId": -1},
            {"id": 8, "name": "Temperature", "parentLayerId": -1}
        ]
    }"#;

    #[test]
    fn test_parse_and_categorise() {
        let catalog = LayerCatalog::parse(SAMPLE).unwrap();
        let max: Vec<_> = catalog.by_kind(LayerKind::MaxTemp).iter().map(|l| l.id).collect();
        assert_eq!(max, vec![124, 132]);
        assert_eq!(catalog.by_kind(LayerKind::MinTemp)[0].id, 137);
        assert_eq!(catalog.by_kind(LayerKind::Other)[0].name, "Temperature");
    }

    #[test]
    fn test_missing_ids() {
        let catalog = LayerCatalog::parse(SAMPLE).unwrap();
        let table = LayerTable::from_entries([(Metric::High, 1, 124), (Metric::Low, 2, 141)]);
        assert_eq!(catalog.missing_from(&table), vec![LayerId(141)]);
    }

    #[test]
    fn test_service_error() {
        let body = r#"{"error":{"code":500,"message":"Service not started"}}"#;
        match LayerCatalog::parse(body) {
            Err(CatalogError::Service { code, message }) => {
                assert_eq!(code, 500);
                assert_eq!(message, "Service not started");
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
