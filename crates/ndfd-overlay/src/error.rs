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

//! Error types for the remote MapServer calls.

use thiserror::Error;

/// Failure of a single identify (point sample) request.
#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("identify returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid identify response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure while reading the MapServer layer catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog returned HTTP {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid catalog response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("map service error {code}: {message}")]
    Service { code: i64, message: String },
}
