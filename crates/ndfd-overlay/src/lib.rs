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

//! NDFD temperature overlay logic, independent of any GUI toolkit.
//!
//! The crate is split into small layers that the desktop app composes:
//!
//! - **Layers**: the static (metric, day) → MapServer layer table
//! - **State**: the view state and the click policy guarding it
//! - **Controller**: one active overlay, the unavailable notice and the
//!   city markers, reconciled on every refresh
//! - **Identify / fetcher**: point samples for each state capital, fetched
//!   sequentially on a background task
//! - **Buttons**: active/disabled styling and calendar labels
//!
//! # Quick Start
//!
//! ```
//! use ndfd_overlay::{
//!     ControllerConfig, LayerController, LayerId, LayerTable, MapSurface, Metric, OverlaySpec,
//!     UiAction,
//! };
//!
//! #[derive(Default)]
//! struct Printer;
//!
//! impl MapSurface for Printer {
//!     type Handle = LayerId;
//!
//!     fn add_overlay(&mut self, overlay: &OverlaySpec) -> LayerId {
//!         println!("show layer {}", overlay.layer);
//!         overlay.layer
//!     }
//!
//!     fn remove_overlay(&mut self, layer: LayerId) {
//!         println!("hide layer {layer}");
//!     }
//! }
//!
//! let mut controller =
//!     LayerController::new(Printer, LayerTable::ndfd_default(), ControllerConfig::default());
//! controller.refresh();
//! controller.handle(UiAction::SelectMetric(Metric::Low));
//! assert_eq!(controller.active_layer(), Some(LayerId(137)));
//! ```

pub mod buttons;
pub mod catalog;
pub mod cities;
pub mod controller;
pub mod error;
pub mod fetcher;
pub mod identify;
pub mod layers;
pub mod state;

pub use buttons::{day_label, day_labels, ButtonStates, DayButton, DayLabel, MetricButton};
pub use catalog::{LayerCatalog, LayerInfo, LayerKind};
pub use cities::{City, STATE_CAPITALS};
pub use controller::{
    CityMarker, ControllerConfig, Generation, LayerController, MapSurface, OverlaySpec, RefreshOutcome,
    UnavailableNotice,
};
pub use error::{CatalogError, IdentifyError};
pub use fetcher::{fetch_readings, CityBatch, CityFeed, CityReading};
pub use identify::{GeoPoint, IdentifyClient, IdentifyQuery, PointSampler};
pub use layers::{Day, LayerId, LayerTable, Metric, MAX_SELECTABLE_DAY, NDFD_TEMP_MAPSERVER};
pub use state::{IgnoreReason, Transition, UiAction, UnavailablePolicy, ViewState};
