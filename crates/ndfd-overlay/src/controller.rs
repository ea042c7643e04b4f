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

//! Layer controller: owns the view state, the single active overlay and the
//! city markers, and keeps them consistent after every state change.

use log::{info, warn};

use crate::buttons::ButtonStates;
use crate::cities::City;
use crate::fetcher::CityReading;
use crate::layers::{LayerId, LayerTable, NDFD_TEMP_MAPSERVER};
use crate::state::{UiAction, UnavailablePolicy, ViewState};

/// Heading of the banner shown when no map exists for the selection.
pub const UNAVAILABLE_HEADING: &str = "Map Unavailable";

/// Body of the banner shown when no map exists for the selection.
pub const UNAVAILABLE_BODY: &str = "Regional heatmap is only available for Days 1-3.";

/// Where overlays are drawn. Implemented by the desktop map and by tests.
pub trait MapSurface {
    /// Token identifying an added overlay, handed back on removal.
    type Handle;

    fn add_overlay(&mut self, overlay: &OverlaySpec) -> Self::Handle;

    fn remove_overlay(&mut self, handle: Self::Handle);
}

/// Everything a surface needs to render one overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlaySpec {
    pub service_url: String,
    pub layer: LayerId,
    /// 0.0 (invisible) to 1.0 (opaque).
    pub opacity: f32,
}

/// User-visible notice raised when the selection has no layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnavailableNotice {
    pub heading: String,
    pub body: String,
}

impl Default for UnavailableNotice {
    fn default() -> Self {
        Self {
            heading: UNAVAILABLE_HEADING.to_string(),
            body: UNAVAILABLE_BODY.to_string(),
        }
    }
}

/// A city label with its raw sampled value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CityMarker {
    pub city: City,
    pub value: f64,
}

impl CityMarker {
    /// Marker for a reading, or `None` when the city has no value.
    #[must_use]
    pub fn from_reading(reading: &CityReading) -> Option<Self> {
        reading.value.map(|value| Self { city: reading.city, value })
    }

    /// Display text, rounded to the nearest degree.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, reason = "temperatures fit comfortably in i64")]
    pub fn label(&self) -> String {
        format!("{}°", self.value.round() as i64)
    }
}

/// Refresh counter. City batches carry the generation they were requested
/// for; anything older than the current one is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(pub u64);

/// Tunables for the controller.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    pub service_url: String,
    pub opacity: f32,
    pub policy: UnavailablePolicy,
    pub show_city_markers: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            service_url: NDFD_TEMP_MAPSERVER.to_string(),
            opacity: 0.6,
            policy: UnavailablePolicy::default(),
            show_city_markers: true,
        }
    }
}

/// What a refresh did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub generation: Generation,
    /// Layer now shown, `None` when the selection is unavailable.
    pub layer: Option<LayerId>,
    /// Whether the caller should request city readings for `layer`.
    pub fetch_cities: bool,
}

struct ActiveOverlay<H> {
    layer: LayerId,
    handle: H,
}

/// Owns the view state and everything rendered from it.
pub struct LayerController<S: MapSurface> {
    surface: S,
    table: LayerTable,
    config: ControllerConfig,
    state: ViewState,
    active: Option<ActiveOverlay<S::Handle>>,
    notice: Option<UnavailableNotice>,
    markers: Vec<CityMarker>,
    generation: Generation,
}

impl<S: MapSurface> std::fmt::Debug for LayerController<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerController")
            .field("state", &self.state)
            .field("active_layer", &self.active_layer())
            .field("notice", &self.notice)
            .field("markers", &self.markers.len())
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl<S: MapSurface> LayerController<S> {
    /// Create a controller in the default state. Nothing is drawn until the
    /// first [`refresh`](Self::refresh).
    pub fn new(surface: S, table: LayerTable, config: ControllerConfig) -> Self {
        Self {
            surface,
            table,
            config,
            state: ViewState::default(),
            active: None,
            notice: None,
            markers: Vec::new(),
            generation: Generation::default(),
        }
    }

    #[must_use]
    pub fn state(&self) -> ViewState {
        self.state
    }

    #[must_use]
    pub fn table(&self) -> &LayerTable {
        &self.table
    }

    #[must_use]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[must_use]
    pub fn active_layer(&self) -> Option<LayerId> {
        self.active.as_ref().map(|a| a.layer)
    }

    #[must_use]
    pub fn notice(&self) -> Option<&UnavailableNotice> {
        self.notice.as_ref()
    }

    #[must_use]
    pub fn markers(&self) -> &[CityMarker] {
        &self.markers
    }

    #[must_use]
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Button styling for the current state.
    #[must_use]
    pub fn buttons(&self) -> ButtonStates {
        ButtonStates::from_state(self.state, &self.table, self.config.policy)
    }

    /// Route a click through the policy. Refreshes only when the state changed.
    pub fn handle(&mut self, action: UiAction) -> Option<RefreshOutcome> {
        if self.state.apply(action, &self.table, self.config.policy) {
            Some(self.refresh())
        } else {
            None
        }
    }

    /// Reconcile the overlay, notice and markers with the current state.
    pub fn refresh(&mut self) -> RefreshOutcome {
        self.generation = Generation(self.generation.0 + 1);
        self.markers.clear();

        // Old overlay goes first so two are never live at once.
        if let Some(previous) = self.active.take() {
            self.surface.remove_overlay(previous.handle);
        }

        let ViewState { metric, day } = self.state;
        let layer = self.table.get(metric, day);

        match layer {
            Some(layer) => {
                info!("Loading MapServer layer {} for day {} {}", layer, day, metric);
                let spec = OverlaySpec {
                    service_url: self.config.service_url.clone(),
                    layer,
                    opacity: self.config.opacity,
                };
                let handle = self.surface.add_overlay(&spec);
                self.active = Some(ActiveOverlay { layer, handle });
                self.notice = None;
            }
            None => {
                warn!("No map layer available for day {} {}", day, metric);
                self.notice = Some(UnavailableNotice::default());
            }
        }

        RefreshOutcome {
            generation: self.generation,
            layer,
            fetch_cities: layer.is_some() && self.config.show_city_markers,
        }
    }

    /// Replace the marker set with a batch fetched for `generation`.
    ///
    /// Returns false, leaving markers untouched, when the batch is stale.
    pub fn apply_city_readings(&mut self, generation: Generation, readings: &[CityReading]) -> bool {
        if generation != self.generation {
            info!(
                "Discarding city readings for generation {} (current {})",
                generation.0, self.generation.0
            );
            return false;
        }
        self.markers = readings.iter().filter_map(CityMarker::from_reading).collect();
        true
    }
}
