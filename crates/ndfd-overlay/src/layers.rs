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

//! Static lookup from (metric, forecast day) to a remote raster layer.
//!
//! The table is built once at startup and never mutated. A missing entry
//! means the upstream service publishes no map for that combination.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// NDFD temperature MapServer hosting the daily max/min rasters.
pub const NDFD_TEMP_MAPSERVER: &str =
    "https://mapservices.weather.noaa.gov/raster/rest/services/NDFD/NDFD_temp/MapServer";

/// Number of day buttons shown in the UI.
pub const FORECAST_DAYS: u8 = 7;

/// Highest day a user may select. Days beyond this are shown but inert.
pub const MAX_SELECTABLE_DAY: u8 = 3;

/// Temperature kind shown by the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    /// Daily maximum temperature.
    #[default]
    High,
    /// Daily minimum temperature.
    Low,
}

impl Metric {
    pub const ALL: [Metric; 2] = [Metric::High, Metric::Low];

    /// Lowercase key, also used for CLI parsing.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Metric::High => "high",
            Metric::Low => "low",
        }
    }

    /// Human-readable button label.
    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            Metric::High => "High",
            Metric::Low => "Low",
        }
    }

    /// Stable widget id for the metric toggle (`btn-high` / `btn-low`).
    #[must_use]
    pub fn button_id(self) -> &'static str {
        match self {
            Metric::High => "btn-high",
            Metric::Low => "btn-low",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forecast day, 1 = today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Day(u8);

impl Day {
    pub const FIRST: Day = Day(1);

    /// Build a day from its 1-based number. Returns `None` outside 1..=7.
    #[must_use]
    pub fn new(number: u8) -> Option<Self> {
        (1..=FORECAST_DAYS).contains(&number).then_some(Self(number))
    }

    #[must_use]
    pub fn number(self) -> u8 {
        self.0
    }

    /// Days from today (0 for day 1).
    #[must_use]
    pub fn offset(self) -> u8 {
        self.0 - 1
    }

    #[must_use]
    pub fn is_selectable(self) -> bool {
        self.0 <= MAX_SELECTABLE_DAY
    }

    /// All forecast days in button order.
    pub fn all() -> impl Iterator<Item = Day> {
        (1..=FORECAST_DAYS).map(Day)
    }
}

impl Default for Day {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a raster layer inside the MapServer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping from (metric, day) to the layer that renders it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerTable {
    layers: BTreeMap<(Metric, Day), LayerId>,
}

impl LayerTable {
    /// Table for the NDFD_temp MapServer (days 1-3 max, days 1-2 min).
    #[must_use]
    pub fn ndfd_default() -> Self {
        Self::from_entries([
            (Metric::High, 1, 124),
            (Metric::High, 2, 128),
            (Metric::High, 3, 132),
            (Metric::Low, 1, 137),
            (Metric::Low, 2, 141),
        ])
    }

    /// Build a table from `(metric, day number, layer id)` triples.
    /// Entries with a day outside 1..=7 are dropped.
    pub fn from_entries(entries: impl IntoIterator<Item = (Metric, u8, u32)>) -> Self {
        let layers = entries
            .into_iter()
            .filter_map(|(metric, day, id)| Day::new(day).map(|day| ((metric, day), LayerId(id))))
            .collect();
        Self { layers }
    }

    #[must_use]
    pub fn get(&self, metric: Metric, day: Day) -> Option<LayerId> {
        self.layers.get(&(metric, day)).copied()
    }

    #[must_use]
    pub fn has_data(&self, metric: Metric, day: Day) -> bool {
        self.layers.contains_key(&(metric, day))
    }

    /// Days with a published map for `metric`, ascending.
    #[must_use]
    pub fn available_days(&self, metric: Metric) -> Vec<Day> {
        self.layers
            .keys()
            .filter(|(m, _)| *m == metric)
            .map(|(_, day)| *day)
            .collect()
    }

    /// Every configured layer id.
    pub fn layer_ids(&self) -> impl Iterator<Item = LayerId> + '_ {
        self.layers.values().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(n: u8) -> Day {
        Day::new(n).unwrap()
    }

    #[test]
    fn test_default_table_ids() {
        let table = LayerTable::ndfd_default();
        assert_eq!(table.get(Metric::High, day(1)), Some(LayerId(124)));
        assert_eq!(table.get(Metric::High, day(3)), Some(LayerId(132)));
        assert_eq!(table.get(Metric::Low, day(2)), Some(LayerId(141)));
        assert_eq!(table.get(Metric::Low, day(3)), None);
        assert_eq!(table.get(Metric::High, day(5)), None);
    }

    #[test]
    fn test_available_days_derived_from_table() {
        let table = LayerTable::ndfd_default();
        assert_eq!(table.available_days(Metric::High), vec![day(1), day(2), day(3)]);
        assert_eq!(table.available_days(Metric::Low), vec![day(1), day(2)]);
    }

    #[test]
    fn test_day_bounds() {
        assert!(Day::new(0).is_none());
        assert!(Day::new(8).is_none());
        assert!(day(3).is_selectable());
        assert!(!day(4).is_selectable());
        assert_eq!(Day::all().count(), 7);
        assert_eq!(day(1).offset(), 0);
    }

    #[test]
    fn test_from_entries_drops_out_of_range_days() {
        let table = LayerTable::from_entries([(Metric::High, 0, 1), (Metric::High, 9, 2), (Metric::Low, 7, 3)]);
        assert_eq!(table.layer_ids().collect::<Vec<_>>(), vec![LayerId(3)]);
    }

    #[test]
    fn test_metric_ids() {
        assert_eq!(Metric::High.button_id(), "btn-high");
        assert_eq!(Metric::Low.to_string(), "low");
    }
}
