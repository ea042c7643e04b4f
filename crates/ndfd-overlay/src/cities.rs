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

//! US state capitals labelled with sampled temperatures.

use crate::identify::GeoPoint;

/// A labelled point on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub point: GeoPoint,
}

const fn city(name: &'static str, lat: f64, lon: f64) -> City {
    City { name, point: GeoPoint::new(lat, lon) }
}

/// The 50 state capitals, alphabetical by state.
pub static STATE_CAPITALS: [City; 50] = [
    city("Montgomery", 32.3792, -86.3077),
    city("Juneau", 58.3019, -134.4197),
    city("Phoenix", 33.4484, -112.0740),
    city("Little Rock", 34.7465, -92.2896),
    city("Sacramento", 38.5816, -121.4944),
    city("Denver", 39.7392, -104.9903),
    city("Hartford", 41.7658, -72.6734),
    city("Dover", 39.1582, -75.5244),
    city("Tallahassee", 30.4383, -84.2807),
    city("Atlanta", 33.7490, -84.3880),
    city("Honolulu", 21.3069, -157.8583),
    city("Boise", 43.6150, -116.2023),
    city("Springfield", 39.7817, -89.6501),
    city("Indianapolis", 39.7684, -86.1581),
    city("Des Moines", 41.6195, -93.5911),
    city("Topeka", 39.0473, -95.6752),
    city("Frankfort", 38.2009, -84.8733),
    city("Baton Rouge", 30.4515, -91.1871),
    city("Augusta", 44.3106, -69.7795),
    city("Annapolis", 38.9784, -76.4922),
    city("Boston", 42.3601, -71.0589),
    city("Lansing", 42.7325, -84.5555),
    city("St. Paul", 44.9537, -93.0900),
    city("Jackson", 32.2988, -90.1848),
    city("Jefferson City", 38.5767, -92.1735),
    city("Helena", 46.5891, -112.0391),
    city("Lincoln", 40.8136, -96.7026),
    city("Carson City", 39.1638, -119.7674),
    city("Concord", 43.2081, -71.5375),
    city("Trenton", 40.2206, -74.7597),
    city("Santa Fe", 35.6870, -105.9378),
    city("Albany", 42.6526, -73.7562),
    city("Raleigh", 35.7796, -78.6382),
    city("Bismarck", 46.8083, -100.7837),
    city("Columbus", 39.9612, -82.9988),
    city("Oklahoma City", 35.4676, -97.5164),
    city("Salem", 44.9429, -123.0351),
    city("Harrisburg", 40.2732, -76.8867),
    city("Providence", 41.8240, -71.4128),
    city("Columbia", 34.0007, -81.0348),
    city("Pierre", 44.3683, -100.3510),
    city("Nashville", 36.1627, -86.7816),
    city("Austin", 30.2672, -97.7431),
    city("Salt Lake City", 40.7608, -111.8910),
    city("Montpelier", 44.2601, -72.5754),
    city("Richmond", 37.5407, -77.4360),
    city("Olympia", 47.0379, -122.9007),
    city("Charleston", 38.3498, -81.6326),
    city("Madison", 43.0731, -89.4012),
    city("Cheyenne", 41.1400, -104.8202),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitals_are_inside_us_bounds() {
        assert_eq!(STATE_CAPITALS.len(), 50);
        for c in &STATE_CAPITALS {
            assert!((18.0..72.0).contains(&c.point.lat), "{} lat", c.name);
            assert!((-170.0..-65.0).contains(&c.point.lon), "{} lon", c.name);
        }
    }
}
