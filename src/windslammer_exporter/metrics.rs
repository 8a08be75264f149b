// windslammer_exporter - Prometheus metrics exporter for the Windslammer weather station
//
// Copyright 2026 Nick Pillitteri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.
//

use crate::parse::Field;
use prometheus_client::encoding::text::encode;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::registry::Registry;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::AtomicU64;

const NAMESPACE: &str = "windslammer";

/// Station field name, metric name (without namespace), and help text for each gauge.
const GAUGES: [(&str, &str, &str); 6] = [
    ("wind_dir", "wind_direction_degrees", "Current wind direction in degrees"),
    ("wind_speed", "wind_speed_mph", "Current wind speed in miles per hour"),
    (
        "temp_lo",
        "temperature_lower_fahrenheit",
        "Temperature from lower elevation station in Fahrenheit",
    ),
    (
        "temp_hi",
        "temperature_upper_fahrenheit",
        "Temperature from upper elevation station in Fahrenheit",
    ),
    ("elev_lo", "elevation_lower_feet", "Elevation of lower weather station in feet"),
    ("elev_hi", "elevation_upper_feet", "Elevation of upper weather station in feet"),
];

/// Holder for metrics that can be set from fields of a station snapshot.
///
/// All gauges are created and registered upon call to `WindslammerMetrics::new()` and share
/// the prefix "windslammer_". The set of gauges is fixed: fields of a snapshot that don't
/// correspond to a gauge are ignored and gauges keep their last value until set again.
#[derive(Debug)]
pub struct WindslammerMetrics {
    registry: Registry,
    gauges: HashMap<&'static str, Gauge<f64, AtomicU64>>,
}

impl WindslammerMetrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix(NAMESPACE);
        let mut gauges = HashMap::with_capacity(GAUGES.len());

        for (key, name, help) in GAUGES {
            let gauge = Gauge::<f64, AtomicU64>::default();
            registry.register(name, help, gauge.clone());
            gauges.insert(key, gauge);
        }

        Self { registry, gauges }
    }

    /// Set the gauge for the station field `key`, returning `false` if there is no such gauge.
    pub fn update(&self, key: &str, value: f64) -> bool {
        match self.gauges.get(key) {
            Some(g) => {
                g.set(value);
                true
            }
            None => false,
        }
    }

    /// Set every gauge that has a corresponding field, returning the number of gauges set.
    pub fn observe(&self, fields: &[Field]) -> usize {
        fields.iter().filter(|f| self.update(&f.key, f.value)).count()
    }

    /// Current value of the gauge for the station field `key`, if there is one.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.gauges.get(key).map(|g| g.get())
    }

    /// Render all gauges in the OpenMetrics text format.
    pub fn snapshot(&self) -> Result<String, fmt::Error> {
        let mut buf = String::new();
        encode(&mut buf, &self.registry)?;
        Ok(buf)
    }
}

impl Default for WindslammerMetrics {
    fn default() -> Self {
        Self::new()
    }
}
