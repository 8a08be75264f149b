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

//! Prometheus metrics exporter for the Windslammer weather station
//!
//! ## Features
//!
//! `windslammer_exporter` fetches the current readings from the [Windslammer] weather station
//! each time it is scraped and emits them as Prometheus metrics. The station reports a
//! snapshot as comma separated `key=value` pairs. The following metrics are emitted, each
//! keeping its last known value if the station doesn't report it (or can't be reached).
//!
//! * `windslammer_wind_direction_degrees` - Current wind direction in degrees.
//! * `windslammer_wind_speed_mph` - Current wind speed in miles per hour.
//! * `windslammer_temperature_lower_fahrenheit` - Temperature at the lower station, in Fahrenheit.
//! * `windslammer_temperature_upper_fahrenheit` - Temperature at the upper station, in Fahrenheit.
//! * `windslammer_elevation_lower_feet` - Elevation of the lower station, in feet.
//! * `windslammer_elevation_upper_feet` - Elevation of the upper station, in feet.
//!
//! [Windslammer]: http://windslammer.net/
//!
//! ## Build
//!
//! `windslammer_exporter` is a Rust program and must be built from source using a
//! [Rust toolchain](https://rustup.rs/).
//!
//! ```text
//! cargo build --release
//! ```
//!
//! ## Usage
//!
//! ### Run
//!
//! No options are required. The port to listen on may be changed with the `PORT` environment
//! variable.
//!
//! ```text
//! PORT=8080 ./windslammer_exporter
//! ```
//!
//! A health check that never contacts the station is available at `/health`.
//!
//! ### Prometheus
//!
//! Prometheus metrics are exposed on port `9307` at `/metrics`. Every scrape results in a
//! request to the weather station so there is no benefit to scraping more often than the
//! station updates. Add the host running `windslammer_exporter` as a target under the
//! Prometheus `scrape_configs` section as described by the example below.
//!
//! ```yaml
//! # Sample config for Prometheus.
//!
//! global:
//!   scrape_interval:     1m
//!   evaluation_interval: 1m
//!   external_labels:
//!     monitor: 'my_prom'
//!
//! scrape_configs:
//! - job_name: windslammer_exporter
//!   static_configs:
//!   - targets: ['example:9307']
//! ```
//!

pub mod client;
pub mod config;
pub mod http;
pub mod metrics;
pub mod parse;
