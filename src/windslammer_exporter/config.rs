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

use std::error;
use std::fmt;
use std::net::SocketAddr;
use std::num::ParseIntError;

/// Environment variable that overrides the port the HTTP server listens on.
pub const PORT_ENV: &str = "PORT";
pub const DEFAULT_PORT: u16 = 9307;

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    InvalidPort(String, ParseIntError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPort(p, e) => write!(f, "invalid port {:?}: {}", p, e),
        }
    }
}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidPort(_, e) => Some(e),
        }
    }
}

/// Address to bind to on all interfaces, using the port override if it's set and non-empty.
pub fn bind_addr(port: Option<&str>) -> Result<SocketAddr, ConfigError> {
    let port = match port.map(str::trim) {
        Some(p) if !p.is_empty() => p.parse::<u16>().map_err(|e| ConfigError::InvalidPort(p.to_owned(), e))?,
        _ => DEFAULT_PORT,
    };

    Ok(SocketAddr::from(([0, 0, 0, 0], port)))
}
