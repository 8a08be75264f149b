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
use std::num::ParseFloatError;

/// A single `key=value` reading from a station snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub key: String,
    pub value: f64,
}

/// A fragment had the form `key=value` but the value was not a number.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldParseError {
    pub key: String,
    pub source: ParseFloatError,
}

impl fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse value for {}: {}", self.key, self.source)
    }
}

impl error::Error for FieldParseError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Parse a station snapshot of the form `key=value,key=value` into fields.
///
/// Malformed fragments (no `=`, more than one `=`, or a non-numeric value) are logged
/// and skipped. Every other fragment is returned in the order it appeared, including
/// keys that no gauge exists for.
pub fn parse(raw: &str) -> Vec<Field> {
    let mut out = Vec::new();

    for fragment in raw.split(',') {
        match parse_fragment(fragment) {
            Some(Ok(field)) => out.push(field),
            Some(Err(e)) => {
                tracing::warn!(message = "skipping field with invalid value", key = %e.key, error = %e.source);
            }
            None => {
                tracing::debug!(message = "skipping malformed fragment", fragment = fragment);
            }
        }
    }

    out
}

fn parse_fragment(fragment: &str) -> Option<Result<Field, FieldParseError>> {
    let (key, value) = fragment.trim().split_once('=')?;
    if value.contains('=') {
        return None;
    }

    let key = key.trim();
    Some(
        value
            .trim()
            .parse::<f64>()
            .map(|value| Field {
                key: key.to_owned(),
                value,
            })
            .map_err(|source| FieldParseError {
                key: key.to_owned(),
                source,
            }),
    )
}

#[cfg(test)]
mod tests {
    use super::{parse, parse_fragment, Field};

    fn field(key: &str, value: f64) -> Field {
        Field {
            key: key.to_owned(),
            value,
        }
    }

    #[test]
    fn test_parse_with_whitespace() {
        let fields = parse("wind_dir=180.5, wind_speed=12.3, temp_lo = 55.0 ");
        assert_eq!(
            vec![field("wind_dir", 180.5), field("wind_speed", 12.3), field("temp_lo", 55.0)],
            fields
        );
    }

    #[test]
    fn test_parse_no_equals() {
        let fields = parse("garbage,wind_dir=180.5");
        assert_eq!(vec![field("wind_dir", 180.5)], fields);
    }

    #[test]
    fn test_parse_multiple_equals() {
        let fields = parse("wind_dir=1=2,wind_speed=3");
        assert_eq!(vec![field("wind_speed", 3.0)], fields);
    }

    #[test]
    fn test_parse_invalid_value_continues() {
        let fields = parse("wind_dir=notanumber,wind_speed=12.3");
        assert_eq!(vec![field("wind_speed", 12.3)], fields);
    }

    #[test]
    fn test_parse_unknown_keys_kept() {
        let fields = parse("humidity=50");
        assert_eq!(vec![field("humidity", 50.0)], fields);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
        assert!(parse(",, ,").is_empty());
    }

    #[test]
    fn test_parse_negative_value() {
        let fields = parse("temp_hi=-4.5\n");
        assert_eq!(vec![field("temp_hi", -4.5)], fields);
    }

    #[test]
    fn test_parse_fragment_error() {
        let err = parse_fragment(" wind_dir = abc ").unwrap().unwrap_err();
        assert_eq!("wind_dir", err.key);
        assert!(err.to_string().starts_with("failed to parse value for wind_dir"));
    }
}
