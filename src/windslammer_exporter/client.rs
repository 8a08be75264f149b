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

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, StatusCode, Url};
use std::error;
use std::fmt;

#[derive(Debug)]
pub enum ClientError {
    InvalidUrl(String),
    Transport(reqwest::Error),
    Status(StatusCode, Url),
    Body(reqwest::Error),
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUrl(u) => write!(f, "invalid station URL {}", u),
            Self::Transport(e) => write!(f, "failed to fetch data: {}", e),
            Self::Status(status, url) => write!(f, "unexpected status {} for {}", status, url),
            Self::Body(e) => write!(f, "failed to read response: {}", e),
        }
    }
}

impl error::Error for ClientError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Transport(e) => Some(e),
            Self::Body(e) => Some(e),
            _ => None,
        }
    }
}

/// Client for the CGI endpoint of a Windslammer weather station.
///
/// Timeouts are the responsibility of the `reqwest::Client` passed to `WindslammerClient::new()`.
#[derive(Debug)]
pub struct WindslammerClient {
    client: Client,
    station_url: Url,
}

impl WindslammerClient {
    const USER_AGENT: &'static str = "Windslammer Prometheus Exporter (https://github.com/56quarters/windslammer_exporter)";
    const FORM_REQUEST: &'static str = "application/x-www-form-urlencoded";
    const SNAPSHOT_BODY: &'static str = "SNAPSHOT";

    pub fn new(client: Client, station_url: &str) -> Result<Self, ClientError> {
        let station_url = Url::parse(station_url).map_err(|_| ClientError::InvalidUrl(station_url.to_owned()))?;
        Ok(WindslammerClient { client, station_url })
    }

    pub fn station_url(&self) -> &Url {
        &self.station_url
    }

    /// Request the current snapshot of station readings, returning the raw response body.
    ///
    /// Any status other than `200 OK` is treated as an error. No retries are attempted.
    pub async fn snapshot(&self) -> Result<String, ClientError> {
        tracing::debug!(message = "making station snapshot request", url = %self.station_url);

        let res = self
            .client
            .post(self.station_url.clone())
            .header(USER_AGENT, Self::USER_AGENT)
            .header(CONTENT_TYPE, Self::FORM_REQUEST)
            .body(Self::SNAPSHOT_BODY)
            .send()
            .await
            .map_err(ClientError::Transport)?;

        let status = res.status();
        if status != StatusCode::OK {
            return Err(ClientError::Status(status, self.station_url.clone()));
        }

        res.text().await.map_err(ClientError::Body)
    }
}
