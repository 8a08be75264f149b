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

use clap::Parser;
use reqwest::Client;
use std::env;
use std::error::Error;
use std::io;
use std::process;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal::unix::{self, SignalKind};
use tracing::Level;
use windslammer_exporter::client::WindslammerClient;
use windslammer_exporter::config::{self, PORT_ENV};
use windslammer_exporter::http::RequestState;
use windslammer_exporter::metrics::WindslammerMetrics;

const DEFAULT_LOG_LEVEL: Level = Level::INFO;
const DEFAULT_TIMEOUT_MILLIS: u64 = 10000;
const DEFAULT_STATION_URL: &str = "http://windslammer.net/cgi-bin/ws.cgi";

#[derive(Debug, Parser)]
#[clap(name = "windslammer_exporter", version = clap::crate_version!())]
struct WindslammerExporterApplication {
    /// URL of the weather station CGI endpoint to request snapshots from
    #[clap(long, default_value_t = DEFAULT_STATION_URL.into())]
    station_url: String,

    /// Logging verbosity. Allowed values are 'trace', 'debug', 'info', 'warn', and 'error'
    /// (case insensitive)
    #[clap(long, default_value_t = DEFAULT_LOG_LEVEL)]
    log_level: Level,

    /// Timeout for fetching a snapshot from the weather station, in milliseconds.
    #[clap(long, default_value_t = DEFAULT_TIMEOUT_MILLIS)]
    timeout_millis: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let opts = WindslammerExporterApplication::parse();
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(opts.log_level)
            .finish(),
    )
    .expect("failed to set tracing subscriber");

    // Listen port comes only from the environment, there's no flag for it.
    let port = env::var(PORT_ENV).ok();
    let bind = config::bind_addr(port.as_deref()).unwrap_or_else(|e| {
        tracing::error!(message = "invalid listen port", error = %e);
        process::exit(1)
    });

    let timeout = Duration::from_millis(opts.timeout_millis);
    let http_client = Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize HTTP client", error = %e);
        process::exit(1)
    });

    let client = WindslammerClient::new(http_client, &opts.station_url).unwrap_or_else(|e| {
        tracing::error!(message = "unable to initialize station client", error = %e);
        process::exit(1)
    });

    let context = Arc::new(RequestState::new(client, WindslammerMetrics::new()));
    let app = windslammer_exporter::http::router(context);
    let server = axum::Server::try_bind(&bind)
        .map(|s| s.serve(app.into_make_service()))
        .unwrap_or_else(|e| {
            tracing::error!(message = "error binding to address", address = %bind, error = %e);
            process::exit(1)
        });

    tracing::info!(
        message = "server started",
        address = %server.local_addr(),
        station_url = %opts.station_url,
    );

    // Stop immediately on SIGTERM or SIGINT. In-flight requests are dropped
    // instead of being allowed to finish.
    tokio::select! {
        res = server => res?,
        _ = sigterm() => {}
        _ = sigint() => {}
    }

    tracing::info!("server shutdown");
    Ok(())
}

/// Return after the first SIGTERM signal received by this process
async fn sigterm() -> io::Result<()> {
    unix::signal(SignalKind::terminate())?.recv().await;
    Ok(())
}

/// Return after the first SIGINT signal received by this process
async fn sigint() -> io::Result<()> {
    unix::signal(SignalKind::interrupt())?.recv().await;
    Ok(())
}
