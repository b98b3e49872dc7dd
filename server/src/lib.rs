// III-IV
// Copyright 2023 Julio Merino
//
// Licensed under the Apache License, Version 2.0 (the "License"); you may not
// use this file except in compliance with the License.  You may obtain a copy
// of the License at:
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS, WITHOUT
// WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.  See the
// License for the specific language governing permissions and limitations
// under the License.

//! Peer-to-peer item sharing marketplace.
//!
//! Users list items they are willing to lend, book the items of others for a period of time,
//! leave comments once a booking completes, and publish requests for items nobody has listed yet.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use log::info;
use shareit_core::clocks::Clock;
use shareit_core::db::Db;
use shareit_core::env::get_optional_var;
use std::error::Error;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;

mod db;
mod driver;
use driver::Driver;
pub(crate) mod model;
mod rest;
use rest::app;

/// Default port to listen on when none is configured.
const DEFAULT_PORT: u16 = 9090;

/// Network configuration of the server.
#[derive(Debug, PartialEq)]
pub struct ServerOptions {
    /// Address to bind to.
    pub address: IpAddr,

    /// Port to listen on.
    pub port: u16,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self { address: IpAddr::V4(Ipv4Addr::UNSPECIFIED), port: DEFAULT_PORT }
    }
}

impl ServerOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_BIND_ADDRESS` and `<prefix>_PORT`, all of which
    /// are optional.
    pub fn from_env(prefix: &str) -> Result<ServerOptions, String> {
        let defaults = ServerOptions::default();
        Ok(ServerOptions {
            address: get_optional_var::<IpAddr>(prefix, "BIND_ADDRESS")?
                .unwrap_or(defaults.address),
            port: get_optional_var::<u16>(prefix, "PORT")?.unwrap_or(defaults.port),
        })
    }

    /// Returns the socket address to bind to.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }
}

/// Instantiates all resources to serve the application on `bind_addr` until interrupted.
///
/// While it'd be nice to push this responsibility to `main`, doing so would force us to expose many
/// crate-internal types to the public, which in turn would make dead code detection harder.
pub async fn serve(
    bind_addr: impl Into<SocketAddr>,
    db: Arc<dyn Db + Send + Sync>,
    clock: Arc<dyn Clock + Send + Sync>,
) -> Result<(), Box<dyn Error>> {
    db::init_schema(&mut db.ex().await?).await?;

    let driver = Driver::new(db.clone(), clock);
    let app = app(driver);

    let bind_addr = bind_addr.into();
    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Listening on {}", bind_addr);
    let result = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Interrupted; shutting down");
            }
        })
        .await;

    db.close().await;
    Ok(result?)
}
