// Exercise tracker
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

//! Entry point to the exercise tracker service.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

use extracker::db::init_schema;
use extracker::{serve, SiteOptions};
use extracker_core::db::postgres::{PostgresDb, PostgresOptions};
use extracker_core::db::{sqlite, Db};
use extracker_core::env::{get_required_var, get_var};
use log::info;
use std::error::Error;
use std::net::Ipv4Addr;
use std::sync::Arc;

/// Default port to listen on when `PORT` is not set.
const DEFAULT_PORT: u16 = 3000;

/// Opens the database pointed at by the `DATABASE_URL` environment variable.
///
/// PostgreSQL URLs honor the rest of the `DATABASE_*` pool settings.  Anything else is handed to
/// the SQLite backend.
async fn connect_db() -> Result<Arc<dyn Db + Send + Sync>, Box<dyn Error>> {
    let url = get_required_var::<String>("DATABASE", "URL")?;
    if url.starts_with("postgres:") || url.starts_with("postgresql:") {
        info!("Using PostgreSQL database");
        let db_opts = PostgresOptions::from_env("DATABASE")?;
        Ok(Arc::new(PostgresDb::connect(db_opts)?))
    } else {
        info!("Using SQLite database");
        Ok(Arc::new(sqlite::connect(&url).await?))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenv::dotenv().ok();
    env_logger::init();

    let port = get_var::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);
    let addr = (Ipv4Addr::UNSPECIFIED, port);
    let site = SiteOptions::from_env("SITE")?;

    let db = connect_db().await?;
    let result = match db.ex().await {
        Ok(mut ex) => init_schema(&mut ex).await,
        Err(e) => Err(e),
    };
    if let Err(e) = result {
        db.close().await;
        return Err(e.into());
    }

    serve(addr, db, site).await
}
