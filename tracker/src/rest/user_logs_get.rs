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

//! API to get the exercise log of a user.

use crate::driver::Driver;
use crate::model::{ExerciseDate, Limit, LogEntry, LogQuery, UserId, Username};
use crate::rest::non_empty;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use extracker_core::rest::{EmptyBody, RestError};
use serde::{Deserialize, Serialize};

/// Query parameters accepted by this API.  Empty values are treated as absent.
#[derive(Deserialize)]
pub(crate) struct LogRequest {
    /// Earliest date of the exercises to return, inclusive.
    from: Option<String>,

    /// Latest date of the exercises to return, inclusive.
    to: Option<String>,

    /// Maximum number of exercises to return.
    limit: Option<String>,
}

impl LogRequest {
    /// Validates the raw query parameters and converts them into a `LogQuery`.
    fn into_query(self) -> Result<LogQuery, RestError> {
        let from = non_empty(self.from).map(|s| ExerciseDate::parse(&s)).transpose()?;
        let to = non_empty(self.to).map(|s| ExerciseDate::parse(&s)).transpose()?;
        let limit = non_empty(self.limit).map(|s| Limit::parse(&s)).transpose()?;
        Ok(LogQuery::new(from, to, limit))
    }
}

/// Message returned by the server with the exercise log of a user.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct LogResponse {
    /// Identifier of the user that owns the log.
    #[serde(rename = "_id")]
    id: UserId,

    /// Name of the user that owns the log.
    username: Username,

    /// Number of entries in `log`.
    count: usize,

    /// Exercises that matched the query, in chronological order.
    log: Vec<LogEntry>,
}

/// GET handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<String>,
    request: Result<Query<LogRequest>, QueryRejection>,
    _: EmptyBody,
) -> Result<impl IntoResponse, RestError> {
    let user_id = UserId::parse(&user_id)?;
    let query = match request {
        Ok(Query(request)) => request.into_query()?,
        Err(e) => return Err(RestError::InvalidRequest(e.body_text())),
    };

    let log = driver.get_log(user_id, query).await?;

    let (user, entries) = log.dissolve();
    let response = LogResponse {
        id: *user.id(),
        username: user.username().clone(),
        count: entries.len(),
        log: entries,
    };
    Ok(Json(response))
}
