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

//! API to log an exercise for a user.

use crate::driver::Driver;
use crate::model::{Description, ExerciseDate, Minutes, UserId, Username};
use crate::rest::{non_empty, FieldValue};
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use extracker_core::rest::{FormOrJson, RestError};
use serde::{Deserialize, Serialize};

/// Message sent to the server to log an exercise.
#[derive(Deserialize)]
pub(crate) struct CreateExerciseRequest {
    /// Free-form text describing the exercise.
    description: Option<String>,

    /// Length of the exercise in minutes.
    duration: Option<FieldValue>,

    /// Day on which the exercise happened.  Defaults to today when missing or empty.
    date: Option<String>,
}

/// Message returned by the server after logging an exercise.
#[derive(Serialize)]
#[cfg_attr(test, derive(Debug, Deserialize, PartialEq))]
pub(crate) struct CreateExerciseResponse {
    /// Identifier of the user that owns the exercise.
    #[serde(rename = "_id")]
    id: UserId,

    /// Name of the user that owns the exercise.
    username: Username,

    /// Day on which the exercise happened.
    date: ExerciseDate,

    /// Length of the exercise in minutes.
    duration: Minutes,

    /// Free-form text describing the exercise.
    description: Description,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    Path(user_id): Path<String>,
    FormOrJson(request): FormOrJson<CreateExerciseRequest>,
) -> Result<impl IntoResponse, RestError> {
    let user_id = UserId::parse(&user_id)?;
    let date = match non_empty(request.date) {
        Some(date) => Some(ExerciseDate::parse(&date)?),
        None => None,
    };
    let duration =
        Minutes::parse(&request.duration.map(FieldValue::into_string).unwrap_or_default())?;
    let description = Description::new(request.description.unwrap_or_default())?;

    let exercise = driver.create_exercise(user_id, description, duration, date).await?;

    let response = CreateExerciseResponse {
        id: *exercise.user_id(),
        username: exercise.username().clone(),
        date: *exercise.date(),
        duration: *exercise.duration(),
        description: exercise.description().clone(),
    };
    Ok(Json(response))
}
