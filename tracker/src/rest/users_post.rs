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

//! API to create a new user.

use crate::driver::Driver;
use crate::model::Username;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use extracker_core::rest::{FormOrJson, RestError};
use serde::Deserialize;

/// Message sent to the server to create a user.
#[derive(Deserialize)]
pub(crate) struct CreateUserRequest {
    /// Name of the user to create.
    username: Option<String>,
}

/// POST handler for this API.
pub(crate) async fn handler(
    State(driver): State<Driver>,
    FormOrJson(request): FormOrJson<CreateUserRequest>,
) -> Result<impl IntoResponse, RestError> {
    let username = Username::new(request.username.unwrap_or_default())?;

    let user = driver.create_user(username).await?;

    Ok(Json(user))
}

#[cfg(test)]
mod tests {
    use crate::model::User;
    use crate::rest::testutils::*;
    use axum::http;
    use extracker_core::rest::testutils::*;

    fn route() -> (http::Method, String) {
        (http::Method::POST, "/api/users".to_owned())
    }

    #[tokio::test]
    async fn test_ok_form() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_form([("username", "fcc_test")])
            .await
            .expect_json::<User>()
            .await;
        assert_eq!("fcc_test", response.username().as_str());

        assert_eq!(vec![response], context.get_users().await);
    }

    #[tokio::test]
    async fn test_ok_json() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_json(serde_json::json!({"username": "json user"}))
            .await
            .expect_json::<User>()
            .await;
        assert_eq!("json user", response.username().as_str());

        assert_eq!(vec![response], context.get_users().await);
    }

    #[tokio::test]
    async fn test_response_shape() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), route())
            .send_form([("username", "shape")])
            .await
            .expect_json::<serde_json::Value>()
            .await;
        let fields = response.as_object().unwrap();
        assert_eq!(2, fields.len());
        assert_eq!("shape", fields["username"]);
        assert!(fields["_id"].is_string());
    }

    #[tokio::test]
    async fn test_duplicate_names_get_distinct_ids() {
        let context = TestContext::setup().await;

        let mut ids = vec![];
        for _ in 0..2 {
            let response = OneShotBuilder::new(context.app(), route())
                .send_form([("username", "same")])
                .await
                .expect_json::<User>()
                .await;
            ids.push(*response.id());
        }
        assert_ne!(ids[0], ids[1]);

        assert_eq!(2, context.get_users().await.len());
    }

    #[tokio::test]
    async fn test_missing_username() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_form([("other", "value")])
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Username is required")
            .await;

        assert!(context.get_users().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_username() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), route())
            .send_json(serde_json::json!({"username": ""}))
            .await
            .expect_status(http::StatusCode::BAD_REQUEST)
            .expect_error("Username is required")
            .await;

        assert!(context.get_users().await.is_empty());
    }

    test_payload_must_be_form_or_json!(TestContext::setup().await.into_app(), route());
}
