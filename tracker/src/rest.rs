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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;
use extracker_core::env::get_optional_var;
use serde::Deserialize;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};

#[cfg(test)]
mod testutils;
mod user_exercises_post;
mod user_logs_get;
mod users_get;
mod users_post;

/// Default value for the `index_file` configuration property.
const DEFAULT_INDEX_FILE: &str = "views/index.html";

/// Default value for the `public_dir` configuration property.
const DEFAULT_PUBLIC_DIR: &str = "public";

/// Options to locate the static content of the site.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteOptions {
    /// HTML page to serve at the root of the site.
    pub index_file: PathBuf,

    /// Directory with the static files to serve for any path not handled by the APIs.
    pub public_dir: PathBuf,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            index_file: PathBuf::from(DEFAULT_INDEX_FILE),
            public_dir: PathBuf::from(DEFAULT_PUBLIC_DIR),
        }
    }
}

impl SiteOptions {
    /// Initializes a set of options from environment variables whose name is prefixed with the
    /// given `prefix`.
    ///
    /// This will use variables such as `<prefix>_INDEX_FILE` and `<prefix>_PUBLIC_DIR`.
    pub fn from_env(prefix: &str) -> Result<SiteOptions, String> {
        Ok(SiteOptions {
            index_file: get_optional_var::<PathBuf>(prefix, "INDEX_FILE")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_FILE)),
            public_dir: get_optional_var::<PathBuf>(prefix, "PUBLIC_DIR")?
                .unwrap_or_else(|| PathBuf::from(DEFAULT_PUBLIC_DIR)),
        })
    }
}

/// A scalar in a request body.  Forms carry everything as text but JSON documents may carry
/// numbers, so this accepts both.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FieldValue {
    /// A value provided as a string.
    Text(String),

    /// A value provided as a JSON number.
    Number(serde_json::Number),
}

impl FieldValue {
    /// Returns the textual representation of the value for further parsing.
    pub(crate) fn into_string(self) -> String {
        match self {
            FieldValue::Text(s) => s,
            FieldValue::Number(n) => n.to_string(),
        }
    }
}

/// Returns `value` unless it is empty, in which case the field is considered to be absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Creates the router for the application.
pub(crate) fn app(driver: Driver, site: &SiteOptions) -> Router {
    use axum::routing::{get, post};

    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/api/users", get(users_get::handler).post(users_post::handler))
        .route("/api/users/:_id/exercises", post(user_exercises_post::handler))
        .route("/api/users/:_id/logs", get(user_logs_get::handler))
        .with_state(driver)
        .route_service("/", ServeFile::new(&site.index_file))
        .fallback_service(ServeDir::new(&site.public_dir))
        .layer(cors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rest::testutils::*;
    use axum::http;
    use extracker_core::rest::testutils::*;

    #[test]
    fn test_site_options_from_env_defaults() {
        temp_env::with_vars([("SITE_INDEX_FILE", None::<&str>), ("SITE_PUBLIC_DIR", None)], || {
            assert_eq!(SiteOptions::default(), SiteOptions::from_env("SITE").unwrap());
        });
    }

    #[test]
    fn test_site_options_from_env_overrides() {
        temp_env::with_vars(
            [("SITE_INDEX_FILE", Some("/srv/index.html")), ("SITE_PUBLIC_DIR", Some("/srv/www"))],
            || {
                assert_eq!(
                    SiteOptions {
                        index_file: PathBuf::from("/srv/index.html"),
                        public_dir: PathBuf::from("/srv/www"),
                    },
                    SiteOptions::from_env("SITE").unwrap()
                );
            },
        );
    }

    #[test]
    fn test_site_options_from_env_empty_path() {
        temp_env::with_var("SITE_PUBLIC_DIR", Some(""), || {
            let err = SiteOptions::from_env("SITE").unwrap_err();
            assert!(err.contains("SITE_PUBLIC_DIR"));
        });
    }

    #[test]
    fn test_field_value_from_form_and_json() {
        #[derive(Deserialize)]
        struct Request {
            value: Option<FieldValue>,
        }

        let request: Request = serde_urlencoded::from_str("value=30").unwrap();
        assert_eq!("30", request.value.unwrap().into_string());

        let request: Request = serde_json::from_str(r#"{"value": 30}"#).unwrap();
        assert_eq!("30", request.value.unwrap().into_string());

        let request: Request = serde_json::from_str(r#"{"value": "abc"}"#).unwrap();
        assert_eq!("abc", request.value.unwrap().into_string());

        let request: Request = serde_json::from_str(r#"{"value": -1.5}"#).unwrap();
        assert_eq!("-1.5", request.value.unwrap().into_string());

        let request: Request = serde_json::from_str("{}").unwrap();
        assert!(request.value.is_none());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(None, non_empty(None));
        assert_eq!(None, non_empty(Some(String::new())));
        assert_eq!(Some("x".to_owned()), non_empty(Some("x".to_owned())));
    }

    #[tokio::test]
    async fn test_index_page() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/"))
            .send_empty()
            .await
            .expect_text("<title>Exercise Tracker")
            .await;
    }

    #[tokio::test]
    async fn test_public_files() {
        let context = TestContext::setup().await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/style.css"))
            .send_empty()
            .await
            .expect_text("font-family")
            .await;

        OneShotBuilder::new(context.app(), (http::Method::GET, "/missing.css"))
            .send_empty()
            .await
            .expect_status(http::StatusCode::NOT_FOUND)
            .take_response()
            .await;
    }

    #[tokio::test]
    async fn test_cors_allows_any_origin() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (http::Method::GET, "/api/users"))
            .with_header(http::header::ORIGIN, "https://www.freecodecamp.org")
            .send_empty()
            .await
            .take_response()
            .await;
        assert_eq!(
            "*",
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap()
        );
    }

    #[tokio::test]
    async fn test_cors_preflight() {
        let context = TestContext::setup().await;

        let response = OneShotBuilder::new(context.app(), (http::Method::OPTIONS, "/api/users"))
            .with_header(http::header::ORIGIN, "https://www.freecodecamp.org")
            .with_header(http::header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .send_empty()
            .await
            .take_response()
            .await;
        assert_eq!(
            "*",
            response.headers().get(http::header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap()
        );
        assert!(response.headers().contains_key(http::header::ACCESS_CONTROL_ALLOW_METHODS));
    }
}
