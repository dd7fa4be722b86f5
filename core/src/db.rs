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

//! Storage access shared by every layer that needs persistence.
//!
//! Two backends are supported: PostgreSQL for deployments and SQLite for local runs and tests.
//! Services write their queries once per backend by matching on the `Executor` they receive.

use crate::model::ModelError;
use async_trait::async_trait;

#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

/// Failures reported by the storage layer.
///
/// Errors that the backends recognize get their own variant; anything else is a `BackendError`.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum DbError {
    /// An insert collided with an existing row.
    #[error("Already exists")]
    AlreadyExists,

    /// The backend failed in a way we have no specific handling for.
    #[error("Database error: {0}")]
    BackendError(String),

    /// A stored row could not be turned back into a model type.
    #[error("Data integrity error: {0}")]
    DataIntegrityError(String),

    /// The requested row, or a row it references, does not exist.
    #[error("Entity not found")]
    NotFound,

    /// The backend cannot take more work right now, such as when it runs out of connections.
    #[error("Unavailable")]
    Unavailable,
}

impl From<ModelError> for DbError {
    fn from(e: ModelError) -> Self {
        DbError::DataIntegrityError(e.to_string())
    }
}

/// Result type for this module.
pub type DbResult<T> = Result<T, DbError>;

/// Handle to run queries against whichever backend is active.
///
/// The variant tells the caller which SQL dialect to use.  The wrapped executor may be a plain
/// pool connection or an open transaction; queries look the same in both cases.
pub enum Executor {
    /// Connection or transaction against PostgreSQL.
    #[cfg(feature = "postgres")]
    Postgres(postgres::PostgresExecutor),

    /// Connection or transaction against SQLite.
    #[cfg(feature = "sqlite")]
    Sqlite(sqlite::SqliteExecutor),
}

/// An `Executor` that runs inside a transaction.  Dropping it without `commit` rolls back.
pub struct TxExecutor(Executor);

impl TxExecutor {
    /// Gives access to the executor to issue queries within the transaction.
    pub fn ex(&mut self) -> &mut Executor {
        &mut self.0
    }

    /// Makes the changes done within the transaction permanent.
    pub async fn commit(self) -> DbResult<()> {
        match self.0 {
            #[cfg(feature = "postgres")]
            Executor::Postgres(ex) => ex.commit().await,

            #[cfg(feature = "sqlite")]
            Executor::Sqlite(ex) => ex.commit().await,
        }
    }
}

/// A connection pool to one of the supported backends.
#[async_trait]
pub trait Db {
    /// Takes a connection from the pool to run standalone queries.
    async fn ex(&self) -> DbResult<Executor>;

    /// Starts a new transaction.  The caller must `commit` it for its changes to stick.
    async fn begin(&self) -> DbResult<TxExecutor>;

    /// Shuts the pool down.  Call this before dropping the database.
    async fn close(&self);
}

/// Helpers to write a database test once and run it against every backend.
#[cfg(any(test, feature = "testutils"))]
pub mod testutils {
    pub use paste::paste;

    /// Defines a test called `name` that calls `module::name` with the database returned by
    /// `setup`.  Optional `extra` attributes, such as `#[ignore]`, are attached to the test.
    #[macro_export]
    macro_rules! generate_one_test [
        ( $name:ident, $setup:expr, $module:path $(, #[$extra:meta] )? ) => {
            #[tokio::test]
            $(#[$extra])?
            async fn $name() {
                $crate::db::testutils::paste! {
                    $module :: [< $name >]($setup).await;
                }
            }
        }
    ];

    pub use generate_one_test;

    /// Defines one test per `name` in `module`, all of them backed by the database returned by
    /// `setup`.  That database must already contain the schema the tests expect.
    #[macro_export]
    macro_rules! generate_tests [
        ( #[$extra:meta], $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module, #[$extra]);
            )+
        };

        ( $setup:expr, $module:path $(, $name:ident)+ ) => {
            $(
                $crate::db::testutils::generate_one_test!($name, $setup, $module);
            )+
        };
    ];

    pub use generate_tests;
}
