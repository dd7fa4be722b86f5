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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use extracker_core::clocks::testutils::SettableClock;
use extracker_core::db::{Db, Executor};
use std::sync::Arc;
use time::macros::datetime;
use time::Date;

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used by the driver.
    pub(crate) clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Initializes a driver using an in-memory database and a settable clock.
    pub(crate) async fn setup() -> Self {
        let db = Arc::new(extracker_core::db::sqlite::testutils::setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(datetime!(2023-06-15 18:30:00 UTC)));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Gets a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Gets a copy of the driver under test.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a user called `name` directly in the database.
    pub(crate) async fn put_user(&self, name: &'static str) -> User {
        db::create_user(&mut self.ex().await, &Username::from(name)).await.unwrap()
    }

    /// Creates an exercise for `user` directly in the database.
    pub(crate) async fn put_exercise(
        &self,
        user: &User,
        description: &'static str,
        duration: u32,
        date: Date,
    ) {
        db::create_exercise(
            &mut self.ex().await,
            user,
            &Description::from(description),
            Minutes::from_u32(duration).unwrap(),
            ExerciseDate::new(date),
        )
        .await
        .unwrap();
    }

    /// Gets all exercises of `user` directly from the database.
    pub(crate) async fn get_exercises(&self, user: &User) -> Vec<LogEntry> {
        db::get_exercises(&mut self.ex().await, user.id(), &LogQuery::default()).await.unwrap()
    }
}
