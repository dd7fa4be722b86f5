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

//! Operations on exercises.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use extracker_core::db::DbError;
use extracker_core::driver::{DriverError, DriverResult};
use log::info;

/// Converts a `NotFound` error while operating on a user into a user-facing message.
pub(super) fn user_not_found(e: DbError) -> DriverError {
    match e {
        DbError::NotFound => DriverError::NotFound("Cannot find user".to_owned()),
        e => e.into(),
    }
}

impl Driver {
    /// Logs a new exercise for the user identified by `user_id`.
    ///
    /// The exercise happens on `date` or, if not provided, on the current day.
    pub(crate) async fn create_exercise(
        self,
        user_id: UserId,
        description: Description,
        duration: Minutes,
        date: Option<ExerciseDate>,
    ) -> DriverResult<Exercise> {
        let date = date.unwrap_or_else(|| ExerciseDate::new(self.clock.today_utc()));

        let mut tx = self.db.begin().await?;
        let user = db::get_user(tx.ex(), &user_id).await.map_err(user_not_found)?;
        let exercise = db::create_exercise(tx.ex(), &user, &description, duration, date)
            .await
            .map_err(user_not_found)?;
        tx.commit().await?;

        info!(
            "Logged {} minutes of exercise for user {} on {}",
            exercise.duration().as_u32(),
            user_id,
            exercise.date()
        );
        Ok(exercise)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::driver::testutils::*;
    use time::macros::{date, datetime};
    use uuid::Uuid;

    #[tokio::test]
    async fn test_create_exercise_with_date() {
        let context = TestContext::setup().await;
        let user = context.put_user("runner").await;

        let exercise = context
            .driver()
            .create_exercise(
                *user.id(),
                Description::from("run"),
                Minutes::from_u32(30).unwrap(),
                Some(ExerciseDate::new(date!(2023-01-01))),
            )
            .await
            .unwrap();
        assert_eq!(user.id(), exercise.user_id());
        assert_eq!(user.username(), exercise.username());
        assert_eq!(date!(2023-01-01), exercise.date().as_date());

        assert_eq!(
            vec![LogEntry::new(
                Description::from("run"),
                Minutes::from_u32(30).unwrap(),
                ExerciseDate::new(date!(2023-01-01))
            )],
            context.get_exercises(&user).await
        );
    }

    #[tokio::test]
    async fn test_create_exercise_defaults_to_today() {
        let context = TestContext::setup().await;
        let user = context.put_user("runner").await;

        context.clock.set(datetime!(2023-07-04 23:59:59 UTC));
        let exercise = context
            .driver()
            .create_exercise(
                *user.id(),
                Description::from("run"),
                Minutes::from_u32(30).unwrap(),
                None,
            )
            .await
            .unwrap();
        assert_eq!(date!(2023-07-04), exercise.date().as_date());
        assert_eq!(30, exercise.duration().as_u32());
    }

    #[tokio::test]
    async fn test_create_exercise_user_not_found() {
        let context = TestContext::setup().await;
        let user = context.put_user("runner").await;

        let err = context
            .driver()
            .create_exercise(
                UserId::new(Uuid::new_v4()),
                Description::from("run"),
                Minutes::from_u32(30).unwrap(),
                None,
            )
            .await
            .unwrap_err();
        assert_eq!(DriverError::NotFound("Cannot find user".to_owned()), err);

        assert!(context.get_exercises(&user).await.is_empty());
    }

    #[test]
    fn test_user_not_found_passes_other_errors() {
        assert_eq!(
            DriverError::BackendError("Unavailable".to_owned()),
            user_not_found(DbError::Unavailable)
        );
    }
}
