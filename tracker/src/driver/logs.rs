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

//! Operations on the exercise logs of users.

use crate::db;
use crate::driver::exercises::user_not_found;
use crate::driver::Driver;
use crate::model::*;
use extracker_core::driver::DriverResult;

impl Driver {
    /// Gets the exercises of the user identified by `user_id` that match `query`.
    pub(crate) async fn get_log(
        self,
        user_id: UserId,
        query: LogQuery,
    ) -> DriverResult<ExerciseLog> {
        let mut ex = self.db.ex().await?;
        let user = db::get_user(&mut ex, &user_id).await.map_err(user_not_found)?;
        let entries = db::get_exercises(&mut ex, &user_id, &query).await?;
        Ok(ExerciseLog::new(user, entries))
    }
}
