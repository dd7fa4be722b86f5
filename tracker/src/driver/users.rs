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

//! Operations on users.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use extracker_core::driver::DriverResult;
use log::info;

impl Driver {
    /// Creates a new user called `username`.
    pub(crate) async fn create_user(self, username: Username) -> DriverResult<User> {
        let user = db::create_user(&mut self.db.ex().await?, &username).await?;
        info!("Created user {} with name '{}'", user.id(), user.username().as_str());
        Ok(user)
    }

    /// Gets all users in the order in which they were created.
    pub(crate) async fn get_users(self) -> DriverResult<Vec<User>> {
        let users = db::get_users(&mut self.db.ex().await?).await?;
        Ok(users)
    }
}
