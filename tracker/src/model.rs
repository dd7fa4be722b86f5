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

//! High-level data types.

pub(crate) use extracker_core::model::{ModelError, ModelResult};

mod date;
pub(crate) use date::ExerciseDate;
mod exercise;
pub(crate) use exercise::{Description, Exercise, LogEntry, Minutes};
mod logs;
pub(crate) use logs::{ExerciseLog, Limit, LogQuery};
mod user;
pub(crate) use user::{User, UserId, Username};
