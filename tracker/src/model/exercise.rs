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

//! The `Exercise` data type and its components.

use crate::model::{ExerciseDate, ModelError, ModelResult, UserId, Username};
use derive_getters::Getters;
use derive_more::Constructor;
#[cfg(test)]
use serde::Deserialize;
use serde::Serialize;

/// Free-form description of what an exercise consisted of.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct Description(String);

impl Description {
    /// Creates a new description from an untrusted string `s`, making sure it is not blank.
    pub(crate) fn new<S: Into<String>>(s: S) -> ModelResult<Self> {
        let s = s.into();
        if s.trim().is_empty() {
            return Err(ModelError("Description is required".to_owned()));
        }
        Ok(Self(s))
    }

    /// Returns a string view of the description.
    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
impl From<&'static str> for Description {
    /// Creates a new description from a hardcoded string, which must be valid.
    fn from(s: &'static str) -> Self {
        Description::new(s).expect("Hardcoded descriptions must be valid")
    }
}

/// The duration of an exercise in minutes.  We store this as an u32 but guarantee that it is
/// usable in an i32 context because the PostgreSQL database backend needs it.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
#[serde(transparent)]
pub(crate) struct Minutes(u32);

impl Minutes {
    /// Parses an untrusted duration `s`, which must be a non-negative integer.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        let minutes = match s.trim().parse::<u64>() {
            Ok(minutes) => minutes,
            Err(_) => return Err(ModelError("Duration should be number".to_owned())),
        };
        match u32::try_from(minutes) {
            Ok(minutes) => Self::from_u32(minutes),
            Err(_) => Err(ModelError(format!("Duration {} is too long", minutes))),
        }
    }

    /// Creates a duration from a `u32` with range validation.
    pub(crate) fn from_u32(minutes: u32) -> ModelResult<Self> {
        match i32::try_from(minutes) {
            Ok(_) => Ok(Self(minutes)),
            Err(_) => Err(ModelError(format!("Duration {} is too long", minutes))),
        }
    }

    /// Creates a duration from an `i64` read from the database, with range validation.
    pub(crate) fn from_i64(minutes: i64) -> ModelResult<Self> {
        match u32::try_from(minutes) {
            Ok(minutes) => Self::from_u32(minutes),
            Err(e) => Err(ModelError(format!("Duration cannot be represented: {}", e))),
        }
    }

    /// Returns the duration as an `i32`.
    pub(crate) fn as_i32(&self) -> i32 {
        i32::try_from(self.0).expect("i32 compatibility validated at construction time")
    }

    /// Returns the duration as a `u32`.
    pub(crate) fn as_u32(&self) -> u32 {
        self.0
    }
}

/// An exercise logged by a user.
#[derive(Constructor, Debug, Getters, PartialEq)]
pub(crate) struct Exercise {
    /// Identifier of the user that owns this exercise.
    user_id: UserId,

    /// Name of the owning user at the time the exercise was logged.
    username: Username,

    /// What the exercise was about.
    description: Description,

    /// How long the exercise took.
    duration: Minutes,

    /// When the exercise happened.
    date: ExerciseDate,
}

/// One entry in the log of exercises of a user.
#[derive(Constructor, Debug, Getters, PartialEq, Serialize)]
#[cfg_attr(test, derive(Deserialize))]
pub(crate) struct LogEntry {
    /// What the exercise was about.
    description: Description,

    /// How long the exercise took.
    duration: Minutes,

    /// When the exercise happened.
    date: ExerciseDate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_description_ok() {
        assert_eq!("run", Description::new("run").unwrap().as_str());
    }

    #[test]
    fn test_description_error() {
        assert_eq!(
            ModelError("Description is required".to_owned()),
            Description::new("").unwrap_err()
        );
        assert!(Description::new(" \t").is_err());
    }

    #[test]
    fn test_minutes_parse_ok() {
        assert_eq!(30, Minutes::parse("30").unwrap().as_u32());
        assert_eq!(0, Minutes::parse("0").unwrap().as_u32());
        assert_eq!(45, Minutes::parse(" 45 ").unwrap().as_i32());
    }

    #[test]
    fn test_minutes_parse_error() {
        for s in ["", "abc", "-5", "1.5", "30min"] {
            assert_eq!(
                ModelError("Duration should be number".to_owned()),
                Minutes::parse(s).unwrap_err(),
                "Input was {}",
                s
            );
        }
    }

    #[test]
    fn test_minutes_range() {
        assert!(Minutes::from_u32(i32::MAX as u32).is_ok());
        assert!(Minutes::from_u32(i32::MAX as u32 + 1).is_err());
        assert_eq!(
            ModelError("Duration 2147483648 is too long".to_owned()),
            Minutes::parse("2147483648").unwrap_err()
        );
        assert_eq!(
            ModelError("Duration 4294967296 is too long".to_owned()),
            Minutes::parse("4294967296").unwrap_err()
        );
        assert_eq!(
            ModelError("Duration 18446744073709551615 is too long".to_owned()),
            Minutes::parse("18446744073709551615").unwrap_err()
        );

        assert_eq!(10, Minutes::from_i64(10).unwrap().as_u32());
        assert!(Minutes::from_i64(-1).is_err());
    }

    #[test]
    fn test_log_entry_ser() {
        let entry = LogEntry::new(
            Description::from("run"),
            Minutes::from_u32(30).unwrap(),
            ExerciseDate::new(date!(2023-01-01)),
        );
        assert_eq!(
            serde_json::json!({"description": "run", "duration": 30, "date": "Sun Jan 01 2023"}),
            serde_json::to_value(&entry).unwrap()
        );
    }
}
