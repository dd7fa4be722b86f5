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

//! The `ExerciseDate` data type.

use crate::model::{ModelError, ModelResult};
use derive_more::Constructor;
use serde::de::Visitor;
use serde::{Deserialize, Serialize};
use std::fmt;
use time::format_description::well_known::Rfc3339;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Calendar format for dates supplied by machines, like `2023-01-31`.
const ISO_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Human-readable format for dates, like `Tue Jan 31 2023`.
const HUMAN_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[weekday repr:short] [month repr:short] [day] [year]");

/// The calendar day on which an exercise happened.
///
/// Dates are always rendered in their human-readable form but can be parsed from a bare
/// `YYYY-MM-DD` date, from an RFC 3339 timestamp (which is converted to its UTC day), or from the
/// human-readable form itself.
#[derive(Clone, Constructor, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub(crate) struct ExerciseDate(Date);

impl ExerciseDate {
    /// Parses an untrusted date string `s` in any of the supported formats.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        let s = s.trim();

        if let Ok(date) = Date::parse(s, ISO_FORMAT) {
            return Ok(Self(date));
        }

        if let Ok(timestamp) = OffsetDateTime::parse(s, &Rfc3339) {
            return Ok(Self(timestamp.to_offset(UtcOffset::UTC).date()));
        }

        if let Ok(date) = Date::parse(s, HUMAN_FORMAT) {
            return Ok(Self(date));
        }

        Err(ModelError("Invalid date".to_owned()))
    }

    /// Returns the underlying calendar date.
    pub(crate) fn as_date(&self) -> Date {
        self.0
    }
}

impl fmt::Display for ExerciseDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.0.format(HUMAN_FORMAT).map_err(|_| fmt::Error)?;
        f.write_str(&formatted)
    }
}

impl Serialize for ExerciseDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A deserialization visitor for an `ExerciseDate`.
struct ExerciseDateVisitor;

impl Visitor<'_> for ExerciseDateVisitor {
    type Value = ExerciseDate;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a date string")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: serde::de::Error,
    {
        ExerciseDate::parse(v).map_err(|e| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for ExerciseDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_str(ExerciseDateVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_test::{assert_de_tokens_error, assert_tokens, Token};
    use time::macros::date;

    #[test]
    fn test_exercise_date_parse_iso() {
        assert_eq!(
            ExerciseDate::new(date!(2023-02-01)),
            ExerciseDate::parse("2023-02-01").unwrap()
        );
        assert_eq!(
            ExerciseDate::new(date!(1999-12-31)),
            ExerciseDate::parse("  1999-12-31 ").unwrap()
        );
    }

    #[test]
    fn test_exercise_date_parse_rfc3339_uses_utc_day() {
        assert_eq!(
            ExerciseDate::new(date!(2023-03-01)),
            ExerciseDate::parse("2023-03-01T10:00:00Z").unwrap()
        );
        assert_eq!(
            ExerciseDate::new(date!(2023-03-02)),
            ExerciseDate::parse("2023-03-01T23:30:00-02:00").unwrap()
        );
    }

    #[test]
    fn test_exercise_date_parse_human() {
        assert_eq!(
            ExerciseDate::new(date!(2023-01-01)),
            ExerciseDate::parse("Sun Jan 01 2023").unwrap()
        );
    }

    #[test]
    fn test_exercise_date_parse_error() {
        for s in ["", "tomorrow", "2023-13-01", "2023-02-30", "01/02/2023", "2023-1-5"] {
            assert_eq!(
                ModelError("Invalid date".to_owned()),
                ExerciseDate::parse(s).unwrap_err(),
                "Input was {}",
                s
            );
        }
    }

    #[test]
    fn test_exercise_date_display() {
        assert_eq!("Sun Jan 01 2023", ExerciseDate::new(date!(2023-01-01)).to_string());
        assert_eq!("Thu Feb 29 2024", ExerciseDate::new(date!(2024-02-29)).to_string());
    }

    #[test]
    fn test_exercise_date_ordering_is_chronological() {
        let dates = [
            ExerciseDate::parse("Wed Feb 01 2023").unwrap(),
            ExerciseDate::parse("Sun Jan 01 2023").unwrap(),
            ExerciseDate::parse("Fri Dec 01 2023").unwrap(),
        ];
        let mut sorted = dates;
        sorted.sort();
        assert_eq!([dates[1], dates[0], dates[2]], sorted);
    }

    #[test]
    fn test_exercise_date_ser_de_ok() {
        let exercise_date = ExerciseDate::new(date!(2023-02-01));
        assert_tokens(&exercise_date, &[Token::Str("Wed Feb 01 2023")]);
    }

    #[test]
    fn test_exercise_date_de_error() {
        assert_de_tokens_error::<ExerciseDate>(&[Token::Str("not a date")], "Invalid date");
    }
}
