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

//! Types to query and represent the exercise log of a user.

use crate::model::{ExerciseDate, LogEntry, ModelError, ModelResult, User};
use derive_getters::{Dissolve, Getters};
use derive_more::Constructor;

/// Maximum number of entries to return from a log query.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Limit(u32);

impl Limit {
    /// Parses an untrusted limit `s`, which must be a non-negative integer.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        let limit = match s.trim().parse::<u64>() {
            Ok(limit) => limit,
            Err(_) => return Err(ModelError("Limit should be number".to_owned())),
        };
        match u32::try_from(limit) {
            Ok(limit) => Ok(Self(limit)),
            Err(_) => Err(ModelError(format!("Limit {} is too large", limit))),
        }
    }

    /// Returns the limit as an `i64` for use in queries.
    pub(crate) fn as_i64(&self) -> i64 {
        i64::from(self.0)
    }
}

/// Filters to apply when fetching the log of a user.
///
/// Both date bounds are inclusive.
#[derive(Debug, Default, Getters, PartialEq)]
pub(crate) struct LogQuery {
    /// Earliest date to return, if any.
    from: Option<ExerciseDate>,

    /// Latest date to return, if any.
    to: Option<ExerciseDate>,

    /// Maximum number of entries to return, if any.
    limit: Option<Limit>,
}

impl LogQuery {
    /// Creates a new log query.  A `limit` of zero means no limit.
    pub(crate) fn new(
        from: Option<ExerciseDate>,
        to: Option<ExerciseDate>,
        limit: Option<Limit>,
    ) -> Self {
        let limit = limit.filter(|limit| limit.0 > 0);
        Self { from, to, limit }
    }
}

/// The exercise log of a user.
#[derive(Constructor, Debug, Dissolve, Getters)]
pub(crate) struct ExerciseLog {
    /// The user that owns the log.
    user: User,

    /// The exercises in the log, in chronological order.
    entries: Vec<LogEntry>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_limit_parse() {
        assert_eq!(5, Limit::parse("5").unwrap().as_i64());
        assert_eq!(
            ModelError("Limit should be number".to_owned()),
            Limit::parse("five").unwrap_err()
        );
        assert!(Limit::parse("-1").is_err());
    }

    #[test]
    fn test_limit_parse_out_of_range() {
        assert_eq!(i64::from(u32::MAX), Limit::parse("4294967295").unwrap().as_i64());
        assert_eq!(
            ModelError("Limit 4294967296 is too large".to_owned()),
            Limit::parse("4294967296").unwrap_err()
        );
        assert_eq!(
            ModelError("Limit should be number".to_owned()),
            Limit::parse("18446744073709551616").unwrap_err()
        );
    }

    #[test]
    fn test_log_query_zero_limit_means_unlimited() {
        let query = LogQuery::new(None, None, Some(Limit::parse("0").unwrap()));
        assert_eq!(None, *query.limit());

        let query = LogQuery::new(None, None, Some(Limit::parse("2").unwrap()));
        assert_eq!(Some(Limit(2)), *query.limit());
    }

    #[test]
    fn test_log_query_keeps_bounds() {
        let from = ExerciseDate::new(date!(2023-01-15));
        let to = ExerciseDate::new(date!(2023-02-15));
        let query = LogQuery::new(Some(from), Some(to), None);
        assert_eq!(Some(from), *query.from());
        assert_eq!(Some(to), *query.to());
        assert_eq!(LogQuery::default(), LogQuery::new(None, None, None));
    }
}
