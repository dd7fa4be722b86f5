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

//! Database abstraction in terms of the operations needed by the server.

use crate::model::{
    Description, Exercise, ExerciseDate, LogEntry, LogQuery, Minutes, User, UserId, Username,
};
use extracker_core::db::{postgres, sqlite, DbError, DbResult, Executor};
use futures::TryStreamExt;
use sqlx::Row;
use time::Date;
use uuid::Uuid;


/// Validates that an `INSERT` statement only touched 1 row.
fn ensure_one_insert(affected: u64) -> DbResult<()> {
    match affected {
        1 => Ok(()),
        _ => Err(DbError::BackendError(format!("Insert affected {} rows", affected))),
    }
}

/// Initializes the database schema.
pub async fn init_schema(ex: &mut Executor) -> DbResult<()> {
    match ex {
        Executor::Postgres(ref mut ex) => {
            postgres::run_schema(ex, include_str!("db/postgres.sql")).await
        }

        Executor::Sqlite(ref mut ex) => sqlite::run_schema(ex, include_str!("db/sqlite.sql")).await,
    }
}

/// Creates a new user called `username` and returns it along with its newly-assigned identifier.
pub(crate) async fn create_user(ex: &mut Executor, username: &Username) -> DbResult<User> {
    let id = UserId::new(Uuid::new_v4());

    let rows_affected = match ex {
        Executor::Postgres(ref mut ex) => {
            let query_str = "INSERT INTO users (id, username) VALUES ($1, $2)";
            sqlx::query(query_str)
                .bind(*id.as_uuid())
                .bind(username.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        Executor::Sqlite(ref mut ex) => {
            let query_str = "INSERT INTO users (id, username) VALUES (?, ?)";
            sqlx::query(query_str)
                .bind(*id.as_uuid())
                .bind(username.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }
    };
    ensure_one_insert(rows_affected)?;

    Ok(User::new(id, username.clone()))
}

/// Gets all users in the order in which they were created.
pub(crate) async fn get_users(ex: &mut Executor) -> DbResult<Vec<User>> {
    let query_str = "SELECT id, username FROM users ORDER BY seq";

    let mut users = vec![];
    match ex {
        Executor::Postgres(ref mut ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                let id: Uuid = row.try_get("id").map_err(postgres::map_sqlx_error)?;
                let username: String = row.try_get("username").map_err(postgres::map_sqlx_error)?;
                users.push(User::new(UserId::new(id), Username::new(username)?));
            }
        }

        Executor::Sqlite(ref mut ex) => {
            let mut rows = sqlx::query(query_str).fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                let id: Uuid = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
                let username: String = row.try_get("username").map_err(sqlite::map_sqlx_error)?;
                users.push(User::new(UserId::new(id), Username::new(username)?));
            }
        }
    }
    Ok(users)
}

/// Gets the user identified by `id`.
pub(crate) async fn get_user(ex: &mut Executor, id: &UserId) -> DbResult<User> {
    let username: String = match ex {
        Executor::Postgres(ref mut ex) => {
            let query_str = "SELECT username FROM users WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(*id.as_uuid())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("username").map_err(postgres::map_sqlx_error)?
        }

        Executor::Sqlite(ref mut ex) => {
            let query_str = "SELECT username FROM users WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(*id.as_uuid())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("username").map_err(sqlite::map_sqlx_error)?
        }
    };

    Ok(User::new(*id, Username::new(username)?))
}

/// Stores a new exercise for `user`.
///
/// Fails with `NotFound` if the user does not exist.
pub(crate) async fn create_exercise(
    ex: &mut Executor,
    user: &User,
    description: &Description,
    duration: Minutes,
    date: ExerciseDate,
) -> DbResult<Exercise> {
    let id = Uuid::new_v4();

    let rows_affected = match ex {
        Executor::Postgres(ref mut ex) => {
            let query_str = "
                INSERT INTO exercises (id, user_id, username, description, duration, date)
                VALUES ($1, $2, $3, $4, $5, $6)
            ";
            sqlx::query(query_str)
                .bind(id)
                .bind(*user.id().as_uuid())
                .bind(user.username().as_str())
                .bind(description.as_str())
                .bind(duration.as_i32())
                .bind(date.as_date())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?
                .rows_affected()
        }

        Executor::Sqlite(ref mut ex) => {
            let query_str = "
                INSERT INTO exercises (id, user_id, username, description, duration, date)
                VALUES (?, ?, ?, ?, ?, ?)
            ";
            sqlx::query(query_str)
                .bind(id)
                .bind(*user.id().as_uuid())
                .bind(user.username().as_str())
                .bind(description.as_str())
                .bind(i64::from(duration.as_u32()))
                .bind(date.as_date())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?
                .rows_affected()
        }
    };
    ensure_one_insert(rows_affected)?;

    Ok(Exercise::new(*user.id(), user.username().clone(), description.clone(), duration, date))
}

/// Gets the exercises of the user identified by `user_id` that match `query`, in chronological
/// order and, for those on the same day, in insertion order.
pub(crate) async fn get_exercises(
    ex: &mut Executor,
    user_id: &UserId,
    query: &LogQuery,
) -> DbResult<Vec<LogEntry>> {
    let from = query.from().map(|d| d.as_date());
    let to = query.to().map(|d| d.as_date());

    let mut entries = vec![];
    match ex {
        Executor::Postgres(ref mut ex) => {
            let query_str = "
                SELECT description, duration, date
                FROM exercises
                WHERE
                    user_id = $1
                    AND ($2::DATE IS NULL OR date >= $2)
                    AND ($3::DATE IS NULL OR date <= $3)
                ORDER BY date, seq
                LIMIT $4
            ";
            let mut rows = sqlx::query(query_str)
                .bind(*user_id.as_uuid())
                .bind(from)
                .bind(to)
                .bind(query.limit().map(|l| l.as_i64()))
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(postgres::map_sqlx_error)? {
                let description: String =
                    row.try_get("description").map_err(postgres::map_sqlx_error)?;
                let duration: i32 = row.try_get("duration").map_err(postgres::map_sqlx_error)?;
                let date: Date = row.try_get("date").map_err(postgres::map_sqlx_error)?;
                entries.push(LogEntry::new(
                    Description::new(description)?,
                    Minutes::from_i64(i64::from(duration))?,
                    ExerciseDate::new(date),
                ));
            }
        }

        Executor::Sqlite(ref mut ex) => {
            let query_str = "
                SELECT description, duration, date
                FROM exercises
                WHERE
                    user_id = ?
                    AND (? IS NULL OR date >= ?)
                    AND (? IS NULL OR date <= ?)
                ORDER BY date, seq
                LIMIT ?
            ";
            let mut rows = sqlx::query(query_str)
                .bind(*user_id.as_uuid())
                .bind(from)
                .bind(from)
                .bind(to)
                .bind(to)
                .bind(query.limit().map(|l| l.as_i64()).unwrap_or(-1))
                .fetch(ex.conn());
            while let Some(row) = rows.try_next().await.map_err(sqlite::map_sqlx_error)? {
                let description: String =
                    row.try_get("description").map_err(sqlite::map_sqlx_error)?;
                let duration: i64 = row.try_get("duration").map_err(sqlite::map_sqlx_error)?;
                let date: Date = row.try_get("date").map_err(sqlite::map_sqlx_error)?;
                entries.push(LogEntry::new(
                    Description::new(description)?,
                    Minutes::from_i64(duration)?,
                    ExerciseDate::new(date),
                ));
            }
        }
    }
    Ok(entries)
}
