// III-IV
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

//! Persistence of item requests.

use crate::model::{ItemRequest, Page, RequestId, UserId};
#[cfg(feature = "postgres")]
use shareit_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use shareit_core::db::sqlite::{self, build_timestamp, unpack_timestamp};
use shareit_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;
use time::OffsetDateTime;

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for ItemRequest {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let requester_id: i64 = row.try_get("requester_id").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let created: OffsetDateTime = row.try_get("created").map_err(postgres::map_sqlx_error)?;

        Ok(ItemRequest::new(RequestId::from(id), UserId::from(requester_id), description, created)?)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for ItemRequest {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let requester_id: i64 = row.try_get("requester_id").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let created_secs: i64 = row.try_get("created_secs").map_err(sqlite::map_sqlx_error)?;
        let created_nsecs: i64 = row.try_get("created_nsecs").map_err(sqlite::map_sqlx_error)?;

        Ok(ItemRequest::new(
            RequestId::from(id),
            UserId::from(requester_id),
            description,
            build_timestamp(created_secs, created_nsecs)?,
        )?)
    }
}

/// Creates a new request by `requester_id`.  Fails with `NotFound` if the requester does not
/// exist.
pub(crate) async fn create_request(
    ex: &mut Executor,
    requester_id: UserId,
    description: &str,
    created: OffsetDateTime,
) -> DbResult<ItemRequest> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO requests (requester_id, description, created)
                VALUES ($1, $2, $3)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(requester_id.as_i64())
                .bind(description)
                .bind(created)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_secs, created_nsecs) = unpack_timestamp(created)?;

            let query_str = "
                INSERT INTO requests (requester_id, description, created_secs, created_nsecs)
                VALUES (?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(requester_id.as_i64())
                .bind(description)
                .bind(created_secs)
                .bind(created_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(ItemRequest::new(RequestId::from(id), requester_id, description, created)?)
}

/// Gets the request identified by `id`.
pub(crate) async fn get_request(ex: &mut Executor, id: RequestId) -> DbResult<ItemRequest> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "SELECT id, requester_id, description, created FROM requests WHERE id = $1";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            ItemRequest::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, requester_id, description, created_secs, created_nsecs
                FROM requests WHERE id = ?";
            let row = sqlx::query(query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            ItemRequest::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Returns true if the request identified by `id` exists.
pub(crate) async fn request_exists(ex: &mut Executor, id: RequestId) -> DbResult<bool> {
    match get_request(ex, id).await {
        Ok(_) => Ok(true),
        Err(DbError::NotFound) => Ok(false),
        Err(e) => Err(e),
    }
}

/// Gets all requests made by `requester_id`, newest first.
pub(crate) async fn get_requests_by_requester(
    ex: &mut Executor,
    requester_id: UserId,
) -> DbResult<Vec<ItemRequest>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, requester_id, description, created FROM requests
                WHERE requester_id = $1
                ORDER BY created DESC, id DESC";
            let rows = sqlx::query(query_str)
                .bind(requester_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(ItemRequest::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, requester_id, description, created_secs, created_nsecs FROM requests
                WHERE requester_id = ?
                ORDER BY created_secs DESC, created_nsecs DESC, id DESC";
            let rows = sqlx::query(query_str)
                .bind(requester_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(ItemRequest::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets a page of the requests made by anybody other than `user_id`, newest first.
pub(crate) async fn get_requests_of_others(
    ex: &mut Executor,
    user_id: UserId,
    page: Page,
) -> DbResult<Vec<ItemRequest>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT id, requester_id, description, created FROM requests
                WHERE requester_id <> $1
                ORDER BY created DESC, id DESC
                LIMIT $2 OFFSET $3";
            let rows = sqlx::query(query_str)
                .bind(user_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(ItemRequest::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT id, requester_id, description, created_secs, created_nsecs FROM requests
                WHERE requester_id <> ?
                ORDER BY created_secs DESC, created_nsecs DESC, id DESC
                LIMIT ? OFFSET ?";
            let rows = sqlx::query(query_str)
                .bind(user_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(ItemRequest::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
