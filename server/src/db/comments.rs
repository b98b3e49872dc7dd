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

//! Persistence of comments.

use crate::model::{Comment, CommentId, ItemId, UserId};
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
impl TryFrom<PgRow> for Comment {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(postgres::map_sqlx_error)?;
        let author_id: i64 = row.try_get("author_id").map_err(postgres::map_sqlx_error)?;
        let author_name: String = row.try_get("author_name").map_err(postgres::map_sqlx_error)?;
        let text: String = row.try_get("text").map_err(postgres::map_sqlx_error)?;
        let created: OffsetDateTime = row.try_get("created").map_err(postgres::map_sqlx_error)?;

        Ok(Comment::new(
            CommentId::from(id),
            ItemId::from(item_id),
            UserId::from(author_id),
            author_name,
            text,
            created,
        )?)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Comment {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(sqlite::map_sqlx_error)?;
        let author_id: i64 = row.try_get("author_id").map_err(sqlite::map_sqlx_error)?;
        let author_name: String = row.try_get("author_name").map_err(sqlite::map_sqlx_error)?;
        let text: String = row.try_get("text").map_err(sqlite::map_sqlx_error)?;
        let created_secs: i64 = row.try_get("created_secs").map_err(sqlite::map_sqlx_error)?;
        let created_nsecs: i64 = row.try_get("created_nsecs").map_err(sqlite::map_sqlx_error)?;

        Ok(Comment::new(
            CommentId::from(id),
            ItemId::from(item_id),
            UserId::from(author_id),
            author_name,
            text,
            build_timestamp(created_secs, created_nsecs)?,
        )?)
    }
}

/// Stores a new comment by `author_id` on `item_id` and returns it with the author's name.
pub(crate) async fn create_comment(
    ex: &mut Executor,
    item_id: ItemId,
    author_id: UserId,
    text: &str,
    created: OffsetDateTime,
) -> DbResult<Comment> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                WITH inserted AS (
                    INSERT INTO comments (item_id, author_id, text, created)
                    VALUES ($1, $2, $3, $4)
                    RETURNING id, item_id, author_id, text, created
                )
                SELECT inserted.*, users.name AS author_name
                FROM inserted JOIN users ON inserted.author_id = users.id";
            let row = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .bind(author_id.as_i64())
                .bind(text)
                .bind(created)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Comment::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (created_secs, created_nsecs) = unpack_timestamp(created)?;

            let query_str = "
                INSERT INTO comments (item_id, author_id, text, created_secs, created_nsecs)
                VALUES (?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .bind(author_id.as_i64())
                .bind(text)
                .bind(created_secs)
                .bind(created_nsecs)
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;

            let query_str = "
                SELECT c.id, c.item_id, c.author_id, c.text, c.created_secs, c.created_nsecs,
                    u.name AS author_name
                FROM comments c JOIN users u ON c.author_id = u.id
                WHERE c.id = ?";
            let row = sqlx::query(query_str)
                .bind(done.last_insert_rowid())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Comment::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all comments left on `item_id`, oldest first.
pub(crate) async fn get_comments_by_item(
    ex: &mut Executor,
    item_id: ItemId,
) -> DbResult<Vec<Comment>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT c.id, c.item_id, c.author_id, c.text, c.created, u.name AS author_name
                FROM comments c JOIN users u ON c.author_id = u.id
                WHERE c.item_id = $1
                ORDER BY c.created, c.id";
            let rows = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Comment::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                SELECT c.id, c.item_id, c.author_id, c.text, c.created_secs, c.created_nsecs,
                    u.name AS author_name
                FROM comments c JOIN users u ON c.author_id = u.id
                WHERE c.item_id = ?
                ORDER BY c.created_secs, c.created_nsecs, c.id";
            let rows = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Comment::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
