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

//! Persistence of items.

use crate::db::expect_one_row;
use crate::model::{Item, ItemId, RequestId, UserId};
#[cfg(feature = "postgres")]
use shareit_core::db::postgres;
#[cfg(any(feature = "sqlite", test))]
use shareit_core::db::sqlite;
use shareit_core::db::{DbError, DbResult, Executor};
use sqlx::Row;
#[cfg(feature = "postgres")]
use sqlx::postgres::PgRow;
#[cfg(any(feature = "sqlite", test))]
use sqlx::sqlite::SqliteRow;

/// Columns to select to build an `Item`.
const ITEM_COLUMNS: &str = "id, owner_id, name, description, available, request_id";

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for Item {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let owner_id: i64 = row.try_get("owner_id").map_err(postgres::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(postgres::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(postgres::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(postgres::map_sqlx_error)?;
        let request_id: Option<i64> =
            row.try_get("request_id").map_err(postgres::map_sqlx_error)?;

        let item =
            Item::new(ItemId::from(id), UserId::from(owner_id), name, description, available)?
            .with_request_id(request_id.map(RequestId::from));
        Ok(item)
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for Item {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let owner_id: i64 = row.try_get("owner_id").map_err(sqlite::map_sqlx_error)?;
        let name: String = row.try_get("name").map_err(sqlite::map_sqlx_error)?;
        let description: String = row.try_get("description").map_err(sqlite::map_sqlx_error)?;
        let available: bool = row.try_get("available").map_err(sqlite::map_sqlx_error)?;
        let request_id: Option<i64> = row.try_get("request_id").map_err(sqlite::map_sqlx_error)?;

        let item =
            Item::new(ItemId::from(id), UserId::from(owner_id), name, description, available)?
            .with_request_id(request_id.map(RequestId::from));
        Ok(item)
    }
}

/// Creates a new item owned by `owner_id`.  Fails with `NotFound` if the owner or the request
/// do not exist.
pub(crate) async fn create_item(
    ex: &mut Executor,
    owner_id: UserId,
    name: &str,
    description: &str,
    available: bool,
    request_id: Option<RequestId>,
) -> DbResult<Item> {
    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO items (owner_id, name, description, available, request_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(owner_id.as_i64())
                .bind(name)
                .bind(description)
                .bind(available)
                .bind(request_id.map(RequestId::as_i64))
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "
                INSERT INTO items (owner_id, name, description, available, request_id)
                VALUES (?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(owner_id.as_i64())
                .bind(name)
                .bind(description)
                .bind(available)
                .bind(request_id.map(RequestId::as_i64))
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    let item = Item::new(ItemId::from(id), owner_id, name, description, available)?
        .with_request_id(request_id);
    Ok(item)
}

/// Gets the item identified by `id`.
pub(crate) async fn get_item(ex: &mut Executor, id: ItemId) -> DbResult<Item> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!("SELECT {} FROM items WHERE id = $1", ITEM_COLUMNS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            Item::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!("SELECT {} FROM items WHERE id = ?", ITEM_COLUMNS);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            Item::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Overwrites the mutable fields of an existing `item`.
pub(crate) async fn update_item(ex: &mut Executor, item: &Item) -> DbResult<()> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                "UPDATE items SET name = $1, description = $2, available = $3 WHERE id = $4";
            let done = sqlx::query(query_str)
                .bind(item.name())
                .bind(item.description())
                .bind(item.available())
                .bind(item.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                "UPDATE items SET name = ?, description = ?, available = ? WHERE id = ?";
            let done = sqlx::query(query_str)
                .bind(item.name())
                .bind(item.description())
                .bind(item.available())
                .bind(item.id().as_i64())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    expect_one_row(rows_affected)
}

/// Gets all items owned by `owner_id` sorted by identifier.
pub(crate) async fn get_items_by_owner(ex: &mut Executor, owner_id: UserId) -> DbResult<Vec<Item>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                format!("SELECT {} FROM items WHERE owner_id = $1 ORDER BY id", ITEM_COLUMNS);
            let rows = sqlx::query(&query_str)
                .bind(owner_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Item::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                format!("SELECT {} FROM items WHERE owner_id = ? ORDER BY id", ITEM_COLUMNS);
            let rows = sqlx::query(&query_str)
                .bind(owner_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Item::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all items listed in response to `request_id` sorted by identifier.
pub(crate) async fn get_items_by_request(
    ex: &mut Executor,
    request_id: RequestId,
) -> DbResult<Vec<Item>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str =
                format!("SELECT {} FROM items WHERE request_id = $1 ORDER BY id", ITEM_COLUMNS);
            let rows = sqlx::query(&query_str)
                .bind(request_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Item::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str =
                format!("SELECT {} FROM items WHERE request_id = ? ORDER BY id", ITEM_COLUMNS);
            let rows = sqlx::query(&query_str)
                .bind(request_id.as_i64())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(Item::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets all available items whose name or description contain `text`, ignoring case, sorted by
/// identifier.
pub(crate) async fn search_available_items(ex: &mut Executor, text: &str) -> DbResult<Vec<Item>> {
    let text = text.to_lowercase();
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let pattern = crate::db::contains_pattern(&text);
            let query_str = format!(
                "SELECT {} FROM items
                WHERE available
                    AND (LOWER(name) LIKE $1 ESCAPE '\\' OR LOWER(description) LIKE $1 ESCAPE '\\')
                ORDER BY id",
                ITEM_COLUMNS
            );
            let rows = sqlx::query(&query_str)
                .bind(&pattern)
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(Item::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            // LOWER and LIKE only fold ASCII in SQLite so matching happens here.
            let query_str =
                format!("SELECT {} FROM items WHERE available ORDER BY id", ITEM_COLUMNS);
            let rows = sqlx::query(&query_str)
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            let mut items = vec![];
            for row in rows {
                let item = Item::try_from(row)?;
                if item.name().to_lowercase().contains(&text)
                    || item.description().to_lowercase().contains(&text)
                {
                    items.push(item);
                }
            }
            Ok(items)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}
