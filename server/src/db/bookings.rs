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

//! Persistence of bookings.

use crate::model::{
    Booking, BookingDetails, BookingId, BookingStatus, BookingSummary, ItemId, Page, UserId,
};
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

/// Tables and joined columns to query to build a `BookingDetails` from PostgreSQL.
#[cfg(feature = "postgres")]
const PG_DETAILS_QUERY: &str = "
    SELECT
        b.id, b.item_id, b.booker_id, b.start_time, b.end_time, b.status,
        u.name AS booker_name, i.name AS item_name, i.owner_id AS item_owner_id
    FROM bookings b
        JOIN users u ON b.booker_id = u.id
        JOIN items i ON b.item_id = i.id";

/// Tables and joined columns to query to build a `BookingDetails` from SQLite.
#[cfg(any(feature = "sqlite", test))]
const SQLITE_DETAILS_QUERY: &str = "
    SELECT
        b.id, b.item_id, b.booker_id, b.start_secs, b.start_nsecs, b.end_secs, b.end_nsecs,
        b.status, u.name AS booker_name, i.name AS item_name, i.owner_id AS item_owner_id
    FROM bookings b
        JOIN users u ON b.booker_id = u.id
        JOIN items i ON b.item_id = i.id";

#[cfg(feature = "postgres")]
impl TryFrom<PgRow> for BookingDetails {
    type Error = DbError;

    fn try_from(row: PgRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(postgres::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(postgres::map_sqlx_error)?;
        let start: OffsetDateTime = row.try_get("start_time").map_err(postgres::map_sqlx_error)?;
        let end: OffsetDateTime = row.try_get("end_time").map_err(postgres::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(postgres::map_sqlx_error)?;
        let booker_name: String = row.try_get("booker_name").map_err(postgres::map_sqlx_error)?;
        let item_name: String = row.try_get("item_name").map_err(postgres::map_sqlx_error)?;
        let item_owner_id: i64 = row.try_get("item_owner_id").map_err(postgres::map_sqlx_error)?;

        let booking = Booking::new(
            BookingId::from(id),
            ItemId::from(item_id),
            UserId::from(booker_id),
            start,
            end,
            BookingStatus::parse(&status)?,
        );
        Ok(BookingDetails::new(booking, booker_name, item_name, UserId::from(item_owner_id)))
    }
}

#[cfg(any(feature = "sqlite", test))]
impl TryFrom<SqliteRow> for BookingDetails {
    type Error = DbError;

    fn try_from(row: SqliteRow) -> DbResult<Self> {
        let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
        let item_id: i64 = row.try_get("item_id").map_err(sqlite::map_sqlx_error)?;
        let booker_id: i64 = row.try_get("booker_id").map_err(sqlite::map_sqlx_error)?;
        let start_secs: i64 = row.try_get("start_secs").map_err(sqlite::map_sqlx_error)?;
        let start_nsecs: i64 = row.try_get("start_nsecs").map_err(sqlite::map_sqlx_error)?;
        let end_secs: i64 = row.try_get("end_secs").map_err(sqlite::map_sqlx_error)?;
        let end_nsecs: i64 = row.try_get("end_nsecs").map_err(sqlite::map_sqlx_error)?;
        let status: String = row.try_get("status").map_err(sqlite::map_sqlx_error)?;
        let booker_name: String = row.try_get("booker_name").map_err(sqlite::map_sqlx_error)?;
        let item_name: String = row.try_get("item_name").map_err(sqlite::map_sqlx_error)?;
        let item_owner_id: i64 = row.try_get("item_owner_id").map_err(sqlite::map_sqlx_error)?;

        let booking = Booking::new(
            BookingId::from(id),
            ItemId::from(item_id),
            UserId::from(booker_id),
            build_timestamp(start_secs, start_nsecs)?,
            build_timestamp(end_secs, end_nsecs)?,
            BookingStatus::parse(&status)?,
        );
        Ok(BookingDetails::new(booking, booker_name, item_name, UserId::from(item_owner_id)))
    }
}

/// Creates a new booking of `item_id` by `booker_id` in the `WAITING` status.  Fails with
/// `NotFound` if the item or the booker do not exist.
pub(crate) async fn create_booking(
    ex: &mut Executor,
    item_id: ItemId,
    booker_id: UserId,
    start: OffsetDateTime,
    end: OffsetDateTime,
) -> DbResult<Booking> {
    let status = BookingStatus::Waiting;

    let id = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                INSERT INTO bookings (item_id, booker_id, start_time, end_time, status)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id";
            let row = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .bind(booker_id.as_i64())
                .bind(start)
                .bind(end)
                .bind(status.as_str())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get::<i64, _>("id").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (start_secs, start_nsecs) = unpack_timestamp(start)?;
            let (end_secs, end_nsecs) = unpack_timestamp(end)?;

            let query_str = "
                INSERT INTO bookings
                    (item_id, booker_id, start_secs, start_nsecs, end_secs, end_nsecs, status)
                VALUES (?, ?, ?, ?, ?, ?, ?)";
            let done = sqlx::query(query_str)
                .bind(item_id.as_i64())
                .bind(booker_id.as_i64())
                .bind(start_secs)
                .bind(start_nsecs)
                .bind(end_secs)
                .bind(end_nsecs)
                .bind(status.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.last_insert_rowid()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(Booking::new(BookingId::from(id), item_id, booker_id, start, end, status))
}

/// Gets the booking identified by `id` along with the names of the entities it references.
pub(crate) async fn get_booking(ex: &mut Executor, id: BookingId) -> DbResult<BookingDetails> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!("{} WHERE b.id = $1", PG_DETAILS_QUERY);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            BookingDetails::try_from(row)
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!("{} WHERE b.id = ?", SQLITE_DETAILS_QUERY);
            let row = sqlx::query(&query_str)
                .bind(id.as_i64())
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            BookingDetails::try_from(row)
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Moves the booking identified by `id` to `status` only if it is still `WAITING`.
///
/// Returns false if the booking exists but was not waiting anymore, which happens when a
/// concurrent transaction refined it first.
pub(crate) async fn set_booking_status_if_waiting(
    ex: &mut Executor,
    id: BookingId,
    status: BookingStatus,
) -> DbResult<bool> {
    let rows_affected = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "UPDATE bookings SET status = $1 WHERE id = $2 AND status = $3";
            let done = sqlx::query(query_str)
                .bind(status.as_str())
                .bind(id.as_i64())
                .bind(BookingStatus::Waiting.as_str())
                .execute(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            done.rows_affected()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = "UPDATE bookings SET status = ? WHERE id = ? AND status = ?";
            let done = sqlx::query(query_str)
                .bind(status.as_str())
                .bind(id.as_i64())
                .bind(BookingStatus::Waiting.as_str())
                .execute(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            done.rows_affected()
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    match rows_affected {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(DbError::BackendError("Update affected more than one row".to_owned())),
    }
}

/// Gets a page of the bookings made by `booker_id`, most recent start first.
pub(crate) async fn get_bookings_by_booker(
    ex: &mut Executor,
    booker_id: UserId,
    page: Page,
) -> DbResult<Vec<BookingDetails>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "{} WHERE b.booker_id = $1 ORDER BY b.start_time DESC, b.id DESC
                LIMIT $2 OFFSET $3",
                PG_DETAILS_QUERY
            );
            let rows = sqlx::query(&query_str)
                .bind(booker_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(BookingDetails::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "{} WHERE b.booker_id = ?
                ORDER BY b.start_secs DESC, b.start_nsecs DESC, b.id DESC
                LIMIT ? OFFSET ?",
                SQLITE_DETAILS_QUERY
            );
            let rows = sqlx::query(&query_str)
                .bind(booker_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(BookingDetails::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets a page of the bookings of all items owned by `owner_id`, most recent start first.
pub(crate) async fn get_bookings_by_owner(
    ex: &mut Executor,
    owner_id: UserId,
    page: Page,
) -> DbResult<Vec<BookingDetails>> {
    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = format!(
                "{} WHERE i.owner_id = $1 ORDER BY b.start_time DESC, b.id DESC
                LIMIT $2 OFFSET $3",
                PG_DETAILS_QUERY
            );
            let rows = sqlx::query(&query_str)
                .bind(owner_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            rows.into_iter().map(BookingDetails::try_from).collect()
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let query_str = format!(
                "{} WHERE i.owner_id = ?
                ORDER BY b.start_secs DESC, b.start_nsecs DESC, b.id DESC
                LIMIT ? OFFSET ?",
                SQLITE_DETAILS_QUERY
            );
            let rows = sqlx::query(&query_str)
                .bind(owner_id.as_i64())
                .bind(page.limit())
                .bind(page.offset())
                .fetch_all(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            rows.into_iter().map(BookingDetails::try_from).collect()
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Which side of a point in time to look at when searching for an item's neighboring booking.
#[derive(Clone, Copy)]
enum Neighbor {
    /// The approved booking with the latest start before the reference time.
    Last,

    /// The approved booking with the earliest start after the reference time.
    Next,
}

/// Finds the approved booking of `item_id` that is the `which` neighbor of `now`.
async fn get_neighbor_booking(
    ex: &mut Executor,
    item_id: ItemId,
    now: OffsetDateTime,
    which: Neighbor,
) -> DbResult<Option<BookingSummary>> {
    let row_to_summary = |id: i64, booker_id: i64| BookingSummary {
        id: BookingId::from(id),
        booker_id: UserId::from(booker_id),
    };

    match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let (cmp, order) = match which {
                Neighbor::Last => ("<", "DESC"),
                Neighbor::Next => (">", "ASC"),
            };
            let query_str = format!(
                "SELECT id, booker_id FROM bookings
                WHERE item_id = $1 AND status = $2 AND start_time {} $3
                ORDER BY start_time {}, id {}
                LIMIT 1",
                cmp, order, order
            );
            let row = sqlx::query(&query_str)
                .bind(item_id.as_i64())
                .bind(BookingStatus::Approved.as_str())
                .bind(now)
                .fetch_optional(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            match row {
                Some(row) => {
                    let id: i64 = row.try_get("id").map_err(postgres::map_sqlx_error)?;
                    let booker_id: i64 =
                        row.try_get("booker_id").map_err(postgres::map_sqlx_error)?;
                    Ok(Some(row_to_summary(id, booker_id)))
                }
                None => Ok(None),
            }
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now)?;
            let (cmp, order) = match which {
                Neighbor::Last => ("<", "DESC"),
                Neighbor::Next => (">", "ASC"),
            };
            let query_str = format!(
                "SELECT id, booker_id FROM bookings
                WHERE item_id = ? AND status = ? AND (start_secs, start_nsecs) {} (?, ?)
                ORDER BY start_secs {}, start_nsecs {}, id {}
                LIMIT 1",
                cmp, order, order, order
            );
            let row = sqlx::query(&query_str)
                .bind(item_id.as_i64())
                .bind(BookingStatus::Approved.as_str())
                .bind(now_secs)
                .bind(now_nsecs)
                .fetch_optional(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            match row {
                Some(row) => {
                    let id: i64 = row.try_get("id").map_err(sqlite::map_sqlx_error)?;
                    let booker_id: i64 =
                        row.try_get("booker_id").map_err(sqlite::map_sqlx_error)?;
                    Ok(Some(row_to_summary(id, booker_id)))
                }
                None => Ok(None),
            }
        }

        #[allow(unused)]
        _ => unreachable!(),
    }
}

/// Gets the approved booking of `item_id` with the latest start strictly before `now`.
pub(crate) async fn get_last_booking(
    ex: &mut Executor,
    item_id: ItemId,
    now: OffsetDateTime,
) -> DbResult<Option<BookingSummary>> {
    get_neighbor_booking(ex, item_id, now, Neighbor::Last).await
}

/// Gets the approved booking of `item_id` with the earliest start strictly after `now`.
pub(crate) async fn get_next_booking(
    ex: &mut Executor,
    item_id: ItemId,
    now: OffsetDateTime,
) -> DbResult<Option<BookingSummary>> {
    get_neighbor_booking(ex, item_id, now, Neighbor::Next).await
}

/// Returns true if `booker_id` has an approved booking of `item_id` that ended before `now`.
pub(crate) async fn has_completed_booking(
    ex: &mut Executor,
    booker_id: UserId,
    item_id: ItemId,
    now: OffsetDateTime,
) -> DbResult<bool> {
    let count: i64 = match ex {
        #[cfg(feature = "postgres")]
        Executor::Postgres(ex) => {
            let query_str = "
                SELECT COUNT(*) AS count FROM bookings
                WHERE booker_id = $1 AND item_id = $2 AND status = $3 AND end_time < $4";
            let row = sqlx::query(query_str)
                .bind(booker_id.as_i64())
                .bind(item_id.as_i64())
                .bind(BookingStatus::Approved.as_str())
                .bind(now)
                .fetch_one(ex.conn())
                .await
                .map_err(postgres::map_sqlx_error)?;
            row.try_get("count").map_err(postgres::map_sqlx_error)?
        }

        #[cfg(any(feature = "sqlite", test))]
        Executor::Sqlite(ex) => {
            let (now_secs, now_nsecs) = unpack_timestamp(now)?;

            let query_str = "
                SELECT COUNT(*) AS count FROM bookings
                WHERE booker_id = ? AND item_id = ? AND status = ?
                    AND (end_secs, end_nsecs) < (?, ?)";
            let row = sqlx::query(query_str)
                .bind(booker_id.as_i64())
                .bind(item_id.as_i64())
                .bind(BookingStatus::Approved.as_str())
                .bind(now_secs)
                .bind(now_nsecs)
                .fetch_one(ex.conn())
                .await
                .map_err(sqlite::map_sqlx_error)?;
            row.try_get("count").map_err(sqlite::map_sqlx_error)?
        }

        #[allow(unused)]
        _ => unreachable!(),
    };

    Ok(count > 0)
}
