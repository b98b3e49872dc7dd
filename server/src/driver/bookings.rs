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

//! Operations on bookings.

use crate::db;
use crate::driver::{Driver, named_not_found, require_user};
use crate::model::{
    BookingDetails, BookingId, BookingState, BookingStatus, ItemId, Page, UserId,
    validate_booking_dates,
};
use log::{info, warn};
use shareit_core::db::Executor;
use shareit_core::driver::{DriverError, DriverResult};
use time::OffsetDateTime;

/// Moves the waiting booking `booking_id` to `status`, failing if somebody else refined it after
/// it was loaded.
async fn store_refinement(
    ex: &mut Executor,
    booking_id: BookingId,
    status: BookingStatus,
) -> DriverResult<()> {
    if !db::set_booking_status_if_waiting(ex, booking_id, status).await? {
        let current = db::get_booking(ex, booking_id).await?;
        warn!("Booking {} was refined concurrently", booking_id);
        return Err(DriverError::InvalidInput(format!(
            "Booking {} already has status {}",
            booking_id,
            current.booking().status()
        )));
    }
    Ok(())
}

/// Keeps the `bookings` that pass the `state` filter at time `now`.
fn filter_by_state(
    bookings: Vec<BookingDetails>,
    state: BookingState,
    now: OffsetDateTime,
) -> Vec<BookingDetails> {
    bookings.into_iter().filter(|b| state.matches(b.booking(), now)).collect()
}

impl Driver {
    /// Books `item_id` for `user_id` during the period from `start` to `end`.
    pub(crate) async fn create_booking(
        self,
        user_id: UserId,
        item_id: ItemId,
        start: OffsetDateTime,
        end: OffsetDateTime,
    ) -> DriverResult<BookingDetails> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let item = named_not_found(db::get_item(tx.ex(), item_id).await, "Item", item_id)?;
        if !item.available() {
            return Err(DriverError::InvalidInput(format!("Item {} is not available", item_id)));
        }
        if item.owner_id() == user_id {
            warn!("User {} tried to book their own item {}", user_id, item_id);
            return Err(DriverError::NotFound(format!(
                "User {} already owns item {}",
                user_id, item_id
            )));
        }
        validate_booking_dates(start, end, now)?;

        let booking = db::create_booking(tx.ex(), item_id, user_id, start, end).await?;
        let details = db::get_booking(tx.ex(), booking.id()).await?;
        tx.commit().await?;

        info!("User {} booked item {} as booking {}", user_id, item_id, booking.id());
        Ok(details)
    }

    /// Approves or rejects the waiting booking `booking_id` on behalf of `user_id`, who must own
    /// the booked item.
    pub(crate) async fn refine_booking(
        self,
        user_id: UserId,
        booking_id: BookingId,
        approved: bool,
    ) -> DriverResult<BookingDetails> {
        let mut tx = self.db.begin().await?;
        let details =
            named_not_found(db::get_booking(tx.ex(), booking_id).await, "Booking", booking_id)?;
        let refined = match details.booking().clone().refine(approved) {
            Ok(refined) => refined,
            Err(e) => {
                warn!("User {} tried to refine booking {} again", user_id, booking_id);
                return Err(e.into());
            }
        };
        if details.item_owner_id() != user_id {
            warn!(
                "User {} tried to refine booking {} of somebody else's item",
                user_id, booking_id
            );
            return Err(DriverError::Forbidden(format!(
                "User {} does not own item {}",
                user_id,
                details.booking().item_id()
            )));
        }

        store_refinement(tx.ex(), booking_id, refined.status()).await?;
        tx.commit().await?;

        info!("User {} set booking {} to {}", user_id, booking_id, refined.status());
        Ok(details.with_booking(refined))
    }

    /// Gets the booking `booking_id`, which is only visible to its booker and to the owner of the
    /// booked item.
    pub(crate) async fn get_booking(
        self,
        user_id: UserId,
        booking_id: BookingId,
    ) -> DriverResult<BookingDetails> {
        let mut tx = self.db.begin().await?;
        let details =
            named_not_found(db::get_booking(tx.ex(), booking_id).await, "Booking", booking_id)?;
        tx.commit().await?;

        if details.booking().booker_id() != user_id && details.item_owner_id() != user_id {
            warn!("User {} tried to access booking {}", user_id, booking_id);
            return Err(DriverError::Forbidden(format!(
                "User {} cannot access booking {}",
                user_id, booking_id
            )));
        }
        Ok(details)
    }

    /// Gets a page of the bookings made by `user_id` that match `state`, most recent first.
    pub(crate) async fn get_bookings_by_booker(
        self,
        user_id: UserId,
        state: BookingState,
        page: Page,
    ) -> DriverResult<Vec<BookingDetails>> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let bookings = db::get_bookings_by_booker(tx.ex(), user_id, page).await?;
        tx.commit().await?;

        Ok(filter_by_state(bookings, state, now))
    }

    /// Gets a page of the bookings of the items owned by `user_id` that match `state`, most
    /// recent first.
    pub(crate) async fn get_bookings_by_owner(
        self,
        user_id: UserId,
        state: BookingState,
        page: Page,
    ) -> DriverResult<Vec<BookingDetails>> {
        let now = self.clock.now_utc();

        let mut tx = self.db.begin().await?;
        require_user(tx.ex(), user_id).await?;
        let bookings = db::get_bookings_by_owner(tx.ex(), user_id, page).await?;
        tx.commit().await?;

        Ok(filter_by_state(bookings, state, now))
    }
}
