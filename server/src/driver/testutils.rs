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

//! Test utilities for the business layer.

use crate::db;
use crate::driver::Driver;
use crate::model::*;
use shareit_core::clocks::testutils::SettableClock;
use shareit_core::db::sqlite::testutils::setup;
use shareit_core::db::{Db, Executor};
use shareit_core::model::EmailAddress;
use std::sync::Arc;
use time::OffsetDateTime;
use time::macros::datetime;

/// Initial time of the clock in every test context.
pub(crate) const NOW: OffsetDateTime = datetime!(2024-05-10 12:00 UTC);

/// State of a running test.
pub(crate) struct TestContext {
    /// The database backing the driver.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock backing the driver.
    clock: Arc<SettableClock>,

    /// The driver under test.
    driver: Driver,
}

impl TestContext {
    /// Creates a driver backed by an empty in-memory database and a clock stopped at `NOW`.
    pub(crate) async fn setup() -> Self {
        let db: Arc<dyn Db + Send + Sync> = Arc::new(setup().await);
        db::init_schema(&mut db.ex().await.unwrap()).await.unwrap();
        let clock = Arc::new(SettableClock::new(NOW));
        let driver = Driver::new(db.clone(), clock.clone());
        Self { db, clock, driver }
    }

    /// Returns a direct executor against the database.
    pub(crate) async fn ex(&self) -> Executor {
        self.db.ex().await.unwrap()
    }

    /// Returns the clock.
    pub(crate) fn clock(&self) -> &SettableClock {
        &self.clock
    }

    /// Returns a copy of the driver to invoke one operation on it.
    pub(crate) fn driver(&self) -> Driver {
        self.driver.clone()
    }

    /// Creates a user named `name` with an email derived from it.
    pub(crate) async fn create_user(&self, name: &str) -> User {
        let email = EmailAddress::new(format!("{}@example.com", name)).unwrap();
        db::create_user(&mut self.ex().await, name, &email).await.unwrap()
    }

    /// Creates an available item named `name` owned by `owner_id`.
    pub(crate) async fn create_item(&self, owner_id: UserId, name: &str) -> Item {
        let description = format!("Description of {}", name);
        db::create_item(&mut self.ex().await, owner_id, name, &description, true, None)
            .await
            .unwrap()
    }

    /// Creates a booking of `item_id` by `booker_id` that starts `start_days` after `NOW` and
    /// lasts one day, and moves it to `status`.
    pub(crate) async fn create_booking(
        &self,
        item_id: ItemId,
        booker_id: UserId,
        start_days: i64,
        status: BookingStatus,
    ) -> Booking {
        let start = NOW + time::Duration::days(start_days);
        let end = start + time::Duration::days(1);
        let mut ex = self.ex().await;
        let booking = db::create_booking(&mut ex, item_id, booker_id, start, end).await.unwrap();
        if status == BookingStatus::Waiting {
            return booking;
        }
        assert!(db::set_booking_status_if_waiting(&mut ex, booking.id(), status).await.unwrap());
        db::get_booking(&mut ex, booking.id()).await.unwrap().booking().clone()
    }

    /// Creates a request by `requester_id` timestamped `created`.
    pub(crate) async fn create_request(
        &self,
        requester_id: UserId,
        description: &str,
        created: OffsetDateTime,
    ) -> ItemRequest {
        db::create_request(&mut self.ex().await, requester_id, description, created).await.unwrap()
    }
}
