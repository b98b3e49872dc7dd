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

//! Business logic for the marketplace.

use crate::db;
use crate::model::UserId;
use shareit_core::clocks::Clock;
use shareit_core::db::{Db, DbError, DbResult, Executor};
use shareit_core::driver::{DriverError, DriverResult};
use std::fmt;
use std::sync::Arc;

mod bookings;
mod comments;
mod items;
mod requests;
#[cfg(test)]
pub(crate) mod testutils;
mod users;

/// Business logic.
///
/// The public operations exposed by the driver are all "one shot": they start and commit a
/// transaction, so it's incorrect for the caller to use two separate calls.  For this reason,
/// these operations consume the driver in an attempt to minimize the possibility of executing
/// two operations.
#[derive(Clone)]
pub(crate) struct Driver {
    /// The database that the driver uses for persistence.
    db: Arc<dyn Db + Send + Sync>,

    /// The clock used to timestamp new entities and to classify bookings in time.
    clock: Arc<dyn Clock + Send + Sync>,
}

impl Driver {
    /// Creates a new driver backed by the given injected components.
    pub(crate) fn new(db: Arc<dyn Db + Send + Sync>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self { db, clock }
    }
}

/// Replaces the generic message of a `NotFound` database error with one that names the `kind`
/// of entity and its `id`.
fn named_not_found<T, I: fmt::Display>(result: DbResult<T>, kind: &str, id: I) -> DriverResult<T> {
    match result {
        Ok(value) => Ok(value),
        Err(DbError::NotFound) => Err(DriverError::NotFound(format!("{} {} not found", kind, id))),
        Err(e) => Err(e.into()),
    }
}

/// Fails with `NotFound` if the user `id` is not registered.
async fn require_user(ex: &mut Executor, id: UserId) -> DriverResult<()> {
    if !db::user_exists(ex, id).await? {
        return Err(DriverError::NotFound(format!("User {} not found", id)));
    }
    Ok(())
}
