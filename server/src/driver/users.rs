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

//! Operations on users.

use crate::db;
use crate::driver::{Driver, named_not_found};
use crate::model::{User, UserId, UserPatch, require_name};
use log::info;
use shareit_core::driver::{DriverError, DriverResult};
use shareit_core::model::EmailAddress;

/// Replaces the generic `AlreadyExists` error raised when storing a user with one that names the
/// clashing `email`.
fn email_taken(e: DriverError, email: &EmailAddress) -> DriverError {
    match e {
        DriverError::AlreadyExists(_) => {
            DriverError::AlreadyExists(format!("Email {} is already registered", email.as_str()))
        }
        e => e,
    }
}

impl Driver {
    /// Registers a new user with the given `name` and `email`.
    pub(crate) async fn create_user(self, name: String, email: EmailAddress) -> DriverResult<User> {
        let name = require_name("User name", name)?;

        let mut tx = self.db.begin().await?;
        let user = db::create_user(tx.ex(), &name, &email)
            .await
            .map_err(|e| email_taken(e.into(), &email))?;
        tx.commit().await?;

        info!("Created user {} with email {}", user.id(), user.email().as_str());
        Ok(user)
    }

    /// Applies `patch` to the user identified by `id`.
    pub(crate) async fn update_user(self, id: UserId, patch: UserPatch) -> DriverResult<User> {
        let mut tx = self.db.begin().await?;
        let user = named_not_found(db::get_user(tx.ex(), id).await, "User", id)?;
        let user = patch.apply(user);
        db::update_user(tx.ex(), &user).await.map_err(|e| email_taken(e.into(), user.email()))?;
        tx.commit().await?;
        Ok(user)
    }

    /// Gets the user identified by `id`.
    pub(crate) async fn get_user(self, id: UserId) -> DriverResult<User> {
        let mut tx = self.db.begin().await?;
        let user = named_not_found(db::get_user(tx.ex(), id).await, "User", id)?;
        tx.commit().await?;
        Ok(user)
    }

    /// Gets all registered users sorted by identifier.
    pub(crate) async fn get_users(self) -> DriverResult<Vec<User>> {
        let mut tx = self.db.begin().await?;
        let users = db::get_users(tx.ex()).await?;
        tx.commit().await?;
        Ok(users)
    }

    /// Deletes the user identified by `id` and everything that belongs to them.
    pub(crate) async fn delete_user(self, id: UserId) -> DriverResult<()> {
        let mut tx = self.db.begin().await?;
        named_not_found(db::delete_user(tx.ex(), id).await, "User", id)?;
        tx.commit().await?;

        info!("Deleted user {}", id);
        Ok(())
    }
}
