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

//! Registered users.

use crate::model::{UserId, require_name};
use shareit_core::model::{EmailAddress, ModelResult};

/// A registered user of the marketplace.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct User {
    /// Identifier assigned by the database.
    id: UserId,

    /// Display name.
    name: String,

    /// Contact email, unique across all users.
    email: EmailAddress,
}

impl User {
    /// Creates a new user, validating that the `name` is not blank nor too long.
    pub(crate) fn new<S: Into<String>>(
        id: UserId,
        name: S,
        email: EmailAddress,
    ) -> ModelResult<Self> {
        let name = require_name("User name", name)?;
        Ok(Self { id, name, email })
    }

    /// Returns the user's identifier.
    pub(crate) fn id(&self) -> UserId {
        self.id
    }

    /// Returns the user's display name.
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    /// Returns the user's email address.
    pub(crate) fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// A partial update to a user.  Absent fields keep their current values.
#[derive(Debug, Default, PartialEq)]
pub(crate) struct UserPatch {
    /// New display name, if any.
    name: Option<String>,

    /// New email address, if any.
    email: Option<EmailAddress>,
}

impl UserPatch {
    /// Sets the new display name, which must not be blank nor too long.
    pub(crate) fn with_name<S: Into<String>>(mut self, name: S) -> ModelResult<Self> {
        self.name = Some(require_name("User name", name)?);
        Ok(self)
    }

    /// Sets the new email address.
    pub(crate) fn with_email(mut self, email: EmailAddress) -> Self {
        self.email = Some(email);
        self
    }

    /// Merges this patch into `user` and returns the updated user.
    pub(crate) fn apply(self, user: User) -> User {
        User {
            id: user.id,
            name: self.name.unwrap_or(user.name),
            email: self.email.unwrap_or(user.email),
        }
    }
}
