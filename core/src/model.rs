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

//! Domain types shared across services.
//!
//! Services define their own `model` module with the entities they manage.  Any value that has
//! validation rules should be a newtype whose constructor returns a `ModelResult` so that invalid
//! values cannot exist past the point where they enter the system.

mod emailaddress;
pub use emailaddress::EmailAddress;

/// Model errors.
#[derive(Debug, PartialEq, thiserror::Error)]
#[error("{0}")]
pub struct ModelError(pub String);

/// Result type for this module.
pub type ModelResult<T> = Result<T, ModelError>;

/// Ensures that the free-form text `value` of the field called `what` is not blank and returns
/// it unmodified.
pub fn require_not_blank<S: Into<String>>(what: &str, value: S) -> ModelResult<String> {
    let value = value.into();
    if value.trim().is_empty() {
        return Err(ModelError(format!("{} cannot be blank", what)));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_not_blank_ok() {
        assert_eq!("a", require_not_blank("Name", "a").unwrap());
        assert_eq!(" with spaces ", require_not_blank("Name", " with spaces ").unwrap());
    }

    #[test]
    fn test_require_not_blank_error() {
        assert_eq!(
            ModelError("Name cannot be blank".to_owned()),
            require_not_blank("Name", "").unwrap_err()
        );
        assert_eq!(
            ModelError("Description cannot be blank".to_owned()),
            require_not_blank("Description", " \t\n").unwrap_err()
        );
    }
}
