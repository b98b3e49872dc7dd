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

//! Bookings and their approval workflow.
//!
//! A booking starts as `WAITING` and the owner of the booked item moves it to either `APPROVED`
//! or `REJECTED`.  Both of these are terminal.

use crate::model::{BookingId, ItemId, UserId};
use serde::{Deserialize, Serialize};
use shareit_core::model::{ModelError, ModelResult};
use std::fmt;
use std::str::FromStr;
use time::OffsetDateTime;

/// Approval status of a booking.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub(crate) enum BookingStatus {
    /// The owner has not decided yet.
    Waiting,

    /// The owner accepted the booking.
    Approved,

    /// The owner declined the booking.
    Rejected,
}

impl BookingStatus {
    /// Returns the textual representation of the status as stored in the database.
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Waiting => "WAITING",
            BookingStatus::Approved => "APPROVED",
            BookingStatus::Rejected => "REJECTED",
        }
    }

    /// Parses a status as stored in the database.
    pub(crate) fn parse(s: &str) -> ModelResult<Self> {
        match s {
            "WAITING" => Ok(BookingStatus::Waiting),
            "APPROVED" => Ok(BookingStatus::Approved),
            "REJECTED" => Ok(BookingStatus::Rejected),
            s => Err(ModelError(format!("Unknown booking status '{}'", s))),
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter applied when listing bookings.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum BookingState {
    /// Every booking.
    #[default]
    All,

    /// Bookings whose period includes the current time.
    Current,

    /// Bookings that start after the current time.
    Future,

    /// Bookings that ended before the current time.
    Past,

    /// Bookings still pending a decision.
    Waiting,

    /// Bookings that the owner declined.
    Rejected,
}

impl FromStr for BookingState {
    type Err = ModelError;

    fn from_str(s: &str) -> ModelResult<Self> {
        match s {
            "ALL" => Ok(BookingState::All),
            "CURRENT" => Ok(BookingState::Current),
            "FUTURE" => Ok(BookingState::Future),
            "PAST" => Ok(BookingState::Past),
            "WAITING" => Ok(BookingState::Waiting),
            "REJECTED" => Ok(BookingState::Rejected),
            s => Err(ModelError(format!("Unknown state: {}", s))),
        }
    }
}

impl BookingState {
    /// Returns true if `booking` passes this filter at time `now`.
    pub(crate) fn matches(self, booking: &Booking, now: OffsetDateTime) -> bool {
        match self {
            BookingState::All => true,
            BookingState::Current => booking.start <= now && now <= booking.end,
            BookingState::Future => booking.start > now,
            BookingState::Past => booking.end < now,
            BookingState::Waiting => booking.status == BookingStatus::Waiting,
            BookingState::Rejected => booking.status == BookingStatus::Rejected,
        }
    }
}

/// Validates the period of a new booking requested at time `now`.
///
/// Checks run in a fixed order and the first failure is reported.
pub(crate) fn validate_booking_dates(
    start: OffsetDateTime,
    end: OffsetDateTime,
    now: OffsetDateTime,
) -> ModelResult<()> {
    if start < now {
        return Err(ModelError("Booking start in the past".to_owned()));
    }
    if end < now {
        return Err(ModelError("Booking end in the past".to_owned()));
    }
    if end < start {
        return Err(ModelError("Booking end before start".to_owned()));
    }
    if end == start {
        return Err(ModelError("Booking end equals start".to_owned()));
    }
    Ok(())
}

/// A request by a user to use an item during a period of time.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Booking {
    /// Identifier assigned by the database.
    id: BookingId,

    /// Item being booked.
    item_id: ItemId,

    /// User that asked for the booking.
    booker_id: UserId,

    /// Start of the booked period.
    start: OffsetDateTime,

    /// End of the booked period.
    end: OffsetDateTime,

    /// Approval status.
    status: BookingStatus,
}

impl Booking {
    /// Creates a new booking.
    pub(crate) fn new(
        id: BookingId,
        item_id: ItemId,
        booker_id: UserId,
        start: OffsetDateTime,
        end: OffsetDateTime,
        status: BookingStatus,
    ) -> Self {
        Self { id, item_id, booker_id, start, end, status }
    }

    /// Moves a waiting booking to its terminal status depending on whether it was `approved`.
    pub(crate) fn refine(self, approved: bool) -> ModelResult<Self> {
        if self.status != BookingStatus::Waiting {
            return Err(ModelError(format!(
                "Booking {} already has status {}",
                self.id, self.status
            )));
        }
        let status = if approved { BookingStatus::Approved } else { BookingStatus::Rejected };
        Ok(Self { status, ..self })
    }

    /// Returns the booking's identifier.
    pub(crate) fn id(&self) -> BookingId {
        self.id
    }

    /// Returns the identifier of the booked item.
    pub(crate) fn item_id(&self) -> ItemId {
        self.item_id
    }

    /// Returns the identifier of the user that made the booking.
    pub(crate) fn booker_id(&self) -> UserId {
        self.booker_id
    }

    /// Returns the start of the booked period.
    pub(crate) fn start(&self) -> OffsetDateTime {
        self.start
    }

    /// Returns the end of the booked period.
    pub(crate) fn end(&self) -> OffsetDateTime {
        self.end
    }

    /// Returns the approval status.
    pub(crate) fn status(&self) -> BookingStatus {
        self.status
    }
}

/// A booking along with the names of the entities it references.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct BookingDetails {
    /// The booking itself.
    booking: Booking,

    /// Name of the user that made the booking.
    booker_name: String,

    /// Name of the booked item.
    item_name: String,

    /// Owner of the booked item.
    item_owner_id: UserId,
}

impl BookingDetails {
    /// Creates the detailed view of `booking`.
    pub(crate) fn new<S1: Into<String>, S2: Into<String>>(
        booking: Booking,
        booker_name: S1,
        item_name: S2,
        item_owner_id: UserId,
    ) -> Self {
        Self {
            booking,
            booker_name: booker_name.into(),
            item_name: item_name.into(),
            item_owner_id,
        }
    }

    /// Replaces the booking while keeping the names of the referenced entities.
    pub(crate) fn with_booking(self, booking: Booking) -> Self {
        Self { booking, ..self }
    }

    /// Returns the booking.
    pub(crate) fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Returns the name of the booker.
    pub(crate) fn booker_name(&self) -> &str {
        &self.booker_name
    }

    /// Returns the name of the booked item.
    pub(crate) fn item_name(&self) -> &str {
        &self.item_name
    }

    /// Returns the owner of the booked item.
    pub(crate) fn item_owner_id(&self) -> UserId {
        self.item_owner_id
    }
}

/// Minimal reference to a booking shown next to an item.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BookingSummary {
    /// Identifier of the booking.
    pub(crate) id: BookingId,

    /// User that made the booking.
    pub(crate) booker_id: UserId,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn booking(
        start: OffsetDateTime,
        end: OffsetDateTime,
        status: BookingStatus,
    ) -> Booking {
        Booking::new(BookingId::from(1), ItemId::from(2), UserId::from(3), start, end, status)
    }

    #[test]
    fn test_booking_status_round_trip_through_db_strings() {
        for status in [BookingStatus::Waiting, BookingStatus::Approved, BookingStatus::Rejected] {
            assert_eq!(status, BookingStatus::parse(status.as_str()).unwrap());
        }
        BookingStatus::parse("waiting").unwrap_err();
    }

    #[test]
    fn test_booking_state_parse() {
        assert_eq!(BookingState::All, "ALL".parse().unwrap());
        assert_eq!(BookingState::Current, "CURRENT".parse().unwrap());
        assert_eq!(BookingState::Rejected, "REJECTED".parse().unwrap());
        assert_eq!(
            ModelError("Unknown state: UNSUPPORTED_STATUS".to_owned()),
            "UNSUPPORTED_STATUS".parse::<BookingState>().unwrap_err()
        );
        assert_eq!(
            ModelError("Unknown state: all".to_owned()),
            "all".parse::<BookingState>().unwrap_err()
        );
    }

    #[test]
    fn test_booking_state_matches() {
        let now = datetime!(2024-05-10 12:00:00 UTC);
        let past = booking(
            datetime!(2024-05-01 00:00:00 UTC),
            datetime!(2024-05-02 00:00:00 UTC),
            BookingStatus::Approved,
        );
        let current = booking(
            datetime!(2024-05-10 12:00:00 UTC),
            datetime!(2024-05-11 00:00:00 UTC),
            BookingStatus::Waiting,
        );
        let future = booking(
            datetime!(2024-06-01 00:00:00 UTC),
            datetime!(2024-06-02 00:00:00 UTC),
            BookingStatus::Rejected,
        );

        for b in [&past, &current, &future] {
            assert!(BookingState::All.matches(b, now));
        }

        assert!(!BookingState::Current.matches(&past, now));
        assert!(BookingState::Current.matches(&current, now));
        assert!(!BookingState::Current.matches(&future, now));

        assert!(BookingState::Past.matches(&past, now));
        assert!(!BookingState::Past.matches(&current, now));

        assert!(BookingState::Future.matches(&future, now));
        assert!(!BookingState::Future.matches(&current, now));

        assert!(BookingState::Waiting.matches(&current, now));
        assert!(!BookingState::Waiting.matches(&past, now));

        assert!(BookingState::Rejected.matches(&future, now));
        assert!(!BookingState::Rejected.matches(&current, now));
    }

    #[test]
    fn test_validate_booking_dates_ok() {
        let now = datetime!(2024-05-10 12:00:00 UTC);
        validate_booking_dates(now, datetime!(2024-05-10 12:00:01 UTC), now).unwrap();
    }

    #[test]
    fn test_validate_booking_dates_order_of_checks() {
        let now = datetime!(2024-05-10 12:00:00 UTC);
        let before = datetime!(2024-05-09 00:00:00 UTC);
        let later = datetime!(2024-05-11 00:00:00 UTC);
        let even_later = datetime!(2024-05-12 00:00:00 UTC);

        assert_eq!(
            ModelError("Booking start in the past".to_owned()),
            validate_booking_dates(before, before, now).unwrap_err()
        );
        assert_eq!(
            ModelError("Booking end in the past".to_owned()),
            validate_booking_dates(later, before, now).unwrap_err()
        );
        assert_eq!(
            ModelError("Booking end before start".to_owned()),
            validate_booking_dates(even_later, later, now).unwrap_err()
        );
        assert_eq!(
            ModelError("Booking end equals start".to_owned()),
            validate_booking_dates(later, later, now).unwrap_err()
        );
    }

    #[test]
    fn test_refine_from_waiting() {
        let now = datetime!(2024-05-10 12:00:00 UTC);
        let waiting = booking(now, now, BookingStatus::Waiting);
        assert_eq!(BookingStatus::Approved, waiting.clone().refine(true).unwrap().status());
        assert_eq!(BookingStatus::Rejected, waiting.refine(false).unwrap().status());
    }

    #[test]
    fn test_refine_terminal_states() {
        let now = datetime!(2024-05-10 12:00:00 UTC);
        for status in [BookingStatus::Approved, BookingStatus::Rejected] {
            for approved in [true, false] {
                let err = booking(now, now, status).refine(approved).unwrap_err();
                assert_eq!(
                    ModelError(format!("Booking 1 already has status {}", status)),
                    err
                );
            }
        }
    }

    #[test]
    fn test_booking_status_serialization() {
        assert_eq!("\"APPROVED\"", serde_json::to_string(&BookingStatus::Approved).unwrap());
    }
}
