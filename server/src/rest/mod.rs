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

//! Entry point to the REST server.

use crate::driver::Driver;
use axum::Router;

mod booking_get;
mod booking_patch;
mod bookings_get;
mod bookings_owner_get;
mod bookings_post;
mod httputils;
mod item_comment_post;
mod item_get;
mod item_patch;
mod items_get;
mod items_post;
mod items_search_get;
mod request_get;
mod requests_all_get;
mod requests_get;
mod requests_post;
mod responses;
#[cfg(test)]
mod testutils;
mod user_delete;
mod user_get;
mod user_patch;
mod users_get;
mod users_post;

/// Creates the router for the application.
pub(crate) fn app(driver: Driver) -> Router {
    use axum::routing::{get, post};
    Router::new()
        .route("/users", get(users_get::handler).post(users_post::handler))
        .route(
            "/users/:id",
            get(user_get::handler).patch(user_patch::handler).delete(user_delete::handler),
        )
        .route("/items", get(items_get::handler).post(items_post::handler))
        .route("/items/search", get(items_search_get::handler))
        .route("/items/:id", get(item_get::handler).patch(item_patch::handler))
        .route("/items/:id/comment", post(item_comment_post::handler))
        .route("/bookings", get(bookings_get::handler).post(bookings_post::handler))
        .route("/bookings/owner", get(bookings_owner_get::handler))
        .route("/bookings/:id", get(booking_get::handler).patch(booking_patch::handler))
        .route("/requests", get(requests_get::handler).post(requests_post::handler))
        .route("/requests/all", get(requests_all_get::handler))
        .route("/requests/:id", get(request_get::handler))
        .with_state(driver)
}
