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

//! Test utilities for the REST API.

use crate::driver::testutils::TestContext as DriverTestContext;
use crate::rest::app;
use axum::Router;
use std::ops::Deref;

pub(crate) use crate::driver::testutils::NOW;
pub(crate) use crate::rest::httputils::USER_ID_HEADER;

/// State of a running test: a router backed by the same resources as a driver test context.
pub(crate) struct TestContext {
    /// The resources backing the app, which tests use to prepare and inspect state.
    data: DriverTestContext,

    /// The app under test.
    app: Router,
}

impl TestContext {
    /// Creates an app backed by an empty in-memory database and a clock stopped at `NOW`.
    pub(crate) async fn setup() -> Self {
        let data = DriverTestContext::setup().await;
        let app = app(data.driver());
        Self { data, app }
    }

    /// Returns a copy of the app to send one request to it.
    pub(crate) fn app(&self) -> Router {
        self.app.clone()
    }

    /// Consumes the context and returns the app.
    pub(crate) fn into_app(self) -> Router {
        self.app
    }
}

impl Deref for TestContext {
    type Target = DriverTestContext;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
