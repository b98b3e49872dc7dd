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

//! Plumbing shared by the ShareIt marketplace service.
//!
//! The marketplace is structured in layers and every layer is backed by a module in this crate:
//!
//! 1.  `model`: Domain types with no I/O.  Values that carry validation rules (like email
//!     addresses) are newtypes that can only be constructed in a valid state.
//!
//! 1.  `db`: Persistence.  Operations are free functions that receive an `Executor`, which can
//!     be backed by a pool connection or by an open transaction, and that issue queries against
//!     PostgreSQL in production or SQLite in tests.
//!
//! 1.  `driver`: Business logic.  The service's `Driver` owns the database and a clock, and every
//!     operation opens a single transaction to coordinate all of its reads and writes.
//!
//! 1.  `rest`: HTTP.  One file per API with the handler and its integration tests.
//!
//! 1.  `main`: Launcher.  Gathers configuration from environment variables and starts serving.
//!
//! Each layer has its own result and error types, such as `DbResult` and `DbError`, and errors
//! float up with the `?` operator until the REST layer maps them to HTTP status codes.

// Keep these in sync with other top-level files.
#![warn(anonymous_parameters, bad_style, clippy::missing_docs_in_private_items, missing_docs)]
#![warn(unused, unused_extern_crates, unused_import_braces, unused_qualifications)]
#![warn(unsafe_code)]

pub mod clocks;
pub mod db;
pub mod driver;
pub mod env;
pub mod model;
pub mod rest;
