//! # Pet store load test
//!
//! A [Goose](https://docs.rs/goose/) load test that repeatedly walks a pet store REST API
//! through the full lifecycle of a resource: create a pet, read it back, update it, then
//! delete it.
//!
//! Goose does the heavy lifting: it launches and ramps up users, paces them, collects
//! metrics and prints reports. This crate only defines what a single user does, in
//! [`scenario::petstore_scenario`].
//!
//! ## Running
//!
//! ```bash
//! $ BASE_URL=https://petstore3.swagger.io/api/v3 API_KEY=12345 \
//!     cargo run --release -- --users 10 --hatch-rate 2 --run-time 5m
//! ```
//!
//! All of Goose's run-time options are available; `-h` lists them. `BASE_URL` sets the
//! default host, which `--host` overrides. See [`config`] for the environment variables
//! that are read at startup.
//!
//! Each iteration records four requests in the Goose metrics:
//!
//! | Request             | Method   | Path         | Success     |
//! |---------------------|----------|--------------|-------------|
//! | `Create Pet`        | `POST`   | `/pet`       | 200 or 201  |
//! | `Get Pet`           | `GET`    | `/pet/{id}`  | 200         |
//! | `Update Pet`        | `PUT`    | `/pet`       | 200 or 201  |
//! | `Delete Pet`        | `DELETE` | `/pet/{id}`  | 200 or 204  |
//!
//! A failed request never stops the user: the failure is recorded, logged, and the next
//! step runs. After each iteration the user sleeps for a random 1 to 3 seconds.
//!
//! ## Using the scenario in another load test
//!
//! ```rust,no_run
//! use goose::prelude::*;
//! use petstore_goose::config::PetstoreConfig;
//! use petstore_goose::scenario::petstore_scenario;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GooseError> {
//!     let config = Arc::new(PetstoreConfig::from_env()?);
//!
//!     GooseAttack::initialize()?
//!         .register_scenario(petstore_scenario(Arc::clone(&config))?)
//!         .set_default(GooseDefault::Host, config.base_url.as_str())?
//!         .execute()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## License
//!
//! Copyright 2020-2025 Jeremy Andrews
//!
//! Licensed under the Apache License, Version 2.0 (the "License");
//! you may not use this file except in compliance with the License.
//! You may obtain a copy of the License at
//!
//! <http://www.apache.org/licenses/LICENSE-2.0>
//!
//! Unless required by applicable law or agreed to in writing, software
//! distributed under the License is distributed on an "AS IS" BASIS,
//! WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//! See the License for the specific language governing permissions and
//! limitations under the License.

#[macro_use]
extern crate log;

pub mod config;
pub mod operation;
pub mod pet;
pub mod scenario;
pub mod session;
