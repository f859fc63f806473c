//! Load test the pet store API, creating, reading, updating and deleting pets.
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

use goose::prelude::*;
use std::sync::Arc;

use petstore_goose::config::{self, PetstoreConfig};
use petstore_goose::scenario::petstore_scenario;

#[tokio::main]
async fn main() -> Result<(), GooseError> {
    config::load_env_file();
    // Read once, shared by every user.
    let config = Arc::new(PetstoreConfig::from_env()?);

    GooseAttack::initialize()?
        // A single scenario: each user runs the full pet lifecycle over and over.
        .register_scenario(petstore_scenario(Arc::clone(&config))?)
        // BASE_URL is only a default, `--host` still takes precedence.
        .set_default(GooseDefault::Host, config.base_url.as_str())?
        .execute()
        .await?;

    Ok(())
}
