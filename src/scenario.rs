//! The pet store user: lifecycle hooks, the four steps of an iteration, and the Goose
//! [`Scenario`] that ties them together.
//!
//! Each iteration creates a pet, reads it back, updates it and deletes it. Steps never
//! abort the iteration: a failure is recorded in the Goose metrics and logged, then the
//! next step runs regardless. Because the identifier is stored before the create request
//! is sent, the later steps always use the identifier generated by this iteration, even if
//! the pet was never actually created.

use goose::prelude::*;
use reqwest::header::HeaderMap;
use std::sync::Arc;
use std::time::Duration;

use crate::config::PetstoreConfig;
use crate::operation::PetOperation;
use crate::pet::{Pet, PetId};
use crate::session::{self, PetSession};

/// Name of the Goose scenario.
pub const SCENARIO_NAME: &str = "PetstoreUser";
/// Shortest pause between two iterations of a user.
pub const MIN_WAIT: Duration = Duration::from_secs(1);
/// Longest pause between two iterations of a user.
pub const MAX_WAIT: Duration = Duration::from_secs(3);

/// Whether a step was reported to Goose as a success or a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Success,
    Failure,
}

impl StepOutcome {
    pub fn is_success(&self) -> bool {
        *self == StepOutcome::Success
    }
}

/// Build the Goose scenario simulating one pet store user.
///
/// The configuration is captured by each transaction, so every user launched from this
/// scenario shares it.
pub fn petstore_scenario(config: Arc<PetstoreConfig>) -> Result<Scenario, GooseError> {
    let iteration: TransactionFunction =
        Arc::new(move |user| Box::pin(iterate(user, Arc::clone(&config))));

    Ok(scenario!(SCENARIO_NAME)
        .set_wait_time(MIN_WAIT, MAX_WAIT)?
        .register_transaction(transaction!(start).set_name("on start").set_on_start())
        .register_transaction(Transaction::new(iteration).set_name("run scenario"))
        .register_transaction(transaction!(stop).set_name("on stop").set_on_stop()))
}

async fn iterate(user: &mut GooseUser, config: Arc<PetstoreConfig>) -> TransactionResult {
    let outcomes = run_scenario(user, &config).await;

    iteration_result(&outcomes)
}

/// An iteration only counts as a successful transaction if every step succeeded. The
/// failed requests themselves are already recorded, this flags the transaction as well.
pub fn iteration_result(outcomes: &[StepOutcome; 4]) -> TransactionResult {
    let failed = outcomes.iter().filter(|outcome| !outcome.is_success()).count();
    if failed == 0 {
        Ok(())
    } else {
        Err(Box::new(TransactionError::Custom(format!(
            "{} of {} steps failed",
            failed,
            outcomes.len()
        ))))
    }
}

/// Runs once when a user starts.
pub async fn start(user: &mut GooseUser) -> TransactionResult {
    info!("Starting test scenario...");
    user.set_session_data(PetSession::default());

    Ok(())
}

/// Runs once when a user stops.
pub async fn stop(_user: &mut GooseUser) -> TransactionResult {
    info!("Test scenario completed.");

    Ok(())
}

/// Perform one full iteration: create, read, update then delete a pet.
///
/// Every step runs no matter how the previous ones went.
pub async fn run_scenario(user: &mut GooseUser, config: &PetstoreConfig) -> [StepOutcome; 4] {
    let created = create_pet(user, config).await;
    let read = get_pet(user, config).await;
    let updated = update_pet(user, config).await;
    let deleted = delete_pet(user, config).await;

    [created, read, updated, deleted]
}

/// Create a pet with a freshly generated identifier.
pub async fn create_pet(user: &mut GooseUser, config: &PetstoreConfig) -> StepOutcome {
    create_pet_with_id(user, config, PetId::random()).await
}

/// Create a pet with the given identifier, which becomes the identifier of the current
/// iteration before the request is sent.
pub async fn create_pet_with_id(
    user: &mut GooseUser,
    config: &PetstoreConfig,
    pet_id: PetId,
) -> StepOutcome {
    session::set_pet_id(user, pet_id);
    let url = pet_collection_url(user);
    let pet = Pet::listing(pet_id);

    send(user, config, PetOperation::Create, &url, Some(&pet), pet_id).await
}

/// Read back the current pet.
pub async fn get_pet(user: &mut GooseUser, config: &PetstoreConfig) -> StepOutcome {
    let pet_id = match require_pet_id(user, PetOperation::Read) {
        Some(pet_id) => pet_id,
        None => return StepOutcome::Failure,
    };
    let url = pet_url(user, pet_id);

    send(user, config, PetOperation::Read, &url, None, pet_id).await
}

/// Mark the current pet as sold.
pub async fn update_pet(user: &mut GooseUser, config: &PetstoreConfig) -> StepOutcome {
    let pet_id = match require_pet_id(user, PetOperation::Update) {
        Some(pet_id) => pet_id,
        None => return StepOutcome::Failure,
    };
    let url = pet_collection_url(user);
    let pet = Pet::sold(pet_id);

    send(user, config, PetOperation::Update, &url, Some(&pet), pet_id).await
}

/// Delete the current pet.
pub async fn delete_pet(user: &mut GooseUser, config: &PetstoreConfig) -> StepOutcome {
    let pet_id = match require_pet_id(user, PetOperation::Delete) {
        Some(pet_id) => pet_id,
        None => return StepOutcome::Failure,
    };
    let url = pet_url(user, pet_id);

    send(user, config, PetOperation::Delete, &url, None, pet_id).await
}

/// `{host}/pet`, keeping any base path the host was configured with.
pub fn pet_collection_url(user: &GooseUser) -> String {
    format!("{}/pet", user.base_url.as_str().trim_end_matches('/'))
}

/// `{host}/pet/{id}`.
pub fn pet_url(user: &GooseUser, pet_id: PetId) -> String {
    format!("{}/{}", pet_collection_url(user), pet_id)
}

// Only reachable when a step runs before any create step has.
fn require_pet_id(user: &GooseUser, operation: PetOperation) -> Option<PetId> {
    let pet_id = session::current_pet_id(user);
    if pet_id.is_none() {
        error!(
            "Failed to {} pet: no pet has been created by this user yet",
            operation.verb()
        );
    }
    pet_id
}

/// Send one request and report the outcome to Goose.
async fn send(
    user: &mut GooseUser,
    config: &PetstoreConfig,
    operation: PetOperation,
    url: &str,
    payload: Option<&Pet>,
    pet_id: PetId,
) -> StepOutcome {
    let headers = match operation.headers(&config.api_key) {
        Ok(headers) => headers,
        Err(e) => {
            error!("Failed to {} pet: invalid api_key header: {}", operation.verb(), e);
            return StepOutcome::Failure;
        }
    };

    let mut request_builder = match user.get_request_builder(&operation.method(), url) {
        Ok(request_builder) => request_builder,
        Err(e) => {
            error!("Failed to {} pet: {}", operation.verb(), e);
            log_request(config, url, &headers, payload);
            return StepOutcome::Failure;
        }
    };
    request_builder = request_builder
        .headers(headers.clone())
        .timeout(config.timeout);
    if let Some(pet) = payload {
        request_builder = request_builder.json(pet);
    }

    let goose_request = GooseRequest::builder()
        .method(operation.method())
        .path(url)
        .name(operation.request_name())
        .set_request_builder(request_builder)
        .build();

    let mut goose = match user.request(goose_request).await {
        Ok(goose) => goose,
        Err(e) => {
            error!("Failed to {} pet: {}", operation.verb(), e);
            log_request(config, url, &headers, payload);
            return StepOutcome::Failure;
        }
    };

    let (detail, response_headers, body) = match goose.response {
        Ok(response) => {
            let status = response.status();
            let response_headers = response.headers().clone();
            match response.text().await {
                Ok(body) => {
                    if operation.accepts(status) {
                        // Overrides Goose's own classification, which accepts any 2xx.
                        if let Err(e) = user.set_success(&mut goose.request) {
                            warn!(
                                "Failed to record {} as a success: {:?}",
                                operation.request_name(),
                                e
                            );
                        }
                        log_success(operation, pet_id, &body);
                        return StepOutcome::Success;
                    }
                    (
                        format!(
                            "Failed to {} pet: {}, {}",
                            operation.verb(),
                            status.as_u16(),
                            body
                        ),
                        Some(response_headers),
                        Some(body),
                    )
                }
                Err(e) => (
                    format!(
                        "Failed to {} pet: {}, failed to read response body: {}",
                        operation.verb(),
                        status.as_u16(),
                        e
                    ),
                    Some(response_headers),
                    None,
                ),
            }
        }
        // Timeouts and transport errors.
        Err(e) => (
            format!("Failed to {} pet: no response from server: {}", operation.verb(), e),
            None,
            None,
        ),
    };

    // The returned error only signals the failure, which is already recorded.
    let _ = user.set_failure(
        &detail,
        &mut goose.request,
        response_headers.as_ref(),
        body.as_deref(),
    );
    error!("{}", detail);
    log_request(config, url, &headers, payload);

    StepOutcome::Failure
}

fn log_success(operation: PetOperation, pet_id: PetId, body: &str) {
    match operation {
        PetOperation::Create => info!("Pet created successfully with ID: {}", pet_id),
        PetOperation::Read => info!("Pet retrieved successfully: {}", body),
        PetOperation::Update => info!("Pet updated successfully: {}", body),
        PetOperation::Delete => info!("Pet deleted successfully with ID: {}", pet_id),
    }
}

/// Log everything needed to replay a failed request, if enabled.
fn log_request(config: &PetstoreConfig, url: &str, headers: &HeaderMap, payload: Option<&Pet>) {
    if !config.enable_logging {
        return;
    }

    match payload.map(serde_json::to_string) {
        Some(Ok(payload)) => error!(
            "Request URL: {}, Headers: {:?}, Payload: {}",
            url, headers, payload
        ),
        Some(Err(e)) => error!(
            "Request URL: {}, Headers: {:?}, Payload: <unserializable: {}>",
            url, headers, e
        ),
        None => error!("Request URL: {}, Headers: {:?}", url, headers),
    }
}
