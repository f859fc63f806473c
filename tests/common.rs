use gumdrop::Options;
use httpmock::MockServer;

use goose::config::GooseConfiguration;
use goose::metrics::GooseMetrics;
use goose::prelude::*;
use petstore_goose::config::PetstoreConfig;

// Not all functions are used by all tests, so we enable allow(dead_code) to avoid
// compiler warnings during testing.

/// The following options are configured by default, if not set to a custom value:
///  --host <mock-server>
///  --users 1
///  --hatch-rate 1
///  --run-time 1
pub fn build_configuration(server: &MockServer, custom: Vec<&str>) -> GooseConfiguration {
    // Start with an empty configuration.
    let mut configuration: Vec<&str> = vec![];
    // Declare server_url here no matter what, so its lifetime is sufficient when needed.
    let server_url = server.base_url();

    // Merge in all custom options first.
    configuration.extend_from_slice(&custom);

    // Default to using mock server if not otherwise configured.
    if !configuration.contains(&"--host") {
        configuration.extend_from_slice(&["--host", &server_url]);
    }

    // Default to testing with 1 user if not otherwise configured.
    if !configuration.contains(&"--users") {
        configuration.extend_from_slice(&["--users", "1"]);
    }

    // Default to hatch 1 user per second if not otherwise configured.
    if !configuration.contains(&"--hatch-rate") {
        configuration.extend_from_slice(&["--hatch-rate", "1"]);
    }

    // Default to running for 1 second if not otherwise configured.
    if !configuration.contains(&"--run-time") {
        configuration.extend_from_slice(&["--run-time", "1"]);
    }

    // Parse these options to generate a GooseConfiguration.
    GooseConfiguration::parse_args_default(&configuration)
        .expect("failed to parse options and generate a configuration")
}

/// Create a GooseAttack object from the configuration and scenarios.
#[allow(dead_code)]
pub fn build_load_test(configuration: GooseConfiguration, scenarios: Vec<Scenario>) -> GooseAttack {
    let mut goose = GooseAttack::initialize_with_config(configuration).unwrap();
    for scenario in scenarios {
        goose = goose.register_scenario(scenario);
    }
    goose
}

/// Run the actual load test, returning the GooseMetrics.
#[allow(dead_code)]
pub async fn run_load_test(goose_attack: GooseAttack) -> GooseMetrics {
    goose_attack.execute().await.unwrap()
}

/// A standalone GooseUser making requests against `base_url`, outside of a load test.
///
/// Without a GooseAttack nothing fills in the coordinated omission mitigation, which
/// GooseUser::request requires, so it is set explicitly.
#[allow(dead_code)]
pub fn build_user(server: &MockServer, base_url: &str) -> GooseUser {
    let configuration = build_configuration(
        server,
        vec!["--host", base_url, "--co-mitigation", "disabled"],
    );
    GooseUser::single(
        base_url.parse().expect("base_url must be a valid URL"),
        &configuration,
    )
    .expect("failed to build a single GooseUser")
}

/// Pet store configuration that doesn't depend on the process environment.
#[allow(dead_code)]
pub fn petstore_config(server: &MockServer) -> PetstoreConfig {
    PetstoreConfig::from_lookup(|key| match key {
        "BASE_URL" => Some(server.base_url()),
        _ => None,
    })
    .expect("failed to build configuration")
}
