use std::sync::Once;

use giso_common::GraphDescription;

use crate::GraphModel;

static INIT: Once = Once::new();

/// Configures logging for the test runner.
pub(crate) fn setup_test_logging() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Build a model from a shared test description.
#[track_caller]
pub(crate) fn model(description: &GraphDescription) -> GraphModel {
    GraphModel::from_description(description)
        .unwrap_or_else(|e| panic!("test graph failed to build: {e}"))
}
