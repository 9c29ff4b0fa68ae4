//! The report pipeline: load → extract → serialize → publish.
//!
//! Runs once, single-threaded. Both reports are serialized before either is
//! uploaded, and both uploads are always attempted; the run succeeds only
//! if both land.

use chrono::{DateTime, Utc};
use std::path::Path;
use thiserror::Error;
use tracing::info;

use testlabel_core::{
    extract, fixtures_to_csv, load_modules, tests_to_csv, Extraction, LoadError, SerializeError,
};

use crate::config::PublishConfig;
use crate::invocation::Invocation;
use crate::publish::{DataType, ObjectStore, Publisher};

/// Errors that abort a run before publishing.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("load error: {0}")]
    Load(#[from] LoadError),
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

/// What a completed run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOutcome {
    pub fixture_count: usize,
    pub test_count: usize,
    pub fixtures_uploaded: bool,
    pub tests_uploaded: bool,
}

impl ReportOutcome {
    pub fn succeeded(&self) -> bool {
        self.fixtures_uploaded && self.tests_uploaded
    }
}

/// Load every manifest (fail-fast) and accumulate records in input order.
pub fn collect_records<P: AsRef<Path>>(paths: &[P]) -> Result<Extraction, LoadError> {
    let modules = load_modules(paths)?;
    let mut acc = Extraction::default();
    for module in &modules {
        acc.extend(extract(module));
    }
    Ok(acc)
}

/// Run the whole pipeline. `at` stamps both object keys.
pub fn run_report(
    invocation: &Invocation,
    store: &dyn ObjectStore,
    config: &PublishConfig,
    at: DateTime<Utc>,
) -> Result<ReportOutcome, PipelineError> {
    let records = collect_records(&invocation.assembly_paths)?;
    info!(
        modules = invocation.assembly_paths.len(),
        fixtures = records.fixtures.len(),
        tests = records.tests.len(),
        "extracted test labels"
    );

    let repository_name = invocation.repository_name.as_str();
    let fixture_csv = fixtures_to_csv(&records.fixtures, repository_name)?;
    let test_csv = tests_to_csv(&records.tests, repository_name)?;

    let publisher = Publisher::new(store, config);
    let fixtures_uploaded =
        publisher.upload(fixture_csv, repository_name, DataType::TestFixtures, at);
    let tests_uploaded = publisher.upload(test_csv, repository_name, DataType::AutomatedTests, at);

    Ok(ReportOutcome {
        fixture_count: records.fixtures.len(),
        test_count: records.tests.len(),
        fixtures_uploaded,
        tests_uploaded,
    })
}
