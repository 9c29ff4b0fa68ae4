//! testlabel runner — publishing and the end-to-end report pipeline.
//!
//! This crate builds on `testlabel-core` to provide:
//! - Object-key naming for the reporting store
//! - The `ObjectStore` seam and its S3 implementation
//! - Publishing configuration with fixed defaults
//! - Positional-argument validation
//! - The single-pass pipeline from manifests to uploaded CSVs

pub mod config;
pub mod invocation;
pub mod pipeline;
pub mod publish;

pub use config::{ConfigError, PublishConfig};
pub use invocation::{Invocation, MissingArgument};
pub use pipeline::{collect_records, run_report, PipelineError, ReportOutcome};
pub use publish::{object_key, DataType, ObjectStore, Publisher, S3Store, UploadError};

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_types_are_send_sync() {
        assert_send::<PublishConfig>();
        assert_sync::<PublishConfig>();
        assert_send::<Invocation>();
        assert_sync::<Invocation>();
    }

    #[test]
    fn error_types_are_send_sync() {
        assert_send::<PipelineError>();
        assert_sync::<PipelineError>();
        assert_send::<UploadError>();
        assert_sync::<UploadError>();
        assert_send::<ConfigError>();
        assert_sync::<ConfigError>();
    }
}
