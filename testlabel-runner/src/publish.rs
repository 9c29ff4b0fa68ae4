//! Report publishing: object keys, the storage seam, and the S3 store.
//!
//! Every upload is a single blocking put. Failures are reported and turned
//! into `false`; nothing is retried and nothing is cleaned up.

use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use chrono::{DateTime, Utc};
use std::fmt;
use thiserror::Error;
use tracing::{debug, info};

use crate::config::PublishConfig;

/// Timestamp layout used in object keys, e.g. `20240101T000000`.
pub const KEY_TIMESTAMP_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Which report a payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    TestFixtures,
    AutomatedTests,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::TestFixtures => "test_fixtures",
            DataType::AutomatedTests => "automated_tests",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `{prefix}/{repository}__{data_type}__{timestamp}.csv`
pub fn object_key(
    prefix: &str,
    repository_name: &str,
    data_type: DataType,
    at: DateTime<Utc>,
) -> String {
    let filename = format!(
        "{repository_name}__{data_type}__{}.csv",
        at.format(KEY_TIMESTAMP_FORMAT)
    );
    if prefix.is_empty() {
        filename
    } else {
        format!("{prefix}/{filename}")
    }
}

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload to s3://{bucket}/{key} failed: {message}")]
    Transport {
        bucket: String,
        key: String,
        message: String,
    },

    #[error("failed to start storage runtime: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Store a byte buffer under a bucket/key pair.
pub trait ObjectStore {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), UploadError>;
}

/// S3-backed store. Credentials come from the default AWS provider chain.
///
/// The SDK is async; a current-thread runtime drives each put to completion
/// so callers see a plain blocking call.
pub struct S3Store {
    client: aws_sdk_s3::Client,
    runtime: tokio::runtime::Runtime,
}

impl S3Store {
    pub fn connect(region: &str) -> Result<Self, UploadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let sdk_config = runtime.block_on(
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(Region::new(region.to_string()))
                .load(),
        );
        let client = aws_sdk_s3::Client::new(&sdk_config);
        Ok(Self { client, runtime })
    }
}

impl ObjectStore for S3Store {
    fn put_object(&self, bucket: &str, key: &str, body: Vec<u8>) -> Result<(), UploadError> {
        let request = self
            .client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type("text/csv")
            .body(ByteStream::from(body))
            .send();

        self.runtime
            .block_on(request)
            .map(|_| ())
            .map_err(|e| UploadError::Transport {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })
    }
}

/// Uploads report payloads under the configured bucket and prefix.
pub struct Publisher<'a> {
    store: &'a dyn ObjectStore,
    config: &'a PublishConfig,
}

impl<'a> Publisher<'a> {
    pub fn new(store: &'a dyn ObjectStore, config: &'a PublishConfig) -> Self {
        Self { store, config }
    }

    /// Upload one report. Returns false (after reporting on stderr) on failure.
    pub fn upload(
        &self,
        payload: Vec<u8>,
        repository_name: &str,
        data_type: DataType,
        at: DateTime<Utc>,
    ) -> bool {
        let key = object_key(&self.config.key_prefix, repository_name, data_type, at);
        let bytes = payload.len();

        match self.store.put_object(&self.config.bucket, &key, payload) {
            Ok(()) => {
                info!(bucket = %self.config.bucket, %key, bytes, "uploaded report");
                true
            }
            Err(e) => {
                eprintln!("An error occurred uploading the file to S3:");
                eprintln!("{e}");
                debug!(bucket = %self.config.bucket, %key, "report upload failed");
                false
            }
        }
    }
}
