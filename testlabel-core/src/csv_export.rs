//! CSV rendering of fixture and test records.
//!
//! Quoting is disabled: single-value fields go out raw, and only the
//! pre-quoted tag-set columns carry quotes. A comma inside e.g. an
//! application name therefore shifts that row's columns. Downstream
//! consumers read this exact layout, so it is kept as-is.

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use crate::record::{FixtureRecord, TestRecord};

pub const FIXTURE_HEADER: [&str; 5] = [
    "test_fixture",
    "application",
    "domain_owner",
    "test_type",
    "repository_name",
];

pub const TEST_HEADER: [&str; 6] = [
    "test_name",
    "test_fixture",
    "environments",
    "feature_types",
    "categories",
    "repository_name",
];

#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("CSV write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),
}

fn writer() -> csv::Writer<Vec<u8>> {
    WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(vec![])
}

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<Vec<u8>, SerializeError> {
    wtr.into_inner()
        .map_err(|e| SerializeError::Flush(e.error().to_string()))
}

/// Fixture report: header plus one row per record.
pub fn fixtures_to_csv(
    records: &[FixtureRecord],
    repository_name: &str,
) -> Result<Vec<u8>, SerializeError> {
    let mut wtr = writer();
    wtr.write_record(FIXTURE_HEADER)?;

    for r in records {
        wtr.write_record([
            r.test_fixture_name.as_str(),
            r.application.as_deref().unwrap_or(""),
            r.domain_owner.as_deref().unwrap_or(""),
            r.test_type.as_deref().unwrap_or(""),
            repository_name,
        ])?;
    }

    finish(wtr)
}

/// Test report: header plus one row per record.
pub fn tests_to_csv(
    records: &[TestRecord],
    repository_name: &str,
) -> Result<Vec<u8>, SerializeError> {
    let mut wtr = writer();
    wtr.write_record(TEST_HEADER)?;

    for r in records {
        wtr.write_record([
            r.test_name.as_str(),
            r.test_fixture_name.as_str(),
            r.environments.to_field().as_str(),
            r.feature_types.to_field().as_str(),
            r.categories.to_field().as_str(),
            repository_name,
        ])?;
    }

    finish(wtr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::TagSet;
    use proptest::prelude::*;

    fn fixture(name: &str, app: Option<&str>) -> FixtureRecord {
        FixtureRecord {
            test_fixture_name: name.to_string(),
            application: app.map(str::to_string),
            domain_owner: None,
            test_type: Some("Smoke".to_string()),
        }
    }

    fn test_record(name: &str, envs: &[&str]) -> TestRecord {
        TestRecord {
            test_name: name.to_string(),
            test_fixture_name: "LoginFixture".to_string(),
            environments: envs.iter().copied().collect(),
            feature_types: TagSet::new(),
            categories: ["Smoke"].into_iter().collect(),
        }
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn empty_fixture_list_is_header_only() {
        let out = text(fixtures_to_csv(&[], "care").unwrap());
        assert_eq!(
            out,
            "test_fixture,application,domain_owner,test_type,repository_name\n"
        );
    }

    #[test]
    fn empty_test_list_is_header_only() {
        let out = text(tests_to_csv(&[], "care").unwrap());
        assert_eq!(
            out,
            "test_name,test_fixture,environments,feature_types,categories,repository_name\n"
        );
    }

    #[test]
    fn fixture_rows_leave_absent_fields_empty() {
        let out = text(fixtures_to_csv(&[fixture("LoginFixture", None)], "care").unwrap());
        assert_eq!(out.lines().nth(1), Some("LoginFixture,,,Smoke,care"));
    }

    #[test]
    fn test_rows_carry_quoted_tag_sets() {
        let out = text(tests_to_csv(&[test_record("CanLogIn", &["Prod", "Staging"])], "care").unwrap());
        assert_eq!(
            out.lines().nth(1),
            Some("CanLogIn,LoginFixture,\"Prod,Staging\",\"\",\"Smoke\",care")
        );
    }

    #[test]
    fn single_value_fields_are_not_escaped() {
        let out = text(fixtures_to_csv(&[fixture("AFixture", Some("Pay, Roll"))], "care").unwrap());
        assert_eq!(out.lines().nth(1), Some("AFixture,Pay, Roll,,Smoke,care"));
    }

    proptest! {
        #[test]
        fn fixture_row_count_matches_records(names in prop::collection::vec("[A-Za-z]{1,12}", 0..40)) {
            let records: Vec<FixtureRecord> = names
                .iter()
                .map(|n| fixture(&format!("{n}Fixture"), Some("App")))
                .collect();
            let out = text(fixtures_to_csv(&records, "repo").unwrap());
            prop_assert_eq!(out.lines().count(), records.len() + 1);
            prop_assert!(out.ends_with('\n'));
        }

        #[test]
        fn test_row_count_matches_records(
            envs in prop::collection::vec(prop::collection::vec("[a-z]{1,6}", 0..5), 0..30)
        ) {
            let records: Vec<TestRecord> = envs
                .iter()
                .enumerate()
                .map(|(i, e)| {
                    let refs: Vec<&str> = e.iter().map(String::as_str).collect();
                    test_record(&format!("Test{i}"), &refs)
                })
                .collect();
            let out = text(tests_to_csv(&records, "repo").unwrap());
            prop_assert_eq!(out.lines().count(), records.len() + 1);
            for line in out.lines().skip(1) {
                prop_assert!(line.ends_with(",repo"));
            }
        }
    }
}
