//! Tag extraction: turn module metadata into fixture and test records.
//!
//! All lookups are exact tag-name matches. A qualifying type or method with
//! no matching tags still yields a record, just with empty fields.

use tracing::debug;

use crate::metadata::{ModuleMetadata, Tag, Tagged};
use crate::record::{Extraction, FixtureRecord, TagSet, TestRecord};

/// Type-name suffix marking a test fixture.
pub const FIXTURE_SUFFIX: &str = "Fixture";

pub const TEST_APPLICATION_TAG: &str = "TestApplicationAttribute";
pub const TEST_DOMAIN_OWNER_TAG: &str = "TestDomainOwnerAttribute";
pub const TEST_TYPE_TAG: &str = "TestTypeAttribute";

/// Marker carried by every test method.
pub const TEST_MARKER_TAG: &str = "TestAttribute";

pub const TEST_ENVIRONMENT_TAG: &str = "TestEnvironmentAttribute";
pub const TEST_FEATURE_TYPE_TAG: &str = "TestFeatureTypeAttribute";
pub const CATEGORY_TAG: &str = "CategoryAttribute";

/// Extract both record lists from one module.
pub fn extract(module: &ModuleMetadata) -> Extraction {
    let extraction = Extraction {
        fixtures: extract_fixtures(module),
        tests: extract_tests(module),
    };
    debug!(
        module = %module.name,
        fixtures = extraction.fixtures.len(),
        tests = extraction.tests.len(),
        "extracted records"
    );
    extraction
}

/// One record per declared type whose name ends in [`FIXTURE_SUFFIX`].
pub fn extract_fixtures(module: &ModuleMetadata) -> Vec<FixtureRecord> {
    module
        .types
        .iter()
        .filter(|ty| ty.name.ends_with(FIXTURE_SUFFIX))
        .map(|ty| FixtureRecord {
            test_fixture_name: ty.name.clone(),
            application: single_value(ty, TEST_APPLICATION_TAG),
            domain_owner: single_value(ty, TEST_DOMAIN_OWNER_TAG),
            test_type: single_value(ty, TEST_TYPE_TAG),
        })
        .collect()
}

/// One record per visible method carrying [`TEST_MARKER_TAG`].
///
/// Inherited test methods are reported under the type that inherits them.
pub fn extract_tests(module: &ModuleMetadata) -> Vec<TestRecord> {
    let mut records = Vec::new();
    for ty in &module.types {
        for method in module.visible_methods(ty) {
            if !method.has_tag(TEST_MARKER_TAG) {
                continue;
            }
            records.push(TestRecord {
                test_name: method.name.clone(),
                test_fixture_name: ty.name.clone(),
                environments: tag_family(method, TEST_ENVIRONMENT_TAG),
                feature_types: tag_family(method, TEST_FEATURE_TYPE_TAG),
                categories: tag_family(method, CATEGORY_TAG),
            });
        }
    }
    records
}

// First occurrence only; a tag without arguments counts as absent.
fn single_value(item: &impl Tagged, tag_name: &str) -> Option<String> {
    item.first_tag(tag_name)
        .and_then(Tag::first_argument)
        .map(|arg| arg.value())
}

fn tag_family(item: &impl Tagged, tag_name: &str) -> TagSet {
    item.tags_named(tag_name)
        .filter_map(Tag::first_argument)
        .map(|arg| strip_quotes(&arg.literal()).to_string())
        .collect()
}

/// Remove one layer of surrounding `"` if both ends carry one.
fn strip_quotes(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(s)
}
