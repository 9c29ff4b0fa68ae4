//! Fixture and test records produced by extraction.

/// Insertion-ordered, de-duplicated set of tag values.
///
/// Order is first occurrence, so repeated extraction of the same module
/// serializes identically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet(Vec<String>);

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value; returns false if it was already present.
    pub fn insert(&mut self, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.0.contains(&value) {
            return false;
        }
        self.0.push(value);
        true
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Comma-joined values wrapped in quotes; `""` when empty.
    pub fn to_field(&self) -> String {
        format!("\"{}\"", self.0.join(","))
    }
}

impl<S: Into<String>> FromIterator<S> for TagSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = TagSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

/// One row of the fixture report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureRecord {
    pub test_fixture_name: String,
    pub application: Option<String>,
    pub domain_owner: Option<String>,
    pub test_type: Option<String>,
}

/// One row of the test report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestRecord {
    pub test_name: String,
    pub test_fixture_name: String,
    pub environments: TagSet,
    pub feature_types: TagSet,
    pub categories: TagSet,
}

/// Records accumulated from one or more modules, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extraction {
    pub fixtures: Vec<FixtureRecord>,
    pub tests: Vec<TestRecord>,
}

impl Extraction {
    /// Append another module's records after this one's.
    pub fn extend(&mut self, other: Extraction) {
        self.fixtures.extend(other.fixtures);
        self.tests.extend(other.tests);
    }
}
