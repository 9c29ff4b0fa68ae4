//! testlabel core — metadata model, manifest loading, extraction, CSV.
//!
//! This crate covers everything before publishing:
//! - Module manifests describing declared types, methods and their tags
//! - Fail-fast loading of one manifest per compiled test artifact
//! - Fixture and test record extraction by exact tag name
//! - CSV rendering of both record lists

pub mod csv_export;
pub mod extract;
pub mod loader;
pub mod metadata;
pub mod record;

pub use csv_export::{fixtures_to_csv, tests_to_csv, SerializeError};
pub use extract::{extract, extract_fixtures, extract_tests};
pub use loader::{load_module, load_modules, parse_assembly_list, LoadError};
pub use metadata::{MethodMetadata, ModuleMetadata, Tag, TagArgument, Tagged, TypeMetadata};
pub use record::{Extraction, FixtureRecord, TagSet, TestRecord};
