//! Tests for `DependencyLister` against tables on disk.

use std::io;

use deplist_cli::core::{DeplistError, user_friendly_error};
use deplist_cli::lister::{DependencyLister, split_dependencies};
use deplist_cli::test_utils::{CsvFixture, init_test_logging};

fn listed(lister: &DependencyLister, fixture: &CsvFixture) -> Result<Vec<String>, DeplistError> {
    lister.open(fixture.path())?.collect()
}

/// Output equals the per-row splits, concatenated in row order
#[test]
fn listing_matches_concatenated_splits() -> Result<(), Box<dyn std::error::Error>> {
    init_test_logging(None);
    let values = ["a;b", "", ";c;", "d", ";;", "e;f;g"];
    let mut table = String::from("name,deps\n");
    for (i, value) in values.iter().enumerate() {
        table.push_str(&format!("pkg-{i},\"{value}\"\n"));
    }
    let fixture = CsvFixture::new(table)?;

    let expected: Vec<String> =
        values.iter().flat_map(|value| split_dependencies(*value)).map(str::to_owned).collect();

    assert_eq!(listed(&DependencyLister::new("deps"), &fixture)?, expected);
    assert_eq!(expected, ["a", "b", "c", "d", "e", "f", "g"]);
    Ok(())
}

#[test]
fn default_lister_reads_build_dependencies() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CsvFixture::sample()?;
    assert_eq!(listed(&DependencyLister::default(), &fixture)?, ["libfoo", "libbar", "libbaz"]);
    Ok(())
}

#[test]
fn listing_twice_gives_same_result() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CsvFixture::sample()?;
    let lister = DependencyLister::default();
    assert_eq!(listed(&lister, &fixture)?, listed(&lister, &fixture)?);
    Ok(())
}

#[test]
fn missing_file_fails_on_open() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CsvFixture::sample()?;
    let mut out = Vec::new();

    let error = DependencyLister::default().write_to(fixture.missing_path(), &mut out).unwrap_err();

    assert!(matches!(
        error,
        DeplistError::FileAccess {
            kind: io::ErrorKind::NotFound,
            ..
        }
    ));
    assert!(out.is_empty());
    Ok(())
}

#[test]
fn missing_column_stops_at_first_row() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CsvFixture::new("name,runtime\na,x\nb,y\n")?;
    let mut dependencies = DependencyLister::default().open(fixture.path())?;

    let error = dependencies.next().unwrap().unwrap_err();
    assert!(matches!(error, DeplistError::MissingColumn { line: 2, .. }));
    assert!(dependencies.next().is_none());
    assert_eq!(dependencies.rows_read(), 1);

    let ctx = user_friendly_error(error.into());
    assert_eq!(ctx.details.as_deref(), Some("Available columns: 'name', 'runtime'"));
    Ok(())
}

#[test]
fn source_name_is_the_path() -> Result<(), Box<dyn std::error::Error>> {
    let fixture = CsvFixture::named("packages.csv", "name,deps\n")?;
    let dependencies = DependencyLister::new("deps").open(fixture.path())?;
    assert!(dependencies.source_name().ends_with("packages.csv"));
    Ok(())
}

#[test]
fn from_reader_lists_in_memory_table() {
    let table = "name,deps\na,\"x;y\"\n";
    let deps: Vec<String> = DependencyLister::new("deps")
        .from_reader(table.as_bytes(), "<memory>")
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(deps, ["x", "y"]);
}
