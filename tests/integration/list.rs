use deplist_cli::test_utils::CsvFixture;
use predicates::prelude::*;

use crate::deplist_command;

/// Test the documented example table
#[test]
fn test_list_build_dependencies() {
    let fixture = CsvFixture::sample().unwrap();

    deplist_command()
        .arg(fixture.path())
        .arg("build dependencies")
        .assert()
        .success()
        .stdout("libfoo\nlibbar\nlibbaz\n")
        .stderr(predicate::str::is_empty());
}

/// Test that only the named column is read
#[test]
fn test_list_selects_column() {
    let fixture = CsvFixture::new(
        "name,build dependencies,runtime dependencies\n\
         app,\"gcc;make\",\"libc;libssl\"\n\
         tool,cmake,\n",
    )
    .unwrap();

    deplist_command()
        .arg(fixture.path())
        .arg("runtime dependencies")
        .assert()
        .success()
        .stdout("libc\nlibssl\n");
}

/// Test that repeated names are all printed, in row order
#[test]
fn test_list_keeps_duplicates_and_order() {
    let fixture = CsvFixture::new("name,deps\nz,\"b;a\"\ny,\"a;b\"\n").unwrap();

    deplist_command()
        .arg(fixture.path())
        .arg("deps")
        .assert()
        .success()
        .stdout("b\na\na\nb\n");
}

/// Test a value without separators
#[test]
fn test_list_single_value() {
    let fixture = CsvFixture::new("name,deps\na,zlib1g-dev\n").unwrap();

    deplist_command()
        .arg(fixture.path())
        .arg("deps")
        .assert()
        .success()
        .stdout("zlib1g-dev\n");
}

/// Test that a table with only empty values prints nothing
#[test]
fn test_list_empty_values() {
    let fixture = CsvFixture::new("name,deps\na,\"\"\nb,;;\n").unwrap();

    deplist_command().arg(fixture.path()).arg("deps").assert().success().stdout("");
}

/// Test that a header-only table succeeds even when the column is absent
#[test]
fn test_list_header_only() {
    let fixture = CsvFixture::new("name,deps\n").unwrap();

    deplist_command().arg(fixture.path()).arg("missing").assert().success().stdout("");
}

/// Test that two runs over the same file print the same thing
#[test]
fn test_list_is_repeatable() {
    let fixture = CsvFixture::sample().unwrap();

    let first = deplist_command()
        .arg(fixture.path())
        .arg("build dependencies")
        .output()
        .unwrap();
    let second = deplist_command()
        .arg(fixture.path())
        .arg("build dependencies")
        .output()
        .unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

/// Test that verbose logging stays off stdout
#[test]
fn test_verbose_logs_to_stderr() {
    let fixture = CsvFixture::sample().unwrap();

    deplist_command()
        .arg("--verbose")
        .arg(fixture.path())
        .arg("build dependencies")
        .assert()
        .success()
        .stdout("libfoo\nlibbar\nlibbaz\n")
        .stderr(predicate::str::contains("Opening dependency table"));
}

/// Test --version
#[test]
fn test_version() {
    deplist_command()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
