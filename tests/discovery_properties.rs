use assert_fs::prelude::*;
use std::collections::BTreeSet;
use std::path::PathBuf;

use export_mover::{Category, FileSystemError, list_by_prefix};

fn names(paths: &[PathBuf]) -> BTreeSet<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

#[test]
fn missing_staging_dir_is_empty_for_every_category() {
    let td = assert_fs::TempDir::new().unwrap();
    let staging = td.path().join("never-created");
    for c in Category::ALL {
        assert!(list_by_prefix(&staging, c.prefix()).unwrap().is_empty(), "{c}");
    }
    assert!(!staging.exists(), "discovery must not create the staging dir");
}

#[test]
fn returns_exactly_the_prefixed_regular_files() {
    let td = assert_fs::TempDir::new().unwrap();
    let staging = td.child("tmp");
    for i in 0..5 {
        staging.child(format!("outpay_{i}.csv")).write_str("o").unwrap();
    }
    for other in ["redemption_1.csv", "xoutpay_1.csv", "OUTPAY_2.csv", "readme.txt", "own_and_ben_1.csv"] {
        staging.child(other).write_str("-").unwrap();
    }
    staging.child("outpay_subdir").create_dir_all().unwrap();
    staging.child("outpay_subdir/outpay_nested.csv").write_str("n").unwrap();

    let found = list_by_prefix(staging.path(), Category::Outpay.prefix()).unwrap();
    assert_eq!(found.len(), 5);
    let expected: BTreeSet<String> = (0..5).map(|i| format!("outpay_{i}.csv")).collect();
    assert_eq!(names(&found), expected);
    assert!(found.iter().all(|p| p.parent() == Some(staging.path())));
}

#[test]
fn categories_partition_a_mixed_staging_dir() {
    let td = assert_fs::TempDir::new().unwrap();
    for name in ["redemption_a", "redemption_b", "outpay_a", "own_and_ben_a", "own_and_ben_b", "own_and_ben_c"] {
        td.child(name).write_str(name).unwrap();
    }
    let counts: Vec<usize> = Category::ALL
        .iter()
        .map(|c| list_by_prefix(td.path(), c.prefix()).unwrap().len())
        .collect();
    assert_eq!(counts, [2, 1, 3]);
}

#[test]
fn staging_path_that_is_a_file_is_a_fault() {
    let td = assert_fs::TempDir::new().unwrap();
    let file = td.child("tmp");
    file.write_str("not a dir").unwrap();
    let err = list_by_prefix(file.path(), "redemption_").unwrap_err();
    assert!(matches!(err, FileSystemError::StagingNotDirectory { .. }), "{err}");
    assert!(err.to_string().contains("redemption_"));
}
