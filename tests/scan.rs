use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::PathBuf;

use tempfile::tempdir;

use llm_porter::config::default_excluded_dirs;
use llm_porter::error::PorterError;
use llm_porter::scan::scan_root;

fn write_file(root: &std::path::Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        create_dir_all(parent).unwrap();
    }
    let mut file = File::create(&path).unwrap();
    write!(file, "{content}").unwrap();
}

#[test]
fn scan_collects_candidates_and_skips_excluded_dirs() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "src/foo.component.ts", "export class FooComponent {}");
    write_file(tmp.path(), "src/foo.component.html", "<div></div>");
    write_file(tmp.path(), "node_modules/dep/index.js", "module.exports = {};");
    write_file(tmp.path(), ".git/config", "[core]");

    let output = scan_root(tmp.path(), &default_excluded_dirs()).expect("scan succeeds");

    let relative: Vec<_> = output
        .files
        .iter()
        .map(|file| file.relative_path.clone())
        .collect();
    assert_eq!(
        relative,
        vec![
            PathBuf::from("src/foo.component.html"),
            PathBuf::from("src/foo.component.ts"),
        ]
    );
    assert!(output.warnings.is_empty());
}

#[test]
fn scan_skips_unrecognized_extensions() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "README.md", "# readme");
    write_file(tmp.path(), "package.json", "{}");
    write_file(tmp.path(), "app.js", "angular.module('app', []);");

    let output = scan_root(tmp.path(), &[]).expect("scan succeeds");

    assert_eq!(output.files.len(), 1);
    assert_eq!(output.files[0].relative_path, PathBuf::from("app.js"));
    assert_eq!(output.files[0].content, "angular.module('app', []);");
}

#[test]
fn scan_order_is_deterministic_and_name_sorted() {
    let tmp = tempdir().unwrap();
    write_file(tmp.path(), "b.ts", "");
    write_file(tmp.path(), "a.ts", "");
    write_file(tmp.path(), "sub/c.ts", "");

    let first = scan_root(tmp.path(), &[]).expect("scan succeeds");
    let second = scan_root(tmp.path(), &[]).expect("scan succeeds");

    let order: Vec<_> = first
        .files
        .iter()
        .map(|file| file.relative_path.clone())
        .collect();
    assert_eq!(
        order,
        vec![
            PathBuf::from("a.ts"),
            PathBuf::from("b.ts"),
            PathBuf::from("sub/c.ts"),
        ]
    );
    let order_again: Vec<_> = second
        .files
        .iter()
        .map(|file| file.relative_path.clone())
        .collect();
    assert_eq!(order, order_again);
}

#[test]
fn missing_root_is_root_inaccessible() {
    let tmp = tempdir().unwrap();
    let missing = tmp.path().join("does-not-exist");

    let err = scan_root(&missing, &[]).expect_err("scan must fail");
    match err {
        PorterError::RootInaccessible { path, .. } => assert_eq!(path, missing),
    }
}
