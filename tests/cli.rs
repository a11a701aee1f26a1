use std::fs::{create_dir_all, write};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn inventory_cli_prints_grouped_inventory_as_json() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("app");
    create_dir_all(project.join("src")).unwrap();
    write(
        project.join("src/bar.js"),
        "angular.module('app').controller('barCtrl', function () {});",
    )
    .unwrap();
    write(project.join("src/baz.service.ts"), "export class BazService {}").unwrap();

    let config_path = tmp.path().join("porter.yaml");
    write(
        &config_path,
        format!(
            "scan:\n  root: {}\noutput:\n  root: {}\n",
            project.display(),
            tmp.path().join("out").display()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("llm-porter").expect("binary exists");
    cmd.arg("inventory").arg("--config").arg(&config_path);

    cmd.assert().success().stdout(
        predicate::str::contains("\"units\"")
            .and(predicate::str::contains("barCtrl"))
            .and(predicate::str::contains("\"buckets\"")),
    );
}

#[test]
fn migrate_cli_requires_a_conversion_endpoint() {
    let tmp = tempdir().unwrap();
    let project = tmp.path().join("app");
    create_dir_all(&project).unwrap();

    let config_path = tmp.path().join("porter.yaml");
    write(
        &config_path,
        format!(
            "scan:\n  root: {}\noutput:\n  root: {}\n",
            project.display(),
            tmp.path().join("out").display()
        ),
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("llm-porter").expect("binary exists");
    cmd.arg("migrate").arg("--config").arg(&config_path);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("convert.endpoint"));
}
