use std::path::{Path, PathBuf};

use llm_porter::associate::AssociationPool;
use llm_porter::classify::Classifier;
use llm_porter::extract::NameExtractor;
use llm_porter::inventory::SourceFile;
use llm_porter::scan::ScannedFile;

fn source_file(relative: &str, content: &str) -> SourceFile {
    let classifier = Classifier::with_defaults();
    let extractor = NameExtractor::new();
    let extension = Path::new(relative)
        .extension()
        .expect("test paths carry extensions")
        .to_string_lossy()
        .to_lowercase();
    SourceFile::from_scanned(
        ScannedFile {
            path: PathBuf::from("/project").join(relative),
            relative_path: PathBuf::from(relative),
            extension,
            content: content.to_string(),
        },
        &classifier,
        &extractor,
    )
    .expect("recognized extension")
}

#[test]
fn naming_convention_resolves_template_and_style_in_same_directory() {
    // Scenario: foo.component.ts with sibling template and style, no
    // explicit references in the definition.
    let primary = source_file("src/foo.component.ts", "export class FooComponent {}");
    let mut pool = AssociationPool::new(
        vec![source_file("src/foo.component.html", "<div></div>")],
        vec![source_file("src/foo.component.scss", ".foo {}")],
    );

    let template = pool.claim_template_for(&primary);
    let style = pool.claim_style_for(&primary);

    assert_eq!(
        template.expect("template resolved").relative_path,
        PathBuf::from("src/foo.component.html")
    );
    assert_eq!(
        style.expect("style resolved").relative_path,
        PathBuf::from("src/foo.component.scss")
    );
    assert!(pool.into_unclaimed().is_empty(), "nothing left unclaimed");
}

#[test]
fn explicit_reference_takes_precedence_over_naming_convention() {
    let primary = source_file(
        "src/foo.component.ts",
        "@Component({ templateUrl: './other.html' }) export class FooComponent {}",
    );
    // Convention would pick foo.html; the declared reference names other.html.
    let mut pool = AssociationPool::new(
        vec![
            source_file("src/foo.html", "<p>convention</p>"),
            source_file("src/other.html", "<p>declared</p>"),
        ],
        Vec::new(),
    );

    let template = pool.claim_template_for(&primary);
    assert_eq!(
        template.expect("template resolved").relative_path,
        PathBuf::from("src/other.html")
    );
}

#[test]
fn dangling_reference_falls_back_to_convention_then_empty() {
    // Scenario: the declared template path does not exist among scanned
    // files. Phase 1 must fall through without raising.
    let primary = source_file(
        "src/foo.component.ts",
        "@Component({ templateUrl: './missing.html' }) export class FooComponent {}",
    );

    let mut pool = AssociationPool::new(vec![source_file("src/foo.html", "<p>here</p>")], Vec::new());
    let template = pool.claim_template_for(&primary);
    assert_eq!(
        template.expect("fell back to convention").relative_path,
        PathBuf::from("src/foo.html")
    );

    // With no convention candidate either, the slot stays empty.
    let mut empty_pool = AssociationPool::new(Vec::new(), Vec::new());
    assert!(empty_pool.claim_template_for(&primary).is_none());
}

#[test]
fn a_claimed_file_is_never_claimed_twice() {
    let first = source_file("one/foo.component.ts", "export class FooComponent {}");
    let second = source_file("two/foo.component.ts", "export class FooComponent {}");
    // Both primaries convention-match the single template in a
    // conventional subdirectory; only the first claim succeeds.
    let mut pool = AssociationPool::new(vec![source_file("templates/foo.html", "<p></p>")], Vec::new());

    assert!(pool.claim_template_for(&first).is_some());
    assert!(
        pool.claim_template_for(&second).is_none(),
        "second primary must not steal the claimed template"
    );
}

#[test]
fn conventional_subdirectories_are_searched() {
    let primary = source_file(
        "app/foo.controller.js",
        "angular.module('app').controller('fooCtrl', function () {});",
    );
    let mut pool = AssociationPool::new(vec![source_file("app/views/foo.html", "<p></p>")], Vec::new());

    let template = pool.claim_template_for(&primary);
    assert_eq!(
        template.expect("view directory searched").relative_path,
        PathBuf::from("app/views/foo.html")
    );
}

#[test]
fn relative_template_reference_resolves_against_primary_directory() {
    let primary = source_file(
        "app/widgets/foo.component.ts",
        "@Component({ templateUrl: '../shared/frame.html' }) export class FooComponent {}",
    );
    let mut pool = AssociationPool::new(
        vec![source_file("app/shared/frame.html", "<section></section>")],
        Vec::new(),
    );

    let template = pool.claim_template_for(&primary);
    assert_eq!(
        template.expect("parent-relative reference resolved").relative_path,
        PathBuf::from("app/shared/frame.html")
    );
}
