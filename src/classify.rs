//! File classification: extension groups, the ordered suffix→subkind rule
//! table, and content sniffing for suffix-less script files.
//!
//! Classification is a total, deterministic function of (extension,
//! filename, content). The rule tables are data, not scattered
//! conditionals, so their priority order is testable on its own.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Extensions treated as style sheets.
pub const STYLE_EXTENSIONS: &[&str] = &["css", "scss", "sass", "less", "styl"];

/// Extensions treated as markup templates.
pub const TEMPLATE_EXTENSIONS: &[&str] = &["html", "htm"];

/// Definition-bearing scripting extensions, refined by suffix or content.
pub const SCRIPT_EXTENSIONS: &[&str] = &["ts", "js"];

/// The structural role of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Definition(DefinitionKind),
    Template,
    Style,
    /// Unrecognized extension. Dropped before the file enters the model.
    Unclassified,
}

/// Refined category of a definition file, used to select conversion rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefinitionKind {
    /// Components and controllers: the unit-forming, view-owning kind.
    Component,
    Directive,
    Service,
    Filter,
    RouteConfig,
    Module,
    Guard,
    Model,
    Other,
}

impl DefinitionKind {
    /// Whether files of this kind become LogicalUnits with template/style
    /// association, as opposed to plain bucket entries.
    pub fn forms_unit(&self) -> bool {
        matches!(self, DefinitionKind::Component | DefinitionKind::Directive)
    }
}

/// One filename-suffix convention, e.g. `.service.` → Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuffixRule {
    pub suffix: String,
    pub kind: DefinitionKind,
}

/// Default suffix table, first match wins. Covers Angular-style dotted
/// filenames and the AngularJS controller convention.
const DEFAULT_SUFFIX_RULES: &[(&str, DefinitionKind)] = &[
    (".component.", DefinitionKind::Component),
    (".controller.", DefinitionKind::Component),
    (".directive.", DefinitionKind::Directive),
    (".service.", DefinitionKind::Service),
    (".factory.", DefinitionKind::Service),
    (".provider.", DefinitionKind::Service),
    (".pipe.", DefinitionKind::Filter),
    (".filter.", DefinitionKind::Filter),
    (".guard.", DefinitionKind::Guard),
    (".interceptor.", DefinitionKind::Guard),
    (".module.", DefinitionKind::Module),
    (".routes.", DefinitionKind::RouteConfig),
    (".routing.", DefinitionKind::RouteConfig),
    (".config.", DefinitionKind::RouteConfig),
    (".model.", DefinitionKind::Model),
    (".interface.", DefinitionKind::Model),
    (".type.", DefinitionKind::Model),
    (".enum.", DefinitionKind::Model),
];

/// Content-sniff token families for suffix-less script files, first family
/// found wins. Order: stateful unit registration, transform registration,
/// compile registration, service registration, route wiring, bare module.
const SNIFF_TABLE: &[(DefinitionKind, &[&str])] = &[
    (DefinitionKind::Component, &[".component(", ".controller("]),
    (DefinitionKind::Filter, &[".filter("]),
    (DefinitionKind::Directive, &[".directive("]),
    (
        DefinitionKind::Service,
        &[".service(", ".factory(", ".provider("],
    ),
    (
        DefinitionKind::RouteConfig,
        &["$routeProvider", "$stateProvider"],
    ),
    (DefinitionKind::Module, &["angular.module("]),
];

/// Shallow statefulness markers for service-like files. Knowingly
/// heuristic; kept as a single named rule rather than silently redesigned.
const STATEFUL_TOKENS: &[&str] = &[
    "BehaviorSubject",
    "ReplaySubject",
    "new Subject",
    "$rootScope",
    "localStorage",
    "this.state",
];

/// Whether a service-like unit should convert as a stateful store or a
/// stateless helper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceState {
    Stateful,
    Stateless,
}

/// Tag a service-like file by shallow token search over its content.
pub fn service_statefulness(content: &str) -> ServiceState {
    if contains_any(content, STATEFUL_TOKENS) {
        ServiceState::Stateful
    } else {
        ServiceState::Stateless
    }
}

fn contains_any(content: &str, tokens: &[&str]) -> bool {
    tokens.iter().any(|token| content.contains(token))
}

/// Classifier over the configured suffix table. Construct once per run.
#[derive(Debug, Clone)]
pub struct Classifier {
    rules: Vec<SuffixRule>,
}

impl Classifier {
    /// Build a classifier from extra rules plus the default table. Extra
    /// rules are consulted first so configuration can override a default.
    pub fn new(extra_rules: Vec<SuffixRule>) -> Self {
        let mut rules = extra_rules;
        rules.extend(DEFAULT_SUFFIX_RULES.iter().map(|(suffix, kind)| SuffixRule {
            suffix: (*suffix).to_string(),
            kind: *kind,
        }));
        Self { rules }
    }

    pub fn with_defaults() -> Self {
        Self::new(Vec::new())
    }

    /// Map a path (and, for ambiguous script files, its content) to a
    /// category. Total: unknown extensions yield `Category::Unclassified`.
    pub fn classify(&self, path: &Path, content: Option<&str>) -> Category {
        let extension = lowercase_extension(path);
        let extension = extension.as_str();

        if STYLE_EXTENSIONS.contains(&extension) {
            return Category::Style;
        }
        if TEMPLATE_EXTENSIONS.contains(&extension) {
            return Category::Template;
        }
        if !SCRIPT_EXTENSIONS.contains(&extension) {
            return Category::Unclassified;
        }

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        for rule in &self.rules {
            if file_name.contains(&rule.suffix) {
                return Category::Definition(rule.kind);
            }
        }

        if let Some(content) = content {
            for (kind, tokens) in SNIFF_TABLE {
                if contains_any(content, tokens) {
                    return Category::Definition(*kind);
                }
            }
        }

        Category::Definition(DefinitionKind::Other)
    }

    /// Strip the first matching definition suffix from a file stem:
    /// `foo.component` → `foo`. Stems without a known suffix pass through.
    pub fn strip_suffix<'a>(&self, stem: &'a str) -> &'a str {
        for rule in &self.rules {
            let marker = rule.suffix.trim_end_matches('.');
            if !marker.is_empty() && stem.ends_with(marker) {
                return &stem[..stem.len() - marker.len()];
            }
        }
        stem
    }
}

fn lowercase_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
