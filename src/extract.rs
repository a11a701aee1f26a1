//! Declared-name extraction: per-subkind content patterns that pull the
//! registered identifier out of a definition file. Absence of a match is
//! not an error; display names fall back to the stripped file stem.

use regex::Regex;

use crate::classify::DefinitionKind;

/// Compiled per-subkind name patterns. Construct once per run.
pub struct NameExtractor {
    patterns: Vec<(DefinitionKind, Vec<Regex>)>,
}

impl NameExtractor {
    pub fn new() -> Self {
        let table: &[(DefinitionKind, &[&str])] = &[
            (
                DefinitionKind::Component,
                &[
                    r#"\.(?:component|controller)\(\s*['"]([^'"]+)['"]"#,
                    r#"selector\s*:\s*['"]([^'"]+)['"]"#,
                ],
            ),
            (
                DefinitionKind::Directive,
                &[
                    r#"\.directive\(\s*['"]([^'"]+)['"]"#,
                    r#"selector\s*:\s*['"]([^'"]+)['"]"#,
                ],
            ),
            (
                DefinitionKind::Service,
                &[r#"\.(?:service|factory|provider)\(\s*['"]([^'"]+)['"]"#],
            ),
            (
                DefinitionKind::Filter,
                &[r#"\.filter\(\s*['"]([^'"]+)['"]"#],
            ),
            (
                DefinitionKind::Module,
                &[r#"angular\.module\(\s*['"]([^'"]+)['"]"#],
            ),
        ];

        let patterns = table
            .iter()
            .map(|(kind, sources)| {
                let compiled = sources
                    .iter()
                    .map(|source| Regex::new(source).expect("builtin name pattern compiles"))
                    .collect();
                (*kind, compiled)
            })
            .collect();

        Self { patterns }
    }

    /// Extract the declared logical name for a file of the given subkind.
    /// Patterns are tried in order; the first capture wins.
    pub fn declared_name(&self, kind: DefinitionKind, content: &str) -> Option<String> {
        let (_, patterns) = self.patterns.iter().find(|(k, _)| *k == kind)?;
        for pattern in patterns {
            if let Some(captures) = pattern.captures(content) {
                if let Some(name) = captures.get(1) {
                    return Some(name.as_str().to_string());
                }
            }
        }
        None
    }
}

impl Default for NameExtractor {
    fn default() -> Self {
        Self::new()
    }
}
