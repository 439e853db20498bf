//! Snippet file parser
//!
//! Parses snippet files written in relaxed JSON (JSON5: comments, trailing
//! commas and unquoted keys are accepted):
//! ```jsonc
//! {
//!     // Entry name -> definition
//!     "Print to console": {
//!         "scope": "javascript,typescript",
//!         "prefix": "log",
//!         "body": ["console.log('$1');", "$2"],
//!         "description": "Log output to console",
//!     },
//! }
//! ```
//!
//! Entries keep their document order. Bodies are carried verbatim.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use tracing::debug;

use crate::domain::{
    InsertCommand, SnippetBody, SnippetPrefix, SnippetRecord, SnippetSource, split_scope,
};
use crate::error::SnippetError;
use crate::fs::SnippetFs;

/// One entry as written on disk
#[derive(Debug, Deserialize)]
struct RawSnippet {
    #[serde(default)]
    prefix: SnippetPrefix,
    #[serde(default)]
    body: SnippetBody,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    scope: Option<String>,
}

/// Top-level object decoded in document order
struct OrderedEntries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for OrderedEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = OrderedEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping snippet names to definitions")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries: Vec<(String, serde_json::Value)> =
                    Vec::with_capacity(map.size_hint().unwrap_or(0));
                let mut index: HashMap<String, usize> = HashMap::new();
                while let Some((key, value)) = map.next_entry::<String, serde_json::Value>()? {
                    // Later duplicates win but keep the first position
                    match index.get(&key) {
                        Some(&i) => entries[i].1 = value,
                        None => {
                            index.insert(key.clone(), entries.len());
                            entries.push((key, value));
                        }
                    }
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

/// Read and parse the file behind `source`
pub async fn parse_snippet_file(
    fs: &dyn SnippetFs,
    source: &Arc<SnippetSource>,
) -> Result<Vec<SnippetRecord>, SnippetError> {
    let content = fs
        .read_to_string(&source.path)
        .await
        .map_err(|e| SnippetError::FileRead {
            path: source.path.clone(),
            source: e,
        })?;
    parse_snippet_content(source, &content)
}

/// Parse snippet file content belonging to `source`
pub fn parse_snippet_content(
    source: &Arc<SnippetSource>,
    content: &str,
) -> Result<Vec<SnippetRecord>, SnippetError> {
    let content = content.trim_start_matches('\u{feff}');
    if content.trim().is_empty() {
        debug!("Empty snippet file {:?}", source.path);
        return Ok(Vec::new());
    }

    let OrderedEntries(entries) =
        json5::from_str(content).map_err(|e| parse_error(&source.path, e))?;

    let mut records = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let raw: RawSnippet = match serde_json::from_value(value) {
            Ok(raw) => raw,
            Err(e) => {
                debug!("Skipping entry '{}' in {:?}: {}", key, source.path, e);
                continue;
            }
        };
        records.push(build_record(source, key, raw));
    }

    Ok(records)
}

fn build_record(source: &Arc<SnippetSource>, key: String, raw: RawSnippet) -> SnippetRecord {
    // Contributed files are bound to the language they were declared for
    let scope = match (
        source.contributed_language(),
        raw.scope.as_deref().filter(|s| !s.is_empty()),
    ) {
        (Some(language), _) => split_scope(language),
        (None, Some(explicit)) => split_scope(explicit),
        (None, None) => source.default_scope().map(split_scope).unwrap_or_default(),
    };

    SnippetRecord {
        key,
        scope,
        prefix: raw.prefix,
        description: raw.description,
        command: InsertCommand::new(raw.body),
        source: Arc::clone(source),
    }
}

fn parse_error(path: &Path, err: json5::Error) -> SnippetError {
    SnippetError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dialect, SourceOrigin};
    use std::path::PathBuf;

    fn global_source(name: &str) -> Arc<SnippetSource> {
        let path = PathBuf::from(format!("/snippets/{}", name));
        let dialect = Dialect::from_path(&path).unwrap();
        Arc::new(SnippetSource::from_file(path, dialect, SourceOrigin::Global))
    }

    #[test]
    fn test_empty_content_yields_no_records() {
        let source = global_source("python.json");
        assert!(parse_snippet_content(&source, "").unwrap().is_empty());
        assert!(parse_snippet_content(&source, "  \n").unwrap().is_empty());
    }

    #[test]
    fn test_single_scope_file_defaults_to_label() {
        let source = global_source("python.json");
        let content = r#"{ "main": { "prefix": "main", "body": "if __name__ == '__main__':" } }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "main");
        assert_eq!(records[0].scope, vec!["python"]);
    }

    #[test]
    fn test_explicit_scope_is_split() {
        let source = global_source("shared.code-snippets");
        let content = r#"{
            "log": { "scope": "javascript,typescript", "prefix": "log", "body": "console.log()" },
            "todo": { "prefix": "todo", "body": "TODO" },
        }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records[0].scope, vec!["javascript", "typescript"]);
        assert!(records[1].scope.is_empty());
    }

    #[test]
    fn test_relaxed_json_with_comments() {
        let source = global_source("rust.json");
        let content = r#"
        // leading comment
        {
            /* block */
            fn_main: {
                prefix: ["main", "fnmain"],
                body: ["fn main() {", "    $0", "}",],
                description: 'entry point',
            },
        }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.key, "fn_main");
        assert_eq!(record.prefix.as_vec(), vec!["main", "fnmain"]);
        assert_eq!(record.description.as_deref(), Some("entry point"));
        assert_eq!(record.command.body.to_text(), "fn main() {\n    $0\n}");
    }

    #[test]
    fn test_entries_keep_document_order() {
        let source = global_source("go.json");
        let content = r#"{ "zeta": { "body": "z" }, "alpha": { "body": "a" }, "mid": { "body": "m" } }"#;

        let keys: Vec<String> = parse_snippet_content(&source, content)
            .unwrap()
            .into_iter()
            .map(|r| r.key)
            .collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_body_is_verbatim() {
        let source = global_source("shell.json");
        let content = r#"{ "var": { "body": "echo \"${1:name}\" \\$HOME" } }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(
            records[0].command.body,
            SnippetBody::Text("echo \"${1:name}\" \\$HOME".to_string())
        );
    }

    #[test]
    fn test_malformed_content_is_parse_error() {
        let source = global_source("broken.json");
        let err = parse_snippet_content(&source, "{ \"a\": ").unwrap_err();
        assert!(matches!(err, SnippetError::Parse { .. }));
    }

    #[test]
    fn test_non_object_top_level_is_parse_error() {
        let source = global_source("list.json");
        let err = parse_snippet_content(&source, "[1, 2]").unwrap_err();
        assert!(matches!(err, SnippetError::Parse { .. }));
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let source = global_source("mixed.code-snippets");
        let content = r#"{ "$schema": "x", "ok": { "body": "b" } }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].key, "ok");
    }

    #[test]
    fn test_contributed_source_always_uses_bundle_language() {
        let source = Arc::new(SnippetSource::contributed(
            "acme.go",
            "go",
            PathBuf::from("/ext/snippets/go.json"),
        ));
        let content = r#"{ "iferr": { "body": "if err != nil {}" }, "x": { "scope": "gomod", "body": "" } }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records[0].scope, vec!["go"]);
        assert_eq!(records[1].scope, vec!["go"]);
    }

    #[test]
    fn test_duplicate_keys_keep_first_position_last_value() {
        let source = global_source("go.json");
        let content = r#"{ "a": { "body": "1" }, "b": { "body": "2" }, "a": { "body": "3" } }"#;

        let records = parse_snippet_content(&source, content).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].key, "a");
        assert_eq!(records[0].command.body.to_text(), "3");
        assert_eq!(records[1].key, "b");
    }
}
