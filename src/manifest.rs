//! Reading and rewriting the `project.version` field of a TOML manifest.
//!
//! Reading goes through a full TOML parse. Rewriting works on the raw text so
//! that comments, ordering and whitespace survive untouched: exactly one line
//! is changed, and only the quoted value on that line.

use crate::error::{BumpError, Result};
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    project: Option<ProjectTable>,
}

#[derive(Debug, Deserialize)]
struct ProjectTable {
    version: Option<toml::Value>,
}

/// Extracts `project.version` from manifest text.
///
/// # Returns
/// * `Ok(String)` - The raw version string (not validated as semver)
/// * `Err(BumpError::Parse)` - If the text is not TOML, or the field is missing or not a string
pub fn read_version(content: &str) -> Result<String> {
    let document: ManifestDocument =
        toml::from_str(content).map_err(|e| BumpError::parse(e.to_string()))?;

    let project = document
        .project
        .ok_or_else(|| BumpError::parse("missing [project] table"))?;

    match project.version {
        Some(toml::Value::String(version)) => Ok(version),
        Some(other) => Err(BumpError::parse(format!(
            "project.version must be a string, found {}",
            other.type_str()
        ))),
        None => Err(BumpError::parse("missing project.version field")),
    }
}

/// Replaces the value of `project.version` in `content` with `new_version`.
///
/// Matches either a `version = "..."` line inside the `[project]` table or a
/// root-level `project.version = "..."` dotted key. The quote style and any
/// trailing comment on the line are kept. Every other byte of the input is
/// returned unchanged.
///
/// `manifest_name` is only used in the error message.
pub fn rewrite_version(content: &str, new_version: &str, manifest_name: &str) -> Result<String> {
    let header_re = Regex::new(r"^\s*(\[\[?)\s*([^\[\]]+?)\s*\]\]?\s*(?:#.*)?$")
        .map_err(|e| BumpError::parse(e.to_string()))?;
    let version_re = Regex::new(
        r#"^(\s*)((?:project\s*\.\s*)?version)(\s*=\s*)(?:"([^"]*)"|'([^']*)')(\s*(?:#.*)?)$"#,
    )
    .map_err(|e| BumpError::parse(e.to_string()))?;

    let mut output = String::with_capacity(content.len() + new_version.len());
    // None while still in the root table.
    let mut current_table: Option<String> = None;
    let mut replaced = false;

    for line in content.split_inclusive('\n') {
        if replaced {
            output.push_str(line);
            continue;
        }

        let (body, ending) = split_line_ending(line);

        if let Some(caps) = header_re.captures(body) {
            current_table = if &caps[1] == "[" {
                Some(caps[2].to_string())
            } else {
                Some(format!("[{}]", &caps[2]))
            };
            output.push_str(line);
            continue;
        }

        if let Some(caps) = version_re.captures(body) {
            let key_is_dotted = caps[2].starts_with("project");
            let in_scope = match current_table.as_deref() {
                Some("project") => !key_is_dotted,
                None => key_is_dotted,
                Some(_) => false,
            };

            if in_scope {
                let quote = if caps.get(4).is_some() { '"' } else { '\'' };
                output.push_str(&caps[1]);
                output.push_str(&caps[2]);
                output.push_str(&caps[3]);
                output.push(quote);
                output.push_str(new_version);
                output.push(quote);
                output.push_str(&caps[6]);
                output.push_str(ending);
                replaced = true;
                continue;
            }
        }

        output.push_str(line);
    }

    if !replaced {
        return Err(BumpError::VersionLineNotFound(manifest_name.to_string()));
    }

    Ok(output)
}

fn split_line_ending(line: &str) -> (&str, &str) {
    if let Some(body) = line.strip_suffix("\r\n") {
        (body, "\r\n")
    } else if let Some(body) = line.strip_suffix('\n') {
        (body, "\n")
    } else {
        (line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"# build metadata
[build-system]
requires = ["setuptools>=61"]
version = "9.9.9"

[project]
name = "demo"
version = "0.1.0"   # keep in sync
description = "a demo"

[tool.other]
version = "1.0.0"
"#;

    #[test]
    fn test_read_version() {
        assert_eq!(read_version(PYPROJECT).unwrap(), "0.1.0");
    }

    #[test]
    fn test_read_version_missing_field() {
        let err = read_version("[project]\nname = \"demo\"\n").unwrap_err();
        assert!(err.to_string().contains("missing project.version"));
    }

    #[test]
    fn test_read_version_missing_table() {
        let err = read_version("[tool]\nversion = \"1.0.0\"\n").unwrap_err();
        assert!(err.to_string().contains("[project]"));
    }

    #[test]
    fn test_read_version_not_a_string() {
        let err = read_version("[project]\nversion = 3\n").unwrap_err();
        assert!(err.to_string().contains("must be a string"));
    }

    #[test]
    fn test_read_version_invalid_toml() {
        assert!(matches!(
            read_version("[project\nversion = "),
            Err(BumpError::Parse(_))
        ));
    }

    #[test]
    fn test_rewrite_touches_only_project_version() {
        let updated = rewrite_version(PYPROJECT, "0.1.1", "pyproject.toml").unwrap();

        assert_eq!(read_version(&updated).unwrap(), "0.1.1");
        assert_eq!(
            updated,
            PYPROJECT.replace(
                "version = \"0.1.0\"   # keep in sync",
                "version = \"0.1.1\"   # keep in sync"
            )
        );
        assert!(updated.contains("version = \"9.9.9\""));
        assert!(updated.contains("version = \"1.0.0\""));
    }

    #[test]
    fn test_rewrite_round_trip_only_version_differs() {
        let updated = rewrite_version(PYPROJECT, "0.2.0", "pyproject.toml").unwrap();

        let mut before: toml::Value = toml::from_str(PYPROJECT).unwrap();
        let after: toml::Value = toml::from_str(&updated).unwrap();
        before["project"]["version"] = toml::Value::String("0.2.0".to_string());
        assert_eq!(before, after);
    }

    #[test]
    fn test_rewrite_preserves_crlf_and_single_quotes() {
        let content = "[project]\r\nname = 'demo'\r\nversion = '1.2.3'\r\n";
        let updated = rewrite_version(content, "1.2.4", "pyproject.toml").unwrap();
        assert_eq!(updated, "[project]\r\nname = 'demo'\r\nversion = '1.2.4'\r\n");
    }

    #[test]
    fn test_rewrite_root_dotted_key() {
        let content = "project.version = \"2.0.0\"\nproject.name = \"demo\"\n";
        let updated = rewrite_version(content, "2.0.1", "pyproject.toml").unwrap();
        assert_eq!(
            updated,
            "project.version = \"2.0.1\"\nproject.name = \"demo\"\n"
        );
    }

    #[test]
    fn test_rewrite_without_trailing_newline() {
        let updated = rewrite_version("[project]\nversion = \"0.0.1\"", "0.0.2", "m").unwrap();
        assert_eq!(updated, "[project]\nversion = \"0.0.2\"");
    }

    #[test]
    fn test_rewrite_only_first_match() {
        let content = "[project]\nversion = \"1.0.0\"\nversion = \"1.0.0\"\n";
        let updated = rewrite_version(content, "1.0.1", "m").unwrap();
        assert_eq!(updated, "[project]\nversion = \"1.0.1\"\nversion = \"1.0.0\"\n");
    }

    #[test]
    fn test_rewrite_fails_when_line_missing() {
        let content = "[tool.poetry]\nversion = \"1.0.0\"\n";
        let err = rewrite_version(content, "1.0.1", "pyproject.toml").unwrap_err();
        assert!(matches!(err, BumpError::VersionLineNotFound(ref name) if name == "pyproject.toml"));
    }

    #[test]
    fn test_rewrite_ignores_array_tables_named_project() {
        let content = "[[project]]\nversion = \"1.0.0\"\n";
        assert!(rewrite_version(content, "1.0.1", "m").is_err());
    }
}
