use crate::config::AppConfig;
use camino::Utf8Path;
use regex::Regex;
use serde_json::Value;
use std::fs;

/// Detects a version token for a source tree.
///
/// In manual mode the configured string is returned as-is (trimmed). In
/// auto mode the configured candidate files are scanned in order and the
/// first one that yields a token wins; versions live in heterogeneous
/// ecosystem formats, so this is a best-effort heuristic rather than a
/// strict parser. Any read or parse error on a candidate is swallowed and
/// the scan moves on: absence of a version must never block a backup.
pub struct VersionResolver;

impl VersionResolver {
    pub fn resolve(config: &AppConfig, source: &Utf8Path) -> String {
        if config.version_mode.trim().eq_ignore_ascii_case("manual") {
            return config.manual_version.trim().to_string();
        }

        for name in &config.preferred_version_files {
            let path = source.join(name);
            if !path.is_file() {
                continue;
            }

            let token = if name == "package.json" {
                Self::manifest_version(&path)
            } else {
                fs::read_to_string(&path)
                    .ok()
                    .and_then(|text| Self::extract_from_text(&text))
            };

            if let Some(token) = token {
                return Self::normalize(&token);
            }
        }

        String::new()
    }

    /// Pulls a non-empty `version` field out of a JSON manifest.
    fn manifest_version(path: &Utf8Path) -> Option<String> {
        let text = fs::read_to_string(path).ok()?;
        let json: Value = serde_json::from_str(&text).ok()?;

        let raw = match json.get("version")? {
            Value::String(s) => s.trim().to_string(),
            Value::Number(n) => n.to_string(),
            _ => return None,
        };

        (!raw.is_empty()).then_some(raw)
    }

    /// Tries the known version notations in order; first match wins.
    /// Covers `version = "1.2.3"`, `__version__ = '0.9.1'`,
    /// `tool.poetry.version = "x.y.z"`, an unquoted `version = 1.2.3`
    /// line, and a line holding a bare version-looking token.
    fn extract_from_text(text: &str) -> Option<String> {
        const PATTERNS: [&str; 4] = [
            r#"(?i)(?:__version__|version)\s*[:=]\s*["']([^"']+)["']"#,
            r#"(?i)tool\.poetry\.version\s*=\s*["']([^"']+)["']"#,
            r"(?im)^\s*version\s*=\s*(\S+)\s*$",
            r"(?m)^\s*([0-9]+(?:[.\-][0-9A-Za-z]+)*)\s*$",
        ];

        PATTERNS.iter().find_map(|pattern| {
            Regex::new(pattern)
                .ok()
                .and_then(|re| re.captures(text))
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str().to_string())
        })
    }

    /// Makes a raw token filename-safe: trims surrounding whitespace,
    /// strips one leading `v`/`V`, and replaces space, `/`, `:` and `.`
    /// with `-`. Idempotent on its own output.
    pub fn normalize(raw: &str) -> String {
        let trimmed = raw.trim();
        let stripped = trimmed.strip_prefix(['v', 'V']).unwrap_or(trimmed);

        stripped
            .chars()
            .map(|c| match c {
                ' ' | '/' | ':' | '.' => '-',
                other => other,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_v_prefix_and_dots() {
        assert_eq!(VersionResolver::normalize("v1.2.3"), "1-2-3");
        assert_eq!(VersionResolver::normalize("V2.0"), "2-0");
    }

    #[test]
    fn normalize_replaces_separators() {
        assert_eq!(VersionResolver::normalize(" 2.0/beta "), "2-0-beta");
        assert_eq!(VersionResolver::normalize("Build 7"), "Build-7");
        assert_eq!(VersionResolver::normalize("12:30"), "12-30");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = VersionResolver::normalize("v1.2.3-rc 1");
        assert_eq!(VersionResolver::normalize(&once), once);
    }

    #[test]
    fn extract_prefers_quoted_assignment() {
        let text = "name = \"demo\"\nversion = \"0.4.1\"\n";
        assert_eq!(
            VersionResolver::extract_from_text(text).as_deref(),
            Some("0.4.1")
        );
    }

    #[test]
    fn extract_handles_dunder_version() {
        let text = "__version__ = '0.9.1'\n";
        assert_eq!(
            VersionResolver::extract_from_text(text).as_deref(),
            Some("0.9.1")
        );
    }

    #[test]
    fn extract_handles_unquoted_assignment() {
        assert_eq!(
            VersionResolver::extract_from_text("version = 1.2.3\n").as_deref(),
            Some("1.2.3")
        );
    }

    #[test]
    fn extract_handles_bare_token_line() {
        assert_eq!(
            VersionResolver::extract_from_text("2.5.1-rc1\n").as_deref(),
            Some("2.5.1-rc1")
        );
    }

    #[test]
    fn extract_rejects_prose() {
        assert!(VersionResolver::extract_from_text("release notes\n").is_none());
    }
}
