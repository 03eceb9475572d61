//! Version extraction from the application entry script.
//!
//! The chat applications embed their release version as a plain assignment
//! in the client entry script (`APP_VERSION = "x.y.z"`). The bundler has no
//! other version source, so the pipeline scans the script text and falls
//! back to a sentinel when nothing usable is found.

use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

/// Sentinel used when no version declaration is present.
pub const DEFAULT_VERSION: &str = "0.0.0";

static VERSION_DECL: LazyLock<Regex> = LazyLock::new(|| {
    // Matches `APP_VERSION = "1.2.3"` with either quote style.
    Regex::new(r#"(?m)^\s*APP_VERSION\s*=\s*["']([^"']+)["']"#)
        .unwrap_or_else(|e| panic!("invalid version pattern: {e}"))
});

/// Extract the release version from a script's source text.
///
/// Returns [`DEFAULT_VERSION`] when the declaration is absent or does not
/// parse as a semantic version.
pub fn extract(source_text: &str) -> String {
    let Some(caps) = VERSION_DECL.captures(source_text) else {
        return DEFAULT_VERSION.to_string();
    };
    let candidate = &caps[1];

    match semver::Version::parse(candidate) {
        Ok(v) => v.to_string(),
        Err(e) => {
            log::warn!("ignoring malformed version declaration {candidate:?}: {e}");
            DEFAULT_VERSION.to_string()
        }
    }
}

/// Read a script and extract its release version.
///
/// An unreadable or missing script is treated like an absent declaration,
/// since the version is cosmetic metadata.
pub async fn extract_from_script(path: &Path) -> String {
    match tokio::fs::read_to_string(path).await {
        Ok(text) => extract(&text),
        Err(e) => {
            log::warn!(
                "could not read version source {}: {e}",
                path.display()
            );
            DEFAULT_VERSION.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_declared_version() {
        let script = "import sys\nAPP_VERSION = \"2.3.1\"\n\ndef main():\n    pass\n";
        assert_eq!(extract(script), "2.3.1");
    }

    #[test]
    fn single_quotes_are_accepted() {
        assert_eq!(extract("APP_VERSION = '1.0.4'\n"), "1.0.4");
    }

    #[test]
    fn missing_declaration_falls_back_to_sentinel() {
        assert_eq!(extract("import sys\nprint('hello')\n"), DEFAULT_VERSION);
    }

    #[test]
    fn malformed_version_falls_back_to_sentinel() {
        assert_eq!(extract("APP_VERSION = \"latest\"\n"), DEFAULT_VERSION);
    }

    #[test]
    fn commented_lookalikes_do_not_match() {
        assert_eq!(extract("# APP_VERSION = \"9.9.9\"\n"), DEFAULT_VERSION);
    }
}
