//! Filename sanitization and extension policy.
//!
//! `sanitize` turns an arbitrary user-supplied string into a filesystem-safe
//! name; it is total (worst case yields an empty string) and idempotent.
//! [`ExtensionPolicy`] decides whether a sanitized name already carries a
//! recognized extension, appending the default `.md` otherwise.

/// Replacement for characters that are illegal in file names.
const REPLACEMENT: char = '-';

/// Maximum filename length in bytes (common filesystem limit).
const MAX_FILENAME_BYTES: usize = 255;

/// Extensions of code-like companion formats that are always accepted
/// alongside the configured document extensions.
pub const CODE_EXTENSIONS: &[&str] = &[".yml", ".yaml", ".tex"];

/// The extension appended to names without a recognized one.
pub const DEFAULT_EXTENSION: &str = ".md";

fn is_illegal(c: char) -> bool {
    matches!(c, '/' | '\\' | '?' | '<' | '>' | ':' | '*' | '|' | '"') || c.is_control()
}

fn is_reserved_windows_name(stem: &str) -> bool {
    let stem = stem.to_ascii_lowercase();
    match stem.as_str() {
        "con" | "prn" | "aux" | "nul" => true,
        _ => {
            (stem.starts_with("com") || stem.starts_with("lpt"))
                && stem.len() == 4
                && stem.as_bytes()[3].is_ascii_digit()
        }
    }
}

/// Turn an arbitrary string into a filesystem-safe file name.
///
/// Characters illegal in file names are replaced with `-`, trailing dots and
/// spaces are stripped, reserved Windows device names are emptied out, and
/// the result is truncated to 255 bytes. Deterministic and total; the worst
/// case is an empty string, which callers must treat as an invalid name.
pub fn sanitize(raw: &str) -> String {
    let mut name: String = raw
        .chars()
        .map(|c| if is_illegal(c) { REPLACEMENT } else { c })
        .collect();

    // Truncate before stripping: cutting the name can itself expose a
    // trailing dot, so the strip must come last
    while name.len() > MAX_FILENAME_BYTES {
        name.pop();
    }

    // Trailing dots and spaces are not representable on Windows
    while name.ends_with('.') || name.ends_with(' ') {
        name.pop();
    }

    let stem = name.split('.').next().unwrap_or("");
    if is_reserved_windows_name(stem) {
        return String::new();
    }

    name
}

/// Extract the lowercase extension of a name, including the leading dot.
///
/// A leading dot alone (hidden files like `.gitignore`) does not count as
/// an extension, matching `path.extname` semantics.
fn extension_of(name: &str) -> Option<String> {
    match name.rfind('.') {
        Some(idx) if idx > 0 => Some(name[idx..].to_lowercase()),
        _ => None,
    }
}

/// Decides whether a file name already carries a recognized extension.
///
/// The system has one primary native document type (`.md`) but must also
/// accept a configured whitelist of companion formats without silently
/// mangling their names.
#[derive(Debug, Clone)]
pub struct ExtensionPolicy {
    allowed: Vec<String>,
}

impl ExtensionPolicy {
    /// Create a policy from the configured document-extension allow-list.
    /// Extensions are compared lowercased.
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            allowed: allowed
                .into_iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Append the default extension unless `name` already ends in an
    /// allowed or code-like extension.
    ///
    /// An unrecognized extension is treated as part of the stem, not
    /// stripped: `apply_default("notes.backup")` yields `notes.backup.md`.
    pub fn apply_default(&self, name: &str) -> String {
        let recognized = extension_of(name).is_some_and(|ext| {
            self.allowed.iter().any(|a| a == &ext) || CODE_EXTENSIONS.contains(&ext.as_str())
        });

        if recognized {
            name.to_string()
        } else {
            format!("{name}{DEFAULT_EXTENSION}")
        }
    }
}

impl Default for ExtensionPolicy {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_ALLOWED_FILETYPES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_replaces_illegal_chars() {
        assert_eq!(sanitize("a/b\\c:d"), "a-b-c-d");
        assert_eq!(sanitize("what?.md"), "what-.md");
        assert_eq!(sanitize("col<on>|pipe\"q"), "col-on--pipe-q");
    }

    #[test]
    fn test_sanitize_strips_control_chars() {
        assert_eq!(sanitize("a\u{0}b\nc"), "a-b-c");
    }

    #[test]
    fn test_sanitize_trailing_dots_and_spaces() {
        assert_eq!(sanitize("note. . ."), "note");
        assert_eq!(sanitize("note.md "), "note.md");
    }

    #[test]
    fn test_sanitize_reserved_names() {
        assert_eq!(sanitize("CON"), "");
        assert_eq!(sanitize("com1.md"), "");
        assert_eq!(sanitize("console"), "console");
        assert_eq!(sanitize("lpt"), "lpt");
    }

    #[test]
    fn test_sanitize_truncation_cannot_expose_trailing_dot() {
        // Truncation lands right after the dot; the strip must still run
        let raw = format!("{}.{}", "a".repeat(254), "b".repeat(10));
        let out = sanitize(&raw);
        assert_eq!(out, "a".repeat(254));
        assert_eq!(sanitize(&out), out);
    }

    #[test]
    fn test_sanitize_is_total_and_idempotent() {
        let long_with_dot = format!("{}.{}", "a".repeat(254), "b".repeat(10));
        for raw in [
            "",
            "   ",
            "///",
            "a?b*c",
            "CON",
            "日記/メモ",
            "x".repeat(400).as_str(),
            long_with_dot.as_str(),
        ] {
            let once = sanitize(raw);
            assert_eq!(sanitize(&once), once, "not idempotent for {raw:?}");
            assert!(once.len() <= MAX_FILENAME_BYTES);
            assert!(!once.chars().any(is_illegal));
        }
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let raw = "あ".repeat(200); // 600 bytes
        let out = sanitize(&raw);
        assert!(out.len() <= MAX_FILENAME_BYTES);
        assert!(out.chars().all(|c| c == 'あ'));
    }

    #[test]
    fn test_apply_default_appends_md() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.apply_default("note"), "note.md");
    }

    #[test]
    fn test_apply_default_keeps_allowed_extension() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.apply_default("readme.txt"), "readme.txt");
        assert_eq!(policy.apply_default("Note.MD"), "Note.MD");
    }

    #[test]
    fn test_apply_default_keeps_code_extension() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.apply_default("config.yaml"), "config.yaml");
        assert_eq!(policy.apply_default("paper.tex"), "paper.tex");
    }

    #[test]
    fn test_apply_default_unrecognized_extension_is_stem() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.apply_default("notes.backup"), "notes.backup.md");
        assert_eq!(policy.apply_default("archive.tar.gz"), "archive.tar.gz.md");
    }

    #[test]
    fn test_apply_default_hidden_file_has_no_extension() {
        let policy = ExtensionPolicy::default();
        assert_eq!(policy.apply_default(".gitignore"), ".gitignore.md");
    }
}
