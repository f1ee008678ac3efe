//! Per-segment path conversion.
//!
//! Decides, for one directory name or file name, whether it is converted and
//! to what. A conversion that only changes letter case (`Foo` → `foo`) cannot
//! be applied as a single rename on case-insensitive filesystems, so it is
//! emitted with [`TEMP_MARKER`] appended and finished by a second pass.
//!
//! The renamer and the import rewriter share this module so that on-disk names
//! and in-source references agree byte for byte.

use crate::casing::Casing;

/// Suffix carried by a name whose case-only rename is still pending.
pub const TEMP_MARKER: &str = "__tmp";

/// Leading characters that mark a segment as hands-off.
const PRESERVE_PREFIXES: &[char] = &['[', '_'];

/// Applies a [`Casing`] to path segments with the preservation rules.
#[derive(Debug, Clone, Copy)]
pub struct SegmentConverter {
    casing: Casing,
}

impl SegmentConverter {
    pub fn new(casing: Casing) -> Self {
        Self { casing }
    }

    /// Converts a directory name (or extension-less base name).
    ///
    /// Returns the segment unchanged when it is preserved, already converted,
    /// or still carrying a pending marker from an earlier pass.
    pub fn convert_segment(&self, segment: &str) -> String {
        if is_preserved(segment) || segment.ends_with(TEMP_MARKER) {
            return segment.to_string();
        }

        let converted = self.casing.apply(segment);
        if converted == segment {
            segment.to_string()
        } else if converted.to_lowercase() == segment.to_lowercase() {
            format!("{converted}{TEMP_MARKER}")
        } else {
            converted
        }
    }

    /// Converts a file name, leaving its extension untouched.
    ///
    /// Names whose base starts with `_` or is entirely uppercase (`README.md`)
    /// are kept as is.
    pub fn convert_file_name(&self, file_name: &str) -> String {
        let (base, ext) = split_extension(file_name);
        self.convert_parts(base, ext)
    }

    /// Converts a file name already split into base and extension.
    pub fn convert_parts(&self, base: &str, ext: &str) -> String {
        if base.starts_with('_') || is_all_caps(base) {
            return format!("{base}{ext}");
        }

        format!("{}{}", self.convert_segment(base), ext)
    }

    /// The segment as it reads once every pass has run.
    pub fn final_segment(&self, segment: &str) -> String {
        let converted = self.convert_segment(segment);
        match strip_segment_marker(&converted) {
            Some(stripped) => stripped.to_string(),
            None => converted,
        }
    }

    /// The file name as it reads once every pass has run.
    pub fn final_file_name(&self, file_name: &str) -> String {
        let (base, ext) = split_extension(file_name);
        self.final_parts(base, ext)
    }

    /// [`final_file_name`](Self::final_file_name) for a pre-split name.
    pub fn final_parts(&self, base: &str, ext: &str) -> String {
        let converted = self.convert_parts(base, ext);
        let stripped = converted
            .strip_suffix(ext)
            .and_then(strip_segment_marker)
            .map(|b| format!("{b}{ext}"));
        stripped.unwrap_or(converted)
    }
}

/// True for segments that are never converted (`[slug]`, `_app`).
pub fn is_preserved(segment: &str) -> bool {
    segment.starts_with(PRESERVE_PREFIXES)
}

fn is_all_caps(base: &str) -> bool {
    base.chars().any(char::is_uppercase) && !base.chars().any(char::is_lowercase)
}

/// Splits `name` into base and extension the way Node's `path.extname` does:
/// the extension starts at the last dot, unless that dot leads the name.
pub fn split_extension(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) if idx > 0 && !name[..idx].chars().all(|c| c == '.') => {
            (&name[..idx], &name[idx..])
        }
        _ => (name, ""),
    }
}

/// Removes a trailing marker from a directory name.
pub fn strip_segment_marker(segment: &str) -> Option<&str> {
    segment
        .strip_suffix(TEMP_MARKER)
        .filter(|rest| !rest.is_empty())
}

/// Removes a trailing marker from a file's base name.
pub fn strip_file_marker(file_name: &str) -> Option<String> {
    let (base, ext) = split_extension(file_name);
    strip_segment_marker(base).map(|stripped| format!("{stripped}{ext}"))
}

/// True when `segment` contains the marker anywhere but as its suffix.
pub fn has_stray_marker(segment: &str) -> bool {
    match segment.strip_suffix(TEMP_MARKER) {
        Some(rest) => rest.contains(TEMP_MARKER),
        None => segment.contains(TEMP_MARKER),
    }
}

/// [`has_stray_marker`] applied to a file's base name.
pub fn file_has_stray_marker(file_name: &str) -> bool {
    has_stray_marker(split_extension(file_name).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kebab() -> SegmentConverter {
        SegmentConverter::new(Casing::Kebab)
    }

    fn snake() -> SegmentConverter {
        SegmentConverter::new(Casing::Snake)
    }

    #[test]
    fn test_delimiter_insertion_needs_no_marker() {
        assert_eq!(kebab().convert_file_name("MyComponent.tsx"), "my-component.tsx");
        assert_eq!(kebab().convert_segment("UserProfile"), "user-profile");
    }

    #[test]
    fn test_case_only_change_gets_marker() {
        assert_eq!(kebab().convert_file_name("Foo.ts"), "foo__tmp.ts");
        assert_eq!(kebab().convert_segment("Components"), "components__tmp");
        assert_eq!(snake().convert_segment("Foo_Bar"), "foo_bar__tmp");
    }

    #[test]
    fn test_unchanged_segment_returned_verbatim() {
        assert_eq!(kebab().convert_segment("already-kebab"), "already-kebab");
        assert_eq!(kebab().convert_file_name("index.ts"), "index.ts");
    }

    #[test]
    fn test_route_and_underscore_prefixes_preserved() {
        for converter in [kebab(), snake()] {
            assert_eq!(converter.convert_segment("[slugId]"), "[slugId]");
            assert_eq!(converter.convert_segment("[...catchAll]"), "[...catchAll]");
            assert_eq!(converter.convert_segment("_internalUtils"), "_internalUtils");
            assert_eq!(converter.convert_file_name("_App.tsx"), "_App.tsx");
            assert_eq!(converter.convert_file_name("[postId].tsx"), "[postId].tsx");
        }
    }

    #[test]
    fn test_all_caps_file_names_preserved() {
        assert_eq!(kebab().convert_file_name("README.md"), "README.md");
        assert_eq!(kebab().convert_file_name("CHANGELOG"), "CHANGELOG");
        assert_eq!(kebab().convert_file_name("API_V2.ts"), "API_V2.ts");
    }

    #[test]
    fn test_all_caps_directories_are_converted() {
        assert_eq!(kebab().convert_segment("UI"), "ui__tmp");
    }

    #[test]
    fn test_pending_marker_left_for_second_pass() {
        assert_eq!(kebab().convert_segment("foo__tmp"), "foo__tmp");
        assert_eq!(kebab().convert_file_name("foo__tmp.ts"), "foo__tmp.ts");
    }

    #[test]
    fn test_conversion_is_idempotent() {
        for name in ["MyComponent", "Foo", "some_file", "x", ""] {
            let once = kebab().convert_segment(name);
            assert_eq!(kebab().convert_segment(&once), once, "segment {name}");
            let final_once = kebab().final_segment(name);
            assert_eq!(kebab().final_segment(&final_once), final_once);
        }
    }

    #[test]
    fn test_final_forms_strip_marker() {
        assert_eq!(kebab().final_segment("Components"), "components");
        assert_eq!(kebab().final_file_name("Foo.ts"), "foo.ts");
        assert_eq!(kebab().final_file_name("MyComponent.tsx"), "my-component.tsx");
    }

    #[test]
    fn test_extension_split_matches_node_semantics() {
        assert_eq!(split_extension("Button.test.tsx"), ("Button.test", ".tsx"));
        assert_eq!(split_extension(".eslintrc"), (".eslintrc", ""));
        assert_eq!(split_extension(".eslintrc.js"), (".eslintrc", ".js"));
        assert_eq!(split_extension(".."), ("..", ""));
        assert_eq!(split_extension("Makefile"), ("Makefile", ""));
    }

    #[test]
    fn test_dotted_base_without_extension() {
        assert_eq!(kebab().final_parts("User.Model", ""), "user.model");
        assert_eq!(kebab().final_parts("User.Model", ".ts"), "user.model.ts");
        assert_eq!(kebab().final_parts("README", ".md"), "README.md");
    }

    #[test]
    fn test_marker_stripping() {
        assert_eq!(strip_segment_marker("foo__tmp"), Some("foo"));
        assert_eq!(strip_segment_marker("foo"), None);
        assert_eq!(strip_segment_marker("__tmp"), None);
        assert_eq!(strip_file_marker("foo__tmp.ts"), Some("foo.ts".to_string()));
        assert_eq!(strip_file_marker("foo.ts"), None);
    }

    #[test]
    fn test_stray_marker_detection() {
        assert!(!has_stray_marker("foo__tmp"));
        assert!(!has_stray_marker("foo"));
        assert!(has_stray_marker("foo__tmpbar"));
        assert!(has_stray_marker("a__tmpb__tmp"));
        assert!(file_has_stray_marker("foo__tmp-old.ts"));
        assert!(!file_has_stray_marker("foo__tmp.ts"));
    }
}
