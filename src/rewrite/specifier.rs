//! Module specifier conversion.
//!
//! Only local paths are touched: a specifier must start with one of
//! [`LOCAL_PREFIXES`]. The remainder is split on `/`; the last segment is
//! converted as a module name and the others as directory names, using the
//! final (marker-free) form so the result matches the renamed tree.
//!
//! Relative specifiers (`./`, `../`) are additionally checked against the
//! tree on disk, which is final by the time references are rewritten. Each
//! segment takes whichever candidate spelling names an existing entry, so a
//! reference only changes when its target really was renamed. Alias
//! specifiers cannot be resolved here and use the plain conversion.

use crate::convert::{SegmentConverter, split_extension};
use crate::rewrite::references::Dialect;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Prefixes identifying imports of local files.
pub const LOCAL_PREFIXES: &[&str] = &["./", "../", "~/", "@/", "@src", "@repo", "@mono", "#"];

/// Non-source extensions that appear in module specifiers.
const ASSET_EXTENSIONS: &[&str] = &[
    ".json", ".css", ".scss", ".sass", ".less", ".svg", ".png", ".jpg", ".jpeg", ".gif",
    ".webp", ".avif", ".ico", ".md", ".mdx", ".html", ".vue", ".svelte", ".wasm", ".txt",
    ".yaml", ".yml", ".graphql", ".gql", ".woff", ".woff2",
];

/// Returns the matching local prefix of `specifier`, if any.
pub fn local_prefix(specifier: &str) -> Option<&'static str> {
    LOCAL_PREFIXES
        .iter()
        .copied()
        .find(|prefix| specifier.starts_with(prefix))
}

/// True for extensions a specifier may legitimately end with.
///
/// Anything else after the last dot is part of the name (`./User.Model`).
pub fn is_module_extension(ext: &str) -> bool {
    let lower = ext.to_ascii_lowercase();
    Dialect::SOURCE_EXTENSIONS.contains(&lower.as_str()) || ASSET_EXTENSIONS.contains(&lower.as_str())
}

/// Final form of the last specifier segment read as a module name.
fn convert_module_name(segment: &str, converter: &SegmentConverter) -> String {
    let (base, ext) = split_extension(segment);
    if is_module_extension(ext) {
        converter.final_parts(base, ext)
    } else {
        converter.final_parts(segment, "")
    }
}

/// Converts a module specifier without looking at the file system.
/// Returns `None` when nothing changes.
pub fn rewrite_specifier(specifier: &str, converter: &SegmentConverter) -> Option<String> {
    let prefix = local_prefix(specifier)?;
    let rest = &specifier[prefix.len()..];

    let segments: Vec<&str> = rest.split('/').collect();
    let last = segments.len() - 1;

    let converted: Vec<String> = segments
        .iter()
        .enumerate()
        .map(|(idx, segment)| {
            if idx == last {
                convert_module_name(segment, converter)
            } else {
                converter.final_segment(segment)
            }
        })
        .collect();

    let rewritten = format!("{}{}", prefix, converted.join("/"));
    (rewritten != specifier).then_some(rewritten)
}

/// Converts a specifier found in a file inside `importer_dir`.
///
/// Relative specifiers that resolve on disk follow the entries actually
/// present; everything else falls back to [`rewrite_specifier`].
pub fn rewrite_specifier_in(
    importer_dir: &Path,
    specifier: &str,
    converter: &SegmentConverter,
) -> Option<String> {
    match resolve_relative(importer_dir, specifier, converter) {
        Some(resolved) => (resolved != specifier).then_some(resolved),
        None => rewrite_specifier(specifier, converter),
    }
}

/// Rebuilds a relative specifier from the names present on disk. `None` when
/// the specifier is not relative or some segment matches no entry.
fn resolve_relative(
    importer_dir: &Path,
    specifier: &str,
    converter: &SegmentConverter,
) -> Option<String> {
    let prefix = ["./", "../"]
        .into_iter()
        .find(|p| specifier.starts_with(p))?;

    let mut dir: PathBuf = importer_dir.join(prefix);
    let segments: Vec<&str> = specifier[prefix.len()..].split('/').collect();
    let last = segments.len() - 1;
    let mut resolved = Vec::with_capacity(segments.len());

    for (idx, segment) in segments.iter().enumerate() {
        if matches!(*segment, "" | "." | "..") {
            dir.push(segment);
            resolved.push(segment.to_string());
            continue;
        }

        let entries = entry_names(&dir)?;
        let chosen = if idx == last {
            [
                convert_module_name(segment, converter),
                converter.final_segment(segment),
                segment.to_string(),
            ]
            .into_iter()
            .find(|candidate| names_module(&entries, candidate))?
        } else {
            [converter.final_segment(segment), segment.to_string()]
                .into_iter()
                .find(|candidate| entries.contains(candidate))?
        };

        dir.push(&chosen);
        resolved.push(chosen);
    }

    Some(format!("{}{}", prefix, resolved.join("/")))
}

/// Exact (case-sensitive) entry names of `dir`.
fn entry_names(dir: &Path) -> Option<BTreeSet<String>> {
    let entries = fs::read_dir(dir).ok()?;
    Some(
        entries
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect(),
    )
}

/// True when `candidate` names an entry directly or with a module extension
/// appended (`./button` → `button.tsx`, `button.d.ts`).
fn names_module(entries: &BTreeSet<String>, candidate: &str) -> bool {
    entries.iter().any(|name| {
        name == candidate
            || name
                .strip_prefix(candidate)
                .filter(|rest| rest.starts_with('.'))
                .and_then(|rest| rest.rfind('.').map(|idx| &rest[idx..]))
                .is_some_and(is_module_extension)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::casing::Casing;
    use tempfile::TempDir;

    fn kebab(specifier: &str) -> Option<String> {
        rewrite_specifier(specifier, &SegmentConverter::new(Casing::Kebab))
    }

    fn snake(specifier: &str) -> Option<String> {
        rewrite_specifier(specifier, &SegmentConverter::new(Casing::Snake))
    }

    fn on_disk(root: &Path, specifier: &str) -> Option<String> {
        rewrite_specifier_in(root, specifier, &SegmentConverter::new(Casing::Kebab))
    }

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_relative_file_reference() {
        assert_eq!(kebab("./MyComponent").as_deref(), Some("./my-component"));
        assert_eq!(
            kebab("../Shared/UserCard.tsx").as_deref(),
            Some("../shared/user-card.tsx")
        );
    }

    #[test]
    fn test_case_only_segments_resolve_to_final_names() {
        assert_eq!(kebab("./Components/Foo").as_deref(), Some("./components/foo"));
    }

    #[test]
    fn test_parent_traversal_segments_kept() {
        assert_eq!(
            kebab("../../Lib/HttpClient").as_deref(),
            Some("../../lib/http-client")
        );
    }

    #[test]
    fn test_alias_prefixes() {
        assert_eq!(kebab("@/Hooks/UseAuth").as_deref(), Some("@/hooks/use-auth"));
        assert_eq!(kebab("~/Utils/FormatDate").as_deref(), Some("~/utils/format-date"));
        assert_eq!(kebab("@src/Api/Client").as_deref(), Some("@src/api/client"));
        assert_eq!(kebab("#Internal/Thing").as_deref(), Some("#internal/thing"));
    }

    #[test]
    fn test_bare_packages_untouched() {
        assert_eq!(kebab("react"), None);
        assert_eq!(kebab("@tanstack/ReactQuery"), None);
        assert_eq!(kebab("lodash/camelCase"), None);
    }

    #[test]
    fn test_route_segments_preserved() {
        assert_eq!(
            kebab("./pages/[postId]/PostView").as_deref(),
            Some("./pages/[postId]/post-view")
        );
        assert_eq!(kebab("./pages/[postId]"), None);
    }

    #[test]
    fn test_all_caps_last_segment_preserved() {
        assert_eq!(kebab("./Docs/README.md").as_deref(), Some("./docs/README.md"));
    }

    #[test]
    fn test_dotted_name_without_extension() {
        assert_eq!(kebab("./User.Model").as_deref(), Some("./user.model"));
        assert_eq!(kebab("./Styles.module.css").as_deref(), Some("./styles.module.css"));
        assert_eq!(kebab("./Data.JSON").as_deref(), Some("./data.JSON"));
    }

    #[test]
    fn test_already_converted_is_none() {
        assert_eq!(kebab("./components/user-card"), None);
        assert_eq!(kebab("./index.js"), None);
    }

    #[test]
    fn test_snake_casing() {
        assert_eq!(
            snake("./UserProfile/AvatarImage").as_deref(),
            Some("./user_profile/avatar_image")
        );
    }

    #[test]
    fn test_local_prefix_lookup() {
        assert_eq!(local_prefix("../x"), Some("../"));
        assert_eq!(local_prefix("./x"), Some("./"));
        assert_eq!(local_prefix("x"), None);
    }

    #[test]
    fn test_directory_import_follows_renamed_folder() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "ui/button.tsx");

        assert_eq!(on_disk(temp.path(), "./UI").as_deref(), Some("./ui"));
        assert_eq!(on_disk(temp.path(), "./UI/Button").as_deref(), Some("./ui/button"));
    }

    #[test]
    fn test_dotted_module_follows_renamed_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "user.model.ts");

        assert_eq!(on_disk(temp.path(), "./User.Model").as_deref(), Some("./user.model"));
    }

    #[test]
    fn test_unrenamed_target_keeps_reference() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "Widget.tsx");

        assert_eq!(on_disk(temp.path(), "./Widget"), None);
    }

    #[test]
    fn test_parent_specifier_resolved_from_importer() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "lib/http-client.ts");
        touch(temp.path(), "app/main.ts");

        assert_eq!(
            on_disk(&temp.path().join("app"), "../Lib/HttpClient").as_deref(),
            Some("../lib/http-client")
        );
    }

    #[test]
    fn test_unresolvable_specifier_uses_plain_conversion() {
        let temp = TempDir::new().unwrap();

        assert_eq!(
            on_disk(temp.path(), "./Missing/ThingOne").as_deref(),
            Some("./missing/thing-one")
        );
        assert_eq!(on_disk(temp.path(), "@/Hooks/UseAuth").as_deref(), Some("@/hooks/use-auth"));
    }
}
