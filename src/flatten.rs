use std::path::Path;
use anyhow::{Context, Result, bail};
use globset::{Glob, GlobSet, GlobSetBuilder};
use walkdir::{DirEntry, WalkDir};

/// Glob patterns selecting the source files of a package.
pub const DEFAULT_INCLUDE: &[&str] = &["**/*.ts", "**/*.js"];

/// Glob patterns for dependency directories, build output, lockfiles and
/// source maps, which never belong in an uploaded package.
pub const DEFAULT_EXCLUDE: &[&str] = &[
    "node_modules/**",
    "**/dist/**",
    "**/build/**",
    "**/*.map",
    "package-lock.json",
    "yarn.lock",
];

/// Flattens a project directory into a single concatenated code string.
///
/// All regular files under `root` matching at least one include pattern and
/// no exclude pattern are concatenated in lexicographic relative-path order,
/// each preceded by a `// ===== FILE: <path> =====` delimiter line. Hidden
/// files and directories are never included.
///
/// The output is a pure function of the matched paths and their contents, so
/// re-running over an unchanged tree yields byte-identical output. Any
/// unreadable or non-UTF-8 file aborts the whole flatten; partial artifacts
/// are never produced.
pub fn flatten_project(root: &Path, include: &[&str], exclude: &[&str]) -> Result<String> {
    if !root.is_dir() {
        bail!("'{}' is not a directory", root.display());
    }
    let include_set = build_glob_set(include)?;
    let exclude_set = build_glob_set(exclude)?;

    let mut paths = Vec::new();
    let walker = WalkDir::new(root).into_iter().filter_entry(|e| !is_hidden(e));
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let rel = entry.path().strip_prefix(root)?;
        let rel = unix_path(rel);
        if include_set.is_match(&rel) && !exclude_set.is_match(&rel) {
            paths.push(rel);
        }
    }
    paths.sort();

    let mut flattened = String::new();
    for rel in &paths {
        let abs = root.join(rel);
        let content = std::fs::read_to_string(&abs)
            .with_context(|| format!("Failed reading project file '{}'", rel))?;
        flattened.push_str(&format!("\n// ===== FILE: {} =====\n{}\n", rel, content));
    }
    Ok(flattened.trim().to_string())
}

fn build_glob_set(patterns: &[&str]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)
            .with_context(|| format!("Invalid glob pattern '{}'", pattern))?);
    }
    builder.build().map_err(|e| e.into())
}

/// Relative path with forward slashes, for glob matching and delimiter lines.
fn unix_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn test_flatten_orders_by_path() {
        let dir = tempdir().unwrap();
        write(dir.path(), "b.ts", "b();");
        write(dir.path(), "a.ts", "a();");

        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        let a = out.find("// ===== FILE: a.ts =====").unwrap();
        let b = out.find("// ===== FILE: b.ts =====").unwrap();
        assert!(a < b);
    }

    #[test]
    fn test_flatten_is_deterministic() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/index.ts", "export {};");
        write(dir.path(), "src/lib.ts", "export const x = 1;");
        write(dir.path(), "main.js", "require('./src');");

        let first = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        let second = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_excluded_dirs_never_appear() {
        let dir = tempdir().unwrap();
        write(dir.path(), "index.ts", "ok");
        write(dir.path(), "node_modules/dep/index.ts", "nope");
        write(dir.path(), "sub/dist/out.js", "nope");
        write(dir.path(), "index.js.map", "nope");

        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert!(out.contains("// ===== FILE: index.ts ====="));
        assert!(!out.contains("node_modules"));
        assert!(!out.contains("dist"));
        assert!(!out.contains(".map"));
    }

    #[test]
    fn test_hidden_files_are_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "index.ts", "ok");
        write(dir.path(), ".hidden.ts", "nope");
        write(dir.path(), ".cache/gen.ts", "nope");

        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert!(out.contains("index.ts"));
        assert!(!out.contains("hidden"));
        assert!(!out.contains(".cache"));
    }

    #[test]
    fn test_non_matching_files_are_skipped() {
        let dir = tempdir().unwrap();
        write(dir.path(), "index.ts", "ok");
        write(dir.path(), "README.md", "nope");
        write(dir.path(), "package.json", "{}");

        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert!(!out.contains("README.md"));
        assert!(!out.contains("package.json"));
    }

    #[test]
    fn test_delimiter_carries_content() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.ts", "const a = 1;\n");

        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert_eq!(out, "// ===== FILE: a.ts =====\nconst a = 1;");
    }

    #[test]
    fn test_missing_root_fails() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(flatten_project(&missing, DEFAULT_INCLUDE, DEFAULT_EXCLUDE).is_err());
    }

    #[test]
    fn test_non_utf8_file_aborts() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.ts", "fine");
        std::fs::write(dir.path().join("bad.ts"), [0xff, 0xfe, 0x00]).unwrap();

        assert!(flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).is_err());
    }
}
