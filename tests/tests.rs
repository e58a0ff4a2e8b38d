use std::path::Path;
use tempfile::TempDir;
use packit::flatten::{DEFAULT_EXCLUDE, DEFAULT_INCLUDE, flatten_project};
use packit::key::{parse_key, resolve_key};
use packit::manifest::PackageManifest;

fn setup_project() -> TempDir {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "package.json", r#"{"name": "my-bot", "version": "1.0.0"}"#);
    write(dir.path(), "src/index.ts", "import './util';\n");
    write(dir.path(), "src/util.ts", "export const answer = 42;\n");
    write(dir.path(), "node_modules/dep/index.js", "module.exports = {};\n");
    dir
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flatten_full_project() {
        let dir = setup_project();
        let out = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();

        assert!(out.contains("// ===== FILE: src/index.ts ====="));
        assert!(out.contains("// ===== FILE: src/util.ts ====="));
        assert!(out.contains("export const answer = 42;"));
        // Dependencies never appear, even though *.js matches the includes.
        assert!(!out.contains("node_modules"));
        // package.json itself is not a source file.
        assert!(!out.contains("my-bot"));
    }

    #[test]
    fn test_flatten_repeat_is_byte_identical() {
        let dir = setup_project();
        let first = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        let second = flatten_project(dir.path(), DEFAULT_INCLUDE, DEFAULT_EXCLUDE).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_manifest_to_key_pipeline() {
        let dir = setup_project();
        let manifest = PackageManifest::load(dir.path().join("package.json")).unwrap();
        manifest.validate().unwrap();

        let key = resolve_key(&manifest.name, &manifest.version);
        assert_eq!(key, "my-bot<1.0.0>");
        let (name, version) = parse_key(&key).unwrap();
        assert_eq!(name, manifest.name);
        assert_eq!(version, manifest.version);
    }
}
