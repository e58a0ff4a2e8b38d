use std::path::{Path, PathBuf};
use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use walkdir::WalkDir;
use crate::error::PackitError;

/// Placeholder token substituted with the package name in a scaffolded manifest.
const PACKAGE_NAME_PLACEHOLDER: &str = "{{packageName}}";

/// Returns the directory holding the installed scaffolding templates.
///
/// `PACKIT_TEMPLATES_DIR` overrides the default per-user data location.
pub fn get_templates_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("PACKIT_TEMPLATES_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let proj_dirs = ProjectDirs::from("dev", "packit", "packit")
        .ok_or_else(|| anyhow!("Could not get project directories"))?;
    Ok(proj_dirs.data_dir().join("templates"))
}

/// Lists the names of the templates installed under `templates_dir`, sorted.
///
/// Returns an empty list when the directory is missing; the caller treats
/// "no templates at all" as a broken installation.
pub fn get_template_names(templates_dir: &Path) -> Result<Vec<String>> {
    if !templates_dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in std::fs::read_dir(templates_dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            names.push(entry.file_name().to_string_lossy().to_string());
        }
    }
    names.sort();
    Ok(names)
}

/// Scaffolds a new package at `target_dir` from the named template.
///
/// The template tree is copied verbatim, then the `{{packageName}}`
/// placeholder in the copied `package.json` is replaced with `package_name`.
/// An existing target is an error unless `force` is set, in which case the
/// previous contents are removed entirely before copying; there is no
/// partial merge.
pub fn copy_template(
    templates_dir: &Path,
    package_name: &str,
    target_dir: &Path,
    template_name: &str,
    force: bool,
) -> Result<()> {
    let template_dir = templates_dir.join(template_name);
    if !template_dir.is_dir() {
        return Err(PackitError::TemplateNotFound(template_name.to_string()).into());
    }

    if target_dir.exists() {
        if !force {
            return Err(PackitError::TargetExists(target_dir.to_path_buf()).into());
        }
        std::fs::remove_dir_all(target_dir)
            .with_context(|| format!("Could not remove '{}'", target_dir.display()))?;
    }

    copy_dir(&template_dir, target_dir)?;

    let manifest_path = target_dir.join(crate::util::MANIFEST_FILE_NAME);
    if manifest_path.is_file() {
        let text = std::fs::read_to_string(&manifest_path)?;
        let updated = text.replace(PACKAGE_NAME_PLACEHOLDER, package_name);
        std::fs::write(&manifest_path, updated)?;
    }
    Ok(())
}

fn copy_dir(src: &Path, dest: &Path) -> Result<()> {
    for entry in WalkDir::new(src) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(src)?;
        let target = dest.join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
        }
        else {
            if let Some(parent) = target.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::copy(entry.path(), &target)
                .with_context(|| format!("Could not copy '{}'", entry.path().display()))?;
        }
    }
    Ok(())
}
