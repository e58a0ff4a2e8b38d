use std::path::Path;
use serde::{Deserialize, Serialize};
use anyhow::{Context, Result};
use semver::Version;
use crate::error::PackitError;

/// The fields of a local `package.json` that packit cares about.
///
/// The manifest is authored by the user and read-only to this tool; unknown
/// fields are ignored on load and never written back.
#[derive(Deserialize, Serialize, Debug)]
pub struct PackageManifest {
    /// The name of the package.
    #[serde(default)]
    pub name: String,
    /// The version of the package (semantic versioning).
    #[serde(default)]
    pub version: String,
}

impl PackageManifest {
    /// Loads a `PackageManifest` from a file path.
    ///
    /// # Errors
    /// Returns an error if the file can't be read or deserialized.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PackageManifest> {
        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("No {} found in the current directory", crate::util::MANIFEST_FILE_NAME))?;
        serde_json::from_str(&data).map_err(|e| e.into())
    }

    /// Checks that both `name` and `version` are present and non-empty.
    /// Remote operations must call this before touching the network.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(PackitError::MissingManifestField("name").into());
        }
        if self.version.trim().is_empty() {
            return Err(PackitError::MissingManifestField("version").into());
        }
        Ok(())
    }
}

/// Validates whether a version string is a valid SemVer version.
pub fn is_valid_version(version: &str) -> bool {
    Version::parse(version).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_reads_name_and_version() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, r#"{"name": "my-bot", "version": "1.2.3", "scripts": {}}"#).unwrap();
        let manifest = PackageManifest::load(&path).unwrap();
        assert_eq!(manifest.name, "my-bot");
        assert_eq!(manifest.version, "1.2.3");
    }

    #[test]
    fn test_validate_missing_version() {
        let manifest = PackageManifest {
            name: "my-bot".to_string(),
            version: "".to_string(),
        };
        let err = manifest.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackitError>(),
            Some(PackitError::MissingManifestField("version"))
        ));
    }

    #[test]
    fn test_validate_missing_name() {
        let manifest = PackageManifest {
            name: " ".to_string(),
            version: "1.0.0".to_string(),
        };
        let err = manifest.validate().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PackitError>(),
            Some(PackitError::MissingManifestField("name"))
        ));
    }

    #[test]
    fn test_is_valid_version() {
        assert!(is_valid_version("1.2.3"));
        assert!(is_valid_version("1.2.3-alpha"));
        assert!(!is_valid_version("1.2"));
        assert!(!is_valid_version("not-a-version"));
    }
}
