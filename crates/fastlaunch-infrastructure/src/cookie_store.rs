//! File backed cookie store.

use fastlaunch_core::cookie::{CookieJar, CookieStore};
use fastlaunch_core::error::{LaunchError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Keeps account blobs at caller-given paths and the vendor client's active
/// session at a fixed file.
///
/// No locking is done. Two launches on the same account race on its blob.
#[derive(Debug, Clone)]
pub struct FileCookieStore {
    current_path: PathBuf,
}

impl FileCookieStore {
    pub fn new(current_path: PathBuf) -> Self {
        Self { current_path }
    }

    fn read_jar(path: &Path, entity_type: &'static str) -> Result<CookieJar> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(LaunchError::not_found(
                    entity_type,
                    path.display().to_string(),
                ));
            }
            Err(e) => return Err(e.into()),
        };
        CookieJar::from_bytes(&bytes)
    }

    fn write_jar(path: &Path, jar: &CookieJar) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, jar.to_bytes()?)?;
        Ok(())
    }
}

impl CookieStore for FileCookieStore {
    fn read_bytes(&self, path: &Path) -> Result<CookieJar> {
        Self::read_jar(path, "account")
    }

    fn write_bytes(&self, path: &Path, jar: &CookieJar) -> Result<()> {
        Self::write_jar(path, jar)
    }

    fn read_current(&self) -> Result<CookieJar> {
        Self::read_jar(&self.current_path, "session")
    }

    fn write_current(&self, jar: &CookieJar) -> Result<()> {
        Self::write_jar(&self.current_path, jar)
    }
}
