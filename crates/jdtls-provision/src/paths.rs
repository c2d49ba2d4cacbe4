use std::fs;
use std::path::{Path, PathBuf};

use crate::equinox::find_equinox_launcher;
use crate::errors::ProvisionError;
use crate::hashing::sha1_hex;
use crate::platform::{Platform, shared_config_path};

const DATA_DIR_PREFIX: &str = "jdtls-";
const LOG_DIR_NAME: &str = "logs";
const JVM_LOG_FILE: &str = "jvm.log";

#[derive(Debug, Clone)]
pub struct ResolvedPaths {
    pub shared_config: PathBuf,
    pub equinox_launcher: PathBuf,
    pub jvm_log_file: PathBuf,
}

impl ResolvedPaths {
    /// `jvm_log_file` comes from [`prepare_log_dir`], which runs earlier.
    /// Fails when no Equinox launcher is installed under `install_root`.
    pub fn resolve(
        install_root: &Path,
        platform: Platform,
        jvm_log_file: PathBuf,
    ) -> Result<Self, ProvisionError> {
        Ok(Self {
            shared_config: shared_config_path(install_root, platform),
            equinox_launcher: find_equinox_launcher(install_root)?,
            jvm_log_file,
        })
    }
}

/// The launcher lives in `<install_root>/bin/`.
pub fn install_root_from_exe(exe: &Path) -> PathBuf {
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// `<temp>/jdtls-<sha1(cwd basename)>`. Only the basename is hashed, so two
/// projects with the same directory name share a data directory.
pub fn default_data_dir(temp_dir: &Path, cwd: &Path) -> PathBuf {
    let name = cwd
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    temp_dir.join(format!("{DATA_DIR_PREFIX}{}", sha1_hex(name.as_bytes())))
}

/// Creates `<cwd>/logs` if needed and returns the JVM log file path.
pub fn prepare_log_dir(cwd: &Path) -> Result<PathBuf, ProvisionError> {
    let dir = cwd.join(LOG_DIR_NAME);
    fs::create_dir_all(&dir)
        .map_err(|source| ProvisionError::io("creating the log directory", source))?;
    Ok(dir.join(JVM_LOG_FILE))
}
