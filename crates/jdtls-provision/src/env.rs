use std::ffi::OsString;
use std::path::PathBuf;

use crate::errors::ProvisionError;
use crate::paths::install_root_from_exe;

/// Process environment the launcher depends on, captured once so resolvers
/// never read globals themselves.
#[derive(Debug, Clone)]
pub struct HostEnv {
    pub cwd: PathBuf,
    pub temp_dir: PathBuf,
    pub java_home: Option<OsString>,
    pub platform_id: String,
    pub install_root: PathBuf,
}

impl HostEnv {
    pub fn from_process() -> Result<Self, ProvisionError> {
        let cwd = std::env::current_dir()
            .map_err(|source| ProvisionError::io("reading the working directory", source))?;
        let exe = std::env::current_exe()
            .map_err(|source| ProvisionError::io("locating the launcher executable", source))?;
        let exe = std::fs::canonicalize(&exe).unwrap_or(exe);

        Ok(Self {
            cwd,
            temp_dir: std::env::temp_dir(),
            java_home: std::env::var_os("JAVA_HOME"),
            platform_id: std::env::consts::OS.to_string(),
            install_root: install_root_from_exe(&exe),
        })
    }
}
