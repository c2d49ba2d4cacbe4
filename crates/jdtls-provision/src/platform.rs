use std::path::{Path, PathBuf};

use crate::errors::ProvisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Linux,
    FreeBsd,
    Mac,
    Windows,
}

impl Platform {
    /// Accepts both `std::env::consts::OS` values and `uname`-style names.
    pub fn from_identifier(id: &str) -> Result<Self, ProvisionError> {
        match id.trim().to_ascii_lowercase().as_str() {
            "linux" => Ok(Self::Linux),
            "freebsd" => Ok(Self::FreeBsd),
            "macos" | "darwin" => Ok(Self::Mac),
            "windows" => Ok(Self::Windows),
            _ => Err(ProvisionError::UnsupportedPlatform(id.to_string())),
        }
    }

    pub fn config_dir_name(self) -> &'static str {
        match self {
            Self::Linux | Self::FreeBsd => "config_linux",
            Self::Mac => "config_mac",
            Self::Windows => "config_win",
        }
    }

    pub fn java_binary_name(self) -> &'static str {
        match self {
            Self::Windows => "java.exe",
            _ => "java",
        }
    }
}

pub fn shared_config_path(install_root: &Path, platform: Platform) -> PathBuf {
    install_root.join(platform.config_dir_name())
}
