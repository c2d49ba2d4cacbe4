use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::LazyLock;

use log::{debug, info};
use regex::Regex;

use crate::errors::ProvisionError;
use crate::platform::Platform;

pub const MIN_JAVA_MAJOR: u32 = 17;
const DEFAULT_JAVA_COMMAND: &str = "java";

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"version\s+"?(\d+)(\.\d+(_\d+)?)?"?"#).expect("valid java version pattern")
});

/// Picks the java binary to run. An explicit override is returned as-is,
/// otherwise `$JAVA_HOME/bin/java` when present, otherwise the bare `java`
/// command left to `PATH` lookup.
pub fn resolve_java_executable(
    explicit: Option<&Path>,
    java_home: Option<&OsStr>,
    platform: Platform,
) -> PathBuf {
    if let Some(explicit) = explicit {
        return explicit.to_path_buf();
    }

    if let Some(home) = java_home.filter(|home| !home.is_empty()) {
        let candidate = Path::new(home)
            .join("bin")
            .join(platform.java_binary_name());
        if candidate.exists() {
            match fs::canonicalize(&candidate) {
                Ok(resolved) => return resolved,
                Err(err) => {
                    debug!("failed to canonicalize {}: {err}", candidate.display());
                    return candidate;
                }
            }
        }
        debug!(
            "JAVA_HOME is set but {} does not exist, falling back to `{DEFAULT_JAVA_COMMAND}`",
            candidate.display()
        );
    }

    PathBuf::from(DEFAULT_JAVA_COMMAND)
}

/// Extracts the major version from `java -version` output. Pre-9 version
/// strings (`1.8.0_292`) report the second component.
pub fn parse_java_major_version(output: &str) -> Option<u32> {
    let captures = VERSION_PATTERN.captures(output)?;
    let major: u32 = captures.get(1)?.as_str().parse().ok()?;
    if major == 1 {
        if let Some(minor) = captures.get(2) {
            return minor.as_str().trim_start_matches('.').parse().ok();
        }
    }
    Some(major)
}

pub fn ensure_supported_java(major: u32) -> Result<u32, ProvisionError> {
    if major < MIN_JAVA_MAJOR {
        return Err(ProvisionError::JavaTooOld {
            detected: major,
            required: MIN_JAVA_MAJOR,
        });
    }
    Ok(major)
}

/// Major version reported by a `-version` transcript, rejected when too old.
pub fn check_java_version_output(java: &Path, output: &str) -> Result<u32, ProvisionError> {
    let major = parse_java_major_version(output).ok_or_else(|| {
        ProvisionError::JavaVersionUnknown {
            java: java.to_path_buf(),
        }
    })?;
    ensure_supported_java(major)
}

/// Runs `<java> -version` and validates the reported major version.
pub fn detect_java_major_version(java: &Path) -> Result<u32, ProvisionError> {
    let output = Command::new(java)
        .arg("-version")
        .output()
        .map_err(|err| ProvisionError::JavaVersionCheck {
            java: java.to_path_buf(),
            message: err.to_string(),
        })?;

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));

    if !output.status.success() {
        return Err(ProvisionError::JavaVersionCheck {
            java: java.to_path_buf(),
            message: combined.trim().to_string(),
        });
    }

    let major = check_java_version_output(java, &combined)?;
    info!("using Java {major} at {}", java.display());
    Ok(major)
}
