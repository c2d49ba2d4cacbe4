use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::errors::ProvisionError;
use crate::launch::prefixed;

pub const DEFAULT_LOMBOK_VERSION: &str = "1.18.36";

/// `<install_root>/extensions/lombok/lombok-<version>.jar`
pub fn default_lombok_jar(install_root: &Path, version: &str) -> PathBuf {
    install_root
        .join("extensions")
        .join("lombok")
        .join(format!("lombok-{version}.jar"))
}

pub fn validate_lombok_jar(jar: &Path) -> Result<(), ProvisionError> {
    if !jar.exists() {
        return Err(ProvisionError::MissingLombokJar {
            path: jar.to_path_buf(),
        });
    }
    Ok(())
}

/// Agent and boot classpath injection for the JVM.
pub fn lombok_jvm_args(jar: &Path) -> Vec<OsString> {
    vec![
        prefixed("-javaagent:", jar.as_os_str()),
        prefixed("-Xbootclasspath/a:", jar.as_os_str()),
    ]
}

/// Flags understood by jdtls itself, placed ahead of the pass-through args.
pub fn lombok_support_args(version: &str) -> Vec<OsString> {
    vec![
        OsString::from("--lombok-support-enabled=true"),
        OsString::from(format!("--lombok-version={version}")),
    ]
}
