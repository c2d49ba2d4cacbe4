use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct LaunchConfig {
    pub lombok_enabled: bool,
    pub lombok_jar: PathBuf,
    pub lombok_version: String,
    pub validate_java_version: bool,
    pub java_executable: Option<PathBuf>,
    pub extra_jvm_args: Vec<OsString>,
    pub data_directory: PathBuf,
    /// Forwarded to jdtls unchanged, in order.
    pub passthrough_args: Vec<OsString>,
}
