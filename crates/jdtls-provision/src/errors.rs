use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("Lombok JAR not found at {}", path.display())]
    MissingLombokJar { path: PathBuf },

    #[error("Unknown platform {0} detected")]
    UnsupportedPlatform(String),

    #[error("cannot find equinox launcher in {}", plugins_dir.display())]
    EquinoxLauncherNotFound { plugins_dir: PathBuf },

    #[error("could not determine Java version from `{} -version` output", java.display())]
    JavaVersionUnknown { java: PathBuf },

    #[error("jdtls requires at least Java {required} (detected Java {detected})")]
    JavaTooOld { detected: u32, required: u32 },

    #[error("error checking Java version with {}: {message}", java.display())]
    JavaVersionCheck { java: PathBuf, message: String },

    #[error("failed to launch {}: {source}", program.display())]
    Launch {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

impl ProvisionError {
    pub fn io(context: &'static str, source: std::io::Error) -> Self {
        Self::Io { context, source }
    }
}
