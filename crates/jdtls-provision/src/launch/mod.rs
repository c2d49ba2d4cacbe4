use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

use log::debug;

use crate::config::LaunchConfig;
use crate::env::HostEnv;
use crate::errors::ProvisionError;
use crate::java::{detect_java_major_version, resolve_java_executable};
use crate::lombok::{lombok_jvm_args, lombok_support_args, validate_lombok_jar};
use crate::paths::{ResolvedPaths, prepare_log_dir};
use crate::platform::Platform;

mod plan;
pub use plan::LaunchPlan;
pub(crate) use plan::prefixed;

const JDTLS_APPLICATION: &str = "org.eclipse.jdt.ls.core.id1";
const JDTLS_PRODUCT: &str = "org.eclipse.jdt.ls.core.product";

/// Runs every startup check in order and returns the java invocation.
/// Nothing is launched; a missing Lombok jar is reported before Java or
/// the install layout are inspected.
pub fn prepare_launch(config: &LaunchConfig, env: &HostEnv) -> Result<LaunchPlan, ProvisionError> {
    validate_lombok_jar(&config.lombok_jar)?;
    let jvm_log_file = prepare_log_dir(&env.cwd)?;

    let platform = Platform::from_identifier(&env.platform_id)?;
    let java = resolve_java(config, env, platform)?;
    debug!("java executable: {}", java.display());

    let paths = ResolvedPaths::resolve(&env.install_root, platform, jvm_log_file)?;
    debug!("shared configuration: {}", paths.shared_config.display());
    debug!("equinox launcher: {}", paths.equinox_launcher.display());
    debug!("data directory: {}", config.data_directory.display());

    Ok(assemble_launch_plan(config, java, &paths))
}

/// An explicit `--java-executable` is trusted; only the discovered one is
/// version-checked.
fn resolve_java(
    config: &LaunchConfig,
    env: &HostEnv,
    platform: Platform,
) -> Result<PathBuf, ProvisionError> {
    let java = resolve_java_executable(
        config.java_executable.as_deref(),
        env.java_home.as_deref(),
        platform,
    );
    if config.java_executable.is_none() && config.validate_java_version {
        detect_java_major_version(&java)?;
    }
    Ok(java)
}

pub fn assemble_launch_plan(
    config: &LaunchConfig,
    java: PathBuf,
    paths: &ResolvedPaths,
) -> LaunchPlan {
    let mut args: Vec<OsString> = Vec::new();

    if config.lombok_enabled {
        args.extend(lombok_jvm_args(&config.lombok_jar));
    }
    args.push("-Dlog.level=ALL".into());

    args.extend([
        format!("-Declipse.application={JDTLS_APPLICATION}").into(),
        "-Dosgi.bundles.defaultStartLevel=4".into(),
        format!("-Declipse.product={JDTLS_PRODUCT}").into(),
        "-Dosgi.checkConfiguration=true".into(),
        prefixed(
            "-Dosgi.sharedConfiguration.area=",
            paths.shared_config.as_os_str(),
        ),
        "-Dosgi.sharedConfiguration.area.readOnly=true".into(),
        "-Dosgi.configuration.cascaded=true".into(),
    ]);

    args.extend([
        OsString::from("--add-modules=ALL-SYSTEM"),
        "--add-opens".into(),
        "java.base/java.util=ALL-UNNAMED".into(),
        "--add-opens".into(),
        "java.base/java.lang=ALL-UNNAMED".into(),
    ]);

    args.extend(config.extra_jvm_args.iter().cloned());
    args.push(jvm_log_arg(paths));

    args.extend([
        OsString::from("-jar"),
        paths.equinox_launcher.clone().into_os_string(),
        "-data".into(),
        config.data_directory.clone().into_os_string(),
    ]);

    if config.lombok_enabled {
        args.extend(lombok_support_args(&config.lombok_version));
    }
    args.extend(config.passthrough_args.iter().cloned());

    LaunchPlan {
        program: java,
        args,
    }
}

/// Unified JVM logging, rotated at 10MB and keeping five files.
fn jvm_log_arg(paths: &ResolvedPaths) -> OsString {
    let mut arg = prefixed("-Xlog:all:file=", paths.jvm_log_file.as_os_str());
    arg.push(":time:filecount=5,filesize=10M");
    arg
}

/// Replaces the current process with the plan on Unix, so this only returns
/// when `exec` itself failed. Elsewhere the child is awaited and its exit
/// code returned.
pub fn launch(plan: &LaunchPlan) -> Result<i32, ProvisionError> {
    debug!("launching {:?}", plan.argv());
    let mut command = Command::new(&plan.program);
    command.args(&plan.args);

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;

        let source = command.exec();
        Err(ProvisionError::Launch {
            program: plan.program.clone(),
            source,
        })
    }

    #[cfg(not(unix))]
    {
        let status = command.status().map_err(|source| ProvisionError::Launch {
            program: plan.program.clone(),
            source,
        })?;
        // No exit code means the child was terminated externally.
        Ok(status.code().unwrap_or(1))
    }
}
