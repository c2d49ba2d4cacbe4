use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use clap::{ArgAction, Parser};
use jdtls_provision::lombok::{DEFAULT_LOMBOK_VERSION, default_lombok_jar};
use jdtls_provision::paths::default_data_dir;
use jdtls_provision::{HostEnv, LaunchConfig};

const BIN_NAME: &str = "jdtls-lombok";

#[derive(Parser, Debug)]
#[command(name = BIN_NAME, args_override_self = true)]
#[command(
    about = "Start the Eclipse JDT language server with Lombok support",
    long_about = None,
    after_help = "Unrecognized arguments are forwarded to jdtls unchanged."
)]
pub struct Cli {
    /// Enable Lombok support (default: true)
    #[arg(long, overrides_with = "no_lombok_enabled")]
    lombok_enabled: bool,

    /// Disable Lombok support
    #[arg(long, overrides_with = "lombok_enabled")]
    no_lombok_enabled: bool,

    /// Path to Lombok JAR (default: <install>/extensions/lombok/lombok-<version>.jar)
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    lombok_jar: Option<PathBuf>,

    /// Lombok version
    #[arg(long, value_name = "VERSION", default_value = DEFAULT_LOMBOK_VERSION)]
    lombok_version: String,

    /// Validate Java version (default: true)
    #[arg(long, overrides_with = "no_validate_java_version")]
    validate_java_version: bool,

    /// Disable Java version validation
    #[arg(long, overrides_with = "validate_java_version")]
    no_validate_java_version: bool,

    /// Path to java executable used to start runtime
    #[arg(long, value_name = "PATH", allow_hyphen_values = true)]
    java_executable: Option<PathBuf>,

    /// Additional JVM option, repeatable (e.g. --jvm-arg=-Xmx2G)
    #[arg(long = "jvm-arg", value_name = "ARG", allow_hyphen_values = true, action = ArgAction::Append)]
    jvm_args: Vec<OsString>,

    /// Workspace data directory (also accepted as `-data`)
    #[arg(long = "data", value_name = "DIR", allow_hyphen_values = true)]
    data: Option<PathBuf>,
}

impl Cli {
    fn lombok_enabled(&self) -> bool {
        self.lombok_enabled || !self.no_lombok_enabled
    }

    fn validate_java_version(&self) -> bool {
        self.validate_java_version || !self.no_validate_java_version
    }

    pub fn into_launch_config(
        self,
        env: &HostEnv,
        passthrough_args: Vec<OsString>,
    ) -> LaunchConfig {
        let lombok_enabled = self.lombok_enabled();
        let validate_java_version = self.validate_java_version();
        let lombok_jar = self
            .lombok_jar
            .unwrap_or_else(|| default_lombok_jar(&env.install_root, &self.lombok_version));
        let data_directory = self
            .data
            .unwrap_or_else(|| default_data_dir(&env.temp_dir, &env.cwd));

        LaunchConfig {
            lombok_enabled,
            lombok_jar,
            lombok_version: self.lombok_version,
            validate_java_version,
            java_executable: self.java_executable,
            extra_jvm_args: self.jvm_args,
            data_directory,
            passthrough_args,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    Flag,
    Value,
}

const KNOWN_OPTIONS: &[(&str, OptionKind)] = &[
    ("--lombok-enabled", OptionKind::Flag),
    ("--no-lombok-enabled", OptionKind::Flag),
    ("--lombok-jar", OptionKind::Value),
    ("--lombok-version", OptionKind::Value),
    ("--validate-java-version", OptionKind::Flag),
    ("--no-validate-java-version", OptionKind::Flag),
    ("--java-executable", OptionKind::Value),
    ("--jvm-arg", OptionKind::Value),
    ("--data", OptionKind::Value),
    ("-data", OptionKind::Value),
    ("-h", OptionKind::Flag),
    ("--help", OptionKind::Flag),
];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SplitArgs {
    /// Launcher options, normalized to `--name` / `--name=value`.
    pub known: Vec<OsString>,
    pub passthrough: Vec<OsString>,
}

fn lookup(name: &str) -> Option<OptionKind> {
    KNOWN_OPTIONS
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, kind)| *kind)
}

fn canonical_name(name: &str) -> &str {
    match name {
        "-data" => "--data",
        other => other,
    }
}

/// The option name before any `=`, when it is valid UTF-8.
fn option_name(arg: &OsStr) -> Option<(&str, bool)> {
    let bytes = arg.as_encoded_bytes();
    let (name, has_value) = match bytes.iter().position(|byte| *byte == b'=') {
        Some(index) => (&bytes[..index], true),
        None => (bytes, false),
    };
    std::str::from_utf8(name).ok().map(|name| (name, has_value))
}

/// Separates launcher options from arguments meant for jdtls. Anything not
/// recognized is kept, in order, as a pass-through argument; everything
/// after a bare `--` is pass-through.
pub fn split_known_args<I>(args: I) -> SplitArgs
where
    I: IntoIterator<Item = OsString>,
{
    let mut split = SplitArgs::default();
    let mut iter = args.into_iter();

    while let Some(arg) = iter.next() {
        if arg == "--" {
            split.passthrough.extend(iter.by_ref());
            break;
        }

        let Some((name, has_value)) = option_name(&arg) else {
            split.passthrough.push(arg);
            continue;
        };

        match (lookup(name), has_value) {
            (Some(OptionKind::Flag), false) => split.known.push(canonical_name(name).into()),
            (Some(OptionKind::Value), true) if name == "-data" => {
                // `-data=<dir>` becomes `--data=<dir>`.
                let mut normalized = OsString::from("-");
                normalized.push(&arg);
                split.known.push(normalized);
            }
            (Some(OptionKind::Value), true) => split.known.push(arg),
            (Some(OptionKind::Value), false) => {
                let name = canonical_name(name);
                match iter.next() {
                    Some(value) => {
                        let mut normalized = OsString::from(format!("{name}="));
                        normalized.push(value);
                        split.known.push(normalized);
                    }
                    // clap reports the missing value.
                    None => split.known.push(name.into()),
                }
            }
            _ => split.passthrough.push(arg),
        }
    }

    split
}

/// Parses a full argument list (without the program name) into a config.
/// `--help` and usage errors surface as `clap::Error`.
pub fn parse_launch_config<I>(args: I, env: &HostEnv) -> Result<LaunchConfig, clap::Error>
where
    I: IntoIterator<Item = OsString>,
{
    let SplitArgs { known, passthrough } = split_known_args(args);
    let cli = Cli::try_parse_from(std::iter::once(OsString::from(BIN_NAME)).chain(known))?;
    Ok(cli.into_launch_config(env, passthrough))
}
