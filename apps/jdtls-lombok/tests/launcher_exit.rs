use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::time::{SystemTime, UNIX_EPOCH};

fn os(values: &[&str]) -> Vec<OsString> {
    values.iter().map(OsString::from).collect()
}

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("jdtls-lombok-bin-{prefix}-{nanos}"))
}

/// A throwaway jdtls install with the launcher copied into `bin/`, so the
/// binary derives its install root from the fixture.
struct Install {
    root: PathBuf,
    launcher: PathBuf,
    workspace: PathBuf,
}

impl Install {
    fn new(prefix: &str) -> Self {
        let root = unique_temp_dir(prefix);
        let install = root.join("jdtls");
        let bin = install.join("bin");
        fs::create_dir_all(&bin).expect("create bin");
        let launcher = bin.join("jdtls-lombok");
        fs::copy(env!("CARGO_BIN_EXE_jdtls-lombok"), &launcher).expect("copy launcher");

        let plugins = install.join("plugins");
        fs::create_dir_all(&plugins).expect("create plugins");
        fs::write(
            plugins.join("org.eclipse.equinox.launcher_1.6.900.v20240613-2009.jar"),
            b"",
        )
        .expect("write equinox launcher");

        let workspace = root.join("work").join("demo");
        fs::create_dir_all(&workspace).expect("create workspace");

        Self {
            root,
            launcher,
            workspace,
        }
    }

    fn install_root(&self) -> PathBuf {
        self.root.join("jdtls")
    }

    fn add_lombok_jar(&self) {
        let dir = self.install_root().join("extensions").join("lombok");
        fs::create_dir_all(&dir).expect("create lombok dir");
        fs::write(dir.join("lombok-1.18.36.jar"), b"").expect("write lombok jar");
    }

    fn run<I, S>(&self, args: I) -> Output
    where
        I: IntoIterator<Item = S>,
        S: AsRef<std::ffi::OsStr>,
    {
        Command::new(&self.launcher)
            .args(args)
            .current_dir(&self.workspace)
            .env_remove("JAVA_HOME")
            .env("RUST_LOG", "off")
            .output()
            .expect("run launcher")
    }
}

impl Drop for Install {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}

#[test]
fn missing_lombok_jar_exits_with_one() {
    let install = Install::new("missing-lombok");
    let output = install.run(["--java-executable", "/nonexistent/java"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Lombok JAR not found at"), "stderr: {stderr}");
    assert!(stderr.contains("lombok-1.18.36.jar"), "stderr: {stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_option_value_is_a_usage_error() {
    let install = Install::new("usage");
    let output = install.run(["--lombok-jar"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(output.stdout.is_empty());
}

#[cfg(unix)]
fn fake_java(dir: &Path, exit_code: i32) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let java = dir.join("java");
    let record = dir.join("args.txt");
    fs::write(
        &java,
        format!(
            "#!/bin/sh\nprintf '%s\\n' \"$@\" > '{}'\nexit {exit_code}\n",
            record.display()
        ),
    )
    .expect("write fake java");
    let mut perms = fs::metadata(&java).expect("stat fake java").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&java, perms).expect("chmod fake java");
    java
}

#[cfg(unix)]
#[test]
fn child_exit_code_is_propagated() {
    let install = Install::new("exit-code");
    install.add_lombok_jar();
    let java = fake_java(&install.root, 7);

    let mut args = os(&["--no-lombok-enabled", "--java-executable"]);
    args.push(java.into_os_string());
    args.extend(os(&["--stdio", "-configuration", "/cfg"]));
    let output = install.run(args);

    assert_eq!(output.status.code(), Some(7));
    let recorded = fs::read_to_string(install.root.join("args.txt")).expect("read args");
    let lines: Vec<&str> = recorded.lines().collect();
    assert!(!lines.iter().any(|line| line.starts_with("-javaagent:")));
    assert!(!lines.iter().any(|line| line.starts_with("--lombok-")));
    assert!(lines.contains(&"-Dlog.level=ALL"));
    assert_eq!(&lines[lines.len() - 3..], &["--stdio", "-configuration", "/cfg"]);
    assert!(install.workspace.join("logs").is_dir());
}

#[cfg(unix)]
#[test]
fn successful_child_exits_zero_with_lombok_flags() {
    let install = Install::new("exit-zero");
    install.add_lombok_jar();
    let java = fake_java(&install.root, 0);

    let mut args = os(&["--java-executable"]);
    args.push(java.into_os_string());
    args.extend(os(&["--stdio"]));
    let output = install.run(args);

    assert_eq!(output.status.code(), Some(0));
    let recorded = fs::read_to_string(install.root.join("args.txt")).expect("read args");
    let lines: Vec<&str> = recorded.lines().collect();
    assert!(lines[0].starts_with("-javaagent:"));
    assert!(lines[0].ends_with("lombok-1.18.36.jar"));
    assert_eq!(
        &lines[lines.len() - 3..],
        &["--lombok-support-enabled=true", "--lombok-version=1.18.36", "--stdio"]
    );
}

#[cfg(unix)]
#[test]
fn non_utf8_passthrough_reaches_java_unchanged() {
    use std::os::unix::ffi::OsStringExt;

    let install = Install::new("non-utf8");
    install.add_lombok_jar();
    let java = fake_java(&install.root, 0);
    let mut args = os(&["--java-executable"]);
    args.push(java.into_os_string());
    args.push(OsString::from_vec(b"/src/caf\xe9.java".to_vec()));
    let output = install.run(args);

    assert_eq!(output.status.code(), Some(0));
    let recorded = fs::read(install.root.join("args.txt")).expect("read args");
    let last = recorded
        .split(|byte| *byte == b'\n')
        .rfind(|line| !line.is_empty())
        .expect("recorded argument");
    assert_eq!(last, b"/src/caf\xe9.java");
}
