use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use log::warn;

use crate::errors::ProvisionError;

const LAUNCHER_PREFIX: &str = "org.eclipse.equinox.launcher_";
const LAUNCHER_SUFFIX: &str = ".jar";

/// Finds `plugins/org.eclipse.equinox.launcher_*.jar` under the install root.
///
/// When more than one launcher is installed the highest version wins and the
/// others are logged, so the choice never depends on directory order.
pub fn find_equinox_launcher(install_root: &Path) -> Result<PathBuf, ProvisionError> {
    let plugins_dir = install_root.join("plugins");
    let not_found = || ProvisionError::EquinoxLauncherNotFound {
        plugins_dir: plugins_dir.clone(),
    };

    let entries = fs::read_dir(&plugins_dir).map_err(|_| not_found())?;
    let mut candidates: Vec<(String, PathBuf)> = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().into_owned();
            launcher_version(&name)?;
            Some((name, entry.path()))
        })
        .collect();

    candidates.sort_by(|(a, _), (b, _)| compare_launcher_names(a, b));
    let (_, chosen) = candidates.pop().ok_or_else(not_found)?;

    if !candidates.is_empty() {
        let ignored = candidates
            .iter()
            .map(|(name, _)| name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        warn!(
            "multiple equinox launchers found; using {} and ignoring {ignored}",
            chosen.display()
        );
    }

    Ok(chosen)
}

/// Version part of a launcher file name, e.g. `1.6.900.v20240613-2009`.
fn launcher_version(file_name: &str) -> Option<&str> {
    file_name
        .strip_prefix(LAUNCHER_PREFIX)?
        .strip_suffix(LAUNCHER_SUFFIX)
}

fn compare_launcher_names(a: &str, b: &str) -> Ordering {
    let (Some(va), Some(vb)) = (launcher_version(a), launcher_version(b)) else {
        return a.cmp(b);
    };
    compare_osgi_versions(va, vb).then_with(|| a.cmp(b))
}

/// OSGi `major.minor.micro.qualifier`: numeric parts compared as numbers,
/// anything that is not a number compared as text.
fn compare_osgi_versions(a: &str, b: &str) -> Ordering {
    let mut left = a.split('.');
    let mut right = b.split('.');
    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (Some(_), None) => return Ordering::Greater,
            (None, Some(_)) => return Ordering::Less,
            (Some(l), Some(r)) => {
                let ord = match (l.parse::<u64>(), r.parse::<u64>()) {
                    (Ok(l), Ok(r)) => l.cmp(&r),
                    (Ok(_), Err(_)) => Ordering::Greater,
                    (Err(_), Ok(_)) => Ordering::Less,
                    (Err(_), Err(_)) => l.cmp(r),
                };
                if ord != Ordering::Equal {
                    return ord;
                }
            }
        }
    }
}
