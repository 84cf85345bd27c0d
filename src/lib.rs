pub mod args;
pub mod jig;

use anyhow::Context;
use chrono::prelude::*;
use std::ffi::OsString;
use std::io::Write;
use std::path::{is_separator, Path, PathBuf};
use std::{fs, io, time::SystemTime};

use crate::args::{command, Options, PathArg, PathTag};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_IO_FAILURE: i32 = -1;
pub const EXIT_NO_CANDIDATES: i32 = -2;
pub const EXIT_USAGE: i32 = 2;

/// True for paths such as `.`, `..` or `./..` that are made only of dots and
/// separators.
pub fn is_dot_directory(path: &str) -> bool {
    !path.is_empty() && path.chars().all(|c| c == '.' || is_separator(c))
}

pub fn is_directory(path: &Path) -> bool {
    path.to_str().is_some_and(is_dot_directory) || path.is_dir()
}

pub fn get_modified_time(path: &Path) -> anyhow::Result<SystemTime> {
    let metadata = fs::symlink_metadata(path)?;
    metadata
        .modified()
        .with_context(|| format!("could not get modification time of {}", path.display()))
}

/// Direct children of `directory`, files and subdirectories alike.
pub fn get_directory_entries(directory: &Path) -> io::Result<Vec<PathBuf>> {
    let mut entries = Vec::new();

    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        entries.push(entry.path());
    }

    Ok(entries)
}

/// Keeps the paths that name an existing directory, in order.
pub fn candidate_directories(paths: &[PathArg]) -> Vec<PathBuf> {
    paths
        .iter()
        .filter(|arg| {
            let keep = is_directory(&arg.path);
            if !keep {
                match arg.tag {
                    PathTag::Arg => log::warn!("skipping {}: not a directory", arg.path.display()),
                    PathTag::Implicit => log::debug!("skipping {}", arg.path.display()),
                }
            }
            keep
        })
        .map(|arg| arg.path.clone())
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestEntry {
    pub path: PathBuf,
    pub modified: SystemTime,
}

impl LatestEntry {
    pub fn name(&self) -> OsString {
        self.path
            .file_name()
            .map(ToOwned::to_owned)
            .unwrap_or_else(|| self.path.clone().into_os_string())
    }

    pub fn modified_at(&self) -> DateTime<Local> {
        DateTime::from(self.modified)
    }
}

/// The most recently modified entry across `directories`, not recursing.
///
/// Only a strictly newer entry replaces the current pick, so ties go to the
/// one seen first.
pub fn latest_entry(directories: &[PathBuf]) -> anyhow::Result<Option<LatestEntry>> {
    let mut latest: Option<LatestEntry> = None;

    for directory in directories {
        let entries = get_directory_entries(directory)
            .with_context(|| format!("could not read directory {}", directory.display()))?;

        for entry in entries {
            let modified = get_modified_time(&entry)?;
            log::debug!(
                "{} - {}",
                entry.display(),
                DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S%.f")
            );

            if latest.as_ref().map_or(true, |current| current.modified < modified) {
                latest = Some(LatestEntry {
                    path: entry,
                    modified,
                });
            }
        }
    }

    if let Some(latest) = &latest {
        log::info!(
            "latest entry is {} ({})",
            latest.path.display(),
            latest.modified_at().to_rfc3339()
        );
    }

    Ok(latest)
}

fn try_run<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> anyhow::Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let options = match Options::parse(args) {
        Ok(options) => options,
        Err(usage) => {
            writeln!(err, "error: {}", usage)?;
            writeln!(err, "{}", command().render_usage())?;
            return Ok(EXIT_USAGE);
        }
    };

    if options.help {
        writeln!(out, "{}", command().render_help())?;
        return Ok(EXIT_SUCCESS);
    }
    if options.version {
        write!(out, "{}", command().render_version())?;
        return Ok(EXIT_SUCCESS);
    }

    let candidates = candidate_directories(&options.directories);
    if candidates.is_empty() {
        writeln!(err, "no candidate directories")?;
        return Ok(EXIT_NO_CANDIDATES);
    }

    match latest_entry(&candidates)? {
        Some(latest) => writeln!(out, "{}", latest.name().to_string_lossy())
            .context("could not write the result")?,
        None => log::info!("no entries in {:?}", candidates),
    }
    out.flush()?;

    Ok(EXIT_SUCCESS)
}

/// Runs the program on `args` (program name excluded) and returns its exit
/// status. The result goes to `out`, diagnostics to `err`.
pub fn run<I, T>(args: I, out: &mut impl Write, err: &mut impl Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    match try_run(args, out, err) {
        Ok(code) => code,
        Err(failure) => {
            let _ = writeln!(err, "error: {:#}", failure);
            EXIT_IO_FAILURE
        }
    }
}
