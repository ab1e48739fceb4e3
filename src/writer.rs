use std::{
    fs::{self, OpenOptions},
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{Datelike, Local, Timelike};
use tracing::{debug, trace, warn};

use crate::{template, Error, FileEntry, Result, UploadConfig, UploadSet};

impl UploadSet {
    /// Saves every file, stamping templates with the local time.
    ///
    /// See [`UploadSet::write_all_at`].
    pub fn write_all(&self, config: &UploadConfig) -> Result<Vec<PathBuf>> {
        self.write_all_at(config, &Local::now())
    }

    /// Saves every file, field by field, and returns the written paths.
    ///
    /// Stops at the first failure with [`Error::Write`]. Files written before
    /// the failure are kept.
    pub fn write_all_at<T>(&self, config: &UploadConfig, now: &T) -> Result<Vec<PathBuf>>
    where
        T: Datelike + Timelike,
    {
        let mut paths = Vec::with_capacity(self.len());

        for (name, entries) in self.files() {
            for entry in entries {
                let path = entry.write_to(config, now).map_err(|e| Error::Write {
                    field: name.to_owned(),
                    source: Box::new(e),
                })?;
                paths.push(path);
            }
        }

        Ok(paths)
    }
}

impl FileEntry {
    /// Computes the destination of this file.
    ///
    /// An empty template means the original filename.
    pub fn destination<T>(&self, template: &str, now: &T) -> PathBuf
    where
        T: Datelike + Timelike,
    {
        if template.is_empty() {
            PathBuf::from(self.filename())
        } else {
            PathBuf::from(template::expand(template, now, self.filename(), self.size()))
        }
    }

    /// Reads the content and saves it to its destination.
    ///
    /// When [`UploadConfig::overwrite`] is disabled, an existing destination
    /// fails with [`Error::AlreadyExists`]. The check and the write are not
    /// atomic: another request writing the same path in between still wins.
    pub fn write_to<T>(&self, config: &UploadConfig, now: &T) -> Result<PathBuf>
    where
        T: Datelike + Timelike,
    {
        let bytes = self.bytes()?;
        let path = self.destination(&config.save_file, now);

        if !config.save_file.is_empty() {
            if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                create_dir(dir)?;
            }
        }

        if !config.overwrite && fs::symlink_metadata(&path).is_ok() {
            warn!("refusing to overwrite {}", path.display());
            return Err(Error::AlreadyExists(path));
        }

        let mut file = open_options(config.perm).open(&path)?;
        file.write_all(&bytes)?;
        set_perm(&file, config.perm)?;
        file.flush()?;

        debug!("saved {} {} to {}", self.name(), self.filename(), path.display());
        Ok(path)
    }
}

/// Creates `dir` and its missing parents with [`UploadConfig::DIR_PERM`].
/// Directories that already exist keep their mode.
fn create_dir(dir: &Path) -> io::Result<()> {
    let missing: Vec<&Path> = dir
        .ancestors()
        .take_while(|p| !p.as_os_str().is_empty() && fs::symlink_metadata(p).is_err())
        .collect();

    for p in missing.into_iter().rev() {
        trace!("creating {}", p.display());

        match fs::create_dir(p) {
            Ok(()) => set_dir_perm(p)?,
            // created by someone else in between
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && p.is_dir() => {}
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

#[cfg(unix)]
fn set_dir_perm(dir: &Path) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(dir, fs::Permissions::from_mode(UploadConfig::DIR_PERM))
}

#[cfg(not(unix))]
fn set_dir_perm(_: &Path) -> io::Result<()> {
    Ok(())
}

#[allow(unused_variables)]
fn open_options(perm: u32) -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(perm);
    }
    options
}

#[cfg(unix)]
fn set_perm(file: &fs::File, perm: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(perm))
}

#[cfg(not(unix))]
fn set_perm(_: &fs::File, _: u32) -> io::Result<()> {
    Ok(())
}
