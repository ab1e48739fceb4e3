use serde::{Deserialize, Serialize};

/// Settings for validating and saving uploaded files.
///
/// A limit of `0` disables that limit.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Destination path template, e.g. `files/%Y/%m/%y%m%d%H%M%S_%g`.
    /// Empty means the original filename is used as is.
    pub save_file: String,
    /// Max sum of all file sizes in bytes
    pub max_size: u64,
    /// Max size of a single file in bytes
    pub max_file_size: u64,
    /// Max number of files in one request
    pub max_files: usize,
    /// Permission bits of saved files
    pub perm: u32,
    /// Replaces an existing file at the destination
    pub overwrite: bool,
    /// Drops files whose filename was already submitted
    pub unique: bool,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            save_file: String::new(),
            max_size: 0,
            max_file_size: 0,
            max_files: 0,
            perm: Self::DEFAULT_PERM,
            overwrite: false,
            unique: false,
        }
    }
}

impl UploadConfig {
    /// Permission bits of saved files, defaults to `0o644`.
    pub const DEFAULT_PERM: u32 = 0o644;

    /// Mode of directories created for saved files, `0o755`.
    pub const DIR_PERM: u32 = 0o755;

    /// Destination path template
    #[must_use]
    pub fn save_file(mut self, template: impl Into<String>) -> Self {
        self.save_file = template.into();
        self
    }

    /// Max sum of all file sizes
    #[must_use]
    pub fn max_size(mut self, max: u64) -> Self {
        self.max_size = max;
        self
    }

    /// Max size of a single file
    #[must_use]
    pub fn max_file_size(mut self, max: u64) -> Self {
        self.max_file_size = max;
        self
    }

    /// Max number of files
    #[must_use]
    pub fn max_files(mut self, max: usize) -> Self {
        self.max_files = max;
        self
    }

    /// Permission bits of saved files
    #[must_use]
    pub fn perm(mut self, perm: u32) -> Self {
        self.perm = perm;
        self
    }

    /// Replaces existing files
    #[must_use]
    pub fn overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Drops repeated filenames
    #[must_use]
    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = unique;
        self
    }

    /// Check sum of file sizes
    #[must_use]
    pub fn checked_size(&self, rhs: u64) -> Option<u64> {
        Some(self.max_size).filter(|max| *max != 0 && rhs > *max)
    }

    /// Check size of one file
    #[must_use]
    pub fn checked_file_size(&self, rhs: u64) -> Option<u64> {
        Some(self.max_file_size).filter(|max| *max != 0 && rhs > *max)
    }

    /// Check number of files
    #[must_use]
    pub fn checked_files(&self, rhs: usize) -> Option<usize> {
        Some(self.max_files).filter(|max| *max != 0 && rhs > *max)
    }
}
