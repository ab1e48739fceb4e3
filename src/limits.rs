use tracing::trace;

use crate::{UploadConfig, UploadSet, Violation};

/// Limit checks.
///
/// Both checks report at most one violation, in this order: the size limit
/// of the check, then duplicate filenames, then the number of files.
impl UploadSet {
    /// Checks the sum of all file sizes against [`UploadConfig::max_size`].
    pub fn check_aggregate(&self, config: &UploadConfig) -> Result<(), Violation> {
        let size = self.size();
        trace!("checking aggregate size {}", size);

        if let Some(max) = config.checked_size(size) {
            return Err(Violation::AggregateSizeExceeded { size, max });
        }

        self.check_duplicates()?;
        self.check_count(config)
    }

    /// Checks every file size against [`UploadConfig::max_file_size`],
    /// reporting the first file over the limit.
    pub fn check_per_file(&self, config: &UploadConfig) -> Result<(), Violation> {
        for entry in self.iter() {
            if let Some(max) = config.checked_file_size(entry.size()) {
                return Err(Violation::PerFileSizeExceeded {
                    field: entry.name().to_owned(),
                    filename: entry.filename().to_owned(),
                    size: entry.size(),
                    max,
                    headers: entry.headers().clone(),
                });
            }
        }

        self.check_duplicates()?;
        self.check_count(config)
    }

    fn check_duplicates(&self) -> Result<(), Violation> {
        match self.duplicates().first() {
            Some(filename) => Err(Violation::DuplicateFilename {
                filename: filename.clone(),
            }),
            None => Ok(()),
        }
    }

    fn check_count(&self, config: &UploadConfig) -> Result<(), Violation> {
        let count = self.len();

        match config.checked_files(count) {
            Some(max) => Err(Violation::CountExceeded { count, max }),
            None => Ok(()),
        }
    }
}
