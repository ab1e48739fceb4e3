use std::collections::HashSet;

use tracing::debug;

use crate::{FileEntry, RawFile, UploadConfig};

/// The files of one request, grouped by field name.
///
/// Fields keep the order they were given in, files keep their order within a
/// field.
#[derive(Debug, Default)]
pub struct UploadSet {
    fields: Vec<(String, Vec<FileEntry>)>,
    duplicates: Vec<String>,
}

impl UploadSet {
    /// Creates an empty set, as for a request without decoded files.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collects the decoded file parts of a request.
    ///
    /// With [`UploadConfig::unique`] enabled, only the first file of each
    /// filename is kept, across all fields. Later ones are dropped and their
    /// filename is recorded in [`UploadSet::duplicates`].
    pub fn new<I>(fields: I, config: &UploadConfig) -> Self
    where
        I: IntoIterator<Item = (String, Vec<RawFile>)>,
    {
        let mut set = Self::empty();
        let mut seen = HashSet::new();

        for (name, raws) in fields {
            if raws.is_empty() {
                continue;
            }

            let mut entries = Vec::with_capacity(raws.len());

            for raw in raws {
                if config.unique && !seen.insert(raw.filename.clone()) {
                    debug!("dropping duplicate {} in {}", raw.filename, name);
                    if !set.duplicates.contains(&raw.filename) {
                        set.duplicates.push(raw.filename);
                    }
                    continue;
                }

                entries.push(FileEntry::new(name.clone(), raw));
            }

            match set.fields.iter_mut().find(|(n, _)| *n == name) {
                Some((_, existing)) => existing.extend(entries),
                None => set.fields.push((name, entries)),
            }
        }

        set
    }

    /// Counts the files.
    pub fn len(&self) -> usize {
        self.fields.iter().map(|(_, entries)| entries.len()).sum()
    }

    /// Returns `true` if there is no file.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sums the declared sizes of the files, saturating at `u64::MAX`.
    pub fn size(&self) -> u64 {
        self.iter()
            .fold(0u64, |acc, entry| acc.saturating_add(entry.size()))
    }

    /// Gets the files of a field.
    pub fn get_all(&self, name: &str) -> &[FileEntry] {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entries)| entries.as_slice())
            .unwrap_or_default()
    }

    /// Gets the first file of a field.
    pub fn get(&self, name: &str) -> Option<&FileEntry> {
        self.get_all(name).first()
    }

    /// Gets all fields with their files.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[FileEntry])> {
        self.fields
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Iterates all files, field by field.
    pub fn iter(&self) -> impl Iterator<Item = &FileEntry> {
        self.fields.iter().flat_map(|(_, entries)| entries)
    }

    /// Gets the dropped duplicate filenames, in the order they were found.
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }

    /// Gives back the kept file parts in the shape accepted by
    /// [`UploadSet::new`].
    pub fn into_fields(self) -> Vec<(String, Vec<RawFile>)> {
        self.fields
            .into_iter()
            .map(|(name, entries)| (name, entries.into_iter().map(FileEntry::into_raw).collect()))
            .collect()
    }
}
