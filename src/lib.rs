//! Validates, deduplicates and saves the files of a decoded
//! `multipart/form-data` request.
//!
//! The decoder hands over the file parts of each field as [`RawFile`]s. They
//! are collected into an [`UploadSet`], checked against the limits of an
//! [`UploadConfig`], then written to paths computed from a [`template`].
//!
//! # Example
//!
//! ```rust
//! use anyhow::Result;
//! use tempfile::tempdir;
//!
//! use upload_files::{RawFile, UploadConfig, UploadSet, Violation};
//!
//! fn main() -> Result<()> {
//!     let dir = tempdir()?;
//!
//!     let config = UploadConfig::default()
//!         .save_file(format!("{}/%Y/%m/%d_%g_%f", dir.path().display()))
//!         .max_file_size(10)
//!         .max_files(2)
//!         .unique(true);
//!
//!     let fields = vec![
//!         ("avatar".to_string(), vec![RawFile::from_bytes("me.png", "abcde")]),
//!         ("backup".to_string(), vec![RawFile::from_bytes("me.png", "abcde")]),
//!     ];
//!
//!     let set = UploadSet::new(fields, &config);
//!
//!     assert_eq!(set.len(), 1);
//!     assert!(matches!(
//!         set.check_per_file(&config),
//!         Err(Violation::DuplicateFilename { .. })
//!     ));
//!
//!     let paths = set.write_all(&config)?;
//!     assert_eq!(std::fs::read(&paths[0])?, b"abcde");
//!
//!     dir.close()?;
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![deny(nonstandard_style)]
#![warn(missing_docs, unreachable_pub)]

mod config;
mod entry;
mod error;
mod limits;
mod set;
mod utils;
mod writer;

pub mod template;

pub use config::UploadConfig;

pub use entry::{FileEntry, Open, RawFile};

pub use set::UploadSet;

pub use error::{Error, Violation};

pub(crate) type Result<T, E = Error> = std::result::Result<T, E>;
