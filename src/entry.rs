use std::{
    fmt,
    fs::File,
    io::{self, Cursor, Read},
    path::PathBuf,
};

use bytes::Bytes;
use http::HeaderMap;
use tracing::trace;

use crate::{utils::parse_content_type, Result};

/// Opens the content of an uploaded file.
///
/// The returned reader is dropped, and so closed, as soon as the caller is
/// done with it.
pub trait Open: Send + Sync {
    /// Opens a new reader over the content.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

/// In-memory content.
impl Open for Bytes {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Cursor::new(self.clone())))
    }
}

/// In-memory content.
impl Open for Vec<u8> {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(self.as_slice()))
    }
}

/// Content spooled to disk by the decoder.
impl Open for PathBuf {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(File::open(self)?))
    }
}

/// A file part as delivered by the multipart decoder.
pub struct RawFile {
    /// The filename sent by the client.
    pub filename: String,
    /// The declared size in bytes.
    pub size: u64,
    /// The part headers.
    pub headers: HeaderMap,
    content: Box<dyn Open>,
}

impl RawFile {
    /// Creates a file part with empty headers.
    pub fn new<C>(filename: impl Into<String>, size: u64, content: C) -> Self
    where
        C: Open + 'static,
    {
        Self {
            filename: filename.into(),
            size,
            headers: HeaderMap::new(),
            content: Box::new(content),
        }
    }

    /// Creates an in-memory file part, its size is the length of `content`.
    pub fn from_bytes(filename: impl Into<String>, content: impl Into<Bytes>) -> Self {
        let content = content.into();
        Self::new(filename, content.len() as u64, content)
    }

    /// Sets the part headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Opens the content.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.content.open()
    }
}

impl fmt::Debug for RawFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawFile")
            .field("filename", &self.filename)
            .field("size", &self.size)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

/// An uploaded file kept in an [`UploadSet`](crate::UploadSet).
#[derive(Debug)]
pub struct FileEntry {
    name: String,
    raw: RawFile,
}

impl FileEntry {
    pub(crate) fn new(name: String, raw: RawFile) -> Self {
        Self { name, raw }
    }

    /// The name of the field the file was submitted under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The original filename.
    pub fn filename(&self) -> &str {
        &self.raw.filename
    }

    /// The declared size in bytes.
    pub fn size(&self) -> u64 {
        self.raw.size
    }

    /// The part headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.raw.headers
    }

    /// The parsed `Content-Type` header, if any.
    pub fn content_type(&self) -> Option<mime::Mime> {
        parse_content_type(&self.raw.headers)
    }

    /// The decoder's descriptor.
    pub fn raw(&self) -> &RawFile {
        &self.raw
    }

    /// Gives back the decoder's descriptor.
    pub fn into_raw(self) -> RawFile {
        self.raw
    }

    /// Opens the content.
    pub fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.raw.open()
    }

    /// Reads the whole content to bytes.
    pub fn bytes(&self) -> Result<Bytes> {
        let mut reader = self.open()?;
        let mut buf = Vec::new();
        reader.read_to_end(&mut buf)?;
        trace!("read {} {} bytes {}/{}", self.name, self.raw.filename, buf.len(), self.raw.size);
        Ok(Bytes::from(buf))
    }
}
