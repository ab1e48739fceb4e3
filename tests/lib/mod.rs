#![allow(dead_code)]
#![allow(unused_imports)]

use std::{
    io::{self, Read},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use bytes::Bytes;
use upload_files::{Open, RawFile};

mod limited;
pub use limited::{Limited, LimitedContent};

pub fn tracing_init() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        // From env var: `RUST_LOG`
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}

/// A field with in-memory files.
pub fn field(name: &str, files: &[(&str, &'static str)]) -> (String, Vec<RawFile>) {
    (
        name.to_string(),
        files
            .iter()
            .map(|(filename, content)| RawFile::from_bytes(*filename, *content))
            .collect(),
    )
}

/// `{a: [5 bytes], b: [10 bytes], c: [15 bytes]}`
pub fn abc() -> Vec<(String, Vec<RawFile>)> {
    vec![
        field("a", &[("data1.txt", "abcde")]),
        field("b", &[("data2.txt", "abcdefghij")]),
        field("c", &[("data3.txt", "abcdefghijklmno")]),
    ]
}

/// Counts how often the content is opened and how often a reader is dropped.
#[derive(Debug, Clone, Default)]
pub struct Tracker {
    pub opened: Arc<AtomicUsize>,
    pub closed: Arc<AtomicUsize>,
}

impl Tracker {
    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct TrackedReader<R> {
    inner: R,
    closed: Arc<AtomicUsize>,
}

impl<R: Read> Read for TrackedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R> Drop for TrackedReader<R> {
    fn drop(&mut self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Content that is tracked and optionally fails after `fail_after` bytes.
#[derive(Debug, Clone)]
pub struct Tracked {
    pub content: Bytes,
    pub fail_after: Option<usize>,
    pub tracker: Tracker,
}

impl Tracked {
    pub fn new(content: &'static str) -> Self {
        Self {
            content: Bytes::from_static(content.as_bytes()),
            fail_after: None,
            tracker: Tracker::default(),
        }
    }

    pub fn failing(content: &'static str, fail_after: usize) -> Self {
        Self {
            fail_after: Some(fail_after),
            ..Self::new(content)
        }
    }
}

struct Broken<R> {
    inner: R,
    left: usize,
}

impl<R: Read> Read for Broken<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.left == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "stream broken"));
        }
        let n = buf.len().min(self.left);
        let n = self.inner.read(&mut buf[..n])?;
        self.left -= n;
        Ok(n)
    }
}

impl Open for Tracked {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        self.tracker.opened.fetch_add(1, Ordering::SeqCst);

        let inner: Box<dyn Read> = match self.fail_after {
            Some(left) => Box::new(Broken {
                inner: io::Cursor::new(self.content.clone()),
                left,
            }),
            None => Box::new(io::Cursor::new(self.content.clone())),
        };

        Ok(Box::new(TrackedReader {
            inner,
            closed: self.tracker.closed.clone(),
        }))
    }
}

/// Content whose handle can not be opened.
#[derive(Debug, Clone, Copy)]
pub struct Gone;

impl Open for Gone {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Err(io::Error::new(io::ErrorKind::NotFound, "temporary file is gone"))
    }
}
