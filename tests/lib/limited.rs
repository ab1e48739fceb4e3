use std::{
    fmt,
    io::{self, Cursor, Read},
};

use bytes::Bytes;
use rand::Rng;

use upload_files::Open;

pub const LIMITED: usize = 8;

/// Yields at most `limit` bytes per read.
pub struct Limited<T> {
    io: T,
    limit: usize,
    length: u64,
}

#[allow(dead_code)]
impl<T> Limited<T> {
    pub fn new(io: T, limit: usize) -> Self {
        tracing::info!("Limited reader by {}", limit);

        Self {
            io,
            limit,
            length: 0,
        }
    }

    pub fn random(io: T) -> Self {
        Self::new(io, rand::thread_rng().gen_range(1..LIMITED))
    }

    pub fn limit(&self) -> usize {
        self.limit
    }
}

impl<T> fmt::Debug for Limited<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Limited")
            .field("limit", &self.limit)
            .field("length", &self.length)
            .finish()
    }
}

impl<T> Read for Limited<T>
where
    T: Read,
{
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, io::Error> {
        let n = buf.len().min(self.limit);
        let n = self.io.read(&mut buf[..n])?;
        self.length += n as u64;
        Ok(n)
    }
}

/// Content opened as a randomly fragmented reader.
#[derive(Debug, Clone)]
pub struct LimitedContent(pub Bytes);

impl Open for LimitedContent {
    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        Ok(Box::new(Limited::random(Cursor::new(self.0.clone()))))
    }
}
