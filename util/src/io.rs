//! Helpers for draining and copying streams
//!
//! ```rust
//! use rld_util::io::StreamExt;
//! use rld_util::string::StrExt;
//!
//! let mut src = "some text".to_stream();
//! let mut dst: Vec<u8> = Vec::new();
//! assert_eq!(src.copy_into(&mut dst)?, 9);
//! assert_eq!(dst, b"some text");
//!
//! assert_eq!("again".to_stream().read_into_string()?, "again");
//! # Ok::<(), rld_util::io::IoError>(())
//! ```

use std::io::{self, Read, Write};
use std::string::FromUtf8Error;

/// Size of the intermediate buffer used by [copy_stream]
pub const COPY_BUFFER_SIZE: usize = 8 * 1024;

/// Errors raised by the stream helpers
#[derive(thiserror::Error, Debug)]
pub enum IoError {
    #[error("an I/O error occurred while reading")]
    Read(#[source] io::Error),
    #[error("an I/O error occurred while writing")]
    Write(#[source] io::Error),
    #[error("the stream does not contain valid UTF-8")]
    InvalidUtf8(#[from] FromUtf8Error),
}

impl IoError {
    /// Kind of the underlying [io::Error], if there is one
    pub fn io_error_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Read(e) | Self::Write(e) => Some(e.kind()),
            Self::InvalidUtf8(_) => None,
        }
    }
}

/// Read everything left in `reader` and decode it as UTF-8
pub fn read_to_string<R: Read + ?Sized>(reader: &mut R) -> Result<String, IoError> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(IoError::Read)?;
    Ok(String::from_utf8(buf)?)
}

/// Copy everything left in `from` into `to`, returning the number of bytes copied
///
/// Reads interrupted by a signal are retried. `to` is flushed at the end.
pub fn copy_stream<R, W>(from: &mut R, to: &mut W) -> Result<u64, IoError>
where
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut buf = [0u8; COPY_BUFFER_SIZE];
    let mut total = 0u64;
    loop {
        let n = match from.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(IoError::Read(e)),
        };
        to.write_all(&buf[..n]).map_err(IoError::Write)?;
        total += n as u64;
    }
    to.flush().map_err(IoError::Write)?;
    Ok(total)
}

/// Method chaining style access to [read_to_string] and [copy_stream]
pub trait StreamExt: Read {
    /// See [read_to_string]
    fn read_into_string(&mut self) -> Result<String, IoError> {
        read_to_string(self)
    }

    /// See [copy_stream]
    fn copy_into<W: Write + ?Sized>(&mut self, to: &mut W) -> Result<u64, IoError> {
        copy_stream(self, to)
    }
}

impl<R: Read + ?Sized> StreamExt for R {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    /// Yields `Interrupted` before every successful read
    struct Jittery<R> {
        inner: R,
        interrupt: bool,
    }

    impl<R: Read> Read for Jittery<R> {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.interrupt = !self.interrupt;
            if self.interrupt {
                return Err(io::Error::new(io::ErrorKind::Interrupted, "signal"));
            }
            self.inner.read(buf)
        }
    }

    struct Broken(io::ErrorKind);

    impl Read for Broken {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "broken"))
        }
    }

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(self.0, "broken"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn copies_more_than_one_buffer() -> anyhow::Result<()> {
        let data: Vec<u8> = (0..3 * COPY_BUFFER_SIZE + 17).map(|i| i as u8).collect();
        let mut out: Vec<u8> = Vec::new();
        let n = Cursor::new(&data).copy_into(&mut out)?;
        assert_eq!(n, data.len() as u64);
        assert_eq!(out, data);
        Ok(())
    }

    #[test]
    fn interrupted_reads_are_retried() -> anyhow::Result<()> {
        let mut src = Jittery {
            inner: Cursor::new(b"hello".to_vec()),
            interrupt: false,
        };
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(copy_stream(&mut src, &mut out)?, 5);
        assert_eq!(out, b"hello");
        Ok(())
    }

    #[test]
    fn read_and_write_failures_are_told_apart() {
        let mut out: Vec<u8> = Vec::new();
        let err = copy_stream(&mut Broken(io::ErrorKind::Other), &mut out).unwrap_err();
        assert!(matches!(err, IoError::Read(_)));
        assert_eq!(err.io_error_kind(), Some(io::ErrorKind::Other));

        let err = copy_stream(&mut Cursor::new(b"x"), &mut Broken(io::ErrorKind::BrokenPipe))
            .unwrap_err();
        assert!(matches!(err, IoError::Write(_)));
        assert_eq!(err.io_error_kind(), Some(io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn empty_stream() -> anyhow::Result<()> {
        let mut out: Vec<u8> = Vec::new();
        assert_eq!(Cursor::new(b"").copy_into(&mut out)?, 0);
        assert_eq!(Cursor::new(b"").read_into_string()?, "");
        Ok(())
    }

    #[test]
    fn invalid_utf8_is_reported() {
        let err = Cursor::new(vec![0x66u8, 0xff, 0x6f]).read_into_string().unwrap_err();
        assert!(matches!(err, IoError::InvalidUtf8(_)));
        assert_eq!(err.io_error_kind(), None);
    }
}
