//! Positioned, bounds-checked reads against a caller-owned file handle.

use std::io::{Read, Seek, SeekFrom};

use crate::error::{ElfError, Result};

/// A `Read + Seek` handle together with its total length.
///
/// Every read is checked against the length before anything is allocated,
/// so a corrupt size field cannot trigger an oversized allocation.
#[derive(Debug)]
pub(crate) struct Source<R> {
    inner: R,
    len: u64,
    verbose: bool,
}

impl<R: Read + Seek> Source<R> {
    /// Wraps `inner`, recording its length.
    pub(crate) fn new(mut inner: R, verbose: bool) -> Result<Self> {
        let len = inner.seek(SeekFrom::End(0))?;
        Ok(Self {
            inner,
            len,
            verbose,
        })
    }

    /// Total length of the underlying data.
    pub(crate) fn len(&self) -> u64 {
        self.len
    }

    /// Whether per-record diagnostics are enabled for this read.
    pub(crate) fn verbose(&self) -> bool {
        self.verbose
    }

    /// Ensures `offset..offset + len` lies within the file.
    fn check(&self, offset: u64, len: u64) -> Result<()> {
        let truncated = ElfError::Truncated {
            offset,
            len,
            file_len: self.len,
        };
        match offset.checked_add(len) {
            Some(end) if end <= self.len => Ok(()),
            _ => Err(truncated),
        }
    }

    /// Fills `buf` from `offset`.
    pub(crate) fn read_exact_at(&mut self, offset: u64, buf: &mut [u8]) -> Result<()> {
        self.check(offset, buf.len() as u64)?;
        if self.verbose {
            log::trace!("read {} bytes at {offset:#x}", buf.len());
        }
        self.inner.seek(SeekFrom::Start(offset))?;
        self.inner.read_exact(buf)?;
        Ok(())
    }

    /// Reads `size` bytes at `offset` into a freshly allocated buffer.
    pub(crate) fn read_vec_at(&mut self, offset: u64, size: u64) -> Result<Vec<u8>> {
        self.check(offset, size)?;
        let len = usize::try_from(size).map_err(|_| ElfError::Alloc { size })?;
        let mut buf = Vec::new();
        buf.try_reserve_exact(len)
            .map_err(|_| ElfError::Alloc { size })?;
        buf.resize(len, 0);
        self.read_exact_at(offset, &mut buf)?;
        Ok(buf)
    }
}
