//! Byte-order-aware field extraction.
//!
//! [`FieldReader`] walks a record buffer front to back, decoding each field
//! with the [`ByteOrder`] chosen during identification. Record decoders never
//! branch on byte order themselves; they only pull fields in layout order.

/// ELF data encoding: two's complement, little-endian.
pub const ELFDATA2LSB: u8 = 1;

/// ELF data encoding: two's complement, big-endian.
pub const ELFDATA2MSB: u8 = 2;

/// Byte order of every multi-byte field in one ELF file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ByteOrder {
    /// `ELFDATA2LSB`.
    Little,
    /// `ELFDATA2MSB`.
    Big,
}

impl ByteOrder {
    /// Maps an `EI_DATA` byte to a byte order.
    ///
    /// Returns `None` for `ELFDATANONE` and any unknown encoding.
    #[must_use]
    pub fn from_ident(data: u8) -> Option<Self> {
        match data {
            ELFDATA2LSB => Some(Self::Little),
            ELFDATA2MSB => Some(Self::Big),
            _ => None,
        }
    }

    /// Returns the `EI_DATA` byte for this byte order.
    #[must_use]
    pub fn ident_byte(self) -> u8 {
        match self {
            Self::Little => ELFDATA2LSB,
            Self::Big => ELFDATA2MSB,
        }
    }

    /// Decode a `u16` from the first two bytes of `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b.len() < 2`. Callers must bounds-check first.
    #[must_use]
    pub fn u16(self, b: &[u8]) -> u16 {
        let bytes = *b.first_chunk().unwrap();
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    /// Decode a `u32` from the first four bytes of `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b.len() < 4`.
    #[must_use]
    pub fn u32(self, b: &[u8]) -> u32 {
        let bytes = *b.first_chunk().unwrap();
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    /// Decode a `u64` from the first eight bytes of `b`.
    ///
    /// # Panics
    ///
    /// Panics if `b.len() < 8`.
    #[must_use]
    pub fn u64(self, b: &[u8]) -> u64 {
        let bytes = *b.first_chunk().unwrap();
        match self {
            Self::Little => u64::from_le_bytes(bytes),
            Self::Big => u64::from_be_bytes(bytes),
        }
    }
}

/// Sequential field cursor over one record.
///
/// Each read returns the decoded value and advances by the field's width.
/// The caller must have checked that the buffer holds the whole record.
///
/// # Panics
///
/// Every read panics if it would run past the end of the buffer.
#[derive(Debug)]
pub struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
    order: ByteOrder,
}

impl<'a> FieldReader<'a> {
    /// Creates a reader positioned at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8], order: ByteOrder) -> Self {
        Self {
            data,
            pos: 0,
            order,
        }
    }

    /// Number of bytes consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.pos
    }

    /// Skips `n` bytes without decoding them.
    pub fn skip(&mut self, n: usize) {
        self.pos += n;
    }

    /// Reads one byte.
    ///
    /// # Panics
    ///
    /// Panics at the end of the buffer.
    pub fn u8(&mut self) -> u8 {
        let v = self.data[self.pos];
        self.pos += 1;
        v
    }

    /// Reads a `u16`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than two bytes remain.
    pub fn u16(&mut self) -> u16 {
        let v = self.order.u16(&self.data[self.pos..]);
        self.pos += 2;
        v
    }

    /// Reads a `u32`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than four bytes remain.
    pub fn u32(&mut self) -> u32 {
        let v = self.order.u32(&self.data[self.pos..]);
        self.pos += 4;
        v
    }

    /// Reads a `u64`.
    ///
    /// # Panics
    ///
    /// Panics if fewer than eight bytes remain.
    pub fn u64(&mut self) -> u64 {
        let v = self.order.u64(&self.data[self.pos..]);
        self.pos += 8;
        v
    }

    /// Reads an address-width field: four bytes when `wide` is false,
    /// eight bytes otherwise. The result is always widened to `u64`.
    ///
    /// # Panics
    ///
    /// Panics if the field runs past the end of the buffer.
    pub fn word(&mut self, wide: bool) -> u64 {
        if wide {
            self.u64()
        } else {
            u64::from(self.u32())
        }
    }
}
