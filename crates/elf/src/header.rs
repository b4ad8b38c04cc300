//! ELF file header parsing.
//!
//! Decodes the 52-byte (ELF32) or 64-byte (ELF64) file header with the
//! [`Layout`] resolved from `e_ident`, then validates the object type and the
//! declared record sizes against the class.

use core::fmt;
use std::io::{Read, Seek};

use crate::endian::FieldReader;
use crate::error::{ElfError, Result, SizeField};
use crate::ident::{EI_NIDENT, Layout};
use crate::io::Source;

/// ELF type: no file type.
pub const ET_NONE: u16 = 0;
/// ELF type: relocatable object.
pub const ET_REL: u16 = 1;
/// ELF type: executable.
pub const ET_EXEC: u16 = 2;
/// ELF type: shared object (or PIE).
pub const ET_DYN: u16 = 3;
/// ELF type: core dump.
pub const ET_CORE: u16 = 4;
/// Start of the OS-specific type range.
pub const ET_LOOS: u16 = 0xfe00;
/// End of the OS-specific type range.
pub const ET_HIOS: u16 = 0xfeff;
/// Start of the processor-specific type range.
pub const ET_LOPROC: u16 = 0xff00;

/// Supported object file types.
///
/// OS-specific and processor-specific types exist in the format but are not
/// accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElfType {
    /// `ET_REL`.
    Rel,
    /// `ET_EXEC`.
    Exec,
    /// `ET_DYN`.
    Dyn,
    /// `ET_CORE`.
    Core,
}

impl ElfType {
    /// Maps a raw `e_type` to a supported type.
    #[must_use]
    pub fn from_raw(e_type: u16) -> Option<Self> {
        match e_type {
            ET_REL => Some(Self::Rel),
            ET_EXEC => Some(Self::Exec),
            ET_DYN => Some(Self::Dyn),
            ET_CORE => Some(Self::Core),
            _ => None,
        }
    }

    /// Returns the raw `e_type` value.
    #[must_use]
    pub fn raw(self) -> u16 {
        match self {
            Self::Rel => ET_REL,
            Self::Exec => ET_EXEC,
            Self::Dyn => ET_DYN,
            Self::Core => ET_CORE,
        }
    }
}

impl fmt::Display for ElfType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rel => write!(f, "REL"),
            Self::Exec => write!(f, "EXEC"),
            Self::Dyn => write!(f, "DYN"),
            Self::Core => write!(f, "CORE"),
        }
    }
}

/// Parsed ELF file header, widened to 64-bit fields for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Object file type.
    pub e_type: ElfType,
    /// Target machine architecture.
    pub e_machine: u16,
    /// Object file version.
    pub e_version: u32,
    /// Virtual address of the entry point.
    pub e_entry: u64,
    /// Offset of the program header table in the file.
    pub e_phoff: u64,
    /// Offset of the section header table in the file.
    pub e_shoff: u64,
    /// Processor-specific flags.
    pub e_flags: u32,
    /// Size of this header.
    pub e_ehsize: u16,
    /// Size of each program header entry.
    pub e_phentsize: u16,
    /// Number of program header entries.
    pub e_phnum: u16,
    /// Size of each section header entry.
    pub e_shentsize: u16,
    /// Number of section header entries.
    pub e_shnum: u16,
    /// Section header string table index.
    pub e_shstrndx: u16,
}

impl FileHeader {
    /// Decode a file header from `data`, which starts at file offset 0.
    ///
    /// `data` must hold at least the class's header size; the identification
    /// bytes are skipped, having been parsed already.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Truncated`] if `data` is too short,
    /// [`ElfError::UnsupportedType`] for any type other than `ET_REL`,
    /// `ET_EXEC`, `ET_DYN` or `ET_CORE`, and [`ElfError::SizeMismatch`] when
    /// `e_ehsize`, `e_shentsize` or `e_phentsize` differ from the class.
    #[expect(clippy::similar_names, reason = "field names follow the ELF format")]
    pub fn decode(data: &[u8], layout: Layout) -> Result<Self> {
        let class = layout.class;
        let ehsize = class.ehsize();
        if data.len() < usize::from(ehsize) {
            return Err(ElfError::Truncated {
                offset: 0,
                len: u64::from(ehsize),
                file_len: data.len() as u64,
            });
        }

        let wide = class.is_64();
        let mut r = FieldReader::new(data, layout.order);
        r.skip(EI_NIDENT);
        let e_type = r.u16();
        let e_machine = r.u16();
        let e_version = r.u32();
        let e_entry = r.word(wide);
        let e_phoff = r.word(wide);
        let e_shoff = r.word(wide);
        let e_flags = r.u32();
        let e_ehsize = r.u16();
        let e_phentsize = r.u16();
        let e_phnum = r.u16();
        let e_shentsize = r.u16();
        let e_shnum = r.u16();
        let e_shstrndx = r.u16();
        debug_assert_eq!(r.consumed(), usize::from(ehsize));

        let e_type = ElfType::from_raw(e_type).ok_or(ElfError::UnsupportedType { found: e_type })?;

        let sizes = [
            (SizeField::Header, ehsize, e_ehsize),
            (SizeField::SectionEntry, class.shentsize(), e_shentsize),
            (SizeField::ProgramEntry, class.phentsize(), e_phentsize),
        ];
        for (field, expected, found) in sizes {
            if expected != found {
                return Err(ElfError::SizeMismatch {
                    field,
                    expected,
                    found,
                });
            }
        }

        Ok(Self {
            e_type,
            e_machine,
            e_version,
            e_entry,
            e_phoff,
            e_shoff,
            e_flags,
            e_ehsize,
            e_phentsize,
            e_phnum,
            e_shentsize,
            e_shnum,
            e_shstrndx,
        })
    }

    /// Read and decode the file header at offset 0.
    pub(crate) fn read<R: Read + Seek>(src: &mut Source<R>, layout: Layout) -> Result<Self> {
        let mut buf = [0u8; 64];
        let buf = &mut buf[..usize::from(layout.class.ehsize())];
        src.read_exact_at(0, buf)?;
        let hdr = Self::decode(buf, layout)?;
        if src.verbose() {
            log::debug!("file header: {hdr:?}");
        }
        Ok(hdr)
    }
}
