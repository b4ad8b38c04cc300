//! ELF section header and section name string table parsing.
//!
//! Provides the class-independent [`SectionHeader`] decoder, the owned
//! [`StringTable`] used to resolve section names, and the two ways of walking
//! the section header table: decoding every entry in order, or stopping at the
//! first entry whose name matches.

use std::io::{Read, Seek};

use crate::endian::FieldReader;
use crate::error::{ElfError, Result};
use crate::header::FileHeader;
use crate::ident::Layout;
use crate::io::Source;

/// Special section index: undefined.
pub const SHN_UNDEF: u16 = 0;

/// Section type: inactive entry.
pub const SHT_NULL: u32 = 0;
/// Section type: program-defined contents.
pub const SHT_PROGBITS: u32 = 1;
/// Section type: symbol table.
pub const SHT_SYMTAB: u32 = 2;
/// Section type: string table.
pub const SHT_STRTAB: u32 = 3;
/// Section type: relocation entries with addends.
pub const SHT_RELA: u32 = 4;
/// Section type: dynamic linking information.
pub const SHT_DYNAMIC: u32 = 6;
/// Section type: notes.
pub const SHT_NOTE: u32 = 7;
/// Section type: occupies no file space.
pub const SHT_NOBITS: u32 = 8;
/// Section type: relocation entries without addends.
pub const SHT_REL: u32 = 9;
/// Section type: dynamic symbol table.
pub const SHT_DYNSYM: u32 = 11;

/// Section flag: writable data.
pub const SHF_WRITE: u64 = 0x1;
/// Section flag: occupies memory during execution.
pub const SHF_ALLOC: u64 = 0x2;
/// Section flag: executable machine instructions.
pub const SHF_EXECINSTR: u64 = 0x4;

/// Parsed section header entry, widened to 64-bit fields for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SectionHeader {
    /// Offset into the section header string table for this section's name.
    pub sh_name: u32,
    /// Section type (`SHT_SYMTAB`, `SHT_STRTAB`, etc.).
    pub sh_type: u32,
    /// Section flags.
    pub sh_flags: u64,
    /// Virtual address of the section in memory (0 for non-loaded sections).
    pub sh_addr: u64,
    /// File offset of the section data.
    pub sh_offset: u64,
    /// Size of the section data in bytes.
    pub sh_size: u64,
    /// Associated section index.
    pub sh_link: u32,
    /// Extra info (interpretation depends on section type).
    pub sh_info: u32,
    /// Required alignment of the section.
    pub sh_addralign: u64,
    /// Size of each entry (for sections with fixed-size entries).
    pub sh_entsize: u64,
}

impl SectionHeader {
    /// Decode one section header from the start of `data`.
    ///
    /// Field order is the same for both classes; only the flags, address,
    /// offset, size, alignment and entry size fields change width.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Truncated`] if `data` is shorter than the class's
    /// section header size. Nothing is read in that case.
    pub fn decode(data: &[u8], layout: Layout) -> Result<Self> {
        let size = layout.class.shentsize();
        if data.len() < usize::from(size) {
            return Err(ElfError::Truncated {
                offset: 0,
                len: u64::from(size),
                file_len: data.len() as u64,
            });
        }

        let wide = layout.class.is_64();
        let mut r = FieldReader::new(data, layout.order);
        Ok(Self {
            sh_name: r.u32(),
            sh_type: r.u32(),
            sh_flags: r.word(wide),
            sh_addr: r.word(wide),
            sh_offset: r.word(wide),
            sh_size: r.word(wide),
            sh_link: r.u32(),
            sh_info: r.u32(),
            sh_addralign: r.word(wide),
            sh_entsize: r.word(wide),
        })
    }

    /// Read the entry at `index` of the section header table.
    pub(crate) fn read_at<R: Read + Seek>(
        src: &mut Source<R>,
        layout: Layout,
        hdr: &FileHeader,
        index: u16,
    ) -> Result<Self> {
        let entsize = hdr.e_shentsize;
        let offset = table_entry_offset(hdr.e_shoff, index, entsize, src.len())?;
        let mut buf = [0u8; 64];
        let buf = &mut buf[..usize::from(entsize)];
        src.read_exact_at(offset, buf)?;
        Self::decode(buf, layout)
    }
}

/// File offset of entry `index` in a table at `base` with `entsize`-byte entries.
pub(crate) fn table_entry_offset(base: u64, index: u16, entsize: u16, file_len: u64) -> Result<u64> {
    let rel = u64::from(index) * u64::from(entsize);
    base.checked_add(rel).ok_or(ElfError::Truncated {
        offset: base,
        len: rel,
        file_len,
    })
}

/// An owned copy of a NUL-terminated string table section.
///
/// Loaded once and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringTable {
    data: Box<[u8]>,
}

impl StringTable {
    /// Creates a string table from the raw section contents.
    #[must_use]
    pub fn new(data: impl Into<Box<[u8]>>) -> Self {
        Self { data: data.into() }
    }

    /// Size of the table in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the table holds no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw table contents.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Looks up the bytes of the string starting at `offset`.
    ///
    /// The view runs up to, not including, the next NUL byte, or to the end
    /// of the table if no terminator follows. Returns `None` if `offset` is
    /// not strictly less than the table size. An in-range offset that lands
    /// on a NUL yields `Some` with an empty name, which still counts as
    /// available.
    #[must_use]
    pub fn get_bytes(&self, offset: u32) -> Option<&[u8]> {
        let start = usize::try_from(offset).ok()?;
        let remaining = self.data.get(start..).filter(|r| !r.is_empty())?;
        let end = remaining
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(remaining.len());
        Some(&remaining[..end])
    }

    /// Looks up the string starting at `offset`.
    ///
    /// Returns `None` if the offset is out of bounds or the string is not
    /// valid UTF-8.
    #[must_use]
    pub fn get(&self, offset: u32) -> Option<&str> {
        core::str::from_utf8(self.get_bytes(offset)?).ok()
    }

    /// Locate and copy the section header string table.
    ///
    /// The string table's header is read directly at
    /// `e_shoff + e_shstrndx * e_shentsize`.
    pub(crate) fn read<R: Read + Seek>(
        src: &mut Source<R>,
        layout: Layout,
        hdr: &FileHeader,
    ) -> Result<Self> {
        if hdr.e_shstrndx == SHN_UNDEF {
            return Err(ElfError::MissingStringTable);
        }
        if hdr.e_shstrndx >= hdr.e_shnum {
            return Err(ElfError::StringTableIndex {
                index: hdr.e_shstrndx,
                count: hdr.e_shnum,
            });
        }

        let shdr = SectionHeader::read_at(src, layout, hdr, hdr.e_shstrndx)?;
        let data = src.read_vec_at(shdr.sh_offset, shdr.sh_size)?;
        if src.verbose() {
            log::debug!(
                "string table: section {} at {:#x}, {} bytes",
                hdr.e_shstrndx,
                shdr.sh_offset,
                data.len()
            );
        }
        Ok(Self::new(data))
    }
}

/// Decode every section header, in table order.
pub(crate) fn read_section_headers<R: Read + Seek>(
    src: &mut Source<R>,
    layout: Layout,
    hdr: &FileHeader,
    strtab: Option<&StringTable>,
) -> Result<Vec<SectionHeader>> {
    if hdr.e_shnum == 0 {
        return Ok(Vec::new());
    }
    let entsize = usize::from(hdr.e_shentsize);
    let table_size = u64::from(hdr.e_shnum) * u64::from(hdr.e_shentsize);
    let table = src.read_vec_at(hdr.e_shoff, table_size)?;

    let mut sections = Vec::with_capacity(usize::from(hdr.e_shnum));
    for (index, entry) in table.chunks_exact(entsize.max(1)).enumerate() {
        let shdr = SectionHeader::decode(entry, layout)?;
        if src.verbose() {
            let name = strtab.and_then(|t| t.get(shdr.sh_name));
            log::debug!("section [{index}] {}: {shdr:?}", name.unwrap_or("<unavailable>"));
        }
        sections.push(shdr);
    }
    Ok(sections)
}

/// Find the first section named `name` and copy out its contents.
///
/// Entries are read one at a time and the walk stops at the first match.
/// Sections whose name offset falls outside the string table are skipped.
pub(crate) fn find_section<R: Read + Seek>(
    src: &mut Source<R>,
    layout: Layout,
    hdr: &FileHeader,
    strtab: &StringTable,
    name: &str,
) -> Result<(SectionHeader, Vec<u8>)> {
    for index in 0..hdr.e_shnum {
        let shdr = SectionHeader::read_at(src, layout, hdr, index)?;
        match strtab.get_bytes(shdr.sh_name) {
            Some(n) if n == name.as_bytes() => {
                if src.verbose() {
                    log::debug!("section [{index}] {name} matched: {shdr:?}");
                }
                let data = src.read_vec_at(shdr.sh_offset, shdr.sh_size)?;
                return Ok((shdr, data));
            }
            Some(_) => {}
            None => {
                if src.verbose() {
                    log::debug!("section [{index}] has no resolvable name ({})", shdr.sh_name);
                }
            }
        }
    }

    Err(ElfError::SectionNotFound {
        name: name.to_owned(),
    })
}
