//! ELF program header (segment) parsing.
//!
//! ELF32 and ELF64 program headers hold the same fields, but ELF64 moves
//! `p_flags` up next to `p_type` to keep the 8-byte fields aligned.

use std::io::{Read, Seek};

use crate::endian::FieldReader;
use crate::error::{ElfError, Result};
use crate::header::FileHeader;
use crate::ident::{Class, Layout};
use crate::io::Source;

/// Program header type: unused entry.
pub const PT_NULL: u32 = 0;
/// Program header type: loadable segment.
pub const PT_LOAD: u32 = 1;
/// Program header type: dynamic linking information.
pub const PT_DYNAMIC: u32 = 2;
/// Program header type: interpreter path.
pub const PT_INTERP: u32 = 3;
/// Program header type: auxiliary information.
pub const PT_NOTE: u32 = 4;
/// Program header type: the program header table itself.
pub const PT_PHDR: u32 = 6;
/// Program header type: thread-local storage template.
pub const PT_TLS: u32 = 7;

/// Segment flag: executable.
pub const PF_X: u32 = 0x1;
/// Segment flag: writable.
pub const PF_W: u32 = 0x2;
/// Segment flag: readable.
pub const PF_R: u32 = 0x4;

/// Parsed program header entry, widened to 64-bit fields for both classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgramHeader {
    /// Segment type.
    pub p_type: u32,
    /// Segment flags (read/write/execute).
    pub p_flags: u32,
    /// Offset of the segment data in the file.
    pub p_offset: u64,
    /// Virtual address of the segment.
    pub p_vaddr: u64,
    /// Physical address of the segment, where relevant.
    pub p_paddr: u64,
    /// Size of the segment data in the file.
    pub p_filesz: u64,
    /// Size of the segment in memory.
    pub p_memsz: u64,
    /// Required alignment of the segment.
    pub p_align: u64,
}

impl ProgramHeader {
    /// Decode one program header from the start of `data`.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Truncated`] if `data` is shorter than the class's
    /// program header size. Nothing is read in that case.
    pub fn decode(data: &[u8], layout: Layout) -> Result<Self> {
        let size = layout.class.phentsize();
        if data.len() < usize::from(size) {
            return Err(ElfError::Truncated {
                offset: 0,
                len: u64::from(size),
                file_len: data.len() as u64,
            });
        }

        let mut r = FieldReader::new(data, layout.order);
        let phdr = match layout.class {
            Class::Elf32 => Self {
                p_type: r.u32(),
                p_offset: u64::from(r.u32()),
                p_vaddr: u64::from(r.u32()),
                p_paddr: u64::from(r.u32()),
                p_filesz: u64::from(r.u32()),
                p_memsz: u64::from(r.u32()),
                p_flags: r.u32(),
                p_align: u64::from(r.u32()),
            },
            Class::Elf64 => Self {
                p_type: r.u32(),
                p_flags: r.u32(),
                p_offset: r.u64(),
                p_vaddr: r.u64(),
                p_paddr: r.u64(),
                p_filesz: r.u64(),
                p_memsz: r.u64(),
                p_align: r.u64(),
            },
        };
        Ok(phdr)
    }

    /// Returns `true` for `PT_LOAD` segments.
    #[must_use]
    pub fn is_load(&self) -> bool {
        self.p_type == PT_LOAD
    }
}

/// Decode every program header, in table order.
pub(crate) fn read_program_headers<R: Read + Seek>(
    src: &mut Source<R>,
    layout: Layout,
    hdr: &FileHeader,
) -> Result<Vec<ProgramHeader>> {
    // An empty table has no extent, so e_phoff is not checked.
    if hdr.e_phnum == 0 {
        return Ok(Vec::new());
    }
    let entsize = usize::from(hdr.e_phentsize);
    let table_size = u64::from(hdr.e_phnum) * u64::from(hdr.e_phentsize);
    let table = src.read_vec_at(hdr.e_phoff, table_size)?;

    let mut segments = Vec::with_capacity(usize::from(hdr.e_phnum));
    for (index, entry) in table.chunks_exact(entsize.max(1)).enumerate() {
        let phdr = ProgramHeader::decode(entry, layout)?;
        if src.verbose() {
            log::debug!("program header [{index}]: {phdr:?}");
        }
        segments.push(phdr);
    }
    Ok(segments)
}
