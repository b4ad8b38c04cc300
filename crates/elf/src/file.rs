//! Read sequencing: identification, file header, string table, then tables.
//!
//! [`ElfFile::read`] decodes everything up front. [`read_section`] shares the
//! same setup but then walks the section header table lazily and stops at the
//! first section with the requested name.

use std::io::{Read, Seek};

use crate::error::Result;
use crate::header::FileHeader;
use crate::ident::{EI_NIDENT, Ident, Layout};
use crate::io::Source;
use crate::section::{self, SectionHeader, StringTable};
use crate::segment::{self, ProgramHeader};

/// Per-read configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    verbose: bool,
}

impl Options {
    /// Default options: no per-record diagnostics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit a `log::debug!` record for every decoded header.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Whether per-record diagnostics are enabled.
    #[must_use]
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// A fully parsed ELF file: identification, file header, section name
/// string table, and every section and program header in table order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElfFile {
    ident: Ident,
    header: FileHeader,
    strtab: Option<StringTable>,
    sections: Vec<SectionHeader>,
    segments: Vec<ProgramHeader>,
}

impl ElfFile {
    /// Parse every header of the ELF file behind `reader`.
    ///
    /// The reader is only read and seeked; opening and closing it is left to
    /// the caller. Pass `&mut file` to keep using the handle afterwards.
    ///
    /// # Errors
    ///
    /// Returns the first [`ElfError`](crate::ElfError) raised by any step.
    /// Nothing is returned from a failed read.
    pub fn read<R: Read + Seek>(reader: R, options: Options) -> Result<Self> {
        let mut src = Source::new(reader, options.is_verbose())?;
        let (ident, header, strtab) = setup(&mut src)?;
        let layout = ident.layout;
        let sections = section::read_section_headers(&mut src, layout, &header, Some(&strtab))?;
        let segments = segment::read_program_headers(&mut src, layout, &header)?;

        Ok(Self {
            ident,
            header,
            strtab: Some(strtab),
            sections,
            segments,
        })
    }

    /// Returns the identification fields.
    #[must_use]
    pub fn ident(&self) -> &Ident {
        &self.ident
    }

    /// Returns the class and byte order this file was decoded with.
    #[must_use]
    pub fn layout(&self) -> Layout {
        self.ident.layout
    }

    /// Returns the parsed file header.
    #[must_use]
    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Returns the virtual address of the entry point.
    #[must_use]
    pub fn entry_point(&self) -> u64 {
        self.header.e_entry
    }

    /// Returns the section name string table, unless released.
    #[must_use]
    pub fn string_table(&self) -> Option<&StringTable> {
        self.strtab.as_ref()
    }

    /// Resolves a section name offset.
    ///
    /// Returns `None` if the offset is outside the string table or the table
    /// has been released.
    #[must_use]
    pub fn name(&self, offset: u32) -> Option<&str> {
        self.strtab.as_ref()?.get(offset)
    }

    /// Resolves the name of a section.
    #[must_use]
    pub fn section_name(&self, shdr: &SectionHeader) -> Option<&str> {
        self.name(shdr.sh_name)
    }

    /// Returns all section headers in table order.
    #[must_use]
    pub fn sections(&self) -> &[SectionHeader] {
        &self.sections
    }

    /// Returns all program headers in table order.
    #[must_use]
    pub fn segments(&self) -> &[ProgramHeader] {
        &self.segments
    }

    /// Returns an iterator over `PT_LOAD` program headers.
    pub fn load_segments(&self) -> impl Iterator<Item = &ProgramHeader> {
        self.segments.iter().filter(|p| p.is_load())
    }

    /// Finds the first section with the given name.
    #[must_use]
    pub fn find_section_by_name(&self, name: &str) -> Option<&SectionHeader> {
        let strtab = self.strtab.as_ref()?;
        self.sections
            .iter()
            .find(|s| strtab.get_bytes(s.sh_name) == Some(name.as_bytes()))
    }

    /// Finds the first section with the given type.
    #[must_use]
    pub fn find_section_by_type(&self, sh_type: u32) -> Option<&SectionHeader> {
        self.sections.iter().find(|s| s.sh_type == sh_type)
    }

    /// Copies a section's contents out of the file behind `reader`.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::Truncated`](crate::ElfError::Truncated) if the
    /// section extends past the end of the file, or an I/O or allocation
    /// error.
    pub fn section_data<R: Read + Seek>(&self, reader: R, shdr: &SectionHeader) -> Result<Vec<u8>> {
        let mut src = Source::new(reader, false)?;
        src.read_vec_at(shdr.sh_offset, shdr.sh_size)
    }

    /// Drops the string table and the header lists.
    ///
    /// Calling this more than once is harmless. Name lookups return `None`
    /// afterwards.
    pub fn release(&mut self) {
        self.strtab = None;
        self.sections = Vec::new();
        self.segments = Vec::new();
    }
}

/// Fetch the contents of the first section named `name`.
///
/// Only the identification, the file header, the string table and as many
/// section headers as needed to find the match are read. Names are compared
/// exactly; with duplicate names the first in table order wins.
///
/// # Errors
///
/// Returns [`ElfError::SectionNotFound`](crate::ElfError::SectionNotFound) if
/// no section has that name, or the first error raised during setup.
pub fn read_section<R: Read + Seek>(reader: R, name: &str, options: Options) -> Result<Vec<u8>> {
    let mut src = Source::new(reader, options.is_verbose())?;
    let (ident, header, strtab) = setup(&mut src)?;
    let (_, data) = section::find_section(&mut src, ident.layout, &header, &strtab, name)?;
    Ok(data)
}

/// Steps shared by both entry points.
fn setup<R: Read + Seek>(src: &mut Source<R>) -> Result<(Ident, FileHeader, StringTable)> {
    let mut bytes = [0u8; EI_NIDENT];
    src.read_exact_at(0, &mut bytes)?;
    let ident = Ident::parse(&bytes)?;
    if src.verbose() {
        log::debug!(
            "ident: {:?}, version {}, osabi {}, abiversion {}",
            ident.layout,
            ident.version,
            ident.osabi,
            ident.abiversion
        );
    }

    let header = FileHeader::read(src, ident.layout)?;
    let strtab = StringTable::read(src, ident.layout, &header)?;
    Ok((ident, header, strtab))
}
