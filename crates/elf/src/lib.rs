//! Portable ELF header and section reader.
//!
//! Reads the identification, file header, section headers, program headers
//! and section name string table of ELF32 and ELF64 files in either byte
//! order, through any `Read + Seek` handle. The class and byte order are
//! resolved once from `e_ident` and drive every later decode.
//!
//! Reading is read-only and does not interpret symbols, relocations or
//! dynamic linking information.
//!
//! # Usage
//!
//! ```no_run
//! use std::fs::File;
//!
//! use elfhdr::{ElfFile, Options};
//!
//! fn dump(path: &str) -> elfhdr::Result<()> {
//!     let mut file = File::open(path)?;
//!     let elf = ElfFile::read(&mut file, Options::new())?;
//!     for shdr in elf.sections() {
//!         let name = elf.section_name(shdr).unwrap_or("<unavailable>");
//!         println!("{name}: {} bytes at {:#x}", shdr.sh_size, shdr.sh_offset);
//!     }
//!
//!     let text = elfhdr::read_section(&mut file, ".text", Options::new())?;
//!     println!(".text is {} bytes", text.len());
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]

pub mod endian;
pub mod error;
pub mod file;
pub mod header;
pub mod ident;
mod io;
pub mod names;
pub mod section;
pub mod segment;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod testutil;

pub use endian::{ByteOrder, FieldReader};
pub use error::{ElfError, Result, SizeField};
pub use file::{ElfFile, Options, read_section};
pub use header::{ElfType, FileHeader};
pub use ident::{Class, Ident, Layout};
pub use section::{
    SHF_ALLOC, SHF_EXECINSTR, SHF_WRITE, SHN_UNDEF, SHT_NOBITS, SHT_PROGBITS, SHT_STRTAB,
    SHT_SYMTAB, SectionHeader, StringTable,
};
pub use segment::{PF_R, PF_W, PF_X, PT_LOAD, ProgramHeader};
