//! ELF identification (`e_ident`) parsing.
//!
//! The first 16 bytes of every ELF file fix the class and byte order used to
//! decode everything that follows. [`Ident::parse`] validates them and yields
//! the [`Layout`] that the rest of a read is bound to.

use crate::endian::ByteOrder;
use crate::error::{ElfError, Result};

/// ELF magic bytes: `\x7fELF`.
pub const ELF_MAGIC: [u8; 4] = [0x7f, b'E', b'L', b'F'];

/// Size of the identification prefix.
pub const EI_NIDENT: usize = 16;

/// Byte offset of the class in `e_ident`.
pub const EI_CLASS: usize = 4;
/// Byte offset of the data encoding in `e_ident`.
pub const EI_DATA: usize = 5;
/// Byte offset of the file version in `e_ident`.
pub const EI_VERSION: usize = 6;
/// Byte offset of the OS/ABI in `e_ident`.
pub const EI_OSABI: usize = 7;
/// Byte offset of the ABI version in `e_ident`.
pub const EI_ABIVERSION: usize = 8;

/// ELF class: 32-bit objects.
pub const ELFCLASS32: u8 = 1;

/// ELF class: 64-bit objects.
pub const ELFCLASS64: u8 = 2;

/// The only defined ELF version.
pub const EV_CURRENT: u8 = 1;

/// Width of address and offset fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Class {
    /// `ELFCLASS32`: 4-byte addresses and offsets.
    Elf32,
    /// `ELFCLASS64`: 8-byte addresses and offsets.
    Elf64,
}

impl Class {
    /// Maps an `EI_CLASS` byte to a class.
    #[must_use]
    pub fn from_ident(class: u8) -> Option<Self> {
        match class {
            ELFCLASS32 => Some(Self::Elf32),
            ELFCLASS64 => Some(Self::Elf64),
            _ => None,
        }
    }

    /// Returns the `EI_CLASS` byte for this class.
    #[must_use]
    pub fn ident_byte(self) -> u8 {
        match self {
            Self::Elf32 => ELFCLASS32,
            Self::Elf64 => ELFCLASS64,
        }
    }

    /// Size of the file header (`e_ehsize`).
    #[must_use]
    pub fn ehsize(self) -> u16 {
        match self {
            Self::Elf32 => 52,
            Self::Elf64 => 64,
        }
    }

    /// Size of one section header (`e_shentsize`).
    #[must_use]
    pub fn shentsize(self) -> u16 {
        match self {
            Self::Elf32 => 40,
            Self::Elf64 => 64,
        }
    }

    /// Size of one program header (`e_phentsize`).
    #[must_use]
    pub fn phentsize(self) -> u16 {
        match self {
            Self::Elf32 => 32,
            Self::Elf64 => 56,
        }
    }

    /// Returns `true` for 8-byte address fields.
    #[must_use]
    pub fn is_64(self) -> bool {
        self == Self::Elf64
    }
}

/// Decoding strategy for one file: its class and byte order.
///
/// Resolved once from the identification bytes and threaded through every
/// record decode that follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Address width.
    pub class: Class,
    /// Field byte order.
    pub order: ByteOrder,
}

impl Layout {
    /// All four supported layouts.
    pub const ALL: [Self; 4] = [
        Self::new(Class::Elf32, ByteOrder::Little),
        Self::new(Class::Elf32, ByteOrder::Big),
        Self::new(Class::Elf64, ByteOrder::Little),
        Self::new(Class::Elf64, ByteOrder::Big),
    ];

    /// Creates a layout from its parts.
    #[must_use]
    pub const fn new(class: Class, order: ByteOrder) -> Self {
        Self { class, order }
    }
}

/// Parsed `e_ident` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ident {
    /// Raw identification bytes.
    pub bytes: [u8; EI_NIDENT],
    /// Class and byte order.
    pub layout: Layout,
    /// `EI_VERSION`, always [`EV_CURRENT`] once parsed.
    pub version: u8,
    /// `EI_OSABI`, uninterpreted.
    pub osabi: u8,
    /// `EI_ABIVERSION`, uninterpreted.
    pub abiversion: u8,
}

impl Ident {
    /// Parse and validate the identification prefix.
    ///
    /// Checks run in file order: magic, version, class, data encoding.
    ///
    /// # Errors
    ///
    /// Returns [`ElfError::BadMagic`], [`ElfError::UnsupportedVersion`],
    /// [`ElfError::UnsupportedClass`] or [`ElfError::UnsupportedEncoding`].
    pub fn parse(bytes: &[u8; EI_NIDENT]) -> Result<Self> {
        let magic = [bytes[0], bytes[1], bytes[2], bytes[3]];
        if magic != ELF_MAGIC {
            return Err(ElfError::BadMagic { found: magic });
        }

        if bytes[EI_VERSION] != EV_CURRENT {
            return Err(ElfError::UnsupportedVersion {
                found: bytes[EI_VERSION],
            });
        }

        let class = Class::from_ident(bytes[EI_CLASS]).ok_or(ElfError::UnsupportedClass {
            found: bytes[EI_CLASS],
        })?;
        let order = ByteOrder::from_ident(bytes[EI_DATA]).ok_or(ElfError::UnsupportedEncoding {
            found: bytes[EI_DATA],
        })?;

        Ok(Self {
            bytes: *bytes,
            layout: Layout::new(class, order),
            version: bytes[EI_VERSION],
            osabi: bytes[EI_OSABI],
            abiversion: bytes[EI_ABIVERSION],
        })
    }

    /// Address width.
    #[must_use]
    pub fn class(&self) -> Class {
        self.layout.class
    }

    /// Field byte order.
    #[must_use]
    pub fn order(&self) -> ByteOrder {
        self.layout.order
    }
}
