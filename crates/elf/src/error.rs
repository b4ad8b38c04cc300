//! Error type shared by every stage of an ELF read.

use core::fmt;

/// Result type returned throughout this crate.
pub type Result<T> = core::result::Result<T, ElfError>;

/// Size field of the file header that is checked against the class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeField {
    /// `e_ehsize`: size of the file header itself.
    Header,
    /// `e_shentsize`: size of one section header table entry.
    SectionEntry,
    /// `e_phentsize`: size of one program header table entry.
    ProgramEntry,
}

impl fmt::Display for SizeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Header => write!(f, "ehsize"),
            Self::SectionEntry => write!(f, "shentsize"),
            Self::ProgramEntry => write!(f, "phentsize"),
        }
    }
}

/// Errors that can occur when reading an ELF file.
///
/// Every error is terminal for the operation that produced it.
#[derive(Debug, thiserror::Error)]
pub enum ElfError {
    /// The file does not start with `\x7fELF`.
    #[error("invalid ELF magic bytes {found:02x?}")]
    BadMagic {
        /// The four bytes found at the start of the file.
        found: [u8; 4],
    },
    /// `EI_VERSION` is not `EV_CURRENT`.
    #[error("unsupported file version {found} (expected 1)")]
    UnsupportedVersion {
        /// Identification version byte.
        found: u8,
    },
    /// `EI_CLASS` is neither `ELFCLASS32` nor `ELFCLASS64`.
    #[error("unsupported ELF class {found} (expected 1 or 2)")]
    UnsupportedClass {
        /// Identification class byte.
        found: u8,
    },
    /// `EI_DATA` is neither `ELFDATA2LSB` nor `ELFDATA2MSB`.
    #[error("unsupported data encoding {found} (expected 1 or 2)")]
    UnsupportedEncoding {
        /// Identification data-encoding byte.
        found: u8,
    },
    /// A declared header or entry size disagrees with the class.
    #[error("{field} mismatch; want {expected}; got {found}")]
    SizeMismatch {
        /// The mismatched field.
        field: SizeField,
        /// Size mandated by the class.
        expected: u16,
        /// Size declared in the file header.
        found: u16,
    },
    /// `e_type` is not `ET_REL`, `ET_EXEC`, `ET_DYN` or `ET_CORE`.
    #[error("unsupported file type {found}")]
    UnsupportedType {
        /// Declared object type.
        found: u16,
    },
    /// `e_shstrndx` is `SHN_UNDEF`.
    #[error("missing string table")]
    MissingStringTable,
    /// `e_shstrndx` points past the section header table.
    #[error("string table index {index} out of range ({count} sections)")]
    StringTableIndex {
        /// Declared string table section index.
        index: u16,
        /// Number of section header entries.
        count: u16,
    },
    /// A read or record falls outside the available data.
    #[error("truncated read of {len} bytes at offset {offset} (file is {file_len} bytes)")]
    Truncated {
        /// Start of the attempted read.
        offset: u64,
        /// Length of the attempted read.
        len: u64,
        /// Length of the data actually available.
        file_len: u64,
    },
    /// The underlying seek or read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// No section with the requested name exists.
    #[error("section {name} not found")]
    SectionNotFound {
        /// The requested section name.
        name: String,
    },
    /// A buffer for section data could not be allocated.
    #[error("cannot allocate {size} bytes")]
    Alloc {
        /// Requested allocation size.
        size: u64,
    },
}

impl ElfError {
    /// Returns a short, stable code identifying the kind of failure.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadMagic { .. } => "bad-magic",
            Self::UnsupportedVersion { .. } => "bad-version",
            Self::UnsupportedClass { .. } => "bad-class",
            Self::UnsupportedEncoding { .. } => "bad-encoding",
            Self::SizeMismatch { .. } => "size-mismatch",
            Self::UnsupportedType { .. } => "unsupported-type",
            Self::MissingStringTable => "missing-strtab",
            Self::StringTableIndex { .. } => "bad-strtab-index",
            Self::Truncated { .. } => "truncated",
            Self::Io(_) => "io",
            Self::SectionNotFound { .. } => "not-found",
            Self::Alloc { .. } => "alloc",
        }
    }
}
