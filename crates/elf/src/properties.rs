//! Property tests over all four class/byte-order layouts.

use std::io::Cursor;

use proptest::prelude::*;

use crate::error::{ElfError, SizeField};
use crate::file::{ElfFile, Options, read_section};
use crate::header::{ET_CORE, ET_REL, FileHeader};
use crate::ident::{EI_CLASS, EI_DATA, Ident, Layout};
use crate::section::{SHT_PROGBITS, SectionHeader};
use crate::segment::ProgramHeader;
use crate::testutil::{ElfBuilder, RawFileHeader, encode_ehdr, encode_ident, encode_phdr, encode_shdr};

fn arb_layout() -> impl Strategy<Value = Layout> {
    proptest::sample::select(Layout::ALL.to_vec())
}

/// An address-width value that fits the layout's class.
fn arb_word(layout: Layout) -> BoxedStrategy<u64> {
    if layout.class.is_64() {
        any::<u64>().boxed()
    } else {
        any::<u32>().prop_map(u64::from).boxed()
    }
}

fn arb_file_header() -> impl Strategy<Value = (Layout, RawFileHeader)> {
    arb_layout().prop_flat_map(|layout| {
        (
            ET_REL..=ET_CORE,
            any::<u16>(),
            any::<u32>(),
            arb_word(layout),
            arb_word(layout),
            arb_word(layout),
            any::<u32>(),
            any::<(u16, u16, u16)>(),
        )
            .prop_map(move |(e_type, machine, version, entry, phoff, shoff, flags, counts)| {
                let mut h = RawFileHeader::new(layout);
                h.e_type = e_type;
                h.e_machine = machine;
                h.e_version = version;
                h.e_entry = entry;
                h.e_phoff = phoff;
                h.e_shoff = shoff;
                h.e_flags = flags;
                (h.e_phnum, h.e_shnum, h.e_shstrndx) = counts;
                (layout, h)
            })
    })
}

fn arb_section_header() -> impl Strategy<Value = (Layout, SectionHeader)> {
    arb_layout().prop_flat_map(|layout| {
        (
            any::<(u32, u32, u32, u32)>(),
            proptest::collection::vec(arb_word(layout), 6),
        )
            .prop_map(move |((sh_name, sh_type, sh_link, sh_info), w)| {
                let shdr = SectionHeader {
                    sh_name,
                    sh_type,
                    sh_flags: w[0],
                    sh_addr: w[1],
                    sh_offset: w[2],
                    sh_size: w[3],
                    sh_link,
                    sh_info,
                    sh_addralign: w[4],
                    sh_entsize: w[5],
                };
                (layout, shdr)
            })
    })
}

fn arb_program_header() -> impl Strategy<Value = (Layout, ProgramHeader)> {
    arb_layout().prop_flat_map(|layout| {
        (
            any::<(u32, u32)>(),
            proptest::collection::vec(arb_word(layout), 6),
        )
            .prop_map(move |((p_type, p_flags), w)| {
                let phdr = ProgramHeader {
                    p_type,
                    p_flags,
                    p_offset: w[0],
                    p_vaddr: w[1],
                    p_paddr: w[2],
                    p_filesz: w[3],
                    p_memsz: w[4],
                    p_align: w[5],
                };
                (layout, phdr)
            })
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn file_header_round_trip((layout, raw) in arb_file_header()) {
        let hdr = FileHeader::decode(&encode_ehdr(layout, &raw), layout).unwrap();
        prop_assert_eq!(hdr.e_type.raw(), raw.e_type);
        prop_assert_eq!(hdr.e_machine, raw.e_machine);
        prop_assert_eq!(hdr.e_version, raw.e_version);
        prop_assert_eq!(hdr.e_entry, raw.e_entry);
        prop_assert_eq!(hdr.e_phoff, raw.e_phoff);
        prop_assert_eq!(hdr.e_shoff, raw.e_shoff);
        prop_assert_eq!(hdr.e_flags, raw.e_flags);
        prop_assert_eq!(hdr.e_phnum, raw.e_phnum);
        prop_assert_eq!(hdr.e_shnum, raw.e_shnum);
        prop_assert_eq!(hdr.e_shstrndx, raw.e_shstrndx);
    }

    #[test]
    fn section_header_round_trip((layout, shdr) in arb_section_header()) {
        let decoded = SectionHeader::decode(&encode_shdr(layout, &shdr), layout).unwrap();
        prop_assert_eq!(decoded, shdr);
    }

    #[test]
    fn program_header_round_trip((layout, phdr) in arb_program_header()) {
        let decoded = ProgramHeader::decode(&encode_phdr(layout, &phdr), layout).unwrap();
        prop_assert_eq!(decoded, phdr);
    }

    #[test]
    fn any_magic_mutation_is_rejected(
        layout in arb_layout(),
        index in 0usize..4,
        delta in 1u8..=255,
    ) {
        let mut ident = encode_ident(layout);
        ident[index] = ident[index].wrapping_add(delta);
        let rejected = matches!(Ident::parse(&ident), Err(ElfError::BadMagic { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn unknown_class_is_rejected(layout in arb_layout(), class in 3u8..=255) {
        let mut ident = encode_ident(layout);
        ident[EI_CLASS] = class;
        let rejected = matches!(Ident::parse(&ident), Err(ElfError::UnsupportedClass { found }) if found == class);
        prop_assert!(rejected);
    }

    #[test]
    fn unknown_encoding_is_rejected(layout in arb_layout(), data in 3u8..=255) {
        let mut ident = encode_ident(layout);
        ident[EI_DATA] = data;
        let rejected = matches!(Ident::parse(&ident), Err(ElfError::UnsupportedEncoding { found }) if found == data);
        prop_assert!(rejected);
    }

    #[test]
    fn altered_size_field_is_named(
        layout in arb_layout(),
        which in 0usize..3,
        value in any::<u16>(),
    ) {
        let mut raw = RawFileHeader::new(layout);
        let (field, expected) = match which {
            0 => (SizeField::Header, &mut raw.e_ehsize),
            1 => (SizeField::SectionEntry, &mut raw.e_shentsize),
            _ => (SizeField::ProgramEntry, &mut raw.e_phentsize),
        };
        let expected_size = *expected;
        prop_assume!(value != expected_size);
        *expected = value;

        let err = FileHeader::decode(&encode_ehdr(layout, &raw), layout).unwrap_err();
        let named = matches!(
            err,
            ElfError::SizeMismatch { field: f, expected: e, found }
                if f == field && e == expected_size && found == value
        );
        prop_assert!(named);
    }

    #[test]
    fn fetch_returns_exact_bytes(
        layout in arb_layout(),
        a in proptest::collection::vec(any::<u8>(), 0..64),
        b in proptest::collection::vec(any::<u8>(), 0..64),
        c in proptest::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut builder = ElfBuilder::new(layout);
        builder.section("a", SHT_PROGBITS, a);
        builder.section("b", SHT_PROGBITS, b.clone());
        builder.section("c", SHT_PROGBITS, c);
        let image = builder.build();

        prop_assert_eq!(read_section(Cursor::new(&image), "b", Options::new()).unwrap(), b);
        let missing = matches!(
            read_section(Cursor::new(&image), "z", Options::new()),
            Err(ElfError::SectionNotFound { .. })
        );
        prop_assert!(missing);
        prop_assert!(ElfFile::read(Cursor::new(&image), Options::new()).is_ok());
    }
}
