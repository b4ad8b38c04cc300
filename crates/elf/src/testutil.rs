//! Hand-built ELF images for unit tests.

use crate::endian::ByteOrder;
use crate::header::ET_EXEC;
use crate::ident::{
    ELF_MAGIC, EI_ABIVERSION, EI_CLASS, EI_DATA, EI_NIDENT, EI_OSABI, EI_VERSION, EV_CURRENT,
    Layout,
};
use crate::section::{SHT_STRTAB, SectionHeader};
use crate::segment::ProgramHeader;

/// Field writer mirroring `FieldReader`.
struct Writer {
    order: ByteOrder,
    wide: bool,
    buf: Vec<u8>,
}

impl Writer {
    fn new(layout: Layout) -> Self {
        Self {
            order: layout.order,
            wide: layout.class.is_64(),
            buf: Vec::new(),
        }
    }

    fn u16(&mut self, v: u16) {
        match self.order {
            ByteOrder::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn u32(&mut self, v: u32) {
        match self.order {
            ByteOrder::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn u64(&mut self, v: u64) {
        match self.order {
            ByteOrder::Little => self.buf.extend_from_slice(&v.to_le_bytes()),
            ByteOrder::Big => self.buf.extend_from_slice(&v.to_be_bytes()),
        }
    }

    fn word(&mut self, v: u64) {
        if self.wide {
            self.u64(v);
        } else {
            self.u32(u32::try_from(v).expect("value fits in ELF32 word"));
        }
    }
}

/// File header fields with a raw `e_type`, so invalid headers can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawFileHeader {
    pub e_type: u16,
    pub e_machine: u16,
    pub e_version: u32,
    pub e_entry: u64,
    pub e_phoff: u64,
    pub e_shoff: u64,
    pub e_flags: u32,
    pub e_ehsize: u16,
    pub e_phentsize: u16,
    pub e_phnum: u16,
    pub e_shentsize: u16,
    pub e_shnum: u16,
    pub e_shstrndx: u16,
}

impl RawFileHeader {
    /// Defaults: `ET_EXEC`, `EM_X86_64`, entry=0x401000, no tables,
    /// sizes matching the class.
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            e_type: ET_EXEC,
            e_machine: 62,
            e_version: 1,
            e_entry: 0x0040_1000,
            e_phoff: 0,
            e_shoff: 0,
            e_flags: 0,
            e_ehsize: layout.class.ehsize(),
            e_phentsize: layout.class.phentsize(),
            e_phnum: 0,
            e_shentsize: layout.class.shentsize(),
            e_shnum: 0,
            e_shstrndx: 0,
        }
    }
}

/// Identification bytes for `layout`.
pub(crate) fn encode_ident(layout: Layout) -> [u8; EI_NIDENT] {
    let mut b = [0u8; EI_NIDENT];
    b[..4].copy_from_slice(&ELF_MAGIC);
    b[EI_CLASS] = layout.class.ident_byte();
    b[EI_DATA] = layout.order.ident_byte();
    b[EI_VERSION] = EV_CURRENT;
    b[EI_OSABI] = 0;
    b[EI_ABIVERSION] = 0;
    b
}

/// Encode a complete file header, identification included.
pub(crate) fn encode_ehdr(layout: Layout, h: &RawFileHeader) -> Vec<u8> {
    let mut w = Writer::new(layout);
    w.buf.extend_from_slice(&encode_ident(layout));
    w.u16(h.e_type);
    w.u16(h.e_machine);
    w.u32(h.e_version);
    w.word(h.e_entry);
    w.word(h.e_phoff);
    w.word(h.e_shoff);
    w.u32(h.e_flags);
    w.u16(h.e_ehsize);
    w.u16(h.e_phentsize);
    w.u16(h.e_phnum);
    w.u16(h.e_shentsize);
    w.u16(h.e_shnum);
    w.u16(h.e_shstrndx);
    w.buf
}

/// Encode one section header.
pub(crate) fn encode_shdr(layout: Layout, s: &SectionHeader) -> Vec<u8> {
    let mut w = Writer::new(layout);
    w.u32(s.sh_name);
    w.u32(s.sh_type);
    w.word(s.sh_flags);
    w.word(s.sh_addr);
    w.word(s.sh_offset);
    w.word(s.sh_size);
    w.u32(s.sh_link);
    w.u32(s.sh_info);
    w.word(s.sh_addralign);
    w.word(s.sh_entsize);
    w.buf
}

/// Encode one program header.
pub(crate) fn encode_phdr(layout: Layout, p: &ProgramHeader) -> Vec<u8> {
    let mut w = Writer::new(layout);
    w.u32(p.p_type);
    if layout.class.is_64() {
        w.u32(p.p_flags);
    }
    w.word(p.p_offset);
    w.word(p.p_vaddr);
    w.word(p.p_paddr);
    w.word(p.p_filesz);
    w.word(p.p_memsz);
    if !layout.class.is_64() {
        w.u32(p.p_flags);
    }
    w.word(p.p_align);
    w.buf
}

/// Builds an ELF image with named sections and program headers.
///
/// Image layout: file header, program header table, section contents,
/// `.shstrtab` contents, section header table. Section 0 is the NULL entry
/// and `.shstrtab` is always the last section.
pub(crate) struct ElfBuilder {
    layout: Layout,
    sections: Vec<(String, u32, Vec<u8>)>,
    segments: Vec<ProgramHeader>,
    shstrndx: Option<u16>,
    name_offsets: Vec<(usize, u32)>,
    section_sizes: Vec<(usize, u64)>,
    header_patch: Option<Box<dyn Fn(&mut RawFileHeader)>>,
}

impl ElfBuilder {
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            layout,
            sections: Vec::new(),
            segments: Vec::new(),
            shstrndx: None,
            name_offsets: Vec::new(),
            section_sizes: Vec::new(),
            header_patch: None,
        }
    }

    /// Append a section with contents `data`.
    pub(crate) fn section(&mut self, name: &str, sh_type: u32, data: Vec<u8>) -> &mut Self {
        self.sections.push((name.to_owned(), sh_type, data));
        self
    }

    /// Append a program header.
    pub(crate) fn segment(&mut self, phdr: ProgramHeader) -> &mut Self {
        self.segments.push(phdr);
        self
    }

    /// Override `e_shstrndx`.
    pub(crate) fn shstrndx(&mut self, index: u16) -> &mut Self {
        self.shstrndx = Some(index);
        self
    }

    /// Override `sh_name` of the section at table index `index`.
    pub(crate) fn name_offset(&mut self, index: usize, sh_name: u32) -> &mut Self {
        self.name_offsets.push((index, sh_name));
        self
    }

    /// Override `sh_size` of the section at table index `index`.
    pub(crate) fn section_size(&mut self, index: usize, sh_size: u64) -> &mut Self {
        self.section_sizes.push((index, sh_size));
        self
    }

    /// Adjust the file header after all offsets are laid out.
    pub(crate) fn patch_header(&mut self, f: impl Fn(&mut RawFileHeader) + 'static) -> &mut Self {
        self.header_patch = Some(Box::new(f));
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let layout = self.layout;
        let class = layout.class;
        let ehsize = u64::from(class.ehsize());
        let phentsize = u64::from(class.phentsize());

        let phoff = ehsize;
        let mut cursor = phoff + phentsize * self.segments.len() as u64;

        let mut shstrtab = vec![0u8];
        let mut shdrs = vec![SectionHeader::default()];
        let mut contents = Vec::new();

        for (name, sh_type, data) in &self.sections {
            let sh_name = u32::try_from(shstrtab.len()).unwrap();
            shstrtab.extend_from_slice(name.as_bytes());
            shstrtab.push(0);
            shdrs.push(SectionHeader {
                sh_name,
                sh_type: *sh_type,
                sh_offset: cursor,
                sh_size: data.len() as u64,
                sh_addralign: 1,
                ..SectionHeader::default()
            });
            contents.extend_from_slice(data);
            cursor += data.len() as u64;
        }

        let shstrtab_name = u32::try_from(shstrtab.len()).unwrap();
        shstrtab.extend_from_slice(b".shstrtab\0");
        shdrs.push(SectionHeader {
            sh_name: shstrtab_name,
            sh_type: SHT_STRTAB,
            sh_offset: cursor,
            sh_size: shstrtab.len() as u64,
            sh_addralign: 1,
            ..SectionHeader::default()
        });
        contents.extend_from_slice(&shstrtab);
        cursor += shstrtab.len() as u64;

        for &(index, sh_name) in &self.name_offsets {
            shdrs[index].sh_name = sh_name;
        }
        for &(index, sh_size) in &self.section_sizes {
            shdrs[index].sh_size = sh_size;
        }

        let shnum = u16::try_from(shdrs.len()).unwrap();
        let mut hdr = RawFileHeader::new(layout);
        hdr.e_phoff = if self.segments.is_empty() { 0 } else { phoff };
        hdr.e_phnum = u16::try_from(self.segments.len()).unwrap();
        hdr.e_shoff = cursor;
        hdr.e_shnum = shnum;
        hdr.e_shstrndx = self.shstrndx.unwrap_or(shnum - 1);
        if let Some(patch) = &self.header_patch {
            patch(&mut hdr);
        }

        let mut image = encode_ehdr(layout, &hdr);
        for phdr in &self.segments {
            image.extend_from_slice(&encode_phdr(layout, phdr));
        }
        image.extend_from_slice(&contents);
        for shdr in &shdrs {
            image.extend_from_slice(&encode_shdr(layout, shdr));
        }
        image
    }
}
