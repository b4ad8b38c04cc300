//! Plain-text rendering of parsed headers.

use std::io::{self, Write};

use elfhdr::names::{
    class_name, data_name, machine_name, osabi_name, section_type_name, segment_type_name,
    type_name, version_name,
};
use elfhdr::{Class, ElfFile, Ident, ProgramHeader, SectionHeader};

/// Formats an address-width value as wide as the class.
fn addr(class: Class, value: u64) -> String {
    match class {
        Class::Elf32 => format!("0x{value:08x}"),
        Class::Elf64 => format!("0x{value:016x}"),
    }
}

/// Print the identification bytes and their decoded meaning.
pub fn print_ident(w: &mut impl Write, ident: &Ident) -> io::Result<()> {
    let b = &ident.bytes;
    write!(w, "ident {:02x} {} {} {}", b[0], b[1] as char, b[2] as char, b[3] as char)?;
    for byte in &b[4..] {
        write!(w, " {byte:02x}")?;
    }
    writeln!(w)?;
    writeln!(w, "class {}", class_name(ident.class().ident_byte()))?;
    writeln!(w, "data {}", data_name(ident.order().ident_byte()))?;
    writeln!(w, "version {}", version_name(ident.version))?;
    writeln!(w, "osabi {} ({})", osabi_name(ident.osabi), ident.osabi)?;
    writeln!(w, "abiversion {}", ident.abiversion)?;
    writeln!(w)
}

/// Print the file header.
pub fn print_file_header(w: &mut impl Write, elf: &ElfFile) -> io::Result<()> {
    let class = elf.layout().class;
    let h = elf.header();
    let e_type = h.e_type.raw();
    writeln!(w, "type {} ({e_type})", type_name(e_type))?;
    writeln!(w, "machine {} (0x{:04x})", machine_name(h.e_machine), h.e_machine)?;
    writeln!(w, "version {}", h.e_version)?;
    writeln!(w, "entry {}", addr(class, h.e_entry))?;
    writeln!(w, "phoff {}", h.e_phoff)?;
    writeln!(w, "shoff {}", h.e_shoff)?;
    writeln!(w, "flags 0x{:08x}", h.e_flags)?;
    writeln!(w, "ehsize {}", h.e_ehsize)?;
    writeln!(w, "phentsize {}", h.e_phentsize)?;
    writeln!(w, "phnum {}", h.e_phnum)?;
    writeln!(w, "shentsize {}", h.e_shentsize)?;
    writeln!(w, "shnum {}", h.e_shnum)?;
    writeln!(w, "shstrndx {}", h.e_shstrndx)?;
    writeln!(w)
}

/// Print one section header, resolving its name through the string table.
pub fn print_section(
    w: &mut impl Write,
    elf: &ElfFile,
    index: usize,
    sh: &SectionHeader,
) -> io::Result<()> {
    let class = elf.layout().class;
    let name = elf.section_name(sh).unwrap_or("<unavailable>");
    writeln!(w, "section header [{index}]")?;
    writeln!(w, "name {name} ({})", sh.sh_name)?;
    writeln!(w, "type {} ({})", section_type_name(sh.sh_type), sh.sh_type)?;
    writeln!(w, "flags {}", addr(class, sh.sh_flags))?;
    writeln!(w, "addr {}", addr(class, sh.sh_addr))?;
    writeln!(w, "offset {}", addr(class, sh.sh_offset))?;
    writeln!(w, "size {}", sh.sh_size)?;
    writeln!(w, "link {}", sh.sh_link)?;
    writeln!(w, "info {}", sh.sh_info)?;
    writeln!(w, "addralign {}", addr(class, sh.sh_addralign))?;
    writeln!(w, "entsize {}", sh.sh_entsize)?;
    writeln!(w)
}

/// Print one program header.
pub fn print_segment(
    w: &mut impl Write,
    class: Class,
    index: usize,
    ph: &ProgramHeader,
) -> io::Result<()> {
    writeln!(w, "program header [{index}]")?;
    writeln!(w, "type {} ({})", segment_type_name(ph.p_type), ph.p_type)?;
    writeln!(w, "flags 0x{:08x}", ph.p_flags)?;
    writeln!(w, "offset {}", addr(class, ph.p_offset))?;
    writeln!(w, "vaddr {}", addr(class, ph.p_vaddr))?;
    writeln!(w, "paddr {}", addr(class, ph.p_paddr))?;
    writeln!(w, "filesz {}", ph.p_filesz)?;
    writeln!(w, "memsz {}", ph.p_memsz)?;
    writeln!(w, "align {}", addr(class, ph.p_align))?;
    writeln!(w)
}

/// Print everything [`ElfFile::read`] decoded.
pub fn print_elf(w: &mut impl Write, elf: &ElfFile) -> io::Result<()> {
    print_ident(w, elf.ident())?;
    print_file_header(w, elf)?;
    for (index, sh) in elf.sections().iter().enumerate() {
        print_section(w, elf, index, sh)?;
    }
    for (index, ph) in elf.segments().iter().enumerate() {
        print_segment(w, elf.layout().class, index, ph)?;
    }
    Ok(())
}

/// Hex dump `data`, 16 bytes per line, with offsets and an ASCII column.
pub fn hexdump(w: &mut impl Write, data: &[u8]) -> io::Result<()> {
    for (line, chunk) in data.chunks(16).enumerate() {
        write!(w, "{:08x} ", line * 16)?;
        for i in 0..16 {
            match chunk.get(i) {
                Some(byte) => write!(w, " {byte:02x}")?,
                None => write!(w, "   ")?,
            }
        }
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() || b == b' ' { b as char } else { '.' })
            .collect();
        writeln!(w, "  |{ascii}|")?;
    }
    Ok(())
}
