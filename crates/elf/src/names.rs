//! Human-readable names for numeric ELF codes.
//!
//! Lookups never fail: unknown codes map to an `"Unknown …"` string.

use crate::header::{ET_CORE, ET_DYN, ET_EXEC, ET_HIOS, ET_LOOS, ET_LOPROC, ET_NONE, ET_REL};

/// Name of an `EI_CLASS` value.
#[must_use]
pub fn class_name(class: u8) -> &'static str {
    match class {
        0 => "Invalid class",
        1 => "32-bit objects",
        2 => "64-bit objects",
        _ => "Unknown class",
    }
}

/// Name of an `EI_DATA` value.
#[must_use]
pub fn data_name(data: u8) -> &'static str {
    match data {
        0 => "Invalid data encoding",
        1 => "Little-endian",
        2 => "Big-endian",
        _ => "Unknown data",
    }
}

/// Name of an `EI_VERSION` value.
#[must_use]
pub fn version_name(version: u8) -> &'static str {
    match version {
        0 => "Invalid",
        1 => "Current",
        _ => "Unknown version",
    }
}

/// Name of an `EI_OSABI` value.
#[must_use]
pub fn osabi_name(osabi: u8) -> &'static str {
    match osabi {
        0 => "No extensions or unspecified",
        1 => "Hewlett-Packard HP-UX",
        2 => "NetBSD",
        3 => "GNU",
        6 => "Sun Solaris",
        7 => "AIX",
        8 => "IRIX",
        9 => "FreeBSD",
        10 => "Compaq TRU64 UNIX",
        11 => "Novell Modesto",
        12 => "Open BSD",
        13 => "Open VMS",
        14 => "Hewlett-Packard Non-Stop Kernel",
        15 => "Amiga Research OS",
        16 => "The FenixOS highly scalable multi-core OS",
        17 => "Nuxi CloudABI",
        18 => "Stratus Technologies OpenVOS",
        _ => "Unknown osabi",
    }
}

/// Name of an `e_type` value, including the reserved ranges.
#[must_use]
pub fn type_name(e_type: u16) -> &'static str {
    match e_type {
        ET_NONE => "No file type",
        ET_REL => "Relocatable file",
        ET_EXEC => "Executable file",
        ET_DYN => "Shared object file",
        ET_CORE => "Core file",
        ET_LOOS..=ET_HIOS => "Operating system-specific",
        ET_LOPROC.. => "Processor-specific",
        _ => "Unknown type",
    }
}

/// Name of an `e_machine` value.
#[must_use]
pub fn machine_name(machine: u16) -> &'static str {
    match machine {
        0 => "No machine",
        1 => "AT&T WE 32100",
        2 => "SPARC",
        3 => "Intel 80386",
        4 => "Motorola 68000",
        5 => "Motorola 88000",
        6 => "Intel MCU",
        7 => "Intel 80860",
        8 => "MIPS I Architecture",
        9 => "IBM System/370 Processor",
        10 => "MIPS RS3000 Little-endian",
        15 => "Hewlett-Packard PA-RISC",
        18 => "Enhanced instruction set SPARC",
        19 => "Intel 80960",
        20 => "PowerPC",
        21 => "64-bit PowerPC",
        22 => "IBM System/390 Processor",
        23 => "IBM SPU/SPC",
        40 => "ARM 32-bit architecture (AARCH32)",
        41 => "Digital Alpha",
        42 => "Hitachi SH",
        43 => "SPARC Version 9",
        50 => "Intel IA-64 processor architecture",
        62 => "AMD x86-64 architecture",
        75 => "Digital VAX",
        83 => "Atmel AVR 8-bit microcontroller",
        88 => "Mitsubishi M32R",
        92 => "OpenRISC 32-bit embedded processor",
        94 => "Tensilica Xtensa Architecture",
        105 => "Texas Instruments embedded microcontroller msp430",
        106 => "Analog Devices Blackfin (DSP) processor",
        113 => "Altera Nios II soft-core processor",
        164 => "QUALCOMM DSP6 Processor",
        165 => "Intel 8051 and variants",
        183 => "ARM 64-bit architecture (AARCH64)",
        185 => "Atmel Corporation 32-bit microprocessor family",
        189 => "Xilinx MicroBlaze 32-bit RISC soft processor core",
        190 => "NVIDIA CUDA architecture",
        220 => "Zilog Z80",
        224 => "AMD GPU architecture",
        243 => "RISC-V",
        247 => "Linux BPF",
        258 => "LoongArch",
        _ => "Unknown machine",
    }
}

/// Name of a `p_type` value.
#[must_use]
pub fn segment_type_name(p_type: u32) -> &'static str {
    match p_type {
        0 => "NULL",
        1 => "LOAD",
        2 => "DYNAMIC",
        3 => "INTERP",
        4 => "NOTE",
        5 => "SHLIB",
        6 => "PHDR",
        7 => "TLS",
        0x6474_e550 => "GNU_EH_FRAME",
        0x6474_e551 => "GNU_STACK",
        0x6474_e552 => "GNU_RELRO",
        0x6000_0000..=0x6fff_ffff => "LOOS+",
        0x7000_0000..=0x7fff_ffff => "LOPROC+",
        _ => "UNKNOWN",
    }
}

/// Name of an `sh_type` value.
#[must_use]
pub fn section_type_name(sh_type: u32) -> &'static str {
    match sh_type {
        0 => "NULL",
        1 => "PROGBITS",
        2 => "SYMTAB",
        3 => "STRTAB",
        4 => "RELA",
        5 => "HASH",
        6 => "DYNAMIC",
        7 => "NOTE",
        8 => "NOBITS",
        9 => "REL",
        10 => "SHLIB",
        11 => "DYNSYM",
        14 => "INIT_ARRAY",
        15 => "FINI_ARRAY",
        16 => "PREINIT_ARRAY",
        17 => "GROUP",
        18 => "SYMTAB_SHNDX",
        0x6fff_fff6 => "GNU_HASH",
        0x6fff_fffe => "VERNEED",
        0x6fff_ffff => "VERSYM",
        0x6000_0000..=0x6fff_ffff => "LOOS+",
        0x7000_0000..=0x7fff_ffff => "LOPROC+",
        0x8000_0000..=0xffff_ffff => "LOUSER+",
        _ => "UNKNOWN",
    }
}
