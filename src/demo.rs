//! Built-in Game Boy demo programs, assembled by hand into valid cartridge
//! images. Useful for trying the emulator without a ROM file; they also give
//! the header parser something real to chew on.

use catsemu_core::cartridge::{compute_header_checksum, NINTENDO_LOGO};

pub const NAMES: [&str; 2] = ["scroll", "pattern"];

pub fn build(name: &str) -> Vec<u8> {
    match name {
        "scroll" => scroll(),
        _ => pattern(),
    }
}

fn image(title: &[u8], code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    // Entry point: NOP; JP 0x0150
    rom[0x0100..0x0104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    rom[0x0104..0x0134].copy_from_slice(&NINTENDO_LOGO);
    rom[0x0134..0x0134 + title.len()].copy_from_slice(title);
    rom[0x014D] = compute_header_checksum(&rom);
    rom[0x0150..0x0150 + code.len()].copy_from_slice(code);
    rom
}

/// Fills a tile with stripes, floods the map, then bumps SCX/SCY once per
/// frame, synchronized on the LY=144 edge.
fn scroll() -> Vec<u8> {
    #[rustfmt::skip]
    let code = [
        0x3E, 0x91,             // 0150  LD A,0x91
        0xE0, 0x40,             // 0152  LDH (LCDC),A
        0x3E, 0xE4,             // 0154  LD A,0xE4
        0xE0, 0x47,             // 0156  LDH (BGP),A
        0x21, 0x00, 0x80,       // 0158  LD HL,0x8000
        0x06, 0x10,             // 015B  LD B,16
        0x3E, 0xAA,             // 015D  LD A,0xAA
        0x22,                   // 015F  LD (HL+),A     ; stripe tile 0
        0x2F,                   // 0160  CPL
        0x05,                   // 0161  DEC B
        0x20, 0xFB,             // 0162  JR NZ,015F
        0x21, 0x00, 0x98,       // 0164  LD HL,0x9800
        0x01, 0x00, 0x04,       // 0167  LD BC,0x0400
        0xAF,                   // 016A  XOR A
        0x22,                   // 016B  LD (HL+),A     ; map -> tile 0
        0x0B,                   // 016C  DEC BC
        0x78,                   // 016D  LD A,B
        0xB1,                   // 016E  OR C
        0x20, 0xFA,             // 016F  JR NZ,016B
        0xF0, 0x44,             // 0171  LDH A,(LY)     ; leave the previous
        0xFE, 0x90,             // 0173  CP 0x90        ; VBlank first
        0x28, 0xFA,             // 0175  JR Z,0171
        0xF0, 0x44,             // 0177  LDH A,(LY)     ; then catch the
        0xFE, 0x90,             // 0179  CP 0x90        ; next LY=144 edge
        0x20, 0xFA,             // 017B  JR NZ,0177
        0xF0, 0x43,             // 017D  LDH A,(SCX)
        0x3C,                   // 017F  INC A
        0xE0, 0x43,             // 0180  LDH (SCX),A
        0xF0, 0x42,             // 0182  LDH A,(SCY)
        0x3C,                   // 0184  INC A
        0xE0, 0x42,             // 0185  LDH (SCY),A
        0x18, 0xE8,             // 0187  JR 0171
    ];
    image(b"SCROLL DEMO", &code)
}

/// Paints four distinct tiles and cycles the map through them, then parks in
/// a busy loop. A static image, but every background fetch path runs.
fn pattern() -> Vec<u8> {
    #[rustfmt::skip]
    let code = [
        0x3E, 0x91,             // 0150  LD A,0x91
        0xE0, 0x40,             // 0152  LDH (LCDC),A
        0x3E, 0xE4,             // 0154  LD A,0xE4
        0xE0, 0x47,             // 0156  LDH (BGP),A
        0x21, 0x00, 0x80,       // 0158  LD HL,0x8000
        0x06, 0x10,             // 015B  LD B,16
        0x3E, 0x00,             // 015D  LD A,0x00      ; tile 0: blank
        0x22,                   // 015F  LD (HL+),A
        0x05,                   // 0160  DEC B
        0x20, 0xFC,             // 0161  JR NZ,015F
        0x06, 0x08,             // 0163  LD B,8         ; tile 1: checker
        0x3E, 0xAA,             // 0165  LD A,0xAA
        0x22,                   // 0167  LD (HL+),A
        0x3E, 0x55,             // 0168  LD A,0x55
        0x22,                   // 016A  LD (HL+),A
        0x05,                   // 016B  DEC B
        0x20, 0xF7,             // 016C  JR NZ,0165
        0x06, 0x08,             // 016E  LD B,8         ; tile 2: bars
        0x3E, 0xFF,             // 0170  LD A,0xFF
        0x22,                   // 0172  LD (HL+),A
        0x3E, 0x00,             // 0173  LD A,0x00
        0x22,                   // 0175  LD (HL+),A
        0x05,                   // 0176  DEC B
        0x20, 0xF7,             // 0177  JR NZ,0170
        0x06, 0x10,             // 0179  LD B,16        ; tile 3: solid
        0x3E, 0xFF,             // 017B  LD A,0xFF
        0x22,                   // 017D  LD (HL+),A
        0x05,                   // 017E  DEC B
        0x20, 0xFC,             // 017F  JR NZ,017D
        0x21, 0x00, 0x98,       // 0181  LD HL,0x9800
        0x0E, 0x00,             // 0184  LD C,0
        0x06, 0x00,             // 0186  LD B,0
        0x79,                   // 0188  LD A,C         ; map entry = col & 3
        0xE6, 0x03,             // 0189  AND 3
        0x22,                   // 018B  LD (HL+),A
        0x0C,                   // 018C  INC C
        0x79,                   // 018D  LD A,C
        0xFE, 0x20,             // 018E  CP 32
        0x20, 0xF6,             // 0190  JR NZ,0188
        0x0E, 0x00,             // 0192  LD C,0
        0x04,                   // 0194  INC B
        0x78,                   // 0195  LD A,B
        0xFE, 0x20,             // 0196  CP 32
        0x20, 0xEE,             // 0198  JR NZ,0188
        0x18, 0xFE,             // 019A  JR 019A        ; done
    ];
    image(b"PATTERN DEMO", &code)
}
