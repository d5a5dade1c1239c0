// Each test binary pulls in only the helpers it needs.
#![allow(dead_code)]

use catsemu_core::cartridge::{compute_header_checksum, NINTENDO_LOGO};
use catsemu_core::gameboy::GameBoy;

/// Minimal 32 KiB image with `code` placed at the entry point 0x0100.
/// The header area is left zeroed; loading logs a warning but succeeds.
pub fn plain_rom(code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    rom[0x0100..0x0100 + code.len()].copy_from_slice(code);
    rom
}

/// 32 KiB image with a well-formed header (logo, title, checksum) and
/// `code` at 0x0150, reached through the canonical entry jump.
pub fn headered_rom(title: &[u8], cart_type: u8, code: &[u8]) -> Vec<u8> {
    let mut rom = vec![0u8; 0x8000];
    // Entry point: NOP; JP 0x0150
    rom[0x0100..0x0104].copy_from_slice(&[0x00, 0xC3, 0x50, 0x01]);
    rom[0x0104..0x0134].copy_from_slice(&NINTENDO_LOGO);
    rom[0x0134..0x0134 + title.len()].copy_from_slice(title);
    rom[0x0147] = cart_type;
    rom[0x014D] = compute_header_checksum(&rom);
    rom[0x0150..0x0150 + code.len()].copy_from_slice(code);
    rom
}

pub fn gb_with_code(code: &[u8]) -> GameBoy {
    let mut gb = GameBoy::new();
    gb.load_rom(plain_rom(code)).unwrap();
    gb
}
