use std::{fs, path::Path};

use crate::error::CoreError;

pub const ROM_BANK_SIZE: usize = 0x4000;
pub const ERAM_SIZE: usize = 0x2000;

/// Smallest loadable cartridge image: bank 0 plus one switchable bank.
pub const MIN_ROM_SIZE: usize = 2 * ROM_BANK_SIZE;

/// The 48-byte compressed logo bitmap every licensed header carries at
/// 0x0104..0x0134.
pub const NINTENDO_LOGO: [u8; 48] = [
    0xCE, 0xED, 0x66, 0x66, 0xCC, 0x0D, 0x00, 0x0B, 0x03, 0x73, 0x00, 0x83,
    0x00, 0x0C, 0x00, 0x0D, 0x00, 0x08, 0x11, 0x1F, 0x88, 0x89, 0x00, 0x0E,
    0xDC, 0xCC, 0x6E, 0xE6, 0xDD, 0xDD, 0xD9, 0x99, 0xBB, 0xBB, 0x67, 0x63,
    0x6E, 0x0E, 0xEC, 0xCC, 0xDD, 0xDC, 0x99, 0x9F, 0xBB, 0xB9, 0x33, 0x3E,
];

/// Cartridge hardware declared at header byte 0x0147.
///
/// Every recognized kind behaves identically in this core: plain ROM with
/// MBC1-style bank-select and RAM-enable gating. The distinction is kept for
/// reporting only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartKind {
    Rom,
    Mbc1,
    Mbc1Battery,
    Mbc3Battery,
    Mbc5Battery,
    Unknown(u8),
}

impl CartKind {
    fn from_code(code: u8) -> Self {
        match code {
            0x00 => CartKind::Rom,
            0x01 => CartKind::Mbc1,
            0x03 => CartKind::Mbc1Battery,
            0x13 => CartKind::Mbc3Battery,
            0x1B => CartKind::Mbc5Battery,
            other => CartKind::Unknown(other),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CartKind::Rom => "ROM",
            CartKind::Mbc1 => "MBC1",
            CartKind::Mbc1Battery => "MBC1+BAT",
            CartKind::Mbc3Battery => "MBC3+BAT",
            CartKind::Mbc5Battery => "MBC5+BAT",
            CartKind::Unknown(_) => "Unknown",
        }
    }
}

pub struct Cartridge {
    pub rom: Vec<u8>,
    pub ram: Vec<u8>,
    pub title: String,
    pub cgb: bool,
    pub kind: CartKind,
    pub logo_ok: bool,
    pub checksum_ok: bool,
    rom_bank: usize,
    ram_enabled: bool,
}

impl Cartridge {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, CoreError> {
        let data = fs::read(path)?;
        Self::from_bytes(data)
    }

    pub fn from_bytes(data: Vec<u8>) -> Result<Self, CoreError> {
        if data.len() < MIN_ROM_SIZE {
            return Err(CoreError::RomTooSmall {
                size: data.len(),
                min: MIN_ROM_SIZE,
            });
        }

        let header = Header::parse(&data);
        let cart = Self {
            title: header.title(),
            cgb: header.cgb_flag(),
            kind: header.kind(),
            logo_ok: header.logo_matches(),
            checksum_ok: header.checksum_matches(),
            rom: data,
            ram: vec![0; ERAM_SIZE],
            rom_bank: 1,
            ram_enabled: false,
        };

        if !cart.checksum_ok {
            log::warn!("header checksum mismatch for \"{}\"", cart.title);
        }
        if !cart.logo_ok {
            log::warn!("logo bitmap missing or corrupt for \"{}\"", cart.title);
        }
        log::info!(
            "loaded ROM \"{}\" ({}, {} banks, CGB: {})",
            cart.title,
            cart.kind.label(),
            cart.rom.len() / ROM_BANK_SIZE,
            if cart.cgb { "yes" } else { "no" }
        );
        Ok(cart)
    }

    /// Currently selected switchable bank, clamped to the banks the image
    /// actually contains.
    pub fn rom_bank(&self) -> usize {
        let count = (self.rom.len() / ROM_BANK_SIZE).max(1);
        let bank = self.rom_bank % count;
        if bank == 0 && count > 1 {
            1
        } else {
            bank
        }
    }

    pub fn ram_enabled(&self) -> bool {
        self.ram_enabled
    }

    /// Return the mapper latches to their power-on state. ROM and RAM
    /// contents are left alone.
    pub fn reset(&mut self) {
        self.rom_bank = 1;
        self.ram_enabled = false;
    }

    pub fn read(&self, addr: u16) -> u8 {
        match addr {
            0x0000..=0x3FFF => self.rom.get(addr as usize).copied().unwrap_or(0xFF),
            0x4000..=0x7FFF => {
                let offset = self.rom_bank() * ROM_BANK_SIZE + (addr as usize - 0x4000);
                self.rom.get(offset).copied().unwrap_or(0xFF)
            }
            0xA000..=0xBFFF => {
                if self.ram_enabled {
                    self.ram[addr as usize - 0xA000]
                } else {
                    0xFF
                }
            }
            _ => 0xFF,
        }
    }

    pub fn write(&mut self, addr: u16, val: u8) {
        match addr {
            0x0000..=0x1FFF => self.ram_enabled = val & 0x0F == 0x0A,
            0x2000..=0x3FFF => {
                let bank = (val & 0x1F) as usize;
                self.rom_bank = if bank == 0 { 1 } else { bank };
            }
            // Upper bank bits and banking mode belong to full MBC1; the
            // gating model here ignores them.
            0x4000..=0x7FFF => {}
            0xA000..=0xBFFF => {
                if self.ram_enabled {
                    self.ram[addr as usize - 0xA000] = val;
                }
            }
            _ => {}
        }
    }
}

/// Title of a Game Boy Advance image. GBA cartridges are recognized but
/// never executed; the header title is the only field consumed.
pub fn gba_title(data: &[u8]) -> Option<String> {
    let raw = data.get(0x00A0..0x00AC)?;
    let end = raw.iter().position(|&b| b == 0).unwrap_or(raw.len());
    Some(String::from_utf8_lossy(&raw[..end]).trim().to_string())
}

struct Header<'a> {
    data: &'a [u8],
}

impl<'a> Header<'a> {
    fn parse(data: &'a [u8]) -> Self {
        Self { data }
    }

    fn title(&self) -> String {
        let mut slice = &self.data[0x0134..0x0144];
        if let Some(pos) = slice.iter().position(|&b| b == 0) {
            slice = &slice[..pos];
        }
        String::from_utf8_lossy(slice).trim().to_string()
    }

    fn cgb_flag(&self) -> bool {
        matches!(self.data[0x0143], 0x80 | 0xC0)
    }

    fn kind(&self) -> CartKind {
        CartKind::from_code(self.data[0x0147])
    }

    fn logo_matches(&self) -> bool {
        self.data[0x0104..0x0134] == NINTENDO_LOGO
    }

    fn checksum_matches(&self) -> bool {
        compute_header_checksum(self.data) == self.data[0x014D]
    }
}

/// Fold `c = c - byte - 1` over 0x0134..0x014D, the scheme the boot ROM
/// verifies against header byte 0x014D.
pub fn compute_header_checksum(data: &[u8]) -> u8 {
    data[0x0134..0x014D]
        .iter()
        .fold(0u8, |c, &b| c.wrapping_sub(b).wrapping_sub(1))
}
