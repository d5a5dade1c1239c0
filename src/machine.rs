use std::path::Path;

use catsemu_core::{
    chip8::{self, Chip8},
    gameboy::GameBoy,
    ppu, CoreError,
};
use winit::event::VirtualKeyCode;

use crate::keymap;

/// Phosphor green on black for the CHIP-8 display.
const CHIP8_OFF: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];
const CHIP8_ON: [u8; 4] = [0x00, 0xFF, 0x00, 0xFF];

/// The classic DMG green ramp, lightest shade first.
const DMG_SHADES: [[u8; 4]; 4] = [
    [0x9B, 0xBC, 0x0F, 0xFF],
    [0x8B, 0xAC, 0x0F, 0xFF],
    [0x30, 0x62, 0x30, 0xFF],
    [0x0F, 0x38, 0x0F, 0xFF],
];

/// A loaded machine, as the shell sees it: something that ticks at 60 Hz,
/// owns a framebuffer, and eats key events.
pub enum Machine {
    Chip8 { vm: Box<Chip8>, rom: Vec<u8> },
    GameBoy(Box<GameBoy>),
}

impl Machine {
    /// Pick a core by file extension: `.gb`/`.gbc` boots the Game Boy,
    /// anything else is treated as a flat CHIP-8 program.
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let data = std::fs::read(path)?;
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_ascii_lowercase();
        match ext.as_str() {
            "gb" | "gbc" => Self::gameboy_from_bytes(data),
            _ => {
                let mut vm = Box::new(Chip8::new());
                vm.load_rom(&data)?;
                Ok(Machine::Chip8 { vm, rom: data })
            }
        }
    }

    pub fn gameboy_from_bytes(data: Vec<u8>) -> Result<Self, CoreError> {
        let mut gb = Box::new(GameBoy::new());
        gb.load_rom(data)?;
        Ok(Machine::GameBoy(gb))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Machine::Chip8 { .. } => "CHIP-8",
            Machine::GameBoy(_) => "Game Boy",
        }
    }

    /// Native framebuffer dimensions.
    pub fn dims(&self) -> (u32, u32) {
        match self {
            Machine::Chip8 { .. } => (chip8::SCREEN_WIDTH as u32, chip8::SCREEN_HEIGHT as u32),
            Machine::GameBoy(_) => (ppu::SCREEN_WIDTH as u32, ppu::SCREEN_HEIGHT as u32),
        }
    }

    pub fn default_scale(&self) -> u32 {
        match self {
            Machine::Chip8 { .. } => 9,
            Machine::GameBoy(_) => 3,
        }
    }

    /// Advance the machine by one 60 Hz tick.
    pub fn tick(&mut self) {
        match self {
            Machine::Chip8 { vm, .. } => vm.tick(),
            Machine::GameBoy(gb) => {
                if let Err(e) = gb.step_frame() {
                    log::error!("frame step failed: {e}");
                }
            }
        }
    }

    /// Paint the native framebuffer into an RGBA8 surface.
    pub fn render(&self, frame: &mut [u8]) {
        match self {
            Machine::Chip8 { vm, .. } => {
                for (cell, rgba) in vm.framebuffer().iter().zip(frame.chunks_exact_mut(4)) {
                    rgba.copy_from_slice(if *cell != 0 { &CHIP8_ON } else { &CHIP8_OFF });
                }
            }
            Machine::GameBoy(gb) => {
                for (color, rgba) in gb.framebuffer().iter().zip(frame.chunks_exact_mut(4)) {
                    rgba.copy_from_slice(&DMG_SHADES[(*color & 3) as usize]);
                }
            }
        }
    }

    pub fn key_event(&mut self, key: VirtualKeyCode, pressed: bool) {
        match self {
            Machine::Chip8 { vm, .. } => {
                if let Some(index) = keymap::chip8_key(key) {
                    vm.set_key(index, pressed);
                }
            }
            Machine::GameBoy(gb) => {
                if let Some(index) = keymap::gb_button(key) {
                    gb.set_button(index, pressed);
                }
            }
        }
    }

    /// One-shot audio cue (CHIP-8 sound timer expiry).
    pub fn take_bell(&mut self) -> bool {
        match self {
            Machine::Chip8 { vm, .. } => vm.take_bell(),
            Machine::GameBoy(_) => false,
        }
    }

    /// Return to the power-on state, keeping the loaded program.
    pub fn reset(&mut self) {
        match self {
            Machine::Chip8 { vm, rom } => {
                // The image was validated at load time.
                let _ = vm.load_rom(rom);
            }
            Machine::GameBoy(gb) => gb.reset(),
        }
    }

    pub fn debug_state(&self) -> String {
        match self {
            Machine::Chip8 { vm, .. } => format!(
                "delay:{} sound:{}",
                vm.delay_timer(),
                vm.sound_timer()
            ),
            Machine::GameBoy(gb) => gb.cpu.debug_state(),
        }
    }
}
