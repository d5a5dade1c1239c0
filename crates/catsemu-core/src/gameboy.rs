use crate::{
    cartridge::Cartridge,
    cpu::Cpu,
    error::CoreError,
    mmu::Mmu,
    ppu::{SCREEN_HEIGHT, SCREEN_WIDTH},
};

/// T-states in one full frame: 154 scanlines of 456 dots.
pub const CYCLES_PER_FRAME: u32 = 70224;

/// Per-tick step budget. The cheapest instruction costs 4 T-states, so this
/// many steps always covers a frame; it also bounds the loop when the LCD is
/// switched off and no frame can complete.
const MAX_STEPS_PER_FRAME: u32 = CYCLES_PER_FRAME / 4;

pub struct GameBoy {
    pub cpu: Cpu,
    pub mmu: Mmu,
}

impl GameBoy {
    pub fn new() -> Self {
        Self {
            cpu: Cpu::new(),
            mmu: Mmu::new(),
        }
    }

    /// Parse and insert a cartridge, resetting the machine around it.
    pub fn load_rom(&mut self, data: Vec<u8>) -> Result<(), CoreError> {
        let cart = Cartridge::from_bytes(data)?;
        self.cpu = Cpu::new();
        self.mmu = Mmu::new();
        self.mmu.load_cart(cart);
        Ok(())
    }

    /// Reset to the post-boot state while keeping the loaded cartridge.
    pub fn reset(&mut self) {
        let cart = self.mmu.cart.take();
        self.cpu = Cpu::new();
        self.mmu = Mmu::new();
        if let Some(mut cart) = cart {
            cart.reset();
            self.mmu.load_cart(cart);
        }
    }

    pub fn rom_loaded(&self) -> bool {
        self.mmu.cart.is_some()
    }

    /// Run CPU steps, feeding each instruction's cycle count to the PPU,
    /// until a frame completes or the per-tick budget runs out. Returns
    /// whether a fresh frame is ready.
    pub fn step_frame(&mut self) -> Result<bool, CoreError> {
        if self.mmu.cart.is_none() {
            return Err(CoreError::InvalidState("no ROM loaded"));
        }

        self.mmu.ppu.clear_frame_flag();
        for _ in 0..MAX_STEPS_PER_FRAME {
            let cycles = self.cpu.step(&mut self.mmu);
            self.mmu.tick(cycles);
            if self.mmu.ppu.frame_ready() {
                break;
            }
        }
        Ok(self.mmu.ppu.frame_ready())
    }

    pub fn set_button(&mut self, index: usize, pressed: bool) {
        self.mmu.input.set_button(index, pressed);
    }

    /// 160x144 framebuffer of 2-bit color indices.
    pub fn framebuffer(&self) -> &[u8; SCREEN_WIDTH * SCREEN_HEIGHT] {
        self.mmu.ppu.framebuffer()
    }
}

impl Default for GameBoy {
    fn default() -> Self {
        Self::new()
    }
}
