use catsemu_core::input::button;
use winit::event::VirtualKeyCode;

/// Host keyboard to CHIP-8 hex keypad:
///
/// ```text
/// 1 2 3 4      1 2 3 C
/// Q W E R  ->  4 5 6 D
/// A S D F      7 8 9 E
/// Z X C V      A 0 B F
/// ```
pub fn chip8_key(key: VirtualKeyCode) -> Option<usize> {
    use VirtualKeyCode::*;
    Some(match key {
        Key1 => 0x1,
        Key2 => 0x2,
        Key3 => 0x3,
        Key4 => 0xC,
        Q => 0x4,
        W => 0x5,
        E => 0x6,
        R => 0xD,
        A => 0x7,
        S => 0x8,
        D => 0x9,
        F => 0xE,
        Z => 0xA,
        X => 0x0,
        C => 0xB,
        V => 0xF,
        _ => return None,
    })
}

/// Host keyboard to Game Boy buttons: arrows for the d-pad, Z/A and X/S for
/// A and B, Backspace for Select, Enter for Start.
pub fn gb_button(key: VirtualKeyCode) -> Option<usize> {
    use VirtualKeyCode::*;
    Some(match key {
        Right => button::RIGHT,
        Left => button::LEFT,
        Up => button::UP,
        Down => button::DOWN,
        Z | A => button::A,
        X | S => button::B,
        Back => button::SELECT,
        Return => button::START,
        _ => return None,
    })
}
