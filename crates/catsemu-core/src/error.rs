use thiserror::Error;

/// Errors reported at the load/reset boundary. The frame loop itself never
/// fails: malformed instructions are skipped so the next frame can always be
/// produced.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A CHIP-8 ROM does not fit in the program area above 0x200.
    #[error("ROM too large: {size} bytes exceeds the {max}-byte program area")]
    RomTooLarge { size: usize, max: usize },

    /// A Game Boy ROM is shorter than one full 32 KiB bank pair, so it
    /// cannot carry a cartridge header.
    #[error("ROM too small: {size} bytes, expected at least {min}")]
    RomTooSmall { size: usize, min: usize },

    /// The underlying file read failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An operation was invoked in a state that cannot honor it, e.g.
    /// stepping a Game Boy with no cartridge loaded.
    #[error("invalid state: {0}")]
    InvalidState(&'static str),
}
