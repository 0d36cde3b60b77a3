use thiserror::Error;

/// Fatal conditions raised by the emulation core.
///
/// None of these are recoverable from inside the engine; whether to abort,
/// reset or just report is the host's decision.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Chip8Error {
    /// the word at the program counter maps to no known instruction
    #[error("unknown opcode {opcode:#06x} at {pc:#05x}")]
    UnknownOpcode { opcode: u16, pc: u16 },

    /// the ROM image doesn't fit between the load offset and the top of RAM
    #[error("ROM is {size} bytes but only {max} fit above the load offset")]
    RomTooLarge { size: usize, max: usize },

    /// a call would push past the fixed stack capacity
    #[error("call depth exceeded {depth} entries")]
    StackOverflow { depth: usize },

    /// a return was executed with nothing on the stack
    #[error("return with an empty call stack")]
    StackUnderflow,

    /// a load or store fell outside the 4 KiB address space
    #[error("memory access out of bounds at {addr:#06x}")]
    MemoryOutOfBounds { addr: u16 },
}
