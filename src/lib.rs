///
/// ## Design
///
/// * the interpreter is the single owner of memory, registers, stack,
///   timers, framebuffer and key state; the host drives it by alternating
///   `step()` with fixed-rate `tick()` calls and reads the frame back for
///   presentation
/// * a fetched word decodes into a tagged `Instruction` first and executes
///   by matching on the variant directly, so there is no opcode table to
///   precompute and nothing to look up at runtime
/// * display, input and sound sit behind traits so alternative front-ends
///   can be plugged in; the provided implementations render to a TUI
///   canvas in-console
/// * bad opcodes, stack faults, out-of-range memory access and oversized
///   ROMs surface as typed results; the engine never retries or skips, so
///   recovery policy stays with the host
/// * `wait for key` re-executes with the program counter held rather than
///   suspending, leaving single-threaded hosts in control of the wall
///   clock spent waiting
///
/// Model
///
/// Host (main loop or debugger REPL)
///  |-- display, input, sound
///  `-- interpreter
///       |-- memory (glyph table + ROM)
///       |-- registers, index, program counter, call stack
///       |-- delay/sound timers
///       |-- framebuffer
///       `-- keypad
pub mod debug;
pub mod display;
pub mod error;
pub mod framebuffer;
pub mod input;
pub mod instruction;
pub mod interpreter;
pub mod memory;
pub mod sound;

/// bytes of addressable RAM
pub const MEM_SIZE: usize = 0x1000;
/// where ROM images are loaded and execution begins
pub const PROG_START: u16 = 0x200;
/// display width in pixels
pub const SCREEN_WIDTH: usize = 64;
/// display height in pixels
pub const SCREEN_HEIGHT: usize = 32;
