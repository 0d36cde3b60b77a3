use crate::error::Chip8Error;
use crate::instruction::Instruction;
use crate::interpreter::Chip8Interpreter;

/// how many program-counter breakpoints can be armed at once
pub const MAX_BREAKPOINTS: usize = 10;

/// Run control and state access for an inspection front-end. Wraps a
/// machine passed in by the caller; there is no shared or global engine,
/// so dropping the debugger (or calling `into_inner`) hands the machine
/// back intact.
pub struct Debugger {
    chip: Chip8Interpreter,
    breakpoints: [Option<u16>; MAX_BREAKPOINTS],
}

impl Debugger {
    pub fn new(chip: Chip8Interpreter) -> Self {
        Debugger {
            chip,
            breakpoints: [None; MAX_BREAKPOINTS],
        }
    }

    /// reclaim the machine, e.g. to drop back into a normal run loop
    pub fn into_inner(self) -> Chip8Interpreter {
        self.chip
    }

    pub fn chip(&self) -> &Chip8Interpreter {
        &self.chip
    }

    pub fn chip_mut(&mut self) -> &mut Chip8Interpreter {
        &mut self.chip
    }

    /// arm a breakpoint in the first free slot; `None` when all slots are
    /// taken (free one with `remove_breakpoint` first)
    pub fn add_breakpoint(&mut self, addr: u16) -> Option<usize> {
        let slot = self.breakpoints.iter().position(|b| b.is_none())?;
        self.breakpoints[slot] = Some(addr);
        Some(slot)
    }

    pub fn remove_breakpoint(&mut self, slot: usize) {
        if let Some(b) = self.breakpoints.get_mut(slot) {
            *b = None;
        }
    }

    /// armed breakpoints as (slot, address)
    pub fn breakpoints(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.breakpoints
            .iter()
            .enumerate()
            .filter_map(|(slot, &b)| b.map(|addr| (slot, addr)))
    }

    pub fn has_breakpoints(&self) -> bool {
        self.breakpoints.iter().any(Option::is_some)
    }

    /// execute exactly one instruction
    pub fn step(&mut self) -> Result<Instruction, Chip8Error> {
        self.chip.step()
    }

    /// Run until the program counter lands on an armed breakpoint and
    /// return that address. Loops forever when nothing is armed, so check
    /// `has_breakpoints` first.
    pub fn resume(&mut self) -> Result<u16, Chip8Error> {
        loop {
            self.chip.step()?;
            let pc = self.chip.pc();
            if self.breakpoints.iter().flatten().any(|&b| b == pc) {
                return Ok(pc);
            }
        }
    }

    /// run until the next completed sprite draw
    pub fn run_to_draw(&mut self) -> Result<(), Chip8Error> {
        loop {
            self.chip.step()?;
            if self.chip.take_frame_ready() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine_with(rom: &[u8]) -> Chip8Interpreter {
        let mut chip = Chip8Interpreter::new();
        chip.load_rom(rom).unwrap();
        chip
    }

    #[test]
    fn test_breakpoint_slots_fill_then_refuse() {
        let mut dbg = Debugger::new(Chip8Interpreter::new());
        for i in 0..MAX_BREAKPOINTS {
            assert_eq!(dbg.add_breakpoint(0x200 + i as u16 * 2), Some(i));
        }
        assert_eq!(dbg.add_breakpoint(0x300), None);
        dbg.remove_breakpoint(4);
        assert_eq!(dbg.add_breakpoint(0x300), Some(4));
    }

    #[test]
    fn test_resume_stops_on_breakpoint() {
        // a run of no-op loads, then a jump back to the start
        let mut dbg = Debugger::new(machine_with(&[
            0x60, 0x01, // 0x200: LD V0
            0x61, 0x02, // 0x202: LD V1
            0x62, 0x03, // 0x204: LD V2
            0x12, 0x00, // 0x206: JP 0x200
        ]));
        dbg.add_breakpoint(0x204);
        assert_eq!(dbg.resume().unwrap(), 0x204);
        assert_eq!(dbg.chip().pc(), 0x204);
        // going round the loop stops at the same spot again
        assert_eq!(dbg.resume().unwrap(), 0x204);
    }

    #[test]
    fn test_run_to_draw() {
        let mut dbg = Debugger::new(machine_with(&[
            0x60, 0x05, // V0 = 5
            0xa0, 0x00, // I = glyph 0
            0xd0, 0x02, // draw two glyph rows at (V0, V0)
            0x12, 0x06, // spin
        ]));
        dbg.run_to_draw().unwrap();
        assert_eq!(dbg.chip().pc(), 0x206);
        assert!(dbg.chip().frame().pixel(5, 5));
    }

    #[test]
    fn test_step_reports_instruction() {
        let mut dbg = Debugger::new(machine_with(&[0x63, 0xab]));
        let i = dbg.step().unwrap();
        assert_eq!(i.to_string(), "LD V3, 0xab");
        assert_eq!(dbg.chip().registers()[0x3], 0xab);
    }

    #[test]
    fn test_errors_pass_through() {
        let mut dbg = Debugger::new(machine_with(&[0x00, 0xee]));
        assert_eq!(dbg.step(), Err(Chip8Error::StackUnderflow));
    }
}
