use std::error::Error;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use vip8::debug::Debugger;
use vip8::display::{Display, MonoTermDisplay};
use vip8::input::{Input, StdinInput};
use vip8::interpreter::Chip8Interpreter;
use vip8::sound::{Mute, SimpleBeep, Sound};

/// display refresh and timer tick cadence
const FRAME: Duration = Duration::from_micros(16_667);
/// instructions per frame; roughly 700 per second at 60Hz
const STEPS_PER_FRAME: u32 = 12;

#[derive(Parser)]
#[command(version, about = "CHIP-8 emulator for the terminal")]
struct Cli {
    /// CHIP-8 ROM image to run
    rom: PathBuf,

    /// start in the interactive debugger instead of running
    #[arg(short, long)]
    debug: bool,

    /// keep the sound timer silent
    #[arg(long)]
    mute: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let mut chip = Chip8Interpreter::new();
    chip.load_rom(&fs::read(&cli.rom)?)?;

    if cli.debug {
        return repl(Debugger::new(chip));
    }

    if cli.mute {
        run(chip, &mut Mute::new())
    } else {
        run(chip, &mut SimpleBeep::new())
    }
}

fn run(mut chip: Chip8Interpreter, sound: &mut dyn Sound) -> Result<(), Box<dyn Error>> {
    let mut input = StdinInput::new()?;
    let mut display = MonoTermDisplay::new()?;

    loop {
        // terminals only report presses, never releases, so key state is
        // rebuilt each frame from whatever arrived since the last one
        chip.clear_keys();
        for &key in input.peek_keys()? {
            chip.set_key(key, true);
        }
        input.flush_keys()?;
        if input.quit_requested() {
            break;
        }

        // a bounded batch per frame; wait-for-key holds the program
        // counter rather than blocking, so this can never wedge
        for _ in 0..STEPS_PER_FRAME {
            chip.step()?;
        }
        chip.tick();

        if chip.take_frame_ready() {
            display.draw(chip.frame())?;
        }
        sound.update(chip.sound_active())?;

        spin_sleep::sleep(FRAME);
    }

    // shove some junk on stdout to stop the cli messing up the last frame
    for _ in 0..12 {
        println!();
    }
    Ok(())
}

/// Line-oriented debugger in the style of a classic machine monitor.
fn repl(mut dbg: Debugger) -> Result<(), Box<dyn Error>> {
    println!("s=step  b <addr>=break  r <slot>=remove  p <r|i|s|k|m|d>=print  c=continue  d=to-draw  q=quit");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            return Ok(());
        }
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (Some("s"), _) => {
                let pc = dbg.chip().pc();
                match dbg.step() {
                    Ok(i) => println!("{:#05x}: {}", pc, i),
                    Err(e) => {
                        println!("halted: {}", e);
                        return Ok(());
                    }
                }
            }
            (Some("b"), Some(addr)) => {
                match u16::from_str_radix(addr.trim_start_matches("0x"), 16) {
                    Ok(addr) => match dbg.add_breakpoint(addr) {
                        Some(slot) => println!("breakpoint {} armed at {:#05x}", slot, addr),
                        None => println!("all slots in use; remove one to continue"),
                    },
                    Err(_) => println!("not an address: {}", addr),
                }
            }
            (Some("b"), None) => {
                for (slot, addr) in dbg.breakpoints() {
                    println!("breakpoint {} at {:#05x}", slot, addr);
                }
            }
            (Some("r"), Some(slot)) => match slot.parse() {
                Ok(slot) => dbg.remove_breakpoint(slot),
                Err(_) => println!("not a slot number: {}", slot),
            },
            (Some("p"), Some("r")) => println!("{:02x?}", dbg.chip().registers()),
            (Some("p"), Some("i")) => println!(
                "pc={:#05x} i={:#05x} dt={} st={}",
                dbg.chip().pc(),
                dbg.chip().index(),
                dbg.chip().delay_timer(),
                dbg.chip().sound_timer()
            ),
            (Some("p"), Some("s")) => println!("{:03x?}", dbg.chip().stack()),
            (Some("p"), Some("k")) => println!("{:?}", dbg.chip().keys()),
            (Some("p"), Some("m")) => dump_memory(dbg.chip()),
            (Some("p"), Some("d")) => dump_frame(dbg.chip()),
            (Some("p"), _) => println!("p needs a component: r i s k m d"),
            (Some("c"), _) => {
                if !dbg.has_breakpoints() {
                    println!("no breakpoints; cannot continue");
                    continue;
                }
                match dbg.resume() {
                    Ok(pc) => println!("stopped at {:#05x}", pc),
                    Err(e) => {
                        println!("halted: {}", e);
                        return Ok(());
                    }
                }
            }
            (Some("d"), _) => match dbg.run_to_draw() {
                Ok(()) => dump_frame(dbg.chip()),
                Err(e) => {
                    println!("halted: {}", e);
                    return Ok(());
                }
            },
            (Some("q"), _) => return Ok(()),
            (Some(cmd), _) => println!("unknown command: {}", cmd),
            (None, _) => {}
        }
    }
}

/// four hex rows of sixteen bytes around the program counter
fn dump_memory(chip: &Chip8Interpreter) {
    let start = chip.pc() & 0xff0;
    for row in 0..4u16 {
        let addr = start + row * 16;
        if let Ok(bytes) = chip.memory(addr, 16) {
            let hex: Vec<String> = bytes.iter().map(|b| format!("{:02x}", b)).collect();
            println!("{:#05x}: {}", addr, hex.join(" "));
        }
    }
}

fn dump_frame(chip: &Chip8Interpreter) {
    for row in chip.frame().rows() {
        let line: String = row.iter().map(|&p| if p { '#' } else { '.' }).collect();
        println!("{}", line);
    }
}
