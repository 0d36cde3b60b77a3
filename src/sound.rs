use beep::beep;
use std::error::Error;

/// The engine only exposes the sound countdown; turning that level into
/// noise is the host's job. `update` is called once per timer tick with
/// "countdown above zero".
pub trait Sound {
    fn update(&mut self, active: bool) -> Result<(), Box<dyn Error>>;
}

const SIMPLEBEEP_PITCH: u16 = 2093; // C

/// single fixed-pitch tone, switched on the level edges so the device is
/// not re-poked sixty times a second
pub struct SimpleBeep {
    is_beeping: bool,
}

impl SimpleBeep {
    pub fn new() -> Self {
        SimpleBeep { is_beeping: false }
    }
}

impl Sound for SimpleBeep {
    fn update(&mut self, active: bool) -> Result<(), Box<dyn Error>> {
        if active != self.is_beeping {
            beep(if active { SIMPLEBEEP_PITCH } else { 0 })?;
            self.is_beeping = active;
        }
        Ok(())
    }
}

impl Drop for SimpleBeep {
    fn drop(&mut self) {
        if self.is_beeping {
            let _ = beep(0);
        }
    }
}

pub struct Mute;

impl Mute {
    pub fn new() -> Self {
        Mute
    }
}

impl Sound for Mute {
    fn update(&mut self, _active: bool) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}
