//! PSID playback driver.
//!
//! Wires the CPU, RAM and the sound chip's register file together, runs the
//! tune's init routine once, then alternates a frame's worth of CPU ticks
//! with one end-of-frame note reconstruction pass.

use crate::config::PlayerConfig;
use crate::devices::{VoiceBank, SID_BASE, SID_END};
use crate::error::{Error, Result};
use crate::notes::Note;
use crate::psid::PsidFile;
use crate::session::FrameClock;
use sid6502::{AddressSpace, LoadError, RamDevice, RegionId, CPU};

/// Size of the RAM region behind the chip registers.
const RAM_SIZE: usize = 0x10000;

/// Runs a PSID tune and collects the notes it plays.
///
/// # Example
///
/// ```no_run
/// use sid_notes::{Player, PlayerConfig, PsidFile};
///
/// # fn main() -> sid_notes::Result<()> {
/// let psid = PsidFile::read("Commando.sid")?;
/// let mut player = Player::new(&psid, PlayerConfig::default())?;
///
/// player.run_seconds(30.0)?;
/// let voices = player.finish();
/// println!("voice 1 played {} notes", voices[0].len());
/// # Ok(())
/// # }
/// ```
pub struct Player {
    cpu: CPU<AddressSpace>,
    voice_bank: RegionId,
    clock: FrameClock,
    config: PlayerConfig,
    play_address: u16,
    song: u16,
    overruns: u64,
}

impl Player {
    /// Loads the tune and runs its init routine for the configured song.
    ///
    /// # Errors
    ///
    /// - [`Error::UnsupportedPlayAddress`] if the tune has no play routine
    /// - [`Error::InvalidSong`] if the song number is out of range
    /// - [`Error::Load`] if the image runs past the top of memory
    /// - [`Error::InitTimeout`] if init does not return within its budget
    /// - [`Error::Execution`] if init hits an illegal opcode
    pub fn new(psid: &PsidFile, config: PlayerConfig) -> Result<Self> {
        if psid.play_address == 0 {
            return Err(Error::UnsupportedPlayAddress);
        }

        let songs = psid.songs.max(1);
        let song = config.song.unwrap_or(psid.start_song.max(1));
        if song == 0 || song > songs {
            return Err(Error::InvalidSong { song, songs });
        }

        if psid.load_address as usize + psid.data.len() > RAM_SIZE {
            return Err(LoadError::ImageTooLarge {
                base: psid.load_address,
                len: psid.data.len(),
            }
            .into());
        }

        // Chip registers are attached first so they shadow RAM
        let mut memory = AddressSpace::new();
        let voice_bank = memory.attach(
            "sid",
            SID_BASE,
            SID_END,
            Box::new(VoiceBank::new(config.region.clock_hz() as f64)),
        )?;
        let ram = memory.attach("ram", 0x0000, 0xFFFF, Box::new(RamDevice::new(RAM_SIZE)))?;

        // The image goes straight into RAM. Bytes under the chip window must
        // not reach the voice latches.
        match memory.region_mut::<RamDevice>(ram) {
            Some(device) => device.load_bytes(psid.load_address, &psid.data),
            None => unreachable!("RAM region is attached above"),
        }

        let cpu = CPU::new(memory).with_illegal_opcode_policy(config.illegal_opcodes);

        log::info!(
            "loaded {} bytes at ${:04X}-${:04X}, init ${:04X}, play ${:04X}",
            psid.data.len(),
            psid.load_address,
            psid.end_address(),
            psid.init_address,
            psid.play_address
        );

        let mut player = Self {
            cpu,
            voice_bank,
            clock: FrameClock::new(config.region.frame_rate()),
            config,
            play_address: psid.play_address,
            song,
            overruns: 0,
        };
        player.init(psid.init_address)?;

        Ok(player)
    }

    /// Calls init with the 0-based song index in A and runs it to completion.
    fn init(&mut self, init_address: u16) -> Result<()> {
        let limit = self.config.init_cycle_limit();

        self.cpu.call(init_address);
        self.cpu.set_a((self.song - 1) as u8);

        let mut spent = 0u64;
        while !self.cpu.is_halted() {
            if spent >= limit {
                return Err(Error::InitTimeout {
                    cycles: limit,
                    pc: self.cpu.pc(),
                });
            }
            self.cpu
                .step()
                .map_err(|source| Error::Execution { frame: 0, source })?;
            spent += 1;
        }

        log::debug!("init for song {} returned after {} cycles", self.song, spent);
        Ok(())
    }

    /// Renders one frame.
    ///
    /// Starts the play routine unless the previous call is still running,
    /// ticks the CPU for one frame, then lets every voice reconstruct its
    /// notes from the latched registers.
    pub fn step_frame(&mut self) -> Result<()> {
        if self.cpu.is_halted() {
            self.cpu.call(self.play_address);
        } else {
            self.overruns += 1;
            if self.overruns == 1 {
                log::warn!(
                    "play routine overran frame {} (PC=${:04X}); letting it continue",
                    self.clock.frame(),
                    self.cpu.pc()
                );
            } else {
                log::debug!("play routine overran frame {}", self.clock.frame());
            }
        }

        let frame = self.clock.frame();
        self.cpu
            .run_for_cycles(self.config.cycles_per_frame())
            .map_err(|source| Error::Execution { frame, source })?;

        voice_bank_mut(self.cpu.memory_mut(), self.voice_bank).finish_frame(&self.clock);
        self.clock.advance();

        Ok(())
    }

    /// Renders `frames` frames.
    pub fn run_frames(&mut self, frames: u64) -> Result<()> {
        for _ in 0..frames {
            self.step_frame()?;
        }
        Ok(())
    }

    /// Renders enough frames to cover `seconds`.
    pub fn run_seconds(&mut self, seconds: f64) -> Result<()> {
        let frames = self.clock.frames_in(seconds);
        self.run_frames(frames)
    }

    /// Number of frames rendered so far.
    pub fn frame(&self) -> u64 {
        self.clock.frame()
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    /// 1-based song being played.
    pub fn song(&self) -> u16 {
        self.song
    }

    /// Frames on which the play routine was still running at frame start.
    pub fn overruns(&self) -> u64 {
        self.overruns
    }

    pub fn cpu(&self) -> &CPU<AddressSpace> {
        &self.cpu
    }

    pub fn voice_bank(&self) -> &VoiceBank {
        match self.cpu.memory().region::<VoiceBank>(self.voice_bank) {
            Some(bank) => bank,
            None => unreachable!("voice bank region is attached in Player::new"),
        }
    }

    /// Notes produced so far, one list per voice. Open notes are included as
    /// they currently stand.
    pub fn notes(&self) -> [&[Note]; 3] {
        self.voice_bank().notes()
    }

    /// Stops every voice and returns the finished notes, one list per voice.
    pub fn finish(mut self) -> Vec<Vec<Note>> {
        let clock_hz = self.config.region.clock_hz() as f64;
        let bank = voice_bank_mut(self.cpu.memory_mut(), self.voice_bank);
        bank.stop(&self.clock);

        log::debug!("stopped all voices at frame {}", self.clock.frame());
        std::mem::replace(bank, VoiceBank::new(clock_hz)).into_notes()
    }
}

fn voice_bank_mut(memory: &mut AddressSpace, id: RegionId) -> &mut VoiceBank {
    match memory.region_mut::<VoiceBank>(id) {
        Some(bank) => bank,
        None => unreachable!("voice bank region is attached in Player::new"),
    }
}
