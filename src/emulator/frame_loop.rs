//! Runs the emulator one frame at a time.
//!
//! Every frame first applies queued messages and notifies the host through
//! `Hooks::draw`. Unless the emulator is paused it then executes up to IPF
//! instructions, counts the timers down and forgets the last released key.

use super::emulator::{Emulator, Halt};
use super::error::Chip8Error;
use super::hooks::Hooks;
use super::message::Message;

use std::thread;
use std::time::{Duration, Instant};

/// What the emulator did during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameState {
    Running,
    Paused,
    Halted,
}

impl<H: Hooks> Emulator<H> {
    /// Run the frame loop at the configured frame rate until the emulator halts.
    ///
    /// Returns `Ok` if it was stopped by the host or by `Hooks::decode`,
    /// and the fault if an instruction failed.
    pub fn run(&mut self) -> Result<(), Chip8Error> {
        log::info!("Running at {} frames per second", self.frame_rate);
        loop {
            if self.tick()? == FrameState::Halted {
                return Ok(());
            }
        }
    }

    /// Run one frame, then sleep for whatever is left of it.
    /// A frame that runs late is not made up for.
    pub fn tick(&mut self) -> Result<FrameState, Chip8Error> {
        let start = Instant::now();
        let state = self.run_frame()?;
        if let Some(remaining) = self.frame_budget().checked_sub(start.elapsed()) {
            thread::sleep(remaining);
        }
        Ok(state)
    }

    fn frame_budget(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate.max(1)
    }

    /// Run one frame without any pacing.
    pub fn run_frame(&mut self) -> Result<FrameState, Chip8Error> {
        self.apply_messages();

        if let Some(halt) = &self.halt {
            self.publish_snapshot();
            return match halt {
                Halt::Fault(error) => Err(error.clone()),
                _ => Ok(FrameState::Halted),
            };
        }

        self.hooks.draw(self.draw_count, self.fps.fps(), &self.display);
        self.draw_count += 1;
        self.fps.tick();

        if self.paused {
            self.publish_snapshot();
            return Ok(FrameState::Paused);
        }

        match self.execute_batch() {
            Ok(false) => {}
            Ok(true) => {
                self.publish_snapshot();
                return Ok(FrameState::Halted);
            }
            Err(error) => {
                self.publish_snapshot();
                return Err(error);
            }
        }

        self.delay_timer.decrement();
        self.sound_timer.decrement(&mut self.hooks);
        self.keys.clear_last_released();

        self.publish_snapshot();
        Ok(FrameState::Running)
    }

    /// Execute up to IPF instructions, stopping early after a draw.
    /// Returns true if `Hooks::decode` asked to stop.
    fn execute_batch(&mut self) -> Result<bool, Chip8Error> {
        for _ in 0..self.ipf {
            let pc = self.program_counter;
            let opcode = self.opcode_at_pc();
            if self.hooks.decode(pc, opcode, self.draw_count) {
                log::info!("Decode hook stopped the emulator at {:#05X}", pc);
                self.halt = Some(Halt::Aborted);
                return Ok(true);
            }

            if self.cycle()?.is_draw() {
                break;
            }
        }

        Ok(false)
    }

    /// Apply the messages waiting in the queue, at most `max_messages_per_frame` of them.
    fn apply_messages(&mut self) {
        for _ in 0..self.max_messages_per_frame {
            let message = match self.receiver.try_recv() {
                Ok(message) => message,
                Err(_) => break,
            };

            let stop = matches!(message, Message::Stop);
            self.apply(message);
            if stop {
                break;
            }
        }
    }

    fn apply(&mut self, message: Message<H::Custom>) {
        log::debug!("Applying {}", message.name());
        match message {
            Message::Pause => self.pause(),
            Message::Resume => self.resume(),
            Message::SwapRom(rom) => {
                if let Err(error) = self.load_rom(&rom) {
                    log::warn!("Ignoring ROM swap: {}", error);
                }
            }
            Message::SetIpf(ipf) => self.set_ipf(ipf),
            Message::SetMemory { address, data } => self.set_memory(address, &data),
            Message::SetKeyState { key, pressed } => self.set_key_state(key, pressed),
            Message::Stop => self.stop(),
            Message::Custom(payload) => self.hooks.custom_message(payload),
        }
    }

    fn publish_snapshot(&self) {
        if let Ok(mut shared) = self.shared_snapshot.lock() {
            *shared = Some(self.snapshot());
        }
    }
}
