//! The CHIP-8 virtual machine as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

use super::config::{Config, Quirks};
use super::display::Display;
use super::error::Chip8Error;
use super::fps::FpsCounter;
use super::hooks::{Hooks, NoHooks};
use super::instruction::*;
use super::key_state::KeyState;
use super::memory::{Memory, DEFAULT_FONT, FONT_SIZE, GLYPH_SIZE, MAX_ROM_SIZE, ROM_START};
use super::message::{Controller, Message, SharedSnapshot};
use super::stack::CallStack;
use super::timer::{DelayTimer, SoundTimer};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::mpsc::{sync_channel, Receiver};
use std::sync::{Arc, Mutex};

pub const NUM_REGISTERS: usize = 16;
const VF: usize = 0xF;

/// Why the emulator stopped running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// The host sent `Message::Stop`.
    Stopped,
    /// `Hooks::decode` asked to stop.
    Aborted,
    /// An instruction could not be executed.
    Fault(Chip8Error),
}

/// A copy of the state a host typically shows, taken at the end of a frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub display: Display,
    pub pc: u16,
    pub opcode: u16,
    pub fps: f64,
    pub ipf: u32,
    pub rom: Arc<[u8]>,
    pub rom_size: usize,
    pub paused: bool,
    pub halted: bool,
    pub draw_count: u64,
    pub cycles: u64,
}

pub struct Emulator<H: Hooks> {
    // Machine state
    pub(super) memory: Memory,
    pub(super) registers: [u8; NUM_REGISTERS],
    pub(super) i: u16,
    pub(super) program_counter: u16,
    pub(super) stack: CallStack,
    pub(super) display: Display,
    pub(super) keys: KeyState,
    pub(super) delay_timer: DelayTimer,
    pub(super) sound_timer: SoundTimer,
    pub(super) cycles: u64,
    rng: StdRng,
    quirks: Quirks,
    rom: Arc<[u8]>,

    // Frame loop state
    pub(super) ipf: u32,
    pub(super) frame_rate: u32,
    pub(super) max_messages_per_frame: usize,
    pub(super) paused: bool,
    pub(super) halt: Option<Halt>,
    pub(super) draw_count: u64,
    pub(super) fps: FpsCounter,
    pub(super) receiver: Receiver<Message<H::Custom>>,
    pub(super) shared_snapshot: SharedSnapshot,

    pub(super) hooks: H,
}

impl<H: Hooks> Emulator<H> {
    /// Create a new emulator, and a controller for sending it commands.
    ///
    /// The emulator starts out paused, with no program loaded.
    pub fn new(
        font: &[u8; FONT_SIZE],
        hooks: H,
        config: Config,
    ) -> (Emulator<H>, Controller<H::Custom>) {
        let (sender, receiver) = sync_channel(config.queue_capacity.max(1));
        let shared_snapshot = Arc::new(Mutex::new(None));
        let controller = Controller::new(sender, shared_snapshot.clone());

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut fps = FpsCounter::new();
        fps.pause();

        let emulator = Emulator {
            memory: Memory::new(font),
            registers: [0; NUM_REGISTERS],
            i: 0,
            program_counter: ROM_START,
            stack: CallStack::new(),
            display: Display::new(),
            keys: KeyState::new(),
            delay_timer: DelayTimer::new(),
            sound_timer: SoundTimer::new(),
            cycles: 0,
            rng,
            quirks: config.quirks,
            rom: Arc::from(Vec::new()),

            ipf: config.ipf,
            frame_rate: config.frame_rate,
            max_messages_per_frame: config.max_messages_per_frame,
            paused: true,
            halt: None,
            draw_count: 0,
            fps,
            receiver,
            shared_snapshot,

            hooks,
        };

        // The host has to resume explicitly before anything executes.
        if controller.try_send(Message::Pause).is_err() {
            log::warn!("Could not queue the initial pause");
        }

        (emulator, controller)
    }

    /// Create a new emulator with the default font and configuration.
    pub fn with_hooks(hooks: H) -> (Emulator<H>, Controller<H::Custom>) {
        Emulator::new(&DEFAULT_FONT, hooks, Config::default())
    }

    /// Replace the program, then reset the machine.
    pub fn load_rom(&mut self, program: &[u8]) -> Result<(), Chip8Error> {
        if program.len() > MAX_ROM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_ROM_SIZE,
            });
        }
        log::info!("Loading a {} byte ROM", program.len());
        self.memory.load_rom(program);
        self.rom = Arc::from(program);
        self.reset();
        Ok(())
    }

    /// Put the machine back in its initial state. Memory, IPF and hooks are left alone.
    pub fn reset(&mut self) {
        self.registers = [0; NUM_REGISTERS];
        self.i = 0;
        self.program_counter = ROM_START;
        self.stack.clear();
        self.display.clear();
        self.keys.reset();
        self.delay_timer.reset();
        self.sound_timer.reset(&mut self.hooks);
        self.fps.reset();
        self.halt = None;
    }

    /// Copy bytes into memory, clipping at the end of it.
    pub fn set_memory(&mut self, address: u16, data: &[u8]) {
        self.memory.poke(address, data);
    }

    pub fn set_key_state(&mut self, key: u8, pressed: bool) {
        self.keys.set(key, pressed);
    }

    pub fn set_ipf(&mut self, ipf: u32) {
        self.ipf = ipf;
    }

    pub fn pause(&mut self) {
        if !self.paused {
            log::info!("Pausing");
            self.paused = true;
            self.sound_timer.pause(&mut self.hooks);
            self.fps.pause();
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            log::info!("Resuming");
            self.paused = false;
            self.sound_timer.resume(&mut self.hooks);
            self.fps.resume();
        }
    }

    pub fn stop(&mut self) {
        log::info!("Stopping");
        self.halt = Some(Halt::Stopped);
    }

    /// Fetch, decode and execute a single instruction.
    ///
    /// A failure halts the machine until the next ROM swap.
    pub fn cycle(&mut self) -> Result<Instruction, Chip8Error> {
        let pc = self.program_counter;
        let opcode = self.memory.read_opcode(pc).as_u16();
        self.program_counter = pc.wrapping_add(2);

        let result = Instruction::decode(opcode)
            .ok_or(Chip8Error::UnknownOpcode { opcode, pc })
            .and_then(|instruction| self.execute_single(instruction).map(|_| instruction));

        match result {
            Ok(instruction) => {
                log::trace!("{:#05X}: {:?}", pc, instruction);
                self.cycles += 1;
                Ok(instruction)
            }
            Err(error) => {
                log::error!("Halting: {}", error);
                self.halt = Some(Halt::Fault(error.clone()));
                Err(error)
            }
        }
    }

    /// Execute instructions one after another, stopping at the first failure.
    pub fn execute_many(&mut self, instructions: &[Instruction]) -> Result<(), Chip8Error> {
        for instruction in instructions {
            self.execute_single(*instruction)?;
        }
        Ok(())
    }

    /// Execute a single instruction. The program counter is expected to
    /// already point past it, as it does after a fetch.
    pub fn execute_single(&mut self, instruction: Instruction) -> Result<(), Chip8Error> {
        // Address of the instruction itself
        let pc = self.program_counter.wrapping_sub(2);

        match instruction {
            Instruction::ClearScreen => self.display.clear(),

            // Return to the previous call site via the stack.
            Instruction::Return => {
                self.program_counter = self.stack.pop(pc)?;
            }

            Instruction::Goto(Addr(addr)) => {
                self.program_counter = addr;
            }

            // Store the return address on the stack, then jump to the specified address
            Instruction::Call(Addr(addr)) => {
                self.stack.push(self.program_counter, pc)?;
                self.program_counter = addr;
            }

            Instruction::IfRegEqConst(Reg(x), Const(n)) => {
                if self.reg(x) == n {
                    self.skip();
                }
            }

            Instruction::IfRegNeqConst(Reg(x), Const(n)) => {
                if self.reg(x) != n {
                    self.skip();
                }
            }

            Instruction::IfRegEqReg(Reg(x), Reg(y)) => {
                if self.reg(x) == self.reg(y) {
                    self.skip();
                }
            }

            Instruction::SetRegToConst(Reg(x), Const(n)) => {
                self.set_reg(x, n);
            }

            // Wraps around, and leaves VF alone.
            Instruction::IncRegByConst(Reg(x), Const(n)) => {
                self.set_reg(x, self.reg(x).wrapping_add(n));
            }

            Instruction::SetRegToReg(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(y));
            }

            Instruction::BitwiseOr(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) | self.reg(y));
                self.reset_vf_after_logic();
            }

            Instruction::BitwiseAnd(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) & self.reg(y));
                self.reset_vf_after_logic();
            }

            Instruction::BitwiseXor(Reg(x), Reg(y)) => {
                self.set_reg(x, self.reg(x) ^ self.reg(y));
                self.reset_vf_after_logic();
            }

            // VF is the carry. It is written last, so it wins when X is F.
            Instruction::IncRegByReg(Reg(x), Reg(y)) => {
                let (sum, carry) = self.reg(x).overflowing_add(self.reg(y));
                self.set_reg(x, sum);
                self.registers[VF] = carry as u8;
            }

            // VF is 1 when there is no borrow.
            Instruction::DecRegByReg(Reg(x), Reg(y)) => {
                let (difference, borrow) = self.reg(x).overflowing_sub(self.reg(y));
                self.set_reg(x, difference);
                self.registers[VF] = !borrow as u8;
            }

            Instruction::SetVxVyMinusVx(Reg(x), Reg(y)) => {
                let (difference, borrow) = self.reg(y).overflowing_sub(self.reg(x));
                self.set_reg(x, difference);
                self.registers[VF] = !borrow as u8;
            }

            Instruction::BitshiftRight(Reg(x), Reg(y)) => {
                let source = self.shift_source(x, y);
                self.set_reg(x, source >> 1);
                self.registers[VF] = source & 1;
            }

            Instruction::BitshiftLeft(Reg(x), Reg(y)) => {
                let source = self.shift_source(x, y);
                self.set_reg(x, source << 1);
                self.registers[VF] = source >> 7;
            }

            Instruction::IfRegNeqReg(Reg(x), Reg(y)) => {
                if self.reg(x) != self.reg(y) {
                    self.skip();
                }
            }

            Instruction::SetI(Addr(addr)) => {
                self.i = addr;
            }

            Instruction::SetPcToV0PlusAddr(Addr(addr)) => {
                self.program_counter = addr + self.registers[0] as u16;
            }

            Instruction::SetVxRand(Reg(x), Const(n)) => {
                let value = self.rng.gen::<u8>() & n;
                self.set_reg(x, value);
            }

            Instruction::Draw(Reg(x), Reg(y), Const(sprite_height)) => {
                // Get sprite, each row is 8 bits
                let mut sprite = [0; 16];
                let sprite = &mut sprite[..sprite_height as usize];
                for (row, byte) in sprite.iter_mut().enumerate() {
                    *byte = self.memory.read(self.i.wrapping_add(row as u16));
                }

                let (vx, vy) = (self.reg(x), self.reg(y));
                let collision = self.display.draw_sprite(vx, vy, sprite);
                self.registers[VF] = collision as u8;
            }

            Instruction::IfKeyEqVx(Reg(x)) => {
                if self.keys.is_pressed(self.reg(x)) {
                    self.skip();
                }
            }

            Instruction::IfKeyNeqVx(Reg(x)) => {
                if !self.keys.is_pressed(self.reg(x)) {
                    self.skip();
                }
            }

            Instruction::SetRegToDelayTimer(Reg(x)) => {
                self.set_reg(x, self.delay_timer.get());
            }

            // Wait for a key to be released by running this instruction again until one is.
            Instruction::SetRegToGetKey(Reg(x)) => match self.keys.last_released() {
                Some(key) => self.set_reg(x, key),
                None => self.program_counter = pc,
            },

            Instruction::SetDelayTimerToReg(Reg(x)) => {
                let value = self.reg(x);
                self.delay_timer.set(value);
            }

            Instruction::SetSoundTimerToReg(Reg(x)) => {
                let value = self.reg(x);
                self.sound_timer.set(value, &mut self.hooks);
            }

            Instruction::AddRegToI(Reg(x)) => {
                self.i = self.i.wrapping_add(self.reg(x) as u16);
            }

            // The font starts at address 0.
            Instruction::SetIToSpriteAddrVx(Reg(x)) => {
                self.i = self.reg(x) as u16 * GLYPH_SIZE;
            }

            Instruction::SetIToBcdOfReg(Reg(x)) => {
                let value = self.reg(x);
                self.memory.write(self.i, value / 100);
                self.memory.write(self.i.wrapping_add(1), value / 10 % 10);
                self.memory.write(self.i.wrapping_add(2), value % 10);
            }

            // Dump register values up to Vx
            Instruction::RegDump(Reg(x)) => {
                for reg_no in 0..=x {
                    let value = self.reg(reg_no);
                    self.memory.write(self.i.wrapping_add(reg_no as u16), value);
                }
                self.advance_i_after_block(x);
            }

            // Load register values up to Vx
            Instruction::RegLoad(Reg(x)) => {
                for reg_no in 0..=x {
                    let value = self.memory.read(self.i.wrapping_add(reg_no as u16));
                    self.set_reg(reg_no, value);
                }
                self.advance_i_after_block(x);
            }
        };

        Ok(())
    }

    fn reg(&self, x: u8) -> u8 {
        self.registers[x as usize & 0xF]
    }

    fn set_reg(&mut self, x: u8, value: u8) {
        self.registers[x as usize & 0xF] = value;
    }

    fn skip(&mut self) {
        self.program_counter = self.program_counter.wrapping_add(2);
    }

    fn shift_source(&self, x: u8, y: u8) -> u8 {
        if self.quirks.shift_reads_vy {
            self.reg(y)
        } else {
            self.reg(x)
        }
    }

    fn reset_vf_after_logic(&mut self) {
        if self.quirks.logic_resets_vf {
            self.registers[VF] = 0;
        }
    }

    fn advance_i_after_block(&mut self, x: u8) {
        if self.quirks.memory_increments_i {
            self.i = self.i.wrapping_add(x as u16 + 1);
        }
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn pc(&self) -> u16 {
        self.program_counter
    }

    /// The opcode the next cycle will execute.
    pub fn opcode_at_pc(&self) -> u16 {
        self.memory.read_opcode(self.program_counter).as_u16()
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    pub fn ipf(&self) -> u32 {
        self.ipf
    }

    /// The currently loaded program.
    pub fn rom(&self) -> &[u8] {
        &self.rom
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_halted(&self) -> bool {
        self.halt.is_some()
    }

    pub fn halt(&self) -> Option<&Halt> {
        self.halt.as_ref()
    }

    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    pub fn registers(&self) -> &[u8; NUM_REGISTERS] {
        &self.registers
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer.get()
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer.get()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn memory(&self) -> &[u8] {
        self.memory.as_slice()
    }

    pub fn is_key_pressed(&self, key: u8) -> bool {
        self.keys.is_pressed(key)
    }

    pub fn quirks(&self) -> Quirks {
        self.quirks
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display: self.display.clone(),
            pc: self.pc(),
            opcode: self.opcode_at_pc(),
            fps: self.fps(),
            ipf: self.ipf,
            rom: self.rom.clone(),
            rom_size: self.rom.len(),
            paused: self.paused,
            halted: self.is_halted(),
            draw_count: self.draw_count,
            cycles: self.cycles,
        }
    }
}

impl Emulator<NoHooks> {
    /// Create a new emulator that nobody listens to.
    pub fn headless() -> (Emulator<NoHooks>, Controller<()>) {
        Emulator::with_hooks(NoHooks)
    }
}
