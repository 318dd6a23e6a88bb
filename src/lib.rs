/*!

A CHIP-8 emulator as specified at https://en.wikipedia.org/wiki/CHIP-8,
built to be driven by a host such as a terminal or a browser UI.

# Crossterm Frontend

If you want to try the emulator on some programs, there is a ready-to-use implementation
you can run by using `cargo run --release --bin crossterm_frontend -- <program>`.
You can then use the keys 0-9 and a-f to give input, `p` to pause and `q` to quit.

# Library

The emulator runs one frame at a time, 60 times per second. Each frame it applies
the commands sent to it, tells the host to draw, and executes a batch of instructions.
Commands are sent through a `Controller`, which can be moved to other threads.

```rust
use chip_station::emulator::{Emulator, FrameState};

let (mut emulator, controller) = Emulator::headless();

// Load a program at address 0x200. The emulator starts out paused.
let clear_display = [0x00, 0xE0, 0x12, 0x02];
controller.load_rom(&clear_display).unwrap();
controller.resume().unwrap();

assert_eq!(Ok(FrameState::Running), emulator.run_frame());
assert_eq!(0x202, emulator.pc());
```

Alternatively, you can experiment by executing instructions manually.

```rust
use chip_station::emulator::Emulator;
use chip_station::emulator::instruction::{Instruction, Reg, Const, Addr};

let (mut emulator, _controller) = Emulator::headless();

// Execute instructions manually
emulator.execute_single(Instruction::ClearScreen).unwrap();

// Or many sequentially
emulator.execute_many(&[
    Instruction::Goto(Addr(0x250)),
    Instruction::SetRegToConst(Reg(0xA), Const(35)),
    Instruction::SetRegToReg(Reg(0xB), Reg(0xA))
]).unwrap();
assert_eq!(35, emulator.registers()[0xB]);
```

## Custom hooks

To find out what the emulator is doing, implement `Hooks`.
Every method has a default, so only implement the ones you need.

```rust
use chip_station::emulator::{Display, Emulator, Hooks};

struct Screen;

impl Hooks for Screen {
    type Custom = ();

    fn draw(&mut self, _draw_count: u64, _fps: f64, display: &Display) {
        print!("{}", display);
    }
}

let (mut emulator, controller) = Emulator::with_hooks(Screen);
controller.stop().unwrap();
emulator.run().unwrap();
```

You can then implement the emulator using your own custom frontend, as done with crossterm in crossterm_frontend.
*/

pub mod emulator;
