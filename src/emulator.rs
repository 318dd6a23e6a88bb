//! The CHIP-8 emulator as described at https://en.wikipedia.org/wiki/CHIP-8#Virtual_machine_description.

pub mod config;
pub mod display;
pub mod emulator;
pub mod error;
pub mod fps;
pub mod frame_loop;
pub mod hooks;
pub mod instruction;
pub mod key_state;
pub mod memory;
pub mod message;
pub mod opcode;
pub mod stack;
pub mod timer;

pub use config::{Config, Quirks};
pub use display::{Display, SCREEN_HEIGHT, SCREEN_WIDTH};
pub use emulator::{Emulator, Halt, Snapshot};
pub use error::Chip8Error;
pub use frame_loop::FrameState;
pub use hooks::{Hooks, NoHooks};
pub use memory::DEFAULT_FONT;
pub use message::{Controller, Message};
