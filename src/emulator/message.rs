//! The control plane: commands sent from the host to the thread running the emulator.

use super::emulator::Snapshot;
use super::error::Chip8Error;
use super::key_state::NUM_KEYS;
use super::memory::MAX_ROM_SIZE;
use std::sync::mpsc::{SyncSender, TrySendError};
use std::sync::{Arc, Mutex};

/// A command for the emulator, applied at the start of the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message<C> {
    Pause,
    Resume,
    /// Load a new program and reset the machine.
    SwapRom(Vec<u8>),
    SetIpf(u32),
    SetMemory { address: u16, data: Vec<u8> },
    SetKeyState { key: u8, pressed: bool },
    /// Stop the frame loop.
    Stop,
    /// Passed on to `Hooks::custom_message` untouched.
    Custom(C),
}

impl<C> Message<C> {
    pub fn name(&self) -> &'static str {
        match self {
            Message::Pause => "pause",
            Message::Resume => "resume",
            Message::SwapRom(_) => "ROM swap",
            Message::SetIpf(_) => "IPF change",
            Message::SetMemory { .. } => "memory write",
            Message::SetKeyState { .. } => "key state",
            Message::Stop => "stop",
            Message::Custom(_) => "custom message",
        }
    }

    /// Reject messages that can never be applied.
    pub fn validate(&self) -> Result<(), Chip8Error> {
        match self {
            Message::SwapRom(rom) if rom.len() > MAX_ROM_SIZE => Err(Chip8Error::RomTooLarge {
                size: rom.len(),
                max: MAX_ROM_SIZE,
            }),
            Message::SetKeyState { key, .. } if *key as usize >= NUM_KEYS => {
                Err(Chip8Error::InvalidKey(*key))
            }
            _ => Ok(()),
        }
    }
}

pub(crate) type SharedSnapshot = Arc<Mutex<Option<Snapshot>>>;

/// A handle for controlling an emulator, possibly from another thread.
///
/// Every command is put on a bounded queue. When the queue is full, the
/// sending thread blocks until the emulator has made room for it.
pub struct Controller<C> {
    sender: SyncSender<Message<C>>,
    snapshot: SharedSnapshot,
}

impl<C> Clone for Controller<C> {
    fn clone(&self) -> Self {
        Controller {
            sender: self.sender.clone(),
            snapshot: self.snapshot.clone(),
        }
    }
}

impl<C> Controller<C> {
    pub(crate) fn new(sender: SyncSender<Message<C>>, snapshot: SharedSnapshot) -> Controller<C> {
        Controller { sender, snapshot }
    }

    /// Queue a message, waiting for room if the queue is full.
    pub fn send(&self, message: Message<C>) -> Result<(), Chip8Error> {
        message.validate()?;
        self.sender
            .send(message)
            .map_err(|_| Chip8Error::Disconnected)
    }

    /// Queue a message, or fail with `QueueFull` instead of waiting.
    pub fn try_send(&self, message: Message<C>) -> Result<(), Chip8Error> {
        message.validate()?;
        self.sender.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => Chip8Error::QueueFull,
            TrySendError::Disconnected(_) => Chip8Error::Disconnected,
        })
    }

    pub fn load_rom(&self, rom: &[u8]) -> Result<(), Chip8Error> {
        self.send(Message::SwapRom(rom.to_vec()))
    }

    pub fn set_memory(&self, address: u16, data: &[u8]) -> Result<(), Chip8Error> {
        self.send(Message::SetMemory {
            address,
            data: data.to_vec(),
        })
    }

    pub fn set_key_state(&self, key: u8, pressed: bool) -> Result<(), Chip8Error> {
        self.send(Message::SetKeyState { key, pressed })
    }

    pub fn set_ipf(&self, ipf: u32) -> Result<(), Chip8Error> {
        self.send(Message::SetIpf(ipf))
    }

    pub fn pause(&self) -> Result<(), Chip8Error> {
        self.send(Message::Pause)
    }

    pub fn resume(&self) -> Result<(), Chip8Error> {
        self.send(Message::Resume)
    }

    pub fn stop(&self) -> Result<(), Chip8Error> {
        self.send(Message::Stop)
    }

    pub fn custom(&self, payload: C) -> Result<(), Chip8Error> {
        self.send(Message::Custom(payload))
    }

    /// The state of the emulator as of the end of its latest frame.
    pub fn snapshot(&self) -> Option<Snapshot> {
        self.snapshot.lock().ok().and_then(|snapshot| snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc::sync_channel;

    fn controller(capacity: usize) -> (Controller<()>, std::sync::mpsc::Receiver<Message<()>>) {
        let (sender, receiver) = sync_channel(capacity);
        (Controller::new(sender, Arc::new(Mutex::new(None))), receiver)
    }

    #[test]
    fn messages_arrive_in_order() {
        let (controller, receiver) = controller(4);
        controller.set_ipf(5).unwrap();
        controller.set_ipf(10).unwrap();
        controller.pause().unwrap();

        let received: Vec<_> = receiver.try_iter().collect();
        assert_eq!(
            vec![Message::SetIpf(5), Message::SetIpf(10), Message::Pause],
            received
        );
    }

    #[test]
    fn oversized_rom_is_rejected() {
        let (controller, receiver) = controller(1);
        let rom = vec![0; MAX_ROM_SIZE + 1];
        assert_eq!(
            Err(Chip8Error::RomTooLarge {
                size: MAX_ROM_SIZE + 1,
                max: MAX_ROM_SIZE
            }),
            controller.load_rom(&rom)
        );
        assert!(receiver.try_recv().is_err());
        assert_eq!(Ok(()), controller.load_rom(&rom[..MAX_ROM_SIZE]));
    }

    #[test]
    fn keys_off_the_keypad_are_rejected() {
        let (controller, _receiver) = controller(1);
        assert_eq!(Err(Chip8Error::InvalidKey(0x10)), controller.set_key_state(0x10, true));
    }

    #[test]
    fn full_queue_is_reported_without_blocking() {
        let (controller, _receiver) = controller(1);
        controller.try_send(Message::Resume).unwrap();
        assert_eq!(Err(Chip8Error::QueueFull), controller.try_send(Message::Resume));
    }

    #[test]
    fn sending_to_a_dropped_emulator_fails() {
        let (controller, receiver) = controller(1);
        drop(receiver);
        assert_eq!(Err(Chip8Error::Disconnected), controller.resume());
    }
}
