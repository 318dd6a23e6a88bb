use super::display::Display;

/// Callbacks from the emulator to its host.
///
/// All of them run synchronously on the thread that runs the frame loop,
/// so they must return quickly. Every method has a default that does nothing.
pub trait Hooks {
    /// Payload of host specific messages, see `Message::Custom`.
    type Custom: Send + 'static;

    /// Called before each instruction is executed.
    /// Returning true stops the emulator, which is useful for tracing and tests.
    fn decode(&mut self, _pc: u16, _opcode: u16, _draw_count: u64) -> bool {
        false
    }

    /// Called once per frame, paused or not.
    fn draw(&mut self, _draw_count: u64, _fps: f64, _display: &Display) {}

    /// The sound timer was set to a nonzero value, or resumed while nonzero.
    fn play_sound(&mut self) {}

    /// The sound timer ran out, or the emulator was paused or reset while it was sounding.
    fn stop_sound(&mut self) {}

    fn custom_message(&mut self, _payload: Self::Custom) {}
}

/// Hooks that ignore everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoHooks;

impl Hooks for NoHooks {
    type Custom = ();
}
