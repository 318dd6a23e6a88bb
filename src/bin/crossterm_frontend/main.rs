use std::error::Error;
use std::path::PathBuf;
use std::thread;

use structopt::StructOpt;

use chip_station::emulator::{Chip8Error, Config, Controller, Emulator, DEFAULT_FONT};

mod crossterm_io;
mod key_buffer;
mod key_manager;
use crossterm_io::{CrosstermScreen, Terminal};
use key_manager::{Command, KeyManager};

/// The program options.
#[derive(StructOpt)]
struct Opt {
    /// Instructions to execute per frame
    #[structopt(long, default_value = "11")]
    ipf: u32,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.input);
    let program = std::fs::read(opt.input)?;

    let terminal = Terminal::enter()?;

    let config = Config {
        ipf: opt.ipf,
        ..Config::default()
    };
    let (mut emulator, controller) = Emulator::new(&DEFAULT_FONT, CrosstermScreen::new(), config);
    controller.load_rom(&program)?;
    controller.resume()?;

    // Start execution
    let emulator_thread = thread::spawn(move || emulator.run());

    let mut key_manager = KeyManager::new();
    let mut paused = false;
    'input: loop {
        for command in key_manager.next_commands()? {
            if !send_command(&controller, command, &mut paused)? {
                break 'input;
            }
        }

        if controller.snapshot().map_or(false, |snapshot| snapshot.halted) {
            break;
        }
    }

    let result = emulator_thread.join();
    drop(terminal);
    match result {
        Ok(result) => Ok(result?),
        Err(_) => Err("the emulator thread panicked".into()),
    }
}

/// Forward a command to the emulator. Returns false once there is nothing
/// left to control, either because the user quit or because the emulator
/// thread has exited and `join` has the reason.
fn send_command(
    controller: &Controller<()>,
    command: Command,
    paused: &mut bool,
) -> Result<bool, Chip8Error> {
    let sent = match command {
        Command::Press(key) => controller.set_key_state(key, true),
        Command::Release(key) => controller.set_key_state(key, false),
        Command::TogglePause => {
            *paused = !*paused;
            if *paused {
                controller.pause()
            } else {
                controller.resume()
            }
        }
        Command::Quit => return controller.stop().map(|()| false).or_else(disconnected),
    };
    sent.map(|()| true).or_else(disconnected)
}

fn disconnected(error: Chip8Error) -> Result<bool, Chip8Error> {
    match error {
        Chip8Error::Disconnected => Ok(false),
        error => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip_station::emulator::NoHooks;
    use pretty_assertions::assert_eq;

    #[test]
    fn commands_reach_the_emulator() {
        let (mut emulator, controller) = Emulator::headless();
        let mut paused = false;
        assert_eq!(Ok(true), send_command(&controller, Command::Press(0x7), &mut paused));
        assert_eq!(Ok(true), send_command(&controller, Command::TogglePause, &mut paused));
        assert!(paused);
        assert_eq!(Ok(false), send_command(&controller, Command::Quit, &mut paused));

        emulator.run_frame().unwrap();
        assert!(emulator.is_key_pressed(0x7));
        assert!(emulator.is_halted());
    }

    #[test]
    fn exited_emulator_ends_the_input_loop() {
        let (emulator, controller) = Emulator::<NoHooks>::headless();
        drop(emulator);
        let mut paused = false;
        assert_eq!(Ok(false), send_command(&controller, Command::Press(0x1), &mut paused));
        assert_eq!(Ok(false), send_command(&controller, Command::TogglePause, &mut paused));
        assert_eq!(Ok(false), send_command(&controller, Command::Quit, &mut paused));
    }
}
