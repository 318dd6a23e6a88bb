use std::error::Error;
use std::path::PathBuf;

use structopt::StructOpt;

use chip_station::emulator::{Config, Emulator, FrameState, NoHooks, Quirks, DEFAULT_FONT};

/// Run a CHIP-8 program without a screen, then print what it drew.
#[derive(StructOpt, Debug)]
#[structopt(name = "chip-station")]
struct Opt {
    /// Instructions to execute per frame
    #[structopt(long, default_value = "11")]
    ipf: u32,

    /// Stop after this many frames, instead of running until the program halts
    #[structopt(long)]
    frames: Option<u64>,

    /// Seed for the random number generator
    #[structopt(long)]
    seed: Option<u64>,

    /// Shift VX in place instead of shifting VY into VX
    #[structopt(long)]
    shift_in_place: bool,

    /// Leave the emulator paused, so that no instructions are executed
    #[structopt(long)]
    start_paused: bool,

    /// The program to execute
    #[structopt(parse(from_os_str))]
    rom: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();

    // Get configuration and read input file
    let opt = Opt::from_args();
    log::info!("Executing {:?}", &opt.rom);
    let program = std::fs::read(&opt.rom)?;

    let config = Config {
        ipf: opt.ipf,
        seed: opt.seed,
        quirks: Quirks {
            shift_reads_vy: !opt.shift_in_place,
            ..Quirks::default()
        },
        ..Config::default()
    };

    let (mut emulator, controller) = Emulator::new(&DEFAULT_FONT, NoHooks, config);
    controller.load_rom(&program)?;
    if !opt.start_paused {
        controller.resume()?;
    }

    match opt.frames {
        Some(frames) => {
            for _ in 0..frames {
                if emulator.run_frame()? == FrameState::Halted {
                    break;
                }
            }
        }
        None => emulator.run()?,
    }

    log::info!(
        "Finished after {} frames and {} instructions",
        emulator.draw_count(),
        emulator.cycles()
    );
    print!("{}", emulator.display());
    Ok(())
}
