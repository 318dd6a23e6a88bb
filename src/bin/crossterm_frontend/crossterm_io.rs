use chip_station::emulator::{Display, Hooks, SCREEN_HEIGHT, SCREEN_WIDTH};

use crossterm::style::Print;
use crossterm::terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};
use std::io::{stdout, Write};

/// Puts the terminal in raw mode on an alternate screen until dropped.
pub struct Terminal;

impl Terminal {
    pub fn enter() -> crossterm::Result<Terminal> {
        let mut out = stdout();
        execute!(out, EnterAlternateScreen, cursor::Hide, Clear(ClearType::All))?;
        terminal::enable_raw_mode()?;
        draw_border()?;
        Ok(Terminal)
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let mut out = stdout();
        let restored = terminal::disable_raw_mode()
            .and_then(|()| execute!(out, cursor::Show, LeaveAlternateScreen));
        if let Err(error) = restored {
            log::warn!("Could not restore the terminal: {}", error);
        }
    }
}

fn draw_border() -> crossterm::Result<()> {
    let mut out = stdout();
    let right = 2 * SCREEN_WIDTH as u16 + 1;
    let bottom = SCREEN_HEIGHT as u16 + 1;
    for y in 0..=bottom {
        for x in 0..=right {
            let c = match (x, y) {
                (0, 0) => '┏',
                (x, 0) if x == right => '┓',
                (0, y) if y == bottom => '┗',
                (x, y) if x == right && y == bottom => '┛',
                (_, y) if y == 0 || y == bottom => '━',
                (x, _) if x == 0 || x == right => '┃',
                _ => continue,
            };
            queue!(out, cursor::MoveTo(x, y), Print(c))?;
        }
    }
    out.flush().map_err(crossterm::ErrorKind::IoError)
}

/// Renders every frame to the terminal, two characters per pixel.
pub struct CrosstermScreen {
    shown: Option<Display>,
}

impl CrosstermScreen {
    pub fn new() -> CrosstermScreen {
        CrosstermScreen { shown: None }
    }

    fn render(&mut self, draw_count: u64, fps: f64, display: &Display) -> crossterm::Result<()> {
        let mut out = stdout();

        // Only redraw the pixels that changed
        for y in 0..SCREEN_HEIGHT {
            for x in 0..SCREEN_WIDTH {
                let lit = display.get(x, y);
                if self.shown.as_ref().map_or(true, |shown| shown.get(x, y) != lit) {
                    queue!(
                        out,
                        cursor::MoveTo(2 * x as u16 + 1, y as u16 + 1),
                        Print(if lit { "██" } else { "  " })
                    )?;
                }
            }
        }

        queue!(
            out,
            cursor::MoveTo(0, SCREEN_HEIGHT as u16 + 2),
            Print(format!(
                "frame {:>8}  {:>5.1} fps  [p] pause  [q] quit",
                draw_count, fps
            ))
        )?;
        out.flush().map_err(crossterm::ErrorKind::IoError)?;

        self.shown = Some(display.clone());
        Ok(())
    }
}

impl Hooks for CrosstermScreen {
    type Custom = ();

    fn draw(&mut self, draw_count: u64, fps: f64, display: &Display) {
        if let Err(error) = self.render(draw_count, fps, display) {
            log::warn!("Could not draw frame {}: {}", draw_count, error);
        }
    }

    fn play_sound(&mut self) {
        // Terminal bell
        if let Err(error) = execute!(stdout(), Print('\x07')) {
            log::warn!("Could not beep: {}", error);
        }
    }
}
