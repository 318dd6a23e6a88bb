use std::fmt;

pub const SCREEN_WIDTH: usize = 64;
pub const SCREEN_HEIGHT: usize = 32;

/// The monochrome screen, one bit per pixel.
#[derive(Clone, PartialEq, Eq)]
pub struct Display {
    cells: [[bool; SCREEN_WIDTH]; SCREEN_HEIGHT],
}

impl Display {
    pub fn new() -> Display {
        Display {
            cells: [[false; SCREEN_WIDTH]; SCREEN_HEIGHT],
        }
    }

    pub fn clear(&mut self) {
        self.cells = [[false; SCREEN_WIDTH]; SCREEN_HEIGHT];
    }

    /// Whether the pixel is lit. Pixels outside of the screen are never lit.
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(false)
    }

    /// XOR a sprite onto the screen with its top left corner at `(x, y)`.
    ///
    /// The origin wraps around the screen, but the sprite itself is clipped at the edges.
    /// Returns true if any lit pixel was turned off.
    pub fn draw_sprite(&mut self, x: u8, y: u8, sprite: &[u8]) -> bool {
        let x_coord = x as usize % SCREEN_WIDTH;
        let y_coord = y as usize % SCREEN_HEIGHT;

        let mut any_collisions = false;
        for (dy, &row) in sprite.iter().enumerate() {
            let py = y_coord + dy;
            if py >= SCREEN_HEIGHT {
                break;
            }
            for dx in 0..8 {
                let px = x_coord + dx;
                if row >> (7 - dx) & 1 == 0 || px >= SCREEN_WIDTH {
                    continue;
                }
                let pixel = &mut self.cells[py][px];
                any_collisions |= *pixel;
                *pixel = !*pixel;
            }
        }

        any_collisions
    }

    /// All pixels, row by row.
    pub fn pixels(&self) -> impl Iterator<Item = bool> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    pub fn lit_count(&self) -> usize {
        self.pixels().filter(|lit| *lit).count()
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            for c in row.iter() {
                write!(f, "{}", if *c { "#" } else { " " })?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Display {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Display {{")?;
        fmt::Display::fmt(self, f)?;
        write!(f, "}}")
    }
}
