//! Terminal renderer
//!
//! Rasterizes a snapshot onto a character grid. Used by the native driver,
//! which has no GPU surface.

use glam::Vec2;

use super::shapes::obstacle_outline;
use crate::sim::{EntityView, Snapshot};

/// Fixed-size character canvas
pub struct TextCanvas {
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl TextCanvas {
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            cells: vec![' '; cols * rows],
        }
    }

    /// Plot a world position, scaled from `world` to the grid
    fn plot(&mut self, pos: Vec2, world: Vec2, glyph: char) {
        let col = (pos.x / world.x * self.cols as f32).floor();
        let row = (pos.y / world.y * self.rows as f32).floor();
        if col < 0.0 || row < 0.0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.cols && row < self.rows {
            self.cells[row * self.cols + col] = glyph;
        }
    }

    /// Write text centered on a row, clipped to the canvas width
    fn banner(&mut self, row: usize, text: &str) {
        if row >= self.rows {
            return;
        }
        let len = text.chars().count().min(self.cols);
        let start = (self.cols - len) / 2;
        for (i, ch) in text.chars().take(len).enumerate() {
            self.cells[row * self.cols + start + i] = ch;
        }
    }

    fn into_string(self) -> String {
        self.cells
            .chunks(self.cols)
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Heading glyph for the craft, picked from the nearest compass quadrant
fn craft_glyph(heading: f32) -> char {
    let quadrant = ((heading / std::f32::consts::FRAC_PI_2).round() as i32).rem_euclid(4);
    match quadrant {
        0 => '>',
        1 => 'v',
        2 => '<',
        _ => '^',
    }
}

/// HUD line: score, lives and level
pub fn hud(snapshot: &Snapshot) -> String {
    format!(
        "SCORE {:>6}   LIVES {}   LEVEL {}",
        snapshot.score, snapshot.lives, snapshot.level
    )
}

/// Render a full frame: HUD on top, playfield below
pub fn render(snapshot: &Snapshot, cols: usize, rows: usize) -> String {
    let mut canvas = TextCanvas::new(cols, rows);
    let world = snapshot.world_size;

    for entity in snapshot.entities() {
        match entity {
            EntityView::Obstacle(o) => {
                for p in obstacle_outline(o) {
                    canvas.plot(p, world, '#');
                }
                canvas.plot(o.pos, world, 'o');
            }
            EntityView::Projectile(p) => canvas.plot(p.pos, world, '.'),
            EntityView::Craft(c) => {
                if c.visible {
                    canvas.plot(c.pos, world, craft_glyph(c.heading));
                }
            }
        }
    }

    if snapshot.is_game_over() {
        let mid = canvas.rows / 2;
        canvas.banner(mid, "GAME OVER");
        canvas.banner(mid + 1, "Press Enter to restart");
    }

    format!("{}\n{}", hud(snapshot), canvas.into_string())
}
