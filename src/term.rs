//! Terminal presentation layer
//!
//! Draws a `Snapshot` with crossterm: each tile is two columns wide, the HUD
//! sits in the rows above the board. The whole frame is composed into a char
//! buffer first and then printed row by row.

use std::io::{self, Stdout, Write, stdout};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};
use glam::IVec2;

use crate::sim::{Snapshot, Tile};
use crate::ui::{self, ButtonAction, HudLayout, Label, LayoutStyle, Rect, TextMetrics};

/// Terminal columns per tile
pub const TILE_COLS: i32 = 2;
/// Rows above the board reserved for the HUD
pub const HUD_ROWS: i32 = 3;

const EMPTY: [char; 2] = ['.', ' '];
const WALL: [char; 2] = ['#', '#'];
const FOOD: [char; 2] = ['(', ')'];
const BODY: [char; 2] = ['[', ']'];
const HEAD: [char; 2] = ['@', '@'];
const DEAD_HEAD: [char; 2] = ['X', 'X'];

/// One column per char, one row per line
pub struct CellMetrics;

impl TextMetrics for CellMetrics {
    fn text_size(&self, text: &str) -> IVec2 {
        IVec2::new(text.chars().count() as i32, 1)
    }
}

/// Screen area, in cells, for a grid of `tile_count` tiles
pub fn viewport(tile_count: i32) -> IVec2 {
    IVec2::new(tile_count * TILE_COLS, tile_count + HUD_ROWS)
}

pub fn hud_layout(snapshot: &Snapshot<'_>) -> HudLayout {
    ui::layout(
        snapshot,
        viewport(snapshot.tile_count),
        &CellMetrics,
        &LayoutStyle::TERMINAL,
    )
}

/// HUD button under a mouse click at terminal `(column, row)`
pub fn hit_test(snapshot: &Snapshot<'_>, column: u16, row: u16) -> Option<ButtonAction> {
    hud_layout(snapshot).hit_test(IVec2::new(column as i32, row as i32))
}

/// Screen cell of the left half of a tile
fn tile_origin(tile: Tile) -> IVec2 {
    IVec2::new(tile.x * TILE_COLS, tile.y + HUD_ROWS)
}

/// Owns the terminal while the game runs; dropping it restores the terminal
pub struct TermRenderer {
    stdout: Stdout,
    size: IVec2,
    frame: Vec<char>,
    /// Set from the first `setup` step until `restore`
    active: bool,
}

impl TermRenderer {
    pub fn new() -> Self {
        Self {
            stdout: stdout(),
            size: IVec2::ZERO,
            frame: Vec::new(),
            active: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn setup(&mut self) -> io::Result<()> {
        self.active = true;
        execute!(
            self.stdout,
            EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()
    }

    /// Leave raw mode and the alternate screen. No-op unless set up.
    pub fn restore(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            DisableMouseCapture,
            cursor::Show,
            LeaveAlternateScreen
        )
    }

    /// Warn when the terminal cannot show the whole board
    pub fn check_size(&self, tile_count: i32) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        let needed = viewport(tile_count);
        if (cols as i32) < needed.x || (rows as i32) < needed.y {
            log::warn!(
                "Terminal is {}x{}, the board needs {}x{}",
                cols,
                rows,
                needed.x,
                needed.y
            );
        }
        Ok(())
    }

    pub fn render(&mut self, snapshot: &Snapshot<'_>) -> io::Result<()> {
        let size = viewport(snapshot.tile_count);
        if size != self.size {
            self.size = size;
            queue!(self.stdout, terminal::Clear(ClearType::All))?;
        }
        self.frame.clear();
        self.frame.resize((size.x * size.y) as usize, ' ');

        self.draw_board(snapshot);
        self.draw_hud(snapshot, &hud_layout(snapshot));

        for (row, line) in self.frame.chunks(size.x as usize).enumerate() {
            let line: String = line.iter().collect();
            queue!(self.stdout, cursor::MoveTo(0, row as u16), style::Print(line))?;
        }
        self.stdout.flush()
    }

    fn draw_board(&mut self, snapshot: &Snapshot<'_>) {
        for y in 0..snapshot.tile_count {
            for x in 0..snapshot.tile_count {
                self.put_tile(IVec2::new(x, y), EMPTY);
            }
        }
        for &wall in snapshot.walls {
            self.put_tile(wall, WALL);
        }
        for &food in snapshot.food {
            self.put_tile(food, FOOD);
        }
        for &segment in snapshot.snake.iter().skip(1) {
            self.put_tile(segment, BODY);
        }
        if let Some(&head) = snapshot.snake.front() {
            self.put_tile(head, if snapshot.game_over { DEAD_HEAD } else { HEAD });
        }
    }

    fn draw_hud(&mut self, snapshot: &Snapshot<'_>, hud: &HudLayout) {
        self.put_label(&hud.score);
        if snapshot.regen_pending {
            let pos = hud.score.pos + IVec2::Y;
            self.put_text(pos, "Maze shifting...");
        }

        for button in [&hud.pause_button, &hud.restart_button].into_iter().flatten() {
            self.put_box(button.rect);
            self.put_label(&button.label);
        }

        for label in &hud.banner {
            // One blank cell either side so the text reads over the board
            let width = CellMetrics.text_size(&label.text).x;
            self.put_text(label.pos - IVec2::X, &" ".repeat(width as usize + 2));
            self.put_label(label);
        }
    }

    fn put_tile(&mut self, tile: Tile, glyph: [char; 2]) {
        let origin = tile_origin(tile);
        self.put(origin, glyph[0]);
        self.put(origin + IVec2::X, glyph[1]);
    }

    fn put_label(&mut self, label: &Label) {
        self.put_text(label.pos, &label.text);
    }

    fn put_text(&mut self, pos: IVec2, text: &str) {
        for (i, ch) in text.chars().enumerate() {
            self.put(pos + IVec2::new(i as i32, 0), ch);
        }
    }

    /// Outline `rect` and blank its inside
    fn put_box(&mut self, rect: Rect) {
        let end = rect.origin + rect.size - IVec2::ONE;
        for y in rect.origin.y..=end.y {
            for x in rect.origin.x..=end.x {
                let on_x_edge = x == rect.origin.x || x == end.x;
                let on_y_edge = y == rect.origin.y || y == end.y;
                let ch = match (on_x_edge, on_y_edge) {
                    (true, true) => '+',
                    (false, true) => '-',
                    (true, false) => '|',
                    (false, false) => ' ',
                };
                self.put(IVec2::new(x, y), ch);
            }
        }
    }

    /// Write one cell, clipping anything off screen
    fn put(&mut self, pos: IVec2, ch: char) {
        if pos.cmpge(IVec2::ZERO).all() && pos.cmplt(self.size).all() {
            self.frame[(pos.y * self.size.x + pos.x) as usize] = ch;
        }
    }
}

impl Drop for TermRenderer {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            log::error!("Could not restore the terminal: {}", err);
        }
    }
}

impl Default for TermRenderer {
    fn default() -> Self {
        Self::new()
    }
}
