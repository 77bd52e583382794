//! Character-grid presenter and line-based input for terminals.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use glam::Vec2;
use scavenger_core::{CellCoord, OccupantKind, TileKind};
use scavenger_rendering::{
    food_label, Actor, Cue, CueSink, FrameInput, FrameSource, GridLayout, HudSurface,
    TileRenderer,
};

/// Presenter that keeps a character copy of the board and prints it per frame.
#[derive(Debug)]
pub(crate) struct TextPresenter {
    columns: u32,
    rows: u32,
    layout: GridLayout,
    tiles: Vec<char>,
    occupants: Vec<Option<OccupantKind>>,
    food: Option<i32>,
    banner: Option<String>,
    cues: Vec<String>,
}

impl TextPresenter {
    pub(crate) fn new(columns: u32, rows: u32) -> Self {
        let len = usize::try_from(u64::from(columns) * u64::from(rows)).unwrap_or(0);
        Self {
            columns,
            rows,
            layout: GridLayout::default(),
            tiles: vec![' '; len],
            occupants: vec![None; len],
            food: None,
            banner: None,
            cues: Vec::new(),
        }
    }

    /// Prints the board with the top row first, followed by the HUD and any
    /// cues collected since the previous frame.
    pub(crate) fn draw<W: Write>(&mut self, out: &mut W) -> Result<()> {
        for row in (0..self.rows).rev() {
            let line: String = (0..self.columns)
                .map(|column| self.glyph(CellCoord::new(column, row)))
                .collect();
            writeln!(out, "{line}")?;
        }

        if let Some(food) = self.food {
            writeln!(out, "{}", food_label(food))?;
        }
        for cue in self.cues.drain(..) {
            writeln!(out, "  {cue}")?;
        }
        if let Some(banner) = &self.banner {
            writeln!(out, "\n{banner}\n(r to restart, q to quit)")?;
        }
        Ok(())
    }

    fn glyph(&self, cell: CellCoord) -> char {
        let Some(index) = self.index(cell) else {
            return ' ';
        };
        match self.occupants.get(index).copied().flatten() {
            Some(OccupantKind::Player) => '@',
            Some(OccupantKind::Enemy) => 'e',
            Some(OccupantKind::Wall) => 'w',
            Some(OccupantKind::Food) => 'f',
            Some(OccupantKind::Exit) => 'E',
            None => self.tiles.get(index).copied().unwrap_or(' '),
        }
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if cell.column() >= self.columns || cell.row() >= self.rows {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

impl TileRenderer for TextPresenter {
    fn place_tile(&mut self, cell: CellCoord, tile: TileKind) {
        if let Some(slot) = self.index(cell).and_then(|index| self.tiles.get_mut(index)) {
            *slot = match tile {
                TileKind::Ground(_) => '.',
                TileKind::Blocking(_) => '#',
            };
        }
    }

    fn place_occupant(&mut self, cell: CellCoord, kind: OccupantKind) {
        if let Some(slot) = self
            .index(cell)
            .and_then(|index| self.occupants.get_mut(index))
        {
            *slot = Some(kind);
        }
    }

    fn clear_occupant(&mut self, cell: CellCoord) {
        if let Some(slot) = self
            .index(cell)
            .and_then(|index| self.occupants.get_mut(index))
        {
            *slot = None;
        }
    }

    fn clear_tile(&mut self, cell: CellCoord) {
        self.clear_occupant(cell);
        if let Some(slot) = self.index(cell).and_then(|index| self.tiles.get_mut(index)) {
            *slot = ' ';
        }
    }

    fn world_position(&self, cell: CellCoord) -> Vec2 {
        self.layout.world_position(cell)
    }
}

impl HudSurface for TextPresenter {
    fn show_food(&mut self, food: i32) {
        self.food = Some(food);
    }

    fn show_game_over(&mut self, message: &str) {
        self.banner = Some(message.to_owned());
    }

    fn hide_game_over(&mut self) {
        self.banner = None;
    }
}

impl CueSink for TextPresenter {
    fn cue(&mut self, actor: Actor, cue: Cue) {
        let who = match actor {
            Actor::Player => "you".to_owned(),
            Actor::Enemy(enemy) => format!("enemy {}", enemy.get()),
            Actor::Wall(wall) => format!("wall {}", wall.get()),
        };
        let line = match cue {
            Cue::Moving => return,
            Cue::Attack => format!("{who} attacks"),
            Cue::Damage => format!("{who} takes a hit"),
            Cue::Hurt => format!("{who} are hurt"),
        };
        log::debug!("{line}");
        self.cues.push(line);
    }
}

/// Reads one frame per input line: `w`/`a`/`s`/`d` move, `r` restarts, `q` quits.
#[derive(Debug)]
pub(crate) struct StdinFrames<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> StdinFrames<R> {
    pub(crate) fn new(reader: R) -> Self {
        Self {
            reader,
            line: String::new(),
        }
    }
}

impl<R: BufRead> FrameSource for StdinFrames<R> {
    fn next_frame(&mut self) -> Result<Option<FrameInput>> {
        self.line.clear();
        let read = self
            .reader
            .read_line(&mut self.line)
            .context("failed to read input")?;
        if read == 0 {
            return Ok(None);
        }

        let mut frame = FrameInput::default();
        match self.line.trim().chars().next() {
            Some('q' | 'Q') => return Ok(None),
            Some('w' | 'W') => frame.up = true,
            Some('s' | 'S') => frame.down = true,
            Some('a' | 'A') => frame.left = true,
            Some('d' | 'D') => frame.right = true,
            Some('r' | 'R') => frame.restart = true,
            _ => {}
        }
        Ok(Some(frame))
    }
}
