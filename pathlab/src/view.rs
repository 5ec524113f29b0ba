//! Screen layout: status panel on top, grid below, key help at the bottom.
//!
//! Each grid cell is [`CELL_WIDTH`] terminal columns wide so cells look
//! roughly square.

use std::time::Duration;

use pathlab_core::{Cell, Grid, HeuristicKind, Pos};

use crate::app::Mode;
use crate::canvas::{Canvas, Color, Glyph, palette};

/// Lines of status panel above the grid.
pub const PANEL_HEIGHT: i32 = 3;
/// Terminal columns per grid cell.
pub const CELL_WIDTH: i32 = 2;

const HELP: &str = " s/e/w mode  1-3/TAB heuristic  SPACE run  m maze  c clear  r reset  q quit";

/// Canvas size needed for a `rows` by `cols` grid.
pub fn canvas_size(rows: i32, cols: i32) -> (i32, i32) {
    let width = (cols * CELL_WIDTH).max(HELP.chars().count() as i32);
    (width, PANEL_HEIGHT + rows + 1)
}

/// Grid position under terminal column `x`, line `y`. The result may still
/// lie outside the grid; check with [`Grid::contains`].
pub fn screen_to_pos(x: i32, y: i32) -> Option<Pos> {
    (x >= 0 && y >= PANEL_HEIGHT).then(|| Pos::new(y - PANEL_HEIGHT, x / CELL_WIDTH))
}

fn cell_color(cell: &Cell) -> Color {
    match cell.glyph() {
        'S' => palette::START,
        'E' => palette::END,
        '*' => palette::PATH,
        'x' => palette::CLOSED,
        'o' => palette::OPEN,
        '#' => palette::WALL,
        _ => palette::EMPTY,
    }
}

/// The two glyphs painting one cell.
pub fn cell_glyphs(cell: &Cell) -> [Glyph; 2] {
    let bg = cell_color(cell);
    let ch = match cell.glyph() {
        c @ ('S' | 'E') => c,
        _ => ' ',
    };
    [
        Glyph::new(ch, palette::INK, bg).bold(),
        Glyph::new(' ', palette::GRID_LINE, bg),
    ]
}

pub fn draw_grid(canvas: &mut Canvas, grid: &Grid) {
    for cell in grid.iter() {
        let p = cell.pos();
        let y = PANEL_HEIGHT + p.row;
        let x = p.col * CELL_WIDTH;
        for (dx, g) in cell_glyphs(cell).into_iter().enumerate() {
            canvas.set(x + dx as i32, y, g);
        }
    }
}

/// Everything the status panel shows.
#[derive(Debug, Clone, Copy)]
pub struct Panel<'a> {
    pub mode: Mode,
    pub heuristic: HeuristicKind,
    /// Cells expanded by the last or current search.
    pub nodes: Option<usize>,
    pub path_length: Option<usize>,
    pub cost: Option<f64>,
    pub elapsed: Option<Duration>,
    pub message: &'a str,
}

fn or_dash<T>(v: Option<T>, f: impl FnOnce(T) -> String) -> String {
    v.map(f).unwrap_or_else(|| "-".into())
}

pub fn draw_panel(canvas: &mut Canvas, panel: &Panel<'_>) {
    let n = canvas.text(0, 0, " A* Pathfinding", palette::ACCENT, Color::Default);
    for x in 0..n {
        let g = canvas.at(x, 0).bold();
        canvas.set(x, 0, g);
    }
    let header = format!(
        "  Mode: {}  Heuristic: {} ({})",
        panel.mode,
        panel.heuristic,
        panel.heuristic.movement()
    );
    canvas.text(n, 0, &header, Color::Default, Color::Default);

    let stats = format!(
        " Nodes: {}  Path: {}  Cost: {}  Time: {}",
        or_dash(panel.nodes, |n| n.to_string()),
        or_dash(panel.path_length, |n| n.to_string()),
        or_dash(panel.cost, |c| format!("{c:.2}")),
        or_dash(panel.elapsed, |d| format!("{:.3} ms", d.as_secs_f64() * 1000.0)),
    );
    canvas.text(0, 1, &stats, Color::Default, Color::Default);
    canvas.text(0, 2, &format!(" {}", panel.message), palette::ACCENT, Color::Default);
}

/// Key help on the last canvas line.
pub fn draw_help(canvas: &mut Canvas) {
    let y = canvas.height() - 1;
    canvas.text(0, y, HELP, palette::GRID_LINE, Color::Default);
}
