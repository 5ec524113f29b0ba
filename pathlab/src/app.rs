//! Demonstrator state and event dispatch.
//!
//! [`App::update`] handles one [`Msg`] and may ask the run loop for an
//! [`Effect`]. The search itself runs through [`App::run_search`] so the loop
//! can attach an animating observer and a cancellation [`Context`].

use std::fmt;

use pathlab_core::{
    AStar, Context, Grid, GridError, HeuristicKind, Pos, SearchError, SearchObserver, SearchResult,
};
use pathlab_maze::MazeGen;
use rand::rngs::StdRng;

use crate::canvas::Canvas;
use crate::config::Config;
use crate::msg::{Key, MouseAction, Msg};
use crate::view::{self, Panel};

/// What a mouse click on the grid does.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    Start,
    End,
    #[default]
    Wall,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Start => "START",
            Self::End => "END",
            Self::Wall => "WALL",
        })
    }
}

/// Work the run loop must do on behalf of [`App::update`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    /// Run an animated search.
    RunSearch,
    /// Leave the application.
    End,
}

pub struct App {
    grid: Grid,
    mode: Mode,
    heuristic: HeuristicKind,
    last: Option<SearchResult>,
    message: String,
    maze: MazeGen<StdRng>,
    density: f64,
}

impl App {
    pub fn new(config: &Config) -> Result<Self, GridError> {
        let maze = match config.seed {
            Some(seed) => MazeGen::seeded(seed),
            None => MazeGen::from_entropy(),
        };
        Ok(Self {
            grid: Grid::build(config.rows, config.cols)?,
            mode: Mode::default(),
            heuristic: config.heuristic,
            last: None,
            message: String::new(),
            maze,
            density: config.maze_density,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn heuristic(&self) -> HeuristicKind {
        self.heuristic
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Result of the last completed search, until the grid is next reset.
    pub fn last_result(&self) -> Option<&SearchResult> {
        self.last.as_ref()
    }

    fn say(&mut self, msg: impl Into<String>) {
        self.message = msg.into();
        log::debug!("{}", self.message);
    }

    fn endpoints_placed(&self) -> bool {
        self.grid.start().is_some() && self.grid.end().is_some()
    }

    pub fn update(&mut self, msg: Msg) -> Option<Effect> {
        match msg {
            Msg::Init => {
                self.say("Click to draw walls. Press s or e to place start and end.");
                None
            }
            Msg::Quit => Some(Effect::End),
            Msg::Screen { .. } => None,
            Msg::KeyDown(key) => self.on_key(key),
            Msg::Mouse { action, x, y } => {
                if action == MouseAction::Main {
                    if let Some(p) = view::screen_to_pos(x, y) {
                        self.on_click(p);
                    }
                }
                None
            }
        }
    }

    fn on_key(&mut self, key: Key) -> Option<Effect> {
        match key {
            Key::Escape | Key::Char('q') => return Some(Effect::End),
            Key::Char('s') => self.set_mode(Mode::Start),
            Key::Char('e') => self.set_mode(Mode::End),
            Key::Char('w') => self.set_mode(Mode::Wall),
            Key::Char(c @ '1'..='3') => {
                let i = c as usize - '1' as usize;
                self.set_heuristic(HeuristicKind::ALL[i]);
            }
            Key::Tab => self.set_heuristic(self.heuristic.next()),
            Key::Space | Key::Enter => {
                if self.endpoints_placed() {
                    return Some(Effect::RunSearch);
                }
                self.say("Place both start and end before searching.");
            }
            Key::Char('c') => {
                self.grid.clear_walls();
                self.last = None;
                self.say("Walls cleared.");
            }
            Key::Char('r') => {
                self.grid.full_reset();
                self.last = None;
                self.say("Grid reset.");
            }
            Key::Char('m') => {
                if self.endpoints_placed() {
                    let walls = self.maze.scatter_walls(&mut self.grid, self.density);
                    self.last = None;
                    self.say(format!("Random maze: {walls} walls."));
                } else {
                    self.say("Place both start and end before generating a maze.");
                }
            }
            Key::Char(_) => {}
        }
        None
    }

    fn set_mode(&mut self, mode: Mode) {
        self.mode = mode;
        self.say(format!("Mode: {mode}"));
    }

    fn set_heuristic(&mut self, h: HeuristicKind) {
        self.heuristic = h;
        self.say(format!("Heuristic: {h} ({})", h.movement()));
    }

    fn on_click(&mut self, p: Pos) {
        if !self.grid.contains(p) {
            return;
        }
        // Edits only fail out of bounds, which `contains` rules out.
        let edited = match self.mode {
            Mode::Start => self.grid.set_start(p).map(|()| format!("Start at {p}")),
            Mode::End => self.grid.set_end(p).map(|()| format!("End at {p}")),
            Mode::Wall => {
                let cell = self.grid.cell(p).copied();
                if cell.is_some_and(|c| c.is_start() || c.is_end()) {
                    return;
                }
                self.grid.toggle_wall(p).map(|wall| {
                    if wall {
                        format!("Wall at {p}")
                    } else {
                        format!("Floor at {p}")
                    }
                })
            }
        };
        match edited {
            Ok(m) => self.say(m),
            Err(e) => log::warn!("click at {p}: {e}"),
        }
    }

    /// Run the current heuristic between the placed endpoints.
    ///
    /// Cancellation and invalid endpoints are reported on the message line.
    /// Only an inconsistent predecessor chain, which means the engine is
    /// broken, is returned as an error.
    pub fn run_search<O: SearchObserver + ?Sized>(
        &mut self,
        ctx: Context,
        observer: &mut O,
    ) -> Result<(), SearchError> {
        let (Some(start), Some(end)) = (self.grid.start(), self.grid.end()) else {
            self.say("Place both start and end before searching.");
            return Ok(());
        };
        let h = self.heuristic;
        let engine = AStar::new(&h, h.movement()).with_context(ctx);
        self.last = None;
        match engine.run_observed(&mut self.grid, start, end, observer) {
            Ok(result) => {
                if result.found {
                    self.say(format!(
                        "Path found: {} moves, cost {:.2}.",
                        result.path_length(),
                        result.cost
                    ));
                } else {
                    self.say("No path exists.");
                }
                self.last = Some(result);
                Ok(())
            }
            Err(SearchError::Cancelled { nodes_explored }) => {
                self.say(format!("Search cancelled after {nodes_explored} nodes."));
                Ok(())
            }
            Err(SearchError::InvalidEndpoint(problem)) => {
                self.say(format!("Cannot search: {problem}."));
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    pub fn panel(&self) -> Panel<'_> {
        let found = self.last.as_ref().filter(|r| r.found);
        Panel {
            mode: self.mode,
            heuristic: self.heuristic,
            nodes: self.last.as_ref().map(|r| r.nodes_explored),
            path_length: found.map(SearchResult::path_length),
            cost: found.map(|r| r.cost),
            elapsed: self.last.as_ref().map(|r| r.elapsed),
            message: &self.message,
        }
    }

    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.clear();
        view::draw_panel(canvas, &self.panel());
        view::draw_grid(canvas, &self.grid);
        view::draw_help(canvas);
    }
}
