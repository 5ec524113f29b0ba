//! The event loop: poll, update, draw, diff, flush.
//!
//! A search runs synchronously inside the loop. While it runs, an
//! [`Animator`] observer repaints the screen after every expansion, waits the
//! configured delay, and watches the input for ESC.

use std::error::Error;
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use pathlab_core::{Context, HeuristicKind, SearchObserver, Step};

use crate::app::{App, Effect, Mode};
use crate::canvas::{Canvas, compute_frame};
use crate::driver::Driver;
use crate::msg::{Key, Msg};
use crate::view::{self, Panel};

/// Poll timeout while idle.
const IDLE_POLL: Duration = Duration::from_millis(16);

pub struct Runner<D: Driver> {
    app: App,
    driver: D,
    step_delay: Duration,
    prev: Canvas,
    curr: Canvas,
}

impl<D: Driver> Runner<D> {
    pub fn new(app: App, driver: D, step_delay: Duration) -> Self {
        let (w, h) = view::canvas_size(app.grid().rows(), app.grid().cols());
        Self {
            app,
            driver,
            step_delay,
            prev: Canvas::new(w, h),
            curr: Canvas::new(w, h),
        }
    }

    pub fn app(&self) -> &App {
        &self.app
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run until the app asks to end. The driver is closed on every exit
    /// path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        let result = self.driver.init().and_then(|()| self.event_loop());
        self.driver.close();
        if let Err(e) = &result {
            log::error!("event loop failed: {e}");
        }
        result
    }

    fn event_loop(&mut self) -> Result<(), Box<dyn Error>> {
        let ctx = Context::new();
        let (tx, rx) = mpsc::channel();
        tx.send(Msg::Init).ok();
        self.prev.invalidate();

        self.process_pending(&ctx, &rx)?;
        while !ctx.is_done() {
            self.driver.poll_msgs(&ctx, IDLE_POLL, tx.clone())?;
            self.process_pending(&ctx, &rx)?;
        }
        Ok(())
    }

    fn process_pending(&mut self, ctx: &Context, rx: &Receiver<Msg>) -> Result<(), Box<dyn Error>> {
        let mut needs_draw = false;
        while let Ok(msg) = rx.try_recv() {
            if let Msg::Screen { .. } = msg {
                self.prev.invalidate();
            }
            needs_draw = true;
            match self.app.update(msg) {
                Some(Effect::End) => {
                    ctx.cancel();
                    return Ok(());
                }
                Some(Effect::RunSearch) => {
                    if self.animate()? {
                        ctx.cancel();
                        return Ok(());
                    }
                }
                None => {}
            }
        }
        if needs_draw {
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), Box<dyn Error>> {
        self.app.draw(&mut self.curr);
        let frame = compute_frame(&self.prev, &self.curr);
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        self.prev.copy_from(&self.curr);
        Ok(())
    }

    /// Run the search with animation. Returns whether a quit was requested
    /// while it ran.
    fn animate(&mut self) -> Result<bool, Box<dyn Error>> {
        let cancel = Context::new();
        let mut animator = Animator {
            driver: &mut self.driver,
            prev: &mut self.prev,
            curr: &mut self.curr,
            mode: self.app.mode(),
            heuristic: self.app.heuristic(),
            delay: self.step_delay,
            cancel: cancel.clone(),
            quit: false,
            error: None,
        };
        let searched = self.app.run_search(cancel, &mut animator);
        let Animator { quit, error, .. } = animator;
        if let Some(e) = error {
            return Err(e);
        }
        searched?;
        Ok(quit)
    }
}

/// Observer painting one frame per expansion.
struct Animator<'a, D: Driver> {
    driver: &'a mut D,
    prev: &'a mut Canvas,
    curr: &'a mut Canvas,
    mode: Mode,
    heuristic: HeuristicKind,
    delay: Duration,
    cancel: Context,
    quit: bool,
    error: Option<Box<dyn Error>>,
}

impl<D: Driver> Animator<'_, D> {
    fn frame(&mut self, step: &Step<'_>) -> Result<(), Box<dyn Error>> {
        self.curr.clear();
        let panel = Panel {
            mode: self.mode,
            heuristic: self.heuristic,
            nodes: Some(step.nodes_explored),
            path_length: None,
            cost: None,
            elapsed: None,
            message: "Searching... press ESC to cancel.",
        };
        view::draw_panel(self.curr, &panel);
        view::draw_grid(self.curr, step.grid);
        view::draw_help(self.curr);

        let frame = compute_frame(self.prev, self.curr);
        if !frame.cells.is_empty() {
            self.driver.flush(frame)?;
        }
        self.prev.copy_from(self.curr);

        let (tx, rx) = mpsc::channel();
        self.driver.poll_msgs(&self.cancel, self.delay, tx)?;
        for msg in rx.try_iter() {
            match msg {
                Msg::KeyDown(Key::Escape) => self.cancel.cancel(),
                Msg::Quit => {
                    self.quit = true;
                    self.cancel.cancel();
                }
                Msg::Screen { .. } => self.prev.invalidate(),
                _ => {}
            }
        }
        Ok(())
    }
}

impl<D: Driver> SearchObserver for Animator<'_, D> {
    fn on_expand(&mut self, step: &Step<'_>) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.frame(step) {
            self.cancel.cancel();
            self.error = Some(e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Frame;
    use crate::config::Config;
    use crate::view::{CELL_WIDTH, PANEL_HEIGHT};
    use pathlab_core::Pos;
    use std::collections::VecDeque;
    use std::sync::mpsc::Sender;

    /// Replays batches of messages, one batch per poll, then sends `Quit`.
    #[derive(Default)]
    struct Scripted {
        batches: VecDeque<Vec<Msg>>,
        frames: Vec<Frame>,
        fail_flush: bool,
        inited: bool,
        closed: bool,
    }

    impl Scripted {
        fn new(batches: Vec<Vec<Msg>>) -> Self {
            Self {
                batches: batches.into(),
                ..Self::default()
            }
        }
    }

    impl Driver for Scripted {
        fn init(&mut self) -> Result<(), Box<dyn Error>> {
            self.inited = true;
            Ok(())
        }

        fn poll_msgs(
            &mut self,
            _ctx: &Context,
            _timeout: Duration,
            tx: Sender<Msg>,
        ) -> Result<(), Box<dyn Error>> {
            let batch = self.batches.pop_front().unwrap_or_else(|| vec![Msg::Quit]);
            for m in batch {
                tx.send(m).ok();
            }
            Ok(())
        }

        fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
            if self.fail_flush {
                return Err("screen gone".into());
            }
            self.frames.push(frame);
            Ok(())
        }

        fn close(&mut self) {
            self.closed = true;
        }
    }

    fn runner(driver: Scripted) -> Runner<Scripted> {
        let config = Config {
            rows: 5,
            cols: 5,
            seed: Some(3),
            ..Config::default()
        };
        Runner::new(App::new(&config).unwrap(), driver, Duration::ZERO)
    }

    fn click(p: Pos) -> Msg {
        Msg::click(p.col * CELL_WIDTH, p.row + PANEL_HEIGHT)
    }

    fn setup_and_run() -> Vec<Msg> {
        vec![
            Msg::char('s'),
            click(Pos::new(0, 0)),
            Msg::char('e'),
            click(Pos::new(4, 4)),
            Msg::KeyDown(Key::Space),
        ]
    }

    #[test]
    fn quit_closes_driver() {
        let mut r = runner(Scripted::new(vec![vec![Msg::char('q')]]));
        r.run().unwrap();
        assert!(r.driver().inited);
        assert!(r.driver().closed);
        // Initial paint covers the whole canvas.
        let (w, h) = view::canvas_size(5, 5);
        assert_eq!(r.driver().frames[0].cells.len(), (w * h) as usize);
    }

    #[test]
    fn search_is_animated_frame_by_frame() {
        let mut batches = vec![setup_and_run()];
        batches.extend(std::iter::repeat_with(Vec::new).take(40));
        batches.push(vec![Msg::char('q')]);
        let mut r = runner(Scripted::new(batches));
        r.run().unwrap();

        let result = r.app().last_result().unwrap();
        assert!(result.found);
        assert_eq!(result.path_length(), 8);
        // Init paint, plus one frame per expansion, plus the final paint.
        assert!(r.driver().frames.len() >= result.nodes_explored + 2);
    }

    #[test]
    fn escape_cancels_animation_only() {
        let batches = vec![
            setup_and_run(),
            vec![Msg::KeyDown(Key::Escape)],
            vec![Msg::char('w')],
            vec![Msg::char('q')],
        ];
        let mut r = runner(Scripted::new(batches));
        r.run().unwrap();
        assert!(r.app().last_result().is_none());
        assert_eq!(r.app().message(), "Mode: WALL");
        assert!(r.app().grid().iter().all(|c| !c.is_open() && !c.is_closed()));
    }

    #[test]
    fn quit_during_animation_ends_the_loop() {
        let batches = vec![setup_and_run(), vec![Msg::Quit], vec![Msg::char('s')]];
        let mut r = runner(Scripted::new(batches));
        r.run().unwrap();
        assert!(r.app().message().starts_with("Search cancelled"));
        assert_eq!(r.driver().batches.len(), 1);
    }

    #[test]
    fn flush_errors_propagate_and_close() {
        let mut driver = Scripted::new(vec![]);
        driver.fail_flush = true;
        let mut r = runner(driver);
        let err = r.run().unwrap_err();
        assert_eq!(err.to_string(), "screen gone");
        assert!(r.driver().closed);
    }
}
