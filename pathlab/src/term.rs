//! Crossterm implementation of [`Driver`].

use std::error::Error;
use std::io::{self, Write};
use std::sync::mpsc::Sender;
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal::{self, ClearType},
};

use pathlab_core::Context;

use crate::canvas::{Color, Frame};
use crate::driver::Driver;
use crate::msg::{Key, MouseAction, Msg};

fn to_ct_color(c: Color) -> CtColor {
    match c {
        Color::Default => CtColor::Reset,
        Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
    }
}

fn to_key(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Char(' ') => Some(Key::Space),
        KeyCode::Char(c) => Some(Key::Char(c)),
        KeyCode::Enter => Some(Key::Enter),
        KeyCode::Esc => Some(Key::Escape),
        KeyCode::Tab => Some(Key::Tab),
        _ => None,
    }
}

/// Translate a terminal event. Ctrl+C becomes [`Msg::Quit`] since raw mode
/// swallows the signal.
pub fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) => {
            if kind == KeyEventKind::Release {
                return None;
            }
            if modifiers.contains(KeyModifiers::CONTROL) && code == KeyCode::Char('c') {
                return Some(Msg::Quit);
            }
            to_key(code).map(Msg::KeyDown)
        }
        Event::Mouse(MouseEvent {
            kind, column, row, ..
        }) => {
            let action = match kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                _ => return None,
            };
            Some(Msg::Mouse {
                action,
                x: column as i32,
                y: row as i32,
            })
        }
        Event::Resize(w, h) => Some(Msg::Screen {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm: alternate screen, raw mode, mouse
/// capture.
#[derive(Debug, Default)]
pub struct CrosstermDriver {
    active: bool,
}

impl CrosstermDriver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> Result<(), Box<dyn Error>> {
        terminal::enable_raw_mode()?;
        self.active = true;
        execute!(
            io::stdout(),
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    fn poll_msgs(
        &mut self,
        ctx: &Context,
        timeout: Duration,
        tx: Sender<Msg>,
    ) -> Result<(), Box<dyn Error>> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if ctx.is_done() {
                return Ok(());
            }
            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                execute!(io::stdout(), terminal::Clear(ClearType::All))?;
            }
            if let Some(msg) = to_msg(ev) {
                tx.send(msg).ok();
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>> {
        let mut out = io::stdout().lock();
        for fc in &frame.cells {
            let g = fc.glyph;
            queue!(
                out,
                cursor::MoveTo(fc.x as u16, fc.y as u16),
                SetForegroundColor(to_ct_color(g.fg)),
                SetBackgroundColor(to_ct_color(g.bg))
            )?;
            if g.bold {
                queue!(
                    out,
                    SetAttribute(Attribute::Bold),
                    Print(g.ch),
                    SetAttribute(Attribute::NormalIntensity)
                )?;
            } else {
                queue!(out, Print(g.ch))?;
            }
        }
        queue!(out, SetAttribute(Attribute::Reset))?;
        out.flush()?;
        Ok(())
    }

    fn close(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
