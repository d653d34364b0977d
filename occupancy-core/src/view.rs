//! Display views
//!
//! Every screen the counter can show, laid out for a 128x64 monochrome panel.
//! A view is plain data: consumers queue it while holding the state lock and
//! the display task renders every queued view, in order, through a
//! [`TextSink`].

use core::fmt::{self, Write};

use defmt::Format;
use embassy_sync::channel::Channel;
use heapless::{String, Vec};

use crate::config::VIEW_DEPTH;

/// Longest text on any screen, "Vacancies: 10"
const LINE_LEN: usize = 16;
/// Most lines on any screen
const MAX_LINES: usize = 5;

/// In-order hand-off from the consumers to the display task. No view is
/// dropped or coalesced; a consumer waits when the display falls behind.
pub type ViewQueue<M> = Channel<M, View, VIEW_DEPTH>;

/// Blocking text display: clear the frame buffer, draw, push it to the panel
pub trait TextSink {
    type Error;

    fn clear(&mut self) -> Result<(), Self::Error>;
    fn draw_text(&mut self, text: &str, x: i32, y: i32) -> Result<(), Self::Error>;
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// A positioned line of text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub text: String<LINE_LEN>,
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Format)]
pub enum View {
    /// Boot screen with the button legend
    Startup,
    /// A user was counted
    Admitted { count: u8, vacancies: u8 },
    /// Entry rejected, no places left
    Full { count: u8, vacancies: u8 },
    /// A user left
    Removed { count: u8, vacancies: u8 },
    /// Exit pressed with nobody present
    NothingToRemove { count: u8, vacancies: u8 },
    /// Transient reset banner
    Reset,
    /// Shown once the reset banner has been held
    AwaitingUsers,
}

impl View {
    pub fn lines(&self) -> Vec<Line, MAX_LINES> {
        let mut lines = Vec::new();
        let put = &mut lines;

        match *self {
            View::Startup => {
                put_line(put, 35, 5, format_args!("System"));
                put_line(put, 30, 15, format_args!("started!"));
                put_line(put, 10, 35, format_args!("A = Entry"));
                put_line(put, 10, 45, format_args!("B = Exit"));
                put_line(put, 10, 55, format_args!("J = Reset"));
            }
            View::Admitted { count, vacancies } => {
                put_line(put, 40, 10, format_args!("User"));
                put_line(put, 30, 19, format_args!("admitted!"));
                tally(put, count, vacancies);
            }
            View::Full { count, vacancies } => {
                put_line(put, 40, 10, format_args!("No more"));
                put_line(put, 30, 19, format_args!("vacancies!"));
                tally(put, count, vacancies);
            }
            View::Removed { count, vacancies } => {
                put_line(put, 40, 10, format_args!("User"));
                put_line(put, 30, 19, format_args!("removed!"));
                tally(put, count, vacancies);
            }
            View::NothingToRemove { count, vacancies } => {
                put_line(put, 10, 15, format_args!("No user"));
                put_line(put, 15, 25, format_args!("to remove!"));
                tally(put, count, vacancies);
            }
            View::Reset => {
                put_line(put, 45, 30, format_args!("RESET!"));
            }
            View::AwaitingUsers => {
                put_line(put, 35, 10, format_args!("System"));
                put_line(put, 30, 20, format_args!("reset!"));
                put_line(put, 25, 35, format_args!("Waiting for"));
                put_line(put, 30, 45, format_args!("users..."));
            }
        }

        lines
    }

    /// Clears the panel, draws every line and flushes
    pub fn render<S: TextSink>(&self, sink: &mut S) -> Result<(), S::Error> {
        sink.clear()?;
        for line in self.lines() {
            sink.draw_text(&line.text, line.x, line.y)?;
        }
        sink.flush()
    }
}

fn put_line(lines: &mut Vec<Line, MAX_LINES>, x: i32, y: i32, args: fmt::Arguments) {
    let mut text = String::new();
    // texts are sized for the panel, overflow only truncates in release builds
    let written = text.write_fmt(args);
    debug_assert!(written.is_ok(), "line longer than {} characters", LINE_LEN);
    let pushed = lines.push(Line { text, x, y });
    debug_assert!(pushed.is_ok(), "view has more than {} lines", MAX_LINES);
}

/// Footer shared by the entry and exit screens
fn tally(lines: &mut Vec<Line, MAX_LINES>, count: u8, vacancies: u8) {
    put_line(lines, 5, 44, format_args!("Users: {}", count));
    put_line(lines, 5, 54, format_args!("Vacancies: {}", vacancies));
}
