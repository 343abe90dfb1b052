//! Frame painter: composes the whole dashboard into one buffer and flushes
//! it with a single write, so a frame never appears half-drawn.

use crate::ui::layout::{DashboardLayout, Rect};
use crate::ui::views::ViewState;
use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use unicode_width::UnicodeWidthChar;

/// Pre-allocated frame buffer plus the stdout handle it flushes to.
pub struct Screen {
    out: Vec<u8>,
}

impl Screen {
    /// Create a screen with a typical frame's worth of capacity.
    pub fn new() -> Self {
        Self {
            out: Vec::with_capacity(16 * 1024),
        }
    }

    /// Compose and flush one frame.
    pub fn render(
        &mut self,
        layout: &DashboardLayout,
        state: &mut ViewState,
        status: &str,
    ) -> io::Result<()> {
        self.out.clear();
        self.compose(layout, state, status)?;

        let mut stdout = io::stdout();
        stdout.write_all(&self.out)?;
        stdout.flush()
    }

    fn compose(
        &mut self,
        layout: &DashboardLayout,
        state: &mut ViewState,
        status: &str,
    ) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))?;

        self.pane(layout.status, "Status")?;
        let inner = layout.status.inner();
        if !inner.is_empty() {
            queue!(self.out, SetForegroundColor(Color::Green))?;
            self.text(inner.x, inner.y, inner.width, status)?;
            queue!(self.out, ResetColor)?;
        }

        self.pane(layout.events, "Breakpoints")?;
        let inner = layout.events.inner();
        if !inner.is_empty() {
            state
                .list
                .ensure_visible(state.selected(), inner.height as usize);
            let selected = state.selected();
            let offset = state.list.offset();
            queue!(self.out, SetForegroundColor(Color::Yellow))?;
            for (index, row) in state.list.visible(inner.height as usize) {
                let y = inner.y + (index - offset) as u16;
                if index == selected {
                    queue!(self.out, SetAttribute(Attribute::Reverse))?;
                    self.text(inner.x, y, inner.width, row)?;
                    queue!(self.out, SetAttribute(Attribute::NoReverse))?;
                } else {
                    self.text(inner.x, y, inner.width, row)?;
                }
            }
            queue!(self.out, ResetColor)?;
        }

        self.pane(layout.callstack, "Call stack")?;
        let inner = layout.callstack.inner();
        if !inner.is_empty() {
            let offset = state.callstack.offset();
            queue!(self.out, SetForegroundColor(Color::Yellow))?;
            for (index, row) in state.callstack.visible(inner.height as usize) {
                let y = inner.y + (index - offset) as u16;
                self.text(inner.x, y, inner.width, row)?;
            }
            queue!(self.out, ResetColor)?;
        }

        self.pane(layout.payload, "Payload")?;
        let inner = layout.payload.inner();
        if !inner.is_empty() {
            for (i, line) in state.payload.lines().take(inner.height as usize).enumerate() {
                self.text(inner.x, inner.y + i as u16, inner.width, line)?;
            }
        }

        Ok(())
    }

    /// Draw a bordered pane with its title in the top edge.
    fn pane(&mut self, rect: Rect, title: &str) -> io::Result<()> {
        if rect.width < 2 || rect.height < 2 {
            return Ok(());
        }

        let inner_width = (rect.width - 2) as usize;
        let top_label = truncate(title, inner_width.saturating_sub(2));
        let mut top = String::with_capacity(rect.width as usize * 3);
        top.push('┌');
        if top_label.is_empty() {
            top.extend(std::iter::repeat('─').take(inner_width));
        } else {
            top.push('─');
            top.push_str(top_label);
            let used = 1 + width_of(top_label);
            top.extend(std::iter::repeat('─').take(inner_width.saturating_sub(used)));
        }
        top.push('┐');
        queue!(self.out, MoveTo(rect.x, rect.y), Print(&top))?;

        for y in rect.y + 1..rect.y + rect.height - 1 {
            queue!(self.out, MoveTo(rect.x, y), Print('│'))?;
            queue!(self.out, MoveTo(rect.x + rect.width - 1, y), Print('│'))?;
        }

        let mut bottom = String::with_capacity(rect.width as usize * 3);
        bottom.push('└');
        bottom.extend(std::iter::repeat('─').take(inner_width));
        bottom.push('┘');
        queue!(
            self.out,
            MoveTo(rect.x, rect.y + rect.height - 1),
            Print(&bottom)
        )
    }

    /// Print `text` at (x, y), truncated to `width` display columns.
    fn text(&mut self, x: u16, y: u16, width: u16, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y), Print(truncate(text, width as usize)))
    }
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

/// Display-column width of a string.
fn width_of(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}

/// Longest prefix of `text` that fits in `max` display columns.
fn truncate(text: &str, max: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        let w = c.width().unwrap_or(0);
        if used + w > max {
            return &text[..idx];
        }
        used += w;
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::layout::DashboardLayout;

    #[test]
    fn truncate_by_display_width() {
        assert_eq!(truncate("hello", 3), "hel");
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("", 5), "");
        // A double-width char that does not fit is dropped entirely.
        assert_eq!(truncate("a漢b", 2), "a");
        assert_eq!(truncate("a漢b", 3), "a漢");
    }

    #[test]
    fn compose_emits_all_pane_titles() {
        let mut screen = Screen::new();
        let layout = DashboardLayout::compute(80, 24);
        let mut state = ViewState::new();

        screen
            .compose(&layout, &mut state, "Listening on 127.0.0.1:8080")
            .unwrap();

        let frame = String::from_utf8_lossy(&screen.out).into_owned();
        for title in ["Status", "Breakpoints", "Call stack", "Payload"] {
            assert!(frame.contains(title), "missing pane title {title}");
        }
        assert!(frame.contains("Listening on 127.0.0.1:8080"));
    }

    #[test]
    fn compose_renders_event_rows() {
        let mut screen = Screen::new();
        let layout = DashboardLayout::compute(100, 30);
        let mut state = ViewState::new();
        state.apply_snapshot(vec![crate::event::DumpEvent {
            payload: "\"x\"".into(),
            callstack: Vec::new(),
            file: "a.go".into(),
            line: "7".into(),
            dump_type: "go".into(),
            timestamp: String::new(),
        }]);

        screen.compose(&layout, &mut state, "status").unwrap();
        let frame = String::from_utf8_lossy(&screen.out).into_owned();
        assert!(frame.contains("7:[a.go]"));
    }

    #[test]
    fn tiny_terminal_composes_without_panicking() {
        let mut screen = Screen::new();
        let layout = DashboardLayout::compute(3, 2);
        let mut state = ViewState::new();
        screen.compose(&layout, &mut state, "s").unwrap();
    }
}
