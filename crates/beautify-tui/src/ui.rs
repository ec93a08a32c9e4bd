//! Drawing the window frame, panes, and status bar.
//!
//! The window is rendered into an off-screen buffer the size of the chrome geometry and then
//! copied onto the terminal, so a frame dragged partly off screen is simply clipped.

use crate::app::{App, Focus, InputMode, clamp_cells};
use crate::config::Palette;
use crate::host::DOCK_LABEL;
use crate::pane::{Pane, cell_width};
use beautify_chrome::{CLOSE_GLYPH, MINIMIZE_GLYPH, button_rects};
use beautify_core::StyleId;
use beautify_highlight::{STYLE_COMMENT, STYLE_KEYWORD, STYLE_NUMBER, STYLE_STRING};
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

const SHORTCUTS: &str = "F5 Beautify  ^O Load  ^S Save  ^C Copy output  ^V Paste  \
                         F6 Switch pane  F9 Minimize  F10 Maximize  ^Q Quit";

/// Areas of one pane, window-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneLayout {
    /// Bordered block.
    pub outer: Rect,
    /// Line number column.
    pub gutter: Rect,
    /// Text area.
    pub text: Rect,
}

impl PaneLayout {
    fn new(outer: Rect, gutter_width: usize) -> Self {
        let inner = outer.inner(Margin::new(1, 1));
        // One blank cell separates numbers from text.
        let gutter_cells = u16::try_from(gutter_width + 1)
            .unwrap_or(u16::MAX)
            .min(inner.width);
        let gutter = Rect::new(inner.x, inner.y, gutter_cells, inner.height);
        let text = Rect::new(
            inner.x + gutter_cells,
            inner.y,
            inner.width - gutter_cells,
            inner.height,
        );
        Self {
            outer,
            gutter,
            text,
        }
    }
}

/// Areas of the whole window, window-local.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowLayout {
    /// Title bar row.
    pub title: Rect,
    /// Left pane.
    pub input: PaneLayout,
    /// Right pane.
    pub output: PaneLayout,
    /// Status / prompt row.
    pub status: Rect,
    /// Shortcut hints row.
    pub shortcuts: Rect,
}

impl WindowLayout {
    /// Split a `width` x `height` window.
    pub fn new(width: u16, height: u16, input_gutter: usize, output_gutter: usize) -> Self {
        let area = Rect::new(0, 0, width, height);
        let [title, body, status, shortcuts] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);
        let [left, right] =
            Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
                .areas(body);
        Self {
            title,
            input: PaneLayout::new(left, input_gutter),
            output: PaneLayout::new(right, output_gutter),
            status,
            shortcuts,
        }
    }
}

/// Color for a highlight tag.
pub fn style_for(style: Option<StyleId>, palette: &Palette) -> Style {
    match style {
        Some(STYLE_KEYWORD) => Style::default()
            .fg(palette.keyword)
            .add_modifier(Modifier::BOLD),
        Some(STYLE_STRING) => Style::default().fg(palette.string),
        Some(STYLE_NUMBER) => Style::default().fg(palette.number),
        Some(STYLE_COMMENT) => Style::default()
            .fg(palette.comment)
            .add_modifier(Modifier::ITALIC),
        _ => Style::default(),
    }
}

/// Visible part of `line`, cut to cells `[left, left + width)`, as styled spans.
pub fn line_spans(pane: &Pane, line: usize, width: usize, palette: &Palette) -> Vec<Span<'static>> {
    let chars: Vec<char> = pane
        .document()
        .line_text(line)
        .unwrap_or_default()
        .chars()
        .collect();
    let left = pane.scroll_left();
    let right = left + width;

    let mut spans = Vec::new();
    let mut x = 0;
    for run in pane.pipeline().surface().styled_runs(line) {
        let mut chunk = String::new();
        for &ch in &chars[run.columns.clone()] {
            let start = x;
            let end = x + cell_width(ch);
            x = end;
            if end <= left {
                continue;
            }
            if start >= right {
                break;
            }
            if ch == '\t' || start < left {
                let visible = end.min(right) - start.max(left);
                chunk.extend(std::iter::repeat_n(' ', visible));
            } else {
                chunk.push(ch);
            }
        }
        if !chunk.is_empty() {
            spans.push(Span::styled(chunk, style_for(run.style, palette)));
        }
        if x >= right {
            break;
        }
    }
    spans
}

impl App {
    /// Draw one frame.
    pub fn render(&mut self, frame: &mut Frame) {
        let screen = frame.area();
        let host = self.chrome.host();
        if host.is_iconified() {
            self.render_dock(frame, screen);
            return;
        }

        let geometry = host.frame();
        let handles_visible = host.handles_visible();
        let width = clamp_cells(geometry.width);
        let height = clamp_cells(geometry.height);
        if width == 0 || height == 0 {
            return;
        }

        let layout = self.layout();
        for (pane, area) in [
            (&mut self.input, layout.input.text),
            (&mut self.output, layout.output.text),
        ] {
            pane.ensure_cursor_visible(usize::from(area.height), usize::from(area.width));
        }

        let mut window = Buffer::empty(Rect::new(0, 0, width, height));
        self.render_title(&mut window, layout.title);
        self.render_pane(&mut window, &layout.input, Focus::Input);
        self.render_pane(&mut window, &layout.output, Focus::Output);
        self.render_status(&mut window, layout.status);
        Paragraph::new(SHORTCUTS)
            .style(Style::default().bg(Color::Blue).fg(Color::White))
            .render(layout.shortcuts, &mut window);
        if handles_visible
            && let Some(cell) = window.cell_mut((width - 1, height - 1))
        {
            cell.set_symbol("◢").set_fg(Color::Gray);
        }

        blit(&window, geometry.x, geometry.y, frame.buffer_mut(), screen);

        if let Some(cursor) = self.cursor_position(&layout) {
            let x = geometry.x + i32::from(cursor.x);
            let y = geometry.y + i32::from(cursor.y);
            if let (Ok(x), Ok(y)) = (u16::try_from(x), u16::try_from(y))
                && screen.contains(Position::new(x, y))
            {
                frame.set_cursor_position(Position::new(x, y));
            }
        }
    }

    fn render_dock(&self, frame: &mut Frame, screen: Rect) {
        let hint = Paragraph::new("Minimized. Click the dock entry or press any key to restore.")
            .style(Style::default().fg(Color::DarkGray))
            .centered();
        let middle = Rect::new(screen.x, screen.y + screen.height / 2, screen.width, 1)
            .intersection(screen);
        frame.render_widget(hint, middle);

        let dock = self.chrome.host().dock();
        let area = Rect::new(
            0,
            clamp_cells(dock.y),
            clamp_cells(dock.width),
            1,
        )
        .intersection(screen);
        frame.render_widget(
            Paragraph::new(DOCK_LABEL)
                .style(Style::default().add_modifier(Modifier::REVERSED)),
            area,
        );
    }

    fn render_title(&self, buf: &mut Buffer, area: Rect) {
        let bar = Style::default().bg(Color::DarkGray).fg(Color::White);
        let name = self
            .input_path
            .as_ref()
            .and_then(|path| path.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "untitled".to_string());
        Paragraph::new(format!(" GML Beautify | {name}"))
            .style(bar.add_modifier(Modifier::BOLD))
            .render(area, buf);

        let geometry = self.chrome.geometry();
        let buttons = button_rects(&geometry, self.chrome.config());
        for (rect, glyph, style) in [
            (buttons.minimize, MINIMIZE_GLYPH, bar),
            (buttons.maximize, self.chrome.host().maximize_glyph(), bar),
            (buttons.close, CLOSE_GLYPH, bar.bg(Color::Red)),
        ] {
            let x = rect.x - geometry.x;
            if x < 0 {
                continue;
            }
            let area = Rect::new(clamp_cells(x), area.y, clamp_cells(rect.width), 1)
                .intersection(area);
            Paragraph::new(glyph)
                .style(style)
                .centered()
                .render(area, buf);
        }
    }

    fn render_pane(&self, buf: &mut Buffer, layout: &PaneLayout, which: Focus) {
        let pane = match which {
            Focus::Input => &self.input,
            Focus::Output => &self.output,
        };
        let focused = self.focus == which;
        let border = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let marker = if pane.is_modified() { " *" } else { "" };
        Block::bordered()
            .title(format!(" {}{marker} ", pane.title()))
            .border_style(border)
            .render(layout.outer, buf);

        let gutter = pane.pipeline().gutter();
        let gutter_style = Style::default().fg(self.palette.gutter);
        let digits = usize::from(layout.gutter.width.saturating_sub(1));
        let line_count = pane.document().line_count();

        let mut numbers = Vec::new();
        let mut lines = Vec::new();
        for row in 0..usize::from(layout.text.height) {
            let line = pane.scroll_top() + row;
            if line >= line_count {
                break;
            }
            let label = gutter.label(line).unwrap_or_default();
            numbers.push(Line::styled(format!("{label:>digits$}"), gutter_style));
            lines.push(Line::from(line_spans(
                pane,
                line,
                usize::from(layout.text.width),
                &self.palette,
            )));
        }
        Paragraph::new(numbers).render(layout.gutter, buf);
        Paragraph::new(lines).render(layout.text, buf);
    }

    fn render_status(&self, buf: &mut Buffer, area: Rect) {
        let text = match self.input_mode {
            InputMode::LoadPath => format!("Load file > {}", self.input_buffer),
            InputMode::SavePath => format!("Save output as > {}", self.input_buffer),
            InputMode::Normal if !self.status_message.is_empty() => self.status_message.clone(),
            InputMode::Normal => {
                let pane = match self.focus {
                    Focus::Input => &self.input,
                    Focus::Output => &self.output,
                };
                let (line, column) = pane.cursor_position();
                let formatter = if self.formatter.is_passthrough() {
                    "no formatter"
                } else {
                    "formatter ready"
                };
                format!(
                    "{} | Ln {}, Col {} | {} lines | {} | indent {}{} | braces {}",
                    pane.title(),
                    line + 1,
                    column + 1,
                    pane.document().line_count(),
                    formatter,
                    self.options.indent_size,
                    if self.options.indent_with_tabs {
                        " tab"
                    } else {
                        " space"
                    },
                    self.options.brace_style,
                )
            }
        };
        Paragraph::new(text)
            .style(
                Style::default()
                    .bg(Color::DarkGray)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )
            .render(area, buf);
    }

    /// Terminal cursor, window-local.
    fn cursor_position(&self, layout: &WindowLayout) -> Option<Position> {
        if self.input_mode != InputMode::Normal {
            let prefix = match self.input_mode {
                InputMode::LoadPath => "Load file > ",
                _ => "Save output as > ",
            };
            let x = prefix.len() + self.input_buffer.chars().map(cell_width).sum::<usize>();
            let x = u16::try_from(x).ok()?;
            return (x < layout.status.width).then(|| Position::new(x, layout.status.y));
        }

        let (pane, area) = match self.focus {
            Focus::Input => (&self.input, layout.input.text),
            Focus::Output => (&self.output, layout.output.text),
        };
        let (line, column) = pane.cursor_position();
        let row = line.checked_sub(pane.scroll_top())?;
        let cell = pane.visual_x(line, column).checked_sub(pane.scroll_left())?;
        let (row, cell) = (u16::try_from(row).ok()?, u16::try_from(cell).ok()?);
        (row < area.height && cell < area.width)
            .then(|| Position::new(area.x + cell, area.y + row))
    }
}

/// Copy `src` onto `dst` with its origin at `(x, y)`, skipping cells outside `clip`.
fn blit(src: &Buffer, x: i32, y: i32, dst: &mut Buffer, clip: Rect) {
    let area = src.area;
    for row in 0..area.height {
        for col in 0..area.width {
            let (Ok(tx), Ok(ty)) = (
                u16::try_from(x + i32::from(col)),
                u16::try_from(y + i32::from(row)),
            ) else {
                continue;
            };
            if !clip.contains(Position::new(tx, ty)) {
                continue;
            }
            if let (Some(cell), Some(target)) = (src.cell((col, row)), dst.cell_mut((tx, ty))) {
                *target = cell.clone();
            }
        }
    }
}
