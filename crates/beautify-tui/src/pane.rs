//! One editor pane: an edit pipeline plus cursor and scroll state.

use beautify_core::{Document, EditPipeline, GutterSurface, TextSurface};
use beautify_highlight::HighlightEngine;
use std::convert::Infallible;
use unicode_width::UnicodeWidthChar;

/// Cells a tab occupies on screen.
pub const TAB_WIDTH: usize = 4;

/// Screen cells taken by `ch`.
pub fn cell_width(ch: char) -> usize {
    if ch == '\t' {
        TAB_WIDTH
    } else {
        ch.width().unwrap_or(0)
    }
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// A highlighted, line-numbered text pane.
pub struct Pane {
    title: &'static str,
    pipeline: EditPipeline<HighlightEngine>,
    /// Cursor as a char offset.
    cursor: usize,
    /// Column kept while moving vertically through shorter lines.
    goal_column: Option<usize>,
    scroll_top: usize,
    /// Horizontal scroll in cells.
    scroll_left: usize,
}

impl Pane {
    /// An empty pane highlighted by `engine`.
    pub fn new(title: &'static str, engine: HighlightEngine) -> Self {
        let pipeline = infallible(EditPipeline::new(
            TextSurface::new(Document::new()),
            GutterSurface::new(),
            engine,
        ));
        Self {
            title,
            pipeline,
            cursor: 0,
            goal_column: None,
            scroll_top: 0,
            scroll_left: 0,
        }
    }

    /// Pane title.
    pub fn title(&self) -> &'static str {
        self.title
    }

    /// The underlying pipeline.
    pub fn pipeline(&self) -> &EditPipeline<HighlightEngine> {
        &self.pipeline
    }

    /// The pane's document.
    pub fn document(&self) -> &Document {
        self.pipeline.document()
    }

    /// Whole text.
    pub fn text(&self) -> String {
        self.pipeline.document().text()
    }

    /// Cursor as `(line, column)`.
    pub fn cursor_position(&self) -> (usize, usize) {
        self.document().char_to_position(self.cursor)
    }

    /// First visible line.
    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    /// First visible cell column.
    pub fn scroll_left(&self) -> usize {
        self.scroll_left
    }

    /// Replace all content, moving the cursor to the start.
    pub fn set_text(&mut self, text: &str) {
        infallible(self.pipeline.replace_all(text));
        self.reset_view();
    }

    /// Swap in a loaded document. The pane counts as unmodified afterwards.
    pub fn load(&mut self, document: Document) {
        infallible(self.pipeline.replace_document(document));
        self.reset_view();
    }

    fn reset_view(&mut self) {
        self.cursor = 0;
        self.goal_column = None;
        self.scroll_top = 0;
        self.scroll_left = 0;
    }

    /// Whether the pane changed since it was loaded or saved.
    pub fn is_modified(&self) -> bool {
        self.pipeline.is_modified()
    }

    /// Forget modifications after a save.
    pub fn mark_saved(&mut self) {
        self.pipeline.mark_saved();
    }

    /// Insert text at the cursor.
    pub fn insert_str(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let before = self.document().len_chars();
        infallible(self.pipeline.insert(self.cursor, text));
        // Line endings are normalized on insert, so measure what actually landed.
        self.cursor += self.document().len_chars() - before;
        self.goal_column = None;
    }

    /// Insert one char at the cursor.
    pub fn insert_char(&mut self, ch: char) {
        let mut buf = [0u8; 4];
        self.insert_str(ch.encode_utf8(&mut buf));
    }

    /// Delete the char before the cursor.
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        infallible(self.pipeline.delete(self.cursor - 1..self.cursor));
        self.cursor -= 1;
        self.goal_column = None;
    }

    /// Delete the char under the cursor.
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.document().len_chars() {
            return;
        }
        infallible(self.pipeline.delete(self.cursor..self.cursor + 1));
        self.goal_column = None;
    }

    /// Move one char left.
    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.goal_column = None;
    }

    /// Move one char right.
    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.document().len_chars());
        self.goal_column = None;
    }

    /// Move `delta` lines, keeping the goal column.
    pub fn move_lines(&mut self, delta: isize) {
        let (line, column) = self.cursor_position();
        let goal = *self.goal_column.get_or_insert(column);
        let last = self.document().line_count().saturating_sub(1);
        let target = line.saturating_add_signed(delta).min(last);
        self.cursor = self.document().position_to_char(target, goal);
    }

    /// Move to the start of the line.
    pub fn move_home(&mut self) {
        let (line, _) = self.cursor_position();
        self.cursor = self.document().line_to_char(line);
        self.goal_column = None;
    }

    /// Move to the end of the line.
    pub fn move_end(&mut self) {
        let (line, _) = self.cursor_position();
        self.cursor = self.document().position_to_char(line, usize::MAX);
        self.goal_column = None;
    }

    /// Place the cursor at a screen cell relative to the text area's top-left corner.
    pub fn click(&mut self, row: usize, cell: usize) {
        let line = self.scroll_top + row;
        let last = self.document().line_count().saturating_sub(1);
        if line > last {
            self.cursor = self.document().len_chars();
            self.goal_column = None;
            return;
        }
        let target = self.scroll_left + cell;
        let text = self.document().line_text(line).unwrap_or_default();
        let mut x = 0;
        let mut column = 0;
        for ch in text.chars() {
            let w = cell_width(ch);
            if x + w > target {
                break;
            }
            x += w;
            column += 1;
        }
        self.cursor = self.document().position_to_char(line, column);
        self.goal_column = None;
    }

    /// Cell offset of `column` within `line`.
    pub fn visual_x(&self, line: usize, column: usize) -> usize {
        self.document()
            .line_text(line)
            .unwrap_or_default()
            .chars()
            .take(column)
            .map(cell_width)
            .sum()
    }

    /// Scroll so the cursor is inside a `height` x `width` viewport.
    pub fn ensure_cursor_visible(&mut self, height: usize, width: usize) {
        let (line, column) = self.cursor_position();
        if height > 0 {
            if line < self.scroll_top {
                self.scroll_top = line;
            } else if line >= self.scroll_top + height {
                self.scroll_top = line + 1 - height;
            }
        }
        if width > 0 {
            let x = self.visual_x(line, column);
            if x < self.scroll_left {
                self.scroll_left = x;
            } else if x >= self.scroll_left + width {
                self.scroll_left = x + 1 - width;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beautify_highlight::STYLE_KEYWORD;
    use pretty_assertions::assert_eq;

    fn pane(text: &str) -> Pane {
        let mut pane = Pane::new("Input", HighlightEngine::gml());
        pane.set_text(text);
        pane
    }

    #[test]
    fn typing_updates_gutter_and_highlight() {
        let mut pane = pane("");
        for ch in "var".chars() {
            pane.insert_char(ch);
        }
        assert_eq!(
            pane.pipeline().surface().effective_style_at(0),
            Some(STYLE_KEYWORD)
        );
        pane.insert_char('\n');
        pane.insert_char('x');
        assert_eq!(pane.pipeline().gutter().model().labels(), ["1", "2"]);
        assert_eq!(pane.cursor_position(), (1, 1));

        pane.backspace();
        pane.backspace();
        assert_eq!(pane.pipeline().gutter().model().len(), 1);
        assert_eq!(pane.text(), "var");
    }

    #[test]
    fn crlf_paste_moves_cursor_by_normalized_length() {
        let mut pane = pane("");
        pane.insert_str("a\r\nb");
        assert_eq!(pane.text(), "a\nb");
        assert_eq!(pane.cursor_position(), (1, 1));
    }

    #[test]
    fn vertical_moves_keep_goal_column() {
        let mut pane = pane("abcdef\nab\nabcdef");
        pane.move_end();
        pane.move_lines(1);
        assert_eq!(pane.cursor_position(), (1, 2));
        pane.move_lines(1);
        assert_eq!(pane.cursor_position(), (2, 6));
        pane.move_lines(-10);
        assert_eq!(pane.cursor_position(), (0, 6));
    }

    #[test]
    fn click_maps_cells_to_columns() {
        let mut pane = pane("\tx = 1;\nsecond");
        pane.click(0, TAB_WIDTH);
        assert_eq!(pane.cursor_position(), (0, 1));
        pane.click(0, 2);
        assert_eq!(pane.cursor_position(), (0, 0));
        pane.click(1, 100);
        assert_eq!(pane.cursor_position(), (1, 6));
        pane.click(7, 0);
        assert_eq!(pane.cursor_position(), (1, 6));
    }

    #[test]
    fn scrolling_follows_the_cursor() {
        let text = (1..=20).map(|n| n.to_string()).collect::<Vec<_>>().join("\n");
        let mut pane = pane(&text);
        pane.move_lines(15);
        pane.ensure_cursor_visible(5, 10);
        assert_eq!(pane.scroll_top(), 11);
        pane.move_lines(-15);
        pane.ensure_cursor_visible(5, 10);
        assert_eq!(pane.scroll_top(), 0);
    }

    #[test]
    fn load_clears_modified() {
        let mut pane = pane("x");
        pane.insert_char('y');
        assert!(pane.is_modified());
        pane.load(Document::from_text("loaded"));
        assert!(!pane.is_modified());
        assert_eq!(pane.cursor_position(), (0, 0));
        assert_eq!(pane.text(), "loaded");
    }
}
