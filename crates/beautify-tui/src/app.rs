//! Application state: two panes, the window chrome, and the commands that connect them.

use crate::config::{Config, Palette};
use crate::formatter::FormatBackend;
use crate::host::TerminalHost;
use crate::pane::Pane;
use crate::ui::WindowLayout;
use beautify_chrome::{ChromeEvent, HitZone, Point, WindowChrome, WindowGeometry, WindowState};
use beautify_core::{Document, FormatOptions};
use beautify_highlight::HighlightEngine;
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use std::path::{Path, PathBuf};

/// Extension appended to save paths that have none.
pub const DEFAULT_EXTENSION: &str = "gml";

/// Which pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Left pane: source to beautify.
    Input,
    /// Right pane: formatter output.
    Output,
}

impl Focus {
    fn other(self) -> Self {
        match self {
            Self::Input => Self::Output,
            Self::Output => Self::Input,
        }
    }
}

/// What the status bar is collecting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Keys go to the focused pane.
    Normal,
    /// Path of a file to load into the input pane.
    LoadPath,
    /// Path to save the output pane to.
    SavePath,
}

/// Who owns the pointer between press and release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Capture {
    Chrome,
    Pane(Focus),
}

/// Application state
pub struct App {
    pub(crate) chrome: WindowChrome<TerminalHost>,
    pub(crate) input: Pane,
    pub(crate) output: Pane,
    pub(crate) focus: Focus,
    pub(crate) formatter: FormatBackend,
    pub(crate) options: FormatOptions,
    pub(crate) palette: Palette,
    /// In-process clipboard.
    pub(crate) clipboard: String,
    pub(crate) input_mode: InputMode,
    pub(crate) input_buffer: String,
    pub(crate) status_message: String,
    pub(crate) input_path: Option<PathBuf>,
    pub(crate) output_path: Option<PathBuf>,
    capture: Option<Capture>,
    pub(crate) should_quit: bool,
}

impl App {
    /// Build the shell for a `screen_width` x `screen_height` terminal.
    pub fn new(config: &Config, palette: Palette, screen_width: u16, screen_height: u16) -> Self {
        let host = TerminalHost::new(screen_width, screen_height);
        let geometry = initial_geometry(
            host.screen(),
            config.window.initial_width,
            config.window.initial_height,
        );
        let chrome = WindowChrome::new(host, geometry, config.window.chrome_config());

        let language = config.language.language_config();
        Self {
            chrome,
            input: Pane::new("Input", HighlightEngine::new(language.clone())),
            output: Pane::new("Output", HighlightEngine::new(language)),
            focus: Focus::Input,
            formatter: FormatBackend::from_config(&config.formatter),
            options: config.formatter.options.clone(),
            palette,
            clipboard: String::new(),
            input_mode: InputMode::Normal,
            input_buffer: String::new(),
            status_message: String::new(),
            input_path: None,
            output_path: None,
            capture: None,
            should_quit: false,
        }
    }

    /// Whether the event loop should stop.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn focused_pane_mut(&mut self) -> &mut Pane {
        match self.focus {
            Focus::Input => &mut self.input,
            Focus::Output => &mut self.output,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }

    /// Run the formatter on the input pane and show the result in the output pane.
    ///
    /// On failure the output pane is left untouched.
    pub fn beautify(&mut self) {
        let source = self.input.text();
        match self.formatter.run(&source, &self.options) {
            Ok(formatted) => {
                self.output.set_text(&formatted);
                if self.formatter.is_passthrough() {
                    self.set_status("No formatter configured; output is the unchanged input");
                } else {
                    let lines = self.output.document().line_count();
                    self.set_status(format!("Beautified {lines} lines"));
                }
            }
            Err(err) => self.set_status(err.to_string()),
        }
    }

    /// Load `path` into the input pane.
    pub fn load_file(&mut self, path: &Path) {
        match Document::load(path) {
            Ok(document) => {
                self.input.load(document);
                self.focus = Focus::Input;
                self.input_path = Some(path.to_path_buf());
                self.set_status(format!("Loaded {}", path.display()));
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err.to_string());
            }
        }
    }

    /// Write the output pane to `path` (plus [`DEFAULT_EXTENSION`] when it has none).
    pub fn save_output(&mut self, path: &Path) {
        let path = with_default_extension(path);
        match self.output.document().save(&path) {
            Ok(()) => {
                self.output.mark_saved();
                self.set_status(format!("Saved {}", path.display()));
                self.output_path = Some(path);
            }
            Err(err) => {
                log::warn!("{err}");
                self.set_status(err.to_string());
            }
        }
    }

    /// Copy the whole output pane to the clipboard.
    pub fn copy_output(&mut self) {
        self.clipboard = self.output.text();
        let chars = self.clipboard.chars().count();
        self.set_status(format!("Copied {chars} chars from output"));
    }

    /// Insert the clipboard into the input pane at its cursor.
    pub fn paste(&mut self) {
        if self.clipboard.is_empty() {
            self.set_status("Clipboard is empty");
            return;
        }
        self.focus = Focus::Input;
        let text = self.clipboard.clone();
        self.input.insert_str(&text);
    }

    /// Feed a chrome event, quitting once the window is closed.
    pub fn window_event(&mut self, event: ChromeEvent) {
        self.chrome.handle(event);
        if self.chrome.host().is_closed() {
            self.should_quit = true;
        }
    }

    /// The terminal was resized.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.chrome.host_mut().set_screen_size(width, height);
        self.window_event(ChromeEvent::ScreenChanged);
    }

    fn start_prompt(&mut self, mode: InputMode) {
        let prefill = match mode {
            InputMode::LoadPath => self.input_path.as_ref(),
            InputMode::SavePath => self.output_path.as_ref(),
            InputMode::Normal => None,
        };
        self.input_buffer = prefill
            .map(|path| path.display().to_string())
            .unwrap_or_default();
        self.input_mode = mode;
    }

    /// Handle a key press.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        // Any key brings a minimized window back.
        if self.chrome.state() == WindowState::Minimized {
            self.window_event(ChromeEvent::Restored);
            return;
        }

        if self.input_mode != InputMode::Normal {
            self.handle_prompt_key(key);
            return;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') if ctrl => self.window_event(ChromeEvent::Close),
            KeyCode::Char('b') if ctrl => self.beautify(),
            KeyCode::F(5) => self.beautify(),
            KeyCode::Char('o') if ctrl => self.start_prompt(InputMode::LoadPath),
            KeyCode::Char('s') if ctrl => self.start_prompt(InputMode::SavePath),
            KeyCode::Char('c') if ctrl => self.copy_output(),
            KeyCode::Char('v') if ctrl => self.paste(),
            KeyCode::F(6) => self.focus = self.focus.other(),
            KeyCode::F(9) => self.window_event(ChromeEvent::Minimize),
            KeyCode::F(10) => self.window_event(ChromeEvent::ToggleMaximize),
            _ => self.edit_key(key),
        }
    }

    fn edit_key(&mut self, key: KeyEvent) {
        let page = self.page_height() as isize;
        let pane = self.focused_pane_mut();
        match key.code {
            KeyCode::Left => pane.move_left(),
            KeyCode::Right => pane.move_right(),
            KeyCode::Up => pane.move_lines(-1),
            KeyCode::Down => pane.move_lines(1),
            KeyCode::PageUp => pane.move_lines(-page),
            KeyCode::PageDown => pane.move_lines(page),
            KeyCode::Home => pane.move_home(),
            KeyCode::End => pane.move_end(),
            KeyCode::Backspace => pane.backspace(),
            KeyCode::Delete => pane.delete_forward(),
            KeyCode::Enter => pane.insert_char('\n'),
            KeyCode::Tab => pane.insert_char('\t'),
            KeyCode::Char(ch)
                if !key
                    .modifiers
                    .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                pane.insert_char(ch)
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
            }
            KeyCode::Enter => {
                let mode = self.input_mode;
                let entered = std::mem::take(&mut self.input_buffer);
                self.input_mode = InputMode::Normal;
                let entered = entered.trim();
                // An empty path cancels like Esc.
                if entered.is_empty() {
                    return;
                }
                let path = PathBuf::from(entered);
                match mode {
                    InputMode::LoadPath => self.load_file(&path),
                    InputMode::SavePath => self.save_output(&path),
                    InputMode::Normal => {}
                }
            }
            KeyCode::Backspace => {
                self.input_buffer.pop();
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.input_buffer.push(ch);
            }
            _ => {}
        }
    }

    /// Bracketed paste from the terminal goes to the focused pane.
    pub fn handle_paste(&mut self, text: &str) {
        match self.input_mode {
            InputMode::Normal => self.focused_pane_mut().insert_str(text),
            _ => self.input_buffer.push_str(text.lines().next().unwrap_or_default()),
        }
    }

    /// Layout of the window in window-local cells.
    pub fn layout(&self) -> WindowLayout {
        let geometry = self.chrome.geometry();
        WindowLayout::new(
            clamp_cells(geometry.width),
            clamp_cells(geometry.height),
            self.input.pipeline().gutter().width(),
            self.output.pipeline().gutter().width(),
        )
    }

    fn page_height(&self) -> usize {
        let layout = self.layout();
        usize::from(layout.input.text.height.max(1))
    }

    /// Handle a mouse event in screen cells.
    pub fn handle_mouse_event(&mut self, mouse: MouseEvent) {
        let pointer = Point::new(i32::from(mouse.column), i32::from(mouse.row));
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => self.pointer_down(pointer),
            MouseEventKind::Drag(MouseButton::Left) => match self.capture {
                Some(Capture::Chrome) => {
                    self.chrome.pointer_drag(pointer);
                }
                Some(Capture::Pane(focus)) => self.click_pane(focus, pointer),
                None => {}
            },
            MouseEventKind::Up(MouseButton::Left) => {
                if self.capture.take() == Some(Capture::Chrome) {
                    self.chrome.pointer_up();
                }
            }
            MouseEventKind::ScrollUp => self.focused_pane_mut().move_lines(-3),
            MouseEventKind::ScrollDown => self.focused_pane_mut().move_lines(3),
            _ => {}
        }
    }

    fn pointer_down(&mut self, pointer: Point) {
        if self.chrome.state() == WindowState::Minimized {
            if self.chrome.host().dock_contains(pointer) {
                self.window_event(ChromeEvent::Restored);
            }
            return;
        }

        let zone = self.chrome.pointer_down(pointer);
        if self.chrome.host().is_closed() {
            self.should_quit = true;
            return;
        }
        let capture = match zone {
            HitZone::Content => self.pane_at(pointer).map(Capture::Pane),
            _ if zone.gesture().is_some() && self.chrome.session().is_some() => {
                Some(Capture::Chrome)
            }
            _ => None,
        };
        self.capture = capture;
        if let Some(Capture::Pane(focus)) = capture {
            self.focus = focus;
            self.click_pane(focus, pointer);
        }
    }

    fn pane_at(&self, pointer: Point) -> Option<Focus> {
        let local = self.to_local(pointer)?;
        let layout = self.layout();
        if layout.input.outer.contains(local) {
            Some(Focus::Input)
        } else if layout.output.outer.contains(local) {
            Some(Focus::Output)
        } else {
            None
        }
    }

    fn click_pane(&mut self, focus: Focus, pointer: Point) {
        let Some(local) = self.to_local(pointer) else {
            return;
        };
        let layout = self.layout();
        let (text, pane) = match focus {
            Focus::Input => (layout.input.text, &mut self.input),
            Focus::Output => (layout.output.text, &mut self.output),
        };
        if local.x < text.x || local.y < text.y {
            return;
        }
        pane.click(
            usize::from(local.y - text.y),
            usize::from(local.x - text.x),
        );
    }

    /// Screen point to window-local cell, if inside the window.
    fn to_local(&self, pointer: Point) -> Option<ratatui::layout::Position> {
        let geometry = self.chrome.geometry();
        if !geometry.contains(pointer) {
            return None;
        }
        let x = u16::try_from(pointer.x - geometry.x).ok()?;
        let y = u16::try_from(pointer.y - geometry.y).ok()?;
        Some(ratatui::layout::Position::new(x, y))
    }
}

/// Clamp a chrome size to what a terminal buffer can hold.
pub(crate) fn clamp_cells(value: i32) -> u16 {
    u16::try_from(value.max(0)).unwrap_or(u16::MAX)
}

/// The starting window: `width` x `height` (clamped to the screen), centered.
pub fn initial_geometry(screen: WindowGeometry, width: i32, height: i32) -> WindowGeometry {
    let width = width.clamp(1, screen.width.max(1));
    let height = height.clamp(1, screen.height.max(1));
    WindowGeometry::new(
        (screen.width - width) / 2,
        (screen.height - height) / 2,
        width,
        height,
    )
}

/// `path` with [`DEFAULT_EXTENSION`] appended when it has no extension.
pub fn with_default_extension(path: &Path) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(DEFAULT_EXTENSION)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ThemeConfig;
    use crossterm::event::KeyEventState;
    use pretty_assertions::assert_eq;

    fn app() -> App {
        let config = Config::default();
        let palette = ThemeConfig::default().palette().unwrap();
        App::new(&config, palette, 100, 30)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            let code = if ch == '\n' {
                KeyCode::Enter
            } else {
                KeyCode::Char(ch)
            };
            app.handle_key_event(key(code, KeyModifiers::NONE));
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gml-beautify-{}-{name}", std::process::id()))
    }

    #[test]
    fn window_starts_centered_and_clamped() {
        let screen = WindowGeometry::sized(100, 30);
        assert_eq!(
            initial_geometry(screen, 120, 36),
            WindowGeometry::new(0, 0, 100, 30)
        );
        assert_eq!(
            initial_geometry(screen, 60, 20),
            WindowGeometry::new(20, 5, 60, 20)
        );
    }

    #[test]
    fn default_extension_only_when_missing() {
        assert_eq!(
            with_default_extension(Path::new("out")),
            PathBuf::from("out.gml")
        );
        assert_eq!(
            with_default_extension(Path::new("out.txt")),
            PathBuf::from("out.txt")
        );
    }

    #[test]
    fn beautify_without_formatter_copies_input() {
        let mut app = app();
        type_text(&mut app, "var x = 5;\nif (x) {}");
        app.handle_key_event(key(KeyCode::F(5), KeyModifiers::NONE));
        assert_eq!(app.output.text(), "var x = 5;\nif (x) {}");
        assert!(app.status_message.contains("No formatter"));
        assert_eq!(app.output.pipeline().gutter().model().len(), 2);
    }

    #[test]
    fn failing_formatter_leaves_output_unchanged() {
        let mut app = app();
        app.output.set_text("previous");
        app.formatter = FormatBackend::External(crate::formatter::ExternalFormatter::new(
            "gml-beautify-no-such-program",
            Vec::new(),
        ));
        type_text(&mut app, "var x;");
        app.beautify();
        assert_eq!(app.output.text(), "previous");
        assert!(app.status_message.contains("failed to start formatter"));
    }

    #[test]
    fn copy_output_then_paste_into_input() {
        let mut app = app();
        app.output.set_text("formatted");
        app.focus = Focus::Output;
        app.handle_key_event(key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        app.handle_key_event(key(KeyCode::Char('v'), KeyModifiers::CONTROL));
        assert_eq!(app.focus, Focus::Input);
        assert_eq!(app.input.text(), "formatted");
    }

    #[test]
    fn empty_or_escaped_prompt_cancels_silently() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::Char('o'), KeyModifiers::CONTROL));
        assert_eq!(app.input_mode, InputMode::LoadPath);
        app.handle_key_event(key(KeyCode::Enter, KeyModifiers::NONE));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status_message, "");

        app.handle_key_event(key(KeyCode::Char('s'), KeyModifiers::CONTROL));
        type_text(&mut app, "abc");
        app.handle_key_event(key(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.status_message, "");
        assert_eq!(app.input.text(), "");
    }

    #[test]
    fn save_appends_extension_and_load_round_trips() {
        let mut app = app();
        app.output.set_text("var a = 1;\n");
        let base = scratch("save");
        app.save_output(&base);
        let saved = base.with_extension("gml");
        assert_eq!(app.output_path.as_deref(), Some(saved.as_path()));
        assert!(!app.output.is_modified());

        app.load_file(&saved);
        assert_eq!(app.input.text(), "var a = 1;\n");
        assert_eq!(app.input.pipeline().gutter().model().len(), 2);
        let _ = std::fs::remove_file(saved);
    }

    #[test]
    fn load_failure_is_reported() {
        let mut app = app();
        app.load_file(&scratch("missing.gml"));
        assert!(app.status_message.starts_with("failed to read"));
    }

    #[test]
    fn window_shortcuts_drive_the_chrome() {
        let mut app = app();
        app.handle_key_event(key(KeyCode::F(10), KeyModifiers::NONE));
        assert_eq!(app.chrome.state(), WindowState::Maximized);
        app.handle_key_event(key(KeyCode::F(9), KeyModifiers::NONE));
        assert_eq!(app.chrome.state(), WindowState::Minimized);
        assert!(app.chrome.host().is_iconified());

        // The key that restores is not typed into the pane.
        app.handle_key_event(key(KeyCode::Char('x'), KeyModifiers::NONE));
        assert_eq!(app.chrome.state(), WindowState::Normal);
        assert_eq!(app.input.text(), "");

        app.handle_key_event(key(KeyCode::Char('q'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }

    #[test]
    fn title_bar_drag_moves_the_window() {
        let config = Config::default();
        let palette = ThemeConfig::default().palette().unwrap();
        let mut app = App::new(&config, palette, 200, 60);
        let start = app.chrome.geometry();
        let (x, y) = (start.x as u16 + 5, start.y as u16);

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), x, y));
        app.handle_mouse_event(mouse(MouseEventKind::Drag(MouseButton::Left), x + 3, y + 2));
        app.handle_mouse_event(mouse(MouseEventKind::Up(MouseButton::Left), x + 3, y + 2));

        assert_eq!(app.chrome.geometry(), start.moved_to(start.x + 3, start.y + 2));
    }

    #[test]
    fn clicking_a_pane_focuses_it_and_places_the_cursor() {
        let mut app = app();
        app.output.set_text("abc\ndef");
        let layout = app.layout();
        let origin = app.chrome.geometry();
        let text = layout.output.text;
        let column = origin.x as u16 + text.x + 2;
        let row = origin.y as u16 + text.y + 1;

        app.handle_mouse_event(mouse(MouseEventKind::Down(MouseButton::Left), column, row));
        assert_eq!(app.focus, Focus::Output);
        assert_eq!(app.output.cursor_position(), (1, 2));
    }

    #[test]
    fn terminal_resize_refits_a_maximized_window() {
        let mut app = app();
        app.window_event(ChromeEvent::ToggleMaximize);
        app.resize(80, 24);
        assert_eq!(app.chrome.geometry(), WindowGeometry::sized(80, 24));
    }
}
