//! Interactive terminal browser.

use std::io::Write;
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::style::Attribute;

use crate::config::BrowserConfig;
use crate::store::{self, HierarchicalStore};
use crate::tui::{body_height, render_frame, Controller, Line, LineStyle, Viewport};

/// What the event loop should do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    Continue,
    Quit,
}

/// Terminal attributes for each line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Theme {
    /// Reverse-video selection.
    #[default]
    Dark,
    /// Bold selection with an underlined header.
    Light,
}

impl Theme {
    pub(crate) fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    pub(crate) fn attribute(self, style: LineStyle) -> Option<Attribute> {
        match (self, style) {
            (_, LineStyle::Body) => None,
            (_, LineStyle::Chrome) => Some(Attribute::Dim),
            (Self::Dark, LineStyle::Header) | (Self::Light, LineStyle::Selected) => {
                Some(Attribute::Bold)
            }
            (Self::Dark, LineStyle::Selected) => Some(Attribute::Reverse),
            (Self::Light, LineStyle::Header) => Some(Attribute::Underlined),
        }
    }
}

/// Controller plus the scroll state of both panes.
pub(crate) struct Session<S> {
    controller: Controller<S>,
    listing: Viewport,
    content: Viewport,
    theme: Theme,
}

impl<S: HierarchicalStore> Session<S> {
    pub(crate) fn new(controller: Controller<S>) -> Self {
        let listing = Viewport::new(controller.raw_listing().len(), 0);
        Self {
            controller,
            listing,
            content: Viewport::default(),
            theme: Theme::default(),
        }
    }

    pub(crate) fn controller(&self) -> &Controller<S> {
        &self.controller
    }

    pub(crate) fn content_offset(&self) -> usize {
        self.content.offset()
    }

    pub(crate) fn theme(&self) -> Theme {
        self.theme
    }

    /// Apply one key press.
    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::Continue;
        }
        let page = self.controller.config().content_page_size;
        let viewing = self.controller.is_viewing_dataset();

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Action::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Action::Quit
            }
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => {
                self.controller.activate_selection();
                if self.controller.is_viewing_dataset() && !viewing {
                    self.content.home();
                }
            }
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => self.controller.go_back(),
            KeyCode::Char('t') => self.controller.toggle_truncate(),
            KeyCode::Char('s') => self.controller.toggle_suppress(),
            KeyCode::Char('d') => self.theme = self.theme.toggled(),
            KeyCode::Char('j') | KeyCode::Down if viewing => self.content.scroll_down(),
            KeyCode::Char('k') | KeyCode::Up if viewing => self.content.scroll_up(),
            KeyCode::Char('g') | KeyCode::Home if viewing => self.content.home(),
            KeyCode::Char('G') | KeyCode::End if viewing => self.content.end(),
            KeyCode::PageDown if viewing => self.content.page_down(page),
            KeyCode::PageUp if viewing => self.content.page_up(page),
            KeyCode::Char('j') | KeyCode::Down => self.controller.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.controller.select_prev(),
            KeyCode::Char('g') | KeyCode::Home => self.controller.select_first(),
            KeyCode::Char('G') | KeyCode::End => self.controller.select_last(),
            KeyCode::PageDown => {
                let target = self.controller.highlighted().saturating_add(page);
                self.controller.set_highlighted(target);
            }
            KeyCode::PageUp => {
                let target = self.controller.highlighted().saturating_sub(page);
                self.controller.set_highlighted(target);
            }
            _ => {}
        }
        Action::Continue
    }

    /// Fit both viewports to the current text and terminal height.
    pub(crate) fn sync(&mut self, height: usize) {
        let body = body_height(&self.controller, height);
        if let Some(content) = self.controller.current_content() {
            self.content.set_visible(body);
            self.content.set_total(content.lines().count());
        } else {
            self.listing.set_visible(body);
            self.listing.set_total(self.controller.raw_listing().len());
            self.listing.ensure_visible(self.controller.highlighted());
        }
    }

    pub(crate) fn frame(&self, width: usize, height: usize) -> Vec<Line> {
        let view = if self.controller.is_viewing_dataset() {
            &self.content
        } else {
            &self.listing
        };
        render_frame(&self.controller, view, width, height)
    }
}

/// Browse a file interactively.
pub(crate) fn cmd_view(path: &Path, config: BrowserConfig) -> crate::Result<()> {
    use crossterm::{cursor, execute, terminal};
    use std::io::stdout;

    let store = store::open(path)?;
    let controller = Controller::new(store, config)?;
    let mut session = Session::new(controller);
    tracing::info!(path = %path.display(), "starting browser");

    terminal::enable_raw_mode().map_err(crate::Error::terminal)?;
    let mut stdout = stdout();
    execute!(stdout, terminal::EnterAlternateScreen, cursor::Hide)
        .map_err(crate::Error::terminal)?;

    let result = run_loop(&mut session, &mut stdout);

    // Restore the terminal even if the loop failed.
    let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    result
}

fn run_loop<S, W>(session: &mut Session<S>, stdout: &mut W) -> crate::Result<()>
where
    S: HierarchicalStore,
    W: Write,
{
    use crossterm::event::{self, Event};
    use crossterm::terminal;

    let (mut width, mut height) = terminal::size().unwrap_or((80, 24));
    loop {
        session.sync(usize::from(height));
        let frame = session.frame(usize::from(width), usize::from(height));
        draw(stdout, &frame, session.theme())?;

        match event::read().map_err(crate::Error::terminal)? {
            Event::Key(key) => {
                if session.handle_key(key) == Action::Quit {
                    return Ok(());
                }
            }
            Event::Resize(w, h) => {
                width = w;
                height = h;
            }
            _ => {}
        }
    }
}

fn draw<W: Write>(stdout: &mut W, lines: &[Line], theme: Theme) -> crate::Result<()> {
    use crossterm::{
        cursor, queue,
        style::{Print, SetAttribute},
        terminal::{Clear, ClearType},
    };

    queue!(stdout, Clear(ClearType::All), cursor::MoveTo(0, 0)).map_err(crate::Error::terminal)?;
    for (row, line) in lines.iter().enumerate() {
        let attribute = theme.attribute(line.style);
        let y = u16::try_from(row).unwrap_or(u16::MAX);
        queue!(stdout, cursor::MoveTo(0, y)).map_err(crate::Error::terminal)?;
        if let Some(attribute) = attribute {
            queue!(stdout, SetAttribute(attribute)).map_err(crate::Error::terminal)?;
        }
        queue!(stdout, Print(&line.text), SetAttribute(Attribute::Reset))
            .map_err(crate::Error::terminal)?;
    }
    stdout.flush().map_err(crate::Error::terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::array::ArrayValues;
    use crate::store::MemoryStore;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn session() -> Session<MemoryStore> {
        let mut store = MemoryStore::new();
        store
            .add_dataset("/a/x", ArrayValues::from_i64(vec![3], vec![1, 2, 3]).unwrap())
            .unwrap();
        store
            .add_dataset(
                "/a/big",
                ArrayValues::from_i64(vec![100, 10], (0..1000).collect()).unwrap(),
            )
            .unwrap();
        store.add_group("/b").unwrap();
        let config = BrowserConfig::default().with_content_page_size(5);
        Session::new(Controller::new(store, config).unwrap())
    }

    #[test]
    fn test_quit_keys() {
        let mut s = session();
        assert_eq!(s.handle_key(key(KeyCode::Char('q'))), Action::Quit);
        assert_eq!(s.handle_key(key(KeyCode::Esc)), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(s.handle_key(ctrl_c), Action::Quit);
        assert_eq!(s.handle_key(key(KeyCode::Char('c'))), Action::Continue);
    }

    #[test]
    fn test_navigation_keys() {
        let mut s = session();
        s.handle_key(key(KeyCode::Char('j')));
        assert_eq!(s.controller().highlighted(), 1);
        s.handle_key(key(KeyCode::Up));
        assert_eq!(s.controller().highlighted(), 0);
        s.handle_key(key(KeyCode::Enter));
        assert_eq!(s.controller().current_header(), "Path: /a");
        s.handle_key(key(KeyCode::Char('l')));
        assert_eq!(s.controller().current_content(), Some("[1 2 3]"));
        s.handle_key(key(KeyCode::Char('h')));
        s.handle_key(key(KeyCode::Left));
        assert_eq!(s.controller().current_header(), "Path: /");
    }

    #[test]
    fn test_toggle_keys() {
        let mut s = session();
        s.handle_key(key(KeyCode::Enter));
        s.handle_key(key(KeyCode::Char('G')));
        s.handle_key(key(KeyCode::Enter));
        assert!(s.controller().is_viewing_dataset());
        s.handle_key(key(KeyCode::Char('t')));
        assert!(!s.controller().truncate());
        s.handle_key(key(KeyCode::Char('s')));
        assert!(s.controller().suppress());
    }

    #[test]
    fn test_content_scrolls_while_viewing() {
        let mut s = session();
        s.handle_key(key(KeyCode::Enter));
        s.handle_key(key(KeyCode::Char('G')));
        s.handle_key(key(KeyCode::Enter));
        s.sync(10);
        s.handle_key(key(KeyCode::PageDown));
        assert_eq!(s.content_offset(), 5);
        s.handle_key(key(KeyCode::Char('j')));
        assert_eq!(s.content_offset(), 6);
        s.handle_key(key(KeyCode::Home));
        assert_eq!(s.content_offset(), 0);
        // The highlight stays on the open dataset.
        assert_eq!(s.controller().highlighted(), 1);
    }

    #[test]
    fn test_reopening_starts_at_top() {
        let mut s = session();
        s.handle_key(key(KeyCode::Enter));
        s.handle_key(key(KeyCode::Char('G')));
        s.handle_key(key(KeyCode::Enter));
        s.sync(10);
        s.handle_key(key(KeyCode::End));
        assert!(s.content_offset() > 0);
        s.handle_key(key(KeyCode::Backspace));
        s.handle_key(key(KeyCode::Enter));
        assert_eq!(s.content_offset(), 0);
    }

    #[test]
    fn test_frame_shows_selection() {
        let mut s = session();
        s.handle_key(key(KeyCode::Down));
        s.sync(8);
        let lines = s.frame(40, 8);
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[3].text, "b");
        assert_eq!(lines[3].style, LineStyle::Selected);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut s = session();
        let mut release = key(KeyCode::Char('j'));
        release.kind = KeyEventKind::Release;
        s.handle_key(release);
        assert_eq!(s.controller().highlighted(), 0);
    }

    #[test]
    fn test_theme_key_switches_selection_style() {
        let mut s = session();
        assert_eq!(s.theme(), Theme::Dark);
        assert_eq!(s.theme().attribute(LineStyle::Selected), Some(Attribute::Reverse));

        s.handle_key(key(KeyCode::Char('d')));
        assert_eq!(s.theme(), Theme::Light);
        assert_eq!(s.theme().attribute(LineStyle::Selected), Some(Attribute::Bold));
        assert_eq!(s.theme().attribute(LineStyle::Header), Some(Attribute::Underlined));
        assert_eq!(s.theme().attribute(LineStyle::Body), None);

        s.handle_key(key(KeyCode::Enter));
        s.handle_key(key(KeyCode::Enter));
        s.handle_key(key(KeyCode::Char('d')));
        assert_eq!(s.theme(), Theme::Dark);
        assert!(s.controller().is_viewing_dataset());
    }

    #[test]
    fn test_draw_uses_theme_attributes() {
        let lines = vec![Line {
            text: "a".to_string(),
            style: LineStyle::Selected,
        }];
        let mut dark = Vec::new();
        draw(&mut dark, &lines, Theme::Dark).unwrap();
        let mut light = Vec::new();
        draw(&mut light, &lines, Theme::Light).unwrap();

        let dark = String::from_utf8(dark).unwrap();
        let light = String::from_utf8(light).unwrap();
        assert!(dark.contains("\x1b[7m"));
        assert!(!light.contains("\x1b[7m"));
        assert!(light.contains("\x1b[1m"));
    }
}
