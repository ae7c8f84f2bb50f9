use anyhow::Result;
use codefence_config::{Config, LineJoinStyle};
use codefence_engine::editing::keymap::{self, Key, KeyInput, Modifiers};
use codefence_engine::editing::{Cmd, Document, RenderBlock, RenderSpan, SpanKind};
use codefence_engine::models::Node;
use codefence_engine::{EditorSettings, LineJoin, io};
use codefence_syntax::{Language, TokenClass};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    env,
    fs::File,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

/// Width of the line-number gutter in front of code lines
const GUTTER_WIDTH: usize = 4;

struct App {
    doc: Document,
    title: String,
    tab_width: usize,
    /// First document row shown on screen
    scroll: usize,
}

impl App {
    fn new(doc: Document, title: String, tab_width: usize) -> Self {
        Self {
            doc,
            title,
            tab_width,
            scroll: 0,
        }
    }

    /// Returns false when the key asks to quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::F(2) => {
                self.doc.apply(Cmd::ToggleCodeBlock);
            }
            KeyCode::F(3) => self.cycle_language(),
            _ => {
                if let Some(cmd) = key_input(key).and_then(keymap::command_for) {
                    self.doc.apply(cmd);
                }
            }
        }
        true
    }

    fn cycle_language(&mut self) {
        let focus = self.doc.selection().focus;
        let Some(block) = self.doc.node(focus.node).and_then(Node::as_code_block) else {
            return;
        };
        let next = Language::resolve(block.language())
            .map_or(Language::JavaScript, Language::next);
        log::info!("Switching code block language to {}", next.id());
        self.doc.apply(Cmd::set_language(next.id()));
    }

    fn focused_language(&self) -> Option<String> {
        let focus = self.doc.selection().focus;
        self.doc
            .node(focus.node)
            .and_then(Node::as_code_block)
            .map(|block| block.language().to_string())
    }

    fn render_document(&self) -> (Vec<Line<'static>>, (usize, usize)) {
        let snapshot = self.doc.snapshot();
        let focus = snapshot.selection.focus;
        let mut lines = Vec::new();
        let mut cursor = (0, 0);

        for (index, block) in snapshot.blocks.iter().enumerate() {
            match block {
                RenderBlock::Paragraph { text, .. } => {
                    for (line_index, text_line) in text.split('\n').enumerate() {
                        if index == focus.node && line_index == focus.caret.line {
                            let column = self.screen_width(text_line, focus.caret.column);
                            cursor = (lines.len(), GUTTER_WIDTH + column);
                        }
                        lines.push(Line::from(format!(
                            "{}{}",
                            " ".repeat(GUTTER_WIDTH),
                            self.expand_tabs(text_line)
                        )));
                    }
                }
                RenderBlock::CodeBlock {
                    language, spans, ..
                } => {
                    lines.push(Line::from(Span::styled(
                        format!("{}```{language}", " ".repeat(GUTTER_WIDTH)),
                        Style::default().fg(Color::DarkGray),
                    )));
                    let display_lines = self.doc.nodes()[index].display_lines();
                    for (line_index, display) in display_lines.iter().enumerate() {
                        if index == focus.node && line_index == focus.caret.line {
                            let column = self.screen_width(display, focus.caret.column);
                            cursor = (lines.len(), GUTTER_WIDTH + column);
                        }
                        lines.push(self.code_line(line_index, spans));
                    }
                    lines.push(Line::from(Span::styled(
                        format!("{}```", " ".repeat(GUTTER_WIDTH)),
                        Style::default().fg(Color::DarkGray),
                    )));
                }
            }
        }
        (lines, cursor)
    }

    fn code_line(&self, line: usize, spans: &[RenderSpan]) -> Line<'static> {
        let mut rendered = vec![Span::styled(
            format!("{:>width$} ", line + 1, width = GUTTER_WIDTH - 1),
            Style::default().fg(Color::DarkGray),
        )];
        for span in spans.iter().filter(|span| span.line == line) {
            match span.kind {
                SpanKind::LineBreak => {}
                SpanKind::Tab => rendered.push(Span::styled(
                    " ".repeat(self.tab_width),
                    Style::default().add_modifier(Modifier::DIM),
                )),
                SpanKind::Token(class) => {
                    rendered.push(Span::styled(self.expand_tabs(&span.text), token_style(class)))
                }
            }
        }
        Line::from(rendered)
    }

    fn expand_tabs(&self, text: &str) -> String {
        text.replace('\t', &" ".repeat(self.tab_width))
    }

    /// Screen columns taken by the first `column` characters of a line
    fn screen_width(&self, text: &str, column: usize) -> usize {
        text.chars()
            .take(column)
            .map(|c| if c == '\t' { self.tab_width } else { 1 })
            .sum()
    }
}

fn token_style(class: TokenClass) -> Style {
    let style = Style::default();
    match class {
        TokenClass::Attr => style.fg(Color::Magenta),
        TokenClass::Comment => style.fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        TokenClass::Function => style.fg(Color::Blue),
        TokenClass::Namespace => style.fg(Color::Cyan),
        TokenClass::Operator => style.fg(Color::Yellow),
        TokenClass::Property => style.fg(Color::LightRed),
        TokenClass::Punctuation => style.fg(Color::Gray),
        TokenClass::Selector => style.fg(Color::Green),
        TokenClass::Variable => style.fg(Color::LightCyan),
        TokenClass::Plain => style,
    }
}

/// Translate a crossterm key event into the engine's key model
fn key_input(event: KeyEvent) -> Option<KeyInput> {
    let mut modifiers = Modifiers {
        shift: event.modifiers.contains(KeyModifiers::SHIFT),
        alt: event.modifiers.contains(KeyModifiers::ALT),
        ctrl: event.modifiers.contains(KeyModifiers::CONTROL),
        meta: event.modifiers.contains(KeyModifiers::SUPER),
    };
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Delete => Key::Delete,
        KeyCode::Tab => Key::Tab,
        KeyCode::BackTab => {
            modifiers.shift = true;
            Key::Tab
        }
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Home => Key::Home,
        KeyCode::End => Key::End,
        _ => return None,
    };
    Some(KeyInput::new(key, modifiers))
}

fn editor_settings(config: &Config) -> EditorSettings {
    EditorSettings {
        rich_text: config.rich_text,
        default_language: config.default_language.clone(),
        line_join: match config.line_join {
            LineJoinStyle::SoftBreak => LineJoin::SoftBreak,
            LineJoinStyle::Space => LineJoin::Space,
        },
    }
}

fn init_logging() -> Result<()> {
    // Logs go to a file so they don't corrupt the terminal UI
    let log_path = env::temp_dir().join("codefence-cli.log");
    let log_file = File::create(&log_path)?;
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();
    log::info!("codefence starting up, logging to {}", log_path.display());
    Ok(())
}

fn main() -> Result<()> {
    init_logging()?;

    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: {} [text-file]", args[0]);
        process::exit(1);
    }

    let config = match Config::load() {
        Ok(Some(config)) => {
            log::info!("Loaded config from {}", Config::config_path().display());
            config
        }
        Ok(None) => {
            log::info!("No config file found, using defaults");
            Config::default()
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    };
    let settings = editor_settings(&config);

    let file = args.get(1).map(PathBuf::from).or(config.start_file.clone());
    let (doc, title) = match &file {
        Some(path) => match io::read_document(path, settings) {
            Ok(doc) => (doc, path.display().to_string()),
            Err(e) => {
                eprintln!("Error: Failed to open '{}': {e}", path.display());
                process::exit(1);
            }
        },
        None => (Document::new(settings), "untitled".to_string()),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(doc, title, usize::from(config.tab_width));
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        log::error!("Editor loop failed: {err:?}");
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !app.handle_key(key)
        {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)].as_ref())
        .split(f.area());

    let (lines, (cursor_row, cursor_column)) = app.render_document();

    // Keep the cursor row inside the bordered editor area
    let visible_rows = usize::from(chunks[0].height.saturating_sub(2)).max(1);
    if cursor_row < app.scroll {
        app.scroll = cursor_row;
    } else if cursor_row >= app.scroll + visible_rows {
        app.scroll = cursor_row + 1 - visible_rows;
    }

    let editor = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(app.title.clone()))
        .scroll((u16::try_from(app.scroll).unwrap_or(u16::MAX), 0));
    f.render_widget(editor, chunks[0]);

    let x = chunks[0].x + 1 + u16::try_from(cursor_column).unwrap_or(u16::MAX);
    let y = chunks[0].y + 1 + u16::try_from(cursor_row - app.scroll).unwrap_or(u16::MAX);
    f.set_cursor_position((x, y));

    let focus = app.doc.selection().focus;
    let mode = app
        .focused_language()
        .unwrap_or_else(|| "paragraph".to_string());
    let status = Line::from(vec![
        Span::styled(
            format!(
                " {mode} | node {} Ln {} Col {} ",
                focus.node + 1,
                focus.caret.line + 1,
                focus.caret.column + 1
            ),
            Style::default().bg(Color::Blue).fg(Color::White),
        ),
        Span::raw(" Esc/Ctrl+Q: Quit | F2: Code block | F3: Language | Tab/Shift+Tab: Indent | Alt+↑/↓: Move line"),
    ]);
    f.render_widget(Paragraph::new(vec![status]), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_tab_becomes_shift_tab() {
        let input = key_input(KeyEvent::new(KeyCode::BackTab, KeyModifiers::SHIFT));
        assert_eq!(
            input.and_then(keymap::command_for),
            Some(Cmd::Outdent)
        );
    }

    #[test]
    fn test_alt_arrows_move_lines() {
        let input = key_input(KeyEvent::new(KeyCode::Up, KeyModifiers::ALT));
        assert!(matches!(
            input.and_then(keymap::command_for),
            Some(Cmd::MoveLine { .. })
        ));
    }

    #[test]
    fn test_config_maps_to_editor_settings() {
        let config = Config {
            rich_text: false,
            line_join: LineJoinStyle::Space,
            ..Config::default()
        };
        let settings = editor_settings(&config);
        assert!(!settings.rich_text);
        assert_eq!(settings.line_join, LineJoin::Space);
        assert_eq!(settings.default_language, "javascript");
    }

    #[test]
    fn test_cursor_follows_tab_width() {
        let app = App::new(
            Document::from_paragraphs(["\tab"], EditorSettings::default()),
            "test".to_string(),
            4,
        );
        assert_eq!(app.screen_width("\tab", 2), 5);
        let (lines, cursor) = app.render_document();
        assert_eq!(lines.len(), 1);
        assert_eq!(cursor, (0, GUTTER_WIDTH));
    }

    #[test]
    fn test_code_block_renders_fences_and_gutter() {
        let mut doc = Document::default();
        for c in "``` x".chars() {
            doc.apply(Cmd::insert_text(c));
        }
        let app = App::new(doc, "test".to_string(), 2);
        let (lines, cursor) = app.render_document();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].to_string(), "  1 x");
        assert_eq!(cursor, (1, GUTTER_WIDTH + 1));
    }
}
