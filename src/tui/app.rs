use std::cell::RefCell;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{
    self, DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    Event, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::config_io::read_config;
use crate::io::watcher::ConfigWatcher;
use crate::model::{PickerConfig, SelectOption};

use super::combobox::Combobox;
use super::document::Document;
use super::input;
use super::render;
use super::theme::Theme;

/// Main application state
pub struct App {
    pub combobox: Combobox,
    /// Document-scope pointer listeners (outside-press detection)
    pub document: Rc<Document>,
    pub theme: Theme,
    /// Caption above the input
    pub label: Option<String>,
    /// Dropdown rows shown before scrolling
    pub max_visible: usize,
    pub should_quit: bool,
    /// One-line message for the status row (reloads, config errors)
    pub status: Option<String>,
    /// Selection as last reported through the change callback
    pub last_change: Rc<RefCell<Option<Vec<SelectOption>>>>,
}

impl App {
    pub fn new(config: &PickerConfig) -> Self {
        let document = Document::new();
        let last_change = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&last_change);

        let combobox = Combobox::new(
            Rc::clone(&document),
            config.options.clone(),
            Some(config.initial_value()),
            Some(config.picker.placeholder.clone()),
        )
        .with_on_change(move |selection| {
            *sink.borrow_mut() = Some(selection.to_vec());
        });

        App {
            combobox,
            document,
            theme: Theme::from_config(&config.ui),
            label: config.picker.label.clone(),
            max_visible: config.ui.max_visible.max(1),
            should_quit: false,
            status: None,
            last_change,
        }
    }

    /// Apply a re-read config: new catalog, and a selection reset if `selected` changed.
    pub fn reload(&mut self, config: &PickerConfig) {
        self.combobox.set_options(config.options.clone());
        self.combobox.sync_value(&config.initial_value());
        self.combobox.set_placeholder(config.picker.placeholder.clone());
        self.theme = Theme::from_config(&config.ui);
        self.label = config.picker.label.clone();
        self.max_visible = config.ui.max_visible.max(1);
    }

    /// The current selection.
    pub fn selection(&self) -> Vec<SelectOption> {
        self.combobox.selection().to_vec()
    }
}

/// Options for an interactive session
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file backing the picker, if any
    pub config_path: Option<PathBuf>,
    /// Reload when the config file changes on disk
    pub watch: bool,
}

/// Run the TUI application. Returns the final selection.
pub fn run(
    config: &PickerConfig,
    opts: &RunOptions,
) -> Result<Vec<SelectOption>, Box<dyn std::error::Error>> {
    let mut app = App::new(config);

    let watcher = match (&opts.config_path, opts.watch) {
        (Some(path), true) => match ConfigWatcher::start(path) {
            Ok(w) => Some(w),
            Err(e) => {
                tracing::warn!(error = %e, "config watcher unavailable");
                None
            }
        },
        _ => None,
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableBracketedPaste
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(
            io::stdout(),
            DisableBracketedPaste,
            DisableMouseCapture,
            LeaveAlternateScreen
        );
        original_hook(panic_info);
    }));

    tracing::info!(options = config.options.len(), "picker started");
    let result = run_event_loop(
        &mut terminal,
        &mut app,
        watcher.as_ref(),
        opts.config_path.as_deref(),
    );

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result?;
    Ok(app.selection())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    watcher: Option<&ConfigWatcher>,
    config_path: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if let (Some(watcher), Some(path)) = (watcher, config_path)
            && watcher.poll()
        {
            reload_from_disk(app, path);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn reload_from_disk(app: &mut App, path: &Path) {
    match read_config(path) {
        Ok((config, _doc)) => {
            app.reload(&config);
            app.status = Some(format!("reloaded {}", path.display()));
            tracing::info!(path = %path.display(), "config reloaded");
        }
        Err(e) => {
            app.status = Some(format!("config error: {}", e));
            tracing::warn!(error = %e, "config reload failed");
        }
    }
}
