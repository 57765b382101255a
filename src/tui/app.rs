//! Main TUI application state and logic

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use ratatui::Terminal;
use tracing::{debug, error, info};

use super::event::{AppEvent, ClipboardManager, EventHandler};
use super::hit_test::{ClickTarget, HitTestRegistry};
use super::settings::{
    handle_settings_key, handle_settings_paste, KeyContext, SettingsKeyResult, SettingsState,
};
use super::theme::Theme;
use super::ui;
use crate::panel::{SettingsPanel, SettingsTab};
use crate::runner::AppConfig;
use crate::settings::{Settings, SettingsService, SettingsStore};

/// Panel type used by the terminal UI
pub type StorePanel = SettingsPanel<Arc<SettingsStore>>;

/// Main TUI application
pub struct TuiApp {
    /// Terminal instance
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Event handler (optional so we can take it out in run loop)
    events: Option<EventHandler>,
    /// Whether the app should quit
    should_quit: bool,
    /// Runtime configuration (export directory)
    config: AppConfig,
    /// Settings store shared with every panel instance
    store: Arc<SettingsStore>,
    /// The settings modal; rebuilt each time it opens
    pub panel: Option<StorePanel>,
    /// Widget state of the settings modal
    pub settings_state: SettingsState,
    /// Last snapshot seen, for the host screen and palette
    pub snapshot: Settings,
    /// Click targets from the last render
    pub hit_registry: HitTestRegistry,
    /// Clipboard for Ctrl+V
    clipboard: ClipboardManager,
    /// Host screen status message with timestamp
    pub status: Option<(Instant, String)>,
}

impl TuiApp {
    /// Create a new TUI application
    pub fn new(config: AppConfig) -> Result<Self> {
        #[allow(clippy::arc_with_non_send_sync)]
        let store = Arc::new(config.open_store()?);
        let snapshot = store.get_settings().context("Failed to load settings")?;

        // Initialize terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Ticks drive notice expiry; no animation needs a faster rate
        let events = EventHandler::new(Duration::from_millis(100));

        Ok(Self {
            terminal,
            events: Some(events),
            should_quit: false,
            config,
            store,
            panel: None,
            settings_state: SettingsState::new(),
            snapshot,
            hit_registry: HitTestRegistry::new(),
            clipboard: ClipboardManager::new(),
            status: None,
        })
    }

    /// Palette for the current theme preference
    pub fn theme(&self) -> Theme {
        let mode = self
            .panel
            .as_ref()
            .map(|p| p.settings().theme)
            .unwrap_or(self.snapshot.theme);
        Theme::for_mode(mode)
    }

    /// Build a fresh panel from the store. Transient state never survives a close.
    pub fn open_settings(&mut self) {
        match SettingsPanel::mount(Arc::clone(&self.store)) {
            Ok(panel) => {
                debug!("Opened settings modal");
                self.settings_state = SettingsState::new();
                self.panel = Some(panel);
            }
            Err(e) => {
                error!("Failed to open settings: {}", e);
                self.status = Some((Instant::now(), format!("Could not open settings: {}", e)));
            }
        }
    }

    /// Drop the panel along with its pending notice deadline
    pub fn close_settings(&mut self) {
        if let Some(panel) = self.panel.take() {
            self.snapshot = panel.settings().clone();
            debug!("Closed settings modal");
        }
        self.settings_state = SettingsState::new();
    }

    /// Run the main event loop
    pub async fn run(&mut self) -> Result<()> {
        let mut events = self.events.take().context("Events not initialized")?;

        while !self.should_quit {
            let theme = self.theme();
            self.hit_registry.clear();
            self.terminal.draw(|frame| {
                ui::render(
                    frame,
                    &self.snapshot,
                    self.panel.as_ref(),
                    &self.settings_state,
                    &theme,
                    self.status.as_ref().map(|(_, s)| s.as_str()),
                    &mut self.hit_registry,
                )
            })?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }

        self.events = Some(events);
        info!("Exiting");
        Ok(())
    }

    /// Handle an application event
    fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Click { row, col } => self.handle_click(col, row),
            AppEvent::Paste(text) => {
                if let Some(panel) = self.panel.as_mut() {
                    handle_settings_paste(panel, &mut self.settings_state, &text);
                }
            }
            AppEvent::Tick => {
                let now = Instant::now();
                if let Some(panel) = self.panel.as_mut() {
                    panel.tick(now);
                }
                if let Some((since, _)) = &self.status {
                    if now.duration_since(*since) >= Duration::from_secs(3) {
                        self.status = None;
                    }
                }
            }
            AppEvent::Resize(_, _) => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        // Global shortcuts
        match (key.modifiers, key.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('q')) => {
                self.should_quit = true;
                return;
            }
            // F2 or Ctrl+, toggles settings
            (_, KeyCode::F(2)) | (KeyModifiers::CONTROL, KeyCode::Char(',')) => {
                if self.panel.is_some() {
                    self.close_settings();
                } else {
                    self.open_settings();
                }
                return;
            }
            _ => {}
        }

        let Some(panel) = self.panel.as_mut() else {
            if key.code == KeyCode::Char('q') {
                self.should_quit = true;
            }
            return;
        };

        let pasted = if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('v') {
            self.clipboard.paste()
        } else {
            None
        };
        let export_dir = self.config.export_dir();
        let ctx = KeyContext {
            clipboard_text: pasted.as_deref(),
            export_dir: &export_dir,
            now: Instant::now(),
        };

        if handle_settings_key(panel, &mut self.settings_state, key, &ctx)
            == SettingsKeyResult::Close
        {
            self.close_settings();
        }
    }

    fn handle_click(&mut self, x: u16, y: u16) {
        let target = self.hit_registry.hit_test(x, y).cloned();
        let Some(panel) = self.panel.as_mut() else {
            return;
        };
        let now = Instant::now();

        match target {
            Some(ClickTarget::ModalClose) => self.close_settings(),
            Some(ClickTarget::Tab(tab)) => {
                panel.set_tab(tab);
                self.settings_state.reset_tab_state();
            }
            Some(ClickTarget::SettingRow(idx)) => self.settings_state.selected_index = idx,
            Some(ClickTarget::ModelRow(idx)) => self.settings_state.model_index = idx,
            Some(ClickTarget::AddModel) => {
                if panel.active_tab() == SettingsTab::LocalModels {
                    panel.begin_create();
                }
            }
            Some(ClickTarget::DialogYes) => {
                if panel.pending().is_some() {
                    let _ = panel.resolve_confirmation(true, now);
                } else if !panel.flow().staged().is_empty() {
                    let _ = panel.confirm_bulk(now);
                } else {
                    let _ = panel.submit_form(now);
                }
            }
            Some(ClickTarget::DialogNo) => {
                if panel.pending().is_some() {
                    let _ = panel.resolve_confirmation(false, now);
                } else if !panel.flow().staged().is_empty() {
                    panel.cancel_bulk();
                } else {
                    panel.close_form();
                }
            }
            Some(ClickTarget::ModalContent) | None => {}
        }
    }
}

impl Drop for TuiApp {
    fn drop(&mut self) {
        // Restore terminal - order matters!
        let _ = disable_raw_mode();
        let _ = execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        );
        let _ = self.terminal.show_cursor();
    }
}
