//! Application state management.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rag_api::RagBackend;

use crate::config::DashboardConfig;

use super::{
    DocumentKind, DocumentsPanel, DocumentsState, HealthMonitor, HealthState, RagPanel, RagState,
    SearchPanel, SearchState,
};

/// Application state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// Main dashboard view.
    #[default]
    Dashboard,
    /// Help overlay.
    Help,
    /// Quitting.
    Quit,
}

/// Panel receiving keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Rag,
    Documents,
}

impl Focus {
    pub const ALL: [Focus; 3] = [Focus::Search, Focus::Rag, Focus::Documents];

    pub fn next(self) -> Focus {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Focus {
        let idx = Self::ALL.iter().position(|&f| f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Immutable copy of everything the renderer needs.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub state: AppState,
    pub focus: Focus,
    pub health: HealthState,
    pub search: SearchState,
    pub rag: RagState,
    pub documents: DocumentsState,
}

/// Main application model.
pub struct App {
    /// Current application state/view.
    pub state: AppState,
    /// Panel receiving typed input.
    pub focus: Focus,
    pub health: HealthMonitor,
    pub search: SearchPanel,
    pub rag: RagPanel,
    pub documents: DocumentsPanel,
}

impl App {
    /// Build every panel, start health polling and load the default
    /// document kind.
    pub fn mount(backend: Arc<dyn RagBackend>, config: &DashboardConfig) -> Self {
        let health = HealthMonitor::mount(Arc::clone(&backend), config.health_interval);
        let search = SearchPanel::new(Arc::clone(&backend), config.search_k);
        let rag = RagPanel::new(Arc::clone(&backend), config.rag_k);
        let documents = DocumentsPanel::new(backend, config.document_limit);
        documents.mount();

        Self {
            state: AppState::Dashboard,
            focus: Focus::default(),
            health,
            search,
            rag,
            documents,
        }
    }

    pub fn view(&self) -> DashboardView {
        DashboardView {
            state: self.state,
            focus: self.focus,
            health: self.health.snapshot(),
            search: self.search.snapshot(),
            rag: self.rag.snapshot(),
            documents: self.documents.snapshot(),
        }
    }

    /// Handle a key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.state = AppState::Quit;
            return;
        }

        match self.state {
            AppState::Dashboard => self.handle_dashboard_key(key),
            AppState::Help => {
                // Any key closes help
                self.state = AppState::Dashboard;
            }
            AppState::Quit => {}
        }
    }

    fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state = AppState::Quit,
            KeyCode::F(1) => self.state = AppState::Help,
            KeyCode::F(5) => {
                self.health.refresh();
            }
            KeyCode::F(9) => {
                self.health.reload_index();
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            _ => self.handle_panel_key(key),
        }
    }

    fn handle_panel_key(&mut self, key: KeyEvent) {
        let typed = match key.code {
            KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
                Some(c)
            }
            _ => None,
        };

        match self.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => {
                    self.search.submit();
                }
                KeyCode::Backspace => self.search.pop_char(),
                KeyCode::Up => self.search.step_k(true),
                KeyCode::Down => self.search.step_k(false),
                _ => {
                    if let Some(c) = typed {
                        self.search.push_char(c);
                    }
                }
            },
            Focus::Rag => match key.code {
                KeyCode::Enter => {
                    self.rag.submit();
                }
                KeyCode::Backspace => self.rag.pop_char(),
                KeyCode::Up => self.rag.step_k(true),
                KeyCode::Down => self.rag.step_k(false),
                _ => {
                    if let Some(c) = typed {
                        self.rag.push_char(c);
                    }
                }
            },
            Focus::Documents => match key.code {
                KeyCode::Enter => {
                    self.documents.refresh();
                }
                KeyCode::Left | KeyCode::Right => {
                    self.documents.toggle_kind();
                }
                KeyCode::Char('c') | KeyCode::Char('C') => {
                    self.documents.select_kind(DocumentKind::Clean);
                }
                KeyCode::Char('r') | KeyCode::Char('R') => {
                    self.documents.select_kind(DocumentKind::Raw);
                }
                _ => {}
            },
        }
    }

    /// Check if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.state == AppState::Quit
    }

    /// Tear down background work.
    pub fn shutdown(&mut self) {
        self.health.shutdown();
    }
}
