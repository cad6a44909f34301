//! App state and core application logic
//!
//! Manages the screen stack and input modes, and translates key presses into
//! view-state changes or fetch effects. Fetches themselves run outside the
//! app; their results come back through [`App::apply_outcome`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::coordinator::{
    EpisodeRequest, FetchCoordinator, FetchOutcome, FetchPhase, Retry, Selection, Session,
};
use crate::models::{JumpTarget, ShowId};
use crate::view::VisibleView;

// =============================================================================
// Screens
// =============================================================================

/// Screen currently shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Show browser with search
    #[default]
    Shows,
    /// Episode list for the current show
    Episodes,
}

// =============================================================================
// Input Mode
// =============================================================================

/// Current input mode for keyboard handling
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputMode {
    /// Normal navigation mode
    #[default]
    Normal,
    /// Text input mode (search box focused)
    Editing,
}

// =============================================================================
// Effects
// =============================================================================

/// Work the event loop must start on behalf of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    LoadShows,
    LoadEpisodes(EpisodeRequest),
}

// =============================================================================
// Selection State (per-view)
// =============================================================================

/// Selection state for list views
#[derive(Debug, Clone, Default)]
pub struct ListState {
    /// Currently selected index
    pub selected: usize,
    /// Scroll offset for viewport
    pub offset: usize,
    /// Total number of items
    pub len: usize,
}

impl ListState {
    pub fn new(len: usize) -> Self {
        Self {
            selected: 0,
            offset: 0,
            len,
        }
    }

    /// Move selection up
    pub fn up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            if self.selected < self.offset {
                self.offset = self.selected;
            }
        }
    }

    /// Move selection down
    pub fn down(&mut self) {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
    }

    /// Move selection up by a page
    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        if self.selected < self.offset {
            self.offset = self.selected;
        }
    }

    /// Move selection down by a page
    pub fn page_down(&mut self, page_size: usize) {
        if self.len > 0 {
            self.selected = (self.selected + page_size).min(self.len - 1);
        }
    }

    /// Jump to first item
    pub fn first(&mut self) {
        self.selected = 0;
        self.offset = 0;
    }

    /// Jump to last item
    pub fn last(&mut self) {
        if self.len > 0 {
            self.selected = self.len - 1;
        }
    }

    /// Select an index, clamped to the list
    pub fn select(&mut self, index: usize) {
        self.selected = if self.len == 0 {
            0
        } else {
            index.min(self.len - 1)
        };
    }

    /// Update offset to keep selected item visible
    pub fn scroll_into_view(&mut self, visible_height: usize) {
        if visible_height == 0 {
            return;
        }
        if self.selected < self.offset {
            self.offset = self.selected;
        } else if self.selected >= self.offset + visible_height {
            self.offset = self.selected - visible_height + 1;
        }
    }

    /// Update length (e.g., when the visible subset changes)
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        if len == 0 {
            self.selected = 0;
            self.offset = 0;
        } else if self.selected >= len {
            self.selected = len - 1;
        }
        if self.offset > self.selected {
            self.offset = self.selected;
        }
    }
}

// =============================================================================
// Search Input
// =============================================================================

/// Single-line text input. `cursor` counts characters, not bytes.
#[derive(Debug, Clone, Default)]
pub struct SearchInput {
    pub query: String,
    pub cursor: usize,
}

impl SearchInput {
    fn byte_index(&self, cursor: usize) -> usize {
        self.query
            .char_indices()
            .nth(cursor)
            .map(|(i, _)| i)
            .unwrap_or(self.query.len())
    }

    fn char_len(&self) -> usize {
        self.query.chars().count()
    }

    /// Insert character at cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.query.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    /// Delete character at cursor
    pub fn delete(&mut self) -> bool {
        if self.cursor >= self.char_len() {
            return false;
        }
        let at = self.byte_index(self.cursor);
        self.query.remove(at);
        true
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor < self.char_len() {
            self.cursor += 1;
        }
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Replace the text and park the cursor at the end
    pub fn set(&mut self, text: &str) {
        self.query = text.to_string();
        self.cursor_end();
    }

    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    /// Query split at the cursor, for drawing a caret
    pub fn split_at_cursor(&self) -> (&str, &str) {
        self.query.split_at(self.byte_index(self.cursor))
    }
}

// =============================================================================
// Main Application State
// =============================================================================

/// Main application state
#[derive(Debug)]
pub struct App {
    /// Current screen
    pub screen: Screen,
    /// Navigation history stack
    pub nav_stack: Vec<Screen>,
    /// Whether the app is running
    pub running: bool,
    /// Current input mode
    pub input_mode: InputMode,
    /// Transient error popup (cleared on next key)
    pub error: Option<String>,

    /// Shows, episodes, search terms and the cache
    pub session: Session,
    /// Fetch state machine
    pub coordinator: FetchCoordinator,

    pub show_search: SearchInput,
    pub episode_search: SearchInput,
    pub show_list: ListState,
    pub episode_list: ListState,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create an app that opens on the show list
    pub fn new() -> Self {
        Self {
            screen: Screen::Shows,
            nav_stack: Vec::new(),
            running: true,
            input_mode: InputMode::Normal,
            error: None,
            session: Session::new(),
            coordinator: FetchCoordinator::default(),
            show_search: SearchInput::default(),
            episode_search: SearchInput::default(),
            show_list: ListState::default(),
            episode_list: ListState::default(),
        }
    }

    /// Create an app with a preferred default show.
    ///
    /// With `open_default_show` the app starts on the episode screen, with the
    /// show list one step back.
    pub fn with_options(preferred_show: ShowId, open_default_show: bool) -> Self {
        let mut app = Self::new();
        app.coordinator = FetchCoordinator::new(preferred_show);
        if open_default_show {
            app.nav_stack.push(Screen::Shows);
            app.screen = Screen::Episodes;
        }
        app
    }

    /// Kick off the initial show load
    pub fn start(&mut self) -> Option<Effect> {
        self.coordinator.begin_load_shows().then_some(Effect::LoadShows)
    }

    pub fn phase(&self) -> &FetchPhase {
        self.coordinator.phase()
    }

    /// Current visible-state description
    pub fn visible(&self) -> VisibleView<'_> {
        self.session.view.visible()
    }

    /// Navigate to a new screen, pushing current to stack
    pub fn navigate(&mut self, screen: Screen) {
        if self.screen != screen {
            self.nav_stack.push(self.screen);
            self.screen = screen;
        }
        self.input_mode = InputMode::Normal;
    }

    /// Go back to previous screen
    pub fn back(&mut self) -> bool {
        if self.input_mode == InputMode::Editing {
            self.input_mode = InputMode::Normal;
            return true;
        }

        if let Some(prev) = self.nav_stack.pop() {
            self.screen = prev;
            true
        } else {
            false
        }
    }

    /// Quit the application
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Set error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        self.error = Some(msg.into());
    }

    /// Episode controls are inert while a fetch is pending or failed
    pub fn episode_controls_enabled(&self) -> bool {
        matches!(self.phase(), FetchPhase::EpisodesReady(_))
    }

    /// Status bar text: phase message while loading/failed, else counts
    pub fn status_line(&self) -> String {
        if let Some(message) = self.phase().message() {
            return message;
        }
        let visible = self.visible();
        match self.screen {
            Screen::Shows => visible.show_status(),
            Screen::Episodes => visible.episode_status(),
        }
    }

    // -------------------------------------------------------------------------
    // Fetch results
    // -------------------------------------------------------------------------

    /// Hand a finished fetch to the coordinator and refresh the lists
    pub fn apply_outcome(&mut self, outcome: FetchOutcome) -> Option<Effect> {
        let loaded_shows = matches!(outcome, FetchOutcome::Shows(Ok(_)));

        let effect = match self.coordinator.apply(&mut self.session, outcome) {
            Ok(request) => request.map(Effect::LoadEpisodes),
            Err(e) => {
                tracing::info!(error = %e, "fetch surfaced to user");
                None
            }
        };

        self.sync_lists();
        if loaded_shows {
            self.highlight_current_show();
        }
        effect
    }

    /// Bring list lengths and search boxes in line with the view state
    fn sync_lists(&mut self) {
        let view = &self.session.view;
        if self.show_search.query != view.show_search() {
            self.show_search.set(view.show_search());
        }
        if self.episode_search.query != view.episode_search() {
            self.episode_search.set(view.episode_search());
        }

        let shows = view.visible_shows().len();
        let episodes = view.visible_episodes().len();
        self.show_list.set_len(shows);
        self.episode_list.set_len(episodes);
    }

    fn highlight_current_show(&mut self) {
        let Some(current) = self.session.view.current_show() else {
            return;
        };
        let index = self
            .session
            .view
            .visible_shows()
            .iter()
            .position(|s| s.id == current);
        if let Some(index) = index {
            self.show_list.select(index);
        }
    }

    // -------------------------------------------------------------------------
    // Actions
    // -------------------------------------------------------------------------

    /// Select the highlighted show and open its episodes
    pub fn open_selected_show(&mut self) -> Option<Effect> {
        let show_id = self
            .session
            .view
            .visible_shows()
            .get(self.show_list.selected)
            .map(|s| s.id)?;

        let selection = self.coordinator.select_show(&mut self.session, show_id);
        tracing::info!(show_id, ?selection, "show selected");

        if selection != Selection::Unchanged {
            self.episode_list.first();
        }
        self.sync_lists();
        self.navigate(Screen::Episodes);

        match selection {
            Selection::Fetch(request) => Some(Effect::LoadEpisodes(request)),
            Selection::Cached | Selection::Unchanged => None,
        }
    }

    /// Narrow the episode list to the highlighted episode
    pub fn jump_to_selected_episode(&mut self) {
        let Some(id) = self
            .session
            .view
            .visible_episodes()
            .get(self.episode_list.selected)
            .map(|e| e.id)
        else {
            return;
        };
        self.jump_to(JumpTarget::Episode(id));
    }

    /// Apply a jump target; unknown episodes surface as an error popup
    pub fn jump_to(&mut self, target: JumpTarget) {
        let previous = self.session.view.jump_target();

        if let Err(e) = self.session.view.select_episode(target) {
            self.set_error(e.to_string());
            return;
        }

        self.sync_lists();
        self.episode_list.first();

        // Back on the full list, keep the previously jumped episode in view
        if let (JumpTarget::All, JumpTarget::Episode(id)) = (target, previous) {
            let index = self
                .session
                .view
                .visible_episodes()
                .iter()
                .position(|e| e.id == id);
            if let Some(index) = index {
                self.episode_list.select(index);
            }
        }
    }

    /// Retry the last failed fetch
    pub fn retry(&mut self) -> Option<Effect> {
        match self.coordinator.retry(&mut self.session) {
            Retry::Shows => Some(Effect::LoadShows),
            Retry::Episodes(request) => Some(Effect::LoadEpisodes(request)),
            Retry::Cached => {
                self.sync_lists();
                self.episode_list.first();
                None
            }
            Retry::Nothing => None,
        }
    }

    /// Start editing the search box of the current screen
    pub fn focus_search(&mut self) {
        if self.screen == Screen::Episodes && !self.episode_controls_enabled() {
            return;
        }
        self.input_mode = InputMode::Editing;
    }

    fn search_changed(&mut self) {
        match self.screen {
            Screen::Shows => {
                self.session
                    .view
                    .set_show_search(self.show_search.query.clone());
                self.show_list.first();
            }
            Screen::Episodes => {
                self.session
                    .view
                    .set_episode_search(self.episode_search.query.clone());
                self.episode_list.first();
            }
        }
        self.sync_lists();
    }

    fn active_search(&mut self) -> &mut SearchInput {
        match self.screen {
            Screen::Shows => &mut self.show_search,
            Screen::Episodes => &mut self.episode_search,
        }
    }

    fn active_list(&mut self) -> &mut ListState {
        match self.screen {
            Screen::Shows => &mut self.show_list,
            Screen::Episodes => &mut self.episode_list,
        }
    }

    // -------------------------------------------------------------------------
    // Keyboard Event Handling
    // -------------------------------------------------------------------------

    /// Handle keyboard event, returning any fetch the event loop must start
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Effect> {
        // Clear error on any keypress
        self.error = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit();
            return None;
        }

        if self.input_mode == InputMode::Editing {
            self.handle_editing_key(key);
            None
        } else {
            self.handle_normal_key(key)
        }
    }

    /// Handle keys in editing (text input) mode
    fn handle_editing_key(&mut self, key: KeyEvent) {
        let changed = match key.code {
            KeyCode::Esc | KeyCode::Enter => {
                self.input_mode = InputMode::Normal;
                false
            }
            KeyCode::Char(c) => {
                self.active_search().insert(c);
                true
            }
            KeyCode::Backspace => self.active_search().backspace(),
            KeyCode::Delete => self.active_search().delete(),
            KeyCode::Left => {
                self.active_search().cursor_left();
                false
            }
            KeyCode::Right => {
                self.active_search().cursor_right();
                false
            }
            KeyCode::Home => {
                self.active_search().cursor_home();
                false
            }
            KeyCode::End => {
                self.active_search().cursor_end();
                false
            }
            _ => false,
        };

        if changed {
            self.search_changed();
        }
    }

    /// Handle keys in normal navigation mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Char('q') => {
                self.quit();
                return None;
            }
            KeyCode::Char('/') => {
                self.focus_search();
                return None;
            }
            KeyCode::Char('r') => return self.retry(),
            KeyCode::Esc => {
                self.back();
                return None;
            }
            KeyCode::Up | KeyCode::Char('k') => self.active_list().up(),
            KeyCode::Down | KeyCode::Char('j') => self.active_list().down(),
            KeyCode::PageUp => self.active_list().page_up(10),
            KeyCode::PageDown => self.active_list().page_down(10),
            KeyCode::Home => self.active_list().first(),
            KeyCode::End => self.active_list().last(),
            _ => {}
        }

        match self.screen {
            Screen::Shows => self.handle_shows_key(key),
            Screen::Episodes => self.handle_episodes_key(key),
        }
    }

    fn handle_shows_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Enter => self.open_selected_show(),
            KeyCode::Tab => {
                if self.session.view.current_show().is_some() {
                    self.navigate(Screen::Episodes);
                }
                None
            }
            _ => None,
        }
    }

    fn handle_episodes_key(&mut self, key: KeyEvent) -> Option<Effect> {
        match key.code {
            KeyCode::Enter if self.episode_controls_enabled() => {
                self.jump_to_selected_episode();
                None
            }
            KeyCode::Char('a') if self.episode_controls_enabled() => {
                self.jump_to(JumpTarget::All);
                None
            }
            KeyCode::Tab | KeyCode::Char('s') => {
                self.navigate(Screen::Shows);
                None
            }
            _ => None,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
