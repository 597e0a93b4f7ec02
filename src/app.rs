//! Application state and core logic

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::process::Command;
use std::time::Instant;

use crate::alert::{AlertKind, Alerts, notify_if_empty};
use crate::config::{Config, EmptyTermPolicy};
use crate::query::{DEFAULT_LIMIT_INDEX, LIMIT_CHOICES, SearchQuery, SortBy};
use crate::render::{ResultsView, render};
use crate::search::SearchOutcome;

/// Messages sent from background tasks to the main app
#[derive(Debug)]
pub enum AppMessage {
    /// A search request resolved, successfully or not
    SearchFinished { token: u64, outcome: SearchOutcome },
}

/// Which form control receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Term,
    Sort,
    Limit,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Term => Focus::Sort,
            Focus::Sort => Focus::Limit,
            Focus::Limit => Focus::Term,
        }
    }
}

/// The search form: a text field, a sort radio group and a limit selector
#[derive(Debug, Clone)]
pub struct SearchForm {
    pub term: String,
    pub sort_index: usize,
    pub limit_index: usize,
    pub focus: Focus,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            term: String::new(),
            sort_index: 0,
            limit_index: DEFAULT_LIMIT_INDEX,
            focus: Focus::Term,
        }
    }
}

impl SearchForm {
    pub fn sort_by(&self) -> SortBy {
        SortBy::ALL[self.sort_index]
    }

    pub fn limit(&self) -> u32 {
        LIMIT_CHOICES[self.limit_index]
    }

    /// Snapshot the controls as they are right now, unmodified
    pub fn read(&self) -> SearchQuery {
        SearchQuery {
            term: self.term.clone(),
            sort_by: self.sort_by(),
            limit: self.limit(),
        }
    }

    pub fn cycle_focus(&mut self) {
        self.focus = self.focus.next();
    }

    /// Move the focused choice control one option right
    pub fn next_option(&mut self) {
        match self.focus {
            Focus::Sort => self.sort_index = (self.sort_index + 1) % SortBy::ALL.len(),
            Focus::Limit => self.limit_index = (self.limit_index + 1) % LIMIT_CHOICES.len(),
            Focus::Term => {}
        }
    }

    /// Move the focused choice control one option left
    pub fn previous_option(&mut self) {
        match self.focus {
            Focus::Sort => {
                self.sort_index = (self.sort_index + SortBy::ALL.len() - 1) % SortBy::ALL.len()
            }
            Focus::Limit => {
                self.limit_index =
                    (self.limit_index + LIMIT_CHOICES.len() - 1) % LIMIT_CHOICES.len()
            }
            Focus::Term => {}
        }
    }
}

/// A search the event loop should spawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub token: u64,
    pub query: SearchQuery,
}

/// Main application structure
pub struct App {
    pub form: SearchForm,
    pub alerts: Alerts,
    pub results: ResultsView,
    pub selected_index: usize,
    /// Token of the most recent submission; only its outcome is rendered
    latest_token: u64,
    /// Set while the latest submission has not resolved
    pub searching: bool,
    /// Status message shown in UI
    pub status_message: String,
    pub export_path: PathBuf,
    empty_term: EmptyTermPolicy,
}

impl App {
    /// Create new app instance
    pub fn new(config: &Config) -> Self {
        Self {
            form: SearchForm::default(),
            alerts: Alerts::new(config.alert_ttl),
            results: ResultsView::default(),
            selected_index: 0,
            latest_token: 0,
            searching: false,
            status_message: String::new(),
            export_path: config.export_path.clone(),
            empty_term: config.empty_term,
        }
    }

    /// Handle a form submission
    ///
    /// Reads the form, flags an empty term and clears the input. Returns the
    /// request to send, or `None` when the empty-term policy says to skip.
    pub fn submit(&mut self, now: Instant) -> Option<SearchRequest> {
        let query = self.form.read();
        let empty = notify_if_empty(&query.term, &mut self.alerts, now);

        self.form.term.clear();

        if empty && self.empty_term == EmptyTermPolicy::Skip {
            tracing::debug!("empty term, request skipped");
            return None;
        }

        self.latest_token += 1;
        self.searching = true;
        self.status_message = "Searching...".to_string();
        tracing::debug!(token = self.latest_token, term = %query.term, "search submitted");

        Some(SearchRequest {
            token: self.latest_token,
            query,
        })
    }

    /// Apply a resolved search, ignoring anything older than the latest submission
    ///
    /// Returns whether the outcome was applied.
    pub fn apply_outcome(&mut self, token: u64, outcome: SearchOutcome, now: Instant) -> bool {
        if token != self.latest_token {
            tracing::debug!(token, latest = self.latest_token, "dropping stale search result");
            return false;
        }
        self.searching = false;

        match outcome {
            SearchOutcome::Posts(posts) => {
                self.results = render(&posts);
                self.selected_index = 0;
                self.status_message = format!("Found {} results", posts.len());
            }
            SearchOutcome::Failed(detail) => {
                self.alerts
                    .push(format!("Search failed: {detail}"), AlertKind::Danger, now);
                self.status_message = "Search failed".to_string();
            }
        }
        true
    }

    /// Expire alerts; called once per UI tick
    pub fn tick(&mut self, now: Instant) {
        self.alerts.prune(now);
    }

    /// Move to next card
    pub fn next_card(&mut self) {
        if !self.results.cards.is_empty() {
            self.selected_index = (self.selected_index + 1) % self.results.cards.len();
        }
    }

    /// Move to previous card
    pub fn previous_card(&mut self) {
        if !self.results.cards.is_empty() {
            if self.selected_index == 0 {
                self.selected_index = self.results.cards.len() - 1;
            } else {
                self.selected_index -= 1;
            }
        }
    }

    /// Get scroll offset for rendering `per_screen` cards at a time
    pub fn get_scroll_offset(&self, per_screen: usize) -> usize {
        let per_screen = per_screen.max(1);
        if self.selected_index >= per_screen {
            self.selected_index + 1 - per_screen
        } else {
            0
        }
    }

    /// Open the selected card's link in the browser
    pub fn open_selected(&mut self, now: Instant) {
        let Some(card) = self.results.cards.get(self.selected_index) else {
            return;
        };

        match open_url(&card.url) {
            Ok(()) => self.status_message = format!("Opened {}", card.url),
            Err(e) => {
                tracing::warn!(url = %card.url, error = %e, "failed to open browser");
                self.alerts
                    .push(format!("Failed to open URL: {e}"), AlertKind::Danger, now);
            }
        }
    }

    /// Report the outcome of an HTML export
    pub fn finish_export(&mut self, result: Result<()>, now: Instant) {
        match result {
            Ok(()) => self.alerts.push(
                format!(
                    "Exported {} cards to {}",
                    self.results.cards.len(),
                    self.export_path.display()
                ),
                AlertKind::Info,
                now,
            ),
            Err(e) => {
                let detail = format!("{e:#}");
                tracing::warn!(error = %detail, "export failed");
                self.alerts
                    .push(format!("Export failed: {detail}"), AlertKind::Danger, now);
            }
        }
    }
}

/// Open URL in default browser
fn open_url(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };

    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdin(std::process::Stdio::null())
        .stdout(std::process::Stdio::null())
        .stderr(std::process::Stdio::null())
        .spawn()
        .context("Failed to open browser")?;

    Ok(())
}
