use crate::query::{ResultView, SearchSession};
use crate::tui::navigation::{Focus, KeyOutcome, NavKey, NavigationController};

/// State of the interactive search front end
pub struct App<'a, R> {
    session: SearchSession<'a>,
    pub nav: NavigationController<R>,
    pub query: String,
    pub status_message: String,
    /// URL chosen with Enter, once the user navigated away
    pub navigated: Option<String>,
    pub should_quit: bool,
}

impl<'a, R> App<'a, R> {
    pub fn new(
        session: SearchSession<'a>,
        renderer: impl Fn(&ResultView<'_>) -> R + 'static,
    ) -> Self {
        let entries = session.index().entries.len();
        let mut nav = NavigationController::new(renderer);
        nav.set_focus(Focus::Input);

        Self {
            session,
            nav,
            query: String::new(),
            status_message: format!("{} entries indexed. Type to search, Esc to leave.", entries),
            navigated: None,
            should_quit: false,
        }
    }

    /// Recompute results for the current query
    pub fn search(&mut self) {
        let hits = self.session.search(&self.query);
        self.nav.render(&hits);
        self.status_message = if self.query.is_empty() {
            String::new()
        } else if hits.is_empty() {
            "No results.".to_string()
        } else {
            format!("{} results", hits.len())
        };
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.search();
    }

    /// Typed character
    pub fn input_char(&mut self, c: char) {
        if !self.nav.is_active() {
            match c {
                '/' => {
                    self.nav.handle_key(NavKey::Slash);
                }
                'q' => self.should_quit = true,
                _ => {}
            }
            return;
        }
        self.nav.set_focus(Focus::Input);
        self.query.push(c);
        self.search();
    }

    pub fn backspace(&mut self) {
        if self.nav.is_active() && self.query.pop().is_some() {
            self.nav.set_focus(Focus::Input);
            self.search();
        }
    }

    /// Drop the last word of the query
    pub fn delete_word(&mut self) {
        if !self.nav.is_active() {
            return;
        }
        let trimmed = self.query.trim_end();
        let cut = trimmed
            .rfind(|c: char| c.is_whitespace())
            .map(|i| i + 1)
            .unwrap_or(0);
        self.query.truncate(cut);
        self.search();
    }

    pub fn handle_key(&mut self, key: NavKey) {
        match self.nav.handle_key(key) {
            KeyOutcome::Navigate(url) => self.navigate(url),
            KeyOutcome::Handled => {}
            KeyOutcome::Ignored => {
                if key == NavKey::Escape {
                    self.should_quit = true;
                }
            }
        }
    }

    /// Run `query` and navigate to its top result
    pub fn feeling_lucky(&mut self, query: &str) {
        self.query = query.to_string();
        match self.nav.feeling_lucky(&mut self.session, query) {
            Some(url) => self.navigate(url),
            None => self.status_message = "No results.".to_string(),
        }
    }

    fn navigate(&mut self, url: String) {
        tracing::info!(url = %url, "Navigating to result");
        self.status_message = format!("Opening {}", url);
        self.navigated = Some(url);
        self.should_quit = true;
    }
}
