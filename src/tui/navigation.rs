//! Keyboard navigation over rendered search results.
//!
//! The controller is ACTIVE while the query input or the result list has
//! focus and INACTIVE otherwise. At most one rendered result carries the
//! cursor, and every render puts it back on the first result.

use crate::query::{ResultView, SearchHit, SearchSession};

/// Where focus currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Input,
    Results,
    Elsewhere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Inactive,
    Active,
}

/// Keys the controller reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    Down,
    Up,
    Enter,
    Escape,
    Slash,
    Tab,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Key is not a navigation key in the current state
    Ignored,
    Handled,
    /// Enter on the cursored result
    Navigate(String),
}

/// A result as produced by the caller's renderer, with its target
#[derive(Debug, Clone)]
pub struct Rendered<R> {
    pub url: String,
    pub item: R,
}

/// Render callback: one hit in, one renderable unit out
pub type Renderer<R> = Box<dyn Fn(&ResultView<'_>) -> R>;

pub struct NavigationController<R> {
    focus: Focus,
    renderer: Renderer<R>,
    results: Vec<Rendered<R>>,
    cursor: Option<usize>,
}

impl<R> NavigationController<R> {
    pub fn new(renderer: impl Fn(&ResultView<'_>) -> R + 'static) -> Self {
        Self {
            focus: Focus::Elsewhere,
            renderer: Box::new(renderer),
            results: Vec::new(),
            cursor: None,
        }
    }

    pub fn state(&self) -> NavState {
        match self.focus {
            Focus::Input | Focus::Results => NavState::Active,
            Focus::Elsewhere => NavState::Inactive,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state() == NavState::Active
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Focus moved: into the input or results activates, anywhere else
    /// deactivates.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus != self.focus {
            tracing::trace!(from = ?self.focus, to = ?focus, "focus");
        }
        self.focus = focus;
    }

    /// Replace the rendered results with `hits`, cursor on the first one
    pub fn render(&mut self, hits: &[SearchHit<'_>]) {
        self.results = hits
            .iter()
            .map(|hit| {
                let view = hit.view();
                Rendered {
                    url: view.url.to_string(),
                    item: (self.renderer)(&view),
                }
            })
            .collect();
        self.cursor = if self.results.is_empty() { None } else { Some(0) };
    }

    pub fn results(&self) -> &[Rendered<R>] {
        &self.results
    }

    pub fn no_results(&self) -> bool {
        self.results.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn current(&self) -> Option<&Rendered<R>> {
        self.cursor.and_then(|i| self.results.get(i))
    }

    pub fn handle_key(&mut self, key: NavKey) -> KeyOutcome {
        match (self.state(), key) {
            (NavState::Inactive, NavKey::Slash) => {
                self.set_focus(Focus::Input);
                KeyOutcome::Handled
            }
            (NavState::Inactive, _) => KeyOutcome::Ignored,
            (NavState::Active, NavKey::Down) => {
                if let Some(cursor) = self.cursor {
                    if cursor + 1 < self.results.len() {
                        self.cursor = Some(cursor + 1);
                    }
                }
                KeyOutcome::Handled
            }
            (NavState::Active, NavKey::Up) => {
                if let Some(cursor) = self.cursor {
                    self.cursor = Some(cursor.saturating_sub(1));
                }
                KeyOutcome::Handled
            }
            (NavState::Active, NavKey::Enter) => {
                // Enter always hides the results, cursor or not
                self.set_focus(Focus::Elsewhere);
                match self.current() {
                    Some(result) => KeyOutcome::Navigate(result.url.clone()),
                    None => KeyOutcome::Handled,
                }
            }
            (NavState::Active, NavKey::Escape) => {
                self.set_focus(Focus::Elsewhere);
                KeyOutcome::Handled
            }
            (NavState::Active, NavKey::Tab) => {
                let next = match self.focus {
                    Focus::Input => Focus::Results,
                    _ => Focus::Input,
                };
                self.set_focus(next);
                KeyOutcome::Handled
            }
            // "/" is query text while active
            (NavState::Active, NavKey::Slash) => KeyOutcome::Ignored,
        }
    }

    /// Put the cursor on the `index`-th result (pointer selection)
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.results.len() {
            self.cursor = Some(index);
            true
        } else {
            false
        }
    }

    /// Search `query`, render synchronously and take the top result.
    ///
    /// Returns the URL navigated to, or `None` when nothing matched. Either
    /// way the controller ends INACTIVE.
    pub fn feeling_lucky(&mut self, session: &mut SearchSession<'_>, query: &str) -> Option<String> {
        self.set_focus(Focus::Input);
        let hits = session.search(query);
        self.render(&hits);
        match self.handle_key(NavKey::Enter) {
            KeyOutcome::Navigate(url) => Some(url),
            _ => None,
        }
    }
}
