pub mod app;
pub mod navigation;
#[cfg(feature = "interactive")]
mod ui;

pub use app::App;
pub use navigation::{Focus, KeyOutcome, NavKey, NavState, NavigationController, Rendered};

#[cfg(feature = "interactive")]
pub use interactive::run;

#[cfg(feature = "interactive")]
mod interactive {
    use super::app::App;
    use super::navigation::NavKey;
    use super::ui;
    use crate::query::SearchSession;
    use anyhow::Result;
    use crossterm::{
        event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    };
    use ratatui::widgets::ListItem;
    use ratatui::{backend::CrosstermBackend, Terminal};
    use std::io;

    /// Run the interactive search. Returns the URL chosen with Enter.
    pub fn run(session: SearchSession<'_>, initial_query: Option<String>) -> Result<Option<String>> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let mut app = App::new(session, ui::render_result);
        if let Some(query) = initial_query {
            app.set_query(&query);
        }

        let result = run_app(&mut terminal, &mut app);

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result.map(|_| app.navigated)
    }

    fn run_app(
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        app: &mut App<'_, ListItem<'static>>,
    ) -> Result<()> {
        while !app.should_quit {
            terminal.draw(|f| ui::draw(f, app))?;

            // Search runs synchronously per keystroke; block until the next event
            let Event::Key(key) = event::read()? else {
                continue;
            };
            // Windows reports both press and release
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match (key.modifiers, key.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c')) => return Ok(()),
                (KeyModifiers::CONTROL, KeyCode::Char('w')) => app.delete_word(),
                (KeyModifiers::CONTROL, KeyCode::Char('n')) => app.handle_key(NavKey::Down),
                (KeyModifiers::CONTROL, KeyCode::Char('p')) => app.handle_key(NavKey::Up),
                (_, KeyCode::Down) => app.handle_key(NavKey::Down),
                (_, KeyCode::Up) => app.handle_key(NavKey::Up),
                (_, KeyCode::Enter) => app.handle_key(NavKey::Enter),
                (_, KeyCode::Esc) => app.handle_key(NavKey::Escape),
                (_, KeyCode::Tab | KeyCode::BackTab) => app.handle_key(NavKey::Tab),
                (_, KeyCode::Backspace) => app.backspace(),
                (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => app.input_char(c),
                _ => {}
            }
        }
        Ok(())
    }
}
