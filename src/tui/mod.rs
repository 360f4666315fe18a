//! Interactive terminal session for viewing a risk prediction.
//!
//! One text input for the user identifier and one action ("view results",
//! bound to Enter). Each action runs a full request through
//! [`run_request`](crate::pipeline::run_request) and re-renders from the
//! returned context; slider edits only re-render.
//!
//! # Usage
//!
//! ```rust,no_run
//! use peersense::advice::AdvicePolicy;
//! use peersense::model::load_model;
//! use peersense::sheets::{Authenticator, CredentialProvider, CredentialSource, SheetLocator, SheetsClient};
//! use peersense::tui::Session;
//!
//! let model = load_model("model.json".as_ref())?;
//! let key = CredentialSource::Env("GOOGLE_SERVICE_ACCOUNT_JSON".into()).load()?;
//! let locator = SheetLocator::new("1AbC", "IDS", "ID")?;
//! let mut sheets = SheetsClient::new(locator, Authenticator::new(key)?);
//!
//! let mut session = Session::new(AdvicePolicy::default())?;
//! session.run(&mut sheets, &model)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod actions;
pub mod app;
pub mod layout;
pub mod renderer;
pub mod theme;

#[cfg(test)]
pub(crate) mod fixtures;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;

use crate::advice::AdvicePolicy;
use crate::model::Classifier;
use crate::observability::{set_phase, set_tui_active, RequestPhase};
use crate::pipeline::run_request;
use crate::sheets::RecordSource;
use actions::{determine_action, Action};
use app::App;
use renderer::render_ui;

/// Owns the terminal for the lifetime of the session.
pub struct Session {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl Session {
    /// Switch the terminal into raw mode and the alternate screen.
    pub fn new(policy: AdvicePolicy) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        set_tui_active(true);

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            app: App::new(policy),
        })
    }

    /// Run the event loop until the user quits.
    ///
    /// Returns an error only for terminal failures and fatal request errors
    /// (credential rejection); every other request error is shown on screen.
    pub fn run<S, C>(&mut self, source: &mut S, classifier: &C) -> Result<()>
    where
        S: RecordSource + ?Sized,
        C: Classifier + ?Sized,
    {
        loop {
            {
                let _phase = set_phase(RequestPhase::Rendering);
                self.terminal.draw(|f| render_ui(f, &self.app))?;
            }

            if !event::poll(Duration::from_millis(100))? {
                continue;
            }
            let Event::Key(key) = event::read()? else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let Some(action) = determine_action(key, self.app.action_context()) else {
                continue;
            };
            if execute_action(&mut self.app, action, source, classifier)? {
                break;
            }
        }

        self.cleanup()
    }

    /// Clean up and restore terminal
    fn cleanup(&mut self) -> Result<()> {
        set_tui_active(false);
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Execute an action (imperative shell). Returns `true` to quit.
pub fn execute_action<S, C>(
    app: &mut App,
    action: Action,
    source: &mut S,
    classifier: &C,
) -> Result<bool>
where
    S: RecordSource + ?Sized,
    C: Classifier + ?Sized,
{
    match action {
        Action::Quit => return Ok(true),
        Action::InsertChar(c) => app.push_char(c),
        Action::DeleteChar => app.pop_char(),
        Action::ClearInput => app.clear_input(),
        Action::ToggleFocus => app.toggle_focus(),
        Action::SelectPrevious => app.select_previous(),
        Action::SelectNext => app.select_next(),
        Action::Adjust(delta) => app.adjust_selected(delta),
        Action::ViewResults => {
            let request = run_request(source, classifier, app.input());
            if let Some(err) = request.error().filter(|err| err.is_fatal()) {
                return Err(err.clone().into());
            }
            app.apply(request);
        }
    }
    Ok(false)
}
