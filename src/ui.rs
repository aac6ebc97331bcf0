// UI layer: the single lookup form. `Shell` owns the input field and the
// output area; `run` draws them in the terminal with `dialoguer` and
// routes the Check / Clear actions back into the shell.

use crate::api::{self, LookupClient};
use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use dialoguer::{Input, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{stdout, Write};
use std::time::Duration;

pub const TITLE: &str = "Abo Hany Bot";
pub const FIELD_LABEL: &str = "Enter Serial Number or IMEI";
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter a Serial Number or IMEI.";

/// State of the form: what is typed in the field and what the output area
/// shows. The display only ever holds the latest outcome.
pub struct Shell {
    client: LookupClient,
    input: String,
    display: String,
}

impl Shell {
    pub fn new(client: LookupClient) -> Self {
        Shell {
            client,
            input: String::new(),
            display: String::new(),
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Replace the field contents, as if the user retyped it.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Check action. Blank input short-circuits with a prompt message and
    /// no request; anything else performs one blocking lookup and replaces
    /// the display with the rendered outcome.
    pub fn check(&mut self) {
        let identifier = self.input.trim();
        if identifier.is_empty() {
            log::debug!("check skipped: empty identifier");
            self.display = EMPTY_INPUT_MESSAGE.to_string();
            return;
        }

        log::debug!("check: looking up {identifier:?}");
        let outcome = self.client.lookup(identifier);
        self.display = api::render(&outcome);
    }

    /// Clear action: empties both the field and the output area.
    pub fn clear(&mut self) {
        log::debug!("clear");
        self.input.clear();
        self.display.clear();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Edit,
    Check,
    Clear,
    Exit,
}

impl Action {
    const ALL: [Action; 4] = [Action::Edit, Action::Check, Action::Clear, Action::Exit];

    fn label(self) -> &'static str {
        match self {
            Action::Edit => FIELD_LABEL,
            Action::Check => "Check",
            Action::Clear => "Clear",
            Action::Exit => "Exit",
        }
    }
}

/// Main interactive loop. Redraws the form after every action and returns
/// when the user picks "Exit".
///
/// A lookup runs on this thread, so the menu is not shown again until the
/// service answers.
pub fn run(mut shell: Shell) -> Result<()> {
    let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();
    let mut selected = 0;

    loop {
        redraw(&shell)?;
        selected = Select::new()
            .items(&labels)
            .default(selected)
            .interact()?;

        match Action::ALL[selected] {
            Action::Edit => {
                let text: String = Input::new()
                    .with_prompt(FIELD_LABEL)
                    .with_initial_text(shell.input().to_string())
                    .allow_empty(true)
                    .interact_text()?;
                shell.set_input(text);
                // Jump straight to "Check" after editing.
                selected = 1;
            }
            Action::Check => {
                let spinner = ProgressBar::new_spinner();
                spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
                spinner.set_message("Checking...");
                spinner.enable_steady_tick(Duration::from_millis(100));
                shell.check();
                spinner.finish_and_clear();
            }
            Action::Clear => shell.clear(),
            Action::Exit => break,
        }
    }
    Ok(())
}

/// Wipe the terminal and print the form, so the output area is always
/// replaced rather than appended to.
fn redraw(shell: &Shell) -> Result<()> {
    let mut out = stdout();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    write!(out, "{}", render_form(shell))?;
    out.flush()?;
    Ok(())
}

fn render_form(shell: &Shell) -> String {
    let rule = "-".repeat(TITLE.len().max(40));
    format!(
        "{TITLE}\n{rule}\n{FIELD_LABEL}: {}\n{rule}\n{}\n{rule}\n",
        shell.input(),
        shell.display()
    )
}
