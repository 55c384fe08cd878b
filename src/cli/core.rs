//! Core CLI loop, dispatch, and shell context helpers.

use std::io;

use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigError, ConfigManager},
    core::{utils::PathResolver, Clock, LedgerStore, LoadReport, Session, SystemClock},
    errors::LedgerError,
    storage::json_backend::JsonFileStore,
};

use super::commands;
use super::io as cli_io;
use super::output;
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Opens the ledger under the resolved home directory and wires up the
    /// configured gateway.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config = ConfigManager::with_base_dir(&base)?.load()?;
        let storage = JsonFileStore::new(config.resolve_data_dir(&base))?;
        let (store, report) = LedgerStore::open(Box::new(storage));
        let context = Self::with_parts(mode, store, config, Box::new(SystemClock));
        context.report_load(&report);
        Ok(context)
    }

    pub fn with_parts(
        mode: CliMode,
        store: LedgerStore,
        config: Config,
        clock: Box<dyn Clock>,
    ) -> Self {
        output::set_color_enabled(config.ui_color_enabled && mode == CliMode::Interactive);

        let mut registry = CommandRegistry::new();
        for entry in commands::all_definitions() {
            registry.register(entry);
        }
        registry.alias("quit", "exit");

        Self {
            mode,
            registry,
            gateway: config.gateway.build(),
            session: Session::new(config.operator.clone()),
            store,
            config,
            clock,
            theme: ColorfulTheme::default(),
            last_command: None,
            running: true,
        }
    }

    fn report_load(&self, report: &LoadReport) {
        for warning in &report.warnings {
            cli_io::print_warning(warning);
        }
        let overdue = commands::students::due_count(self);
        if overdue > 0 {
            tracing::info!(overdue, "students with payments due");
        }
        if self.mode == CliMode::Interactive {
            cli_io::print_info(format!(
                "Loaded {} student(s) and {} payment(s).",
                report.students, report.payments
            ));
        }
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn prompt(&self) -> String {
        let selected = self.session.selected().len();
        let who = self.session.operator().unwrap_or("fees");
        if selected > 0 {
            format!("{who} [{selected} selected]> ")
        } else {
            format!("{who}> ")
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    #[cfg(test)]
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match crate::cli::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err);
                return Ok(LoopControl::Continue);
            }
        };
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&head.to_lowercase(), head, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let best = self
            .registry
            .names()
            .map(|name| (levenshtein(name, input), name))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_info(format!("Suggestion: `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    /// Asks before a destructive action. Script mode never prompts, so
    /// callers must pass `--yes` there.
    pub(crate) fn confirm(&self, prompt: &str, assume_yes: bool) -> Result<bool, CommandError> {
        if assume_yes {
            return Ok(true);
        }
        match self.mode {
            CliMode::Script => Ok(false),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(LedgerError::Persistence(message)) => {
                cli_io::print_error(format!("Could not save the ledger: {message}"));
                cli_io::print_hint("The change is kept in memory for this session.");
                Ok(())
            }
            other => {
                cli_io::print_error(other.to_string());
                Ok(())
            }
        }
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{}` (use YYYY-MM-DD)", input))
    })
}

pub(crate) fn parse_student_id(input: &str) -> Result<i64, CommandError> {
    input
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid student id `{}`", input)))
}

pub(crate) fn parse_amount(input: &str) -> Result<f64, CommandError> {
    input
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| CommandError::InvalidArguments(format!("invalid amount `{}`", input)))
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Failures that stop the shell itself.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        match err {
            CommandError::Ledger(inner) => CliError::Ledger(inner),
            other => CliError::Command(other.to_string()),
        }
    }
}

#[cfg(test)]
pub(crate) fn process_script(
    store: LedgerStore,
    clock: Box<dyn Clock>,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_parts(CliMode::Script, store, Config::default(), clock);
    for line in lines {
        match app.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => app.report_error(err)?,
        }
    }
    Ok(app)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::core::FixedClock;
    use crate::storage::{BlobStore, MemoryStore};

    fn clock(y: i32, m: u32, d: u32) -> Box<dyn Clock> {
        Box::new(FixedClock(Utc.with_ymd_and_hms(y, m, d, 9, 30, 0).unwrap()))
    }

    fn empty_store() -> LedgerStore {
        LedgerStore::new(Box::new(MemoryStore::new()))
    }

    #[test]
    fn add_then_pay_updates_the_ledger() {
        let mut app = process_script(
            empty_store(),
            clock(2024, 3, 16),
            &[
                "add-student \"Asha Rao\" 9800000001 5 2024-01-15 500",
                "list",
            ],
        )
        .unwrap();
        let id = app.store.students()[0].id;

        app.process_line(&format!("pay {id} 500")).unwrap();
        let student = app.store.student(id).unwrap();
        assert_eq!(student.name, "Asha Rao");
        assert_eq!(student.total_paid, 500.0);
        assert_eq!(
            student.last_payment_date,
            NaiveDate::from_ymd_opt(2024, 3, 16)
        );
        assert_eq!(app.store.payments_for(id).len(), 1);
    }

    #[test]
    fn invalid_arguments_do_not_mutate() {
        let app = process_script(
            empty_store(),
            clock(2024, 3, 16),
            &[
                "add-student Asha 9800000001 5 15/01/2024 500",
                "add-student Asha 9800000001 5 2024-01-15 0",
                "add-student Asha",
                "pay 1 100",
            ],
        )
        .unwrap();
        assert!(app.store.students().is_empty());
        assert!(app.store.payments().is_empty());
    }

    #[test]
    fn select_toggles_and_message_clears_selection() {
        let mut app = process_script(
            empty_store(),
            clock(2024, 3, 16),
            &["add-student Asha 9800000001 5 2024-01-15 500"],
        )
        .unwrap();
        let id = app.store.students()[0].id;

        app.process_line(&format!("select {id}")).unwrap();
        assert!(app.session.is_selected(id));

        app.process_line("message selected \"Fees due soon\"")
            .unwrap();
        assert!(app.session.selected().is_empty());
    }

    #[test]
    fn message_to_empty_group_reports_validation_error() {
        let mut app = process_script(empty_store(), clock(2024, 3, 16), &[]).unwrap();
        let err = app.process_line("message selected hello").unwrap_err();
        assert!(err.to_string().contains("No students selected."));
    }

    #[test]
    fn clear_data_requires_yes_in_script_mode() {
        let storage = Arc::new(MemoryStore::new());
        let store = LedgerStore::new(Box::new(storage.clone()));
        let mut app = process_script(
            store,
            clock(2024, 3, 16),
            &["add-student Asha 9800000001 5 2024-01-15 500", "clear-data"],
        )
        .unwrap();
        assert_eq!(app.store.students().len(), 1);

        app.process_line("clear-data --yes").unwrap();
        assert!(app.store.students().is_empty());
        assert_eq!(storage.read(crate::core::STUDENTS_KEY).unwrap(), None);
    }

    #[test]
    fn exit_and_quit_stop_the_loop() {
        let mut app = process_script(empty_store(), clock(2024, 3, 16), &[]).unwrap();
        assert_eq!(app.process_line("exit").unwrap(), LoopControl::Exit);
        assert_eq!(app.process_line("QUIT").unwrap(), LoopControl::Exit);
        assert_eq!(app.process_line("lsit").unwrap(), LoopControl::Continue);
    }

    #[test]
    fn history_for_unknown_student_is_not_found() {
        let mut app = process_script(empty_store(), clock(2024, 3, 16), &[]).unwrap();
        let err = app.process_line("history 42").unwrap_err();
        assert!(matches!(err, CommandError::Ledger(LedgerError::NotFound(42))));
    }
}
