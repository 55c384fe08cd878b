use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;

use crate::{
    config::Config,
    core::{Clock, LedgerStore, Session},
    messaging::MessagingGateway,
};

use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub session: Session,
    pub config: Config,
    pub gateway: Box<dyn MessagingGateway>,
    pub clock: Box<dyn Clock>,
    pub theme: ColorfulTheme,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    /// Reference day used for every due-date decision made by a command.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn currency(&self) -> &str {
        &self.config.currency_symbol
    }

    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, selected: {} }}",
            self.running,
            self.last_command,
            self.session.selected().len()
        )
    }
}
