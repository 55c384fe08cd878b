pub mod messaging;
pub mod payments;
pub mod students;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(students::definitions());
    commands.extend(payments::definitions());
    commands.extend(messaging::definitions());
    commands.extend(system::definitions());
    commands
}
