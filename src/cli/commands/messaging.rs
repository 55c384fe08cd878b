use crate::cli::core::{parse_student_id, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::services::{RecipientSelector, RosterService};
use crate::errors::LedgerError;
use crate::messaging::{DeliveryStatus, RecipientGroup};

use super::students::describe;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "select",
            "Toggle students in the messaging selection",
            "select <student id>...",
            cmd_select,
        ),
        CommandEntry::new(
            "selection",
            "Show the students currently selected",
            "selection",
            cmd_selection,
        ),
        CommandEntry::new(
            "message",
            "Send a message to due, paid or selected students",
            "message <due|paid|selected> <text...>",
            cmd_message,
        ),
    ]
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        return Err(CommandError::InvalidArguments(
            "usage: select <student id>...".into(),
        ));
    }
    let ids = args
        .iter()
        .map(|arg| parse_student_id(arg))
        .collect::<Result<Vec<_>, _>>()?;
    if let Some(missing) = ids.iter().find(|id| context.store.student(**id).is_none()) {
        return Err(LedgerError::NotFound(*missing).into());
    }

    for id in ids {
        let name = context
            .store
            .student(id)
            .map(|student| student.name.clone())
            .unwrap_or_default();
        if context.session.toggle(id) {
            io::print_success(format!("Selected {name}."));
        } else {
            io::print_info(format!("Deselected {name}."));
        }
    }
    io::print_info(format!("{} student(s) selected.", context.session.selected().len()));
    Ok(())
}

fn cmd_selection(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let selected = RecipientSelector::select_by_ids(context.store.students(), context.session.selected());
    output_section(format!("Selected ({})", selected.len()));
    if selected.is_empty() {
        io::print_info("No students selected.");
    }
    for student in selected {
        io::print_info(describe(context, &RosterService::entry(student, today)));
    }
    Ok(())
}

fn cmd_message(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some((group, words)) = args.split_first() else {
        return Err(CommandError::InvalidArguments(
            "usage: message <due|paid|selected> <text...>".into(),
        ));
    };
    let group: RecipientGroup = group.parse()?;
    let body = words.join(" ");

    let request = RecipientSelector::compose(
        group,
        context.store.students(),
        context.session.selected(),
        &body,
        context.today(),
    )?;
    let report = RecipientSelector::send(context.gateway.as_ref(), &mut context.session, &request)?;

    for outcome in &report.outcomes {
        match &outcome.status {
            DeliveryStatus::Rejected(reason) => {
                io::print_warning(format!("{}: {}", outcome.phone, reason))
            }
            DeliveryStatus::Simulated => {
                io::print_info(format!("  [simulated] {}", outcome.phone))
            }
            DeliveryStatus::Accepted => io::print_info(format!("  {}", outcome.phone)),
        }
    }
    if let Some(handoff) = &report.handoff {
        io::print_info(format!("Open in your messaging app: {handoff}"));
    }

    if report.is_success() {
        io::print_success(format!(
            "Message sent to {} recipient(s).",
            report.delivered_count()
        ));
        Ok(())
    } else {
        Err(LedgerError::Dispatch("no recipient accepted the message".into()).into())
    }
}
