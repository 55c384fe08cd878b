use crate::cli::core::{parse_amount, parse_student_id, CommandError, CommandResult, ShellContext};
use crate::cli::formatting::format_amount;
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "pay",
        "Record a fee payment for a student",
        "pay <student id> <amount>",
        cmd_pay,
    )]
}

fn cmd_pay(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id, amount] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: pay <student id> <amount>".into(),
        ));
    };
    let id = parse_student_id(id)?;
    let amount = parse_amount(amount)?;

    let now = context.clock.now();
    let payment = context.store.record_payment(id, amount, now)?;
    let symbol = context.currency();
    if let Some(student) = context.store.student(id) {
        io::print_success(format!(
            "Recorded {} for {}. Total paid {}.",
            format_amount(payment.amount, symbol),
            student.name,
            format_amount(student.total_paid, symbol)
        ));
    }
    Ok(())
}
