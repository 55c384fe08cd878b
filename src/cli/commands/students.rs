use crate::cli::core::{parse_amount, parse_date, parse_student_id, CommandError, CommandResult, ShellContext};
use crate::cli::formatting::{format_amount, format_date};
use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::CommandEntry;
use crate::core::services::{RecipientSelector, RosterEntry, RosterService};
use crate::domain::StudentDraft;
use crate::errors::LedgerError;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add-student",
            "Admit a new student",
            "add-student <name> <phone> <class> <admission YYYY-MM-DD> <monthly fee>",
            cmd_add_student,
        ),
        CommandEntry::new("list", "List students grouped by class", "list", cmd_list),
        CommandEntry::new("due", "List students with a payment due", "due", cmd_due),
        CommandEntry::new(
            "paid",
            "List students who are paid up",
            "paid",
            cmd_paid,
        ),
        CommandEntry::new(
            "history",
            "Show a student's payment history",
            "history <student id>",
            cmd_history,
        ),
    ]
}

pub(crate) fn due_count(context: &ShellContext) -> usize {
    RosterService::due_entries(context.store.students(), context.today()).len()
}

fn cmd_add_student(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [name, phone, class_name, admission, fee] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: add-student <name> <phone> <class> <admission YYYY-MM-DD> <monthly fee>"
                .into(),
        ));
    };
    let admission = parse_date(admission)?;
    let fee = parse_amount(fee)?;
    let draft = StudentDraft::new(*name, *phone, *class_name, Some(admission), fee);

    let now = context.clock.now();
    let student = context.store.add_student(draft, now)?;
    let entry = RosterService::entry(&student, context.today());
    io::print_success(format!(
        "Added {} (id {}). Next due {}.",
        student.name,
        student.id,
        format_date(entry.next_due)
    ));
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let students = context.store.students();
    if students.is_empty() {
        io::print_info("No students yet. Use `add-student` to admit one.");
        return Ok(());
    }
    for group in RosterService::by_class(students, context.today()) {
        output_section(format!("Class {}", group.class_name));
        for entry in &group.entries {
            io::print_info(describe(context, entry));
        }
    }
    Ok(())
}

fn cmd_due(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let due = RecipientSelector::select_due(context.store.students(), today);
    output_section(format!("Payments due ({})", due.len()));
    if due.is_empty() {
        io::print_info("No students with due payments.");
    }
    for student in due {
        io::print_info(describe(context, &RosterService::entry(student, today)));
    }
    Ok(())
}

fn cmd_paid(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let today = context.today();
    let paid = RecipientSelector::select_paid(context.store.students(), today);
    output_section(format!("Paid up ({})", paid.len()));
    if paid.is_empty() {
        io::print_info("No students with paid fees.");
    }
    for student in paid {
        io::print_info(describe(context, &RosterService::entry(student, today)));
    }
    Ok(())
}

fn cmd_history(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments(
            "usage: history <student id>".into(),
        ));
    };
    let id = parse_student_id(id)?;
    let student = context
        .store
        .student(id)
        .ok_or(LedgerError::NotFound(id))?;
    let symbol = context.currency();

    output_section(format!("Payments for {}", student.name));
    let payments = context.store.payments_for(id);
    if payments.is_empty() {
        io::print_info("No payments recorded.");
    }
    for payment in payments {
        io::print_info(format!(
            "  {}  {}  (#{})",
            payment.date.format("%d %b %Y %H:%M"),
            format_amount(payment.amount, symbol),
            payment.id
        ));
    }
    io::print_info(format!(
        "Total paid: {}",
        format_amount(student.total_paid, symbol)
    ));
    Ok(())
}

/// One listing line for a student.
pub(crate) fn describe(context: &ShellContext, entry: &RosterEntry<'_>) -> String {
    let student = entry.student;
    let symbol = context.currency();
    let marker = if context.session.is_selected(student.id) {
        '*'
    } else {
        ' '
    };
    format!(
        " {marker} [{}] {} | {} | fee {} | paid {} | next due {} | {}",
        student.id,
        student.name,
        student.phone,
        format_amount(student.monthly_fee, symbol),
        format_amount(student.total_paid, symbol),
        format_date(entry.next_due),
        entry.status
    )
}
