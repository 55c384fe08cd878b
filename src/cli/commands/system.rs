use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "clear-data",
            "Delete every student and payment",
            "clear-data [--yes]",
            cmd_clear_data,
        ),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit),
    ]
}

fn cmd_clear_data(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let assume_yes = match args {
        [] => false,
        ["--yes"] | ["-y"] => true,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: clear-data [--yes]".into(),
            ))
        }
    };
    let prompt = "Are you sure you want to clear all data? This cannot be undone.";
    if !context.confirm(prompt, assume_yes)? {
        io::print_warning("Nothing cleared. Pass `--yes` to confirm.");
        return Ok(());
    }

    context.store.clear()?;
    context.session.clear_selection();
    io::print_success("All students and payments were removed.");
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(name) = args.first().map(|name| name.to_lowercase()) {
        if let Some(entry) = context.command(&name) {
            help::print_command(entry);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
