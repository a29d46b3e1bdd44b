use crate::cli::core::CommandResult;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::ShellContext;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "Show or change preferences",
        "config [<key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            output::info(format!("  file: {}", context.config_manager.path().display()));
            for key in Config::KEYS {
                output::info(format!("  {:<16} {}", key, context.config.get(key)?));
            }
            Ok(())
        }
        [key] => {
            output::info(format!("{} = {}", key, context.config.get(key)?));
            Ok(())
        }
        [key, value @ ..] => {
            let mut updated = context.config.clone();
            updated.set(key, &value.join(" "))?;
            context.config_manager.save(&updated)?;
            context.config = updated;
            output::success(format!("Saved `{key}`."));
            if *key == "ledger_file" {
                output::hint("The new ledger file is used from the next session.");
            }
            Ok(())
        }
    }
}
