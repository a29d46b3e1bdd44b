//! Shared runtime state for CLI interactions and command execution.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::{
    cli::{
        commands,
        core::{CliError, CliMode, CommandError, LoopControl},
        output,
        registry::{CommandEntry, CommandRegistry},
    },
    config::{Config, ConfigManager},
    core::LedgerStore,
    storage::JsonStorage,
};

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: LedgerStore,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    /// Builds a context around the JSON ledger named by `config`.
    pub fn new(mode: CliMode, config_manager: ConfigManager, config: Config) -> Self {
        let path = config.ledger_path(config_manager.base_dir());
        let store = LedgerStore::new(Box::new(JsonStorage::new(path)));
        Self::with_store(mode, config_manager, config, store)
    }

    pub fn with_store(
        mode: CliMode,
        config_manager: ConfigManager,
        config: Config,
        store: LedgerStore,
    ) -> Self {
        Self {
            mode,
            registry: CommandRegistry::new(commands::all_definitions()),
            store,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.mode == CliMode::Interactive
    }

    pub fn prompt(&self) -> String {
        "invoices> ".to_string()
    }

    pub fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub fn money(&self, amount: f64) -> String {
        self.config.money(amount)
    }

    /// Prints where the ledger lives and what loading it had to repair.
    pub fn print_banner(&self) -> Result<(), CliError> {
        let report = self.store.inspect()?;
        if self.is_interactive() {
            output::section("Freelance Invoice Ledger");
            output::info(format!("Ledger: {}", self.store.storage().location()));
            output::info(format!("{} invoice(s) on file.", report.book.len()));
            output::hint("Type `help` to see available commands.");
        }
        for migration in &report.migrations {
            output::info(format!("Upgraded ledger: {migration}"));
        }
        for warning in &report.warnings {
            output::warning(warning);
        }
        Ok(())
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

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.suggest(input) {
            output::hint(format!("Did you mean `{}`?", name));
        }
    }

    /// Reports a failed command. Recoverable failures are printed and the shell
    /// keeps going; storage failures end the session.
    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::Ledger(err) if err.is_fatal() => {
                output::error(&err);
                Err(CliError::Ledger(err))
            }
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Ledger(err) => {
                output::warning(err);
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    /// Asks a yes/no question; script mode always answers yes.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if !self.is_interactive() {
            return Ok(true);
        }
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(CommandError::from)
    }

    pub(crate) fn prompt_text(
        &self,
        prompt: &str,
        allow_empty: bool,
    ) -> Result<String, CommandError> {
        Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(allow_empty)
            .interact_text()
            .map_err(CommandError::from)
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CommandError> {
        self.confirm("Exit shell?")
    }
}
