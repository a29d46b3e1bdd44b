pub mod config;
pub mod invoice;
pub mod system;

use crate::cli::registry::CommandEntry;

pub(crate) fn all_definitions() -> Vec<CommandEntry> {
    let mut commands = Vec::new();
    commands.extend(invoice::definitions());
    commands.extend(config::definitions());
    commands.extend(system::definitions());
    commands
}
