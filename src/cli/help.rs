use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Commands");
    for entry in registry.list() {
        let label = match entry.aliases {
            [] => entry.name.to_string(),
            aliases => format!("{} ({})", entry.name, aliases.join(", ")),
        };
        io::print_info(format!("  {label:<18} {}", entry.description));
    }
    io::print_hint("`help <command>` shows usage.");
}

pub fn print_command(entry: &CommandEntry) {
    output_section(entry.name);
    io::print_info(entry.description);
    io::print_info(format!("  usage: {}", entry.usage));
    if !entry.aliases.is_empty() {
        io::print_info(format!("  aliases: {}", entry.aliases.join(", ")));
    }
}
