use crate::templates::PROMPT_TEMPLATES;
use colored::Colorize;
use prettytable::{format, Table};

/// Build the quick prompt table
pub fn templates_table() -> Table {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_BORDERS_ONLY);

    table.add_row(prettytable::row!["ID".bold(), "Title".bold(), "Prompt".bold()]);

    for template in PROMPT_TEMPLATES {
        table.add_row(prettytable::row![
            template.id.cyan(),
            template.title,
            template.prompt
        ]);
    }

    table
}

/// Print the quick prompts
pub fn list_templates() {
    println!("\nQuick Prompts:");
    templates_table().printstd();
    println!();
    println!(
        "Use {} in the chat shell to send one.",
        "/prompt <ID|Title>".cyan()
    );
    println!();
}
