use serde::Serialize;
use std::io::{self, Write};

#[derive(clap::Args, Clone, Debug, Default)]
pub struct Output {
    /// How to format CLI output
    #[clap(global = true, short, long, value_enum)]
    pub output: Option<OutputType>,
}

#[derive(clap::ValueEnum, Debug, Copy, Clone, PartialEq)]
pub enum OutputType {
    /// Format output as compact JSON with items separated by newlines
    Json,
    /// Format output as YAML
    Yaml,
    /// Format the output as a pretty-printed table
    Table,
}

impl Output {
    /// Resolve the OutputType, which defaults to a table when stdout is
    /// a terminal and YAML otherwise.
    pub fn output_type(&self) -> OutputType {
        use crossterm::tty::IsTty;

        match self.output {
            Some(ty) => ty,
            None if std::io::stdout().is_tty() => OutputType::Table,
            None => OutputType::Yaml,
        }
    }
}

/// A trait for things that can be output from the CLI as either JSON, YAML, or a table.
/// JSON and YAML are handled by `Serialize`, so this trait describes only the table.
pub trait CliOutput: Serialize {
    /// Returns the column headers of the table.
    fn table_headers() -> Vec<&'static str>;

    /// Converts this item into a row, in the same order as `table_headers`.
    fn into_table_row(self) -> Vec<String>;
}

pub fn print_all<T: CliOutput>(
    output_type: OutputType,
    items: impl IntoIterator<Item = T>,
) -> anyhow::Result<()> {
    match output_type {
        OutputType::Json => print_json(items),
        OutputType::Yaml => print_yaml(items),
        OutputType::Table => print_table(items),
    }
}

pub fn print_yaml(items: impl IntoIterator<Item = impl CliOutput>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for item in items {
        serde_yaml::to_writer(&mut stdout, &item)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn print_json(items: impl IntoIterator<Item = impl CliOutput>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    for item in items {
        serde_json::to_writer(&mut stdout, &item)?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn print_table<T: CliOutput>(items: impl IntoIterator<Item = T>) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();

    for line in render_table(items).lines() {
        stdout.write_all(line.as_bytes())?;
        stdout.write_all(b"\n")?;
    }
    Ok(())
}

pub fn render_table<T: CliOutput>(items: impl IntoIterator<Item = T>) -> comfy_table::Table {
    let mut table = new_table(T::table_headers());

    for item in items {
        table.add_row(item.into_table_row());
    }
    table
}

// new_table builds a comfy_table with UTF8 styling.
fn new_table(headers: Vec<&str>) -> comfy_table::Table {
    let mut table = comfy_table::Table::new();
    table
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .apply_modifier(comfy_table::modifiers::UTF8_SOLID_INNER_BORDERS);

    table.set_header(headers);
    table
}

impl CliOutput for virtual_queue::Queue {
    fn table_headers() -> Vec<&'static str> {
        vec!["Queue ID", "Name", "Open", "Next Open", "Max Party"]
    }

    fn into_table_row(self) -> Vec<String> {
        vec![
            self.queue_id,
            self.name,
            if self.is_accepting_joins { "yes" } else { "no" }.to_string(),
            self.next_scheduled_open_time.unwrap_or_default(),
            self.max_party_size.to_string(),
        ]
    }
}

impl CliOutput for virtual_queue::Guest {
    fn table_headers() -> Vec<&'static str> {
        vec!["Guest ID", "Name", "Primary", "Preselected"]
    }

    fn into_table_row(self) -> Vec<String> {
        let flag = |b: bool| if b { "*" } else { "" }.to_string();
        vec![
            self.guest_id,
            format!("{} {}", self.first_name, self.last_name),
            flag(self.is_primary_guest),
            flag(self.is_preselected),
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_queue_table() {
        let queue = virtual_queue::Queue {
            queue_id: "q1".to_string(),
            name: "Tron".to_string(),
            is_accepting_joins: false,
            next_scheduled_open_time: Some("13:00:00".to_string()),
            max_party_size: 6,
            how_to_enter_message: String::new(),
        };
        let table = render_table([queue]).force_no_tty().to_string();

        assert!(table.contains("Queue ID"));
        assert!(table.contains("Tron"));
        assert!(table.contains("13:00:00"));
    }
}
