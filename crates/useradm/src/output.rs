use crate::cli::OutputFormat;
use crate::views::{UserRow, COLUMNS};
use colored::{ColoredString, Colorize};
use serde::Serialize;
use user_core::{User, UserStatus};

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

/// Print the user table, or the raw user array as JSON
pub fn output_table(users: &[User], rows: &[UserRow], format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(users) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => print!("{}", render_table(rows)),
    }
}

/// Render rows as an aligned text table. Header is always printed.
pub fn render_table(rows: &[UserRow]) -> String {
    let mut widths: Vec<usize> = COLUMNS.iter().map(|c| c.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row.cells.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = COLUMNS
        .iter()
        .zip(&widths)
        .map(|(name, width)| pad(name, *width).bold().to_string())
        .collect();
    out.push_str(header.join("  ").trim_end());
    out.push('\n');

    for row in rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .zip(&widths)
            .enumerate()
            .map(|(i, (cell, width))| style_cell(i, &pad(cell, *width)).to_string())
            .collect();
        out.push_str(cells.join("  ").trim_end());
        out.push('\n');
    }

    if rows.is_empty() {
        out.push_str(&"No users found.".dimmed().to_string());
        out.push('\n');
    }

    out
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn style_cell(column: usize, padded: &str) -> ColoredString {
    match COLUMNS[column] {
        "user_name" => padded.cyan().bold(),
        "user_status" => match padded.trim_end().parse::<UserStatus>() {
            Ok(status) => style_status(status, padded),
            Err(_) => padded.normal(),
        },
        "actions" => padded.dimmed(),
        _ => padded.normal(),
    }
}

fn style_status(status: UserStatus, text: &str) -> ColoredString {
    match status {
        UserStatus::Active => text.green(),
        UserStatus::Inactive => text.yellow(),
        UserStatus::Terminated => text.red(),
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for User {
    fn display(&self) -> String {
        format!(
            "{} ({}) - {} {}\n  {}: {}\n  {}: {}\n  {}: {}",
            self.user_name.cyan().bold(),
            self.user_id.to_string().dimmed(),
            self.first_name.white().bold(),
            self.last_name.white().bold(),
            "Email".dimmed(),
            self.email,
            "Status".dimmed(),
            style_status(
                self.user_status,
                &format!("{} ({})", self.user_status.label(), self.user_status.code())
            ),
            "Department".dimmed(),
            self.department
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, name: &str) -> UserRow {
        UserRow {
            user_id: id,
            cells: [
                name.to_string(),
                "Test".to_string(),
                "User".to_string(),
                format!("{}@example.com", name),
                "A".to_string(),
                "Engineering".to_string(),
                format!("update {} | delete {}", id, id),
            ],
        }
    }

    #[test]
    fn table_has_header_and_one_line_per_row() {
        colored::control::set_override(false);
        let table = render_table(&[row(1, "alice"), row(2, "bob")]);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("user_name"));
        assert!(lines[0].ends_with("actions"));
        assert!(lines[1].contains("alice@example.com"));
        assert!(lines[2].ends_with("update 2 | delete 2"));
    }

    #[test]
    fn columns_are_aligned() {
        colored::control::set_override(false);
        let table = render_table(&[row(1, "a"), row(2, "a-much-longer-name")]);
        let lines: Vec<&str> = table.lines().collect();
        let first = lines[1].find("Test").unwrap();
        let second = lines[2].find("Test").unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_table_says_so() {
        colored::control::set_override(false);
        let table = render_table(&[]);
        assert!(table.contains("No users found."));
        assert_eq!(table.lines().count(), 2);
    }
}
