//! Output formatting for CLI

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use serde::Serialize;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Default)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Plain text format
    Plain,
}

/// Trait for items that can be displayed in a table
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

/// Render a list of items in the given format.
pub fn format_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(items).unwrap_or_default(),
        OutputFormat::Yaml => serde_yaml::to_string(items).unwrap_or_default(),
        _ if items.is_empty() => "No test cases found.".to_string(),
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic);

            table.set_header(T::headers());
            for item in items {
                table.add_row(item.row());
            }

            table.to_string()
        }
        OutputFormat::Plain => {
            let mut out = Vec::new();
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push("---".to_string());
                }
                let row = item.row();
                for (header, value) in T::headers().iter().zip(row.iter()) {
                    out.push(format!("{}: {}", header, value));
                }
            }
            out.join("\n")
        }
    }
}

/// Print a list of items
pub fn print_list<T: Serialize + TableDisplay>(items: &[T], format: OutputFormat) {
    println!("{}", format_list(items, format));
}

/// Print success message
pub fn print_success(message: &str) {
    println!("✅ {}", message);
}

/// Print error message
pub fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

/// Print warning message
pub fn print_warning(message: &str) {
    eprintln!("⚠️  {}", message);
}

/// Print info message
pub fn print_info(message: &str) {
    eprintln!("ℹ️  {}", message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Serialize)]
    struct Row {
        id: String,
        title: String,
    }

    impl TableDisplay for Row {
        fn headers() -> Vec<&'static str> {
            vec!["ID", "Title"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.id.clone(), self.title.clone()]
        }
    }

    fn rows() -> Vec<Row> {
        vec![
            Row { id: "TC-1".into(), title: "Login".into() },
            Row { id: "TC-2".into(), title: "Logout".into() },
        ]
    }

    #[test]
    fn test_format_list_json_and_yaml() {
        let json: serde_json::Value =
            serde_json::from_str(&format_list(&rows(), OutputFormat::Json)).unwrap();
        assert_eq!(json[1]["title"], "Logout");

        let yaml = format_list(&rows(), OutputFormat::Yaml);
        assert!(yaml.contains("- id: TC-1"));
    }

    #[test]
    fn test_format_list_plain_and_table() {
        let plain = format_list(&rows(), OutputFormat::Plain);
        assert_eq!(plain, "ID: TC-1\nTitle: Login\n---\nID: TC-2\nTitle: Logout");

        let table = format_list(&rows(), OutputFormat::Table);
        assert!(table.contains("TC-2"));
        assert!(table.contains("Title"));
    }

    #[test]
    fn test_format_empty_list() {
        let empty: Vec<Row> = Vec::new();
        assert_eq!(format_list(&empty, OutputFormat::Table), "No test cases found.");
        assert_eq!(format_list(&empty, OutputFormat::Json), "[]");
    }
}
