//! Table output formatting

use tabled::{
    Table, Tabled,
    settings::{Alignment, Modify, Style, object::Rows},
};

use crate::host::MenuItem;

/// Menu entry for table display
#[derive(Tabled)]
pub struct MenuRow {
    #[tabled(rename = "ACTION")]
    id: String,
    #[tabled(rename = "TITLE")]
    title: String,
    #[tabled(rename = "SHOWN ON")]
    context: String,
}

impl From<MenuItem> for MenuRow {
    fn from(item: MenuItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            context: item.context.to_string(),
        }
    }
}

/// Format data as a table
pub fn format_table<T: Tabled>(data: &[T]) -> String {
    if data.is_empty() {
        return "No actions registered.".to_string();
    }

    let mut table = Table::new(data);
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));

    table.to_string()
}
