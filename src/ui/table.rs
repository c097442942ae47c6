use crate::model::{StoreStats, Tag};
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct TableRow {
    #[tabled(rename = "Metric")]
    pub metric: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

#[derive(Tabled)]
struct TagRow {
    #[tabled(rename = "Tag")]
    name: String,
    #[tabled(rename = "Files")]
    count: u64,
}

#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<TableRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(TableRow {
            metric: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }
        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

pub fn stats_table(stats: &StoreStats) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Files", &stats.files.to_string());
    builder.add_row("Tags", &stats.tags.to_string());
    builder.add_row("Associations", &stats.associations.to_string());
    builder.build()
}

/// Tags in the order given, one row each
pub fn tags_table(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return String::new();
    }
    let rows: Vec<TagRow> = tags
        .iter()
        .map(|t| TagRow { name: t.name.clone(), count: t.count })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}
