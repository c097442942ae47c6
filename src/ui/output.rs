use crate::model::{File, Tag};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::SEARCH, text.style(theme().header.clone()));
}

pub fn success(label: &str) {
    println!("{} {}", Icons::CHECK, label.style(theme().success.clone()));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, label.style(theme().error.clone()));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, label.style(theme().warn.clone()));
}

pub fn info(label: &str, value: &str) {
    eprintln!("{} {}: {}", Icons::INFO, label.style(theme().dim.clone()), value);
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().header.clone()));
}

/// `a, b, c` with each name styled as a tag
pub fn tag_list(tags: &[Tag]) -> String {
    tags.iter()
        .map(|t| t.name.style(theme().tag.clone()).to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `path ( a, b )`
pub fn file_line(file: &File) {
    println!("{} ( {} )", file.path.style(theme().path.clone()), tag_list(&file.tags));
}

/// `name (count)`
pub fn tag_line(tag: &Tag) {
    println!("{} ({})", tag.name.style(theme().tag.clone()), tag.count.style(theme().count.clone()));
}
