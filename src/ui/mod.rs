pub mod icons;
pub mod output;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, file_line, header, info, section, success, tag_line, tag_list, warn};
pub use table::{stats_table, tags_table, TableBuilder};
pub use theme::{theme, Theme};
