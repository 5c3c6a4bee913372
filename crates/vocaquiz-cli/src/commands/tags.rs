//! The `vocaquiz tags` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use vocaquiz_core::model::Tag;
use vocaquiz_sources::load_config_from;

use super::open_source;

pub async fn execute(
    source: Option<String>,
    deck: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let item_source = open_source(&config, source.as_deref(), deck)?;

    let tags = item_source.list_tags().await?;
    println!("{}", render_tags(&tags));

    Ok(())
}

fn render_tags(tags: &[Tag]) -> String {
    if tags.is_empty() {
        return "No tags found.".to_string();
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for tag in tags {
        table.add_row(vec![Cell::new(&tag.id), Cell::new(&tag.name)]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_table() {
        let rendered = render_tags(&[
            Tag {
                id: "7d1e".into(),
                name: "animals".into(),
            },
            Tag {
                id: "9a0c".into(),
                name: "kitchen".into(),
            },
        ]);
        assert!(rendered.contains("ID"));
        assert!(rendered.contains("animals"));
        assert!(rendered.contains("9a0c"));
    }

    #[test]
    fn empty_list() {
        assert_eq!(render_tags(&[]), "No tags found.");
    }
}
