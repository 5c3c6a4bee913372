//! The `vocaquiz init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("vocaquiz.toml").exists() {
        println!("vocaquiz.toml already exists, skipping.");
    } else {
        std::fs::write("vocaquiz.toml", SAMPLE_CONFIG)?;
        println!("Created vocaquiz.toml");
    }

    std::fs::create_dir_all("decks")?;
    let example_path = Path::new("decks/example.toml");
    if example_path.exists() {
        println!("decks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_DECK)?;
        println!("Created decks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Set VOCAQUIZ_ACCESS_TOKEN to use the words API");
    println!("  2. Run: vocaquiz validate --deck decks/example.toml");
    println!("  3. Run: vocaquiz quiz --deck decks/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# vocaquiz configuration

default_source = "local"
default_direction = "en_pl"

[sources.api]
type = "http"
base_url = "http://localhost:3000"
access_token = "${VOCAQUIZ_ACCESS_TOKEN}"
page_size = 100
timeout_secs = 30

[sources.local]
type = "deck"
path = "decks/example.toml"
"#;

const EXAMPLE_DECK: &str = r#"[deck]
name = "Example"
description = "A few words to get started"

[[words]]
id = "cat"
word = "cat"
translation = "kot"
examples = ["The cat is sleeping on the sofa."]
tags = ["animals"]

[[words]]
id = "dog"
word = "dog"
translation = "pies"
examples = ["My dog loves long walks."]
tags = ["animals"]

[[words]]
id = "spoon"
word = "spoon"
translation = "łyżka"
tags = ["kitchen"]

[[words]]
id = "window"
word = "window"
translation = "okno"
"#;
