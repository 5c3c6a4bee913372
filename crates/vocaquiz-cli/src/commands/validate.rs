//! The `vocaquiz validate` command.

use std::path::PathBuf;

use anyhow::Result;

pub fn execute(deck_path: PathBuf) -> Result<()> {
    let deck = vocaquiz_core::deck::parse_deck(&deck_path)?;
    println!("Deck: {} ({} words)", deck.name, deck.entries.len());

    let warnings = vocaquiz_core::deck::validate_deck(&deck);
    for w in &warnings {
        let prefix = w
            .word_id
            .as_ref()
            .map(|id| format!("  [{id}]"))
            .unwrap_or_else(|| "  ".to_string());
        println!("{prefix} WARNING: {}", w.message);
    }

    if warnings.is_empty() {
        println!("Deck is valid.");
    } else {
        println!("\n{} warning(s) found.", warnings.len());
    }

    Ok(())
}
