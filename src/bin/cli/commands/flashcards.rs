use anyhow::Result;

use biolens_lib::study::FlashcardDeck;

use super::Input;
use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub async fn run(app: &App, topic: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (_, entry) = app.load_topic(topic).await?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entry.bundle.flashcards)?);
        return Ok(());
    }

    let mut deck = FlashcardDeck::new(entry.bundle.flashcards.clone());
    interact(&mut deck, &mut Input::new(), use_color).await
}

/// Flip and page through the deck until the student quits
pub async fn interact(deck: &mut FlashcardDeck, input: &mut Input, use_color: bool) -> Result<()> {
    if deck.is_empty() {
        println!("{}", terminal::render_card(deck, use_color));
        return Ok(());
    }

    loop {
        println!("{}", terminal::render_card(deck, use_color));
        let Some(command) = input.prompt("[f]lip  [n]ext  [p]revious  [q]uit > ").await? else {
            return Ok(());
        };
        match command.as_str() {
            "f" | "" => deck.flip(),
            "n" => deck.next(),
            "p" => deck.previous(),
            "q" => return Ok(()),
            other => println!("Unknown command: {}", other),
        }
    }
}
