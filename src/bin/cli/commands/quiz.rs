use anyhow::Result;

use biolens_lib::study::CheckpointQuiz;

use super::Input;
use crate::app::App;
use crate::render::terminal::{self, paint, Color};
use crate::OutputFormat;

pub async fn run(app: &App, topic: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (_, entry) = app.load_topic(topic).await?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entry.bundle.checkpoints)?);
        return Ok(());
    }

    let mut quiz = CheckpointQuiz::new(entry.bundle.checkpoints.clone());
    interact(&mut quiz, &mut Input::new(), use_color).await
}

/// Parse "B" or "2" into an option index
fn parse_option(answer: &str) -> Option<usize> {
    let mut chars = answer.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => {
            Some((c.to_ascii_uppercase() as u8 - b'A') as usize)
        }
        _ => answer.parse::<usize>().ok()?.checked_sub(1),
    }
}

/// Ask every question, check the answers, and offer a reset
pub async fn interact(quiz: &mut CheckpointQuiz, input: &mut Input, use_color: bool) -> Result<()> {
    if quiz.is_empty() {
        println!("No checkpoint questions available for this topic.");
        return Ok(());
    }

    loop {
        if quiz.is_submitted() {
            for i in 0..quiz.len() {
                println!("{}\n", terminal::render_question(quiz, i, use_color));
            }
            let score = quiz.score();
            let color = if score.is_perfect() { Color::GREEN } else { Color::YELLOW };
            println!("{}", paint(&score.to_string(), color, use_color));

            let Some(command) = input.prompt("[r]eset  [q]uit > ").await? else {
                return Ok(());
            };
            match command.as_str() {
                "r" => quiz.reset(),
                "q" => return Ok(()),
                other => println!("Unknown command: {}", other),
            }
            continue;
        }

        let Some(question) = (0..quiz.len()).find(|&i| quiz.answer(i).is_none()) else {
            if let Err(e) = quiz.submit() {
                println!("{}", e);
            }
            continue;
        };

        println!("{}", terminal::render_question(quiz, question, use_color));
        let Some(answer) = input.prompt("Your answer (q to quit) > ").await? else {
            return Ok(());
        };
        if answer == "q" {
            return Ok(());
        }
        match parse_option(&answer) {
            Some(option) => {
                if let Err(e) = quiz.select(question, option) {
                    println!("{}", e);
                }
            }
            None => println!("Answer with a letter (A-D) or a number"),
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_option() {
        assert_eq!(parse_option("a"), Some(0));
        assert_eq!(parse_option("C"), Some(2));
        assert_eq!(parse_option("2"), Some(1));
        assert_eq!(parse_option("0"), None);
        assert_eq!(parse_option("maybe"), None);
    }
}
