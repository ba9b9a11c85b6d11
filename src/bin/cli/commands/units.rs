use anyhow::Result;

use biolens_lib::CURRICULUM;

use crate::render::terminal::{paint, Color};
use crate::OutputFormat;

pub fn run(format: &OutputFormat, use_color: bool) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(CURRICULUM)?);
        }
        OutputFormat::Plain => {
            for unit in CURRICULUM {
                println!("{}", paint(unit.name, Color::BOLD, use_color));
                for topic in unit.topics {
                    println!("  {}  {}", paint(topic.id, Color::GRAY, use_color), topic.name);
                }
                println!();
            }
        }
    }

    Ok(())
}
