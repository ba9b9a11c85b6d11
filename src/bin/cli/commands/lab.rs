use anyhow::Result;

use biolens_lib::study::VirtualLab;

use super::Input;
use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub async fn run(app: &App, topic: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (_, entry) = app.load_topic(topic).await?;

    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(&entry.bundle.lab)?);
        return Ok(());
    }

    let mut lab = VirtualLab::new(entry.bundle.lab.clone());
    interact(&mut lab, &mut Input::new(), use_color).await
}

/// Briefing first, then tick off procedure steps by number
pub async fn interact(lab: &mut VirtualLab, input: &mut Input, use_color: bool) -> Result<()> {
    println!("{}\n", terminal::render_lab_briefing(lab, use_color));

    if !lab.is_started() {
        println!("Review the materials and safety guidelines before starting the procedure.");
        let Some(answer) = input.prompt("Start experiment? [Y/n] > ").await? else {
            return Ok(());
        };
        if answer.eq_ignore_ascii_case("n") {
            return Ok(());
        }
        lab.start();
    }

    loop {
        println!("\n{}", terminal::render_lab_procedure(lab, use_color));
        let Some(command) = input.prompt("Step number to toggle (q to quit) > ").await? else {
            return Ok(());
        };
        if command == "q" {
            return Ok(());
        }
        match command.parse::<usize>().ok().and_then(|n| n.checked_sub(1)) {
            Some(step) => {
                if let Err(e) = lab.toggle_step(step) {
                    println!("{}", e);
                }
            }
            None => println!("Enter a step number"),
        }
    }
}
