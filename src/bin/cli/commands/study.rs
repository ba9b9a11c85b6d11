use std::io::Write;
use std::sync::Arc;

use anyhow::Result;

use biolens_lib::orchestrator::TopicViewState;
use biolens_lib::study::{NotebookPage, Sidebar, StudyTab, StudyViews};
use biolens_lib::{TopicContentOrchestrator, TopicSelection, CURRICULUM};

use super::{flashcards, lab, quiz, Input};
use crate::app::{resolve_topic, App};
use crate::render::terminal::{self, paint, Color};

const HELP: &str = "\
Commands:
  units               show the curriculum sidebar
  open <unit>         expand or collapse a unit (e.g. open 3)
  go <topic>          study a topic by id or name (e.g. go 2.4)
  notes | flashcards | checkpoints | lab
                      switch tab
  show                show the current tab again
  retry               retry the current topic after an error
  help                show this help
  quit                leave the session";

/// Views of the topic whose content is currently shown
type TopicViews = Option<(TopicSelection, StudyViews)>;

pub async fn run(app: &App, use_color: bool) -> Result<()> {
    let orchestrator = app.orchestrator()?;
    let mut state_rx = orchestrator.subscribe();
    let mut sidebar = Sidebar::new(CURRICULUM);
    let mut tab = StudyTab::Notes;
    let mut views: TopicViews = None;
    let mut input = Input::new();

    println!("{}\n", HELP);
    println!("{}", terminal::render_sidebar(&sidebar.rows(), use_color));

    loop {
        print!("\nbiolens [{}]> ", tab.label());
        std::io::stdout().flush()?;

        tokio::select! {
            changed = state_rx.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let state = state_rx.borrow_and_update().clone();
                println!("\n{}", terminal::render_status(&state, use_color));
                refresh_views(&state, &mut views);
                if state.is_ready() && tab == StudyTab::Notes {
                    show_notes(&state, use_color);
                }
            }
            line = input.next_line() => {
                let Some(line) = line? else {
                    return Ok(());
                };
                let (command, arg) = match line.split_once(' ') {
                    Some((command, arg)) => (command, arg.trim()),
                    None => (line.as_str(), ""),
                };

                match command {
                    "" => {}
                    "help" | "?" => println!("{}", HELP),
                    "quit" | "q" | "exit" => return Ok(()),
                    "units" | "sidebar" => {
                        println!("{}", terminal::render_sidebar(&sidebar.rows(), use_color));
                    }
                    "open" => {
                        let unit_id = if arg.chars().all(|c| c.is_ascii_digit()) {
                            format!("unit-{}", arg)
                        } else {
                            arg.to_string()
                        };
                        sidebar.toggle_unit(&unit_id);
                        println!("{}", terminal::render_sidebar(&sidebar.rows(), use_color));
                    }
                    "go" => match resolve_topic(arg) {
                        Ok((unit, topic)) => {
                            let selection = sidebar.select(unit, topic);
                            spawn_select(&orchestrator, selection);
                        }
                        Err(e) => println!("{}", paint(&e.to_string(), Color::RED, use_color)),
                    },
                    "retry" => spawn_retry(&orchestrator),
                    "show" => {
                        show_tab(tab, &orchestrator, &mut views, &mut input, use_color).await?;
                    }
                    other => match other.parse::<StudyTab>() {
                        Ok(selected) => {
                            tab = selected;
                            show_tab(tab, &orchestrator, &mut views, &mut input, use_color).await?;
                        }
                        Err(_) => println!("Unknown command: {} (type `help`)", other),
                    },
                }
            }
        }
    }
}

/// Keep the interactive views in step with the published content
fn refresh_views(state: &TopicViewState, views: &mut TopicViews) {
    match (&state.selection, &state.content) {
        (Some(selection), Some(bundle)) => {
            if views.as_ref().map_or(true, |(shown, _)| shown != selection) {
                *views = Some((selection.clone(), StudyViews::from_bundle(bundle)));
            }
        }
        _ => *views = None,
    }
}

fn show_notes(state: &TopicViewState, use_color: bool) {
    if let Some(page) = NotebookPage::from_state(state) {
        let date = NotebookPage::date_label(chrono::Local::now().date_naive());
        println!("\n{}", terminal::render_notebook(&page, &date, use_color));
    }
}

async fn show_tab(
    tab: StudyTab,
    orchestrator: &TopicContentOrchestrator,
    views: &mut TopicViews,
    input: &mut Input,
    use_color: bool,
) -> Result<()> {
    let state = orchestrator.state();
    refresh_views(&state, views);

    let Some((_, views)) = views.as_mut() else {
        println!("{}", terminal::render_status(&state, use_color));
        return Ok(());
    };

    match tab {
        StudyTab::Notes => show_notes(&state, use_color),
        StudyTab::Flashcards => flashcards::interact(&mut views.deck, input, use_color).await?,
        StudyTab::Checkpoints => quiz::interact(&mut views.quiz, input, use_color).await?,
        StudyTab::Lab => lab::interact(&mut views.lab, input, use_color).await?,
    }
    Ok(())
}

/// Fetch in the background; a newer selection supersedes this one
fn spawn_select(orchestrator: &Arc<TopicContentOrchestrator>, selection: TopicSelection) {
    let orchestrator = Arc::clone(orchestrator);
    tokio::spawn(async move {
        if let Err(e) = orchestrator.select(selection).await {
            log::debug!("Topic fetch ended without content: {}", e);
        }
    });
}

fn spawn_retry(orchestrator: &Arc<TopicContentOrchestrator>) {
    let orchestrator = Arc::clone(orchestrator);
    tokio::spawn(async move {
        match orchestrator.retry().await {
            None => println!("Select a topic first (go <topic>)"),
            Some(Err(e)) => log::debug!("Retry ended without content: {}", e),
            Some(Ok(_)) => {}
        }
    });
}
