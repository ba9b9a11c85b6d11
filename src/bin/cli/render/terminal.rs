use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};

use biolens_lib::orchestrator::{FetchPhase, TopicViewState};
use biolens_lib::study::{
    CheckpointQuiz, FlashcardDeck, Gallery, NotebookPage, SidebarRow, VirtualLab,
};

const WIDTH: usize = 80;

/// ANSI color codes
#[allow(dead_code)]
pub struct Color;

#[allow(dead_code)]
impl Color {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const ITALIC: &str = "\x1b[3m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

/// Wrap `text` in `color` when colors are enabled
pub fn paint(text: &str, color: &str, use_color: bool) -> String {
    if use_color {
        format!("{}{}{}", color, text, Color::RESET)
    } else {
        text.to_string()
    }
}

/// Render markdown study notes to terminal text
pub fn render_markdown(markdown: &str, use_color: bool) -> String {
    let parser = Parser::new_ext(markdown, Options::ENABLE_STRIKETHROUGH);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut heading: Option<HeadingLevel> = None;
    let mut list_stack: Vec<Option<u64>> = Vec::new();
    let mut in_code_block = false;

    for event in parser {
        match event {
            Event::Start(Tag::Heading { level, .. }) => {
                flush(&mut lines, &mut current, "");
                heading = Some(level);
            }
            Event::End(TagEnd::Heading(_)) => {
                let hashes = "#".repeat(heading_depth(heading));
                let text = format!("{} {}", hashes, current.trim());
                lines.push(paint(&text, Color::BOLD, use_color));
                lines.push(String::new());
                current.clear();
                heading = None;
            }
            Event::End(TagEnd::Paragraph) => {
                if list_stack.is_empty() {
                    flush(&mut lines, &mut current, "");
                    lines.push(String::new());
                }
            }
            Event::Start(Tag::List(first)) => {
                flush(&mut lines, &mut current, "");
                list_stack.push(first);
            }
            Event::End(TagEnd::List(_)) => {
                list_stack.pop();
                if list_stack.is_empty() {
                    lines.push(String::new());
                }
            }
            Event::Start(Tag::Item) => {
                flush(&mut lines, &mut current, "");
                let indent = "  ".repeat(list_stack.len().saturating_sub(1));
                let bullet = match list_stack.last_mut() {
                    Some(Some(n)) => {
                        let bullet = format!("{}. ", n);
                        *n += 1;
                        bullet
                    }
                    _ => "\u{2022} ".to_string(),
                };
                current.push_str(&indent);
                current.push_str(&bullet);
            }
            Event::End(TagEnd::Item) => {
                flush(&mut lines, &mut current, "");
            }
            Event::Start(Tag::CodeBlock(_)) => {
                flush(&mut lines, &mut current, "");
                in_code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                lines.push(String::new());
            }
            Event::Start(Tag::Strong) | Event::End(TagEnd::Strong) => {
                if use_color && heading.is_none() {
                    current.push_str(if matches!(event, Event::Start(_)) {
                        Color::BOLD
                    } else {
                        Color::RESET
                    });
                }
            }
            Event::Start(Tag::Emphasis) | Event::End(TagEnd::Emphasis) => {
                if use_color && heading.is_none() {
                    current.push_str(if matches!(event, Event::Start(_)) {
                        Color::ITALIC
                    } else {
                        Color::RESET
                    });
                }
            }
            Event::Code(text) => {
                current.push_str(&paint(&text, Color::CYAN, use_color));
            }
            Event::Text(text) => {
                if in_code_block {
                    for line in text.lines() {
                        lines.push(format!("    {}", paint(line, Color::CYAN, use_color)));
                    }
                } else {
                    current.push_str(&text);
                }
            }
            Event::SoftBreak => current.push(' '),
            Event::HardBreak => flush(&mut lines, &mut current, ""),
            Event::Rule => {
                flush(&mut lines, &mut current, "");
                lines.push(paint(&"\u{2500}".repeat(WIDTH / 2), Color::DIM, use_color));
            }
            _ => {}
        }
    }
    flush(&mut lines, &mut current, "");

    while lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

fn heading_depth(level: Option<HeadingLevel>) -> usize {
    match level {
        Some(HeadingLevel::H1) | None => 1,
        Some(HeadingLevel::H2) => 2,
        Some(HeadingLevel::H3) => 3,
        Some(HeadingLevel::H4) => 4,
        Some(HeadingLevel::H5) => 5,
        Some(HeadingLevel::H6) => 6,
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String, prefix: &str) {
    if !current.trim().is_empty() {
        lines.extend(wrap_lines(current, prefix, WIDTH));
    }
    current.clear();
}

/// Simple word-wrapping for terminal output
fn wrap_lines(text: &str, prefix: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let effective_width = max_width.saturating_sub(prefix.len());

    for line in text.lines() {
        if line.chars().count() <= effective_width {
            lines.push(format!("{}{}", prefix, line));
            continue;
        }
        let indent: String = line.chars().take_while(|c| c.is_whitespace()).collect();
        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line = format!("{}{}", indent, word);
            } else if current_line.chars().count() + 1 + word.chars().count() <= effective_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                lines.push(format!("{}{}", prefix, current_line));
                current_line = format!("{}  {}", indent, word);
            }
        }
        if !current_line.is_empty() {
            lines.push(format!("{}{}", prefix, current_line));
        }
    }

    lines
}

/// Notes tab: title, date, figure gallery, then the notes
pub fn render_notebook(page: &NotebookPage<'_>, date_label: &str, use_color: bool) -> String {
    let mut out = Vec::new();
    out.push(paint(page.title, Color::BOLD, use_color));
    out.push(paint(date_label, Color::GRAY, use_color));
    out.push(String::new());

    match page.gallery() {
        Gallery::Generating { placeholders } => {
            for _ in 0..placeholders {
                out.push(paint("[ Generating diagram... ]", Color::DIM, use_color));
            }
            out.push(String::new());
        }
        Gallery::Figures(images) => {
            for (i, image) in images.iter().enumerate() {
                out.push(format!(
                    "{} {} {}",
                    paint(&format!("Figure {}.", i + 1), Color::GREEN, use_color),
                    image.caption,
                    paint(&format!("({})", image.describe_source()), Color::GRAY, use_color)
                ));
            }
            out.push(String::new());
        }
        Gallery::Empty => {}
    }

    out.push(render_markdown(page.notes, use_color));
    out.join("\n")
}

pub fn render_card(deck: &FlashcardDeck, use_color: bool) -> String {
    let (Some(label), Some(face)) = (deck.position_label(), deck.visible_face()) else {
        return "No flashcards available for this topic.".to_string();
    };
    let side = if deck.is_flipped() { "Definition" } else { "Term" };
    let color = if deck.is_flipped() { Color::GREEN } else { Color::BLUE };
    format!(
        "{}\n{}\n\n  {}\n",
        paint(&label, Color::GRAY, use_color),
        paint(side, Color::DIM, use_color),
        paint(face, color, use_color)
    )
}

fn option_letter(index: usize) -> char {
    (b'A' + index as u8) as char
}

/// One question with its options, marked up with feedback once submitted
pub fn render_question(quiz: &CheckpointQuiz, index: usize, use_color: bool) -> String {
    let Some(question) = quiz.questions().get(index) else {
        return String::new();
    };
    let mut out = vec![paint(
        &format!("{}. {}", index + 1, question.question()),
        Color::BOLD,
        use_color,
    )];
    let feedback = quiz.feedback(index);
    let selected = quiz.answer(index);

    for (i, option) in question.options().iter().enumerate() {
        let line = format!("   {}) {}", option_letter(i), option);
        let line = match &feedback {
            Some(f) if i == f.correct_index => paint(&format!("{}  \u{2713}", line), Color::GREEN, use_color),
            Some(_) if selected == Some(i) => paint(&format!("{}  \u{2717}", line), Color::RED, use_color),
            Some(_) => paint(&line, Color::DIM, use_color),
            None if selected == Some(i) => paint(&format!("{}  <", line), Color::CYAN, use_color),
            None => line,
        };
        out.push(line);
    }

    if let Some(feedback) = feedback {
        let verdict = if feedback.is_correct {
            paint("Correct!", Color::GREEN, use_color)
        } else {
            paint("Incorrect", Color::RED, use_color)
        };
        out.push(format!("   {} {}", verdict, feedback.explanation));
    }
    out.join("\n")
}

/// `[#####-----] 50%`
pub fn progress_bar(percent: u8, width: usize) -> String {
    let filled = (usize::from(percent.min(100)) * width + 50) / 100;
    format!(
        "[{}{}] {}%",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent
    )
}

pub fn render_lab_briefing(lab: &VirtualLab, use_color: bool) -> String {
    let guide = lab.guide();
    let mut out = vec![
        paint(&guide.title, Color::BOLD, use_color),
        format!("Objective: {}", guide.objective),
        String::new(),
        paint("Safety First", Color::YELLOW, use_color),
        format!("  {}", guide.safety),
        String::new(),
        paint("Materials", Color::BOLD, use_color),
    ];
    out.extend(guide.materials.iter().map(|m| format!("  \u{2022} {}", m)));
    out.join("\n")
}

pub fn render_lab_procedure(lab: &VirtualLab, use_color: bool) -> String {
    let mut out = vec![paint("Procedure", Color::BOLD, use_color)];
    for (i, step) in lab.guide().procedure.iter().enumerate() {
        let line = if lab.is_step_done(i) {
            paint(&format!("  [x] {}. {}", i + 1, step), Color::DIM, use_color)
        } else {
            format!("  [ ] {}. {}", i + 1, step)
        };
        out.push(line);
    }
    out.push(String::new());
    out.push(progress_bar(lab.progress(), 20));
    if lab.is_complete() {
        out.push(paint(
            "Experiment complete! Great job following the procedure.",
            Color::GREEN,
            use_color,
        ));
    }
    out.join("\n")
}

pub fn render_sidebar(rows: &[SidebarRow], use_color: bool) -> String {
    rows.iter()
        .map(|row| match row {
            SidebarRow::Unit {
                unit,
                expanded,
                current,
            } => {
                let marker = if *expanded { "\u{25be}" } else { "\u{25b8}" };
                let line = format!("{} {}", marker, unit.name);
                if *current {
                    paint(&line, Color::BOLD, use_color)
                } else {
                    line
                }
            }
            SidebarRow::Topic { topic, current, .. } => {
                let line = format!("    {:<5} {}", topic.id, topic.name);
                if *current {
                    paint(&format!("{}  <", line), Color::GREEN, use_color)
                } else {
                    line
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One status line describing the published fetch state
pub fn render_status(state: &TopicViewState, use_color: bool) -> String {
    let topic = state
        .selection
        .as_ref()
        .map(|s| s.topic_name.as_str())
        .unwrap_or("No topic selected");
    match state.phase {
        FetchPhase::Idle => paint(topic, Color::GRAY, use_color),
        FetchPhase::FetchingText => paint(
            &format!("{}: generating study materials...", topic),
            Color::YELLOW,
            use_color,
        ),
        FetchPhase::ImagesFetching => paint(
            &format!("{}: notes ready, generating diagrams ({} done)...", topic, state.images.len()),
            Color::YELLOW,
            use_color,
        ),
        FetchPhase::Ready => paint(&format!("{}: ready", topic), Color::GREEN, use_color),
        FetchPhase::Failed => paint(
            &format!(
                "Error Loading Content: {} (type `retry` to try again)",
                state.error.as_deref().unwrap_or("unknown error")
            ),
            Color::RED,
            use_color,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_markdown_plain() {
        let rendered = render_markdown(
            "# Mitosis\n\nCells **divide** in stages:\n\n1. Prophase\n2. Metaphase\n\n- spindle\n",
            false,
        );
        assert_eq!(
            rendered,
            "# Mitosis\n\nCells divide in stages:\n\n1. Prophase\n2. Metaphase\n\n\u{2022} spindle"
        );
    }

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0, 10), "[----------] 0%");
        assert_eq!(progress_bar(50, 10), "[#####-----] 50%");
        assert_eq!(progress_bar(100, 4), "[####] 100%");
    }

    #[test]
    fn test_wrap_lines() {
        let text = "one two three four five";
        assert_eq!(wrap_lines(text, "", 9), vec!["one two", "  three", "  four", "  five"]);
    }
}
