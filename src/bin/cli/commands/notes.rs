use anyhow::Result;

use biolens_lib::study::NotebookPage;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub async fn run(app: &App, topic: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let (selection, entry) = app.load_topic(topic).await?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&*entry)?);
        }
        OutputFormat::Plain => {
            let page = NotebookPage {
                title: &selection.topic_name,
                notes: &entry.bundle.notes,
                images: &entry.images,
                image_loading: false,
            };
            let date = NotebookPage::date_label(chrono::Local::now().date_naive());
            println!("{}", terminal::render_notebook(&page, &date, use_color));
        }
    }

    Ok(())
}
