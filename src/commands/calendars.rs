use anyhow::Result;
use calview_core::calview::Calview;
use owo_colors::OwoColorize;

pub fn run(mut calview: Calview, default: Option<&str>) -> Result<()> {
    if let Some(slug) = default {
        calview.set_default_calendar(slug)?;
        println!("Default calendar set to '{slug}'");
        return Ok(());
    }

    let calendars = calview.calendars();
    if calendars.is_empty() {
        println!(
            "{}",
            format!("No calendars found in {}", calview.display_path().display()).dimmed()
        );
        return Ok(());
    }

    let tz = calview.timezone()?;
    let default = calview.default_calendar();

    let mut lines = Vec::new();
    for calendar in &calendars {
        let count = calendar.events(tz)?.len();
        let label = if count == 1 {
            "1 event".to_string()
        } else {
            format!("{count} events")
        };

        // Pad before styling so escape codes don't count against the width.
        let slug = format!("{:<16}", calendar.slug);
        let mut line = format!("{} {}", slug.bold(), label.dimmed());
        if default.as_ref().is_some_and(|d| d.slug == calendar.slug) {
            line.push_str(&format!(" {}", "(default)".green()));
        }
        lines.push(line);
    }

    println!("{}", lines.join("\n"));

    Ok(())
}
