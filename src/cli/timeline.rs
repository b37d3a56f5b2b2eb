use std::io::Write;

use anyhow::{anyhow, Result};
use chrono::NaiveDate;
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{
    app::Application,
    model::summarize::TimelineGenerator,
    utils::{clock::Clock, time::parse_day},
};

use super::{console::Console, until_shutdown};

pub const TIMELINE_PROMPT: &str = "> '1' to list available logs, or Enter date (YYYY-MM-DD): ";
pub const REVIEW_PROMPT: &str = "> '1' to save, '2' to regenerate: ";
pub const GENERATION_FAILED: &str = "Error generating timeline";

/// Timeline branch of the menu: list logs, or generate a timeline for a date and let the
/// operator save or regenerate it.
pub async fn timeline_flow<R: AsyncBufRead + Unpin, W: Write>(
    app: &Application,
    console: &mut Console<R, W>,
    clock: &dyn Clock,
    shutdown: &CancellationToken,
) -> Result<()> {
    let Some(answer) = console.prompt(TIMELINE_PROMPT).await? else {
        return Ok(());
    };
    if answer.trim() == "1" {
        return print_available_logs(app, console.output()).await;
    }

    let date = match parse_day(&answer, clock.time()) {
        Ok(v) => v,
        Err(e) => {
            console.say(e)?;
            return Ok(());
        }
    };

    let generator = app.timeline_generator();
    let Some(draft) = generate(&generator, date, shutdown, console.output()).await? else {
        return Ok(());
    };
    review(app, &generator, date, draft, console, shutdown).await
}

/// Offers save or regenerate until the operator saves. Only saving touches the timeline file.
async fn review<R: AsyncBufRead + Unpin, W: Write>(
    app: &Application,
    generator: &TimelineGenerator,
    date: NaiveDate,
    mut draft: String,
    console: &mut Console<R, W>,
    shutdown: &CancellationToken,
) -> Result<()> {
    loop {
        let Some(choice) = console.prompt(REVIEW_PROMPT).await? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => match app.timelines.save(date, &draft).await {
                Ok(path) => {
                    console.say(format!("Timeline saved to {}", path.display()))?;
                    return Ok(());
                }
                Err(e) => {
                    error!("Failed to save timeline {e:?}");
                    console.say(format!("Failed to save timeline: {e}"))?;
                }
            },
            "2" => {
                let regenerated = generate(generator, date, shutdown, console.output()).await?;
                if let Some(timeline) = regenerated {
                    draft = timeline;
                } else if shutdown.is_cancelled() {
                    return Ok(());
                }
            }
            other => debug!("Ignoring review input {other:?}"),
        }
    }
}

/// Generates and prints a timeline. [None] covers both failure, which is reported to `out`,
/// and shutdown.
async fn generate(
    generator: &TimelineGenerator,
    date: NaiveDate,
    shutdown: &CancellationToken,
    out: &mut impl Write,
) -> Result<Option<String>> {
    match until_shutdown(shutdown, generator.generate(date)).await {
        None => Ok(None),
        Some(Ok(timeline)) => {
            writeln!(out, "{timeline}")?;
            Ok(Some(timeline))
        }
        Some(Err(e)) => {
            writeln!(out, "{GENERATION_FAILED}: {e}")?;
            Ok(None)
        }
    }
}

pub async fn print_available_logs(app: &Application, out: &mut impl Write) -> Result<()> {
    let days = app.activity_log.list_days().await?;
    if days.is_empty() {
        writeln!(out, "No activity logs in {}", app.config.log_dir.display())?;
        return Ok(());
    }
    writeln!(out, "> Available logs: ")?;
    for day in days {
        writeln!(out, "{day}")?;
    }
    Ok(())
}

/// Non interactive `timeline` command. Failures become errors so that the exit code reflects
/// them.
pub async fn process_timeline_command(
    app: &Application,
    date: &str,
    save: bool,
    clock: &dyn Clock,
    shutdown: &CancellationToken,
    out: &mut impl Write,
) -> Result<()> {
    let date = parse_day(date, clock.time())?;
    let Some(result) = until_shutdown(shutdown, app.timeline_generator().generate(date)).await
    else {
        return Ok(());
    };
    let timeline = result.map_err(|e| anyhow!("{GENERATION_FAILED}: {e}"))?;
    writeln!(out, "{timeline}")?;
    if save {
        let path = app.timelines.save(date, &timeline).await?;
        writeln!(out, "Timeline saved to {}", path.display())?;
    }
    Ok(())
}
