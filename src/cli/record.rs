use std::{io::Write, sync::Arc};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{app::Application, capture::ScreenCapturer, utils::clock::Clock};

const BANNER_RULE: &str = "----------------";

/// Prints the banner and runs the logging loop until shutdown or `max_cycles`.
pub async fn start_logging(
    app: &Application,
    capturer: Box<dyn ScreenCapturer>,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
    out: &mut impl Write,
    max_cycles: Option<usize>,
) -> Result<()> {
    writeln!(out, "{BANNER_RULE}\nLogging Started.")?;
    writeln!(out, "Interval: {:?}", app.config.interval)?;
    writeln!(out, "Profile: {}", app.config.profile)?;
    writeln!(out, "Log Dir: {}", app.config.log_dir.display())?;
    writeln!(out, "{BANNER_RULE}\n")?;

    let cycles = app
        .recorder(capturer, clock, shutdown)
        .run(out, max_cycles)
        .await?;
    info!("Logging stopped after {cycles} cycles");
    Ok(())
}
