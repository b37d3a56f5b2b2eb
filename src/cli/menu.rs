use std::{io::Write, sync::Arc};

use anyhow::Result;
use tokio::io::AsyncBufRead;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::{app::Application, capture::ScreenCapturer, utils::clock::Clock};

use super::{console::Console, record::start_logging, timeline::timeline_flow};

pub const MENU_PROMPT: &str = "> '1' to Start logging, '2' to Generate timeline: ";

/// Creates the screen backend only once logging is chosen, so that timelines work on machines
/// without one.
pub type CapturerFactory = Box<dyn FnMut() -> Result<Box<dyn ScreenCapturer>>>;

/// The interactive driver. Loops over the top level menu until input ends or shutdown. Logging
/// only ends through shutdown, so choosing it ends the session as well.
pub struct Menu<'a, R, W> {
    app: &'a Application,
    console: &'a mut Console<R, W>,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
    capturer_factory: CapturerFactory,
}

impl<'a, R: AsyncBufRead + Unpin, W: Write> Menu<'a, R, W> {
    pub fn new(
        app: &'a Application,
        console: &'a mut Console<R, W>,
        clock: Arc<dyn Clock>,
        shutdown: CancellationToken,
        capturer_factory: CapturerFactory,
    ) -> Self {
        Self {
            app,
            console,
            clock,
            shutdown,
            capturer_factory,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let Some(action) = self.console.prompt(MENU_PROMPT).await? else {
                return Ok(());
            };
            match action.trim() {
                "1" => match (self.capturer_factory)() {
                    Ok(capturer) => {
                        return start_logging(
                            self.app,
                            capturer,
                            self.clock.clone(),
                            self.shutdown.clone(),
                            self.console.output(),
                            None,
                        )
                        .await;
                    }
                    Err(e) => {
                        error!("Failed to create screen capturer {e:?}");
                        self.console.say(format!("Can't start logging: {e}"))?;
                    }
                },
                "2" => {
                    timeline_flow(self.app, self.console, self.clock.as_ref(), &self.shutdown)
                        .await?
                }
                other => debug!("Ignoring menu input {other:?}"),
            }
        }
    }
}
