use std::{fmt::Display, io::Write};

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio_util::sync::CancellationToken;

/// Line based operator console. Reading gives up as soon as shutdown is requested.
pub struct Console<R, W> {
    lines: Lines<R>,
    output: W,
    shutdown: CancellationToken,
}

impl Console<BufReader<Stdin>, std::io::Stdout> {
    pub fn stdio(shutdown: CancellationToken) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            shutdown,
        )
    }
}

impl<R: AsyncBufRead + Unpin, W: Write> Console<R, W> {
    pub fn new(input: R, output: W, shutdown: CancellationToken) -> Self {
        Self {
            lines: input.lines(),
            output,
            shutdown,
        }
    }

    /// Prints `text` without a line break and waits for an answer. [None] means the session is
    /// over, either because input ended or because of shutdown.
    pub async fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        tokio::select! {
            biased;
            _ = self.shutdown.cancelled() => Ok(None),
            line = self.lines.next_line() => Ok(line?),
        }
    }

    pub fn say(&mut self, text: impl Display) -> Result<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }
}
