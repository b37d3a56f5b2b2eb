//! The continuous logging loop: capture, describe, append, sleep, until interrupted.

pub mod shutdown;

use std::{io::Write, sync::Arc, time::Duration};

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, info_span, Instrument};

use crate::{
    capture::{encode::encode_jpeg_base64, ScreenCapturer},
    model::describe::ScreenDescriber,
    storage::{activity_log::ActivityLogStore, entities::ActivityEntry},
    utils::clock::Clock,
};

#[derive(Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    Logged(ActivityEntry),
    Failed,
}

pub struct ActivityRecorder {
    capturer: Box<dyn ScreenCapturer>,
    describer: ScreenDescriber,
    activity_log: ActivityLogStore,
    clock: Arc<dyn Clock>,
    shutdown: CancellationToken,
    interval: Duration,
    jpeg_quality: u8,
}

impl ActivityRecorder {
    pub fn new(
        capturer: Box<dyn ScreenCapturer>,
        describer: ScreenDescriber,
        activity_log: ActivityLogStore,
        clock: Arc<dyn Clock>,
        shutdown: CancellationToken,
        interval: Duration,
        jpeg_quality: u8,
    ) -> Self {
        Self {
            capturer,
            describer,
            activity_log,
            clock,
            shutdown,
            interval,
            jpeg_quality,
        }
    }

    async fn describe_screen(&mut self) -> Result<String> {
        let screenshot = self
            .capturer
            .capture()
            .inspect_err(|e| error!("Screen capture failed {e:?}"))?;
        let image = encode_jpeg_base64(screenshot, self.jpeg_quality)
            .inspect_err(|e| error!("Failed to encode screenshot {e:?}"))?;
        debug!("Encoded screenshot into {} base64 bytes", image.base64.len());
        Ok(self.describer.describe(image).await?)
    }

    /// Runs a single cycle. Returns [None] when shutdown arrived before the description did, in
    /// which case nothing was written.
    pub async fn run_cycle(&mut self) -> Option<CycleOutcome> {
        let shutdown = self.shutdown.clone();
        let description = tokio::select! {
            biased;
            _ = shutdown.cancelled() => return None,
            description = self.describe_screen() => description,
        };

        let description = match description {
            Ok(v) => v,
            // Already logged where it happened.
            Err(e) => {
                debug!("Cycle skipped: {e}");
                return Some(CycleOutcome::Failed);
            }
        };

        // The append itself is never raced against shutdown.
        let entry = ActivityEntry::new(self.clock.time(), description);
        match self.activity_log.append(&entry).await {
            Ok(()) => {
                info!("Logged activity");
                Some(CycleOutcome::Logged(entry))
            }
            Err(e) => {
                error!("Failed to store description {e:?}");
                Some(CycleOutcome::Failed)
            }
        }
    }

    /// Executes the logging loop until shutdown, or until `max_cycles` cycles ran. Progress is
    /// reported to `out`. Returns the number of completed cycles.
    pub async fn run(
        mut self,
        out: &mut impl Write,
        max_cycles: Option<usize>,
    ) -> Result<usize> {
        let mut cycles = 0;
        loop {
            let span = info_span!("Logging cycle", cycle = cycles + 1);
            let Some(outcome) = self.run_cycle().instrument(span).await else {
                return Ok(cycles);
            };
            cycles += 1;

            match outcome {
                CycleOutcome::Logged(entry) => writeln!(
                    out,
                    "Logged activity at {}",
                    entry.moment.format("%H:%M:%S")
                )?,
                CycleOutcome::Failed => writeln!(out, "Logging failed!")?,
            }

            if max_cycles.is_some_and(|max| cycles >= max) {
                return Ok(cycles);
            }

            tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => return Ok(cycles),
                _ = self.clock.sleep(self.interval) => (),
            }
        }
    }
}

#[cfg(test)]
mod recorder_tests {
    use std::{
        io,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use chrono::{DateTime, Local, TimeZone};
    use image::{Rgba, RgbaImage};
    use tempfile::tempdir;
    use tokio::time::Instant;
    use tokio_util::sync::CancellationToken;

    use crate::{
        capture::MockScreenCapturer,
        model::{describe::ScreenDescriber, MockModelClient, ModelError},
        storage::{activity_log::ActivityLogStore, entities::ActivityEntry},
        utils::{clock::Clock, logging::TEST_LOGGING},
    };

    use super::{ActivityRecorder, CycleOutcome};

    #[derive(Clone)]
    struct TestClock {
        start_time: DateTime<Local>,
        reference: Instant,
    }

    impl TestClock {
        fn at(start_time: DateTime<Local>) -> Self {
            Self {
                start_time,
                reference: Instant::now(),
            }
        }
    }

    #[async_trait]
    impl Clock for TestClock {
        fn time(&self) -> DateTime<Local> {
            self.start_time + self.reference.elapsed()
        }

        async fn sleep(&self, duration: Duration) {
            tokio::time::sleep(duration).await;
        }
    }

    /// Collects formatted diagnostics so tests can count them.
    #[derive(Clone, Default)]
    struct LogBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for LogBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl LogBuffer {
        fn errors(&self) -> Vec<String> {
            String::from_utf8_lossy(&self.0.lock().unwrap())
                .lines()
                .filter(|line| line.contains("ERROR"))
                .map(str::to_string)
                .collect()
        }
    }

    fn capture_logs() -> (LogBuffer, tracing::subscriber::DefaultGuard) {
        let buffer = LogBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .without_time()
            .with_writer(move || writer.clone())
            .finish();
        (buffer, tracing::subscriber::set_default(subscriber))
    }

    fn nine_am() -> DateTime<Local> {
        Local.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
    }

    fn screen() -> MockScreenCapturer {
        let mut capturer = MockScreenCapturer::new();
        capturer
            .expect_capture()
            .returning(|| Ok(RgbaImage::from_pixel(8, 8, Rgba([20, 20, 20, 255]))));
        capturer
    }

    fn recorder(
        capturer: MockScreenCapturer,
        client: MockModelClient,
        store: ActivityLogStore,
        shutdown: CancellationToken,
    ) -> ActivityRecorder {
        ActivityRecorder::new(
            Box::new(capturer),
            ScreenDescriber::new(Arc::new(client), "system", 300),
            store,
            Arc::new(TestClock::at(nine_am())),
            shutdown,
            Duration::from_secs(6),
            80,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_cycles_two_lines() -> Result<()> {
        *TEST_LOGGING;
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let mut answers = vec!["Code editor open", "Browser open"].into_iter();
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .times(2)
            .returning(move |_| Ok(answers.next().unwrap().to_string()));

        let mut out = Vec::new();
        let cycles = recorder(screen(), client, store.clone(), CancellationToken::new())
            .run(&mut out, Some(2))
            .await?;

        assert_eq!(cycles, 2);
        let content = store.read_day(nine_am().date_naive()).await?;
        let expected = [
            ActivityEntry::new(nine_am(), "Code editor open").to_line(),
            ActivityEntry::new(nine_am() + Duration::from_secs(6), "Browser open").to_line(),
        ]
        .concat();
        assert_eq!(content, expected);
        assert_eq!(
            String::from_utf8(out)?,
            "Logged activity at 09:00:00\nLogged activity at 09:00:06\n"
        );
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let path = store.day_path(nine_am().date_naive());
        std::fs::write(&path, "earlier: kept\n")?;

        let mut client = MockModelClient::new();
        client.expect_complete().times(1).returning(|_| {
            Err(ModelError::Api {
                status: 401,
                message: "bad key".into(),
            })
        });

        let mut recorder = recorder(screen(), client, store, CancellationToken::new());
        let outcome = recorder.run_cycle().await;

        assert_eq!(outcome, Some(CycleOutcome::Failed));
        assert_eq!(std::fs::read_to_string(&path)?, "earlier: kept\n");
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_failure_does_not_stop_loop() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let mut calls = 0;
        let mut client = MockModelClient::new();
        client.expect_complete().times(3).returning(move |_| {
            calls += 1;
            if calls == 2 {
                Err(ModelError::EmptyResponse)
            } else {
                Ok(format!("activity {calls}"))
            }
        });

        let mut out = Vec::new();
        recorder(screen(), client, store.clone(), CancellationToken::new())
            .run(&mut out, Some(3))
            .await?;

        let content = store.read_day(nine_am().date_naive()).await?;
        let lines = content.lines().collect::<Vec<_>>();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with(": activity 1"));
        assert!(lines[1].ends_with(": activity 3"));
        assert!(String::from_utf8(out)?.contains("Logging failed!"));
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_capture_failure_skips_model() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let mut capturer = MockScreenCapturer::new();
        capturer
            .expect_capture()
            .returning(|| Err(anyhow!("display unavailable")));
        let mut client = MockModelClient::new();
        client.expect_complete().never();

        let mut recorder = recorder(capturer, client, store, CancellationToken::new());
        assert_eq!(recorder.run_cycle().await, Some(CycleOutcome::Failed));
        assert!(!dir.path().join("2024-05-01_activity_log.txt").exists());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_ends_loop() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let shutdown = CancellationToken::new();
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_| Ok("Terminal open".into()));

        let mut out = Vec::new();
        let (cycles, _) = tokio::join!(
            recorder(screen(), client, store.clone(), shutdown.clone()).run(&mut out, None),
            async {
                // Lands during the fourth sleep.
                tokio::time::sleep(Duration::from_secs(20)).await;
                shutdown.cancel();
            }
        );

        assert_eq!(cycles?, 4);
        let content = store.read_day(nine_am().date_naive()).await?;
        assert_eq!(content.lines().count(), 4);
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_already_cancelled_writes_nothing() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let shutdown = CancellationToken::new();
        shutdown.cancel();
        let mut capturer = MockScreenCapturer::new();
        capturer.expect_capture().never();
        let mut client = MockModelClient::new();
        client.expect_complete().never();

        let mut out = Vec::new();
        let cycles = recorder(capturer, client, store, shutdown)
            .run(&mut out, None)
            .await?;

        assert_eq!(cycles, 0);
        assert!(out.is_empty());
        Ok(())
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_cycle_logged_once() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_| Err(ModelError::EmptyResponse));
        let mut capturer = MockScreenCapturer::new();
        capturer
            .expect_capture()
            .returning(|| Err(anyhow!("display unavailable")));

        let (logs, _guard) = capture_logs();
        let mut failing_model = recorder(screen(), client, store.clone(), CancellationToken::new());
        assert_eq!(failing_model.run_cycle().await, Some(CycleOutcome::Failed));
        let errors = logs.errors();
        assert_eq!(errors.len(), 1, "{errors:?}");
        assert!(errors[0].contains("Description request failed"));

        let mut failing_screen =
            recorder(capturer, MockModelClient::new(), store, CancellationToken::new());
        assert_eq!(failing_screen.run_cycle().await, Some(CycleOutcome::Failed));
        let errors = logs.errors();
        assert_eq!(errors.len(), 2, "{errors:?}");
        assert!(errors[1].contains("Screen capture failed"));
        Ok(())
    }
}
