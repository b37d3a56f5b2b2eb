use std::sync::Arc;

use anyhow::{Context, Result};
use tokio_util::sync::CancellationToken;

use crate::{
    capture::ScreenCapturer,
    config::Config,
    model::{
        describe::ScreenDescriber, openai::OpenAiClient, summarize::TimelineGenerator, ModelClient,
    },
    recorder::ActivityRecorder,
    storage::{activity_log::ActivityLogStore, timeline_store::TimelineStore},
    utils::clock::Clock,
};

/// Everything built from the configuration at startup. Components get their collaborators from
/// here instead of reaching for globals.
pub struct Application {
    pub config: Config,
    pub client: Arc<dyn ModelClient>,
    pub activity_log: ActivityLogStore,
    pub timelines: TimelineStore,
}

impl Application {
    pub fn new(config: Config) -> Result<Self> {
        let client = OpenAiClient::new(
            &config.base_url,
            config.api_key.clone(),
            config.model.clone(),
            config.request_timeout,
        )
        .context("Failed to create model client")?;
        Self::with_client(config, Arc::new(client))
    }

    pub fn with_client(config: Config, client: Arc<dyn ModelClient>) -> Result<Self> {
        let activity_log = ActivityLogStore::new(config.log_dir.clone())
            .with_context(|| format!("Failed to open log directory {:?}", config.log_dir))?;
        let timelines = TimelineStore::new(config.log_dir.clone())
            .with_context(|| format!("Failed to open log directory {:?}", config.log_dir))?;
        Ok(Self {
            config,
            client,
            activity_log,
            timelines,
        })
    }

    pub fn describer(&self) -> ScreenDescriber {
        ScreenDescriber::new(
            self.client.clone(),
            self.config.profile.describe_prompt(),
            self.config.describe_max_tokens,
        )
    }

    pub fn timeline_generator(&self) -> TimelineGenerator {
        TimelineGenerator::new(
            self.client.clone(),
            self.activity_log.clone(),
            self.config.timeline_max_tokens,
        )
    }

    pub fn recorder(
        &self,
        capturer: Box<dyn ScreenCapturer>,
        clock: Arc<dyn Clock>,
        shutdown: CancellationToken,
    ) -> ActivityRecorder {
        ActivityRecorder::new(
            capturer,
            self.describer(),
            self.activity_log.clone(),
            clock,
            shutdown,
            self.config.interval,
            self.config.jpeg_quality,
        )
    }
}
