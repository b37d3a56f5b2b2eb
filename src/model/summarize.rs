use std::{io, sync::Arc};

use chrono::NaiveDate;
use tracing::{error, info};

use crate::{storage::activity_log::ActivityLogStore, utils::time::date_to_day_name};

use super::{
    prompts::{timeline_user_text, TIMELINE},
    ChatRequest, ContentPart, ModelClient, ModelError,
};

#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("No activity log exists for {0}")]
    MissingLog(NaiveDate),
    #[error("Activity log for {0} is empty")]
    EmptyLog(NaiveDate),
    #[error("Failed to read activity log for {date}: {source}")]
    Read { date: NaiveDate, source: io::Error },
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Summarizes a day log into a timeline report. The report is returned untouched, nothing
/// checks that the model followed the requested structure.
pub struct TimelineGenerator {
    client: Arc<dyn ModelClient>,
    activity_log: ActivityLogStore,
    max_tokens: u32,
}

impl TimelineGenerator {
    pub fn new(
        client: Arc<dyn ModelClient>,
        activity_log: ActivityLogStore,
        max_tokens: u32,
    ) -> Self {
        Self {
            client,
            activity_log,
            max_tokens,
        }
    }

    pub async fn generate(&self, date: NaiveDate) -> Result<String, TimelineError> {
        let result = self.generate_inner(date).await;
        if let Err(e) = &result {
            error!("Timeline generation for {date} failed: {e}");
        }
        result
    }

    async fn generate_inner(&self, date: NaiveDate) -> Result<String, TimelineError> {
        let log = match self.activity_log.read_day(date).await {
            Ok(log) => log,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(TimelineError::MissingLog(date))
            }
            Err(source) => return Err(TimelineError::Read { date, source }),
        };
        // A model asked about an empty log would still invent a day.
        if log.trim().is_empty() {
            return Err(TimelineError::EmptyLog(date));
        }

        let request = ChatRequest {
            system: TIMELINE.to_string(),
            user: vec![ContentPart::Text(timeline_user_text(
                &date_to_day_name(date),
                &log,
            ))],
            max_tokens: self.max_tokens,
        };
        let timeline = self.client.complete(request).await?;
        info!(
            "Generated timeline for {date} from {} log lines",
            log.lines().count()
        );
        Ok(timeline)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use anyhow::Result;
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use crate::{
        model::{prompts::TIMELINE, ContentPart, MockModelClient, ModelError},
        storage::activity_log::ActivityLogStore,
    };

    use super::{TimelineError, TimelineGenerator};

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
    }

    #[tokio::test]
    async fn test_missing_log_never_calls_model() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let mut client = MockModelClient::new();
        client.expect_complete().never();

        let generator = TimelineGenerator::new(Arc::new(client), store, 1000);
        let result = generator.generate(day()).await;

        assert!(matches!(result, Err(TimelineError::MissingLog(d)) if d == day()));
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_log_never_calls_model() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        std::fs::write(store.day_path(day()), "\n")?;
        let mut client = MockModelClient::new();
        client.expect_complete().never();

        let generator = TimelineGenerator::new(Arc::new(client), store, 1000);
        let result = generator.generate(day()).await;

        assert!(matches!(result, Err(TimelineError::EmptyLog(_))));
        Ok(())
    }

    #[tokio::test]
    async fn test_unreadable_log_never_calls_model() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let second_day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        std::fs::create_dir(store.day_path(day()))?;
        std::fs::write(store.day_path(second_day), [0xff, 0xfe, b'\n'])?;
        let mut client = MockModelClient::new();
        client.expect_complete().never();

        let generator = TimelineGenerator::new(Arc::new(client), store, 1000);

        let result = generator.generate(day()).await;
        assert!(matches!(result, Err(TimelineError::Read { date, .. }) if date == day()));
        let result = generator.generate(second_day).await;
        assert!(matches!(
            result,
            Err(TimelineError::Read { date, ref source })
                if date == second_day && source.kind() == std::io::ErrorKind::InvalidData
        ));
        Ok(())
    }

    #[tokio::test]
    async fn test_generate_sends_whole_log() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        let log = "Wed May  1 09:00:00 2024: Code editor open\n\
                   Wed May  1 09:00:06 2024: Browser open\n";
        std::fs::write(store.day_path(day()), log)?;

        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .withf(move |request| {
                request.system == TIMELINE
                    && request.max_tokens == 800
                    && request.user
                        == vec![ContentPart::Text(format!(
                            "The following is the user's activity log for 2024-05-01:\n{log}"
                        ))]
            })
            .times(1)
            .returning(|_| Ok("[Date: 2024-05-01]\n09:00 - 09:59: Coding".into()));

        let generator = TimelineGenerator::new(Arc::new(client), store, 800);
        let timeline = generator.generate(day()).await?;

        assert_eq!(timeline, "[Date: 2024-05-01]\n09:00 - 09:59: Coding");
        Ok(())
    }

    #[tokio::test]
    async fn test_model_failure_is_reported() -> Result<()> {
        let dir = tempdir()?;
        let store = ActivityLogStore::new(dir.path().to_owned())?;
        std::fs::write(store.day_path(day()), "t: something\n")?;
        let mut client = MockModelClient::new();
        client
            .expect_complete()
            .returning(|_| Err(ModelError::EmptyResponse));

        let generator = TimelineGenerator::new(Arc::new(client), store, 1000);
        let result = generator.generate(day()).await;

        assert!(matches!(
            result,
            Err(TimelineError::Model(ModelError::EmptyResponse))
        ));
        Ok(())
    }
}
