use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use tracing::info;

use crate::utils::time::date_to_day_name;

pub const TIMELINE_SUFFIX: &str = "_timeline.txt";

/// Owns the saved timelines inside the log directory.
#[derive(Debug, Clone)]
pub struct TimelineStore {
    dir: PathBuf,
}

impl TimelineStore {
    pub fn new(dir: PathBuf) -> Result<Self, io::Error> {
        std::fs::create_dir_all(&dir)?;

        Ok(Self { dir })
    }

    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.dir
            .join(format!("{}{TIMELINE_SUFFIX}", date_to_day_name(date)))
    }

    /// Replaces whatever was saved for the day with `content`.
    pub async fn save(&self, date: NaiveDate, content: &str) -> Result<PathBuf> {
        let path = self.day_path(date);
        tokio::fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {path:?}"))?;
        info!("Saved timeline to {path:?}");
        Ok(path)
    }
}
