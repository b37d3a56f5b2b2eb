use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncReadExt, AsyncWriteExt},
};
use tracing::debug;

use crate::utils::time::date_to_day_name;

use super::entities::ActivityEntry;

pub const ACTIVITY_LOG_SUFFIX: &str = "_activity_log.txt";

/// Owns the day logs inside the log directory.
#[derive(Debug, Clone)]
pub struct ActivityLogStore {
    log_dir: PathBuf,
}

impl ActivityLogStore {
    pub fn new(log_dir: PathBuf) -> Result<Self, io::Error> {
        std::fs::create_dir_all(&log_dir)?;

        Ok(Self { log_dir })
    }

    pub fn day_path(&self, date: NaiveDate) -> PathBuf {
        self.log_dir
            .join(format!("{}{ACTIVITY_LOG_SUFFIX}", date_to_day_name(date)))
    }

    /// Appends the entry to the file of its day. The file is opened and closed on every call and
    /// the line goes out in a single write under an exclusive lock, so a reader never sees half
    /// a record.
    pub async fn append(&self, entry: &ActivityEntry) -> Result<()> {
        let path = self.day_path(entry.day());
        debug!("Appending entry to {path:?}");

        let mut file = File::options()
            .append(true)
            .create(true)
            .open(&path)
            .await
            .with_context(|| format!("Failed to open {path:?}"))?;

        file.lock_exclusive()?;
        let result = Self::write_line(&mut file, entry).await;
        file.unlock_async().await?;
        result.with_context(|| format!("Failed to append to {path:?}"))
    }

    async fn write_line(file: &mut File, entry: &ActivityEntry) -> Result<(), io::Error> {
        file.write_all(entry.to_line().as_bytes()).await?;
        file.flush().await
    }

    /// Names of every day log in the directory, sorted. Contents are not read.
    pub async fn list_days(&self) -> Result<Vec<String>> {
        let mut entries = tokio::fs::read_dir(&self.log_dir)
            .await
            .with_context(|| format!("Failed to read {:?}", self.log_dir))?;

        let mut names = vec![];
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().to_string();
            if name.ends_with(ACTIVITY_LOG_SUFFIX) && entry.file_type().await?.is_file() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Full content of a day log. A missing day is reported with [io::ErrorKind::NotFound].
    pub async fn read_day(&self, date: NaiveDate) -> Result<String, io::Error> {
        let path = self.day_path(date);
        debug!("Reading {path:?}");
        let mut file = File::open(&path).await?;
        file.lock_shared()?;
        let mut content = String::new();
        let result = file.read_to_string(&mut content).await;
        file.unlock_async().await?;
        result.map(|_| content)
    }
}
