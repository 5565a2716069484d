use std::path::PathBuf;

use dataseed_core::{WorkItem, WorkSource};

use crate::output::{read_titles_json, read_users_csv};

/// Registration rows read from a users CSV, one work item per row.
#[derive(Debug, Clone)]
pub struct UsersCsvSource {
    path: PathBuf,
}

impl UsersCsvSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkSource for UsersCsvSource {
    fn items(&self) -> dataseed_core::Result<Vec<WorkItem>> {
        let users = read_users_csv(&self.path).map_err(|err| {
            dataseed_core::Error::WorkSource(format!("{}: {err}", self.path.display()))
        })?;
        Ok(users.iter().map(|user| user.to_work_item()).collect())
    }
}

/// Product titles read from a JSON file written by `write_titles_json`.
#[derive(Debug, Clone)]
pub struct TitlesFileSource {
    path: PathBuf,
}

impl TitlesFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl WorkSource for TitlesFileSource {
    fn items(&self) -> dataseed_core::Result<Vec<WorkItem>> {
        let titles = read_titles_json(&self.path).map_err(|err| {
            dataseed_core::Error::WorkSource(format!("{}: {err}", self.path.display()))
        })?;
        Ok(titles.iter().map(|title| title.to_work_item()).collect())
    }
}
