//! Snapshot images
//!
//! A [`StoreImage`] is a full, self-describing copy of the storage tables and
//! id counters. Images are written as JSON; a write goes to a temporary file
//! in the same directory and is renamed into place, so a reader never sees a
//! half-written snapshot.

use crate::memory::{IdCounters, Tables};
use crate::row::Row;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write as _;
use std::path::Path;
use std::sync::atomic::Ordering;
use survey_core::{QuestionRecord, RecordType, Survey, SurveyError, SurveyResult, TypedRecord};
use tempfile::NamedTempFile;

/// Format version written into every image
pub const IMAGE_FORMAT: u32 = 1;

/// Last allocated id per numerically-keyed kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextIds {
    /// Surveys
    pub survey: u64,
    /// Survey data records
    pub survey_data: u64,
    /// Question data records
    pub question_data: u64,
}

/// Serializable copy of the whole store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreImage {
    /// Image format version
    pub format: u32,
    /// Store version at capture time
    pub version: u64,
    /// Id counters at capture time
    pub next_ids: NextIds,
    /// Survey rows
    pub surveys: Vec<Survey>,
    /// Record type rows
    pub record_types: Vec<RecordType>,
    /// Survey data rows
    pub survey_data: Vec<TypedRecord>,
    /// Question data rows
    pub question_data: Vec<QuestionRecord>,
}

impl StoreImage {
    pub(crate) fn capture(tables: &Tables, ids: &IdCounters, version: u64) -> Self {
        let mut image = StoreImage {
            format: IMAGE_FORMAT,
            version,
            next_ids: NextIds {
                survey: ids.survey.load(Ordering::Acquire),
                survey_data: ids.survey_data.load(Ordering::Acquire),
                question_data: ids.question_data.load(Ordering::Acquire),
            },
            ..Default::default()
        };
        let all = tables
            .surveys
            .values()
            .chain(tables.record_types.values())
            .chain(tables.survey_data.values())
            .chain(tables.question_data.values());
        for row in all {
            match row.clone() {
                Row::Survey(s) => image.surveys.push(s),
                Row::RecordType(t) => image.record_types.push(t),
                Row::SurveyData(r) => image.survey_data.push(r),
                Row::QuestionData(q) => image.question_data.push(q),
            }
        }
        image
    }

    /// Every row in the image
    pub fn rows(&self) -> Vec<Row> {
        self.surveys
            .iter()
            .cloned()
            .map(Row::Survey)
            .chain(self.record_types.iter().cloned().map(Row::RecordType))
            .chain(self.survey_data.iter().cloned().map(Row::SurveyData))
            .chain(self.question_data.iter().cloned().map(Row::QuestionData))
            .collect()
    }

    /// Read an image from a JSON file
    pub fn read_from(path: &Path) -> SurveyResult<Self> {
        let bytes = fs::read(path)?;
        let image: StoreImage = serde_json::from_slice(&bytes)?;
        if image.format != IMAGE_FORMAT {
            return Err(SurveyError::storage(format!(
                "unsupported snapshot format {} in {}",
                image.format,
                path.display()
            )));
        }
        Ok(image)
    }

    /// Write the image to `path`, replacing any existing file atomically
    ///
    /// Each writer stages into its own temp file in the target directory, so
    /// concurrent writers never share a partially written file.
    pub fn write_to(&self, path: &Path) -> SurveyResult<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let bytes = serde_json::to_vec_pretty(self)?;
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}
