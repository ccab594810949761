//! Link construction
//!
//! Reverse lookup from (resource, ids) to URL strings for the computed
//! `_url` / `_data_url` fields.

use survey_core::{RecordId, SurveyId};

/// Reverse routing used by the serializers
pub trait Routes: Send + Sync {
    /// Detail link of a survey
    fn survey_detail(&self, survey: SurveyId) -> String;
    /// Collection link of a survey's data records
    fn survey_data_list(&self, survey: SurveyId) -> String;
    /// Detail link of one survey data record
    fn survey_data_detail(&self, survey: SurveyId, record: RecordId) -> String;
    /// Detail link of one question data record (without query string)
    fn question_data_detail(&self, record: RecordId) -> String;
}

/// Default route layout under `{base}/api/`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiRoutes {
    base: String,
}

impl ApiRoutes {
    /// Routes rooted at `base` (empty for relative links)
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self { base }
    }
}

impl Routes for ApiRoutes {
    fn survey_detail(&self, survey: SurveyId) -> String {
        format!("{}/api/survey/{}/", self.base, survey)
    }

    fn survey_data_list(&self, survey: SurveyId) -> String {
        format!("{}/api/survey/{}/data/", self.base, survey)
    }

    fn survey_data_detail(&self, survey: SurveyId, record: RecordId) -> String {
        format!("{}/api/survey/{}/data/{}/", self.base, survey, record)
    }

    fn question_data_detail(&self, record: RecordId) -> String {
        format!("{}/api/question/{}/", self.base, record)
    }
}

/// Percent-encode a question name for use in a query string.
///
/// `/` is left as-is; every other reserved character is encoded.
pub fn encode_name(name: &str) -> String {
    name.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
