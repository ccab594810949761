//! Request context
//!
//! Path and query parameters of the inbound API call, as handed over by the
//! routing layer. The serializers read the owning survey id from the path
//! (`survey`) and the question scope from the query (`name`).

use std::collections::BTreeMap;
use survey_core::{SurveyError, SurveyId, SurveyResult};

/// Path parameter carrying the owning survey id
pub const SURVEY_PARAM: &str = "survey";

/// Query parameter carrying the question record name
pub const NAME_PARAM: &str = "name";

/// Path and query parameters of one request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    path: BTreeMap<String, String>,
    query: BTreeMap<String, String>,
}

impl RequestContext {
    /// Empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for a route nested under a survey
    pub fn for_survey(survey: SurveyId) -> Self {
        Self::new().with_path(SURVEY_PARAM, survey.to_string())
    }

    /// Add a path parameter
    pub fn with_path(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.path.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Raw path parameter
    pub fn path_param(&self, key: &str) -> Option<&str> {
        self.path.get(key).map(String::as_str)
    }

    /// Raw query parameter
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }

    /// Owning survey id from the path; fatal when missing or malformed
    pub fn survey_id(&self) -> SurveyResult<SurveyId> {
        let raw = self
            .path_param(SURVEY_PARAM)
            .ok_or_else(|| SurveyError::missing_context(SURVEY_PARAM))?;
        raw.parse().map_err(|_| {
            SurveyError::missing_context(format!("{} (not a survey id: {:?})", SURVEY_PARAM, raw))
        })
    }

    /// Question name from the query string, empty when absent
    pub fn question_name(&self) -> String {
        self.query_param(NAME_PARAM).unwrap_or_default().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_survey_id_from_path() {
        let ctx = RequestContext::for_survey(SurveyId::new(12));
        assert_eq!(ctx.survey_id().unwrap(), SurveyId::new(12));
    }

    #[test]
    fn test_missing_survey_id_is_fatal() {
        let err = RequestContext::new().survey_id().unwrap_err();
        assert!(matches!(err, SurveyError::MissingContext { .. }));
    }

    #[test]
    fn test_malformed_survey_id_is_fatal() {
        let err = RequestContext::new()
            .with_path("survey", "abc")
            .survey_id()
            .unwrap_err();
        assert!(err.is_lookup());
    }

    #[test]
    fn test_question_name_defaults_to_empty() {
        assert_eq!(RequestContext::new().question_name(), "");
        let ctx = RequestContext::new().with_query("name", "Q 1");
        assert_eq!(ctx.question_name(), "Q 1");
    }
}
