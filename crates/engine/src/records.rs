//! Typed record access inside a transaction
//!
//! [`RecordAccess`] adds the persistence operations of the record store
//! (create / filter / get / save / delete per record kind, record type lookup
//! by name) on top of [`TransactionContext`]'s untyped row API.

use survey_concurrency::TransactionContext;
use survey_core::{
    DataBlob, EntityRef, QuestionRecord, RecordId, RecordKind, RecordType, Survey, SurveyError,
    SurveyId, SurveyResult, TypedRecord,
};
use survey_storage::{Key, Row};

/// Typed record operations over a transaction
pub trait RecordAccess {
    // Surveys

    /// Fetch a survey, failing with NotFound when absent
    fn survey(&self, id: SurveyId) -> SurveyResult<Survey>;
    /// All surveys in id order
    fn surveys(&self) -> SurveyResult<Vec<Survey>>;
    /// Allocate an id and stage a new survey row
    fn insert_survey(&mut self, name: String, description: String) -> Survey;
    /// Stage an updated survey row
    fn save_survey(&mut self, survey: Survey);
    /// Stage deletion of a survey and every record it owns
    fn delete_survey(&mut self, id: SurveyId) -> SurveyResult<usize>;

    // Record types

    /// Fetch a record type by name, failing with RecordTypeNotFound when absent
    fn record_type(&self, name: &str) -> SurveyResult<RecordType>;
    /// All record types in name order
    fn record_types(&self) -> SurveyResult<Vec<RecordType>>;
    /// Stage a create-or-replace of a record type
    fn save_record_type(&mut self, record_type: RecordType);

    // Survey data

    /// Fetch a survey data record, failing with NotFound when absent
    fn survey_data(&self, id: RecordId) -> SurveyResult<TypedRecord>;
    /// Survey data records of one survey, optionally restricted to one type
    fn filter_survey_data(
        &self,
        survey: SurveyId,
        record_type: Option<&str>,
    ) -> SurveyResult<Vec<TypedRecord>>;
    /// Allocate an id and stage a new survey data record
    fn insert_survey_data(&mut self, survey: SurveyId, record_type: &str, data: DataBlob)
        -> TypedRecord;
    /// Stage an updated survey data record
    fn save_survey_data(&mut self, record: TypedRecord);
    /// Stage deletion of a survey data record
    fn delete_survey_data(&mut self, id: RecordId);

    // Question data

    /// Fetch a question data record, failing with NotFound when absent
    fn question_data(&self, id: RecordId) -> SurveyResult<QuestionRecord>;
    /// Question data records, optionally restricted by name and type
    fn filter_question_data(
        &self,
        name: Option<&str>,
        record_type: Option<&str>,
    ) -> SurveyResult<Vec<QuestionRecord>>;
    /// Allocate an id and stage a new question data record
    fn insert_question_data(&mut self, name: String, record_type: &str, data: DataBlob)
        -> QuestionRecord;
    /// Stage an updated question data record
    fn save_question_data(&mut self, record: QuestionRecord);
    /// Stage deletion of a question data record
    fn delete_question_data(&mut self, id: RecordId);
}

impl RecordAccess for TransactionContext {
    fn survey(&self, id: SurveyId) -> SurveyResult<Survey> {
        match self.get(&Key::Survey(id)) {
            Some(row) => row.into_survey(),
            None => Err(SurveyError::not_found(EntityRef::survey(id))),
        }
    }

    fn surveys(&self) -> SurveyResult<Vec<Survey>> {
        self.scan(RecordKind::Survey)
            .into_iter()
            .map(|(_, row)| row.into_survey())
            .collect()
    }

    fn insert_survey(&mut self, name: String, description: String) -> Survey {
        let id = SurveyId::new(self.allocate_id(RecordKind::Survey));
        let survey = Survey::new(id, name, description);
        self.put(Row::Survey(survey.clone()));
        survey
    }

    fn save_survey(&mut self, survey: Survey) {
        self.put(Row::Survey(survey));
    }

    fn delete_survey(&mut self, id: SurveyId) -> SurveyResult<usize> {
        self.survey(id)?;
        let owned = self.filter_survey_data(id, None)?;
        let count = owned.len();
        for record in owned {
            self.delete(Key::SurveyData(record.id));
        }
        self.delete(Key::Survey(id));
        Ok(count)
    }

    fn record_type(&self, name: &str) -> SurveyResult<RecordType> {
        match self.get(&Key::RecordType(name.to_string())) {
            Some(row) => row.into_record_type(),
            None => Err(SurveyError::record_type_not_found(name)),
        }
    }

    fn record_types(&self) -> SurveyResult<Vec<RecordType>> {
        self.scan(RecordKind::RecordType)
            .into_iter()
            .map(|(_, row)| row.into_record_type())
            .collect()
    }

    fn save_record_type(&mut self, record_type: RecordType) {
        self.put(Row::RecordType(record_type));
    }

    fn survey_data(&self, id: RecordId) -> SurveyResult<TypedRecord> {
        match self.get(&Key::SurveyData(id)) {
            Some(row) => row.into_survey_data(),
            None => Err(SurveyError::not_found(EntityRef::survey_data(None, id))),
        }
    }

    fn filter_survey_data(
        &self,
        survey: SurveyId,
        record_type: Option<&str>,
    ) -> SurveyResult<Vec<TypedRecord>> {
        let mut out = Vec::new();
        for (_, row) in self.scan(RecordKind::SurveyData) {
            let record = row.into_survey_data()?;
            if record.survey != survey {
                continue;
            }
            if let Some(t) = record_type {
                if record.record_type != t {
                    continue;
                }
            }
            out.push(record);
        }
        Ok(out)
    }

    fn insert_survey_data(
        &mut self,
        survey: SurveyId,
        record_type: &str,
        data: DataBlob,
    ) -> TypedRecord {
        let id = RecordId::new(self.allocate_id(RecordKind::SurveyData));
        let record = TypedRecord {
            id,
            survey,
            record_type: record_type.to_string(),
            data,
        };
        self.put(Row::SurveyData(record.clone()));
        record
    }

    fn save_survey_data(&mut self, record: TypedRecord) {
        self.put(Row::SurveyData(record));
    }

    fn delete_survey_data(&mut self, id: RecordId) {
        self.delete(Key::SurveyData(id));
    }

    fn question_data(&self, id: RecordId) -> SurveyResult<QuestionRecord> {
        match self.get(&Key::QuestionData(id)) {
            Some(row) => row.into_question_data(),
            None => Err(SurveyError::not_found(EntityRef::question_data(id))),
        }
    }

    fn filter_question_data(
        &self,
        name: Option<&str>,
        record_type: Option<&str>,
    ) -> SurveyResult<Vec<QuestionRecord>> {
        let mut out = Vec::new();
        for (_, row) in self.scan(RecordKind::QuestionData) {
            let record = row.into_question_data()?;
            if name.map_or(false, |n| record.name != n) {
                continue;
            }
            if record_type.map_or(false, |t| record.record_type != t) {
                continue;
            }
            out.push(record);
        }
        Ok(out)
    }

    fn insert_question_data(
        &mut self,
        name: String,
        record_type: &str,
        data: DataBlob,
    ) -> QuestionRecord {
        let id = RecordId::new(self.allocate_id(RecordKind::QuestionData));
        let record = QuestionRecord {
            id,
            name,
            record_type: record_type.to_string(),
            data,
        };
        self.put(Row::QuestionData(record.clone()));
        record
    }

    fn save_question_data(&mut self, record: QuestionRecord) {
        self.put(Row::QuestionData(record));
    }

    fn delete_question_data(&mut self, id: RecordId) {
        self.delete(Key::QuestionData(id));
    }
}
