use super::error::ExamServiceError;
use super::model::{Exam, Question};
use super::{
    CreateExamRequest, CreateQuestionRequest, ExamResponse, QuestionResponse,
    StudentResponseResponse, UpdateExamRequest, UpdateQuestionRequest,
};
use crate::domain::narration::{should_regenerate, templates, NarrationService, NarrationStatus};
use crate::infrastructure::repositories::{
    ExamRepository, QuestionRepository, ResponseRepository, UserRepository,
};
use crate::infrastructure::storage::{MediaDir, MediaStorage};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct ExamService {
    exam_repo: Arc<ExamRepository>,
    question_repo: Arc<QuestionRepository>,
    response_repo: Arc<ResponseRepository>,
    user_repo: Arc<UserRepository>,
    storage: Arc<MediaStorage>,
    narration: Arc<NarrationService>,
}

impl ExamService {
    pub fn new(
        exam_repo: Arc<ExamRepository>,
        question_repo: Arc<QuestionRepository>,
        response_repo: Arc<ResponseRepository>,
        user_repo: Arc<UserRepository>,
        storage: Arc<MediaStorage>,
        narration: Arc<NarrationService>,
    ) -> Self {
        Self {
            exam_repo,
            question_repo,
            response_repo,
            user_repo,
            storage,
            narration,
        }
    }
}

#[async_trait]
pub trait ExamServiceApi: Send + Sync {
    async fn list_exams(&self) -> Result<Vec<ExamResponse>, ExamServiceError>;

    async fn get_exam(&self, exam_id: i64) -> Result<ExamResponse, ExamServiceError>;

    /// Create an exam, then synthesize its welcome and listing narration.
    /// The record is committed before any synthesis is attempted.
    async fn create_exam(&self, request: CreateExamRequest)
        -> Result<ExamResponse, ExamServiceError>;

    async fn update_exam(
        &self,
        exam_id: i64,
        request: UpdateExamRequest,
    ) -> Result<ExamResponse, ExamServiceError>;

    async fn delete_exam(&self, exam_id: i64) -> Result<(), ExamServiceError>;

    async fn list_questions(&self, exam_id: i64) -> Result<Vec<QuestionResponse>, ExamServiceError>;

    async fn create_question(
        &self,
        exam_id: i64,
        request: CreateQuestionRequest,
    ) -> Result<QuestionResponse, ExamServiceError>;

    async fn update_question(
        &self,
        question_id: i64,
        request: UpdateQuestionRequest,
    ) -> Result<QuestionResponse, ExamServiceError>;

    async fn delete_question(&self, question_id: i64) -> Result<(), ExamServiceError>;

    /// Store an uploaded spoken answer. When no student is given, the first
    /// provisioned user is used (anonymous playback clients).
    async fn submit_response(
        &self,
        question_id: i64,
        student_id: Option<i64>,
        original_filename: Option<String>,
        data: Vec<u8>,
    ) -> Result<StudentResponseResponse, ExamServiceError>;

    async fn list_responses(
        &self,
        question_id: i64,
    ) -> Result<Vec<StudentResponseResponse>, ExamServiceError>;
}

#[async_trait]
impl ExamServiceApi for ExamService {
    async fn list_exams(&self) -> Result<Vec<ExamResponse>, ExamServiceError> {
        let exams = self
            .exam_repo
            .find_all()
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        Ok(exams.into_iter().map(ExamResponse::from).collect())
    }

    async fn get_exam(&self, exam_id: i64) -> Result<ExamResponse, ExamServiceError> {
        let exam = self
            .exam_repo
            .find_by_id(exam_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("exam"))?;
        Ok(exam.into())
    }

    async fn create_exam(
        &self,
        request: CreateExamRequest,
    ) -> Result<ExamResponse, ExamServiceError> {
        if request.title.trim().is_empty() {
            return Err(ExamServiceError::Invalid("title must not be empty".to_string()));
        }

        let exam = self
            .exam_repo
            .create(&request.title, &request.description)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;

        self.sync_exam_narration(None, &exam).await;

        Ok(self.refreshed_exam(exam).await.into())
    }

    async fn update_exam(
        &self,
        exam_id: i64,
        request: UpdateExamRequest,
    ) -> Result<ExamResponse, ExamServiceError> {
        if request.title.trim().is_empty() {
            return Err(ExamServiceError::Invalid("title must not be empty".to_string()));
        }

        let previous = self.previous_exam(exam_id).await;

        let updated = self
            .exam_repo
            .update(exam_id, &request.title, &request.description)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        if !updated {
            return Err(ExamServiceError::NotFound("exam"));
        }

        let current = self
            .exam_repo
            .find_by_id(exam_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("exam"))?;

        self.sync_exam_narration(previous.as_ref(), &current).await;

        Ok(self.refreshed_exam(current).await.into())
    }

    async fn delete_exam(&self, exam_id: i64) -> Result<(), ExamServiceError> {
        let deleted = self
            .exam_repo
            .delete(exam_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(ExamServiceError::NotFound("exam"));
        }
        Ok(())
    }

    async fn list_questions(
        &self,
        exam_id: i64,
    ) -> Result<Vec<QuestionResponse>, ExamServiceError> {
        self.verify_exam_exists(exam_id).await?;
        let questions = self
            .question_repo
            .find_by_exam(exam_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        Ok(questions.into_iter().map(QuestionResponse::from).collect())
    }

    async fn create_question(
        &self,
        exam_id: i64,
        request: CreateQuestionRequest,
    ) -> Result<QuestionResponse, ExamServiceError> {
        if request.text.trim().is_empty() {
            return Err(ExamServiceError::Invalid("text must not be empty".to_string()));
        }
        self.verify_exam_exists(exam_id).await?;

        let question = self
            .question_repo
            .create(exam_id, &request.text, request.position)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;

        self.sync_question_narration(None, &question).await;

        Ok(self.refreshed_question(question).await.into())
    }

    async fn update_question(
        &self,
        question_id: i64,
        request: UpdateQuestionRequest,
    ) -> Result<QuestionResponse, ExamServiceError> {
        if request.text.trim().is_empty() {
            return Err(ExamServiceError::Invalid("text must not be empty".to_string()));
        }

        let previous = self.previous_question(question_id).await;

        let updated = self
            .question_repo
            .update(question_id, &request.text, request.position)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        if !updated {
            return Err(ExamServiceError::NotFound("question"));
        }

        let current = self
            .question_repo
            .find_by_id(question_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("question"))?;

        self.sync_question_narration(previous.as_ref(), &current).await;

        Ok(self.refreshed_question(current).await.into())
    }

    async fn delete_question(&self, question_id: i64) -> Result<(), ExamServiceError> {
        let deleted = self
            .question_repo
            .delete(question_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        if !deleted {
            return Err(ExamServiceError::NotFound("question"));
        }
        Ok(())
    }

    async fn submit_response(
        &self,
        question_id: i64,
        student_id: Option<i64>,
        original_filename: Option<String>,
        data: Vec<u8>,
    ) -> Result<StudentResponseResponse, ExamServiceError> {
        if data.is_empty() {
            return Err(ExamServiceError::Invalid("empty audio upload".to_string()));
        }

        let question = self
            .question_repo
            .find_by_id(question_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("question"))?;

        let student = match student_id {
            Some(id) => self
                .user_repo
                .find_by_id(id)
                .await
                .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
                .ok_or(ExamServiceError::NotFound("student"))?,
            None => self
                .user_repo
                .find_first()
                .await
                .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
                .ok_or_else(|| {
                    ExamServiceError::Invalid("no users provisioned".to_string())
                })?,
        };

        let extension = original_filename
            .as_deref()
            .and_then(|name| name.rsplit_once('.').map(|(_, ext)| ext.to_string()))
            .filter(|ext| !ext.is_empty() && ext.chars().all(char::is_alphanumeric))
            .unwrap_or_else(|| "webm".to_string());
        let filename = format!("answer_q{}_{}.{}", question.id, Uuid::new_v4().simple(), extension);

        let relative = self
            .storage
            .store(MediaDir::Answers, &filename, &data)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;

        let response = self
            .response_repo
            .create(student.id, question.id, &relative)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;

        Ok(response.into())
    }

    async fn list_responses(
        &self,
        question_id: i64,
    ) -> Result<Vec<StudentResponseResponse>, ExamServiceError> {
        self.question_repo
            .find_by_id(question_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("question"))?;

        let responses = self
            .response_repo
            .find_by_question(question_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?;
        Ok(responses
            .into_iter()
            .map(StudentResponseResponse::from)
            .collect())
    }
}

impl ExamService {
    async fn verify_exam_exists(&self, exam_id: i64) -> Result<(), ExamServiceError> {
        self.exam_repo
            .find_by_id(exam_id)
            .await
            .map_err(|e| ExamServiceError::Dependency(e.to_string()))?
            .ok_or(ExamServiceError::NotFound("exam"))?;
        Ok(())
    }

    /// Pre-save snapshot. A lookup failure is logged and treated as "no
    /// previous value", which forces regeneration downstream.
    async fn previous_exam(&self, exam_id: i64) -> Option<Exam> {
        match self.exam_repo.find_by_id(exam_id).await {
            Ok(exam) => exam,
            Err(e) => {
                tracing::warn!(error = %e, exam_id, "Pre-save exam lookup failed");
                None
            }
        }
    }

    async fn previous_question(&self, question_id: i64) -> Option<Question> {
        match self.question_repo.find_by_id(question_id).await {
            Ok(question) => question,
            Err(e) => {
                tracing::warn!(error = %e, question_id, "Pre-save question lookup failed");
                None
            }
        }
    }

    async fn refreshed_exam(&self, fallback: Exam) -> Exam {
        match self.exam_repo.find_by_id(fallback.id).await {
            Ok(Some(exam)) => exam,
            _ => fallback,
        }
    }

    async fn refreshed_question(&self, fallback: Question) -> Question {
        match self.question_repo.find_by_id(fallback.id).await {
            Ok(Some(question)) => question,
            _ => fallback,
        }
    }

    /// Post-save narration pass for an exam. Both audio fields derive from
    /// (title, description) through their templates; each pair is evaluated
    /// and attempted independently, and no failure reaches the caller.
    async fn sync_exam_narration(&self, previous: Option<&Exam>, exam: &Exam) {
        let mut attempted = 0usize;
        let mut failed = 0usize;

        let welcome = templates::exam_welcome(&exam.title, &exam.description);
        let previous_welcome =
            previous.map(|p| templates::exam_welcome(&p.title, &p.description));
        if should_regenerate(previous_welcome.as_deref(), &welcome, exam.audio_file.is_some()) {
            attempted += 1;
            let generated = self
                .narration
                .generate(&welcome, &format!("exam_full_{}.mp3", exam.id), MediaDir::ExamAudio)
                .await;
            match generated {
                Some(path) => {
                    if let Err(e) = self.exam_repo.set_audio_file(exam.id, &path).await {
                        tracing::warn!(error = %e, exam_id = exam.id, "Failed to attach exam audio");
                        failed += 1;
                    }
                }
                None => failed += 1,
            }
        }

        let listing = templates::exam_listing(&exam.title, &exam.description);
        let previous_listing =
            previous.map(|p| templates::exam_listing(&p.title, &p.description));
        if should_regenerate(previous_listing.as_deref(), &listing, exam.short_audio.is_some()) {
            attempted += 1;
            let generated = self
                .narration
                .generate(
                    &listing,
                    &format!("exam_short_{}.mp3", exam.id),
                    MediaDir::ExamShortAudio,
                )
                .await;
            match generated {
                Some(path) => {
                    if let Err(e) = self.exam_repo.set_short_audio(exam.id, &path).await {
                        tracing::warn!(error = %e, exam_id = exam.id, "Failed to attach exam short audio");
                        failed += 1;
                    }
                }
                None => failed += 1,
            }
        }

        if attempted > 0 {
            let status = if failed > 0 {
                NarrationStatus::Failed
            } else {
                NarrationStatus::Ready
            };
            if let Err(e) = self.exam_repo.set_narration_status(exam.id, status).await {
                tracing::warn!(error = %e, exam_id = exam.id, "Failed to record narration status");
            }
        }
    }

    async fn sync_question_narration(&self, previous: Option<&Question>, question: &Question) {
        let previous_text = previous.map(|p| p.text.as_str());
        if !should_regenerate(previous_text, &question.text, question.audio_file.is_some()) {
            return;
        }

        let generated = self
            .narration
            .generate(
                &question.text,
                &format!("q_{}.mp3", question.id),
                MediaDir::QuestionAudio,
            )
            .await;

        let mut failed = generated.is_none();
        if let Some(path) = generated {
            if let Err(e) = self.question_repo.set_audio_file(question.id, &path).await {
                tracing::warn!(error = %e, question_id = question.id, "Failed to attach question audio");
                failed = true;
            }
        }

        let status = if failed {
            NarrationStatus::Failed
        } else {
            NarrationStatus::Ready
        };
        if let Err(e) = self.question_repo.set_narration_status(question.id, status).await {
            tracing::warn!(error = %e, question_id = question.id, "Failed to record narration status");
        }
    }
}
