use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::domain::exam::{
    CreateExamRequest, CreateQuestionRequest, ExamResponse, QuestionResponse,
    StudentResponseResponse, UpdateExamRequest, UpdateQuestionRequest,
};
use crate::{
    domain::exam::{ExamService, ExamServiceApi},
    error::{AppError, AppResult},
};

pub struct ExamController {
    exam_service: Arc<ExamService>,
}

impl ExamController {
    pub fn new(exam_service: Arc<ExamService>) -> Self {
        Self { exam_service }
    }

    /// GET /api/exams - List exams
    pub async fn list_exams(
        State(controller): State<Arc<ExamController>>,
    ) -> AppResult<Json<Vec<ExamResponse>>> {
        let exams = controller.exam_service.list_exams().await?;
        Ok(Json(exams))
    }

    /// POST /api/exams - Create exam and narrate it
    pub async fn create_exam(
        State(controller): State<Arc<ExamController>>,
        Json(request): Json<CreateExamRequest>,
    ) -> AppResult<(StatusCode, Json<ExamResponse>)> {
        let exam = controller.exam_service.create_exam(request).await?;
        Ok((StatusCode::CREATED, Json(exam)))
    }

    /// GET /api/exams/{examId} - Fetch one exam
    pub async fn get_exam(
        State(controller): State<Arc<ExamController>>,
        Path(exam_id): Path<i64>,
    ) -> AppResult<Json<ExamResponse>> {
        let exam = controller.exam_service.get_exam(exam_id).await?;
        Ok(Json(exam))
    }

    /// PUT /api/exams/{examId} - Update exam, regenerating narration if the text changed
    pub async fn update_exam(
        State(controller): State<Arc<ExamController>>,
        Path(exam_id): Path<i64>,
        Json(request): Json<UpdateExamRequest>,
    ) -> AppResult<Json<ExamResponse>> {
        let exam = controller.exam_service.update_exam(exam_id, request).await?;
        Ok(Json(exam))
    }

    /// DELETE /api/exams/{examId} - Delete exam and its questions
    pub async fn delete_exam(
        State(controller): State<Arc<ExamController>>,
        Path(exam_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.exam_service.delete_exam(exam_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// GET /api/exams/{examId}/questions - Questions in playback order
    pub async fn list_questions(
        State(controller): State<Arc<ExamController>>,
        Path(exam_id): Path<i64>,
    ) -> AppResult<Json<Vec<QuestionResponse>>> {
        let questions = controller.exam_service.list_questions(exam_id).await?;
        Ok(Json(questions))
    }

    /// POST /api/exams/{examId}/questions - Create question and narrate it
    pub async fn create_question(
        State(controller): State<Arc<ExamController>>,
        Path(exam_id): Path<i64>,
        Json(request): Json<CreateQuestionRequest>,
    ) -> AppResult<(StatusCode, Json<QuestionResponse>)> {
        let question = controller
            .exam_service
            .create_question(exam_id, request)
            .await?;
        Ok((StatusCode::CREATED, Json(question)))
    }

    /// PUT /api/questions/{questionId} - Update question
    pub async fn update_question(
        State(controller): State<Arc<ExamController>>,
        Path(question_id): Path<i64>,
        Json(request): Json<UpdateQuestionRequest>,
    ) -> AppResult<Json<QuestionResponse>> {
        let question = controller
            .exam_service
            .update_question(question_id, request)
            .await?;
        Ok(Json(question))
    }

    /// DELETE /api/questions/{questionId} - Delete question
    pub async fn delete_question(
        State(controller): State<Arc<ExamController>>,
        Path(question_id): Path<i64>,
    ) -> AppResult<StatusCode> {
        controller.exam_service.delete_question(question_id).await?;
        Ok(StatusCode::NO_CONTENT)
    }

    /// POST /api/questions/{questionId}/responses - Upload a spoken answer.
    /// Multipart fields: `audio_data` (file, required) and `student_id` (text, optional).
    pub async fn submit_response(
        State(controller): State<Arc<ExamController>>,
        Path(question_id): Path<i64>,
        mut multipart: Multipart,
    ) -> AppResult<(StatusCode, Json<StudentResponseResponse>)> {
        let mut student_id: Option<i64> = None;
        let mut original_filename: Option<String> = None;
        let mut data: Option<Vec<u8>> = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
        {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("student_id") => {
                    let value = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("invalid student_id: {e}")))?;
                    if !value.is_empty() {
                        let parsed = value.parse::<i64>().map_err(|_| {
                            AppError::BadRequest("student_id must be an integer".to_string())
                        })?;
                        student_id = Some(parsed);
                    }
                }
                Some("audio_data") => {
                    original_filename = field.file_name().map(str::to_string);
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("invalid audio upload: {e}")))?;
                    data = Some(bytes.to_vec());
                }
                _ => {}
            }
        }

        let data = data
            .ok_or_else(|| AppError::BadRequest("missing audio_data field".to_string()))?;

        let response = controller
            .exam_service
            .submit_response(question_id, student_id, original_filename, data)
            .await?;
        Ok((StatusCode::CREATED, Json(response)))
    }

    /// GET /api/questions/{questionId}/responses - Submitted answers, oldest first
    pub async fn list_responses(
        State(controller): State<Arc<ExamController>>,
        Path(question_id): Path<i64>,
    ) -> AppResult<Json<Vec<StudentResponseResponse>>> {
        let responses = controller.exam_service.list_responses(question_id).await?;
        Ok(Json(responses))
    }
}
