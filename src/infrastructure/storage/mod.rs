use chrono::Utc;
use std::path::{Path, PathBuf};

/// Where a stored file lives under the media root. Each content type gets
/// its own upload directory; student answers are grouped by submission day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaDir {
    ExamAudio,
    ExamShortAudio,
    QuestionAudio,
    CourseAudio,
    CourseIcons,
    LessonAudio,
    SegmentAudio,
    SegmentErrorAudio,
    Answers,
}

impl MediaDir {
    fn relative(&self) -> String {
        match self {
            MediaDir::ExamAudio => "exams_audio".to_string(),
            MediaDir::ExamShortAudio => "exams_audio/short".to_string(),
            MediaDir::QuestionAudio => "questions_audio".to_string(),
            MediaDir::CourseAudio => "courses_audio".to_string(),
            MediaDir::CourseIcons => "course_icons".to_string(),
            MediaDir::LessonAudio => "lessons_audio".to_string(),
            MediaDir::SegmentAudio => "segments_audio".to_string(),
            MediaDir::SegmentErrorAudio => "segments_audio/errors".to_string(),
            MediaDir::Answers => Utc::now().format("answers/%Y/%m/%d").to_string(),
        }
    }
}

/// Filesystem-backed media storage rooted at the configured media directory.
/// Stored paths are kept relative to the root; the presentation layer maps
/// them to URLs via [`media_url`].
pub struct MediaStorage {
    root: PathBuf,
}

impl MediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn absolute(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Scoped scratch directory for synthesis output before attachment.
    pub fn temp_dir(&self) -> PathBuf {
        self.root.join("temp_audio")
    }

    /// Ensure the temp directory exists and return the temp path for `filename`.
    pub async fn temp_path(&self, filename: &str) -> std::io::Result<PathBuf> {
        let dir = self.temp_dir();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(dir.join(filename))
    }

    /// Store bytes under `dir`, returning the media-relative path.
    pub async fn store(
        &self,
        dir: MediaDir,
        filename: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let rel_dir = dir.relative();
        let abs_dir = self.root.join(&rel_dir);
        tokio::fs::create_dir_all(&abs_dir).await?;
        tokio::fs::write(abs_dir.join(filename), bytes).await?;
        Ok(format!("{}/{}", rel_dir, filename))
    }
}

/// URL under which a stored media path is exposed by the HTTP layer.
pub fn media_url(relative: &str) -> String {
    format!("/media/{}", relative)
}
