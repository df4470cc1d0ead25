//! Narration text templates: the per-entity composition rules for the text
//! fed to the synthesis engine. Wording (Arabic) follows the original
//! platform copy; the welcome template embeds the player key bindings.

/// Full welcome/instructions narration played when a student enters an exam.
pub fn exam_welcome(title: &str, description: &str) -> String {
    format!(
        "أهلاً بك في {title}. \
         {description}. \
         تعليمات هامة: \
         اضغط مسافة ضغطة واحدة لإعادة سماع السؤال. \
         اضغط مسافة ضغطتين بسرعة لبدء أو إيقاف التسجيل. \
         ملاحظة: يمكنك إعادة التسجيل أكثر من مرة، وسيتم اعتماد آخر محاولة. \
         اضغط إنتر لحفظ الإجابة والانتقال للسؤال التالي. \
         استخدم الأسهم للتنقل. \
         حظاً موفقاً في امتحانك!"
    )
}

/// Short narration for the exam listing.
pub fn exam_listing(title: &str, description: &str) -> String {
    format!("اختبار: {title}. {description}")
}

/// Course intro narration.
pub fn course_intro(title: &str, description: &str) -> String {
    format!("دورة: {title}. {description}")
}

/// Lesson intro narration.
pub fn lesson_intro(title: &str) -> String {
    format!("درس: {title}")
}
