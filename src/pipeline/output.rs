use chrono::NaiveDate;
use inspecta_core::GenerationSummary;

/// A finished package.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub bytes: Vec<u8>,
    pub summary: GenerationSummary,
    /// Suggested download name, see [`download_filename`].
    pub filename: String,
}

/// `<title>_<YYYY-MM-DD>.docx`, where every character of the title that is
/// not an ASCII letter or digit becomes `_`.
pub fn download_filename(title: &str, date: NaiveDate) -> String {
    let sanitized: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{}_{}.docx", sanitized, date.format("%Y-%m-%d"))
}
