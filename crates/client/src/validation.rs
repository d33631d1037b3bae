//! Input validation and sanitization
//!
//! Everything here runs before a request body is assembled, so a rejected
//! input never produces a network call. Names, tags, and questions are
//! reduced to plain text; Q&A answers may keep a small, safe HTML subset.

use gpttrainer_domain::{FileUpload, QaPair, Result, TrainerError};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static HTML_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("HTML_TAG should compile - this is a bug"));

/// Elements removed together with their content, not just their tags
static DANGEROUS_BLOCK_PATTERN: &str = r"(?is)<script\b[^>]*>.*?</script>|<style\b[^>]*>.*?</style>|<iframe\b[^>]*>.*?</iframe>|<object\b[^>]*>.*?</object>|<embed\b[^>]*>.*?</embed>";

static DANGEROUS_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(DANGEROUS_BLOCK_PATTERN).expect("DANGEROUS_BLOCK should compile - this is a bug")
});

static ANY_TAG: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)</?([a-zA-Z][a-zA-Z0-9]*)\b[^>]*>")
        .expect("ANY_TAG should compile - this is a bug")
});

static A_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*"([^"]*)""#).expect("A_HREF should compile - this is a bug")
});

/// Tags an answer is allowed to keep, mirroring a permissive post-body policy
const ALLOWED_RICH_TAGS: [&str; 14] = [
    "a", "b", "blockquote", "br", "code", "em", "i", "li", "ol", "p", "pre", "strong", "u", "ul",
];

/// Reduce text to a single plain line: tags stripped, control characters
/// removed, runs of whitespace collapsed.
pub fn sanitize_text(input: &str) -> String {
    let without_tags = HTML_TAG.replace_all(input, "");
    let mut cleaned = String::with_capacity(without_tags.len());
    for ch in without_tags.chars() {
        if ch.is_control() || ch.is_whitespace() {
            if !cleaned.ends_with(' ') {
                cleaned.push(' ');
            }
        } else {
            cleaned.push(ch);
        }
    }
    cleaned.trim().to_string()
}

/// Sanitize rich text down to the allowed HTML subset.
///
/// Script-like elements disappear with their content; disallowed tags are
/// stripped while their inner text survives; allowed tags are rebuilt bare,
/// keeping only `href` on anchors.
pub fn sanitize_rich_text(input: &str) -> String {
    let without_blocks = DANGEROUS_BLOCK.replace_all(input, "");

    ANY_TAG
        .replace_all(&without_blocks, |caps: &regex::Captures<'_>| {
            let raw = &caps[0];
            let name = caps[1].to_lowercase();
            if !ALLOWED_RICH_TAGS.contains(&name.as_str()) {
                return String::new();
            }
            if raw.starts_with("</") {
                return format!("</{name}>");
            }
            if name == "a" {
                if let Some(href) = A_HREF.captures(raw).map(|c| c[1].to_string()) {
                    if href.starts_with("http://")
                        || href.starts_with("https://")
                        || href.starts_with("mailto:")
                    {
                        return format!(r#"<a href="{href}">"#);
                    }
                }
                return "<a>".to_string();
            }
            format!("<{name}>")
        })
        .trim()
        .to_string()
}

/// Sanitize a file name to its final path component with a conservative
/// character set.
pub fn sanitize_file_name(input: &str) -> String {
    let base = input.rsplit(['/', '\\']).next().unwrap_or(input);
    let cleaned: String = base
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '.' | '_' | '-'))
        .collect();
    cleaned.trim_matches('.').to_string()
}

/// Validate that a URL is well formed, http(s), and names a host.
///
/// # Errors
///
/// Returns [`TrainerError::Validation`] for anything else.
pub fn validate_url(url: &str) -> Result<String> {
    let parsed = Url::parse(url)
        .map_err(|err| TrainerError::Validation(format!("Invalid URL provided: {err}")))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(TrainerError::Validation(format!(
            "Invalid URL provided: unsupported scheme '{}'",
            parsed.scheme()
        )));
    }
    if parsed.host_str().is_none() {
        return Err(TrainerError::Validation("Invalid URL provided: missing host".to_string()));
    }

    Ok(parsed.to_string())
}

/// Validate a MIME type against the configured allow-list.
///
/// # Errors
///
/// Returns [`TrainerError::Validation`] if the type is not allowed.
pub fn validate_mime_type(mime_type: &str, allowed: &[String]) -> Result<()> {
    if allowed.iter().any(|candidate| candidate == mime_type) {
        return Ok(());
    }
    Err(TrainerError::Validation(format!("Invalid file type: {mime_type}")))
}

/// Validate that an upload handle points at a real, regular file.
///
/// # Errors
///
/// Returns [`TrainerError::Validation`] if it does not.
pub fn validate_upload(upload: &FileUpload) -> Result<()> {
    match std::fs::metadata(&upload.path) {
        Ok(metadata) if metadata.is_file() => Ok(()),
        _ => Err(TrainerError::Validation("Invalid file upload".to_string())),
    }
}

/// Validate and sanitize Q&A pairs: both sides must be non-empty, questions
/// become plain text, answers keep the safe HTML subset.
///
/// # Errors
///
/// Returns [`TrainerError::Validation`] on the first incomplete pair.
pub fn sanitize_qa_pairs(pairs: &[QaPair]) -> Result<Vec<QaPair>> {
    pairs
        .iter()
        .map(|pair| {
            if pair.question.trim().is_empty() || pair.answer.trim().is_empty() {
                return Err(TrainerError::Validation(
                    "Invalid Q&A pair format: question and answer are both required".to_string(),
                ));
            }
            Ok(QaPair {
                question: sanitize_text(&pair.question),
                answer: sanitize_rich_text(&pair.answer),
            })
        })
        .collect()
}
