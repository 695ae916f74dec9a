//! Pitch prompt templating and response parsing

use crate::config::PitchConfig;
use crate::lead::Lead;
use crate::pitch::PitchError;
use serde::Serialize;
use std::path::Path;

/// Prompt used when no template file is configured
pub const DEFAULT_TEMPLATE: &str = r#"You write short, friendly cold emails to local businesses.
Return exactly two parts in plain text:

1) A subject line on the first line, exactly:
Subject: More clients for {name}

2) A blank line, then the email body (under 150 words).

Personalize the body with one concrete detail taken from the website
content below. Do not invent facts that are not in the content. Close by
asking whether they are open to a quick 15-minute call.

Business details:
Name: {name}
City: {city}
Reviews: {review_count}
Google Maps URL: {maps_url}

Website content:
"""{site_text}"""
"#;

/// Everything a template can mention about one lead
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchRequest {
    pub name: String,
    pub city: String,
    pub review_count: Option<u32>,
    pub maps_url: String,
    /// Text crawled from the lead's website
    pub site_text: String,
}

impl PitchRequest {
    pub fn from_lead(lead: &Lead, site_text: impl Into<String>) -> Self {
        Self {
            name: lead.name.clone(),
            city: lead.city.clone(),
            review_count: lead.review_count,
            maps_url: lead.maps_url(),
            site_text: site_text.into(),
        }
    }

    /// Value substituted for `{placeholder}`, None for unknown names
    fn field(&self, placeholder: &str) -> Option<String> {
        match placeholder {
            "name" => Some(self.name.clone()),
            "city" => Some(self.city.clone()),
            "review_count" => Some(
                self.review_count
                    .map(|count| count.to_string())
                    .unwrap_or_else(|| "unknown".to_string()),
            ),
            "maps_url" => Some(self.maps_url.clone()),
            "site_text" => Some(self.site_text.trim().to_string()),
            _ => None,
        }
    }
}

/// A generated email
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Pitch {
    pub subject: String,
    pub body: String,
}

/// Prompt template with `{name}`, `{city}`, `{review_count}`, `{maps_url}`
/// and `{site_text}` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PitchTemplate {
    text: String,
}

impl Default for PitchTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_TEMPLATE)
    }
}

impl PitchTemplate {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Reads a template file
    pub fn load(path: &Path) -> Result<Self, PitchError> {
        Ok(Self::new(std::fs::read_to_string(path)?))
    }

    /// The configured template file, or the built-in template
    pub fn from_config(config: &PitchConfig) -> Result<Self, PitchError> {
        match &config.template_path {
            Some(path) => Self::load(Path::new(path)),
            None => Ok(Self::default()),
        }
    }

    /// Fills in the placeholders
    ///
    /// Substitution is a single left-to-right pass, so braces inside the
    /// substituted values (site text in particular) are never expanded.
    /// Unknown `{...}` sequences are left as written.
    pub fn render(&self, request: &PitchRequest) -> String {
        let mut out = String::with_capacity(self.text.len() + request.site_text.len());
        let mut rest = self.text.as_str();

        while let Some(start) = rest.find('{') {
            out.push_str(&rest[..start]);
            let tail = &rest[start..];

            let substitution = tail
                .find('}')
                .and_then(|end| request.field(&tail[1..end]).map(|value| (end, value)));

            match substitution {
                Some((end, value)) => {
                    out.push_str(&value);
                    rest = &tail[end + 1..];
                }
                None => {
                    out.push('{');
                    rest = &tail[1..];
                }
            }
        }

        out.push_str(rest);
        out
    }
}

/// Splits model output into subject and body
///
/// The subject is everything before the first blank line, with a literal
/// `Subject:` and any leading punctuation removed. The body is the rest,
/// trimmed.
///
/// # Example
///
/// ```
/// use leadline::pitch::parse_pitch;
///
/// let pitch = parse_pitch("**Subject: Hello there\n\nHi Sam,\nQuick idea.").unwrap();
/// assert_eq!(pitch.subject, "Hello there");
/// assert_eq!(pitch.body, "Hi Sam,\nQuick idea.");
/// ```
pub fn parse_pitch(output: &str) -> Result<Pitch, PitchError> {
    let output = output.replace("\r\n", "\n");
    let (subject_line, body) = output
        .trim()
        .split_once("\n\n")
        .ok_or_else(|| PitchError::Malformed("no blank line after the subject".to_string()))?;

    let subject = subject_line
        .replace("Subject:", "")
        .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
        .trim()
        .to_string();
    let body = body.trim().to_string();

    if subject.is_empty() {
        return Err(PitchError::Malformed("empty subject".to_string()));
    }
    if body.is_empty() {
        return Err(PitchError::Malformed("empty body".to_string()));
    }

    Ok(Pitch { subject, body })
}
