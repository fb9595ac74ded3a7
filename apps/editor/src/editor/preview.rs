//! Live preview composition.
//!
//! Scalar fields are mirrored as plain text. The education line and the
//! experience block are composed from optional clauses, each emitted only
//! when its source value is non-empty.

use serde::Serialize;

use crate::editor::fields::{FieldId, FormValues};
use crate::editor::skills::SkillSet;

pub const NAME_PLACEHOLDER: &str = "Your Name";

/// Experience entry as shown in the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceBlock {
    pub title: String,
    pub org: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
}

impl ExperienceBlock {
    pub fn compose(title: &str, org: &str, duration: &str, description: &str) -> Self {
        ExperienceBlock {
            title: title.to_string(),
            org: non_empty(org),
            duration: non_empty(duration),
            description: non_empty(description),
        }
    }

    /// `<strong>title</strong>[ at org][<br>duration][<br>description]`
    pub fn to_html(&self) -> String {
        let mut html = format!("<strong>{}</strong>", escape_html(&self.title));
        if let Some(org) = &self.org {
            html.push_str(" at ");
            html.push_str(&escape_html(org));
        }
        if let Some(duration) = &self.duration {
            html.push_str("<br>");
            html.push_str(&escape_html(duration));
        }
        if let Some(description) = &self.description {
            html.push_str("<br>");
            html.push_str(&escape_html(description));
        }
        html
    }

    /// Visible text of the block; line breaks carry no text.
    #[cfg(test)]
    pub fn text(&self) -> String {
        let mut text = self.title.clone();
        if let Some(org) = &self.org {
            text.push_str(" at ");
            text.push_str(org);
        }
        for part in [&self.duration, &self.description].into_iter().flatten() {
            text.push_str(part);
        }
        text
    }
}

/// Mirror of the form as rendered in the preview pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Preview {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
    pub education: String,
    pub skills: Vec<String>,
    pub experience: ExperienceBlock,
    pub achievements: String,
}

impl Preview {
    pub fn render(form: &FormValues, skills: &SkillSet) -> Self {
        let name = match form.get(FieldId::Name) {
            "" => NAME_PLACEHOLDER.to_string(),
            n => n.to_string(),
        };
        Preview {
            name,
            email: form.get(FieldId::Email).to_string(),
            phone: form.get(FieldId::Phone).to_string(),
            location: form.get(FieldId::Location).to_string(),
            linkedin: form.get(FieldId::Linkedin).to_string(),
            summary: form.get(FieldId::Summary).to_string(),
            education: compose_education(
                form.get(FieldId::Degree),
                form.get(FieldId::Institution),
                form.get(FieldId::Year),
                form.get(FieldId::Cgpa),
            ),
            skills: skills.as_slice().to_vec(),
            experience: ExperienceBlock::compose(
                form.get(FieldId::ExpTitle),
                form.get(FieldId::ExpOrg),
                form.get(FieldId::ExpDuration),
                form.get(FieldId::ExpDesc),
            ),
            achievements: form.get(FieldId::Achievements).to_string(),
        }
    }

    /// `<span>skill</span>` per skill, as shown in the preview.
    pub fn skills_html(&self) -> String {
        self.skills
            .iter()
            .map(|s| format!("<span>{}</span>", escape_html(s)))
            .collect()
    }

    /// Preview fragment keyed by the preview element ids.
    pub fn to_html(&self) -> String {
        let mut html = String::new();
        let text_sections = [
            ("preview-name", &self.name),
            ("preview-email", &self.email),
            ("preview-phone", &self.phone),
            ("preview-location", &self.location),
            ("preview-linkedin", &self.linkedin),
            ("preview-summary", &self.summary),
            ("preview-education", &self.education),
        ];
        for (id, text) in text_sections {
            html.push_str(&format!(r#"<div id="{id}">{}</div>"#, escape_html(text)));
            html.push('\n');
        }
        html.push_str(&format!(
            r#"<div id="preview-skills">{}</div>"#,
            self.skills_html()
        ));
        html.push('\n');
        html.push_str(&format!(
            r#"<div id="preview-experience">{}</div>"#,
            self.experience.to_html()
        ));
        html.push('\n');
        html.push_str(&format!(
            r#"<div id="preview-achievements">{}</div>"#,
            escape_html(&self.achievements)
        ));
        html.push('\n');
        html
    }

    /// Standalone document handed to the platform print flow.
    pub fn to_print_document(&self) -> String {
        let mut doc = String::from("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
        doc.push_str(&format!("<title>{}</title>\n", escape_html(&self.name)));
        doc.push_str("</head>\n<body>\n<section id=\"resume-preview\">\n");
        doc.push_str(&self.to_html());
        doc.push_str("</section>\n</body>\n</html>\n");
        doc
    }
}

/// `{degree}[ from {institution}][, {year}][ (CGPA: {cgpa})]`
///
/// " from " is only emitted together with an institution.
pub fn compose_education(degree: &str, institution: &str, year: &str, cgpa: &str) -> String {
    let mut line = degree.to_string();
    if !institution.is_empty() {
        line.push_str(" from ");
        line.push_str(institution);
    }
    if !year.is_empty() {
        line.push_str(", ");
        line.push_str(year);
    }
    if !cgpa.is_empty() {
        line.push_str(&format!(" (CGPA: {cgpa})"));
    }
    line
}

pub(crate) fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}
