use serde::Serialize;

use crate::editor::preview::escape_html;

/// Result of trying to add a skill from the skill input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddSkillOutcome {
    Added,
    Empty,
    Duplicate,
}

/// Ordered, duplicate-free working copy of the resume's skills.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SkillSet {
    items: Vec<String>,
}

impl SkillSet {
    /// Builds a set from stored skills, keeping the first occurrence of each.
    pub fn from_stored(stored: &[String]) -> Self {
        let mut set = SkillSet::default();
        for skill in stored {
            if !set.contains(skill) {
                set.items.push(skill.clone());
            }
        }
        set
    }

    /// Replaces the whole set, as the demo dataset does.
    pub fn replace(&mut self, skills: &[&str]) {
        self.items = skills.iter().map(|s| s.to_string()).collect();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.items.iter().any(|s| s == skill)
    }

    /// Trims `raw` and appends it unless it is blank or already present
    /// (case-sensitive).
    pub fn add(&mut self, raw: &str) -> AddSkillOutcome {
        let skill = raw.trim();
        if skill.is_empty() {
            return AddSkillOutcome::Empty;
        }
        if self.contains(skill) {
            return AddSkillOutcome::Duplicate;
        }
        self.items.push(skill.to_string());
        AddSkillOutcome::Added
    }

    /// Removes every entry equal to `tag`. Returns how many were dropped.
    pub fn remove(&mut self, tag: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|s| s != tag);
        before - self.items.len()
    }

    /// Click-to-remove tags shown in the skills editor.
    pub fn render_tags(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        self.items
            .iter()
            .map(|s| format!(r#"<span class="skill-tag">{}</span>"#, escape_html(s)))
            .collect()
    }
}
