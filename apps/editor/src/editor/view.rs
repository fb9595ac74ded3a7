use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_STAT_ANIMATION_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewSection {
    Landing,
    Editor,
}

impl FromStr for ViewSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "landing" => Ok(ViewSection::Landing),
            "editor" | "resume" => Ok(ViewSection::Editor),
            other => Err(format!("unknown view section '{other}'")),
        }
    }
}

/// Hidden flags of the landing and resume sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub landing_hidden: bool,
    pub editor_hidden: bool,
}

impl ViewState {
    pub fn starting_at(section: ViewSection) -> Self {
        let mut view = ViewState {
            landing_hidden: false,
            editor_hidden: false,
        };
        view.show(section);
        view
    }

    /// Reveals `section` and hides the other one.
    pub fn show(&mut self, section: ViewSection) {
        self.landing_hidden = section != ViewSection::Landing;
        self.editor_hidden = section != ViewSection::Editor;
    }

    #[cfg(test)]
    pub fn visible(&self) -> Option<ViewSection> {
        match (self.landing_hidden, self.editor_hidden) {
            (false, true) => Some(ViewSection::Landing),
            (true, false) => Some(ViewSection::Editor),
            _ => None,
        }
    }
}

/// One-time visual emphasis applied to an animated stat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Emphasis {
    pub font_weight: u16,
    pub scale: f32,
}

pub const STAT_EMPHASIS: Emphasis = Emphasis {
    font_weight: 800,
    scale: 1.1,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatDisplay {
    pub label: String,
    pub value: String,
    pub animated: bool,
    pub emphasis: Option<Emphasis>,
}

/// Statistic displays of the landing hero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StatBoard {
    stats: Vec<StatDisplay>,
}

impl StatBoard {
    pub fn new(stats: &[(&str, &str)]) -> Self {
        StatBoard {
            stats: stats
                .iter()
                .map(|(label, value)| StatDisplay {
                    label: label.to_string(),
                    value: value.to_string(),
                    animated: false,
                    emphasis: None,
                })
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn stats(&self) -> &[StatDisplay] {
        &self.stats
    }

    /// Emphasizes every stat not yet animated. Returns how many changed.
    pub fn animate(&mut self) -> usize {
        let mut changed = 0;
        for stat in self.stats.iter_mut().filter(|s| !s.animated) {
            stat.emphasis = Some(STAT_EMPHASIS);
            stat.animated = true;
            changed += 1;
        }
        changed
    }
}

impl Default for StatBoard {
    fn default() -> Self {
        StatBoard::new(&[
            ("Resume Sections", "6"),
            ("Live Preview", "100%"),
            ("Export", "PDF"),
        ])
    }
}
