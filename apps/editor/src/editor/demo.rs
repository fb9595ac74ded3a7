//! Fixed sample resume used by the "try a demo" action.

use crate::editor::fields::FieldId;

pub const DEMO_FIELDS: [(FieldId, &str); 15] = [
    (FieldId::Name, "John Doe"),
    (FieldId::Email, "john.doe@example.com"),
    (FieldId::Phone, "+1 (555) 123-4567"),
    (FieldId::Location, "New York, NY"),
    (FieldId::Linkedin, "linkedin.com/in/johndoe"),
    (
        FieldId::Summary,
        "Experienced professional with expertise in software development and project management.",
    ),
    (FieldId::Degree, "Bachelor of Science in Computer Science"),
    (FieldId::Institution, "University of Technology"),
    (FieldId::Year, "2020"),
    (FieldId::Cgpa, "3.8"),
    (FieldId::ExpTitle, "Software Engineer"),
    (FieldId::ExpOrg, "Tech Solutions Inc."),
    (FieldId::ExpDuration, "Jan 2021 - Present"),
    (
        FieldId::ExpDesc,
        "Developed and maintained web applications using modern technologies.",
    ),
    (
        FieldId::Achievements,
        "Certified AWS Developer, Led team of 5 developers on major project",
    ),
];

pub const DEMO_SKILLS: [&str; 4] = ["JavaScript", "React", "Node.js", "Project Management"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_covers_every_field_once() {
        for field in FieldId::ALL {
            assert_eq!(
                DEMO_FIELDS.iter().filter(|(f, _)| *f == field).count(),
                1,
                "{field} must appear exactly once"
            );
        }
    }
}
