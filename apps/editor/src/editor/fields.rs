//! The closed schema of resume form fields.
//!
//! Every field is enumerated once in `FieldId::ALL`; form reads are total over
//! that schema, so an unset field is simply the empty string.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::models::ResumeRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldId {
    Name,
    Email,
    Phone,
    Location,
    Linkedin,
    Summary,
    Degree,
    Institution,
    Year,
    Cgpa,
    ExpTitle,
    ExpOrg,
    ExpDuration,
    ExpDesc,
    Achievements,
}

impl FieldId {
    pub const ALL: [FieldId; 15] = [
        FieldId::Name,
        FieldId::Email,
        FieldId::Phone,
        FieldId::Location,
        FieldId::Linkedin,
        FieldId::Summary,
        FieldId::Degree,
        FieldId::Institution,
        FieldId::Year,
        FieldId::Cgpa,
        FieldId::ExpTitle,
        FieldId::ExpOrg,
        FieldId::ExpDuration,
        FieldId::ExpDesc,
        FieldId::Achievements,
    ];

    /// The form element id this field is bound to.
    pub fn element_id(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::Location => "location",
            FieldId::Linkedin => "linkedin",
            FieldId::Summary => "summary",
            FieldId::Degree => "degree",
            FieldId::Institution => "institution",
            FieldId::Year => "year",
            FieldId::Cgpa => "cgpa",
            FieldId::ExpTitle => "exp-title",
            FieldId::ExpOrg => "exp-org",
            FieldId::ExpDuration => "exp-duration",
            FieldId::ExpDesc => "exp-desc",
            FieldId::Achievements => "achievements",
        }
    }

    fn read(self, record: &ResumeRecord) -> &str {
        match self {
            FieldId::Name => &record.name,
            FieldId::Email => &record.email,
            FieldId::Phone => &record.phone,
            FieldId::Location => &record.location,
            FieldId::Linkedin => &record.linkedin,
            FieldId::Summary => &record.summary,
            FieldId::Degree => &record.degree,
            FieldId::Institution => &record.institution,
            FieldId::Year => &record.year,
            FieldId::Cgpa => &record.cgpa,
            FieldId::ExpTitle => &record.exp_title,
            FieldId::ExpOrg => &record.exp_org,
            FieldId::ExpDuration => &record.exp_duration,
            FieldId::ExpDesc => &record.exp_desc,
            FieldId::Achievements => &record.achievements,
        }
    }

    fn slot(self, record: &mut ResumeRecord) -> &mut String {
        match self {
            FieldId::Name => &mut record.name,
            FieldId::Email => &mut record.email,
            FieldId::Phone => &mut record.phone,
            FieldId::Location => &mut record.location,
            FieldId::Linkedin => &mut record.linkedin,
            FieldId::Summary => &mut record.summary,
            FieldId::Degree => &mut record.degree,
            FieldId::Institution => &mut record.institution,
            FieldId::Year => &mut record.year,
            FieldId::Cgpa => &mut record.cgpa,
            FieldId::ExpTitle => &mut record.exp_title,
            FieldId::ExpOrg => &mut record.exp_org,
            FieldId::ExpDuration => &mut record.exp_duration,
            FieldId::ExpDesc => &mut record.exp_desc,
            FieldId::Achievements => &mut record.achievements,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.element_id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown form field '{}'", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .into_iter()
            .find(|f| f.element_id() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

impl Serialize for FieldId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.element_id())
    }
}

/// Current values of every form field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormValues {
    values: BTreeMap<FieldId, String>,
}

impl FormValues {
    /// Populates the form from a stored resume; fields absent from the
    /// record come back empty.
    pub fn from_resume(record: &ResumeRecord) -> Self {
        let mut form = FormValues::default();
        for field in FieldId::ALL {
            form.set(field, field.read(record));
        }
        form
    }

    pub fn get(&self, field: FieldId) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: FieldId, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Builds a complete resume from the form and the given skills.
    pub fn to_resume(&self, skills: &[String]) -> ResumeRecord {
        let mut record = ResumeRecord {
            skills: skills.to_vec(),
            ..Default::default()
        };
        for field in FieldId::ALL {
            *field.slot(&mut record) = self.get(field).to_string();
        }
        record
    }
}

impl Serialize for FormValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FieldId::ALL.len()))?;
        for field in FieldId::ALL {
            map.serialize_entry(field.element_id(), self.get(field))?;
        }
        map.end()
    }
}
