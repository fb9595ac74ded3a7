use serde::{Deserialize, Serialize};

/// The persisted resume bundle for one user.
///
/// Every scalar is optional on the wire; a missing key reads back as an
/// empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeRecord {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub summary: String,
    pub degree: String,
    pub institution: String,
    pub year: String,
    pub cgpa: String,
    pub skills: Vec<String>,
    pub exp_title: String,
    pub exp_org: String,
    pub exp_duration: String,
    pub exp_desc: String,
    pub achievements: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_keys_default_to_empty() {
        let record: ResumeRecord = serde_json::from_value(json!({ "name": "Ada" })).unwrap();
        assert_eq!(record.name, "Ada");
        assert_eq!(record.exp_title, "");
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_experience_keys_are_camel_case() {
        let record = ResumeRecord {
            exp_title: "Engineer".to_string(),
            exp_desc: "Built things".to_string(),
            ..Default::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["expTitle"], "Engineer");
        assert_eq!(value["expDesc"], "Built things");
        assert!(value.get("exp_title").is_none());
    }
}
