use chrono::{DateTime, NaiveDate, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Version assigned to newly created checklists.
pub const INITIAL_VERSION: &str = "1.0.0";

/// A reported metric (e.g. patient count) attached to a data control question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub id: String,
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    Standard,
    DataControl,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandardQuestion {
    pub id: String,
    pub title: String,
    pub score: f64,
    pub max_score: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sub_questions: Vec<StandardQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataControlQuestion {
    pub id: String,
    pub title: String,
    pub score: f64,
    pub max_score: f64,
    pub indicator: String,
    /// Reporting month. Accepts a plain date or a full timestamp as written
    /// by browser exports (`2024-01-01T00:00:00.000Z`).
    #[serde(deserialize_with = "deserialize_month")]
    pub month: NaiveDate,
    pub data_source: DataPoint,
    pub data_count: DataPoint,
    pub has_data_difference: bool,
}

fn deserialize_month<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse::<NaiveDate>()
        .or_else(|_| DateTime::parse_from_rfc3339(&raw).map(|dt| dt.with_timezone(&Utc).date_naive()))
        .map_err(|e| de::Error::custom(format!("invalid month {:?}: {}", raw, e)))
}

/// A checklist question, tagged by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Question {
    Standard(StandardQuestion),
    DataControl(DataControlQuestion),
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Question::Standard(q) => &q.id,
            Question::DataControl(q) => &q.id,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Question::Standard(q) => q.score,
            Question::DataControl(q) => q.score,
        }
    }

    pub fn max_score(&self) -> f64 {
        match self {
            Question::Standard(q) => q.max_score,
            Question::DataControl(q) => q.max_score,
        }
    }

    pub fn question_type(&self) -> QuestionType {
        match self {
            Question::Standard(_) => QuestionType::Standard,
            Question::DataControl(_) => QuestionType::DataControl,
        }
    }

    /// Direct sub-questions. Only standard questions have any.
    pub fn sub_questions(&self) -> &[StandardQuestion] {
        match self {
            Question::Standard(q) => &q.sub_questions,
            Question::DataControl(_) => &[],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: String,
    pub title: String,
    /// Cached total, refreshed by the scoring engine.
    #[serde(default)]
    pub score: f64,
    /// Cached maximum, refreshed by the scoring engine.
    #[serde(default)]
    pub max_score: f64,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checklist {
    pub id: String,
    pub health_program: String,
    pub organizational_level: String,
    pub department: String,
    #[serde(default)]
    pub sections: Vec<Section>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl Checklist {
    /// Create a checklist with a fresh id, initial version and timestamps.
    pub fn new(
        health_program: impl Into<String>,
        organizational_level: impl Into<String>,
        department: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: new_id("checklist"),
            health_program: health_program.into(),
            organizational_level: organizational_level.into(),
            department: department.into(),
            sections,
            created_at: Some(now),
            updated_at: Some(now),
            version: Some(INITIAL_VERSION.to_string()),
        }
    }

    /// Fill in missing creation time and version, and bump `updated_at`.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.created_at.get_or_insert(now);
        self.updated_at = Some(now);
        self.version.get_or_insert_with(|| INITIAL_VERSION.to_string());
    }
}

/// Generate a prefixed unique id, e.g. `section_0f6c...`.
pub fn new_id(prefix: &str) -> String {
    format!("{}_{}", prefix, Uuid::new_v4().simple())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseOption {
    Yes,
    No,
    Na,
}

/// A discrete answer to a question in the Yes/No/NA scoring model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResponse {
    pub question_id: String,
    pub response: ResponseOption,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
