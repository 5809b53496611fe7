use serde::de::{Deserializer, Error as DeError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A ticket tier ("tarif") attached to an event.
///
/// Lookup identity is the (channel, distributor code) pair; everything else
/// is descriptive.
#[derive(Debug, Clone, Deserialize)]
pub struct Rate {
    #[serde(deserialize_with = "string_or_number")]
    pub id_billet: String,
    #[serde(deserialize_with = "string_or_number")]
    pub channel_id: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id_code_distrib: Option<String>,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prix: f64,
    #[serde(default)]
    pub id_categorie: Option<i64>,
    #[serde(default)]
    pub description: String,
}

impl Rate {
    pub fn distributor_code(&self) -> &str {
        self.id_code_distrib.as_deref().unwrap_or("")
    }
}

/// Payload for rate creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateInput {
    pub nom: String,
    pub description: String,
    pub id_code_distrib: String,
    pub prix: f64,
    pub channel_id: i64,
    pub id_categorie: i64,
}

/// A registration form bound to one or more rates.
#[derive(Debug, Clone, Deserialize)]
pub struct Form {
    #[serde(deserialize_with = "string_or_number")]
    pub id_form: String,
    #[serde(default, deserialize_with = "opt_string_or_number")]
    pub id_evenement: Option<String>,
    #[serde(default)]
    pub questions_participant: Vec<Question>,
    #[serde(default, deserialize_with = "vec_string_or_number")]
    pub tickets: Vec<String>,
}

impl Form {
    pub fn event_id(&self) -> &str {
        self.id_evenement.as_deref().unwrap_or("")
    }
}

/// Payload for form creation. Forms are created bound to exactly one rate
/// and with empty question lists.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormInput {
    pub id_evenement: String,
    pub title: String,
    pub questions_buyer: Vec<Question>,
    pub questions_participant: Vec<Question>,
    pub tickets: Vec<String>,
}

/// One custom form field, identified by its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub label: String,
}

/// Payload for question creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionInput {
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    pub field_type: String,
    pub buyer: u8,
    pub bo_only: u8,
}

impl QuestionInput {
    /// A free-text question visible in the back office only, the shape used
    /// for every imported spreadsheet column.
    pub fn back_office_text(label: &str) -> Self {
        Self {
            kind: "custom".to_string(),
            label: label.to_string(),
            field_type: "textfield".to_string(),
            buyer: 0,
            bo_only: 1,
        }
    }
}

/// One attendee record as submitted to the bulk participants endpoint.
/// Ephemeral: assembled per spreadsheet row, not retained after submission.
#[derive(Debug, Clone, Serialize)]
pub struct Participant {
    pub id_evenement: String,
    pub id_billet: String,
    pub nom: String,
    pub prenom: String,
    pub form: Map<String, Value>,
    pub delete: bool,
    pub notify: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Response of the bulk participants endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AddParticipantsResponse {
    #[serde(default)]
    pub total_added: u64,
}

/// The legacy API returns identifiers as JSON numbers on some endpoints and
/// strings on others; fold both into `String`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}

fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(D::Error::custom(format!(
            "expected string, number or null, got {other}"
        ))),
    }
}

fn vec_string_or_number<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let values = Vec::<Value>::deserialize(deserializer)?;
    values
        .into_iter()
        .map(|value| match value {
            Value::String(s) => Ok(s),
            Value::Number(n) => Ok(n.to_string()),
            other => Err(D::Error::custom(format!(
                "expected string or number, got {other}"
            ))),
        })
        .collect()
}
