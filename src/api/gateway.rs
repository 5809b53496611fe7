use async_trait::async_trait;
use serde_json::Value;

use super::error::ApiError;
use super::models::{
    AddParticipantsResponse, Form, FormInput, Participant, Question, QuestionInput, Rate,
    RateInput,
};

/// The remote operations the import pipeline performs against the ticketing
/// platform.
///
/// Production uses [`WeezeventClient`](super::WeezeventClient); tests
/// substitute a recording mock so the lazy creation calls made by the
/// registries stay auditable.
#[async_trait]
pub trait EventGateway {
    /// List the rates of an event.
    async fn list_rates(&self, event_id: &str) -> Result<Vec<Rate>, ApiError>;

    /// Create a rate on an event.
    async fn create_rate(&self, event_id: &str, input: &RateInput) -> Result<Rate, ApiError>;

    /// List every form the account can see; callers filter by event.
    async fn list_forms(&self) -> Result<Vec<Form>, ApiError>;

    /// Create a form.
    async fn create_form(&self, input: &FormInput) -> Result<Form, ApiError>;

    /// Add a question to a form.
    async fn add_question(
        &self,
        form_id: &str,
        input: &QuestionInput,
    ) -> Result<Question, ApiError>;

    /// Bulk-add participants.
    async fn add_participants(
        &self,
        participants: &[Participant],
        unsafe_form: bool,
    ) -> Result<AddParticipantsResponse, ApiError>;

    /// Bulk-delete participants.
    async fn delete_participants(&self, participants: &[Participant]) -> Result<Value, ApiError>;
}
