use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::constants;
use super::error::ApiError;
use super::gateway::EventGateway;
use super::models::{
    AddParticipantsResponse, Form, FormInput, Participant, Question, QuestionInput, Rate,
    RateInput,
};

/// Authenticated client for the Weezevent legacy REST API.
///
/// Holds the access token obtained at construction; `access_token` and
/// `api_key` are appended to every later call. Listing endpoints take them as
/// query parameters, mutating endpoints as form fields next to a `data` JSON
/// payload.
pub struct WeezeventClient {
    http_client: Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

impl WeezeventClient {
    /// Acquire an access token for the given credentials and return a
    /// ready-to-use client. Authentication failures surface through the same
    /// error taxonomy as every other call.
    pub async fn authenticate(
        api_key: &str,
        username: &str,
        password: &str,
    ) -> Result<Self, ApiError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("weez-import/1.0")
            .build()?;

        let response = http_client
            .post(format!("{}{}", constants::BASE_URL, constants::ACCESS_TOKEN_PATH))
            .query(&[
                ("username", username),
                ("password", password),
                ("api_key", api_key),
            ])
            .send()
            .await?;
        let body: Value = extract_response(response).await?;

        let access_token = body
            .get("accessToken")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::Server {
                raw_body: body.to_string(),
                http_status: 200,
            })?
            .to_string();
        debug!("Access token obtained");

        Ok(Self {
            http_client,
            base_url: constants::BASE_URL.to_string(),
            api_key: api_key.to_string(),
            access_token,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Auth fields appended to listing calls as query parameters.
    fn auth_query(&self) -> [(&'static str, &str); 2] {
        [
            ("access_token", self.access_token.as_str()),
            ("api_key", self.api_key.as_str()),
        ]
    }

    /// Auth fields plus the JSON `data` payload, form-encoded, as the
    /// mutating endpoints expect.
    fn data_form<T: Serialize>(&self, data: &T) -> [(&'static str, String); 3] {
        [
            ("access_token", self.access_token.clone()),
            ("api_key", self.api_key.clone()),
            ("data", serde_json::json!(data).to_string()),
        ]
    }
}

#[async_trait]
impl EventGateway for WeezeventClient {
    async fn list_rates(&self, event_id: &str) -> Result<Vec<Rate>, ApiError> {
        let response = self
            .http_client
            .get(self.url(&constants::rates_path(event_id)))
            .query(&self.auth_query())
            .send()
            .await?;
        extract_response(response).await
    }

    async fn create_rate(&self, event_id: &str, input: &RateInput) -> Result<Rate, ApiError> {
        debug!("Creating rate '{}' on event {}", input.nom, event_id);
        let response = self
            .http_client
            .post(self.url(&constants::rates_path(event_id)))
            .form(&self.data_form(input))
            .send()
            .await?;
        extract_response(response).await
    }

    async fn list_forms(&self) -> Result<Vec<Form>, ApiError> {
        let response = self
            .http_client
            .get(self.url(constants::FORMS_PATH))
            .query(&self.auth_query())
            .send()
            .await?;
        extract_response(response).await
    }

    async fn create_form(&self, input: &FormInput) -> Result<Form, ApiError> {
        debug!("Creating form '{}'", input.title);
        let response = self
            .http_client
            .post(self.url(constants::FORMS_PATH))
            .form(&self.data_form(input))
            .send()
            .await?;
        extract_response(response).await
    }

    async fn add_question(
        &self,
        form_id: &str,
        input: &QuestionInput,
    ) -> Result<Question, ApiError> {
        debug!("Adding question '{}' to form {}", input.label, form_id);
        let response = self
            .http_client
            .put(self.url(&constants::question_path(form_id)))
            .form(&self.data_form(input))
            .send()
            .await?;
        extract_response(response).await
    }

    async fn add_participants(
        &self,
        participants: &[Participant],
        unsafe_form: bool,
    ) -> Result<AddParticipantsResponse, ApiError> {
        let payload = serde_json::json!({
            "participants": participants,
            "return_ticket_url": 0,
            "unsafe_form": unsafe_form,
        });
        let response = self
            .http_client
            .post(self.url(constants::PARTICIPANTS_PATH))
            .form(&self.data_form(&payload))
            .send()
            .await?;
        extract_response(response).await
    }

    async fn delete_participants(&self, participants: &[Participant]) -> Result<Value, ApiError> {
        let payload = serde_json::json!({ "participants": participants });
        let response = self
            .http_client
            .delete(self.url(constants::PARTICIPANTS_PATH))
            .form(&self.data_form(&payload))
            .send()
            .await?;
        extract_response(response).await
    }
}

/// Interpret a response: 200 bodies deserialize into the expected type,
/// anything else maps through the error envelope rules.
async fn extract_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let http_status = response.status().as_u16();
    let body = response.text().await?;
    if http_status != 200 {
        return Err(ApiError::from_error_body(http_status, &body));
    }
    serde_json::from_str(&body).map_err(|_| ApiError::Server {
        raw_body: body,
        http_status,
    })
}
