//! API constants and endpoint paths for the Weezevent legacy API

/// Fixed base URL of the legacy API.
pub const BASE_URL: &str = "https://api.weezevent.com";

/// Access-token acquisition endpoint.
pub const ACCESS_TOKEN_PATH: &str = "/auth/access_token";

/// Bulk participant add/delete endpoint.
pub const PARTICIPANTS_PATH: &str = "/v3/participants";

/// Form listing/creation endpoint.
pub const FORMS_PATH: &str = "/v3/form";

/// Question upsert endpoint for a form.
pub fn question_path(form_id: &str) -> String {
    format!("/v3/form/{form_id}/question")
}

/// Rate listing/creation endpoint for an event.
pub fn rates_path(event_id: &str) -> String {
    format!("/v3/evenement/{event_id}/tarifs")
}
