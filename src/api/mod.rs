//! Weezevent legacy REST API module
//!
//! Typed wrapper over the authenticated remote calls the importer needs:
//! access-token acquisition, rate and form listing/creation, question upsert
//! and bulk participant submission. Every call blocks its caller until the
//! platform answers; there is no retry policy, a remote failure aborts the
//! run.

pub mod client;
pub mod constants;
pub mod error;
pub mod gateway;
pub mod models;

pub use client::WeezeventClient;
pub use error::ApiError;
pub use gateway::EventGateway;
pub use models::{
    AddParticipantsResponse, Form, FormInput, Participant, Question, QuestionInput, Rate,
    RateInput,
};
