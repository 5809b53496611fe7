//! Form registry
//!
//! Per-event cache of registration forms, indexed by form id and by every
//! rate id a form serves. Forms and questions are created lazily the first
//! time a submission needs them; those creations are only reflected in the
//! in-memory cache for the remainder of the run, never re-synced from the
//! platform.

use std::collections::HashMap;

use anyhow::{Result, anyhow};
use log::{debug, info};

use crate::api::{EventGateway, Form, FormInput, QuestionInput};
use crate::spreadsheet::Row;
use serde_json::{Map, Value};

/// Built-in participant attributes understood by the platform. Row values
/// under these keys bypass custom-question mapping and pass through
/// verbatim.
pub const DEFAULT_FIELDS: [&str; 29] = [
    "adresse",
    "adressedelivraison",
    "adresse_societe",
    "billet_prix",
    "blog",
    "choix_place",
    "civilite",
    "codepostaldelivraison",
    "code_postal",
    "code_postal_societe",
    "commentaires",
    "date_de_naissance",
    "email",
    "email_pro",
    "fonction",
    "nom",
    "pays",
    "paysdelivraison",
    "pays_societe",
    "portable",
    "portable_societe",
    "prenom",
    "site_internet",
    "societe",
    "telephone",
    "validity_date_start",
    "ville",
    "villedelivraison",
    "ville_societe",
];

pub struct FormRegistry {
    event_id: String,
    forms_by_id: HashMap<String, Form>,
    form_ids_by_rate: HashMap<String, String>,
}

impl FormRegistry {
    /// Load every form of the event. The listing endpoint is account-wide,
    /// so forms belonging to other events are dropped here.
    pub async fn load<G: EventGateway>(gateway: &G, event_id: &str) -> Result<Self> {
        let listed = gateway.list_forms().await?;
        let mut forms_by_id = HashMap::new();
        let mut form_ids_by_rate = HashMap::new();
        for form in listed {
            if form.event_id() != event_id {
                continue;
            }
            for rate_id in &form.tickets {
                form_ids_by_rate.insert(rate_id.clone(), form.id_form.clone());
            }
            forms_by_id.insert(form.id_form.clone(), form);
        }
        info!("Loaded {} forms for event {event_id}", forms_by_id.len());
        Ok(Self {
            event_id: event_id.to_string(),
            forms_by_id,
            form_ids_by_rate,
        })
    }

    /// Return the id of the form serving `rate_id`, creating a fresh form
    /// bound to that single rate when none exists. Additional rates are
    /// never attached to an existing form afterwards.
    pub async fn ensure_form_for_rate<G: EventGateway>(
        &mut self,
        gateway: &G,
        rate_id: &str,
    ) -> Result<String> {
        if let Some(form_id) = self.form_ids_by_rate.get(rate_id) {
            return Ok(form_id.clone());
        }

        let input = FormInput {
            id_evenement: self.event_id.clone(),
            title: format!("Form for {rate_id}"),
            questions_buyer: Vec::new(),
            questions_participant: Vec::new(),
            tickets: vec![rate_id.to_string()],
        };
        debug!("No form serves rate {rate_id}, creating one");
        let form = gateway.create_form(&input).await?;
        let form_id = form.id_form.clone();
        self.form_ids_by_rate
            .insert(rate_id.to_string(), form_id.clone());
        self.forms_by_id.insert(form_id.clone(), form);
        Ok(form_id)
    }

    /// Resolve a free-text column label to a question id on the given form,
    /// creating the question when no descriptor carries that exact label.
    /// Labels are compared case-sensitively and never deduplicated across
    /// forms.
    pub async fn question_id<G: EventGateway>(
        &mut self,
        gateway: &G,
        form_id: &str,
        label: &str,
    ) -> Result<String> {
        let form = self
            .forms_by_id
            .get_mut(form_id)
            .ok_or_else(|| anyhow!("form {form_id} is not loaded"))?;

        if let Some(question) = form
            .questions_participant
            .iter()
            .find(|question| question.label == label)
        {
            return Ok(question.id.clone());
        }

        let question = gateway
            .add_question(form_id, &QuestionInput::back_office_text(label))
            .await?;
        let question_id = question.id.clone();
        form.questions_participant.push(question);
        Ok(question_id)
    }

    /// Turn a spreadsheet row into the `form` payload of a participant:
    /// built-in field values pass through unchanged, every other column is
    /// stored under its question id, lazily creating the form and questions
    /// for `rate_id` as needed.
    pub async fn map_row<G: EventGateway>(
        &mut self,
        gateway: &G,
        rate_id: &str,
        row: &Row,
    ) -> Result<Map<String, Value>> {
        let mut mapped = Map::new();
        for (key, value) in row.fields() {
            if DEFAULT_FIELDS.contains(&key) {
                mapped.insert(key.to_string(), Value::String(value.to_string()));
                continue;
            }

            let form_id = self.ensure_form_for_rate(gateway, rate_id).await?;
            let question_id = self.question_id(gateway, &form_id, key).await?;
            mapped.insert(question_id, Value::String(value.to_string()));
        }
        Ok(mapped)
    }

    pub fn len(&self) -> usize {
        self.forms_by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.forms_by_id.is_empty()
    }
}
