//! Recording gateway mock for registry and submission tests.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::api::{
    AddParticipantsResponse, ApiError, EventGateway, Form, FormInput, Participant, Question,
    QuestionInput, Rate, RateInput,
};

/// One remote call served by the mock, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ListRates { event_id: String },
    CreateRate { event_id: String, input: RateInput },
    ListForms,
    CreateForm { input: FormInput },
    AddQuestion { form_id: String, input: QuestionInput },
    AddParticipants { count: usize, unsafe_form: bool },
    DeleteParticipants { count: usize },
}

/// Gateway double that answers from preloaded fixtures, fabricates
/// deterministic identifiers for creations and records every call.
#[derive(Default)]
pub struct MockGateway {
    pub rates: Vec<Rate>,
    pub forms: Vec<Form>,
    /// Fixed `total_added` per batch; defaults to echoing the batch size.
    pub total_added_per_batch: Option<u64>,
    pub calls: Mutex<Vec<Call>>,
    pub created_rates: Mutex<u64>,
    pub created_forms: Mutex<u64>,
    pub created_questions: Mutex<u64>,
}

impl MockGateway {
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count_create_rate(&self) -> usize {
        self.count(|call| matches!(call, Call::CreateRate { .. }))
    }

    pub fn count_create_form(&self) -> usize {
        self.count(|call| matches!(call, Call::CreateForm { .. }))
    }

    pub fn count_add_question(&self) -> usize {
        self.count(|call| matches!(call, Call::AddQuestion { .. }))
    }

    fn count(&self, predicate: impl Fn(&Call) -> bool) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| predicate(c)).count()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn next(counter: &Mutex<u64>) -> u64 {
        let mut value = counter.lock().unwrap();
        *value += 1;
        *value
    }
}

#[async_trait]
impl EventGateway for MockGateway {
    async fn list_rates(&self, event_id: &str) -> Result<Vec<Rate>, ApiError> {
        self.record(Call::ListRates {
            event_id: event_id.to_string(),
        });
        Ok(self.rates.clone())
    }

    async fn create_rate(&self, event_id: &str, input: &RateInput) -> Result<Rate, ApiError> {
        self.record(Call::CreateRate {
            event_id: event_id.to_string(),
            input: input.clone(),
        });
        Ok(Rate {
            id_billet: format!("rate-{}", Self::next(&self.created_rates)),
            channel_id: input.channel_id.to_string(),
            id_code_distrib: Some(input.id_code_distrib.clone()),
            nom: input.nom.clone(),
            prix: input.prix,
            id_categorie: Some(input.id_categorie),
            description: input.description.clone(),
        })
    }

    async fn list_forms(&self) -> Result<Vec<Form>, ApiError> {
        self.record(Call::ListForms);
        Ok(self.forms.clone())
    }

    async fn create_form(&self, input: &FormInput) -> Result<Form, ApiError> {
        self.record(Call::CreateForm {
            input: input.clone(),
        });
        Ok(Form {
            id_form: format!("form-{}", Self::next(&self.created_forms)),
            id_evenement: Some(input.id_evenement.clone()),
            questions_participant: input.questions_participant.clone(),
            tickets: input.tickets.clone(),
        })
    }

    async fn add_question(
        &self,
        form_id: &str,
        input: &QuestionInput,
    ) -> Result<Question, ApiError> {
        self.record(Call::AddQuestion {
            form_id: form_id.to_string(),
            input: input.clone(),
        });
        Ok(Question {
            id: format!("question-{}", Self::next(&self.created_questions)),
            label: input.label.clone(),
        })
    }

    async fn add_participants(
        &self,
        participants: &[Participant],
        unsafe_form: bool,
    ) -> Result<AddParticipantsResponse, ApiError> {
        self.record(Call::AddParticipants {
            count: participants.len(),
            unsafe_form,
        });
        Ok(AddParticipantsResponse {
            total_added: self
                .total_added_per_batch
                .unwrap_or(participants.len() as u64),
        })
    }

    async fn delete_participants(&self, participants: &[Participant]) -> Result<Value, ApiError> {
        self.record(Call::DeleteParticipants {
            count: participants.len(),
        });
        Ok(Value::Null)
    }
}

/// Fixture rate with the given id, channel and distributor code.
pub fn rate(id_billet: &str, channel_id: &str, distributor_code: &str) -> Rate {
    Rate {
        id_billet: id_billet.to_string(),
        channel_id: channel_id.to_string(),
        id_code_distrib: if distributor_code.is_empty() {
            None
        } else {
            Some(distributor_code.to_string())
        },
        nom: distributor_code.to_string(),
        prix: 0.0,
        id_categorie: None,
        description: String::new(),
    }
}

/// Fixture form serving a single rate, with no questions yet.
pub fn form_for_rate(id_form: &str, event_id: &str, rate_id: &str) -> Form {
    Form {
        id_form: id_form.to_string(),
        id_evenement: Some(event_id.to_string()),
        questions_participant: Vec::new(),
        tickets: vec![rate_id.to_string()],
    }
}

/// Fixture participant, distinguishable by index.
pub fn participant(index: usize) -> Participant {
    Participant {
        id_evenement: "77".to_string(),
        id_billet: "42".to_string(),
        nom: format!("Attendee {index}"),
        prenom: String::new(),
        form: Map::new(),
        delete: false,
        notify: false,
        barcode_id: None,
        email: None,
    }
}
