//! Import pipeline
//!
//! Reconciles spreadsheet-level concepts (rate name, channel, column labels)
//! with the platform's identifiers (rate id, form id, question id) through
//! per-run registries, then submits the assembled participants in batches.
//! Single logical thread of control: every remote call completes before the
//! next dependent step runs, so the registries mutate freely in place.

pub mod forms;
pub mod mapper;
pub mod rates;
pub mod submit;

#[cfg(test)]
pub(crate) mod testing;

pub use forms::FormRegistry;
pub use mapper::build_participant;
pub use rates::RateRegistry;
pub use submit::{BULK_SIZE, PushReport, push_participants};

use anyhow::Result;

use crate::api::EventGateway;
use crate::spreadsheet::Row;

/// Run the full import of `rows` into the event: load both registries,
/// assemble one participant per row and push them in batches.
pub async fn run_import<G: EventGateway>(
    gateway: &G,
    event_id: &str,
    rows: &[Row],
) -> Result<PushReport> {
    let mut rates = RateRegistry::load(gateway, event_id).await?;
    let mut forms = FormRegistry::load(gateway, event_id).await?;

    let mut participants = Vec::with_capacity(rows.len());
    for row in rows {
        participants.push(build_participant(gateway, event_id, &mut rates, &mut forms, row).await?);
    }

    push_participants(gateway, &participants).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::testing::{Call, MockGateway, rate};
    use crate::spreadsheet::Row;

    #[tokio::test]
    async fn full_import_reuses_cached_rates_and_questions() {
        let gateway = MockGateway {
            rates: vec![rate("42", "2179", "VIP")],
            ..Default::default()
        };
        let rows = vec![
            Row::from_pairs(&[("tarif", "VIP"), ("nom", "Doe"), ("prenom", "Jane")]),
            Row::from_pairs(&[("tarif", "VIP"), ("nom", "Roe"), ("prenom", "Richard")]),
            Row::from_pairs(&[("tarif", "Standard"), ("nom", "Poe")]),
        ];

        let report = run_import(&gateway, "77", &rows).await.unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.accepted, 3);

        // VIP already exists on the platform; only Standard is created. The
        // tarif column maps to one custom question per form.
        assert_eq!(gateway.count_create_rate(), 1);
        assert_eq!(gateway.count_create_form(), 2);
        assert_eq!(gateway.count_add_question(), 2);

        let calls = gateway.calls();
        assert_eq!(
            calls[0],
            Call::ListRates {
                event_id: "77".to_string()
            }
        );
        assert_eq!(calls[1], Call::ListForms);
        assert!(matches!(
            calls.last(),
            Some(Call::AddParticipants {
                count: 3,
                unsafe_form: true
            })
        ));
    }

    #[tokio::test]
    async fn empty_sheet_loads_registries_but_submits_nothing() {
        let gateway = MockGateway::default();
        let report = run_import(&gateway, "77", &[]).await.unwrap();

        assert_eq!(report.total, 0);
        assert_eq!(report.accepted, 0);
        let calls = gateway.calls();
        assert_eq!(calls.len(), 2);
        assert!(matches!(calls[0], Call::ListRates { .. }));
        assert_eq!(calls[1], Call::ListForms);
    }
}
