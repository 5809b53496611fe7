//! Row-to-participant assembly
//!
//! Resolves each spreadsheet row's ticket tier through the rate registry and
//! its columns through the form registry, producing one submission-ready
//! participant per row.

use anyhow::Result;

use crate::api::{EventGateway, Participant};
use crate::import::forms::FormRegistry;
use crate::import::rates::RateRegistry;
use crate::spreadsheet::Row;

/// Distribution channel imported rates are created on.
pub const IMPORT_CHANNEL_ID: i64 = 2179;

/// Tier applied to rows that carry no `tarif` column.
pub const FALLBACK_TIER: &str = "WEEZ XLSX IMPORT";

/// Assemble the participant for one row. The tier name doubles as the rate's
/// distributor code and display name; the price is always 0, never read from
/// the row.
pub async fn build_participant<G: EventGateway>(
    gateway: &G,
    event_id: &str,
    rates: &mut RateRegistry,
    forms: &mut FormRegistry,
    row: &Row,
) -> Result<Participant> {
    let tier = row.get("tarif").unwrap_or(FALLBACK_TIER);
    let rate_id = rates
        .resolve(gateway, IMPORT_CHANNEL_ID, tier, tier, 0.0, None, "")
        .await?;
    let form = forms.map_row(gateway, &rate_id, row).await?;

    Ok(Participant {
        id_evenement: event_id.to_string(),
        id_billet: rate_id,
        nom: row.get("nom").unwrap_or("").to_string(),
        prenom: row.get("prenom").unwrap_or("").to_string(),
        form,
        delete: false,
        notify: false,
        barcode_id: non_empty(row.get("barcode_id")),
        email: non_empty(row.get("email")),
    })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}
