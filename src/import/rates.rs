//! Rate registry
//!
//! Per-event cache of platform rates keyed by (channel, distributor code),
//! loaded once from the platform and lazily extended when a requested pair
//! does not exist yet. Idempotent within a single run only: rates created
//! concurrently by someone else are not detected.

use std::collections::HashMap;

use anyhow::Result;
use log::{debug, info};

use crate::api::{EventGateway, Rate, RateInput};

/// Separator between channel id and distributor code in cache keys.
const KEY_SEPARATOR: &str = ":::";

pub struct RateRegistry {
    event_id: String,
    rates: HashMap<String, Rate>,
}

impl RateRegistry {
    /// Load the existing rates of an event. Rates without a distributor code
    /// cannot be addressed by the importer and are not indexed.
    pub async fn load<G: EventGateway>(gateway: &G, event_id: &str) -> Result<Self> {
        let listed = gateway.list_rates(event_id).await?;
        let mut rates = HashMap::new();
        for rate in listed {
            if rate.distributor_code().is_empty() {
                continue;
            }
            let key = composite_key(&rate.channel_id, rate.distributor_code());
            rates.insert(key, rate);
        }
        info!("Loaded {} distributor rates for event {event_id}", rates.len());
        Ok(Self {
            event_id: event_id.to_string(),
            rates,
        })
    }

    /// Resolve a (channel, distributor code) pair to a rate id, creating the
    /// rate when the pair is unknown. A cached entry wins as-is: name, price
    /// and category of the request are not compared against it.
    pub async fn resolve<G: EventGateway>(
        &mut self,
        gateway: &G,
        channel_id: i64,
        distributor_code: &str,
        name: &str,
        price: f64,
        category_id: Option<i64>,
        description: &str,
    ) -> Result<String> {
        let key = composite_key(&channel_id.to_string(), distributor_code);
        if let Some(rate) = self.rates.get(&key) {
            // TODO handle update of an existing rate? The cached entry wins
            // for now.
            return Ok(rate.id_billet.clone());
        }

        let input = RateInput {
            nom: name.to_string(),
            description: description.to_string(),
            id_code_distrib: distributor_code.to_string(),
            prix: price,
            channel_id,
            id_categorie: category_id.unwrap_or(0),
        };
        debug!("Rate for distributor '{distributor_code}' on channel {channel_id} missing, creating it");
        let rate = gateway.create_rate(&self.event_id, &input).await?;
        let rate_id = rate.id_billet.clone();
        self.rates.insert(key, rate);
        Ok(rate_id)
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn composite_key(channel_id: &str, distributor_code: &str) -> String {
    format!("{channel_id}{KEY_SEPARATOR}{distributor_code}")
}
