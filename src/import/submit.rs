//! Batched participant submission
//!
//! Splits the assembled records into contiguous batches and submits them
//! strictly in sequence. A failure aborts immediately: batches already
//! accepted stay committed remotely with no local record of which.

use std::time::{Duration, Instant};

use anyhow::Result;
use log::debug;

use crate::api::{EventGateway, Participant};

/// Maximum participants per bulk submission call.
pub const BULK_SIZE: usize = 500;

/// Aggregate outcome of a submission run.
#[derive(Debug, Clone)]
pub struct PushReport {
    /// Participants the platform reported as added.
    pub accepted: u64,
    /// Participants submitted.
    pub total: usize,
    /// Wall-clock time spent submitting.
    pub elapsed: Duration,
}

/// Submit the records in batches of at most [`BULK_SIZE`], each with
/// `unsafe_form` enabled, and accumulate the accepted counts. An empty
/// record set performs no remote call.
pub async fn push_participants<G: EventGateway>(
    gateway: &G,
    participants: &[Participant],
) -> Result<PushReport> {
    let start = Instant::now();
    let mut accepted = 0;
    for (index, batch) in participants.chunks(BULK_SIZE).enumerate() {
        debug!("Submitting batch {} ({} participants)", index + 1, batch.len());
        let response = gateway.add_participants(batch, true).await?;
        accepted += response.total_added;
    }

    Ok(PushReport {
        accepted,
        total: participants.len(),
        elapsed: start.elapsed(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::import::testing::{Call, MockGateway, participant};

    #[tokio::test]
    async fn twelve_hundred_records_submit_as_three_batches() {
        let gateway = MockGateway::default();
        let participants: Vec<Participant> = (0..1200).map(participant).collect();

        let report = push_participants(&gateway, &participants).await.unwrap();

        let batches: Vec<(usize, bool)> = gateway
            .calls()
            .into_iter()
            .filter_map(|call| match call {
                Call::AddParticipants { count, unsafe_form } => Some((count, unsafe_form)),
                _ => None,
            })
            .collect();
        assert_eq!(batches, vec![(500, true), (500, true), (200, true)]);
        assert_eq!(report.accepted, 1200);
        assert_eq!(report.total, 1200);
    }

    #[tokio::test]
    async fn empty_input_makes_no_remote_call() {
        let gateway = MockGateway::default();
        let report = push_participants(&gateway, &[]).await.unwrap();

        assert!(gateway.calls().is_empty());
        assert_eq!(report.accepted, 0);
        assert_eq!(report.total, 0);
    }

    #[tokio::test]
    async fn accepted_counts_accumulate_across_batches() {
        let gateway = MockGateway {
            total_added_per_batch: Some(3),
            ..Default::default()
        };
        let participants: Vec<Participant> = (0..600).map(participant).collect();

        let report = push_participants(&gateway, &participants).await.unwrap();
        assert_eq!(report.accepted, 6);
        assert_eq!(report.total, 600);
    }
}
