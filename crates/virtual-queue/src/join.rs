use crate::{
    classify, transport::Transport, Client, Conflicts, Error, GuestId, JoinQueueRequest,
    JoinQueueResult, Outcome, Resource, TokenProvider,
};

impl<T: Transport, P: TokenProvider> Client<T, P> {
    /// Join `guests` to the queue `queue_id` as a single party.
    ///
    /// Guests which the service rejects are removed from the party, which is
    /// then resubmitted until it obtains a position, runs out of guests, or
    /// the queue reports that it's closed. Every rejected guest is reported
    /// in the returned conflicts with the reason of its (only) rejection.
    ///
    /// Rejections are not errors. Errors are returned only for failed requests
    /// and responses which can't be interpreted, in which case the join is
    /// abandoned without a partial result.
    #[tracing::instrument(skip(self, guests), fields(party = guests.len()), err)]
    pub async fn join_queue<G>(
        &self,
        queue_id: &str,
        guests: &[G],
    ) -> Result<JoinQueueResult, Error>
    where
        G: GuestId + Sync,
    {
        let mut party: Vec<&str> = guests.iter().map(|guest| guest.guest_id()).collect();
        let mut conflicts = Conflicts::new();
        let mut round = 0;

        // Each round either returns or strictly shrinks `party`.
        while !party.is_empty() {
            round += 1;
            tracing::debug!(round, party = party.len(), "submitting party to queue");

            let body = self
                .post(
                    Resource::JoinQueue,
                    &JoinQueueRequest {
                        queue_id,
                        guest_ids: &party,
                    },
                )
                .await?;

            let (rejected, closed) = match classify(queue_id, &party, &body)? {
                Outcome::Joined(position) => {
                    tracing::debug!(
                        round,
                        boarding_group = position.boarding_group,
                        "party joined queue"
                    );
                    return Ok(JoinQueueResult {
                        boarding_group: Some(position.boarding_group),
                        conflicts,
                        closed: false,
                    });
                }
                Outcome::Rejected { conflicts, closed } => (conflicts, closed),
            };

            if rejected.is_empty() && !closed {
                return Err(Error::UnresolvedConflicts {
                    queue_id: queue_id.to_string(),
                    response: body,
                });
            }

            for (guest_id, reason) in rejected {
                tracing::debug!(round, %guest_id, %reason, "guest was rejected");
                conflicts.entry(guest_id).or_insert(reason);
            }

            if closed {
                tracing::debug!(round, "queue is closed");
                return Ok(JoinQueueResult {
                    boarding_group: None,
                    conflicts,
                    closed: true,
                });
            }
            party.retain(|guest_id| !conflicts.contains_key(*guest_id));
        }

        Ok(JoinQueueResult {
            boarding_group: None,
            conflicts,
            closed: false,
        })
    }
}
