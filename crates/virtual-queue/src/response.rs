use crate::{ConflictType, Conflicts, Error, GuestId, Position};
use serde::Deserialize;

/// Response statuses of the joinQueue resource.
const JOIN_QUEUE_STATUSES: &[&str] = &["OK", "INVALID_GUEST", "CLOSED_QUEUE"];

#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinQueueRequest<'a> {
    pub queue_id: &'a str,
    pub guest_ids: &'a [&'a str],
}

/// JoinQueueResponse is the response of the joinQueue resource,
/// discriminated by its `responseStatus`.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(tag = "responseStatus")]
pub enum JoinQueueResponse {
    /// The party joined the queue. The service also returns `queues` and
    /// `guests` arrays alongside positions, which aren't used.
    /// Positions span all queues of the guests, and only the matched one is
    /// decoded (see [`classify`]).
    #[serde(rename = "OK")]
    Ok { positions: Vec<serde_json::Value> },
    /// One or more guests of the party may not join.
    #[serde(rename = "INVALID_GUEST")]
    InvalidGuest { conflicts: Vec<ConflictEntry> },
    /// The queue isn't currently accepting joins.
    #[serde(rename = "CLOSED_QUEUE")]
    ClosedQueue {
        #[serde(default)]
        conflicts: Vec<ConflictEntry>,
    },
}

#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictEntry {
    pub conflict_type: ConflictType,
    pub guest_ids: Vec<String>,
}

impl JoinQueueResponse {
    /// Parse a joinQueue response body.
    ///
    /// A body having an unknown `responseStatus` is an UnexpectedStatus,
    /// while a known status with a body that cannot be decoded is a
    /// MalformedResponse.
    pub fn parse(body: &serde_json::Value) -> Result<Self, Error> {
        Self::deserialize(body).map_err(|source| {
            let status = body.get("responseStatus").and_then(|s| s.as_str());

            match status {
                Some(status) if JOIN_QUEUE_STATUSES.contains(&status) => {
                    Error::MalformedResponse {
                        resource: "joinQueue",
                        response: body.clone(),
                        source,
                    }
                }
                _ => Error::UnexpectedStatus {
                    status: status.map(str::to_string),
                    response: body.clone(),
                },
            }
        })
    }
}

/// Outcome is the classification of a single join attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The party was admitted at the matched Position.
    Joined(Position),
    /// Guests of the party were rejected. `closed` is set if the queue
    /// itself is not accepting joins, in which case `conflicts` may be empty.
    Rejected { conflicts: Conflicts, closed: bool },
}

/// Classify the response `body` of a join attempt of `party` to `queue_id`.
///
/// A successful join matches the first position of the queue which shares
/// at least one guest with the party: the service may fold other linked
/// guests into the same position, so exact equality isn't required.
/// Rejections report only guests of the submitted party.
pub fn classify<G: GuestId>(
    queue_id: &str,
    party: &[G],
    body: &serde_json::Value,
) -> Result<Outcome, Error> {
    let in_party = |guest_id: &str| party.iter().any(|g| g.guest_id() == guest_id);

    let (entries, closed) = match JoinQueueResponse::parse(body)? {
        JoinQueueResponse::Ok { positions } => {
            let matched = positions.iter().find(|p| {
                let guest_ids = p.get("guestIds").and_then(|ids| ids.as_array());

                p.get("queueId").and_then(|id| id.as_str()) == Some(queue_id)
                    && guest_ids.map_or(false, |ids| {
                        ids.iter().filter_map(|id| id.as_str()).any(|id| in_party(id))
                    })
            });
            let Some(matched) = matched else {
                return Err(Error::NoMatchingPosition {
                    queue_id: queue_id.to_string(),
                    response: body.clone(),
                });
            };

            return match Position::deserialize(matched) {
                Ok(position) => Ok(Outcome::Joined(position)),
                Err(source) => Err(Error::MalformedResponse {
                    resource: "joinQueue",
                    response: body.clone(),
                    source,
                }),
            };
        }
        JoinQueueResponse::InvalidGuest { conflicts } => (conflicts, false),
        JoinQueueResponse::ClosedQueue { conflicts } => (conflicts, true),
    };

    let mut conflicts = Conflicts::new();

    for ConflictEntry {
        conflict_type,
        guest_ids,
    } in entries
    {
        for guest_id in guest_ids {
            if in_party(guest_id.as_str()) {
                conflicts.entry(guest_id).or_insert(conflict_type);
            }
        }
    }

    Ok(Outcome::Rejected { conflicts, closed })
}
