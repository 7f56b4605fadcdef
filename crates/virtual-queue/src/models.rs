use std::collections::BTreeMap;

/// Queue is a virtual waiting line which guests join as a party.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Queue {
    pub queue_id: String,
    pub name: String,
    pub is_accepting_joins: bool,
    /// Next time the queue is scheduled to open, if it's not open now.
    pub next_scheduled_open_time: Option<String>,
    pub max_party_size: u32,
    pub how_to_enter_message: String,
}

/// Guest is a person who may be submitted as part of a party.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    pub guest_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_image_url: Option<String>,
    #[serde(default)]
    pub is_primary_guest: bool,
    #[serde(default)]
    pub is_preselected: bool,
}

/// Position is a party's place within a Queue, created by a successful join.
#[derive(Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub queue_id: String,
    pub guest_ids: Vec<String>,
    pub boarding_group: u32,
    /// Time at which the party was queued, as reported by the service.
    /// Its format isn't consistent across services, and it isn't interpreted.
    #[serde(default)]
    pub queued_at: serde_json::Value,
}

/// ConflictType is the reason a guest could not join a queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConflictType {
    NoParkPass,
    NotInPark,
    RedeemLimitReached,
}

impl ConflictType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoParkPass => "NO_PARK_PASS",
            Self::NotInPark => "NOT_IN_PARK",
            Self::RedeemLimitReached => "REDEEM_LIMIT_REACHED",
        }
    }
}

impl std::fmt::Display for ConflictType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conflicts maps a guest ID to the reason it was rejected.
pub type Conflicts = BTreeMap<String, ConflictType>;

/// JoinQueueResult is the outcome of joining a party to a queue.
#[derive(Debug, Clone, Default, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinQueueResult {
    /// Boarding group of the party, or None if no position was obtained.
    pub boarding_group: Option<u32>,
    /// Every guest that was rejected, across all attempts, and why.
    pub conflicts: Conflicts,
    /// Whether the queue rejected the party because it's not open.
    pub closed: bool,
}

/// GuestId is implemented by anything which identifies a guest,
/// allowing parties to be submitted as full Guests or as bare IDs.
pub trait GuestId {
    fn guest_id(&self) -> &str;
}

impl GuestId for Guest {
    fn guest_id(&self) -> &str {
        &self.guest_id
    }
}

impl GuestId for String {
    fn guest_id(&self) -> &str {
        self
    }
}

impl GuestId for str {
    fn guest_id(&self) -> &str {
        self
    }
}

impl<T: GuestId + ?Sized> GuestId for &T {
    fn guest_id(&self) -> &str {
        (**self).guest_id()
    }
}

/// Sort guests into their canonical display order: the primary guest first,
/// then preselected guests, and then by full name.
pub fn sort_guests(guests: &mut [Guest]) {
    guests.sort_by(|a, b| {
        b.is_primary_guest
            .cmp(&a.is_primary_guest)
            .then_with(|| b.is_preselected.cmp(&a.is_preselected))
            .then_with(|| {
                let (a, b) = (full_name(a), full_name(b));
                a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(&b))
            })
    });
}

fn full_name(guest: &Guest) -> String {
    format!("{} {}", guest.first_name, guest.last_name)
}

#[cfg(test)]
mod test {
    use super::*;

    fn guest(id: &str, first: &str, last: &str, primary: bool, preselected: bool) -> Guest {
        Guest {
            guest_id: id.to_string(),
            first_name: first.to_string(),
            last_name: last.to_string(),
            avatar_image_url: None,
            is_primary_guest: primary,
            is_preselected: preselected,
        }
    }

    #[test]
    fn test_guest_ordering() {
        let mut guests = vec![
            guest("g1", "zed", "Zulu", false, false),
            guest("g2", "Amy", "Able", false, false),
            guest("g3", "Mia", "Mouse", false, true),
            guest("g4", "Bob", "Baker", true, false),
            guest("g5", "Abe", "Able", false, true),
        ];
        sort_guests(&mut guests);

        let ids: Vec<_> = guests.iter().map(|g| g.guest_id.as_str()).collect();
        assert_eq!(ids, vec!["g4", "g5", "g3", "g2", "g1"]);
    }

    #[test]
    fn test_guest_wire_shape() {
        let guest: Guest = serde_json::from_value(serde_json::json!({
            "guestId": "g1",
            "firstName": "Mickey",
            "lastName": "Mouse",
            "isPrimaryGuest": true,
            "entitlements": ["ignored"],
        }))
        .unwrap();

        assert!(guest.is_primary_guest);
        assert!(!guest.is_preselected);
        assert_eq!(guest.avatar_image_url, None);

        insta::assert_json_snapshot!(guest, @r###"
        {
          "guestId": "g1",
          "firstName": "Mickey",
          "lastName": "Mouse",
          "isPrimaryGuest": true,
          "isPreselected": false
        }
        "###);
    }

    #[test]
    fn test_conflict_type_names() {
        for conflict in [
            ConflictType::NoParkPass,
            ConflictType::NotInPark,
            ConflictType::RedeemLimitReached,
        ] {
            assert_eq!(
                serde_json::to_value(conflict).unwrap(),
                serde_json::Value::String(conflict.to_string()),
            );
        }
    }
}
