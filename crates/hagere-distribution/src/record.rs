//! winning distribution records and game rows
//!
//! wire types for the backend's distribution endpoints. field names on the
//! wire are the backend's camelCase for distribution records and snake_case
//! for game rows.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// position of a beneficiary in the ownership hierarchy
///
/// closed set: an unrecognized role on the wire is a decode error, not a
/// fallthrough case
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    Agent,
    User,
}

impl Role {
    pub fn label(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::Agent => "agent",
            Role::User => "user",
        }
    }
}

/// one beneficiary's share of one game's payout
///
/// `total_players`, `bet_amount`, `total_winning` and `distributable` are
/// game-level figures denormalized onto every record of the same `game_id`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DistributionRecord {
    pub game_id: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub total_players: u32,
    pub bet_amount: f64,
    pub total_winning: f64,
    pub distributable: f64,
    pub your_players: u32,
    /// commission percentage (0-100) applied to the distributable pool
    pub your_percent: f64,
    /// computed payout; the server value is authoritative
    pub amount: f64,
    pub phone: String,
    pub owner: String,
    pub role: Role,
    pub deposited: bool,
    #[serde(default)]
    pub approved: bool,
    #[serde(default)]
    pub approved_by: Option<String>,
    #[serde(default)]
    pub approved_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub note: Option<String>,
}

impl DistributionRecord {
    /// local what-if share, for display next to the server figure only;
    /// never a substitute for `amount` in anything persisted
    pub fn projected_amount(&self) -> f64 {
        self.distributable * self.your_percent / 100.0
    }

    /// case-insensitive substring match against game id, owner or phone
    pub fn matches_search(&self, term: &str) -> bool {
        if term.is_empty() {
            return true;
        }
        let term = term.to_lowercase();
        self.game_id.to_lowercase().contains(&term)
            || self.owner.to_lowercase().contains(&term)
            || self.phone.to_lowercase().contains(&term)
    }
}

/// one game row from the games listing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub game_id: String,
    #[serde(default)]
    pub date: Option<DateTime<Utc>>,
    pub number_of_players: u32,
    pub bet_amount: f64,
    #[serde(default)]
    pub cut_amount: f64,
    #[serde(default)]
    pub game_completed: bool,
}

/// game ids whose denormalized game-level figures disagree across records
///
/// records sharing a `game_id` must carry identical `total_players`,
/// `bet_amount`, `total_winning` and `distributable`. a violation is reported
/// for the caller to surface; it is never averaged away. returned in
/// first-seen order, each id at most once.
pub fn game_figure_anomalies(records: &[DistributionRecord]) -> Vec<String> {
    let mut first_seen: Vec<&DistributionRecord> = Vec::new();
    let mut anomalies: Vec<String> = Vec::new();

    for record in records {
        match first_seen.iter().find(|r| r.game_id == record.game_id) {
            None => first_seen.push(record),
            Some(first) => {
                let consistent = first.total_players == record.total_players
                    && first.bet_amount == record.bet_amount
                    && first.total_winning == record.total_winning
                    && first.distributable == record.distributable;
                if !consistent && !anomalies.iter().any(|id| *id == record.game_id) {
                    anomalies.push(record.game_id.clone());
                }
            }
        }
    }

    anomalies
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_record(game_id: &str, phone: &str) -> DistributionRecord {
        DistributionRecord {
            game_id: game_id.into(),
            date: None,
            total_players: 40,
            bet_amount: 10.0,
            total_winning: 400.0,
            distributable: 80.0,
            your_players: 12,
            your_percent: 25.0,
            amount: 20.0,
            phone: phone.into(),
            owner: "Abebe".into(),
            role: Role::Agent,
            deposited: true,
            approved: false,
            approved_by: None,
            approved_date: None,
            note: None,
        }
    }

    #[test]
    fn test_decode_camel_case_record() {
        let json = r#"{
            "gameId": "G100",
            "date": "2025-05-04T18:30:00Z",
            "totalPlayers": 40,
            "betAmount": 10.0,
            "totalWinning": 400.0,
            "distributable": 80.0,
            "yourPlayers": 12,
            "yourPercent": 25.0,
            "amount": 20.0,
            "phone": "0911000001",
            "owner": "Abebe",
            "role": "agent",
            "deposited": true,
            "approved": false
        }"#;

        let record: DistributionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.game_id, "G100");
        assert_eq!(record.role, Role::Agent);
        assert_eq!(record.your_players, 12);
        assert!(record.approved_by.is_none());
    }

    #[test]
    fn test_unknown_role_is_a_decode_error() {
        let mut record = serde_json::to_value(mock_record("G100", "0911000001")).unwrap();
        record["role"] = "superadmin".into();
        assert!(serde_json::from_value::<DistributionRecord>(record).is_err());
    }

    #[test]
    fn test_search_matches_any_field() {
        let record = mock_record("G100", "0911000001");
        assert!(record.matches_search("g10"));
        assert!(record.matches_search("abe"));
        assert!(record.matches_search("0911"));
        assert!(record.matches_search(""));
        assert!(!record.matches_search("nomatch"));
    }

    #[test]
    fn test_projected_amount_is_percent_of_distributable() {
        let record = mock_record("G100", "0911000001");
        assert_eq!(record.projected_amount(), 20.0);
    }

    #[test]
    fn test_game_figure_anomalies() {
        let a = mock_record("G100", "0911000001");
        let mut b = mock_record("G100", "0911000002");
        let c = mock_record("G200", "0911000003");

        assert!(game_figure_anomalies(&[a.clone(), b.clone(), c.clone()]).is_empty());

        b.total_winning = 999.0;
        let anomalies = game_figure_anomalies(&[a, b.clone(), b, c]);
        assert_eq!(anomalies, vec!["G100".to_string()]);
    }
}
