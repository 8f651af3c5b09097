//! summaries, grouping and filtering over distribution records
//!
//! the single source of aggregation truth: every view derives its totals
//! here instead of re-summing inline

use std::str::FromStr;

use crate::record::{DistributionRecord, Game};

/// summary statistics over a set of distribution records
///
/// `total_winning`, `total_players` and `player_winning` sum fields that are
/// denormalized game-level values, identical on every record of a game. the
/// caller owes `summarize` either the records of exactly one game or rows
/// already aggregated at the game level; across multiple games these three
/// fields multi-count and no deduplication is attempted here. `total_amount`
/// is genuinely per-beneficiary and always safe.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Summary {
    pub total_winning: f64,
    pub total_players: u64,
    pub total_amount: f64,
    pub total_distributable: f64,
    pub player_winning: f64,
    pub approved_count: usize,
    pub pending_count: usize,
}

/// summarize records per the contract documented on [`Summary`]
pub fn summarize(records: &[DistributionRecord]) -> Summary {
    records.iter().fold(Summary::default(), |mut acc, r| {
        acc.total_winning += r.total_winning;
        acc.total_players += u64::from(r.total_players);
        acc.total_amount += r.amount;
        acc.total_distributable += r.distributable;
        acc.player_winning += r.total_winning - r.distributable;
        if r.approved {
            acc.approved_count += 1;
        } else {
            acc.pending_count += 1;
        }
        acc
    })
}

/// approval status restriction on top of the search filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    #[default]
    All,
    Approved,
    Pending,
}

impl StatusFilter {
    pub fn admits(&self, record: &DistributionRecord) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Approved => record.approved,
            StatusFilter::Pending => !record.approved,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Approved => "approved",
            StatusFilter::Pending => "pending",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(StatusFilter::All),
            "approved" => Ok(StatusFilter::Approved),
            "pending" => Ok(StatusFilter::Pending),
            other => Err(format!("unknown status filter: {other}")),
        }
    }
}

/// search then status-restrict, returning a fresh vec; input untouched
///
/// the search term matches case-insensitively against game id, owner or
/// phone, any one field sufficing
pub fn filter_by_search_and_status(
    records: &[DistributionRecord],
    search_term: &str,
    status: StatusFilter,
) -> Vec<DistributionRecord> {
    records
        .iter()
        .filter(|r| r.matches_search(search_term) && status.admits(r))
        .cloned()
        .collect()
}

/// grouping key for breakdown tables
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupKey {
    Phone,
    Role,
}

/// one group of a breakdown, keyed by phone or role label
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    pub key: String,
    pub items: Vec<DistributionRecord>,
    pub total_amount: f64,
}

impl Group {
    pub fn count(&self) -> usize {
        self.items.len()
    }

    /// display name of the first member, for phone-keyed groups
    pub fn owner(&self) -> Option<&str> {
        self.items.first().map(|r| r.owner.as_str())
    }
}

/// stable grouping preserving first-seen key order
pub fn group_by(records: &[DistributionRecord], key: GroupKey) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();

    for record in records {
        let group_key = match key {
            GroupKey::Phone => record.phone.clone(),
            GroupKey::Role => record.role.label().to_string(),
        };

        match groups.iter_mut().find(|g| g.key == group_key) {
            Some(group) => {
                group.total_amount += record.amount;
                group.items.push(record.clone());
            }
            None => groups.push(Group {
                key: group_key,
                total_amount: record.amount,
                items: vec![record.clone()],
            }),
        }
    }

    groups
}

/// header totals for an approval batch
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BatchTotals {
    pub count: usize,
    pub total_amount: f64,
    /// summed from each record's `your_players`, not the game-level figure
    pub total_players: u64,
}

pub fn batch_totals(records: &[DistributionRecord]) -> BatchTotals {
    records.iter().fold(BatchTotals::default(), |mut acc, r| {
        acc.count += 1;
        acc.total_amount += r.amount;
        acc.total_players += u64::from(r.your_players);
        acc
    })
}

/// derived cards over the games listing
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GamesSummary {
    pub total_games: usize,
    pub total_bets: f64,
    pub completed_games: usize,
    pub total_players: u64,
    pub total_cuts: f64,
}

pub fn summarize_games(games: &[Game]) -> GamesSummary {
    games.iter().fold(GamesSummary::default(), |mut acc, g| {
        acc.total_games += 1;
        acc.total_bets += g.bet_amount * f64::from(g.number_of_players);
        if g.game_completed {
            acc.completed_games += 1;
        }
        acc.total_players += u64::from(g.number_of_players);
        acc.total_cuts += g.cut_amount;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Role;

    fn mock_record(phone: &str, role: Role, amount: f64, approved: bool) -> DistributionRecord {
        DistributionRecord {
            game_id: "G100".into(),
            date: None,
            total_players: 40,
            bet_amount: 10.0,
            total_winning: 400.0,
            distributable: 80.0,
            your_players: 5,
            your_percent: 25.0,
            amount,
            phone: phone.into(),
            owner: format!("owner-{phone}"),
            role,
            deposited: true,
            approved,
            approved_by: None,
            approved_date: None,
            note: None,
        }
    }

    #[test]
    fn test_summarize_single_game() {
        let records = vec![
            mock_record("0911000001", Role::System, 100.0, true),
            mock_record("0911000002", Role::Agent, 250.5, true),
            mock_record("0911000003", Role::User, 0.0, false),
        ];

        let summary = summarize(&records);
        assert_eq!(summary.total_amount, 350.5);
        assert_eq!(summary.approved_count, 2);
        assert_eq!(summary.pending_count, 1);
        assert_eq!(summary.approved_count + summary.pending_count, records.len());
        // denormalized game figures sum across rows, 3x the game value here
        assert_eq!(summary.total_winning, 1200.0);
        assert_eq!(summary.player_winning, 960.0);
    }

    #[test]
    fn test_group_totals_partition_the_summary_total() {
        let records = vec![
            mock_record("0911000001", Role::System, 10.0, false),
            mock_record("0911000002", Role::Agent, 20.0, false),
            mock_record("0911000001", Role::Agent, 30.0, true),
            mock_record("0911000002", Role::User, 40.0, true),
        ];
        let total = summarize(&records).total_amount;

        for key in [GroupKey::Phone, GroupKey::Role] {
            let groups = group_by(&records, key);
            let grouped_total: f64 = groups.iter().map(|g| g.total_amount).sum();
            let grouped_count: usize = groups.iter().map(Group::count).sum();
            assert_eq!(grouped_total, total);
            assert_eq!(grouped_count, records.len());
        }
    }

    #[test]
    fn test_group_by_preserves_first_seen_order() {
        let records = vec![
            mock_record("0911000002", Role::User, 1.0, false),
            mock_record("0911000001", Role::Agent, 2.0, false),
            mock_record("0911000002", Role::System, 3.0, false),
        ];

        let by_phone = group_by(&records, GroupKey::Phone);
        let keys: Vec<&str> = by_phone.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["0911000002", "0911000001"]);
        assert_eq!(by_phone[0].count(), 2);
        assert_eq!(by_phone[0].total_amount, 4.0);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let records = vec![
            mock_record("0911000001", Role::Agent, 10.0, true),
            mock_record("0911000002", Role::User, 20.0, false),
            mock_record("0922000003", Role::User, 30.0, false),
        ];

        let once = filter_by_search_and_status(&records, "0911", StatusFilter::Pending);
        let twice = filter_by_search_and_status(&once, "0911", StatusFilter::Pending);
        assert_eq!(once, twice);
        assert_eq!(once.len(), 1);
        assert_eq!(once[0].phone, "0911000002");
    }

    #[test]
    fn test_filter_or_semantics_across_fields() {
        let mut by_owner = mock_record("0922000001", Role::Agent, 1.0, false);
        by_owner.owner = "Tigist".into();
        let records = vec![mock_record("0911000001", Role::User, 1.0, false), by_owner];

        // matches phone on one record, owner on the other
        assert_eq!(filter_by_search_and_status(&records, "0911", StatusFilter::All).len(), 1);
        assert_eq!(filter_by_search_and_status(&records, "TIGIST", StatusFilter::All).len(), 1);
        assert_eq!(filter_by_search_and_status(&records, "g100", StatusFilter::All).len(), 2);
    }

    #[test]
    fn test_batch_totals_sum_your_players() {
        let records = vec![
            mock_record("0911000001", Role::Agent, 10.0, false),
            mock_record("0911000002", Role::User, 20.0, false),
        ];

        let totals = batch_totals(&records);
        assert_eq!(totals.count, 2);
        assert_eq!(totals.total_amount, 30.0);
        assert_eq!(totals.total_players, 10);
    }

    #[test]
    fn test_summarize_games() {
        let games = vec![
            Game {
                game_id: "G100".into(),
                date: None,
                number_of_players: 40,
                bet_amount: 10.0,
                cut_amount: 30.0,
                game_completed: true,
            },
            Game {
                game_id: "G200".into(),
                date: None,
                number_of_players: 10,
                bet_amount: 5.0,
                cut_amount: 4.0,
                game_completed: false,
            },
        ];

        let summary = summarize_games(&games);
        assert_eq!(summary.total_games, 2);
        assert_eq!(summary.total_bets, 450.0);
        assert_eq!(summary.completed_games, 1);
        assert_eq!(summary.total_players, 50);
        assert_eq!(summary.total_cuts, 34.0);
    }
}
