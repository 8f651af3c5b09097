//! Integration test for the approval workflow
//!
//! Drives the complete client-side flow against simulated server responses:
//! 1. Fetch populates the review surface
//! 2. Approve-all builds the pending batch
//! 3. Confirm dispatches, server succeeds, dialog shows success
//! 4. Close resets the approval state
//! 5. Refetch shows the records approved, pending view empty

use hagere_distribution::{
    ApprovalAction, ApprovalState, DistributionRecord, DistributionsAction, DistributionsState,
    ReviewSurface, Role, StatusFilter,
};

fn record(game_id: &str, phone: &str, approved: bool) -> DistributionRecord {
    DistributionRecord {
        game_id: game_id.into(),
        date: None,
        total_players: 40,
        bet_amount: 10.0,
        total_winning: 400.0,
        distributable: 80.0,
        your_players: 5,
        your_percent: 25.0,
        amount: 20.0,
        phone: phone.into(),
        owner: format!("owner-{phone}"),
        role: Role::Agent,
        deposited: true,
        approved,
        approved_by: approved.then(|| "admin".to_string()),
        approved_date: None,
        note: None,
    }
}

#[test]
fn test_fetch_review_approve_close_refetch() {
    let mut surface = ReviewSurface::default();
    let mut approval = ApprovalState::default();
    let mut slice = DistributionsState::default();

    // fetch two unapproved records for G100
    slice = slice.reduce(DistributionsAction::FetchPending);
    assert!(slice.loading);
    let rows = vec![
        record("G100", "0911000001", false),
        record("G100", "0911000002", false),
    ];
    slice = slice.reduce(DistributionsAction::FetchFulfilled { records: rows.clone() });
    let token = surface.begin_fetch();
    assert!(surface.apply_fetch(token, slice.records.clone()));

    // open approve-all: both records pending, batch scoped to G100
    let batch = surface.approval_batch(Some("weekly payout".into()));
    assert_eq!(batch.len(), 2);
    assert!(batch.spans_single_game());
    assert_eq!(batch.game_id(), Some("G100"));
    assert!(approval.can_confirm(&batch));

    // confirm; server approves and returns the updated rows
    approval = approval.reduce(ApprovalAction::Confirm);
    assert!(approval.is_loading());
    assert!(!approval.can_confirm(&batch));

    let approved_rows: Vec<DistributionRecord> = rows
        .iter()
        .map(|r| DistributionRecord { approved: true, ..r.clone() })
        .collect();
    approval = approval.reduce(ApprovalAction::ServerOk { approved: approved_rows.clone() });
    assert!(approval.is_succeeded());

    // dialog stays open until the user closes it; close resets cleanly
    approval = approval.reduce(ApprovalAction::Close);
    assert_eq!(approval, ApprovalState::Idle);
    assert_eq!(approval.error(), None);

    // explicit refetch after approval: server now reports approved rows
    slice = slice.reduce(DistributionsAction::FetchPending);
    slice = slice.reduce(DistributionsAction::FetchFulfilled { records: approved_rows });
    let token = surface.begin_fetch();
    assert!(surface.apply_fetch(token, slice.records.clone()));

    surface.set_status_filter(StatusFilter::Pending);
    assert!(surface.filtered().is_empty());
    assert_eq!(surface.pending_count(), 0);
    assert!(surface.approval_batch(None).is_empty());

    surface.set_status_filter(StatusFilter::Approved);
    assert_eq!(surface.filtered().len(), 2);

    // closing the surface drops the rows entirely
    surface.reset();
    assert!(surface.records().is_empty());
}

#[test]
fn test_failed_approval_keeps_surface_usable() {
    let mut surface = ReviewSurface::default();
    let token = surface.begin_fetch();
    assert!(surface.apply_fetch(token, vec![record("G200", "0911000003", false)]));

    let batch = surface.approval_batch(None);
    let mut approval = ApprovalState::default().reduce(ApprovalAction::Confirm);
    approval = approval.reduce(ApprovalAction::ServerError { message: "not approved".into() });
    assert_eq!(approval.error(), Some("not approved"));

    // the error is a banner, not a crash: filters keep working underneath
    surface.set_search("0911");
    assert_eq!(surface.filtered().len(), 1);

    // retry re-arms the confirm button
    approval = approval.reduce(ApprovalAction::Retry);
    assert!(approval.can_confirm(&batch));
}
