use crate::domain::test_state_helpers::{bidding, playing, snapshot_in, table_roster, with_hand};
use crate::domain::{Bid, CardId, Phase, Roster};
use crate::view::{BiddingMode, HandView, TableView, ViewContext};

fn ctx(roster: &Roster) -> ViewContext<'_> {
    ViewContext {
        roster,
        human: 1,
        reveal_hands: false,
        legal_moves: None,
    }
}

#[test]
fn missing_round_builds_nothing() {
    let roster = table_roster();
    let mut snap = snapshot_in(Phase::Bidding);
    snap.round = None;
    assert!(TableView::build(&snap, ctx(&roster)).is_none());
}

#[test]
fn seats_carry_dealer_and_acting_markers() {
    let roster = table_roster();
    let view = TableView::build(&bidding(2, &[]), ctx(&roster)).unwrap();

    assert_eq!(view.seats.len(), 4);
    assert!(view.seat(4).unwrap().is_dealer);
    assert!(view.seat(2).unwrap().is_acting);
    assert!(!view.seat(1).unwrap().is_acting);
    assert_eq!(view.trump.as_ref().unwrap().label, "Heart ♥");
}

#[test]
fn human_hand_is_open_and_marks_legal_moves() {
    let roster = table_roster();
    let snap = with_hand(
        with_hand(playing(0, 1, &[]), 1, &["Club-2", "Heart-Ace"]),
        2,
        &["Spade-3", "Spade-4"],
    );
    let legal = [CardId::new("Heart-Ace")];
    let view = TableView::build(
        &snap,
        ViewContext {
            legal_moves: Some(&legal),
            ..ctx(&roster)
        },
    )
    .unwrap();

    match &view.seat(1).unwrap().hand {
        HandView::Open(cards) => {
            assert!(!cards[0].playable);
            assert!(cards[1].playable);
        }
        other => panic!("human hand hidden: {other:?}"),
    }
    assert_eq!(view.seat(2).unwrap().hand, HandView::Hidden { count: 2 });
}

#[test]
fn reveal_mode_opens_every_hand_without_playability() {
    let roster = table_roster();
    let snap = with_hand(playing(0, 1, &[]), 3, &["Diamond-9"]);
    let view = TableView::build(
        &snap,
        ViewContext {
            reveal_hands: true,
            ..ctx(&roster)
        },
    )
    .unwrap();

    match &view.seat(3).unwrap().hand {
        HandView::Open(cards) => assert!(cards.iter().all(|c| !c.playable)),
        other => panic!("expected open hand, got {other:?}"),
    }
}

#[test]
fn open_miserie_bidder_is_revealed_from_second_trick() {
    let roster = table_roster();
    let contract = |trick| {
        let mut snap = with_hand(playing(trick, 3, &[]), 3, &["Club-3", "Club-4"]);
        let round = snap.round.as_mut().unwrap();
        round.winning_bid = Some(Bid::OpenMiserie);
        round.bidder_id = Some(3);
        snap
    };

    let first = TableView::build(&contract(0), ctx(&roster)).unwrap();
    assert!(!first.seat(3).unwrap().hand.is_open());

    let second = TableView::build(&contract(1), ctx(&roster)).unwrap();
    assert!(second.seat(3).unwrap().hand.is_open());
    assert_eq!(second.seat(3).unwrap().hand.len(), 2);
}

#[test]
fn partnership_folds_partner_tricks_into_bidder_row() {
    let roster = table_roster();
    let mut snap = playing(4, 2, &[]);
    {
        let round = snap.round.as_mut().unwrap();
        round.winning_bid = Some(Bid::Vraag);
        round.bidder_id = Some(2);
        round.partner_id = Some(4);
    }
    snap.tricks_won = [(1, 1), (2, 2), (3, 0), (4, 1)].into_iter().collect();

    let view = TableView::build(&snap, ctx(&roster)).unwrap();
    assert_eq!(view.seat(2).unwrap().tricks, Some(3));
    assert_eq!(view.seat(4).unwrap().tricks, None);
    assert_eq!(view.seat(1).unwrap().tricks, Some(1));
    assert_eq!(view.seat(3).unwrap().tricks, Some(0));

    assert_eq!(view.seat(2).unwrap().bubbles, vec![Bid::Vraag]);
    assert_eq!(view.seat(4).unwrap().bubbles, vec![Bid::Vraag]);
    assert!(view.seat(1).unwrap().bubbles.is_empty());
}

#[test]
fn solo_contract_shows_own_tricks_and_none_outside_play() {
    let roster = table_roster();
    let mut snap = playing(2, 3, &[]);
    {
        let round = snap.round.as_mut().unwrap();
        round.winning_bid = Some(Bid::Miserie);
        round.bidder_id = Some(3);
    }
    snap.tricks_won = [(1, 1), (2, 0), (3, 0), (4, 1)].into_iter().collect();
    let view = TableView::build(&snap, ctx(&roster)).unwrap();
    assert_eq!(view.seat(4).unwrap().tricks, Some(1));

    let view = TableView::build(&bidding(2, &[]), ctx(&roster)).unwrap();
    assert!(view.seats.iter().all(|s| s.tricks.is_none()));
}

#[test]
fn bids_show_as_bubbles_during_the_auction() {
    let roster = table_roster();
    let snap = bidding(3, &[(1, Bid::Pas), (2, Bid::Vraag)]);
    let view = TableView::build(&snap, ctx(&roster)).unwrap();
    assert_eq!(view.seat(1).unwrap().bubbles, vec![Bid::Pas]);
    assert_eq!(view.seat(2).unwrap().bubbles, vec![Bid::Vraag]);
    assert!(view.seat(3).unwrap().bubbles.is_empty());
}

#[test]
fn bidding_panel_only_for_the_human_bidder() {
    let roster = table_roster();
    let other = TableView::build(&bidding(2, &[]), ctx(&roster)).unwrap();
    assert!(other.bidding.is_none());

    let snap = bidding(1, &[(2, Bid::Vraag), (3, Bid::Pas)]);
    let panel = TableView::build(&snap, ctx(&roster)).unwrap().bidding.unwrap();
    assert_eq!(panel.mode, BiddingMode::Auction);
    let enabled: Vec<_> = panel
        .options
        .iter()
        .filter(|o| o.enabled)
        .map(|o| o.bid.clone())
        .collect();
    assert_eq!(
        enabled,
        vec![
            Bid::Pas,
            Bid::Mee,
            Bid::Abondance,
            Bid::Miserie,
            Bid::OpenMiserie,
            Bid::SoloSlim
        ]
    );
}

#[test]
fn choosing_alleen_offers_alleen_or_pas() {
    let roster = table_roster();
    let mut snap = snapshot_in(Phase::ChoosingAlleen);
    snap.current_bidder_id = Some(1);
    let panel = TableView::build(&snap, ctx(&roster)).unwrap().bidding.unwrap();
    assert_eq!(panel.mode, BiddingMode::AlleenChoice);
    let bids: Vec<_> = panel.options.iter().map(|o| o.bid.clone()).collect();
    assert_eq!(bids, vec![Bid::Alleen, Bid::Pas]);
}

#[test]
fn troel_announcement_until_first_card() {
    let roster = table_roster();
    let troel = |plays: &[(i64, &str)]| {
        let mut snap = playing(0, 2, plays);
        let round = snap.round.as_mut().unwrap();
        round.winning_bid = Some(Bid::Troel);
        round.bidder_id = Some(2);
        round.partner_id = Some(3);
        snap
    };

    let view = TableView::build(&troel(&[]), ctx(&roster)).unwrap();
    let text = view.announcement.unwrap();
    assert!(text.contains("Speler 2") && text.contains("Speler 3"));

    let view = TableView::build(&troel(&[(2, "Heart-Ace")]), ctx(&roster)).unwrap();
    assert!(view.announcement.is_none());
}

#[test]
fn completed_round_reports_everyone_passed() {
    let roster = table_roster();
    let snap = snapshot_in(Phase::Completed);
    let view = TableView::build(&snap, ctx(&roster)).unwrap();
    assert!(view.round_over.unwrap().everyone_passed);
    assert!(view.acting.is_none());

    let mut snap = snapshot_in(Phase::Completed);
    snap.round.as_mut().unwrap().winning_bid = Some(Bid::Abondance);
    let view = TableView::build(&snap, ctx(&roster)).unwrap();
    assert!(!view.round_over.unwrap().everyone_passed);
}
