use crate::domain::ballot::{BallotId, InvalidReason};
use crate::domain::ledger::{Choice, Decision, GameStats};
use crate::domain::report::{build_report, Grade, Tier};

fn decision(id: u32, reason: Option<InvalidReason>, correct: bool) -> Decision {
    let truth_valid = reason.is_none();
    let decision = if correct == truth_valid {
        Choice::Valid
    } else {
        Choice::Invalid
    };
    Decision {
        ballot_id: BallotId(id),
        decision,
        correct,
        invalid_reason: reason,
    }
}

fn stats_from(decisions: Vec<Decision>, score: u32) -> GameStats {
    let mut stats = GameStats::default();
    for d in decisions {
        stats.push(d);
    }
    stats.score = score;
    stats.time_elapsed = 61;
    stats
}

#[test]
fn high_accuracy_with_score_is_s() {
    // 19 of 20 correct is 95 %.
    let mut decisions: Vec<Decision> = (1..=19).map(|i| decision(i, None, true)).collect();
    decisions.push(decision(20, Some(InvalidReason::Torn), false));
    let report = build_report(&stats_from(decisions, 120));

    assert_eq!(report.accuracy, 95);
    assert_eq!(report.grade.grade, Grade::S);
    assert_eq!(report.grade.label, "EXEMPLARY");
    assert_eq!(report.grade.nepali, "उत्कृष्ट");
}

#[test]
fn high_accuracy_low_score_is_a() {
    let mut decisions: Vec<Decision> = (1..=19).map(|i| decision(i, None, true)).collect();
    decisions.push(decision(20, Some(InvalidReason::Torn), false));
    let report = build_report(&stats_from(decisions, 50));

    assert_eq!(report.accuracy, 95);
    assert_eq!(report.grade.grade, Grade::A);
    assert_eq!(
        report.grade.flavor,
        "Well done. The democratic process is in capable hands."
    );
}

#[test]
fn report_is_idempotent_and_leaves_input_untouched() {
    let stats = stats_from(
        vec![
            decision(1, None, true),
            decision(2, Some(InvalidReason::Blank), false),
            decision(3, Some(InvalidReason::Blank), true),
        ],
        15,
    );
    let before = stats.clone();
    let first = build_report(&stats);
    let second = build_report(&stats);

    assert_eq!(first, second);
    assert_eq!(stats, before);
    assert_eq!(first.time_elapsed, 61);
}

#[test]
fn breakdown_uses_canonical_order_and_tiers() {
    let stats = stats_from(
        vec![
            decision(1, Some(InvalidReason::Torn), false),
            decision(2, Some(InvalidReason::Torn), false),
            decision(3, Some(InvalidReason::Torn), true),
            decision(4, None, true),
            decision(5, Some(InvalidReason::Blank), true),
            decision(6, Some(InvalidReason::Blank), false),
        ],
        10,
    );
    let report = build_report(&stats);
    let keys: Vec<&str> = report.breakdown.iter().map(|b| b.key).collect();
    assert_eq!(keys, vec!["valid", "blank", "torn"]);

    let torn = &report.breakdown[2];
    assert_eq!(torn.label, "Torn ballots");
    assert_eq!((torn.correct, torn.total), (1, 3));
    assert_eq!(torn.tier, Tier::Poor);

    let blank = &report.breakdown[1];
    assert_eq!(blank.percent, 50);
    assert_eq!(blank.tier, Tier::Marginal);

    assert_eq!(report.breakdown[0].tier, Tier::Good);
}

#[test]
fn report_serializes_for_renderers() {
    let stats = stats_from(vec![decision(1, None, true)], 10);
    let json = serde_json::to_value(build_report(&stats)).unwrap();

    assert_eq!(json["grade"]["grade"], "A");
    assert_eq!(json["totalSeen"], 1);
    assert_eq!(json["breakdown"][0]["tier"], "good");
    assert_eq!(json["ratingScale"][0]["requirement"], "90%+ & 100+ pts");
}
