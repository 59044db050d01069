use swipecards_testing::{SwipeEvent, SwipeRecorder, SwipeTestRule, TextRenderer};
use swipecards_ui::{CardContent, Point, SwipeCardsOptions, SwipeDecision, SwipeDirection};

fn rule_with(
    cards: Vec<&'static str>,
    looping: bool,
) -> (SwipeTestRule<&'static str>, SwipeRecorder<&'static str>) {
    let recorder = SwipeRecorder::new();
    let rule = SwipeTestRule::settled(|builder| {
        recorder.attach(
            builder
                .cards(cards)
                .options(SwipeCardsOptions::default().with_loop(looping)),
        )
    })
    .expect("entrance settles");
    (rule, recorder)
}

#[test]
fn right_swipe_advances_to_next_card() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2", "c3"], false);

    rule.swipe_and_settle(Point::new(150.0, 0.0), Point::new(2.0, 0.0))
        .expect("swipe");

    assert_eq!(
        recorder.events(),
        vec![
            SwipeEvent::Swiped(SwipeDirection::Right, "c1"),
            SwipeEvent::Removed(0),
        ]
    );
    assert_eq!(rule.widget().current_card(), Some("c2"));
}

#[test]
fn single_card_wraps_when_looping() {
    let (mut rule, recorder) = rule_with(vec!["c1"], true);

    rule.swipe_and_settle(Point::new(-150.0, 0.0), Point::new(-2.0, 0.0))
        .expect("swipe");

    assert_eq!(
        recorder.events(),
        vec![
            SwipeEvent::Swiped(SwipeDirection::Left, "c1"),
            SwipeEvent::Removed(0),
        ]
    );
    assert_eq!(rule.widget().current_card(), Some("c1"));
    assert_eq!(rule.widget().current_index(), Some(0));
}

#[test]
fn last_card_leaves_no_more_cards_view() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2"], false);
    rule.swipe_and_settle(Point::new(130.0, 0.0), Point::ZERO)
        .expect("first swipe");
    recorder.take();

    rule.swipe_and_settle(Point::new(120.0, 0.0), Point::ZERO)
        .expect("second swipe");

    assert_eq!(
        recorder.events(),
        vec![
            SwipeEvent::Swiped(SwipeDirection::Right, "c2"),
            SwipeEvent::Removed(1),
        ]
    );
    assert_eq!(rule.widget().current_card(), None);
    let scene = rule
        .widget()
        .render(&mut TextRenderer::new().with_no_more_cards("No more cards"));
    assert_eq!(
        scene.content,
        CardContent::NoMoreCards(Some("No more cards".to_string()))
    );
}

#[test]
fn short_drag_returns_to_center() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2"], false);

    let decision = rule
        .swipe(Point::new(50.0, 10.0), Point::new(4.0, 0.0))
        .expect("swipe");
    assert_eq!(decision, SwipeDecision::Cancel);
    assert_eq!(rule.widget().position(), Point::new(50.0, 10.0));

    rule.pump_until_idle().expect("spring settles");
    assert!(recorder.is_empty());
    assert_eq!(rule.widget().current_card(), Some("c1"));
    assert_eq!(rule.widget().position(), Point::ZERO);
}

#[test]
fn displacements_within_thresholds_never_commit() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2"], false);
    for &(x, y) in &[
        (100.0, 0.0),
        (-100.0, 0.0),
        (0.0, 5000.0),
        (0.0, -5000.0),
        (-99.0, 4200.0),
    ] {
        let decision = rule
            .swipe_and_settle(Point::new(x, y), Point::new(9.0, 9.0))
            .expect("swipe");
        assert_eq!(decision, SwipeDecision::Cancel, "({x}, {y})");
    }
    assert!(recorder.is_empty());
    assert_eq!(rule.widget().current_index(), Some(0));
}

#[test]
fn vertical_commits_call_up_and_down() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2", "c3"], false);
    rule.swipe_and_settle(Point::new(0.0, -5200.0), Point::ZERO)
        .expect("up");
    rule.swipe_and_settle(Point::new(30.0, 5200.0), Point::ZERO)
        .expect("down");

    assert_eq!(
        recorder.events(),
        vec![
            SwipeEvent::Swiped(SwipeDirection::Up, "c1"),
            SwipeEvent::Removed(0),
            SwipeEvent::Swiped(SwipeDirection::Down, "c2"),
            SwipeEvent::Removed(1),
        ]
    );
    assert_eq!(rule.widget().current_card(), Some("c3"));
}

#[test]
fn exit_velocity_is_clamped() {
    let (mut rule, _recorder) = rule_with(vec!["c1", "c2"], true);
    for &vx in &[0.0f32, 0.5, 7.0, 30.0, -0.5, -7.0, -30.0] {
        let x = if vx < 0.0 { -150.0 } else { 150.0 };
        let decision = rule
            .swipe_and_settle(Point::new(x, 0.0), Point::new(vx, 0.0))
            .expect("swipe");
        let SwipeDecision::Commit { exit_velocity, .. } = decision else {
            panic!("expected commit for vx {vx}");
        };
        assert!((5.0..=8.0).contains(&exit_velocity.x.abs()), "vx {vx}");
        assert_eq!(exit_velocity.x < 0.0, vx < 0.0, "vx {vx}");
    }
}

#[test]
fn repeated_collection_updates_reset_to_first_card() {
    let (mut rule, _recorder) = rule_with(vec!["c1", "c2", "c3"], false);
    rule.swipe_and_settle(Point::new(150.0, 0.0), Point::ZERO)
        .expect("swipe");
    assert_eq!(rule.widget().current_index(), Some(1));

    rule.widget().set_cards(vec!["c1", "c2", "c3"]);
    assert_eq!(rule.widget().current_card(), Some("c1"));
    rule.swipe_and_settle(Point::new(150.0, 0.0), Point::ZERO)
        .expect("swipe");
    rule.widget().set_cards(vec!["c1", "c2", "c3"]);
    assert_eq!(rule.widget().current_card(), Some("c1"));
}

#[test]
fn empty_collection_update_clears_current_card() {
    let (rule, _recorder) = rule_with(vec!["c1"], false);
    rule.widget().set_cards(Vec::new());
    assert_eq!(rule.widget().current_card(), None);
    let scene = rule.widget().render(&mut TextRenderer::new());
    assert_eq!(scene.content, CardContent::NoMoreCards(None));
}

#[test]
fn pointer_fling_commits_left() {
    let (mut rule, recorder) = rule_with(vec!["c1", "c2"], false);
    assert!(rule.pointer_drag(Point::new(300.0, 400.0), Point::new(120.0, 420.0), 8, 12));
    rule.pump_until_idle().expect("exit settles");
    assert_eq!(
        recorder.events(),
        vec![
            SwipeEvent::Swiped(SwipeDirection::Left, "c1"),
            SwipeEvent::Removed(0),
        ]
    );
}
