use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use countdown_overlay::countdown::{
    compute_initial_remaining, display_text, format_hms, CountdownConfig, CountdownState,
    FontSpec, Phase,
};

fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_hms_opt(h, m, s)
        .unwrap()
}

fn config(end_message: &str) -> CountdownConfig {
    CountdownConfig {
        target: NaiveTime::from_hms_opt(0, 0, 0).unwrap(),
        font: FontSpec {
            family: "Arial".into(),
            size: 48,
            color_hex: "#00FF00".into(),
            bold: true,
        },
        end_message: end_message.into(),
    }
}

#[test]
fn targets_later_in_the_day_never_wrap() {
    let now = at(8, 15, 20);
    for (h, m) in [(8, 16), (12, 0), (23, 59)] {
        let target = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let expected = (now.date().and_time(target) - now).num_seconds() as u64;
        assert_eq!(compute_initial_remaining(target, now), expected);
        assert!(expected < 24 * 3600);
    }
}

#[test]
fn targets_earlier_in_the_day_wrap_by_one_day() {
    let now = at(8, 15, 20);
    for (h, m) in [(0, 0), (8, 15), (8, 0)] {
        let target = NaiveTime::from_hms_opt(h, m, 0).unwrap();
        let tomorrow = now.date().and_time(target) + chrono::Duration::days(1);
        assert_eq!(
            compute_initial_remaining(target, now),
            (tomorrow - now).num_seconds() as u64
        );
    }
}

#[test]
fn midnight_scenario_finishes_after_600_ticks() {
    let cfg = config("time's up");
    let mut state = CountdownState::starting_at(cfg.target, at(23, 50, 0));
    assert_eq!(state.remaining_secs(), 600);
    assert_eq!(display_text(&state, &cfg), "00:10:00");

    for _ in 0..599 {
        state.tick();
        assert_eq!(state.phase(), Phase::Running);
    }
    state.tick();
    assert_eq!(state.phase(), Phase::Finished);
    assert_eq!(state.remaining_secs(), 0);
    assert_eq!(display_text(&state, &cfg), "time's up");

    let before = state;
    state.tick();
    assert_eq!(state, before);
}

#[test]
fn display_is_clock_or_message_never_both() {
    let cfg = config("");
    let mut state = CountdownState::new(1);
    assert_eq!(display_text(&state, &cfg), "00:00:01");
    state.tick();
    assert_eq!(display_text(&state, &cfg), "");
}

#[test]
fn format_examples() {
    assert_eq!(format_hms(0), "00:00:00");
    assert_eq!(format_hms(59), "00:00:59");
    assert_eq!(format_hms(3661), "01:01:01");
    assert_eq!(format_hms(90000), "25:00:00");
    assert_eq!(format_hms(360_000), "100:00:00");
}
