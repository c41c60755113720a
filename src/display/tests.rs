use super::*;
use crate::lyrics::{LyricLine, Timeline};

fn p(title: &str) -> Payload {
    Payload::new(title, "artist", "album", None)
}

fn meta() -> TrackMetadata {
    TrackMetadata {
        title: "Song".into(),
        artist: "Band".into(),
        album: "  ".into(),
        artwork: Some("file:///music/cover.jpg".into()),
    }
}

#[test]
fn payload_replaces_blank_fields_with_placeholder() {
    let payload = Payload::new("  hi ", "", "\t", None);
    assert_eq!(payload.title, "hi");
    assert_eq!(payload.artist, EMPTY_FIELD);
    assert_eq!(payload.album, EMPTY_FIELD);
}

#[test]
fn compose_without_lyrics_uses_track_metadata() {
    let payload = compose(&FieldMapping::default(), None, &meta());
    assert_eq!(payload.title, "Song");
    assert_eq!(payload.artist, "Band");
    assert_eq!(payload.album, EMPTY_FIELD);
    assert_eq!(payload.artwork.as_deref(), Some("file:///music/cover.jpg"));
}

#[test]
fn compose_follows_each_slot_binding() {
    let slots = LyricSlots {
        previous: "before",
        current: "now",
        next: "",
    };

    let payload = compose(&FieldMapping::default(), Some(slots), &meta());
    assert_eq!(payload.title, "now");
    assert_eq!(payload.artist, EMPTY_FIELD);
    assert_eq!(payload.album, "before");
    assert!(payload.artwork.is_some());

    let mapping = FieldMapping {
        title: LyricRole::Previous,
        artist: LyricRole::Current,
        album: LyricRole::Current,
    };
    let payload = compose(&mapping, Some(slots), &meta());
    assert_eq!(payload.title, "before");
    assert_eq!(payload.artist, "now");
    assert_eq!(payload.album, "now");
    assert_eq!(mapping.role(DisplaySlot::Album), LyricRole::Current);
}

#[test]
fn hold_waits_for_first_line_and_minimum() {
    let timeline = Timeline::new(vec![LyricLine::new(1_000, "a"), LyricLine::new(9_000, "b")]);
    let hold = HoldPolicy::new(5.0);
    assert!(!hold.lyrics_active(&timeline, 1_000));
    assert!(!hold.lyrics_active(&timeline, 4_999));
    assert!(hold.lyrics_active(&timeline, 5_000));

    let late = Timeline::new(vec![LyricLine::new(12_000, "a")]);
    assert!(!hold.lyrics_active(&late, 11_999));
    assert!(hold.lyrics_active(&late, 12_000));
}

#[test]
fn hold_never_activates_without_lyrics() {
    let hold = HoldPolicy::new(0.0);
    assert!(!hold.lyrics_active(&Timeline::default(), 60_000));
}

#[test]
fn hold_is_clamped() {
    assert_eq!(HoldPolicy::new(-4.0).min_hold_secs(), 0.0);
    assert_eq!(HoldPolicy::new(120.0).min_hold_secs(), MAX_HOLD_SECS);
    assert_eq!(HoldPolicy::new(f64::NAN).min_hold_secs(), 0.0);
}

#[test]
fn throttle_scenario_coalesces_into_latest() {
    let mut t = PublishThrottler::new(1_000);
    assert_eq!(t.submit(0, p("a")), Some(p("a")));

    assert_eq!(t.submit(200, p("b")), None);
    assert_eq!(t.deadline_ms(), Some(1_000));
    assert_eq!(t.submit(700, p("c")), None);
    assert_eq!(t.deadline_ms(), Some(1_000));

    assert_eq!(t.poll(999), None);
    assert_eq!(t.poll(1_000), Some(p("c")));
    assert!(!t.is_armed());
    assert_eq!(t.last_sent(), Some(&p("c")));
}

#[test]
fn throttle_ignores_repeat_of_last_sent_when_idle() {
    let mut t = PublishThrottler::new(100);
    assert!(t.submit(0, p("a")).is_some());
    assert_eq!(t.submit(5_000, p("a")), None);
    assert!(!t.is_armed());
}

#[test]
fn throttle_repeat_of_last_sent_still_replaces_pending() {
    let mut t = PublishThrottler::new(1_000);
    t.submit(0, p("a"));
    t.submit(100, p("b"));
    // Going back to what is already shown supersedes "b".
    assert_eq!(t.submit(200, p("a")), None);
    assert_eq!(t.poll(1_000), Some(p("a")));
}

#[test]
fn throttle_sends_immediately_once_interval_elapsed() {
    let mut t = PublishThrottler::new(500);
    t.submit(0, p("a"));
    t.submit(100, p("b"));
    assert!(t.is_armed());
    // Submitted late: send now and drop the armed send.
    assert_eq!(t.submit(800, p("c")), Some(p("c")));
    assert!(!t.is_armed());
    assert_eq!(t.poll(10_000), None);
}

#[test]
fn throttle_cancel_drops_pending_without_sending() {
    let mut t = PublishThrottler::new(1_000);
    t.submit(0, p("a"));
    t.submit(10, p("b"));
    t.cancel();
    assert_eq!(t.deadline_ms(), None);
    assert_eq!(t.poll(5_000), None);
    assert_eq!(t.last_sent(), Some(&p("a")));
}

#[test]
fn throttle_interval_change_retargets_armed_send() {
    let mut t = PublishThrottler::new(1_000);
    t.submit(100, p("a"));
    t.submit(200, p("b"));
    assert_eq!(t.deadline_ms(), Some(1_100));
    t.set_min_interval_ms(300);
    assert_eq!(t.deadline_ms(), Some(400));
    t.set_min_interval_ms(1);
    assert_eq!(t.min_interval_ms(), MIN_INTERVAL_MS);
    t.set_min_interval_ms(60_000);
    assert_eq!(t.min_interval_ms(), MAX_INTERVAL_MS);
}

/// Drive the throttler the way the event loop does: submit on some ticks,
/// poll on every tick, and record when sends happen.
fn simulate(interval: u64, submissions: &[(u64, &str)], until: u64) -> Vec<(u64, Payload)> {
    let mut t = PublishThrottler::new(interval);
    let mut sent = Vec::new();
    let mut next = submissions.iter().peekable();
    for now in 0..=until {
        if let Some(p) = t.poll(now) {
            sent.push((now, p));
        }
        while let Some((at, title)) = next.peek() {
            if *at != now {
                break;
            }
            if let Some(p) = t.submit(now, p(title)) {
                sent.push((now, p));
            }
            next.next();
        }
    }
    sent
}

#[test]
fn throttle_spacing_and_liveness() {
    let submissions: Vec<(u64, String)> = (0..200u64)
        .map(|i| (i * 37 % 4_000, format!("line {}", i % 23)))
        .collect();
    let mut sorted = submissions.clone();
    sorted.sort_by_key(|(at, _)| *at);
    let refs: Vec<(u64, &str)> = sorted.iter().map(|(at, s)| (*at, s.as_str())).collect();

    let interval = 250;
    let sent = simulate(interval, &refs, 6_000);

    assert!(!sent.is_empty());
    for pair in sent.windows(2) {
        assert!(pair[1].0 - pair[0].0 >= interval, "{:?} then {:?}", pair[0], pair[1]);
    }

    let (last_at, last_title) = refs.last().copied().unwrap();
    let (sent_at, payload) = sent.last().unwrap();
    assert_eq!(payload, &p(last_title));
    assert!(*sent_at <= last_at + interval);
}
