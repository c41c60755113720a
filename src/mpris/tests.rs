use super::*;
use std::sync::mpsc;
use std::time::Duration;

fn handle() -> (MprisHandle, Arc<Mutex<SharedState>>, mpsc::Receiver<()>) {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();
    let handle = MprisHandle {
        state: state.clone(),
        notify: notify_tx,
    };
    (handle, state, notify_rx)
}

fn payload() -> Payload {
    Payload::new(
        "current line",
        "next line",
        "previous line",
        Some("file:///music/cover.jpg".to_string()),
    )
}

#[test]
fn publish_stores_payload_and_notifies() {
    let (handle, state, notify) = handle();
    handle.publish(payload());

    assert_eq!(state.lock().unwrap().payload.as_ref(), Some(&payload()));
    assert!(notify.try_recv().is_ok());
}

#[test]
fn set_track_sets_id_and_length_and_clear_resets() {
    let (handle, state, _notify) = handle();
    handle.set_track(Some(7), Some(Duration::from_micros(1_234_567)));
    handle.publish(payload());

    {
        let s = state.lock().unwrap();
        assert_eq!(
            s.track_id.as_ref().map(|p| p.as_str()),
            Some("/org/mpris/MediaPlayer2/track/7")
        );
        assert_eq!(s.length_micros, Some(1_234_567));
    }

    handle.clear();
    let s = state.lock().unwrap();
    assert!(s.track_id.is_none());
    assert!(s.payload.is_none());
    assert_eq!(s.length_micros, None);
    assert_eq!(s.playback, PlaybackState::Stopped);
}

#[test]
fn playback_status_maps_state_to_mpris_strings() {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (tx, _rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: state.clone(),
    };

    assert_eq!(iface.playback_status(), "Stopped");
    state.lock().unwrap().playback = PlaybackState::Playing;
    assert_eq!(iface.playback_status(), "Playing");
    state.lock().unwrap().playback = PlaybackState::Paused;
    assert_eq!(iface.playback_status(), "Paused");
}

#[test]
fn metadata_carries_payload_fields() {
    let (handle, state, _notify) = handle();
    handle.set_track(Some(1), Some(Duration::from_secs(3)));
    handle.publish(payload());

    let map = metadata_map(&state.lock().unwrap());
    for k in [
        "mpris:trackid",
        "xesam:title",
        "xesam:artist",
        "xesam:album",
        "mpris:artUrl",
        "mpris:length",
    ] {
        assert!(map.contains_key(k), "missing key: {k}");
    }

    assert_eq!(*map["xesam:title"], Value::from("current line"));
    assert_eq!(*map["xesam:artist"], Value::from(vec!["next line".to_string()]));
}

#[test]
fn metadata_without_payload_has_only_track_id() {
    let state = SharedState::default();
    let map = metadata_map(&state);
    assert_eq!(map.len(), 1);
    assert!(map.contains_key("mpris:trackid"));
}

#[test]
fn player_methods_forward_control_commands() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: Arc::new(Mutex::new(SharedState::default())),
    };

    iface.play_pause();
    iface.next();
    iface.stop();

    let got: Vec<_> = rx.try_iter().collect();
    assert!(matches!(
        got.as_slice(),
        [ControlCmd::PlayPause, ControlCmd::Next, ControlCmd::Stop]
    ));
}

#[test]
fn seek_rounds_to_nearest_second() {
    let (tx, rx) = mpsc::channel::<ControlCmd>();
    let iface = PlayerIface {
        tx,
        state: Arc::new(Mutex::new(SharedState::default())),
    };

    iface.seek(1_900_000);
    iface.seek(-5_500_000);
    iface.seek(600_000);
    iface.seek(200_000);
    iface.seek(-400_000);
    iface.seek(i64::MAX);

    let got: Vec<_> = rx.try_iter().collect();
    assert!(matches!(
        got.as_slice(),
        [
            ControlCmd::SeekBy(2),
            ControlCmd::SeekBy(-6),
            ControlCmd::SeekBy(1),
            ControlCmd::SeekBy(i32::MAX),
        ]
    ));
}
