use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_io::{Timer, block_on};
use zbus::{Connection, interface, object_server::InterfaceRef};
use zvariant::{ObjectPath, OwnedObjectPath, OwnedValue, Value};

use crate::audio::PlaybackState;
use crate::display::Payload;

const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";
const BUS_NAME: &str = "org.mpris.MediaPlayer2.lyricast";
const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";
const NOTIFY_POLL: Duration = Duration::from_millis(20);

#[derive(Clone, Debug)]
pub enum ControlCmd {
    Quit,
    Play,
    Pause,
    PlayPause,
    Stop,
    Next,
    Prev,
    /// Relative seek, rounded to whole seconds.
    SeekBy(i32),
}

#[derive(Debug, Default)]
struct SharedState {
    playback: PlaybackState,
    payload: Option<Payload>,
    track_id: Option<OwnedObjectPath>,
    length_micros: Option<i64>,
}

/// Handle used by the runtime to update what the bus sees.
///
/// Every setter wakes the service thread, which emits `PropertiesChanged` so
/// that proxies forwarding the player (e.g. BlueZ `mpris-proxy`) pick it up.
pub struct MprisHandle {
    state: Arc<Mutex<SharedState>>,
    notify: Sender<()>,
}

impl MprisHandle {
    pub fn publish(&self, payload: Payload) {
        if let Ok(mut s) = self.state.lock() {
            s.payload = Some(payload);
        }
        let _ = self.notify.send(());
    }

    pub fn set_playback(&self, playback: PlaybackState) {
        if let Ok(mut s) = self.state.lock() {
            s.playback = playback;
        }
        let _ = self.notify.send(());
    }

    /// Track identity reported alongside the payload.
    pub fn set_track(&self, index: Option<usize>, length: Option<Duration>) {
        if let Ok(mut s) = self.state.lock() {
            s.track_id = index.and_then(track_path);
            s.length_micros = length.map(|d| i64::try_from(d.as_micros()).unwrap_or(i64::MAX));
        }
        let _ = self.notify.send(());
    }

    pub fn clear(&self) {
        if let Ok(mut s) = self.state.lock() {
            *s = SharedState::default();
        }
        let _ = self.notify.send(());
    }
}

fn track_path(index: usize) -> Option<OwnedObjectPath> {
    OwnedObjectPath::try_from(format!("{OBJECT_PATH}/track/{index}")).ok()
}

fn owned(value: Value<'_>) -> Option<OwnedValue> {
    OwnedValue::try_from(value).ok()
}

fn metadata_map(state: &SharedState) -> HashMap<String, OwnedValue> {
    let mut map = HashMap::new();
    let mut put = |key: &str, value: Option<OwnedValue>| {
        if let Some(v) = value {
            map.insert(key.to_string(), v);
        }
    };

    let track_id = state
        .track_id
        .clone()
        .map(OwnedObjectPath::into_inner)
        .unwrap_or_else(|| ObjectPath::from_static_str_unchecked(NO_TRACK));
    put("mpris:trackid", owned(Value::from(track_id)));

    if let Some(p) = &state.payload {
        put("xesam:title", owned(Value::from(p.title.clone())));
        put("xesam:artist", owned(Value::from(vec![p.artist.clone()])));
        put("xesam:album", owned(Value::from(p.album.clone())));
        if let Some(url) = &p.artwork {
            put("mpris:artUrl", owned(Value::from(url.clone())));
        }
    }
    if let Some(len) = state.length_micros {
        put("mpris:length", owned(Value::from(len)));
    }
    map
}

struct RootIface {
    tx: Sender<ControlCmd>,
}

#[interface(name = "org.mpris.MediaPlayer2")]
impl RootIface {
    fn raise(&self) {}

    fn quit(&self) {
        let _ = self.tx.send(ControlCmd::Quit);
    }

    #[zbus(property)]
    fn can_quit(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_raise(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn has_track_list(&self) -> bool {
        false
    }

    #[zbus(property)]
    fn identity(&self) -> &str {
        "lyricast"
    }

    #[zbus(property)]
    fn supported_uri_schemes(&self) -> Vec<String> {
        vec!["file".to_string()]
    }

    #[zbus(property)]
    fn supported_mime_types(&self) -> Vec<String> {
        vec![]
    }
}

struct PlayerIface {
    tx: Sender<ControlCmd>,
    state: Arc<Mutex<SharedState>>,
}

#[interface(name = "org.mpris.MediaPlayer2.Player")]
impl PlayerIface {
    fn next(&self) {
        let _ = self.tx.send(ControlCmd::Next);
    }

    fn previous(&self) {
        let _ = self.tx.send(ControlCmd::Prev);
    }

    fn play(&self) {
        let _ = self.tx.send(ControlCmd::Play);
    }

    fn pause(&self) {
        let _ = self.tx.send(ControlCmd::Pause);
    }

    fn play_pause(&self) {
        let _ = self.tx.send(ControlCmd::PlayPause);
    }

    fn stop(&self) {
        let _ = self.tx.send(ControlCmd::Stop);
    }

    fn seek(&self, offset: i64) {
        let secs = (offset as f64 / 1_000_000.0).round() as i32;
        if secs != 0 {
            let _ = self.tx.send(ControlCmd::SeekBy(secs));
        }
    }

    #[zbus(property)]
    fn playback_status(&self) -> &str {
        let Ok(s) = self.state.lock() else {
            return "Stopped";
        };
        match s.playback {
            PlaybackState::Stopped => "Stopped",
            PlaybackState::Playing => "Playing",
            PlaybackState::Paused => "Paused",
        }
    }

    #[zbus(property)]
    fn can_control(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_play(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_pause(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_next(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_go_previous(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn can_seek(&self) -> bool {
        true
    }

    #[zbus(property)]
    fn metadata(&self) -> HashMap<String, OwnedValue> {
        match self.state.lock() {
            Ok(s) => metadata_map(&s),
            Err(_) => HashMap::new(),
        }
    }
}

pub fn spawn_mpris(tx: Sender<ControlCmd>) -> MprisHandle {
    let state = Arc::new(Mutex::new(SharedState::default()));
    let (notify_tx, notify_rx) = mpsc::channel::<()>();

    let state_for_thread = state.clone();
    std::thread::spawn(move || {
        block_on(serve(tx, state_for_thread, notify_rx));
    });

    MprisHandle {
        state,
        notify: notify_tx,
    }
}

async fn serve(tx: Sender<ControlCmd>, state: Arc<Mutex<SharedState>>, notify: Receiver<()>) {
    let connection = match Connection::session().await {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "mpris: failed to connect to session bus");
            return;
        }
    };

    if let Err(e) = connection.request_name(BUS_NAME).await {
        tracing::error!(error = %e, name = BUS_NAME, "mpris: failed to acquire name");
        return;
    }

    let object_server = connection.object_server();

    if let Err(e) = object_server.at(OBJECT_PATH, RootIface { tx: tx.clone() }).await {
        tracing::error!(error = %e, "mpris: failed to register root iface");
        return;
    }

    if let Err(e) = object_server.at(OBJECT_PATH, PlayerIface { tx, state }).await {
        tracing::error!(error = %e, "mpris: failed to register player iface");
        return;
    }

    let iface_ref: InterfaceRef<PlayerIface> =
        match object_server.interface::<_, PlayerIface>(OBJECT_PATH).await {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(error = %e, "mpris: player iface not found");
                return;
            }
        };

    tracing::info!(name = BUS_NAME, "mpris: service ready");

    loop {
        Timer::after(NOTIFY_POLL).await;

        let mut changed = false;
        loop {
            match notify.try_recv() {
                Ok(()) => changed = true,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }
        if !changed {
            continue;
        }

        let iface = iface_ref.get().await;
        let emitter = iface_ref.signal_emitter();
        if let Err(e) = iface.metadata_changed(emitter).await {
            tracing::warn!(error = %e, "mpris: failed to emit metadata change");
        }
        if let Err(e) = iface.playback_status_changed(emitter).await {
            tracing::warn!(error = %e, "mpris: failed to emit playback status change");
        }
    }
}

#[cfg(test)]
mod tests;
