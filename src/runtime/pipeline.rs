use std::time::Duration;

use crate::config::{DisplaySettings, MeasureKind, Settings};
use crate::display::{HoldPolicy, Payload, PublishThrottler};
use crate::library::Track;
use crate::marquee::{CellMeasure, FixedAdvanceMeasure, ScrollProfile, TextMeasure};
use crate::session::{DisplayConfig, LyricSession};

const MIN_WIDTH_SCALE: f32 = 0.1;
const MAX_WIDTH_SCALE: f32 = 10.0;

/// Everything between the playback clock and the display channel: the
/// session of the playing track, the runtime display settings and the
/// publish throttler.
pub struct Pipeline {
    settings: Settings,
    config: DisplayConfig,
    measure: Box<dyn TextMeasure>,
    throttler: PublishThrottler,
    session: Option<(usize, LyricSession)>,
}

impl Pipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            config: display_config(&settings),
            measure: build_measure(&settings.display),
            throttler: PublishThrottler::new(settings.publish.min_interval_ms),
            session: None,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn throttler(&self) -> &PublishThrottler {
        &self.throttler
    }

    pub fn track_index(&self) -> Option<usize> {
        self.session.as_ref().map(|(i, _)| *i)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.settings.publish.tick_ms.max(1))
    }

    /// Replace the session when the playing track changed.
    pub fn set_track(&mut self, track: Option<(usize, &Track)>) {
        if track.map(|(i, _)| i) == self.track_index() {
            return;
        }
        self.session = track.map(|(i, t)| {
            let session = LyricSession::for_track(t);
            tracing::info!(
                index = i,
                title = %session.metadata().title,
                lines = session.timeline().len(),
                "track changed"
            );
            (i, session)
        });
    }

    /// Compose the payload for `position_ms` and offer it to the throttler.
    /// Returns the payload to publish now, if any.
    pub fn tick(&mut self, position_ms: u64, now_ms: u64) -> Option<Payload> {
        let (_, session) = self.session.as_mut()?;
        let frame = session.tick(position_ms, &self.config, self.measure.as_ref());
        tracing::trace!(
            position_ms,
            line = ?frame.active_index,
            window = ?frame.window_index,
            "tick"
        );
        self.throttler.submit(now_ms, frame.payload)
    }

    /// Fire the deferred send if it is due.
    pub fn poll(&mut self, now_ms: u64) -> Option<Payload> {
        self.throttler.poll(now_ms)
    }

    /// How long the event loop may sleep: until the next tick or the
    /// throttler's deadline, whichever is sooner.
    pub fn wait_timeout(&self, now_ms: u64) -> Duration {
        let tick = self.tick_interval();
        match self.throttler.deadline_ms() {
            Some(at) => tick.min(Duration::from_millis(at.saturating_sub(now_ms))),
            None => tick,
        }
    }

    /// Apply reloaded settings without restarting the pipeline.
    pub fn apply(&mut self, new: Settings) {
        let old = &self.settings;

        self.config.mapping = new.mapping;
        if new.scroll != old.scroll {
            self.config.profile = ScrollProfile::new(new.scroll.dwell_start, new.scroll.dwell_end);
        }
        if new.publish.min_interval_ms != old.publish.min_interval_ms {
            self.throttler.set_min_interval_ms(new.publish.min_interval_ms);
        }
        self.config.hold = HoldPolicy::new(new.publish.min_hold_seconds);
        self.config.max_width_px = max_width_px(&new.display);

        if measure_changed(&old.display, &new.display) {
            self.measure = build_measure(&new.display);
            if let Some((_, session)) = self.session.as_mut() {
                session.invalidate_windows();
            }
        }

        tracing::info!(
            width_px = self.config.max_width_px,
            dwell_start = self.config.profile.dwell_start(),
            dwell_end = self.config.profile.dwell_end(),
            min_interval_ms = self.throttler.min_interval_ms(),
            "applied reloaded settings"
        );
        self.settings = new;
    }

    /// Drop any deferred send without firing it.
    pub fn shutdown(&mut self) {
        self.throttler.cancel();
        self.session = None;
    }
}

pub fn display_config(settings: &Settings) -> DisplayConfig {
    DisplayConfig {
        mapping: settings.mapping,
        profile: ScrollProfile::new(settings.scroll.dwell_start, settings.scroll.dwell_end),
        max_width_px: max_width_px(&settings.display),
        hold: HoldPolicy::new(settings.publish.min_hold_seconds),
    }
}

pub fn max_width_px(display: &DisplaySettings) -> f32 {
    let scale = if display.width_scale.is_nan() {
        1.0
    } else {
        display.width_scale.clamp(MIN_WIDTH_SCALE, MAX_WIDTH_SCALE)
    };
    display.width_px * scale
}

pub fn build_measure(display: &DisplaySettings) -> Box<dyn TextMeasure> {
    match display.measure {
        MeasureKind::Cells => Box::new(CellMeasure {
            px_per_cell: display.px_per_cell,
        }),
        MeasureKind::Fixed => Box::new(FixedAdvanceMeasure {
            px_per_char: display.px_per_char,
        }),
    }
}

fn measure_changed(old: &DisplaySettings, new: &DisplaySettings) -> bool {
    old.measure != new.measure
        || old.px_per_cell != new.px_per_cell
        || old.px_per_char != new.px_per_char
}
