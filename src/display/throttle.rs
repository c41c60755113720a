//! Trailing-edge publish throttle.
//!
//! The throttler never publishes by itself. `submit` and `poll` hand back the
//! payload to send right now, if any, and `deadline_ms` tells the caller when
//! the deferred send comes due so it can sleep until then.

use super::payload::Payload;

pub const MIN_INTERVAL_MS: u64 = 10;
pub const MAX_INTERVAL_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ThrottleState {
    Idle,
    /// A deferred send of `pending` is due at `fire_at_ms`.
    Armed { fire_at_ms: u64, pending: Payload },
}

/// Rate limiter that keeps sends at least `min_interval_ms` apart and
/// coalesces everything submitted in between into the latest payload.
#[derive(Debug, Clone)]
pub struct PublishThrottler {
    min_interval_ms: u64,
    last_sent_at_ms: Option<u64>,
    last_sent: Option<Payload>,
    state: ThrottleState,
}

impl PublishThrottler {
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            min_interval_ms: clamp_interval(min_interval_ms),
            last_sent_at_ms: None,
            last_sent: None,
            state: ThrottleState::Idle,
        }
    }

    pub fn min_interval_ms(&self) -> u64 {
        self.min_interval_ms
    }

    /// Change the interval; an armed send is moved to honour the new spacing.
    pub fn set_min_interval_ms(&mut self, min_interval_ms: u64) {
        self.min_interval_ms = clamp_interval(min_interval_ms);
        if let (ThrottleState::Armed { fire_at_ms, .. }, Some(sent_at)) =
            (&mut self.state, self.last_sent_at_ms)
        {
            *fire_at_ms = sent_at.saturating_add(self.min_interval_ms);
        }
    }

    pub fn last_sent(&self) -> Option<&Payload> {
        self.last_sent.as_ref()
    }

    pub fn is_armed(&self) -> bool {
        matches!(self.state, ThrottleState::Armed { .. })
    }

    /// When the deferred send comes due, if one is armed.
    pub fn deadline_ms(&self) -> Option<u64> {
        match self.state {
            ThrottleState::Armed { fire_at_ms, .. } => Some(fire_at_ms),
            ThrottleState::Idle => None,
        }
    }

    /// Offer a new candidate at `now_ms`. Returns the payload to send
    /// immediately, or `None` when it was dropped as unchanged or deferred.
    pub fn submit(&mut self, now_ms: u64, payload: Payload) -> Option<Payload> {
        if !self.is_armed() && self.last_sent.as_ref() == Some(&payload) {
            return None;
        }

        let due = match self.last_sent_at_ms {
            None => true,
            Some(sent_at) => now_ms.saturating_sub(sent_at) >= self.min_interval_ms,
        };
        if due {
            self.state = ThrottleState::Idle;
            return Some(self.record_send(now_ms, payload));
        }

        if let ThrottleState::Armed { pending, .. } = &mut self.state {
            *pending = payload;
            return None;
        }
        // Not due, so something was sent before.
        let sent_at = self.last_sent_at_ms.unwrap_or(now_ms);
        self.state = ThrottleState::Armed {
            fire_at_ms: sent_at.saturating_add(self.min_interval_ms),
            pending: payload,
        };
        None
    }

    /// Fire the deferred send if it is due at `now_ms`.
    pub fn poll(&mut self, now_ms: u64) -> Option<Payload> {
        match &self.state {
            ThrottleState::Armed { fire_at_ms, .. } if now_ms >= *fire_at_ms => {}
            _ => return None,
        }
        match std::mem::replace(&mut self.state, ThrottleState::Idle) {
            ThrottleState::Armed { pending, .. } => Some(self.record_send(now_ms, pending)),
            ThrottleState::Idle => None,
        }
    }

    /// Drop the deferred send, if any, without sending it.
    pub fn cancel(&mut self) {
        if self.is_armed() {
            tracing::debug!("cancelling pending publish");
        }
        self.state = ThrottleState::Idle;
    }

    fn record_send(&mut self, now_ms: u64, payload: Payload) -> Payload {
        self.last_sent_at_ms = Some(now_ms);
        self.last_sent = Some(payload.clone());
        payload
    }
}

fn clamp_interval(ms: u64) -> u64 {
    ms.clamp(MIN_INTERVAL_MS, MAX_INTERVAL_MS)
}
