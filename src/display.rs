//! What ends up on the head unit: slot mapping, the metadata hold, payload
//! composition and the publish throttle.

mod hold;
mod mapping;
mod payload;
mod throttle;

pub use hold::{HoldPolicy, MAX_HOLD_SECS};
pub use mapping::{DisplaySlot, FieldMapping, LyricRole, LyricSlots};
pub use payload::{EMPTY_FIELD, Payload, TrackMetadata, compose};
pub use throttle::{MAX_INTERVAL_MS, MIN_INTERVAL_MS, PublishThrottler};

#[cfg(test)]
mod tests;
