//! Player configuration and constants
//!
//! Compile-time settings for the local media player. Anything a deployment
//! may want to rename lives in [`PlayerConfig`]; buffer sizes are constants
//! because they size static storage.

/// Default player name.
pub const PLAYER_NAME: &str = "Player0";

/// Default icon URL.
pub const ICON_URL: &str = "http://server.some.where/path/icon.png";

/// Capacity of the object content buffer, in bytes.
pub const MAX_OBJ_SIZE: usize = 127;

/// Default size of the (dummy) icon bitmap, in bytes.
pub const ICON_BITMAP_SIZE: usize = 127;

/// Default size of a (dummy) track object, in bytes.
pub const TRACK_MAX_SIZE: usize = 127;

/// Pending notifications kept before the oldest is dropped.
pub const NOTIFICATION_QUEUE_LEN: usize = 32;

/// Seeking speed factor change per fast rewind / fast forward.
pub const SEEKING_SPEED_FACTOR_STEP: i8 = 2;

/// Previous segment goes back one segment when the position is less than
/// this far into the current one (centiseconds).
pub const PREV_MARGIN: i32 = 500;

/// Runtime player settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayerConfig {
    pub name: &'static str,
    pub icon_url: &'static str,
    /// Icon object size, capped at [`MAX_OBJ_SIZE`].
    pub icon_bitmap_size: usize,
    /// Track object size, capped at [`MAX_OBJ_SIZE`].
    pub track_max_size: usize,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            name: PLAYER_NAME,
            icon_url: ICON_URL,
            icon_bitmap_size: ICON_BITMAP_SIZE,
            track_max_size: TRACK_MAX_SIZE,
        }
    }
}
