//! Proxy settings

use embassy_time::Duration;

/// How often the position task advances the local player.
pub const POSITION_UPDATE_PERIOD: Duration = Duration::from_millis(1000);
