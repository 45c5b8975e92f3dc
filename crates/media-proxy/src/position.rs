//! Periodic track position updates for the local player.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Ticker};

use crate::proxy::{Controller, LocalPlayer, MediaProxy, RemoteClient};

/// Advance the local player by `elapsed` and forward its notifications.
///
/// Without a local player this does nothing.
pub fn position_step<L, R, C>(proxy: &mut MediaProxy<L, R, C>, elapsed: Duration)
where
    L: LocalPlayer,
    R: RemoteClient,
    C: Controller,
{
    if proxy.local_player().is_none() {
        return;
    }
    let ms = u32::try_from(elapsed.as_millis()).unwrap_or(u32::MAX);
    if proxy.tick_local(ms).is_err() {
        debug!("position update skipped");
    }
}

/// Run [`position_step`] every `period`, forever.
pub async fn run_position_updates<M, L, R, C>(proxy: &Mutex<M, MediaProxy<L, R, C>>, period: Duration) -> !
where
    M: RawMutex,
    L: LocalPlayer,
    R: RemoteClient,
    C: Controller,
{
    let mut ticker = Ticker::every(period);
    loop {
        ticker.next().await;
        let mut proxy = proxy.lock().await;
        position_step(&mut proxy, period);
    }
}
