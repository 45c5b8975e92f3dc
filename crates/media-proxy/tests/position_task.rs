//! The position task against the demo player on the host time driver.
#![allow(clippy::expect_used)]

mod common;

use bluetooth::mcs::{Command, Opcode};
use common::{controller, local_proxy, Proxy};
use embassy_futures::select::select;
use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Duration, Timer};
use media_proxy::{position_step, run_position_updates, LocalPlayer, PlayerHandle};

fn playing_proxy() -> Proxy {
    let mut proxy = local_proxy();
    proxy
        .send_command(PlayerHandle::Local, Command::new(Opcode::Play))
        .expect("play");
    proxy.controller_mut().expect("controller").values.clear();
    proxy
}

#[test]
fn test_step_advances_and_notifies() {
    let mut proxy = playing_proxy();
    position_step(&mut proxy, Duration::from_millis(1000));
    position_step(&mut proxy, Duration::from_millis(1000));
    assert_eq!(
        controller(&proxy).local_texts(),
        vec!["track_position: 100".to_string(), "track_position: 200".to_string()]
    );
}

#[test]
fn test_step_paused_is_silent() {
    let mut proxy = local_proxy();
    position_step(&mut proxy, Duration::from_millis(1000));
    assert!(controller(&proxy).values.is_empty());
}

#[test]
fn test_step_without_local_player() {
    let mut proxy = Proxy::new();
    position_step(&mut proxy, Duration::from_millis(1000));
    assert!(proxy.local().is_none());
}

#[tokio::test]
async fn test_task_ticks_periodically() {
    let proxy: Mutex<NoopRawMutex, Proxy> = Mutex::new(playing_proxy());
    select(
        run_position_updates(&proxy, Duration::from_millis(10)),
        Timer::after(Duration::from_millis(75)),
    )
    .await;

    let proxy = proxy.lock().await;
    let position = proxy
        .local()
        .and_then(|l| l.track_position().ok())
        .expect("position");
    // One centisecond per 10 ms tick
    assert!(position >= 1, "position {position}");
    assert!(position <= 8, "position {position}");
    assert!(!controller(&proxy).values.is_empty());
}
