#![allow(dead_code)]

use media_proxy::{Controller, LocalMediaPlayer, MediaProxy, PlayerHandle, ProxyError, RemoteClient, Request, Value};

/// Controller that keeps every value as display text.
#[derive(Debug, Default)]
pub struct Recorder {
    pub values: Vec<(PlayerHandle, Result<String, ProxyError>)>,
    pub discovered: Vec<Result<(), ProxyError>>,
    pub local_players: usize,
}

impl Recorder {
    pub fn local_texts(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(p, _)| *p == PlayerHandle::Local)
            .filter_map(|(_, v)| v.clone().ok())
            .collect()
    }
}

impl Controller for Recorder {
    fn on_value(&mut self, player: PlayerHandle, value: Result<Value<'_>, ProxyError>) {
        self.values.push((player, value.map(|v| v.to_string())));
    }

    fn on_discovered(&mut self, result: Result<(), ProxyError>) {
        self.discovered.push(result);
    }

    fn on_local_player(&mut self, _player: PlayerHandle) {
        self.local_players += 1;
    }
}

/// Remote client that records what it was asked to send.
#[derive(Debug, Default)]
pub struct MockRemote {
    pub requests: Vec<String>,
    pub fail_with: Option<i32>,
}

impl RemoteClient for MockRemote {
    fn submit(&mut self, request: &Request<'_>) -> Result<(), ProxyError> {
        if let Some(code) = self.fail_with {
            return Err(ProxyError::Remote(code));
        }
        self.requests.push(format!("{request:?}"));
        Ok(())
    }
}

pub type Proxy = MediaProxy<LocalMediaPlayer, MockRemote, Recorder>;

/// Proxy with the demo player registered and initialised, and a controller.
pub fn local_proxy() -> Proxy {
    let mut proxy = Proxy::new();
    proxy.register_local(LocalMediaPlayer::default()).expect("register local");
    proxy.register_controller(Recorder::default()).expect("register controller");
    proxy.init_local().expect("init local");
    proxy.controller_mut().expect("controller").values.clear();
    proxy
}

pub fn controller(proxy: &Proxy) -> &Recorder {
    proxy.controller().expect("controller registered")
}
