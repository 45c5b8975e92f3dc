//! Routing between players and a controller.
//!
//! A [`MediaProxy`] knows at most one local player (implemented in-process,
//! see [`LocalPlayer`]), at most one remote player (reached through a
//! [`RemoteClient`]) and one [`Controller`] that receives every value.
//!
//! Calls addressed to the local player complete synchronously: reads are
//! delivered to the controller before the call returns, and any
//! notifications the call caused are forwarded right after. Calls addressed
//! to the remote player are submitted as [`Request`]s; their outcome comes
//! back later through [`MediaProxy::on_remote_value`] and
//! [`MediaProxy::on_remote_discovered`].

use core::fmt;

use bluetooth::mcs::{
    Command, CommandNotification, MediaState, PlayingOrder, PlayingOrders, SearchResult,
};
use bluetooth::ots::ObjectId;
use playback::{Notification, PlayerError};

// ── Errors ───────────────────────────────────────────────────────────────

/// Proxy errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProxyError {
    /// The addressed player is not registered (or not yet discovered).
    NoPlayer,
    /// The player does not implement this call.
    NotSupported,
    /// A local player or controller is already registered.
    AlreadyRegistered,
    /// A value was produced with no controller to receive it.
    NoController,
    /// An argument is out of range for the call.
    InvalidArgument,
    /// The local player rejected the call.
    Player(PlayerError),
    /// Error code reported by the remote client.
    Remote(i32),
}

impl fmt::Display for ProxyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPlayer => write!(f, "no such player"),
            Self::NotSupported => write!(f, "not supported"),
            Self::AlreadyRegistered => write!(f, "already registered"),
            Self::NoController => write!(f, "no controller registered"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Player(e) => write!(f, "player error: {e}"),
            Self::Remote(code) => write!(f, "remote error {code}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ProxyError {}

impl From<PlayerError> for ProxyError {
    fn from(e: PlayerError) -> Self {
        Self::Player(e)
    }
}

// ── Players and properties ───────────────────────────────────────────────

/// Which player a call is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerHandle {
    Local,
    Remote,
}

impl PlayerHandle {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Remote => "remote",
        }
    }
}

/// Every readable player value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Property {
    PlayerName,
    IconId,
    IconUrl,
    TrackTitle,
    TrackDuration,
    TrackPosition,
    PlaybackSpeed,
    SeekingSpeed,
    TrackSegmentsId,
    CurrentTrackId,
    NextTrackId,
    ParentGroupId,
    CurrentGroupId,
    PlayingOrder,
    PlayingOrdersSupported,
    MediaState,
    OpcodesSupported,
    SearchResultsId,
    ContentCtrlId,
}

impl Property {
    pub const ALL: [Property; 19] = [
        Property::PlayerName,
        Property::IconId,
        Property::IconUrl,
        Property::TrackTitle,
        Property::TrackDuration,
        Property::TrackPosition,
        Property::PlaybackSpeed,
        Property::SeekingSpeed,
        Property::TrackSegmentsId,
        Property::CurrentTrackId,
        Property::NextTrackId,
        Property::ParentGroupId,
        Property::CurrentGroupId,
        Property::PlayingOrder,
        Property::PlayingOrdersSupported,
        Property::MediaState,
        Property::OpcodesSupported,
        Property::SearchResultsId,
        Property::ContentCtrlId,
    ];

    /// Snake-case name, as used by the shell.
    pub const fn name(self) -> &'static str {
        match self {
            Property::PlayerName => "player_name",
            Property::IconId => "icon_id",
            Property::IconUrl => "icon_url",
            Property::TrackTitle => "track_title",
            Property::TrackDuration => "track_duration",
            Property::TrackPosition => "track_position",
            Property::PlaybackSpeed => "playback_speed",
            Property::SeekingSpeed => "seeking_speed",
            Property::TrackSegmentsId => "track_segments_id",
            Property::CurrentTrackId => "current_track_id",
            Property::NextTrackId => "next_track_id",
            Property::ParentGroupId => "parent_group_id",
            Property::CurrentGroupId => "current_group_id",
            Property::PlayingOrder => "playing_order",
            Property::PlayingOrdersSupported => "playing_orders_supported",
            Property::MediaState => "media_state",
            Property::OpcodesSupported => "opcodes_supported",
            Property::SearchResultsId => "search_results_id",
            Property::ContentCtrlId => "content_ctrl_id",
        }
    }
}

/// One value received from a player, read or notified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Value<'a> {
    PlayerName(&'a str),
    IconId(Option<ObjectId>),
    IconUrl(&'a str),
    TrackChanged,
    TrackTitle(&'a str),
    TrackDuration(i32),
    TrackPosition(i32),
    PlaybackSpeed(i8),
    SeekingSpeed(i8),
    TrackSegmentsId(Option<ObjectId>),
    CurrentTrackId(Option<ObjectId>),
    NextTrackId(Option<ObjectId>),
    ParentGroupId(Option<ObjectId>),
    CurrentGroupId(Option<ObjectId>),
    PlayingOrder(PlayingOrder),
    PlayingOrdersSupported(PlayingOrders),
    MediaState(MediaState),
    OpcodesSupported(u32),
    CommandResult(CommandNotification),
    SearchResult(SearchResult),
    SearchResultsId(Option<ObjectId>),
    ContentCtrlId(u8),
}

impl Value<'_> {
    /// The property this value reports, if it is a readable one.
    pub fn property(&self) -> Option<Property> {
        let property = match self {
            Value::PlayerName(_) => Property::PlayerName,
            Value::IconId(_) => Property::IconId,
            Value::IconUrl(_) => Property::IconUrl,
            Value::TrackTitle(_) => Property::TrackTitle,
            Value::TrackDuration(_) => Property::TrackDuration,
            Value::TrackPosition(_) => Property::TrackPosition,
            Value::PlaybackSpeed(_) => Property::PlaybackSpeed,
            Value::SeekingSpeed(_) => Property::SeekingSpeed,
            Value::TrackSegmentsId(_) => Property::TrackSegmentsId,
            Value::CurrentTrackId(_) => Property::CurrentTrackId,
            Value::NextTrackId(_) => Property::NextTrackId,
            Value::ParentGroupId(_) => Property::ParentGroupId,
            Value::CurrentGroupId(_) => Property::CurrentGroupId,
            Value::PlayingOrder(_) => Property::PlayingOrder,
            Value::PlayingOrdersSupported(_) => Property::PlayingOrdersSupported,
            Value::MediaState(_) => Property::MediaState,
            Value::OpcodesSupported(_) => Property::OpcodesSupported,
            Value::SearchResultsId(_) => Property::SearchResultsId,
            Value::ContentCtrlId(_) => Property::ContentCtrlId,
            Value::TrackChanged | Value::CommandResult(_) | Value::SearchResult(_) => return None,
        };
        Some(property)
    }
}

impl From<Notification> for Value<'static> {
    fn from(n: Notification) -> Self {
        match n {
            Notification::TrackChanged => Value::TrackChanged,
            Notification::TrackTitle(title) => Value::TrackTitle(title),
            Notification::TrackDuration(d) => Value::TrackDuration(d),
            Notification::TrackPosition(p) => Value::TrackPosition(p),
            Notification::PlaybackSpeed(s) => Value::PlaybackSpeed(s),
            Notification::SeekingSpeed(s) => Value::SeekingSpeed(s),
            Notification::CurrentTrackId(id) => Value::CurrentTrackId(id),
            Notification::NextTrackId(id) => Value::NextTrackId(id),
            Notification::CurrentGroupId(id) => Value::CurrentGroupId(id),
            Notification::ParentGroupId(id) => Value::ParentGroupId(id),
            Notification::PlayingOrder(o) => Value::PlayingOrder(o),
            Notification::MediaState(s) => Value::MediaState(s),
            Notification::CommandResult(r) => Value::CommandResult(r),
            Notification::SearchResult(r) => Value::SearchResult(r),
            Notification::SearchResultsId(id) => Value::SearchResultsId(id),
        }
    }
}

struct OptionalId(Option<ObjectId>);

impl fmt::Display for OptionalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(id) => write!(f, "{id}"),
            None => write!(f, "none"),
        }
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.property().map(Property::name);
        match (name, self) {
            (_, Value::TrackChanged) => write!(f, "track_changed"),
            (_, Value::CommandResult(r)) => {
                write!(f, "command_result: opcode {:#04x} result {}", r.requested_opcode, r.result.raw())
            }
            (_, Value::SearchResult(r)) => write!(f, "search_result: {}", *r as u8),
            (Some(name), value) => {
                write!(f, "{name}: ")?;
                match value {
                    Value::PlayerName(s) | Value::IconUrl(s) | Value::TrackTitle(s) => write!(f, "{s}"),
                    Value::TrackDuration(v) | Value::TrackPosition(v) => write!(f, "{v}"),
                    Value::PlaybackSpeed(v) | Value::SeekingSpeed(v) => write!(f, "{v}"),
                    Value::IconId(id)
                    | Value::TrackSegmentsId(id)
                    | Value::CurrentTrackId(id)
                    | Value::NextTrackId(id)
                    | Value::ParentGroupId(id)
                    | Value::CurrentGroupId(id)
                    | Value::SearchResultsId(id) => write!(f, "{}", OptionalId(*id)),
                    Value::PlayingOrder(o) => write!(f, "{}", o.raw()),
                    Value::PlayingOrdersSupported(o) => write!(f, "{:#06x}", o.bits()),
                    Value::MediaState(s) => write!(f, "{}", s.name()),
                    Value::OpcodesSupported(v) => write!(f, "{v:#010x}"),
                    Value::ContentCtrlId(v) => write!(f, "{v}"),
                    Value::TrackChanged | Value::CommandResult(_) | Value::SearchResult(_) => Ok(()),
                }
            }
            (None, _) => Ok(()),
        }
    }
}

// ── Player traits ────────────────────────────────────────────────────────

/// A player running in-process.
///
/// Every call defaults to [`ProxyError::NotSupported`], so an implementation
/// only provides what it actually has.
#[allow(unused_variables)]
pub trait LocalPlayer {
    fn init(&mut self, ccid: u8) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn player_name(&self) -> Result<&str, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn icon_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn icon_url(&self) -> Result<&str, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn track_title(&self) -> Result<&str, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn track_duration(&self) -> Result<i32, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn track_position(&self) -> Result<i32, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_track_position(&mut self, position: i32) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn playback_speed(&self) -> Result<i8, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_playback_speed(&mut self, speed: i8) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn seeking_speed(&self) -> Result<i8, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn track_segments_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn current_track_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_current_track_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn next_track_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_next_track_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn parent_group_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn current_group_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_current_group_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn playing_order(&self) -> Result<PlayingOrder, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn set_playing_order(&mut self, order: PlayingOrder) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn playing_orders_supported(&self) -> Result<PlayingOrders, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn media_state(&self) -> Result<MediaState, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn opcodes_supported(&self) -> Result<u32, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn send_command(&mut self, command: Command) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn send_search(&mut self, search: &[u8]) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn search_results_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    fn content_ctrl_id(&self) -> Result<u8, ProxyError> {
        Err(ProxyError::NotSupported)
    }

    /// Advance playback by `elapsed_ms`.
    fn tick(&mut self, elapsed_ms: u32) -> Result<(), ProxyError> {
        Err(ProxyError::NotSupported)
    }

    /// Oldest pending notification, if the player queues any.
    fn next_notification(&mut self) -> Option<Notification> {
        None
    }
}

/// Read `property` from a local player.
pub fn read_local<L: LocalPlayer + ?Sized>(player: &L, property: Property) -> Result<Value<'_>, ProxyError> {
    let value = match property {
        Property::PlayerName => Value::PlayerName(player.player_name()?),
        Property::IconId => Value::IconId(player.icon_id()?),
        Property::IconUrl => Value::IconUrl(player.icon_url()?),
        Property::TrackTitle => Value::TrackTitle(player.track_title()?),
        Property::TrackDuration => Value::TrackDuration(player.track_duration()?),
        Property::TrackPosition => Value::TrackPosition(player.track_position()?),
        Property::PlaybackSpeed => Value::PlaybackSpeed(player.playback_speed()?),
        Property::SeekingSpeed => Value::SeekingSpeed(player.seeking_speed()?),
        Property::TrackSegmentsId => Value::TrackSegmentsId(player.track_segments_id()?),
        Property::CurrentTrackId => Value::CurrentTrackId(player.current_track_id()?),
        Property::NextTrackId => Value::NextTrackId(player.next_track_id()?),
        Property::ParentGroupId => Value::ParentGroupId(player.parent_group_id()?),
        Property::CurrentGroupId => Value::CurrentGroupId(player.current_group_id()?),
        Property::PlayingOrder => Value::PlayingOrder(player.playing_order()?),
        Property::PlayingOrdersSupported => Value::PlayingOrdersSupported(player.playing_orders_supported()?),
        Property::MediaState => Value::MediaState(player.media_state()?),
        Property::OpcodesSupported => Value::OpcodesSupported(player.opcodes_supported()?),
        Property::SearchResultsId => Value::SearchResultsId(player.search_results_id()?),
        Property::ContentCtrlId => Value::ContentCtrlId(player.content_ctrl_id()?),
    };
    Ok(value)
}

/// Request to a remote player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    /// Discover the remote player's service.
    Discover,
    Read(Property),
    SetTrackPosition(i32),
    SetPlaybackSpeed(i8),
    SetCurrentTrackId(ObjectId),
    SetNextTrackId(ObjectId),
    SetCurrentGroupId(ObjectId),
    SetPlayingOrder(PlayingOrder),
    Command(Command),
    Search(&'a [u8]),
}

/// Client side of a remote player.
///
/// `submit` only starts the request. Results are fed back through the
/// proxy's `on_remote_*` methods.
pub trait RemoteClient {
    fn submit(&mut self, request: &Request<'_>) -> Result<(), ProxyError>;
}

/// Placeholder for a proxy without a remote client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoRemote {}

impl RemoteClient for NoRemote {
    fn submit(&mut self, _request: &Request<'_>) -> Result<(), ProxyError> {
        match *self {}
    }
}

/// Receiver of everything the players report.
#[allow(unused_variables)]
pub trait Controller {
    /// A value read from or notified by `player`.
    fn on_value(&mut self, player: PlayerHandle, value: Result<Value<'_>, ProxyError>);

    /// Remote discovery finished.
    fn on_discovered(&mut self, result: Result<(), ProxyError>) {}

    /// A local player is available.
    fn on_local_player(&mut self, player: PlayerHandle) {}
}

// ── Proxy ────────────────────────────────────────────────────────────────

/// Routes calls to a local or remote player and values to the controller.
#[derive(Debug)]
pub struct MediaProxy<L, R, C> {
    local: Option<L>,
    remote: Option<R>,
    remote_discovered: bool,
    controller: Option<C>,
    next_ccid: u8,
}

impl<L, R, C> Default for MediaProxy<L, R, C> {
    fn default() -> Self {
        Self {
            local: None,
            remote: None,
            remote_discovered: false,
            controller: None,
            next_ccid: 0,
        }
    }
}

impl<L: LocalPlayer, R: RemoteClient, C: Controller> MediaProxy<L, R, C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the local player. Only one can be registered.
    pub fn register_local(&mut self, player: L) -> Result<(), ProxyError> {
        if self.local.is_some() {
            return Err(ProxyError::AlreadyRegistered);
        }
        self.local = Some(player);
        info!("local player registered");
        if let Some(controller) = self.controller.as_mut() {
            controller.on_local_player(PlayerHandle::Local);
        }
        Ok(())
    }

    /// Register the controller. Reports the local player right away if
    /// there is one.
    pub fn register_controller(&mut self, controller: C) -> Result<(), ProxyError> {
        if self.controller.is_some() {
            return Err(ProxyError::AlreadyRegistered);
        }
        let controller = self.controller.insert(controller);
        if self.local.is_some() {
            controller.on_local_player(PlayerHandle::Local);
        }
        Ok(())
    }

    /// Initialise the local player with the next free content control ID.
    pub fn init_local(&mut self) -> Result<u8, ProxyError> {
        let local = self.local.as_mut().ok_or(ProxyError::NoPlayer)?;
        let ccid = self.next_ccid;
        local.init(ccid)?;
        self.next_ccid = ccid.wrapping_add(1);
        self.pump_local();
        Ok(ccid)
    }

    /// Start discovering a remote player through `client`.
    ///
    /// The remote player is usable once discovery reports success through
    /// [`on_remote_discovered`](Self::on_remote_discovered).
    pub fn discover_remote(&mut self, mut client: R) -> Result<(), ProxyError> {
        if self.remote.is_some() {
            return Err(ProxyError::AlreadyRegistered);
        }
        client.submit(&Request::Discover)?;
        self.remote = Some(client);
        self.remote_discovered = false;
        debug!("remote discovery started");
        Ok(())
    }

    /// Remote discovery finished.
    pub fn on_remote_discovered(&mut self, result: Result<(), ProxyError>) {
        self.remote_discovered = result.is_ok();
        if result.is_err() {
            warn!("remote discovery failed");
            self.remote = None;
        }
        if let Some(controller) = self.controller.as_mut() {
            controller.on_discovered(result);
        }
    }

    /// A value arrived from the remote player.
    pub fn on_remote_value(&mut self, value: Result<Value<'_>, ProxyError>) {
        match self.controller.as_mut() {
            Some(controller) => controller.on_value(PlayerHandle::Remote, value),
            None => debug!("remote value dropped, no controller"),
        }
    }

    pub fn local_player(&self) -> Option<PlayerHandle> {
        self.local.as_ref().map(|_| PlayerHandle::Local)
    }

    pub fn remote_player(&self) -> Option<PlayerHandle> {
        (self.remote.is_some() && self.remote_discovered).then_some(PlayerHandle::Remote)
    }

    pub fn local(&self) -> Option<&L> {
        self.local.as_ref()
    }

    pub fn local_mut(&mut self) -> Option<&mut L> {
        self.local.as_mut()
    }

    pub fn remote(&self) -> Option<&R> {
        self.remote.as_ref()
    }

    pub fn remote_mut(&mut self) -> Option<&mut R> {
        self.remote.as_mut()
    }

    pub fn controller(&self) -> Option<&C> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut C> {
        self.controller.as_mut()
    }

    fn remote_client(&mut self) -> Result<&mut R, ProxyError> {
        if !self.remote_discovered {
            return Err(ProxyError::NoPlayer);
        }
        self.remote.as_mut().ok_or(ProxyError::NoPlayer)
    }

    /// Forward the local player's pending notifications to the controller.
    ///
    /// Returns how many were forwarded. Without a controller they are
    /// drained and dropped.
    pub fn pump_local(&mut self) -> usize {
        let Some(local) = self.local.as_mut() else {
            return 0;
        };
        let mut count = 0usize;
        while let Some(notification) = local.next_notification() {
            count = count.saturating_add(1);
            if let Some(controller) = self.controller.as_mut() {
                controller.on_value(PlayerHandle::Local, Ok(Value::from(notification)));
            }
        }
        count
    }

    /// Advance the local player by `elapsed_ms` and forward what changed.
    pub fn tick_local(&mut self, elapsed_ms: u32) -> Result<(), ProxyError> {
        self.local.as_mut().ok_or(ProxyError::NoPlayer)?.tick(elapsed_ms)?;
        self.pump_local();
        Ok(())
    }

    /// Read `property` from `player`.
    ///
    /// A local value (or the local error) is delivered to the controller
    /// before this returns. A remote value arrives later.
    pub fn get(&mut self, player: PlayerHandle, property: Property) -> Result<(), ProxyError> {
        match player {
            PlayerHandle::Local => {
                let local = self.local.as_ref().ok_or(ProxyError::NoPlayer)?;
                let controller = self.controller.as_mut().ok_or(ProxyError::NoController)?;
                controller.on_value(PlayerHandle::Local, read_local(local, property));
                Ok(())
            }
            PlayerHandle::Remote => self.remote_client()?.submit(&Request::Read(property)),
        }
    }

    fn route<F>(&mut self, player: PlayerHandle, request: Request<'_>, call: F) -> Result<(), ProxyError>
    where
        F: FnOnce(&mut L) -> Result<(), ProxyError>,
    {
        match player {
            PlayerHandle::Local => {
                let local = self.local.as_mut().ok_or(ProxyError::NoPlayer)?;
                let result = call(local);
                self.pump_local();
                result
            }
            PlayerHandle::Remote => self.remote_client()?.submit(&request),
        }
    }

    pub fn set_track_position(&mut self, player: PlayerHandle, position: i32) -> Result<(), ProxyError> {
        self.route(player, Request::SetTrackPosition(position), |l| l.set_track_position(position))
    }

    pub fn set_playback_speed(&mut self, player: PlayerHandle, speed: i8) -> Result<(), ProxyError> {
        self.route(player, Request::SetPlaybackSpeed(speed), |l| l.set_playback_speed(speed))
    }

    pub fn set_current_track_id(&mut self, player: PlayerHandle, id: ObjectId) -> Result<(), ProxyError> {
        self.route(player, Request::SetCurrentTrackId(id), |l| l.set_current_track_id(id))
    }

    pub fn set_next_track_id(&mut self, player: PlayerHandle, id: ObjectId) -> Result<(), ProxyError> {
        self.route(player, Request::SetNextTrackId(id), |l| l.set_next_track_id(id))
    }

    pub fn set_current_group_id(&mut self, player: PlayerHandle, id: ObjectId) -> Result<(), ProxyError> {
        self.route(player, Request::SetCurrentGroupId(id), |l| l.set_current_group_id(id))
    }

    pub fn set_playing_order(&mut self, player: PlayerHandle, order: PlayingOrder) -> Result<(), ProxyError> {
        self.route(player, Request::SetPlayingOrder(order), |l| l.set_playing_order(order))
    }

    /// [`set_playing_order`](Self::set_playing_order) from the raw 1..=10 value.
    pub fn set_playing_order_raw(&mut self, player: PlayerHandle, raw: u8) -> Result<(), ProxyError> {
        let order = PlayingOrder::from_u8(raw).ok_or(ProxyError::InvalidArgument)?;
        self.set_playing_order(player, order)
    }

    pub fn send_command(&mut self, player: PlayerHandle, command: Command) -> Result<(), ProxyError> {
        self.route(player, Request::Command(command), |l| l.send_command(command))
    }

    pub fn send_search(&mut self, player: PlayerHandle, search: &[u8]) -> Result<(), ProxyError> {
        self.route(player, Request::Search(search), |l| l.send_search(search))
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    /// Player that supports nothing but its name.
    struct NameOnly;

    impl LocalPlayer for NameOnly {
        fn player_name(&self) -> Result<&str, ProxyError> {
            Ok("bare")
        }
    }

    #[derive(Default)]
    struct Log {
        values: Vec<(PlayerHandle, Result<Option<Property>, ProxyError>)>,
        local_seen: usize,
    }

    impl Controller for Log {
        fn on_value(&mut self, player: PlayerHandle, value: Result<Value<'_>, ProxyError>) {
            self.values.push((player, value.map(|v| v.property())));
        }

        fn on_local_player(&mut self, _player: PlayerHandle) {
            self.local_seen += 1;
        }
    }

    #[test]
    fn test_missing_calls_are_not_supported() {
        let mut proxy: MediaProxy<NameOnly, NoRemote, Log> = MediaProxy::new();
        proxy.register_local(NameOnly).expect("register");
        proxy.register_controller(Log::default()).expect("controller");
        proxy.get(PlayerHandle::Local, Property::PlayerName).expect("get");
        proxy.get(PlayerHandle::Local, Property::TrackTitle).expect("get");
        assert_eq!(
            proxy.send_command(PlayerHandle::Local, Command::new(bluetooth::Opcode::Play)),
            Err(ProxyError::NotSupported)
        );
        let log = proxy.controller().expect("controller");
        assert_eq!(
            log.values,
            vec![
                (PlayerHandle::Local, Ok(Some(Property::PlayerName))),
                (PlayerHandle::Local, Err(ProxyError::NotSupported)),
            ]
        );
        assert_eq!(log.local_seen, 1);
    }

    #[test]
    fn test_register_twice() {
        let mut proxy: MediaProxy<NameOnly, NoRemote, Log> = MediaProxy::new();
        proxy.register_local(NameOnly).expect("register");
        assert_eq!(proxy.register_local(NameOnly), Err(ProxyError::AlreadyRegistered));
        proxy.register_controller(Log::default()).expect("controller");
        assert_eq!(proxy.register_controller(Log::default()), Err(ProxyError::AlreadyRegistered));
    }

    #[test]
    fn test_no_player() {
        let mut proxy: MediaProxy<NameOnly, NoRemote, Log> = MediaProxy::new();
        assert_eq!(proxy.get(PlayerHandle::Local, Property::PlayerName), Err(ProxyError::NoPlayer));
        assert_eq!(proxy.get(PlayerHandle::Remote, Property::PlayerName), Err(ProxyError::NoPlayer));
        assert_eq!(proxy.local_player(), None);
        assert_eq!(proxy.remote_player(), None);
    }

    #[test]
    fn test_get_without_controller() {
        let mut proxy: MediaProxy<NameOnly, NoRemote, Log> = MediaProxy::new();
        proxy.register_local(NameOnly).expect("register");
        assert_eq!(proxy.get(PlayerHandle::Local, Property::PlayerName), Err(ProxyError::NoController));
    }

    #[test]
    fn test_property_names_unique() {
        for (i, a) in Property::ALL.iter().enumerate() {
            for b in Property::ALL.iter().skip(i + 1) {
                assert_ne!(a.name(), b.name());
            }
        }
    }

    #[test]
    fn test_value_display() {
        use std::string::ToString;
        assert_eq!(Value::TrackPosition(100).to_string(), "track_position: 100");
        assert_eq!(Value::CurrentTrackId(None).to_string(), "current_track_id: none");
        let id = ObjectId::try_new(0x101).expect("id");
        assert_eq!(Value::NextTrackId(Some(id)).to_string(), "next_track_id: 0x000000000101");
        assert_eq!(Value::MediaState(MediaState::Paused).to_string(), "media_state: paused");
        assert_eq!(Value::TrackChanged.to_string(), "track_changed");
    }
}
