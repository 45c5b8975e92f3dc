//! Local media player.
//!
//! [`MediaPlayer`] owns a [`Catalog`] and interprets media control commands
//! against it. Each media state has its own command handler; every command
//! ends with exactly one [`Notification::CommandResult`].
//!
//! Nothing is pushed to the outside world directly. Every change a client
//! should hear about is queued as a [`Notification`] and drained with
//! [`MediaPlayer::next_notification`].
//!
//! Positions and durations are in centiseconds.

use bluetooth::mcs::{
    Command, CommandNotification, GroupRecordType, MediaState, Opcode, PlayingOrder, PlayingOrders,
    ResultCode, SearchResult, OPCODES_SUPPORTED_ALL, PLAYBACK_SPEED_UNITY, SEEKING_SPEED_FACTOR_MAX,
    SEEKING_SPEED_FACTOR_ZERO,
};
use bluetooth::ots::{id_or_none, ObjectId, ObjectType};
use bluetooth::search::parse_search;

use crate::catalog::{Catalog, Nav, ParentRef};
use crate::config::{
    PlayerConfig, MAX_OBJ_SIZE, NOTIFICATION_QUEUE_LEN, PREV_MARGIN, SEEKING_SPEED_FACTOR_STEP,
};
use crate::objects::{group_size, segments_size, ObjectContent, ObjectError, ObjectStore, ObjectStoreError};

/// Seeking speed magnitude above which fast forward / rewind stop stepping.
const SEEKING_STEP_LIMIT: i8 = SEEKING_SPEED_FACTOR_MAX.saturating_sub(SEEKING_SPEED_FACTOR_STEP);

/// A change clients should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Notification {
    TrackChanged,
    TrackTitle(&'static str),
    TrackDuration(i32),
    TrackPosition(i32),
    PlaybackSpeed(i8),
    SeekingSpeed(i8),
    CurrentTrackId(Option<ObjectId>),
    NextTrackId(Option<ObjectId>),
    CurrentGroupId(Option<ObjectId>),
    ParentGroupId(Option<ObjectId>),
    PlayingOrder(PlayingOrder),
    MediaState(MediaState),
    CommandResult(CommandNotification),
    SearchResult(SearchResult),
    SearchResultsId(Option<ObjectId>),
}

/// Errors from [`MediaPlayer::init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PlayerError {
    /// `init` already succeeded once.
    AlreadyInitialized,
    /// Registering an object failed.
    Objects(ObjectStoreError),
}

impl core::fmt::Display for PlayerError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::AlreadyInitialized => write!(f, "player already initialized"),
            Self::Objects(e) => write!(f, "object registration failed: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayerError {}

impl From<ObjectStoreError> for PlayerError {
    fn from(e: ObjectStoreError) -> Self {
        Self::Objects(e)
    }
}

/// Opcode families; handlers treat each family alike.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Family {
    Transport,
    Segment,
    Track,
    Group,
}

fn family(op: Opcode) -> Family {
    match op {
        Opcode::Play
        | Opcode::Pause
        | Opcode::FastRewind
        | Opcode::FastForward
        | Opcode::Stop
        | Opcode::MoveRelative => Family::Transport,
        Opcode::PrevSegment
        | Opcode::NextSegment
        | Opcode::FirstSegment
        | Opcode::LastSegment
        | Opcode::GotoSegment => Family::Segment,
        Opcode::PrevTrack
        | Opcode::NextTrack
        | Opcode::FirstTrack
        | Opcode::LastTrack
        | Opcode::GotoTrack => Family::Track,
        Opcode::PrevGroup
        | Opcode::NextGroup
        | Opcode::FirstGroup
        | Opcode::LastGroup
        | Opcode::GotoGroup => Family::Group,
    }
}

/// The local media player.
#[derive(Debug)]
pub struct MediaPlayer {
    config: PlayerConfig,
    catalog: Catalog,
    icon_id: Option<ObjectId>,
    track_pos: i32,
    state: MediaState,
    playback_speed: i8,
    seeking_speed: i8,
    playing_order: PlayingOrder,
    playing_orders_supported: PlayingOrders,
    opcodes_supported: u32,
    search_results_id: Option<ObjectId>,
    /// Explicitly set next track (arena index).
    next_track: Option<usize>,
    ccid: u8,
    objects: ObjectContent,
    notifications: heapless::Deque<Notification, NOTIFICATION_QUEUE_LEN>,
    initialized: bool,
}

impl MediaPlayer {
    /// Paused player at the start of the catalog's first group.
    pub fn new(config: PlayerConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            icon_id: None,
            track_pos: 0,
            state: MediaState::Paused,
            playback_speed: PLAYBACK_SPEED_UNITY,
            seeking_speed: SEEKING_SPEED_FACTOR_ZERO,
            playing_order: PlayingOrder::InOrderRepeat,
            playing_orders_supported: PlayingOrders::default()
                .with(PlayingOrder::InOrderOnce)
                .with(PlayingOrder::InOrderRepeat),
            opcodes_supported: OPCODES_SUPPORTED_ALL,
            search_results_id: None,
            next_track: None,
            ccid: 0,
            objects: ObjectContent::new(),
            notifications: heapless::Deque::new(),
            initialized: false,
        }
    }

    /// Store the content control ID and register all objects with `store`.
    ///
    /// Stops at the first registration error.
    pub fn init<S: ObjectStore + ?Sized>(&mut self, ccid: u8, store: &mut S) -> Result<(), PlayerError> {
        if self.initialized {
            return Err(PlayerError::AlreadyInitialized);
        }
        self.ccid = ccid;

        let icon_size = self.config.icon_bitmap_size.min(MAX_OBJ_SIZE);
        self.icon_id = Some(store.add(ObjectType::Icon, "Icon", icon_size)?);

        let track_size = self.config.track_max_size.min(MAX_OBJ_SIZE);
        for group in 0..self.catalog.groups().len() {
            for index in self.catalog.track_indices(group) {
                let Some(track) = self.catalog.track_mut(index) else {
                    continue;
                };
                track.id = Some(store.add(ObjectType::Track, track.title, track_size)?);
            }
            let Some(g) = self.catalog.group_mut(group) else {
                continue;
            };
            g.id = Some(store.add(ObjectType::Group, g.title, group_size(g.track_count()))?);
        }

        let parent_size = group_size(self.catalog.groups().len());
        let parent = self.catalog.parent_mut();
        parent.id = Some(store.add(ObjectType::Group, parent.title, parent_size)?);

        if let Some(index) = self.catalog.current_track_index() {
            let size = segments_size(self.catalog.segments_of(index));
            if let Some(track) = self.catalog.track_mut(index) {
                track.segments_id = Some(store.add(ObjectType::TrackSegments, track.title, size)?);
            }
        }

        self.initialized = true;
        info!("media player initialized, ccid {}", ccid);
        Ok(())
    }

    // ── Notifications ────────────────────────────────────────────────────

    /// Oldest pending notification.
    pub fn next_notification(&mut self) -> Option<Notification> {
        self.notifications.pop_front()
    }

    /// Number of pending notifications.
    pub fn pending_notifications(&self) -> usize {
        self.notifications.len()
    }

    fn notify(&mut self, notification: Notification) {
        if self.notifications.is_full() {
            warn!("notification queue full, dropping oldest");
            let _ = self.notifications.pop_front();
        }
        let _ = self.notifications.push_back(notification);
    }

    fn set_state(&mut self, state: MediaState) {
        self.state = state;
        self.notify(Notification::MediaState(state));
    }

    fn set_position(&mut self, pos: i32) {
        self.track_pos = pos;
        self.notify(Notification::TrackPosition(pos));
    }

    fn notify_track_change(&mut self) {
        let (title, duration, id) = self
            .catalog
            .current_track()
            .map(|t| (t.title, t.duration, t.id))
            .unwrap_or(("", 0, None));
        let next_id = self
            .catalog
            .next_track_index()
            .and_then(|i| self.catalog.track(i))
            .and_then(|t| t.id);
        self.notify(Notification::TrackChanged);
        self.notify(Notification::TrackTitle(title));
        self.notify(Notification::TrackDuration(duration));
        self.notify(Notification::TrackPosition(self.track_pos));
        self.notify(Notification::CurrentTrackId(id));
        self.notify(Notification::NextTrackId(next_id));
    }

    fn notify_group_change(&mut self) {
        self.notify(Notification::CurrentGroupId(self.current_group_id()));
    }

    // ── Commands ─────────────────────────────────────────────────────────

    /// Execute a control point command in the current state.
    pub fn send_command(&mut self, command: Command) {
        debug!("command {} in state {}", command.opcode, self.state.name());
        let result = match command.opcode() {
            None => {
                debug!("unsupported opcode {}", command.opcode);
                ResultCode::NotSupported
            }
            Some(op) => match self.state {
                MediaState::Inactive => self.inactive_command(op, command.param),
                MediaState::Playing | MediaState::Paused => self.active_command(op, command.param),
                MediaState::Seeking => self.seeking_command(op, command.param),
            },
        };
        self.notify(Notification::CommandResult(CommandNotification {
            requested_opcode: command.opcode,
            result,
        }));
    }

    fn inactive_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        let result = match family(op) {
            Family::Transport | Family::Segment => return ResultCode::PlayerInactive,
            Family::Track => self.track_command(op, param),
            Family::Group => self.group_command(op, param),
        };
        if result == ResultCode::Success {
            self.set_state(MediaState::Paused);
        }
        result
    }

    /// Playing and paused share everything but play/pause.
    fn active_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        match op {
            Opcode::Play => {
                if self.state == MediaState::Paused {
                    self.set_state(MediaState::Playing);
                }
                ResultCode::Success
            }
            Opcode::Pause => {
                if self.state == MediaState::Playing {
                    self.set_state(MediaState::Paused);
                }
                ResultCode::Success
            }
            Opcode::FastRewind | Opcode::FastForward => {
                self.seeking_speed = if op == Opcode::FastRewind {
                    SEEKING_SPEED_FACTOR_STEP.wrapping_neg()
                } else {
                    SEEKING_SPEED_FACTOR_STEP
                };
                self.set_state(MediaState::Seeking);
                self.notify(Notification::SeekingSpeed(self.seeking_speed));
                ResultCode::Success
            }
            Opcode::Stop => {
                self.track_pos = 0;
                self.set_state(MediaState::Paused);
                self.notify(Notification::TrackPosition(0));
                ResultCode::Success
            }
            Opcode::MoveRelative => self.move_relative(param),
            _ => match family(op) {
                Family::Segment => self.segment_command(op, param),
                Family::Track => self.track_command(op, param),
                Family::Group => self.group_command(op, param),
                Family::Transport => ResultCode::NotSupported,
            },
        }
    }

    fn seeking_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        match op {
            Opcode::Play | Opcode::Pause => {
                self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                let state = if op == Opcode::Play {
                    MediaState::Playing
                } else {
                    MediaState::Paused
                };
                self.set_state(state);
                self.notify(Notification::SeekingSpeed(self.seeking_speed));
                ResultCode::Success
            }
            Opcode::FastRewind => {
                if self.seeking_speed >= SEEKING_STEP_LIMIT.wrapping_neg() {
                    self.seeking_speed = self.seeking_speed.saturating_sub(SEEKING_SPEED_FACTOR_STEP);
                    self.notify(Notification::SeekingSpeed(self.seeking_speed));
                }
                ResultCode::Success
            }
            Opcode::FastForward => {
                if self.seeking_speed <= SEEKING_STEP_LIMIT {
                    self.seeking_speed = self.seeking_speed.saturating_add(SEEKING_SPEED_FACTOR_STEP);
                    self.notify(Notification::SeekingSpeed(self.seeking_speed));
                }
                ResultCode::Success
            }
            Opcode::Stop => {
                self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                self.track_pos = 0;
                self.set_state(MediaState::Paused);
                self.notify(Notification::SeekingSpeed(self.seeking_speed));
                self.notify(Notification::TrackPosition(0));
                ResultCode::Success
            }
            Opcode::MoveRelative => self.move_relative(param),
            _ => match family(op) {
                Family::Segment => self.segment_command(op, param),
                Family::Track => {
                    let result = self.track_command(op, param);
                    if result == ResultCode::Success {
                        self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
                        self.set_state(MediaState::Paused);
                    }
                    result
                }
                Family::Group => {
                    let result = self.group_command(op, param);
                    if result == ResultCode::Success {
                        self.set_state(MediaState::Paused);
                    }
                    result
                }
                Family::Transport => ResultCode::NotSupported,
            },
        }
    }

    /// Move within the track, clamped to `[0, duration]`. The position is
    /// notified even when the parameter is missing.
    fn move_relative(&mut self, param: Option<i32>) -> ResultCode {
        let result = match param {
            Some(offset) => {
                let duration = self.track_duration();
                self.track_pos = self.track_pos.saturating_add(offset).max(0).min(duration);
                ResultCode::Success
            }
            None => ResultCode::CannotBeCompleted,
        };
        self.notify(Notification::TrackPosition(self.track_pos));
        result
    }

    fn segment_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        let nav = match op {
            Opcode::PrevSegment => {
                // Less than PREV_MARGIN into the segment: go to the one before.
                let Some(segment) = self.catalog.current_segment() else {
                    return ResultCode::Success;
                };
                if self.track_pos.saturating_sub(PREV_MARGIN) < segment.pos {
                    Some(Nav::Prev)
                } else {
                    None
                }
            }
            Opcode::NextSegment => Some(Nav::Next),
            Opcode::FirstSegment => Some(Nav::First),
            Opcode::LastSegment => Some(Nav::Last),
            Opcode::GotoSegment => match param {
                None => return ResultCode::CannotBeCompleted,
                Some(0) => return ResultCode::Success,
                Some(n) => Some(Nav::Goto(n)),
            },
            _ => return ResultCode::NotSupported,
        };
        if let Some(nav) = nav {
            self.catalog.navigate_segment(nav);
        }
        if let Some(pos) = self.catalog.current_segment().map(|s| s.pos) {
            self.set_position(pos);
        }
        ResultCode::Success
    }

    fn track_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        let nav = match op {
            Opcode::NextTrack => {
                self.next_track();
                return ResultCode::Success;
            }
            Opcode::PrevTrack => Nav::Prev,
            Opcode::FirstTrack => Nav::First,
            Opcode::LastTrack => Nav::Last,
            Opcode::GotoTrack => match param {
                Some(n) => Nav::Goto(n),
                None => return ResultCode::CannotBeCompleted,
            },
            _ => return ResultCode::NotSupported,
        };
        // Staying on the same track still rewinds it.
        self.track_pos = 0;
        if self.catalog.navigate_track(nav) {
            self.notify_track_change();
        } else {
            self.notify(Notification::TrackPosition(0));
        }
        ResultCode::Success
    }

    /// Go to the explicitly set next track if any, else the next in order.
    /// At the end of the group the position is kept.
    fn next_track(&mut self) {
        if let Some(next) = self.next_track.take() {
            match self.catalog.set_current_track(next) {
                Ok(true) => self.notify_group_change(),
                Ok(false) => {}
                Err(_) => {
                    warn!("stale next track {}", next);
                    return;
                }
            }
            self.track_pos = 0;
            self.notify_track_change();
        } else if self.catalog.navigate_track(Nav::Next) {
            self.track_pos = 0;
            self.notify_track_change();
        }
    }

    fn group_command(&mut self, op: Opcode, param: Option<i32>) -> ResultCode {
        let nav = match op {
            Opcode::PrevGroup => Nav::Prev,
            Opcode::NextGroup => Nav::Next,
            Opcode::FirstGroup => Nav::First,
            Opcode::LastGroup => Nav::Last,
            Opcode::GotoGroup => match param {
                Some(n) => Nav::Goto(n),
                None => return ResultCode::CannotBeCompleted,
            },
            _ => return ResultCode::NotSupported,
        };
        self.full_group_change(nav);
        ResultCode::Success
    }

    /// Change group and land on the first track at position 0.
    fn full_group_change(&mut self, nav: Nav) {
        if self.catalog.navigate_group(nav) {
            self.notify_group_change();
            // A group change is a track change even if the group's
            // remembered track already was the first one.
            self.catalog.navigate_track(Nav::First);
            self.track_pos = 0;
            self.notify_track_change();
        } else if self.catalog.navigate_track(Nav::First) {
            self.track_pos = 0;
            self.notify_track_change();
        } else if self.track_pos != 0 {
            self.set_position(0);
        }
    }

    // ── Position ─────────────────────────────────────────────────────────

    /// Advance playback by `elapsed_ms` of wall time.
    ///
    /// Only moves while playing (at unity speed) or seeking (scaled by the
    /// seeking speed factor). Running off the end continues with the next
    /// track in order, or pauses at the end of the last one.
    pub fn tick(&mut self, elapsed_ms: u32) {
        let factor = match self.state {
            MediaState::Playing => 1,
            MediaState::Seeking => i32::from(self.seeking_speed),
            MediaState::Paused | MediaState::Inactive => return,
        };
        let step = i32::try_from(elapsed_ms / 10)
            .unwrap_or(i32::MAX)
            .saturating_mul(factor);
        let pos = self.track_pos.saturating_add(step);
        let duration = self.track_duration();

        if pos < 0 {
            self.track_pos = 0;
            self.stop_seeking();
            self.notify(Notification::TrackPosition(0));
        } else if pos > duration {
            if self.catalog.navigate_track(Nav::Next) {
                self.track_pos = 0;
                self.notify_track_change();
            } else {
                debug!("end of group reached");
                self.track_pos = duration;
                self.stop_seeking();
                self.set_state(MediaState::Paused);
                self.notify(Notification::TrackPosition(duration));
            }
        } else {
            self.set_position(pos);
        }
    }

    /// Keep the position inside a track that replaced the current one
    /// without a rewind.
    fn clamp_position(&mut self) {
        self.track_pos = self.track_pos.max(0).min(self.track_duration());
    }

    fn stop_seeking(&mut self) {
        if self.seeking_speed != SEEKING_SPEED_FACTOR_ZERO {
            self.seeking_speed = SEEKING_SPEED_FACTOR_ZERO;
            self.notify(Notification::SeekingSpeed(self.seeking_speed));
        }
    }

    // ── Getters ──────────────────────────────────────────────────────────

    pub fn config(&self) -> &PlayerConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn player_name(&self) -> &'static str {
        self.config.name
    }

    pub fn icon_id(&self) -> Option<ObjectId> {
        self.icon_id
    }

    pub fn icon_url(&self) -> &'static str {
        self.config.icon_url
    }

    pub fn track_title(&self) -> &'static str {
        self.catalog.current_track().map(|t| t.title).unwrap_or("")
    }

    pub fn track_duration(&self) -> i32 {
        self.catalog.current_track().map(|t| t.duration).unwrap_or(0)
    }

    pub fn track_position(&self) -> i32 {
        self.track_pos
    }

    pub fn playback_speed(&self) -> i8 {
        self.playback_speed
    }

    pub fn seeking_speed(&self) -> i8 {
        self.seeking_speed
    }

    pub fn track_segments_id(&self) -> Option<ObjectId> {
        self.catalog.current_track().and_then(|t| t.segments_id)
    }

    pub fn current_track_id(&self) -> Option<ObjectId> {
        self.catalog.current_track().and_then(|t| t.id)
    }

    /// The explicitly set next track, else the next one in order.
    pub fn next_track_id(&self) -> Option<ObjectId> {
        let index = self.next_track.or_else(|| self.catalog.next_track_index())?;
        self.catalog.track(index).and_then(|t| t.id)
    }

    pub fn parent_group_id(&self) -> Option<ObjectId> {
        self.catalog.parent_id()
    }

    pub fn current_group_id(&self) -> Option<ObjectId> {
        self.catalog.current_group().and_then(|g| g.id)
    }

    pub fn playing_order(&self) -> PlayingOrder {
        self.playing_order
    }

    pub fn playing_orders_supported(&self) -> PlayingOrders {
        self.playing_orders_supported
    }

    pub fn media_state(&self) -> MediaState {
        self.state
    }

    pub fn opcodes_supported(&self) -> u32 {
        self.opcodes_supported
    }

    pub fn search_results_id(&self) -> Option<ObjectId> {
        self.search_results_id
    }

    pub fn content_ctrl_id(&self) -> u8 {
        self.ccid
    }

    // ── Setters ──────────────────────────────────────────────────────────

    /// Set the position. Negative values count back from the end of the
    /// track. Notified only if it changes.
    pub fn set_track_position(&mut self, position: i32) {
        let duration = self.track_duration();
        let new_pos = if position >= 0 {
            position.min(duration)
        } else {
            duration.saturating_add(position).max(0)
        };
        debug!("position {} -> {} (duration {})", position, new_pos, duration);
        if new_pos != self.track_pos {
            self.set_position(new_pos);
        }
    }

    pub fn set_playback_speed(&mut self, speed: i8) {
        if speed != self.playback_speed {
            self.playback_speed = speed;
            self.notify(Notification::PlaybackSpeed(speed));
        }
    }

    /// Make the track with object ID `id` current. Unknown IDs are ignored.
    pub fn set_current_track_id(&mut self, id: ObjectId) {
        let Some(index) = self.catalog.find_track(id) else {
            debug!("track {} not found", id.get());
            return;
        };
        let same_track = self.catalog.current_track_index() == Some(index);
        match self.catalog.set_current_track(index) {
            Ok(true) => {
                self.notify_group_change();
                self.clamp_position();
                self.notify_track_change();
            }
            Ok(false) if !same_track => {
                self.clamp_position();
                self.notify_track_change();
            }
            Ok(false) => {}
            Err(_) => debug!("track {} out of range", id.get()),
        }
    }

    /// Make the track with object ID `id` the one [`Opcode::NextTrack`]
    /// goes to. Unknown IDs are ignored.
    pub fn set_next_track_id(&mut self, id: ObjectId) {
        let Some(index) = self.catalog.find_track(id) else {
            debug!("next track {} not found", id.get());
            return;
        };
        self.next_track = Some(index);
        self.notify(Notification::NextTrackId(Some(id)));
    }

    /// Switch to the group with object ID `id`, landing on its first track.
    /// Unknown IDs are ignored.
    pub fn set_current_group_id(&mut self, id: ObjectId) {
        let Some(group) = self.catalog.find_group(id) else {
            debug!("group {} not found", id.get());
            return;
        };
        if let Ok(true) = self.catalog.set_current_group(group) {
            self.notify_group_change();
            if self.catalog.navigate_track(Nav::First) {
                self.clamp_position();
                self.notify_track_change();
            }
        }
    }

    /// Applied and notified only if it changes and is supported.
    pub fn set_playing_order(&mut self, order: PlayingOrder) {
        if order != self.playing_order && self.playing_orders_supported.contains(order) {
            self.playing_order = order;
            self.notify(Notification::PlayingOrder(order));
        }
    }

    /// Validate a search and publish the results object.
    ///
    /// There is no real search: a well-formed search yields the current
    /// group.
    pub fn send_search(&mut self, search: &[u8]) -> SearchResult {
        let result = match parse_search(search) {
            Ok(items) => {
                debug!("search with {} items", items.len());
                self.search_results_id = self.current_group_id();
                SearchResult::Success
            }
            Err(_) => {
                warn!("search rejected, {} bytes", search.len());
                self.search_results_id = None;
                SearchResult::Failure
            }
        };
        self.notify(Notification::SearchResult(result));
        self.notify(Notification::SearchResultsId(self.search_results_id));
        result
    }

    // ── Objects ──────────────────────────────────────────────────────────

    /// Build the content of object `id` into the transfer buffer.
    pub fn select_object(&mut self, id: ObjectId) -> Result<(), ObjectError> {
        if self.objects.is_busy() {
            return Err(ObjectError::Busy);
        }
        let wanted = Some(id);
        let current = self.catalog.current_track_index();
        let current_track = current.and_then(|i| self.catalog.track(i));
        let explicit_next = self.next_track.and_then(|i| self.catalog.track(i));
        let normal_next = self.catalog.next_track_index().and_then(|i| self.catalog.track(i));
        let icon_size = self.config.icon_bitmap_size;
        let track_size = self.config.track_max_size;

        if self.icon_id == wanted {
            debug!("icon object selected");
            self.objects.select_dummy(id, icon_size)
        } else if current_track.is_some_and(|t| t.segments_id == wanted) {
            debug!("segments object selected");
            let segments = current.map(|i| self.catalog.segments_of(i)).unwrap_or(&[]);
            self.objects.select_segments(id, segments)
        } else if current_track.is_some_and(|t| t.id == wanted) {
            debug!("current track object selected");
            self.objects.select_dummy(id, track_size)
        } else if explicit_next.is_some_and(|t| t.id == wanted) {
            debug!("next track object selected");
            self.objects.select_dummy(id, track_size)
        } else if normal_next.is_some_and(|t| t.id == wanted) {
            debug!("next track object selected");
            self.objects.select_dummy(id, track_size)
        } else if self.catalog.parent_id() == wanted {
            debug!("parent group object selected");
            let members = self.catalog.groups().iter().map(|g| g.id);
            self.objects.select_group(id, GroupRecordType::Group, members)
        } else if self.current_group_id() == wanted {
            debug!("current group object selected");
            let group = self.catalog.current_group_index();
            let members = self.catalog.tracks_of(group).map(|(_, t)| t.id);
            self.objects.select_group(id, GroupRecordType::Track, members)
        } else {
            debug!("object {} unknown", id.get());
            Err(ObjectError::UnknownObject)
        }
    }

    /// Read part of the selected object.
    pub fn read_object(&self, id: ObjectId, offset: usize, len: usize) -> Result<&[u8], ObjectError> {
        self.objects.read(id, offset, len)
    }

    /// The transfer buffer, e.g. to hold it during a transfer.
    pub fn objects_mut(&mut self) -> &mut ObjectContent {
        &mut self.objects
    }

    // ── Test hooks ───────────────────────────────────────────────────────

    /// Force the media state, e.g. to reach Inactive.
    pub fn set_media_state(&mut self, state: MediaState) {
        self.set_state(state);
    }

    /// Make the current group its own parent.
    pub fn unset_parent_group(&mut self) {
        debug!("current group becomes its own parent");
        let index = self.catalog.current_group_index();
        if let Some(group) = self.catalog.group_mut(index) {
            group.parent = ParentRef::Group(index);
        }
    }

    /// Log the whole player state and catalog at debug level.
    pub fn debug_dump(&self) {
        debug!("player {}, icon {}, url {}", self.config.name, id_or_none(self.icon_id), self.config.icon_url);
        debug!(
            "state {}, position {}, playback speed {}, seeking speed {}",
            self.state.name(),
            self.track_pos,
            self.playback_speed,
            self.seeking_speed
        );
        debug!(
            "playing order {}, supported {}, opcodes {}, ccid {}",
            self.playing_order.raw(),
            self.playing_orders_supported.bits(),
            self.opcodes_supported,
            self.ccid
        );
        debug!(
            "parent {}, group {}, track {}, next {}, search results {}",
            id_or_none(self.parent_group_id()),
            id_or_none(self.current_group_id()),
            id_or_none(self.current_track_id()),
            id_or_none(self.next_track_id()),
            id_or_none(self.search_results_id)
        );
        for (index, group) in self.catalog.groups().iter().enumerate() {
            debug!("group {} {}", id_or_none(group.id), group.title);
            for (_, track) in self.catalog.tracks_of(index) {
                debug!("  track {} {} {}", id_or_none(track.id), track.title, track.duration);
            }
        }
    }
}

impl Default for MediaPlayer {
    fn default() -> Self {
        Self::new(PlayerConfig::default(), Catalog::demo())
    }
}
