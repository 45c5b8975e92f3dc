//! The demo media player as a proxy [`LocalPlayer`].

use bluetooth::mcs::{Command, MediaState, PlayingOrder, PlayingOrders};
use bluetooth::ots::ObjectId;
use playback::{LocalObjectStore, MediaPlayer, Notification, ObjectStore};

use crate::proxy::{LocalPlayer, ProxyError};

/// A [`MediaPlayer`] together with the object store it registers into.
#[derive(Debug)]
pub struct LocalMediaPlayer<S = LocalObjectStore> {
    player: MediaPlayer,
    objects: S,
}

impl<S: ObjectStore> LocalMediaPlayer<S> {
    pub fn new(player: MediaPlayer, objects: S) -> Self {
        Self { player, objects }
    }

    pub fn player(&self) -> &MediaPlayer {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut MediaPlayer {
        &mut self.player
    }

    pub fn objects(&self) -> &S {
        &self.objects
    }
}

impl Default for LocalMediaPlayer {
    fn default() -> Self {
        Self::new(MediaPlayer::default(), LocalObjectStore::new())
    }
}

impl<S: ObjectStore> LocalPlayer for LocalMediaPlayer<S> {
    fn init(&mut self, ccid: u8) -> Result<(), ProxyError> {
        self.player.init(ccid, &mut self.objects)?;
        Ok(())
    }

    fn player_name(&self) -> Result<&str, ProxyError> {
        Ok(self.player.player_name())
    }

    fn icon_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.icon_id())
    }

    fn icon_url(&self) -> Result<&str, ProxyError> {
        Ok(self.player.icon_url())
    }

    fn track_title(&self) -> Result<&str, ProxyError> {
        Ok(self.player.track_title())
    }

    fn track_duration(&self) -> Result<i32, ProxyError> {
        Ok(self.player.track_duration())
    }

    fn track_position(&self) -> Result<i32, ProxyError> {
        Ok(self.player.track_position())
    }

    fn set_track_position(&mut self, position: i32) -> Result<(), ProxyError> {
        self.player.set_track_position(position);
        Ok(())
    }

    fn playback_speed(&self) -> Result<i8, ProxyError> {
        Ok(self.player.playback_speed())
    }

    fn set_playback_speed(&mut self, speed: i8) -> Result<(), ProxyError> {
        self.player.set_playback_speed(speed);
        Ok(())
    }

    fn seeking_speed(&self) -> Result<i8, ProxyError> {
        Ok(self.player.seeking_speed())
    }

    fn track_segments_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.track_segments_id())
    }

    fn current_track_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.current_track_id())
    }

    fn set_current_track_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        self.player.set_current_track_id(id);
        Ok(())
    }

    fn next_track_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.next_track_id())
    }

    fn set_next_track_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        self.player.set_next_track_id(id);
        Ok(())
    }

    fn parent_group_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.parent_group_id())
    }

    fn current_group_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.current_group_id())
    }

    fn set_current_group_id(&mut self, id: ObjectId) -> Result<(), ProxyError> {
        self.player.set_current_group_id(id);
        Ok(())
    }

    fn playing_order(&self) -> Result<PlayingOrder, ProxyError> {
        Ok(self.player.playing_order())
    }

    fn set_playing_order(&mut self, order: PlayingOrder) -> Result<(), ProxyError> {
        self.player.set_playing_order(order);
        Ok(())
    }

    fn playing_orders_supported(&self) -> Result<PlayingOrders, ProxyError> {
        Ok(self.player.playing_orders_supported())
    }

    fn media_state(&self) -> Result<MediaState, ProxyError> {
        Ok(self.player.media_state())
    }

    fn opcodes_supported(&self) -> Result<u32, ProxyError> {
        Ok(self.player.opcodes_supported())
    }

    fn send_command(&mut self, command: Command) -> Result<(), ProxyError> {
        self.player.send_command(command);
        Ok(())
    }

    // The outcome goes out as a notification, like any other search result.
    fn send_search(&mut self, search: &[u8]) -> Result<(), ProxyError> {
        self.player.send_search(search);
        Ok(())
    }

    fn search_results_id(&self) -> Result<Option<ObjectId>, ProxyError> {
        Ok(self.player.search_results_id())
    }

    fn content_ctrl_id(&self) -> Result<u8, ProxyError> {
        Ok(self.player.content_ctrl_id())
    }

    fn tick(&mut self, elapsed_ms: u32) -> Result<(), ProxyError> {
        self.player.tick(elapsed_ms);
        Ok(())
    }

    fn next_notification(&mut self) -> Option<Notification> {
        self.player.next_notification()
    }
}
