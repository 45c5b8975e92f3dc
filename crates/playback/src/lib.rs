//! Local media player: catalog, media control state machine, object content
#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![deny(clippy::unwrap_used)]
#![allow(missing_docs)]

// Must come first so the logging macros are visible to the other modules.
mod fmt;

pub mod catalog;
pub mod config;
pub mod objects;
pub mod player;

pub use catalog::{Catalog, CatalogError, Nav};
pub use config::PlayerConfig;
pub use objects::{LocalObjectStore, ObjectContent, ObjectError, ObjectStore, ObjectStoreError};
pub use player::{MediaPlayer, Notification, PlayerError};

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use bluetooth::mcs::{Command, CommandNotification, MediaState, Opcode, ResultCode};

    use crate::{LocalObjectStore, MediaPlayer, Notification};

    fn player() -> MediaPlayer {
        let mut player = MediaPlayer::default();
        let mut store: LocalObjectStore = LocalObjectStore::new();
        player.init(42, &mut store).expect("init should succeed");
        player
    }

    fn drain(player: &mut MediaPlayer) -> Vec<Notification> {
        core::iter::from_fn(|| player.next_notification()).collect()
    }

    fn result(op: Opcode, code: ResultCode) -> Notification {
        Notification::CommandResult(CommandNotification {
            requested_opcode: op.raw(),
            result: code,
        })
    }

    /// Transport commands
    mod transport_tests {
        use super::*;

        #[test]
        fn test_initial_state() {
            let p = player();
            assert_eq!(p.media_state(), MediaState::Paused);
            assert_eq!(p.track_position(), 0);
            assert_eq!(p.track_title(), "Interlude #1 (Song for Alison)");
            assert_eq!(p.content_ctrl_id(), 42);
        }

        #[test]
        fn test_play_from_paused() {
            let mut p = player();
            p.send_command(Command::new(Opcode::Play));
            assert_eq!(p.media_state(), MediaState::Playing);
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::MediaState(MediaState::Playing),
                    result(Opcode::Play, ResultCode::Success),
                ]
            );
        }

        #[test]
        fn test_pause_when_paused_is_noop() {
            let mut p = player();
            p.send_command(Command::new(Opcode::Pause));
            assert_eq!(drain(&mut p), vec![result(Opcode::Pause, ResultCode::Success)]);
        }

        #[test]
        fn test_fast_forward_enters_seeking() {
            let mut p = player();
            p.send_command(Command::new(Opcode::FastForward));
            assert_eq!(p.media_state(), MediaState::Seeking);
            assert_eq!(p.seeking_speed(), 2);
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::MediaState(MediaState::Seeking),
                    Notification::SeekingSpeed(2),
                    result(Opcode::FastForward, ResultCode::Success),
                ]
            );
        }

        #[test]
        fn test_seeking_speed_saturates() {
            let mut p = player();
            for _ in 0..40 {
                p.send_command(Command::new(Opcode::FastRewind));
            }
            assert_eq!(p.seeking_speed(), -64);
            drain(&mut p);
            p.send_command(Command::new(Opcode::FastRewind));
            assert_eq!(drain(&mut p), vec![result(Opcode::FastRewind, ResultCode::Success)]);
        }

        #[test]
        fn test_stop_while_seeking() {
            let mut p = player();
            p.send_command(Command::new(Opcode::FastForward));
            p.send_command(Command::with_param(Opcode::MoveRelative, 1000));
            drain(&mut p);
            p.send_command(Command::new(Opcode::Stop));
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::MediaState(MediaState::Paused),
                    Notification::SeekingSpeed(0),
                    Notification::TrackPosition(0),
                    result(Opcode::Stop, ResultCode::Success),
                ]
            );
        }

        #[test]
        fn test_move_relative_clamps() {
            let mut p = player();
            p.send_command(Command::with_param(Opcode::MoveRelative, 100_000));
            assert_eq!(p.track_position(), 6300);
            p.send_command(Command::with_param(Opcode::MoveRelative, -100_000));
            assert_eq!(p.track_position(), 0);
        }

        #[test]
        fn test_move_relative_without_param() {
            let mut p = player();
            p.send_command(Command {
                opcode: Opcode::MoveRelative.raw(),
                param: None,
            });
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::TrackPosition(0),
                    result(Opcode::MoveRelative, ResultCode::CannotBeCompleted),
                ]
            );
        }

        #[test]
        fn test_unknown_opcode_not_supported() {
            let mut p = player();
            p.send_command(Command {
                opcode: 0x99,
                param: None,
            });
            assert_eq!(
                drain(&mut p),
                vec![Notification::CommandResult(CommandNotification {
                    requested_opcode: 0x99,
                    result: ResultCode::NotSupported,
                })]
            );
        }
    }

    /// Inactive state
    mod inactive_tests {
        use super::*;

        #[test]
        fn test_transport_rejected_when_inactive() {
            let mut p = player();
            p.set_media_state(MediaState::Inactive);
            drain(&mut p);
            p.send_command(Command::new(Opcode::Play));
            assert_eq!(drain(&mut p), vec![result(Opcode::Play, ResultCode::PlayerInactive)]);
            assert_eq!(p.media_state(), MediaState::Inactive);
        }

        #[test]
        fn test_track_command_wakes_to_paused() {
            let mut p = player();
            p.set_media_state(MediaState::Inactive);
            drain(&mut p);
            p.send_command(Command::new(Opcode::NextTrack));
            assert_eq!(p.media_state(), MediaState::Paused);
            assert_eq!(p.track_title(), "Interlude #2 (For Bobbye)");
            let events = drain(&mut p);
            assert_eq!(events.first(), Some(&Notification::TrackChanged));
            assert_eq!(
                events.iter().rev().nth(1),
                Some(&Notification::MediaState(MediaState::Paused))
            );
        }

        #[test]
        fn test_goto_without_param_cannot_be_completed() {
            let mut p = player();
            p.set_media_state(MediaState::Inactive);
            drain(&mut p);
            p.send_command(Command {
                opcode: Opcode::GotoGroup.raw(),
                param: None,
            });
            assert_eq!(p.media_state(), MediaState::Inactive);
            assert_eq!(
                drain(&mut p),
                vec![result(Opcode::GotoGroup, ResultCode::CannotBeCompleted)]
            );
        }
    }

    /// Track, group and segment navigation
    mod navigation_tests {
        use super::*;

        #[test]
        fn test_next_track_notifications() {
            let mut p = player();
            p.send_command(Command::new(Opcode::NextTrack));
            let ids = (p.current_track_id(), p.next_track_id());
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::TrackChanged,
                    Notification::TrackTitle("Interlude #2 (For Bobbye)"),
                    Notification::TrackDuration(7500),
                    Notification::TrackPosition(0),
                    Notification::CurrentTrackId(ids.0),
                    Notification::NextTrackId(ids.1),
                    result(Opcode::NextTrack, ResultCode::Success),
                ]
            );
        }

        #[test]
        fn test_prev_track_at_start_rewinds() {
            let mut p = player();
            p.send_command(Command::with_param(Opcode::MoveRelative, 300));
            drain(&mut p);
            p.send_command(Command::new(Opcode::PrevTrack));
            assert_eq!(p.track_position(), 0);
            assert_eq!(
                drain(&mut p),
                vec![
                    Notification::TrackPosition(0),
                    result(Opcode::PrevTrack, ResultCode::Success),
                ]
            );
        }

        #[test]
        fn test_next_group_goes_to_first_track() {
            let mut p = player();
            p.send_command(Command::new(Opcode::NextGroup));
            // Group 2 remembers track 2.2, but a group change lands on 2.1
            assert_eq!(p.track_title(), "Track 2.1");
            let events = drain(&mut p);
            assert_eq!(events.first(), Some(&Notification::CurrentGroupId(p.current_group_id())));
        }

        #[test]
        fn test_goto_group_negative() {
            let mut p = player();
            p.send_command(Command::with_param(Opcode::GotoGroup, -1));
            assert_eq!(p.track_title(), "Track 4.1");
        }

        #[test]
        fn test_segments() {
            let mut p = player();
            p.send_command(Command::new(Opcode::LastSegment));
            assert_eq!(p.track_position(), 5000);
            p.send_command(Command::new(Opcode::PrevSegment));
            assert_eq!(p.track_position(), 2000);
            // Far enough into "Middle": rewind to its start only
            p.send_command(Command::with_param(Opcode::MoveRelative, 1000));
            p.send_command(Command::new(Opcode::PrevSegment));
            assert_eq!(p.track_position(), 2000);
            p.send_command(Command::with_param(Opcode::GotoSegment, 1));
            assert_eq!(p.track_position(), 0);
        }

        #[test]
        fn test_goto_segment_zero_keeps_position() {
            let mut p = player();
            p.send_command(Command::with_param(Opcode::MoveRelative, 700));
            drain(&mut p);
            p.send_command(Command::with_param(Opcode::GotoSegment, 0));
            assert_eq!(p.track_position(), 700);
            assert_eq!(drain(&mut p), vec![result(Opcode::GotoSegment, ResultCode::Success)]);
        }

        #[test]
        fn test_segments_on_track_without_segments() {
            let mut p = player();
            p.send_command(Command::new(Opcode::NextTrack));
            p.send_command(Command::with_param(Opcode::MoveRelative, 100));
            drain(&mut p);
            p.send_command(Command::new(Opcode::NextSegment));
            assert_eq!(p.track_position(), 100);
            assert_eq!(drain(&mut p), vec![result(Opcode::NextSegment, ResultCode::Success)]);
        }

        #[test]
        fn test_track_command_while_seeking_pauses() {
            let mut p = player();
            p.send_command(Command::new(Opcode::FastForward));
            p.send_command(Command::new(Opcode::LastTrack));
            assert_eq!(p.media_state(), MediaState::Paused);
            assert_eq!(p.seeking_speed(), 0);
            assert_eq!(p.track_title(), "Interlude #5 (Shasti)");
        }
    }
}
