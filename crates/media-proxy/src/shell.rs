//! Line-oriented command shell over a [`MediaProxy`].
//!
//! Every command is an entry in [`COMMANDS`]. A line is split on
//! whitespace, the first word picks the entry and the rest are its
//! arguments. Values read from a player are not printed here: they go to the
//! proxy's controller like any other value.

use core::fmt::{self, Write};

use bluetooth::mcs::{Command, Opcode};
use bluetooth::ots::ObjectId;
use bluetooth::search::{SearchBuilder, SearchType};

use crate::proxy::{Controller, LocalPlayer, MediaProxy, PlayerHandle, Property, ProxyError, RemoteClient};

/// What a command does once its arguments are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Init,
    SetPlayer,
    ShowPlayers,
    Read(Property),
    SetTrackPosition,
    SetPlaybackSpeed,
    SetCurrentTrackId,
    SetNextTrackId,
    SetCurrentGroupId,
    SetPlayingOrder,
    Command(Opcode),
    SendSearch,
    Help,
}

/// One command table entry.
#[derive(Debug, Clone, Copy)]
pub struct ShellCommand {
    pub name: &'static str,
    pub help: &'static str,
    /// Argument names, in order. The count is checked before dispatch.
    pub args: &'static [&'static str],
    pub action: Action,
}

const fn cmd(name: &'static str, args: &'static [&'static str], help: &'static str, action: Action) -> ShellCommand {
    ShellCommand {
        name,
        help,
        args,
        action,
    }
}

const NONE: &[&str] = &[];
const ID: &[&str] = &["id"];

pub static COMMANDS: &[ShellCommand] = &[
    cmd("init", NONE, "Initialise the local player", Action::Init),
    cmd("set_player", &["local|remote"], "Select the player to control", Action::SetPlayer),
    cmd("show_players", NONE, "List known players", Action::ShowPlayers),
    cmd("read_player_name", NONE, "Read player name", Action::Read(Property::PlayerName)),
    cmd("read_icon_id", NONE, "Read icon object ID", Action::Read(Property::IconId)),
    cmd("read_icon_url", NONE, "Read icon URL", Action::Read(Property::IconUrl)),
    cmd("read_track_title", NONE, "Read track title", Action::Read(Property::TrackTitle)),
    cmd("read_track_duration", NONE, "Read track duration", Action::Read(Property::TrackDuration)),
    cmd("read_track_position", NONE, "Read track position", Action::Read(Property::TrackPosition)),
    cmd("read_playback_speed", NONE, "Read playback speed", Action::Read(Property::PlaybackSpeed)),
    cmd("read_seeking_speed", NONE, "Read seeking speed", Action::Read(Property::SeekingSpeed)),
    cmd("read_track_segments_id", NONE, "Read track segments object ID", Action::Read(Property::TrackSegmentsId)),
    cmd("read_current_track_id", NONE, "Read current track object ID", Action::Read(Property::CurrentTrackId)),
    cmd("read_next_track_id", NONE, "Read next track object ID", Action::Read(Property::NextTrackId)),
    cmd("read_parent_group_id", NONE, "Read parent group object ID", Action::Read(Property::ParentGroupId)),
    cmd("read_current_group_id", NONE, "Read current group object ID", Action::Read(Property::CurrentGroupId)),
    cmd("read_playing_order", NONE, "Read playing order", Action::Read(Property::PlayingOrder)),
    cmd("read_playing_orders_supported", NONE, "Read supported playing orders", Action::Read(Property::PlayingOrdersSupported)),
    cmd("read_media_state", NONE, "Read media state", Action::Read(Property::MediaState)),
    cmd("read_opcodes_supported", NONE, "Read supported opcodes", Action::Read(Property::OpcodesSupported)),
    cmd("read_search_results_id", NONE, "Read search results object ID", Action::Read(Property::SearchResultsId)),
    cmd("read_content_ctrl_id", NONE, "Read content control ID", Action::Read(Property::ContentCtrlId)),
    cmd("set_track_position", &["pos"], "Set track position (centiseconds)", Action::SetTrackPosition),
    cmd("set_playback_speed", &["speed"], "Set playback speed parameter", Action::SetPlaybackSpeed),
    cmd("set_current_track_id", ID, "Set current track by object ID (hex)", Action::SetCurrentTrackId),
    cmd("set_next_track_id", ID, "Set next track by object ID (hex)", Action::SetNextTrackId),
    cmd("set_current_group_id", ID, "Set current group by object ID (hex)", Action::SetCurrentGroupId),
    cmd("set_playing_order", &["order"], "Set playing order (1-10)", Action::SetPlayingOrder),
    cmd("play", NONE, "Play", Action::Command(Opcode::Play)),
    cmd("pause", NONE, "Pause", Action::Command(Opcode::Pause)),
    cmd("fast_rewind", NONE, "Fast rewind", Action::Command(Opcode::FastRewind)),
    cmd("fast_forward", NONE, "Fast forward", Action::Command(Opcode::FastForward)),
    cmd("stop", NONE, "Stop", Action::Command(Opcode::Stop)),
    cmd("move_relative", &["offset"], "Move position by offset (centiseconds)", Action::Command(Opcode::MoveRelative)),
    cmd("prev_segment", NONE, "Previous segment", Action::Command(Opcode::PrevSegment)),
    cmd("next_segment", NONE, "Next segment", Action::Command(Opcode::NextSegment)),
    cmd("first_segment", NONE, "First segment", Action::Command(Opcode::FirstSegment)),
    cmd("last_segment", NONE, "Last segment", Action::Command(Opcode::LastSegment)),
    cmd("goto_segment", &["n"], "Go to segment n", Action::Command(Opcode::GotoSegment)),
    cmd("prev_track", NONE, "Previous track", Action::Command(Opcode::PrevTrack)),
    cmd("next_track", NONE, "Next track", Action::Command(Opcode::NextTrack)),
    cmd("first_track", NONE, "First track", Action::Command(Opcode::FirstTrack)),
    cmd("last_track", NONE, "Last track", Action::Command(Opcode::LastTrack)),
    cmd("goto_track", &["n"], "Go to track n", Action::Command(Opcode::GotoTrack)),
    cmd("prev_group", NONE, "Previous group", Action::Command(Opcode::PrevGroup)),
    cmd("next_group", NONE, "Next group", Action::Command(Opcode::NextGroup)),
    cmd("first_group", NONE, "First group", Action::Command(Opcode::FirstGroup)),
    cmd("last_group", NONE, "Last group", Action::Command(Opcode::LastGroup)),
    cmd("goto_group", &["n"], "Go to group n", Action::Command(Opcode::GotoGroup)),
    cmd("send_search", &["type", "text"], "Search with one item of the given type", Action::SendSearch),
    cmd("help", NONE, "List commands", Action::Help),
];

/// Look up a command by name.
pub fn find_command(name: &str) -> Option<&'static ShellCommand> {
    COMMANDS.iter().find(|c| c.name == name)
}

/// Shell errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ShellError {
    /// Blank line.
    Empty,
    UnknownCommand,
    WrongArgumentCount { expected: usize },
    InvalidArgument,
    Proxy(ProxyError),
    /// Writing to the output failed.
    Output,
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "empty command"),
            Self::UnknownCommand => write!(f, "unknown command"),
            Self::WrongArgumentCount { expected } => write!(f, "expected {expected} argument(s)"),
            Self::InvalidArgument => write!(f, "invalid argument"),
            Self::Proxy(e) => write!(f, "{e}"),
            Self::Output => write!(f, "output error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ShellError {}

impl From<ProxyError> for ShellError {
    fn from(e: ProxyError) -> Self {
        Self::Proxy(e)
    }
}

impl From<fmt::Error> for ShellError {
    fn from(_: fmt::Error) -> Self {
        Self::Output
    }
}

fn parse_int<T: core::str::FromStr>(word: &str) -> Result<T, ShellError> {
    word.parse().map_err(|_| ShellError::InvalidArgument)
}

fn parse_id(word: &str) -> Result<ObjectId, ShellError> {
    let digits = word
        .strip_prefix("0x")
        .or_else(|| word.strip_prefix("0X"))
        .unwrap_or(word);
    let raw = u64::from_str_radix(digits, 16).map_err(|_| ShellError::InvalidArgument)?;
    ObjectId::try_new(raw).map_err(|_| ShellError::InvalidArgument)
}

fn arg<'a>(args: &[&'a str], index: usize) -> Result<&'a str, ShellError> {
    args.get(index).copied().ok_or(ShellError::InvalidArgument)
}

/// Shell state: which player commands go to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shell {
    selected: PlayerHandle,
}

impl Default for Shell {
    fn default() -> Self {
        Self {
            selected: PlayerHandle::Local,
        }
    }
}

impl Shell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> PlayerHandle {
        self.selected
    }

    /// Run one command line.
    pub fn execute<L, R, C, W>(
        &mut self,
        proxy: &mut MediaProxy<L, R, C>,
        line: &str,
        out: &mut W,
    ) -> Result<(), ShellError>
    where
        L: LocalPlayer,
        R: RemoteClient,
        C: Controller,
        W: Write,
    {
        let mut words = line.split_whitespace();
        let name = words.next().ok_or(ShellError::Empty)?;
        let command = find_command(name).ok_or(ShellError::UnknownCommand)?;

        let expected = command.args.len();
        let mut args: heapless::Vec<&str, 2> = heapless::Vec::new();
        for word in words {
            args.push(word)
                .map_err(|_| ShellError::WrongArgumentCount { expected })?;
        }
        if args.len() != expected {
            return Err(ShellError::WrongArgumentCount { expected });
        }

        debug!("shell: {}", command.name);
        let player = self.selected;
        match command.action {
            Action::Init => {
                let ccid = proxy.init_local()?;
                writeln!(out, "local player initialised, ccid {ccid}")?;
            }
            Action::SetPlayer => {
                let handle = match arg(&args, 0)? {
                    "local" => proxy.local_player(),
                    "remote" => proxy.remote_player(),
                    _ => return Err(ShellError::InvalidArgument),
                };
                self.selected = handle.ok_or(ProxyError::NoPlayer)?;
                writeln!(out, "selected {}", self.selected.name())?;
            }
            Action::ShowPlayers => {
                for handle in [PlayerHandle::Local, PlayerHandle::Remote] {
                    let present = match handle {
                        PlayerHandle::Local => proxy.local_player().is_some(),
                        PlayerHandle::Remote => proxy.remote_player().is_some(),
                    };
                    let marker = if handle == self.selected { "*" } else { " " };
                    let status = if present { "present" } else { "absent" };
                    writeln!(out, "{marker} {}: {status}", handle.name())?;
                }
            }
            Action::Read(property) => proxy.get(player, property)?,
            Action::SetTrackPosition => proxy.set_track_position(player, parse_int(arg(&args, 0)?)?)?,
            Action::SetPlaybackSpeed => proxy.set_playback_speed(player, parse_int(arg(&args, 0)?)?)?,
            Action::SetCurrentTrackId => proxy.set_current_track_id(player, parse_id(arg(&args, 0)?)?)?,
            Action::SetNextTrackId => proxy.set_next_track_id(player, parse_id(arg(&args, 0)?)?)?,
            Action::SetCurrentGroupId => proxy.set_current_group_id(player, parse_id(arg(&args, 0)?)?)?,
            Action::SetPlayingOrder => {
                let raw: u8 = parse_int(arg(&args, 0)?)?;
                proxy
                    .set_playing_order_raw(player, raw)
                    .map_err(|e| match e {
                        ProxyError::InvalidArgument => ShellError::InvalidArgument,
                        other => ShellError::Proxy(other),
                    })?;
            }
            Action::Command(opcode) => {
                let command = if opcode.takes_param() {
                    Command::with_param(opcode, parse_int(arg(&args, 0)?)?)
                } else {
                    Command::new(opcode)
                };
                proxy.send_command(player, command)?;
            }
            Action::SendSearch => {
                let raw: u8 = parse_int(arg(&args, 0)?)?;
                let kind = SearchType::from_u8(raw).ok_or(ShellError::InvalidArgument)?;
                let mut search = SearchBuilder::new();
                search
                    .push(kind, arg(&args, 1)?.as_bytes())
                    .map_err(|_| ShellError::InvalidArgument)?;
                proxy.send_search(player, search.as_bytes())?;
            }
            Action::Help => {
                for entry in COMMANDS {
                    write!(out, "{}", entry.name)?;
                    for a in entry.args {
                        write!(out, " <{a}>")?;
                    }
                    writeln!(out, " - {}", entry.help)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_names_unique() {
        for (i, a) in COMMANDS.iter().enumerate() {
            assert!(COMMANDS.iter().skip(i + 1).all(|b| b.name != a.name), "{}", a.name);
        }
    }

    #[test]
    fn test_every_property_readable() {
        for property in Property::ALL {
            let entry = COMMANDS
                .iter()
                .find(|c| c.action == Action::Read(property))
                .expect("read command");
            assert_eq!(entry.name.strip_prefix("read_"), Some(property.name()));
        }
    }

    #[test]
    fn test_every_opcode_has_a_command() {
        for opcode in Opcode::ALL {
            let entry = find_command(opcode.name()).expect("opcode command");
            assert_eq!(entry.action, Action::Command(opcode));
            assert_eq!(entry.args.len(), usize::from(opcode.takes_param()));
        }
    }

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("0x101").map(ObjectId::get), Ok(0x101));
        assert_eq!(parse_id("10a").map(ObjectId::get), Ok(0x10A));
        // Below the first valid object ID
        assert_eq!(parse_id("0x10"), Err(ShellError::InvalidArgument));
        assert_eq!(parse_id("zz"), Err(ShellError::InvalidArgument));
    }

    #[test]
    fn test_parse_int_sign() {
        assert_eq!(parse_int::<i32>("-5"), Ok(-5));
        assert_eq!(parse_int::<i32>("+5"), Ok(5));
        assert_eq!(parse_int::<i8>("200"), Err(ShellError::InvalidArgument));
    }
}
