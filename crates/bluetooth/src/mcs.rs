//! Media Control Service (MCS) vocabulary.
//!
//! Opcodes, media states, result codes and playing orders exactly as they
//! appear on the wire. Everything here is plain data: the state machine that
//! interprets commands lives in the `playback` crate.
//!
//! Control point write format:
//! - `[opcode]` for parameterless commands
//! - `[opcode, p0, p1, p2, p3]` where `p` is a little-endian `i32`

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Bitmap with every opcode of [`Opcode`] marked as supported.
pub const OPCODES_SUPPORTED_ALL: u32 = 0x001F_FFFF;

/// Largest magnitude the seeking speed factor may take (either direction).
pub const SEEKING_SPEED_FACTOR_MAX: i8 = 64;

/// Seeking speed factor when not seeking.
pub const SEEKING_SPEED_FACTOR_ZERO: i8 = 0;

/// Playback speed parameter for normal (1x) speed.
pub const PLAYBACK_SPEED_UNITY: i8 = 0;

// ─────────────────────────────────────────────────────────────────────────────
// Opcodes
// ─────────────────────────────────────────────────────────────────────────────

/// Media control point opcodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Opcode {
    Play = 0x01,
    Pause = 0x02,
    FastRewind = 0x03,
    FastForward = 0x04,
    Stop = 0x05,
    /// Move the track position by a signed offset (centiseconds).
    MoveRelative = 0x10,
    PrevSegment = 0x20,
    NextSegment = 0x21,
    FirstSegment = 0x22,
    LastSegment = 0x23,
    /// Go to segment `n` (n > 0 from the start, n < 0 from the end).
    GotoSegment = 0x24,
    PrevTrack = 0x30,
    NextTrack = 0x31,
    FirstTrack = 0x32,
    LastTrack = 0x33,
    GotoTrack = 0x34,
    PrevGroup = 0x40,
    NextGroup = 0x41,
    FirstGroup = 0x42,
    LastGroup = 0x43,
    GotoGroup = 0x44,
}

impl Opcode {
    /// Every opcode, in ascending wire order.
    pub const ALL: [Opcode; 21] = [
        Opcode::Play,
        Opcode::Pause,
        Opcode::FastRewind,
        Opcode::FastForward,
        Opcode::Stop,
        Opcode::MoveRelative,
        Opcode::PrevSegment,
        Opcode::NextSegment,
        Opcode::FirstSegment,
        Opcode::LastSegment,
        Opcode::GotoSegment,
        Opcode::PrevTrack,
        Opcode::NextTrack,
        Opcode::FirstTrack,
        Opcode::LastTrack,
        Opcode::GotoTrack,
        Opcode::PrevGroup,
        Opcode::NextGroup,
        Opcode::FirstGroup,
        Opcode::LastGroup,
        Opcode::GotoGroup,
    ];

    /// Decode a raw opcode byte. Returns `None` for unassigned values.
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|op| *op as u8 == raw)
    }

    /// Raw wire value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Bit this opcode occupies in the "opcodes supported" bitmap.
    #[must_use]
    pub const fn supported_bit(self) -> u32 {
        let index: u32 = match self {
            Opcode::Play => 0,
            Opcode::Pause => 1,
            Opcode::FastRewind => 2,
            Opcode::FastForward => 3,
            Opcode::Stop => 4,
            Opcode::MoveRelative => 5,
            Opcode::PrevSegment => 6,
            Opcode::NextSegment => 7,
            Opcode::FirstSegment => 8,
            Opcode::LastSegment => 9,
            Opcode::GotoSegment => 10,
            Opcode::PrevTrack => 11,
            Opcode::NextTrack => 12,
            Opcode::FirstTrack => 13,
            Opcode::LastTrack => 14,
            Opcode::GotoTrack => 15,
            Opcode::PrevGroup => 16,
            Opcode::NextGroup => 17,
            Opcode::FirstGroup => 18,
            Opcode::LastGroup => 19,
            Opcode::GotoGroup => 20,
        };
        1u32.wrapping_shl(index)
    }

    /// `true` for the opcodes that take an `i32` parameter.
    #[must_use]
    pub const fn takes_param(self) -> bool {
        matches!(
            self,
            Opcode::MoveRelative | Opcode::GotoSegment | Opcode::GotoTrack | Opcode::GotoGroup
        )
    }

    /// Short lowercase name, used by the shell and in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Opcode::Play => "play",
            Opcode::Pause => "pause",
            Opcode::FastRewind => "fast_rewind",
            Opcode::FastForward => "fast_forward",
            Opcode::Stop => "stop",
            Opcode::MoveRelative => "move_relative",
            Opcode::PrevSegment => "prev_segment",
            Opcode::NextSegment => "next_segment",
            Opcode::FirstSegment => "first_segment",
            Opcode::LastSegment => "last_segment",
            Opcode::GotoSegment => "goto_segment",
            Opcode::PrevTrack => "prev_track",
            Opcode::NextTrack => "next_track",
            Opcode::FirstTrack => "first_track",
            Opcode::LastTrack => "last_track",
            Opcode::GotoTrack => "goto_track",
            Opcode::PrevGroup => "prev_group",
            Opcode::NextGroup => "next_group",
            Opcode::FirstGroup => "first_group",
            Opcode::LastGroup => "last_group",
            Opcode::GotoGroup => "goto_group",
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Media state / result codes
// ─────────────────────────────────────────────────────────────────────────────

/// Media player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum MediaState {
    Inactive = 0,
    Playing = 1,
    Paused = 2,
    Seeking = 3,
}

impl MediaState {
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(MediaState::Inactive),
            1 => Some(MediaState::Playing),
            2 => Some(MediaState::Paused),
            3 => Some(MediaState::Seeking),
            _ => None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            MediaState::Inactive => "inactive",
            MediaState::Playing => "playing",
            MediaState::Paused => "paused",
            MediaState::Seeking => "seeking",
        }
    }
}

/// Outcome reported for every control point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResultCode {
    Success = 1,
    NotSupported = 2,
    PlayerInactive = 3,
    CannotBeCompleted = 4,
}

impl ResultCode {
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(ResultCode::Success),
            2 => Some(ResultCode::NotSupported),
            3 => Some(ResultCode::PlayerInactive),
            4 => Some(ResultCode::CannotBeCompleted),
            _ => None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }
}

/// Outcome of a search control point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SearchResult {
    Success = 1,
    Failure = 2,
}

impl SearchResult {
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(SearchResult::Success),
            2 => Some(SearchResult::Failure),
            _ => None,
        }
    }
}

/// Record type byte in a group object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum GroupRecordType {
    Track = 0,
    Group = 1,
}

// ─────────────────────────────────────────────────────────────────────────────
// Playing order
// ─────────────────────────────────────────────────────────────────────────────

/// Playing order (1–10).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum PlayingOrder {
    SingleOnce = 1,
    SingleRepeat = 2,
    InOrderOnce = 3,
    InOrderRepeat = 4,
    OldestOnce = 5,
    OldestRepeat = 6,
    NewestOnce = 7,
    NewestRepeat = 8,
    ShuffleOnce = 9,
    ShuffleRepeat = 10,
}

impl PlayingOrder {
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(PlayingOrder::SingleOnce),
            2 => Some(PlayingOrder::SingleRepeat),
            3 => Some(PlayingOrder::InOrderOnce),
            4 => Some(PlayingOrder::InOrderRepeat),
            5 => Some(PlayingOrder::OldestOnce),
            6 => Some(PlayingOrder::OldestRepeat),
            7 => Some(PlayingOrder::NewestOnce),
            8 => Some(PlayingOrder::NewestRepeat),
            9 => Some(PlayingOrder::ShuffleOnce),
            10 => Some(PlayingOrder::ShuffleRepeat),
            _ => None,
        }
    }

    #[must_use]
    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Bit for this order in the supported-orders bitmap (`1 << (order - 1)`).
    #[must_use]
    pub const fn supported_bit(self) -> u16 {
        // order is 1..=10, so the shift is 0..=9
        1u16.wrapping_shl((self as u8).wrapping_sub(1) as u32)
    }
}

/// Bitmap of supported playing orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PlayingOrders(u16);

impl PlayingOrders {
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn with(self, order: PlayingOrder) -> Self {
        Self(self.0 | order.supported_bit())
    }

    #[must_use]
    pub const fn contains(self, order: PlayingOrder) -> bool {
        self.0 & order.supported_bit() != 0
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Control point command
// ─────────────────────────────────────────────────────────────────────────────

/// Errors decoding control point or notification bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CommandError {
    /// No bytes at all.
    Empty,
    /// A parameter was started but is not 4 bytes long.
    TruncatedParam(usize),
    /// A notification carried an unknown result code.
    UnknownResult(u8),
}

impl core::fmt::Display for CommandError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Empty => write!(f, "empty control point write"),
            Self::TruncatedParam(n) => write!(f, "parameter is {n} bytes, expected 4"),
            Self::UnknownResult(code) => write!(f, "unknown result code {code:#04x}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CommandError {}

/// One control point write.
///
/// `opcode` stays raw so that unassigned opcodes reach the player and get a
/// [`ResultCode::NotSupported`] back instead of being dropped here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Command {
    pub opcode: u8,
    pub param: Option<i32>,
}

impl Command {
    /// Command without parameter.
    #[must_use]
    pub const fn new(opcode: Opcode) -> Self {
        Self {
            opcode: opcode as u8,
            param: None,
        }
    }

    /// Command with an `i32` parameter.
    #[must_use]
    pub const fn with_param(opcode: Opcode, param: i32) -> Self {
        Self {
            opcode: opcode as u8,
            param: Some(param),
        }
    }

    /// Decoded opcode, if assigned.
    #[must_use]
    pub fn opcode(&self) -> Option<Opcode> {
        Opcode::from_u8(self.opcode)
    }

    /// Serialise as a control point write.
    #[must_use]
    pub fn encode(&self) -> heapless::Vec<u8, 5> {
        let mut out: heapless::Vec<u8, 5> = heapless::Vec::new();
        // capacity 5 = opcode + 4 param bytes, pushes cannot fail
        out.push(self.opcode).ok();
        if let Some(param) = self.param {
            out.extend_from_slice(&param.to_le_bytes()).ok();
        }
        out
    }

    /// Parse a control point write.
    pub fn decode(bytes: &[u8]) -> Result<Self, CommandError> {
        let (&opcode, rest) = bytes.split_first().ok_or(CommandError::Empty)?;
        let param = match rest.len() {
            0 => None,
            4 => {
                let mut raw = [0u8; 4];
                raw.copy_from_slice(rest);
                Some(i32::from_le_bytes(raw))
            }
            n => return Err(CommandError::TruncatedParam(n)),
        };
        Ok(Self { opcode, param })
    }
}

/// Result notification for a control point write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CommandNotification {
    pub requested_opcode: u8,
    pub result: ResultCode,
}

impl CommandNotification {
    #[must_use]
    pub const fn encode(&self) -> [u8; 2] {
        [self.requested_opcode, self.result as u8]
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, CommandError> {
        match bytes {
            [] => Err(CommandError::Empty),
            [opcode, code] => Ok(Self {
                requested_opcode: *opcode,
                result: ResultCode::from_u8(*code).ok_or(CommandError::UnknownResult(*code))?,
            }),
            other => Err(CommandError::TruncatedParam(other.len().saturating_sub(1))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_opcode_wire_values() {
        assert_eq!(Opcode::Play.raw(), 0x01);
        assert_eq!(Opcode::MoveRelative.raw(), 0x10);
        assert_eq!(Opcode::GotoSegment.raw(), 0x24);
        assert_eq!(Opcode::GotoTrack.raw(), 0x34);
        assert_eq!(Opcode::GotoGroup.raw(), 0x44);
    }

    #[test]
    fn test_opcode_from_u8_rejects_gaps() {
        assert_eq!(Opcode::from_u8(0x00), None);
        assert_eq!(Opcode::from_u8(0x06), None);
        assert_eq!(Opcode::from_u8(0x25), None);
        assert_eq!(Opcode::from_u8(0x45), None);
        assert_eq!(Opcode::from_u8(0x31), Some(Opcode::NextTrack));
    }

    #[test]
    fn test_supported_bits_cover_all_opcodes() {
        let all = Opcode::ALL
            .iter()
            .fold(0u32, |acc, op| acc | op.supported_bit());
        assert_eq!(all, OPCODES_SUPPORTED_ALL);
    }

    #[test]
    fn test_only_move_and_goto_take_params() {
        let with_param: usize = Opcode::ALL.iter().filter(|op| op.takes_param()).count();
        assert_eq!(with_param, 4);
    }

    #[test]
    fn test_playing_order_bits() {
        assert_eq!(PlayingOrder::SingleOnce.supported_bit(), 0x0001);
        assert_eq!(PlayingOrder::InOrderRepeat.supported_bit(), 0x0008);
        assert_eq!(PlayingOrder::ShuffleRepeat.supported_bit(), 0x0200);
        assert_eq!(PlayingOrder::from_u8(0), None);
        assert_eq!(PlayingOrder::from_u8(11), None);
    }

    #[test]
    fn test_playing_orders_contains() {
        let orders = PlayingOrders::default()
            .with(PlayingOrder::InOrderOnce)
            .with(PlayingOrder::InOrderRepeat);
        assert!(orders.contains(PlayingOrder::InOrderRepeat));
        assert!(!orders.contains(PlayingOrder::ShuffleOnce));
        assert_eq!(orders.bits(), 0x000C);
    }

    #[test]
    fn test_command_encode_without_param() {
        let cmd = Command::new(Opcode::Play);
        assert_eq!(&cmd.encode()[..], &[0x01]);
    }

    #[test]
    fn test_command_encode_with_negative_param() {
        let cmd = Command::with_param(Opcode::MoveRelative, -1000);
        // -1000 = 0xFFFF_FC18, little-endian
        assert_eq!(&cmd.encode()[..], &[0x10, 0x18, 0xFC, 0xFF, 0xFF]);
    }

    #[test]
    fn test_command_decode_rejects_partial_param() {
        assert_eq!(Command::decode(&[]), Err(CommandError::Empty));
        assert_eq!(
            Command::decode(&[0x24, 0x01, 0x00]),
            Err(CommandError::TruncatedParam(2))
        );
    }

    #[test]
    fn test_command_decode_keeps_unknown_opcode() {
        let cmd = Command::decode(&[0x7F]).expect("single byte is valid");
        assert_eq!(cmd.opcode, 0x7F);
        assert_eq!(cmd.opcode(), None);
    }

    #[test]
    fn test_notification_decode() {
        let ntf = CommandNotification::decode(&[0x01, 0x03]).expect("valid notification");
        assert_eq!(ntf.result, ResultCode::PlayerInactive);
        assert_eq!(
            CommandNotification::decode(&[0x01, 0x09]),
            Err(CommandError::UnknownResult(0x09))
        );
    }
}
