//! Object Transfer Service (OTS) identifiers.
//!
//! Only the parts a media player needs to publish its objects: the 48-bit
//! object ID and the object type UUIDs for icons, tracks, segments and groups.

/// Wire value meaning "no object" (e.g. no next track).
pub const NO_OBJECT: u64 = 0;

/// Error returned when a value is not a valid 48-bit object ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidObjectId(pub u64);

impl core::fmt::Display for InvalidObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "object id {:#x} outside [{:#x}, {:#x}]",
            self.0,
            ObjectId::MIN.0,
            ObjectId::MAX.0
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidObjectId {}

/// A 48-bit OTS object ID.
///
/// IDs below [`ObjectId::MIN`] are reserved (0 is the directory listing).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ObjectId(u64);

impl ObjectId {
    /// Lowest ID available to objects.
    pub const MIN: Self = Self(0x100);
    /// Highest 48-bit value.
    pub const MAX: Self = Self(0xFFFF_FFFF_FFFF);

    /// Wire size in bytes.
    pub const LEN: usize = 6;

    /// Build an ID, rejecting reserved and out-of-range values.
    pub const fn try_new(raw: u64) -> Result<Self, InvalidObjectId> {
        if raw < Self::MIN.0 || raw > Self::MAX.0 {
            Err(InvalidObjectId(raw))
        } else {
            Ok(Self(raw))
        }
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Next sequential ID, or `None` past [`ObjectId::MAX`].
    #[must_use]
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).and_then(|raw| Self::try_new(raw).ok())
    }

    /// Little-endian 48-bit encoding.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; Self::LEN] {
        let [b0, b1, b2, b3, b4, b5, _, _] = self.0.to_le_bytes();
        [b0, b1, b2, b3, b4, b5]
    }

    pub fn from_le_bytes(bytes: [u8; Self::LEN]) -> Result<Self, InvalidObjectId> {
        let [b0, b1, b2, b3, b4, b5] = bytes;
        Self::try_new(u64::from_le_bytes([b0, b1, b2, b3, b4, b5, 0, 0]))
    }
}

impl core::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "0x{:012X}", self.0)
    }
}

/// Wire value of an optional object ID; `None` maps to [`NO_OBJECT`].
#[must_use]
pub fn id_or_none(id: Option<ObjectId>) -> u64 {
    id.map_or(NO_OBJECT, ObjectId::get)
}

/// OTS object types used by a media player (16-bit Bluetooth SIG UUIDs).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum ObjectType {
    Icon = 0x2BA9,
    TrackSegments = 0x2BAA,
    Track = 0x2BAB,
    Group = 0x2BAC,
}

impl ObjectType {
    #[must_use]
    pub const fn uuid(self) -> u16 {
        self as u16
    }

    #[must_use]
    pub fn from_uuid(uuid: u16) -> Option<Self> {
        match uuid {
            0x2BA9 => Some(Self::Icon),
            0x2BAA => Some(Self::TrackSegments),
            0x2BAB => Some(Self::Track),
            0x2BAC => Some(Self::Group),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_ids_rejected() {
        assert_eq!(ObjectId::try_new(0), Err(InvalidObjectId(0)));
        assert_eq!(ObjectId::try_new(0xFF), Err(InvalidObjectId(0xFF)));
        assert!(ObjectId::try_new(0x100).is_ok());
    }

    #[test]
    fn test_above_48_bits_rejected() {
        assert!(ObjectId::try_new(0xFFFF_FFFF_FFFF).is_ok());
        assert_eq!(
            ObjectId::try_new(0x1_0000_0000_0000),
            Err(InvalidObjectId(0x1_0000_0000_0000))
        );
    }

    #[test]
    fn test_le_bytes() {
        let id = ObjectId::try_new(0x0102_0304_0506).expect("valid");
        assert_eq!(id.to_le_bytes(), [0x06, 0x05, 0x04, 0x03, 0x02, 0x01]);
        assert_eq!(ObjectId::from_le_bytes(id.to_le_bytes()), Ok(id));
    }

    #[test]
    fn test_display_is_twelve_hex_digits() {
        let id = ObjectId::try_new(0x1AB).expect("valid");
        assert_eq!(std::format!("{id}"), "0x0000000001AB");
    }

    #[test]
    fn test_next_stops_at_max() {
        assert_eq!(ObjectId::MIN.next().map(ObjectId::get), Some(0x101));
        assert_eq!(ObjectId::MAX.next(), None);
    }

    #[test]
    fn test_id_or_none() {
        assert_eq!(id_or_none(None), NO_OBJECT);
        assert_eq!(id_or_none(Some(ObjectId::MIN)), 0x100);
    }

    #[test]
    fn test_object_type_uuids() {
        assert_eq!(ObjectType::Icon.uuid(), 0x2BA9);
        assert_eq!(ObjectType::from_uuid(0x2BAC), Some(ObjectType::Group));
        assert_eq!(ObjectType::from_uuid(0x2BAD), None);
    }
}
