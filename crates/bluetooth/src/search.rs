//! Search control point parsing.
//!
//! A search is a concatenation of Search Control Items (SCIs):
//!
//! ```text
//! [len][type][param ...]   len counts the type byte plus the parameter
//! ```
//!
//! The whole write is at most [`SEARCH_LEN_MAX`] bytes. Every item is at least
//! two bytes on the wire, so a valid search holds at most 32 items.

/// Maximum length of a search control point write.
pub const SEARCH_LEN_MAX: usize = 64;

/// Smallest legal value of an SCI length field (type byte, empty parameter).
pub const SEARCH_SCI_LEN_MIN: u8 = 1;

/// Upper bound on the number of items in one search.
pub const SEARCH_ITEMS_MAX: usize = SEARCH_LEN_MAX / 2;

/// Kind of a search control item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SearchType {
    TrackName = 1,
    ArtistName = 2,
    AlbumName = 3,
    GroupName = 4,
    EarliestYear = 5,
    LatestYear = 6,
    Genre = 7,
    OnlyTracks = 8,
    OnlyGroups = 9,
}

impl SearchType {
    #[must_use]
    pub fn from_u8(raw: u8) -> Option<Self> {
        match raw {
            1 => Some(Self::TrackName),
            2 => Some(Self::ArtistName),
            3 => Some(Self::AlbumName),
            4 => Some(Self::GroupName),
            5 => Some(Self::EarliestYear),
            6 => Some(Self::LatestYear),
            7 => Some(Self::Genre),
            8 => Some(Self::OnlyTracks),
            9 => Some(Self::OnlyGroups),
            _ => None,
        }
    }
}

/// Reasons a search write is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SearchError {
    /// Total length above [`SEARCH_LEN_MAX`].
    TooLong(usize),
    /// An item length field below [`SEARCH_SCI_LEN_MIN`].
    ItemTooShort,
    /// An item length field runs past the end of the write.
    Incomplete,
    /// An item type outside 1..=9.
    InvalidType(u8),
}

impl core::fmt::Display for SearchError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooLong(len) => write!(f, "search too long ({len} > {SEARCH_LEN_MAX})"),
            Self::ItemTooShort => write!(f, "search item length field too small"),
            Self::Incomplete => write!(f, "incomplete search control item"),
            Self::InvalidType(t) => write!(f, "invalid search item type {t}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SearchError {}

/// One parsed search control item, borrowing its parameter from the write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchControlItem<'a> {
    pub kind: SearchType,
    pub param: &'a [u8],
}

/// Parse a complete search write.
///
/// An empty write is valid and yields no items.
pub fn parse_search(
    bytes: &[u8],
) -> Result<heapless::Vec<SearchControlItem<'_>, SEARCH_ITEMS_MAX>, SearchError> {
    if bytes.len() > SEARCH_LEN_MAX {
        return Err(SearchError::TooLong(bytes.len()));
    }

    let mut items = heapless::Vec::new();
    let mut rest = bytes;
    while let Some((&len, tail)) = rest.split_first() {
        if len < SEARCH_SCI_LEN_MIN {
            return Err(SearchError::ItemTooShort);
        }
        let len = usize::from(len);
        if len > tail.len() {
            return Err(SearchError::Incomplete);
        }
        let (item, remaining) = tail.split_at(len);
        let (&raw_type, param) = item.split_first().ok_or(SearchError::Incomplete)?;
        let kind = SearchType::from_u8(raw_type).ok_or(SearchError::InvalidType(raw_type))?;
        // each item consumes >= 2 bytes of a <= 64 byte write
        items
            .push(SearchControlItem { kind, param })
            .map_err(|_| SearchError::TooLong(bytes.len()))?;
        rest = remaining;
    }
    Ok(items)
}

/// Builds a search write item by item.
#[derive(Debug, Default, Clone)]
pub struct SearchBuilder {
    buf: heapless::Vec<u8, SEARCH_LEN_MAX>,
}

impl SearchBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one item. Fails without modifying the search if it would not fit.
    pub fn push(&mut self, kind: SearchType, param: &[u8]) -> Result<&mut Self, SearchError> {
        let item_len = param.len().saturating_add(2);
        let total = self.buf.len().saturating_add(item_len);
        if total > SEARCH_LEN_MAX {
            return Err(SearchError::TooLong(total));
        }
        // param.len() + 1 <= 63 here, the cast is lossless
        #[allow(clippy::cast_possible_truncation)]
        let len_field = param.len().saturating_add(1) as u8;
        self.buf.push(len_field).ok();
        self.buf.push(kind as u8).ok();
        self.buf.extend_from_slice(param).ok();
        Ok(self)
    }

    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    #[must_use]
    pub fn into_bytes(self) -> heapless::Vec<u8, SEARCH_LEN_MAX> {
        self.buf
    }
}
