//! Object-transfer binding.
//!
//! The player exposes its icon, tracks, segment lists and groups as objects.
//! [`ObjectStore`] hands out object IDs when the player registers them;
//! [`ObjectContent`] builds the bytes of whichever object a client selects
//! into one shared buffer.
//!
//! Only one object can be selected at a time. While a transfer is in flight
//! the transport holds the buffer ([`ObjectContent::hold`]) and any select or
//! read fails with [`ObjectError::Busy`].

use bluetooth::mcs::GroupRecordType;
use bluetooth::ots::{id_or_none, ObjectId, ObjectType};

use crate::catalog::Segment;
use crate::config::MAX_OBJ_SIZE;

/// Longest object name kept by [`LocalObjectStore`], in bytes.
pub const OBJECT_NAME_MAX: usize = 48;

/// Bytes per group record: type byte plus 48-bit object ID.
const GROUP_RECORD_LEN: usize = 1 + ObjectId::LEN;

// ── Object store ─────────────────────────────────────────────────────────

/// Errors registering an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectStoreError {
    /// No room for another object.
    Full,
    /// The 48-bit ID space is used up.
    IdsExhausted,
}

impl core::fmt::Display for ObjectStoreError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "object store full"),
            Self::IdsExhausted => write!(f, "object IDs exhausted"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ObjectStoreError {}

/// Somewhere objects are registered and given IDs.
pub trait ObjectStore {
    /// Register an object and return its ID.
    fn add(&mut self, kind: ObjectType, name: &str, size: usize) -> Result<ObjectId, ObjectStoreError>;
}

impl<T: ObjectStore + ?Sized> ObjectStore for &mut T {
    fn add(&mut self, kind: ObjectType, name: &str, size: usize) -> Result<ObjectId, ObjectStoreError> {
        T::add(self, kind, name, size)
    }
}

/// One registered object.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectEntry {
    pub id: ObjectId,
    pub kind: ObjectType,
    /// Name, truncated to [`OBJECT_NAME_MAX`] bytes.
    pub name: heapless::String<OBJECT_NAME_MAX>,
    pub size: usize,
}

/// In-memory object store with sequential IDs starting at [`ObjectId::MIN`].
#[derive(Debug, Clone)]
pub struct LocalObjectStore<const N: usize = 32> {
    entries: heapless::Vec<ObjectEntry, N>,
    next_id: Option<ObjectId>,
}

impl<const N: usize> LocalObjectStore<N> {
    pub fn new() -> Self {
        Self {
            entries: heapless::Vec::new(),
            next_id: Some(ObjectId::MIN),
        }
    }

    /// Registered objects, in registration order.
    pub fn entries(&self) -> &[ObjectEntry] {
        &self.entries
    }

    pub fn get(&self, id: ObjectId) -> Option<&ObjectEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<const N: usize> Default for LocalObjectStore<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ObjectStore for LocalObjectStore<N> {
    fn add(&mut self, kind: ObjectType, name: &str, size: usize) -> Result<ObjectId, ObjectStoreError> {
        if self.entries.is_full() {
            return Err(ObjectStoreError::Full);
        }
        let id = self.next_id.ok_or(ObjectStoreError::IdsExhausted)?;
        let entry = ObjectEntry {
            id,
            kind,
            name: truncated(name),
            size,
        };
        self.entries.push(entry).map_err(|_| ObjectStoreError::Full)?;
        self.next_id = id.next();
        Ok(id)
    }
}

/// Copy as much of `name` as fits, cutting on a char boundary.
fn truncated(name: &str) -> heapless::String<OBJECT_NAME_MAX> {
    let mut out = heapless::String::new();
    for c in name.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

// ── Object sizes ─────────────────────────────────────────────────────────

/// Encoded size of a segments object, as [`ObjectContent::select_segments`]
/// would build it.
pub fn segments_size(segments: &[Segment]) -> usize {
    let mut size = 0usize;
    for segment in segments {
        let record = 5usize.saturating_add(segment.name.len());
        if segment.name.len() > usize::from(u8::MAX) || size.saturating_add(record) > MAX_OBJ_SIZE {
            break;
        }
        size = size.saturating_add(record);
    }
    size
}

/// Encoded size of a group object with `members` records.
pub fn group_size(members: usize) -> usize {
    let fit = MAX_OBJ_SIZE / GROUP_RECORD_LEN;
    members.min(fit).saturating_mul(GROUP_RECORD_LEN)
}

// ── Object content ───────────────────────────────────────────────────────

/// Errors selecting or reading object content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ObjectError {
    /// The content buffer is held by a transfer.
    Busy,
    /// No object has this ID.
    UnknownObject,
    /// The ID is not the selected object.
    NotSelected,
}

impl core::fmt::Display for ObjectError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Busy => write!(f, "object buffer busy"),
            Self::UnknownObject => write!(f, "unknown object"),
            Self::NotSelected => write!(f, "object not selected"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ObjectError {}

/// The shared object content buffer.
#[derive(Debug, Clone, Default)]
pub struct ObjectContent {
    buf: heapless::Vec<u8, MAX_OBJ_SIZE>,
    busy: bool,
    selected: Option<ObjectId>,
}

impl ObjectContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently selected object.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// Content of the selected object.
    pub fn content(&self) -> &[u8] {
        &self.buf
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Claim the buffer for a transfer.
    pub fn hold(&mut self) -> Result<(), ObjectError> {
        if self.busy {
            return Err(ObjectError::Busy);
        }
        self.busy = true;
        Ok(())
    }

    /// Give the buffer back.
    pub fn release(&mut self) {
        self.busy = false;
    }

    fn begin(&mut self, id: ObjectId) -> Result<(), ObjectError> {
        if self.busy {
            return Err(ObjectError::Busy);
        }
        self.buf.clear();
        self.selected = Some(id);
        Ok(())
    }

    /// Select an object whose content is `size` dummy bytes `0, 1, 2, ...`.
    ///
    /// Used for the icon bitmap and track objects.
    pub fn select_dummy(&mut self, id: ObjectId, size: usize) -> Result<(), ObjectError> {
        self.begin(id)?;
        let len = size.min(MAX_OBJ_SIZE);
        // Values wrap at 256; MAX_OBJ_SIZE is below that anyway.
        for byte in (0..=u8::MAX).cycle().take(len) {
            if self.buf.push(byte).is_err() {
                break;
            }
        }
        Ok(())
    }

    /// Select a segments object: `[name_len][name][pos: i32 LE]` per segment.
    ///
    /// Segments that do not fit are left out, and so is everything after them.
    pub fn select_segments(&mut self, id: ObjectId, segments: &[Segment]) -> Result<(), ObjectError> {
        self.begin(id)?;
        for segment in segments {
            let name = segment.name.as_bytes();
            let Ok(name_len) = u8::try_from(name.len()) else {
                break;
            };
            let record_len = 1usize.saturating_add(name.len()).saturating_add(4);
            if record_len > self.buf.capacity().saturating_sub(self.buf.len()) {
                break;
            }
            // Room checked above.
            let _ = self.buf.push(name_len);
            let _ = self.buf.extend_from_slice(name);
            let _ = self.buf.extend_from_slice(&segment.pos.to_le_bytes());
        }
        Ok(())
    }

    /// Select a group object: one `[type][id: 48-bit LE]` record per member.
    ///
    /// Records stop when the buffer is full.
    pub fn select_group<I>(&mut self, id: ObjectId, kind: GroupRecordType, members: I) -> Result<(), ObjectError>
    where
        I: IntoIterator<Item = Option<ObjectId>>,
    {
        self.begin(id)?;
        for member in members {
            if self.buf.len().saturating_add(GROUP_RECORD_LEN) > self.buf.capacity() {
                break;
            }
            let raw = id_or_none(member).to_le_bytes();
            let _ = self.buf.push(kind as u8);
            let _ = self.buf.extend_from_slice(raw.get(..ObjectId::LEN).unwrap_or(&[]));
        }
        Ok(())
    }

    /// Read up to `len` bytes of the selected object starting at `offset`.
    ///
    /// Reading at or past the end returns an empty slice.
    pub fn read(&self, id: ObjectId, offset: usize, len: usize) -> Result<&[u8], ObjectError> {
        if self.busy {
            return Err(ObjectError::Busy);
        }
        if self.selected != Some(id) {
            return Err(ObjectError::NotSelected);
        }
        let rest = self.buf.get(offset..).unwrap_or(&[]);
        Ok(rest.get(..len.min(rest.len())).unwrap_or(&[]))
    }
}
