//! Media catalog: groups of tracks, tracks split into segments.
//!
//! The catalog is a flat arena. Groups own a contiguous run of tracks and
//! tracks own a contiguous run of segments, so "previous" and "next" are
//! index arithmetic inside a run. Every group remembers its own current
//! track and every track its current segment, so switching back to a group
//! resumes where it was left.
//!
//! All groups share one parent group. The catalog is built once with the
//! `push_*` methods and its shape never changes afterwards; only the cursors
//! and the object IDs do.

use bluetooth::ots::ObjectId;

/// Maximum number of groups.
pub const MAX_GROUPS: usize = 8;
/// Maximum number of tracks across all groups.
pub const MAX_TRACKS: usize = 32;
/// Maximum number of segments across all tracks.
pub const MAX_SEGMENTS: usize = 16;

/// Errors building a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CatalogError {
    /// The arena for this kind of entry is full.
    Full,
    /// A track or segment was pushed with nothing to attach it to.
    NoParent,
    /// Negative track duration.
    InvalidDuration,
    /// An index outside the catalog.
    OutOfRange,
}

impl core::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Full => write!(f, "catalog full"),
            Self::NoParent => write!(f, "no group or track to attach to"),
            Self::InvalidDuration => write!(f, "negative track duration"),
            Self::OutOfRange => write!(f, "catalog index out of range"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for CatalogError {}

/// Cursor movement within a run of siblings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Nav {
    Prev,
    Next,
    First,
    Last,
    /// `n > 0`: the nth from the start. `n < 0`: the |n|th from the end.
    /// `0` stays put. Out-of-range counts stop at the ends.
    Goto(i32),
}

/// Contiguous run of sibling entries in an arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Span {
    start: usize,
    len: usize,
}

impl Span {
    fn last(self) -> Option<usize> {
        self.len.checked_sub(1).map(|n| self.start.saturating_add(n))
    }

    fn contains(self, index: usize) -> bool {
        index
            .checked_sub(self.start)
            .is_some_and(|offset| offset < self.len)
    }

    /// Target of `nav` from `current`, or `None` for an empty run.
    fn target(self, current: usize, nav: Nav) -> Option<usize> {
        let last = self.last()?;
        // Goto counts are 1-based from either end.
        let goto_offset = |n: i32| {
            usize::try_from(n.unsigned_abs().saturating_sub(1)).unwrap_or(usize::MAX)
        };
        let target = match nav {
            Nav::Prev => current.saturating_sub(1).max(self.start),
            Nav::Next => current.saturating_add(1).min(last),
            Nav::First => self.start,
            Nav::Last => last,
            Nav::Goto(0) => current,
            Nav::Goto(n) if n > 0 => self.start.saturating_add(goto_offset(n)).min(last),
            Nav::Goto(n) => last.saturating_sub(goto_offset(n)).max(self.start),
        };
        Some(target)
    }
}

/// Parent of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParentRef {
    /// The catalog's shared parent group.
    Root,
    /// Another group (only set by test hooks).
    Group(usize),
}

/// A named position inside a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Segment {
    pub name: &'static str,
    /// Start position, in centiseconds.
    pub pos: i32,
}

/// One track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Track {
    pub title: &'static str,
    /// Duration, in centiseconds.
    pub duration: i32,
    pub id: Option<ObjectId>,
    pub segments_id: Option<ObjectId>,
    group: usize,
    segments: Span,
    current_segment: usize,
}

impl Track {
    /// Index of the group that owns this track.
    pub fn group(&self) -> usize {
        self.group
    }

    pub fn has_segments(&self) -> bool {
        self.segments.len > 0
    }
}

/// One group of tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub title: &'static str,
    pub id: Option<ObjectId>,
    pub parent: ParentRef,
    tracks: Span,
    current_track: usize,
}

impl Group {
    /// Number of tracks in the group.
    pub fn track_count(&self) -> usize {
        self.tracks.len
    }
}

/// The shared parent of all groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentGroup {
    pub title: &'static str,
    pub id: Option<ObjectId>,
}

/// Groups, tracks and segments plus the playback cursors.
#[derive(Debug, Clone)]
pub struct Catalog {
    parent: ParentGroup,
    groups: heapless::Vec<Group, MAX_GROUPS>,
    tracks: heapless::Vec<Track, MAX_TRACKS>,
    segments: heapless::Vec<Segment, MAX_SEGMENTS>,
    current_group: usize,
}

impl Catalog {
    /// Empty catalog under a parent group called `parent_title`.
    pub fn new(parent_title: &'static str) -> Self {
        Self {
            parent: ParentGroup {
                title: parent_title,
                id: None,
            },
            groups: heapless::Vec::new(),
            tracks: heapless::Vec::new(),
            segments: heapless::Vec::new(),
            current_group: 0,
        }
    }

    /// The fixed demo library.
    ///
    /// Four groups under "Parent group". Only the first track has segments.
    pub fn demo() -> Self {
        let mut catalog = Self::new("Parent group");
        // Capacities above cover the demo with room to spare.
        let _ = catalog.push_demo();
        catalog
    }

    fn push_demo(&mut self) -> Result<(), CatalogError> {
        self.push_group("Joe Pass - Guitar Interludes")?;
        self.push_track("Interlude #1 (Song for Alison)", 6300)?;
        self.push_segment("Start", 0)?;
        self.push_segment("Middle", 2000)?;
        self.push_segment("End", 5000)?;
        self.push_track("Interlude #2 (For Bobbye)", 7500)?;
        self.push_track("Interlude #3 (Levanto Seventy)", 7800)?;
        self.push_track("Interlude #4 (Vesper Dreams)", 13500)?;
        self.push_track("Interlude #5 (Shasti)", 7500)?;

        let g2 = self.push_group("Group 2")?;
        self.push_track("Track 2.1", 30000)?;
        self.push_track("Track 2.2", 30000)?;
        self.push_track("Track 2.3", 30000)?;
        self.set_group_cursor(g2, 1)?;

        let g3 = self.push_group("Group 3")?;
        self.push_track("Track 3.1", 30000)?;
        self.push_track("Track 3.2", 30000)?;
        self.push_track("Track 3.3", 30000)?;
        self.set_group_cursor(g3, 2)?;

        let g4 = self.push_group("Group 4")?;
        self.push_track("Track 4.1", 30000)?;
        self.push_track("Track 4.2", 30000)?;
        self.set_group_cursor(g4, 1)?;
        Ok(())
    }

    // ── Building ─────────────────────────────────────────────────────────

    /// Append a group. Subsequent tracks belong to it.
    pub fn push_group(&mut self, title: &'static str) -> Result<usize, CatalogError> {
        let index = self.groups.len();
        let group = Group {
            title,
            id: None,
            parent: ParentRef::Root,
            tracks: Span {
                start: self.tracks.len(),
                len: 0,
            },
            current_track: self.tracks.len(),
        };
        self.groups.push(group).map_err(|_| CatalogError::Full)?;
        Ok(index)
    }

    /// Append a track to the last group. Subsequent segments belong to it.
    pub fn push_track(&mut self, title: &'static str, duration: i32) -> Result<usize, CatalogError> {
        if duration < 0 {
            return Err(CatalogError::InvalidDuration);
        }
        let index = self.tracks.len();
        let group_index = self.groups.len().checked_sub(1).ok_or(CatalogError::NoParent)?;
        let track = Track {
            title,
            duration,
            id: None,
            segments_id: None,
            group: group_index,
            segments: Span {
                start: self.segments.len(),
                len: 0,
            },
            current_segment: self.segments.len(),
        };
        self.tracks.push(track).map_err(|_| CatalogError::Full)?;
        if let Some(group) = self.groups.last_mut() {
            group.tracks.len = group.tracks.len.saturating_add(1);
        }
        Ok(index)
    }

    /// Append a segment to the last track.
    pub fn push_segment(&mut self, name: &'static str, pos: i32) -> Result<usize, CatalogError> {
        if self.tracks.is_empty() {
            return Err(CatalogError::NoParent);
        }
        let index = self.segments.len();
        self.segments
            .push(Segment { name, pos })
            .map_err(|_| CatalogError::Full)?;
        if let Some(track) = self.tracks.last_mut() {
            track.segments.len = track.segments.len.saturating_add(1);
        }
        Ok(index)
    }

    /// Point `group` at its `ordinal`th track (0-based).
    pub fn set_group_cursor(&mut self, group: usize, ordinal: usize) -> Result<(), CatalogError> {
        let group = self.groups.get_mut(group).ok_or(CatalogError::OutOfRange)?;
        if ordinal >= group.tracks.len {
            return Err(CatalogError::OutOfRange);
        }
        group.current_track = group.tracks.start.saturating_add(ordinal);
        Ok(())
    }

    // ── Access ───────────────────────────────────────────────────────────

    pub fn parent(&self) -> &ParentGroup {
        &self.parent
    }

    pub fn parent_mut(&mut self) -> &mut ParentGroup {
        &mut self.parent
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&Group> {
        self.groups.get(index)
    }

    pub fn group_mut(&mut self, index: usize) -> Option<&mut Group> {
        self.groups.get_mut(index)
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn track_mut(&mut self, index: usize) -> Option<&mut Track> {
        self.tracks.get_mut(index)
    }

    /// Arena indices of a group's tracks. Empty for an unknown group.
    pub fn track_indices(&self, group: usize) -> core::ops::Range<usize> {
        let span = self.groups.get(group).map(|g| g.tracks).unwrap_or_default();
        span.start..span.start.saturating_add(span.len)
    }

    /// Tracks of a group, in order, with their arena indices.
    pub fn tracks_of(&self, group: usize) -> impl Iterator<Item = (usize, &Track)> + '_ {
        let span = self.groups.get(group).map(|g| g.tracks).unwrap_or_default();
        self.tracks
            .iter()
            .enumerate()
            .skip(span.start)
            .take(span.len)
    }

    /// Segments of a track, in order.
    pub fn segments_of(&self, track: usize) -> &[Segment] {
        self.tracks
            .get(track)
            .and_then(|t| {
                let end = t.segments.start.saturating_add(t.segments.len);
                self.segments.get(t.segments.start..end)
            })
            .unwrap_or(&[])
    }

    pub fn current_group_index(&self) -> usize {
        self.current_group
    }

    pub fn current_group(&self) -> Option<&Group> {
        self.groups.get(self.current_group)
    }

    /// Arena index of the current track.
    pub fn current_track_index(&self) -> Option<usize> {
        self.current_group().map(|g| g.current_track)
    }

    pub fn current_track(&self) -> Option<&Track> {
        self.current_track_index().and_then(|i| self.tracks.get(i))
    }

    /// Current segment of the current track, if it has segments.
    pub fn current_segment(&self) -> Option<&Segment> {
        let track = self.current_track()?;
        if !track.has_segments() {
            return None;
        }
        self.segments.get(track.current_segment)
    }

    /// Track after the current one in the current group.
    pub fn next_track_index(&self) -> Option<usize> {
        let group = self.current_group()?;
        let next = group.current_track.checked_add(1)?;
        group.tracks.contains(next).then_some(next)
    }

    /// ID of the current group's parent.
    pub fn parent_id(&self) -> Option<ObjectId> {
        match self.current_group()?.parent {
            ParentRef::Root => self.parent.id,
            ParentRef::Group(index) => self.groups.get(index).and_then(|g| g.id),
        }
    }

    /// Make `track` current, switching to its group.
    ///
    /// Returns `true` if the group changed.
    pub fn set_current_track(&mut self, track: usize) -> Result<bool, CatalogError> {
        let group_index = self.tracks.get(track).ok_or(CatalogError::OutOfRange)?.group;
        let group = self
            .groups
            .get_mut(group_index)
            .ok_or(CatalogError::OutOfRange)?;
        group.current_track = track;
        let changed = self.current_group != group_index;
        self.current_group = group_index;
        Ok(changed)
    }

    /// Make `group` current, keeping its remembered track.
    pub fn set_current_group(&mut self, group: usize) -> Result<bool, CatalogError> {
        if group >= self.groups.len() {
            return Err(CatalogError::OutOfRange);
        }
        let changed = self.current_group != group;
        self.current_group = group;
        Ok(changed)
    }

    // ── Navigation ───────────────────────────────────────────────────────

    /// Move between groups. Returns `true` if the group changed.
    pub fn navigate_group(&mut self, nav: Nav) -> bool {
        let span = Span {
            start: 0,
            len: self.groups.len(),
        };
        match span.target(self.current_group, nav) {
            Some(target) if target != self.current_group => {
                self.current_group = target;
                true
            }
            _ => false,
        }
    }

    /// Move between tracks of the current group. Returns `true` if the
    /// track changed.
    pub fn navigate_track(&mut self, nav: Nav) -> bool {
        let Some(group) = self.groups.get_mut(self.current_group) else {
            return false;
        };
        match group.tracks.target(group.current_track, nav) {
            Some(target) if target != group.current_track => {
                group.current_track = target;
                true
            }
            _ => false,
        }
    }

    /// Move between segments of the current track. Returns `true` if the
    /// segment changed; always `false` for a track without segments.
    pub fn navigate_segment(&mut self, nav: Nav) -> bool {
        let Some(index) = self.current_track_index() else {
            return false;
        };
        let Some(track) = self.tracks.get_mut(index) else {
            return false;
        };
        match track.segments.target(track.current_segment, nav) {
            Some(target) if target != track.current_segment => {
                track.current_segment = target;
                true
            }
            _ => false,
        }
    }

    // ── Lookup ───────────────────────────────────────────────────────────

    /// Arena index of the track with object ID `id`.
    pub fn find_track(&self, id: ObjectId) -> Option<usize> {
        self.tracks.iter().position(|t| t.id == Some(id))
    }

    /// Index of the group with object ID `id`.
    pub fn find_group(&self, id: ObjectId) -> Option<usize> {
        self.groups.iter().position(|g| g.id == Some(id))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}
