//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits
//! for use in unit and integration tests.

#![cfg(any(test, feature = "std"))]

use crate::comparator::{
    AnalogComparator, AttributeKind, ComparatorAttribute, ComparatorConfig, EdgeTrigger,
};
use crate::registers::RegisterBlock;

/// Number of distinct register offsets a [`MockRegisterBlock`] can hold.
pub const MOCK_REGISTER_SLOTS: usize = 32;

/// Capacity of the write log.
pub const MOCK_WRITE_LOG: usize = 256;

/// In-memory register block.
///
/// Unwritten registers read as 0 unless preloaded. Every write is logged in
/// order so tests can assert on exact register sequences.
#[derive(Debug, Default)]
pub struct MockRegisterBlock {
    values: heapless::LinearMap<usize, u32, MOCK_REGISTER_SLOTS>,
    writes: heapless::Vec<(usize, u32), MOCK_WRITE_LOG>,
}

impl MockRegisterBlock {
    /// Create an all-zero block.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a register value without logging a write (e.g. a status register).
    pub fn preload(&mut self, offset: usize, value: u32) {
        let _ = self.values.insert(offset, value);
    }

    /// Builder form of [`preload`](Self::preload).
    #[must_use]
    pub fn with(mut self, offset: usize, value: u32) -> Self {
        self.preload(offset, value);
        self
    }

    /// All writes so far, oldest first.
    pub fn writes(&self) -> &[(usize, u32)] {
        &self.writes
    }

    /// Writes to one offset, oldest first.
    pub fn writes_to(&self, offset: usize) -> impl Iterator<Item = u32> + '_ {
        self.writes
            .iter()
            .filter(move |(o, _)| *o == offset)
            .map(|(_, v)| *v)
    }

    /// Forget the write log, keeping register values.
    pub fn clear_writes(&mut self) {
        self.writes.clear();
    }
}

impl RegisterBlock for MockRegisterBlock {
    fn read(&self, offset: usize) -> u32 {
        self.values.get(&offset).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: usize, value: u32) {
        let _ = self.values.insert(offset, value);
        if self.writes.len() < self.writes.capacity() {
            let _ = self.writes.push((offset, value));
        }
    }
}

/// Call recorded by [`MockComparator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparatorCall {
    /// `configure`
    Configure,
    /// `enable`
    Enable,
    /// `disable`
    Disable,
    /// `set_attribute`
    SetAttribute(ComparatorAttribute),
    /// `set_trigger`
    SetTrigger(Option<EdgeTrigger>),
    /// `sample`
    Sample,
}

/// In-memory analog comparator with a scripted output level.
#[derive(Debug, Default)]
pub struct MockComparator {
    config: ComparatorConfig,
    enabled: bool,
    trigger: Option<EdgeTrigger>,
    output: bool,
    calls: heapless::Vec<ComparatorCall, 64>,
}

impl MockComparator {
    /// Create a disabled comparator with the reset configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level [`sample`](AnalogComparator::sample) returns.
    pub fn set_output(&mut self, level: bool) {
        self.output = level;
    }

    /// Current configuration.
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Current edge trigger.
    pub fn trigger(&self) -> Option<EdgeTrigger> {
        self.trigger
    }

    /// Recorded calls, oldest first.
    pub fn calls(&self) -> &[ComparatorCall] {
        &self.calls
    }

    fn record(&mut self, call: ComparatorCall) {
        if self.calls.len() < self.calls.capacity() {
            let _ = self.calls.push(call);
        }
    }
}

impl AnalogComparator for MockComparator {
    type Error = core::convert::Infallible;

    fn configure(&mut self, config: &ComparatorConfig) -> Result<(), Self::Error> {
        self.record(ComparatorCall::Configure);
        self.config = *config;
        self.enabled = true;
        Ok(())
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        self.record(ComparatorCall::Enable);
        self.enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        self.record(ComparatorCall::Disable);
        self.enabled = false;
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_attribute(&mut self, attr: ComparatorAttribute) -> Result<(), Self::Error> {
        self.record(ComparatorCall::SetAttribute(attr));
        self.config.apply(attr);
        Ok(())
    }

    fn attribute(&self, kind: AttributeKind) -> ComparatorAttribute {
        self.config.attribute(kind)
    }

    fn set_trigger(&mut self, trigger: Option<EdgeTrigger>) -> Result<(), Self::Error> {
        self.record(ComparatorCall::SetTrigger(trigger));
        self.trigger = trigger;
        Ok(())
    }

    fn sample(&mut self) -> Result<bool, Self::Error> {
        self.record(ComparatorCall::Sample);
        if self.enabled {
            Ok(self.output ^ self.config.invert_output)
        } else {
            Ok(self.config.inactive_high)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::newtypes::FilterCount;

    #[test]
    fn test_mock_registers_log_writes() {
        let mut regs = MockRegisterBlock::new().with(0x08, 0x3);
        assert_eq!(regs.read(0x08), 0x3);
        assert!(regs.writes().is_empty());

        regs.write(0x00, 0x1);
        regs.set_bits(0x00, 0x4);
        assert_eq!(regs.read(0x00), 0x5);
        assert_eq!(regs.writes(), &[(0x00, 0x1), (0x00, 0x5)]);
        assert_eq!(regs.writes_to(0x00).count(), 2);
    }

    #[test]
    fn test_mock_comparator() {
        let mut cmp = MockComparator::new();
        assert!(!cmp.is_enabled());
        assert!(!cmp.sample().unwrap());

        cmp.configure(&ComparatorConfig::default()).unwrap();
        cmp.set_output(true);
        assert!(cmp.sample().unwrap());

        let attr = ComparatorAttribute::FilterCount(FilterCount::new(5));
        cmp.set_attribute(attr).unwrap();
        assert_eq!(cmp.attribute(AttributeKind::FilterCount), attr);

        cmp.disable().unwrap();
        assert!(!cmp.sample().unwrap());
        assert_eq!(
            cmp.calls(),
            &[
                ComparatorCall::Sample,
                ComparatorCall::Configure,
                ComparatorCall::Sample,
                ComparatorCall::SetAttribute(attr),
                ComparatorCall::Disable,
                ComparatorCall::Sample,
            ]
        );
    }
}
