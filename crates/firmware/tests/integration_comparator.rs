//! Comparator integration tests: the ACMP driver over a mock register block,
//! used through the platform trait and as a digital input.
// Integration test file: expect/unwrap/indexing are intentional test mechanisms.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects
)]
//!
//! Run with: cargo test -p firmware --test integration_comparator

use std::cell::Cell;
use std::rc::Rc;

use platform::RegisterBlock;

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::InputPin;
use embedded_hal_mock::eh1::delay::NoopDelay;
use firmware::comparator::registers as reg;
use firmware::comparator::{Acmp, AcmpError, EdgeEvent, FILTER_SAMPLE_INTERVAL_US};
use platform::mocks::{MockComparator, MockRegisterBlock};
use platform::{
    AnalogComparator, AttributeKind, ComparatorAttribute, ComparatorConfig, ComparatorInput,
    EdgeTrigger, FilterCount,
};

/// Delay that adds up the nanoseconds it was asked to wait.
#[derive(Clone, Default)]
struct TotalDelay {
    ns: Rc<Cell<u64>>,
}

impl DelayNs for TotalDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.ns.set(self.ns.get() + u64::from(ns));
    }
}

/// Works for any comparator: the driver under test and the platform mock.
fn configure_and_read<C: AnalogComparator>(cmp: &mut C) -> Result<bool, C::Error> {
    let config = ComparatorConfig {
        positive: ComparatorInput::from_raw(0x20).expect("APORT input"),
        negative: ComparatorInput::VbDiv,
        ..ComparatorConfig::default()
    };
    cmp.configure(&config)?;
    cmp.set_trigger(Some(EdgeTrigger::Both))?;
    cmp.sample()
}

#[test]
fn test_driver_through_platform_trait() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let regs = MockRegisterBlock::new().with(reg::STATUS, reg::STATUS_ACMPACT);
    let mut acmp = Acmp::new(regs, NoopDelay::new(), &signal);
    assert_eq!(configure_and_read(&mut acmp), Ok(false));
    assert!(AnalogComparator::is_enabled(&acmp));
    assert_eq!(
        acmp.regs().read(reg::CTRL) & (reg::CTRL_IRISE | reg::CTRL_IFALL),
        reg::CTRL_IRISE | reg::CTRL_IFALL
    );
}

#[test]
fn test_mock_through_platform_trait() {
    let mut mock = MockComparator::new();
    mock.set_output(true);
    assert_eq!(configure_and_read(&mut mock), Ok(true));
    assert_eq!(mock.trigger(), Some(EdgeTrigger::Both));
}

#[test]
fn test_filtered_sample_majority_and_spacing() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let regs = MockRegisterBlock::new().with(reg::STATUS, reg::STATUS_ACMPACT | reg::STATUS_ACMPOUT);
    let delay = TotalDelay::default();
    let mut acmp = Acmp::new(regs, delay.clone(), &signal);
    acmp.set_attribute(ComparatorAttribute::FilterCount(FilterCount::new(5)))
        .expect("filter count");
    assert_eq!(acmp.is_high(), Ok(true));
    // Four gaps between five reads
    let interval_ns = u64::from(FILTER_SAMPLE_INTERVAL_US) * 1_000;
    assert_eq!(delay.ns.get(), 4 * interval_ns);

    acmp.regs_mut().preload(reg::STATUS, reg::STATUS_ACMPACT);
    assert_eq!(acmp.is_low(), Ok(true));
    assert_eq!(delay.ns.get(), 8 * interval_ns);
}

#[test]
fn test_filter_count_zero_reads_once() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let regs = MockRegisterBlock::new().with(reg::STATUS, reg::STATUS_ACMPACT | reg::STATUS_ACMPOUT);
    let delay = TotalDelay::default();
    let mut acmp = Acmp::new(regs, delay.clone(), &signal);
    assert_eq!(acmp.sample(), Ok(true));
    assert_eq!(delay.ns.get(), 0);
}

#[test]
fn test_inactive_output_is_an_input_error() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let mut acmp = Acmp::new(MockRegisterBlock::new(), NoopDelay::new(), &signal);
    assert_eq!(acmp.is_high(), Err(AcmpError::NotActive));
}

#[test]
fn test_raw_attribute_round_trip() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let mut acmp = Acmp::new(MockRegisterBlock::new(), NoopDelay::new(), &signal);
    acmp.init(&ComparatorConfig::default()).expect("init");
    acmp.set_attribute_raw(AttributeKind::Accuracy, 1).expect("accuracy");
    assert_ne!(acmp.regs().read(reg::CTRL) & reg::CTRL_ACCURACY, 0);
    acmp.set_attribute_raw(AttributeKind::NegativeInput, 0xFF).expect("vss");
    assert_eq!(
        acmp.attribute(AttributeKind::NegativeInput),
        ComparatorAttribute::NegativeInput(ComparatorInput::Vss)
    );
    assert!(acmp.set_attribute_raw(AttributeKind::PositiveInput, 0xA0).is_err());
}

#[tokio::test]
async fn test_wait_for_edge_after_interrupt() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let regs = MockRegisterBlock::new()
        .with(reg::IF, reg::INT_EDGE)
        .with(reg::STATUS, reg::STATUS_ACMPACT);
    let mut acmp = Acmp::new(regs, NoopDelay::new(), &signal);
    acmp.set_trigger(Some(EdgeTrigger::Falling));
    assert_eq!(acmp.on_interrupt(), reg::INT_EDGE);
    let event = acmp.wait_for_edge().await;
    assert_eq!(event, EdgeEvent { level: false });
}

#[tokio::test]
async fn test_wait_for_edge_from_isr_side() {
    let signal: Signal<NoopRawMutex, EdgeEvent> = Signal::new();
    let acmp = Acmp::new(MockRegisterBlock::new(), NoopDelay::new(), &signal);
    // The ISR owns its own view of the registers.
    let mut isr_regs = MockRegisterBlock::new()
        .with(reg::IF, reg::INT_EDGE)
        .with(reg::STATUS, reg::STATUS_ACMPACT | reg::STATUS_ACMPOUT);
    firmware::comparator::handle_interrupt(&mut isr_regs, &signal);
    assert_eq!(acmp.wait_for_edge().await, EdgeEvent { level: true });
    assert_eq!(isr_regs.writes_to(reg::IFC).collect::<Vec<_>>(), vec![reg::INT_EDGE]);
}
