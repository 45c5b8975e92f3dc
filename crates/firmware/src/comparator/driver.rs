//! EFR32 analog comparator (ACMP) driver.
//!
//! # Interrupt handling
//!
//! The driver masks the peripheral's interrupt enables (IEN) around every
//! multi-register update, so the ISR never sees a half-written
//! configuration. The ISR calls [`Acmp::on_interrupt`] (or
//! [`handle_interrupt`] when it only owns the register block); an output
//! edge is published on a [`Signal`] that [`Acmp::wait_for_edge`] awaits.
//!
//! # Output filter
//!
//! With a non-zero [`FilterCount`], [`Acmp::sample`] reads the output that
//! many times, [`FILTER_SAMPLE_INTERVAL_US`] apart, and returns the majority
//! level. A tie reads low.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorKind, ErrorType, InputPin};

use platform::{
    Accuracy, AnalogComparator, AttributeKind, ComparatorAttribute, ComparatorConfig,
    EdgeTrigger, FilterCount, InputRange, OutOfRangeError, PowerSource, RegisterBlock,
    VbReference,
};

use super::registers as reg;

/// Delay between filtered output reads.
pub const FILTER_SAMPLE_INTERVAL_US: u32 = 10;

/// Driver errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AcmpError {
    /// The comparator is disabled or still warming up.
    NotActive,
    /// Filter counts go up to 7.
    InvalidFilterCount(u8),
    /// An attribute value outside its range.
    Range(OutOfRangeError),
}

impl core::fmt::Display for AcmpError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NotActive => write!(f, "comparator output not active"),
            Self::InvalidFilterCount(n) => write!(f, "filter count {n} exceeds {}", FilterCount::MAX),
            Self::Range(e) => write!(f, "{e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AcmpError {}

impl From<OutOfRangeError> for AcmpError {
    fn from(e: OutOfRangeError) -> Self {
        Self::Range(e)
    }
}

impl embedded_hal::digital::Error for AcmpError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

/// An output edge seen by the interrupt handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EdgeEvent {
    /// Output level read right after the edge.
    pub level: bool,
}

/// Service the ACMP interrupt: clear the pending flags and publish an edge.
///
/// Returns the flags that were handled.
pub fn handle_interrupt<R, M>(regs: &mut R, signal: &Signal<M, EdgeEvent>) -> u32
where
    R: RegisterBlock,
    M: RawMutex,
{
    let flags = regs.read(reg::IF) & reg::INT_MASK;
    if flags != 0 {
        regs.write(reg::IFC, flags);
    }
    if flags & reg::INT_EDGE != 0 {
        let level = regs.read(reg::STATUS) & reg::STATUS_ACMPOUT != 0;
        signal.signal(EdgeEvent { level });
    }
    flags
}

const fn power_bits(source: PowerSource) -> u32 {
    match source {
        PowerSource::Avdd => reg::PWRSEL_AVDD,
        PowerSource::VregVdd => reg::PWRSEL_VREGVDD,
        PowerSource::IoVdd0 => reg::PWRSEL_IOVDD0,
        PowerSource::IoVdd1 => reg::PWRSEL_IOVDD1,
    }
}

const fn range_bits(range: InputRange) -> u32 {
    match range {
        InputRange::Full => reg::INPUTRANGE_FULL,
        InputRange::AboveHalfVdd => reg::INPUTRANGE_GTVDDDIV2,
        InputRange::BelowHalfVdd => reg::INPUTRANGE_LTVDDDIV2,
    }
}

const fn flag(on: bool, bit: u32) -> u32 {
    if on {
        bit
    } else {
        0
    }
}

const fn trigger_bits(trigger: Option<EdgeTrigger>) -> u32 {
    match trigger {
        Some(t) => {
            let (rise, fall) = t.edges();
            flag(rise, reg::CTRL_IRISE) | flag(fall, reg::CTRL_IFALL)
        }
        None => 0,
    }
}

/// CTRL value for `config`, without EN.
fn ctrl_value(config: &ComparatorConfig, trigger: Option<EdgeTrigger>) -> u32 {
    flag(config.inactive_high, reg::CTRL_INACTVAL)
        | flag(config.invert_output, reg::CTRL_GPIOINV)
        | reg::field(power_bits(config.power_source), reg::CTRL_PWRSEL_SHIFT, reg::CTRL_PWRSEL_MASK)
        | flag(config.accuracy == Accuracy::High, reg::CTRL_ACCURACY)
        | reg::field(range_bits(config.input_range), reg::CTRL_INPUTRANGE_SHIFT, reg::CTRL_INPUTRANGE_MASK)
        | trigger_bits(trigger)
        | reg::field(u32::from(config.bias.get()), reg::CTRL_BIASPROG_SHIFT, reg::CTRL_BIASPROG_MASK)
        | flag(config.full_bias, reg::CTRL_FULLBIAS)
}

fn inputsel_value(config: &ComparatorConfig) -> u32 {
    reg::field(u32::from(config.positive.raw()), reg::INPUTSEL_POSSEL_SHIFT, reg::INPUTSEL_POSSEL_MASK)
        | reg::field(u32::from(config.negative.raw()), reg::INPUTSEL_NEGSEL_SHIFT, reg::INPUTSEL_NEGSEL_MASK)
        | reg::field(u32::from(config.va_select.get()), reg::INPUTSEL_VASEL_SHIFT, reg::INPUTSEL_VASEL_MASK)
        | flag(config.vb_reference == VbReference::V2_5, reg::INPUTSEL_VBSEL)
}

/// HYSTERESISn value. Both registers carry the same VDD dividers.
fn hysteresis_value(config: &ComparatorConfig, level: u8) -> u32 {
    reg::field(u32::from(level), reg::HYST_HYST_SHIFT, reg::HYST_HYST_MASK)
        | reg::field(u32::from(config.va_divider.get()), reg::HYST_DIVVA_SHIFT, reg::HYST_DIVVA_MASK)
        | reg::field(u32::from(config.vb_divider.get()), reg::HYST_DIVVB_SHIFT, reg::HYST_DIVVB_MASK)
}

/// EFR32 ACMP driver over a register block.
///
/// `'s` is the lifetime of the edge signal shared with the interrupt handler.
pub struct Acmp<'s, R, D, M>
where
    R: RegisterBlock,
    D: DelayNs,
    M: RawMutex,
{
    regs: R,
    delay: D,
    edge: &'s Signal<M, EdgeEvent>,
    config: ComparatorConfig,
    trigger: Option<EdgeTrigger>,
}

impl<'s, R, D, M> Acmp<'s, R, D, M>
where
    R: RegisterBlock,
    D: DelayNs,
    M: RawMutex,
{
    /// Wrap a register block. Nothing is written until [`init`](Self::init).
    pub fn new(regs: R, delay: D, edge: &'s Signal<M, EdgeEvent>) -> Self {
        Self {
            regs,
            delay,
            edge,
            config: ComparatorConfig::default(),
            trigger: None,
        }
    }

    /// The register block, e.g. to inspect a mock.
    pub fn regs(&self) -> &R {
        &self.regs
    }

    /// Mutable register block access.
    pub fn regs_mut(&mut self) -> &mut R {
        &mut self.regs
    }

    /// Configuration last applied.
    pub fn config(&self) -> &ComparatorConfig {
        &self.config
    }

    /// Run `f` with IEN cleared, then restore it.
    fn masked<T>(&mut self, f: impl FnOnce(&mut R) -> T) -> T {
        let ien = self.regs.read(reg::IEN);
        self.regs.write(reg::IEN, 0);
        let out = f(&mut self.regs);
        self.regs.write(reg::IEN, ien);
        out
    }

    /// Apply `config` and enable the comparator.
    pub fn init(&mut self, config: &ComparatorConfig) -> Result<(), AcmpError> {
        let ctrl = ctrl_value(config, self.trigger);
        let inputsel = inputsel_value(config);
        let hyst0 = hysteresis_value(config, config.hysteresis_low.get());
        let hyst1 = hysteresis_value(config, config.hysteresis_high.get());

        self.masked(|regs| {
            regs.write(reg::CTRL, ctrl);
            regs.write(reg::INPUTSEL, inputsel);
            regs.write(reg::HYSTERESIS0, hyst0);
            regs.write(reg::HYSTERESIS1, hyst1);
            match config.output_location {
                Some(loc) => {
                    let outloc = reg::field(
                        u32::from(loc.get()),
                        reg::ROUTELOC0_OUTLOC_SHIFT,
                        reg::ROUTELOC0_OUTLOC_MASK,
                    );
                    regs.write(reg::ROUTELOC0, outloc);
                    regs.write(reg::ROUTEPEN, reg::ROUTEPEN_OUTPEN);
                }
                None => regs.write(reg::ROUTEPEN, 0),
            }
            regs.write(reg::IFC, reg::INT_MASK);
            regs.set_bits(reg::CTRL, reg::CTRL_EN);
        });
        self.config = *config;

        #[cfg(feature = "defmt")]
        defmt::debug!("acmp: init ctrl={=u32:#x} inputsel={=u32:#x}", ctrl, inputsel);
        Ok(())
    }

    pub fn enable(&mut self) {
        self.regs.set_bits(reg::CTRL, reg::CTRL_EN);
    }

    pub fn disable(&mut self) {
        self.regs.clear_bits(reg::CTRL, reg::CTRL_EN);
    }

    pub fn is_enabled(&self) -> bool {
        self.regs.read(reg::CTRL) & reg::CTRL_EN != 0
    }

    /// Change one attribute while the comparator runs.
    pub fn set_attribute(&mut self, attr: ComparatorAttribute) -> Result<(), AcmpError> {
        let mut next = self.config;
        next.apply(attr);
        match attr {
            ComparatorAttribute::PositiveInput(input) => self.masked(|regs| {
                regs.modify(
                    reg::INPUTSEL,
                    reg::INPUTSEL_POSSEL_MASK,
                    reg::field(u32::from(input.raw()), reg::INPUTSEL_POSSEL_SHIFT, reg::INPUTSEL_POSSEL_MASK),
                );
            }),
            ComparatorAttribute::NegativeInput(input) => self.masked(|regs| {
                regs.modify(
                    reg::INPUTSEL,
                    reg::INPUTSEL_NEGSEL_MASK,
                    reg::field(u32::from(input.raw()), reg::INPUTSEL_NEGSEL_SHIFT, reg::INPUTSEL_NEGSEL_MASK),
                );
            }),
            ComparatorAttribute::HysteresisLow(level) => self.masked(|regs| {
                regs.modify(
                    reg::HYSTERESIS0,
                    reg::HYST_HYST_MASK,
                    reg::field(u32::from(level.get()), reg::HYST_HYST_SHIFT, reg::HYST_HYST_MASK),
                );
            }),
            ComparatorAttribute::HysteresisHigh(level) => self.masked(|regs| {
                regs.modify(
                    reg::HYSTERESIS1,
                    reg::HYST_HYST_MASK,
                    reg::field(u32::from(level.get()), reg::HYST_HYST_SHIFT, reg::HYST_HYST_MASK),
                );
            }),
            ComparatorAttribute::VaDivider(div) => self.masked(|regs| {
                let bits = reg::field(u32::from(div.get()), reg::HYST_DIVVA_SHIFT, reg::HYST_DIVVA_MASK);
                regs.modify(reg::HYSTERESIS0, reg::HYST_DIVVA_MASK, bits);
                regs.modify(reg::HYSTERESIS1, reg::HYST_DIVVA_MASK, bits);
            }),
            ComparatorAttribute::VbDivider(div) => self.masked(|regs| {
                let bits = reg::field(u32::from(div.get()), reg::HYST_DIVVB_SHIFT, reg::HYST_DIVVB_MASK);
                regs.modify(reg::HYSTERESIS0, reg::HYST_DIVVB_MASK, bits);
                regs.modify(reg::HYSTERESIS1, reg::HYST_DIVVB_MASK, bits);
            }),
            ComparatorAttribute::VbReference(vb) => self.masked(|regs| {
                regs.modify(
                    reg::INPUTSEL,
                    reg::INPUTSEL_VBSEL,
                    flag(vb == VbReference::V2_5, reg::INPUTSEL_VBSEL),
                );
            }),
            ComparatorAttribute::Accuracy(acc) => self.masked(|regs| {
                regs.modify(
                    reg::CTRL,
                    reg::CTRL_ACCURACY,
                    flag(acc == Accuracy::High, reg::CTRL_ACCURACY),
                );
            }),
            // Driver-side only: no register holds it.
            ComparatorAttribute::FilterCount(_) => {}
        }
        self.config = next;
        Ok(())
    }

    /// [`set_attribute`](Self::set_attribute) from a raw integer.
    pub fn set_attribute_raw(&mut self, kind: AttributeKind, raw: u32) -> Result<(), AcmpError> {
        if kind == AttributeKind::FilterCount && raw > u32::from(FilterCount::MAX) {
            let shown = u8::try_from(raw).unwrap_or(u8::MAX);
            #[cfg(feature = "defmt")]
            defmt::warn!("acmp: filter count {=u32} out of range", raw);
            return Err(AcmpError::InvalidFilterCount(shown));
        }
        let attr = ComparatorAttribute::from_raw(kind, raw)?;
        self.set_attribute(attr)
    }

    /// Current value of one attribute, from the cached configuration.
    pub fn attribute(&self, kind: AttributeKind) -> ComparatorAttribute {
        self.config.attribute(kind)
    }

    /// Select which edges raise the edge interrupt. `None` disables it.
    pub fn set_trigger(&mut self, trigger: Option<EdgeTrigger>) {
        self.regs.modify(
            reg::CTRL,
            reg::CTRL_IRISE | reg::CTRL_IFALL,
            trigger_bits(trigger),
        );
        self.regs.write(reg::IFC, reg::INT_EDGE);
        if trigger.is_some() {
            self.regs.set_bits(reg::IEN, reg::INT_EDGE);
        } else {
            self.regs.clear_bits(reg::IEN, reg::INT_EDGE);
        }
        self.trigger = trigger;
    }

    pub fn trigger(&self) -> Option<EdgeTrigger> {
        self.trigger
    }

    /// Interrupt entry point. Returns the flags that were handled.
    pub fn on_interrupt(&mut self) -> u32 {
        handle_interrupt(&mut self.regs, self.edge)
    }

    /// Wait for the next output edge.
    pub async fn wait_for_edge(&self) -> EdgeEvent {
        self.edge.wait().await
    }

    /// Whether another peripheral holds an APORT bus this comparator wants.
    pub fn aport_conflict(&self) -> bool {
        self.regs.read(reg::STATUS) & reg::STATUS_APORTCONFLICT != 0
    }

    fn output(&self) -> Result<bool, AcmpError> {
        let status = self.regs.read(reg::STATUS);
        if status & reg::STATUS_ACMPACT == 0 {
            return Err(AcmpError::NotActive);
        }
        Ok(status & reg::STATUS_ACMPOUT != 0)
    }

    /// Output level, majority-filtered over the configured filter count.
    pub fn sample(&mut self) -> Result<bool, AcmpError> {
        let count = self.config.filter_count.get();
        if count == 0 {
            return self.output();
        }
        let mut high = 0u8;
        for i in 0..count {
            if i > 0 {
                self.delay.delay_us(FILTER_SAMPLE_INTERVAL_US);
            }
            if self.output()? {
                high = high.saturating_add(1);
            }
        }
        Ok(high.saturating_mul(2) > count)
    }
}

impl<R, D, M> AnalogComparator for Acmp<'_, R, D, M>
where
    R: RegisterBlock,
    D: DelayNs,
    M: RawMutex,
{
    type Error = AcmpError;

    fn configure(&mut self, config: &ComparatorConfig) -> Result<(), Self::Error> {
        self.init(config)
    }

    fn enable(&mut self) -> Result<(), Self::Error> {
        Acmp::enable(self);
        Ok(())
    }

    fn disable(&mut self) -> Result<(), Self::Error> {
        Acmp::disable(self);
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        Acmp::is_enabled(self)
    }

    fn set_attribute(&mut self, attr: ComparatorAttribute) -> Result<(), Self::Error> {
        Acmp::set_attribute(self, attr)
    }

    fn attribute(&self, kind: AttributeKind) -> ComparatorAttribute {
        Acmp::attribute(self, kind)
    }

    fn set_trigger(&mut self, trigger: Option<EdgeTrigger>) -> Result<(), Self::Error> {
        Acmp::set_trigger(self, trigger);
        Ok(())
    }

    fn sample(&mut self) -> Result<bool, Self::Error> {
        Acmp::sample(self)
    }
}

impl<R, D, M> ErrorType for Acmp<'_, R, D, M>
where
    R: RegisterBlock,
    D: DelayNs,
    M: RawMutex,
{
    type Error = AcmpError;
}

impl<R, D, M> InputPin for Acmp<'_, R, D, M>
where
    R: RegisterBlock,
    D: DelayNs,
    M: RawMutex,
{
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        self.sample()
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.sample().map(|level| !level)
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use embedded_hal_mock::eh1::delay::NoopDelay;
    use platform::mocks::MockRegisterBlock;
    use platform::{ComparatorInput, HysteresisLevel, OutputLocation, VddDivider};

    type TestAcmp<'s> = Acmp<'s, MockRegisterBlock, NoopDelay, NoopRawMutex>;

    fn acmp(signal: &Signal<NoopRawMutex, EdgeEvent>) -> TestAcmp<'_> {
        Acmp::new(MockRegisterBlock::new(), NoopDelay::new(), signal)
    }

    #[test]
    fn test_default_config_ctrl_is_reset_plus_en() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.init(&ComparatorConfig::default()).expect("init");
        assert_eq!(acmp.regs().read(reg::CTRL), reg::CTRL_RESET | reg::CTRL_EN);
        assert_eq!(acmp.regs().read(reg::INPUTSEL), reg::INPUTSEL_RESET);
        assert!(acmp.is_enabled());
    }

    #[test]
    fn test_init_write_order() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.regs_mut().preload(reg::IEN, reg::INT_EDGE);
        let config = ComparatorConfig {
            negative: ComparatorInput::VbDiv,
            hysteresis_low: HysteresisLevel::new(3),
            hysteresis_high: HysteresisLevel::new(5),
            vb_divider: VddDivider::new(0x20),
            output_location: Some(OutputLocation::new(4)),
            ..ComparatorConfig::default()
        };
        acmp.init(&config).expect("init");

        let offsets: Vec<usize> = acmp.regs().writes().iter().map(|(o, _)| *o).collect();
        assert_eq!(
            offsets,
            vec![
                reg::IEN,
                reg::CTRL,
                reg::INPUTSEL,
                reg::HYSTERESIS0,
                reg::HYSTERESIS1,
                reg::ROUTELOC0,
                reg::ROUTEPEN,
                reg::IFC,
                reg::CTRL,
                reg::IEN,
            ]
        );
        let writes = acmp.regs().writes();
        assert_eq!(writes[0].1, 0);
        assert_eq!(writes[1].1 & reg::CTRL_EN, 0);
        assert_eq!(writes[2].1, 0xFC00);
        assert_eq!(writes[3].1, 0x2000_0003);
        assert_eq!(writes[4].1, 0x2000_0005);
        assert_eq!(writes[5].1, 4);
        assert_eq!(writes[9].1, reg::INT_EDGE);
    }

    #[test]
    fn test_set_attribute_masks_interrupts() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.init(&ComparatorConfig::default()).expect("init");
        acmp.regs_mut().preload(reg::IEN, reg::INT_EDGE);
        acmp.regs_mut().clear_writes();

        acmp.set_attribute(ComparatorAttribute::PositiveInput(ComparatorInput::Vdd))
            .expect("set");
        let writes = acmp.regs().writes();
        assert_eq!(writes.len(), 3);
        assert_eq!(writes[0], (reg::IEN, 0));
        assert_eq!(writes[1], (reg::INPUTSEL, 0xFE));
        assert_eq!(writes[2], (reg::IEN, reg::INT_EDGE));
        assert_eq!(
            acmp.attribute(AttributeKind::PositiveInput),
            ComparatorAttribute::PositiveInput(ComparatorInput::Vdd)
        );
    }

    #[test]
    fn test_dividers_written_to_both_hysteresis_registers() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.init(&ComparatorConfig::default()).expect("init");
        acmp.set_attribute(ComparatorAttribute::VaDivider(VddDivider::new(63)))
            .expect("set");
        assert_eq!(acmp.regs().read(reg::HYSTERESIS0), reg::HYST_DIVVA_MASK);
        assert_eq!(acmp.regs().read(reg::HYSTERESIS1), reg::HYST_DIVVA_MASK);
    }

    #[test]
    fn test_filter_count_above_seven_rejected() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        assert_eq!(
            acmp.set_attribute_raw(AttributeKind::FilterCount, 8),
            Err(AcmpError::InvalidFilterCount(8))
        );
        assert_eq!(
            acmp.set_attribute_raw(AttributeKind::FilterCount, 1000),
            Err(AcmpError::InvalidFilterCount(u8::MAX))
        );
        acmp.set_attribute_raw(AttributeKind::FilterCount, 7).expect("7 is fine");
        assert_eq!(acmp.config().filter_count.get(), 7);
    }

    #[test]
    fn test_raw_hysteresis_out_of_range() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        assert!(matches!(
            acmp.set_attribute_raw(AttributeKind::HysteresisLow, 16),
            Err(AcmpError::Range(_))
        ));
    }

    #[test]
    fn test_sample_requires_active_output() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        assert_eq!(acmp.sample(), Err(AcmpError::NotActive));
        acmp.regs_mut().preload(reg::STATUS, reg::STATUS_ACMPACT | reg::STATUS_ACMPOUT);
        assert_eq!(acmp.sample(), Ok(true));
        assert_eq!(acmp.is_low(), Ok(false));
    }

    #[test]
    fn test_set_trigger() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.set_trigger(Some(EdgeTrigger::Falling));
        let ctrl = acmp.regs().read(reg::CTRL);
        assert_eq!(ctrl & (reg::CTRL_IRISE | reg::CTRL_IFALL), reg::CTRL_IFALL);
        assert_eq!(acmp.regs().read(reg::IEN), reg::INT_EDGE);
        assert_eq!(acmp.regs().writes_to(reg::IFC).collect::<Vec<_>>(), vec![reg::INT_EDGE]);

        acmp.set_trigger(None);
        assert_eq!(acmp.regs().read(reg::CTRL) & (reg::CTRL_IRISE | reg::CTRL_IFALL), 0);
        assert_eq!(acmp.regs().read(reg::IEN), 0);
    }

    #[test]
    fn test_interrupt_clears_flags_and_signals() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.regs_mut().preload(reg::IF, reg::INT_EDGE | reg::INT_WARMUP);
        acmp.regs_mut().preload(reg::STATUS, reg::STATUS_ACMPACT | reg::STATUS_ACMPOUT);
        assert_eq!(acmp.on_interrupt(), reg::INT_EDGE | reg::INT_WARMUP);
        assert_eq!(
            acmp.regs().writes_to(reg::IFC).collect::<Vec<_>>(),
            vec![reg::INT_EDGE | reg::INT_WARMUP]
        );
        assert_eq!(signal.try_take(), Some(EdgeEvent { level: true }));
    }

    #[test]
    fn test_interrupt_without_edge_does_not_signal() {
        let signal = Signal::new();
        let mut acmp = acmp(&signal);
        acmp.regs_mut().preload(reg::IF, reg::INT_APORTCONFLICT);
        acmp.on_interrupt();
        assert!(!signal.signaled());
    }
}
