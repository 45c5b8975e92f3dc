//! Analog comparator abstraction.
//!
//! An analog comparator compares two selectable inputs and drives a digital
//! output: high when the positive input is above the negative one. Around that
//! core sit hysteresis, VDD scaling dividers, a bias/power trade-off and edge
//! interrupts.
//!
//! The types here describe a comparator configuration independently of any
//! register layout; concrete drivers (see the `firmware` crate) translate them
//! into register writes.

use crate::newtypes::{
    AportSelect, BiasProgram, FilterCount, HysteresisLevel, OutOfRangeError, OutputLocation,
    VaSelect, VddDivider,
};

// ── Inputs ───────────────────────────────────────────────────────────────────

/// One comparator input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComparatorInput {
    /// A pin routed through the analog port bus.
    Aport(AportSelect),
    /// Low-power reference.
    Vlp,
    /// Scaled VB reference (see [`VbReference`]).
    VbDiv,
    /// Scaled VA source (see [`VaSelect`]).
    VaDiv,
    /// Supply voltage.
    Vdd,
    /// Ground.
    Vss,
}

impl ComparatorInput {
    /// Raw input select value.
    #[must_use]
    pub const fn raw(self) -> u8 {
        match self {
            Self::Aport(sel) => sel.get(),
            Self::Vlp => 0xFB,
            Self::VbDiv => 0xFC,
            Self::VaDiv => 0xFD,
            Self::Vdd => 0xFE,
            Self::Vss => 0xFF,
        }
    }

    /// Decode a raw input select value.
    ///
    /// # Errors
    ///
    /// Values between the APORT range and the named inputs
    /// (`0xA0..=0xFA`) are rejected.
    pub const fn from_raw(raw: u8) -> Result<Self, OutOfRangeError> {
        match raw {
            0xFB => Ok(Self::Vlp),
            0xFC => Ok(Self::VbDiv),
            0xFD => Ok(Self::VaDiv),
            0xFE => Ok(Self::Vdd),
            0xFF => Ok(Self::Vss),
            _ => match AportSelect::try_new(raw) {
                Ok(sel) => Ok(Self::Aport(sel)),
                Err(e) => Err(e),
            },
        }
    }
}

impl Default for ComparatorInput {
    fn default() -> Self {
        Self::Aport(AportSelect::default())
    }
}

// ── Enumerated settings ──────────────────────────────────────────────────────

/// Supply powering the comparator core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PowerSource {
    #[default]
    Avdd,
    VregVdd,
    IoVdd0,
    IoVdd1,
}

/// Input voltage range the comparator is optimised for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputRange {
    #[default]
    Full,
    /// Inputs always above VDD/2.
    AboveHalfVdd,
    /// Inputs always below VDD/2.
    BelowHalfVdd,
}

/// Accuracy mode. High accuracy costs current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Accuracy {
    #[default]
    Low,
    High,
}

/// Bandgap reference feeding the VB divider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VbReference {
    #[default]
    V1_25,
    V2_5,
}

/// Output edges that raise the edge interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeTrigger {
    Rising,
    Falling,
    Both,
}

impl EdgeTrigger {
    /// `(rising, falling)` enables for this trigger.
    #[must_use]
    pub const fn edges(self) -> (bool, bool) {
        match self {
            Self::Rising => (true, false),
            Self::Falling => (false, true),
            Self::Both => (true, true),
        }
    }
}

// ── Configuration ────────────────────────────────────────────────────────────

/// Complete comparator configuration.
///
/// `Default` matches the hardware reset state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ComparatorConfig {
    pub positive: ComparatorInput,
    pub negative: ComparatorInput,
    /// Hysteresis applied while the output is low.
    pub hysteresis_low: HysteresisLevel,
    /// Hysteresis applied while the output is high.
    pub hysteresis_high: HysteresisLevel,
    pub va_divider: VddDivider,
    pub vb_divider: VddDivider,
    pub va_select: VaSelect,
    pub vb_reference: VbReference,
    pub power_source: PowerSource,
    pub accuracy: Accuracy,
    pub input_range: InputRange,
    pub bias: BiasProgram,
    pub full_bias: bool,
    /// Output level reported while the comparator is disabled or warming up.
    pub inactive_high: bool,
    /// Invert the output before it reaches the pin.
    pub invert_output: bool,
    /// Route the output to a pin. `None` leaves it internal.
    pub output_location: Option<OutputLocation>,
    pub filter_count: FilterCount,
}

impl Default for ComparatorConfig {
    fn default() -> Self {
        Self {
            positive: ComparatorInput::default(),
            negative: ComparatorInput::default(),
            hysteresis_low: HysteresisLevel::default(),
            hysteresis_high: HysteresisLevel::default(),
            va_divider: VddDivider::default(),
            vb_divider: VddDivider::default(),
            va_select: VaSelect::default(),
            vb_reference: VbReference::default(),
            power_source: PowerSource::default(),
            accuracy: Accuracy::default(),
            input_range: InputRange::default(),
            bias: BiasProgram::RESET,
            full_bias: false,
            inactive_high: false,
            invert_output: false,
            output_location: None,
            filter_count: FilterCount::default(),
        }
    }
}

impl ComparatorConfig {
    /// Current value of one runtime attribute.
    #[must_use]
    pub const fn attribute(&self, kind: AttributeKind) -> ComparatorAttribute {
        match kind {
            AttributeKind::PositiveInput => ComparatorAttribute::PositiveInput(self.positive),
            AttributeKind::NegativeInput => ComparatorAttribute::NegativeInput(self.negative),
            AttributeKind::HysteresisLow => ComparatorAttribute::HysteresisLow(self.hysteresis_low),
            AttributeKind::HysteresisHigh => {
                ComparatorAttribute::HysteresisHigh(self.hysteresis_high)
            }
            AttributeKind::VaDivider => ComparatorAttribute::VaDivider(self.va_divider),
            AttributeKind::VbDivider => ComparatorAttribute::VbDivider(self.vb_divider),
            AttributeKind::VbReference => ComparatorAttribute::VbReference(self.vb_reference),
            AttributeKind::Accuracy => ComparatorAttribute::Accuracy(self.accuracy),
            AttributeKind::FilterCount => ComparatorAttribute::FilterCount(self.filter_count),
        }
    }

    /// Store one runtime attribute.
    pub fn apply(&mut self, attr: ComparatorAttribute) {
        match attr {
            ComparatorAttribute::PositiveInput(v) => self.positive = v,
            ComparatorAttribute::NegativeInput(v) => self.negative = v,
            ComparatorAttribute::HysteresisLow(v) => self.hysteresis_low = v,
            ComparatorAttribute::HysteresisHigh(v) => self.hysteresis_high = v,
            ComparatorAttribute::VaDivider(v) => self.va_divider = v,
            ComparatorAttribute::VbDivider(v) => self.vb_divider = v,
            ComparatorAttribute::VbReference(v) => self.vb_reference = v,
            ComparatorAttribute::Accuracy(v) => self.accuracy = v,
            ComparatorAttribute::FilterCount(v) => self.filter_count = v,
        }
    }
}

// ── Runtime attributes ───────────────────────────────────────────────────────

/// A setting that may change while the comparator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ComparatorAttribute {
    PositiveInput(ComparatorInput),
    NegativeInput(ComparatorInput),
    HysteresisLow(HysteresisLevel),
    HysteresisHigh(HysteresisLevel),
    VaDivider(VddDivider),
    VbDivider(VddDivider),
    VbReference(VbReference),
    Accuracy(Accuracy),
    FilterCount(FilterCount),
}

/// Selects a [`ComparatorAttribute`] to read back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AttributeKind {
    PositiveInput,
    NegativeInput,
    HysteresisLow,
    HysteresisHigh,
    VaDivider,
    VbDivider,
    VbReference,
    Accuracy,
    FilterCount,
}

impl ComparatorAttribute {
    /// Which attribute this value sets.
    #[must_use]
    pub const fn kind(&self) -> AttributeKind {
        match self {
            Self::PositiveInput(_) => AttributeKind::PositiveInput,
            Self::NegativeInput(_) => AttributeKind::NegativeInput,
            Self::HysteresisLow(_) => AttributeKind::HysteresisLow,
            Self::HysteresisHigh(_) => AttributeKind::HysteresisHigh,
            Self::VaDivider(_) => AttributeKind::VaDivider,
            Self::VbDivider(_) => AttributeKind::VbDivider,
            Self::VbReference(_) => AttributeKind::VbReference,
            Self::Accuracy(_) => AttributeKind::Accuracy,
            Self::FilterCount(_) => AttributeKind::FilterCount,
        }
    }

    /// Build an attribute from a raw integer, as received over a shell or
    /// device-tree style interface.
    ///
    /// Booleans and enums use their index (`VbReference`: 0 = 1.25 V,
    /// 1 = 2.5 V; `Accuracy`: 0 = low, 1 = high).
    ///
    /// # Errors
    ///
    /// Returns [`OutOfRangeError`] if `raw` is outside the attribute's range.
    pub fn from_raw(kind: AttributeKind, raw: u32) -> Result<Self, OutOfRangeError> {
        let input = |raw: u32| {
            u8::try_from(raw)
                .map_err(|_| OutOfRangeError {
                    value: raw,
                    min: 0,
                    max: 0xFF,
                })
                .and_then(ComparatorInput::from_raw)
        };
        let flag = |raw: u32| match raw {
            0 => Ok(false),
            1 => Ok(true),
            _ => Err(OutOfRangeError {
                value: raw,
                min: 0,
                max: 1,
            }),
        };
        Ok(match kind {
            AttributeKind::PositiveInput => Self::PositiveInput(input(raw)?),
            AttributeKind::NegativeInput => Self::NegativeInput(input(raw)?),
            AttributeKind::HysteresisLow => Self::HysteresisLow(raw.try_into()?),
            AttributeKind::HysteresisHigh => Self::HysteresisHigh(raw.try_into()?),
            AttributeKind::VaDivider => Self::VaDivider(raw.try_into()?),
            AttributeKind::VbDivider => Self::VbDivider(raw.try_into()?),
            AttributeKind::VbReference => Self::VbReference(if flag(raw)? {
                VbReference::V2_5
            } else {
                VbReference::V1_25
            }),
            AttributeKind::Accuracy => Self::Accuracy(if flag(raw)? {
                Accuracy::High
            } else {
                Accuracy::Low
            }),
            AttributeKind::FilterCount => Self::FilterCount(raw.try_into()?),
        })
    }
}

// ── Driver trait ─────────────────────────────────────────────────────────────

/// Analog comparator driver.
pub trait AnalogComparator {
    /// Error type
    type Error;

    /// Apply a complete configuration and enable the comparator.
    fn configure(&mut self, config: &ComparatorConfig) -> Result<(), Self::Error>;

    /// Enable the comparator with its current configuration.
    fn enable(&mut self) -> Result<(), Self::Error>;

    /// Disable the comparator. The output reads as the inactive value.
    fn disable(&mut self) -> Result<(), Self::Error>;

    /// Whether the comparator is enabled.
    fn is_enabled(&self) -> bool;

    /// Change one attribute while running.
    fn set_attribute(&mut self, attr: ComparatorAttribute) -> Result<(), Self::Error>;

    /// Read back one attribute.
    fn attribute(&self, kind: AttributeKind) -> ComparatorAttribute;

    /// Select which output edges raise the edge interrupt. `None` disables it.
    fn set_trigger(&mut self, trigger: Option<EdgeTrigger>) -> Result<(), Self::Error>;

    /// Output level, filtered according to the configured filter count.
    fn sample(&mut self) -> Result<bool, Self::Error>;
}
