//! Range-checked comparator parameters.
//!
//! Every analog comparator field that is a bounded integer on the hardware
//! gets a newtype here, so an out-of-range value cannot reach a register.
//! Each type offers [`new`](HysteresisLevel::new) (clamping) and
//! [`try_new`](HysteresisLevel::try_new) (strict).

// ── Error type ───────────────────────────────────────────────────────────────

/// Error returned when a value is out of the valid range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutOfRangeError {
    /// The value that was out of range.
    pub value: u32,
    /// The inclusive minimum allowed value.
    pub min: u32,
    /// The inclusive maximum allowed value.
    pub max: u32,
}

impl core::fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "value {} outside [{}, {}]",
            self.value, self.min, self.max
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OutOfRangeError {}

// ── Bounded newtypes ─────────────────────────────────────────────────────────

macro_rules! bounded_u8 {
    ($(#[$meta:meta])* $name:ident, $max:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        #[repr(transparent)]
        pub struct $name(u8);

        impl $name {
            /// Largest accepted value.
            pub const MAX: u8 = $max;

            /// Create the value, clamping anything above [`Self::MAX`].
            #[must_use]
            pub const fn new(value: u8) -> Self {
                if value > Self::MAX {
                    Self(Self::MAX)
                } else {
                    Self(value)
                }
            }

            /// Create the value, returning an error if it is above [`Self::MAX`].
            ///
            /// # Errors
            ///
            /// Returns [`OutOfRangeError`] if `value > MAX`.
            pub const fn try_new(value: u8) -> Result<Self, OutOfRangeError> {
                if value > Self::MAX {
                    Err(OutOfRangeError {
                        value: value as u32,
                        min: 0,
                        max: Self::MAX as u32,
                    })
                } else {
                    Ok(Self(value))
                }
            }

            /// Return the inner value.
            #[must_use]
            pub const fn get(self) -> u8 {
                self.0
            }
        }

        impl TryFrom<u32> for $name {
            type Error = OutOfRangeError;

            fn try_from(value: u32) -> Result<Self, Self::Error> {
                u8::try_from(value)
                    .ok()
                    .and_then(|v| Self::try_new(v).ok())
                    .ok_or(OutOfRangeError {
                        value,
                        min: 0,
                        max: u32::from(Self::MAX),
                    })
            }
        }
    };
}

bounded_u8!(
    /// Hysteresis level, `0..=15`. Level 0 disables hysteresis.
    HysteresisLevel,
    15
);

bounded_u8!(
    /// VDD scaling divider for the VA/VB comparator inputs, `0..=63`.
    ///
    /// The scaled voltage is `source * (divider + 1) / 64`.
    VddDivider,
    63
);

bounded_u8!(
    /// Bias current programming, `0..=63`. The reset value is 7.
    BiasProgram,
    63
);

bounded_u8!(
    /// Number of output samples the majority filter takes, `0..=7`.
    ///
    /// 0 reads the output once with no filtering.
    FilterCount,
    7
);

bounded_u8!(
    /// Source of the VA divider input, `0..=63`. 0 selects VDD.
    VaSelect,
    63
);

bounded_u8!(
    /// Output pin route location, `0..=31`.
    OutputLocation,
    31
);

bounded_u8!(
    /// Raw analog port (APORT) input selection, `0x00..=0x9F`.
    ///
    /// `0x00`/`0x10` select APORT0X/0Y channels. `0x20`, `0x40`, `0x60` and
    /// `0x80` each start a bus pair (1–4) with 32 channels: X channels first,
    /// then Y.
    AportSelect,
    0x9F
);

impl BiasProgram {
    /// Hardware reset value.
    pub const RESET: Self = Self(7);
}
