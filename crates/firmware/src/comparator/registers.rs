//! EFR32 ACMP register map.
//!
//! Byte offsets from the peripheral base, field masks (already shifted into
//! place) and shifts. Only the registers and fields the driver touches are
//! listed.

/// Control register.
pub const CTRL: usize = 0x00;
/// Input selection.
pub const INPUTSEL: usize = 0x04;
/// Status (read only).
pub const STATUS: usize = 0x08;
/// Interrupt flags (read only).
pub const IF: usize = 0x0C;
/// Interrupt flag set.
pub const IFS: usize = 0x10;
/// Interrupt flag clear.
pub const IFC: usize = 0x14;
/// Interrupt enable.
pub const IEN: usize = 0x18;
/// APORT request status (read only).
pub const APORTREQ: usize = 0x20;
/// APORT conflict status (read only).
pub const APORTCONFLICT: usize = 0x24;
/// Hysteresis and VDD dividers while the output is low.
pub const HYSTERESIS0: usize = 0x28;
/// Hysteresis and VDD dividers while the output is high.
pub const HYSTERESIS1: usize = 0x2C;
/// Output pin enable.
pub const ROUTEPEN: usize = 0x40;
/// Output pin location.
pub const ROUTELOC0: usize = 0x44;

// ── CTRL ─────────────────────────────────────────────────────────────────────

pub const CTRL_RESET: u32 = 0x0700_0000;
pub const CTRL_EN: u32 = 0x0000_0001;
pub const CTRL_INACTVAL: u32 = 0x0000_0004;
pub const CTRL_GPIOINV: u32 = 0x0000_0008;
pub const CTRL_PWRSEL_SHIFT: u32 = 12;
pub const CTRL_PWRSEL_MASK: u32 = 0x0000_7000;
pub const CTRL_ACCURACY: u32 = 0x0000_8000;
pub const CTRL_INPUTRANGE_SHIFT: u32 = 18;
pub const CTRL_INPUTRANGE_MASK: u32 = 0x000C_0000;
pub const CTRL_IRISE: u32 = 0x0010_0000;
pub const CTRL_IFALL: u32 = 0x0020_0000;
pub const CTRL_BIASPROG_SHIFT: u32 = 24;
pub const CTRL_BIASPROG_MASK: u32 = 0x3F00_0000;
pub const CTRL_FULLBIAS: u32 = 0x8000_0000;

pub const PWRSEL_AVDD: u32 = 0;
pub const PWRSEL_VREGVDD: u32 = 1;
pub const PWRSEL_IOVDD0: u32 = 2;
pub const PWRSEL_IOVDD1: u32 = 4;

pub const INPUTRANGE_FULL: u32 = 0;
pub const INPUTRANGE_GTVDDDIV2: u32 = 1;
pub const INPUTRANGE_LTVDDDIV2: u32 = 2;

// ── INPUTSEL ─────────────────────────────────────────────────────────────────

pub const INPUTSEL_RESET: u32 = 0;
pub const INPUTSEL_POSSEL_SHIFT: u32 = 0;
pub const INPUTSEL_POSSEL_MASK: u32 = 0x0000_00FF;
pub const INPUTSEL_NEGSEL_SHIFT: u32 = 8;
pub const INPUTSEL_NEGSEL_MASK: u32 = 0x0000_FF00;
pub const INPUTSEL_VASEL_SHIFT: u32 = 16;
pub const INPUTSEL_VASEL_MASK: u32 = 0x003F_0000;
/// Set: VB divider fed from 2.5 V. Clear: 1.25 V.
pub const INPUTSEL_VBSEL: u32 = 0x0040_0000;

// ── STATUS / IF / IEN ────────────────────────────────────────────────────────

/// Comparator is enabled and warmed up.
pub const STATUS_ACMPACT: u32 = 0x1;
/// Comparator output level.
pub const STATUS_ACMPOUT: u32 = 0x2;
pub const STATUS_APORTCONFLICT: u32 = 0x4;

/// Output edge. Same bit in IF, IFS, IFC and IEN.
pub const INT_EDGE: u32 = 0x1;
/// Warm-up complete.
pub const INT_WARMUP: u32 = 0x2;
pub const INT_APORTCONFLICT: u32 = 0x4;
pub const INT_MASK: u32 = 0x7;

// ── HYSTERESIS0 / HYSTERESIS1 ────────────────────────────────────────────────

pub const HYST_RESET: u32 = 0;
pub const HYST_HYST_SHIFT: u32 = 0;
pub const HYST_HYST_MASK: u32 = 0x0000_000F;
pub const HYST_DIVVA_SHIFT: u32 = 16;
pub const HYST_DIVVA_MASK: u32 = 0x003F_0000;
pub const HYST_DIVVB_SHIFT: u32 = 24;
pub const HYST_DIVVB_MASK: u32 = 0x3F00_0000;

// ── Routing ──────────────────────────────────────────────────────────────────

pub const ROUTEPEN_OUTPEN: u32 = 0x1;
pub const ROUTELOC0_OUTLOC_SHIFT: u32 = 0;
pub const ROUTELOC0_OUTLOC_MASK: u32 = 0x1F;

/// Place `value` into the field at `shift`, masked to `mask`.
#[must_use]
pub const fn field(value: u32, shift: u32, mask: u32) -> u32 {
    value.wrapping_shl(shift) & mask
}

/// Extract the field at `shift` from `reg`.
#[must_use]
pub const fn get_field(reg: u32, shift: u32, mask: u32) -> u32 {
    (reg & mask).wrapping_shr(shift)
}
