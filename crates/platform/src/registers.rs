//! 32-bit memory-mapped register access.
//!
//! Drivers are written against [`RegisterBlock`] so the same code runs on a
//! real peripheral ([`MmioRegisterBlock`]) and against
//! [`MockRegisterBlock`](crate::mocks::MockRegisterBlock) in host tests.
//! Offsets are byte offsets from the block base.

/// A block of 32-bit registers.
pub trait RegisterBlock {
    /// Read the register at `offset`.
    fn read(&self, offset: usize) -> u32;

    /// Write `value` to the register at `offset`.
    fn write(&mut self, offset: usize, value: u32);

    /// Read-modify-write: clear `clear_mask`, then set `set_bits`.
    fn modify(&mut self, offset: usize, clear_mask: u32, set_bits: u32) {
        let value = (self.read(offset) & !clear_mask) | set_bits;
        self.write(offset, value);
    }

    /// Set `bits` in the register at `offset`.
    fn set_bits(&mut self, offset: usize, bits: u32) {
        self.modify(offset, 0, bits);
    }

    /// Clear `bits` in the register at `offset`.
    fn clear_bits(&mut self, offset: usize, bits: u32) {
        self.modify(offset, bits, 0);
    }
}

impl<T: RegisterBlock + ?Sized> RegisterBlock for &mut T {
    fn read(&self, offset: usize) -> u32 {
        T::read(self, offset)
    }

    fn write(&mut self, offset: usize, value: u32) {
        T::write(self, offset, value);
    }
}

/// Volatile access to a peripheral mapped at a fixed address.
#[derive(Debug)]
pub struct MmioRegisterBlock {
    base: usize,
}

impl MmioRegisterBlock {
    /// Wrap the peripheral block starting at `base`.
    ///
    /// # Safety
    ///
    /// `base` must be the 4-byte aligned address of a live peripheral block,
    /// every offset the driver uses must lie inside it, and no other code may
    /// access the block while this value exists.
    #[must_use]
    pub const unsafe fn new(base: usize) -> Self {
        Self { base }
    }

    /// Base address of the block.
    #[must_use]
    pub const fn base(&self) -> usize {
        self.base
    }

    fn ptr(&self, offset: usize) -> *mut u32 {
        self.base.wrapping_add(offset) as *mut u32
    }
}

impl RegisterBlock for MmioRegisterBlock {
    fn read(&self, offset: usize) -> u32 {
        // SAFETY: `new` requires base + offset to address a live, aligned
        // peripheral register.
        unsafe { core::ptr::read_volatile(self.ptr(offset)) }
    }

    fn write(&mut self, offset: usize, value: u32) {
        // SAFETY: as for `read`; `&mut self` makes this the only accessor.
        unsafe { core::ptr::write_volatile(self.ptr(offset), value) }
    }
}
