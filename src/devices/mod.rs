//! Range-mapped address space for the 6502 emulator.
//!
//! This module provides the memory mapping architecture that lets independent
//! hardware regions (RAM, the sound chip's register file) share the 6502 bus.
//!
//! # Architecture
//!
//! - **Device trait**: Abstract interface for memory-mapped hardware components
//! - **AddressSpace**: Routes read/write operations to attached regions by
//!   inclusive address range
//! - **Device implementations**: RAM here; chip register sinks live in the
//!   crates that need them
//!
//! # Example
//!
//! ```rust
//! use sid6502::{AddressSpace, MemoryBus, RamDevice, CPU};
//!
//! let mut memory = AddressSpace::new();
//!
//! // 16KB RAM at 0x0000-0x3FFF
//! memory
//!     .attach("ram", 0x0000, 0x3FFF, Box::new(RamDevice::new(0x4000)))
//!     .unwrap();
//!
//! memory.write(0x1234, 0x42);
//! assert_eq!(memory.read(0x1234), 0x42);
//!
//! // Unmapped addresses read as zero
//! assert_eq!(memory.read(0x8000), 0x00);
//!
//! let cpu = CPU::new(memory);
//! ```

use crate::MemoryBus;
use std::any::Any;

pub mod ram;

pub use ram::RamDevice;

/// Abstract interface for memory-mapped hardware devices.
///
/// The address space calls these methods with an offset relative to the
/// start of the region the device was attached at, so a device never needs
/// to know where it lives on the bus.
///
/// `as_any`/`as_any_mut` allow the owner of an `AddressSpace` to recover the
/// concrete device type behind a `RegionId` (for example to read the sound
/// chip's latched registers at the end of a frame).
///
/// # Examples
///
/// ```rust
/// use sid6502::Device;
/// use std::any::Any;
///
/// struct Latch {
///     value: u8,
/// }
///
/// impl Device for Latch {
///     fn read(&self, _offset: u16) -> u8 {
///         self.value
///     }
///
///     fn write(&mut self, _offset: u16, value: u8) {
///         self.value = value;
///     }
///
///     fn as_any(&self) -> &dyn Any {
///         self
///     }
///
///     fn as_any_mut(&mut self) -> &mut dyn Any {
///         self
///     }
/// }
/// ```
pub trait Device {
    /// Read byte from device at offset relative to the region start.
    fn read(&self, offset: u16) -> u8;

    /// Write byte to device at offset relative to the region start.
    fn write(&mut self, offset: u16, value: u8);

    /// Upcast for typed access through [`AddressSpace::region`].
    fn as_any(&self) -> &dyn Any;

    /// Mutable upcast for typed access through [`AddressSpace::region_mut`].
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Handle to a region returned by [`AddressSpace::attach`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RegionId(usize);

/// Internal mapping of a device to an inclusive address range.
struct Region {
    name: String,
    start: u16,
    end: u16,
    device: Box<dyn Device>,
}

impl Region {
    fn contains(&self, addr: u16) -> bool {
        self.start <= addr && addr <= self.end
    }
}

/// Error returned when a region cannot be attached.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AttachError {
    /// The region's end address lies below its start address.
    #[error("region '{name}' has inverted range ${start:04X}-${end:04X}")]
    InvertedRange {
        /// Region name
        name: String,
        /// Requested first address
        start: u16,
        /// Requested last address
        end: u16,
    },
}

/// Sparse address space that routes accesses to attached regions.
///
/// # Address Routing
///
/// When the CPU reads or writes an address:
/// 1. Regions are scanned in attachment order
/// 2. The first region whose `[start, end]` contains the address wins
/// 3. The device is called with `addr - start`
/// 4. If no region matches, reads return 0 and writes are dropped
///
/// Overlapping regions are allowed; attaching a small chip region before a
/// full-size RAM region is how the chip's registers shadow RAM.
pub struct AddressSpace {
    regions: Vec<Region>,
}

impl AddressSpace {
    /// Value returned for reads of unmapped addresses.
    pub const UNMAPPED_VALUE: u8 = 0x00;

    /// Create a new empty address space.
    pub fn new() -> Self {
        Self {
            regions: Vec::new(),
        }
    }

    /// Attach a device covering the inclusive range `start..=end`.
    ///
    /// # Errors
    ///
    /// Returns `AttachError::InvertedRange` if `end < start`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sid6502::{AddressSpace, RamDevice};
    ///
    /// let mut memory = AddressSpace::new();
    /// let ram = memory
    ///     .attach("ram", 0x0000, 0xFFFF, Box::new(RamDevice::new(0x10000)))
    ///     .unwrap();
    ///
    /// assert!(memory.region::<RamDevice>(ram).is_some());
    /// assert!(memory.attach("bad", 0x2000, 0x1000, Box::new(RamDevice::new(1))).is_err());
    /// ```
    pub fn attach(
        &mut self,
        name: &str,
        start: u16,
        end: u16,
        device: Box<dyn Device>,
    ) -> Result<RegionId, AttachError> {
        if end < start {
            return Err(AttachError::InvertedRange {
                name: name.to_string(),
                start,
                end,
            });
        }

        for existing in &self.regions {
            if start <= existing.end && existing.start <= end {
                log::debug!(
                    "region '{}' ${:04X}-${:04X} overlaps '{}' ${:04X}-${:04X}; '{}' takes precedence",
                    name,
                    start,
                    end,
                    existing.name,
                    existing.start,
                    existing.end,
                    existing.name
                );
            }
        }

        log::debug!("attached region '{}' at ${:04X}-${:04X}", name, start, end);
        self.regions.push(Region {
            name: name.to_string(),
            start,
            end,
            device,
        });
        Ok(RegionId(self.regions.len() - 1))
    }

    /// Borrow the device behind `id` as its concrete type.
    ///
    /// Returns `None` if the handle is unknown or the type does not match.
    pub fn region<T: Device + 'static>(&self, id: RegionId) -> Option<&T> {
        self.regions
            .get(id.0)
            .and_then(|region| region.device.as_any().downcast_ref::<T>())
    }

    /// Mutably borrow the device behind `id` as its concrete type.
    pub fn region_mut<T: Device + 'static>(&mut self, id: RegionId) -> Option<&mut T> {
        self.regions
            .get_mut(id.0)
            .and_then(|region| region.device.as_any_mut().downcast_mut::<T>())
    }

    /// Iterate over `(name, start, end)` of every region in attachment order.
    pub fn regions(&self) -> impl Iterator<Item = (&str, u16, u16)> {
        self.regions
            .iter()
            .map(|region| (region.name.as_str(), region.start, region.end))
    }
}

impl Default for AddressSpace {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBus for AddressSpace {
    fn read(&self, addr: u16) -> u8 {
        match self.regions.iter().find(|region| region.contains(addr)) {
            Some(region) => region.device.read(addr - region.start),
            None => Self::UNMAPPED_VALUE,
        }
    }

    fn write(&mut self, addr: u16, value: u8) {
        if let Some(region) = self.regions.iter_mut().find(|region| region.contains(addr)) {
            region.device.write(addr - region.start, value);
        }
    }
}
