//! RAM device implementation.
//!
//! Provides readable and writable memory storage via the Device trait.

use super::Device;
use std::any::Any;

/// Simple RAM device with readable and writable storage.
///
/// Offsets past the end of the backing store read as zero and drop writes,
/// so a RAM region attached over a range larger than its size never panics.
///
/// # Examples
///
/// ```rust
/// use sid6502::{RamDevice, Device};
///
/// let mut ram = RamDevice::new(1024); // 1KB RAM
///
/// ram.write(0x42, 0xAA);
/// assert_eq!(ram.read(0x42), 0xAA);
/// ```
pub struct RamDevice {
    data: Vec<u8>,
}

impl RamDevice {
    /// Create a new zero-filled RAM device with the specified size in bytes.
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size],
        }
    }

    /// Load bytes into RAM at the specified offset.
    ///
    /// Bytes that would land past the end of the device are dropped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use sid6502::{RamDevice, Device};
    ///
    /// let mut ram = RamDevice::new(1024);
    /// ram.load_bytes(0x100, &[0x01, 0x02, 0x03]);
    ///
    /// assert_eq!(ram.read(0x100), 0x01);
    /// assert_eq!(ram.read(0x102), 0x03);
    /// ```
    pub fn load_bytes(&mut self, offset: u16, bytes: &[u8]) {
        let start = (offset as usize).min(self.data.len());
        let end = (start + bytes.len()).min(self.data.len());
        self.data[start..end].copy_from_slice(&bytes[..end - start]);
    }

    /// Size of the backing store in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the device has no backing store.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl Device for RamDevice {
    fn read(&self, offset: u16) -> u8 {
        self.data.get(offset as usize).copied().unwrap_or(0)
    }

    fn write(&mut self, offset: u16, value: u8) {
        if let Some(byte) = self.data.get_mut(offset as usize) {
            *byte = value;
        }
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ram_new() {
        let ram = RamDevice::new(256);
        assert_eq!(ram.len(), 256);

        for i in 0..256 {
            assert_eq!(ram.read(i), 0x00);
        }
    }

    #[test]
    fn test_ram_read_write() {
        let mut ram = RamDevice::new(256);

        ram.write(0, 0xAA);
        ram.write(100, 0xBB);
        ram.write(255, 0xCC);

        assert_eq!(ram.read(0), 0xAA);
        assert_eq!(ram.read(100), 0xBB);
        assert_eq!(ram.read(255), 0xCC);
        assert_eq!(ram.read(99), 0x00);
    }

    #[test]
    fn test_ram_out_of_bounds_is_silent() {
        let mut ram = RamDevice::new(16);

        ram.write(16, 0x42);
        assert_eq!(ram.read(16), 0x00);
        assert_eq!(ram.read(0xFFFF), 0x00);
    }

    #[test]
    fn test_ram_load_bytes_truncates() {
        let mut ram = RamDevice::new(4);

        ram.load_bytes(2, &[0xA9, 0x42, 0x85, 0x10]);

        assert_eq!(ram.read(2), 0xA9);
        assert_eq!(ram.read(3), 0x42);
        assert_eq!(ram.read(0), 0x00);
    }
}
