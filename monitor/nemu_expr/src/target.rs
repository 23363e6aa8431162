//! The simulated machine as seen by the evaluator.
//!
//! The evaluator needs exactly two things from the machine: register values
//! and memory reads. [`SnapshotTarget`] is a self-contained implementation
//! backed by hash maps, used by the console binary and by tests.

use rustc_hash::FxHashMap;

/// Register and memory access for expression evaluation.
///
/// Both calls are synchronous and must not block.
pub trait DebugTarget {
    /// Current value of register `name` (sigil already stripped), or `None`
    /// for an unknown register.
    fn register(&self, name: &str) -> Option<u32>;

    /// Read `width` bytes at `addr` as a little-endian value, or `None` if
    /// the address is not readable.
    fn read_memory(&self, addr: u32, width: u32) -> Option<u32>;
}

impl<T: DebugTarget + ?Sized> DebugTarget for &T {
    fn register(&self, name: &str) -> Option<u32> {
        (**self).register(name)
    }

    fn read_memory(&self, addr: u32, width: u32) -> Option<u32> {
        (**self).read_memory(addr, width)
    }
}

/// Frozen registers plus sparse byte-addressed memory.
///
/// Unwritten bytes are unreadable, so a read that touches one fails.
#[derive(Clone, Debug, Default)]
pub struct SnapshotTarget {
    registers: FxHashMap<String, u32>,
    memory: FxHashMap<u32, u8>,
}

impl SnapshotTarget {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or overwrite a register.
    #[must_use]
    pub fn with_register(mut self, name: &str, value: u32) -> Self {
        self.set_register(name, value);
        self
    }

    /// Store a 4-byte little-endian word at `addr`.
    #[must_use]
    pub fn with_word(mut self, addr: u32, value: u32) -> Self {
        self.write_bytes(addr, &value.to_le_bytes());
        self
    }

    pub fn set_register(&mut self, name: &str, value: u32) {
        self.registers.insert(name.to_string(), value);
    }

    /// Write raw bytes starting at `addr`; bytes past `u32::MAX` are dropped.
    pub fn write_bytes(&mut self, addr: u32, bytes: &[u8]) {
        for (offset, &byte) in (0u32..).zip(bytes) {
            if let Some(at) = addr.checked_add(offset) {
                self.memory.insert(at, byte);
            }
        }
    }
}

impl DebugTarget for SnapshotTarget {
    fn register(&self, name: &str) -> Option<u32> {
        self.registers.get(name).copied()
    }

    fn read_memory(&self, addr: u32, width: u32) -> Option<u32> {
        if !(1..=4).contains(&width) {
            return None;
        }
        (0..width).rev().try_fold(0u32, |acc, offset| {
            let byte = self.memory.get(&addr.checked_add(offset)?)?;
            Some((acc << 8) | u32::from(*byte))
        })
    }
}
