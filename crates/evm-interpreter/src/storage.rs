//! Storage plane (spec §3.5): a flat, linearly-scanned array of
//! `(address, key, value, original, is_warm)` entries, with EIP-2929 warm/cold
//! tracking and EIP-2200 gas/refund accounting for `SSTORE`.

use crate::constants::*;
use crate::word::Word;

/// One borrowed storage entry.
pub struct Entry<'a> {
    bytes: &'a mut [u8],
}

impl<'a> Entry<'a> {
    pub fn address(&self) -> [u8; ADDRESS_SIZE] {
        self.bytes[STORAGE_OFF_ADDRESS..STORAGE_OFF_ADDRESS + ADDRESS_SIZE]
            .try_into()
            .unwrap()
    }

    pub fn key(&self) -> Word {
        self.bytes[STORAGE_OFF_KEY..STORAGE_OFF_KEY + WORD_SIZE]
            .try_into()
            .unwrap()
    }

    pub fn value(&self) -> Word {
        self.bytes[STORAGE_OFF_VALUE..STORAGE_OFF_VALUE + WORD_SIZE]
            .try_into()
            .unwrap()
    }

    pub fn set_value(&mut self, value: &Word) {
        self.bytes[STORAGE_OFF_VALUE..STORAGE_OFF_VALUE + WORD_SIZE].copy_from_slice(value);
    }

    pub fn original(&self) -> Word {
        self.bytes[STORAGE_OFF_ORIGINAL..STORAGE_OFF_ORIGINAL + WORD_SIZE]
            .try_into()
            .unwrap()
    }

    pub fn set_original(&mut self, value: &Word) {
        self.bytes[STORAGE_OFF_ORIGINAL..STORAGE_OFF_ORIGINAL + WORD_SIZE].copy_from_slice(value);
    }

    pub fn is_warm(&self) -> bool {
        self.bytes[STORAGE_OFF_IS_WARM] != 0
    }

    pub fn set_warm(&mut self, warm: bool) {
        self.bytes[STORAGE_OFF_IS_WARM] = warm as u8;
    }
}

/// Borrowed view over the whole storage plane.
pub struct StoragePlane<'a> {
    bytes: &'a mut [u8],
}

impl<'a> StoragePlane<'a> {
    /// `bytes` must hold `max_slots * STORAGE_ENTRY_SIZE` bytes.
    pub fn new(bytes: &'a mut [u8]) -> Self {
        Self { bytes }
    }

    fn entry(&mut self, index: usize) -> Entry<'_> {
        let start = index * STORAGE_ENTRY_SIZE;
        Entry {
            bytes: &mut self.bytes[start..start + STORAGE_ENTRY_SIZE],
        }
    }

    /// Linear search for `(address, key)` among the first `count` entries.
    pub fn find(&mut self, count: u32, address: &[u8; ADDRESS_SIZE], key: &Word) -> Option<usize> {
        (0..count as usize).find(|&i| {
            let entry = self.entry(i);
            entry.address() == *address && entry.key() == *key
        })
    }

    pub fn entry_mut(&mut self, index: usize) -> Entry<'_> {
        self.entry(index)
    }

    /// Append a new zero-valued, cold entry for `(address, key)`. Returns
    /// `None` (caller halts `INVALID_OPERATION`) if `count == max_slots`.
    pub fn add(
        &mut self,
        count: &mut u32,
        max_slots: usize,
        address: &[u8; ADDRESS_SIZE],
        key: &Word,
    ) -> Option<usize> {
        if *count as usize >= max_slots {
            return None;
        }
        let index = *count as usize;
        {
            let mut entry = self.entry(index);
            entry.bytes.fill(0);
            entry.bytes[STORAGE_OFF_ADDRESS..STORAGE_OFF_ADDRESS + ADDRESS_SIZE].copy_from_slice(address);
            entry.bytes[STORAGE_OFF_KEY..STORAGE_OFF_KEY + WORD_SIZE].copy_from_slice(key);
        }
        *count += 1;
        Some(index)
    }
}

/// Outcome of an `SSTORE` against a pre-existing entry: the gas to charge and
/// the refund delta to apply (may be negative, undoing an earlier refund).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SstoreOutcome {
    pub gas_cost: u64,
    pub refund_delta: i64,
}

/// EIP-2200 gas/refund table for `SSTORE` against an existing entry (spec
/// §4.3's table, `W`/`Z0`/`Zc`/`Zv` named as in the spec).
pub fn sstore_gas_and_refund(
    was_warm: bool,
    original: &Word,
    current: &Word,
    new_value: &Word,
) -> SstoreOutcome {
    use crate::word::is_zero;

    let w = was_warm;
    let z0 = is_zero(original);
    let zc = is_zero(current);
    let zv = is_zero(new_value);
    let access_cost = if w { gas::SSTORE_RESET_WARM } else { gas::SSTORE_RESET_COLD };

    if zv && !zc {
        SstoreOutcome {
            gas_cost: access_cost,
            refund_delta: gas::SSTORE_CLEAR_REFUND as i64,
        }
    } else if zv && zc {
        SstoreOutcome {
            gas_cost: access_cost,
            refund_delta: 0,
        }
    } else if !zv && zc && !z0 {
        SstoreOutcome {
            gas_cost: access_cost,
            refund_delta: 0,
        }
    } else if !zv && zc && z0 {
        SstoreOutcome {
            gas_cost: gas::SSTORE_SET,
            refund_delta: 0,
        }
    } else {
        SstoreOutcome {
            gas_cost: access_cost,
            refund_delta: 0,
        }
    }
}
