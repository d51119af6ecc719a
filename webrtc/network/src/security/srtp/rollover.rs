//! Rollover counter (ROC) tracking for SRTP sequence-number wraparound.
//!
//! Follows the update algorithm sketched in RFC 3711 Section 3.3.1: the ROC
//! increments whenever the 16-bit sequence number wraps from near 0xFFFF
//! back to near 0, and a handful of late, pre-wrap packets are still
//! attributed to the previous ROC.

#[derive(Debug, Clone)]
pub struct RolloverState {
    roc: u32,
    highest_seq: u16,
    initialized: bool,
}

impl RolloverState {
    pub fn new() -> Self {
        Self {
            roc: 0,
            highest_seq: 0,
            initialized: false,
        }
    }

    /// Returns the ROC that applies to `seq`, updating internal state for
    /// packets that establish a new high-water mark.
    pub fn roc_for(&mut self, seq: u16) -> u32 {
        if !self.initialized {
            self.initialized = true;
            self.highest_seq = seq;
            return self.roc;
        }

        let udelta = seq.wrapping_sub(self.highest_seq);
        if udelta < 0x8000 {
            // In-order (or forward jump) sequence number; wrapped if it
            // dropped below the previous high-water mark.
            if seq < self.highest_seq {
                self.roc = self.roc.wrapping_add(1);
            }
            self.highest_seq = seq;
            self.roc
        } else if seq > self.highest_seq {
            // Late packet from just before the last wrap.
            self.roc.wrapping_sub(1)
        } else {
            self.roc
        }
    }
}

impl Default for RolloverState {
    fn default() -> Self {
        Self::new()
    }
}
