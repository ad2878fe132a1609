/// Number of bytes in the binary form of a TSID.
pub const TSID_BYTES: usize = 8;

/// Width of the time field (milliseconds since the custom epoch).
pub const TIME_BITS: u32 = 42;

/// Width of the random field, shared between node and counter.
pub const RANDOM_BITS: u32 = 22;

/// Largest configurable node width. At least two counter bits always remain.
pub const MAX_NODE_BITS: u32 = 20;

pub const TIME_MASK: u64 = (1 << TIME_BITS) - 1;
pub const RANDOM_MASK: u64 = (1 << RANDOM_BITS) - 1;

/// Number of counter bits left for a given node width.
#[must_use]
pub const fn counter_bits(node_bits: u32) -> u32 {
    RANDOM_BITS - node_bits
}

/// Mask over the counter field for a given node width.
#[must_use]
pub const fn counter_mask(node_bits: u32) -> u32 {
    (RANDOM_MASK >> node_bits) as u32
}

/// Mask over the node value (not shifted) for a given node width.
#[must_use]
pub const fn node_mask(node_bits: u32) -> u32 {
    (RANDOM_MASK >> counter_bits(node_bits)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_partition_random_field() {
        for node_bits in 0..=MAX_NODE_BITS {
            let counter = u64::from(counter_mask(node_bits));
            let node = u64::from(node_mask(node_bits)) << counter_bits(node_bits);
            assert_eq!(counter & node, 0, "node_bits={node_bits}");
            assert_eq!(counter | node, RANDOM_MASK, "node_bits={node_bits}");
        }
    }

    #[test]
    fn fields_span_all_64_bits() {
        assert_eq!(TIME_BITS + RANDOM_BITS, 64);
        assert_eq!(counter_bits(0), 22);
        assert_eq!(counter_bits(MAX_NODE_BITS), 2);
        assert_eq!(node_mask(10), 0x3FF);
        assert_eq!(counter_mask(10), 0xFFF);
        assert_eq!(node_mask(0), 0);
    }
}
