//! Branch label allocation
//!
//! One allocator per compilation run, owned by the code generator.
//! Labels come out as L20, L30, L40, ... so every label issued within a
//! run is unique and the sequence is strictly increasing. Two fresh
//! runs produce the same sequence, which keeps output byte-identical
//! across runs.

/// Allocator for branch and data labels
#[derive(Debug)]
pub struct LabelAllocator {
    counter: u32,
}

const LABEL_START: u32 = 10;
const LABEL_STEP: u32 = 10;

impl Default for LabelAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl LabelAllocator {
    /// Create an allocator; the first label it issues is "L20"
    pub fn new() -> Self {
        Self {
            counter: LABEL_START,
        }
    }

    /// Issue a fresh label
    pub fn fresh(&mut self) -> String {
        self.counter += LABEL_STEP;
        format!("L{}", self.counter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_starts_at_l20() {
        let mut labels = LabelAllocator::new();
        assert_eq!(labels.fresh(), "L20");
        assert_eq!(labels.fresh(), "L30");
        assert_eq!(labels.fresh(), "L40");
    }

    #[test]
    fn test_labels_are_unique_and_increasing() {
        let mut labels = LabelAllocator::new();
        let issued: Vec<String> = (0..100).map(|_| labels.fresh()).collect();

        let mut numbers: Vec<u32> = issued
            .iter()
            .map(|l| l.trim_start_matches('L').parse().unwrap())
            .collect();
        assert!(numbers.windows(2).all(|w| w[0] < w[1]));

        numbers.dedup();
        assert_eq!(numbers.len(), 100);
    }

    #[test]
    fn test_independent_allocators_restart() {
        let mut first = LabelAllocator::new();
        first.fresh();
        first.fresh();

        let mut second = LabelAllocator::new();
        assert_eq!(second.fresh(), "L20");
    }
}
