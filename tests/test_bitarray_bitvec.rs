//! Differential tests of BitArray against a bitvec reference model.
//!
//! These tests validate:
//! - Single bit reads and writes under random operation sequences
//! - Bitwise operations across arrays of differing sizes
//! - Table size tracking the highest set bit

use bit_array::{BitArray, ENTRY_BITS};
use bitvec::prelude::*;
use proptest::prelude::*;
use rand::{Rng, SeedableRng};

/// Reference model: a plain growable bit vector.
#[derive(Default)]
struct Model {
    bv: BitVec<u64, Lsb0>,
}

impl Model {
    fn get(&self, b: usize) -> bool {
        self.bv.get(b).map_or(false, |bit| *bit)
    }

    fn set(&mut self, b: usize, value: bool) {
        if b >= self.bv.len() {
            self.bv.resize(b + 1, false);
        }
        self.bv.set(b, value);
    }

    fn acts(&self) -> Vec<usize> {
        self.bv.iter_ones().collect()
    }

    /// Entries a trimmed table needs to hold the highest set bit.
    fn expected_size(&self) -> usize {
        self.bv.last_one().map_or(0, |b| b / ENTRY_BITS + 1)
    }
}

#[derive(Debug, Clone)]
enum Op {
    Set(usize, bool),
    Toggle(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..3000usize, any::<bool>()).prop_map(|(b, v)| Op::Set(b, v)),
        (0..3000usize).prop_map(Op::Toggle),
    ]
}

fn apply(ba: &mut BitArray, model: &mut Model, op: &Op) {
    match *op {
        Op::Set(b, v) => {
            ba.set(b, v);
            model.set(b, v);
        }
        Op::Toggle(b) => {
            let expected = !model.get(b);
            model.set(b, expected);
            assert_eq!(ba.toggle(b), expected);
        }
    }
}

fn random_pair<R: Rng>(rng: &mut R, n: usize) -> (BitArray, Model) {
    let mut ba = BitArray::new();
    let mut model = Model::default();
    for b in 0..n {
        if rng.gen_bool(0.2) {
            ba.set(b, true);
            model.set(b, true);
        }
    }
    (ba, model)
}

// =============================================================================
// Operation Sequences
// =============================================================================

#[test]
fn test_random_sequence_matches_model() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    let mut ba = BitArray::new();
    let mut model = Model::default();

    for _ in 0..5000 {
        let b = rng.gen_range(0..2048);
        let op = if rng.gen_bool(0.5) {
            Op::Toggle(b)
        } else {
            Op::Set(b, rng.gen_bool(0.6))
        };
        apply(&mut ba, &mut model, &op);
    }

    assert_eq!(ba.get_acts(), model.acts());
    assert_eq!(ba.size(), model.expected_size());
    for b in 0..2100 {
        assert_eq!(ba.get(b), model.get(b), "bit {}", b);
    }
}

#[test]
fn test_entries_match_model_words() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let (ba, model) = random_pair(&mut rng, 1000);

    for (i, &entry) in ba.entries().iter().enumerate() {
        let base = i * ENTRY_BITS;
        for offset in 0..ENTRY_BITS {
            assert_eq!((entry >> offset) & 1 == 1, model.get(base + offset));
        }
    }
}

// =============================================================================
// Bitwise Operations
// =============================================================================

#[test]
fn test_bitwise_ops_match_model() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    let (a, ma) = random_pair(&mut rng, 700);
    let (b, mb) = random_pair(&mut rng, 150);

    let extent = 800;
    let and: Vec<usize> = (0..extent).filter(|&i| ma.get(i) && mb.get(i)).collect();
    let or: Vec<usize> = (0..extent).filter(|&i| ma.get(i) || mb.get(i)).collect();
    let xor: Vec<usize> = (0..extent).filter(|&i| ma.get(i) != mb.get(i)).collect();

    assert_eq!(a.and(&b).get_acts(), and);
    assert_eq!(a.or(&b).get_acts(), or);
    assert_eq!(a.xor(&b).get_acts(), xor);
    assert_eq!(a.num_similar(&b), and.len());
}

#[test]
fn test_not_matches_model_within_table() {
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);
    let (a, ma) = random_pair(&mut rng, 300);
    let result = a.not();

    for i in 0..a.size() * ENTRY_BITS {
        assert_eq!(result.get(i), !ma.get(i), "bit {}", i);
    }
    assert!(!result.get(a.size() * ENTRY_BITS));
}

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    #[test]
    fn prop_ops_match_model(ops in prop::collection::vec(op_strategy(), 0..200)) {
        let mut ba = BitArray::new();
        let mut model = Model::default();

        for op in &ops {
            apply(&mut ba, &mut model, op);
            prop_assert_eq!(ba.size(), model.expected_size());
        }
        prop_assert_eq!(ba.get_acts(), model.acts());
        prop_assert_eq!(ba.num_set(), model.bv.count_ones());
        prop_assert_eq!(ba.highest_set(), model.bv.last_one());
    }
}
