//! Workloads: record collections, access patterns and the three operations
//!
//! Both storage strategies hold the same [`Record`] values (record `i` has
//! `value == i`), so any timing difference comes from layout alone.
//!
//! Every value read inside a timed region goes through
//! [`std::hint::black_box`]; otherwise the loops have no observable effect
//! and the optimizer may delete them.

use crate::containers::{BoxedVec, StaticVec};
use crate::error::{BenchError, Result};
use crate::memory::CacheEvictor;
use crate::statistics::{Clock, Harness, Stats};
use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::hint::black_box;
use std::mem;

/// Fixed-size payload stored by both strategies
///
/// Deliberately neither `Clone` nor `Copy`: records are constructed once in
/// their final location and never duplicated.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Record {
    /// The single field read by iterate and access workloads
    pub value: usize,
}

impl Record {
    /// Create a record holding `value`
    #[inline]
    pub fn new(value: usize) -> Self {
        Self { value }
    }
}

/// Storage strategy under comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// All records in one allocation ([`StaticVec`])
    Contiguous,
    /// One allocation per record behind an owning handle ([`BoxedVec`])
    Indirect,
}

impl Strategy {
    /// Both strategies, in report order
    pub const ALL: [Strategy; 2] = [Strategy::Contiguous, Strategy::Indirect];

    /// Container label used in reports
    pub fn label(&self) -> &'static str {
        match self {
            Strategy::Contiguous => "static_vec",
            Strategy::Indirect => "vec<box>",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Random access pattern over `[0, bound)`
///
/// Every index is strictly below `bound`, which lets stores skip per-read
/// bounds checks once they have checked `bound` against their length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexSequence {
    indices: Vec<usize>,
    bound: usize,
}

impl IndexSequence {
    /// Exclusive upper bound of every index
    pub fn bound(&self) -> usize {
        self.bound
    }

    /// Number of indices
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    /// Check if the sequence is empty
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The indices in access order
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }
}

/// Draw `n` indices uniformly from `[0, n)` with replacement
pub fn gen_indices(n: usize) -> IndexSequence {
    gen_indices_with(n, &mut StdRng::from_entropy())
}

/// Draw `n` indices uniformly from `[0, n)` using `rng`
pub fn gen_indices_with<R: Rng + ?Sized>(n: usize, rng: &mut R) -> IndexSequence {
    if n == 0 {
        return IndexSequence {
            indices: Vec::new(),
            bound: 0,
        };
    }

    let dist = Uniform::new(0, n);
    let indices = (0..n).map(|_| dist.sample(rng)).collect();
    IndexSequence { indices, bound: n }
}

/// A record collection built with one storage strategy
pub trait RecordStore: Sized {
    /// Strategy this store implements
    const STRATEGY: Strategy;

    /// Build a store holding records `0..n`
    fn build(n: usize) -> Result<Self>;

    /// Number of records held
    fn record_count(&self) -> usize;

    /// Read `value` from every record in storage order
    fn read_all(&self);

    /// Read `value` from the records named by `indices`, in sequence order
    ///
    /// # Panics
    ///
    /// Panics if `indices.bound()` exceeds the number of records.
    fn read_at(&self, indices: &IndexSequence);
}

impl RecordStore for StaticVec<Record> {
    const STRATEGY: Strategy = Strategy::Contiguous;

    fn build(n: usize) -> Result<Self> {
        let mut store = StaticVec::with_capacity(n)?;
        for i in 0..n {
            // SAFETY: capacity is exactly n and i < n pushes have happened
            unsafe { store.push_unchecked(Record::new(i)) };
        }
        Ok(store)
    }

    fn record_count(&self) -> usize {
        self.len()
    }

    #[inline(never)]
    fn read_all(&self) {
        for record in self {
            black_box(record.value);
        }
    }

    #[inline(never)]
    fn read_at(&self, indices: &IndexSequence) {
        assert!(indices.bound() <= self.len(), "index sequence exceeds store");
        for &i in indices.as_slice() {
            // SAFETY: i < bound <= len
            black_box(unsafe { self.get_unchecked(i) }.value);
        }
    }
}

impl RecordStore for BoxedVec<Record> {
    const STRATEGY: Strategy = Strategy::Indirect;

    fn build(n: usize) -> Result<Self> {
        let mut store = Vec::new();
        store
            .try_reserve_exact(n)
            .map_err(|_| BenchError::out_of_memory(n.saturating_mul(mem::size_of::<Box<Record>>())))?;
        for i in 0..n {
            store.push(Box::new(Record::new(i)));
        }
        Ok(store)
    }

    fn record_count(&self) -> usize {
        self.len()
    }

    #[inline(never)]
    fn read_all(&self) {
        for record in self {
            black_box(record.value);
        }
    }

    #[inline(never)]
    fn read_at(&self, indices: &IndexSequence) {
        assert!(indices.bound() <= self.len(), "index sequence exceeds store");
        for &i in indices.as_slice() {
            // SAFETY: i < bound <= len
            black_box(unsafe { self.get_unchecked(i) }.value);
        }
    }
}

/// Time building `n` records and dropping them again
///
/// The whole lifetime of the collection is inside the timed region.
pub fn create_and_destruct<S, C, E>(
    harness: &mut Harness<C, E>,
    n: usize,
    trials: usize,
) -> Result<Stats>
where
    S: RecordStore,
    C: Clock,
    E: CacheEvictor,
{
    let mut failure: Option<BenchError> = None;
    let stats = harness.measure(trials, || {
        if failure.is_some() {
            return;
        }
        match S::build(n) {
            Ok(store) => {
                black_box(&store);
                drop(store);
            }
            Err(e) => failure = Some(e),
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(stats),
    }
}

/// Time a full in-order traversal of a pre-built store
pub fn iterate<S, C, E>(harness: &mut Harness<C, E>, n: usize, trials: usize) -> Result<Stats>
where
    S: RecordStore,
    C: Clock,
    E: CacheEvictor,
{
    let store = S::build(n)?;
    log::debug!("{}: built {} records for iterate", S::STRATEGY, store.record_count());
    Ok(harness.measure(trials, || store.read_all()))
}

/// Time random-order reads from a pre-built store
///
/// The index sequence is generated once and reused by every trial.
pub fn access<S, C, E>(harness: &mut Harness<C, E>, n: usize, trials: usize) -> Result<Stats>
where
    S: RecordStore,
    C: Clock,
    E: CacheEvictor,
{
    let store = S::build(n)?;
    let indices = gen_indices(n);
    log::debug!("{}: built {} records for access", S::STRATEGY, store.record_count());
    Ok(harness.measure(trials, || store.read_at(&indices)))
}
