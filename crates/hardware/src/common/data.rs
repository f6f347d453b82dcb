//! Access classification.
//!
//! Every lookup a cache level performs is tagged with why it happened. The
//! kind is used for the following:
//! 1. **Statistics:** Only demand accesses count towards hit and miss rates.
//! 2. **Observability:** Events carry the kind so prefetch traffic can be told apart from demand traffic.

/// Why a cache level is being accessed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AccessKind {
    /// A request issued by the client of the level or hierarchy.
    Demand,

    /// A next-line read issued by the level itself after a hit or fill.
    Prefetch,

    /// A re-access issued by the hierarchy to promote an L2 hit into L1.
    Fill,
}
