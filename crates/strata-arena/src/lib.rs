//! Bump arenas with bulk reset.
//!
//! An arena serves byte ranges by advancing a single cursor through a
//! pre-reserved region. There is no per-allocation bookkeeping and no
//! individual free: [`Arena::reset_all`] reclaims the whole region at once.
//!
//! # Architecture
//!
//! ```text
//! Arena (contract: allocate / reset_all / next / capacity / used)
//! ├── FixedArena<N>   inline [u8; N], no heap allocation
//! └── DynamicArena    one heap buffer, acquired at construction
//!     └── RawBuffer   owned allocation, released on drop
//! ```
//!
//! Both strategies share one cursor type for the admission test
//! `used + size <= capacity` (overflow-checked) and usage counters.
//!
//! # Empty arenas
//!
//! A zero-capacity arena, or a [`DynamicArena`] whose buffer could not be
//! acquired, has no storage. It reports zero capacity, `next()` is `None`,
//! and every request fails. The state is permanent.
//!
//! # Safety boundary
//!
//! [`Arena::allocate`] hands out raw addresses; using one after
//! `reset_all` is not detected. [`Arena::alloc_uninit`] and
//! [`Arena::alloc_zeroed`] return borrows that the compiler keeps from
//! outliving a reset. Arenas are `!Sync`; share them behind a lock.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(unsafe_code)]

pub mod align;
pub mod arena;
pub mod config;
mod cursor;
pub mod dynamic;
pub mod error;
pub mod fixed;
mod raw;
pub mod stats;

// Public re-exports for the primary API surface.
pub use arena::Arena;
pub use config::ArenaConfig;
pub use dynamic::DynamicArena;
pub use error::ArenaError;
pub use fixed::FixedArena;
pub use stats::ArenaStats;
