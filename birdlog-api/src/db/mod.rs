//! Repositories over the birdlog tables
//!
//! Each repository borrows the pool for one request. Multi-statement
//! mutations run inside a transaction: dropping it without `commit` rolls
//! back.

pub mod checklists;
pub mod my_checklists;
pub mod species;

pub use checklists::ReferenceChecklistRepo;
pub use my_checklists::{CreatedChecklist, MyChecklistRepo, Observation};
pub use species::SpeciesRepo;
