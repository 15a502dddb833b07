//! Core domain entities
//!
//! Pure data structures with validation logic - no I/O or external
//! dependencies.

mod address;
pub mod balance;
pub mod result;
mod session;

pub use address::Address;
pub use session::{Session, SessionStatus};
