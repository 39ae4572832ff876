//! Transaction filtering functionality.
//!
//! Implements the matching side of the tracker:
//! - The address book of tracked addresses per chain
//! - Validation of matched transactions against their receipt

mod address_book;
mod error;
mod validator;

pub use address_book::{normalize, AddressBook, NormalizedAddress, TrackedAddress};
pub use error::AddressBookError;
pub use validator::{RejectReason, TransactionValidator, Validation};
