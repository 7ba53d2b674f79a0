//! Contact store for callbrief
//!
//! Loads customer records from a CSV file and matches them by phone number.

mod store;

pub use store::{normalize_phone, ContactRecord, ContactStore, ContactStoreError};
