//! Integration test suite: end-to-end scenarios over the public API plus
//! property-based invariant checks.

mod end_to_end_tests;
mod property_tests;
