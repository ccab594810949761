//! Survey API Comprehensive Test Suite
//!
//! Exercises the public API end to end, from JSON payloads through the
//! executor down to the record store and back.
//!
//! ## Test Groups
//!
//! - **control_scenarios**: survey `control` create / update semantics
//! - **record_reshaping**: survey data and question data folding and expansion
//! - **atomicity**: transactional boundaries and cascades
//! - **durability**: snapshot flush and reopen
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test survey_api_comprehensive
//! ```

mod test_utils;

mod atomicity;
mod control_scenarios;
mod durability;
mod record_reshaping;
