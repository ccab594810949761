//! Command handlers.
//!
//! One module per resource. Each handler takes the shared [`Primitives`],
//! calls the matching engine store and wraps the result in an [`Output`].
//!
//! [`Primitives`]: crate::bridge::Primitives
//! [`Output`]: crate::Output

pub mod database;
pub mod question_data;
pub mod record_type;
pub mod survey;
pub mod survey_data;
