//! autodoc — render structured code-documentation records and export them as
//! paginated PDF reports.
//!
//! The pipeline: a loosely-typed record from the analysis backend
//! ([`model`]) is resolved into concrete values ([`normalize`]), built into a
//! deterministic render tree ([`tree`]), shown through the format renderers
//! ([`render`]), and captured, sliced into A4 pages and written out by the
//! single-flight export pipeline ([`export`]). [`submit`] talks to the
//! backend; [`session`] holds the committed record between operations.

pub mod export;
pub mod model;
pub mod normalize;
pub mod render;
pub mod session;
pub mod submit;
pub mod tree;
