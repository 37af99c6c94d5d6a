//! Route matching module
//!
//! Path-template matching for the API route table.

pub mod matcher;
