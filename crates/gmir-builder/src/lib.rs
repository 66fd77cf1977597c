//! Instruction builder for constructing generic machine IR.
//!
//! This crate provides [`InstBuilder`], the single mutation point through
//! which generic-IR instructions enter a function body during
//! instruction-selection lowering. The builder keeps the current insertion
//! point and debug location, and enforces the structural invariants of the IR
//! (generic vs. non-generic typing, operand shapes, width arithmetic) at
//! construction time.

#![no_std]

extern crate alloc;

mod builder;

pub use builder::{InsertPt, InstBuilder};
