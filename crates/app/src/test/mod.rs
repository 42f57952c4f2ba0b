//! Test support shared by unit tests.

mod helpers;

pub(crate) use helpers::*;
