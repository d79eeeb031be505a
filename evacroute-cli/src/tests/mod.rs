//! Shared test harness modules for the evacroute CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod guide_unit;
mod helpers;
