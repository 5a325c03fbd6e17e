// Copyright 2025 the RetViz Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Default tick label formatting.

extern crate alloc;

use alloc::string::String;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Formats a tick value using the tick step to pick a decimal count.
///
/// Ticks on the same axis share a step, so they come out with a consistent
/// number of decimals: step 25 formats as `0`, `25`; step 0.5 as `0.0`, `0.5`.
pub fn format_tick_with_step(v: f64, step: f64) -> String {
    let decimals = step_decimals(step);
    let formatted = alloc::format!("{v:.decimals$}");
    // "-0" reads worse than "0".
    if formatted.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        return formatted.trim_start_matches('-').into();
    }
    formatted
}

fn step_decimals(step: f64) -> usize {
    if !step.is_finite() || step <= 0.0 || step >= 1.0 {
        return 0;
    }
    // Smallest d with step * 10^d >= 1, capped to keep labels readable.
    let d = (-step.log10()).ceil();
    if !d.is_finite() {
        return 0;
    }
    let d = d.clamp(0.0, 6.0);
    #[allow(clippy::cast_possible_truncation, reason = "clamped to the 0..=6 range")]
    {
        d as usize
    }
}
