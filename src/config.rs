// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Tunables for a render.  The defaults reproduce the classic
//! 400x400 demo pictures; nothing here is persisted.

/// Step length of the turtle, in pixels.
pub const DEFAULT_TURTLE_SCALE: f64 = 4.0;

/// How many turtle states, the base state included, may be live at once.
pub const DEFAULT_STACK_CAPACITY: usize = 50;

/// Auto-fit never expands a grammar to this level or beyond.
pub const DEFAULT_MAX_LEVEL: usize = 100;

/// Escape-time iteration budget per pixel.
pub const DEFAULT_MAX_ITERATIONS: u32 = 511;

/// Auto-fit stops growing a grammar once one expansion would visit
/// more symbols than this.
pub const DEFAULT_MAX_EXPANSION_LEN: usize = 1 << 22;

/// The knobs a render may turn.  Once handed to a renderer this is
/// only ever read.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RenderConfig {
    /// Distance covered by each `F` or `f`.
    pub turtle_scale: f64,
    /// Capacity of the turtle's branch stack.
    pub stack_capacity: usize,
    /// Exclusive upper bound on the expansion level tried by auto-fit.
    pub max_level: usize,
    /// Escape-time iteration cap.
    pub max_iterations: u32,
    /// Symbols one expansion may visit before auto-fit stops trying
    /// deeper levels.
    pub max_expansion_len: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            turtle_scale: DEFAULT_TURTLE_SCALE,
            stack_capacity: DEFAULT_STACK_CAPACITY,
            max_level: DEFAULT_MAX_LEVEL,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_expansion_len: DEFAULT_MAX_EXPANSION_LEN,
        }
    }
}
