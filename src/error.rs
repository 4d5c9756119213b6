// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The single error type shared by every stage of the engine.

use failure::Fail;

/// Everything that can go wrong between picking a fractal and getting
/// its pixels back.  Only `DivisionByZero` is ever recovered from
/// inside the engine; the rest abort the render in progress.
#[derive(Debug, Clone, PartialEq, Fail)]
pub enum FractalError {
    /// An L-system character has no production rule and is not a
    /// drawing command.
    #[fail(display = "rule '{}' not found", _0)]
    UnknownSymbol(char),

    /// Complex division by a value whose squared modulus is exactly zero.
    #[fail(display = "can't divide by zero")]
    DivisionByZero,

    /// A catalog lookup past the end of the catalog.
    #[fail(display = "fractal #{} does not exist, the catalog holds {}", index, len)]
    IndexOutOfRange {
        /// The index that was asked for.
        index: usize,
        /// The number of entries in the catalog.
        len: usize,
    },

    /// A `[` opened more nested branches than the turtle can remember.
    #[fail(display = "turtle state stack overflow, capacity is {}", _0)]
    StackOverflow(usize),

    /// A `]` without a matching `[`.
    #[fail(display = "turtle state stack underflow")]
    StackUnderflow,

    /// A production rule in `symbol:replacement` notation that could not
    /// be read.
    #[fail(display = "malformed rule: '{}'", _0)]
    MalformedRule(String),

    /// A grammar with no rules at all, and therefore no root.
    #[fail(display = "an L-system needs at least one rule")]
    EmptyGrammar,

    /// A viewport whose lower corner is not below and left of its upper
    /// corner.
    #[fail(display = "the viewport's minimum corner lies beyond its maximum corner")]
    InvalidViewport,

    /// An expansion visited more symbols than it was allowed to.
    #[fail(display = "expansion gave up after visiting {} symbols", _0)]
    ExpansionBudgetExhausted(usize),

    /// An escape-time iteration cap too large for `8 * (max - i)` to
    /// fit a pixel.
    #[fail(display = "iteration cap {} is above the limit of {}", _0, _1)]
    IterationLimit(u32, u32),

    /// A batch render worker died before handing back its results.
    #[fail(display = "a render worker panicked")]
    WorkerPanicked,
}
