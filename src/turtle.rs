// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! A turtle-graphics cursor.  The turtle has a position and a heading,
//! and a bounded stack of saved states so that `[` and `]` can open
//! and close branches.  It draws nothing itself: every pen-down move is
//! reported to a `LineSink`, which decides what "drawing" means.

use crate::config::DEFAULT_STACK_CAPACITY;
use crate::error::FractalError;

/// Receives the segments traced by the turtle, in integral pixel
/// coordinates.
pub trait LineSink {
    /// Called once per pen-down move, from `(x1, y1)` to `(x2, y2)`.
    fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64);
}

/// Where the turtle is and which way it faces.  Heading is in degrees,
/// measured from the positive x axis toward the positive y axis.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TurtleState {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
    /// Direction of travel, in degrees.
    pub heading: f64,
}

/// The turtle proper.  The top of `stack` is the current state; the
/// stack is never empty.
#[derive(Clone, Debug)]
pub struct Turtle {
    scale: f64,
    capacity: usize,
    stack: Vec<TurtleState>,
}

impl Turtle {
    /// A turtle that covers `scale` units per step, at the origin,
    /// facing along the x axis.
    pub fn new(scale: f64) -> Self {
        Turtle::with_capacity(scale, DEFAULT_STACK_CAPACITY)
    }

    /// As `new`, but remembering at most `capacity` states (the base
    /// state included) before `push_state` refuses.
    pub fn with_capacity(scale: f64, capacity: usize) -> Self {
        let mut stack = Vec::with_capacity(capacity.max(1));
        stack.push(TurtleState::default());
        Turtle {
            scale,
            capacity: capacity.max(1),
            stack,
        }
    }

    /// Back to a single state at the origin, heading 0.
    pub fn reset(&mut self) {
        self.stack.clear();
        self.stack.push(TurtleState::default());
    }

    /// The current state.
    pub fn state(&self) -> TurtleState {
        self.stack[self.stack.len() - 1]
    }

    /// Number of states on the stack, the base state included.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn top(&mut self) -> &mut TurtleState {
        let last = self.stack.len() - 1;
        &mut self.stack[last]
    }

    /// Move the current state to `(x, y)` without drawing.
    pub fn set_position(&mut self, x: f64, y: f64) {
        let top = self.top();
        top.x = x;
        top.y = y;
    }

    /// Turn by `delta` degrees.
    pub fn rotate(&mut self, delta: f64) {
        self.top().heading += delta;
    }

    /// `[`: remember the current state.
    pub fn push_state(&mut self) -> Result<(), FractalError> {
        if self.stack.len() >= self.capacity {
            return Err(FractalError::StackOverflow(self.capacity));
        }
        let current = self.state();
        self.stack.push(current);
        Ok(())
    }

    /// `]`: return to the most recently remembered state.
    pub fn pop_state(&mut self) -> Result<(), FractalError> {
        if self.stack.len() <= 1 {
            return Err(FractalError::StackUnderflow);
        }
        self.stack.pop();
        Ok(())
    }

    /// Step forward.  With a sink this is `F` and the segment is
    /// reported; without one it is `f` and the turtle just moves.
    pub fn forward(&mut self, sink: Option<&mut dyn LineSink>) {
        let scale = self.scale;
        let top = self.top();
        let radians = top.heading.to_radians();
        let x = top.x + radians.cos() * scale;
        let y = top.y + radians.sin() * scale;
        if let Some(sink) = sink {
            sink.line(top.x as i64, top.y as i64, x as i64, y as i64);
        }
        top.x = x;
        top.y = y;
    }

    /// Walk a command string.  `+` and `-` turn by `angle`, `[` and `]`
    /// push and pop, `F` draws into `sink` and `f` moves silently.
    /// Anything else is ignored.
    pub fn execute(
        &mut self,
        pattern: &str,
        angle: f64,
        sink: &mut dyn LineSink,
    ) -> Result<(), FractalError> {
        for command in pattern.chars() {
            match command {
                '+' => self.rotate(angle),
                '-' => self.rotate(-angle),
                '[' => self.push_state()?,
                ']' => self.pop_state()?,
                'F' => self.forward(Some(&mut *sink)),
                'f' => self.forward(None),
                _ => {}
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder(Vec<(i64, i64, i64, i64)>);

    impl LineSink for Recorder {
        fn line(&mut self, x1: i64, y1: i64, x2: i64, y2: i64) {
            self.0.push((x1, y1, x2, y2));
        }
    }

    #[test]
    fn forward_along_the_x_axis() {
        let mut turtle = Turtle::new(4.0);
        let mut rec = Recorder::default();
        turtle.forward(Some(&mut rec));
        assert_eq!(rec.0, vec![(0, 0, 4, 0)]);
        assert_eq!(turtle.state().x, 4.0);
    }

    #[test]
    fn pen_up_moves_without_drawing() {
        let mut turtle = Turtle::new(4.0);
        let mut rec = Recorder::default();
        turtle.execute("fF", 90.0, &mut rec).unwrap();
        assert_eq!(rec.0, vec![(4, 0, 8, 0)]);
    }

    #[test]
    fn rotation_changes_direction() {
        let mut turtle = Turtle::new(10.0);
        let mut rec = Recorder::default();
        turtle.execute("+F", 90.0, &mut rec).unwrap();
        // cos(90°) is not exactly zero, but truncation hides it.
        assert_eq!(rec.0, vec![(0, 0, 0, 10)]);
    }

    #[test]
    fn branches_restore_position_and_heading() {
        let mut turtle = Turtle::new(4.0);
        let mut rec = Recorder::default();
        turtle.execute("F[+F]F", 90.0, &mut rec).unwrap();
        assert_eq!(rec.0[2], (4, 0, 8, 0));
        assert_eq!(turtle.depth(), 1);
    }

    #[test]
    fn push_past_capacity_overflows() {
        let mut turtle = Turtle::with_capacity(1.0, 3);
        assert!(turtle.push_state().is_ok());
        assert!(turtle.push_state().is_ok());
        assert_eq!(turtle.push_state(), Err(FractalError::StackOverflow(3)));
        assert_eq!(turtle.depth(), 3);
    }

    #[test]
    fn pop_of_base_state_underflows() {
        let mut turtle = Turtle::new(1.0);
        let mut rec = Recorder::default();
        assert_eq!(
            turtle.execute("F]", 60.0, &mut rec),
            Err(FractalError::StackUnderflow)
        );
    }

    #[test]
    fn reset_returns_to_origin() {
        let mut turtle = Turtle::new(4.0);
        turtle.set_position(10.0, 20.0);
        turtle.rotate(45.0);
        turtle.push_state().unwrap();
        turtle.reset();
        assert_eq!(turtle.depth(), 1);
        assert_eq!(turtle.state(), TurtleState::default());
    }
}
