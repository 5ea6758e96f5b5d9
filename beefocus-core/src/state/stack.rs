//! Fixed-capacity state stack

use heapless::Vec;

use super::machine::State;

/// Maximum nesting depth
///
/// Deepest real nesting is a backlash move mid-step: six frames.
pub const STACK_DEPTH: usize = 16;

/// Stack failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StackError {
    /// Push onto a full stack
    Overflow,
}

/// LIFO of resumable states
///
/// Never empty: popping the last frame reinstates `AcceptCommands`.
#[derive(Debug, Clone)]
pub struct StateStack {
    frames: Vec<State, STACK_DEPTH>,
}

impl StateStack {
    /// Stack holding a single `AcceptCommands` frame
    pub fn new() -> Self {
        let mut stack = Self { frames: Vec::new() };
        stack.reset(State::AcceptCommands);
        stack
    }

    /// Push a new active state
    pub fn push(&mut self, state: State) -> Result<(), StackError> {
        self.frames.push(state).map_err(|_| StackError::Overflow)
    }

    /// Drop the active state, resuming the one below
    pub fn pop(&mut self) -> Option<State> {
        let popped = self.frames.pop();
        if self.frames.is_empty() {
            self.reset(State::AcceptCommands);
        }
        popped
    }

    /// Discard everything and start over from `state`
    pub fn reset(&mut self, state: State) {
        self.frames.clear();
        // Capacity is at least one
        let _ = self.frames.push(state);
    }

    /// Active state
    pub fn top(&self) -> Option<&State> {
        self.frames.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut State> {
        self.frames.last_mut()
    }

    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frames from bottom to top
    pub fn iter(&self) -> impl Iterator<Item = &State> {
        self.frames.iter()
    }
}

impl Default for StateStack {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_accepting_commands() {
        let stack = StateStack::new();
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Some(&State::AcceptCommands));
    }

    #[test]
    fn test_lifo_order() {
        let mut stack = StateStack::new();
        stack.push(State::Moving { target: 5 }).unwrap();
        stack.push(State::StepperInactive).unwrap();
        stack.push(State::StepperActive).unwrap();

        assert_eq!(stack.pop(), Some(State::StepperActive));
        assert_eq!(stack.pop(), Some(State::StepperInactive));
        assert_eq!(stack.top(), Some(&State::Moving { target: 5 }));
    }

    #[test]
    fn test_pop_last_frame_reinstates_accept() {
        let mut stack = StateStack::new();
        stack.reset(State::Moving { target: 1 });
        assert_eq!(stack.pop(), Some(State::Moving { target: 1 }));
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.top(), Some(&State::AcceptCommands));
        assert!(!stack.is_empty());
    }

    #[test]
    fn test_overflow() {
        let mut stack = StateStack::new();
        for _ in 1..STACK_DEPTH {
            stack.push(State::StepperActive).unwrap();
        }
        assert_eq!(stack.push(State::StepperActive), Err(StackError::Overflow));
        assert_eq!(stack.depth(), STACK_DEPTH);
    }

    #[test]
    fn test_reset_collapses() {
        let mut stack = StateStack::new();
        stack.push(State::Moving { target: 3 }).unwrap();
        stack.push(State::DoSteps { remaining: 2 }).unwrap();
        stack.reset(State::AcceptCommands);
        assert_eq!(stack.depth(), 1);
        assert_eq!(stack.iter().copied().next(), Some(State::AcceptCommands));
    }

    #[test]
    fn test_top_mut_updates_in_place() {
        let mut stack = StateStack::new();
        stack.push(State::DoSteps { remaining: 2 }).unwrap();
        if let Some(State::DoSteps { remaining }) = stack.top_mut() {
            *remaining -= 1;
        }
        assert_eq!(stack.top(), Some(&State::DoSteps { remaining: 1 }));
    }
}
