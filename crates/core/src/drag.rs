//! Two-state drag session: `Idle` ⇄ `Dragging`.
//!
//! | state    | press    | move                 | release |
//! |----------|----------|----------------------|---------|
//! | Idle     | Dragging | Idle (ignored)       | Idle    |
//! | Dragging | Dragging | Dragging (processed) | Idle    |
//!
//! A picker owns one session per interactive surface; sessions share nothing.

/// Where a drag session currently is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

/// Pointer input relevant to a drag session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragInput {
    Press,
    Move,
    Release,
}

impl DragState {
    /// The transition table above.
    pub fn next(self, input: DragInput) -> DragState {
        match (self, input) {
            (_, DragInput::Press) => DragState::Dragging,
            (_, DragInput::Release) => DragState::Idle,
            (state, DragInput::Move) => state,
        }
    }
}

/// A single drag session over one surface.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state == DragState::Dragging
    }

    /// Applies `input` and reports whether the pointer position that came
    /// with it should be mapped: true for a press and for a move while
    /// dragging, false otherwise.
    pub fn apply(&mut self, input: DragInput) -> bool {
        let was_dragging = self.is_dragging();
        self.state = self.state.next(input);
        match input {
            DragInput::Press => true,
            DragInput::Move => was_dragging,
            DragInput::Release => false,
        }
    }
}
