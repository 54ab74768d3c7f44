#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAction {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Slot1,
    Slot2,
    Quit,
}

const ACTION_COUNT: usize = 7;

impl InputAction {
    pub const ALL: [InputAction; ACTION_COUNT] = [
        InputAction::MoveUp,
        InputAction::MoveDown,
        InputAction::MoveLeft,
        InputAction::MoveRight,
        InputAction::Slot1,
        InputAction::Slot2,
        InputAction::Quit,
    ];

    const fn index(self) -> usize {
        match self {
            InputAction::MoveUp => 0,
            InputAction::MoveDown => 1,
            InputAction::MoveLeft => 2,
            InputAction::MoveRight => 3,
            InputAction::Slot1 => 4,
            InputAction::Slot2 => 5,
            InputAction::Quit => 6,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ActionStates {
    down: [bool; ACTION_COUNT],
}

impl ActionStates {
    pub(crate) fn set(&mut self, action: InputAction, is_down: bool) {
        self.down[action.index()] = is_down;
    }

    pub(crate) fn is_down(&self, action: InputAction) -> bool {
        self.down[action.index()]
    }

    fn any(&self) -> bool {
        self.down.iter().any(|down| *down)
    }
}

/// One frame of logical input. Built once per loop iteration and handed to
/// `World::tick`, so every actor sees the same view of the frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: ActionStates,
    first_pressed: ActionStates,
}

impl InputSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_down(&self, action: InputAction) -> bool {
        self.held.is_down(action)
    }

    pub fn first_pressed(&self, action: InputAction) -> bool {
        self.first_pressed.is_down(action)
    }

    pub fn any_first_pressed(&self) -> bool {
        self.first_pressed.any()
    }

    pub fn quit_requested(&self) -> bool {
        self.is_down(InputAction::Quit)
    }

    pub fn with_action_down(mut self, action: InputAction, is_down: bool) -> Self {
        self.held.set(action, is_down);
        self
    }

    /// Marks `action` as pressed this frame. A first press is also a hold.
    pub fn with_first_pressed(mut self, action: InputAction, pressed: bool) -> Self {
        self.first_pressed.set(action, pressed);
        if pressed {
            self.held.set(action, true);
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct InputTracker {
    previous: ActionStates,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds this frame's snapshot from the set of actions currently held.
    /// An action counts as first pressed when it was not held last capture.
    pub fn capture<I>(&mut self, held_actions: I) -> InputSnapshot
    where
        I: IntoIterator<Item = InputAction>,
    {
        let mut held = ActionStates::default();
        for action in held_actions {
            held.set(action, true);
        }

        let mut first_pressed = ActionStates::default();
        for action in InputAction::ALL {
            if held.is_down(action) && !self.previous.is_down(action) {
                first_pressed.set(action, true);
            }
        }

        self.previous = held;
        InputSnapshot {
            held,
            first_pressed,
        }
    }

    pub fn release_all(&mut self) {
        self.previous = ActionStates::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_capture_reports_first_press() {
        let mut tracker = InputTracker::new();
        let snapshot = tracker.capture([InputAction::MoveUp]);
        assert!(snapshot.is_down(InputAction::MoveUp));
        assert!(snapshot.first_pressed(InputAction::MoveUp));
        assert!(snapshot.any_first_pressed());
        assert!(!snapshot.is_down(InputAction::MoveDown));
    }

    #[test]
    fn held_key_is_only_first_pressed_once() {
        let mut tracker = InputTracker::new();
        tracker.capture([InputAction::MoveLeft]);
        let second = tracker.capture([InputAction::MoveLeft]);
        assert!(second.is_down(InputAction::MoveLeft));
        assert!(!second.first_pressed(InputAction::MoveLeft));
        assert!(!second.any_first_pressed());
    }

    #[test]
    fn release_all_rearms_first_press() {
        let mut tracker = InputTracker::new();
        tracker.capture([InputAction::Slot1]);
        tracker.release_all();
        let snapshot = tracker.capture([InputAction::Slot1]);
        assert!(snapshot.first_pressed(InputAction::Slot1));
    }

    #[test]
    fn quit_requested_follows_held_state() {
        let snapshot = InputSnapshot::empty().with_action_down(InputAction::Quit, true);
        assert!(snapshot.quit_requested());
        assert!(!snapshot.any_first_pressed());
    }

    #[test]
    fn builder_first_press_implies_held() {
        let snapshot = InputSnapshot::empty().with_first_pressed(InputAction::MoveRight, true);
        assert!(snapshot.is_down(InputAction::MoveRight));
        assert!(snapshot.first_pressed(InputAction::MoveRight));
    }
}
