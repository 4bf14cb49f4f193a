//! Raw encoder events and the commands derived from them

/// Raw event from the rotary encoder driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Encoder rotated by a number of detents (positive = clockwise)
    Rotate(i8),
    /// Button pressed down
    Press,
    /// Button released
    Release,
    /// Short press
    Click,
    /// Long press
    LongPress,
}

impl InputEvent {
    /// One detent in the direction of rotation; zero for button events
    /// and empty rotations
    pub fn rotation_delta(&self) -> i8 {
        match self {
            InputEvent::Rotate(delta) => delta.signum(),
            _ => 0,
        }
    }
}

/// Command for the menu layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavigationCommand {
    Select,
    Back,
    Up,
    Down,
}

/// Command for the running experiment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ExperimentCommand {
    /// One detent of parameter adjustment (-1 or +1)
    Adjust(i8),
    /// Confirm the parameter, or leave a finished run
    Confirm,
    /// Forced exit requested from outside the experiment
    Interrupt,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_delta() {
        assert_eq!(InputEvent::Rotate(3).rotation_delta(), 1);
        assert_eq!(InputEvent::Rotate(-2).rotation_delta(), -1);
        assert_eq!(InputEvent::Rotate(0).rotation_delta(), 0);
        assert_eq!(InputEvent::Click.rotation_delta(), 0);
    }
}
