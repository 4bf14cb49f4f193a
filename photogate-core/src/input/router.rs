//! Pure routing of raw events

use super::events::{ExperimentCommand, InputEvent, NavigationCommand};

/// Outcome of routing one raw event
pub type Routed = (Option<NavigationCommand>, Option<ExperimentCommand>);

/// Route a raw event given whether an experiment owns the input
///
/// Press and release edges never escape. A long press while an experiment
/// runs produces both a navigation `Back` and an experiment `Interrupt`.
pub fn route(event: InputEvent, owned: bool) -> Routed {
    match (event, owned) {
        (InputEvent::Press | InputEvent::Release, _) => (None, None),

        (InputEvent::Click, false) => (Some(NavigationCommand::Select), None),
        (InputEvent::LongPress, false) => (Some(NavigationCommand::Back), None),
        (InputEvent::Rotate(_), false) => match event.rotation_delta() {
            1 => (Some(NavigationCommand::Up), None),
            -1 => (Some(NavigationCommand::Down), None),
            _ => (None, None),
        },

        (InputEvent::Click, true) => (None, Some(ExperimentCommand::Confirm)),
        (InputEvent::LongPress, true) => (
            Some(NavigationCommand::Back),
            Some(ExperimentCommand::Interrupt),
        ),
        (InputEvent::Rotate(_), true) => match event.rotation_delta() {
            0 => (None, None),
            sign => (None, Some(ExperimentCommand::Adjust(sign))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_release_swallowed() {
        for owned in [false, true] {
            assert_eq!(route(InputEvent::Press, owned), (None, None));
            assert_eq!(route(InputEvent::Release, owned), (None, None));
        }
    }

    #[test]
    fn test_navigation_when_free() {
        assert_eq!(
            route(InputEvent::Click, false),
            (Some(NavigationCommand::Select), None)
        );
        assert_eq!(
            route(InputEvent::LongPress, false),
            (Some(NavigationCommand::Back), None)
        );
        assert_eq!(
            route(InputEvent::Rotate(2), false),
            (Some(NavigationCommand::Up), None)
        );
        assert_eq!(
            route(InputEvent::Rotate(-1), false),
            (Some(NavigationCommand::Down), None)
        );
        assert_eq!(route(InputEvent::Rotate(0), false), (None, None));
    }

    #[test]
    fn test_experiment_when_owned() {
        assert_eq!(
            route(InputEvent::Click, true),
            (None, Some(ExperimentCommand::Confirm))
        );
        assert_eq!(
            route(InputEvent::Rotate(5), true),
            (None, Some(ExperimentCommand::Adjust(1)))
        );
        assert_eq!(
            route(InputEvent::Rotate(-5), true),
            (None, Some(ExperimentCommand::Adjust(-1)))
        );
        assert_eq!(route(InputEvent::Rotate(0), true), (None, None));
    }

    #[test]
    fn test_long_press_interrupts_owner() {
        assert_eq!(
            route(InputEvent::LongPress, true),
            (
                Some(NavigationCommand::Back),
                Some(ExperimentCommand::Interrupt)
            )
        );
    }
}
