//! Input dispatch task
//!
//! Feeds every raw encoder event through
//! [`route`](photogate_core::input::route) and forwards the results. The
//! ownership flag is set by the menu layer when it hands control to an
//! experiment.

use core::cell::Cell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;

use photogate_core::input::{route, ExperimentCommand, InputEvent};

use crate::channels::{CommandChannel, InputChannel, InterruptSignal, NavigationChannel};

/// Splits one input stream between menu and experiment
pub struct InputRouter<'a, M: RawMutex> {
    owned: BlockingMutex<M, Cell<bool>>,
    commands: &'a CommandChannel<M>,
    navigation: &'a NavigationChannel<M>,
    interrupt: &'a InterruptSignal<M>,
}

impl<'a, M: RawMutex> InputRouter<'a, M> {
    pub const fn new(
        commands: &'a CommandChannel<M>,
        navigation: &'a NavigationChannel<M>,
        interrupt: &'a InterruptSignal<M>,
    ) -> Self {
        Self {
            owned: BlockingMutex::new(Cell::new(false)),
            commands,
            navigation,
            interrupt,
        }
    }

    /// Hand the input to an experiment
    ///
    /// Clears any interrupt left over from the previous owner, so only a
    /// long press from here on ends the new run.
    pub fn claim(&self) {
        self.interrupt.reset();
        self.owned.lock(|owned| owned.set(true));
    }

    /// Give the input back to the menu
    pub fn release(&self) {
        self.owned.lock(|owned| owned.set(false));
    }

    pub fn is_owned(&self) -> bool {
        self.owned.lock(|owned| owned.get())
    }

    /// Route one event; never blocks
    pub fn dispatch(&self, event: InputEvent) {
        let (navigation, command) = route(event, self.is_owned());

        match command {
            Some(ExperimentCommand::Interrupt) => {
                info!("Experiment interrupted by long press");
                self.release();
                self.interrupt.signal(());
            }
            Some(command) => {
                if self.commands.try_send(command).is_err() {
                    warn!("Command channel full, dropping {:?}", command);
                }
            }
            None => {}
        }

        if let Some(navigation) = navigation {
            if self.navigation.try_send(navigation).is_err() {
                warn!("Navigation channel full, dropping {:?}", navigation);
            }
        }
    }

    /// Dispatch task body; never returns
    pub async fn run(&self, input: &InputChannel<M>) {
        loop {
            let event = input.receive().await;
            trace!("Input: {:?}", event);
            self.dispatch(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_futures::select::{select, Either};
    use embassy_sync::blocking_mutex::raw::NoopRawMutex;
    use photogate_core::input::NavigationCommand;

    struct Fixture {
        commands: CommandChannel<NoopRawMutex>,
        navigation: NavigationChannel<NoopRawMutex>,
        interrupt: InterruptSignal<NoopRawMutex>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                commands: CommandChannel::new(),
                navigation: NavigationChannel::new(),
                interrupt: InterruptSignal::new(),
            }
        }

        fn router(&self) -> InputRouter<'_, NoopRawMutex> {
            InputRouter::new(&self.commands, &self.navigation, &self.interrupt)
        }
    }

    #[test]
    fn test_menu_gets_events_when_free() {
        let fixture = Fixture::new();
        let router = fixture.router();

        router.dispatch(InputEvent::Rotate(1));
        router.dispatch(InputEvent::Click);

        assert_eq!(fixture.navigation.try_receive(), Ok(NavigationCommand::Up));
        assert_eq!(fixture.navigation.try_receive(), Ok(NavigationCommand::Select));
        assert!(fixture.commands.try_receive().is_err());
    }

    #[test]
    fn test_experiment_gets_events_when_owned() {
        let fixture = Fixture::new();
        let router = fixture.router();
        router.claim();

        router.dispatch(InputEvent::Rotate(-3));
        router.dispatch(InputEvent::Press);
        router.dispatch(InputEvent::Click);

        assert_eq!(fixture.commands.try_receive(), Ok(ExperimentCommand::Adjust(-1)));
        assert_eq!(fixture.commands.try_receive(), Ok(ExperimentCommand::Confirm));
        assert!(fixture.commands.try_receive().is_err());
        assert!(fixture.navigation.try_receive().is_err());
    }

    #[test]
    fn test_long_press_interrupts_and_releases() {
        let fixture = Fixture::new();
        let router = fixture.router();
        router.claim();

        router.dispatch(InputEvent::LongPress);

        assert!(!router.is_owned());
        assert!(fixture.interrupt.signaled());
        assert_eq!(fixture.navigation.try_receive(), Ok(NavigationCommand::Back));
        assert!(fixture.commands.try_receive().is_err());
    }

    #[test]
    fn test_claim_clears_stale_interrupt() {
        let fixture = Fixture::new();
        let router = fixture.router();
        fixture.interrupt.signal(());

        router.claim();
        assert!(!fixture.interrupt.signaled());

        router.dispatch(InputEvent::LongPress);
        assert!(fixture.interrupt.signaled());
    }

    #[test]
    fn test_full_command_channel_drops() {
        let fixture = Fixture::new();
        let router = fixture.router();
        router.claim();

        for _ in 0..7 {
            router.dispatch(InputEvent::Rotate(1));
        }

        let mut received = 0;
        while fixture.commands.try_receive().is_ok() {
            received += 1;
        }
        assert_eq!(received, crate::channels::COMMAND_CHANNEL_SIZE);
    }

    #[test]
    fn test_run_forwards_input() {
        let fixture = Fixture::new();
        let router = fixture.router();
        let input = InputChannel::<NoopRawMutex>::new();

        input.try_send(InputEvent::LongPress).unwrap();

        let outcome = block_on(select(router.run(&input), fixture.navigation.receive()));
        match outcome {
            Either::First(()) => panic!("router task returned"),
            Either::Second(command) => assert_eq!(command, NavigationCommand::Back),
        }
    }
}
