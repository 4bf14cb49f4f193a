//! Light-barrier obstruction sensor trait

/// Binary light-barrier state, polled (not interrupt driven)
///
/// Takes `&mut self` because pin reads typically require mutable access.
pub trait ObstructionSensor {
    /// True while something blocks the beam
    fn is_obstructed(&mut self) -> bool;

    /// True while the beam reaches the receiver
    fn is_clear(&mut self) -> bool {
        !self.is_obstructed()
    }
}
