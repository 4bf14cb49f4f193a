//! Hardware abstraction traits
//!
//! These traits define the interface between the measurement logic
//! and board-specific implementations.

pub mod clock;
pub mod counter;
pub mod display;
pub mod sensor;

pub use clock::Clock;
pub use counter::{CounterError, PulseCounter};
pub use display::{glyph, CharDisplay, CharDisplayExt, DisplayError, GlyphBitmap};
pub use sensor::ObstructionSensor;
