//! Host-side mocks shared by the engine tests

use core::cell::{Cell, RefCell};
use std::string::String;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;

use photogate_core::timing::EdgeAction;
use photogate_core::traits::{
    CharDisplay, Clock, CounterError, DisplayError, GlyphBitmap, ObstructionSensor, PulseCounter,
};

/// Observable state of [`MockCounter`]
#[derive(Debug, Default)]
pub struct CounterState {
    pub calls: Vec<&'static str>,
    pub enabled: bool,
    pub running: bool,
    pub rising: Option<EdgeAction>,
    pub falling: Option<EdgeAction>,
    pub glitch_filter_ns: u32,
    pub watch_points: Vec<i32>,
    pub count: i32,
    pub fail_start: bool,
}

/// Counter that records every call into shared state
pub struct MockCounter<'t> {
    state: &'t RefCell<CounterState>,
}

impl<'t> MockCounter<'t> {
    pub fn new(state: &'t RefCell<CounterState>) -> Self {
        Self { state }
    }

    fn record(&self, call: &'static str) -> core::cell::RefMut<'t, CounterState> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        state
    }
}

impl PulseCounter for MockCounter<'_> {
    fn enable(&mut self) -> Result<(), CounterError> {
        self.record("enable").enabled = true;
        Ok(())
    }

    fn disable(&mut self) -> Result<(), CounterError> {
        self.record("disable").enabled = false;
        Ok(())
    }

    fn set_edge_actions(
        &mut self,
        rising: EdgeAction,
        falling: EdgeAction,
    ) -> Result<(), CounterError> {
        let mut state = self.record("set_edge_actions");
        if state.enabled {
            return Err(CounterError::InvalidState);
        }
        state.rising = Some(rising);
        state.falling = Some(falling);
        Ok(())
    }

    fn set_glitch_filter(&mut self, max_glitch_ns: u32) -> Result<(), CounterError> {
        let mut state = self.record("set_glitch_filter");
        if state.enabled {
            return Err(CounterError::InvalidState);
        }
        state.glitch_filter_ns = max_glitch_ns;
        Ok(())
    }

    fn add_watch_point(&mut self, count: i32) -> Result<(), CounterError> {
        let mut state = self.record("add_watch_point");
        if state.watch_points.contains(&count) {
            return Err(CounterError::InvalidArgument);
        }
        state.watch_points.push(count);
        Ok(())
    }

    fn remove_watch_point(&mut self, count: i32) -> Result<(), CounterError> {
        let mut state = self.record("remove_watch_point");
        let index = state
            .watch_points
            .iter()
            .position(|&p| p == count)
            .ok_or(CounterError::NotFound)?;
        state.watch_points.remove(index);
        Ok(())
    }

    fn clear_count(&mut self) -> Result<(), CounterError> {
        self.record("clear_count").count = 0;
        Ok(())
    }

    fn start(&mut self) -> Result<(), CounterError> {
        let mut state = self.record("start");
        if state.fail_start {
            return Err(CounterError::Hardware);
        }
        state.running = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), CounterError> {
        self.record("stop").running = false;
        Ok(())
    }

    fn count(&self) -> i32 {
        self.state.borrow().count
    }
}

/// Sensor whose level is set by the test
pub struct MockSensor<'t> {
    pub obstructed: &'t Cell<bool>,
}

impl ObstructionSensor for MockSensor<'_> {
    fn is_obstructed(&mut self) -> bool {
        self.obstructed.get()
    }
}

/// Clock whose time is set by the test
pub struct MockClock<'t> {
    pub now_us: &'t Cell<u64>,
}

impl Clock for MockClock<'_> {
    fn now_us(&self) -> u64 {
        self.now_us.get()
    }
}

/// Delay that yields once instead of sleeping
///
/// Under `block_on` this lets a pending channel receive lose the race
/// against the timeout after a single poll.
#[derive(Debug, Default)]
pub struct YieldDelay {
    pub calls: usize,
}

impl DelayNs for YieldDelay {
    async fn delay_ns(&mut self, _ns: u32) {
        self.calls += 1;
        embassy_futures::yield_now().await;
    }
}

pub const COLUMNS: usize = 20;
pub const ROWS: usize = 4;

/// 20x4 character buffer
#[derive(Debug)]
pub struct BufferDisplay {
    pub cells: [[u8; COLUMNS]; ROWS],
    pub col: usize,
    pub row: usize,
    pub cursor_visible: bool,
    pub glyphs: [Option<GlyphBitmap>; 8],
    pub writes: usize,
}

impl BufferDisplay {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLUMNS]; ROWS],
            col: 0,
            row: 0,
            cursor_visible: false,
            glyphs: [None; 8],
            writes: 0,
        }
    }

    /// Row contents, custom glyph codes kept as control characters
    pub fn row_text(&self, row: usize) -> String {
        self.cells[row].iter().map(|&b| b as char).collect()
    }

    pub fn text(&self, col: usize, row: usize, len: usize) -> String {
        self.row_text(row).chars().skip(col).take(len).collect()
    }

    pub fn cell(&self, col: usize, row: usize) -> u8 {
        self.cells[row][col]
    }
}

impl CharDisplay for BufferDisplay {
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.cells = [[b' '; COLUMNS]; ROWS];
        self.col = 0;
        self.row = 0;
        Ok(())
    }

    fn goto(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col as usize >= COLUMNS || row as usize >= ROWS {
            return Err(DisplayError::OutOfBounds);
        }
        self.col = col as usize;
        self.row = row as usize;
        Ok(())
    }

    fn put_text(&mut self, text: &str) -> Result<(), DisplayError> {
        for byte in text.bytes() {
            self.put_char(byte)?;
        }
        Ok(())
    }

    fn put_char(&mut self, code: u8) -> Result<(), DisplayError> {
        // Past the last column the controller discards the write
        if self.col < COLUMNS {
            self.cells[self.row][self.col] = code;
        }
        self.col += 1;
        self.writes += 1;
        Ok(())
    }

    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError> {
        self.cursor_visible = visible;
        Ok(())
    }

    fn upload_glyph(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError> {
        let entry = self
            .glyphs
            .get_mut(slot as usize)
            .ok_or(DisplayError::OutOfBounds)?;
        *entry = Some(*bitmap);
        Ok(())
    }
}
