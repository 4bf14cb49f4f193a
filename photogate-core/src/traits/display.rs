//! Character display trait for the shared output sink

/// Errors that can occur while writing to the display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Bus/expander write failed
    Bus,
    /// Position or glyph slot outside the display geometry
    OutOfBounds,
}

/// 5x8 custom character bitmap, one byte per pixel row
pub type GlyphBitmap = [u8; 8];

/// Custom glyph slots (CGRAM character codes)
pub mod glyph {
    /// Loading arrow
    pub const LOAD: u8 = 0;
    /// Subscript "e" (outer radius)
    pub const SUBSCRIPT_E: u8 = 1;
    /// Subscript "i" (inner radius)
    pub const SUBSCRIPT_I: u8 = 2;
    /// Numero sign
    pub const NUMERO: u8 = 3;
    /// Hourglass animation frames, in display order
    pub const HOURGLASS: [u8; 4] = [4, 5, 6, 7];
    /// Hourglass shown while no run is in progress
    pub const HOURGLASS_IDLE: u8 = 7;
    /// Number of custom glyph slots
    pub const SLOTS: usize = 8;
}

/// Trait for a character LCD (HD44780-style)
///
/// Every call must happen while the output lock is held; the trait itself
/// does no locking.
pub trait CharDisplay {
    /// Clear the entire screen and home the cursor
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Move the write position
    ///
    /// - `col`: Column (0-based)
    /// - `row`: Row (0-based)
    fn goto(&mut self, col: u8, row: u8) -> Result<(), DisplayError>;

    /// Write text at the current position
    fn put_text(&mut self, text: &str) -> Result<(), DisplayError>;

    /// Write a single character code (custom glyphs use codes 0-7)
    fn put_char(&mut self, code: u8) -> Result<(), DisplayError>;

    /// Show or hide the underline cursor
    fn set_cursor_visible(&mut self, visible: bool) -> Result<(), DisplayError>;

    /// Store a custom glyph in CGRAM slot 0-7
    fn upload_glyph(&mut self, slot: u8, bitmap: &GlyphBitmap) -> Result<(), DisplayError>;
}

/// Helper trait for positioned writes
pub trait CharDisplayExt: CharDisplay {
    /// Write text starting at a position
    fn text_at(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        self.goto(col, row)?;
        self.put_text(text)
    }

    /// Write one character code at a position
    fn char_at(&mut self, col: u8, row: u8, code: u8) -> Result<(), DisplayError> {
        self.goto(col, row)?;
        self.put_char(code)
    }

    /// Blank a row of `width` columns and leave the cursor at its start
    fn clear_row(&mut self, row: u8, width: u8) -> Result<(), DisplayError> {
        self.goto(0, row)?;
        for _ in 0..width {
            self.put_char(b' ')?;
        }
        self.goto(0, row)
    }
}

// Blanket implementation for all CharDisplay types
impl<T: CharDisplay + ?Sized> CharDisplayExt for T {}
