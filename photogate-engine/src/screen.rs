//! Experiment screen layout
//!
//! 20x4 character LCD:
//!
//! ```text
//! row 0        Pendulum
//! row 1  Periods: n°03/n°05      (or "Shape: Solid")
//! row 2     X ~001,234 567s      (hourglass at col 3, time at col 5)
//! row 3      !!Timing!!
//! ```
//!
//! All functions expect the caller to hold the output lock.

use photogate_core::stage::Stage;
use photogate_core::timing::{format_elapsed, format_periods, TimingProfile};
use photogate_core::traits::{glyph, CharDisplay, CharDisplayExt, DisplayError, GlyphBitmap};

pub const COLUMNS: u8 = 20;
pub const ROWS: u8 = 4;

const TITLE_ROW: u8 = 0;
const PARAMETER_ROW: u8 = 1;
const TIME_ROW: u8 = 2;
const STATUS_ROW: u8 = 3;

/// Hourglass position
pub const HOURGLASS_COL: u8 = 3;
pub const HOURGLASS_ROW: u8 = TIME_ROW;

const ESTIMATE_MARK_COL: u8 = 4;
const TIME_COL: u8 = 5;

const CURRENT_PERIODS_COL: u8 = 12;
const TARGET_PERIODS_COL: u8 = 17;
const PERIODS_CURSOR_COL: u8 = 16;
const SHAPE_COL: u8 = 8;
const SHAPE_CURSOR_COL: u8 = 7;
const SHAPE_WIDTH: usize = 5;

/// Custom glyph bitmaps, indexed by CGRAM slot
pub const GLYPHS: [GlyphBitmap; glyph::SLOTS] = [
    // Loading arrow
    [0x18, 0x1C, 0x10, 0x1C, 0x1E, 0x18, 0x1E, 0x18],
    // Subscript e
    [0x00, 0x00, 0x00, 0x0C, 0x12, 0x1C, 0x10, 0x0E],
    // Subscript i
    [0x00, 0x00, 0x00, 0x08, 0x18, 0x08, 0x08, 0x0C],
    // Numero
    [0x0C, 0x12, 0x12, 0x0C, 0x00, 0x1E, 0x00, 0x00],
    // Hourglass frames
    [0x1F, 0x1F, 0x0E, 0x04, 0x04, 0x0A, 0x11, 0x1F],
    [0x1F, 0x1B, 0x0E, 0x04, 0x04, 0x0E, 0x11, 0x1F],
    [0x1F, 0x11, 0x0E, 0x04, 0x04, 0x0E, 0x1B, 0x1F],
    [0x1F, 0x11, 0x0A, 0x04, 0x04, 0x0E, 0x1F, 0x1F],
];

/// Upload every custom glyph
pub fn load_glyphs<D: CharDisplay + ?Sized>(display: &mut D) -> Result<(), DisplayError> {
    for (slot, bitmap) in GLYPHS.iter().enumerate() {
        display.upload_glyph(slot as u8, bitmap)?;
    }
    Ok(())
}

/// Draw the full experiment screen for `profile`
pub fn draw_layout<D: CharDisplay + ?Sized>(
    display: &mut D,
    profile: &TimingProfile,
) -> Result<(), DisplayError> {
    display.clear()?;

    let title = profile.title();
    let title_col = (COLUMNS as usize).saturating_sub(title.len()) / 2;
    display.text_at(title_col as u8, TITLE_ROW, title)?;

    display.goto(1, PARAMETER_ROW)?;
    match profile.target_periods() {
        Some(_) => {
            display.put_text("Periods: n")?;
            display.put_char(glyph::NUMERO)?;
            display.put_text("00/n")?;
            display.put_char(glyph::NUMERO)?;
        }
        None => display.put_text("Shape: ")?,
    }

    draw_idle_glyph(display)?;
    draw_elapsed(display, 0, false)?;
    draw_parameter(display, profile)
}

/// Redraw the user parameter and park the cursor before it
pub fn draw_parameter<D: CharDisplay + ?Sized>(
    display: &mut D,
    profile: &TimingProfile,
) -> Result<(), DisplayError> {
    match (profile.target_periods(), profile) {
        (Some(periods), _) => {
            display.text_at(TARGET_PERIODS_COL, PARAMETER_ROW, &format_periods(periods))?;
            display.goto(PERIODS_CURSOR_COL, PARAMETER_ROW)
        }
        (None, TimingProfile::Energy { shape }) => {
            let label = shape.label();
            display.text_at(SHAPE_COL, PARAMETER_ROW, label)?;
            for _ in label.len()..SHAPE_WIDTH {
                display.put_char(b' ')?;
            }
            display.goto(SHAPE_CURSOR_COL, PARAMETER_ROW)
        }
        (None, _) => Ok(()),
    }
}

/// Live period counter
pub fn draw_periods<D: CharDisplay + ?Sized>(
    display: &mut D,
    periods: u8,
) -> Result<(), DisplayError> {
    display.text_at(CURRENT_PERIODS_COL, PARAMETER_ROW, &format_periods(periods))
}

/// Elapsed time; `estimate` marks a live value that will not be recorded
pub fn draw_elapsed<D: CharDisplay + ?Sized>(
    display: &mut D,
    elapsed_us: u64,
    estimate: bool,
) -> Result<(), DisplayError> {
    let mark = if estimate { b'~' } else { b' ' };
    display.char_at(ESTIMATE_MARK_COL, TIME_ROW, mark)?;
    display.text_at(TIME_COL, TIME_ROW, &format_elapsed(elapsed_us))?;
    display.put_char(b's')
}

/// Status line for a stage
pub fn draw_status<D: CharDisplay + ?Sized>(
    display: &mut D,
    stage: Stage,
) -> Result<(), DisplayError> {
    display.text_at(0, STATUS_ROW, stage.status_text())
}

/// Hourglass shown between runs
pub fn draw_idle_glyph<D: CharDisplay + ?Sized>(display: &mut D) -> Result<(), DisplayError> {
    display.char_at(HOURGLASS_COL, HOURGLASS_ROW, glyph::HOURGLASS_IDLE)
}

/// One animation frame
pub fn draw_hourglass<D: CharDisplay + ?Sized>(
    display: &mut D,
    frame: usize,
) -> Result<(), DisplayError> {
    let code = glyph::HOURGLASS[frame % glyph::HOURGLASS.len()];
    display.char_at(HOURGLASS_COL, HOURGLASS_ROW, code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::BufferDisplay;
    use photogate_core::timing::Shape;

    #[test]
    fn test_pendulum_layout() {
        let mut display = BufferDisplay::new();
        draw_layout(&mut display, &TimingProfile::pendulum(5)).unwrap();

        assert_eq!(display.text(6, 0, 8), "Pendulum");
        assert_eq!(display.text(1, 1, 18), "Periods: n\x0300/n\x0305");
        assert_eq!(display.cell(3, 2), glyph::HOURGLASS_IDLE);
        assert_eq!(display.text(4, 2, 13), " 000,000 000s");
        assert_eq!((display.col, display.row), (16, 1));
    }

    #[test]
    fn test_energy_layout() {
        let mut display = BufferDisplay::new();
        draw_layout(&mut display, &TimingProfile::energy(Shape::Solid)).unwrap();

        assert_eq!(display.text(1, 0, 18), "Mechanical  Energy");
        assert_eq!(display.text(1, 1, 12), "Shape: Solid");
    }

    #[test]
    fn test_shape_redraw_clears_longer_label() {
        let mut display = BufferDisplay::new();
        draw_parameter(&mut display, &TimingProfile::energy(Shape::Solid)).unwrap();
        draw_parameter(&mut display, &TimingProfile::energy(Shape::DoubleInner)).unwrap();

        assert_eq!(display.text(8, 1, 5), "2R\x02  ");
        assert_eq!((display.col, display.row), (7, 1));
    }

    #[test]
    fn test_estimate_marker() {
        let mut display = BufferDisplay::new();
        draw_elapsed(&mut display, 1_234_567, true).unwrap();
        assert_eq!(display.text(4, 2, 13), "~001,234 567s");

        draw_elapsed(&mut display, 2_500_000, false).unwrap();
        assert_eq!(display.text(4, 2, 13), " 002,500 000s");
    }

    #[test]
    fn test_status_rows() {
        let mut display = BufferDisplay::new();
        draw_status(&mut display, Stage::Waiting).unwrap();
        assert_eq!(display.row_text(3), "     !!Waiting!!    ");
    }

    #[test]
    fn test_hourglass_frames_wrap() {
        let mut display = BufferDisplay::new();
        draw_hourglass(&mut display, 5).unwrap();
        assert_eq!(display.cell(3, 2), glyph::HOURGLASS[1]);
    }

    #[test]
    fn test_load_glyphs() {
        let mut display = BufferDisplay::new();
        load_glyphs(&mut display).unwrap();

        assert_eq!(display.glyphs[glyph::NUMERO as usize], Some(GLYPHS[3]));
        assert!(display.glyphs.iter().all(|g| g.is_some()));
    }
}
