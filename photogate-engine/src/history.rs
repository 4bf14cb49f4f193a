//! History browser
//!
//! Lists stored results under a fixed header, three at a time. Rotation
//! moves the selection. A click asks for confirmation and a second click
//! within `remove_confirm_ms` removes the selected entry; any other input
//! or the timeout cancels. Once the log is empty the browser shows
//! "no readings" and returns.
//!
//! ```text
//! row 0  n°|Timed(s)   |Type
//! row 1  00|002,500 000|Pen05
//! row 2  01|000,250 000|Solid
//! row 3
//! ```

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embedded_hal_async::delay::DelayNs;

use photogate_core::history::HistoryLog;
use photogate_core::input::ExperimentCommand;
use photogate_core::traits::{CharDisplay, CharDisplayExt, DisplayError};

use crate::arbiter::OutputArbiter;
use crate::channels::{CommandChannel, InterruptSignal};
use crate::experiment::{EngineContext, EngineError};
use crate::screen::COLUMNS;

/// Column header, `\x03` is the numero glyph
pub const HEADER: &str = "n\x03|Timed(s)   |Type";

/// Shown over the selected entry while a removal awaits confirmation
pub const REMOVE_PROMPT: &str = "Two Clicks to Remove";

/// Entries visible below the header
pub const VISIBLE_ROWS: usize = 3;

const HEADER_ROW: u8 = 0;
const FIRST_ENTRY_ROW: u8 = 1;

/// Browses and prunes the history log
pub struct HistoryBrowser<'c, M: RawMutex, D, Dl> {
    history: &'c mut HistoryLog,
    arbiter: &'c OutputArbiter<M, D>,
    commands: &'c CommandChannel<M>,
    delay: Dl,
    confirm_ms: u32,
    selected: usize,
    /// Index shown on the first entry row
    first: usize,
}

impl<'c, M, D, Dl> HistoryBrowser<'c, M, D, Dl>
where
    M: RawMutex,
    D: CharDisplay,
    Dl: DelayNs,
{
    pub fn new(
        history: &'c mut HistoryLog,
        arbiter: &'c OutputArbiter<M, D>,
        commands: &'c CommandChannel<M>,
        delay: Dl,
        confirm_ms: u32,
    ) -> Self {
        Self {
            history,
            arbiter,
            commands,
            delay,
            confirm_ms,
            selected: 0,
            first: 0,
        }
    }

    /// Browse the history held by the engine context
    pub fn from_context<C, S, K>(
        ctx: &'c mut EngineContext<'_, M, C, S, K, D>,
        delay: Dl,
    ) -> Self {
        let confirm_ms = ctx.config.timing.remove_confirm_ms;
        Self::new(&mut ctx.history, ctx.arbiter, ctx.commands, delay, confirm_ms)
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn history(&self) -> &HistoryLog {
        &*self.history
    }

    /// Browse until the log is empty
    pub async fn run(&mut self) -> Result<(), EngineError> {
        self.arbiter
            .with_lock(|display| {
                display.clear()?;
                display.text_at(0, HEADER_ROW, HEADER)?;
                display.set_cursor_visible(true)
            })
            .await?;

        while !self.history.is_empty() {
            self.scroll();
            self.draw_page().await?;

            match self.commands.receive().await {
                ExperimentCommand::Adjust(delta) => self.move_selection(delta),
                ExperimentCommand::Confirm => self.confirm_removal().await?,
                // Handled through the interrupt signal
                ExperimentCommand::Interrupt => {}
            }
        }

        info!("History empty");
        self.arbiter.with_lock(|display| draw_no_readings(display)).await?;
        Ok(())
    }

    /// Browse until the log is empty or the interrupt signal fires
    ///
    /// On interrupt the cursor is hidden; the selection is kept for the
    /// next call.
    pub async fn run_until_interrupted(
        &mut self,
        interrupt: &InterruptSignal<M>,
    ) -> Result<(), EngineError> {
        match select(self.run(), interrupt.wait()).await {
            Either::First(result) => result,
            Either::Second(()) => {
                debug!("History browser interrupted at entry {}", self.selected);
                self.arbiter
                    .with_lock(|display| display.set_cursor_visible(false))
                    .await?;
                Ok(())
            }
        }
    }

    fn move_selection(&mut self, delta: i8) {
        if delta > 0 {
            if self.selected + 1 < self.history.len() {
                self.selected += 1;
            }
        } else if delta < 0 {
            self.selected = self.selected.saturating_sub(1);
        }
    }

    /// Keep the selection inside the log and the visible window
    fn scroll(&mut self) {
        let last = self.history.len().saturating_sub(1);
        self.selected = self.selected.min(last);

        if self.selected <= self.first {
            self.first = self.selected;
        } else if self.selected >= self.first + VISIBLE_ROWS {
            self.first = self.selected + 1 - VISIBLE_ROWS;
        }
    }

    fn selected_row(&self) -> u8 {
        FIRST_ENTRY_ROW + (self.selected - self.first) as u8
    }

    async fn draw_page(&self) -> Result<(), DisplayError> {
        let history = &*self.history;
        let first = self.first;
        let cursor_row = self.selected_row();

        self.arbiter
            .with_lock(|display| {
                for slot in 0..VISIBLE_ROWS {
                    display.clear_row(FIRST_ENTRY_ROW + slot as u8, COLUMNS)?;
                    if let Some(line) = history.row(first + slot) {
                        display.put_text(&line)?;
                    }
                }
                display.goto(0, cursor_row)
            })
            .await
    }

    async fn confirm_removal(&mut self) -> Result<(), EngineError> {
        let row = self.selected_row();
        self.arbiter
            .with_lock(|display| {
                display.set_cursor_visible(false)?;
                display.text_at(0, row, REMOVE_PROMPT)
            })
            .await?;

        let commands = self.commands;
        let window = select(commands.receive(), self.delay.delay_ms(self.confirm_ms)).await;
        match window {
            Either::First(ExperimentCommand::Confirm) => {
                if let Some(removed) = self.history.remove_at(self.selected) {
                    info!(
                        "Removed entry {}: {} {}",
                        self.selected,
                        removed.elapsed(),
                        removed.label()
                    );
                }
            }
            Either::First(_) | Either::Second(()) => debug!("Removal cancelled"),
        }

        self.arbiter
            .with_lock(|display| display.set_cursor_visible(true))
            .await?;
        Ok(())
    }
}

fn draw_no_readings<D: CharDisplay + ?Sized>(display: &mut D) -> Result<(), DisplayError> {
    display.set_cursor_visible(false)?;
    display.clear()?;
    display.text_at(9, 1, "no")?;
    display.text_at(6, 2, "readings")
}
