//! Script runtime: the [`Engine`] and its run loop.
//!
//! The engine owns everything a run touches: interpreter state, the three
//! device emulators, the RNG, the execution log and the board
//! capabilities. Every entry point takes `&mut self`, so two runs can never
//! interleave.
//!
//! ```text
//! run_script / run_source ─┐
//!                          ├─► run_lines ─► dispatch (per line) ─► handlers
//!              IMPORT ─────┘        ▲                                  │
//!                                   └──────────── run_nested ◄─────────┘
//! ```

use alloc::boxed::Box;
use alloc::format;
use core::fmt;
use core::future::Future;
use core::pin::Pin;
use core::time::Duration;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::board::{Board, Slot, StatusDisplay};
use crate::config::{Settings, MAX_IMPORT_DEPTH};
use crate::dispatch::{Keyword, Line};
use crate::error::{Error, Result};
use crate::exec_log::{Elapsed, ExecutionLog};
use crate::hid::{ConsumerControl, Keyboard, Mouse};
use crate::state::InterpreterState;
use crate::store::ScriptStore;

/// Horizontal rule under run headers and above run footers.
pub(crate) const RULE: &str = "--------------------------------";

/// Per-invocation bookkeeping (one per top-level run and per IMPORT).
struct ScriptContext<'a> {
    label: &'a str,
    /// Last non-REPEAT line, replayed by `REPEAT`.
    previous_line: &'a str,
    line_count: usize,
    started: Duration,
}

pub struct Engine<B, D, S> {
    pub(crate) board: B,
    pub(crate) display: D,
    pub(crate) store: S,
    pub(crate) settings: Settings,
    pub(crate) state: InterpreterState,
    pub(crate) keyboard: Keyboard,
    pub(crate) mouse: Mouse,
    pub(crate) consumer: ConsumerControl,
    pub(crate) rng: SmallRng,
    pub(crate) log: ExecutionLog,
    /// Nested `IMPORT`s currently running.
    pub(crate) import_depth: usize,
}

impl<B: Board, D: StatusDisplay, S: ScriptStore> Engine<B, D, S> {
    /// Build an engine from boot settings. Fails only if the configured
    /// locale does not exist.
    pub fn new(board: B, display: D, store: S, settings: Settings, seed: u64) -> Result<Self> {
        let state = InterpreterState::new(&settings)?;
        Ok(Self {
            board,
            display,
            store,
            settings,
            state,
            keyboard: Keyboard::new(),
            mouse: Mouse::new(),
            consumer: ConsumerControl::new(),
            rng: SmallRng::seed_from_u64(seed),
            log: ExecutionLog::new(),
            import_depth: 0,
        })
    }

    pub fn board(&self) -> &B {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut self.board
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn state(&self) -> &InterpreterState {
        &self.state
    }

    /// Log of the most recent top-level run.
    pub fn log(&self) -> &ExecutionLog {
        &self.log
    }

    /// Run a stored script as a top-level run.
    pub async fn run_script(&mut self, name: &str) -> Result<()> {
        match self.store.load(name).await {
            Some(source) => self.run_source(name, &source).await,
            None => {
                self.log.clear();
                let err = Error::ScriptNotFound(name.into());
                self.report_abort(&err);
                Err(err)
            }
        }
    }

    /// Run `source` as a top-level run labelled `label`.
    ///
    /// Clears the execution log and the cumulative delay first. On failure
    /// the abort reason is logged and whatever was logged before it stays.
    pub async fn run_source(&mut self, label: &str, source: &str) -> Result<()> {
        info!("run: {}", label);
        self.log.clear();
        self.state.cumulative_delay = Duration::ZERO;
        self.import_depth = 0;
        self.display.render(label, Slot::Top, true);
        self.display.render("... running ...", Slot::Bottom, false);

        let result = self.run_lines(label, source, true).await;
        if let Err(err) = &result {
            self.report_abort(err);
            self.display.render("aborted", Slot::Bottom, false);
        }
        result
    }

    /// Print `line` on the console and append it to the execution log.
    pub(crate) fn echo(&mut self, line: &str) {
        self.board.print(line);
        self.log.push(line);
    }

    pub(crate) fn echo_fmt(&mut self, args: fmt::Arguments<'_>) {
        let line = alloc::fmt::format(args);
        self.echo(&line);
    }

    pub(crate) fn report_abort(&mut self, err: &Error) {
        error!("run aborted: {}", err);
        self.echo_fmt(format_args!(" -> Aborted: {}", err));
    }

    /// Suspend for `duration` and count it toward the cumulative delay.
    pub(crate) async fn suspend(&mut self, duration: Duration) {
        if !duration.is_zero() {
            self.board.sleep(duration).await;
        }
        self.state.add_delay(duration);
    }

    async fn apply_default_delay(&mut self) {
        let delay = self.state.default_delay;
        self.suspend(delay).await;
    }

    /// `IMPORT`: run a stored script inside the current run.
    pub(crate) async fn import(&mut self, name: &str) -> Result<()> {
        let source = self
            .store
            .load(name)
            .await
            .ok_or_else(|| Error::ScriptNotFound(name.into()))?;
        if self.import_depth >= MAX_IMPORT_DEPTH {
            return Err(Error::ImportTooDeep(name.into()));
        }
        self.import_depth += 1;
        let result = self.run_nested(name, &source).await;
        self.import_depth -= 1;
        result
    }

    // Boxed to break the run_lines -> dispatch -> import -> run_lines cycle.
    fn run_nested<'a>(
        &'a mut self,
        label: &'a str,
        source: &'a str,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + 'a>> {
        Box::pin(self.run_lines(label, source, false))
    }

    async fn run_lines(&mut self, label: &str, source: &str, top_level: bool) -> Result<()> {
        if !top_level {
            self.echo("");
        }
        self.echo_fmt(format_args!("Running {}", label));
        self.echo(RULE);

        let mut ctx = ScriptContext {
            label,
            previous_line: "",
            line_count: 0,
            started: self.board.now(),
        };

        for line in source.lines() {
            let line = line.trim_end();
            ctx.line_count += 1;
            if Line::parse(line).keyword() == Some(Keyword::Repeat) {
                let count = repeat_count(line)?;
                for _ in 0..count {
                    self.dispatch(ctx.previous_line).await?;
                    self.apply_default_delay().await;
                }
            } else {
                self.dispatch(line).await?;
                ctx.previous_line = line;
            }
            self.apply_default_delay().await;
        }

        self.finish(&ctx, top_level);
        Ok(())
    }

    fn finish(&mut self, ctx: &ScriptContext<'_>, top_level: bool) {
        let elapsed = self.board.now().saturating_sub(ctx.started);
        self.echo(RULE);
        self.echo_fmt(format_args!(
            " -> Finished {}. Processed {} lines in {}.",
            ctx.label,
            ctx.line_count,
            Elapsed(elapsed)
        ));
        if top_level {
            let status = format!("finished in {:.2}s", elapsed.as_secs_f32());
            self.display.render(&status, Slot::Bottom, false);
            let total = self.state.cumulative_delay.as_secs_f32();
            self.echo_fmt(format_args!(
                " -> All delays (commands and default delay) summed up to {:.2} seconds.",
                total
            ));
        }
        self.echo("");
    }
}

fn repeat_count(line: &str) -> Result<u32> {
    let arg = Line::parse(line)
        .arg(0)
        .ok_or_else(|| Error::missing_argument("REPEAT"))?;
    arg.parse().map_err(|_| Error::invalid_number("REPEAT", arg))
}

impl<B, D, S> fmt::Debug for Engine<B, D, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("log_lines", &self.log.len())
            .finish_non_exhaustive()
    }
}
