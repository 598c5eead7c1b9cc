//! Mouse jiggler: nudge the pointer at random intervals so the host never
//! idles.
//!
//! Jiggler output goes to the console only. The loop never ends, so it
//! must not grow the execution log.

use alloc::format;
use core::time::Duration;

use rand::Rng;

use crate::board::{Board, StatusDisplay};
use crate::runtime::{Engine, RULE};
use crate::store::ScriptStore;

impl<B: Board, D: StatusDisplay, S: ScriptStore> Engine<B, D, S> {
    /// Startup indicator, banner, then [`jiggle_once`](Self::jiggle_once)
    /// forever.
    pub async fn run_jiggler(&mut self) {
        let cfg = self.settings.jiggler;
        if let Some((ms, repeats)) = cfg.startup_blink {
            self.blink(Duration::from_millis(ms), repeats).await;
        }
        self.board.print("");
        self.board.print("Running mouse jiggler");
        self.board.print(RULE);
        self.board.print(&format!(" > movement  = {} pixels", cfg.movement));
        self.board.print(&format!(" > delay min = {} seconds", cfg.delay_min_secs));
        self.board.print(&format!(" > delay max = {} seconds", cfg.delay_max_secs));
        self.board.print(RULE);
        loop {
            self.jiggle_once().await;
        }
    }

    /// Wait a random whole number of seconds, move up-left and back, then
    /// blink. Returns the wait in seconds.
    pub async fn jiggle_once(&mut self) -> u32 {
        let cfg = self.settings.jiggler;
        let lo = cfg.delay_min_secs.min(cfg.delay_max_secs);
        let hi = cfg.delay_min_secs.max(cfg.delay_max_secs);
        let wait = self.rng.gen_range(lo..=hi);

        self.board.print(&format!("waiting {} seconds...", wait));
        self.board.sleep(Duration::from_secs(wait.into())).await;

        self.board
            .print(&format!("jiggling mouse {} pixels", cfg.movement));
        let m = cfg.movement;
        self.mouse.move_by(&mut self.board, -m, -m, 0).await;
        self.mouse.move_by(&mut self.board, m, m, 0).await;

        if let Some(ms) = cfg.blink_ms {
            self.blink(Duration::from_millis(ms), 1).await;
        }
        wait
    }
}
