//! Shared fixtures for integration tests.
//!
//! [`MockBoard`] stands in for the whole device: a virtual clock that only
//! moves when something sleeps, recorded HID reports and console lines, a
//! status LED, host lock LEDs and scripted Wi-Fi scan results.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::time::Duration;

use embassy_futures::block_on;
use hidscript::hid::{ConsumerReport, KeyboardReport, LockLed, MouseReport};
use hidscript::{
    AccessPoint, Clock, Console, Engine, HidReport, HidTransport, LockLeds, MemoryStore,
    Result, Settings, Slot, StatusDisplay, StatusLed, WifiScanner,
};

#[derive(Default)]
pub struct MockBoard {
    pub now: Duration,
    pub sleeps: Vec<Duration>,
    pub reports: Vec<HidReport>,
    pub console: Vec<String>,
    pub led: bool,
    /// Every value written to the status LED.
    pub led_writes: Vec<bool>,
    /// Host LED output report byte.
    pub lock_leds: u8,
    /// Replace `lock_leds` once this many sleeps have happened.
    pub lock_leds_after: Option<(usize, u8)>,
    /// One entry per scan; an exhausted queue scans empty.
    pub scans: VecDeque<Vec<AccessPoint>>,
    pub scan_count: usize,
}

impl HidTransport for MockBoard {
    async fn send(&mut self, report: HidReport) {
        self.reports.push(report);
    }
}

impl Clock for MockBoard {
    fn now(&self) -> Duration {
        self.now
    }

    async fn sleep(&mut self, duration: Duration) {
        self.now += duration;
        self.sleeps.push(duration);
        if let Some((after, value)) = self.lock_leds_after {
            if self.sleeps.len() >= after {
                self.lock_leds = value;
            }
        }
    }
}

impl Console for MockBoard {
    fn print(&mut self, line: &str) {
        self.console.push(line.to_owned());
    }
}

impl StatusLed for MockBoard {
    fn status_led(&self) -> bool {
        self.led
    }

    fn set_status_led(&mut self, on: bool) {
        self.led = on;
        self.led_writes.push(on);
    }
}

impl LockLeds for MockBoard {
    fn lock_led_on(&self, led: LockLed) -> bool {
        led.is_set(self.lock_leds)
    }
}

impl WifiScanner for MockBoard {
    async fn scan(&mut self) -> Vec<AccessPoint> {
        self.scan_count += 1;
        self.scans.pop_front().unwrap_or_default()
    }
}

impl MockBoard {
    pub fn keyboard_reports(&self) -> Vec<KeyboardReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                HidReport::Keyboard(k) => Some(*k),
                _ => None,
            })
            .collect()
    }

    pub fn mouse_reports(&self) -> Vec<MouseReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                HidReport::Mouse(m) => Some(*m),
                _ => None,
            })
            .collect()
    }

    pub fn consumer_reports(&self) -> Vec<ConsumerReport> {
        self.reports
            .iter()
            .filter_map(|r| match r {
                HidReport::Consumer(c) => Some(*c),
                _ => None,
            })
            .collect()
    }

    /// How many times `code` went down as a non-modifier key.
    pub fn presses_of(&self, code: u8) -> usize {
        let mut count = 0;
        let mut held = false;
        for report in self.keyboard_reports() {
            let now = report.keycodes.contains(&code);
            if now && !held {
                count += 1;
            }
            held = now;
        }
        count
    }

    pub fn total_sleep(&self) -> Duration {
        self.sleeps.iter().sum()
    }
}

/// Display that remembers every render call.
#[derive(Default)]
pub struct RecordingDisplay {
    pub renders: Vec<(String, Slot, bool)>,
}

impl StatusDisplay for RecordingDisplay {
    fn render(&mut self, text: &str, slot: Slot, clear: bool) {
        self.renders.push((text.to_owned(), slot, clear));
    }
}

pub type TestEngine = Engine<MockBoard, RecordingDisplay, MemoryStore>;

pub fn engine_with(board: MockBoard, store: MemoryStore) -> TestEngine {
    Engine::new(board, RecordingDisplay::default(), store, Settings::default(), 42)
        .expect("default settings are valid")
}

pub fn engine() -> TestEngine {
    engine_with(MockBoard::default(), MemoryStore::new())
}

/// Run `source` top-level on a fresh engine.
pub fn run(source: &str) -> (TestEngine, Result<()>) {
    let mut engine = engine();
    let result = block_on(engine.run_source("test.dd", source));
    (engine, result)
}

pub fn log_lines(engine: &TestEngine) -> Vec<String> {
    engine.log().lines().map(str::to_owned).collect()
}

pub fn logged(engine: &TestEngine, line: &str) -> bool {
    engine.log().lines().any(|l| l == line)
}

pub fn access_point(ssid: &str, rssi: i8) -> AccessPoint {
    AccessPoint {
        ssid: ssid.to_owned(),
        bssid: [0x02, 0x00, 0x5E, 0x10, 0xAB, 0xCD],
        rssi,
    }
}
