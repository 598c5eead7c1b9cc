//! Integration tests: whole scripts through the engine on a mock board.

mod common;

use std::time::Duration;

use common::{access_point, engine, engine_with, log_lines, logged, run, MockBoard};
use embassy_futures::block_on;
use hidscript::config::{MAX_IMPORT_DEPTH, MAX_LOG_BYTES};
use hidscript::exec_log;
use hidscript::hid::mouse;
use hidscript::remote::{decode_payload, encode_payload};
use hidscript::{BootMode, Error, MemoryStore, ScriptStore, Slot};

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

fn invalid_number(command: &str, value: &str) -> Error {
    Error::InvalidNumber {
        command: command.into(),
        value: value.into(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Run log and status display
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn top_level_run_log_layout() {
    let (engine, result) = run("PRINT hello there");
    assert_eq!(result, Ok(()));
    assert_eq!(
        log_lines(&engine),
        [
            "Running test.dd",
            "--------------------------------",
            "[SCRIPT]: hello there",
            "--------------------------------",
            " -> Finished test.dd. Processed 1 lines in 0.00 milliseconds.",
            " -> All delays (commands and default delay) summed up to 0.00 seconds.",
            "",
        ]
    );
    assert!(engine.log().as_str().ends_with("\r\n\r\n"));
    // The console saw exactly what the log kept.
    assert_eq!(engine.board().console, log_lines(&engine));
}

#[test]
fn top_level_run_renders_status() {
    let (engine, _) = run("DELAY 1500");
    let renders = &engine.display().renders;
    assert_eq!(renders[0], ("test.dd".to_owned(), Slot::Top, true));
    assert_eq!(renders[1], ("... running ...".to_owned(), Slot::Bottom, false));
    assert_eq!(
        renders.last(),
        Some(&("finished in 1.50s".to_owned(), Slot::Bottom, false))
    );
    assert!(logged(
        &engine,
        " -> Finished test.dd. Processed 1 lines in 1.50 seconds."
    ));
}

#[test]
fn empty_lines_count_and_still_get_the_default_delay() {
    let (engine, result) = run("DEFAULTDELAY 2\n\nREM done");
    assert_eq!(result, Ok(()));
    assert_eq!(engine.board().sleeps, [ms(20), ms(20), ms(20)]);
    assert!(logged(
        &engine,
        " -> Finished test.dd. Processed 3 lines in 60.00 milliseconds."
    ));
    assert!(engine.board().reports.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Delays and REPEAT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn default_delay_unit_is_ten_milliseconds() {
    let (engine, _) = run("DEFAULTDELAY 5\nREM x");
    assert_eq!(engine.board().sleeps, [ms(50), ms(50)]);
    assert_eq!(engine.state().default_delay, ms(50));
}

#[test]
fn default_delay_underscore_spelling() {
    let (engine, _) = run("default_delay 3\nREM x");
    assert_eq!(engine.board().sleeps, [ms(30), ms(30)]);
}

#[test]
fn repeat_replays_the_previous_line_n_times() {
    let (engine, result) = run("DEFAULTDELAY 1\nSTRING a\nREPEAT 2");
    assert_eq!(result, Ok(()));
    assert_eq!(engine.board().presses_of(0x04), 3);
    // DEFAULTDELAY, STRING, two replays, the REPEAT line itself.
    assert_eq!(engine.board().sleeps, [ms(10); 5]);
    assert_eq!(engine.state().cumulative_delay, ms(50));
}

#[test]
fn repeat_after_repeat_replays_the_original_line() {
    let (engine, _) = run("STRING a\nREPEAT 1\nREPEAT 1");
    assert_eq!(engine.board().presses_of(0x04), 3);
}

#[test]
fn long_repeat_caps_the_log() {
    let (engine, result) = run("PRINT 0123456789abcdef\nREPEAT 5000");
    assert_eq!(result, Ok(()));
    assert!(engine.log().is_truncated());
    assert!(engine.log().as_str().len() <= MAX_LOG_BYTES);
    assert_eq!(
        log_lines(&engine).last().map(String::as_str),
        Some(exec_log::TRUNCATED)
    );
    // The console still sees every line.
    assert_eq!(
        engine
            .board()
            .console
            .iter()
            .filter(|l| *l == "[SCRIPT]: 0123456789abcdef")
            .count(),
        5001
    );
}

#[test]
fn repeat_zero_does_nothing() {
    let (engine, _) = run("STRING a\nREPEAT 0");
    assert_eq!(engine.board().presses_of(0x04), 1);
}

#[test]
fn malformed_repeat_aborts() {
    let (engine, result) = run("STRING a\nREPEAT many");
    assert_eq!(result, Err(invalid_number("REPEAT", "many")));
    assert_eq!(engine.board().presses_of(0x04), 1);
}

#[test]
fn cumulative_delay_is_invariant_to_import_depth() {
    let store = MemoryStore::new()
        .with("inner.dd", "DELAY 100\nDELAY 50")
        .with("middle.dd", "IMPORT inner.dd\nDELAY 5");
    let mut nested = engine_with(MockBoard::default(), store);
    block_on(nested.run_source("top.dd", "DELAY 10\nIMPORT middle.dd")).unwrap();

    let (flat, _) = run("DELAY 10\nDELAY 100\nDELAY 50\nDELAY 5");

    assert_eq!(nested.state().cumulative_delay, ms(165));
    assert_eq!(nested.state().cumulative_delay, flat.state().cumulative_delay);
    assert!(logged(&nested, "Running middle.dd"));
    assert!(logged(&nested, "Running inner.dd"));
    let summaries = nested
        .log()
        .lines()
        .filter(|l| l.starts_with(" -> All delays"))
        .count();
    assert_eq!(summaries, 1);
}

#[test]
fn nested_run_is_preceded_by_a_blank_line() {
    let store = MemoryStore::new().with("lib.dd", "REM lib");
    let mut engine = engine_with(MockBoard::default(), store);
    block_on(engine.run_source("top.dd", "IMPORT lib.dd")).unwrap();
    let lines = log_lines(&engine);
    let at = lines.iter().position(|l| l == "Running lib.dd").unwrap();
    assert_eq!(lines[at - 1], "");
}

#[test]
fn each_top_level_run_starts_from_zero() {
    let mut engine = engine();
    block_on(engine.run_source("one.dd", "DELAY 100")).unwrap();
    block_on(engine.run_source("two.dd", "DELAY 20")).unwrap();
    assert_eq!(engine.state().cumulative_delay, ms(20));
    assert!(!logged(&engine, "Running one.dd"));
}

#[test]
fn delay_accepts_fractional_milliseconds() {
    let (engine, result) = run("DELAY 0.5");
    assert_eq!(result, Ok(()));
    assert_eq!(engine.board().sleeps, [Duration::from_micros(500)]);
}

#[test]
fn delays_sum_exactly() {
    let (engine, result) = run("DELAY 100\nDELAY 100\nDELAY 100\nDELAY 50");
    assert_eq!(result, Ok(()));
    assert_eq!(engine.board().sleeps, [ms(100), ms(100), ms(100), ms(50)]);
    assert_eq!(engine.state().cumulative_delay, ms(350));
}

// ═══════════════════════════════════════════════════════════════════════════
// Fatal errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn malformed_delay_aborts_and_keeps_the_partial_log() {
    let (engine, result) = run("STRING a\nDELAY abc\nSTRING b");
    assert_eq!(result, Err(invalid_number("DELAY", "abc")));
    assert!(logged(&engine, "STRING a"));
    assert!(!logged(&engine, "STRING b"));
    assert_eq!(
        log_lines(&engine).last().map(String::as_str),
        Some(" -> Aborted: DELAY: invalid number 'abc'")
    );
    assert_eq!(engine.board().presses_of(0x05), 0);
}

#[test]
fn unknown_locale_is_fatal() {
    let (engine, result) = run("STRING a\nLOCALE XX\nSTRING b");
    assert_eq!(result, Err(Error::LocaleNotFound("XX".into())));
    assert!(logged(&engine, " -> Aborted: locale not found: XX"));
    assert_eq!(engine.board().presses_of(0x05), 0);
    assert_eq!(engine.state().locale.name(), "US");
}

#[test]
fn missing_import_is_fatal() {
    let (_, result) = run("IMPORT nope.dd\nSTRING b");
    assert_eq!(result, Err(Error::ScriptNotFound("nope.dd".into())));
}

#[test]
fn self_import_stops_at_the_depth_limit() {
    let store = MemoryStore::new().with("loop.dd", "IMPORT loop.dd");
    let mut engine = engine_with(MockBoard::default(), store);
    let result = block_on(engine.run_script("loop.dd"));
    assert_eq!(result, Err(Error::ImportTooDeep("loop.dd".into())));
    let nested_runs = engine
        .log()
        .lines()
        .filter(|l| *l == "Running loop.dd")
        .count();
    assert_eq!(nested_runs, 1 + MAX_IMPORT_DEPTH);
    assert!(logged(
        &engine,
        " -> Aborted: IMPORT nested too deep: loop.dd"
    ));
}

#[test]
fn mutual_imports_stop_at_the_depth_limit() {
    let store = MemoryStore::new()
        .with("ping.dd", "IMPORT pong.dd")
        .with("pong.dd", "IMPORT ping.dd");
    let mut engine = engine_with(MockBoard::default(), store);
    let result = block_on(engine.run_script("ping.dd"));
    assert!(matches!(result, Err(Error::ImportTooDeep(_))));

    // The depth counter unwinds, so the next run imports normally.
    block_on(engine.store_mut().save("leaf.dd", "STRING a")).unwrap();
    block_on(engine.run_source("ok.dd", "IMPORT leaf.dd")).unwrap();
    assert_eq!(engine.board().presses_of(0x04), 1);
}

#[test]
fn failure_inside_an_import_aborts_the_caller() {
    let store = MemoryStore::new().with("bad.dd", "DELAY soon");
    let mut engine = engine_with(MockBoard::default(), store);
    let result = block_on(engine.run_source("top.dd", "IMPORT bad.dd\nSTRING b"));
    assert_eq!(result, Err(invalid_number("DELAY", "soon")));
    assert!(logged(&engine, "Running bad.dd"));
    assert_eq!(engine.board().presses_of(0x05), 0);
}

#[test]
fn run_script_reports_missing_scripts() {
    let mut engine = engine();
    let result = block_on(engine.run_script("ghost.dd"));
    assert_eq!(result, Err(Error::ScriptNotFound("ghost.dd".into())));
    assert_eq!(
        log_lines(&engine),
        [" -> Aborted: script not found: ghost.dd"]
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Per-line errors
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn line_errors_are_logged_and_skipped() {
    let (engine, result) = run(
        "MOUSE CLICK THUMB\nCC SEND LOUDER\nCC HOLD MUTE\nMOUSE JUMP\nWAITFORLED BOGUS ON\nSTRING a",
    );
    assert_eq!(result, Ok(()));
    assert!(logged(&engine, "Unknown mouse button: <THUMB>"));
    assert!(logged(&engine, "Unknown consumer control code: <LOUDER>"));
    assert!(logged(&engine, "Unknown consumer control command: <HOLD>"));
    assert!(logged(&engine, "Unknown mouse command: <JUMP>"));
    assert!(logged(&engine, "Unknown LED: <BOGUS>"));
    assert!(engine.board().mouse_reports().is_empty());
    assert!(engine.board().consumer_reports().is_empty());
    assert_eq!(engine.board().presses_of(0x04), 1);
}

#[test]
fn unknown_keys_are_reported_once_each() {
    let (engine, result) = run("GUI bogus r");
    assert_eq!(result, Ok(()));
    let unknown: Vec<_> = engine
        .log()
        .lines()
        .filter(|l| l.starts_with("Unknown key"))
        .collect();
    assert_eq!(unknown, ["Unknown key: <BOGUS>"]);
    assert!(logged(&engine, "GUI bogus r (keycodes = [227, 21])"));

    let reports = engine.board().keyboard_reports();
    assert_eq!(reports.len(), 3);
    assert_eq!(reports[0].modifier, 0x08);
    assert_eq!(reports[1].keycodes[0], 0x15);
    assert!(reports[2].is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Keyboard and typing
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn key_chord_presses_in_order_then_releases_once() {
    let (engine, _) = run("CTRL ALT DELETE");
    let reports = engine.board().keyboard_reports();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].modifier, 0x01);
    assert_eq!(reports[1].modifier, 0x05);
    assert_eq!(reports[2].keycodes[0], 0x4C);
    assert!(reports[3].is_empty());
}

#[test]
fn string_without_psycho_mouse_never_moves_the_pointer() {
    let (engine, _) = run("STRING abc");
    assert!(engine.board().mouse_reports().is_empty());
    assert_eq!(engine.board().keyboard_reports().len(), 6);
    assert!(logged(&engine, "STRING abc"));
    assert!(logged(&engine, " -> 3 characters in 0.00 milliseconds"));
}

#[test]
fn string_with_psycho_mouse_moves_after_every_chunk() {
    let (engine, result) = run("PSYCHOMOUSE 1 100\nSTRING abc");
    assert_eq!(result, Ok(()));
    assert!(engine.state().psycho_enabled);

    let kinds: String = engine
        .board()
        .reports
        .iter()
        .map(|r| if r.is_mouse() { 'M' } else { 'K' })
        .collect();
    assert_eq!(kinds, "KKMKKMKKM");
    for m in engine.board().mouse_reports() {
        assert!((-100..=100).contains(&i32::from(m.x)));
        assert!((-100..=100).contains(&i32::from(m.y)));
    }
}

#[test]
fn psycho_mouse_off_restores_plain_typing() {
    let (engine, _) = run("PSYCHOMOUSE 2\nPSYCHOMOUSE OFF\nSTRING abc");
    assert!(!engine.state().psycho_enabled);
    assert_eq!(engine.state().psycho.chunk_size, 2);
    assert!(engine.board().mouse_reports().is_empty());
}

#[test]
fn stringln_types_enter_afterwards() {
    let (engine, _) = run("STRINGLN hi");
    assert_eq!(engine.board().presses_of(0x28), 1);
    assert!(logged(&engine, "ENTER (keycodes = [40])"));
}

#[test]
fn string_echo_is_truncated() {
    let text = "x".repeat(40);
    let (engine, _) = run(&format!("STRING {}", text));
    assert!(logged(&engine, &format!("STRING {}...", "x".repeat(32))));
    assert!(logged(&engine, " -> 40 characters in 0.00 milliseconds"));
}

#[test]
fn locale_switch_applies_to_the_next_line() {
    let (engine, result) = run("LOCALE de\nSTRING z\nZ");
    assert_eq!(result, Ok(()));
    assert_eq!(engine.state().locale.name(), "DE");
    assert_eq!(engine.board().presses_of(0x1C), 2);
    assert_eq!(engine.board().presses_of(0x1D), 0);
}

#[test]
fn unsupported_characters_are_reported() {
    let (engine, _) = run("STRING aä");
    assert!(logged(&engine, "Unsupported character: <ä>"));
    assert!(logged(&engine, " -> 2 characters in 0.00 milliseconds"));
    assert_eq!(engine.board().presses_of(0x04), 1);
}

// ═══════════════════════════════════════════════════════════════════════════
// Mouse and consumer control
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn mouse_click_ors_the_buttons() {
    let (engine, _) = run("MOUSE CLICK LEFT RIGHT");
    let reports = engine.board().mouse_reports();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].buttons, mouse::LEFT_BUTTON | mouse::RIGHT_BUTTON);
    assert_eq!(reports[1].buttons, 0);
    assert!(logged(&engine, "MOUSE CLICK LEFT RIGHT (buttons = 3)"));
}

#[test]
fn mouse_move_wheel_and_hold() {
    let (engine, _) = run("MOUSE PRESS middle\nMOUSE MOVE 10 -4\nMOUSE WHEEL -2\nMOUSE RELEASEALL");
    let reports = engine.board().mouse_reports();
    assert_eq!(reports.len(), 4);
    assert_eq!(reports[0].buttons, mouse::MIDDLE_BUTTON);
    assert_eq!((reports[1].x, reports[1].y, reports[1].buttons), (10, -4, 4));
    assert_eq!(reports[2].wheel, -2);
    assert_eq!(reports[3].buttons, 0);
    assert!(logged(&engine, "MOUSE MOVE 10 -4 (x=10, y=-4)"));
    assert!(logged(&engine, "MOUSE WHEEL -2"));
    assert!(logged(&engine, "MOUSE RELEASEALL"));
}

#[test]
fn malformed_mouse_move_aborts() {
    let (_, result) = run("MOUSE MOVE 10");
    assert_eq!(
        result,
        Err(Error::MissingArgument {
            command: "MOUSE MOVE".into()
        })
    );
}

#[test]
fn consumer_release_drops_the_held_code() {
    let (engine, result) = run("CC PRESS VOLUME_INCREMENT\nMOUSE MOVE 5 5\nCC RELEASE");
    assert_eq!(result, Ok(()));
    let usages: Vec<u16> = engine
        .board()
        .consumer_reports()
        .iter()
        .map(|c| c.usage)
        .collect();
    assert_eq!(usages, [0x00E9, 0x0000]);
    assert!(logged(&engine, "CC PRESS VOLUME_INCREMENT (code = 233)"));
    assert!(logged(&engine, "CC RELEASE"));
}

#[test]
fn consumer_send_is_a_tap() {
    let (engine, _) = run("CC SEND mute");
    let usages: Vec<u16> = engine
        .board()
        .consumer_reports()
        .iter()
        .map(|c| c.usage)
        .collect();
    assert_eq!(usages, [0x00E2, 0x0000]);
}

// ═══════════════════════════════════════════════════════════════════════════
// LEDs and wait loops
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn led_toggles_and_sets() {
    let (engine, _) = run("LED\nLED\nLED ON\nLED off\nLED maybe");
    assert_eq!(engine.board().led_writes, [true, false, true, false, false]);
}

#[test]
fn blink_led_counts_toward_the_delay_total() {
    let (engine, _) = run("BLINK_LED 100 2");
    assert_eq!(engine.board().led_writes, [true, false, true, false]);
    assert_eq!(engine.board().sleeps, [ms(100); 4]);
    assert_eq!(engine.state().cumulative_delay, ms(400));
}

#[test]
fn blink_led_defaults() {
    let (engine, _) = run("BLINK_LED");
    assert_eq!(engine.board().sleeps, [ms(200), ms(200)]);
}

#[test]
fn wait_for_wifi_polls_until_the_ap_shows_up() {
    let mut board = MockBoard::default();
    board.scans.push_back(vec![]);
    board.scans.push_back(vec![access_point("Other", -70)]);
    board.scans.push_back(vec![access_point("MyNet", -42)]);
    let mut engine = engine_with(board, MemoryStore::new());

    block_on(engine.run_source("test.dd", "WAITFORWIFI mynet")).unwrap();

    assert_eq!(engine.board().scan_count, 3);
    assert_eq!(engine.board().sleeps, [ms(2000), ms(2000)]);
    assert_eq!(engine.state().cumulative_delay, ms(4000));
    assert!(logged(&engine, "Waiting for Wifi AP \"mynet\"..."));
    assert!(logged(&engine, " --> Access Point present after 4.00 seconds"));
    assert!(logged(&engine, "     * SSID:  MyNet"));
    assert!(logged(&engine, "     * BSSID: 02:00:5e:10:ab:cd"));
    assert!(logged(&engine, "     * RSSI:  -42"));
    assert!(engine
        .display()
        .renders
        .iter()
        .any(|(text, slot, _)| text == "waiting for wifi" && *slot == Slot::Bottom));
}

#[test]
fn wait_for_led_polls_every_100ms() {
    let board = MockBoard {
        lock_leds_after: Some((3, 0x02)),
        ..MockBoard::default()
    };
    let mut engine = engine_with(board, MemoryStore::new());

    block_on(engine.run_source("test.dd", "WAITFORLED caps_lock on")).unwrap();

    assert_eq!(engine.board().sleeps, [ms(100); 3]);
    assert!(logged(&engine, "Waiting for CAPS_LOCK LED to be on..."));
}

#[test]
fn wait_for_led_already_in_state_does_not_sleep() {
    let (engine, result) = run("WAITFORLED NUM_LOCK OFF");
    assert_eq!(result, Ok(()));
    assert!(engine.board().sleeps.is_empty());
}

#[test]
fn wait_for_led_needs_a_state() {
    let (_, result) = run("WAITFORLED CAPS_LOCK");
    assert_eq!(
        result,
        Err(Error::MissingArgument {
            command: "WAITFORLED".into()
        })
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Remote API
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn fileless_run_returns_the_encoded_log() {
    let mut engine = engine();
    let run = block_on(engine.run_fileless(&encode_payload("PRINT hi\nSTRING a")));
    assert_eq!(run.error, None);
    let log = decode_payload(&run.log).unwrap();
    assert!(log.starts_with("Running <fileless script>\r\n"));
    assert!(log.contains("[SCRIPT]: hi\r\n"));
    assert_eq!(log, engine.log().as_str());
    assert_eq!(engine.board().presses_of(0x04), 1);
}

#[test]
fn fileless_run_reports_the_abort_reason() {
    let mut engine = engine();
    let run = block_on(engine.run_fileless(&encode_payload("PRINT before\nLOCALE XX")));
    assert_eq!(run.error, Some(Error::LocaleNotFound("XX".into())));
    let log = decode_payload(&run.log).unwrap();
    assert!(log.contains("[SCRIPT]: before\r\n"));
    assert!(log.ends_with(" -> Aborted: locale not found: XX\r\n"));
}

#[test]
fn fileless_run_rejects_garbage() {
    let mut engine = engine();
    let run = block_on(engine.run_fileless("%%%"));
    assert_eq!(run.error, Some(Error::InvalidPayload));
    assert_eq!(
        decode_payload(&run.log).unwrap(),
        " -> Aborted: payload is not valid base64-encoded UTF-8\r\n"
    );
    assert!(engine.board().reports.is_empty());
}

#[test]
fn fileless_run_clears_the_previous_log() {
    let mut engine = engine();
    block_on(engine.run_fileless(&encode_payload("PRINT first")));
    let run = block_on(engine.run_fileless(&encode_payload("PRINT second")));
    let log = decode_payload(&run.log).unwrap();
    assert!(!log.contains("first"));
    assert!(log.contains("second"));
}

#[test]
fn save_list_load_and_run_scripts() {
    let store = MemoryStore::new()
        .with("a.dd", "REM a")
        .with("notes.txt", "not a script");
    let mut engine = engine_with(MockBoard::default(), store);

    block_on(engine.save_script("b.dd", &encode_payload("STRING b"))).unwrap();
    assert_eq!(block_on(engine.list_scripts()), ["a.dd", "b.dd"]);
    assert_eq!(
        block_on(engine.load_script("b.dd")),
        Some(encode_payload("STRING b"))
    );
    assert_eq!(block_on(engine.load_script("zz.dd")), None);

    block_on(engine.run_script("b.dd")).unwrap();
    assert_eq!(engine.board().presses_of(0x05), 1);
}

#[test]
fn save_fails_on_read_only_store_or_bad_payload() {
    let mut engine = engine_with(MockBoard::default(), MemoryStore::read_only());
    assert_eq!(
        block_on(engine.save_script("a.dd", &encode_payload("REM"))),
        Err(Error::StoreNotWritable)
    );

    let mut engine = common::engine();
    assert_eq!(
        block_on(engine.save_script("a.dd", "***")),
        Err(Error::InvalidPayload)
    );
}

// ═══════════════════════════════════════════════════════════════════════════
// Boot modes and jiggler
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn payload_boot_settles_then_runs_the_slot_script() {
    let store = MemoryStore::new().with("payload1.dd", "STRING a");
    let mut engine = engine_with(MockBoard::default(), store);
    block_on(engine.boot(BootMode::Payload(0))).unwrap();
    assert_eq!(engine.board().sleeps[0], ms(500));
    assert_eq!(engine.board().presses_of(0x04), 1);
    assert!(logged(&engine, "Running payload1.dd"));
}

#[test]
fn payload_boot_without_script_fails() {
    let mut engine = engine();
    assert_eq!(
        block_on(engine.boot(BootMode::Payload(3))),
        Err(Error::ScriptNotFound("payload4.dd".into()))
    );
}

#[test]
fn setup_boot_does_nothing() {
    let mut engine = engine();
    block_on(engine.boot(BootMode::Setup)).unwrap();
    assert!(engine.board().sleeps.is_empty());
    assert!(engine.board().reports.is_empty());
}

#[test]
fn jiggle_moves_away_and_back_then_blinks() {
    let mut engine = engine();
    let wait = block_on(engine.jiggle_once());

    assert!((1..=15).contains(&wait));
    let board = engine.board();
    assert_eq!(
        board.sleeps,
        [Duration::from_secs(wait.into()), ms(150), ms(150)]
    );
    let moves: Vec<(i8, i8)> = board.mouse_reports().iter().map(|m| (m.x, m.y)).collect();
    assert_eq!(moves, [(-10, -10), (10, 10)]);
    assert_eq!(board.led_writes, [true, false]);
    assert!(board.console.iter().any(|l| l == "jiggling mouse 10 pixels"));
    assert!(engine.log().is_empty());
}

#[test]
fn jiggle_waits_vary_within_bounds() {
    let mut engine = engine();
    let waits: Vec<u32> = (0..20).map(|_| block_on(engine.jiggle_once())).collect();
    assert!(waits.iter().all(|w| (1..=15).contains(w)));
    assert!(waits.iter().any(|&w| w != waits[0]));
}
