//! Byte-level console tests: line editing, completion, error reports

mod common;

use common::{Event, RecordingBoard, TestOutput};
use uctrl_console::config::ConsoleConfig;
use uctrl_console::console::cmd::LISTING_HEADER;
use uctrl_console::console::{CommandResult, PROMPT, VERSION};
use uctrl_console::{Console, ConsoleError, Flow, Level, REGISTRY};

struct Session {
    console: Console<'static>,
    board: RecordingBoard,
    out: TestOutput,
}

impl Session {
    fn new(config: ConsoleConfig) -> Self {
        let mut console = Console::new(&REGISTRY, config);
        let mut board = RecordingBoard::new();
        let mut out = TestOutput::new();
        assert_eq!(console.boot(&mut board, &mut out), 0);
        board.clear();
        out.clear();
        Self {
            console,
            board,
            out,
        }
    }

    fn scripted() -> Self {
        Self::new(ConsoleConfig::SCRIPTED)
    }

    /// Feed bytes, collect the result of every dispatched line
    fn feed(&mut self, bytes: &[u8]) -> Vec<CommandResult> {
        bytes
            .iter()
            .filter_map(|&b| self.console.process_byte(b, &mut self.board, &mut self.out))
            .collect()
    }
}

#[test]
fn test_line_dispatched_on_newline() {
    let mut s = Session::scripted();

    assert!(s.feed(b"gpio 22 1").is_empty());
    assert!(s.board.events.is_empty());

    assert_eq!(s.feed(b"\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.board.events, vec![Event::WriteDigital(22, Level::High)]);
    assert_eq!(s.console.pending_line(), "");
}

#[test]
fn test_crlf_runs_once() {
    let mut s = Session::scripted();

    assert_eq!(s.feed(b"led on\r\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.board.writes().len(), 1);
}

#[test]
fn test_scripted_output_is_reply_only() {
    let mut s = Session::scripted();

    s.feed(b"help\n");
    assert_eq!(s.out.lines()[0], "The following commands are available:");
    assert!(!s.out.contains(PROMPT));
    // Typed bytes are not echoed ahead of the reply
    assert!(!s.out.text.starts_with("help"));
    assert!(s.out.text.starts_with(LISTING_HEADER));
}

#[test]
fn test_backspace_edits_line() {
    let mut s = Session::scripted();

    assert_eq!(s.feed(b"gpio 22 0\x7f1\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.board.events, vec![Event::WriteDigital(22, Level::High)]);

    s.board.clear();
    assert_eq!(s.feed(b"gpio 23 1\x080\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.board.events, vec![Event::WriteDigital(23, Level::Low)]);

    // Two backspaces also take the separator: the pin becomes 231
    s.board.clear();
    assert_eq!(
        s.feed(b"gpio 23 0\x08\x081\n"),
        vec![Err(ConsoleError::OutOfRange { value: 231, min: 22, max: 53 })]
    );
    assert!(s.board.events.is_empty());
}

#[test]
fn test_backspace_on_empty_line() {
    let mut s = Session::scripted();

    assert!(s.feed(b"\x7f\x7f").is_empty());
    assert_eq!(s.console.pending_line(), "");
}

#[test]
fn test_ctrl_c_discards_line() {
    let mut s = Session::scripted();

    assert!(s.feed(b"gpio 22 1\x03\n").is_empty());
    assert!(s.board.events.is_empty());
}

#[test]
fn test_ctrl_u_clears_line() {
    let mut s = Session::scripted();

    assert_eq!(s.feed(b"gpio 22 1\x15led on\n"), vec![Ok(Flow::Continue)]);
    assert!(s.out.contains("Turning on the LED."));
}

#[test]
fn test_escape_sequence_ignored() {
    let mut s = Session::scripted();

    // Arrow keys
    assert_eq!(s.feed(b"led\x1b[A on\x1b[D\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.console.pending_line(), "");
    assert!(s.out.contains("Turning on the LED."));
}

#[test]
fn test_blank_lines_dispatch_nothing() {
    let mut s = Session::scripted();

    assert!(s.feed(b"\n\r\n   \n").is_empty());
    assert!(s.out.text.is_empty());
    assert!(s.board.events.is_empty());
}

#[test]
fn test_tab_completes_command_name() {
    let mut s = Session::scripted();

    s.feed(b"gp\t");
    assert_eq!(s.console.pending_line(), "gpio");

    assert_eq!(s.feed(b" 30 1\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(s.board.events, vec![Event::WriteDigital(30, Level::High)]);
}

#[test]
fn test_tab_cycles_candidates() {
    let mut s = Session::scripted();

    s.feed(b"\t");
    assert_eq!(s.console.pending_line(), "gpio");
    s.feed(b"\t");
    assert_eq!(s.console.pending_line(), "led");
}

#[test]
fn test_tab_ignored_after_first_word() {
    let mut s = Session::scripted();

    s.feed(b"led o\t");
    assert_eq!(s.console.pending_line(), "led o");
}

#[test]
fn test_tab_no_match_keeps_line() {
    let mut s = Session::scripted();

    s.feed(b"xyz\t");
    assert_eq!(s.console.pending_line(), "xyz");
}

#[test]
fn test_error_reported_with_code() {
    let mut s = Session::scripted();

    assert_eq!(s.feed(b"frobnicate\n"), vec![Err(ConsoleError::UnknownCommand)]);
    assert!(s.out.text.starts_with("E01: "));

    s.out.clear();
    assert_eq!(
        s.feed(b"gpio 99 1\n"),
        vec![Err(ConsoleError::OutOfRange { value: 99, min: 22, max: 53 })]
    );
    assert_eq!(s.out.lines(), ["E05: value 99 out of range (22-53)"]);
}

#[test]
fn test_console_continues_after_error() {
    let mut s = Session::scripted();

    let results = s.feed(b"pwm 5 300\npwm 5 200\n");
    assert_eq!(
        results,
        vec![
            Err(ConsoleError::OutOfRange { value: 300, min: 0, max: 255 }),
            Ok(Flow::Continue)
        ]
    );
    assert_eq!(s.board.writes(), vec![Event::WriteAnalog(5, 200)]);
}

#[test]
fn test_input_after_exit_ignored() {
    let mut s = Session::scripted();

    assert_eq!(s.feed(b"exit\n"), vec![Ok(Flow::Exit)]);
    assert!(s.console.is_halted());
    assert!(s.out.contains("Exiting CLI."));

    s.out.clear();
    assert!(s.feed(b"gpio 22 1\nhelp\n").is_empty());
    assert!(s.board.events.is_empty());
    assert!(s.out.text.is_empty());
}

#[test]
fn test_long_line_truncated() {
    let mut s = Session::scripted();

    s.feed(&[b'a'; 200]);
    assert_eq!(s.console.pending_line().len(), 128);
}

#[test]
fn test_interactive_boot_banner_and_prompt() {
    let mut console = Console::new(&REGISTRY, ConsoleConfig::INTERACTIVE);
    let mut board = RecordingBoard::new();
    let mut out = TestOutput::new();

    console.boot(&mut board, &mut out);

    assert_eq!(out.lines()[0], VERSION);
    assert!(VERSION.starts_with("uctrl v"));
    assert!(out.text.ends_with(PROMPT));
}

#[test]
fn test_interactive_echo() {
    let mut s = Session::new(ConsoleConfig::INTERACTIVE);

    s.feed(b"led on\r");
    assert_eq!(
        s.out.text,
        format!("led on\nTurning on the LED.\n{}", PROMPT)
    );
}

#[test]
fn test_interactive_crlf_single_prompt() {
    let mut s = Session::new(ConsoleConfig::INTERACTIVE);

    assert_eq!(s.feed(b"led on\r\n"), vec![Ok(Flow::Continue)]);
    assert_eq!(
        s.out.text,
        format!("led on\nTurning on the LED.\n{}", PROMPT)
    );
    assert_eq!(s.out.text.matches(PROMPT).count(), 1);
}

#[test]
fn test_lf_alone_after_crlf_still_ends_line() {
    let mut s = Session::scripted();

    let results = s.feed(b"led on\r\nled off\n");
    assert_eq!(results, vec![Ok(Flow::Continue), Ok(Flow::Continue)]);
    assert_eq!(s.board.writes().len(), 2);
}

#[test]
fn test_interactive_backspace_and_bell() {
    let mut s = Session::new(ConsoleConfig::INTERACTIVE);

    s.feed(b"ab\x7f");
    assert_eq!(s.out.text, "ab\x08 \x08");

    s.out.clear();
    s.feed(&[b'x'; 130]);
    assert!(s.out.text.ends_with("\x07\x07"));
}

#[test]
fn test_interactive_no_prompt_after_exit() {
    let mut s = Session::new(ConsoleConfig::INTERACTIVE);

    s.feed(b"exit\n");
    assert!(s.out.text.ends_with("Exiting CLI.\n"));
}
