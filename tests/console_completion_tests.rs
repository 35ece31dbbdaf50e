//! Tab completion tests

use uctrl_console::console::completion::Completer;

// Mock completions for testing
static TEST_COMMANDS: &[&str] = &["gpio", "led", "pwm", "temp", "help", "exit", "pwr"];

fn candidates() -> impl Iterator<Item = &'static str> + Clone {
    TEST_COMMANDS.iter().copied()
}

#[test]
fn test_complete_first_match() {
    let mut completer = Completer::new();

    // First match in table order
    assert_eq!(completer.complete("p", candidates()), Some("pwm"));
}

#[test]
fn test_complete_cycle() {
    let mut completer = Completer::new();

    // First tab: "p" -> "pwm"
    let r1 = completer.complete("p", candidates());
    assert_eq!(r1, Some("pwm"));

    // Second tab on the completed word: cycle to "pwr"
    let r2 = completer.complete("pwm", candidates());
    assert_eq!(r2, Some("pwr"));

    // Third tab: wrap to "pwm"
    let r3 = completer.complete("pwr", candidates());
    assert_eq!(r3, Some("pwm"));
}

#[test]
fn test_complete_reset_on_different_prefix() {
    let mut completer = Completer::new();

    completer.complete("p", candidates());

    // Typing resets cycling; new prefix starts fresh
    completer.reset();
    assert_eq!(completer.complete("te", candidates()), Some("temp"));
}

#[test]
fn test_complete_no_match() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("xyz", candidates()), None);
}

#[test]
fn test_complete_exact_match() {
    let mut completer = Completer::new();

    // Exact match still returns it
    assert_eq!(completer.complete("help", candidates()), Some("help"));
}

#[test]
fn test_complete_empty_prefix_lists_all() {
    let mut completer = Completer::new();

    assert_eq!(completer.complete("", candidates()), Some("gpio"));
    assert_eq!(completer.complete("gpio", candidates()), Some("led"));
}
