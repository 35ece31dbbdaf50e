//! Tokenizer tests for console command line parsing

use uctrl_console::console::parser::tokenize;

#[test]
fn test_parse_simple_command() {
    let args = tokenize("help");
    assert_eq!(args.command(), "help");
    assert_eq!(args.len(), 1);
    assert_eq!(args.arg(1), "");
}

#[test]
fn test_parse_gpio_write() {
    let args = tokenize("gpio 22 1");
    let tokens: Vec<&str> = args.iter().collect();
    assert_eq!(tokens, ["gpio", "22", "1"]);
}

#[test]
fn test_missing_trailing_args_are_empty() {
    let args = tokenize("gpio 22");
    assert_eq!(args.arg(1), "22");
    assert_eq!(args.arg(2), "");
    assert_eq!(args.arg(7), "");
    assert_eq!(args.arg(100), "");
}

#[test]
fn test_parse_trims_whitespace() {
    let args = tokenize("  pwm \t 5   127 \r\n");
    assert_eq!(args.command(), "pwm");
    assert_eq!(args.arg(1), "5");
    assert_eq!(args.arg(2), "127");
    assert_eq!(args.len(), 3);
}

#[test]
fn test_parse_empty_line() {
    let args = tokenize("");
    assert!(args.is_empty());
    assert_eq!(args.command(), "");
}

#[test]
fn test_parse_whitespace_only_line() {
    assert_eq!(tokenize("   \t  ").len(), 0);
}

#[test]
fn test_parse_max_args() {
    let args = tokenize("a b c d e f g h i j");
    assert_eq!(args.len(), 8);
    assert_eq!(args.arg(7), "h");
    // "i" and "j" are dropped (max 8 tokens)
    assert_eq!(args.arg(8), "");
}

#[test]
fn test_parse_long_token_truncated() {
    let long = "x".repeat(100);
    let args = tokenize(&format!("led {}", long));
    assert_eq!(args.arg(1).len(), 64);
    assert!(long.starts_with(args.arg(1)));
}

#[test]
fn test_tokens_owned_after_input_reused() {
    let mut line = String::from("temp humi");
    let args = tokenize(&line);
    line.clear();
    line.push_str("overwritten");
    assert_eq!(args.command(), "temp");
    assert_eq!(args.arg(1), "humi");
}
