//! # uctrl-console
//!
//! Line-oriented command interpreter for a microcontroller serial port.
//!
//! ## Architecture
//!
//! Bytes arrive on the [`Console`], which edits them into a line. Each
//! complete line goes to the [`Dispatcher`], which tokenizes it, looks the
//! command up in the static [`REGISTRY`] and runs it. Commands reach the
//! board only through the [`Hardware`] trait:
//! - `gpio`, `led`, `pwm`: digital and PWM pins
//! - `temp`: Si7021 humidity/temperature sensor
//! - `help`, `exit`: console control
//!
//! Single-threaded, no heap, no locks.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod console;
pub mod hal;

pub use config::{BOARD, CONSOLE};
pub use console::{Command, Console, ConsoleError, Dispatcher, Flow, REGISTRY};
pub use hal::{Hardware, Level, SimBoard};
