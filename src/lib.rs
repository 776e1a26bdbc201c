//! Trade Console Library
//!
//! A terminal chat console for a trading agent service reached over a
//! WebSocket: type a command, see the transcript of commands and replies.

pub mod chat;
pub mod config;
pub mod connection;
pub mod runner;
pub mod tui;
