//! TUI module for interactive terminal interface.
//!
//! Organized along FP/Unix boundaries:
//! - `state`: Pure data types (Screen, Action, Transition)
//! - `update`: Pure transitions
//! - `layout`: Geometry shared by `view` and mouse hit-testing
//! - `view`: Pure rendering
//! - `run`: Effects (terminal, input, delivery, timers)

pub mod layout;
pub mod run;
pub mod state;
pub mod theme;
pub mod timer;
pub mod update;
pub mod view;
