//! Ratatui front end: a menu to pick the table settings and a table view where
//! seat 0 is played from the keyboard and every other seat by an `AutoAgent`.

pub mod app;
pub mod controller;
mod ui;
