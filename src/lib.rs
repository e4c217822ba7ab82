//! Territory Run - Movement Validation & Territory Capture Engine
//!
//! Players record a GPS path during a timed run; the path is validated
//! against anti-cheat thresholds, buffered into a closed ground polygon,
//! measured, and used to claim, defend, or steal territories with
//! time-decaying ownership strength and a post-capture protection
//! window.
//!
//! Pipeline: samples stream through [`session::MovementValidator`]; on
//! session end the accepted path feeds [`spatial::buffer_path`] →
//! [`spatial::polygon_area_m2`] → the territory store's overlap query →
//! [`territory::capture`], whose decisions are written back with
//! compare-and-swap through [`storage::TerritoryStore`].

pub mod core;
pub mod game;
pub mod session;
pub mod spatial;
pub mod storage;
pub mod territory;
