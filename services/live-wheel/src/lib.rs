//! Live spinpot table: drives a round from a tick source and takes bets through a
//! single mailbox.

pub mod activity;
pub mod config;
pub mod sinks;
pub mod table;

pub use config::LiveWheelConfig;

/// Demo table: identity and net stake, credited without commission.
pub const DEMO_PLAYERS: [(&str, f64); 4] = [
    ("@crypto_king", 50.0),
    ("@lucky_guy", 25.5),
    ("@whale_alert", 15.0),
    ("@newbie", 5.0),
];
