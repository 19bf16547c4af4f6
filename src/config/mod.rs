//! Configuration management for the bot

pub mod settings;
pub mod venues;

pub use settings::*;
pub use venues::*;

use lazy_static::lazy_static;

lazy_static! {
    pub static ref CONFIG: Config = Config::load();
}
