pub mod check;
pub mod config;
pub mod fetch;
pub mod fingerprint;
pub mod inspect;
pub mod lock;
pub mod logging;
