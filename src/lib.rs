//! # Retropad Oracle Library
//!
//! Reference model and test harness for an adapter that turns wireless
//! controller reports into wired retro-console controller output.
//!
//! The model predicts, for every stage the adapter reports (wireless input,
//! generic input, mapped input, wired output), what a conforming adapter
//! must produce. The harness drives a real adapter over TCP or serial and
//! compares.
//!
//! - [`descriptor`]: static button and axis tables per controller and system
//! - [`mapping`]: the pure button, hat and axis engines
//! - [`protocol`]: DUT command frames, response records, wireless reports
//! - [`transport`]: DUT link and request/response client
//! - [`oracle`]: scenario generation, verification, results

pub mod bits;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod mapping;
pub mod oracle;
pub mod protocol;
pub mod transport;
