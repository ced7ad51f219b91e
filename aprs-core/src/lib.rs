//! aprs-core: AX.25/APRS link-layer framing and the IQ signal-construction
//! pipeline that turns a text payload into a transmittable baseband stream.
//!
//! The pipeline is strictly feed-forward: [`ax25`] frames the payload,
//! [`nrzi`] line-codes it, [`afsk`] renders it as 48 kHz audio, and
//! [`fm`] + [`interpolator`] carry it up to 2.4 MHz complex baseband.
//! [`pipeline::generate_iq`] wires all of the above together; [`config`]
//! is the only place input is validated.
//!
//! Out of scope: argument parsing, output-file selection, device drivers.
//! See `aprs-cli` for those.

pub mod afsk;
pub mod ax25;
pub mod callsign;
pub mod config;
pub mod errors;
pub mod filter;
pub mod fm;
pub mod interpolator;
pub mod logging;
pub mod nrzi;
pub mod output;
pub mod pipeline;
pub mod ringbuffer;

pub use config::TxConfig;
pub use errors::{AprsError, Result};
pub use pipeline::{generate_iq, TxOutput, TxPipeline};
