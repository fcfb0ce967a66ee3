//! The data-to-curve pipeline for 8-channel spectral sensors.
//!
//! One update tick flows through the modules in this order:
//!
//! ```text
//! StateSnapshot ──resolve──▶ ChannelReading list
//!                               ├──interpolate──▶ InterpolatedPoint curve
//!                               ├──classifier───▶ Classification (dark / weak / saturated / nominal)
//!                               └──par──────────▶ ParAggregate
//! ```
//!
//! [`card::SpectrumCard`] wires the stages together and emits a
//! [`card::CardFrame`] per update. All numeric stages are pure functions.

pub mod card;
pub mod classifier;
pub mod error;
pub mod export;
pub mod interpolate;
pub mod mapping;
pub mod par;
pub mod resolve;

pub use card::{CardFrame, SpectrumCard};
pub use classifier::{classify, Classification, HealthState};
pub use error::SpectraError;
pub use interpolate::{interpolate, InterpolatedPoint};
pub use mapping::wavelength_to_position;
pub use par::{compute_par, ParAggregate};
