//! QPE teaching simulator core
//!
//! This crate holds everything about the phase estimation demo that is not
//! tied to time or to a particular renderer.
//!
//! # Overview
//!
//! - [`SimulationParameters`]: the accuracy parameter ε, the ancilla register
//!   size and a display-only noise level, with slider-style clamping
//! - [`model`]: closed-form quantities derived from ε (`ceil(1/ε²)` classical
//!   samples, `ceil(1/ε)` circuit depth, `ceil(-log2 ε)` ancillas)
//! - [`RunGenerator`]: strategy producing a [`SimulationResults`]; the
//!   shipped [`MockRunGenerator`] fabricates the data
//! - [`ResultsAnalysis`]: accuracy comparison, phase histogram and the
//!   sampling-versus-QPE cost comparison
//! - side demos: [`factoring`], [`sensing`], [`bloch`]
//!
//! # Example
//!
//! ```ignore
//! use qpe_core::{MockRunGenerator, RunGenerator, SimulationParameters, model};
//!
//! let params = SimulationParameters::from_epsilon(0.1)?;
//! assert_eq!(model::classical_sample_count(params.epsilon()), 100);
//!
//! let generator = MockRunGenerator::new();
//! let results = generator.run(&params).await?;
//! assert_eq!(results.phase_results.len(), 8);
//! ```
//!
//! Nothing here simulates a quantum circuit. The numbers are illustrative.

pub mod bloch;
pub mod error;
pub mod factoring;
pub mod generator;
pub mod model;
pub mod params;
pub mod results;
pub mod sensing;

pub use bloch::BlochVector;
pub use error::{CoreError, CoreResult};
pub use factoring::{Factorization, factor, factor_integer, factor_str};
pub use generator::{MockRunGenerator, RunGenerator};
pub use model::DerivedQuantities;
pub use params::{ParameterRange, SimulationParameters};
pub use results::{Bit, HistogramRow, PhaseBits, ResultsAnalysis, SamplingStats, SimulationResults};
pub use sensing::{PhaseMap, SensingGrid};
