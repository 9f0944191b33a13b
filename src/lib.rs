pub mod simulation;
pub mod configuration;
pub mod output;
pub mod benchmark;

pub use simulation::states::{Body, NVec3};
pub use simulation::forces::{compute_forces_and_potential, compute_separations, total_energy, ForceEvaluator, ForceField, NewtonianGravity, SeparationMatrix, G};
pub use simulation::integrator::{coefficients, symplectic_step, Coefficients, SymplecticIntegrator, SUPPORTED_ORDERS};
pub use simulation::params::SimulationConfig;
pub use simulation::diagnostics::{BodySnapshot, ConservationBaseline, DiagnosticRecord, DiagnosticSink, DriftStatistics};
pub use simulation::engine::{RunOutcome, SimulationDriver};
pub use simulation::scenario::{load_scenarios, parse_scenarios, Scenario};

pub use configuration::config::RunConfig;

pub use output::writer::{write_record, TextFileSink};

pub use benchmark::benchmark::{bench_forces, bench_orders};
