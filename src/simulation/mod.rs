mod boundary;
mod engine;
mod grid;
mod noise;
mod rules;
mod shapes;
mod stabilization;

pub use boundary::Boundary;
pub use engine::{GridEngine, Simulation, StepOutcome};
pub use grid::Grid;
pub use noise::NoiseInjector;
pub use rules::{Rule, RuleSet};
pub use shapes::Shape;
pub use stabilization::StabilizationDetector;
