//! Port definitions: traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside world.
//! They are defined here (in `app`) so that both the use-case layer and the
//! adapter layer can depend on them without creating circular dependencies.

pub mod actuator;
pub mod collector;
pub mod report_source;

pub use actuator::ActuatorChannel;
pub use collector::TelemetryCollector;
pub use report_source::ReportSource;
