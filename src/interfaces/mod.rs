/// Interfaces Layer - External Entry Points
///
/// ## Modules
/// - `cli`: Command-line interface (main.rs logic)
/// - `simulation`: Load simulation that drives the engine from many threads

pub mod cli;
pub mod simulation;
