/// Compiler layer: process execution and the per-article orchestrator.
pub mod latex;
pub mod runner;

pub use latex::LatexCompiler;
pub use runner::SystemRunner;
