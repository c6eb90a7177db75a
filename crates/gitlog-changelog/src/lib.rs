//! gitlog Changelog - Changelog generation engine
//!
//! This crate walks repository history, runs each commit through the filter
//! chain and fans the result out to every configured render sink.

pub mod filter;
pub mod generator;
pub mod report;
pub mod sink;

#[cfg(test)]
mod testing;

pub use filter::{default_filters, filters_from_config, should_render, CommitFilter};
pub use filter::{MergeCommitFilter, ModuleCommitFilter};
pub use generator::{ChangelogGenerator, OpenGenerator};
pub use report::{GenerationReport, RenderStage, SinkFailure};
pub use sink::{sinks_from_config, RenderOptions, RenderSink};
