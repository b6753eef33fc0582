//! Jenkins entities: [`Server`], [`Job`] and [`Build`].
//!
//! Each entity is fetched once on construction and only re-fetched by an
//! explicit `refresh()`. Child resources are listed as summaries
//! ([`crate::JobSummary`], [`crate::BuildSummary`]) that resolve on demand.

mod build;
mod job;
mod server;

pub use build::*;
pub use job::*;
pub use server::*;
