//! One handler per action. Each performs at most one collaborator call.

pub mod leads;
pub mod scrape;
pub mod summarize;
