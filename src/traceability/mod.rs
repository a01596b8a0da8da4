/// Traceability domain - product graph model and the tree materialization engine
///
/// This layer has no I/O of its own: everything that leaves the process goes
/// through the `ProductFetcher` port.
pub mod domain;
pub mod policies;
pub mod services;
