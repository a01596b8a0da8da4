/// Ports module defining interfaces for hexagonal architecture
///
/// The outbound ports are the seams between the traceability core and the
/// product service, file system and console.
pub mod outbound;
