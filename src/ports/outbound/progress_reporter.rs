/// ProgressReporter port for reporting progress during a tree build
///
/// This port abstracts user-facing progress output (e.g., to stderr) so it
/// never mixes with the formatted tree written to stdout.
pub trait ProgressReporter {
    /// Reports a progress message
    fn report(&self, message: &str);

    /// Reports an error or warning message
    fn report_error(&self, message: &str);

    /// Reports completion of an operation
    fn report_completion(&self, message: &str);
}
