use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Input is not valid UTF-8")]
    BadEncoding,

    #[error("Input too small: {0} characters after trimming")]
    InputTooSmall(usize),

    #[error("Input too large: {0} bytes")]
    InputTooLarge(usize),

    #[error("Classifier unavailable: {0}")]
    ClassifierUnavailable(String),

    #[error("Analysis canceled by host")]
    Canceled,
}

/// Error returned by an [`crate::AnalysisSink`] implementation. Only `Abort`
/// stops the engine; any other failure is collected as a diagnostic.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Sink requested abort")]
    Abort,

    #[error("Sink failure: {0}")]
    Failure(String),
}
