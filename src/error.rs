use thiserror::Error;

pub type Result<T> = std::result::Result<T, RxError>;

/// Ways the graph can be misused.
///
/// These are all programmer errors: the infallible API panics with the message,
/// the `try_` variants return them instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RxError {
    #[error("the RxGraph this handle belongs to was dropped")]
    GraphDropped,

    #[error("handle belongs to a different RxGraph")]
    ForeignHandle,

    #[error("propagation did not settle after {passes} passes (feedback loop between observers and sources?)")]
    FeedbackLoop { passes: usize },

    #[error("dependency cycle through node {node}")]
    Cycle { node: usize },
}

/// Abort on a programmer error.
#[track_caller]
pub(crate) fn fatal<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}
