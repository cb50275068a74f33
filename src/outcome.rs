//! Command outcome reported back to the calling layer.

use crate::ops::error::TaskError;

/// What a command invocation produced: a message to print, nothing, or a
/// failure message. Failures are ordinary outcomes, not process errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The command succeeded and has output to show.
    Success(String),
    /// The command succeeded with nothing to show.
    Silent,
    /// The command was rejected; the message explains why.
    Failure(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, Outcome::Failure(_))
    }

    /// The message to print, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Outcome::Success(msg) | Outcome::Failure(msg) => Some(msg),
            Outcome::Silent => None,
        }
    }
}

impl From<TaskError> for Outcome {
    fn from(err: TaskError) -> Self {
        Outcome::Failure(err.to_string())
    }
}

impl<T: Into<Outcome>> From<Result<T, TaskError>> for Outcome {
    fn from(result: Result<T, TaskError>) -> Self {
        match result {
            Ok(value) => value.into(),
            Err(err) => err.into(),
        }
    }
}

impl From<String> for Outcome {
    fn from(msg: String) -> Self {
        Outcome::Success(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn failure_carries_the_error_message() {
        let outcome = Outcome::from(TaskError::TaskNotFound);
        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), Some("the task can not be found"));
    }

    #[test]
    fn result_conversion_picks_the_right_side() {
        let ok: Result<String, TaskError> = Ok("added task 1".to_string());
        assert_eq!(Outcome::from(ok), Outcome::Success("added task 1".into()));

        let err: Result<String, TaskError> = Err(TaskError::ListNotFound);
        assert_eq!(
            Outcome::from(err),
            Outcome::Failure("the list can not be found".into())
        );
    }

    #[test]
    fn silent_has_no_message() {
        assert!(Outcome::Silent.is_success());
        assert_eq!(Outcome::Silent.message(), None);
    }
}
