use axum::http::StatusCode;
use axum::response::IntoResponse;
use error_stack::Report;
use kernel::prelude::validation::violations_of;
use kernel::KernelError;
use serde::Serialize;
use std::process::{ExitCode, Termination};

#[derive(Debug)]
pub struct StackTrace(Report<KernelError>);

impl From<Report<KernelError>> for StackTrace {
    fn from(e: Report<KernelError>) -> Self {
        StackTrace(e)
    }
}

impl Termination for StackTrace {
    fn report(self) -> ExitCode {
        self.0.report()
    }
}

#[derive(Debug)]
pub struct ErrorStatus(Report<KernelError>);

impl From<Report<KernelError>> for ErrorStatus {
    fn from(e: Report<KernelError>) -> Self {
        ErrorStatus(e)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<T> {
    errors: T,
}

impl IntoResponse for ErrorStatus {
    fn into_response(self) -> axum::response::Response {
        match self.0.current_context() {
            KernelError::NotFound => StatusCode::NOT_FOUND.into_response(),
            KernelError::Validation => (
                StatusCode::UNPROCESSABLE_ENTITY,
                axum::Json(ErrorBody {
                    errors: violations_of(&self.0),
                }),
            )
                .into_response(),
            KernelError::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            KernelError::Concurrency => StatusCode::CONFLICT.into_response(),
            KernelError::Timeout => StatusCode::REQUEST_TIMEOUT.into_response(),
            KernelError::Internal => {
                tracing::error!("{:?}", self.0);
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        }
    }
}

#[cfg(test)]
mod test {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use error_stack::Report;
    use kernel::prelude::validation::Violations;
    use kernel::KernelError;

    use super::ErrorStatus;

    #[test]
    fn maps_each_error_to_status() {
        let cases = [
            (KernelError::NotFound, StatusCode::NOT_FOUND),
            (KernelError::Unauthorized, StatusCode::UNAUTHORIZED),
            (KernelError::Concurrency, StatusCode::CONFLICT),
            (KernelError::Timeout, StatusCode::REQUEST_TIMEOUT),
            (KernelError::Internal, StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (error, status) in cases {
            let response = ErrorStatus::from(Report::new(error)).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn violations_are_unprocessable() {
        let mut violations = Violations::new();
        violations.check(false, "name", "Name is required");
        let Err(report) = violations.into_result() else {
            panic!("expected violations");
        };
        let response = ErrorStatus::from(report).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
