//! Shared request state.

use haven_op_router::{PassError, PassInput, PassOutput, RouterOperator};
use haven_turn::Provider;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Why a request got no routed answer.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum RequestError {
    /// The pass itself failed.
    #[error(transparent)]
    Pass(#[from] PassError),

    /// The pass did not finish before the deadline.
    #[error("pass did not finish within {0:?}")]
    DeadlineExpired(Duration),
}

/// State handed to every handler: the operator and the per-request deadline.
pub struct AppState<P: Provider> {
    operator: Arc<RouterOperator<P>>,
    request_timeout: Duration,
}

impl<P: Provider> Clone for AppState<P> {
    fn clone(&self) -> Self {
        Self {
            operator: Arc::clone(&self.operator),
            request_timeout: self.request_timeout,
        }
    }
}

impl<P: Provider> AppState<P> {
    /// Wrap an operator.
    pub fn new(operator: RouterOperator<P>, request_timeout: Duration) -> Self {
        Self {
            operator: Arc::new(operator),
            request_timeout,
        }
    }

    /// The shared operator.
    pub fn operator(&self) -> &RouterOperator<P> {
        &self.operator
    }

    /// Run one pass for `user_text` under the request deadline.
    pub async fn run_pass(&self, user_text: String) -> Result<PassOutput, RequestError> {
        let pass = self.operator.route(PassInput::new(user_text));
        match tokio::time::timeout(self.request_timeout, pass).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => {
                tracing::error!(error = %e, retryable = e.is_retryable(), "routing pass failed");
                Err(e.into())
            }
            Err(_) => {
                tracing::error!(
                    timeout_ms = self.request_timeout.as_millis() as u64,
                    "routing pass exceeded its deadline"
                );
                Err(RequestError::DeadlineExpired(self.request_timeout))
            }
        }
    }
}
