//! Response handlers
//!
//! Validators and terminal handlers share one capability: a function from a
//! received response to success or failure. Handlers compose with
//! [`chain_handlers`], which runs each in order and stops at the first failure.

use std::fmt;
use std::sync::Arc;

use crate::error::BoxError;
use crate::http::response::Response;

pub mod sinks;
pub mod validators;

pub use self::sinks::*;
pub use self::validators::*;

/// Number of body bytes quoted in a [`StatusError`](crate::error::StatusError).
pub const STATUS_PREVIEW_LIMIT: usize = 1024;

/// Something that inspects or consumes a response.
pub trait ResponseHandler: Send + Sync {
    /// Handle the response.
    ///
    /// # Errors
    ///
    /// Returns any error that should abort the response pipeline.
    fn handle(&self, res: &mut Response) -> Result<(), BoxError>;
}

impl<F> ResponseHandler for F
where
    F: Fn(&mut Response) -> Result<(), BoxError> + Send + Sync,
{
    fn handle(&self, res: &mut Response) -> Result<(), BoxError> {
        self(res)
    }
}

/// Shared response handler.
pub type Handler = Arc<dyn ResponseHandler>;

/// Wrap a closure as a [`Handler`].
///
/// # Examples
/// ```
/// use reqflow_client::handler::from_fn;
///
/// let log_status = from_fn(|res| {
///     println!("status: {}", res.status());
///     Ok(())
/// });
/// # let _ = log_status;
/// ```
pub fn from_fn<F>(f: F) -> Handler
where
    F: Fn(&mut Response) -> Result<(), BoxError> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Runs handlers in order, stopping at the first failure.
#[derive(Clone)]
struct Chain {
    handlers: Vec<Handler>,
}

impl ResponseHandler for Chain {
    fn handle(&self, res: &mut Response) -> Result<(), BoxError> {
        for handler in &self.handlers {
            handler.handle(res)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("handlers", &self.handlers.len()).finish()
    }
}

/// Compose handlers into one that runs each in order and stops at the first failure.
pub fn chain_handlers<I>(handlers: I) -> Handler
where
    I: IntoIterator<Item = Handler>,
{
    Arc::new(Chain {
        handlers: handlers.into_iter().collect(),
    })
}

/// Validator used when none is registered: any 2xx status passes.
///
/// Other statuses fail with a `StatusError` quoting the start of the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultValidator;

impl ResponseHandler for DefaultValidator {
    fn handle(&self, res: &mut Response) -> Result<(), BoxError> {
        if res.status().is_success() {
            return Ok(());
        }
        Err(Box::new(status_error(res)))
    }
}

/// Terminal handler used when none is set: drain and discard the body.
#[derive(Debug, Clone, Copy, Default)]
pub struct DrainBody;

impl ResponseHandler for DrainBody {
    fn handle(&self, res: &mut Response) -> Result<(), BoxError> {
        let drained = res.body_mut().drain()?;
        tracing::trace!(bytes = drained, "Discarded response body");
        Ok(())
    }
}
