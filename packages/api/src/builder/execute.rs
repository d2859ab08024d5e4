//! Request execution
//!
//! Sends a built request and runs the response through the validators and
//! the terminal handler. The response body is released exactly once on
//! every path, after interceptors have seen the response.

use std::sync::Arc;

use reqflow_client::handler::{DefaultValidator, DrainBody, Handler, ResponseHandler, chain_handlers};
use reqflow_client::{BoxError, Client, Error, Kind, Request, Response, global_client};

use crate::builder::core::Builder;

impl Builder {
    /// Build the request and send it.
    ///
    /// When request construction fails and an interceptor clears the error,
    /// nothing is sent and `Ok(())` is returned.
    ///
    /// # Errors
    ///
    /// Returns the first failure from resolution, construction, transport,
    /// validation or handling, after the interceptors have seen it.
    pub fn fetch(&self) -> Result<(), Error> {
        let Some(mut req) = self.request()? else {
            log::debug!("Request construction failure was cleared; nothing to send");
            return Ok(());
        };
        self.send(&mut req)
    }

    /// Send `req` and run the response pipeline.
    ///
    /// The client is the one set with [`client`](Builder::client) or the
    /// process-wide default, with its transport replaced when
    /// [`transport`](Builder::transport) was set.
    ///
    /// # Errors
    ///
    /// Returns a [`Kind::Connect`] error when no response was received, a
    /// [`Kind::Validator`] error when a validator rejected it and a
    /// [`Kind::Handler`] error when the handler failed, after the
    /// interceptors have seen it.
    pub fn send(&self, req: &mut Request) -> Result<(), Error> {
        let client = self.resolve_client();
        if self.debug_enabled {
            log::debug!("Sending {} {} with headers {:?}", req.method(), req.url(), req.headers());
        } else {
            log::debug!("Sending {} {}", req.method(), req.url());
        }

        let mut res = match client.execute(req) {
            Ok(res) => res,
            Err(e) => return self.intercept(Kind::Connect, e, Some(&*req), None),
        };

        let outcome = match self.run_pipeline(&mut res) {
            Ok(()) => Ok(()),
            Err((kind, e)) => self.intercept(kind, e, Some(&*req), Some(&res)),
        };
        if self.debug_enabled {
            log::debug!("{} {} -> {} ({:?})", req.method(), req.url(), res.status(), outcome);
        }

        res.body_mut().close();
        outcome
    }

    fn resolve_client(&self) -> Client {
        match (&self.client, &self.transport) {
            (Some(client), Some(transport)) => client.with_transport(Arc::clone(transport)),
            (Some(client), None) => client.clone(),
            (None, Some(transport)) => Client::from_transport(Arc::clone(transport)),
            (None, None) => global_client(),
        }
    }

    fn run_pipeline(&self, res: &mut Response) -> Result<(), (Kind, BoxError)> {
        let validate: Handler = if self.validators.is_empty() {
            Arc::new(DefaultValidator)
        } else {
            chain_handlers(self.validators.iter().cloned())
        };
        validate.handle(res).map_err(|e| (Kind::Validator, e))?;

        let handled = match &self.handler {
            Some(handler) => handler.handle(res),
            None => DrainBody.handle(res),
        };
        handled.map_err(|e| (Kind::Handler, e))
    }
}
