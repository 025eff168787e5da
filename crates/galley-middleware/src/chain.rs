//! Per-route validator chains.
//!
//! A [`Chain`] is built once at startup and run for every request that
//! reaches its route. Validators see the request through an [`Exchange`]
//! and may stash a looked-up record in [`Exchange::found`] for the stages
//! after them.

use galley_core::{ApiError, ApiResult};
use galley_router::Params;
use galley_store::{Entity, Repository};

use crate::reply::Reply;

/// Everything a validator or handler may inspect or change for one request.
pub struct Exchange<'a, E: Entity, P> {
    /// Parameters captured from the route pattern.
    pub params: &'a Params,
    /// The decoded request payload.
    pub payload: P,
    /// The resource store, locked for the duration of the chain.
    pub store: &'a mut dyn Repository<E>,
    /// Record attached by an existence check.
    pub found: Option<E>,
}

impl<'a, E: Entity, P> Exchange<'a, E, P> {
    /// Creates an exchange with nothing found yet.
    pub fn new(params: &'a Params, payload: P, store: &'a mut dyn Repository<E>) -> Self {
        Self {
            params,
            payload,
            store,
            found: None,
        }
    }

    /// Returns a route parameter.
    ///
    /// A missing parameter means the chain was bound to the wrong route,
    /// which is reported as an internal error.
    pub fn param(&self, name: &str) -> ApiResult<&'a str> {
        let params: &'a Params = self.params;
        params
            .get(name)
            .ok_or_else(|| ApiError::internal(format!("route parameter '{name}' missing")))
    }

    /// Returns the record attached by an earlier existence check.
    pub fn found(&self) -> ApiResult<&E> {
        self.found
            .as_ref()
            .ok_or_else(|| ApiError::internal(format!("no {} attached to request", E::KIND)))
    }
}

/// One step of a chain: passes, or fails with the error to send.
pub trait Validator<E: Entity, P>: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Checks the exchange.
    fn validate(&self, ex: &mut Exchange<'_, E, P>) -> ApiResult<()>;
}

type CheckFn<E, P> = dyn Fn(&mut Exchange<'_, E, P>) -> ApiResult<()> + Send + Sync;

/// A [`Validator`] made from a closure.
pub struct FnValidator<E: Entity, P> {
    name: String,
    check: Box<CheckFn<E, P>>,
}

impl<E: Entity, P> FnValidator<E, P> {
    /// Wraps `check` under `name`.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&mut Exchange<'_, E, P>) -> ApiResult<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Box::new(check),
        }
    }
}

impl<E: Entity, P> Validator<E, P> for FnValidator<E, P> {
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(&self, ex: &mut Exchange<'_, E, P>) -> ApiResult<()> {
        (self.check)(ex)
    }
}

impl<E: Entity, P> std::fmt::Debug for FnValidator<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnValidator")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// The terminal step of a chain.
pub trait Handler<E: Entity, P>: Send + Sync {
    /// Produces the reply once every validator has passed.
    fn handle(&self, ex: &mut Exchange<'_, E, P>) -> ApiResult<Reply>;
}

impl<E, P, F> Handler<E, P> for F
where
    E: Entity,
    F: Fn(&mut Exchange<'_, E, P>) -> ApiResult<Reply> + Send + Sync,
{
    fn handle(&self, ex: &mut Exchange<'_, E, P>) -> ApiResult<Reply> {
        self(ex)
    }
}

/// Ordered validators followed by one handler.
pub struct Chain<E: Entity, P> {
    validators: Vec<Box<dyn Validator<E, P>>>,
    handler: Box<dyn Handler<E, P>>,
}

impl<E: Entity, P: 'static> Chain<E, P> {
    /// Starts building a chain.
    #[must_use]
    pub fn builder() -> ChainBuilder<E, P> {
        ChainBuilder {
            validators: Vec::new(),
        }
    }

    /// Runs validators in order, then the handler.
    ///
    /// Stops at the first validator error and returns it unchanged.
    pub fn run(&self, ex: &mut Exchange<'_, E, P>) -> ApiResult<Reply> {
        for validator in &self.validators {
            if let Err(err) = validator.validate(ex) {
                tracing::debug!(
                    kind = E::KIND,
                    validator = validator.name(),
                    error = %err,
                    "request rejected"
                );
                return Err(err);
            }
        }
        self.handler.handle(ex)
    }

    /// Returns validator names in execution order.
    #[must_use]
    pub fn validator_names(&self) -> Vec<&str> {
        self.validators.iter().map(|v| v.name()).collect()
    }
}

impl<E: Entity, P> std::fmt::Debug for Chain<E, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field(
                "validators",
                &self.validators.iter().map(|v| v.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

/// Builder for [`Chain`].
pub struct ChainBuilder<E: Entity, P> {
    validators: Vec<Box<dyn Validator<E, P>>>,
}

impl<E: Entity, P: 'static> ChainBuilder<E, P> {
    /// Appends a validator.
    #[must_use]
    pub fn validate<V: Validator<E, P> + 'static>(mut self, validator: V) -> Self {
        self.validators.push(Box::new(validator));
        self
    }

    /// Finishes the chain with its handler.
    pub fn handle<F>(self, handler: F) -> Chain<E, P>
    where
        F: Fn(&mut Exchange<'_, E, P>) -> ApiResult<Reply> + Send + Sync + 'static,
    {
        Chain {
            validators: self.validators,
            handler: Box::new(handler),
        }
    }
}
