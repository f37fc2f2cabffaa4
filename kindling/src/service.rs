//! Services with an async lifecycle, driven by the [Application](crate::application::Application).

use kindling_di::future::{FutureExt, LocalBoxFuture};
pub use kindling_di::instance::ErrorPtr;
#[cfg(test)]
use mockall::automock;

/// Boxed [Service] instance.
pub type ServicePtr = Box<dyn Service>;

/// A unit of application logic with optional lifecycle hooks. Hooks are awaited one at a time:
/// start hooks in registration order, stop hooks in reverse.
#[cfg_attr(test, automock)]
pub trait Service {
    /// Called after all services have been constructed.
    fn start(&mut self) -> LocalBoxFuture<'_, Result<(), ErrorPtr>> {
        async { Ok(()) }.boxed_local()
    }

    /// Called when the application stops. A failure doesn't prevent other services from being
    /// stopped.
    fn stop(&mut self) -> LocalBoxFuture<'_, Result<(), ErrorPtr>> {
        async { Ok(()) }.boxed_local()
    }
}
