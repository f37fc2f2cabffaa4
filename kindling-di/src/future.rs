//! Future helpers for asynchronous hooks and injected callables returning futures.

pub use futures::future::{FutureExt, LocalBoxFuture};
