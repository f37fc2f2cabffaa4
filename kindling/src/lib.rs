//! Service lifecycle orchestration based on [kindling_di] dependency injection.
//!
//! An application is a set of interdependent services living in a single process. Instead of
//! wiring them by hand in `main()`, services declare their dependencies by constructor parameter
//! names and get registered with an [Application](application::Application). Starting the
//! application constructs every service through the dependency injection
//! [Container](kindling_di::container::Container), then runs their async start hooks in
//! registration order. Stopping runs the stop hooks in reverse order, making sure every service
//! gets a chance to clean up. The application also provides supporting infrastructure, e.g.
//! configuration and logging.
//!
//! ```
//! use kindling::application::Application;
//! use kindling::service::Service;
//! use kindling_di::component;
//!
//! #[derive(Default)]
//! struct Worker;
//!
//! #[component]
//! impl Worker {}
//!
//! impl Service for Worker {}
//!
//! let mut application = Application::new().unwrap();
//! application.service::<Worker>().unwrap();
//! ```

pub mod application;
pub mod config;
pub mod service;

pub use kindling_di::future;
