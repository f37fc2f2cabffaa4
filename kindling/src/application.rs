//! Core application framework functionality.
//!
//! An [Application] goes through the following states, in order: `NotStarted`, `Starting`,
//! `Started`, `Stopping` and `Stopped`. Services can only be registered before the application
//! starts. Starting constructs all services in registration order, and only then runs their start
//! hooks one by one. The first failure aborts starting and leaves the application in the
//! `Starting` state. Stopping runs stop hooks in exact reverse order, and failures don't stop the
//! remaining hooks from running. All of them are reported together afterwards, leaving the
//! application in the `Stopping` state.

use crate::config::{ApplicationConfig, ConfigStore, CONFIG_TAG};
use crate::service::{ErrorPtr, Service, ServicePtr};
use config::{ConfigError, Map, Value};
use derive_more::{Constructor, Display};
use kindling_di::component::Component;
use kindling_di::container::{Container, Locals};
use kindling_di::instance::InstancePtr;
use kindling_di::ContainerError;
use std::any::TypeId;
use std::borrow::Cow;
use std::future::Future;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

/// Lifecycle state of an [Application].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Display)]
pub enum ApplicationState {
    NotStarted,
    Starting,
    Started,
    Stopping,
    Stopped,
}

/// Failure of a single service.
#[derive(Clone, Error, Debug, Constructor)]
#[error("{service}: {error}")]
pub struct ServiceFailure {
    pub service: String,
    pub error: ErrorPtr,
}

#[derive(Clone, Error, Debug)]
pub enum ApplicationError {
    #[error("Cannot {operation} application in state: {state}")]
    InvalidState {
        operation: &'static str,
        state: ApplicationState,
    },
    #[error("Service already registered: {0}")]
    DuplicateService(String),
    #[error("Error registering dependency: {0}")]
    Registration(ContainerError),
    #[error("Error constructing service {service}: {error}")]
    ServiceConstruction {
        service: String,
        error: ContainerError,
    },
    #[error("Error starting service {service}: {error}")]
    ServiceStart { service: String, error: ErrorPtr },
    #[error("Error stopping service {first} ({} more failures)", .others.len())]
    ServiceStop {
        first: ServiceFailure,
        others: Vec<ServiceFailure>,
    },
    #[error("Configuration error: {0}")]
    Config(ErrorPtr),
}

impl ApplicationError {
    /// Returns all service stop failures, in the order they occurred.
    pub fn failures(&self) -> Vec<&ServiceFailure> {
        match self {
            ApplicationError::ServiceStop { first, others } => {
                std::iter::once(first).chain(others).collect()
            }
            _ => vec![],
        }
    }
}

impl From<ConfigError> for ApplicationError {
    fn from(error: ConfigError) -> Self {
        ApplicationError::Config(Rc::new(error))
    }
}

type CreateServiceFn = fn(&Container) -> Result<ServicePtr, ContainerError>;

fn create_service<T: Component + Service>(
    container: &Container,
) -> Result<ServicePtr, ContainerError> {
    container
        .construct::<T>(&Locals::default())
        .map(|service| Box::new(service) as ServicePtr)
}

struct ServiceRegistration {
    type_id: TypeId,
    name: Cow<'static, str>,
    create: CreateServiceFn,
}

struct RunningService {
    name: Cow<'static, str>,
    instance: ServicePtr,
}

/// Main entrypoint for the application. Owns the dependency injection [Container] and drives the
/// lifecycle of registered [Services](Service).
pub struct Application {
    state: ApplicationState,
    container: Container,
    config: InstancePtr<ConfigStore>,
    application_config: ApplicationConfig,
    registrations: Vec<ServiceRegistration>,
    running: Vec<RunningService>,
}

impl Application {
    /// Creates an application with empty configuration and default framework settings.
    pub fn new() -> Result<Self, ApplicationError> {
        Self::with_config(ConfigStore::default(), ApplicationConfig::default())
    }

    /// Creates an application configured from the environment. See [crate::config] for details.
    pub fn from_environment() -> Result<Self, ApplicationError> {
        Self::with_config(
            ConfigStore::init_from_environment()?,
            ApplicationConfig::init_from_environment()?,
        )
    }

    /// Creates an application with given configuration. The config store is registered in the
    /// container under [CONFIG_TAG].
    pub fn with_config(
        config: ConfigStore,
        application_config: ApplicationConfig,
    ) -> Result<Self, ApplicationError> {
        let config = InstancePtr::new(config);
        let container = Container::new();
        container
            .register_value_ptr(CONFIG_TAG, config.clone())
            .map_err(ApplicationError::Registration)?;

        Ok(Self {
            state: ApplicationState::NotStarted,
            container,
            config,
            application_config,
            registrations: vec![],
            running: vec![],
        })
    }

    pub fn builder() -> ApplicationBuilder {
        ApplicationBuilder::default()
    }

    #[inline]
    pub fn state(&self) -> ApplicationState {
        self.state
    }

    #[inline]
    pub fn container(&self) -> &Container {
        &self.container
    }

    #[inline]
    pub fn config(&self) -> &InstancePtr<ConfigStore> {
        &self.config
    }

    #[inline]
    pub fn application_config(&self) -> &ApplicationConfig {
        &self.application_config
    }

    /// Replaces the container. Nothing is carried over from the previous one, including the
    /// config store binding.
    pub fn set_container(&mut self, container: Container) -> Result<(), ApplicationError> {
        self.check_state("replace container of", ApplicationState::NotStarted)?;
        self.container = container;
        Ok(())
    }

    /// Registers a value in the container.
    pub fn register<T: 'static>(
        &mut self,
        tag: impl Into<String>,
        value: T,
    ) -> Result<(), ApplicationError> {
        self.check_state("register values in", ApplicationState::NotStarted)?;
        self.container
            .register_value(tag, value)
            .map_err(ApplicationError::Registration)
    }

    /// Registers a service, which will be constructed and started along with the application.
    pub fn service<T: Component + Service>(&mut self) -> Result<(), ApplicationError> {
        self.check_state("register services in", ApplicationState::NotStarted)?;

        let type_id = TypeId::of::<T>();
        let name = T::name();
        if self
            .registrations
            .iter()
            .any(|registration| registration.type_id == type_id)
        {
            return Err(ApplicationError::DuplicateService(name.into_owned()));
        }

        debug!(service = %name, "Registering service.");

        self.registrations.push(ServiceRegistration {
            type_id,
            name,
            create: create_service::<T>,
        });

        Ok(())
    }

    /// Returns names of constructed services, in creation order.
    pub fn running_services(&self) -> Vec<&str> {
        self.running
            .iter()
            .map(|service| service.name.as_ref())
            .collect()
    }

    /// Constructs all registered services and runs their start hooks.
    pub async fn start(&mut self) -> Result<(), ApplicationError> {
        self.check_state("start", ApplicationState::NotStarted)?;
        self.state = ApplicationState::Starting;

        if self.application_config.install_tracing_logger {
            install_tracing_logger();
        }

        info!("Creating services...");

        for registration in &self.registrations {
            debug!(service = %registration.name, "Creating service.");

            let instance = (registration.create)(&self.container).map_err(|error| {
                ApplicationError::ServiceConstruction {
                    service: registration.name.to_string(),
                    error,
                }
            })?;

            self.running.push(RunningService {
                name: registration.name.clone(),
                instance,
            });
        }

        info!("Starting services...");

        for service in &mut self.running {
            debug!(service = %service.name, "Starting service.");

            service
                .instance
                .start()
                .await
                .map_err(|error| ApplicationError::ServiceStart {
                    service: service.name.to_string(),
                    error,
                })?;
        }

        self.state = ApplicationState::Started;
        info!("Application started.");

        Ok(())
    }

    /// Runs stop hooks of all services in reverse order.
    pub async fn stop(&mut self) -> Result<(), ApplicationError> {
        self.check_state("stop", ApplicationState::Started)?;
        self.state = ApplicationState::Stopping;

        info!("Stopping services...");

        let mut failures = vec![];
        for service in self.running.iter_mut().rev() {
            debug!(service = %service.name, "Stopping service.");

            if let Err(error) = service.instance.stop().await {
                warn!(service = %service.name, %error, "Error stopping service.");
                failures.push(ServiceFailure::new(service.name.to_string(), error));
            }
        }

        let mut failures = failures.into_iter();
        match failures.next() {
            Some(first) => Err(ApplicationError::ServiceStop {
                first,
                others: failures.collect(),
            }),
            None => {
                self.state = ApplicationState::Stopped;
                info!("Application stopped.");
                Ok(())
            }
        }
    }

    /// Starts the application, waits for the shutdown signal and stops the application.
    pub async fn run<F: Future<Output = ()>>(
        &mut self,
        shutdown: F,
    ) -> Result<(), ApplicationError> {
        self.start().await?;
        info!("Running until shutdown...");
        shutdown.await;
        self.stop().await
    }

    fn check_state(
        &self,
        operation: &'static str,
        expected: ApplicationState,
    ) -> Result<(), ApplicationError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ApplicationError::InvalidState {
                operation,
                state: self.state,
            })
        }
    }
}

fn install_tracing_logger() {
    if let Err(error) = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        debug!(%error, "Not installing tracing logger.");
    }
}

type RegisterServiceFn = fn(&mut Application) -> Result<(), ApplicationError>;

/// Collects configuration and services for a new [Application].
#[derive(Default)]
pub struct ApplicationBuilder {
    load_environment: bool,
    tables: Vec<Map<String, Value>>,
    values: Vec<(String, Value)>,
    application_config: Option<ApplicationConfig>,
    services: Vec<RegisterServiceFn>,
}

impl ApplicationBuilder {
    /// Seeds configuration from the environment, before any explicitly given values.
    pub fn with_environment(mut self) -> Self {
        self.load_environment = true;
        self
    }

    /// Sets a config value under given dotted path.
    pub fn with_config_value<V: Into<Value>>(mut self, key: impl Into<String>, value: V) -> Self {
        self.values.push((key.into(), value.into()));
        self
    }

    /// Deep merges given table into the configuration.
    pub fn with_config_table(mut self, table: Map<String, Value>) -> Self {
        self.tables.push(table);
        self
    }

    pub fn with_application_config(mut self, application_config: ApplicationConfig) -> Self {
        self.application_config = Some(application_config);
        self
    }

    /// Adds a service, preserving registration order.
    pub fn with_service<T: Component + Service>(mut self) -> Self {
        self.services.push(Application::service::<T>);
        self
    }

    pub fn build(self) -> Result<Application, ApplicationError> {
        let (config, application_config) = if self.load_environment {
            (
                ConfigStore::init_from_environment()?,
                ApplicationConfig::init_from_environment()?,
            )
        } else {
            (ConfigStore::default(), ApplicationConfig::default())
        };

        for table in self.tables {
            config.merge(table);
        }

        for (key, value) in self.values {
            config.set(&key, value)?;
        }

        let mut application = Application::with_config(
            config,
            self.application_config.unwrap_or(application_config),
        )?;

        for register in self.services {
            register(&mut application)?;
        }

        Ok(application)
    }
}

/// Creates an [Application] configured from the environment.
pub fn create_default() -> Result<Application, ApplicationError> {
    Application::from_environment()
}
