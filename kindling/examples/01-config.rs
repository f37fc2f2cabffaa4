// note: this example assumes you've analyzed the previous one

use kindling::application::Application;
use kindling::config::{ApplicationConfig, ConfigStore};
use kindling::future::{FutureExt, LocalBoxFuture};
use kindling::service::{ErrorPtr, Service};
use kindling_di::component;
use kindling_di::instance::InstancePtr;
use std::rc::Rc;

// the config store is always available for injection under the "config" tag
struct ConfigPrinterService {
    config: InstancePtr<ConfigStore>,
}

#[component]
impl ConfigPrinterService {
    fn new(config: InstancePtr<ConfigStore>) -> Self {
        Self { config }
    }
}

impl Service for ConfigPrinterService {
    fn start(&mut self) -> LocalBoxFuture<'_, Result<(), ErrorPtr>> {
        async {
            let port = self
                .config
                .get_or("server.port", 80_i64)
                .map_err(|error| Rc::new(error) as ErrorPtr)?;
            let name = self
                .config
                .get_or("server.name", "unknown".to_string())
                .map_err(|error| Rc::new(error) as ErrorPtr)?;
            println!("Server {name} listening on port {port}");
            Ok(())
        }
        .boxed_local()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // start with a default config and override what's needed
    let mut application_config = ApplicationConfig::default();
    application_config.install_tracing_logger = false;

    // values can also come from kindling.json or KINDLING_ environment variables when using
    // with_environment(), e.g. KINDLING_SERVER__NAME=example
    let mut application = Application::builder()
        .with_environment()
        .with_application_config(application_config)
        .with_config_value("server.port", 8080_i64)
        .with_service::<ConfigPrinterService>()
        .build()
        .expect("unable to create application");

    // prints "Server unknown listening on port 8080", unless overridden by the environment
    application
        .run(async {})
        .await
        .expect("error running application");
}
