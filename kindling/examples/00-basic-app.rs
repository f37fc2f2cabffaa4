use kindling::application;
use kindling::future::{FutureExt, LocalBoxFuture};
use kindling::service::{ErrorPtr, Service};
use kindling_di::component;

// this is a service, which will be constructed and started with the application
#[derive(Default)]
struct HelloWorldService;

// generates the code needed to construct the service - since there's no "new" function, the
// service has no dependencies and is created with Default::default()
#[component]
impl HelloWorldService {}

impl Service for HelloWorldService {
    fn start(&mut self) -> LocalBoxFuture<'_, Result<(), ErrorPtr>> {
        async {
            println!("Hello world!");
            Ok(())
        }
        .boxed_local()
    }

    fn stop(&mut self) -> LocalBoxFuture<'_, Result<(), ErrorPtr>> {
        async {
            println!("Goodbye world!");
            Ok(())
        }
        .boxed_local()
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
#[tokio::main(flavor = "current_thread")]
async fn main() {
    // create our application configured from the environment
    let mut application =
        application::create_default().expect("unable to create default application");

    application
        .service::<HelloWorldService>()
        .expect("error registering service");

    // prints "Hello world!", waits for ctrl-c and prints "Goodbye world!"
    application
        .run(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await
        .expect("error running application");
}
