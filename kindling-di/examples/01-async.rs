// note: this example assumes you've analyzed the previous one

use kindling_di::container::{Container, Locals};
use kindling_di::future::{FutureExt, LocalBoxFuture};
use kindling_di::injected;
use kindling_di::instance::InstancePtr;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let container = Container::new();
    container
        .register_value("name", "world".to_string())
        .expect("error registering name");

    // the container never awaits anything - a callable returning a future gets its dependencies
    // injected, and the future is returned to the caller
    let greet = injected!(|name: InstancePtr<String>| -> LocalBoxFuture<'static, String> {
        async move { format!("Hello, {name}!") }.boxed_local()
    });

    let greeting = container
        .call(&greet, &Locals::default())
        .expect("error calling closure");

    // prints "Hello, world!"
    println!("{}", greeting.await);
}
