use kindling_di::container::{Container, Locals};
use kindling_di::instance::InstancePtr;
use kindling_di::{component, injected};

// a dependency with no dependencies of its own - without a "new" function, it's created with
// Default::default()
#[derive(Default)]
struct Printer;

#[component]
impl Printer {}

impl Printer {
    fn print(&self, text: &str) {
        println!("{text}");
    }
}

// a component with dependencies - their tags are the parameter names of "new"
struct Greeter {
    printer: InstancePtr<Printer>,
    greeting: InstancePtr<String>,
}

#[component]
impl Greeter {
    fn new(printer: InstancePtr<Printer>, greeting: InstancePtr<String>) -> Self {
        Self { printer, greeting }
    }

    fn greet(&self, name: &str) {
        self.printer.print(&format!("{}, {name}!", self.greeting));
    }
}

// note: for the sake of simplicity, errors are unwrapped, rather than gracefully handled
fn main() {
    let container = Container::new();

    // plain values are returned as-is
    container
        .register_value("greeting", "Hello".to_string())
        .expect("error registering greeting");

    // singletons are created once, on first use
    container
        .register_singleton::<Printer>("printer")
        .expect("error registering printer");

    // classes are created on every resolution
    container
        .register_class::<Greeter>("greeter")
        .expect("error registering greeter");

    let greeter = container
        .resolve::<Greeter>("greeter", &Locals::default())
        .expect("error creating Greeter");

    // prints "Hello, world!"
    greeter.greet("world");

    // locals take precedence over registered bindings
    let greeter = container
        .resolve::<Greeter>(
            "greeter",
            &Locals::new().with("greeting", "Goodbye".to_string()),
        )
        .expect("error creating Greeter");

    // prints "Goodbye, world!"
    greeter.greet("world");

    // closures can be injected too
    let shout = injected!(|greeting: InstancePtr<String>| greeting.to_uppercase());

    // prints "HELLO"
    println!(
        "{}",
        container
            .call(&shout, &Locals::default())
            .expect("error calling closure")
    );
}
