//! Custom native functions example
//!
//! Demonstrates registering Rust functions callable from script code.
//!
//! Run with: cargo run --example 02_custom_functions -p lantern-lua

use lantern_lua::Session;

fn double(n: i64) -> i64 {
    n * 2
}

fn add(a: i64, b: i64) -> i64 {
    a + b
}

fn shout(text: String) -> String {
    text.to_uppercase()
}

fn main() {
    let session = Session::new().expect("Failed to create session");

    // Register a simple native function
    session
        .register_function("double", double as fn(i64) -> i64)
        .expect("Failed");
    session.exec("r = double(21)").expect("Failed");
    println!("double(21) = {}", session.get_global::<i64>("r").expect("Failed"));
    // Output: double(21) = 42

    // Register a function with multiple arguments
    session
        .register_function("add", add as fn(i64, i64) -> i64)
        .expect("Failed");
    session.exec("r = add(10, 20)").expect("Failed");
    println!("add(10, 20) = {}", session.get_global::<i64>("r").expect("Failed"));
    // Output: add(10, 20) = 30

    // Text crosses the boundary as well
    session
        .register_function("shout", shout as fn(String) -> String)
        .expect("Failed");
    session.exec("r = shout('quiet please')").expect("Failed");
    println!("shout(...) = {}", session.get_global::<String>("r").expect("Failed"));
    // Output: shout(...) = QUIET PLEASE
}
