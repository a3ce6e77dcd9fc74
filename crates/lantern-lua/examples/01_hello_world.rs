//! Hello world example
//!
//! Creates a session, runs a script, and reads a global back out.
//!
//! Run with: cargo run --example 01_hello_world -p lantern-lua

use lantern_lua::Session;

fn main() {
    let session = Session::new().expect("Failed to create session");

    session
        .exec("greeting = 'hello from the interpreter'")
        .expect("Failed");
    let greeting: String = session.get_global("greeting").expect("Failed");
    println!("{greeting}");
    // Output: hello from the interpreter

    session.exec("print('and hello from script code')").expect("Failed");
}
