//! Value conversion example
//!
//! Shows the codec semantics: one double representation for all
//! numeric kinds, truncation toward zero on decode, and calling
//! script functions with typed results.
//!
//! Run with: cargo run --example 03_value_conversion -p lantern-lua

use lantern_lua::Session;

fn main() {
    let session = Session::new().expect("Failed to create session");

    // Every integer width rides the same numeric slot.
    session.set_global("n", 42u8).expect("Failed");
    let wide: i64 = session.get_global("n").expect("Failed");
    println!("42u8 read back as i64 = {wide}");
    // Output: 42u8 read back as i64 = 42

    // Fractional values truncate toward zero when read as integers.
    session.set_global("n", 3.9f64).expect("Failed");
    let truncated: i32 = session.get_global("n").expect("Failed");
    println!("3.9 read back as i32 = {truncated}");
    // Output: 3.9 read back as i32 = 3

    // Out-of-range decodes wrap modulo the target width.
    session.set_global("n", 300i64).expect("Failed");
    let wrapped: u8 = session.get_global("n").expect("Failed");
    println!("300 read back as u8 = {wrapped}");
    // Output: 300 read back as u8 = 44

    // Typed calls into script functions.
    session
        .exec("function concat3(a, b, c) return a .. b .. c end")
        .expect("Failed");
    let joined: String = session.call("concat3", ("a", "b", "c")).expect("Failed");
    println!("concat3('a', 'b', 'c') = {joined}");
    // Output: concat3('a', 'b', 'c') = abc
}
