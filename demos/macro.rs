//! Building documents with the `json!` macro.
//!
//! Run with: cargo run --example macro

use json_data::{json, to_string, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let book = json!({
        "name": "Book of Flames",
        "spells": ["Scorch", "Flame Wave"],
        "value": 500
    });
    println!("{}\n", to_string(&book)?);

    // Members come out in the order they were written.
    let ordered = json!({"zeta": 1, "alpha": 2, "mid": 3});
    println!("{}\n", to_string(&ordered)?);

    let name = "Singing Sword";
    let flags: Vec<Value> = ["SPECIAL"].into_iter().map(Value::string).collect();
    let unrand = json!({
        "name": name,
        "value": 1200,
        "flags": flags,
        "quote": null
    });
    println!("{}", to_string(&unrand)?);

    Ok(())
}
