//! Building a document by appending values, then serializing it.
//!
//! Run with: cargo run --example builder

use json_data::{to_string, to_string_pretty, Value};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let mut schools = Value::object();
    schools.append_member("Conjurations", Value::bool(true))?;
    schools.append_member("Fire Magic", Value::bool(true))?;

    let mut spell = Value::object();
    spell.append_member("name", Value::string("Flame Wave"))?;
    spell.append_member("level", Value::from(4))?;
    spell.append_member("schools", schools)?;
    spell.append_member("description", Value::string("Releases waves of fire."))?;

    let mut spells = Value::object();
    spells.append_member("Flame Wave", spell)?;

    println!("Compact:");
    println!("{}\n", to_string(&spells)?);

    println!("Pretty:");
    println!("{}\n", to_string_pretty(&spells)?);

    // Appending to the wrong kind of container hands the value back.
    let mut list = Value::array();
    if let Err(rejected) = list.append_member("key", Value::Null) {
        println!(
            "rejected: expected {}, found {}",
            rejected.expected(),
            rejected.found()
        );
    }

    Ok(())
}
