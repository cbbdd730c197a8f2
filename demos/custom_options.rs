//! Customizing output with WriteOptions.
//!
//! Run with: cargo run --example custom_options

use json_data::{
    json, to_string_with_options, DuplicateKeys, NonFinitePolicy, Utf8Policy, Value,
    WriteOptions,
};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = json!({"name": "Scorch", "schools": ["Fire Magic"], "level": 2});

    println!("Pretty, indent 4:");
    let pretty = WriteOptions::pretty().with_indent(4);
    println!("{}\n", to_string_with_options(&doc, pretty)?);

    // Ill-formed bytes fail by default; Replace substitutes U+FFFD.
    let mut names = Value::array();
    names.append_element(Value::string_from_bytes(b"Z\xEAnon".to_vec()))?;
    match to_string_with_options(&names, WriteOptions::new()) {
        Ok(json) => println!("{}", json),
        Err(e) => println!("default policy: {}", e),
    }
    let lossy = WriteOptions::new().with_utf8_policy(Utf8Policy::Replace);
    println!("replace policy: {}\n", to_string_with_options(&names, lossy)?);

    let mut ratios = Value::array();
    ratios.append_element(Value::number(f64::NAN))?;
    let nulls = WriteOptions::new().with_non_finite_policy(NonFinitePolicy::Null);
    println!("non-finite as null: {}\n", to_string_with_options(&ratios, nulls)?);

    let repeated = json!({"flag": 1, "flag": 2});
    for policy in [
        DuplicateKeys::Keep,
        DuplicateKeys::FirstWins,
        DuplicateKeys::LastWins,
        DuplicateKeys::Reject,
    ] {
        let options = WriteOptions::new().with_duplicate_keys(policy);
        match to_string_with_options(&repeated, options) {
            Ok(json) => println!("{:?}: {}", policy, json),
            Err(e) => println!("{:?}: {}", policy, e),
        }
    }

    Ok(())
}
