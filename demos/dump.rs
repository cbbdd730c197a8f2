//! Dumping an in-memory game data source.
//!
//! Run with: cargo run --example dump

use json_data::dump::build_document;
use json_data::source::{BookFacts, SpellFacts, SpellNoise, SpellRange, UnrandFacts};
use json_data::{to_string_pretty, DumpOptions, TomlSource};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let scorch = SpellFacts {
        name: "Scorch".to_string(),
        level: 2,
        schools: vec!["Fire Magic".to_string()],
        power_cap: 50,
        range: Some(SpellRange { min: 3, max: 3 }),
        noise: SpellNoise {
            casting: 2,
            effect: 4,
        },
        flags: vec!["area".to_string()],
        description: "Burns a random nearby foe.".to_string(),
        quote: Some("It's getting hot in here.".to_string()),
        player_spell: true,
    };

    let flames = BookFacts {
        name: "Book of Flames".to_string(),
        spells: vec!["Scorch".to_string()],
        value: 500,
        description: "A handbook of fire.".to_string(),
        quote: None,
    };

    let sword = UnrandFacts {
        name: "Singing Sword".to_string(),
        full_name: "the Singing Sword".to_string(),
        unidentified_name: Some("golden long sword".to_string()),
        type_name: Some("long sword".to_string()),
        inscription: None,
        base_type: Some("weapon".to_string()),
        sub_type: "long sword".to_string(),
        value: 1200,
        flags: vec!["SPECIAL".to_string()],
        description: "A talkative and somewhat tuneless sword.".to_string(),
        quote: None,
    };

    let source = TomlSource::new("0.32.1", vec![scorch], vec![flames], vec![sword]);
    let options = DumpOptions::default().with_quotes(true);
    let doc = build_document(&source, &options)?;
    println!("{}", to_string_pretty(&doc)?);

    Ok(())
}
