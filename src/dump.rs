//! Assembly of the game data document.
//!
//! [`build_document`] walks a [`GameDataSource`] and produces
//!
//! ```text
//! {"version": ..., "spells": {...}, "spellbooks": {...}, "unrands": {...}}
//! ```
//!
//! Spells, books and unrands are keyed by name and listed in source order.
//! Sets of flags and schools are written as objects mapping each member to
//! `true`.

use crate::source::{BookFacts, GameDataSource, SpellFacts, UnrandFacts};
use crate::{Result, Value};
use log::{debug, info};

/// Knobs for [`build_document`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DumpOptions {
    /// Include flavour quotes for spells and books. Unrand quotes are always included.
    pub include_quotes: bool,
}

impl DumpOptions {
    #[must_use]
    pub fn with_quotes(mut self, include_quotes: bool) -> Self {
        self.include_quotes = include_quotes;
        self
    }
}

/// Build the complete document for `source`.
///
/// # Errors
///
/// Only fails on a builder type mismatch, which indicates a bug here.
pub fn build_document(source: &dyn GameDataSource, options: &DumpOptions) -> Result<Value> {
    let mut doc = Value::object();
    doc.append_member("version", Value::string(source.version()))?;
    doc.append_member("spells", spell_list(source, options)?)?;
    doc.append_member("spellbooks", book_list(source, options)?)?;
    doc.append_member("unrands", unrand_list(source)?)?;
    Ok(doc)
}

/// `{name: true, ...}` for each name, in the given order.
fn flag_set<'a>(names: impl IntoIterator<Item = &'a str>) -> Result<Value> {
    let mut set = Value::object();
    for name in names {
        set.append_member(name, Value::bool(true))?;
    }
    Ok(set)
}

fn trimmed(text: &str) -> Value {
    Value::string(text.trim())
}

/// The trimmed quote, or `None` when there is nothing to show.
fn quote(text: Option<&str>) -> Option<Value> {
    text.map(str::trim)
        .filter(|q| !q.is_empty())
        .map(Value::string)
}

fn spell_list(source: &dyn GameDataSource, options: &DumpOptions) -> Result<Value> {
    let mut spells = Value::object();
    let mut written = 0usize;
    for spell in source.spells() {
        if !spell.player_spell {
            debug!("skipping monster-only spell '{}'", spell.name);
            continue;
        }
        match spell_object(spell, source.books(), options)? {
            Some(obj) => {
                spells.append_member(spell.name.as_str(), obj)?;
                written += 1;
            }
            None => debug!("skipping spell '{}': not found in any book", spell.name),
        }
    }
    info!("{} spells added to document", written);
    Ok(spells)
}

/// `None` for spells no book contains.
fn spell_object(
    spell: &SpellFacts,
    books: &[BookFacts],
    options: &DumpOptions,
) -> Result<Option<Value>> {
    let Some(books) = spell_books(spell, books)? else {
        return Ok(None);
    };

    let mut obj = Value::object();
    obj.append_member("name", Value::string(spell.name.as_str()))?;
    obj.append_member("level", Value::from(spell.level))?;
    obj.append_member("schools", flag_set(spell.schools.iter().map(String::as_str))?)?;
    obj.append_member("power cap", Value::from(spell.power_cap))?;
    if let Some(range) = spell.range {
        let mut range_obj = Value::object();
        range_obj.append_member("min", Value::from(range.min))?;
        range_obj.append_member("max", Value::from(range.max))?;
        obj.append_member("range", range_obj)?;
    }
    let mut noise = Value::object();
    noise.append_member("casting", Value::from(spell.noise.casting))?;
    noise.append_member("effect", Value::from(spell.noise.effect))?;
    obj.append_member("noise", noise)?;
    obj.append_member("flags", flag_set(spell.flags.iter().map(String::as_str))?)?;
    obj.append_member("description", trimmed(&spell.description))?;
    if options.include_quotes {
        if let Some(q) = quote(spell.quote.as_deref()) {
            obj.append_member("quote", q)?;
        }
    }
    obj.append_member("books", books)?;
    Ok(Some(obj))
}

/// Names of the books containing `spell`, or `None` if there are none.
fn spell_books(spell: &SpellFacts, books: &[BookFacts]) -> Result<Option<Value>> {
    let containing = books.iter().flat_map(|book| {
        book.spells
            .iter()
            .filter(|name| **name == spell.name)
            .map(move |_| book.name.as_str())
    });

    let mut obj = Value::object();
    let mut found = false;
    for name in containing {
        obj.append_member(name, Value::bool(true))?;
        found = true;
    }
    Ok(found.then_some(obj))
}

fn book_list(source: &dyn GameDataSource, options: &DumpOptions) -> Result<Value> {
    let mut books = Value::object();
    for book in source.books() {
        books.append_member(book.name.as_str(), book_object(book, options)?)?;
    }
    info!("{} spellbooks added to document", source.books().len());
    Ok(books)
}

fn book_object(book: &BookFacts, options: &DumpOptions) -> Result<Value> {
    let mut spells = Value::array();
    for spell in &book.spells {
        spells.append_element(Value::string(spell.as_str()))?;
    }

    let mut obj = Value::object();
    obj.append_member("name", Value::string(book.name.as_str()))?;
    obj.append_member("spells", spells)?;
    obj.append_member("value", Value::from(book.value))?;
    obj.append_member("description", trimmed(&book.description))?;
    if options.include_quotes {
        if let Some(q) = quote(book.quote.as_deref()) {
            obj.append_member("quote", q)?;
        }
    }
    Ok(obj)
}

fn unrand_list(source: &dyn GameDataSource) -> Result<Value> {
    let mut unrands = Value::object();
    let mut written = 0usize;
    for unrand in source.unrands() {
        let Some(base_type) = unrand.base_type.as_deref() else {
            debug!("skipping placeholder unrand '{}'", unrand.name);
            continue;
        };
        unrands.append_member(unrand.name.as_str(), unrand_object(unrand, base_type)?)?;
        written += 1;
    }
    info!("{} unrands added to document", written);
    Ok(unrands)
}

fn unrand_object(unrand: &UnrandFacts, base_type: &str) -> Result<Value> {
    let mut obj = Value::object();
    obj.append_member("name", Value::string(unrand.name.as_str()))?;
    obj.append_member("full name", Value::string(unrand.full_name.as_str()))?;
    if let Some(unid) = unrand.unidentified_name.as_deref() {
        if unid != unrand.name {
            obj.append_member("name unidentified", Value::string(unid))?;
        }
    }
    if let Some(type_name) = unrand.type_name.as_deref() {
        obj.append_member("type name", Value::string(type_name))?;
    }
    if let Some(inscription) = unrand.inscription.as_deref() {
        obj.append_member("inscription", Value::string(inscription))?;
    }
    obj.append_member("base type", Value::string(base_type))?;
    obj.append_member("sub type", Value::string(unrand.sub_type.as_str()))?;
    obj.append_member("value", Value::from(unrand.value))?;
    obj.append_member("flags", flag_set(unrand.flags.iter().map(String::as_str))?)?;
    obj.append_member("description", trimmed(&unrand.description))?;
    if let Some(q) = quote(unrand.quote.as_deref()) {
        obj.append_member("quote", q)?;
    }
    Ok(obj)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SpellNoise, SpellRange, TomlSource};
    use crate::to_string;

    fn spell(name: &str) -> SpellFacts {
        SpellFacts {
            name: name.to_string(),
            level: 1,
            schools: vec!["Conjurations".to_string()],
            power_cap: 25,
            range: None,
            noise: SpellNoise::default(),
            flags: vec![],
            description: String::new(),
            quote: None,
            player_spell: true,
        }
    }

    fn book(name: &str, spells: &[&str]) -> BookFacts {
        BookFacts {
            name: name.to_string(),
            spells: spells.iter().map(|s| s.to_string()).collect(),
            value: 100,
            description: String::new(),
            quote: None,
        }
    }

    fn keys(value: &Value) -> Vec<String> {
        value.as_object().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_top_level_order() {
        let source = TomlSource::new("0.1", vec![], vec![], vec![]);
        let doc = build_document(&source, &DumpOptions::default()).unwrap();
        assert_eq!(keys(&doc), vec!["version", "spells", "spellbooks", "unrands"]);
        assert_eq!(
            to_string(&doc).unwrap(),
            r#"{"version":"0.1","spells":{},"spellbooks":{},"unrands":{}}"#
        );
    }

    #[test]
    fn test_spell_without_book_is_skipped() {
        let source = TomlSource::new(
            "0.1",
            vec![spell("Magic Dart"), spell("Orphan")],
            vec![book("Book of Minor Magic", &["Magic Dart"])],
            vec![],
        );
        let doc = build_document(&source, &DumpOptions::default()).unwrap();
        assert_eq!(keys(doc.get("spells").unwrap()), vec!["Magic Dart"]);
    }

    #[test]
    fn test_monster_spell_is_skipped() {
        let mut monster = spell("Smiting");
        monster.player_spell = false;
        let source = TomlSource::new("0.1", vec![monster], vec![book("B", &["Smiting"])], vec![]);
        let doc = build_document(&source, &DumpOptions::default()).unwrap();
        assert!(doc.get("spells").unwrap().as_object().unwrap().is_empty());
    }

    #[test]
    fn test_spell_object_shape() {
        let mut dart = spell("Magic Dart");
        dart.range = Some(SpellRange { min: 4, max: 5 });
        dart.noise = SpellNoise {
            casting: 1,
            effect: 2,
        };
        dart.flags = vec!["dir_or_target".to_string()];
        dart.description = "  A dart.\n".to_string();
        dart.quote = Some("  \n".to_string());
        let source = TomlSource::new(
            "0.1",
            vec![dart],
            vec![book("First", &["Magic Dart"]), book("Second", &["Magic Dart"])],
            vec![],
        );

        let doc = build_document(&source, &DumpOptions::default().with_quotes(true)).unwrap();
        let obj = doc.get("spells").and_then(|s| s.get("Magic Dart")).unwrap();
        assert_eq!(
            to_string(obj).unwrap(),
            concat!(
                r#"{"name":"Magic Dart","level":1,"schools":{"Conjurations":true},"#,
                r#""power cap":25,"range":{"min":4,"max":5},"noise":{"casting":1,"effect":2},"#,
                r#""flags":{"dir_or_target":true},"description":"A dart.","#,
                r#""books":{"First":true,"Second":true}}"#
            )
        );
    }

    #[test]
    fn test_quotes_follow_option() {
        let mut dart = spell("Magic Dart");
        dart.quote = Some(" Zap. ".to_string());
        let mut minor = book("Minor", &["Magic Dart"]);
        minor.quote = Some("Read me.".to_string());
        let source = TomlSource::new("0.1", vec![dart], vec![minor], vec![]);

        let without = build_document(&source, &DumpOptions::default()).unwrap();
        assert!(without.get("spells").unwrap().get("Magic Dart").unwrap().get("quote").is_none());
        assert!(without.get("spellbooks").unwrap().get("Minor").unwrap().get("quote").is_none());

        let with = build_document(&source, &DumpOptions::default().with_quotes(true)).unwrap();
        let quote = with
            .get("spells")
            .and_then(|s| s.get("Magic Dart"))
            .and_then(|s| s.get("quote"))
            .and_then(Value::as_str);
        assert_eq!(quote, Some("Zap."));
    }

    #[test]
    fn test_book_object() {
        let source = TomlSource::new(
            "0.1",
            vec![],
            vec![book("Book of Fire", &["Scorch", "Flame Wave"])],
            vec![],
        );
        let doc = build_document(&source, &DumpOptions::default()).unwrap();
        let obj = doc.get("spellbooks").and_then(|b| b.get("Book of Fire")).unwrap();
        assert_eq!(
            to_string(obj).unwrap(),
            r#"{"name":"Book of Fire","spells":["Scorch","Flame Wave"],"value":100,"description":""}"#
        );
    }

    fn unrand(name: &str) -> UnrandFacts {
        UnrandFacts {
            name: name.to_string(),
            full_name: format!("the {}", name),
            unidentified_name: None,
            type_name: None,
            inscription: None,
            base_type: Some("weapon".to_string()),
            sub_type: "long sword".to_string(),
            value: 1000,
            flags: vec![],
            description: String::new(),
            quote: None,
        }
    }

    #[test]
    fn test_unrand_optional_members() {
        let mut same = unrand("Singing Sword");
        same.unidentified_name = Some("Singing Sword".to_string());
        let mut differs = unrand("Wrath of Trog");
        differs.unidentified_name = Some("bloodstained axe".to_string());
        differs.type_name = Some("Axe".to_string());
        differs.inscription = Some("rage".to_string());
        differs.flags = vec!["EVIL".to_string(), "CHAOTIC".to_string()];
        differs.quote = Some("Blood!".to_string());
        let mut placeholder = unrand("DUMMY");
        placeholder.base_type = None;

        let source = TomlSource::new("0.1", vec![], vec![], vec![same, differs, placeholder]);
        let doc = build_document(&source, &DumpOptions::default()).unwrap();
        let unrands = doc.get("unrands").unwrap();
        assert_eq!(keys(unrands), vec!["Singing Sword", "Wrath of Trog"]);

        assert!(unrands.get("Singing Sword").unwrap().get("name unidentified").is_none());
        assert_eq!(
            to_string(unrands.get("Wrath of Trog").unwrap()).unwrap(),
            concat!(
                r#"{"name":"Wrath of Trog","full name":"the Wrath of Trog","#,
                r#""name unidentified":"bloodstained axe","type name":"Axe","inscription":"rage","#,
                r#""base type":"weapon","sub type":"long sword","value":1000,"#,
                r#""flags":{"EVIL":true,"CHAOTIC":true},"description":"","quote":"Blood!"}"#
            )
        );
    }
}
