//! In-memory catalogs of loaded content.

use std::collections::BTreeMap;

use magic_core::{SpawnTableEntry, SpellDefinition, SpellId, SpellTemplate, Spellbook};

/// Spell definitions keyed by id, in authoring order.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellCatalog {
    pub spells: Vec<SpellDefinition>,
}

impl SpellCatalog {
    pub fn new(spells: Vec<SpellDefinition>) -> Self {
        Self { spells }
    }

    pub fn get(&self, id: &SpellId) -> Option<&SpellDefinition> {
        self.spells.iter().find(|spell| &spell.id == id)
    }

    pub fn contains(&self, id: &SpellId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SpellDefinition> {
        self.spells.iter()
    }

    pub fn len(&self) -> usize {
        self.spells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spells.is_empty()
    }

    /// Ids that appear more than once.
    pub fn duplicate_ids(&self) -> Vec<&SpellId> {
        let mut seen: BTreeMap<&SpellId, usize> = BTreeMap::new();
        for spell in &self.spells {
            *seen.entry(&spell.id).or_default() += 1;
        }
        seen.into_iter()
            .filter(|(_, count)| *count > 1)
            .map(|(id, _)| id)
            .collect()
    }

    /// Spells whose spawn table asks for more than
    /// [`SpawnTableEntry::MAX_AMOUNT`] copies in one row.
    pub fn oversized_spawns(&self) -> Vec<&SpellId> {
        self.spells
            .iter()
            .filter(|spell| match &spell.effect {
                SpellTemplate::WorldSpawn { contents, .. } => contents
                    .iter()
                    .any(|entry| entry.amount > SpawnTableEntry::MAX_AMOUNT),
                _ => false,
            })
            .map(|spell| &spell.id)
            .collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpellbookCatalog {
    pub books: Vec<Spellbook>,
}

impl SpellbookCatalog {
    pub fn get(&self, id: &str) -> Option<&Spellbook> {
        self.books.iter().find(|book| book.id == id)
    }

    /// `(book, spell)` pairs naming a spell the catalog does not define.
    pub fn unknown_spells<'a>(&'a self, spells: &SpellCatalog) -> Vec<(&'a str, &'a SpellId)> {
        self.books
            .iter()
            .flat_map(|book| book.spells.iter().map(move |spell| (book.id.as_str(), spell)))
            .filter(|(_, spell)| !spells.contains(spell))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magic_core::SpellTemplate;

    fn smite(id: &str) -> SpellDefinition {
        SpellDefinition {
            id: SpellId::new(id),
            speech: None,
            effect: SpellTemplate::Smite {
                delete_non_brain_parts: false,
            },
        }
    }

    #[test]
    fn lookup_by_id() {
        let catalog = SpellCatalog::new(vec![smite("smite"), smite("smite-lite")]);
        assert!(catalog.contains(&SpellId::new("smite-lite")));
        assert!(catalog.get(&SpellId::new("fireball")).is_none());
    }

    #[test]
    fn duplicates_are_reported_once() {
        let catalog = SpellCatalog::new(vec![smite("a"), smite("b"), smite("a"), smite("a")]);
        assert_eq!(catalog.duplicate_ids(), vec![&SpellId::new("a")]);
    }

    #[test]
    fn books_naming_missing_spells_are_reported() {
        let spells = SpellCatalog::new(vec![smite("smite")]);
        let books = SpellbookCatalog {
            books: vec![Spellbook {
                id: "wizard".into(),
                spells: vec![SpellId::new("smite"), SpellId::new("fireball")],
                learn_time: None,
            }],
        };

        assert_eq!(
            books.unknown_spells(&spells),
            vec![("wizard", &SpellId::new("fireball"))]
        );
    }
}
