//! Which Noir types can be serialised into call arguments, and where their
//! serialisation methods live.
//!
//! Every serialisable type `T` is expected to provide a `TSerialisationMethods`
//! bundle (with `serialise` / `deserialise`) and a `T_SERIALISED_LEN` global.

use crate::parser::ast::ImportedName;
use log::{debug, warn};
use std::collections::HashMap;

/// Module holding the serialisation methods for the built-in Noir types.
pub const NATIVE_SERIALISATION_MODULE: &str = "dep::aztec::types::type_serialisation";

pub const NATIVE_TYPES: &[&str] = &["Field", "bool", "u8", "u16", "u32", "u64", "u128"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerialisationSource {
    /// Lives in `<NATIVE_SERIALISATION_MODULE>::<type>_serialisation`.
    Native,
    /// Lives next to the type itself in `module`.
    Imported { module: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Serialisation<'a> {
    /// The type as written in parameter lists, possibly an import alias.
    pub type_name: &'a str,
    /// The name the type is declared under. Serialisation items are named
    /// after it.
    pub original: &'a str,
    pub source: &'a SerialisationSource,
}

impl<'a> Serialisation<'a> {
    pub fn is_native(&self) -> bool {
        matches!(self.source, SerialisationSource::Native)
    }

    /// `FieldSerialisationMethods`
    pub fn methods_ident(&self) -> String {
        format!("{}SerialisationMethods", upper_first(self.original))
    }

    /// `FIELD_SERIALISED_LEN`
    pub fn length_const(&self) -> String {
        format!("{}_SERIALISED_LEN", self.original.to_uppercase())
    }

    /// `field_serialisation`
    pub fn module_ident(&self) -> String {
        format!("{}_serialisation", self.original.to_lowercase())
    }

    /// `Point`, or `Point as P` for an aliased import.
    pub fn import_item(&self) -> String {
        if self.type_name == self.original {
            self.original.to_string()
        } else {
            format!("{} as {}", self.original, self.type_name)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    original: String,
    source: SerialisationSource,
}

#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    entries: HashMap<String, Entry>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry knowing only the built-in Noir types.
    pub fn native() -> Self {
        let mut registry = Self::new();
        for ty in NATIVE_TYPES {
            registry.register(*ty, SerialisationSource::Native);
        }
        registry
    }

    /// Register a type under its own name. Built-in types keep their native
    /// entry.
    pub fn register(&mut self, type_name: impl Into<String>, source: SerialisationSource) {
        let type_name = type_name.into();
        self.insert(type_name.clone(), type_name, source);
    }

    /// Register `alias` as another name for `original`.
    pub fn register_alias(
        &mut self,
        alias: impl Into<String>,
        original: impl Into<String>,
        source: SerialisationSource,
    ) {
        self.insert(alias.into(), original.into(), source);
    }

    fn insert(&mut self, key: String, original: String, source: SerialisationSource) {
        if let Some(existing) = self.entries.get(&key) {
            if existing.source == SerialisationSource::Native {
                if source != SerialisationSource::Native {
                    warn!("{} is a built-in type, ignoring {:?}", key, source);
                }
                return;
            }
        }
        self.entries.insert(key, Entry { original, source });
    }

    /// Register imported types, assuming their serialisation methods are
    /// exported from the module they were imported from. An aliased import is
    /// also reachable through its alias.
    pub fn register_imports(&mut self, imports: &[ImportedName]) {
        for import in imports {
            if self.is_native(&import.name) {
                continue;
            }
            let module = match import.module() {
                Some(module) => module,
                None => continue,
            };
            debug!("Registering imported type {} from {}", import.name, module);
            let source = SerialisationSource::Imported {
                module: module.to_string(),
            };
            if let Some(alias) = &import.alias {
                self.register_alias(alias.clone(), import.name.clone(), source.clone());
            }
            self.register(import.name.clone(), source);
        }
    }

    pub fn lookup<'a>(&'a self, type_name: &'a str) -> Option<Serialisation<'a>> {
        self.entries.get(type_name).map(|entry| Serialisation {
            type_name,
            original: &entry.original,
            source: &entry.source,
        })
    }

    fn is_native(&self, type_name: &str) -> bool {
        matches!(
            self.entries.get(type_name),
            Some(Entry {
                source: SerialisationSource::Native,
                ..
            })
        )
    }
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
