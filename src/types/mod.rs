//! Type descriptors shared by the host and the inference engine.
//!
//! A [`Type`] is an owned value: cloning it yields an independent instance
//! that can be augmented without affecting the template it came from.

use std::fmt::{
    self,
    Display,
};

use serde::{
    Deserialize,
    Serialize,
};

use crate::utils::eq_ignore_case;

pub mod version;

pub use version::RuntimeVersion;

pub const STRUCTURE: &str = "Structure";
pub const FIXED_STRUCTURE: &str = "FixedStructure";
pub const MAP: &str = "Map";
pub const FIXED_MAP: &str = "FixedMap";
pub const KEY_AND_VALUE: &str = "KeyAndValue";
pub const ARRAY: &str = "Array";
pub const FIXED_ARRAY: &str = "FixedArray";
pub const VALUE_TABLE: &str = "ValueTable";
pub const VALUE_TABLE_ROW: &str = "ValueTableRow";
pub const VALUE_TABLE_COLUMN: &str = "ValueTableColumn";
pub const VALUE_TABLE_COLUMN_COLLECTION: &str = "ValueTableColumnCollection";
pub const STRING: &str = "String";
pub const NUMBER: &str = "Number";
pub const BOOLEAN: &str = "Boolean";
pub const DATE: &str = "Date";
pub const UNDEFINED: &str = "Undefined";
pub const NULL: &str = "Null";
pub const ARBITRARY: &str = "Arbitrary";
pub const TYPE_SET: &str = "TypeSet";

/// Categories of types that reference business objects.
static REF_CATEGORIES: phf::Set<&'static str> = phf::phf_set! {
    "CatalogRef",
    "DocumentRef",
    "EnumRef",
    "ChartOfCharacteristicTypesRef",
    "ChartOfAccountsRef",
    "ChartOfCalculationTypesRef",
    "ExchangePlanRef",
    "BusinessProcessRef",
    "BusinessProcessRoutePointRef",
    "TaskRef",
    "AnyRef",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Structure,
    FixedStructure,
    Map,
    FixedMap,
    KeyAndValue,
    Array,
    FixedArray,
    ValueTable,
    ValueTableRow,
    ValueTableColumn,
    ValueTableColumnCollection,
    String,
    Number,
    Boolean,
    Date,
    Undefined,
    TypeSet,
    Other,
}

impl TypeKind {
    /// Classifies a type name given in either spelling.
    pub fn from_name(name: &str) -> TypeKind {
        match name.to_lowercase().as_str() {
            "structure" | "структура" => TypeKind::Structure,
            "fixedstructure" | "фиксированнаяструктура" => TypeKind::FixedStructure,
            "map" | "соответствие" => TypeKind::Map,
            "fixedmap" | "фиксированноесоответствие" => TypeKind::FixedMap,
            "keyandvalue" | "ключизначение" => TypeKind::KeyAndValue,
            "array" | "массив" => TypeKind::Array,
            "fixedarray" | "фиксированныймассив" => TypeKind::FixedArray,
            "valuetable" | "таблицазначений" => TypeKind::ValueTable,
            "valuetablerow" | "строкатаблицызначений" => TypeKind::ValueTableRow,
            "valuetablecolumn" | "колонкатаблицызначений" => TypeKind::ValueTableColumn,
            "valuetablecolumncollection" | "коллекцияколоноктаблицызначений" => {
                TypeKind::ValueTableColumnCollection
            }
            "string" | "строка" => TypeKind::String,
            "number" | "число" => TypeKind::Number,
            "boolean" | "булево" => TypeKind::Boolean,
            "date" | "дата" => TypeKind::Date,
            "undefined" | "неопределено" => TypeKind::Undefined,
            "typeset" => TypeKind::TypeSet,
            _ => TypeKind::Other,
        }
    }

    pub fn is_structure(&self) -> bool {
        matches!(self, TypeKind::Structure | TypeKind::FixedStructure)
    }

    pub fn is_map(&self) -> bool {
        matches!(self, TypeKind::Map | TypeKind::FixedMap)
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeKind::Array | TypeKind::FixedArray)
    }

    pub fn is_fixed(&self) -> bool {
        matches!(
            self,
            TypeKind::FixedStructure | TypeKind::FixedMap | TypeKind::FixedArray
        )
    }
}

/// Back-reference from a derived property to whatever it was inferred from.
///
/// Copied by value, never owning: it carries identifiers only.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum DerivedSource {
    /// A metadata object (attribute, tabular section, ...) by identifier.
    Metadata { id: String },
    /// A string literal that named a synthesized key.
    Literal {
        module_uri: String,
        method_name: Option<String>,
        local_offset: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub name: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub types: Vec<Type>,
    #[serde(default = "default_true")]
    pub readable: bool,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub derived: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<DerivedSource>,
}

fn default_true() -> bool {
    true
}

impl Property {
    pub fn new(name: &str, name_ru: &str, types: Vec<Type>) -> Self {
        Property {
            name: name.to_string(),
            name_ru: name_ru.to_string(),
            types,
            readable: true,
            writable: false,
            derived: false,
            source: None,
        }
    }

    /// A property synthesized by inference.
    pub fn derived(name: &str, name_ru: &str, types: Vec<Type>, source: Option<DerivedSource>) -> Self {
        Property {
            derived: true,
            source,
            ..Property::new(name, name_ru, types)
        }
    }

    /// Matches either spelling, ignoring case.
    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name) || eq_ignore_case(&self.name_ru, name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Method {
    pub name: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default)]
    pub return_types: Vec<Type>,
}

impl Method {
    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name) || eq_ignore_case(&self.name_ru, name)
    }
}

#[derive(Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Type {
    pub name: String,
    #[serde(default)]
    pub name_ru: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub element_types: Vec<Type>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub methods: Vec<Method>,
}

impl Type {
    /// A bare type known only by name.
    pub fn named(name: &str) -> Self {
        Type {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// A metadata type such as `CatalogRef.Products`; the category is the
    /// part before the first dot.
    pub fn reference(name: &str) -> Self {
        Type {
            name: name.to_string(),
            category: name.split_once('.').map(|(category, _)| category.to_string()),
            ..Default::default()
        }
    }

    pub fn kind(&self) -> TypeKind {
        TypeKind::from_name(&self.name)
    }

    pub fn is_named(&self, name: &str) -> bool {
        eq_ignore_case(&self.name, name) || eq_ignore_case(&self.name_ru, name)
    }

    pub fn is_ref(&self) -> bool {
        match self.category.as_deref() {
            Some("AnyRef") => false,
            Some(category) => REF_CATEGORIES.contains(category),
            None => false,
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.is_named(name))
    }

    pub fn property_mut(&mut self, name: &str) -> Option<&mut Property> {
        self.properties.iter_mut().find(|p| p.is_named(name))
    }

    pub fn method(&self, name: &str) -> Option<&Method> {
        self.methods.iter().find(|m| m.is_named(name))
    }

    pub fn method_mut(&mut self, name: &str) -> Option<&mut Method> {
        self.methods.iter_mut().find(|m| m.is_named(name))
    }
}

/// Ref types among `types`.
pub fn ref_types(types: &[Type]) -> Vec<Type> {
    types.iter().filter(|t| t.is_ref()).cloned().collect()
}

/// Ref types held as elements of arrays among `types`.
pub fn array_ref_types(types: &[Type]) -> Vec<Type> {
    types
        .iter()
        .filter(|t| t.kind().is_array())
        .flat_map(|t| t.element_types.iter())
        .filter(|t| t.is_ref())
        .cloned()
        .collect()
}

pub fn has_kind(types: &[Type], predicate: impl Fn(TypeKind) -> bool) -> bool {
    types.iter().any(|t| predicate(t.kind()))
}

fn join_types(types: &[Type]) -> String {
    if types.is_empty() {
        return ARBITRARY.to_string();
    }
    types
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<String>>()
        .join(" | ")
}

impl Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.element_types.is_empty() {
            write!(f, "<{}>", join_types(&self.element_types))?;
        }
        if !self.properties.is_empty() {
            let properties = self
                .properties
                .iter()
                .map(|p| format!("{}: {}", p.name, join_types(&p.types)))
                .collect::<Vec<String>>()
                .join(", ");
            write!(f, "{{{properties}}}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}
