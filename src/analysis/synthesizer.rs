//! Builds structure, map, array and value table types on top of fresh templates.

use crate::host::PropertyUniverse;
use crate::types::{
    Property,
    Type,
    TypeKind,
    ARRAY,
    FIXED_ARRAY,
    FIXED_MAP,
    FIXED_STRUCTURE,
    KEY_AND_VALUE,
    MAP,
    STRUCTURE,
    VALUE_TABLE,
    VALUE_TABLE_COLUMN,
};

use super::templates::TypeTemplates;
use super::InferenceError;

const KEY: &str = "Key";
const VALUE: &str = "Value";
const GET: &str = "Get";
const COLUMNS: &str = "Columns";

#[derive(Debug, Clone, Copy)]
pub struct TypeSynthesizer<'h> {
    templates: TypeTemplates<'h>,
    universe: &'h dyn PropertyUniverse,
}

impl<'h> TypeSynthesizer<'h> {
    pub fn new(templates: TypeTemplates<'h>, universe: &'h dyn PropertyUniverse) -> Self {
        TypeSynthesizer {
            templates,
            universe,
        }
    }

    /// Structure whose properties are derived copies of `properties`,
    /// writable unless the structure is fixed.
    pub fn build_structure<'p>(
        &self,
        properties: impl IntoIterator<Item = &'p Property>,
        fixed: bool,
    ) -> Result<Type, InferenceError> {
        let mut structure = self
            .templates
            .fresh(if fixed { FIXED_STRUCTURE } else { STRUCTURE })?;

        for property in properties {
            structure.properties.push(Property {
                writable: !fixed,
                derived: true,
                ..property.clone()
            });
        }

        Ok(structure)
    }

    /// Map with typed `KeyAndValue` rows. The lookup method returns the value types.
    pub fn build_map(
        &self,
        key_types: &[Type],
        value_types: &[Type],
        fixed: bool,
    ) -> Result<Type, InferenceError> {
        let name = if fixed { FIXED_MAP } else { MAP };
        let mut map = self.templates.fresh(name)?;
        let mut row = self.templates.fresh(KEY_AND_VALUE)?;

        row.property_mut(KEY)
            .ok_or_else(|| InferenceError::MissingProperty(KEY_AND_VALUE.to_string(), KEY.to_string()))?
            .types = key_types.to_vec();
        row.property_mut(VALUE)
            .ok_or_else(|| InferenceError::MissingProperty(KEY_AND_VALUE.to_string(), VALUE.to_string()))?
            .types = value_types.to_vec();

        map.element_types = vec![row];
        if let Some(get) = map.method_mut(GET) {
            get.return_types = value_types.to_vec();
        }

        Ok(map)
    }

    /// Array of `element_types`. The element getter returns the same types.
    pub fn build_array(&self, element_types: &[Type], fixed: bool) -> Result<Type, InferenceError> {
        let name = if fixed { FIXED_ARRAY } else { ARRAY };
        if element_types.is_empty() {
            return Err(InferenceError::EmptyElementTypes(name.to_string()));
        }

        let mut array = self.templates.fresh(name)?;
        array.element_types = element_types.to_vec();
        if let Some(get) = array.method_mut(GET) {
            get.return_types = element_types.to_vec();
        }

        Ok(array)
    }

    /// Converts a structure, map or array to the requested fixedness.
    ///
    /// Types already of that fixedness, and non-collection types, come back unchanged.
    pub fn transform(&self, ty: &Type, fixed: bool) -> Result<Type, InferenceError> {
        let kind = ty.kind();
        if kind.is_fixed() == fixed {
            return Ok(ty.clone());
        }

        match kind {
            TypeKind::Structure | TypeKind::FixedStructure => {
                let properties = self
                    .universe
                    .all_properties(std::slice::from_ref(ty))
                    .into_iter()
                    .next()
                    .map(|(properties, _)| properties)
                    .unwrap_or_default();
                self.build_structure(properties.iter().filter(|p| p.derived), fixed)
            }
            TypeKind::Map | TypeKind::FixedMap => {
                let row = ty
                    .element_types
                    .iter()
                    .find(|t| t.kind() == TypeKind::KeyAndValue)
                    .ok_or_else(|| InferenceError::EmptyElementTypes(ty.name.clone()))?;
                let key_types = row.property(KEY).map(|p| p.types.clone()).unwrap_or_default();
                let value_types = row
                    .property(VALUE)
                    .map(|p| p.types.clone())
                    .unwrap_or_default();
                self.build_map(&key_types, &value_types, fixed)
            }
            TypeKind::Array | TypeKind::FixedArray => self.build_array(&ty.element_types, fixed),
            _ => Ok(ty.clone()),
        }
    }

    /// Value table whose row type carries `row_properties` and whose column
    /// collection carries one column property per entry of `column_properties`.
    pub fn build_value_table(
        &self,
        row_properties: Vec<Property>,
        column_properties: Vec<Property>,
    ) -> Result<Type, InferenceError> {
        let mut table = self.templates.fresh(VALUE_TABLE)?;
        let column = self.templates.fresh(VALUE_TABLE_COLUMN)?;

        let row = table
            .element_types
            .iter_mut()
            .find(|t| t.kind() == TypeKind::ValueTableRow)
            .ok_or_else(|| InferenceError::EmptyElementTypes(VALUE_TABLE.to_string()))?;
        row.properties.extend(row_properties);

        let columns = table
            .property_mut(COLUMNS)
            .and_then(|p| p.types.first_mut())
            .ok_or_else(|| InferenceError::MissingProperty(VALUE_TABLE.to_string(), COLUMNS.to_string()))?;
        columns
            .properties
            .extend(column_properties.into_iter().map(|property| Property {
                types: vec![column.clone()],
                writable: false,
                derived: true,
                ..property
            }));

        Ok(table)
    }
}
