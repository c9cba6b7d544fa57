use crate::models::FieldCategory;

/// Built-in field table: canonical name, category, accepted source columns in
/// priority order. Column names are in their cleaned form.
const BUILTIN_FIELDS: &[(&str, FieldCategory, &[&str])] = &[
    ("id", FieldCategory::Text, &["id_temporal", "id"]),
    ("title", FieldCategory::Text, &["titulo", "titulo_propiedad", "nombre"]),
    ("neighborhood", FieldCategory::Text, &["barrio", "zona", "ubicacion"]),
    ("price", FieldCategory::Numeric, &["precio", "precio_usd", "valor"]),
    ("rooms", FieldCategory::Numeric, &["ambientes", "habitaciones", "dormitorios"]),
    (
        "area_m2",
        FieldCategory::Numeric,
        &["metros_cuadrados", "metros", "superficie", "m2"],
    ),
    ("operation", FieldCategory::Text, &["operacion", "tipo_operacion"]),
    ("property_type", FieldCategory::Text, &["tipo", "tipo_propiedad"]),
    (
        "description",
        FieldCategory::Text,
        &["descripcion", "descripción", "caracteristicas"],
    ),
    ("address", FieldCategory::Text, &["direccion", "dirección", "calle"]),
    ("age_years", FieldCategory::Numeric, &["antiguedad", "antigüedad", "años"]),
    ("condition", FieldCategory::Text, &["estado", "condicion"]),
    ("orientation", FieldCategory::Text, &["orientacion", "orientación"]),
    ("floor", FieldCategory::Text, &["piso", "nivel", "planta"]),
    ("fees", FieldCategory::Numeric, &["expensas", "gastos_comunes"]),
    ("amenities", FieldCategory::Text, &["amenities", "comodidades", "servicios"]),
    (
        "parking",
        FieldCategory::Boolean,
        &["cochera", "garage", "estacionamiento"],
    ),
    ("balcony", FieldCategory::Boolean, &["balcon", "balcón"]),
    ("pool", FieldCategory::Boolean, &["pileta", "piscina"]),
    (
        "pet_friendly",
        FieldCategory::Boolean,
        &["acepta_mascotas", "mascotas", "pet_friendly"],
    ),
    (
        "air_conditioning",
        FieldCategory::Boolean,
        &["aire_acondicionado", "aire", "aa"],
    ),
    (
        "media_info",
        FieldCategory::Text,
        &["info_multimedia", "multimedia", "fotos_info"],
    ),
    (
        "documents",
        FieldCategory::List,
        &["documentos", "archivos", "docs", "documentacion"],
    ),
    (
        "photos",
        FieldCategory::List,
        &["fotos", "imagenes", "fotos_url", "multimedia"],
    ),
];

/// Fields whose absence from a sheet is worth flagging before a conversion.
pub const CRITICAL_FIELDS: &[&str] = &["title", "price", "operation", "property_type"];

/// One canonical field and the source columns that may carry it.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub category: FieldCategory,
    pub synonyms: Vec<String>,
}

/// Read-only set of recognized fields, in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldCatalog {
    fields: Vec<FieldSpec>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The built-in property catalog. Each field also accepts its own canonical
    /// name as the lowest-priority synonym.
    pub fn builtin() -> Self {
        let fields = BUILTIN_FIELDS
            .iter()
            .map(|(name, category, synonyms)| {
                let mut synonyms: Vec<String> = synonyms.iter().map(|s| s.to_string()).collect();
                if !synonyms.iter().any(|s| s == name) {
                    synonyms.push(name.to_string());
                }
                FieldSpec {
                    name: name.to_string(),
                    category: *category,
                    synonyms,
                }
            })
            .collect();
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Append extra synonyms to `field`, after the existing ones.
    /// Returns `false` when the catalog has no such field.
    pub fn extend_synonyms(&mut self, field: &str, extra: &[String]) -> bool {
        let Some(spec) = self.fields.iter_mut().find(|f| f.name == field) else {
            return false;
        };
        for synonym in extra {
            if !spec.synonyms.contains(synonym) {
                spec.synonyms.push(synonym.clone());
            }
        }
        true
    }

    /// `true` if `column` is a synonym of any field.
    pub fn recognizes(&self, column: &str) -> bool {
        self.fields
            .iter()
            .any(|f| f.synonyms.iter().any(|s| s == column))
    }
}

impl Default for FieldCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Constant fields injected into every record, plus the timestamp field name.
#[derive(Debug, Clone, PartialEq)]
pub struct Defaults {
    pub constants: Vec<(String, String)>,
    pub timestamp_field: String,
}

impl Defaults {
    pub fn new(price_currency: &str, fees_currency: &str, timestamp_field: &str) -> Self {
        Self {
            constants: vec![
                ("price_currency".to_string(), price_currency.to_string()),
                ("fees_currency".to_string(), fees_currency.to_string()),
            ],
            timestamp_field: timestamp_field.to_string(),
        }
    }

    /// Names of every field these defaults add to a record.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.constants
            .iter()
            .map(|(name, _)| name.as_str())
            .chain(std::iter::once(self.timestamp_field.as_str()))
    }
}

impl Default for Defaults {
    fn default() -> Self {
        Self::new("USD", "ARS", "processed_at")
    }
}
