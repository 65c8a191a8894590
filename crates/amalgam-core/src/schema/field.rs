use serde::Deserialize;

/// One column of a table mapping.
///
/// `name` is the physical column; `alias`, when present, is the name the
/// column takes in the composite record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "FieldSpecConfig")]
pub struct FieldSpec {
    pub name: String,
    pub alias: Option<String>,
}

/// A field is configured either as a bare name or as `{ name, alias }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum FieldSpecConfig {
    Name(String),
    Aliased { name: String, alias: String },
}

impl FieldSpec {
    pub fn new(name: impl Into<String>) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            alias: None,
        }
    }

    pub fn aliased(name: impl Into<String>, alias: impl Into<String>) -> FieldSpec {
        FieldSpec {
            name: name.into(),
            alias: Some(alias.into()),
        }
    }

    /// Name of the field in the composite record.
    pub fn logical_name(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// Name of the column in the physical table.
    pub fn physical_name(&self) -> &str {
        &self.name
    }
}

impl From<FieldSpecConfig> for FieldSpec {
    fn from(config: FieldSpecConfig) -> FieldSpec {
        match config {
            FieldSpecConfig::Name(name) => FieldSpec::new(name),
            FieldSpecConfig::Aliased { name, alias } => FieldSpec::aliased(name, alias),
        }
    }
}

impl From<&str> for FieldSpec {
    fn from(name: &str) -> FieldSpec {
        FieldSpec::new(name)
    }
}

impl From<String> for FieldSpec {
    fn from(name: String) -> FieldSpec {
        FieldSpec::new(name)
    }
}
