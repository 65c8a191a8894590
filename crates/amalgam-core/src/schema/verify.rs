use super::{MappingKind, MappingSet, TableMapping};
use crate::{Error, Result};

use std::collections::HashMap;

struct Verify<'a> {
    resource: &'a str,
    kind: MappingKind,
    set: &'a MappingSet,
}

impl MappingSet {
    pub(super) fn verify(&self, resource: &str, kind: MappingKind) -> Result<()> {
        Verify {
            resource,
            kind,
            set: self,
        }
        .verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        self.verify_one_main_table()?;
        self.verify_main_table_is_not_accumulate()?;
        self.verify_field_ownership_is_unique()?;

        for table in self.set.secondaries() {
            self.verify_dependent_hooks(table)?;
        }

        Ok(())
    }

    fn verify_one_main_table(&self) -> Result<()> {
        let main: Vec<_> = self
            .set
            .tables()
            .filter(|table| table.main)
            .map(|table| table.name.as_str())
            .collect();

        match main.len() {
            1 => Ok(()),
            0 => Err(self.error("no main table")),
            _ => Err(self.error(format!(
                "more than one main table ({})",
                main.join(", ")
            ))),
        }
    }

    fn verify_main_table_is_not_accumulate(&self) -> Result<()> {
        let main = self.set.main();
        if main.accumulate {
            return Err(self.error(format!(
                "main table `{}` cannot be accumulate",
                main.name
            )));
        }
        Ok(())
    }

    fn verify_field_ownership_is_unique(&self) -> Result<()> {
        let mut owners = HashMap::new();

        for table in self.set.tables() {
            for field in &table.fields {
                if let Some(first) = owners.insert(field.logical_name(), &table.name) {
                    return Err(self.error(format!(
                        "field `{}` is claimed by both `{first}` and `{}`",
                        field.logical_name(),
                        table.name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_dependent_hooks(&self, table: &TableMapping) -> Result<()> {
        let needs_foreign_key = match self.kind {
            MappingKind::Create => true,
            MappingKind::Edit => table.accumulate,
            MappingKind::List | MappingKind::Delete => false,
        };

        if needs_foreign_key && table.foreign_key.is_none() {
            return Err(self.error(format!(
                "table `{}` is written after the main table but has no foreign key",
                table.name
            )));
        }

        if self.kind == MappingKind::Delete && table.id.is_none() {
            return Err(self.error(format!(
                "table `{}` has no id hook to find the rows to delete",
                table.name
            )));
        }

        Ok(())
    }

    fn error(&self, message: impl core::fmt::Display) -> Error {
        Error::invalid_mapping(format!(
            "{} mapping of `{}`: {message}",
            self.kind, self.resource
        ))
    }
}
