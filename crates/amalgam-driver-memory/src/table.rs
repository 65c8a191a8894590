use amalgam_core::{
    driver::operation::{Pagination, Sort, SortOrder},
    record::{self, ID},
    Error, JoinKey, Record, Result,
};

use serde_json::Value;
use std::cmp::Ordering;

#[derive(Debug, Default)]
pub(crate) struct Table {
    rows: Vec<Record>,

    /// Identifier handed to the next row created without one
    next_id: u64,
}

impl Table {
    pub(crate) fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub(crate) fn find(&self, id: &Value) -> Option<&Record> {
        let key = JoinKey::from_value(id)?;
        self.rows.iter().find(|row| row_key(row).as_ref() == Some(&key))
    }

    pub(crate) fn get(&self, table: &str, id: &Value) -> Result<&Record> {
        self.find(id)
            .ok_or_else(|| not_found(table, id))
    }

    /// Returns one page of the rows matching `filter`, along with the number
    /// of matching rows across all pages.
    pub(crate) fn list(
        &self,
        filter: &Record,
        sort: &Sort,
        pagination: Pagination,
    ) -> (Vec<Record>, u64) {
        let mut rows: Vec<&Record> = self
            .rows
            .iter()
            .filter(|row| matches(row, filter))
            .collect();

        rows.sort_by(|a, b| {
            let ordering = compare(record::field(a, &sort.field), record::field(b, &sort.field));
            match sort.order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = rows.len() as u64;
        let offset = pagination.page.saturating_sub(1).saturating_mul(pagination.per_page);
        let page = rows
            .into_iter()
            .skip(offset as usize)
            .take(pagination.per_page as usize)
            .cloned()
            .collect();

        (page, total)
    }

    pub(crate) fn create(&mut self, mut row: Record) -> Record {
        match row.get(ID).and_then(Value::as_u64) {
            Some(id) => self.next_id = self.next_id.max(id),
            None if record::field(&row, ID).is_null() => {
                self.next_id += 1;
                row.insert(ID.to_string(), Value::from(self.next_id));
            }
            None => {}
        }

        self.rows.push(row.clone());
        row
    }

    /// Merges `data` into the row, keeping its identifier.
    pub(crate) fn update(&mut self, table: &str, id: &Value, data: Record) -> Result<Record> {
        let row = self.find_mut(id).ok_or_else(|| not_found(table, id))?;
        for (name, value) in data {
            if name != ID {
                row.insert(name, value);
            }
        }
        Ok(row.clone())
    }

    pub(crate) fn delete(&mut self, table: &str, id: &Value) -> Result<Record> {
        let key = JoinKey::from_value(id);
        let index = self
            .rows
            .iter()
            .position(|row| key.is_some() && row_key(row) == key)
            .ok_or_else(|| not_found(table, id))?;
        Ok(self.rows.remove(index))
    }

    fn find_mut(&mut self, id: &Value) -> Option<&mut Record> {
        let key = JoinKey::from_value(id)?;
        self.rows
            .iter_mut()
            .find(|row| row_key(row).as_ref() == Some(&key))
    }
}

fn row_key(row: &Record) -> Option<JoinKey> {
    JoinKey::from_value(record::field(row, ID))
}

fn not_found(table: &str, id: &Value) -> Error {
    Error::record_not_found(format!("table={table} id={id}"))
}

/// Every filter entry must match. An array matches any of its elements.
fn matches(row: &Record, filter: &Record) -> bool {
    filter.iter().all(|(name, expected)| {
        let actual = record::field(row, name);
        match expected {
            Value::Array(candidates) => candidates.iter().any(|candidate| same(actual, candidate)),
            expected => same(actual, expected),
        }
    })
}

fn same(a: &Value, b: &Value) -> bool {
    JoinKey::from_value(a) == JoinKey::from_value(b)
}

/// Orders `null` first, then numbers, then everything else by its text.
fn compare(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(a), Value::Number(b)) => {
            let a = a.as_f64().unwrap_or_default();
            let b = b.as_f64().unwrap_or_default();
            a.total_cmp(&b)
        }
        (Value::Number(_), _) => Ordering::Less,
        (_, Value::Number(_)) => Ordering::Greater,
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (a, b) => a.to_string().cmp(&b.to_string()),
    }
}
