//! Raw dump of the record store, bypassing classification and passes.

use crate::store::RecordStore;
use anyhow::{Context, Result};
use std::io::Write;

/// Print every key followed by its fields, sorted by key and field name
pub fn dump_store<W: Write>(store: &mut dyn RecordStore, writer: &mut W) -> Result<usize> {
    store.ping().context("Record store is unreachable")?;

    let mut keys = store.list_keys().context("Failed to list keys")?;
    keys.sort();

    for key in &keys {
        let fields = store
            .get_fields(key)
            .with_context(|| format!("Failed to read fields of {:?}", key))?;
        let mut fields: Vec<_> = fields.into_iter().collect();
        fields.sort();

        writeln!(writer, "{}", key)?;
        for (name, value) in fields {
            writeln!(writer, "  {} = {}", name, value)?;
        }
    }

    writer.flush()?;
    Ok(keys.len())
}
