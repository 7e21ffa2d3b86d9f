use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<cdts_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;
    let mut added_fields = Vec::new();

    migrate_server_section(&mut doc, &mut added_fields)?;
    migrate_storage_section(&mut doc, &mut added_fields)?;

    // Only write if something changed
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;
        tracing::debug!("Config migrated: {}", added_fields.join(", "));

        if let Some(event_bus) = events {
            event_bus.emit(cdts_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    ensure_table(doc.as_table_mut(), "server", "server", added_fields);

    let server = doc["server"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [server] section in config"))?;
    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(8080), added_fields);
    ensure_field(
        server,
        "base_url",
        Value::from("http://localhost:8080"),
        added_fields,
    );
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(60), added_fields);
    ensure_field(
        server,
        "max_body_size_mb",
        Value::from(100),
        added_fields,
    );
    ensure_field(
        server,
        "max_concurrent_requests",
        Value::from(1000),
        added_fields,
    );

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("server.allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_storage_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    ensure_table(doc.as_table_mut(), "storage", "storage", added_fields);

    let storage = doc["storage"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [storage] section in config"))?;
    ensure_field(storage, "backend", Value::from("local"), added_fields);
    ensure_field(
        storage,
        "default_container",
        Value::from("uploads"),
        added_fields,
    );

    ensure_table(storage, "local", "storage.local", added_fields);
    let local = storage["local"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [storage.local] section in config"))?;
    ensure_field(local, "base_path", Value::from("storage"), added_fields);

    ensure_table(storage, "s3", "storage.s3", added_fields);
    let s3 = storage["s3"]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [storage.s3] section in config"))?;
    ensure_field(s3, "enabled", Value::from(false), added_fields);
    ensure_field(s3, "endpoint_url", Value::from(""), added_fields);
    ensure_field(s3, "region", Value::from("auto"), added_fields);
    ensure_field(s3, "access_key_id", Value::from(""), added_fields);
    ensure_field(s3, "secret_access_key", Value::from(""), added_fields);
    ensure_field(s3, "public_url", Value::from(""), added_fields);
    ensure_field(s3, "bucket_prefix", Value::from(""), added_fields);

    Ok(())
}

fn ensure_table(parent: &mut Table, key: &str, label: &str, added_fields: &mut Vec<String>) {
    if !parent.contains_key(key) {
        let mut table = Table::new();
        table.set_implicit(true);
        parent.insert(key, Item::Table(table));
        added_fields.push(label.to_string());
    }
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}
