//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ConnectionConfig;
use crate::error::{Error, Result, ResultExt};
use crate::filter::Qual;
use crate::output::{table_schema, ParquetWriter, ParquetWriterConfig};
use crate::plugin::{Plugin, QueryContext, QueryRequest};
use futures::TryStreamExt;
use serde::Serialize;
use serde_json::json;
use std::path::Path;
use std::time::Instant;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Tables => self.tables(),
            Commands::Describe { table } => self.describe(table),
            Commands::Check => self.check().await,
            Commands::Query {
                table,
                filters,
                limit,
                columns,
                output,
            } => {
                let request = QueryRequest {
                    filters: filters.clone(),
                    limit: *limit,
                    columns: columns.clone(),
                    ..QueryRequest::default()
                };
                self.query(table, request, output.as_deref()).await
            }
            Commands::Get { table, id, columns } => self.get(table, id, columns.clone()).await,
            Commands::Serve { port } => {
                let plugin = self.plugin()?;
                crate::cli::serve(plugin, *port).await
            }
        }
    }

    /// Connection settings from the config file and flags
    ///
    /// Flags override the file; the API key still falls back to
    /// `STRIPE_API_KEY` when neither sets it.
    pub fn load_config(&self) -> Result<ConnectionConfig> {
        let mut config = match &self.cli.config {
            Some(path) => ConnectionConfig::from_file(path)
                .with_context(|| format!("Failed to load {}", path.display()))?,
            None => ConnectionConfig::default(),
        };
        if let Some(key) = &self.cli.api_key {
            config.api_key = Some(key.clone());
        }
        if let Some(url) = &self.cli.base_url {
            config.base_url.clone_from(url);
        }
        config.validate()?;
        Ok(config)
    }

    fn plugin(&self) -> Result<Plugin> {
        Ok(Plugin::new(self.load_config()?))
    }

    /// List table names and descriptions
    fn tables(&self) -> Result<()> {
        let plugin = Plugin::new(ConnectionConfig::default());
        let tables: Vec<_> = plugin
            .tables()
            .map(|t| json!({"name": t.name, "description": t.description}))
            .collect();
        self.output(&json!({ "tables": tables }))
    }

    /// Print a table's schema
    fn describe(&self, table: &str) -> Result<()> {
        let plugin = Plugin::new(ConnectionConfig::default());
        let def = plugin.table(table)?;
        self.output(&def.schema())
    }

    async fn check(&self) -> Result<()> {
        let plugin = self.plugin()?;
        match plugin.check().await {
            Ok(account) => self.output(&json!({
                "status": "SUCCEEDED",
                "account_id": account.get("id"),
            })),
            Err(e) => {
                self.output(&json!({
                    "status": "FAILED",
                    "message": e.to_string(),
                }))?;
                Err(e)
            }
        }
    }

    async fn query(&self, table: &str, request: QueryRequest, output: Option<&Path>) -> Result<()> {
        let plugin = self.plugin()?;
        let def = plugin.table(table)?;
        let ctx = request.into_context(&def)?;
        let start = Instant::now();

        if self.cli.format == OutputFormat::Parquet {
            let path = output
                .ok_or_else(|| Error::config("Parquet format requires --output"))?
                .to_path_buf();
            let rows = write_parquet(&plugin, table, ctx, &path).await?;
            info!(table, rows, path = %path.display(), "Wrote Parquet file");
            return self.output(&json!({
                "table": table,
                "rows": rows,
                "output_file": path,
                "duration_ms": start.elapsed().as_millis() as u64,
            }));
        }

        let mut rows = plugin.list(table, ctx)?;
        let mut count = 0usize;
        while let Some(row) = rows.try_next().await? {
            self.output(&row)?;
            count += 1;
        }
        info!(
            table,
            rows = count,
            duration_ms = start.elapsed().as_millis() as u64,
            "Query finished"
        );
        Ok(())
    }

    async fn get(&self, table: &str, id: &str, columns: Option<Vec<String>>) -> Result<()> {
        let plugin = self.plugin()?;
        let ctx = QueryContext {
            quals: vec![Qual::eq_str("id", id)],
            limit: None,
            columns,
        };
        match plugin.get(table, ctx).await? {
            Some(row) => self.output(&row),
            None => Err(Error::Other(format!("{table} '{id}' not found"))),
        }
    }

    /// Print a value in the selected format
    fn output<T: Serialize>(&self, value: &T) -> Result<()> {
        let text = match self.cli.format {
            OutputFormat::Json | OutputFormat::Parquet => serde_json::to_string(value)?,
            OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
        };
        println!("{text}");
        Ok(())
    }
}

/// Stream a table query into a Parquet file, returning the row count
pub async fn write_parquet(
    plugin: &Plugin,
    table: &str,
    ctx: QueryContext,
    path: &Path,
) -> Result<usize> {
    let def = plugin.table(table)?;
    let schema = table_schema(&def, ctx.columns.as_deref());
    let mut writer = ParquetWriter::new(path, schema, &ParquetWriterConfig::default())?;

    let mut rows = plugin.list(table, ctx)?;
    while let Some(row) = rows.try_next().await? {
        writer.push(row)?;
    }
    writer.close()
}
