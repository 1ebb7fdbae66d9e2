//! Table plugin
//!
//! [`Plugin`] is the host-facing surface: it owns the table registry and the
//! lazily created [`StripeClient`], and serves `list` and `get` for any
//! registered [`TableDef`].
//!
//! # Overview
//!
//! - `list` validates required key columns, translates quals into native
//!   filters, opens a lazy cursor and streams one [`Row`] per API object,
//!   stopping at the row limit
//! - When the API cannot express every qual, rows are checked against all of
//!   them and the limit counts matching rows only
//! - The first error ends a row stream
//! - `get` needs an `id = '...'` qual and returns `None` for missing objects
//! - Errors raised while streaming are logged and tagged with the table and
//!   the API parameters that produced them

mod hydrate;
mod types;

pub use hydrate::{AccountIdHydrate, Hydrate};
pub use types::{
    lookup, Column, ColumnSchema, ColumnSource, GetConfig, KeyColumnSchema, ListConfig,
    QualRequest, QueryContext, QueryRequest, Row, TableDef, TableSchema,
};

use crate::config::ConnectionConfig;
use crate::error::{Error, Result};
use crate::filter::{pushdown, Qual};
use crate::http::RequestConfig;
use crate::stripe::{ListParams, StripeClient};
use crate::types::JsonValue;
use futures::future;
use futures::stream::{self, BoxStream, Stream, StreamExt, TryStreamExt};
use once_cell::sync::OnceCell;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, error, info};

/// Stream of rows produced by [`Plugin::list`]
pub type RowStream = BoxStream<'static, Result<Row>>;

/// A set of tables over one Stripe connection
pub struct Plugin {
    config: ConnectionConfig,
    tables: BTreeMap<&'static str, Arc<TableDef>>,
    client: OnceCell<StripeClient>,
}

impl Plugin {
    /// Plugin with every Stripe table registered
    pub fn new(config: ConnectionConfig) -> Self {
        Self::with_tables(config, crate::tables::all())
    }

    /// Plugin with the given tables
    pub fn with_tables(config: ConnectionConfig, tables: Vec<TableDef>) -> Self {
        let tables = tables
            .into_iter()
            .map(|table| (table.name, Arc::new(table)))
            .collect();
        Self {
            config,
            tables,
            client: OnceCell::new(),
        }
    }

    /// Connection settings
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Registered tables, by name
    pub fn tables(&self) -> impl Iterator<Item = &TableDef> {
        self.tables.values().map(AsRef::as_ref)
    }

    /// Look up a table
    pub fn table(&self, name: &str) -> Result<Arc<TableDef>> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::table_not_found(name))
    }

    /// The shared client, created on first use
    ///
    /// A missing API key is reported here, before any request is made.
    pub fn connect(&self) -> Result<StripeClient> {
        self.client
            .get_or_try_init(|| StripeClient::new(&self.config))
            .cloned()
    }

    /// Verify the credentials by fetching the connected account
    pub async fn check(&self) -> Result<JsonValue> {
        let client = self.connect()?;
        let account = client.account().await?;
        info!(account = ?account.get("id"), "Connection check succeeded");
        Ok(account)
    }

    /// Stream the rows of a table matching the host quals
    ///
    /// Setup errors (unknown table, missing required key column, missing
    /// API key) are returned immediately. Nothing is requested until the
    /// stream is polled.
    pub fn list(&self, table: &str, ctx: QueryContext) -> Result<RowStream> {
        let def = self.table(table)?;
        def.check_required(&ctx.quals)?;
        let client = self.connect()?;

        let pushed = pushdown(&def.key_columns, &ctx.quals);
        let params = pushed.filters.to_string();
        debug!(
            table = def.name,
            %params,
            exact = pushed.exact,
            limit = ?ctx.limit,
            "Listing"
        );

        if ctx.limit == Some(0) {
            return Ok(stream::empty::<Result<Row>>().boxed());
        }

        // quals the API did not fully apply are checked per row
        let residual: Arc<[Qual]> = if pushed.exact {
            Arc::from(Vec::new())
        } else {
            ctx.quals
                .iter()
                .filter(|q| def.column(&q.column).is_some())
                .cloned()
                .collect()
        };
        let api_limit = if residual.is_empty() { ctx.limit } else { None };

        let items = match def.list {
            ListConfig::Paginated { path, expand } => {
                let list_params = ListParams::new()
                    .limit(api_limit)
                    .filters(pushed.filters)
                    .expand(expand.iter().copied());
                client.list(path, &list_params).into_stream().boxed()
            }
            ListConfig::Singleton { path } => {
                let client = client.clone();
                stream::once(async move {
                    client
                        .http()
                        .get_json::<JsonValue>(path, RequestConfig::new())
                        .await
                })
                .boxed()
            }
        };

        let wanted: Option<Arc<[String]>> = ctx.columns.map(Into::into);
        let built: Option<Arc<[String]>> = wanted.as_ref().map(|wanted| {
            let mut columns = wanted.to_vec();
            for qual in residual.iter() {
                if !columns.contains(&qual.column) {
                    columns.push(qual.column.clone());
                }
            }
            columns.into()
        });
        let name = def.name;
        let rows = items
            .and_then(move |item| {
                let def = Arc::clone(&def);
                let client = client.clone();
                let built = built.clone();
                async move { def.build_row(&client, &item, built.as_deref()).await }
            })
            .map_err(move |e| {
                error!(table = name, params = %params, error = %e, "List failed");
                Error::query(name, params.clone(), e)
            })
            .try_filter(move |row| {
                let keep = residual.iter().all(|q| q.matches(row.get(&q.column)));
                future::ready(keep)
            })
            .map_ok(move |mut row| {
                if let Some(wanted) = &wanted {
                    row.retain_columns(wanted);
                }
                row
            });

        let rows = stop_after_error(rows);
        match ctx.limit {
            Some(limit) => Ok(rows.take(usize::try_from(limit).unwrap_or(usize::MAX)).boxed()),
            None => Ok(rows.boxed()),
        }
    }

    /// Collect the rows of a table into memory
    pub async fn list_all(&self, table: &str, ctx: QueryContext) -> Result<Vec<Row>> {
        self.list(table, ctx)?.try_collect().await
    }

    /// Fetch one row by `id`
    ///
    /// Returns `Ok(None)` when the API reports the object missing.
    pub async fn get(&self, table: &str, ctx: QueryContext) -> Result<Option<Row>> {
        let def = self.table(table)?;
        let Some(get) = def.get else {
            return Err(Error::UnsupportedOperation {
                table: def.name.to_string(),
                operation: "get".to_string(),
            });
        };
        let id = ctx.equal("id").ok_or_else(|| Error::MissingKeyColumn {
            table: def.name.to_string(),
            column: "id".to_string(),
        })?;
        let client = self.connect()?;

        debug!(table = def.name, %id, "Getting");
        let item = match client.get(get.path, &id, get.expand).await {
            Ok(item) => item,
            Err(e) if e.is_not_found() => {
                debug!(table = def.name, %id, "Object not found");
                return Ok(None);
            }
            Err(e) => {
                let params = format!("id={id}");
                error!(table = def.name, %params, error = %e, "Get failed");
                return Err(Error::query(def.name, params, e));
            }
        };

        let row = def
            .build_row(&client, &item, ctx.columns.as_deref())
            .await
            .map_err(|e| Error::query(def.name, format!("id={id}"), e))?;
        Ok(Some(row))
    }
}

/// End a fallible stream after its first error
fn stop_after_error<T, S>(stream: S) -> impl Stream<Item = Result<T>>
where
    S: Stream<Item = Result<T>>,
{
    stream.scan(false, |failed, item| {
        if *failed {
            return future::ready(None);
        }
        *failed = item.is_err();
        future::ready(Some(item))
    })
}

impl std::fmt::Debug for Plugin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugin")
            .field("tables", &self.tables.keys().collect::<Vec<_>>())
            .field("connected", &self.client.get().is_some())
            .finish_non_exhaustive()
    }
}
