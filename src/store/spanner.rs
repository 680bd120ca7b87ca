use anyhow::{Context, Result};
use gcloud_gax::grpc::Code;
use gcloud_googleapis::spanner::admin::database::v1::{
    CreateDatabaseRequest, GetDatabaseDdlRequest, GetDatabaseRequest, UpdateDatabaseDdlRequest,
};
use gcloud_googleapis::spanner::admin::instance::v1::{
    CreateInstanceRequest, GetInstanceRequest, Instance,
};
use gcloud_spanner::admin::client::Client as AdminClient;
use gcloud_spanner::admin::AdminClientConfig;
use gcloud_spanner::client::{Client, ClientConfig};
use gcloud_spanner::mutation::insert_or_update;
use gcloud_spanner::statement::Statement;
use gcloud_spanner::value::CommitTimestamp;
use std::fmt;
use std::sync::Arc;

use super::{KvStore, StoreFuture};
use crate::config::SpannerConfig;

/// Table holding one row per record
const TABLE: &str = "records";

/// Shareable Spanner-backed key-value store
#[derive(Clone)]
pub struct SpannerStore {
    inner: Arc<Client>,
}

impl SpannerStore {
    /// Connect to the configured Spanner database.
    ///
    /// The gcloud-spanner library picks up `SPANNER_EMULATOR_HOST` on its own and
    /// talks to the emulator when it is set, or production Spanner otherwise.
    ///
    /// The `records` table is created if it is missing. A missing instance or
    /// database is created only on the emulator; in production it is an error.
    pub async fn from_config(config: &SpannerConfig) -> Result<Self> {
        auto_provision(config).await?;

        let database_path = config.database_path();

        match &config.emulator_host {
            Some(host) => tracing::info!("Connecting to Spanner emulator at: {}", host),
            None => tracing::info!("Connecting to production Spanner"),
        }

        // ClientConfig::default() automatically uses SPANNER_EMULATOR_HOST if set
        let client = Client::new(&database_path, ClientConfig::default())
            .await
            .context("Failed to create Spanner client")?;

        tracing::info!(
            "Successfully connected to Spanner database: {}",
            database_path
        );

        Ok(Self {
            inner: Arc::new(client),
        })
    }

    /// Insert or replace the text stored under `key`.
    ///
    /// Both `created_at` and `updated_at` take the commit timestamp, so a
    /// rewrite resets `created_at` as well.
    pub async fn upsert(&self, key: &str, value: &str) -> Result<()> {
        let key_str = key.to_string();
        let value_str = value.to_string();

        let mutation = insert_or_update(
            TABLE,
            &["id", "data", "created_at", "updated_at"],
            &[&key_str, &value_str, &CommitTimestamp::new(), &CommitTimestamp::new()],
        );

        self.inner
            .apply(vec![mutation])
            .await
            .context("Failed to upsert record to Spanner")?;

        tracing::debug!("Upserted record with key: {:?}", key);
        Ok(())
    }

    /// Read the text stored under `key`.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - Record found
    /// * `Ok(None)` - No record under this key
    /// * `Err(_)` - Spanner operation failed
    pub async fn read(&self, key: &str) -> Result<Option<String>> {
        let key_str = key.to_string();

        let mut statement = Statement::new(format!("SELECT data FROM {} WHERE id = @id", TABLE));
        statement.add_param("id", &key_str);

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create read transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to query record from Spanner")?;

        if let Some(row) = result_set.next().await? {
            let data: String = row.column_by_name("data")?;
            tracing::debug!("Read record with key: {:?}", key);
            Ok(Some(data))
        } else {
            tracing::debug!("Record not found with key: {:?}", key);
            Ok(None)
        }
    }

    /// Run `SELECT 1` to check the database answers.
    pub async fn ping(&self) -> Result<()> {
        let statement = Statement::new("SELECT 1");

        let mut tx = self.inner
            .single()
            .await
            .context("Failed to create ping transaction")?;

        let mut result_set = tx
            .query(statement)
            .await
            .context("Failed to execute ping query")?;

        if result_set.next().await?.is_some() {
            tracing::debug!("Spanner ping succeeded");
            Ok(())
        } else {
            Err(anyhow::anyhow!("Ping query returned no results"))
        }
    }
}

impl KvStore for SpannerStore {
    fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
        Box::pin(self.read(key))
    }

    fn put<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
        Box::pin(async move { self.upsert(key, &value).await })
    }
}

/// Admin resource that has to exist before the data client can connect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Resource {
    Instance,
    Database,
}

impl Resource {
    fn path(self, config: &SpannerConfig) -> String {
        match self {
            Resource::Instance => format!("projects/{}/instances/{}", config.project, config.instance),
            Resource::Database => config.database_path(),
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Instance => f.write_str("instance"),
            Resource::Database => f.write_str("database"),
        }
    }
}

/// Missing instances and databases are only created on the emulator.
fn check_may_create(config: &SpannerConfig, resource: Resource) -> Result<()> {
    if config.emulator_host.is_some() {
        return Ok(());
    }
    Err(anyhow::anyhow!(
        "Spanner {} {} does not exist; create it before starting moniker-kv",
        resource,
        resource.path(config)
    ))
}

/// Make sure the instance, database and `records` table are in place.
async fn auto_provision(config: &SpannerConfig) -> Result<()> {
    tracing::info!("Checking Spanner resources...");

    let admin_client = AdminClient::new(AdminClientConfig::default())
        .await
        .context("Failed to create Spanner admin client")?;

    for resource in [Resource::Instance, Resource::Database] {
        ensure_resource(&admin_client, config, resource).await?;
    }
    ensure_table(&admin_client, config).await?;

    tracing::info!("Spanner resources ready");
    Ok(())
}

async fn ensure_resource(
    admin_client: &AdminClient,
    config: &SpannerConfig,
    resource: Resource,
) -> Result<()> {
    let path = resource.path(config);

    let lookup = match resource {
        Resource::Instance => admin_client
            .instance()
            .get_instance(GetInstanceRequest { name: path.clone(), field_mask: None }, None)
            .await
            .map(|_| ()),
        Resource::Database => admin_client
            .database()
            .get_database(GetDatabaseRequest { name: path.clone() }, None)
            .await
            .map(|_| ()),
    };

    match lookup {
        Ok(()) => {
            tracing::info!("Spanner {} found: {}", resource, path);
            return Ok(());
        }
        Err(status) if status.code() == Code::NotFound => {}
        Err(status) => {
            return Err(anyhow::anyhow!(
                "Failed to look up Spanner {} {}: {}",
                resource,
                path,
                status.message()
            ));
        }
    }

    check_may_create(config, resource)?;
    tracing::info!("Creating Spanner {} on the emulator: {}", resource, path);

    match resource {
        Resource::Instance => {
            let request = CreateInstanceRequest {
                parent: format!("projects/{}", config.project),
                instance_id: config.instance.clone(),
                instance: Some(Instance {
                    name: path.clone(),
                    config: format!("projects/{}/instanceConfigs/emulator-config", config.project),
                    display_name: config.instance.clone(),
                    node_count: 1,
                    ..Default::default()
                }),
            };
            let mut operation = admin_client
                .instance()
                .create_instance(request, None)
                .await
                .with_context(|| format!("Failed to start creating {}", path))?;
            operation
                .wait(None)
                .await
                .with_context(|| format!("Failed to create {}", path))?;
        }
        Resource::Database => {
            let request = CreateDatabaseRequest {
                parent: Resource::Instance.path(config),
                create_statement: format!("CREATE DATABASE `{}`", config.database),
                extra_statements: vec![],
                encryption_config: None,
                database_dialect: 1, // Google Standard SQL
                proto_descriptors: vec![],
            };
            let mut operation = admin_client
                .database()
                .create_database(request, None)
                .await
                .with_context(|| format!("Failed to start creating {}", path))?;
            operation
                .wait(None)
                .await
                .with_context(|| format!("Failed to create {}", path))?;
        }
    }

    Ok(())
}

fn table_ddl() -> String {
    // data is opaque text: string values are stored unquoted
    format!(
        r#"
CREATE TABLE {} (
    id STRING(MAX) NOT NULL,
    data STRING(MAX) NOT NULL,
    created_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
    updated_at TIMESTAMP NOT NULL OPTIONS (allow_commit_timestamp=true),
) PRIMARY KEY (id)
"#,
        TABLE
    )
    .trim()
    .to_string()
}

fn ddl_creates_table(statement: &str) -> bool {
    statement.contains(&format!("CREATE TABLE {} ", TABLE))
        || statement.contains(&format!("CREATE TABLE `{}`", TABLE))
}

/// The table is created in production too; only DDL rights on an existing database are needed.
async fn ensure_table(admin_client: &AdminClient, config: &SpannerConfig) -> Result<()> {
    let database = config.database_path();

    let statements = admin_client
        .database()
        .get_database_ddl(GetDatabaseDdlRequest { database: database.clone() }, None)
        .await
        .context("Failed to read database DDL")?
        .into_inner()
        .statements;

    if statements.iter().any(|stmt| ddl_creates_table(stmt)) {
        tracing::info!("Table '{}' found", TABLE);
        return Ok(());
    }

    tracing::info!("Creating table '{}'", TABLE);
    let request = UpdateDatabaseDdlRequest {
        database,
        statements: vec![table_ddl()],
        operation_id: String::new(),
        proto_descriptors: vec![],
        throughput_mode: false,
    };

    let mut operation = admin_client
        .database()
        .update_database_ddl(request, None)
        .await
        .context("Failed to start table creation")?;
    operation
        .wait(None)
        .await
        .context("Failed to create table")?;

    Ok(())
}
