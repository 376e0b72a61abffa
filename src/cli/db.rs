use tokio::process::Command;
use tracing::info;

use crate::{
    core::catalog::{seed_default_grants, seed_permission_catalog},
    settings::Config,
    store::HrStore,
};

async fn sqlx_migrate(args: &[&str]) -> anyhow::Result<()> {
    let status = Command::new("sqlx").arg("migrate").args(args).status().await?;
    if !status.success() {
        anyhow::bail!("sqlx migrate {} exited with {}", args.join(" "), status);
    }
    Ok(())
}

pub async fn db_generate(migration_name: &str) -> anyhow::Result<()> {
    sqlx_migrate(&["add", migration_name, "-r"]).await
}

pub async fn db_list(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["info", "-D", config.database_url()?]).await
}

pub async fn db_migrate(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["run", "-D", config.database_url()?]).await
}

pub async fn db_revert(config: &Config) -> anyhow::Result<()> {
    sqlx_migrate(&["revert", "-D", config.database_url()?]).await
}

/// Seeds the permission catalog, plus the stock role grants when asked.
/// Returns how many catalog entries and grants were created.
pub async fn db_seed(store: &dyn HrStore, default_grants: bool) -> anyhow::Result<(u32, u32)> {
    let permissions = seed_permission_catalog(store).await?;
    let grants = if default_grants {
        seed_default_grants(store).await?
    } else {
        0
    };
    info!(
        "seeded {} permissions and {} role grants",
        permissions, grants
    );
    Ok((permissions, grants))
}
