use clap::{Args, Parser, Subcommand};
use hr_core::{
    cli::{
        auth,
        db::{db_generate, db_list, db_migrate, db_revert, db_seed},
    },
    core::db::init_store,
    model::role::Role,
    settings::get_config,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Database related command
    Db(DbArgs),
    /// Authentication related command
    Auth(AuthArgs),
}

#[derive(Debug, Args)]
struct AuthArgs {
    #[command(subcommand)]
    command: AuthCommands,
}

#[derive(Debug, Subcommand)]
enum AuthCommands {
    /// Create new user
    CreateUser {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// admin, manager, hr or employee
        #[arg(short, long, default_value = "employee")]
        role: Role,
        /// Employee record the user acts as
        #[arg(short, long)]
        employee_id: Option<Uuid>,
    },
}

#[derive(Debug, Args)]
struct DbArgs {
    #[command(subcommand)]
    command: DbCommands,
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Generate new migration file
    Generate { migration_name: String },
    /// List all migration
    List,
    /// Run all pending migration
    Migrate,
    /// Revert latest migration
    Revert,
    /// Seed the permission catalog
    Seed {
        /// Also grant the stock permissions to manager, hr and employee
        #[arg(long)]
        default_grants: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Db(db_args) => match &db_args.command {
            DbCommands::Generate { migration_name } => {
                println!("generate migration: {migration_name:?}");
                db_generate(migration_name).await?;
            }
            DbCommands::List => {
                println!("list migration");
                let config = get_config()?;
                db_list(&config).await?;
            }
            DbCommands::Migrate => {
                println!("run all pending migration");
                let config = get_config()?;
                db_migrate(&config).await?;
            }
            DbCommands::Revert => {
                println!("revert latest migration");
                let config = get_config()?;
                db_revert(&config).await?;
            }
            DbCommands::Seed { default_grants } => {
                let config = get_config()?;
                let store = init_store(&config).await?;
                let (permissions, grants) = db_seed(store.as_ref(), *default_grants).await?;
                println!("seeded {permissions} permissions and {grants} role grants");
            }
        },
        Commands::Auth(auth_args) => match &auth_args.command {
            AuthCommands::CreateUser {
                username,
                password,
                role,
                employee_id,
            } => {
                println!("create user: {username:?}");
                let config = get_config()?;
                let store = init_store(&config).await?;
                let user =
                    auth::create_user(store.as_ref(), username, password, *role, *employee_id)
                        .await?;
                println!("created user {} with role {}", user.id, user.role);
            }
        },
    }
    Ok(())
}
