//! kinobot CLI - operator tooling for the kinobot store
//!
//! Every store operation is reachable as a subcommand: schema init,
//! user bookkeeping, content-code CRUD, usage counters, admin set
//! management, and channel-requirement lists.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use kinobot_store::{
    config, create_pool_from, AdminRepo, ChannelKind, ChannelRepo, CodeRepo, KinoCode, PgPool,
    StatField, StatRepo, UserRepo,
};

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "kinobot",
    author,
    version,
    about = "Operator CLI for the kinobot content-lookup store"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Emit records as JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Create tables and seed default admins (safe to re-run)
    Init,

    /// User bookkeeping
    #[command(subcommand)]
    User(UserCmd),

    /// Content codes
    #[command(subcommand)]
    Code(CodeCmd),

    /// Per-code usage counters
    #[command(subcommand)]
    Stat(StatCmd),

    /// Admin set
    #[command(subcommand)]
    Admin(AdminCmd),

    /// Channel-membership requirements
    #[command(subcommand)]
    Channel(ChannelCmd),
}

#[derive(Subcommand, Debug)]
enum UserCmd {
    /// Record a user id (idempotent)
    Add { user_id: i64 },
    /// Count known users
    Count,
    /// List all user ids
    List,
}

#[derive(Subcommand, Debug)]
enum CodeCmd {
    /// Insert or update a content record by code
    Add {
        code: String,
        #[arg(long)]
        channel: Option<String>,
        #[arg(long)]
        message_id: Option<i32>,
        #[arg(long)]
        post_count: Option<i32>,
        #[arg(long)]
        title: Option<String>,
    },
    /// Fetch one record
    Get { code: String },
    /// List all records
    List,
    /// Delete a record and its counters
    Delete { code: String },
    /// Change a record's code and title
    Rename {
        old_code: String,
        new_code: String,
        new_title: String,
    },
}

#[derive(Subcommand, Debug)]
enum StatCmd {
    /// Show counters for a code
    Show { code: String },
    /// Bump one counter by 1 (no-op for unknown codes)
    Bump { code: String, field: StatFieldArg },
    /// Create a zero-count row (idempotent)
    Ensure { code: String },
}

#[derive(Subcommand, Debug)]
enum AdminCmd {
    /// Grant admin rights (idempotent)
    Add { user_id: i64 },
    /// Revoke admin rights (no-op when absent)
    Remove { user_id: i64 },
    /// List the admin set
    List,
}

#[derive(Subcommand, Debug)]
enum ChannelCmd {
    /// Register a channel link
    Add { link: String, kind: ChannelKindArg },
    /// Remove a link+kind pair
    Remove { link: String, kind: ChannelKindArg },
    /// List links of one kind
    List { kind: ChannelKindArg },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StatFieldArg {
    Searched,
    Viewed,
}

impl From<StatFieldArg> for StatField {
    fn from(arg: StatFieldArg) -> Self {
        match arg {
            StatFieldArg::Searched => StatField::Searched,
            StatFieldArg::Viewed => StatField::Viewed,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ChannelKindArg {
    Mandatory,
    Main,
}

impl From<ChannelKindArg> for ChannelKind {
    fn from(arg: ChannelKindArg) -> Self {
        match arg {
            ChannelKindArg::Mandatory => ChannelKind::Mandatory,
            ChannelKindArg::Main => ChannelKind::Main,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    config::load_dotenv();
    tracing_setup::init_tracing(cli.debug)?;

    let options = config::connect_options().context("could not resolve database configuration")?;
    let pool = create_pool_from(options)
        .await
        .context("could not connect to PostgreSQL")?;

    run(&cli, &pool).await
}

async fn run(cli: &Cli, pool: &PgPool) -> Result<()> {
    match &cli.command {
        Commands::Init => {
            kinobot_store::init(pool).await?;
            println!("schema initialized");
        }

        Commands::User(cmd) => {
            let repo = UserRepo::new(pool);
            match cmd {
                UserCmd::Add { user_id } => {
                    repo.add(*user_id).await?;
                    info!(user_id, "user recorded");
                }
                UserCmd::Count => println!("{}", repo.count().await?),
                UserCmd::List => {
                    for id in repo.all_ids().await? {
                        println!("{id}");
                    }
                }
            }
        }

        Commands::Code(cmd) => {
            let repo = CodeRepo::new(pool);
            match cmd {
                CodeCmd::Add {
                    code,
                    channel,
                    message_id,
                    post_count,
                    title,
                } => {
                    repo.upsert(&KinoCode {
                        code: code.clone(),
                        channel: channel.clone(),
                        message_id: *message_id,
                        post_count: *post_count,
                        title: title.clone(),
                    })
                    .await?;
                    println!("upserted '{code}'");
                }
                CodeCmd::Get { code } => match repo.get(code).await? {
                    Some(record) => print_record(&record, cli.json)?,
                    None => anyhow::bail!("no such code: '{code}'"),
                },
                CodeCmd::List => {
                    let records = repo.list().await?;
                    if cli.json {
                        println!("{}", serde_json::to_string_pretty(&records)?);
                    } else {
                        for record in &records {
                            print_record(record, false)?;
                        }
                    }
                }
                CodeCmd::Delete { code } => {
                    if repo.delete(code).await? {
                        println!("deleted '{code}'");
                    } else {
                        println!("no such code: '{code}'");
                    }
                }
                CodeCmd::Rename {
                    old_code,
                    new_code,
                    new_title,
                } => {
                    repo.rename(old_code, new_code, new_title).await?;
                    println!("renamed '{old_code}' -> '{new_code}'");
                }
            }
        }

        Commands::Stat(cmd) => {
            let repo = StatRepo::new(pool);
            match cmd {
                StatCmd::Show { code } => match repo.get(code).await? {
                    Some(stat) if cli.json => println!("{}", serde_json::to_string(&stat)?),
                    Some(stat) => {
                        println!("searched: {}  viewed: {}", stat.searched, stat.viewed)
                    }
                    None => anyhow::bail!("no counters for code: '{code}'"),
                },
                StatCmd::Bump { code, field } => {
                    repo.increment(code, (*field).into()).await?;
                }
                StatCmd::Ensure { code } => repo.ensure(code).await?,
            }
        }

        Commands::Admin(cmd) => {
            let repo = AdminRepo::new(pool);
            match cmd {
                AdminCmd::Add { user_id } => {
                    repo.add(*user_id).await?;
                    println!("admin added: {user_id}");
                }
                AdminCmd::Remove { user_id } => {
                    repo.remove(*user_id).await?;
                    println!("admin removed: {user_id}");
                }
                AdminCmd::List => {
                    let mut admins: Vec<_> = repo.all().await?.into_iter().collect();
                    admins.sort_unstable();
                    for id in admins {
                        println!("{id}");
                    }
                }
            }
        }

        Commands::Channel(cmd) => {
            let repo = ChannelRepo::new(pool);
            match cmd {
                ChannelCmd::Add { link, kind } => {
                    repo.add(link, (*kind).into()).await?;
                    println!("channel added: {link}");
                }
                ChannelCmd::Remove { link, kind } => {
                    repo.remove(link, (*kind).into()).await?;
                    println!("channel removed: {link}");
                }
                ChannelCmd::List { kind } => {
                    for link in repo.links((*kind).into()).await? {
                        println!("{link}");
                    }
                }
            }
        }
    }

    Ok(())
}

fn print_record(record: &KinoCode, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(record)?);
    } else {
        println!(
            "{}\t{}\tmsg={}\tposts={}\t{}",
            record.code,
            record.channel.as_deref().unwrap_or("-"),
            record.message_id.map_or("-".to_string(), |v| v.to_string()),
            record.post_count.map_or("-".to_string(), |v| v.to_string()),
            record.title.as_deref().unwrap_or("-"),
        );
    }
    Ok(())
}
