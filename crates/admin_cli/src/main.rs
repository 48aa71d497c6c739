use std::error::Error;

use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use engine::{Engine, MonthRange};
use migration::MigratorTrait;
use sea_orm::{Database, DatabaseConnection};

#[derive(Parser, Debug)]
#[command(name = "tally_admin")]
#[command(about = "Admin utilities for Tally (reset data, inspect months)")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite:./tally.db?mode=rwc")]
    database_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Drop all data, recreate the schema and insert the example dataset.
    InitDb(InitDbArgs),
    /// List categories by name.
    Categories,
    /// Print the summary of a month (defaults to the current one).
    Summary(PeriodArgs),
    /// List every expense, newest first.
    Expenses,
}

#[derive(Args, Debug)]
struct InitDbArgs {
    /// Required: this deletes every expense and category.
    #[arg(long)]
    yes: bool,
}

#[derive(Args, Debug)]
struct PeriodArgs {
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    month: Option<u32>,
}

async fn connect_db(
    database_url: &str,
) -> Result<DatabaseConnection, Box<dyn Error + Send + Sync>> {
    let db = Database::connect(database_url).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    let cli = Cli::parse();

    let db = connect_db(&cli.database_url).await?;
    let engine = Engine::builder().database(db.clone()).build().await?;

    match cli.command {
        Command::InitDb(args) => {
            if !args.yes {
                eprintln!("refusing to reset the database without --yes");
                std::process::exit(2);
            }
            migration::Migrator::refresh(&db).await?;
            engine.seed_example_data(engine::today()).await?;
            println!("database initialized with example data");
        }
        Command::Categories => {
            for category in engine.list_categories().await? {
                println!("{:>4}  {}", category.id, category.name);
            }
        }
        Command::Summary(args) => {
            let today = engine::today();
            let year = args.year.unwrap_or_else(|| today.year());
            let month = args.month.unwrap_or_else(|| today.month());
            let range = MonthRange::new(year, month)?;
            let summary = engine.monthly_summary(year, month).await?;

            println!("{}", range.label());
            println!("  total spent:   {}", summary.total_spent);
            println!(
                "  top category:  {} ({})",
                summary.top_category, summary.top_category_amount
            );
            println!("  transactions:  {}", summary.transactions_count);
            for (category, amount) in &summary.per_category {
                println!("    {category:<24} {:>12}", amount.to_string());
            }
        }
        Command::Expenses => {
            for expense in engine.list_expenses().await? {
                println!(
                    "{:>4}  {}  {:>12}  {:<20}  {}",
                    expense.id,
                    expense.date,
                    expense.amount.to_string(),
                    expense.category_name,
                    expense.description.as_deref().unwrap_or("")
                );
            }
        }
    }

    Ok(())
}
