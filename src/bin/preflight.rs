use bookshelf::domain::ListFilter;
use bookshelf::storage::{BookRepository, PgBookRepository};
use bookshelf::AppConfig;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight -- [--seed]\n\
         \n\
         Requires env vars:\n\
           DATABASE_URL\n\
         Optional:\n\
           DATABASE_SSLMODE (default: require), SECRET_KEY\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }
    let seed = args.iter().any(|a| a == "--seed");

    let config = AppConfig::from_env();
    println!("> Preflight:");
    println!("  DATABASE_URL configured: {}", config.database_url_configured());
    println!("  SECRET_KEY configured:   {}", !config.secret_generated());
    println!("  BIND_ADDR:               {}", config.bind_addr);
    println!("  STATIC_DIR:              {}", config.static_dir);

    if !std::path::Path::new(&config.static_dir).is_dir() {
        eprintln!("  Warning: static directory '{}' does not exist.", config.static_dir);
    }
    if config.secret_generated() {
        eprintln!("  Warning: SECRET_KEY is not set; flash notices will not survive restarts.");
    }

    let repo = PgBookRepository::connect_lazy(&config)
        .map_err(|e| anyhow::anyhow!("Cannot build connection pool: {}", e))?;

    repo.ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database is not reachable: {}", e))?;
    println!("  Database reachable.");

    repo.ensure_schema()
        .await
        .map_err(|e| anyhow::anyhow!("Schema initialization failed: {}", e))?;
    println!("  Table `books` present.");

    if seed {
        let inserted = repo.seed_if_empty().await?;
        println!("  Seeded {} books.", inserted);
    }

    let total = repo.count(&ListFilter::default()).await?;
    println!("  Books in collection: {}", total);

    println!("> Preflight OK.");
    Ok(())
}
