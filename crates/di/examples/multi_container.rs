use anyhow::Result;
use di::{inject, provide, Container};

/// Resolution across several containers, searched in caller order.

#[derive(Debug, Clone)]
struct Database {
    dsn: String,
}

#[derive(Debug, Clone)]
struct Cache {
    host: String,
    port: u16,
}

#[derive(Debug, Clone)]
struct Config {
    app_name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Multi-Container Demo ===\n");

    let db_container = Container::new();
    let cache_container = Container::new();
    let config_container = Container::new();

    db_container.add([provide(Database {
        dsn: "mysql://localhost:3306/mydb".into(),
    })])?;
    cache_container.add([provide(Cache {
        host: "redis://localhost".into(),
        port: 6379,
    })])?;
    config_container.add([provide(Config {
        app_name: "multi-container-demo".into(),
    })])?;

    println!("1. Resolving from a single container...");
    let db: Database = db_container.inject()?;
    println!("   Database: {}", db.dsn);

    println!("\n2. Resolving across two containers...");
    let cache: Cache = inject(&[&db_container, &cache_container])?;
    println!("   Cache: {}:{}", cache.host, cache.port);

    println!("\n3. Resolving across three containers...");
    let cfg: Config = inject(&[&db_container, &cache_container, &config_container])?;
    println!("   Application: {}", cfg.app_name);

    println!("\n4. Earlier containers win ties...");
    let shadow = Container::new();
    shadow.add([provide(Database {
        dsn: "mysql://replica:3306/mydb".into(),
    })])?;
    let winner: Database = inject(&[&db_container, &shadow])?;
    println!("   Database: {} (from the first container)", winner.dsn);

    println!("\n=== Demo Complete ===");
    Ok(())
}
