use anyhow::Result;
use di::{chain, provide, Container};

/// Chained providers: each stage is registered as a transformation of the
/// previous one and materializes on first demand.

#[derive(Debug, Clone)]
struct Config {
    dsn: String,
}

#[derive(Debug, Clone)]
struct Database {
    conn_string: String,
    connected: bool,
}

#[derive(Debug, Clone)]
struct Repository {
    db: Database,
}

#[derive(Debug, Clone)]
struct Service {
    name: String,
    repo: Repository,
}

#[derive(Debug, Clone)]
struct Name(String);

#[derive(Debug, Clone, Copy)]
struct Length(usize);

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Chain Demo ===\n");

    println!("1. Simple chain: Name -> Length...");
    let c1 = Container::new();
    c1.must_add([
        provide(Name("hello".into())),
        chain(|name: Name| {
            println!("   transforming '{}' -> length {}", name.0, name.0.len());
            Ok(Length(name.0.len()))
        }),
    ]);
    let len: Length = c1.inject()?;
    println!("   Length: {}", len.0);

    println!("\n2. Config -> Database -> Repository -> Service...");
    let c2 = Container::new();
    c2.must_add([
        provide(Config {
            dsn: "mysql://localhost:3306/mydb".into(),
        }),
        chain(|cfg: Config| {
            println!("   creating Database from {}", cfg.dsn);
            Ok(Database {
                conn_string: cfg.dsn,
                connected: true,
            })
        }),
        chain(|db: Database| {
            println!("   creating Repository");
            Ok(Repository { db })
        }),
        chain(|repo: Repository| {
            println!("   creating Service");
            Ok(Service {
                name: "UserService".into(),
                repo,
            })
        }),
    ]);

    let svc: Service = c2.inject()?;
    println!("\n   Service:  {}", svc.name);
    println!(
        "   Database: {} (connected: {})",
        svc.repo.db.conn_string, svc.repo.db.connected
    );

    println!("\n=== Demo Complete ===");
    Ok(())
}
