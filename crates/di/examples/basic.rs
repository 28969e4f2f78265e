use anyhow::Result;
use di::{provide, Container};

/// Minimal registration and resolution round trip.

#[derive(Debug, Clone)]
struct Database {
    dsn: String,
}

#[derive(Debug, Clone)]
struct Config {
    app_name: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Basic Injection Demo ===\n");

    println!("1. Registering providers...");
    let container = Container::new();
    container.add([
        provide(Database {
            dsn: "mysql://localhost:3306/app".into(),
        }),
        provide(Config {
            app_name: "basic-demo".into(),
        }),
    ])?;
    println!("   Registered {} providers", container.len());

    println!("\n2. Resolving by type...");
    let db: Database = container.inject()?;
    let cfg: Config = container.inject()?;
    println!("   Database: {}", db.dsn);
    println!("   Config:   {}", cfg.app_name);

    println!("\n3. Asking for an unregistered type...");
    match container.inject::<String>() {
        Ok(_) => println!("   unexpected"),
        Err(err) => println!("   expected error: {err}"),
    }

    println!("\n=== Demo Complete ===");
    Ok(())
}
