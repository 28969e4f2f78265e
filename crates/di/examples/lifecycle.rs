use std::sync::Arc;

use anyhow::Result;
use di::{lazy, provide, Container, Lifecycle};

/// Resource cleanup on shutdown: factories register shutdown hooks while
/// building their values; hooks run in reverse order afterwards.

#[derive(Debug, Clone)]
struct Database {
    name: String,
}

#[derive(Debug, Clone)]
struct Cache {
    name: String,
}

#[derive(Debug, Clone)]
struct App {
    db: Database,
    cache: Cache,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Lifecycle Cleanup Demo ===\n");

    let container = Container::new();
    container.must_add([
        provide(Arc::new(Lifecycle::new())),
        lazy(|owner: &Container| {
            let lifecycle: Arc<Lifecycle> = owner.inject()?;
            let db = Database {
                name: "main-db".into(),
            };
            println!("[Database] {} connected", db.name);
            let name = db.name.clone();
            lifecycle.add_shutdown_hook(move || {
                println!("[Database] {name} connection closed");
                Ok(())
            });
            Ok(db)
        }),
        lazy(|owner: &Container| {
            let lifecycle: Arc<Lifecycle> = owner.inject()?;
            let cache = Cache {
                name: "redis-cache".into(),
            };
            println!("[Cache] {} connected", cache.name);
            let name = cache.name.clone();
            lifecycle.add_shutdown_hook(move || {
                println!("[Cache] {name} connection closed");
                Ok(())
            });
            Ok(cache)
        }),
        lazy(|owner: &Container| {
            let db: Database = owner.inject()?;
            let cache: Cache = owner.inject()?;
            Ok(App { db, cache })
        }),
    ]);

    let app: App = container.inject()?;
    println!(
        "\nApplication running with {} and {}",
        app.db.name, app.cache.name
    );

    println!("\n=== Starting Shutdown ===");
    let lifecycle: Arc<Lifecycle> = container.inject()?;
    lifecycle.shutdown();
    println!("=== Shutdown Complete ===");

    Ok(())
}
