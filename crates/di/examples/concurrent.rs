use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use di::{lazy, provide, Container};

/// Thread-safe container operations: concurrent injection shares one lazy
/// materialization, and racing registrations have a single winner.

#[derive(Debug, Clone)]
struct Counter {
    value: u64,
}

#[derive(Debug, Clone)]
struct Connection {
    id: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== Concurrency Demo ===\n");

    println!("1. Concurrent injection of a shared value...");
    let container = Arc::new(Container::new());
    container.must_add([provide(Counter { value: 7 })]);

    let mut handles = Vec::new();
    for id in 0..10 {
        let container = Arc::clone(&container);
        handles.push(thread::spawn(move || {
            match container.inject::<Counter>() {
                Ok(counter) => println!("   thread {id}: value={}", counter.value),
                Err(err) => println!("   thread {id}: {err}"),
            }
        }));
    }
    for handle in handles {
        handle.join().expect("injection thread panicked");
    }

    println!("\n2. Lazy factory under concurrent first demand...");
    let lazy_container = Arc::new(Container::new());
    let runs = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&runs);
    lazy_container.must_add([lazy(move |_: &Container| {
        let run = counted.fetch_add(1, Ordering::SeqCst) as u64;
        thread::sleep(Duration::from_millis(25));
        Ok(Connection { id: run })
    })]);

    let threads = 8;
    let barrier = Arc::new(Barrier::new(threads));
    let mut handles = Vec::new();
    for id in 0..threads {
        let container = Arc::clone(&lazy_container);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            let conn = container
                .inject::<Connection>()
                .expect("memoized connection");
            println!("   thread {id}: connection #{}", conn.id);
        }));
    }
    for handle in handles {
        handle.join().expect("injection thread panicked");
    }
    println!("   factory ran {} time(s)", runs.load(Ordering::SeqCst));

    println!("\n3. Racing registrations of the same type...");
    let raced = Arc::new(Container::new());
    let mut handles = Vec::new();
    for id in 0..5u64 {
        let raced = Arc::clone(&raced);
        handles.push(thread::spawn(move || {
            raced.add([provide(Counter { value: id })]).is_ok()
        }));
    }
    let winners = handles
        .into_iter()
        .map(|handle| handle.join().expect("registration thread panicked"))
        .filter(|won| *won)
        .count();
    println!("   winners: {winners} (registered providers: {})", raced.len());

    println!("\n=== Demo Complete ===");
    Ok(())
}
