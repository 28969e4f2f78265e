//! Chain provider behavior: transformation pipelines over registered types.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use di::{chain, inject, provide, Container, DIError};

#[derive(Debug, Clone, PartialEq)]
struct Name(String);

#[derive(Debug, Clone, Copy, PartialEq)]
struct Length(usize);

#[derive(Debug, Clone, PartialEq)]
struct Summary(String);

#[test]
fn test_chain_transforms_registered_value() {
    let container = Container::new();
    container.must_add([
        provide(Name("hello".into())),
        chain(|name: Name| Ok(Length(name.0.len()))),
    ]);

    let len: Length = container.inject().expect("Length should resolve");
    assert_eq!(len, Length(5));
}

#[test]
fn test_chains_compose_into_pipelines() {
    let container = Container::new();
    container.must_add([
        provide(Name("hello".into())),
        chain(|name: Name| Ok(Length(name.0.len()))),
        chain(|len: Length| Ok(Summary(format!("len{}", len.0)))),
    ]);

    let summary: Summary = container.inject().expect("Summary should resolve");
    assert_eq!(summary, Summary("len5".into()));
}

#[test]
fn test_independent_chains_do_not_interfere() {
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct BaseInt(i64);
    #[derive(Debug, Clone, Copy, PartialEq)]
    struct DoubledInt(i64);
    #[derive(Debug, Clone, PartialEq)]
    struct BaseStr(String);
    #[derive(Debug, Clone, PartialEq)]
    struct SuffixedStr(String);

    let container = Container::new();
    container.must_add([
        provide(BaseInt(10)),
        provide(BaseStr("prefix".into())),
        chain(|n: BaseInt| Ok(DoubledInt(n.0 * 2))),
        chain(|s: BaseStr| Ok(SuffixedStr(format!("{}-suffix", s.0)))),
    ]);

    assert_eq!(
        container.inject::<DoubledInt>().expect("DoubledInt"),
        DoubledInt(20)
    );
    assert_eq!(
        container.inject::<SuffixedStr>().expect("SuffixedStr"),
        SuffixedStr("prefix-suffix".into())
    );
}

#[test]
fn test_chain_transform_is_memoized() {
    let runs = Arc::new(AtomicUsize::new(0));
    let counted = Arc::clone(&runs);

    let container = Container::new();
    container.must_add([
        provide(Name("hello".into())),
        chain(move |name: Name| {
            counted.fetch_add(1, Ordering::SeqCst);
            Ok(Length(name.0.len()))
        }),
    ]);

    for _ in 0..4 {
        let len: Length = container.inject().expect("Length should resolve");
        assert_eq!(len, Length(5));
    }
    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_chain_without_input_fails_with_its_input_type() {
    let container = Container::new();
    container.must_add([chain(|name: Name| Ok(Length(name.0.len())))]);

    let err = container
        .inject::<Length>()
        .expect_err("missing Name should fail the chain");
    assert!(matches!(err, DIError::Factory { .. }));
    assert!(err.to_string().contains("Name"));
    assert!(err.to_string().contains("doesn't exist"));
}

#[test]
fn test_chain_propagates_transform_failure() {
    let container = Container::new();
    container.must_add([
        provide(Name(String::new())),
        chain(|name: Name| {
            if name.0.is_empty() {
                anyhow::bail!("empty name");
            }
            Ok(Length(name.0.len()))
        }),
    ]);

    let err = container
        .inject::<Length>()
        .expect_err("transform failure should surface");
    assert!(err.to_string().contains("empty name"));
}

#[test]
fn test_chain_resolves_input_from_owning_registry_only() {
    let c1 = Container::new();
    let c2 = Container::new();
    c1.must_add([chain(|name: Name| Ok(Length(name.0.len())))]);
    c2.must_add([provide(Name("elsewhere".into()))]);

    // The chain lives in c1 and looks up its input there; Name being
    // available in a later registry of the outer call doesn't help it.
    let err = inject::<Length>(&[&c1, &c2]).expect_err("chain input must come from c1");
    assert!(matches!(err, DIError::Factory { .. }));
    assert!(err.to_string().contains("Name"));
}
