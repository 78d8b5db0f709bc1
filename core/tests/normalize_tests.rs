use hits_core::normalize::normalize;
use hits_core::Stopwords;

fn stopwords() -> Stopwords {
    ["the", "and", "of", "a"].into_iter().collect()
}

#[test]
fn it_removes_stopwords_after_cleaning() {
    let terms = normalize("The cat AND the Hat, of course!", &stopwords());
    assert_eq!(terms, vec!["cat", "hat", "course"]);
}

#[test]
fn it_keeps_order_and_duplicates() {
    let terms = normalize("dog cat dog", &stopwords());
    assert_eq!(terms, vec!["dog", "cat", "dog"]);
}

#[test]
fn empty_and_symbol_only_queries_yield_nothing() {
    assert!(normalize("", &stopwords()).is_empty());
    assert!(normalize("?!  --- ***", &stopwords()).is_empty());
    assert!(normalize("the and of", &stopwords()).is_empty());
}

#[test]
fn normalization_is_deterministic_and_idempotent() {
    let sw = stopwords();
    let raw = "Rust's 2021 Edition -- the BEST edition?";
    let once = normalize(raw, &sw);
    assert_eq!(once, normalize(raw, &sw));
    assert_eq!(normalize(&once.join(" "), &sw), once);
}
