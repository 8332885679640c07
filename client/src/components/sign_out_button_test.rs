use super::*;

#[test]
fn success_leaves_for_landing_page() {
    assert_eq!(next_location::<String>(&Ok(())), Some("/"));
}

#[test]
fn failure_stays_on_page() {
    assert_eq!(next_location(&Err("network down".to_owned())), None);
}
