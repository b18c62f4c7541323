use super::*;

#[test]
fn located_source_gets_the_long_lifetime_and_a_dependency() {
    let d = advise(true, "photo.jpg");
    assert_eq!(d.lifetime_minutes, 30);
    assert_eq!(d.depends_on_source.as_deref(), Some("photo.jpg"));
}

#[test]
fn fallback_gets_the_short_lifetime_and_no_dependency() {
    let d = advise(false, "photo.jpg");
    assert_eq!(d.lifetime_minutes, 2);
    assert_eq!(d.depends_on_source, None);
}
