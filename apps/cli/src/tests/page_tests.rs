use super::*;

#[test]
fn skeleton_counts_initial_likes() {
    let page = PageSkeleton::build(
        &[("1".into(), true), ("2".into(), false), ("3".into(), true)],
        &[],
    );
    let snapshot = page.snapshot();
    assert_eq!(snapshot.likes, "2");
    assert_eq!(snapshot.liked_buttons, vec!["1", "3"]);
    assert!(!snapshot.modal_closed);
    assert_eq!(snapshot.reloads, 0);
}

#[test]
fn skeleton_binds_cleanly() {
    let page = PageSkeleton::build(&[("9".into(), false)], &[("text".into(), "hi".into())]);
    let elements = client_core::PageElements::resolve(&page.doc).expect("resolve");
    assert_eq!(elements.new_message_link, page.compose_link);
    assert!(page.like_button(0).is_some());
    assert!(page.like_button(1).is_none());
}
