use super::*;

#[test]
fn resize_flags_each_subscription_once() {
    let vp = Viewport::new(LayoutSize::new(10.0, 10.0), 1.0);
    let a = vp.subscribe_resize();
    let b = vp.subscribe_resize();
    assert_eq!(vp.listener_count(), 2);
    assert!(!a.take_pending());

    vp.resize(LayoutSize::new(20.0, 10.0), 2.0);
    assert!(a.take_pending());
    assert!(!a.take_pending());
    assert!(b.take_pending());
    assert_eq!(vp.layout(), LayoutSize::new(20.0, 10.0));
    assert_eq!(vp.pixel_ratio(), 2.0);
}

#[test]
fn dropping_subscription_detaches_listener() {
    let vp = Viewport::new(LayoutSize::new(10.0, 10.0), 1.0);
    let sub = vp.subscribe_resize();
    let shared = vp.clone();
    assert_eq!(shared.listener_count(), 1);
    drop(sub);
    assert_eq!(vp.listener_count(), 0);
    vp.resize(LayoutSize::new(1.0, 1.0), 1.0);
}
