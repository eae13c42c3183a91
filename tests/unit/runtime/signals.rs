use super::*;

#[test]
fn listening_follows_subscriptions() {
    let mut hub = SignalHub::new();
    assert!(!hub.is_listening(SignalKind::Scroll));
    let scroll = hub.subscribe(SignalKind::Scroll);
    let resize = hub.subscribe(SignalKind::Resize);
    assert!(hub.is_listening(SignalKind::Scroll));
    assert!(hub.unsubscribe(scroll));
    assert!(!hub.unsubscribe(scroll));
    assert!(!hub.is_listening(SignalKind::Scroll));
    assert!(hub.is_listening(SignalKind::Resize));
    assert_ne!(scroll, resize);
}

#[test]
fn unsubscribe_all_silences_everything() {
    let mut hub = SignalHub::new();
    hub.subscribe(SignalKind::Pointer);
    hub.subscribe(SignalKind::Scroll);
    hub.subscribe(SignalKind::Scroll);
    assert_eq!(hub.unsubscribe_all(), 3);
    assert!(hub.is_empty());
    assert!(!hub.is_listening(SignalKind::Pointer));
}
