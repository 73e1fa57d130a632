use super::*;

#[test]
fn every_subscriber_receives_each_event() {
    let mut bus = EventBus::new();
    let mut first = bus.subscribe();
    let mut second = bus.subscribe();

    bus.emit(1u32);
    bus.emit(2u32);

    assert_eq!(first.drain(), vec![1, 2]);
    assert_eq!(second.drain(), vec![1, 2]);
}

#[test]
fn late_subscriber_misses_earlier_events() {
    let mut bus = EventBus::new();
    bus.emit("early");
    let mut rx = bus.subscribe();
    bus.emit("late");

    assert_eq!(rx.drain(), vec!["late"]);
}

#[test]
fn dropped_subscriber_is_pruned() {
    let mut bus = EventBus::new();
    let rx = bus.subscribe();
    let mut kept = bus.subscribe();
    assert_eq!(bus.subscriber_count(), 2);

    drop(rx);
    bus.emit(7i32);

    assert_eq!(bus.subscriber_count(), 1);
    assert_eq!(kept.try_recv(), Ok(7));
}

#[test]
fn try_recv_on_empty_channel() {
    let mut bus: EventBus<u8> = EventBus::new();
    let mut rx = bus.subscribe();
    assert_eq!(rx.try_recv(), Err(TryRecvError::Empty));
}
