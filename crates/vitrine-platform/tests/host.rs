use std::rc::Rc;

use serde_json::json;
use vitrine_core::{Painter, Rect, Size, TextStyle};
use vitrine_platform::*;
use vitrine_ui::{LOGIN_ERROR, RenderOptions, SCREEN_START};

const VIEWPORT: Size = Size {
    width: 480.0,
    height: 800.0,
};

fn login_layout() -> String {
    json!({
        "root": { "type": "column", "padding": 24, "gap": 12, "children": [
            { "type": "column", "id": "login", "visible_when_flag": "screen_login", "children": [
                { "type": "input_password", "id": "user_pass", "hint": "Password" },
                { "type": "button", "id": "enter", "text": "Enter", "on_click": "nav_to:start" }
            ] },
            { "type": "column", "id": "start", "visible_when_flag": "screen_start", "children": [
                { "type": "button", "id": "pay_card", "text": "Card" }
            ] }
        ] }
    })
    .to_string()
}

fn texts(host: &mut Host) -> Vec<String> {
    #[derive(Default)]
    struct Texts(Vec<String>);
    impl Painter for Texts {
        fn rect(&mut self, _: Rect, _: vitrine_core::Color, _: f32) {}
        fn border(&mut self, _: Rect, _: vitrine_core::Color, _: f32, _: f32) {}
        fn text(&mut self, _: Rect, text: &str, _: &TextStyle) {
            self.0.push(text.to_string());
        }
        fn field(&mut self, _: Rect, text: &str, _: &str, _: &TextStyle) {
            self.0.push(format!("[{text}]"));
        }
        fn image(&mut self, _: Rect, _: &[u8]) {}
        fn push_clip(&mut self, _: Rect, _: f32) {}
        fn pop_clip(&mut self) {}
    }

    let mut p = Texts::default();
    host.frame(VIEWPORT).unwrap().scene.replay(&mut p);
    p.0
}

fn hit_id(host: &Host, key: &str) -> u64 {
    host.last_frame().unwrap().hit_by_key(key).unwrap().id
}

#[test]
fn placeholder_until_a_layout_is_fetched() {
    let mut host =
        Host::new(RenderOptions::default()).with_source(|| -> Result<String, HostError> {
            Err(HostError::Fetch("backend offline".into()))
        });
    host.mount();
    assert!(host.layout().is_none());
    assert_eq!(texts(&mut host), ["Loading UI…"]);
}

#[test]
fn login_flow_through_hit_regions() {
    let mut host = Host::new(RenderOptions::default()).with_source(StaticSource(login_layout()));
    host.mount();
    assert_eq!(texts(&mut host), ["[]", "Enter"]);

    let field = hit_id(&host, "user_pass");
    assert!(host.edit(field, "oops"));
    assert!(host.needs_frame());
    assert_eq!(texts(&mut host), ["[••••]", "Enter"]);

    assert!(host.click(hit_id(&host, "enter")));
    assert_eq!(host.store().flag(LOGIN_ERROR), Some(true));

    host.frame(VIEWPORT).unwrap();
    host.edit(hit_id(&host, "user_pass"), "password123#");
    host.frame(VIEWPORT).unwrap();

    let enter = host.last_frame().unwrap().hit_by_key("enter").unwrap().rect;
    assert!(host.click_at(enter.x + 1.0, enter.y + 1.0));
    assert_eq!(host.store().flag(SCREEN_START), Some(true));
    assert_eq!(texts(&mut host), ["Card"]);
}

#[test]
fn clicks_outside_any_region_do_nothing() {
    let mut host = Host::new(RenderOptions::default()).with_source(StaticSource(login_layout()));
    host.mount();
    host.frame(VIEWPORT).unwrap();
    let rev = host.store().revision();
    assert!(!host.click_at(-10.0, -10.0));
    assert!(!host.click(9999));
    assert!(!host.edit(hit_id(&host, "enter"), "text"));
    assert_eq!(host.store().revision(), rev);
}

#[test]
fn channel_updates_replace_the_layout() {
    let bus = LayoutBus::new();
    let mut host = Host::new(RenderOptions::default()).with_channel(Rc::new(bus.clone()));
    host.mount();
    assert!(host.is_mounted());
    assert_eq!(bus.subscriber_count(), 1);

    bus.publish(json!({ "root": { "type": "text", "text": "v1" } }).to_string());
    assert_eq!(texts(&mut host), ["v1"]);

    bus.publish("{ not json");
    assert_eq!(host.rejected_layouts(), 1);
    assert_eq!(texts(&mut host), ["v1"]);

    bus.publish(json!({ "root": { "type": "text", "text": "v2" } }).to_string());
    assert_eq!(texts(&mut host), ["v2"]);
    assert_eq!(host.layout_revision(), 2);
}

#[test]
fn unmount_and_drop_release_the_subscription_once() {
    let bus = LayoutBus::new();
    let mut host = Host::new(RenderOptions::default()).with_channel(Rc::new(bus.clone()));
    host.mount();
    host.mount();
    assert_eq!(bus.subscriber_count(), 1);

    host.unmount();
    host.unmount();
    assert_eq!(bus.subscriber_count(), 0);

    bus.publish(json!({ "root": { "type": "text", "text": "late" } }).to_string());
    assert!(host.layout().is_none());

    let mut other = Host::new(RenderOptions::default()).with_channel(Rc::new(bus.clone()));
    other.mount();
    assert_eq!(bus.subscriber_count(), 1);
    drop(other);
    assert_eq!(bus.subscriber_count(), 0);
}

#[test]
fn interaction_state_survives_layout_replacement() {
    let bus = LayoutBus::new();
    let mut host = Host::new(RenderOptions::default())
        .with_source(StaticSource(login_layout()))
        .with_channel(Rc::new(bus.clone()));
    host.mount();
    host.frame(VIEWPORT).unwrap();
    host.edit(hit_id(&host, "user_pass"), "abc");

    bus.publish(login_layout());
    assert_eq!(texts(&mut host), ["[•••]", "Enter"]);
}

#[test]
fn inbox_accepts_layouts_from_other_threads() {
    let inbox = LayoutInbox::new();
    let tx = inbox.sender();
    let mut host = Host::new(RenderOptions::default()).with_inbox(inbox);
    host.mount();

    let style = json!({
        "background": "#129ADA",
        "screens": [ { "id": "pay", "children": [ { "type": "text", "text": "Pay now" } ] } ]
    });
    let frame = json!({ "cmd": { "name": "ui.style.apply", "args": { "style": style } } });

    std::thread::spawn(move || {
        tx.send_layout("{ broken").unwrap();
        tx.send_frames(vec![b"ui".to_vec(), frame.to_string().into_bytes()])
            .unwrap();
        tx.send_frames(vec![b"noise".to_vec()]).unwrap();
    })
    .join()
    .unwrap();

    assert_eq!(host.pump(), 1);
    assert_eq!(host.rejected_layouts(), 1);
    assert_eq!(texts(&mut host), ["Pay now"]);
    assert_eq!(host.pump(), 0);
}

#[test]
fn business_events_reach_the_worker() {
    let (sink, mut rx) = QueuedSink::channel();
    let mut host = Host::new(RenderOptions::default())
        .with_source(StaticSource(login_layout()))
        .with_sink(Rc::new(sink));
    host.mount();
    host.store().set_flag("screen_login", false);
    host.store().set_flag("screen_start", true);
    host.frame(VIEWPORT).unwrap();

    assert!(host.click(hit_id(&host, "pay_card")));
    assert_eq!(rx.try_recv().as_deref(), Some("pay_card"));
    assert_eq!(rx.try_recv(), None);
}

#[test]
fn custom_credentials_gate_login() {
    let mut host = Host::new(RenderOptions::default())
        .with_source(StaticSource(login_layout()))
        .with_credentials(|pw: &str| pw == "1234");
    host.mount();
    host.frame(VIEWPORT).unwrap();
    host.edit(hit_id(&host, "user_pass"), "1234");
    host.click(hit_id(&host, "enter"));
    assert_eq!(host.store().flag(SCREEN_START), Some(true));
}

#[test]
fn money_field_is_editable_but_ignores_bound_inputs() {
    let layout = json!({
        "root": { "type": "column", "children": [
            { "type": "input_money", "id": "m1", "value": "1.00" }
        ] }
    });
    let mut host =
        Host::new(RenderOptions::default()).with_source(StaticSource(layout.to_string()));
    host.mount();
    assert_eq!(texts(&mut host), ["[1.00]"]);

    assert!(host.edit(hit_id(&host, "m1"), "7.25"));
    assert!(host.needs_frame());
    assert_eq!(texts(&mut host), ["[7.25]"]);
    assert_eq!(host.store().input("m1"), None);

    host.store().set_input("m1", "99");
    assert_eq!(texts(&mut host), ["[7.25]"]);
}
