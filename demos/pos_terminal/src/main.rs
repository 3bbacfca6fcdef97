//! Headless point-of-sale session.
//!
//! Mounts the terminal layout, walks through a login (one wrong password,
//! then the right one), rings up a card payment and waits for the toy
//! business thread to push a receipt screen back through the inbox.
//! Draw commands go to the log instead of a window.

use std::rc::Rc;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use serde_json::json;
use vitrine_core::{Color, Painter, Rect, Size, TextStyle};
use vitrine_platform::{EventReceiver, Host, InboxSender, LayoutInbox, QueuedSink, StaticSource};
use vitrine_ui::{RenderOptions, outline};

const TERMINAL_LAYOUT: &str = include_str!("../layouts/terminal.json");

const SCREEN: Size = Size {
    width: 480.0,
    height: 800.0,
};

#[derive(Default)]
struct LogPainter {
    commands: usize,
}

impl Painter for LogPainter {
    fn clear(&mut self, color: Color) {
        log::trace!("clear {}", color.to_hex());
    }
    fn rect(&mut self, rect: Rect, color: Color, _radius: f32) {
        self.commands += 1;
        log::trace!("rect {} {rect:?}", color.to_hex());
    }
    fn border(&mut self, rect: Rect, color: Color, width: f32, _radius: f32) {
        self.commands += 1;
        log::trace!("border {width}px {} {rect:?}", color.to_hex());
    }
    fn text(&mut self, rect: Rect, text: &str, style: &TextStyle) {
        self.commands += 1;
        log::debug!(
            "text {text:?} at ({:.0}, {:.0}) {}px",
            rect.x,
            rect.y,
            style.size
        );
    }
    fn field(&mut self, rect: Rect, text: &str, hint: &str, _style: &TextStyle) {
        self.commands += 1;
        let shown = if text.is_empty() { hint } else { text };
        log::debug!("field [{shown}] at ({:.0}, {:.0})", rect.x, rect.y);
    }
    fn image(&mut self, rect: Rect, data: &[u8]) {
        self.commands += 1;
        log::debug!("image {}B in {:.0}x{:.0}", data.len(), rect.w, rect.h);
    }
    fn push_clip(&mut self, _rect: Rect, _radius: f32) {}
    fn pop_clip(&mut self) {}
}

fn receipt_frames() -> Vec<Vec<u8>> {
    let layout = json!({
        "background": "#F0FDF4",
        "root": { "type": "column", "padding": 24, "gap": 12, "children": [
            { "type": "text", "text": "Payment approved", "size": 22, "bold": true, "color": "#166534" },
            { "type": "scroll", "text": "CARD  **** 4242\nAUTH  000731\nThank you!" },
            { "type": "button", "id": "new_sale", "text": "New sale" }
        ] }
    });
    let cmd = json!({ "cmd": { "name": "ui.apply", "args": { "content": layout } } });
    vec![b"ui".to_vec(), cmd.to_string().into_bytes()]
}

/// Toy business layer: answers card payments with a receipt screen.
fn business(mut events: EventReceiver, layouts: InboxSender) {
    while let Some(event) = events.recv() {
        log::info!("business: received '{event}'");
        if event == "pay_card" {
            thread::sleep(Duration::from_millis(50));
            if let Err(e) = layouts.send_frames(receipt_frames()) {
                log::warn!("business: could not deliver receipt: {e}");
                break;
            }
        }
    }
    log::info!("business: host gone, stopping");
}

fn hit(host: &Host, key: &str) -> anyhow::Result<u64> {
    host.last_frame()
        .and_then(|f| f.hit_by_key(key))
        .map(|h| h.id)
        .with_context(|| format!("no interactive element '{key}' on screen"))
}

fn refresh(host: &mut Host) -> anyhow::Result<()> {
    if host.needs_frame() {
        host.frame(SCREEN)?;
    }
    Ok(())
}

fn edit(host: &mut Host, key: &str, text: &str) -> anyhow::Result<()> {
    refresh(host)?;
    let id = hit(host, key)?;
    host.edit(id, text);
    Ok(())
}

fn click(host: &mut Host, key: &str) -> anyhow::Result<()> {
    refresh(host)?;
    let id = hit(host, key)?;
    if !host.click(id) {
        log::warn!("'{key}' is not clickable");
    }
    Ok(())
}

fn paint(host: &mut Host, label: &str) -> anyhow::Result<()> {
    let frame = host.frame(SCREEN)?;
    let mut painter = LogPainter::default();
    frame.scene.replay(&mut painter);
    log::info!(
        "{label}: {} draw commands, {} interactive regions",
        painter.commands,
        frame.hit_regions.len()
    );
    println!("--- {label} ---\n{}", outline(&host.view()));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let inbox = LayoutInbox::new();
    let (sink, events) = QueuedSink::channel();
    let worker = thread::spawn({
        let layouts = inbox.sender();
        move || business(events, layouts)
    });

    let mut host = Host::new(RenderOptions::default())
        .with_source(StaticSource(TERMINAL_LAYOUT.to_string()))
        .with_inbox(inbox)
        .with_sink(Rc::new(sink));
    host.mount();
    paint(&mut host, "login")?;

    edit(&mut host, "user_pass", "letmein")?;
    click(&mut host, "enter")?;
    paint(&mut host, "wrong password")?;

    edit(&mut host, "user_pass", "password123#")?;
    click(&mut host, "enter")?;
    edit(&mut host, "amount", "12.50")?;
    paint(&mut host, "ready for payment")?;
    click(&mut host, "pay_card")?;

    let mut polls = 0;
    while host.pump() == 0 {
        anyhow::ensure!(polls < 40, "business layer never answered");
        thread::sleep(Duration::from_millis(50));
        polls += 1;
    }
    paint(&mut host, "receipt")?;

    drop(host);
    worker
        .join()
        .map_err(|_| anyhow::anyhow!("business thread panicked"))?;
    Ok(())
}
