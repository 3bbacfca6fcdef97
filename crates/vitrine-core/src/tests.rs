#[cfg(test)]
mod tests {
    use crate::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_signal_basic() {
        let sig = signal(42);
        assert_eq!(sig.get(), 42);

        sig.set(100);
        assert_eq!(sig.get(), 100);

        sig.update(|v| *v += 1);
        assert_eq!(sig.get(), 101);
    }

    #[test]
    fn test_signal_subscription() {
        let sig = signal(0);
        let called = Rc::new(RefCell::new(false));

        let called_clone = called.clone();
        sig.subscribe(move |_| {
            *called_clone.borrow_mut() = true;
        });

        sig.set(42);
        assert!(*called.borrow());
    }

    #[test]
    fn test_signal_unsubscribe() {
        let sig = signal(0);
        let hits = Rc::new(RefCell::new(0));
        let id = sig.subscribe({
            let hits = hits.clone();
            move |_| *hits.borrow_mut() += 1
        });
        sig.set(1);
        assert!(sig.unsubscribe(id));
        assert!(!sig.unsubscribe(id));
        sig.set(2);
        assert_eq!(*hits.borrow(), 1);
        assert_eq!(sig.subscriber_count(), 0);
    }

    #[test]
    fn test_signal_subscriber_can_write_back() {
        let sig = signal(0);
        let mirror = signal(0);
        sig.subscribe({
            let mirror = mirror.clone();
            let sig = sig.clone();
            move |v| mirror.set(*v + sig.get())
        });
        sig.set(5);
        assert_eq!(mirror.get(), 10);
    }

    #[test]
    fn test_dispose_runs_once() {
        let runs = Rc::new(RefCell::new(0));
        let d = Dispose::new({
            let runs = runs.clone();
            move || *runs.borrow_mut() += 1
        });
        let d2 = d.clone();
        assert!(!d.is_disposed());
        d.run();
        d2.run();
        assert!(d2.is_disposed());
        assert_eq!(*runs.borrow(), 1);
    }

    #[test]
    fn test_dispose_guard_runs_on_drop() {
        let cleaned_up = Rc::new(RefCell::new(false));
        {
            let _guard = Dispose::new({
                let cleaned_up = cleaned_up.clone();
                move || *cleaned_up.borrow_mut() = true
            })
            .guard();
            assert!(!*cleaned_up.borrow());
        }
        assert!(*cleaned_up.borrow());
    }

    #[test]
    fn test_color_from_hex() {
        let c = Color::from_hex("#FF5733");
        assert_eq!(c, Color(255, 87, 51, 255));

        let c_alpha = Color::from_hex("#FF5733AA");
        assert_eq!(c_alpha, Color(255, 87, 51, 170));

        assert_eq!(Color::parse_hex("#fff"), Some(Color::WHITE));
        assert_eq!(Color::parse_hex("red"), None);
        assert_eq!(Color::parse_hex("#12345"), None);
        assert_eq!(Color::parse_hex("#GG0000"), None);
        assert_eq!(Color::from_hex("nonsense"), Color::BLACK);
    }

    #[test]
    fn test_color_hex_round_trip_and_alpha() {
        assert_eq!(Color::from_hex("#2962FF").to_hex(), "#2962FF");
        assert_eq!(Color::WHITE.mul_alpha(0.4), Color(255, 255, 255, 102));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect {
            x: 10.0,
            y: 10.0,
            w: 100.0,
            h: 50.0,
        };

        assert!(rect.contains(Vec2 { x: 50.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 5.0, y: 30.0 }));
        assert!(!rect.contains(Vec2 { x: 50.0, y: 70.0 }));
    }

    #[test]
    fn test_rect_intersect_and_inset() {
        let a = Rect {
            x: 0.0,
            y: 0.0,
            w: 10.0,
            h: 10.0,
        };
        let b = Rect {
            x: 5.0,
            y: 5.0,
            w: 10.0,
            h: 10.0,
        };
        assert_eq!(
            a.intersect(&b),
            Some(Rect {
                x: 5.0,
                y: 5.0,
                w: 5.0,
                h: 5.0
            })
        );
        assert_eq!(a.intersect(&b.translate(20.0, 0.0)), None);
        assert_eq!(a.inset(6.0, 1.0).w, 0.0);
    }

    #[derive(Default)]
    struct Recorder(Vec<String>);

    impl Painter for Recorder {
        fn rect(&mut self, _: Rect, c: Color, _: f32) {
            self.0.push(format!("rect {}", c.to_hex()));
        }
        fn border(&mut self, _: Rect, _: Color, w: f32, _: f32) {
            self.0.push(format!("border {w}"));
        }
        fn text(&mut self, _: Rect, text: &str, _: &TextStyle) {
            self.0.push(format!("text {text}"));
        }
        fn field(&mut self, _: Rect, text: &str, hint: &str, _: &TextStyle) {
            self.0.push(format!("field {text}|{hint}"));
        }
        fn image(&mut self, _: Rect, data: &[u8]) {
            self.0.push(format!("image {}", data.len()));
        }
        fn push_clip(&mut self, _: Rect, _: f32) {
            self.0.push("clip".into());
        }
        fn pop_clip(&mut self) {
            self.0.push("unclip".into());
        }
    }

    #[test]
    fn test_scene_replay_balances_clips() {
        let scene = Scene {
            clear_color: Color::WHITE,
            nodes: vec![
                SceneNode::PopClip,
                SceneNode::PushClip {
                    rect: Rect::default(),
                    radius: 0.0,
                },
                SceneNode::Text {
                    rect: Rect::default(),
                    text: "hi".into(),
                    style: TextStyle::default(),
                },
            ],
        };
        let mut rec = Recorder::default();
        scene.replay(&mut rec);
        assert_eq!(rec.0, vec!["clip", "text hi", "unclip"]);
    }

    #[test]
    fn test_view_find_by_key() {
        let tree = View::new(1, ViewKind::Column).with_children(vec![
            View::new(2, ViewKind::Box).key(Some("a".into())),
            View::new(3, ViewKind::Column)
                .with_children(vec![View::new(4, ViewKind::Box).key(Some("b".into()))]),
        ]);
        assert_eq!(tree.find("b").map(|v| v.id), Some(4));
        assert!(tree.find("zzz").is_none());
        assert_eq!(tree.count(), 4);
    }

    #[test]
    fn test_insets_shrink_clamps_at_zero() {
        let r = Rect {
            x: 0.0,
            y: 0.0,
            w: 40.0,
            h: 20.0,
        };
        let inner = Insets::symmetric(8.0, 4.0).shrink(r);
        assert_eq!((inner.x, inner.y, inner.w, inner.h), (8.0, 4.0, 24.0, 12.0));
        assert_eq!(Insets::uniform(30.0).shrink(r).h, 0.0);
        assert_eq!(Modifier::new().padding(3.0).padding, Insets::uniform(3.0));
    }
}
