mod common;

use std::cell::Cell;
use std::rc::Rc;

use common::{approx, widget};
use widget_tween_core::{
    AnimatedProperty, Behavior, EasingType, LinearColor, Margin, PropertyTween, Translation,
    TransformWrite, TweenLink, TweenTarget, Tweener, Vec2,
};

/// Shear shares the transform record with the shipped transform properties.
struct Shear;

impl AnimatedProperty for Shear {
    type Value = Vec2;
    type Group = TransformWrite;

    fn read(target: &dyn TweenTarget) -> Option<Vec2> {
        Some(target.render_transform().shear)
    }

    fn stage(group: &mut TransformWrite, target: &dyn TweenTarget, value: Vec2) {
        group.staged(target).shear = value;
    }
}

/// Counts applies while active; stages nothing.
struct ApplyCounter {
    active: bool,
    applies: Rc<Cell<u32>>,
    bound: bool,
}

impl Behavior<TweenLink> for ApplyCounter {
    fn begin(&mut self) {}
    fn apply(&mut self) {
        if self.active {
            self.applies.set(self.applies.get() + 1);
        }
    }
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }
    fn set_data(&mut self, _: &TweenLink) {
        self.bound = true;
    }
}

#[test]
fn translation_and_rotation_share_one_transform_write() {
    let (w, h) = widget();
    let mut tw = Tweener::new();
    tw.create(&h, 1.0, 0.0, false)
        .easing(EasingType::Linear)
        .to_translation(Vec2::new(100.0, 0.0))
        .to_rotation(90.0)
        .begin();
    assert_eq!(w.borrow().transform_writes, 1);

    tw.tick(0.0);
    for expected in 2..=4 {
        tw.tick(0.25);
        assert_eq!(w.borrow().transform_writes, expected);
    }
    let t = w.borrow().transform;
    assert!(approx(t.translation.x, 75.0));
    assert!(approx(t.angle, 67.5));
    assert_eq!(w.borrow().opacity_writes, 0);
}

#[test]
fn transform_write_preserves_untouched_fields() {
    let (w, h) = widget();
    w.borrow_mut().transform.scale = Vec2::new(3.0, 3.0);
    let mut tw = Tweener::new();
    tw.create(&h, 1.0, 0.0, false)
        .easing(EasingType::Linear)
        .to_rotation(45.0)
        .begin();
    tw.tick(0.0);
    tw.tick(0.5);
    assert_eq!(w.borrow().transform.scale, Vec2::new(3.0, 3.0));
}

#[test]
fn unchanged_fraction_skips_every_write() {
    let (w, h) = widget();
    let mut tw = Tweener::new();
    tw.create(&h, 1.0, 0.0, false)
        .to_translation(Vec2::new(10.0, 10.0))
        .to_opacity(0.0)
        .to_padding(Margin::uniform(8.0))
        .begin();
    tw.tick(0.0);
    tw.tick(0.3);
    let before = w.borrow().total_writes();
    tw.tick(0.0);
    tw.tick(0.0);
    assert_eq!(w.borrow().total_writes(), before);
}

#[test]
fn separate_groups_write_once_each() {
    let (w, h) = widget();
    let mut tw = Tweener::new();
    tw.create(&h, 1.0, 0.0, false)
        .to_scale(Vec2::new(2.0, 2.0))
        .to_opacity(0.0)
        .to_color(LinearColor::new(1.0, 0.0, 0.0, 1.0))
        .to_width_override(120.0)
        .to_max_desired_height(40.0)
        .begin();
    let w0 = w.borrow().total_writes();
    assert_eq!(w0, 5);
    tw.tick(0.0);
    tw.tick(0.5);
    let r = w.borrow();
    assert_eq!(r.transform_writes, 2);
    assert_eq!(r.opacity_writes, 2);
    assert_eq!(r.color_writes, 2);
    assert_eq!(r.slot_writes, 4);
}

#[test]
fn custom_property_joins_transform_group() {
    let (w, h) = widget();
    let mut tw = Tweener::new();
    let mut builder = tw.create(&h, 1.0, 0.0, false).easing(EasingType::Linear);
    builder.tween::<Shear>().to(Vec2::new(1.0, 0.0));
    builder.tween::<Translation>().from(Vec2::ZERO).to(Vec2::new(0.0, 50.0));
    let id = builder.begin();
    assert_eq!(w.borrow().transform_writes, 1);

    tw.tick(0.0);
    tw.tick(0.5);
    let r = w.borrow();
    assert_eq!(r.transform_writes, 2);
    assert!(approx(r.transform.shear.x, 0.5));
    assert!(approx(r.transform.translation.y, 25.0));
    assert_eq!(tw.registry().pool_len::<PropertyTween<Shear>>(), 1);
    assert!(tw.registry().contains::<PropertyTween<Translation>>(id));
}

#[test]
fn custom_behavior_follows_delay_gating() {
    let (_w, h) = widget();
    let mut tw = Tweener::new();
    let applies = Rc::new(Cell::new(0));
    let id = tw
        .create(&h, 1.0, 0.5, false)
        .with_behavior(ApplyCounter {
            active: false,
            applies: applies.clone(),
            bound: false,
        })
        .begin();
    assert!(tw
        .registry()
        .get::<ApplyCounter>(id)
        .is_some_and(|b| b.bound));
    // begin applies once
    assert_eq!(applies.get(), 1);

    tw.tick(0.0);
    assert_eq!(applies.get(), 2);
    tw.tick(0.5);
    assert_eq!(applies.get(), 2);
    tw.tick(0.5);
    assert_eq!(applies.get(), 3);
}

#[test]
#[should_panic(expected = "already owns")]
fn same_behavior_type_twice_is_fatal() {
    let (_w, h) = widget();
    let mut tw = Tweener::new();
    let applies = Rc::new(Cell::new(0));
    let make = || ApplyCounter {
        active: false,
        applies: applies.clone(),
        bound: false,
    };
    tw.create(&h, 1.0, 0.0, false)
        .with_behavior(make())
        .with_behavior(make());
}

#[test]
fn additive_tweens_on_one_widget_share_the_transform_write() {
    let (w, h) = widget();
    let mut tw = Tweener::new();
    tw.create(&h, 1.0, 0.0, true)
        .easing(EasingType::Linear)
        .to_translation(Vec2::new(100.0, 0.0))
        .begin();
    tw.create(&h, 1.0, 0.0, true)
        .easing(EasingType::Linear)
        .to_rotation(90.0)
        .begin();
    assert_eq!(tw.write_target_count(), 1);

    tw.tick(0.0);
    let before = w.borrow().transform_writes;
    tw.tick(0.5);
    {
        let r = w.borrow();
        assert_eq!(r.transform_writes - before, 1);
        assert!(approx(r.transform.translation.x, 50.0));
        assert!(approx(r.transform.angle, 45.0));
    }

    tw.tick(0.5);
    let r = w.borrow();
    assert_eq!(r.transform_writes - before, 2);
    assert!(approx(r.transform.translation.x, 100.0));
    assert!(approx(r.transform.angle, 90.0));
    assert!(tw.is_idle());
    assert_eq!(tw.write_target_count(), 0);
}

#[test]
fn each_widget_gets_its_own_record() {
    let (a, ha) = widget();
    let (b, hb) = widget();
    let mut tw = Tweener::new();
    tw.create(&ha, 1.0, 0.0, false).to_rotation(90.0).begin();
    tw.create(&hb, 1.0, 0.0, false).to_rotation(90.0).begin();
    assert_eq!(tw.write_target_count(), 2);
    tw.tick(0.0);
    tw.tick(0.5);
    assert_eq!(a.borrow().transform_writes, 2);
    assert_eq!(b.borrow().transform_writes, 2);
}
