//! Unit tests for bistro-actor.

#[cfg(test)]
mod helpers {
    use bistro_core::{ActorId, Point};

    use crate::{Actor, ActorKind, ClockAnimator};

    pub const EAT_TICKS: u64 = 2;
    pub const DRINK_TICKS: u64 = 3;

    pub fn animator() -> ClockAnimator {
        ClockAnimator::with_defaults(EAT_TICKS, DRINK_TICKS).unwrap()
    }

    pub fn guest_at(x: i32, y: i32) -> Actor {
        Actor::new(ActorId(1), ActorKind::Guest, Point::new(x, y))
    }
}

// ── Mailbox ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod mailbox {
    use bistro_core::ActorId;

    use crate::{Mailbox, Message};

    const A: ActorId = ActorId(1);
    const B: ActorId = ActorId(2);
    const X: ActorId = ActorId(9);

    #[test]
    fn second_send_overwrites_first() {
        let mut mb = Mailbox::new();
        mb.send("m1", A, X);
        mb.send("m2", A, X);
        assert_eq!(mb.receive(X), Some(Message { content: "m2", from: A }));
        assert_eq!(mb.overwrites(), 1);
    }

    #[test]
    fn receive_is_destructive() {
        let mut mb = Mailbox::new();
        mb.send(7u32, A, X);
        assert_eq!(mb.receive(X).map(|m| m.content), Some(7));
        assert_eq!(mb.receive(X), None);
        assert!(mb.is_empty());
    }

    #[test]
    fn empty_receive_is_none() {
        let mut mb: Mailbox<u8> = Mailbox::new();
        assert_eq!(mb.receive(X), None);
    }

    #[test]
    fn send_all_fans_out() {
        let mut mb = Mailbox::new();
        mb.send_all("hello", A, &[B, X]);
        assert_eq!(mb.len(), 2);
        assert_eq!(mb.receive(B).map(|m| m.from), Some(A));
        assert_eq!(mb.receive(X).map(|m| m.content), Some("hello"));
        assert_eq!(mb.overwrites(), 0);
    }

    #[test]
    fn take_if_leaves_unwanted_pending() {
        let mut mb = Mailbox::new();
        mb.send(3u32, A, X);
        assert_eq!(mb.take_if(X, |m| m.content == 4), None);
        assert_eq!(mb.peek(X).map(|m| m.content), Some(3));
        assert_eq!(mb.take_if(X, |m| m.content == 3).map(|m| m.content), Some(3));
        assert_eq!(mb.peek(X), None);
    }

    #[test]
    fn discard_and_clear() {
        let mut mb = Mailbox::new();
        mb.send(1u8, A, X);
        mb.send(2u8, A, B);
        assert!(mb.discard(X).is_some());
        assert_eq!(mb.len(), 1);
        mb.clear();
        assert!(mb.is_empty());
    }
}

// ── Animator ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod animator {
    use bistro_core::{ActorId, Direction, Tick};

    use super::helpers::{EAT_TICKS, animator};
    use crate::{ActorError, Animation, Animator, ClockAnimator};

    #[test]
    fn keys() {
        assert_eq!(Animation::Walk(Direction::Up).key(), "walk-up");
        assert_eq!(Animation::Sit(Direction::DownLeft).key(), "sit-down-left");
        assert_eq!(Animation::Eat.key(), "eat");
    }

    #[test]
    fn unknown_key_is_an_error() {
        let mut anim = ClockAnimator::new();
        let err = anim.play(ActorId(0), &Animation::Eat).unwrap_err();
        assert!(matches!(err, ActorError::UnknownAnimation(ref k) if k == "eat"));
    }

    #[test]
    fn zero_length_one_shots_are_rejected() {
        let err = ClockAnimator::with_defaults(0, 2).unwrap_err();
        assert!(matches!(err, ActorError::ZeroLength(ref k) if k == "eat"));
        let err = ClockAnimator::with_defaults(2, 0).unwrap_err();
        assert!(matches!(err, ActorError::ZeroLength(ref k) if k == "drink"));
    }

    #[test]
    fn one_shot_runs_out_looping_does_not() {
        let mut anim = animator();
        let a = ActorId(0);
        let b = ActorId(1);
        anim.advance(Tick(10));
        anim.play(a, &Animation::Eat).unwrap();
        anim.play(b, &Animation::Stand(Direction::Down)).unwrap();
        assert!(anim.is_playing(a, &Animation::Eat));
        assert!(!anim.is_playing(a, &Animation::Drink));

        anim.advance(Tick(10 + EAT_TICKS));
        assert!(!anim.is_playing(a, &Animation::Eat));
        assert!(anim.is_playing(b, &Animation::Stand(Direction::Down)));
        assert_eq!(anim.current(b), Some("stand-down"));

        anim.forget(b);
        assert_eq!(anim.current(b), None);
    }
}

// ── Actions ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod actions {
    use bistro_core::{Cell, Direction, Point, Tick};
    use bistro_grid::Path;
    use bistro_walk::WalkPath;

    use super::helpers::{EAT_TICKS, animator, guest_at};
    use crate::{ActionCtx, ActionKind, ActionState, Animator, EAT_LOOPS};

    #[test]
    fn set_action_runs_init() {
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
        guest.set_action(ActionState::idle_sitting(), &mut ctx).unwrap();
        assert_eq!(guest.action_kind(), ActionKind::IdleSitting);
        assert_eq!(anim.current(guest.id()), Some("sit-down"));
    }

    #[test]
    fn walking_moves_body_and_faces_path() {
        let tile = 4;
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        let path = Path::new(vec![Cell::new(0, 0), Cell::new(1, 0), Cell::new(1, 1)]);
        let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
        guest
            .set_action(ActionState::walking(WalkPath::from_path(path, tile)), &mut ctx)
            .unwrap();
        assert_eq!(guest.facing(), Direction::Down);

        for _ in 0..tile {
            guest.update_action(&mut ctx).unwrap();
        }
        assert_eq!(guest.pos(), Point::new(0, 4));
        assert_eq!(guest.facing(), Direction::Right);
        assert!(!guest.action_done());

        for _ in 0..tile {
            guest.update_action(&mut ctx).unwrap();
        }
        assert!(guest.action_done());
        assert_eq!(guest.pos(), Point::new(4, 4));
        assert_eq!(anim.current(guest.id()), Some("walk-right"));
    }

    #[test]
    fn sitting_down_resolves_x_then_y_and_sits() {
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        let chair = Point::new(2, 1);
        let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
        guest
            .set_action(ActionState::sitting_down(chair, Direction::Left), &mut ctx)
            .unwrap();

        guest.update_action(&mut ctx).unwrap();
        assert_eq!(guest.pos(), Point::new(1, 0));
        guest.update_action(&mut ctx).unwrap();
        assert_eq!(guest.pos(), Point::new(2, 0));
        assert_eq!(guest.action_kind(), ActionKind::SittingDown);
        guest.update_action(&mut ctx).unwrap();
        assert_eq!(guest.pos(), chair);
        assert_eq!(guest.action_kind(), ActionKind::IdleSitting);
        assert_eq!(guest.facing(), Direction::Left);
        assert_eq!(anim.current(guest.id()), Some("sit-left"));
    }

    #[test]
    fn standing_up_turns_into_idle_standing() {
        let mut anim = animator();
        let mut guest = guest_at(2, 0);
        let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
        guest
            .set_action(ActionState::standing_up(Point::new(0, 0)), &mut ctx)
            .unwrap();
        guest.update_action(&mut ctx).unwrap();
        guest.update_action(&mut ctx).unwrap();
        assert_eq!(guest.action_kind(), ActionKind::IdleStanding);
        assert!(!guest.action_done());
    }

    #[test]
    fn idle_with_deadline_self_terminates() {
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
        guest
            .set_action(ActionState::idle_standing_until(Tick(5)), &mut ctx)
            .unwrap();
        for t in 1..5 {
            ctx.now = Tick(t);
            guest.update_action(&mut ctx).unwrap();
            assert!(!guest.action_done());
        }
        ctx.now = Tick(5);
        guest.update_action(&mut ctx).unwrap();
        assert!(guest.action_done());
    }

    #[test]
    fn eating_counts_loops() {
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        {
            let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
            guest.set_action(ActionState::eating(), &mut ctx).unwrap();
        }

        let mut cycles = 0;
        let mut t = 0;
        while !guest.action_done() {
            t += 1;
            anim.advance(Tick(t));
            let mut ctx = ActionCtx { now: Tick(t), animator: &mut anim };
            guest.update_action(&mut ctx).unwrap();
            cycles += guest.take_cycles();
            assert!(t < 100, "eating never finished");
        }
        assert_eq!(cycles, EAT_LOOPS);
        assert_eq!(t, EAT_LOOPS as u64 * EAT_TICKS);
        assert_eq!(guest.take_cycles(), 0);
    }

    #[test]
    fn drinking_is_a_single_loop() {
        let mut anim = animator();
        let mut guest = guest_at(0, 0);
        {
            let mut ctx = ActionCtx { now: Tick(0), animator: &mut anim };
            guest.set_action(ActionState::drinking(), &mut ctx).unwrap();
        }
        let mut cycles = 0;
        for t in 1..=10 {
            anim.advance(Tick(t));
            let mut ctx = ActionCtx { now: Tick(t), animator: &mut anim };
            guest.update_action(&mut ctx).unwrap();
            cycles += guest.take_cycles();
        }
        assert!(guest.action_done());
        assert_eq!(cycles, 1);
    }
}

// ── VariantPool ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod variants {
    use bistro_core::SimRng;

    use crate::VariantPool;

    #[test]
    fn take_until_exhausted_then_release() {
        let mut rng = SimRng::new(1);
        let mut pool = VariantPool::new(["red", "green"]);
        let a = pool.take(&mut rng).unwrap();
        let b = pool.take(&mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(pool.take(&mut rng), None);
        pool.release(a.clone());
        pool.release(a);
        assert_eq!(pool.available(), 1);
    }
}
