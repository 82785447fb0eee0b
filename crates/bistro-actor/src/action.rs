//! The per-actor action state machine.
//!
//! Actions are short physical behaviours.  Each variant carries only what
//! its own motion needs.  `init` runs once when the action becomes active;
//! `update` runs once per tick and may hand back a successor, which is how
//! `SittingDown` turns into `IdleSitting` and `StandingUp` into
//! `IdleStanding`.  Every other transition is chosen by the owning
//! life-cycle state after it sees [`ActionState::is_done`].

use bistro_core::{Direction, Point, Tick};
use bistro_walk::{WalkPath, approach, facing_toward};

use crate::{ActorResult, Animation, Animator, Body};

/// Eat animation loops per dish.
pub const EAT_LOOPS: u32 = 4;

/// Drink animation loops per drink.
pub const DRINK_LOOPS: u32 = 1;

/// Per-tick context handed to actions.
pub struct ActionCtx<'a> {
    pub now:      Tick,
    pub animator: &'a mut dyn Animator,
}

// ── ActionKind ────────────────────────────────────────────────────────────────

/// Tag of the active action, for callers that only need to know what an
/// actor is doing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ActionKind {
    Walking,
    IdleStanding,
    IdleSitting,
    SittingDown,
    StandingUp,
    Eating,
    Drinking,
}

impl ActionKind {
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Walking => "walking",
            ActionKind::IdleStanding => "idle-standing",
            ActionKind::IdleSitting => "idle-sitting",
            ActionKind::SittingDown => "sitting-down",
            ActionKind::StandingUp => "standing-up",
            ActionKind::Eating => "eating",
            ActionKind::Drinking => "drinking",
        }
    }
}

// ── Consume ───────────────────────────────────────────────────────────────────

/// Loop bookkeeping shared by eating and drinking.
///
/// `pending_cycles` counts loop boundaries the owning life-cycle state has
/// not collected yet; it decrements the dish's bite counter once per cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Consume {
    loops_target:   u32,
    loops_done:     u32,
    pending_cycles: u32,
    done:           bool,
}

impl Consume {
    pub fn new(loops: u32) -> Self {
        Self { loops_target: loops, loops_done: 0, pending_cycles: 0, done: loops == 0 }
    }

    pub fn loops_done(&self) -> u32 {
        self.loops_done
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    fn update(&mut self, body: &Body, anim: &Animation, ctx: &mut ActionCtx<'_>) -> ActorResult<()> {
        if self.done || ctx.animator.is_playing(body.id, anim) {
            return Ok(());
        }
        self.loops_done += 1;
        self.pending_cycles += 1;
        if self.loops_done >= self.loops_target {
            self.done = true;
        } else {
            ctx.animator.play(body.id, anim)?;
        }
        Ok(())
    }
}

// ── ActionState ───────────────────────────────────────────────────────────────

/// Exactly one is active per actor.
#[derive(Debug, Clone)]
pub enum ActionState {
    /// Follow a planned path; finished once the goal is reached.
    Walking(WalkPath),
    /// Stand still, optionally until a deadline.
    IdleStanding { until: Option<Tick>, done: bool },
    /// Sit still, optionally until a deadline.
    IdleSitting { until: Option<Tick>, done: bool },
    /// Step onto the chair point, then sit facing `facing`.
    SittingDown { chair: Point, facing: Direction },
    /// Step off the chair back to `target`, then stand.
    StandingUp { target: Point },
    Eating(Consume),
    Drinking(Consume),
}

impl ActionState {
    pub fn walking(walk: WalkPath) -> Self {
        ActionState::Walking(walk)
    }

    pub fn idle_standing() -> Self {
        ActionState::IdleStanding { until: None, done: false }
    }

    pub fn idle_standing_until(until: Tick) -> Self {
        ActionState::IdleStanding { until: Some(until), done: false }
    }

    pub fn idle_sitting() -> Self {
        ActionState::IdleSitting { until: None, done: false }
    }

    pub fn idle_sitting_until(until: Tick) -> Self {
        ActionState::IdleSitting { until: Some(until), done: false }
    }

    pub fn sitting_down(chair: Point, facing: Direction) -> Self {
        ActionState::SittingDown { chair, facing }
    }

    pub fn standing_up(target: Point) -> Self {
        ActionState::StandingUp { target }
    }

    pub fn eating() -> Self {
        ActionState::Eating(Consume::new(EAT_LOOPS))
    }

    pub fn drinking() -> Self {
        ActionState::Drinking(Consume::new(DRINK_LOOPS))
    }

    pub fn kind(&self) -> ActionKind {
        match self {
            ActionState::Walking(_) => ActionKind::Walking,
            ActionState::IdleStanding { .. } => ActionKind::IdleStanding,
            ActionState::IdleSitting { .. } => ActionKind::IdleSitting,
            ActionState::SittingDown { .. } => ActionKind::SittingDown,
            ActionState::StandingUp { .. } => ActionKind::StandingUp,
            ActionState::Eating(_) => ActionKind::Eating,
            ActionState::Drinking(_) => ActionKind::Drinking,
        }
    }

    /// Whether the action has finished.  Sitting down and standing up never
    /// report done; they replace themselves instead.
    pub fn is_done(&self) -> bool {
        match self {
            ActionState::Walking(walk) => walk.has_reached_goal(),
            ActionState::IdleStanding { done, .. } | ActionState::IdleSitting { done, .. } => *done,
            ActionState::SittingDown { .. } | ActionState::StandingUp { .. } => false,
            ActionState::Eating(c) | ActionState::Drinking(c) => c.is_done(),
        }
    }

    /// Collect the loop boundaries reached since the last call.
    pub fn take_cycles(&mut self) -> u32 {
        match self {
            ActionState::Eating(c) | ActionState::Drinking(c) => std::mem::take(&mut c.pending_cycles),
            _ => 0,
        }
    }

    pub fn walk_path(&self) -> Option<&WalkPath> {
        match self {
            ActionState::Walking(walk) => Some(walk),
            _ => None,
        }
    }

    /// One-shot setup when the action becomes active.
    pub fn init(&mut self, body: &mut Body, ctx: &mut ActionCtx<'_>) -> ActorResult<()> {
        let anim = match self {
            ActionState::Walking(walk) => {
                body.pos = walk.pos();
                body.facing = walk.facing().unwrap_or(body.facing);
                Animation::Walk(body.facing)
            }
            ActionState::IdleStanding { .. } => Animation::Stand(body.facing),
            ActionState::IdleSitting { .. } => Animation::Sit(body.facing),
            ActionState::SittingDown { chair, facing } => {
                body.facing = facing_toward(body.pos, *chair).unwrap_or(*facing);
                Animation::Walk(body.facing)
            }
            ActionState::StandingUp { target } => {
                body.facing = facing_toward(body.pos, *target).unwrap_or(body.facing);
                Animation::Walk(body.facing)
            }
            ActionState::Eating(_) => Animation::Eat,
            ActionState::Drinking(_) => Animation::Drink,
        };
        ctx.animator.play(body.id, &anim)
    }

    /// Per-tick advance.  Returns the successor when the action replaces
    /// itself.
    pub fn update(
        &mut self,
        body: &mut Body,
        ctx:  &mut ActionCtx<'_>,
    ) -> ActorResult<Option<ActionState>> {
        match self {
            ActionState::Walking(walk) => {
                if walk.has_reached_goal() {
                    return Ok(None);
                }
                walk.update();
                body.pos = walk.pos();
                if let Some(facing) = walk.facing() {
                    if facing != body.facing {
                        body.facing = facing;
                        ctx.animator.play(body.id, &Animation::Walk(facing))?;
                    }
                }
            }
            ActionState::IdleStanding { until, done } | ActionState::IdleSitting { until, done } => {
                if !*done && until.is_some_and(|t| ctx.now >= t) {
                    *done = true;
                }
            }
            ActionState::SittingDown { chair, facing } => {
                body.pos = approach(body.pos, *chair);
                if body.pos == *chair {
                    body.facing = *facing;
                    return Ok(Some(ActionState::idle_sitting()));
                }
            }
            ActionState::StandingUp { target } => {
                body.pos = approach(body.pos, *target);
                if body.pos == *target {
                    return Ok(Some(ActionState::idle_standing()));
                }
            }
            ActionState::Eating(c) => c.update(body, &Animation::Eat, ctx)?,
            ActionState::Drinking(c) => c.update(body, &Animation::Drink, ctx)?,
        }
        Ok(None)
    }
}
