//! The rendering collaborator contract.
//!
//! The simulation never touches pixels or frame timing.  It asks an
//! [`Animator`] to play a named animation for an actor and later asks
//! whether that animation is still playing; eating and drinking count loops
//! that way.  [`ClockAnimator`] is the headless implementation used by the
//! simulation and its tests.

use rustc_hash::FxHashMap;

use bistro_core::{ActorId, Direction, Tick};

use crate::{ActorError, ActorResult};

// ── Animation ─────────────────────────────────────────────────────────────────

/// A named animation.  Directional ones carry the facing.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Animation {
    Walk(Direction),
    Stand(Direction),
    Sit(Direction),
    Eat,
    Drink,
}

impl Animation {
    /// Registry key, e.g. `"walk-up"`, `"sit-down-left"`, `"eat"`.
    pub fn key(&self) -> String {
        match self {
            Animation::Walk(dir) => format!("walk-{}", dir.label()),
            Animation::Stand(dir) => format!("stand-{}", dir.label()),
            Animation::Sit(dir) => format!("sit-{}", dir.label()),
            Animation::Eat => "eat".to_owned(),
            Animation::Drink => "drink".to_owned(),
        }
    }
}

// ── Animator trait ────────────────────────────────────────────────────────────

/// Plays and reports on per-actor animations.
pub trait Animator {
    /// Start (or restart) `anim` for `actor`.
    ///
    /// Fails with [`ActorError::UnknownAnimation`] if the key is not
    /// registered.
    fn play(&mut self, actor: ActorId, anim: &Animation) -> ActorResult<()>;

    /// `true` while `anim` is the actor's current animation and has not run
    /// out.  Looping animations never run out.
    fn is_playing(&self, actor: ActorId, anim: &Animation) -> bool;

    /// Called once at the start of every tick.
    fn advance(&mut self, _now: Tick) {}

    /// Drop any state held for `actor` (it left the scene).
    fn forget(&mut self, _actor: ActorId) {}
}

// ── ClockAnimator ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
struct Playing {
    key:     String,
    started: Tick,
    length:  u64,
}

/// Headless animator: every animation key maps to a loop length in ticks.
///
/// A length of 0 loops forever (walk, stand and sit cycles); a positive
/// length plays once and then reports not playing (eat and drink loops).
#[derive(Debug, Clone, Default)]
pub struct ClockAnimator {
    lengths: FxHashMap<String, u64>,
    playing: FxHashMap<ActorId, Playing>,
    now:     Tick,
}

impl ClockAnimator {
    /// An animator with nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard set: looping walk/stand/sit in all eight facings plus
    /// one-shot `eat` and `drink` of the given lengths.
    ///
    /// Both lengths must be positive; a zero would loop forever.
    pub fn with_defaults(eat_ticks: u64, drink_ticks: u64) -> ActorResult<Self> {
        let mut animator = Self::new();
        for dir in Direction::ALL {
            animator.register(Animation::Walk(dir).key(), 0);
            animator.register(Animation::Stand(dir).key(), 0);
            animator.register(Animation::Sit(dir).key(), 0);
        }
        for (anim, length) in [(Animation::Eat, eat_ticks), (Animation::Drink, drink_ticks)] {
            if length == 0 {
                return Err(ActorError::ZeroLength(anim.key()));
            }
            animator.register(anim.key(), length);
        }
        Ok(animator)
    }

    /// Register or replace `key` with a loop length in ticks.
    pub fn register(&mut self, key: impl Into<String>, length: u64) {
        self.lengths.insert(key.into(), length);
    }

    /// Key of the animation the actor is currently showing.
    pub fn current(&self, actor: ActorId) -> Option<&str> {
        self.playing.get(&actor).map(|p| p.key.as_str())
    }

    pub fn now(&self) -> Tick {
        self.now
    }
}

impl Animator for ClockAnimator {
    fn play(&mut self, actor: ActorId, anim: &Animation) -> ActorResult<()> {
        let key = anim.key();
        let length = *self
            .lengths
            .get(&key)
            .ok_or_else(|| ActorError::UnknownAnimation(key.clone()))?;
        self.playing.insert(actor, Playing { key, started: self.now, length });
        Ok(())
    }

    fn is_playing(&self, actor: ActorId, anim: &Animation) -> bool {
        let Some(p) = self.playing.get(&actor) else {
            return false;
        };
        p.key == anim.key() && (p.length == 0 || self.now.since(p.started) < p.length)
    }

    fn advance(&mut self, now: Tick) {
        self.now = now;
    }

    fn forget(&mut self, actor: ActorId) {
        self.playing.remove(&actor);
    }
}
