//! Primitive bindings exposed to scripts.
//!
//! Each binding borrows the shared game state for the duration of one primitive call,
//! so direction names always resolve against the heading at the moment of the call.

use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;

use rhai::{Dynamic, Engine, EvalAltResult, ImmutableString, Position, Scope, FLOAT, INT};

use crate::error::BlitError;
use crate::game::direction::{self, Bearing, Direction};
use crate::game::state::GameState;
use crate::playback::{Speed, SpeedChange};

pub(crate) type ScriptResult<T> = Result<T, Box<EvalAltResult>>;

/// Every function a script may call.
pub const BOUND_FUNCTIONS: [&str; 8] = [
    "turn",
    "move",
    "senseSolid",
    "senseMarked",
    "mark",
    "reset",
    "setSpeed",
    "range",
];

const DEFAULT_TURN: &str = "RIGHT";
const DEFAULT_BEARING: &str = "FORWARD";

/// Handle on the game state given to every bound primitive.
#[derive(Clone)]
pub(crate) struct ScriptWorld {
    state: Rc<RefCell<GameState>>,
    speed_changes: Rc<RefCell<Vec<SpeedChange>>>,
}

impl ScriptWorld {
    pub(crate) fn new(
        state: Rc<RefCell<GameState>>,
        speed_changes: Rc<RefCell<Vec<SpeedChange>>>,
    ) -> Self {
        Self {
            state,
            speed_changes,
        }
    }

    /// Concrete heading for a direction name, against the heading at this call.
    fn resolve(&self, name: &str) -> ScriptResult<Direction> {
        let current = self.state.borrow().direction();
        direction::resolve(name, current).map_err(raise)
    }

    fn turn(&self, direction: &str) -> ScriptResult<()> {
        let target = self.resolve(direction)?;
        self.state.borrow_mut().turn_to(target);
        Ok(())
    }

    fn move_by(&self, steps: INT, direction: &str) -> ScriptResult<INT> {
        let target = self.resolve(direction)?;
        let taken = self.state.borrow_mut().move_by(target, steps);
        Ok(taken as INT)
    }

    fn sense_solid(&self, direction: &str) -> ScriptResult<bool> {
        let target = self.resolve(direction)?;
        Ok(self.state.borrow_mut().sense_solid(target))
    }

    fn sense_marked(&self, direction: &str) -> ScriptResult<bool> {
        let target = self.resolve(direction)?;
        Ok(self.state.borrow_mut().sense_marked(target))
    }

    fn mark(&self) -> bool {
        self.state.borrow_mut().mark()
    }

    /// A reset also puts playback back to the default speed.
    fn reset(&self) {
        let mut state = self.state.borrow_mut();
        state.reset();
        self.speed_changes.borrow_mut().push(SpeedChange {
            at: state.events().len(),
            speed: Speed::default(),
        });
    }

    /// Applies to the animations of every event emitted after this call.
    fn set_speed(&self, value: FLOAT) -> ScriptResult<()> {
        let speed = Speed::new(value).map_err(raise)?;
        let at = self.state.borrow().events().len();
        self.speed_changes
            .borrow_mut()
            .push(SpeedChange { at, speed });
        Ok(())
    }
}

/// Carry a crate error through the engine; the interpreter unwraps it afterwards.
pub(crate) fn raise(error: BlitError) -> Box<EvalAltResult> {
    EvalAltResult::ErrorRuntime(Dynamic::from(error), Position::NONE).into()
}

fn range(n: INT) -> Range<INT> {
    0..n.max(0)
}

/// Bind the primitives into `engine`, including the default-argument overloads.
pub(crate) fn register_api(engine: &mut Engine, world: &ScriptWorld) {
    let w = world.clone();
    engine.register_fn("turn", move || w.turn(DEFAULT_TURN));
    let w = world.clone();
    engine.register_fn("turn", move |direction: ImmutableString| w.turn(direction.as_str()));

    let w = world.clone();
    engine.register_fn("move", move || w.move_by(1, DEFAULT_BEARING));
    let w = world.clone();
    engine.register_fn("move", move |steps: INT| w.move_by(steps, DEFAULT_BEARING));
    let w = world.clone();
    engine.register_fn("move", move |steps: INT, direction: ImmutableString| {
        w.move_by(steps, direction.as_str())
    });

    let w = world.clone();
    engine.register_fn("senseSolid", move || w.sense_solid(DEFAULT_BEARING));
    let w = world.clone();
    engine.register_fn("senseSolid", move |direction: ImmutableString| {
        w.sense_solid(direction.as_str())
    });

    let w = world.clone();
    engine.register_fn("senseMarked", move || w.sense_marked(DEFAULT_BEARING));
    let w = world.clone();
    engine.register_fn("senseMarked", move |direction: ImmutableString| {
        w.sense_marked(direction.as_str())
    });

    let w = world.clone();
    engine.register_fn("mark", move || w.mark());
    let w = world.clone();
    engine.register_fn("reset", move || w.reset());

    let w = world.clone();
    engine.register_fn("setSpeed", move |speed: INT| w.set_speed(speed as FLOAT));
    let w = world.clone();
    engine.register_fn("setSpeed", move |speed: FLOAT| w.set_speed(speed));

    engine.register_fn("range", range);
}

/// Scope holding the direction names as constants.
pub(crate) fn direction_scope() -> Scope<'static> {
    let mut scope = Scope::new();
    for name in Bearing::NAMES {
        scope.push_constant(name, ImmutableString::from(name));
    }
    scope
}
