use std::cell::{Ref, RefCell};
use std::rc::Rc;

use log::{debug, info, warn};
use rhai::packages::{CorePackage, Package};
use rhai::{Engine, EvalAltResult};
use serde::Serialize;

use crate::config::script::{
    MAX_ARRAY_SIZE, MAX_CALL_LEVELS, MAX_EXPR_DEPTH, MAX_FN_EXPR_DEPTH, MAX_OPERATIONS,
    MAX_STRING_SIZE,
};
use crate::error::{BlitError, ScriptError};
use crate::game::events::Event;
use crate::game::state::GameState;
use crate::game::types::Status;
use crate::playback::SpeedChange;
use crate::script::bindings::{direction_scope, register_api, ScriptWorld, BOUND_FUNCTIONS};

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub events: usize,
    pub status: Status,
    pub marked: usize,
    pub goals: usize,
}

/// Runs user scripts against a game, collecting the events of each run.
pub struct Interpreter {
    engine: Engine,
    state: Rc<RefCell<GameState>>,
    speed_changes: Rc<RefCell<Vec<SpeedChange>>>,
    events: Vec<Event>,
}

impl Interpreter {
    pub fn new(state: GameState) -> Self {
        let state = Rc::new(RefCell::new(state));
        let speed_changes = Rc::new(RefCell::new(Vec::new()));
        let mut engine = Engine::new_raw();
        engine.register_global_module(CorePackage::new().as_shared_module());
        engine
            .set_max_operations(MAX_OPERATIONS)
            .set_max_call_levels(MAX_CALL_LEVELS)
            .set_max_expr_depths(MAX_EXPR_DEPTH, MAX_FN_EXPR_DEPTH)
            .set_max_string_size(MAX_STRING_SIZE)
            .set_max_array_size(MAX_ARRAY_SIZE);
        engine.disable_symbol("eval");
        engine.on_print(|text| info!("[Script] {}", text));
        engine.on_debug(|text, _source, position| debug!("[Script] {} @ {}", text, position));
        register_api(
            &mut engine,
            &ScriptWorld::new(state.clone(), speed_changes.clone()),
        );

        Self {
            engine,
            state,
            speed_changes,
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> Ref<'_, GameState> {
        self.state.borrow()
    }

    /// Events of the last run (or of the last host-side reset).
    #[cfg(test)]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// Speeds set by the last run, keyed by the index of the first event they apply to.
    pub fn take_speed_changes(&mut self) -> Vec<SpeedChange> {
        std::mem::take(&mut *self.speed_changes.borrow_mut())
    }

    /// Run `source` to completion. On failure the game keeps every effect of the
    /// primitives that completed, and their events stay available via `events()`.
    pub fn run(&mut self, source: &str) -> Result<RunSummary, BlitError> {
        self.state.borrow_mut().begin_run();
        self.speed_changes.borrow_mut().clear();
        info!("[Script] Run started ({} bytes)", source.len());

        let mut scope = direction_scope();
        let result = self.engine.run_with_scope(&mut scope, source);

        let mut state = self.state.borrow_mut();
        state.end_run();
        self.events = state.take_events();
        let summary = RunSummary {
            events: self.events.len(),
            status: state.status(),
            marked: state.grid().marked_count(),
            goals: state.grid().goal_count(),
        };

        match result {
            Ok(()) => {
                info!(
                    "[Script] Run finished: {} events, status {:?}, goals {}/{}",
                    summary.events, summary.status, summary.marked, summary.goals
                );
                Ok(summary)
            }
            Err(err) => {
                let error = into_blit_error(err);
                warn!(
                    "[Script] Run aborted after {} events: {}",
                    summary.events, error
                );
                Err(error)
            }
        }
    }

    /// Reset the game from the host, outside of any script.
    pub fn reset(&mut self) -> &[Event] {
        let mut state = self.state.borrow_mut();
        state.reset();
        self.events = state.take_events();
        &self.events
    }
}

/// Map an engine failure to the crate error it stands for.
fn into_blit_error(err: Box<EvalAltResult>) -> BlitError {
    match *err {
        EvalAltResult::ErrorRuntime(value, _) if value.is::<BlitError>() => value.cast::<BlitError>(),
        EvalAltResult::ErrorInFunctionCall(_, _, inner, _) => into_blit_error(inner),
        EvalAltResult::ErrorFunctionNotFound(signature, _) => {
            let name = signature
                .split(|c: char| c == ' ' || c == '(')
                .next()
                .unwrap_or_default()
                .to_string();
            if BOUND_FUNCTIONS.contains(&name.as_str()) {
                ScriptError::BadArguments { name, signature }.into()
            } else {
                ScriptError::UnboundName { name }.into()
            }
        }
        EvalAltResult::ErrorVariableNotFound(name, _) => ScriptError::UnboundName { name }.into(),
        EvalAltResult::ErrorParsing(kind, position) => ScriptError::Syntax {
            message: kind.to_string(),
            line: position.line(),
        }
        .into(),
        EvalAltResult::ErrorTooManyOperations(_)
        | EvalAltResult::ErrorStackOverflow(_)
        | EvalAltResult::ErrorDataTooLarge(..) => ScriptError::BudgetExhausted.into(),
        other => ScriptError::Runtime {
            message: other.to_string(),
        }
        .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::direction::Direction;
    use crate::game::events::EventKind;
    use crate::game::level::Level;
    use crate::game::types::Position;
    use crate::playback::Speed;
    use test_log::test;

    fn interpreter(cols: usize, rows: usize, layout: &str, direction: Direction) -> Interpreter {
        let level = Level::new(cols, rows, layout, Position::new(0, 0), direction).unwrap();
        Interpreter::new(GameState::new(&level))
    }

    fn kinds(events: &[Event]) -> Vec<EventKind> {
        events.iter().map(Event::kind).collect()
    }

    #[test]
    fn scenario_walks_to_the_goal_and_wins() {
        let mut interpreter = interpreter(3, 3, "--o------", Direction::North);
        let summary = interpreter
            .run(r#"move(2, "EAST"); move(2, "NORTH"); mark();"#)
            .unwrap();

        assert_eq!(
            kinds(interpreter.events()),
            vec![
                EventKind::Move,
                EventKind::Move,
                EventKind::Move,
                EventKind::Move,
                EventKind::Mark,
                EventKind::GoalReached,
                EventKind::Win,
            ]
        );
        assert_eq!(interpreter.state().position(), Position::new(2, 2));
        assert_eq!(summary.status, Status::Won);
        assert_eq!(summary.marked, 1);
    }

    #[test]
    fn constants_loops_and_sensing_are_available() {
        let mut interpreter = interpreter(4, 1, "---#", Direction::East);
        interpreter
            .run(
                r#"
                for i in range(10) {
                    if senseSolid(FORWARD) { break; }
                    move();
                }
                turn(LEFT);
                turn();
                "#,
            )
            .unwrap();
        let state = interpreter.state();
        assert_eq!(state.position(), Position::new(2, 0));
        assert_eq!(state.direction(), Direction::East);
    }

    #[test]
    fn each_run_starts_a_fresh_event_list() {
        let mut interpreter = interpreter(3, 1, "---", Direction::East);
        interpreter.run("move(1);").unwrap();
        interpreter.run("turn(BACK);").unwrap();
        assert_eq!(kinds(interpreter.events()), vec![EventKind::Turn]);
        assert_eq!(interpreter.state().position(), Position::new(1, 0));
    }

    #[test]
    fn unknown_function_is_an_unbound_name() {
        let mut interpreter = interpreter(1, 1, "-", Direction::North);
        assert_eq!(
            interpreter.run("jump(3);"),
            Err(BlitError::Script(ScriptError::UnboundName {
                name: "jump".to_string()
            }))
        );
        assert_eq!(
            interpreter.run("move(1, UP);"),
            Err(BlitError::Script(ScriptError::UnboundName {
                name: "UP".to_string()
            }))
        );
    }

    #[test]
    fn wrong_argument_types_name_the_primitive() {
        let mut interpreter = interpreter(1, 1, "-", Direction::North);
        let err = interpreter.run(r#"move("far");"#).unwrap_err();
        assert!(
            matches!(&err, BlitError::Script(ScriptError::BadArguments { name, .. }) if name == "move"),
            "{err:?}"
        );
    }

    #[test]
    fn invalid_direction_names_keep_their_kind() {
        let mut interpreter = interpreter(3, 1, "---", Direction::East);
        let err = interpreter.run(r#"move(1); turn("UPWARDS"); move(1);"#).unwrap_err();
        assert_eq!(err, BlitError::InvalidDirection("UPWARDS".to_string()));
        // the first move stays applied and its event stays available
        assert_eq!(interpreter.state().position(), Position::new(1, 0));
        assert_eq!(kinds(interpreter.events()), vec![EventKind::Move]);
        assert_eq!(interpreter.state().status(), Status::Ready);
    }

    #[test]
    fn errors_inside_script_functions_are_unwrapped() {
        let mut interpreter = interpreter(1, 1, "-", Direction::North);
        let err = interpreter
            .run(r#"fn spin(d) { turn(d) } spin("AROUND");"#)
            .unwrap_err();
        assert_eq!(err, BlitError::InvalidDirection("AROUND".to_string()));
    }

    #[test]
    fn endless_scripts_exhaust_the_budget() {
        let mut interpreter = interpreter(2, 1, "--", Direction::East);
        assert_eq!(
            interpreter.run("loop { turn(); }"),
            Err(BlitError::Script(ScriptError::BudgetExhausted))
        );
        assert_eq!(
            interpreter.run("fn f(n) { f(n + 1) } f(0);"),
            Err(BlitError::Script(ScriptError::BudgetExhausted))
        );
    }

    #[test]
    fn eval_is_not_available() {
        let mut interpreter = interpreter(1, 1, "-", Direction::North);
        assert!(matches!(
            interpreter.run(r#"eval("mark()");"#),
            Err(BlitError::Script(ScriptError::Syntax { .. }))
        ));
    }

    #[test]
    fn syntax_errors_report_a_line() {
        let mut interpreter = interpreter(1, 1, "-", Direction::North);
        let err = interpreter.run("move(1);\nmove(1 2);").unwrap_err();
        assert!(
            matches!(err, BlitError::Script(ScriptError::Syntax { line: Some(2), .. })),
            "{err:?}"
        );
    }

    #[test]
    fn set_speed_is_recorded_against_the_next_event() {
        let mut interpreter = interpreter(3, 1, "---", Direction::East);
        interpreter
            .run("move(1); setSpeed(50); move(1); setSpeed(2.5);")
            .unwrap();
        let changes = interpreter.take_speed_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!((changes[0].at, changes[0].speed.value()), (1, 50.0));
        assert_eq!((changes[1].at, changes[1].speed.value()), (2, 2.5));

        assert_eq!(
            interpreter.run("setSpeed(0);"),
            Err(BlitError::InvalidSpeed(0.0))
        );
        assert!(interpreter.take_speed_changes().is_empty());
    }

    #[test]
    fn script_reset_restores_the_default_speed() {
        let mut interpreter = interpreter(3, 1, "---", Direction::East);
        interpreter
            .run("setSpeed(50); move(1); reset(); move(1);")
            .unwrap();
        let changes = interpreter.take_speed_changes();
        assert_eq!(changes.len(), 2);
        assert_eq!((changes[0].at, changes[0].speed.value()), (0, 50.0));
        // applies from the move after the reset event
        assert_eq!(changes[1].at, 2);
        assert_eq!(changes[1].speed, Speed::default());
    }

    #[test]
    fn host_reset_reports_a_reset_event() {
        let mut interpreter = interpreter(2, 1, "-o", Direction::East);
        interpreter.run("move(1); mark();").unwrap();
        assert_eq!(interpreter.state().status(), Status::Won);
        let events = interpreter.reset().to_vec();
        assert_eq!(
            events,
            vec![Event::Reset {
                position: Position::new(0, 0),
                direction: Direction::East
            }]
        );
        assert_eq!(interpreter.state().status(), Status::Ready);
        assert_eq!(interpreter.state().grid().marked_count(), 0);
    }
}
