//! Behavior suite for the effects and combinators, as seen by a library user.

use composad::effects::{maybe, Maybe};
use composad::pipeline::{echo, equal, pipe, pipe_if, pipe_if_else, pipe_switch, step, Stage};
use composad::{Composad, Effect, Monad};
use serde_json::{json, Value};
use std::collections::HashMap;

mod composad_stack {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_stack_applies_step() {
        let stack = Composad::new();
        let get_result_string = |_: Value| -> composad::Result<Value> { Ok(json!("correct result")) };

        let pipeline = composad::pipe!(stack.binder(get_result_string));
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct result"));
    }
}

mod maybe_effect {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_untagged_record_has_value() {
        assert!(maybe::has_value(&json!({ "value": 1 })));
    }

    #[test]
    fn test_unit_record_has_value() {
        assert!(maybe::has_value(&Effect::maybe().unit(json!(1))));
    }

    #[test]
    fn test_bind_returns_step_output() {
        let result = Effect::maybe()
            .bind(&|i| Ok(json!({ "value": i })), Maybe::unit(json!(1)).into())
            .unwrap();

        assert_eq!(result["value"], json!(1));
        assert!(result.get("hasValue").is_none());
    }

    #[test]
    fn test_bind_returns_absent_step_output() {
        let result = Effect::maybe()
            .bind(&|_| Ok(json!({ "hasValue": false })), Maybe::unit(json!(1)).into())
            .unwrap();

        assert_eq!(result["hasValue"], json!(false));
        assert!(result.get("value").is_none());
    }
}

mod writer_effect {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_unit_starts_with_empty_logs() {
        assert_eq!(Effect::writer().unit(json!(1)), json!({ "value": 1, "logs": {} }));
    }

    #[test]
    fn test_bind_preserves_existing_logs() {
        let result = Effect::writer()
            .bind(
                &|_| Ok(json!({ "value": 1, "logs": {} })),
                json!({ "value": 1, "logs": { "preserved": ["yes"] } }),
            )
            .unwrap();

        assert_eq!(result, json!({ "value": 1, "logs": { "preserved": ["yes"] } }));
    }

    #[test]
    fn test_bind_concatenates_channels() {
        let result = Effect::writer()
            .bind(
                &|_| Ok(json!({ "value": 1, "logs": { "log": ["two"] } })),
                json!({ "value": 1, "logs": { "log": ["one"] } }),
            )
            .unwrap();

        assert_eq!(result, json!({ "value": 1, "logs": { "log": ["one", "two"] } }));
    }
}

mod pipe_if_combinator {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepting_guard_runs_stages() {
        let stage = pipe_if(|_| true, vec![step(|_| json!("hey"))]);
        assert_eq!(stage.execute(Value::Null).unwrap(), json!("hey"));
    }

    #[test]
    fn test_runs_in_chain_when_equal() {
        let pipeline = pipe(vec![
            echo(json!("asdf")),
            pipe_if(equal(json!("asdf")), vec![echo(json!("correct"))]),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct"));
    }

    #[test]
    fn test_passes_through_in_chain_when_not_equal() {
        let pipeline = pipe(vec![
            echo(json!("asdf")),
            pipe_if(equal(json!("not equal")), vec![echo(json!("correct"))]),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("asdf"));
    }
}

mod pipe_if_else_combinator {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_accepting_guard_runs_true_branch() {
        let stage = pipe_if_else(
            |_| true,
            vec![step(|_| json!("hey"))],
            vec![step(|_| Value::Null)],
        );
        assert_eq!(stage.execute(Value::Null).unwrap(), json!("hey"));
    }

    #[test]
    fn test_rejecting_guard_runs_false_branch() {
        let stage = pipe_if_else(
            |_| false,
            vec![step(|_| Value::Null)],
            vec![step(|_| json!("other"))],
        );
        assert_eq!(stage.execute(Value::Null).unwrap(), json!("other"));
    }

    #[test]
    fn test_true_branch_in_chain() {
        let pipeline = pipe(vec![
            echo(json!("asdf")),
            pipe_if_else(
                equal(json!("asdf")),
                vec![echo(json!("correct"))],
                vec![echo(json!("incorrect"))],
            ),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct"));
    }

    #[test]
    fn test_false_branch_in_chain() {
        let pipeline = pipe(vec![
            echo(json!("asdf")),
            pipe_if_else(
                equal(json!("not equal")),
                vec![echo(json!("incorrect"))],
                vec![echo(json!("correct"))],
            ),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct"));
    }
}

mod pipe_switch_combinator {
    use super::*;
    use pretty_assertions::assert_eq;
    use composad::BoxedStage;

    fn cases<'a>(
        one: BoxedStage<'a, Value>,
        two: BoxedStage<'a, Value>,
    ) -> HashMap<&'static str, Vec<BoxedStage<'a, Value>>> {
        HashMap::from([("one", vec![one]), ("two", vec![two])])
    }

    #[test]
    fn test_selects_first_case() {
        let stage = pipe_switch(
            |_| "one",
            cases(step(|_| json!("hey")), step(|_| Value::Null)),
        );
        assert_eq!(stage.execute(Value::Null).unwrap(), json!("hey"));
    }

    #[test]
    fn test_selects_second_case() {
        let stage = pipe_switch(
            |_| "two",
            cases(step(|_| Value::Null), step(|_| json!("hey"))),
        );
        assert_eq!(stage.execute(Value::Null).unwrap(), json!("hey"));
    }

    #[test]
    fn test_selects_case_in_chain() {
        let pipeline = pipe(vec![
            echo(json!("one")),
            pipe_switch(
                |_| "one",
                cases(echo(json!("correct")), echo(json!("incorrect"))),
            ),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct"));
    }

    #[test]
    fn test_passes_through_without_match() {
        let pipeline = pipe(vec![
            echo(json!("correct")),
            pipe_switch(|_| "no match", cases(echo(json!("one")), echo(json!("two")))),
        ]);
        assert_eq!(pipeline.execute(Value::Null).unwrap(), json!("correct"));
    }
}
