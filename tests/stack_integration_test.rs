//! End-to-end use of an effect stack driven from inside a pipeline.

use composad::config::ComposadConfig;
use composad::effects::{Logged, Maybe, Signal, StepFn};
use composad::pipeline::{pipe_if_else, step, try_step, PipelineBuilder, Stage};
use composad::testkit::{RecordingSink, Spy};
use composad::{
    assert_absent, assert_contains_error, assert_present, assert_stage_error, make_wrap_with_sink,
    Composad, ComposadError, Effect, Monad, Result,
};
use indoc::indoc;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn increment(v: Value) -> Result<Value> {
    Ok(json!(v.as_i64().unwrap_or_default() + 1))
}

/// Boxes values in a one-element array.
struct Boxed;

impl Monad for Boxed {
    fn unit(&self, value: Value) -> Value {
        json!([value])
    }

    fn bind(&self, step: StepFn<'_>, wrapped: Value) -> Result<Value> {
        match wrapped {
            Value::Array(mut items) if items.len() == 1 => step(items.remove(0)),
            other => Err(ComposadError::malformed("boxed", format!("{} is not boxed", other))),
        }
    }
}

#[test]
fn test_pipeline_grows_binds_and_shrinks_the_stack() {
    let stack = Composad::new();

    let pipeline = composad::pipe!(
        stack.add_monad(Effect::maybe()),
        stack.add_monad(Effect::writer().removable()),
        step(|_| stack.unit(json!(1))),
        stack.binder(increment),
        stack.binder(increment),
        stack.remover(),
    );

    let out = pipeline.execute(json!(0)).unwrap();

    assert_eq!(out, json!({ "value": { "hasValue": true, "value": 3 }, "logs": {} }));
    assert_eq!(stack.effect_names(), vec!["maybe"]);
}

#[test]
fn test_removing_a_permanent_effect_fails_the_pipeline() {
    let stack = Composad::new();

    let pipeline = composad::pipe!(stack.add_monad(Effect::writer()), stack.remover());

    let err = assert_stage_error!(pipeline.execute(json!(1)), "remove_monad");
    assert_eq!(err, ComposadError::removal_refused("makeWriter"));
    assert_eq!(stack.len(), 1);
}

#[test]
fn test_absent_values_skip_every_later_step() {
    let stack = Composad::new();
    stack.add_monad(Effect::maybe()).execute(Value::Null).unwrap();
    let spy = Spy::new(increment);

    let pipeline = composad::pipe!(
        stack.binder(|_| Ok(Value::Null)),
        stack.binder(spy.step()),
        stack.binder(spy.step()),
    );

    let out = pipeline.execute(stack.unit(json!(1))).unwrap();
    assert_absent!(out);
    assert_eq!(spy.calls(), 0);
}

#[test]
fn test_logs_accumulate_under_a_present_value() {
    let stack = Composad::new();
    stack.add_monad(Effect::writer()).execute(Value::Null).unwrap();
    stack.add_monad(Effect::maybe()).execute(Value::Null).unwrap();

    let seeded = Maybe::unit(Logged::unit(json!(2)).with_log("steps", "seeded").into());
    let out = stack.bind(increment, seeded.into()).unwrap();

    let logged = Logged::from_value(assert_present!(out)).unwrap();
    assert_eq!(logged.value, json!(3));
    assert_eq!(logged.channel("steps"), vec![json!("seeded")]);
}

#[test]
fn test_result_signal_stops_stepping() {
    let stack = Composad::new();
    stack.add_monad(Effect::result()).execute(Value::Null).unwrap();
    let spy = Spy::new(increment);

    let carried = stack.bind(spy.step(), Signal::carry(json!(1)).into()).unwrap();
    assert_eq!(carried, json!({ "type": "carry", "value": 2 }));

    let finished = stack.bind(spy.step(), Signal::result(json!(7)).into()).unwrap();
    assert_eq!(finished, json!(7));
    assert_eq!(spy.calls(), 1);
}

#[test]
fn test_wrap_layer_reports_and_never_steps() {
    let recorder = RecordingSink::new();
    let stack = Composad::new();
    stack
        .add_monad(make_wrap_with_sink("audit", recorder.sink()))
        .execute(Value::Null)
        .unwrap();
    let spy = Spy::new(increment);

    let out = stack.bind(spy.step(), stack.unit(json!(5))).unwrap();

    assert_eq!(out, json!({ "id": "audit", "val": 5 }));
    assert_eq!(recorder.values(), vec![json!({ "id": "audit", "val": 5 })]);
    assert_eq!(spy.calls(), 0);
}

#[test]
fn test_custom_effect_stacks_with_builtins() {
    let stack = Composad::new();
    stack.add_monad(Effect::maybe()).execute(Value::Null).unwrap();
    stack
        .add_monad(Effect::custom("boxed", Boxed).removable())
        .execute(Value::Null)
        .unwrap();

    let wrapped = stack.unit(json!(1));
    assert_eq!(wrapped, json!([{ "hasValue": true, "value": 1 }]));

    let out = stack.bind(increment, wrapped).unwrap();
    assert_eq!(out, json!([{ "hasValue": true, "value": 2 }]));

    let err = stack.bind(increment, json!("loose"));
    assert_contains_error!(err, "malformed boxed value");

    stack.remove_monad(Value::Null).unwrap();
    assert_eq!(stack.effect_names(), vec!["maybe"]);
}

#[test]
fn test_mis_shaped_values_fail_loudly() {
    let stack = Composad::new();
    stack.add_monad(Effect::writer()).execute(Value::Null).unwrap();

    let err = stack.bind(increment, json!({ "value": 1 })).unwrap_err();
    assert_eq!(err.category(), "Shape");
}

#[test]
fn test_tee_inside_a_branch() {
    let recorder = RecordingSink::new();
    let stack = Composad::new().with_sink(recorder.sink());
    stack.add_monad(Effect::maybe()).execute(Value::Null).unwrap();

    let pipeline = pipe_if_else(
        |v: &Value| v.is_number(),
        vec![step(|v| stack.tee(v))],
        vec![try_step(|_| Err::<Value, _>("not a number"))],
    );

    assert_eq!(
        pipeline.execute(json!(4)).unwrap(),
        json!({ "hasValue": true, "value": 4 })
    );
    assert_eq!(recorder.values(), vec![json!({ "hasValue": true, "value": 4 })]);

    let err = assert_stage_error!(pipeline.execute(json!("x")), "try_step");
    assert_eq!(err, ComposadError::other("not a number"));
}

#[test]
fn test_config_selects_strict_absence_and_depth() {
    let config = ComposadConfig::from_toml_str(indoc! {r#"
        [stack]
        max_depth = 2

        [absence]
        accept_untagged = false
    "#})
    .unwrap();
    composad::validate_config_result(&config).unwrap();

    let stack = Composad::with_config(config.clone());
    let pipeline = PipelineBuilder::new()
        .stage(stack.add_monad(Effect::maybe()))
        .stage(stack.add_monad(Effect::writer()))
        .build();
    pipeline.execute(Value::Null).unwrap();

    let err = stack.add_monad(Effect::result()).execute(Value::Null).unwrap_err();
    assert_eq!(err, ComposadError::DepthExceeded { max: 2 });

    let err = stack
        .bind(|v| Ok(v), json!({ "value": { "value": 1 }, "logs": {} }))
        .unwrap_err();
    assert!(err.to_string().contains("malformed maybe value"));

    let strict = config.absence.effect();
    assert!(strict.bind(&|v| Ok(v), json!({ "value": 1 })).is_err());
}
