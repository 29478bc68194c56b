use motion_profile_editor::axis::nice_ticks;
use motion_profile_editor::{
    Channel, EditorConfig, LimitCategory, Mode, MotionProfileEditor, NullSink, ParameterId,
    ScurvePlanner, Update,
};

fn editor() -> MotionProfileEditor<ScurvePlanner, NullSink> {
    MotionProfileEditor::new(&EditorConfig::default(), ScurvePlanner, NullSink)
        .expect("default config is valid")
}

#[test]
fn default_profile_moves_from_zero_to_ninety() {
    let editor = editor();
    let rendered = editor.rendered().expect("default parameters are feasible");

    let positions = rendered.samples.channel(Channel::Position);
    assert_eq!(positions.len(), 1000);
    assert!(positions[0].abs() < 1e-9);
    assert!((positions[999] - 90.0).abs() < 1e-6);
    assert!(positions.windows(2).all(|w| w[1] >= w[0] - 1e-9));

    let stats = &rendered.statistics;
    assert!(stats.total_duration > 0.0);
    assert!((0.0..=100.0).contains(&stats.max_velocity_percent()));
    for category in LimitCategory::ALL {
        let dwell = stats.dwell(category);
        assert!(dwell.time >= 0.0 && dwell.time <= stats.total_duration);
        assert!((0.0..=100.0).contains(&dwell.percent));
    }

    let total_ms = stats.total_duration * 1e3;
    assert_eq!(rendered.time_axis.ticks, nice_ticks(total_ms));
    assert_eq!(rendered.time_axis.ticks.last(), Some(&total_ms));
    assert_eq!(rendered.axes[Channel::Position.index()].ticks.len(), 6);
}

#[test]
fn infeasible_request_keeps_previous_samples_and_axes() {
    let mut editor = editor();
    for (id, value) in [
        (ParameterId::VelocityLimit, 1.0),
        (ParameterId::AccelerationLimit, 1.0),
        (ParameterId::JerkLimit, 1.0),
    ] {
        assert_eq!(editor.set_precise(id, value), Update::Rendered, "{id}");
    }
    let before = editor.rendered().cloned().expect("rendered");

    let start = editor.set_precise(ParameterId::StartVelocity, 50_000.0);
    let end = editor.set_precise(ParameterId::EndVelocity, -50_000.0);
    assert!(matches!(start, Update::Failed(_)));
    assert!(matches!(end, Update::Failed(_)));

    let after = editor.rendered().expect("previous render kept");
    assert_eq!(after.samples, before.samples);
    assert_eq!(after.axes, before.axes);
    assert_eq!(after.time_axis, before.time_axis);
    assert!(editor.warning().is_some_and(|w| w.starts_with("Warning: ")));
}

#[test]
fn coarse_jerk_edit_round_trips_through_the_editor() {
    let mut editor = editor();
    editor.set_precise(ParameterId::JerkLimit, 2_500_000_000.0);
    let coarse = editor.parameters().get(ParameterId::JerkLimit).coarse();
    assert_eq!(coarse, 2_500_000);

    editor.set_coarse(ParameterId::JerkLimit, coarse);
    assert_eq!(editor.parameters().value(ParameterId::JerkLimit), 2_500_000_000.0);
    assert_eq!(
        editor.rendered().map(|r| r.request.jerk_limit),
        Some(2_500_000_000.0)
    );
}

#[test]
fn toggling_mode_twice_restores_the_jerk_limit() {
    let mut editor = editor();
    editor.set_coarse(ParameterId::JerkLimit, 1_750_000);
    let before = editor.parameters().get(ParameterId::JerkLimit).clone();

    editor.toggle_mode();
    assert_eq!(editor.mode(), Mode::Trapezoidal);
    editor.toggle_mode();
    assert_eq!(editor.mode(), Mode::SCurve);
    assert_eq!(editor.parameters().get(ParameterId::JerkLimit), &before);
}

#[test]
fn reversed_move_descends_and_mirrors_the_velocity_axis() {
    let mut editor = editor();
    editor.set_precise(ParameterId::StartPosition, 120.0);
    assert_eq!(editor.set_precise(ParameterId::EndPosition, 30.0), Update::Rendered);

    let rendered = editor.rendered().expect("rendered");
    let positions = rendered.samples.channel(Channel::Position);
    assert!((positions[0] - 120.0).abs() < 1e-9);
    assert!((positions[positions.len() - 1] - 30.0).abs() < 1e-6);
    assert!(positions.windows(2).all(|w| w[1] <= w[0] + 1e-9));

    let velocity = &rendered.axes[Channel::Velocity.index()];
    assert_eq!(velocity.ticks.first(), Some(&-15_750.0));
    assert_eq!(velocity.ticks.last(), Some(&0.0));
}
