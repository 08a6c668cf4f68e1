use structviz_choreo_core::{AnimTime, ChoreoError, Sequence, Step, Timeline};

fn approx(a: f32, b: f32, eps: f32) {
    assert!((a - b).abs() <= eps, "left={a} right={b} eps={eps}");
}

fn millis(ms: u64) -> AnimTime {
    AnimTime::from_nanos(ms * 1_000_000)
}

fn mk_seq(durations_ms: &[u64]) -> Sequence {
    let steps = durations_ms
        .iter()
        .enumerate()
        .map(|(i, &ms)| Step::new(millis(ms), format!("demo/step:{i}")))
        .collect();
    Sequence::from_steps(steps).expect("test sequence is valid")
}

/// it should assign contiguous cumulative offsets starting at zero
#[test]
fn offsets_are_cumulative_and_contiguous() {
    let seq = mk_seq(&[100, 200, 300, 0, 50]);
    let timeline = Timeline::build(&seq).unwrap();

    let steps = timeline.steps();
    assert_eq!(steps[0].start_offset, AnimTime::ZERO);
    for window in steps.windows(2) {
        assert_eq!(
            window[0].start_offset + window[0].step.duration,
            window[1].start_offset
        );
        assert!(window[0].start_offset <= window[1].start_offset);
    }
    assert_eq!(timeline.total_duration(), seq.total_duration());
    assert_eq!(
        timeline.total_duration(),
        steps
            .iter()
            .fold(AnimTime::ZERO, |acc, s| acc + s.step.duration)
    );
}

/// it should hand a shared boundary instant to the later step (scenario A)
#[test]
fn boundary_belongs_to_the_later_step() {
    let seq = mk_seq(&[100, 200, 300]);
    let mut timeline = Timeline::build(&seq).unwrap();

    // seek(50) on a 600ms timeline lands exactly on the 100+200 boundary.
    timeline.set_time(millis(300));
    assert_eq!(timeline.active_index(), Some(2));
    approx(timeline.local_progress(2), 0.0, 1e-6);

    // Just before the boundary the earlier step is still active.
    timeline.set_time(millis(300) - AnimTime::from_nanos(1));
    assert_eq!(timeline.active_index(), Some(1));
    approx(timeline.local_progress(1), 1.0, 1e-6);
}

/// it should report the final step at progress 1.0 at the exact end
#[test]
fn exact_end_reports_final_step() {
    let seq = mk_seq(&[100, 200, 300]);
    let mut timeline = Timeline::build(&seq).unwrap();

    timeline.set_time(millis(600));
    assert_eq!(timeline.active_index(), Some(2));
    approx(timeline.local_progress(2), 1.0, 1e-6);
    approx(timeline.progress_fraction(), 1.0, 1e-6);
}

/// it should clamp set_time into the valid range
#[test]
fn set_time_clamps() {
    let seq = mk_seq(&[100, 200]);
    let mut timeline = Timeline::build(&seq).unwrap();

    timeline.set_time(millis(5000));
    assert_eq!(timeline.current_time(), millis(300));
}

/// it should report local progress 1.0 for a zero-duration marker
#[test]
fn marker_step_progress_is_one() {
    let seq = mk_seq(&[100, 0]);
    let mut timeline = Timeline::build(&seq).unwrap();

    timeline.set_time(millis(100));
    assert_eq!(timeline.active_index(), Some(1));
    approx(timeline.local_progress(1), 1.0, 1e-6);
    assert!(timeline.steps()[1].step.is_marker());
}

/// it should have no active step on an empty timeline
#[test]
fn empty_timeline_has_no_active_step() {
    let timeline = Timeline::build(&Sequence::empty()).unwrap();
    assert!(timeline.is_empty());
    assert_eq!(timeline.active_index(), None);
    assert_eq!(timeline.total_duration(), AnimTime::ZERO);
}

/// it should report mid-step local progress as a fraction of the step
#[test]
fn mid_step_local_progress() {
    let seq = mk_seq(&[100, 200, 300]);
    let mut timeline = Timeline::build(&seq).unwrap();

    timeline.set_time(millis(200));
    assert_eq!(timeline.active_index(), Some(1));
    approx(timeline.local_progress(1), 0.5, 1e-6);
}

/// it should reject a sequence whose cached total disagrees with its steps
#[test]
fn build_rejects_inconsistent_cached_total() {
    let tampered: Sequence = serde_json::from_str(
        r#"{"steps":[{"duration":100000000,"effect":"demo/step:0"}],"total_duration":1}"#,
    )
    .unwrap();
    let err = Timeline::build(&tampered).unwrap_err();
    assert!(matches!(err, ChoreoError::MalformedSequence { .. }));
}

/// it should reject durations that overflow the time representation
#[test]
fn from_steps_rejects_overflow() {
    let steps = vec![
        Step::new(AnimTime::from_nanos(u64::MAX), "demo/step:0"),
        Step::new(AnimTime::from_nanos(1), "demo/step:1"),
    ];
    let err = Sequence::from_steps(steps).unwrap_err();
    assert!(matches!(err, ChoreoError::MalformedSequence { .. }));
}

/// it should round-trip a sequence through serde and rebuild identically
#[test]
fn sequence_serde_roundtrip_builds() {
    let seq = mk_seq(&[100, 200, 300]);
    let json = serde_json::to_string(&seq).unwrap();
    let back: Sequence = serde_json::from_str(&json).unwrap();
    assert_eq!(seq, back);

    let timeline = Timeline::build(&back).unwrap();
    assert_eq!(timeline.total_duration(), seq.total_duration());
}
