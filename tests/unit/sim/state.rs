use super::*;

#[test]
fn minimal_snapshot_defaults_to_normal_play() {
    let s: RenderState = serde_json::from_str(
        r#"{"puck_pos":{"x":400,"y":300},"puck_radius":20,
            "ship1_pos":{"x":181,"y":300},"ship2_pos":{"x":619,"y":300}}"#,
    )
    .unwrap();
    assert_eq!(s.puck_pos, Point::new(400.0, 300.0));
    assert_eq!(s.goals, Goals::default());
    assert!(!s.is_goal());
    assert!(s.satellites.is_empty());
}

#[test]
fn replay_skips_blank_lines_and_reports_bad_line_numbers() {
    let good = r#"{"puck_pos":{"x":1,"y":2},"puck_radius":3,"ship1_pos":{"x":0,"y":0},"ship2_pos":{"x":0,"y":0},"goals":{"left":1,"right":2},"goal_side":"left"}"#;
    let text = format!("{good}\n\n{good}\n");
    let states = RenderState::parse_replay(&text).unwrap();
    assert_eq!(states.len(), 2);
    assert_eq!(states[0].goal_side, Some(Side::Left));
    assert_eq!(states[1].goals.for_side(Side::Right), 2);

    let err = RenderState::parse_replay(&format!("{good}\nnot json\n")).unwrap_err();
    assert!(err.to_string().contains("replay line 2"), "{err}");
}
