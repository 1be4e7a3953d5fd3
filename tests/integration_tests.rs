use critodds::*;

/// Records every display call in order.
#[derive(Default)]
struct RecordingDisplay {
    events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq)]
enum Event {
    Summary(f64),
    Clear,
    Row(u64),
    Error(String),
}

impl ResultsDisplay for RecordingDisplay {
    fn show_summary(&mut self, crit: &ResolvedCrit) {
        self.events.push(Event::Summary(crit.chance));
    }

    fn clear_rows(&mut self) {
        self.events.push(Event::Clear);
    }

    fn insert_row(&mut self, row: &DistributionRow, _trials: u64) {
        self.events.push(Event::Row(row.k));
    }

    fn show_error(&mut self, error: &CalcError) {
        self.events.push(Event::Error(error.to_string()));
    }
}

fn form(bc: &str, bcr: &str) -> ModifierForm {
    ModifierForm::new()
        .with(Field::CritBase, bc)
        .with(Field::CritResBase, bcr)
}

/// Seven trials, BC = 100, BCR = 50, no modifiers.
#[test]
fn test_reference_scenario() {
    let calculation = calculate(&form("100", "50")).unwrap();

    assert_eq!(calculation.crit.total_crit, 100.0);
    assert_eq!(calculation.crit.crit_resist, 50.0);
    assert_eq!(calculation.crit.final_crit, 50.0);

    let p = 50.0 / (50.0 + CRIT_CONSTANT);
    assert_eq!(calculation.chance(), p);
    assert!((p - 0.0697674).abs() < 1e-6);

    let table = &calculation.table;
    assert_eq!(table.len(), 8);
    assert!((table.rows()[0].exact - (1.0 - p).powi(7)).abs() < 1e-15);
    assert!((table.rows()[0].cumulative - 1.0).abs() < 1e-12);
    assert_eq!(table.rows()[7].cumulative, table.rows()[7].exact);
    assert!((table.total_probability() - 1.0).abs() < 1e-12);
}

/// Full modifier stack goes through the formula in order.
#[test]
fn test_full_modifier_stack() {
    let calculation = calculate(
        &form("200", "100")
            .with(Field::Trials, "10")
            .with(Field::Equipment, "50")
            .with(Field::Skill, "25")
            .with(Field::BuffPercent, "20")
            .with(Field::DebuffPercent, "40"),
    )
    .unwrap();

    // C = 250 * 1.2 + 25 = 325, CR = 100 * 0.6 = 60, FC = 265
    assert_eq!(calculation.crit.total_crit, 325.0);
    assert_eq!(calculation.crit.crit_resist, 60.0);
    assert_eq!(calculation.crit.final_crit, 265.0);
    assert_eq!(calculation.chance(), 265.0 / (265.0 + CRIT_CONSTANT));
}

/// FC engineered to -K: C = 1 - 1 = 0 and CR = K.
#[test]
fn test_division_scenario_renders_no_table() {
    let bad = form("1", &CRIT_CONSTANT.to_string()).with(Field::Skill, "-1");
    let mut display = RecordingDisplay::default();

    let err = run_calculation(&Calculator::new(), &bad, &mut display).unwrap_err();

    assert_eq!(err, CalcError::Division);
    assert_eq!(
        display.events,
        vec![Event::Error(
            "Final Crit + constant must not be zero".to_string()
        )]
    );
}

/// An extreme negative buff pushes the chance above one.
#[test]
fn test_range_scenario_renders_no_table() {
    let bad = form("100", "50").with(Field::BuffPercent, "-3000");
    let mut display = RecordingDisplay::default();

    let err = run_calculation(&Calculator::new(), &bad, &mut display).unwrap_err();

    match err {
        CalcError::Range { value } => assert!(value > 1.0),
        other => panic!("expected range error, got {other:?}"),
    }
    assert_eq!(display.events.len(), 1);
    assert!(matches!(&display.events[0], Event::Error(msg) if msg.starts_with("Crit Chance out of range")));
}

#[test]
fn test_blank_bases_are_zero_constraint_errors() {
    let err = calculate(&form("", "50")).unwrap_err();
    assert_eq!(err, CalcError::ZeroConstraint { field: Field::CritBase });

    let err = calculate(&form("100", "   ")).unwrap_err();
    assert_eq!(
        err,
        CalcError::ZeroConstraint {
            field: Field::CritResBase
        }
    );
}

#[test]
fn test_blank_trials_is_required() {
    let err = calculate(&form("100", "50").with(Field::Trials, "")).unwrap_err();
    assert_eq!(err, CalcError::RequiredField { field: Field::Trials });
}

#[test]
fn test_error_order_bases_then_zero_then_modifiers_then_resolver() {
    // A bad base value is reported before the zero-check.
    let err = calculate(&form("0", "fifty")).unwrap_err();
    assert!(matches!(err, CalcError::Parse { field: Field::CritResBase, .. }));

    // The zero-check runs before the modifiers are read.
    let err = calculate(&form("0", "50").with(Field::DebuffPercent, "%")).unwrap_err();
    assert_eq!(err, CalcError::ZeroConstraint { field: Field::CritBase });

    // With valid bases, a bad modifier is a parse error.
    let err = calculate(&form("100", "50").with(Field::DebuffPercent, "%")).unwrap_err();
    assert!(matches!(err, CalcError::Parse { field: Field::DebuffPercent, .. }));

    // Zero-check beats a resolver range error.
    let err = calculate(&form("100", "0").with(Field::BuffPercent, "-3000")).unwrap_err();
    assert_eq!(
        err,
        CalcError::ZeroConstraint {
            field: Field::CritResBase
        }
    );
}

/// Summary first, then a single clear, then rows in ascending k.
#[test]
fn test_display_clears_before_inserting() {
    let calculator = Calculator::new();
    let mut display = RecordingDisplay::default();

    run_calculation(&calculator, &form("100", "50").with(Field::Trials, "3"), &mut display)
        .unwrap();

    let p = 50.0 / (50.0 + CRIT_CONSTANT);
    assert_eq!(
        display.events,
        vec![
            Event::Summary(p),
            Event::Clear,
            Event::Row(0),
            Event::Row(1),
            Event::Row(2),
            Event::Row(3),
        ]
    );
}

#[test]
fn test_failed_action_after_success_keeps_view() {
    let calculator = Calculator::new();
    let mut view = TableView::new();

    run_calculation(&calculator, &form("100", "50"), &mut view).unwrap();
    let rendered = view.render();

    let _ = run_calculation(&calculator, &form("100", "50").with(Field::Trials, "2.5"), &mut view);

    assert_eq!(view.render(), rendered);
    assert!(view.error().unwrap().contains("whole number"));
}

#[test]
fn test_report_text() {
    let calculation = calculate(&form("100", "50").with(Field::Trials, "1")).unwrap();
    let text = report::render_text(calculation.chance(), &calculation.table);
    let lines: Vec<_> = text.lines().collect();

    assert_eq!(lines[0], "Crit Chance (p) = 0.0697674418604651");
    for column in report::COLUMNS {
        assert!(lines[2].contains(column), "missing column {column}");
    }
    assert!(lines[4].starts_with("0/1"));
    assert!(lines[5].starts_with("1/1"));
    assert!(lines[5].contains("14.33"));
}

#[test]
fn test_zero_chance_table_uses_infinity_marker() {
    let calculation = calculate(&form("50", "50").with(Field::Trials, "2")).unwrap();
    assert_eq!(calculation.chance(), 0.0);

    let rows = report::format_rows(&calculation.table);
    assert_eq!(rows[0][2], "1.00");
    assert_eq!(rows[1][2], odds::INFINITY_MARKER);
    assert_eq!(rows[2][4], odds::INFINITY_MARKER);
}

#[test]
fn test_json_shape_of_calculation() {
    let calculation = calculate(&form("50", "50").with(Field::Trials, "1")).unwrap();
    let json = serde_json::to_value(&calculation).unwrap();

    assert_eq!(json["inputs"]["crit_base"], 50.0);
    assert_eq!(json["crit"]["chance"], 0.0);
    let rows = json["table"]["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["odds_exact"], 1.0);
    assert!(rows[1]["odds_exact"].is_null());

    let back: Calculation = serde_json::from_value(json).unwrap();
    assert_eq!(back.table.rows()[1].odds_exact, Odds::Never);
}
