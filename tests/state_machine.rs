use statescatter::scene::Frame;
use statescatter::{Axis, ChartConfig, ChartState, Dataset, Metric, Selection, StateRecord, Transition, XField, YField};

fn data() -> Dataset {
    Dataset::new(vec![
        StateRecord::new(1, "Alabama", "AL", 10.0, 38.6, 42830.0, 5.0, 21.1, 33.5),
        StateRecord::new(2, "Alaska", "AK", 20.0, 33.3, 71583.0, 15.0, 19.9, 29.7),
        StateRecord::new(3, "Arizona", "AZ", 15.0, 36.9, 50068.0, 10.0, 16.5, 28.9),
    ])
    .unwrap()
}

fn chart() -> ChartState {
    ChartState::new(data(), ChartConfig::default())
}

fn active_titles(frame: &Frame, axis: Axis) -> Vec<Metric> {
    frame
        .titles
        .iter()
        .filter(|t| t.metric.axis() == axis && t.is_active())
        .map(|t| t.metric)
        .collect()
}

#[test]
fn starts_at_poverty_vs_healthcare() {
    let c = chart();
    assert_eq!(
        c.selection(),
        Selection {
            x: XField::Poverty,
            y: YField::Healthcare
        }
    );
    let f = c.frame(0.0);
    assert_eq!(active_titles(&f, Axis::X), vec![Metric::X(XField::Poverty)]);
    assert_eq!(active_titles(&f, Axis::Y), vec![Metric::Y(YField::Healthcare)]);
    assert_eq!(f.points.len(), 3);
    assert_eq!(f.labels.len(), 3);
    assert_eq!(f.titles.len(), 6);
    assert!(!c.is_animating(0.0));
}

#[test]
fn clicking_the_active_title_does_nothing() {
    let mut c = chart();
    let before = c.frame(0.0);
    assert_eq!(c.click(Metric::X(XField::Poverty), 0.0), Transition::Unchanged);
    assert_eq!(c.click(Metric::Y(YField::Healthcare), 0.0), Transition::Unchanged);
    assert_eq!(c.render_count(), 0);
    assert_eq!(c.frame(0.0), before);
    assert!(!c.is_animating(0.0));
}

#[test]
fn exactly_one_active_title_per_axis_for_every_selection() {
    let mut c = chart();
    let mut now = 0.0;
    for sel in Selection::all() {
        c.select_x(sel.x, now);
        c.select_y(sel.y, now);
        now += 2.0;
        assert_eq!(c.selection(), sel);
        let f = c.frame(now);
        assert_eq!(active_titles(&f, Axis::X), vec![Metric::X(sel.x)]);
        assert_eq!(active_titles(&f, Axis::Y), vec![Metric::Y(sel.y)]);
    }
}

#[test]
fn x_click_moves_only_horizontal_coordinates() {
    let mut c = chart();
    let start = c.frame(0.0);
    assert_eq!(c.click(Metric::X(XField::Age), 0.0), Transition::Changed(Axis::X));
    assert_eq!(c.render_count(), 1);
    assert!(c.is_animating(0.5));
    assert!(!c.is_animating(1.0));

    let mid = c.frame(0.5);
    let end = c.frame(1.0);
    for i in 0..3 {
        assert_eq!(mid.points[i].cy, start.points[i].cy);
        assert_eq!(end.points[i].cy, start.points[i].cy);
        assert_eq!(end.labels[i].y, start.labels[i].y);
        let target = c.x_scale().map(data().records()[i].age);
        assert!((end.points[i].cx - target).abs() < 1e-9);
        assert!((end.labels[i].x - target).abs() < 1e-9);
    }
    // Label y keeps its nudge below the circle centre.
    assert!((end.labels[0].y - end.points[0].cy - 4.0).abs() < 1e-9);
}

#[test]
fn y_click_rebuilds_the_y_scale_from_the_new_metric() {
    let mut c = chart();
    c.click(Metric::Y(YField::Smokes), 0.0);
    let (lo, hi) = c.y_scale().domain();
    assert_eq!(lo, 0.0);
    assert!((hi - 21.1 * 1.2).abs() < 1e-9);
    assert_eq!(c.frame(1.0).y_axis.axis, Axis::Y);
}

#[test]
fn round_trip_restores_the_initial_chart() {
    let mut c = chart();
    let initial = c.frame(0.0);
    let domain = c.x_scale().domain();
    c.select_x(XField::Income, 0.0);
    c.select_x(XField::Poverty, 2.0);
    assert_eq!(c.x_scale().domain(), domain);
    let back = c.frame(5.0);
    for (a, b) in initial.points.iter().zip(&back.points) {
        assert!((a.cx - b.cx).abs() < 1e-9);
        assert_eq!(a.cy, b.cy);
    }
    assert_eq!(c.render_count(), 2);
}

#[test]
fn retarget_mid_flight_continues_from_current_position() {
    let mut c = chart();
    c.select_x(XField::Age, 0.0);
    let before = c.frame(0.4);
    c.select_x(XField::Income, 0.4);
    let after = c.frame(0.4);
    for (a, b) in before.points.iter().zip(&after.points) {
        assert!((a.cx - b.cx).abs() < 1e-9);
    }
    assert!(c.is_animating(1.3));
    assert!(!c.is_animating(1.45));
}

#[test]
fn tooltip_follows_the_current_fields() {
    let mut c = chart();
    let tip = c.hover_enter(0).expect("tooltip shown").text.clone();
    assert!(tip.starts_with("Alabama\n"));
    assert!(tip.contains("In Poverty (%): 10"));
    assert!(tip.contains("Lacks Healthcare (%): 5"));

    let f = c.frame(0.0);
    let shown = f.tooltip.expect("tooltip in frame");
    assert_eq!(shown.record, 0);
    assert!(shown.anchor.1 < f.labels[0].y);

    // Rebinding on a switch hides the stale tooltip.
    c.select_x(XField::Age, 0.0);
    assert!(c.tooltip().is_none());
    let tip = c.hover_enter(1).unwrap().text.clone();
    assert!(tip.contains("Age (Median): 33.3"));
    assert!(tip.contains("Lacks Healthcare (%): 15"));

    c.hover_leave();
    assert!(c.frame(0.0).tooltip.is_none());
    assert!(c.hover_enter(99).is_none());
}

#[test]
fn hit_testing_titles_and_labels() {
    let mut c = chart();
    let f = c.frame(0.0);
    for t in &f.titles {
        assert_eq!(f.title_at(t.anchor), Some(t.metric));
    }
    assert_eq!(f.title_at((-500.0, -500.0)), None);

    let l = &f.labels[1];
    assert_eq!(f.label_at((l.x, l.y - 5.0)), Some(1));
    assert_eq!(f.label_at((l.x, l.y + 30.0)), None);

    // A click resolved through the hit test drives the state machine.
    let age = f
        .titles
        .iter()
        .find(|t| t.metric == Metric::X(XField::Age))
        .unwrap();
    let m = f.title_at(age.anchor).unwrap();
    assert_eq!(c.click(m, 0.0), Transition::Changed(Axis::X));
    assert_eq!(c.selection().x, XField::Age);
}

#[test]
fn plot_rows_reflect_selection() {
    let mut c = chart();
    c.select_y(YField::Obesity, 0.0);
    let rows = c.plot_rows();
    assert_eq!(rows.len(), 3);
    assert_eq!(rows[0].x_field, "poverty");
    assert_eq!(rows[0].y_field, "obesity");
    assert_eq!(rows[0].y_value, 33.5);
    assert!((rows[0].y_px - c.y_scale().map(33.5)).abs() < 1e-9);
}

#[test]
fn single_record_switch_to_age() {
    let one = Dataset::new(vec![StateRecord::new(
        1, "Testland", "TL", 10.0, 30.0, 50000.0, 5.0, 20.0, 25.0,
    )])
    .unwrap();
    let mut c = ChartState::new(one, ChartConfig::default());
    let (lo, hi) = c.x_scale().domain();
    assert!((lo - 8.0).abs() < 1e-9 && (hi - 12.0).abs() < 1e-9);
    let start = c.frame(0.0);

    c.click(Metric::X(XField::Age), 0.0);
    let (lo, hi) = c.x_scale().domain();
    assert!((lo - 24.0).abs() < 1e-9 && (hi - 36.0).abs() < 1e-9);

    let end = c.frame(1.0);
    // 30 sits mid-domain in [24, 36], as 10 did in [8, 12].
    assert!((end.points[0].cx - c.x_scale().map(30.0)).abs() < 1e-9);
    assert_eq!(c.render_count(), 1);
    assert_eq!(end.points[0].cy, start.points[0].cy);

    let tip = c.hover_enter(0).unwrap().text.clone();
    assert!(tip.contains("Testland"));
    assert!(tip.contains("Age (Median): 30"));
}
