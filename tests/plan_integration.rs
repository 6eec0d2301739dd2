//! Plan projection: clipping against the hall footprint, aisles and tunnels

use glam::DVec3;
use tribune_layout::geometry::{Line, Polyline};
use tribune_layout::setup::{AudienceSetup, HallSetup, RailingSetup, StairSetup, TribuneSetup};
use tribune_layout::solver::{SolveRequest, TribuneSolution, TribuneSolver};

fn rectangle(x0: f64, y0: f64, x1: f64, y1: f64) -> Polyline {
    Polyline::closed(vec![
        DVec3::new(x0, y0, 0.0),
        DVec3::new(x1, y0, 0.0),
        DVec3::new(x1, y1, 0.0),
        DVec3::new(x0, y1, 0.0),
    ])
}

fn solve_rows(rows: usize, request: SolveRequest) -> TribuneSolution {
    TribuneSolver::new(
        TribuneSetup::new(rows, vec![80.0], vec![2], vec![]).unwrap(),
        StairSetup::new(15.0, 30.0).unwrap(),
        RailingSetup::new(90.0, 5.0).unwrap(),
    )
    .solve(&request)
}

fn plan_audience() -> AudienceSetup {
    AudienceSetup::new(DVec3::new(40.0, 0.0, 110.0), DVec3::ZERO)
        .with_plan_chairs(
            vec![rectangle(-20.0, -25.0, 20.0, 25.0)],
            DVec3::ZERO,
            55.0,
        )
        .unwrap()
}

fn total_length(lines: &[Line]) -> f64 {
    lines.iter().map(Line::length).sum()
}

#[test]
fn test_aisle_splits_tribune_lines() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0))
        .unwrap()
        .with_aisles(vec![rectangle(-10.0, 400.0, 410.0, 500.0)])
        .unwrap();
    let solution = solve_rows(3, SolveRequest::default().with_hall(hall));

    // row far edges at X = 80, 160 and 240, each split around the aisle
    assert_eq!(solution.plan_tribune_lines.len(), 6);
    assert!((total_length(&solution.plan_tribune_lines) - 3.0 * 900.0).abs() < 1e-6);
    for line in &solution.plan_tribune_lines {
        let bounds = line.bounding_box();
        assert!(bounds.max.y <= 400.0 + 1e-6 || bounds.min.y >= 500.0 - 1e-6);
    }
}

#[test]
fn test_stair_lines_stay_inside_aisles() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0))
        .unwrap()
        .with_aisles(vec![rectangle(-10.0, 400.0, 410.0, 500.0)])
        .unwrap();
    let solution = solve_rows(3, SolveRequest::default().with_hall(hall));

    // one line per riser top of the two flights
    assert_eq!(solution.plan_stair_lines.len(), 4);
    for line in &solution.plan_stair_lines {
        assert!((line.length() - 100.0).abs() < 1e-6);
        let bounds = line.bounding_box();
        assert!(bounds.min.y >= 400.0 - 1e-6 && bounds.max.y <= 500.0 + 1e-6);
    }
}

#[test]
fn test_tunnel_removes_stairs_it_covers() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0))
        .unwrap()
        .with_aisles(vec![rectangle(-10.0, 400.0, 410.0, 500.0)])
        .unwrap()
        .with_tunnels(vec![rectangle(-10.0, 390.0, 100.0, 510.0)])
        .unwrap();
    let solution = solve_rows(3, SolveRequest::default().with_hall(hall));

    // flights at X = 50 and 80 fall inside the tunnel
    assert_eq!(solution.plan_stair_lines.len(), 2);
    assert!(solution
        .plan_stair_lines
        .iter()
        .all(|line| line.from.x > 100.0));
}

#[test]
fn test_no_aisles_no_stair_lines() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0)).unwrap();
    let solution = solve_rows(3, SolveRequest::default().with_hall(hall));
    assert!(solution.plan_stair_lines.is_empty());
    assert_eq!(solution.plan_tribune_lines.len(), 3);
}

#[test]
fn test_plan_railings_have_rail_width() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0)).unwrap();
    let solution = solve_rows(3, SolveRequest::default().with_hall(hall));

    assert_eq!(solution.plan_railings.len(), 3);
    assert_eq!(solution.plan_railing_spine.len(), 3);
    let bounds = solution.plan_railings[0].bounding_box().unwrap();
    assert!((bounds.min.x - 0.0).abs() < 1e-9);
    assert!((bounds.max.x - 5.0).abs() < 1e-9);
    assert!((bounds.size().y - 1000.0).abs() < 1e-6);
}

#[test]
fn test_plan_chairs_fill_every_row_segment() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0))
        .unwrap()
        .with_aisles(vec![rectangle(-10.0, 400.0, 410.0, 500.0)])
        .unwrap();
    let solution = solve_rows(
        3,
        SolveRequest::default()
            .with_audiences(vec![plan_audience()])
            .with_hall(hall),
    );

    assert_eq!(solution.plan_chairs.len(), 3);
    assert_eq!(solution.plan_row_spine[0].len(), 2);
    // floor((400 - 50) / 55) + 1 = 7 below the aisle, floor((500 - 50) / 55) + 1 = 9 above
    for row in 0..3 {
        assert_eq!(solution.plan_chairs[row].len(), 16);
        assert_eq!(solution.plan_chair_planes[row].len(), 16);
        let below = solution.plan_chair_planes[row]
            .iter()
            .filter(|plane| plane.origin.y < 450.0)
            .count();
        assert_eq!(below, 7);
        assert_eq!(16 - below, 9);
    }
    // chairs follow the row direction
    assert!((solution.plan_chair_planes[0][0].x_axis - DVec3::Y).length() < 1e-9);
}

#[test]
fn test_plan_chairs_skip_unseated_rows() {
    let hall = HallSetup::new(rectangle(0.0, 0.0, 400.0, 1000.0)).unwrap();
    let solution = solve_rows(
        2,
        SolveRequest::default()
            .with_audience_slots(vec![None, Some(plan_audience())])
            .with_hall(hall),
    );
    assert!(solution.plan_chairs[0].is_empty());
    // floor((1000 - 50) / 55) + 1 = 18
    assert_eq!(solution.plan_chairs[1].len(), 18);
}

#[test]
fn test_ambiguous_cut_is_reported_and_skipped() {
    // C-shaped footprint: cuts left of X = 200 cross it four times
    let boundary = Polyline::closed(vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(300.0, 0.0, 0.0),
        DVec3::new(300.0, 1000.0, 0.0),
        DVec3::new(0.0, 1000.0, 0.0),
        DVec3::new(0.0, 600.0, 0.0),
        DVec3::new(200.0, 600.0, 0.0),
        DVec3::new(200.0, 400.0, 0.0),
        DVec3::new(0.0, 400.0, 0.0),
    ]);
    let hall = HallSetup::new(boundary).unwrap();
    let solution = solve_rows(4, SolveRequest::default().with_hall(hall));

    // only the cut at X = 240 yields a line; X = 320 lies past the footprint
    assert_eq!(solution.plan_tribune_lines.len(), 1);
    assert!((solution.plan_tribune_lines[0].from.x - 240.0).abs() < 1e-6);
    assert!(solution.errors.iter().any(|e| e.contains("X=80.0")));
    assert!(solution.is_valid);
}
