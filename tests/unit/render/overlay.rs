use super::*;

fn reds(grid: &PixelGrid) -> Vec<(usize, usize)> {
    grid.iter()
        .filter(|&(_, _, c)| c == Some(Rgb::RED))
        .map(|(x, y, _)| (x, y))
        .collect()
}

fn single_seed(x: usize, y: usize, side: usize) -> PixelGrid {
    let mut g = PixelGrid::new(side, side);
    g.set(x, y, Some(Rgb::RED));
    g
}

#[test]
fn markers_follow_design_table() {
    let mut g = PixelGrid::new(20, 20);
    paint_markers(&mut g, 0);
    assert_eq!(reds(&g), vec![(3, 5), (7, 5)]);

    let mut g = PixelGrid::new(20, 20);
    paint_markers(&mut g, 7);
    assert_eq!(reds(&g), vec![(12, 11), (16, 11)]);
}

#[test]
fn rest_frame_is_unchanged() {
    let g = single_seed(3, 3, 8);
    assert_eq!(with_beams(&g, 0, BeamFrame::Rest), g);
    assert_eq!(sweep_direction(0, BeamFrame::Rest), None);
}

#[test]
fn sweep_table_matches_designs() {
    assert_eq!(
        sweep_direction(1, BeamFrame::First),
        Some(BeamDirection::UpLeft)
    );
    assert_eq!(
        sweep_direction(5, BeamFrame::Second),
        Some(BeamDirection::DownLeft)
    );
    assert_eq!(
        sweep_direction(3, BeamFrame::Second),
        Some(BeamDirection::UpRight)
    );
}

#[test]
fn seeds_skip_the_last_four_outer_indices() {
    let mut g = PixelGrid::new(10, 10);
    g.set(5, 2, Some(Rgb::RED));
    g.set(6, 2, Some(Rgb::RED));
    assert_eq!(beam_seeds(&g), vec![(5, 2)]);
}

#[test]
fn down_right_runs_to_the_edge() {
    // design 0, frame 1 sweeps down-right
    let out = with_beams(&single_seed(2, 4, 8), 0, BeamFrame::First);
    assert_eq!(reds(&out), vec![(2, 4), (3, 5), (4, 6), (5, 7)]);
}

#[test]
fn down_left_runs_to_the_edge() {
    // design 0, frame 2 sweeps down-left
    let out = with_beams(&single_seed(3, 2, 8), 0, BeamFrame::Second);
    assert_eq!(reds(&out), vec![(0, 5), (1, 4), (2, 3), (3, 2)]);
}

#[test]
fn up_left_and_up_right_run_to_the_edge() {
    // design 1, frame 1 sweeps up-left
    let out = with_beams(&single_seed(3, 2, 8), 1, BeamFrame::First);
    assert_eq!(reds(&out), vec![(1, 0), (2, 1), (3, 2)]);

    // design 3, frame 2 sweeps up-right
    let out = with_beams(&single_seed(2, 2, 8), 3, BeamFrame::Second);
    assert_eq!(reds(&out), vec![(2, 2), (3, 1), (4, 0)]);
}

#[test]
fn beams_do_not_mutate_the_source_grid() {
    let g = single_seed(1, 1, 8);
    let _ = with_beams(&g, 0, BeamFrame::First);
    assert_eq!(reds(&g), vec![(1, 1)]);
}
