use super::*;

fn c(v: u8) -> Option<Rgb> {
    Some(Rgb::new(v, v, v))
}

fn sample() -> PixelGrid {
    PixelGrid::from_columns(vec![
        vec![c(1), None, c(3)],
        vec![c(4), c(5), None],
    ])
    .unwrap()
}

#[test]
fn from_columns_is_outer_major() {
    let g = sample();
    assert_eq!(g.width(), 2);
    assert_eq!(g.height(), 3);
    assert_eq!(g.get(0, 2), c(3));
    assert_eq!(g.get(1, 1), c(5));
    assert_eq!(g.get(5, 5), None);

    let order: Vec<(usize, usize)> = g.iter().map(|(x, y, _)| (x, y)).collect();
    assert_eq!(order[..4], [(0, 0), (0, 1), (0, 2), (1, 0)]);
}

#[test]
fn ragged_or_empty_data_is_rejected() {
    assert!(PixelGrid::from_columns(vec![]).is_err());
    assert!(PixelGrid::from_columns(vec![vec![c(1)], vec![]]).is_err());
}

#[test]
fn expand_centers_with_floor_offsets() {
    let (big, offset) = sample().expand(9).unwrap();
    assert_eq!((big.width(), big.height()), (9, 9));
    assert_eq!(offset, (3, 3));
    assert_eq!(big.get(3, 3), c(1));
    assert_eq!(big.get(4, 4), c(5));
    assert_eq!(big.iter().filter(|(_, _, p)| p.is_some()).count(), 4);
}

#[test]
fn expand_then_crop_round_trips() {
    let g = sample();
    for side in [3, 4, 9, 10] {
        let (big, offset) = g.expand(side).unwrap();
        assert_eq!(big.crop(offset, g.width(), g.height()).unwrap(), g);
    }
}

#[test]
fn expand_never_discards_pixels() {
    assert!(sample().expand(2).is_err());
    assert!(sample().crop((2, 0), 2, 3).is_err());
}

#[test]
fn serde_round_trips_nested_arrays() {
    let json = serde_json::to_string(&sample()).unwrap();
    assert_eq!(
        json,
        r##"[["#010101",null,"#030303"],["#040404","#050505",null]]"##
    );
    let back: PixelGrid = serde_json::from_str(&json).unwrap();
    assert_eq!(back, sample());
}
