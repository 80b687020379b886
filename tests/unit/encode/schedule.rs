use super::*;
use crate::encode::sink::{Disposal, InMemoryAnimationSink};

fn cfg() -> AnimationConfig {
    AnimationConfig {
        width: 4,
        height: 4,
        delay_ms: 100,
        disposal: Disposal::Background,
    }
}

fn small_warp() -> WarpConfig {
    WarpConfig {
        steps: 12,
        save_every: 3,
        ..WarpConfig::default()
    }
}

#[test]
fn interleave_picks_sources_by_position() {
    assert_eq!(interleaved_source(27), 2);
    assert_eq!(interleaved_source(7), 0);
    assert_eq!(interleaved_source(0), 1);
    assert_eq!(interleaved_source(14), 1);
    assert_eq!(interleaved_source(15), 0);
    assert_eq!(interleaved_source(39), 2);
    assert_eq!(interleaved_source(49), 0);

    let from_two: Vec<usize> = (0..50).filter(|&i| interleaved_source(i) == 2).collect();
    assert_eq!(from_two.len(), 12);
}

#[test]
fn schedule_lengths() {
    assert_eq!(RippleSchedule::Single { frames: 17 }.len(50), 17);
    assert_eq!(RippleSchedule::Single { frames: 17 }.len(4), 4);
    assert_eq!(RippleSchedule::Interleaved.len(50), 50);
}

#[test]
fn laser_loop_follows_blink_pattern() {
    let frames = [
        Frame::filled(4, 4, [0, 0, 0, 255]),
        Frame::filled(4, 4, [1, 1, 1, 255]),
        Frame::filled(4, 4, [2, 2, 2, 255]),
    ];
    let mut sink = InMemoryAnimationSink::new();
    play_laser_loop(&mut sink, cfg(), &frames).unwrap();

    let shades: Vec<u8> = sink.frames().iter().map(|(_, f)| f.data[0]).collect();
    assert_eq!(shades, vec![1, 0, 1, 0, 0, 2, 0, 2, 0, 0]);
    assert!(sink.is_finished());
}

#[test]
fn single_source_ripple_stops_at_schedule_length() {
    let src = Frame::filled(4, 4, [9, 9, 9, 255]);
    let mut sink = InMemoryAnimationSink::new();
    let mut kept = 0;
    play_ripple(
        &mut sink,
        cfg(),
        std::slice::from_ref(&src),
        &small_warp(),
        RippleSchedule::Single { frames: 3 },
        false,
        |_, _, _| {
            kept += 1;
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(kept, 0);
    let positions: Vec<usize> = sink.frames().iter().map(|(p, _)| *p).collect();
    assert_eq!(positions, vec![0, 1, 2]);
    assert_eq!(sink.config().map(|c| c.disposal), Some(Disposal::Background));
}

#[test]
fn interleaved_ripple_uses_scheduled_sources() {
    let sources = vec![
        Frame::filled(4, 4, [10, 10, 10, 255]),
        Frame::filled(4, 4, [20, 20, 20, 255]),
        Frame::filled(4, 4, [30, 30, 30, 255]),
    ];
    let mut sink = InMemoryAnimationSink::new();
    play_ripple(
        &mut sink,
        cfg(),
        &sources,
        &small_warp(),
        RippleSchedule::Interleaved,
        false,
        |_, _, _| Ok(()),
    )
    .unwrap();

    // Uniform sources survive the warp, so each frame shows which source fed it.
    let shades: Vec<u8> = sink.frames().iter().map(|(_, f)| f.data[0]).collect();
    assert_eq!(shades, vec![20, 20, 20, 20]);
}

#[test]
fn keep_all_reports_every_warped_source() {
    let sources = vec![Frame::filled(4, 4, [1, 1, 1, 255]); 3];
    let mut sink = InMemoryAnimationSink::new();
    let mut kept = Vec::new();
    play_ripple(
        &mut sink,
        cfg(),
        &sources,
        &small_warp(),
        RippleSchedule::Interleaved,
        true,
        |source, index, _| {
            kept.push((source, index));
            Ok(())
        },
    )
    .unwrap();

    assert_eq!(kept.len(), 12);
    assert_eq!(kept[0], (0, 0));
    assert_eq!(kept[11], (2, 3));
    assert_eq!(sink.frames().len(), 4);
}

#[test]
fn ripple_rejects_wrong_source_count() {
    let mut sink = InMemoryAnimationSink::new();
    let err = play_ripple(
        &mut sink,
        cfg(),
        &[],
        &small_warp(),
        RippleSchedule::Interleaved,
        false,
        |_, _, _| Ok(()),
    )
    .unwrap_err();
    assert!(err.to_string().contains("needs 3 sources"));
}
