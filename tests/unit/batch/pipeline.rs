use super::*;
use crate::batch::artifacts::MemoryArtifactStore;
use crate::foundation::core::Rgb;
use crate::foundation::error::LaserCatError;
use crate::foundation::random::{ScriptedRandom, SeededRandom};
use crate::genotype::decode::Genotype;
use crate::genotype::sprites::SpriteSheet;
use crate::render::warp::WarpConfig;
use image::AnimationDecoder;

const TWO_HEADED: &str = "0x0003";
const SINGLE_HEADED: &str = "0x0105";

fn record(id: &str, pose: &str, mint: u64) -> GenotypeRecord {
    GenotypeRecord::parse_line(&format!(
        "0,{id},Pale,x,{pose},Left,Smiling,Striped,Blue,a,b,c,d,e,f,{mint}"
    ))
    .unwrap()
}

/// 10 x 7 sprite, mostly blue with a white diagonal.
fn sprite() -> ParsedSprite {
    let blue = Some(Rgb::new(40, 60, 200));
    let white = Some(Rgb::new(240, 240, 240));
    let columns = (0..10)
        .map(|x| (0..7).map(|y| if x == y { white } else { blue }).collect())
        .collect();
    ParsedSprite {
        id: 77,
        data: PixelGrid::from_columns(columns).unwrap(),
    }
}

fn sheet() -> SpriteSheet {
    let mut sheet = SpriteSheet::new();
    for id in [TWO_HEADED, SINGLE_HEADED] {
        sheet.insert(&Genotype::parse(id).unwrap(), sprite());
    }
    sheet
}

fn tiny_config() -> BatchConfig {
    BatchConfig {
        canvas_size: 24,
        star_count: 3,
        warp: WarpConfig {
            steps: 6,
            save_every: 3,
            ..WarpConfig::default()
        },
        ripple_single_frames: 1,
        ..BatchConfig::default()
    }
}

fn plan(id: &str, flags: TraitFlags) -> RecordPlan {
    let record = record(id, "Standing", 1);
    RecordPlan {
        ordinal: 4,
        flags: TraitFlags {
            two_headed: record.genotype.is_two_headed(),
            ..flags
        },
        record,
        stripes: StripePattern::Outer,
        sprite: sprite(),
        stars: None,
    }
}

fn gif_frames(bytes: &[u8]) -> usize {
    let decoder = image::codecs::gif::GifDecoder::new(std::io::Cursor::new(bytes)).unwrap();
    decoder.into_frames().collect_frames().unwrap().len()
}

#[test]
fn draws_follow_the_fixed_stream_order() {
    // unassigned pose; two-headed: no rainbow, then space background; stripe draw 2
    let records = vec![record(TWO_HEADED, "Lounging", 5)];
    let mut rng = ScriptedRandom::new([1, 0, 2]).with_units([0.5]);
    let mut seen = Vec::new();

    let (traits, drafts) = plan_batch(&records, &sheet(), &tiny_config(), &mut rng, |p| {
        seen.push((p.stripes, p.stars.as_ref().map(Vec::len)));
        Ok(())
    })
    .unwrap();

    assert_eq!(rng.drawn(), 3);
    assert_eq!(seen, vec![(StripePattern::Checker, Some(3))]);
    assert_eq!(traits.get(0).unwrap().to_string(), "100100");
    assert_eq!(drafts[0].laser_cat_id, 77);
}

#[test]
fn compose_grid_marks_and_expands() {
    let p = plan(SINGLE_HEADED, TraitFlags::default());
    let grid = compose_grid(&p, &tiny_config()).unwrap();
    // extent 10 plus margin 6
    assert_eq!((grid.width(), grid.height()), (16, 16));
    // design 1 marks (4, 5) and (8, 5); the 10x7 sprite lands at offset (3, 4)
    assert_eq!(grid.get(7, 9), Some(Rgb::RED));
    assert_eq!(grid.get(11, 9), Some(Rgb::RED));
    assert_eq!(grid.iter().filter(|(_, _, c)| *c == Some(Rgb::RED)).count(), 2);

    let two = plan(TWO_HEADED, TraitFlags::default());
    let grid = compose_grid(&two, &tiny_config()).unwrap();
    assert!(grid.iter().all(|(_, _, c)| c != Some(Rgb::RED)));
}

#[test]
fn plain_and_laser_eye_records_render_stills() {
    let mut store = MemoryArtifactStore::new();
    let p = plan(
        SINGLE_HEADED,
        TraitFlags {
            laser_eyes: true,
            ..TraitFlags::default()
        },
    );
    assert_eq!(p.artifact(), ArtifactKind::Still);
    render_record(&p, &tiny_config(), &mut store).unwrap();

    let png = store.image(ArtifactKind::Still, 4).unwrap();
    let img = image::load_from_memory(png).unwrap();
    assert_eq!((img.width(), img.height()), (24, 24));
}

#[test]
fn laser_show_renders_a_ten_frame_loop() {
    let mut store = MemoryArtifactStore::new();
    let p = plan(
        SINGLE_HEADED,
        TraitFlags {
            laser_eyes: true,
            laser_show: true,
            ..TraitFlags::default()
        },
    );
    render_record(&p, &tiny_config(), &mut store).unwrap();

    assert_eq!(store.kinds_of(4), vec![ArtifactKind::LaserLoop]);
    assert_eq!(gif_frames(store.image(ArtifactKind::LaserLoop, 4).unwrap()), 10);
}

#[test]
fn distorted_laser_show_interleaves_three_sources() {
    let mut store = MemoryArtifactStore::new();
    let mut p = plan(
        SINGLE_HEADED,
        TraitFlags {
            distorted: true,
            laser_eyes: true,
            laser_show: true,
            space_background: true,
            ..TraitFlags::default()
        },
    );
    p.stars = Some(draw_stars(&mut SeededRandom::new(3), 24, 24, 3));
    let cfg = BatchConfig {
        keep_frames: true,
        ..tiny_config()
    };
    render_record(&p, &cfg, &mut store).unwrap();

    assert_eq!(gif_frames(store.image(ArtifactKind::Ripple, 4).unwrap()), 2);
    let labels: Vec<&str> = store
        .warp_frames
        .keys()
        .map(|(_, label, _)| label.as_str())
        .collect();
    assert_eq!(labels.len(), 6);
    assert!(labels.contains(&"frame2"));
}

#[test]
fn distorted_single_source_uses_the_short_schedule() {
    let mut store = MemoryArtifactStore::new();
    let p = plan(
        TWO_HEADED,
        TraitFlags {
            distorted: true,
            ..TraitFlags::default()
        },
    );
    render_record(&p, &tiny_config(), &mut store).unwrap();

    assert_eq!(gif_frames(store.image(ArtifactKind::Ripple, 4).unwrap()), 1);
    assert!(store.warp_frames.is_empty());
}

#[test]
fn distorted_ripple_always_carries_first_beams() {
    let render = |laser_eyes: bool| {
        let mut store = MemoryArtifactStore::new();
        let p = plan(
            SINGLE_HEADED,
            TraitFlags {
                distorted: true,
                laser_eyes,
                ..TraitFlags::default()
            },
        );
        render_record(&p, &tiny_config(), &mut store).unwrap();
        store.image(ArtifactKind::Ripple, 4).unwrap().to_vec()
    };
    assert_eq!(render(false), render(true));

    let p = plan(SINGLE_HEADED, TraitFlags::default());
    let grid = compose_grid(&p, &tiny_config()).unwrap();
    let reds = |g: &PixelGrid| g.iter().filter(|(_, _, c)| *c == Some(Rgb::RED)).count();
    let design = p.record.genotype.design();
    assert!(reds(&with_beams(&grid, design, BeamFrame::First)) > reds(&grid));
}

#[test]
fn batch_writes_one_artifact_and_metadata_per_record() {
    let records: Vec<GenotypeRecord> = (0..8)
        .map(|i| {
            let id = if i % 2 == 0 { TWO_HEADED } else { SINGLE_HEADED };
            let pose = ["Standing", "Sleeping", "Pouncing", "Stalking"][i % 4];
            record(id, pose, i as u64)
        })
        .collect();
    let mut store = MemoryArtifactStore::new();
    let summary = run_batch(
        &records,
        &sheet(),
        &tiny_config(),
        &mut SeededRandom::new(11),
        &mut store,
    )
    .unwrap();

    assert_eq!(summary.metadata.len(), 8);
    assert_eq!(store.metadata.len(), 8);
    assert!(store.report.is_some());
    for (ordinal, meta) in summary.metadata.iter().enumerate() {
        assert_eq!(meta.name, format!("LaserCat {ordinal}"));
        assert_eq!(store.kinds_of(ordinal).len(), 1);
        let tier = meta.attributes.last().unwrap();
        assert_eq!(tier.trait_type, "Tier");
    }
}

#[test]
fn trait_only_run_matches_full_run() {
    let records: Vec<GenotypeRecord> = (0..6)
        .map(|i| {
            let id = if i < 3 { TWO_HEADED } else { SINGLE_HEADED };
            record(id, "Standing", i)
        })
        .collect();
    let cfg = tiny_config();

    let assessed = assess_batch(&records, &sheet(), &cfg, &mut SeededRandom::new(5)).unwrap();
    let full = run_batch(
        &records,
        &sheet(),
        &cfg,
        &mut SeededRandom::new(5),
        &mut MemoryArtifactStore::new(),
    )
    .unwrap();

    assert_eq!(assessed.metadata, full.metadata);
    assert_eq!(assessed.report, full.report);
}

#[test]
fn missing_sprites_abort_the_batch() {
    let records = vec![record("0x0a0b", "Standing", 1)];
    let err =
        assess_batch(&records, &sheet(), &tiny_config(), &mut SeededRandom::new(1)).unwrap_err();
    assert!(matches!(err, LaserCatError::Decode(_)));
}
