//! Batch driver: one pass over the collection, then tiering.
//!
//! The random stream is consumed in a fixed order: processing-order permutation, the two pool
//! shuffles, then per record its trait draws, its stripe draw and (for space backgrounds) its
//! star draws. Rendering itself never draws, so a trait-only run sees the same traits as a full
//! run with the same seed.

use crate::batch::artifacts::{ArtifactKind, ArtifactStore};
use crate::batch::config::BatchConfig;
use crate::batch::metadata::{Metadata, MetadataDraft};
use crate::encode::gif_sink::GifSink;
use crate::encode::schedule::{RippleSchedule, play_laser_loop, play_ripple};
use crate::encode::sink::{AnimationConfig, Disposal};
use crate::foundation::error::{LaserCatError, LaserCatResult};
use crate::foundation::random::RandomSource;
use crate::genotype::record::GenotypeRecord;
use crate::genotype::sprites::{ParsedSprite, SpriteParser};
use crate::render::frame::{Frame, rasterize};
use crate::render::grid::PixelGrid;
use crate::render::overlay::{BeamFrame, paint_markers, with_beams};
use crate::render::palette::{StripePattern, recolor};
use crate::render::starfield::{Star, draw_stars, paint_sky};
use crate::traits::archetype::{Pool, allocate_archetypes};
use crate::traits::assign::{TraitFlags, TraitTable, assign_traits};
use crate::traits::rarity::{RarityReport, TierMap};

/// Everything decided about one record before anything is drawn.
#[derive(Clone, Debug)]
pub struct RecordPlan {
    pub ordinal: usize,
    pub record: GenotypeRecord,
    pub flags: TraitFlags,
    pub stripes: StripePattern,
    pub sprite: ParsedSprite,
    /// Present only for space backgrounds.
    pub stars: Option<Vec<Star>>,
}

impl RecordPlan {
    /// Which artifact the record renders to.
    pub fn artifact(&self) -> ArtifactKind {
        if self.flags.distorted {
            ArtifactKind::Ripple
        } else if self.flags.laser_show {
            ArtifactKind::LaserLoop
        } else {
            ArtifactKind::Still
        }
    }
}

/// Outcome of a batch.
#[derive(Clone, Debug)]
pub struct BatchSummary {
    pub metadata: Vec<Metadata>,
    pub tiers: TierMap,
    pub report: RarityReport,
}

/// Decide the processing order, archetypes and per-record draws for the whole collection.
///
/// `visit` sees every plan in ordinal order; the returned drafts are in the same order.
#[tracing::instrument(skip_all, fields(records = records.len()))]
pub fn plan_batch(
    records: &[GenotypeRecord],
    sprites: &dyn SpriteParser,
    config: &BatchConfig,
    rng: &mut dyn RandomSource,
    mut visit: impl FnMut(&RecordPlan) -> LaserCatResult<()>,
) -> LaserCatResult<(TraitTable, Vec<MetadataDraft>)> {
    config.validate()?;

    let ordered: Vec<GenotypeRecord> = rng
        .permutation(records.len())
        .into_iter()
        .map(|i| records[i].clone())
        .collect();
    let archetypes = allocate_archetypes(&ordered, rng);

    let mut traits = TraitTable::new();
    let mut drafts = Vec::with_capacity(ordered.len());
    for (ordinal, record) in ordered.into_iter().enumerate() {
        let found = archetypes.lookup(Pool::of(&record), ordinal);
        let flags = assign_traits(&record.genotype, ordinal, found, rng);
        traits.record(ordinal, flags.vector())?;

        let sprite = sprites.parse(&record.genotype)?;
        let stripes = StripePattern::from_draw(rng.int_in(0, 2));
        let stars = flags.space_background.then(|| {
            draw_stars(rng, config.canvas_size, config.canvas_size, config.star_count)
        });

        drafts.push(MetadataDraft::new(ordinal, &record, &flags, sprite.id));
        let plan = RecordPlan {
            ordinal,
            record,
            flags,
            stripes,
            sprite,
            stars,
        };
        tracing::debug!(
            ordinal,
            vector = %flags.vector(),
            genotype = %plan.record.genotype,
            "record planned"
        );
        visit(&plan)?;
    }
    Ok((traits, drafts))
}

/// Rank the collection, finalize metadata and build the report.
#[tracing::instrument(skip_all, fields(records = drafts.len()))]
pub fn finish_batch(
    traits: &TraitTable,
    drafts: Vec<MetadataDraft>,
) -> LaserCatResult<BatchSummary> {
    let tiers = TierMap::build(traits, drafts.len())?;
    let mut metadata = Vec::with_capacity(drafts.len());
    for (ordinal, draft) in drafts.into_iter().enumerate() {
        let vector = traits.get(ordinal).ok_or_else(|| {
            LaserCatError::invariant(format!("record {ordinal} has no trait vector"))
        })?;
        metadata.push(draft.finalize(tiers.require(vector)?));
    }
    let report = RarityReport::from_metadata(&metadata, &tiers);
    tracing::info!(tiers = tiers.tier_count(), "collection ranked");
    Ok(BatchSummary {
        metadata,
        tiers,
        report,
    })
}

/// Trait assignment and tiering only; nothing is rendered or stored.
pub fn assess_batch(
    records: &[GenotypeRecord],
    sprites: &dyn SpriteParser,
    config: &BatchConfig,
    rng: &mut dyn RandomSource,
) -> LaserCatResult<BatchSummary> {
    let (traits, drafts) = plan_batch(records, sprites, config, rng, |_| Ok(()))?;
    finish_batch(&traits, drafts)
}

/// Full batch: plan, render every record into `store`, rank, then write metadata and report.
///
/// The first failure aborts the batch.
#[tracing::instrument(skip_all, fields(records = records.len(), canvas = config.canvas_size))]
pub fn run_batch(
    records: &[GenotypeRecord],
    sprites: &dyn SpriteParser,
    config: &BatchConfig,
    rng: &mut dyn RandomSource,
    store: &mut dyn ArtifactStore,
) -> LaserCatResult<BatchSummary> {
    let (traits, drafts) = plan_batch(records, sprites, config, rng, |plan| {
        render_record(plan, config, store)
    })?;
    let summary = finish_batch(&traits, drafts)?;

    for (ordinal, meta) in summary.metadata.iter().enumerate() {
        store.write_metadata(ordinal, meta)?;
    }
    store.write_report(&summary.report)?;
    tracing::info!(records = summary.metadata.len(), "batch complete");
    Ok(summary)
}

/// Recolored, marked and expanded grid for a plan.
pub fn compose_grid(plan: &RecordPlan, config: &BatchConfig) -> LaserCatResult<PixelGrid> {
    let genotype = &plan.record.genotype;
    let mut grid = plan.sprite.data.clone();
    recolor(&mut grid, genotype.counting_mode(), plan.stripes, plan.flags.rainbow);
    if !plan.flags.two_headed {
        paint_markers(&mut grid, genotype.design());
    }
    let (expanded, _) = grid.expand(grid.extent() + config.expand_margin)?;
    Ok(expanded)
}

/// Render one planned record and write its artifact.
#[tracing::instrument(skip_all, fields(ordinal = plan.ordinal, kind = ?plan.artifact()))]
pub fn render_record(
    plan: &RecordPlan,
    config: &BatchConfig,
    store: &mut dyn ArtifactStore,
) -> LaserCatResult<()> {
    let grid = compose_grid(plan, config)?;
    let design = plan.record.genotype.design();
    let canvas = config.canvas_size;
    let sky = plan
        .stars
        .as_deref()
        .map(|stars| paint_sky(canvas, canvas, stars))
        .transpose()?;
    let draw = |beam: BeamFrame| rasterize(&with_beams(&grid, design, beam), canvas, sky.as_ref());

    let flags = plan.flags;
    match plan.artifact() {
        ArtifactKind::Ripple => {
            let (sources, schedule, labels): (Vec<Frame>, _, Vec<&str>) = if flags.laser_show {
                (
                    BeamFrame::ALL.iter().map(|&b| draw(b)).collect(),
                    RippleSchedule::Interleaved,
                    BeamFrame::ALL.iter().map(|b| b.label()).collect(),
                )
            } else {
                // frame-1 beams whether or not the record has laser eyes
                (
                    vec![draw(BeamFrame::First)],
                    RippleSchedule::Single {
                        frames: config.ripple_single_frames,
                    },
                    vec![BeamFrame::Rest.label()],
                )
            };

            let mut sink = GifSink::new();
            let ordinal = plan.ordinal;
            play_ripple(
                &mut sink,
                animation(canvas, config.ripple_delay_ms),
                &sources,
                &config.warp,
                schedule,
                config.keep_frames,
                |source, index, frame| {
                    store.write_warp_frame(ordinal, labels[source], index, &frame.encode_png()?)
                },
            )?;
            store.write_image(ArtifactKind::Ripple, ordinal, &sink.take_bytes()?)
        }
        ArtifactKind::LaserLoop => {
            let frames = BeamFrame::ALL.map(draw);
            let mut sink = GifSink::new();
            play_laser_loop(&mut sink, animation(canvas, config.laser_delay_ms), &frames)?;
            store.write_image(ArtifactKind::LaserLoop, plan.ordinal, &sink.take_bytes()?)
        }
        ArtifactKind::Still => {
            let beam = if flags.laser_eyes {
                BeamFrame::First
            } else {
                BeamFrame::Rest
            };
            store.write_image(ArtifactKind::Still, plan.ordinal, &draw(beam).encode_png()?)
        }
    }
}

fn animation(canvas: u32, delay_ms: u32) -> AnimationConfig {
    AnimationConfig {
        width: canvas,
        height: canvas,
        delay_ms,
        disposal: Disposal::Background,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/batch/pipeline.rs"]
mod tests;
