//! LaserCat turns a collection of genotype records into trait metadata, rarity tiers and pixel-art
//! artifacts.
//!
//! A batch runs in three phases:
//!
//! - allocate rare archetypes across the whole collection
//! - per record: assign traits, composite the sprite, and render a still or an animation
//! - rank the collection into dense rarity tiers and write metadata
//!
//! Every random decision comes from one [`RandomSource`], consumed in a fixed order, so a seed
//! reproduces a batch exactly.
#![forbid(unsafe_code)]

mod batch;
mod encode;
mod foundation;
mod genotype;
mod render;
mod traits;

pub use crate::foundation::core::{Rgb, Rgba8Premul};
pub use crate::foundation::error::{LaserCatError, LaserCatResult};
pub use crate::foundation::math::is_prime;
pub use crate::foundation::random::{RandomSource, ScriptedRandom, SeededRandom};

pub use crate::genotype::decode::{CountingMode, Genotype};
pub use crate::genotype::record::{GenotypeRecord, Pose, parse_records, read_records};
pub use crate::genotype::sprites::{ParsedSprite, SpriteParser, SpriteSheet};

pub use crate::render::frame::{BlockLayout, Frame, rasterize};
pub use crate::render::grid::PixelGrid;
pub use crate::render::overlay::{BeamDirection, BeamFrame, paint_markers, with_beams};
pub use crate::render::palette::{ColorCounts, StripePattern, recolor, stripe_color};
pub use crate::render::starfield::{Star, draw_stars, paint_sky};
pub use crate::render::warp::{Ripple, RippleRun, WarpConfig, warp_step};

pub use crate::encode::gif_sink::GifSink;
pub use crate::encode::schedule::{
    LASER_LOOP, RippleSchedule, interleaved_source, play_laser_loop, play_ripple,
};
pub use crate::encode::sink::{AnimationConfig, AnimationSink, Disposal, InMemoryAnimationSink};

pub use crate::traits::archetype::{
    ArchetypeCode, ArchetypeFlags, ArchetypeMatch, ArchetypeTable, Pool, allocate_archetypes,
};
pub use crate::traits::assign::{TraitFlags, TraitTable, TraitVector, assign_traits};
pub use crate::traits::rarity::{RarityReport, TierMap, TierSummary};

pub use crate::batch::artifacts::{
    ArtifactKind, ArtifactStore, FsArtifactStore, MemoryArtifactStore, artifact_stem,
};
pub use crate::batch::config::BatchConfig;
pub use crate::batch::metadata::{Attribute, Metadata, MetadataDraft, TraitValue};
pub use crate::batch::pipeline::{
    BatchSummary, RecordPlan, assess_batch, compose_grid, plan_batch, render_record, run_batch,
};
