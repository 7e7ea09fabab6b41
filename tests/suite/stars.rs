//! Symbolic-star registries and custom stages wired through the builder.

use std::sync::Arc;

use liuyao_core::providers::DefaultNajiaProvider;
use liuyao_core::stage::NajiaStage;
use liuyao_core::{DivinationBuilder, DivinationError, PipelineContext, Stage, SymbolicStarRegistry};
use liuyao_types::{BranchSet, EarthlyBranch, FourSymbol, SixSpirit, SymbolicStar};

use crate::common::{init_tracing, jia_zi_noon, jia_zi_time};

fn builder() -> DivinationBuilder {
    DivinationBuilder::new(jia_zi_noon())
        .with_inquiry_time(jia_zi_time())
        .use_four_symbols([FourSymbol::YoungYang; 6])
}

#[test]
fn custom_star_joins_the_defaults() {
    init_tracing();
    let world_branch = SymbolicStar::custom("WorldBranch");
    let never = SymbolicStar::custom("Never");

    let divination = builder()
        .with_najia()
        .with_position()
        .with_symbolic_stars_configured(|registry| {
            registry.add(world_branch.clone(), |_, instance| {
                let branch = instance.world_line()?.stem_branch().ok()?.branch;
                Some(BranchSet::of(&[branch]))
            });
            registry.add(never.clone(), |_, _| None);
        })
        .build()
        .unwrap();

    let stars = divination.symbolic_stars().unwrap();
    // The Creative's world line is Ren-Xu.
    assert_eq!(
        stars.get(&world_branch),
        Some(BranchSet::of(&[EarthlyBranch::Xu]))
    );
    assert!(stars.has_star(EarthlyBranch::Xu, &world_branch));
    assert_eq!(stars.get(&never), None);
    assert_eq!(stars.len(), SymbolicStar::builtins().len() + 1);
}

#[test]
fn duplicate_registration_keeps_the_first_calculator() {
    let divination = builder()
        .with_symbolic_stars_configured(|registry| {
            let added = registry.add(SymbolicStar::NOBLEMAN, |_, _| {
                Some(BranchSet::of(&[EarthlyBranch::Zi]))
            });
            assert!(!added);
        })
        .build()
        .unwrap();

    let nobleman = divination
        .symbolic_stars()
        .unwrap()
        .get(&SymbolicStar::NOBLEMAN)
        .unwrap();
    assert!(!nobleman.contains(EarthlyBranch::Zi));
    assert!(nobleman.contains(EarthlyBranch::Chou));
}

#[test]
fn body_stars_need_a_world_line() {
    // Without the position stage there is no hexagram body.
    let divination = builder().with_symbolic_stars().build().unwrap();
    let stars = divination.symbolic_stars().unwrap();
    assert_eq!(stars.len(), SymbolicStar::builtins().len() - 2);
    assert_eq!(stars.get(&SymbolicStar::MARRIAGE_BED), None);
    assert_eq!(stars.get(&SymbolicStar::BRIDAL_CHAMBER), None);
}

#[test]
fn explicit_registry_replaces_defaults() {
    let mut registry = SymbolicStarRegistry::empty();
    registry.add(SymbolicStar::custom("DayBranch"), |time, _| {
        Some(BranchSet::of(&[time.day_branch()]))
    });

    let divination = builder()
        .with_symbolic_star_registry(registry)
        .build()
        .unwrap();
    let stars = divination.symbolic_stars().unwrap();
    assert_eq!(stars.len(), 1);
    assert_eq!(
        stars.stars_for_branch(EarthlyBranch::Zi).count(),
        1,
        "Jia-Zi day"
    );
}

#[test]
fn no_star_stage_leaves_stars_absent() {
    let divination = builder().with_najia().build().unwrap();
    assert!(divination.symbolic_stars().is_none());
}

struct PaintTigers;

impl Stage for PaintTigers {
    fn name(&self) -> &'static str {
        "paint-tigers"
    }

    fn execute(&self, context: &mut PipelineContext) -> Result<(), DivinationError> {
        for line in context.original_mut().lines_mut() {
            line.set_six_spirit(SixSpirit::WhiteTiger);
        }
        Ok(())
    }
}

#[test]
fn custom_stage_runs_after_defaults() {
    let divination = builder()
        .with_default_stages()
        .with_stage(PaintTigers)
        .build()
        .unwrap();
    assert!(
        divination
            .original()
            .lines()
            .iter()
            .all(|line| line.six_spirit() == Some(SixSpirit::WhiteTiger))
    );
}

#[test]
fn stages_can_be_assembled_by_hand() {
    let divination = builder()
        .with_stage(NajiaStage::new(Arc::new(DefaultNajiaProvider)))
        .build()
        .unwrap();
    let original = divination.original();
    assert!(original.lines().iter().all(|line| line.stem_branch().is_ok()));
    assert!(matches!(
        original.lines()[0].six_kin(),
        Err(DivinationError::NotYetComputed {
            annotation: "six-kin",
            ..
        })
    ));
}
