//! Settings loaded through `liuyao-config` and applied to the builder.

use std::fs;

use liuyao_core::DivinationBuilder;
use liuyao_types::settings::DivinationSettings;
use liuyao_types::{FourSymbol, LinePosition, SixKin, SixSpirit, SymbolicStar};
use tempfile::tempdir;

use crate::common::{ji_si_noon, jia_zi_noon};

const PAIRED_OWN: &str = r#"
[six_spirit]
scheme = "paired"

[six_kin]
changed_palace = "own"

[symbolic_stars]
disabled = ["PeachBlossom", "DeathSpirit"]
"#;

#[test]
fn settings_drive_the_default_stages() {
    let settings = liuyao_config::parse(PAIRED_OWN).unwrap();
    let divination = DivinationBuilder::new(ji_si_noon())
        .with_settings(&settings)
        .use_four_symbols([FourSymbol::YoungYin; 6])
        .with_default_stages()
        .build()
        .unwrap();

    let first = divination.original().line(LinePosition::First);
    assert_eq!(first.six_spirit(), Some(SixSpirit::HookChen));

    let stars = divination.symbolic_stars().unwrap();
    assert_eq!(stars.len(), SymbolicStar::builtins().len() - 2);
    assert_eq!(stars.get(&SymbolicStar::PEACH_BLOSSOM), None);
    assert_eq!(stars.get(&SymbolicStar::DEATH_SPIRIT), None);
}

#[test]
fn changed_palace_setting_reaches_six_kin() {
    // The Creative with its upper trigram moving becomes Peace; Peace's
    // fourth line is earth, a Sibling only when read in Peace's own palace.
    let mut symbols = [FourSymbol::YoungYang; 6];
    symbols[3..].fill(FourSymbol::OldYang);

    let by_default = DivinationBuilder::new(jia_zi_noon())
        .use_four_symbols(symbols)
        .with_default_stages()
        .build()
        .unwrap();
    let fourth = by_default.changed().unwrap().line(LinePosition::Fourth);
    assert_eq!(fourth.six_kin().unwrap(), SixKin::Parent);

    let settings = liuyao_config::parse(PAIRED_OWN).unwrap();
    let by_own = DivinationBuilder::new(jia_zi_noon())
        .with_settings(&settings)
        .use_four_symbols(symbols)
        .with_default_stages()
        .build()
        .unwrap();
    let fourth = by_own.changed().unwrap().line(LinePosition::Fourth);
    assert_eq!(fourth.six_kin().unwrap(), SixKin::Sibling);
}

#[test]
fn settings_only_affect_later_stages() {
    let settings = liuyao_config::parse(PAIRED_OWN).unwrap();
    let divination = DivinationBuilder::new(ji_si_noon())
        .use_four_symbols([FourSymbol::YoungYin; 6])
        .with_default_stages()
        .with_settings(&settings)
        .build()
        .unwrap();

    let first = divination.original().line(LinePosition::First);
    assert_eq!(first.six_spirit(), Some(SixSpirit::CoiledSnake));
    let stars = divination.symbolic_stars().unwrap();
    assert!(stars.get(&SymbolicStar::PEACH_BLOSSOM).is_some());
}

#[test]
fn settings_load_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[calendar]\nutc_offset_minutes = 0\n").unwrap();

    let settings = liuyao_config::load_from(&path).unwrap();
    assert_eq!(settings.calendar_offset().minutes(), 0);
    assert_eq!(
        settings.six_spirit_scheme(),
        DivinationSettings::default().six_spirit_scheme()
    );

    let solar = jia_zi_noon();
    let divination = DivinationBuilder::new(solar)
        .with_settings(&settings)
        .use_time_based()
        .with_default_stages()
        .build()
        .unwrap();
    assert_eq!(divination.inquiry_time().solar(), solar);
    assert_eq!(divination.original().lines().len(), 6);
}
