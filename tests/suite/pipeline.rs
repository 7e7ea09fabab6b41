//! End-to-end pipeline scenarios over the default stages.

use std::array;

use liuyao_calendar::CalendarError;
use liuyao_core::{Divination, DivinationBuilder, DivinationError};
use liuyao_types::{
    EarthlyBranch, Element, FourSymbol, HeavenlyStem, Hexagram, LinePosition, Position, SixKin,
    SixSpirit, StemBranch, SymbolicStar,
};

use crate::common::{at, init_tracing, ji_si_noon, jia_zi_noon, jia_zi_time};

fn symbols(hexagram: Hexagram, mask: u8) -> [FourSymbol; 6] {
    array::from_fn(|index| {
        FourSymbol::from_parts(hexagram.line(index), (mask >> index) & 1 == 1)
    })
}

fn build(symbols: [FourSymbol; 6]) -> Divination {
    DivinationBuilder::new(jia_zi_noon())
        .with_inquiry_time(jia_zi_time())
        .use_four_symbols(symbols)
        .with_default_stages()
        .build()
        .unwrap()
}

#[test]
fn pure_creative_on_jia_day() {
    init_tracing();
    let divination = build([FourSymbol::YoungYang; 6]);
    let original = divination.original();

    assert_eq!(original.hexagram(), Hexagram::TheCreative);
    assert!(divination.changed().is_none());
    assert_eq!(divination.inquiry_time().day_stem(), HeavenlyStem::Jia);

    assert_eq!(original.world_line().unwrap().position(), LinePosition::Sixth);
    assert_eq!(original.response_line().unwrap().position(), LinePosition::Third);

    let stem_branches: Vec<_> = original
        .lines()
        .iter()
        .map(|line| line.stem_branch().unwrap())
        .collect();
    let expected = [
        (HeavenlyStem::Jia, EarthlyBranch::Zi),
        (HeavenlyStem::Jia, EarthlyBranch::Yin),
        (HeavenlyStem::Jia, EarthlyBranch::Chen),
        (HeavenlyStem::Ren, EarthlyBranch::Wu),
        (HeavenlyStem::Ren, EarthlyBranch::Shen),
        (HeavenlyStem::Ren, EarthlyBranch::Xu),
    ]
    .map(|(stem, branch)| StemBranch::new(stem, branch));
    assert_eq!(stem_branches, expected);

    let kins: Vec<_> = original.lines().iter().map(|line| line.six_kin().unwrap()).collect();
    assert_eq!(
        kins,
        [
            SixKin::Offspring,
            SixKin::Wealth,
            SixKin::Parent,
            SixKin::Officer,
            SixKin::Sibling,
            SixKin::Parent,
        ]
    );

    // All five kins are visible, so nothing hides.
    assert!(original.lines().iter().all(|line| line.hidden_deity().is_none()));

    let spirits: Vec<_> = original
        .lines()
        .iter()
        .map(|line| line.six_spirit().unwrap())
        .collect();
    assert_eq!(spirits, SixSpirit::ALL);

    let stars = divination.symbolic_stars().unwrap();
    assert_eq!(stars.len(), SymbolicStar::builtins().len());
    assert!(stars.iter().all(|(_, branches)| !branches.is_empty()));
    assert_eq!(
        stars.get(&SymbolicStar::NOBLEMAN).unwrap().iter().collect::<Vec<_>>(),
        [EarthlyBranch::Chou, EarthlyBranch::Wei]
    );
}

#[test]
fn changed_hexagram_flips_changing_lines() {
    for &hexagram in Hexagram::ALL {
        for mask in [0b000_001, 0b100_100, 0b010_110, 0b111_111] {
            let divination = build(symbols(hexagram, mask));
            let changed = divination.changed().unwrap();
            assert_eq!(changed.hexagram().value(), hexagram.value() ^ mask);
            assert_eq!(divination.original().changing_mask(), mask);
            // The changed hexagram carries no movement of its own.
            assert_eq!(changed.changing_mask(), 0);
        }
        assert!(build(symbols(hexagram, 0)).changed().is_none());
    }
}

#[test]
fn every_hexagram_is_fully_annotated() {
    for &hexagram in Hexagram::ALL {
        let divination = build(symbols(hexagram, 0b001_001));
        let original = divination.original();

        let worlds: Vec<_> = original
            .lines()
            .iter()
            .filter(|line| line.role() == Some(Position::World))
            .collect();
        let responses: Vec<_> = original
            .lines()
            .iter()
            .filter(|line| line.role() == Some(Position::Response))
            .collect();
        assert_eq!(worlds.len(), 1, "{hexagram}");
        assert_eq!(responses.len(), 1, "{hexagram}");
        assert_eq!(
            responses[0].position().index(),
            (worlds[0].position().index() + 3) % 6,
            "{hexagram}"
        );

        for line in original.lines() {
            assert!(line.stem_branch().is_ok());
            assert!(line.six_kin().is_ok());
            assert!(line.six_spirit().is_some());
        }

        // The changed hexagram gets stem-branches and kins but no roles,
        // spirits or hidden deities.
        for line in divination.changed().unwrap().lines() {
            assert!(line.stem_branch().is_ok());
            assert!(line.six_kin().is_ok());
            assert_eq!(line.role(), None);
            assert_eq!(line.six_spirit(), None);
            assert_eq!(line.hidden_deity(), None);
        }
    }
}

#[test]
fn coming_to_meet_hides_wealth_under_second_line() {
    let divination = build(symbols(Hexagram::ComingToMeet, 0));
    let hidden: Vec<_> = divination
        .original()
        .lines()
        .iter()
        .filter_map(|line| line.hidden_deity().map(|deity| (line.position(), deity)))
        .collect();

    assert_eq!(hidden.len(), 1);
    let (position, deity) = hidden[0];
    assert_eq!(position, LinePosition::Second);
    assert_eq!(deity.six_kin, SixKin::Wealth);
    assert_eq!(
        deity.stem_branch,
        StemBranch::new(HeavenlyStem::Jia, EarthlyBranch::Yin)
    );
}

#[test]
fn six_spirits_start_from_day_stem() {
    let divination = DivinationBuilder::new(ji_si_noon())
        .use_four_symbols([FourSymbol::YoungYin; 6])
        .with_default_stages()
        .build()
        .unwrap();

    assert_eq!(divination.inquiry_time().day_stem(), HeavenlyStem::Ji);
    let first = divination.original().line(LinePosition::First);
    assert_eq!(first.six_spirit(), Some(SixSpirit::CoiledSnake));
    let top = divination.original().line(LinePosition::Sixth);
    assert_eq!(top.six_spirit(), Some(SixSpirit::HookChen));
}

#[test]
fn building_twice_gives_equal_results() {
    let input = symbols(Hexagram::Standstill, 0b000_110);
    assert_eq!(build(input), build(input));
}

#[test]
fn convenience_constructors_match_builder() {
    let solar = jia_zi_noon();

    let by_symbols = Divination::from_four_symbols(solar, [FourSymbol::YoungYang; 6]).unwrap();
    assert_eq!(by_symbols, build([FourSymbol::YoungYang; 6]));

    let by_values = Divination::from_four_symbol_values(solar, &[7, 7, 7, 7, 7, 7]).unwrap();
    assert_eq!(by_values, by_symbols);

    let by_time = Divination::from_time(solar).unwrap();
    let built = DivinationBuilder::new(solar)
        .use_time_based()
        .with_default_stages()
        .build()
        .unwrap();
    assert_eq!(by_time, built);
    assert!(by_time.changed().is_some());

    let by_hexagrams =
        Divination::from_hexagrams(solar, Hexagram::TheCreative, Some(Hexagram::TheReceptive))
            .unwrap();
    assert_eq!(by_hexagrams.original().changing_mask(), 0b111_111);
    assert_eq!(
        by_hexagrams.changed().unwrap().hexagram(),
        Hexagram::TheReceptive
    );
}

#[test]
fn numbers_pick_trigrams_and_changing_line() {
    // 1 is Qian above, 8 wraps to Kun below; 6 moves the top line.
    let divination = Divination::from_numbers(jia_zi_noon(), 1, 8, Some(6)).unwrap();
    let original = divination.original();
    assert_eq!(original.hexagram(), Hexagram::Standstill);
    assert_eq!(original.changing_mask(), 0b100_000);
    assert_eq!(
        divination.changed().unwrap().hexagram().value(),
        Hexagram::Standstill.value() ^ 0b100_000
    );
}

#[test]
fn numbers_without_changing_line_use_day_branch() {
    // Jia-Zi day: 1 + 1 + Zi(1) = 3 moves the third line.
    let divination = Divination::from_numbers(jia_zi_noon(), 1, 1, None).unwrap();
    assert_eq!(divination.original().changing_mask(), 0b000_100);
}

#[test]
fn numbers_accept_the_full_u32_range() {
    // (2^32 - 1) + 1 + Zi(1) is 5 mod 6, so the fifth line moves.
    let divination = Divination::from_numbers(jia_zi_noon(), u32::MAX, 1, None).unwrap();
    assert_eq!(divination.original().changing_mask(), 0b010_000);
}

#[test]
fn time_casting_sums_year_month_day_and_hour() {
    let divination = Divination::from_time(jia_zi_noon()).unwrap();
    let time = divination.inquiry_time();
    let lunar = time.lunar().date;
    assert_eq!(time.year_branch(), EarthlyBranch::Mao);
    assert_eq!((lunar.month, lunar.day), (11, 20));
    assert_eq!(time.hour_branch(), EarthlyBranch::Wu);

    // Mao(4) + 11 + 20 = 35 → Li above; 35 + Wu(7) = 42 → Dui below and,
    // being 0 mod 6, the top line moves.
    let original = divination.original();
    assert_eq!(original.hexagram(), Hexagram::Opposition);
    assert_eq!(original.changing_mask(), 0b100_000);
}

#[test]
fn bad_inputs_are_rejected() {
    let solar = jia_zi_noon();

    let err = DivinationBuilder::new(solar).with_default_stages().build().unwrap_err();
    assert_eq!(err, DivinationError::NoHexagramSelected);

    let err = Divination::from_four_symbol_values(solar, &[7, 8, 9]).unwrap_err();
    assert!(matches!(err, DivinationError::InvalidFourSymbols(_)));

    let err = Divination::from_four_symbol_values(solar, &[7, 8, 9, 6, 7, 5]).unwrap_err();
    assert!(matches!(err, DivinationError::InvalidFourSymbols(_)));

    let err = Divination::from_time(at(0, (1850, 6, 1), (0, 0, 0))).unwrap_err();
    assert_eq!(
        err,
        DivinationError::Calendar(CalendarError::OutOfRange { year: 1850 })
    );
}

#[test]
fn result_serializes_as_plain_data() {
    let divination = build([FourSymbol::YoungYang; 6]);
    let json = serde_json::to_value(&divination).unwrap();

    assert_eq!(json["original"]["hexagram"], "TheCreative");
    assert!(json["changed"].is_null());

    let lines = json["original"]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0]["stem_branch"]["stem"], "Jia");
    assert_eq!(lines[0]["stem_branch"]["branch"], "Zi");
    assert_eq!(lines[0]["six_spirit"], "AzureDragon");
    assert_eq!(lines[5]["role"], "World");
    assert_eq!(lines[2]["role"], "Response");
    assert!(lines[1]["role"].is_null());

    assert_eq!(
        json["symbolic_stars"]["Nobleman"],
        serde_json::json!(["Chou", "Wei"])
    );
    assert_eq!(json["inquiry_time"]["pillars"]["day"]["stem"], "Jia");
}
