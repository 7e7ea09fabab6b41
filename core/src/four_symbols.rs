//! Four-symbol generation.
//!
//! Every input mode ends in the same place: six line states, first line
//! first, from which the builder derives the hexagram and its changing lines.

use std::array;

use liuyao_calendar::InquiryTime;
use liuyao_types::{EarthlyBranch, Element, FourSymbol, Hexagram, Trigram, YinYang};

use crate::error::DivinationError;

/// Six line states, index 0 being the first line.
pub type FourSymbols = [FourSymbol; 6];

/// Plum-blossom time casting: year branch + lunar month + lunar day picks
/// the upper trigram, adding the hour branch picks the lower trigram, and
/// the same total picks the changing line.
#[must_use]
pub fn from_time(time: &InquiryTime) -> FourSymbols {
    let lunar = time.lunar().date;
    let upper = u32::from(time.year_branch().value()) + u32::from(lunar.month) + u32::from(lunar.day);
    let lower = upper + u32::from(time.hour_branch().value());
    tracing::trace!(upper, lower, "Time casting numbers");
    from_trigram_numbers(upper, lower, lower)
}

/// Casting from two numbers. Without a changing-line number the line comes
/// from `upper + lower + day branch`.
#[must_use]
pub fn from_numbers(
    upper: u32,
    lower: u32,
    changing: Option<u32>,
    day_branch: EarthlyBranch,
) -> FourSymbols {
    // Widened so large inputs keep their remainder modulo six.
    let changing = changing.unwrap_or_else(|| {
        let total = u64::from(upper) + u64::from(lower) + u64::from(day_branch.value());
        (total % 6) as u32
    });
    from_trigram_numbers(upper, lower, changing)
}

fn from_trigram_numbers(upper: u32, lower: u32, changing: u32) -> FourSymbols {
    let hexagram = Hexagram::from_trigrams(Trigram::from_number(upper), Trigram::from_number(lower));
    let changing_index = match changing % 6 {
        0 => 5,
        rem => rem as usize - 1,
    };
    array::from_fn(|index| FourSymbol::from_parts(hexagram.line(index), index == changing_index))
}

/// Lines that differ between `original` and `changed` become old lines with
/// the original polarity. Without a changed hexagram no line moves.
#[must_use]
pub fn from_hexagrams(original: Hexagram, changed: Option<Hexagram>) -> FourSymbols {
    let mask = changed.map_or(0, |changed| original.value() ^ changed.value());
    array::from_fn(|index| FourSymbol::from_parts(original.line(index), (mask >> index) & 1 == 1))
}

/// Validates raw line values (6, 7, 8 or 9), exactly six of them.
pub fn from_values(values: &[u8]) -> Result<FourSymbols, DivinationError> {
    Ok(FourSymbol::sequence_from_values(values)?)
}

/// Three-coin casting. `heads` is called three times per line, first line
/// first; heads count three and tails two, and the sum is the line value.
pub fn from_coin_tosses(mut heads: impl FnMut() -> bool) -> FourSymbols {
    array::from_fn(|_| {
        let total: u8 = (0..3).map(|_| if heads() { 3 } else { 2 }).sum();
        match total {
            6 => FourSymbol::OldYin,
            7 => FourSymbol::YoungYang,
            8 => FourSymbol::YoungYin,
            _ => FourSymbol::OldYang,
        }
    })
}

/// Three-coin casting with the thread-local random generator.
#[must_use]
pub fn random() -> FourSymbols {
    from_coin_tosses(rand::random::<bool>)
}

/// Hexagram whose yang lines are the yang four-symbols.
#[must_use]
pub fn hexagram_of(symbols: &FourSymbols) -> Hexagram {
    let bits = symbols
        .iter()
        .enumerate()
        .filter(|(_, symbol)| symbol.yin_yang() == YinYang::Yang)
        .fold(0u8, |bits, (index, _)| bits | (1 << index));
    Hexagram::from_bits(bits)
}

/// Bit mask of the changing four-symbols.
#[must_use]
pub fn changing_mask(symbols: &FourSymbols) -> u8 {
    symbols
        .iter()
        .enumerate()
        .filter(|(_, symbol)| symbol.is_changing())
        .fold(0u8, |mask, (index, _)| mask | (1 << index))
}
