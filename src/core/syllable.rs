// src/core/syllable.rs
use crate::core::types::MatchResult;

/// One Korean display character, decomposed into normalized jamo
/// identities. Consonants are numbered 1..=19 in dictionary order
/// (ㄱ=1 .. ㅎ=19), simple vowels 1..=14 (ㅏ=1 .. ㅣ=14); `0` means
/// "absent". A compound vowel splits into two simple vowels, a cluster
/// final into two simple consonants, so every syllable fits in five
/// small integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub initial: u8,
    pub vowel0: u8,
    pub vowel1: u8,
    pub final0: u8,
    pub final1: u8,
}

/// First code point of the standalone compatibility-jamo consonant run
/// (ㄱ). The run ends at ㅎ; vowel jamo sit above it and do not decompose.
const JAMO_BASE: u32 = 0x3131;
const JAMO_LAST: u32 = 0x314E;

/// First and last composed syllable blocks (가..힣).
const SYLLABLE_BASE: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;

/// Unicode vowel slot -> (vowel0, vowel1) identities.
const VOWEL_TO_STANDARD: [(u8, u8); 21] = [
    (1, 0),   // ㅏ
    (2, 0),   // ㅐ
    (3, 0),   // ㅑ
    (4, 0),   // ㅒ
    (5, 0),   // ㅓ
    (6, 0),   // ㅔ
    (7, 0),   // ㅕ
    (8, 0),   // ㅖ
    (9, 0),   // ㅗ
    (9, 1),   // ㅘ
    (9, 2),   // ㅙ
    (9, 14),  // ㅚ
    (10, 0),  // ㅛ
    (11, 0),  // ㅜ
    (11, 5),  // ㅝ
    (11, 6),  // ㅞ
    (11, 14), // ㅟ
    (12, 0),  // ㅠ
    (13, 0),  // ㅡ
    (13, 14), // ㅢ
    (14, 0),  // ㅣ
];

/// Unicode final slot -> (final0, final1) identities. Slot 0 is "no final".
const FINAL_TO_STANDARD: [(u8, u8); 28] = [
    (0, 0),   //
    (1, 0),   // ㄱ
    (2, 0),   // ㄲ
    (1, 10),  // ㄳ
    (3, 0),   // ㄴ
    (3, 13),  // ㄵ
    (3, 19),  // ㄶ
    (4, 0),   // ㄷ
    (6, 0),   // ㄹ
    (6, 1),   // ㄺ
    (6, 7),   // ㄻ
    (6, 8),   // ㄼ
    (6, 10),  // ㄽ
    (6, 17),  // ㄾ
    (6, 18),  // ㄿ
    (6, 19),  // ㅀ
    (7, 0),   // ㅁ
    (8, 0),   // ㅂ
    (8, 10),  // ㅄ
    (10, 0),  // ㅅ
    (11, 0),  // ㅆ
    (12, 0),  // ㅇ
    (13, 0),  // ㅈ
    (15, 0),  // ㅊ
    (16, 0),  // ㅋ
    (17, 0),  // ㅌ
    (18, 0),  // ㅍ
    (19, 0),  // ㅎ
];

/// Standalone jamo slot -> consonant identity. `0` marks slots that hold
/// cluster jamo (ㄳ, ㄺ, ...) which are never typed on their own.
const SINGLE_TO_STANDARD: [u8; 30] = [
    1,  // ㄱ
    2,  // ㄲ
    0,  // ㄳ
    3,  // ㄴ
    0,  // ㄵ
    0,  // ㄶ
    4,  // ㄷ
    5,  // ㄸ
    6,  // ㄹ
    0,  // ㄺ
    0,  // ㄻ
    0,  // ㄼ
    0,  // ㄽ
    0,  // ㄾ
    0,  // ㄿ
    0,  // ㅀ
    7,  // ㅁ
    8,  // ㅂ
    9,  // ㅃ
    0,  // ㅄ
    10, // ㅅ
    11, // ㅆ
    12, // ㅇ
    13, // ㅈ
    14, // ㅉ
    15, // ㅊ
    16, // ㅋ
    17, // ㅌ
    18, // ㅍ
    19, // ㅎ
];

impl Syllable {
    /// Decomposes one code point into its jamo identities. Returns `None`
    /// for anything outside the standalone-consonant and composed-syllable
    /// ranges; never a partial syllable.
    pub fn decompose(c: char) -> Option<Syllable> {
        let code = c as u32;
        match code {
            JAMO_BASE..=JAMO_LAST => {
                let initial = SINGLE_TO_STANDARD[(code - JAMO_BASE) as usize];
                if initial == 0 {
                    return None;
                }
                Some(Syllable { initial, vowel0: 0, vowel1: 0, final0: 0, final1: 0 })
            }
            SYLLABLE_BASE..=SYLLABLE_LAST => {
                let offset = code - SYLLABLE_BASE;
                let (vowel0, vowel1) = VOWEL_TO_STANDARD[((offset / 28) % 21) as usize];
                let (final0, final1) = FINAL_TO_STANDARD[(offset % 28) as usize];

                Some(Syllable {
                    initial: (offset / 588) as u8 + 1,
                    vowel0,
                    vowel1,
                    final0,
                    final1,
                })
            }
            _ => None,
        }
    }

    /// Tests whether `self` (what the user has typed so far for one
    /// character position) could still grow into `target` (a candidate's
    /// complete character). `next` is the candidate's following character,
    /// consulted only to decide whether a trailing consonant the user
    /// typed really belongs to the next block being composed.
    pub fn sub_syllable_of(&self, target: &Syllable, next: Option<&Syllable>) -> MatchResult {
        // mismatched initial consonant
        if self.initial != target.initial {
            return MatchResult::None;
        }

        // both are just a letter
        if self.vowel0 == 0 && target.vowel0 == 0 {
            return MatchResult::Exact;
        }

        // haven't typed the vowel yet
        if self.vowel0 == 0 {
            return MatchResult::Part;
        }

        // wrong vowel
        if self.vowel0 != target.vowel0 {
            return MatchResult::None;
        }

        // just didn't put in the combo vowel yet
        if self.final0 == 0 && self.vowel1 == 0 && target.vowel1 != 0 {
            return MatchResult::Part;
        }

        // combo vowel is bad
        if self.vowel1 != target.vowel1 {
            return MatchResult::None;
        }

        if target.final0 == 0 {
            // both have no final
            if self.final0 == 0 {
                return MatchResult::Exact;
            }

            // can't match forward after typing two final consonants
            if self.final1 != 0 {
                return MatchResult::None;
            }

            // final consonant moves over to the next syllable
            if next.map_or(false, |n| self.final0 == n.initial) {
                return MatchResult::Part;
            }

            // goes too far, unrelated in the final consonant
            MatchResult::None
        } else {
            // haven't typed the final yet
            if self.final0 == 0 {
                return MatchResult::Part;
            }

            // completely different final consonant
            if self.final0 != target.final0 {
                return MatchResult::None;
            }

            if target.final1 == 0 {
                if self.final1 != 0 {
                    // the extra second final can move to the next syllable
                    if next.map_or(false, |n| n.initial == self.final1) {
                        return MatchResult::Part;
                    }

                    // a second final consonant is one too many
                    return MatchResult::None;
                }

                // the same single final consonant
                MatchResult::Exact
            } else {
                // just hasn't typed the second final consonant yet
                if self.final1 == 0 {
                    return MatchResult::Part;
                }

                // wrong second final consonant
                if self.final1 != target.final1 {
                    return MatchResult::None;
                }

                // both have the same second final consonant
                MatchResult::Exact
            }
        }
    }
}
