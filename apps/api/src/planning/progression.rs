//! Orders lessons from least to most cognitively demanding.

use crate::models::lesson::LessonBlock;

/// Stable-sorts blocks by ascending complexity and renumbers them `1..=N`.
pub fn apply_bloom_progression(blocks: &mut [LessonBlock]) {
    if blocks.len() <= 1 {
        return;
    }

    blocks.sort_by_key(|b| b.complexity_level.rank());
    for (index, block) in blocks.iter_mut().enumerate() {
        block.lesson_number = index as u32 + 1;
    }
}

/// True when no lesson is less complex than the one before it.
pub fn verify_bloom_progression(blocks: &[LessonBlock]) -> bool {
    blocks
        .windows(2)
        .all(|pair| pair[0].complexity_level.rank() <= pair[1].complexity_level.rank())
}
