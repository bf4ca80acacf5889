//! The rolling 16-bit checksum used throughout the .puz format.

/// Folds `data` into `seed`: rotate right by one bit, then add the byte.
pub fn cksum_region(data: &[u8], seed: u16) -> u16 {
    data.iter().fold(seed, |cksum, &b| {
        let rotated = if cksum & 1 != 0 {
            (cksum >> 1) | 0x8000
        } else {
            cksum >> 1
        };
        rotated.wrapping_add(u16::from(b))
    })
}

/// Text sections that feed the whole-file checksum.
pub struct ChecksumText<'a> {
    pub title: &'a [u8],
    pub author: &'a [u8],
    pub copyright: &'a [u8],
    pub clues: &'a [&'a [u8]],
    pub notes: &'a [u8],
}

/// Checksum over the metadata strings.
///
/// Non-empty title, author, copyright and notes are folded in with their
/// terminator; clues are folded in without one.
pub fn text_checksum(text: &ChecksumText<'_>, seed: u16) -> u16 {
    let mut cksum = seed;
    for field in [text.title, text.author, text.copyright] {
        cksum = fold_terminated(field, cksum);
    }
    for clue in text.clues {
        cksum = cksum_region(clue, cksum);
    }
    fold_terminated(text.notes, cksum)
}

fn fold_terminated(field: &[u8], seed: u16) -> u16 {
    if field.is_empty() {
        return seed;
    }
    cksum_region(&[0], cksum_region(field, seed))
}
