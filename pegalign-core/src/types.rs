pub type Token = u32;
pub type Link = u16;
pub type Prob = f64;

/// Token id reserved for the NULL word. Source sentences carry it at
/// index 0; target words aligned to position 0 have no real source cause.
pub const NULL_TOKEN: Token = 0;

/// Floor returned for any table entry that has never been estimated.
///
/// Unseen keys resolve to this value instead of zero so that early
/// iterations never divide by zero or collapse a whole product. The
/// resulting distributions may sum to slightly more than 1; the floor is
/// small enough to treat as zero. GIZA++ uses the more liberal 1e-7.
pub const MIN_PROB: Prob = 1.0e-12;

/// Sentences longer than this are rejected at parse time, which keeps
/// positions and fertility counts within `u16`.
pub const MAX_SENT_LEN: usize = 0x400;
