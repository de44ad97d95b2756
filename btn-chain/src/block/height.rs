use std::convert::TryFrom;
use std::ops::{Add, Sub};

/// The length of the chain back to the genesis block.
///
/// Block heights can be offset by a signed number of blocks, or advanced
/// with [`Height::checked_add`]. Both return `None` instead of leaving the
/// valid range.
///
/// # Invariants
///
/// Users should not construct block heights greater than `Height::MAX`.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Height(pub u32);

impl std::str::FromStr for Height {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Height)
    }
}

impl std::fmt::Display for Height {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl Height {
    /// The genesis height.
    pub const MIN: Height = Height(0);

    /// The maximum Height.
    ///
    /// Users should not construct block heights greater than `Height::MAX`.
    pub const MAX: Height = Height(499_999_999);

    /// The maximum Height as a u32, for range patterns.
    pub const MAX_AS_U32: u32 = Self::MAX.0;

    /// Returns the height `blocks` after this one, or `None` if that height
    /// would be greater than `Height::MAX`.
    pub fn checked_add(self, blocks: u32) -> Option<Height> {
        self.0
            .checked_add(blocks)
            .filter(|height| *height <= Height::MAX_AS_U32)
            .map(Height)
    }

    /// Returns `self + offset` if it is a valid height.
    fn offset(self, offset: i64) -> Option<Height> {
        let height = i64::from(self.0).checked_add(offset)?;

        match u32::try_from(height).ok()? {
            h @ 0..=Height::MAX_AS_U32 => Some(Height(h)),
            _ => None,
        }
    }
}

// There is no Add<u32> or Sub<u32>, because they cause type inference issues
// for integer constants.

impl Add<i32> for Height {
    type Output = Option<Height>;

    fn add(self, rhs: i32) -> Option<Height> {
        self.offset(i64::from(rhs))
    }
}

impl Sub<i32> for Height {
    type Output = Option<Height>;

    fn sub(self, rhs: i32) -> Option<Height> {
        self.offset(-i64::from(rhs))
    }
}

#[test]
fn operator_tests() {
    btn_test::init();

    assert_eq!(Some(Height(2)), Height(1) + 1);
    assert_eq!(None, Height::MAX + 1);
    assert_eq!(Some(Height(0)), Height(1) + -1);
    assert_eq!(None, Height(0) + -1);
    // Out of range inputs are only caught once they are offset.
    assert_eq!(None, Height(Height::MAX_AS_U32 + 1) + 0);
    assert_eq!(None, Height(u32::MAX) + 0);

    assert_eq!(Some(Height(1)), Height(2) - 1);
    assert_eq!(None, Height(0) - 1);
    assert_eq!(Some(Height::MAX), Height(Height::MAX_AS_U32 + 1) - 1);
    assert_eq!(Some(Height(10)), Height(5) - -5);

    assert_eq!(Some(Height(10)), Height(4).checked_add(6));
    assert_eq!(None, Height::MAX.checked_add(1));
    assert_eq!(None, Height(0).checked_add(u32::MAX));

    assert_eq!("490271".parse::<Height>(), Ok(Height(490_271)));
    assert!("-1".parse::<Height>().is_err());
    assert_eq!(Height(501_000).to_string(), "501000");
}
