//! Strongly-typed BTN amounts.
//!
//! An [`Amount`] is a count of base units, the smallest indivisible unit of
//! the currency. The `C` parameter restricts the range of values an amount
//! may hold, so that subsidies and running supply totals can't be negative.

use std::{
    cmp::Ordering,
    convert::{TryFrom, TryInto},
    marker::PhantomData,
    ops::RangeInclusive,
};

type Result<T, E = Error> = std::result::Result<T, E>;

/// A runtime validated type for representing amounts of base units
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "i64")]
#[serde(into = "i64")]
#[serde(bound = "C: Constraint + Clone")]
pub struct Amount<C = NegativeAllowed>(i64, PhantomData<C>);

impl<C> std::fmt::Debug for Amount<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple(&format!("Amount<{}>", std::any::type_name::<C>()))
            .field(&self.0)
            .finish()
    }
}

impl<C> std::fmt::Display for Amount<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(
            f,
            "{}{}.{:08} BTN",
            sign,
            abs / COIN as u64,
            abs % COIN as u64
        )
    }
}

impl<C> Amount<C> {
    /// Returns the number of base units in this amount.
    pub fn value(&self) -> i64 {
        self.0
    }

    /// Create a zero `Amount`
    pub fn zero() -> Amount<C>
    where
        C: Constraint,
    {
        0i64.try_into().expect("an amount of 0 is always valid")
    }

    /// Halve this amount `halvings` times, rounding down.
    ///
    /// Halving [`MAX_HALVINGS`] or more times yields zero.
    pub fn halve(self, halvings: u32) -> Amount<C> {
        if halvings >= MAX_HALVINGS {
            return Amount(0, PhantomData);
        }

        // Arithmetic right shift of a negative value rounds toward negative
        // infinity, which keeps the result inside the constraint's range.
        Amount(self.0 >> halvings, PhantomData)
    }
}

impl<C> std::ops::Add<Amount<C>> for Amount<C>
where
    C: Constraint,
{
    type Output = Result<Amount<C>>;

    fn add(self, rhs: Amount<C>) -> Self::Output {
        let value = self
            .0
            .checked_add(rhs.0)
            .expect("adding two constrained Amounts is always within an i64");
        value.try_into()
    }
}

impl<C> std::ops::Add<Amount<C>> for Result<Amount<C>>
where
    C: Constraint,
{
    type Output = Result<Amount<C>>;

    fn add(self, rhs: Amount<C>) -> Self::Output {
        self? + rhs
    }
}

impl<C> std::ops::Add<Result<Amount<C>>> for Amount<C>
where
    C: Constraint,
{
    type Output = Result<Amount<C>>;

    fn add(self, rhs: Result<Amount<C>>) -> Self::Output {
        self + rhs?
    }
}

impl<C> std::ops::AddAssign<Amount<C>> for Result<Amount<C>>
where
    Amount<C>: Copy,
    C: Constraint,
{
    fn add_assign(&mut self, rhs: Amount<C>) {
        if let Ok(lhs) = *self {
            *self = lhs + rhs;
        }
    }
}

impl<C> std::ops::Mul<u64> for Amount<C>
where
    C: Constraint,
{
    type Output = Result<Amount<C>>;

    fn mul(self, rhs: u64) -> Self::Output {
        let value = i128::from(self.0) * i128::from(rhs);
        let value = i64::try_from(value).map_err(|_| Error::MultiplicationOverflow {
            amount: self.0,
            multiplier: rhs,
            overflowing_result: value,
        })?;

        value.try_into()
    }
}

impl<C> From<Amount<C>> for i64 {
    fn from(amount: Amount<C>) -> Self {
        amount.0
    }
}

impl<C> TryFrom<i64> for Amount<C>
where
    C: Constraint,
{
    type Error = Error;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        C::validate(value).map(|v| Self(v, PhantomData))
    }
}

impl<C> TryFrom<u64> for Amount<C>
where
    C: Constraint,
{
    type Error = Error;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        let value = value
            .try_into()
            .map_err(|source| Error::Convert { value, source })?;

        C::validate(value).map(|v| Self(v, PhantomData))
    }
}

impl<C> std::hash::Hash for Amount<C> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<C1, C2> PartialEq<Amount<C2>> for Amount<C1> {
    fn eq(&self, other: &Amount<C2>) -> bool {
        self.0.eq(&other.0)
    }
}

impl<C> Eq for Amount<C> {}

impl<C1, C2> PartialOrd<Amount<C2>> for Amount<C1> {
    fn partial_cmp(&self, other: &Amount<C2>) -> Option<Ordering> {
        Some(self.0.cmp(&other.0))
    }
}

impl<C> Ord for Amount<C> {
    fn cmp(&self, other: &Amount<C>) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<C> std::iter::Sum<Amount<C>> for Result<Amount<C>>
where
    C: Constraint,
{
    fn sum<I: Iterator<Item = Amount<C>>>(mut iter: I) -> Self {
        iter.try_fold(Amount::zero(), |acc, amount| acc + amount)
    }
}

impl<'amt, C> std::iter::Sum<&'amt Amount<C>> for Result<Amount<C>>
where
    C: Constraint + std::marker::Copy + 'amt,
{
    fn sum<I: Iterator<Item = &'amt Amount<C>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

#[derive(thiserror::Error, Debug, displaydoc::Display, Clone, PartialEq)]
#[allow(missing_docs)]
/// Errors that can be returned when validating `Amount`s
pub enum Error {
    /// input {value} is outside of valid range for base unit Amount, valid_range={range:?}
    Contains {
        range: RangeInclusive<i64>,
        value: i64,
    },
    /// u64 {value} could not be converted to an i64 Amount
    Convert {
        value: u64,
        source: std::num::TryFromIntError,
    },
    /// {amount} * {multiplier} overflowed an i64, overflowing_result={overflowing_result}
    MultiplicationOverflow {
        amount: i64,
        multiplier: u64,
        overflowing_result: i128,
    },
}

/// Marker type for `Amount` that allows negative values.
///
/// ```
/// # use btn_chain::amount::{Constraint, MAX_MONEY, NegativeAllowed};
/// assert_eq!(
///     NegativeAllowed::valid_range(),
///     -MAX_MONEY..=MAX_MONEY,
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NegativeAllowed;

impl Constraint for NegativeAllowed {
    fn valid_range() -> RangeInclusive<i64> {
        -MAX_MONEY..=MAX_MONEY
    }
}

/// Marker type for `Amount` that requires nonnegative values.
///
/// ```
/// # use btn_chain::amount::{Constraint, MAX_MONEY, NonNegative};
/// assert_eq!(
///     NonNegative::valid_range(),
///     0..=MAX_MONEY,
/// );
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NonNegative;

impl Constraint for NonNegative {
    fn valid_range() -> RangeInclusive<i64> {
        0..=MAX_MONEY
    }
}

/// Number of base units in one whole coin.
pub const COIN: i64 = 100_000_000;

/// The maximum number of base units that can ever exist.
///
/// Every valid amount, and every running total of block subsidies, lies in
/// `0..=MAX_MONEY`.
pub const MAX_MONEY: i64 = 21_000_000_000 * COIN;

/// Halving an amount this many times always exhausts it.
pub const MAX_HALVINGS: u32 = 64;

/// Returns true if `value` is a valid nonnegative amount of base units.
pub fn money_range(value: i64) -> bool {
    NonNegative::valid_range().contains(&value)
}

/// A trait for defining constraints on `Amount`
pub trait Constraint {
    /// Returns the range of values that are valid under this constraint
    fn valid_range() -> RangeInclusive<i64>;

    /// Check if an input value is within the valid range
    fn validate(value: i64) -> Result<i64, Error> {
        let range = Self::valid_range();

        if !range.contains(&value) {
            Err(Error::Contains { range, value })
        } else {
            Ok(value)
        }
    }
}

#[cfg(any(test, feature = "proptest-impl"))]
use proptest::prelude::*;

#[cfg(any(test, feature = "proptest-impl"))]
impl<C> Arbitrary for Amount<C>
where
    C: Constraint + std::fmt::Debug + 'static,
{
    type Parameters = ();

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        C::valid_range()
            .prop_map(|v| Self(v, PhantomData))
            .boxed()
    }

    type Strategy = BoxedStrategy<Self>;
}

#[cfg(test)]
mod test {
    use super::*;

    use color_eyre::eyre::Result;

    #[test]
    fn test_add_bare() -> Result<()> {
        btn_test::init();

        let one: Amount = 1i64.try_into()?;
        let neg_one: Amount = (-1i64).try_into()?;

        let zero: Amount = Amount::zero();
        let new_zero = one + neg_one;

        assert_eq!(zero, new_zero?);

        Ok(())
    }

    #[test]
    fn test_add_opt_lhs() -> Result<()> {
        btn_test::init();

        let one: Amount = 1i64.try_into()?;
        let one = Ok(one);
        let neg_one: Amount = (-1i64).try_into()?;

        let zero: Amount = Amount::zero();
        let new_zero = one + neg_one;

        assert_eq!(zero, new_zero?);

        Ok(())
    }

    #[test]
    fn test_add_assign() -> Result<()> {
        btn_test::init();

        let one: Amount = 1i64.try_into()?;
        let neg_one: Amount = (-1i64).try_into()?;
        let mut neg_one = Ok(neg_one);

        let zero: Amount = Amount::zero();
        neg_one += one;
        let new_zero = neg_one;

        assert_eq!(Ok(zero), new_zero);

        Ok(())
    }

    #[test]
    fn add_past_max_money_fails() -> Result<()> {
        btn_test::init();

        let max: Amount<NonNegative> = MAX_MONEY.try_into()?;
        let one: Amount<NonNegative> = 1i64.try_into()?;

        assert!(matches!(
            max + one,
            Err(Error::Contains { value, .. }) if value == MAX_MONEY + 1
        ));

        Ok(())
    }

    #[test]
    fn nonnegative_rejects_negative() {
        btn_test::init();

        assert!(Amount::<NonNegative>::try_from(-1i64).is_err());
        assert!(Amount::<NegativeAllowed>::try_from(-1i64).is_ok());
        assert!(Amount::<NonNegative>::try_from(u64::MAX).is_err());
    }

    #[test]
    fn money_range_bounds() {
        btn_test::init();

        assert!(money_range(0));
        assert!(money_range(MAX_MONEY));
        assert!(!money_range(-1));
        assert!(!money_range(MAX_MONEY + 1));
    }

    #[test]
    fn halve_exhausts_at_sixty_four() -> Result<()> {
        btn_test::init();

        let initial: Amount<NonNegative> = (50 * COIN).try_into()?;

        assert_eq!(initial.halve(0), initial);
        assert_eq!(initial.halve(1).value(), 25 * COIN);
        assert_eq!(initial.halve(32).value(), 1);
        assert_eq!(initial.halve(33).value(), 0);
        assert_eq!(initial.halve(63).value(), 0);
        assert_eq!(initial.halve(64).value(), 0);
        assert_eq!(initial.halve(u32::MAX).value(), 0);

        Ok(())
    }

    #[test]
    fn multiplication_is_range_checked() -> Result<()> {
        btn_test::init();

        let subsidy: Amount<NonNegative> = (10 * COIN).try_into()?;

        assert_eq!((subsidy * 3)?.value(), 30 * COIN);
        assert_eq!((subsidy * 0)?, Amount::<NonNegative>::zero());
        assert!(matches!(
            subsidy * 2_100_000_001,
            Err(Error::Contains { .. })
        ));
        assert!(matches!(
            subsidy * u64::MAX,
            Err(Error::MultiplicationOverflow { multiplier, .. }) if multiplier == u64::MAX
        ));

        Ok(())
    }

    #[test]
    fn display_whole_and_fractional() -> Result<()> {
        btn_test::init();

        let amount: Amount<NonNegative> = (12 * COIN + 50_000_000).try_into()?;
        assert_eq!(amount.to_string(), "12.50000000 BTN");

        let neg: Amount = (-1i64).try_into()?;
        assert_eq!(neg.to_string(), "-0.00000001 BTN");

        Ok(())
    }

    #[test]
    fn serde_uses_base_units_and_rejects_out_of_range() {
        btn_test::init();

        let ok: Amount<NonNegative> = serde_json::from_str("5000000000").expect("valid amount");
        assert_eq!(ok.value(), 50 * COIN);
        assert_eq!(
            serde_json::to_string(&ok).expect("amounts serialize"),
            "5000000000"
        );

        let neg: Amount<NegativeAllowed> = serde_json::from_str("-1").expect("valid amount");
        assert_eq!(serde_json::to_string(&neg).expect("amounts serialize"), "-1");

        assert!(serde_json::from_str::<Amount<NonNegative>>("-1").is_err());
    }

    proptest! {
        #[test]
        fn sum_matches_checked_fold(amounts in proptest::collection::vec(any::<Amount<NonNegative>>(), 0..8)) {
            btn_test::init();

            let expected = amounts
                .iter()
                .try_fold(0i64, |acc, a| acc.checked_add(a.value()))
                .filter(|total| money_range(*total));
            let sum: Result<Amount<NonNegative>, Error> = amounts.iter().sum();

            prop_assert_eq!(sum.ok().map(|a| a.value()), expected);
        }
    }
}
